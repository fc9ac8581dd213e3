use super::{format_type_name, to_snake_case, Generator, GeneratorOptions, Language, NamingConvention};
use crate::error::Error;
use crate::schema::Schema;

pub struct TypeScriptGenerator {
    options: GeneratorOptions,
}

impl TypeScriptGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        // TypeScript keeps the wire name unless snake_case is requested.
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => key.to_string(),
        }
    }

    fn ts_type(&self, schema: &Schema, indent: &str) -> String {
        match schema {
            Schema::String => "string".to_string(),
            Schema::Number => "number".to_string(),
            Schema::Boolean => "boolean".to_string(),
            Schema::Array { items } => format!("{}[]", self.ts_type(items, indent)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "Record<string, any>".to_string()
            }
            Schema::Object { .. } => {
                // Nested objects render as inline structural literals.
                let inner = format!("{}  ", indent);
                format!(
                    "{{\n{}{}}}",
                    self.fields(schema, &inner),
                    indent
                )
            }
            Schema::Null | Schema::Unknown => "any".to_string(),
        }
    }

    fn fields(&self, schema: &Schema, indent: &str) -> String {
        let Schema::Object {
            properties,
            required,
        } = schema
        else {
            return String::new();
        };

        let mut out = String::new();
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            if self.options.use_annotations && field_name != *key {
                out.push_str(&format!("{}@JsonProperty('{}')\n", indent, key));
            }
            let optional = if required.contains(key) { "" } else { "?" };
            out.push_str(&format!(
                "{}{}{}: {};\n",
                indent,
                field_name,
                optional,
                self.ts_type(prop, indent)
            ));
        }
        out
    }
}

impl Generator for TypeScriptGenerator {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn generate(&self, schema: &Schema, type_name: &str) -> Result<String, Error> {
        if !schema.is_object() {
            return Err(Error::generation(type_name, "root schema is not an object"));
        }

        let class_name = format_type_name(type_name, &self.options);
        let mut out = String::new();

        // The decorator only appears when a field name diverges from its wire
        // name, which TypeScript does solely under snake_case.
        let needs_mapper = self.options.use_annotations
            && self.options.naming_convention == NamingConvention::SnakeCase;
        if needs_mapper {
            out.push_str("import { JsonProperty } from \"json-typescript-mapper\";\n\n");
        }

        if self.options.generate_comments {
            out.push_str(&format!(
                "/** {} generated from a sample JSON payload. */\n",
                class_name
            ));
        }

        out.push_str(&format!("export interface {} {{\n", class_name));
        out.push_str(&self.fields(schema, "  "));
        out.push_str("}\n");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;

    fn generate(value: serde_json::Value, options: GeneratorOptions) -> String {
        let schema = Schema::infer(&value);
        TypeScriptGenerator::new(options)
            .generate(&schema, "User")
            .unwrap()
    }

    #[test]
    fn required_fields_are_not_optional() {
        let code = generate(
            json!({"id": 1, "name": "John Doe"}),
            GeneratorOptions::default(),
        );
        assert!(code.contains("export interface User {"));
        assert!(code.contains("  id: number;"));
        assert!(code.contains("  name: string;"));
        assert!(!code.contains("id?:"));
    }

    #[test]
    fn missing_required_set_marks_fields_optional() {
        let schema = Schema::infer(&json!({"id": 1, "name": "x"}));
        let schema = match schema {
            Schema::Object { properties, .. } => Schema::Object {
                properties,
                required: Default::default(),
            },
            other => other,
        };
        let code = TypeScriptGenerator::new(GeneratorOptions::default())
            .generate(&schema, "User")
            .unwrap();
        assert!(code.contains("id?: number;"));
        assert!(code.contains("name?: string;"));
    }

    #[test]
    fn nested_objects_render_inline() {
        let code = generate(
            json!({"addresses": [{"street": "123 Main St"}]}),
            GeneratorOptions::default(),
        );
        assert!(code.contains("addresses: {"));
        assert!(code.contains("street: string;"));
        assert!(code.contains("}[];"));
    }

    #[test]
    fn empty_array_items_render_as_any() {
        let code = generate(json!({"tags": []}), GeneratorOptions::default());
        assert!(code.contains("tags: any[];"));
    }

    #[test]
    fn snake_case_emits_wire_name_decorators() {
        let options = GeneratorOptions {
            naming_convention: NamingConvention::SnakeCase,
            ..Default::default()
        };
        let code = generate(json!({"isActive": true}), options);
        assert!(code.contains("import { JsonProperty } from \"json-typescript-mapper\";"));
        assert!(code.contains("@JsonProperty('isActive')"));
        assert!(code.contains("is_active: boolean;"));
    }
}

use super::{
    format_type_name, to_pascal_case, to_snake_case, Generator, GeneratorOptions, Language,
    NamingConvention,
};
use crate::error::Error;
use crate::schema::Schema;

pub struct GoGenerator {
    options: GeneratorOptions,
}

impl GoGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => to_pascal_case(key),
        }
    }

    fn go_type(&self, schema: &Schema, struct_name: &str) -> String {
        match schema {
            Schema::String => "string".to_string(),
            Schema::Number => "float64".to_string(),
            Schema::Boolean => "bool".to_string(),
            Schema::Array { items } => format!("[]{}", self.go_type(items, struct_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "map[string]interface{}".to_string()
            }
            Schema::Object { .. } => struct_name.to_string(),
            Schema::Null | Schema::Unknown => "interface{}".to_string(),
        }
    }

    /// Optional fields become pointers; slices, maps and interface{} are
    /// already nilable and stay as they are.
    fn optional_type(&self, go_type: String) -> String {
        if go_type.starts_with("[]")
            || go_type.starts_with("map[")
            || go_type == "interface{}"
        {
            go_type
        } else {
            format!("*{}", go_type)
        }
    }
}

impl Generator for GoGenerator {
    fn language(&self) -> Language {
        Language::Go
    }

    fn generate(&self, schema: &Schema, type_name: &str) -> Result<String, Error> {
        let Schema::Object {
            properties,
            required,
        } = schema
        else {
            return Err(Error::generation(type_name, "root schema is not an object"));
        };

        let struct_name = format_type_name(type_name, &self.options);

        let mut fields = Vec::new();
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            let mut go_type = self.go_type(prop, &struct_name);
            if !required.contains(key) {
                go_type = self.optional_type(go_type);
            }
            // Struct tags carry the wire name unconditionally.
            fields.push(format!(
                "    {} {} `json:\"{}\"`",
                field_name, go_type, key
            ));
        }

        let mut out = String::from("package models\n\n");
        if self.options.generate_comments {
            out.push_str(&format!(
                "// {} is generated from a sample JSON payload.\n",
                struct_name
            ));
        }
        out.push_str(&format!("type {} struct {{\n", struct_name));
        out.push_str(&fields.join("\n"));
        out.push_str("\n}\n");

        Ok(out)
    }
}

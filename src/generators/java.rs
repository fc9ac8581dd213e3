use super::{
    format_type_name, to_camel_case, to_pascal_case, to_snake_case, Generator, GeneratorOptions,
    Language, NamingConvention,
};
use crate::error::Error;
use crate::schema::Schema;

pub struct JavaGenerator {
    options: GeneratorOptions,
}

impl JavaGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => to_camel_case(key),
        }
    }

    fn java_type(&self, schema: &Schema, class_name: &str) -> String {
        match schema {
            Schema::String => "String".to_string(),
            Schema::Number => "Double".to_string(),
            Schema::Boolean => "Boolean".to_string(),
            Schema::Array { items } => format!("List<{}>", self.java_type(items, class_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "Map<String, Object>".to_string()
            }
            Schema::Object { .. } => class_name.to_string(),
            Schema::Null | Schema::Unknown => "Object".to_string(),
        }
    }
}

impl Generator for JavaGenerator {
    fn language(&self) -> Language {
        Language::Java
    }

    fn generate(&self, schema: &Schema, type_name: &str) -> Result<String, Error> {
        let Schema::Object {
            properties,
            required,
        } = schema
        else {
            return Err(Error::generation(type_name, "root schema is not an object"));
        };

        let class_name = format_type_name(type_name, &self.options);
        let use_validation = self.options.generate_validation;

        let mut imports = vec!["import java.util.*;".to_string()];
        if self.options.use_annotations {
            imports.push("import com.fasterxml.jackson.annotation.*;".to_string());
        }
        if self.options.use_lombok {
            imports.push("import lombok.*;".to_string());
        }
        if use_validation {
            imports.push("import jakarta.validation.constraints.*;".to_string());
        }

        let mut class_annotations = Vec::new();
        if self.options.use_lombok {
            class_annotations.push("@Data");
            if self.options.generate_builders {
                class_annotations.push("@Builder");
            }
            class_annotations.push("@NoArgsConstructor");
            class_annotations.push("@AllArgsConstructor");
        }
        if self.options.use_annotations {
            class_annotations.push("@JsonIgnoreProperties(ignoreUnknown = true)");
        }

        let mut fields = Vec::new();
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            let mut lines = Vec::new();
            if self.options.use_annotations && field_name != *key {
                lines.push(format!("    @JsonProperty(\"{}\")", key));
            }
            if use_validation && required.contains(key) {
                lines.push("    @NotNull".to_string());
            }
            lines.push(format!(
                "    private {} {};",
                self.java_type(prop, &class_name),
                field_name
            ));
            fields.push(lines.join("\n"));
        }

        let mut accessors = Vec::new();
        if !self.options.use_lombok {
            for (key, prop) in properties {
                let field_name = self.field_name(key);
                let pascal_key = to_pascal_case(key);
                let java_type = self.java_type(prop, &class_name);
                accessors.push(format!(
                    "    public {java_type} get{pascal_key}() {{\n        return {field_name};\n    }}\n\n    public void set{pascal_key}({java_type} {field_name}) {{\n        this.{field_name} = {field_name};\n    }}"
                ));
            }
        }

        let mut out = String::new();
        out.push_str(&imports.join("\n"));
        out.push_str("\n\n");
        if self.options.generate_comments {
            out.push_str(&format!(
                "/** {} generated from a sample JSON payload. */\n",
                class_name
            ));
        }
        if !class_annotations.is_empty() {
            out.push_str(&class_annotations.join("\n"));
            out.push('\n');
        }
        out.push_str(&format!("public class {} {{\n", class_name));
        out.push_str(&fields.join("\n\n"));
        if !accessors.is_empty() {
            out.push_str("\n\n");
            out.push_str(&accessors.join("\n\n"));
        }
        out.push_str("\n}\n");

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generate(value: serde_json::Value, options: GeneratorOptions) -> String {
        let schema = Schema::infer(&value);
        JavaGenerator::new(options).generate(&schema, "User").unwrap()
    }

    #[test]
    fn numbers_always_map_to_double() {
        let code = generate(json!({"id": 1, "score": 1.5}), GeneratorOptions::default());
        assert!(code.contains("private Double id;"));
        assert!(code.contains("private Double score;"));
        assert!(!code.contains("Integer"));
        assert!(!code.contains("Long"));
    }

    #[test]
    fn generates_getters_and_setters_without_lombok() {
        let code = generate(json!({"name": "John Doe"}), GeneratorOptions::default());
        assert!(code.contains("public class User {"));
        assert!(code.contains("public String getName()"));
        assert!(code.contains("public void setName(String name)"));
    }

    #[test]
    fn lombok_replaces_accessors() {
        let options = GeneratorOptions {
            use_lombok: true,
            generate_builders: true,
            ..Default::default()
        };
        let code = generate(json!({"name": "John Doe"}), options);
        assert!(code.contains("import lombok.*;"));
        assert!(code.contains("@Data"));
        assert!(code.contains("@Builder"));
        assert!(!code.contains("public String getName()"));
    }

    #[test]
    fn wire_names_preserved_when_field_name_differs() {
        let code = generate(json!({"user_id": 1}), GeneratorOptions::default());
        assert!(code.contains("@JsonProperty(\"user_id\")"));
        assert!(code.contains("private Double userId;"));
    }

    #[test]
    fn validation_marks_required_fields() {
        let options = GeneratorOptions {
            generate_validation: true,
            ..Default::default()
        };
        let code = generate(json!({"id": 1, "nickname": null}), options);
        assert!(code.contains("import jakarta.validation.constraints.*;"));
        let id_field = code.find("private Double id;").unwrap();
        let not_null = code.find("@NotNull").unwrap();
        assert!(not_null < id_field);
        assert!(code.contains("private Object nickname;"));
    }

    #[test]
    fn arrays_use_list_and_empty_arrays_fall_back_to_object() {
        let code = generate(
            json!({"names": ["a"], "tags": []}),
            GeneratorOptions::default(),
        );
        assert!(code.contains("private List<String> names;"));
        assert!(code.contains("private List<Object> tags;"));
    }
}

use super::{
    format_type_name, to_camel_case, to_snake_case, Generator, GeneratorOptions, Language,
    NamingConvention,
};
use crate::error::Error;
use crate::schema::Schema;

pub struct SwiftGenerator {
    options: GeneratorOptions,
}

impl SwiftGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => to_camel_case(key),
        }
    }

    fn swift_type(&self, schema: &Schema, struct_name: &str) -> String {
        match schema {
            Schema::String => "String".to_string(),
            Schema::Number => "Double".to_string(),
            Schema::Boolean => "Bool".to_string(),
            Schema::Array { items } => format!("[{}]", self.swift_type(items, struct_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "[String: Any]".to_string()
            }
            Schema::Object { .. } => struct_name.to_string(),
            Schema::Null | Schema::Unknown => "Any".to_string(),
        }
    }
}

impl Generator for SwiftGenerator {
    fn language(&self) -> Language {
        Language::Swift
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
        let mut any_renamed = false;
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            if field_name != *key {
                any_renamed = true;
            }
            let optional = if required.contains(key) { "" } else { "?" };
            fields.push(format!(
                "    let {}: {}{}",
                field_name,
                self.swift_type(prop, &struct_name),
                optional
            ));
        }

        let coding_keys = if self.options.use_annotations && any_renamed {
            let mut cases = Vec::new();
            for key in properties.keys() {
                let field_name = self.field_name(key);
                if field_name == *key {
                    cases.push(format!("        case {}", field_name));
                } else {
                    cases.push(format!("        case {} = \"{}\"", field_name, key));
                }
            }
            format!(
                "\n\n    enum CodingKeys: String, CodingKey {{\n{}\n    }}",
                cases.join("\n")
            )
        } else {
            String::new()
        };

        let mut conformances = vec!["Codable"];
        if self.options.generate_equals_and_hash {
            conformances.push("Equatable");
            conformances.push("Hashable");
        }

        let mut out = String::new();
        if self.options.generate_comments {
            out.push_str(&format!(
                "/// {} generated from a sample JSON payload.\n",
                struct_name
            ));
        }
        out.push_str(&format!(
            "struct {}: {} {{\n",
            struct_name,
            conformances.join(", ")
        ));
        out.push_str(&fields.join("\n"));
        out.push_str(&coding_keys);
        out.push_str("\n}\n");

        Ok(out)
    }
}

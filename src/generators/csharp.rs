use super::{
    format_type_name, to_pascal_case, to_snake_case, Generator, GeneratorOptions, Language,
    NamingConvention,
};
use crate::error::Error;
use crate::schema::Schema;

pub struct CSharpGenerator {
    options: GeneratorOptions,
}

impl CSharpGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => to_pascal_case(key),
        }
    }

    fn cs_type(&self, schema: &Schema, class_name: &str) -> String {
        match schema {
            Schema::String => "string".to_string(),
            Schema::Number => "double".to_string(),
            Schema::Boolean => "bool".to_string(),
            Schema::Array { items } => format!("List<{}>", self.cs_type(items, class_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "Dictionary<string, object>".to_string()
            }
            Schema::Object { .. } => class_name.to_string(),
            Schema::Null | Schema::Unknown => "object".to_string(),
        }
    }
}

impl Generator for CSharpGenerator {
    fn language(&self) -> Language {
        Language::CSharp
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

        let mut imports = vec![
            "using System;".to_string(),
            "using System.Collections.Generic;".to_string(),
        ];
        if self.options.use_annotations {
            if self.options.use_system_text_json {
                imports.push("using System.Text.Json.Serialization;".to_string());
            } else {
                imports.push("using Newtonsoft.Json;".to_string());
            }
        }
        if self.options.generate_validation {
            imports.push("using System.ComponentModel.DataAnnotations;".to_string());
        }

        let mut fields = Vec::new();
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            let is_required = required.contains(key);
            let base_type = self.cs_type(prop, &class_name);
            let cs_type = if is_required {
                base_type
            } else {
                format!("{}?", base_type)
            };

            let mut lines = Vec::new();
            if self.options.use_annotations && field_name != *key {
                if self.options.use_system_text_json {
                    lines.push(format!("    [JsonPropertyName(\"{}\")]", key));
                } else {
                    lines.push(format!("    [JsonProperty(\"{}\")]", key));
                }
            }
            if self.options.generate_validation && is_required {
                lines.push("    [Required]".to_string());
            }
            lines.push(format!(
                "    public {} {} {{ get; set; }}",
                cs_type, field_name
            ));
            fields.push(lines.join("\n"));
        }

        let mut out = String::new();
        out.push_str(&imports.join("\n"));
        out.push_str("\n\n");
        if self.options.generate_comments {
            out.push_str("/// <summary>\n");
            out.push_str(&format!(
                "/// {} generated from a sample JSON payload.\n",
                class_name
            ));
            out.push_str("/// </summary>\n");
        }
        out.push_str(&format!("public class {}\n{{\n", class_name));
        out.push_str(&fields.join("\n\n"));
        out.push_str("\n}\n");

        Ok(out)
    }
}

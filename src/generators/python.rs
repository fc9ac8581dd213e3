use super::{format_type_name, to_snake_case, Generator, GeneratorOptions, Language, NamingConvention};
use crate::error::Error;
use crate::schema::Schema;

pub struct PythonGenerator {
    options: GeneratorOptions,
}

impl PythonGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => key.to_string(),
        }
    }

    fn python_type(&self, schema: &Schema, class_name: &str) -> String {
        match schema {
            Schema::String => "str".to_string(),
            Schema::Number => "float".to_string(),
            Schema::Boolean => "bool".to_string(),
            Schema::Array { items } => format!("List[{}]", self.python_type(items, class_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "Dict[str, Any]".to_string()
            }
            Schema::Object { .. } => class_name.to_string(),
            Schema::Null | Schema::Unknown => "Any".to_string(),
        }
    }
}

impl Generator for PythonGenerator {
    fn language(&self) -> Language {
        Language::Python
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

        let mut fields = Vec::new();
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            let base_type = self.python_type(prop, &class_name);
            let py_type = if required.contains(key) {
                base_type
            } else {
                format!("Optional[{}]", base_type)
            };
            let field = if self.options.use_annotations && field_name != *key {
                format!("Field(alias=\"{}\")", key)
            } else {
                "Field()".to_string()
            };
            fields.push(format!("    {}: {} = {}", field_name, py_type, field));
        }

        let mut out = String::new();
        out.push_str("from typing import List, Dict, Optional, Any\n");
        out.push_str("from pydantic import BaseModel, Field\n\n\n");
        out.push_str(&format!("class {}(BaseModel):\n", class_name));
        if self.options.generate_comments {
            out.push_str("    \"\"\"Generated from a sample JSON payload.\"\"\"\n\n");
        }
        out.push_str(&fields.join("\n"));
        out.push_str("\n\n    class Config:\n        allow_population_by_field_name = True\n");

        Ok(out)
    }
}

use super::{
    format_type_name, to_camel_case, to_snake_case, Generator, GeneratorOptions, Language,
    NamingConvention,
};
use crate::error::Error;
use crate::schema::Schema;

pub struct DartGenerator {
    options: GeneratorOptions,
}

impl DartGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => to_camel_case(key),
        }
    }

    fn dart_type(&self, schema: &Schema, class_name: &str) -> String {
        match schema {
            Schema::String => "String".to_string(),
            Schema::Number => "double".to_string(),
            Schema::Boolean => "bool".to_string(),
            Schema::Array { items } => format!("List<{}>", self.dart_type(items, class_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "Map<String, dynamic>".to_string()
            }
            Schema::Object { .. } => class_name.to_string(),
            Schema::Null | Schema::Unknown => "dynamic".to_string(),
        }
    }
}

impl Generator for DartGenerator {
    fn language(&self) -> Language {
        Language::Dart
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

        let mut out = String::new();
        if self.options.use_json_serializable {
            out.push_str("import 'package:json_annotation/json_annotation.dart';\n\n");
            out.push_str(&format!("part '{}.g.dart';\n\n", to_snake_case(&class_name)));
            out.push_str("@JsonSerializable()\n");
        }
        if self.options.generate_comments {
            out.push_str(&format!(
                "/// {} generated from a sample JSON payload.\n",
                class_name
            ));
        }
        out.push_str(&format!("class {} {{\n", class_name));

        let mut fields = Vec::new();
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            let base_type = self.dart_type(prop, &class_name);
            let dart_type = if required.contains(key) {
                base_type
            } else {
                // dynamic already admits null.
                if base_type == "dynamic" {
                    base_type
                } else {
                    format!("{}?", base_type)
                }
            };
            let mut lines = Vec::new();
            if self.options.use_annotations && field_name != *key {
                lines.push(format!("  @JsonKey(name: '{}')", key));
            }
            lines.push(format!("  final {} {};", dart_type, field_name));
            fields.push(lines.join("\n"));
        }
        out.push_str(&fields.join("\n\n"));

        let mut ctor_params = Vec::new();
        for key in properties.keys() {
            let field_name = self.field_name(key);
            if required.contains(key) {
                ctor_params.push(format!("    required this.{},", field_name));
            } else {
                ctor_params.push(format!("    this.{},", field_name));
            }
        }
        out.push_str(&format!(
            "\n\n  const {}({{\n{}\n  }});\n",
            class_name,
            ctor_params.join("\n")
        ));

        if self.options.use_json_serializable {
            out.push_str(&format!(
                "\n  factory {0}.fromJson(Map<String, dynamic> json) =>\n      _${0}FromJson(json);\n\n  Map<String, dynamic> toJson() => _${0}ToJson(this);\n",
                class_name
            ));
        }

        out.push_str("}\n");

        Ok(out)
    }
}

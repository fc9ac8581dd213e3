use super::{
    format_type_name, to_camel_case, to_snake_case, Generator, GeneratorOptions, Language,
    NamingConvention,
};
use crate::error::Error;
use crate::schema::Schema;

pub struct KotlinGenerator {
    options: GeneratorOptions,
}

impl KotlinGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn field_name(&self, key: &str) -> String {
        match self.options.naming_convention {
            NamingConvention::SnakeCase => to_snake_case(key),
            _ => to_camel_case(key),
        }
    }

    fn kotlin_type(&self, schema: &Schema, class_name: &str) -> String {
        match schema {
            Schema::String => "String".to_string(),
            Schema::Number => "Double".to_string(),
            Schema::Boolean => "Boolean".to_string(),
            Schema::Array { items } => format!("List<{}>", self.kotlin_type(items, class_name)),
            Schema::Object { properties, .. } if properties.is_empty() => {
                "Map<String, Any>".to_string()
            }
            Schema::Object { .. } => class_name.to_string(),
            Schema::Null | Schema::Unknown => "Any".to_string(),
        }
    }
}

impl Generator for KotlinGenerator {
    fn language(&self) -> Language {
        Language::Kotlin
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

        let mut params = Vec::new();
        let mut any_renamed = false;
        for (key, prop) in properties {
            let field_name = self.field_name(key);
            let optional = if required.contains(key) { "" } else { "?" };
            let mut lines = Vec::new();
            if self.options.use_annotations && field_name != *key {
                any_renamed = true;
                lines.push(format!("    @SerializedName(\"{}\")", key));
            }
            lines.push(format!(
                "    val {}: {}{}",
                field_name,
                self.kotlin_type(prop, &class_name),
                optional
            ));
            params.push(lines.join("\n"));
        }

        let mut out = String::new();
        if self.options.use_annotations && any_renamed {
            out.push_str("import com.google.gson.annotations.SerializedName\n\n");
        }
        if self.options.generate_comments {
            out.push_str(&format!(
                "/** {} generated from a sample JSON payload. */\n",
                class_name
            ));
        }
        out.push_str(&format!("data class {}(\n", class_name));
        out.push_str(&params.join(",\n\n"));
        out.push_str("\n)\n");

        Ok(out)
    }
}

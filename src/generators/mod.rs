pub mod csharp;
pub mod dart;
pub mod go;
pub mod java;
pub mod kotlin;
pub mod python;
pub mod swift;
pub mod typescript;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schema::Schema;

pub use csharp::CSharpGenerator;
pub use dart::DartGenerator;
pub use go::GoGenerator;
pub use java::JavaGenerator;
pub use kotlin::KotlinGenerator;
pub use python::PythonGenerator;
pub use swift::SwiftGenerator;
pub use typescript::TypeScriptGenerator;

/// The closed set of supported target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Java,
    Dart,
    Go,
    Python,
    CSharp,
    Swift,
    Kotlin,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::TypeScript,
        Language::Java,
        Language::Dart,
        Language::Go,
        Language::Python,
        Language::CSharp,
        Language::Swift,
        Language::Kotlin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Dart => "dart",
            Language::Go => "go",
            Language::Python => "python",
            Language::CSharp => "csharp",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        language_config(*self).extension
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Resolves a language identifier. This is the creation-time boundary:
    /// unknown identifiers fail here, before any generation starts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "java" => Ok(Language::Java),
            "dart" => Ok(Language::Dart),
            "go" | "golang" => Ok(Language::Go),
            "python" | "py" => Ok(Language::Python),
            "csharp" | "cs" => Ok(Language::CSharp),
            "swift" => Ok(Language::Swift),
            "kotlin" | "kt" => Ok(Language::Kotlin),
            other => Err(Error::UnsupportedLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NamingConvention {
    #[default]
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
}

/// Kind of object a caller wants to generate. Consumed by the capability
/// table so UI code can filter languages; generators render the same
/// declarations for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Dto,
    Poco,
    Bo,
    Dao,
}

/// Formatting options consumed uniformly by all generators. Flags a language
/// does not support are silently ignored by that language's generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    pub use_annotations: bool,
    pub use_lombok: bool,
    pub use_json_serializable: bool,
    pub use_system_text_json: bool,
    pub naming_convention: NamingConvention,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub generate_validation: bool,
    pub generate_builders: bool,
    pub generate_factory_methods: bool,
    pub generate_equals_and_hash: bool,
    pub generate_to_string: bool,
    pub generate_comments: bool,
    pub generate_null_checks: bool,
    pub object_types: Vec<ObjectType>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            use_annotations: true,
            use_lombok: false,
            use_json_serializable: false,
            use_system_text_json: false,
            naming_convention: NamingConvention::PascalCase,
            prefix: None,
            suffix: None,
            generate_validation: false,
            generate_builders: false,
            generate_factory_methods: false,
            generate_equals_and_hash: false,
            generate_to_string: false,
            generate_comments: false,
            generate_null_checks: false,
            object_types: vec![ObjectType::Dto],
        }
    }
}

/// Per-language capability descriptor, so calling UI code can hide controls a
/// language does not honor.
#[derive(Debug)]
pub struct LanguageConfig {
    pub name: &'static str,
    pub extension: &'static str,
    pub annotations: bool,
    pub lombok: bool,
    pub json_serializable: bool,
    pub system_text_json: bool,
    pub validation: bool,
    pub builders: bool,
    pub factory_methods: bool,
    pub equals_and_hash: bool,
    pub to_string: bool,
    pub comments: bool,
    pub null_checks: bool,
    pub object_types: &'static [ObjectType],
}

const ALL_OBJECT_TYPES: &[ObjectType] = &[
    ObjectType::Dto,
    ObjectType::Poco,
    ObjectType::Bo,
    ObjectType::Dao,
];

pub fn language_config(language: Language) -> &'static LanguageConfig {
    match language {
        Language::TypeScript => &LanguageConfig {
            name: "TypeScript",
            extension: ".ts",
            annotations: true,
            lombok: false,
            json_serializable: false,
            system_text_json: false,
            validation: true,
            builders: false,
            factory_methods: true,
            equals_and_hash: false,
            to_string: false,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::Java => &LanguageConfig {
            name: "Java",
            extension: ".java",
            annotations: true,
            lombok: true,
            json_serializable: false,
            system_text_json: false,
            validation: true,
            builders: true,
            factory_methods: true,
            equals_and_hash: true,
            to_string: true,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::Dart => &LanguageConfig {
            name: "Dart",
            extension: ".dart",
            annotations: true,
            lombok: false,
            json_serializable: true,
            system_text_json: false,
            validation: true,
            builders: false,
            factory_methods: true,
            equals_and_hash: true,
            to_string: true,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::Go => &LanguageConfig {
            name: "Go",
            extension: ".go",
            annotations: true,
            lombok: false,
            json_serializable: false,
            system_text_json: false,
            validation: true,
            builders: false,
            factory_methods: true,
            equals_and_hash: false,
            to_string: false,
            comments: true,
            null_checks: false,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::Python => &LanguageConfig {
            name: "Python",
            extension: ".py",
            annotations: true,
            lombok: false,
            json_serializable: false,
            system_text_json: false,
            validation: true,
            builders: false,
            factory_methods: true,
            equals_and_hash: true,
            to_string: true,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::CSharp => &LanguageConfig {
            name: "C#",
            extension: ".cs",
            annotations: true,
            lombok: false,
            json_serializable: false,
            system_text_json: true,
            validation: true,
            builders: true,
            factory_methods: true,
            equals_and_hash: true,
            to_string: true,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::Swift => &LanguageConfig {
            name: "Swift",
            extension: ".swift",
            annotations: true,
            lombok: false,
            json_serializable: false,
            system_text_json: false,
            validation: true,
            builders: false,
            factory_methods: true,
            equals_and_hash: true,
            to_string: true,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
        Language::Kotlin => &LanguageConfig {
            name: "Kotlin",
            extension: ".kt",
            annotations: true,
            lombok: false,
            json_serializable: false,
            system_text_json: false,
            validation: true,
            builders: false,
            factory_methods: true,
            equals_and_hash: true,
            to_string: true,
            comments: true,
            null_checks: true,
            object_types: ALL_OBJECT_TYPES,
        },
    }
}

/// Renders one named type from a schema.
///
/// Implementations are pure: no I/O, no shared mutable state, byte-identical
/// output for identical input. Each output is a self-contained source unit
/// with its own imports; dependencies are generated separately by iterating
/// the dependency set.
pub trait Generator {
    fn language(&self) -> Language;

    fn file_extension(&self) -> &'static str {
        self.language().file_extension()
    }

    fn generate(&self, schema: &Schema, type_name: &str) -> Result<String, Error>;
}

/// Builds the generator for a language over the closed variant set.
pub fn create_generator(language: Language, options: &GeneratorOptions) -> Box<dyn Generator> {
    match language {
        Language::TypeScript => Box::new(TypeScriptGenerator::new(options.clone())),
        Language::Java => Box::new(JavaGenerator::new(options.clone())),
        Language::Dart => Box::new(DartGenerator::new(options.clone())),
        Language::Go => Box::new(GoGenerator::new(options.clone())),
        Language::Python => Box::new(PythonGenerator::new(options.clone())),
        Language::CSharp => Box::new(CSharpGenerator::new(options.clone())),
        Language::Swift => Box::new(SwiftGenerator::new(options.clone())),
        Language::Kotlin => Box::new(KotlinGenerator::new(options.clone())),
    }
}

pub fn to_pascal_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = true;
    for ch in input.chars() {
        if ch == '-' || ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => pascal,
    }
}

pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for ch in input.chars() {
        if ch.is_uppercase() {
            out.push('_');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out.trim_start_matches('_').to_string()
}

/// Applies the naming convention and optional prefix/suffix to a type name.
pub(crate) fn format_type_name(name: &str, options: &GeneratorOptions) -> String {
    let formatted = match options.naming_convention {
        NamingConvention::PascalCase => to_pascal_case(name),
        NamingConvention::CamelCase => to_camel_case(name),
        NamingConvention::SnakeCase => to_snake_case(name),
    };
    format!(
        "{}{}{}",
        options.prefix.as_deref().unwrap_or(""),
        formatted,
        options.suffix.as_deref().unwrap_or("")
    )
}

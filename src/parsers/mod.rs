pub mod collection;
pub mod openapi;
pub mod postman;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::endpoint::ApiEndpoint;

pub use collection::CollectionParser;
pub use openapi::OpenApiParser;
pub use postman::PostmanParser;

/// Input parser trait - converts any supported document into an endpoint list
pub trait InputParser: Send + Sync {
    /// Name of the input format (e.g., "collection", "openapi", "postman")
    fn format_name(&self) -> &str;

    /// File extensions this parser supports
    fn supported_extensions(&self) -> Vec<&str>;

    /// Parse an input file into endpoints
    fn parse(&self, source: &Path) -> Result<Vec<ApiEndpoint>>;

    /// Validate input file before parsing
    fn validate(&self, source: &Path) -> Result<()> {
        if !source.exists() {
            anyhow::bail!("Input file not found: {:?}", source);
        }
        Ok(())
    }
}

/// Parser registry for managing available input parsers
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn InputParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: HashMap::new(),
        };

        // Register built-in parsers
        registry.register(Box::new(CollectionParser));
        registry.register(Box::new(OpenApiParser));
        registry.register(Box::new(PostmanParser));

        registry
    }

    pub fn register(&mut self, parser: Box<dyn InputParser>) {
        self.parsers.insert(parser.format_name().to_string(), parser);
    }

    pub fn get(&self, format: &str) -> Option<&dyn InputParser> {
        self.parsers.get(format).map(|parser| parser.as_ref())
    }

    pub fn available_formats(&self) -> Vec<&str> {
        self.parsers.keys().map(|s| s.as_str()).collect()
    }

    /// Detect the input format. YAML is always OpenAPI; JSON documents are
    /// sniffed by their top-level keys, since all three formats share the
    /// `.json` extension.
    pub fn detect_format(&self, source: &Path) -> Result<&'static str> {
        let ext = source
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if matches!(ext, "yaml" | "yml") {
            return Ok("openapi");
        }

        let content = fs::read_to_string(source)
            .with_context(|| format!("Failed to read input file: {:?}", source))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Input file is not valid JSON: {:?}", source))?;

        if value.get("openapi").is_some() || value.get("swagger").is_some() {
            return Ok("openapi");
        }
        let postman_schema = value
            .get("info")
            .and_then(|info| info.get("schema"))
            .and_then(|schema| schema.as_str());
        if postman_schema.is_some_and(|schema| schema.contains("getpostman.com")) {
            return Ok("postman");
        }
        Ok("collection")
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_all_builtin_formats() {
        let registry = ParserRegistry::new();
        for format in ["collection", "openapi", "postman"] {
            assert!(registry.get(format).is_some(), "missing parser: {format}");
        }
        assert!(registry.get("graphql").is_none());
    }

    #[test]
    fn detect_format_sniffs_json_documents() {
        let dir = std::env::temp_dir();
        let registry = ParserRegistry::new();

        let openapi = dir.join("dtoforge-detect-openapi.json");
        fs::write(&openapi, r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
        assert_eq!(registry.detect_format(&openapi).unwrap(), "openapi");

        let postman = dir.join("dtoforge-detect-postman.json");
        fs::write(
            &postman,
            r#"{"info": {"name": "c", "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"}, "item": []}"#,
        )
        .unwrap();
        assert_eq!(registry.detect_format(&postman).unwrap(), "postman");

        let collection = dir.join("dtoforge-detect-collection.json");
        fs::write(&collection, r#"[]"#).unwrap();
        assert_eq!(registry.detect_format(&collection).unwrap(), "collection");

        fs::remove_file(openapi).ok();
        fs::remove_file(postman).ok();
        fs::remove_file(collection).ok();
    }
}

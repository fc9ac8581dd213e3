use super::InputParser;
use crate::endpoint::{ApiCollection, ApiEndpoint};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parses the mock tool's native collection format: either a full collection
/// document or a bare endpoint array.
pub struct CollectionParser;

impl InputParser for CollectionParser {
    fn format_name(&self) -> &str {
        "collection"
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["json"]
    }

    fn parse(&self, source: &Path) -> Result<Vec<ApiEndpoint>> {
        self.validate(source)?;

        let content = fs::read_to_string(source)
            .with_context(|| format!("Failed to read collection: {:?}", source))?;

        if let Ok(endpoints) = serde_json::from_str::<Vec<ApiEndpoint>>(&content) {
            return Ok(endpoints);
        }

        let collection: ApiCollection = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse collection: {:?}", source))?;
        Ok(collection.endpoints)
    }
}

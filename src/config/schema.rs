use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extractor::ObjectRole;
use crate::generators::GeneratorOptions;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub version: String,

    #[serde(default)]
    pub input: Option<InputConfig>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub generations: Vec<GenerationConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InputConfig {
    #[serde(default)]
    pub format: Option<String>,

    pub source: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GenerationConfig {
    pub language: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bundle generated files into a single zip instead of a directory.
    #[serde(default)]
    pub archive: bool,

    /// Which endpoint bodies to extract objects from.
    #[serde(default = "default_roles")]
    pub roles: Vec<ObjectRole>,

    #[serde(default)]
    pub options: GeneratorOptions,
}

fn default_true() -> bool {
    true
}

fn default_roles() -> Vec<ObjectRole> {
    vec![ObjectRole::Response]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            input: None,
            output: Some(PathBuf::from("generated")),
            generations: vec![],
        }
    }
}

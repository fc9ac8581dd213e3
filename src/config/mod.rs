pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_with_cli_args, DEFAULT_CONFIG_PATH};
pub use schema::{Config, GenerationConfig, InputConfig};

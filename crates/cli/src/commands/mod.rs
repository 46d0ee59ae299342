pub mod ask;
pub mod doctor;
pub mod serve;

use std::path::Path;

use persona_config::AppConfig;

/// Load the config file plus environment overrides, with the path in the error.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    AppConfig::load(path).map_err(|e| format!("Failed to load config: {e}").into())
}

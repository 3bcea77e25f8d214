//! CLI commands.

pub mod batch;
pub mod config;
pub mod normalize;
pub mod output;
pub mod process;

use std::path::Path;

use mortgage_core::models::config::{MortgageConfig, default_config_path};

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MortgageConfig> {
    if let Some(path) = config_path {
        return Ok(MortgageConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(MortgageConfig::from_file(&default_path)?)
    } else {
        Ok(MortgageConfig::default())
    }
}

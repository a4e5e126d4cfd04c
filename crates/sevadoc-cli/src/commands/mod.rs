//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod models;
pub mod output;
pub mod text;

use std::path::{Path, PathBuf};

use sevadoc_core::SevadocConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sevadoc")
        .join("config.json")
}

/// Resolve the configuration file to use: the explicit path, else the default.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration from the explicit path, the default location, or defaults.
///
/// An explicit path must exist; a missing default file yields defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SevadocConfig> {
    if let Some(path) = config_path {
        return Ok(SevadocConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(SevadocConfig::from_file(&path)?)
    } else {
        Ok(SevadocConfig::default())
    }
}

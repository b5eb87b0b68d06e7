#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{StorageBackend, TomlConfig};

use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Loads the optional config file and applies command-line overrides.
pub fn resolve(
    config_path: Option<&str>,
    data_dir: Option<&str>,
    memory: bool,
) -> Result<TomlConfig> {
    let mut config = match config_path {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };

    if let Some(dir) = data_dir {
        config.storage.data_dir = dir.to_string();
    }
    if memory {
        config.storage.backend = StorageBackend::Memory;
    }

    config.validate()?;
    Ok(config)
}

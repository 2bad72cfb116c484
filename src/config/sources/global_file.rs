//! Global config file source: $XDG_CONFIG_HOME/merklehash/config.toml or the platform
//! config directory

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use config::FileFormat;
use directories::BaseDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => BaseDirs::new()?.config_dir().to_path_buf(),
    };
    Some(config_home.join("merklehash").join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(config_path) = global_config_path() {
        if config_path.exists() {
            builder = builder.add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        } else {
            debug!(
                config_path = %config_path.display(),
                "No global configuration file, using defaults"
            );
        }
    }
    Ok(builder)
}

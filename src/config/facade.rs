//! Config loader: assembles sources and deserializes the merged result.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::MerklehashConfig;
use crate::error::ApiError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Loads [`MerklehashConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file if present, then environment.
    pub fn load() -> Result<MerklehashConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder);

        Self::finish(builder)
    }

    /// Defaults, then `path` (which must exist), then environment.
    ///
    /// The global config file is skipped entirely.
    pub fn load_from_file(path: &Path) -> Result<MerklehashConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(true),
        );
        let builder = environment::add_to_builder(builder);

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<MerklehashConfig, ApiError> {
        let config: MerklehashConfig = builder.build()?.try_deserialize()?;

        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ApiError::ConfigError(messages.join("; ")));
        }

        debug!(algorithm = %config.hashing.algorithm, "Configuration loaded");
        Ok(config)
    }
}

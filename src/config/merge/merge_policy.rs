//! Merge rules: defaults, override order, conflict handling.

use crate::algorithm::DEFAULT_ALGORITHM;
use crate::tree::builder::{DEFAULT_MAX_OPEN_FILES, DEFAULT_READ_BUFFER_SIZE};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key, so a file that only sets
/// `hashing.algorithm` keeps every other default.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("hashing.algorithm", DEFAULT_ALGORITHM.name())?
        .set_default("hashing.max_open_files", DEFAULT_MAX_OPEN_FILES as u64)?
        .set_default("hashing.read_buffer_size", DEFAULT_READ_BUFFER_SIZE as u64)?
        .set_default("hashing.serial", false)
}

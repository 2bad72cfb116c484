//! Configuration System
//!
//! Layered configuration for hashing and logging: built-in defaults, then the global
//! config file (or an explicit file), then `MERKLEHASH__*` environment variables.
//! Command-line flags are applied on top by the CLI.

use crate::algorithm::{Algorithm, DEFAULT_ALGORITHM};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::builder::{HashOptions, DEFAULT_MAX_OPEN_FILES, DEFAULT_READ_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::ENV_PREFIX;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerklehashConfig {
    /// Digest engine settings
    #[serde(default)]
    pub hashing: HashingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Digest engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Algorithm name, see `merklehash algorithms`
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Bound on concurrently open files (0 = unbounded)
    #[serde(default = "default_max_open_files")]
    pub max_open_files: usize,

    /// Buffer size used when streaming file content
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,

    /// Hash one child at a time instead of concurrently
    #[serde(default)]
    pub serial: bool,

    /// Cancel the computation after this many milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.name().to_string()
}

fn default_max_open_files() -> usize {
    DEFAULT_MAX_OPEN_FILES
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            max_open_files: default_max_open_files(),
            read_buffer_size: default_read_buffer_size(),
            serial: false,
            timeout_ms: None,
        }
    }
}

impl HashingConfig {
    /// Resolve the configured algorithm name
    pub fn algorithm(&self) -> Result<Algorithm, ApiError> {
        self.algorithm.parse()
    }

    pub fn hash_options(&self) -> HashOptions {
        HashOptions {
            max_open_files: self.max_open_files,
            read_buffer_size: self.read_buffer_size,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Validate hashing configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Err(e) = self.algorithm() {
            return Err(e.to_string());
        }
        if self.read_buffer_size == 0 {
            return Err("read_buffer_size must be greater than zero".to_string());
        }
        if self.timeout_ms == Some(0) {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Hashing(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Hashing(msg) => write!(f, "Hashing: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl MerklehashConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.hashing.validate() {
            errors.push(ValidationError::Hashing(e));
        }

        if let Err(e) = crate::logging::validate(&self.logging) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

//! Error types for the merklehash directory digest engine.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while computing a directory digest
#[derive(Debug, Error)]
pub enum HashError {
    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to read directory {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to hash file {}: {source}", path.display())]
    FileHash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cancelled")]
    Cancelled,

    #[error("Worker for {} exited without a result", path.display())]
    WorkerLost { path: PathBuf },
}

impl HashError {
    /// Path the failure is attributed to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            HashError::NotADirectory { path }
            | HashError::Traversal { path, .. }
            | HashError::FileHash { path, .. }
            | HashError::WorkerLost { path } => Some(path),
            HashError::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, HashError::Cancelled)
    }
}

/// Application-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported algorithm '{name}'. Supported algorithms are: {supported}")]
    UnsupportedAlgorithm { name: String, supported: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

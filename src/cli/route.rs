//! CLI route: single route table and run context. Dispatches to the digest engine and
//! presentation.

use crate::algorithm::Algorithm;
use crate::cli::parse::{Commands, HashArgs};
use crate::cli::presentation::{
    format_algorithms_json, format_algorithms_text, format_digest_json, format_digest_text,
};
use crate::config::{ConfigLoader, HashingConfig, MerklehashConfig};
use crate::error::ApiError;
use crate::tree::DirectoryHasher;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: the loaded configuration.
pub struct RunContext {
    config: MerklehashConfig,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    /// Run context around an already-built configuration
    pub fn from_config(config: MerklehashConfig) -> Self {
        Self { config }
    }

    /// Execute a command and return its stdout text
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Hash(args) => self.handle_hash(args),
            Commands::Algorithms { format } => handle_algorithms(format),
        }
    }

    fn handle_hash(&self, args: &HashArgs) -> Result<String, ApiError> {
        let path = args.path.as_deref().ok_or_else(|| {
            ApiError::InvalidArgument("a directory path is required".to_string())
        })?;
        if args.format != "text" && args.format != "json" {
            return Err(ApiError::InvalidArgument(format!(
                "unknown output format '{}' (must be 'text' or 'json')",
                args.format
            )));
        }

        let settings = apply_overrides(&self.config.hashing, args);
        settings.validate().map_err(ApiError::ConfigError)?;
        let algorithm = settings.algorithm()?;

        info!(
            path = %path.display(),
            algorithm = %algorithm,
            serial = settings.serial,
            "Hashing directory"
        );

        let hasher = DirectoryHasher::new(algorithm.factory()).with_options(settings.hash_options());
        let digest = run_hasher(hasher, path.to_path_buf(), settings.serial, settings.timeout())?;

        if args.format == "json" {
            format_digest_json(&digest, algorithm, path)
        } else {
            Ok(format_digest_text(&digest, path, args.raw))
        }
    }
}

fn handle_algorithms(format: &str) -> Result<String, ApiError> {
    match format {
        "json" => format_algorithms_json(Algorithm::all()),
        "text" => Ok(format_algorithms_text(Algorithm::all())),
        other => Err(ApiError::InvalidArgument(format!(
            "unknown output format '{}' (must be 'text' or 'json')",
            other
        ))),
    }
}

/// Command-line flags win over configuration
fn apply_overrides(config: &HashingConfig, args: &HashArgs) -> HashingConfig {
    let mut settings = config.clone();
    if let Some(ref algorithm) = args.algorithm {
        settings.algorithm = algorithm.clone();
    }
    if args.serial {
        settings.serial = true;
    }
    if let Some(max_open_files) = args.max_open_files {
        settings.max_open_files = max_open_files;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        settings.timeout_ms = Some(timeout_ms);
    }
    settings
}

/// Drive one computation on a fresh runtime, cancelling on Ctrl-C or after `timeout`.
fn run_hasher(
    hasher: DirectoryHasher,
    path: PathBuf,
    serial: bool,
    timeout: Option<Duration>,
) -> Result<crate::types::Digest, ApiError> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::Runtime(format!("Failed to create tokio runtime: {}", e)))?;

    let outcome = rt.block_on(async move {
        let cancel = CancellationToken::new();

        let interrupt = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, cancelling");
                    cancel.cancel();
                }
            })
        };

        let deadline = timeout.map(|timeout| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                warn!(timeout_ms = timeout.as_millis() as u64, "Deadline reached, cancelling");
                cancel.cancel();
            })
        });

        let result = if serial {
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || hasher.compute_serial(&path, &cancel))
                .await
                .map_err(|e| ApiError::Runtime(format!("Serial hashing task failed: {}", e)))?
        } else {
            hasher.compute(&path, &cancel).await
        };

        interrupt.abort();
        if let Some(deadline) = deadline {
            deadline.abort();
        }
        debug!(ok = result.is_ok(), "Hashing finished");

        result.map_err(ApiError::from)
    });

    // Abandoned blocking reads may still be running; do not wait for them
    rt.shutdown_background();
    outcome
}

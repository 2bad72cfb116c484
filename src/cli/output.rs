//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, HashError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Hash(HashError::Cancelled) => "Hashing cancelled before completion".to_string(),
        other => other.to_string(),
    }
}

/// Process exit code for a failed command
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        // 128 + SIGINT, as shells report an interrupted command
        ApiError::Hash(HashError::Cancelled) => 130,
        _ => 1,
    }
}

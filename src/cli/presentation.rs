//! CLI presentation: text and json formatters for digests and the algorithm list.

use crate::algorithm::Algorithm;
use crate::error::ApiError;
use crate::types::Digest;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct DigestOutput<'a> {
    algorithm: &'a str,
    digest: String,
    path: String,
}

/// `<hex> <path>`, or only `<hex>` when `raw` is set
pub fn format_digest_text(digest: &Digest, path: &Path, raw: bool) -> String {
    if raw {
        digest.to_hex()
    } else {
        format!("{} {}", digest, path.display())
    }
}

pub fn format_digest_json(
    digest: &Digest,
    algorithm: Algorithm,
    path: &Path,
) -> Result<String, ApiError> {
    let output = DigestOutput {
        algorithm: algorithm.name(),
        digest: digest.to_hex(),
        path: path.display().to_string(),
    };
    serde_json::to_string_pretty(&output).map_err(|e| ApiError::Runtime(e.to_string()))
}

pub fn format_algorithms_text(algorithms: &[Algorithm]) -> String {
    algorithms
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_algorithms_json(algorithms: &[Algorithm]) -> Result<String, ApiError> {
    let names: Vec<_> = algorithms
        .iter()
        .map(|a| serde_json::json!({ "name": a.name(), "bytes": a.output_len() }))
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "algorithms": names }))
        .map_err(|e| ApiError::Runtime(e.to_string()))
}

//! Merklehash: Deterministic Directory Digests
//!
//! Computes a single Merkle digest over a directory tree. File contents are hashed
//! concurrently and combined in a canonical order, so the same tree always yields the
//! same digest regardless of scheduling or platform listing order.

pub mod algorithm;
pub mod cli;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;
pub mod types;

pub use error::{ApiError, HashError};
pub use tree::{compute, compute_serial, DirectoryHasher, HashOptions};
pub use types::Digest;

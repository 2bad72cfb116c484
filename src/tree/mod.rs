//! Filesystem Merkle Digest
//!
//! Computes one digest for a whole directory tree: files hash their bytes, directories
//! hash their children's digests in name order.

pub mod builder;
pub mod hasher;
pub mod path;
pub mod walker;

pub use builder::{compute, compute_serial, DirectoryHasher, HashOptions};
pub use hasher::{Accumulator, DigestFactory};
pub use walker::{FileSystem, OsFileSystem};

//! Filesystem access used by the digest engine

use crate::error::HashError;
use crate::tree::hasher::DigestFactory;
use crate::types::{Digest, DirectoryEntry};
use std::io::Read;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// Filesystem primitives the engine is built on.
///
/// All methods block; the concurrent engine calls them from tokio's blocking pool.
pub trait FileSystem: Send + Sync {
    /// Immediate children of `path`, in whatever order the platform reports them
    fn list_children(&self, path: &Path) -> std::io::Result<Vec<DirectoryEntry>>;

    /// Open a file for streaming reads
    fn open_for_read(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>>;

    fn is_directory(&self, path: &Path) -> std::io::Result<bool>;
}

/// `std::fs`-backed filesystem
///
/// Listing uses the entry's own file type, so symlinks are never followed while
/// enumerating; anything that is not a directory is hashed as a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_children(&self, path: &Path) -> std::io::Result<Vec<DirectoryEntry>> {
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        let mut children = Vec::new();
        for entry in walker {
            let entry = entry?;
            let name = entry.file_name().to_os_string();
            children.push(if entry.file_type().is_dir() {
                DirectoryEntry::directory(name)
            } else {
                DirectoryEntry::file(name)
            });
        }
        Ok(children)
    }

    fn open_for_read(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn is_directory(&self, path: &Path) -> std::io::Result<bool> {
        Ok(std::fs::metadata(path)?.is_dir())
    }
}

/// Children of `dir` sorted by name, byte-wise ascending.
///
/// Fails with `NotADirectory` when `dir` exists but is something else, and with
/// `Traversal` when it cannot be inspected or listed.
pub fn read_children(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<DirectoryEntry>, HashError> {
    let is_dir = fs.is_directory(dir).map_err(|source| HashError::Traversal {
        path: dir.to_path_buf(),
        source,
    })?;
    if !is_dir {
        return Err(HashError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut children = fs.list_children(dir).map_err(|source| HashError::Traversal {
        path: dir.to_path_buf(),
        source,
    })?;

    // OsStr ordering compares the underlying bytes
    children.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(children)
}

/// Stream the full content of `path` through one accumulator from `factory`.
pub fn hash_file(
    fs: &dyn FileSystem,
    factory: &dyn DigestFactory,
    path: &Path,
    buffer_size: usize,
) -> Result<Digest, HashError> {
    let file_error = |source| HashError::FileHash {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = fs.open_for_read(path).map_err(file_error)?;
    let mut accumulator = factory.create();
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut total = 0u64;

    loop {
        let count = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(count) => count,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(file_error(e)),
        };
        accumulator.update(&buffer[..count]);
        total += count as u64;
    }

    trace!(path = %path.display(), bytes = total, "Hashed file");
    Ok(accumulator.finalize())
}

//! Recursive directory digest engine
//!
//! A directory's digest is the digest of its children's digests, fed in byte-wise name
//! order. Children are hashed concurrently: one tokio task per child, files streamed on
//! the blocking pool, subdirectories recursing into the same routine. Results are
//! gathered into ordinal slots so scheduling never affects the output.

use crate::concurrency::{collect_ordered, ReadLimiter};
use crate::error::HashError;
use crate::tree::hasher::{combine_digests, DigestFactory};
use crate::tree::path;
use crate::tree::walker::{self, FileSystem, OsFileSystem};
use crate::types::{Digest, DigestResult, EntryKind};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Default read buffer for streaming file content
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Default bound on concurrently open files
pub const DEFAULT_MAX_OPEN_FILES: usize = 64;

/// Tuning knobs that never change the resulting digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    /// Upper bound on files open at once; `0` disables the bound
    pub max_open_files: usize,
    /// Size of the buffer used to stream file content
    pub read_buffer_size: usize,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

/// State shared read-only by every task of one computation
struct Shared {
    factory: Arc<dyn DigestFactory>,
    fs: Arc<dyn FileSystem>,
    limiter: ReadLimiter,
    buffer_size: usize,
}

/// Computes Merkle digests of directory trees
pub struct DirectoryHasher {
    factory: Arc<dyn DigestFactory>,
    fs: Arc<dyn FileSystem>,
    options: HashOptions,
}

impl DirectoryHasher {
    /// Hasher over the real filesystem with default options
    pub fn new(factory: Arc<dyn DigestFactory>) -> Self {
        Self {
            factory,
            fs: Arc::new(OsFileSystem),
            options: HashOptions::default(),
        }
    }

    /// Use a different filesystem implementation
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_options(mut self, options: HashOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> HashOptions {
        self.options
    }

    /// Digest of the directory at `root`, hashing children concurrently.
    ///
    /// Must be awaited inside a tokio runtime. Returns `Cancelled` once `cancel` fires;
    /// outstanding work is abandoned rather than awaited.
    #[instrument(skip(self, root, cancel), fields(root = %root.display()))]
    pub async fn compute(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<Digest, HashError> {
        let start = Instant::now();
        info!("Starting directory digest");

        let root = absolutize_root(root)?;
        let shared = Arc::new(Shared {
            factory: Arc::clone(&self.factory),
            fs: Arc::clone(&self.fs),
            limiter: ReadLimiter::new(self.options.max_open_files),
            buffer_size: self.options.read_buffer_size,
        });

        let result = hash_directory(shared, root, cancel.clone()).await;
        log_outcome(&result, start);
        result
    }

    /// Same digest as [`compute`](Self::compute), one child at a time on the calling
    /// thread. `cancel` is checked before each child.
    #[instrument(skip(self, root, cancel), fields(root = %root.display()))]
    pub fn compute_serial(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<Digest, HashError> {
        let start = Instant::now();
        info!("Starting serial directory digest");

        let root = absolutize_root(root)?;
        let result = self.hash_directory_serial(&root, cancel);
        log_outcome(&result, start);
        result
    }

    fn hash_directory_serial(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<Digest, HashError> {
        if cancel.is_cancelled() {
            return Err(HashError::Cancelled);
        }

        let children = walker::read_children(self.fs.as_ref(), dir)?;
        let mut accumulator = self.factory.create();

        for entry in &children {
            if cancel.is_cancelled() {
                return Err(HashError::Cancelled);
            }

            let child_path = dir.join(&entry.name);
            let digest = match entry.kind {
                EntryKind::Directory => self.hash_directory_serial(&child_path, cancel)?,
                EntryKind::File => walker::hash_file(
                    self.fs.as_ref(),
                    self.factory.as_ref(),
                    &child_path,
                    self.options.read_buffer_size,
                )?,
            };
            accumulator.update(digest.as_bytes());
        }

        debug!(path = %dir.display(), children = children.len(), "Hashed directory");
        Ok(accumulator.finalize())
    }
}

/// Digest of the directory at `root` using the real filesystem and default options.
pub async fn compute(
    root: &Path,
    factory: Arc<dyn DigestFactory>,
    cancel: &CancellationToken,
) -> Result<Digest, HashError> {
    DirectoryHasher::new(factory).compute(root, cancel).await
}

/// Serial counterpart of [`compute`].
pub fn compute_serial(
    root: &Path,
    factory: Arc<dyn DigestFactory>,
    cancel: &CancellationToken,
) -> Result<Digest, HashError> {
    DirectoryHasher::new(factory).compute_serial(root, cancel)
}

fn absolutize_root(root: &Path) -> Result<PathBuf, HashError> {
    path::absolutize(root).map_err(|source| HashError::Traversal {
        path: root.to_path_buf(),
        source,
    })
}

fn log_outcome(result: &Result<Digest, HashError>, start: Instant) {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(digest) => info!(digest = %digest, duration_ms, "Directory digest completed"),
        Err(HashError::Cancelled) => warn!(duration_ms, "Directory digest cancelled"),
        Err(e) => error!(duration_ms, "Directory digest failed: {}", e),
    }
}

/// Hash one directory: fan out a task per child, fan in by ordinal, combine.
///
/// Each call scopes its children under a child token of `cancel`, so a failure here
/// abandons this subtree without touching siblings of `dir`, while cancelling `cancel`
/// still reaches every descendant.
fn hash_directory(
    shared: Arc<Shared>,
    dir: PathBuf,
    cancel: CancellationToken,
) -> BoxFuture<'static, Result<Digest, HashError>> {
    async move {
        if cancel.is_cancelled() {
            return Err(HashError::Cancelled);
        }

        let children = {
            let fs = Arc::clone(&shared.fs);
            let dir = dir.clone();
            tokio::task::spawn_blocking(move || walker::read_children(fs.as_ref(), &dir))
        };
        let children = children.await.map_err(|e| {
            error!(path = %dir.display(), "Directory listing task failed: {}", e);
            HashError::WorkerLost { path: dir.clone() }
        })??;

        let child_count = children.len();
        let scope = cancel.child_token();
        let (tx, rx) = mpsc::channel(child_count.max(1));

        for (index, entry) in children.into_iter().enumerate() {
            let child_path = dir.join(&entry.name);
            let shared = Arc::clone(&shared);
            let scope = scope.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let outcome = match entry.kind {
                    EntryKind::Directory => hash_directory(shared, child_path, scope.clone()).await,
                    EntryKind::File => hash_file(shared, child_path, &scope).await,
                };

                // Nobody is listening once the scope is cancelled
                if scope.is_cancelled() {
                    return;
                }
                let _ = tx.send(DigestResult { index, outcome }).await;
            });
        }
        drop(tx);

        let digests = match collect_ordered(rx, child_count, &scope, &dir).await {
            Ok(digests) => digests,
            Err(e) => {
                scope.cancel();
                return Err(e);
            }
        };

        debug!(path = %dir.display(), children = child_count, "Hashed directory");
        Ok(combine_digests(shared.factory.as_ref(), &digests))
    }
    .boxed()
}

async fn hash_file(
    shared: Arc<Shared>,
    path: PathBuf,
    cancel: &CancellationToken,
) -> Result<Digest, HashError> {
    let permit = shared.limiter.acquire(cancel).await?;

    let task_path = path.clone();
    let reader = tokio::task::spawn_blocking(move || {
        // Held until the file is closed
        let _permit = permit;
        walker::hash_file(
            shared.fs.as_ref(),
            shared.factory.as_ref(),
            &task_path,
            shared.buffer_size,
        )
    });

    reader.await.map_err(|e| {
        error!(path = %path.display(), "File hashing task failed: {}", e);
        HashError::WorkerLost { path }
    })?
}

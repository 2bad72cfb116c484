//! Fan-in and resource limiting for the concurrent digest engine

use crate::error::HashError;
use crate::types::{Digest, DigestResult};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Collect exactly `expected` child results into ordinal slots.
///
/// Results arrive in completion order; each lands at its own index so the returned
/// digests are in listing order. Returns the first failure observed, `Cancelled` as
/// soon as `cancel` fires, or `WorkerLost` if every sender is gone before all slots
/// are filled.
pub async fn collect_ordered(
    mut results: mpsc::Receiver<DigestResult>,
    expected: usize,
    cancel: &CancellationToken,
    dir: &Path,
) -> Result<Vec<Digest>, HashError> {
    let mut slots: Vec<Option<Digest>> = (0..expected).map(|_| None).collect();
    let mut remaining = expected;

    while remaining > 0 {
        if cancel.is_cancelled() {
            return Err(HashError::Cancelled);
        }

        let received = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(HashError::Cancelled),
            received = results.recv() => received,
        };

        let Some(result) = received else {
            return Err(HashError::WorkerLost {
                path: dir.to_path_buf(),
            });
        };

        let digest = result.outcome?;
        if let Some(slot) = slots.get_mut(result.index) {
            if slot.replace(digest).is_none() {
                remaining -= 1;
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Bound on concurrently open files
#[derive(Debug, Clone)]
pub struct ReadLimiter {
    semaphore: Option<Arc<Semaphore>>,
}

impl ReadLimiter {
    /// `0` means unbounded
    pub fn new(max_open_files: usize) -> Self {
        let semaphore = (max_open_files > 0).then(|| Arc::new(Semaphore::new(max_open_files)));
        Self { semaphore }
    }

    /// Wait for a read slot, giving up when `cancel` fires.
    ///
    /// Returns `None` for an unbounded limiter.
    pub async fn acquire(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<OwnedSemaphorePermit>, HashError> {
        let Some(semaphore) = &self.semaphore else {
            return Ok(None);
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HashError::Cancelled),
            // The semaphore is never closed while the limiter is alive
            permit = Arc::clone(semaphore).acquire_owned() => Ok(permit.ok()),
        }
    }
}

//! Live batch progress counters.
//!
//! Lock-free atomic counters a batch updates as requests resolve, so a UI
//! can poll mid-flight state without touching the batch accounting itself.
//! A snapshot is a point-in-time copy; the authoritative final numbers
//! come from the batch summary.

use std::sync::atomic::{AtomicU64, Ordering};

use super::batch::TileOutcome;

/// Shared, lock-free counters for one in-flight batch.
#[derive(Debug, Default)]
pub struct BatchProgress {
    total: AtomicU64,
    downloaded: AtomicU64,
    cache_hits: AtomicU64,
    failed: AtomicU64,
    timed_out: AtomicU64,
}

impl BatchProgress {
    /// Creates progress counters with no expected total yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of requests the batch will dispatch.
    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    /// Records one resolved request.
    pub fn record(&self, outcome: TileOutcome) {
        let counter = match outcome {
            TileOutcome::Downloaded => &self.downloaded,
            TileOutcome::CacheHit => &self.cache_hits,
            TileOutcome::Failed => &self.failed,
            TileOutcome::TimedOut => &self.timed_out,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total.load(Ordering::Relaxed),
            downloaded: self.downloaded.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of batch progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Requests the batch dispatches in total.
    pub total: u64,
    /// Tiles fetched from the network so far.
    pub downloaded: u64,
    /// Tiles served from the cache so far.
    pub cache_hits: u64,
    /// Failed fetches so far.
    pub failed: u64,
    /// Timed-out fetches so far.
    pub timed_out: u64,
}

impl ProgressSnapshot {
    /// Requests resolved so far.
    pub fn resolved(&self) -> u64 {
        self.downloaded + self.cache_hits + self.failed + self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record_and_snapshot() {
        let progress = BatchProgress::new();
        progress.set_total(3);
        progress.record(TileOutcome::Downloaded);
        progress.record(TileOutcome::CacheHit);

        let snap = progress.snapshot();
        assert_eq!(snap.total, 3);
        assert_eq!(snap.downloaded, 1);
        assert_eq!(snap.cache_hits, 1);
        assert_eq!(snap.resolved(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_recording() {
        let progress = Arc::new(BatchProgress::new());
        progress.set_total(100);

        let mut handles = Vec::new();
        for _ in 0..100 {
            let progress = Arc::clone(&progress);
            handles.push(tokio::spawn(async move {
                progress.record(TileOutcome::Downloaded);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(progress.snapshot().downloaded, 100);
    }
}

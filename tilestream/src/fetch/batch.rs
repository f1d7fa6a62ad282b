//! Batch accounting for tile downloads.
//!
//! A [`DownloadBatch`] tracks per-request outcomes until every request is
//! resolved (or the batch deadline declares the rest timed out), then
//! yields a [`DownloadSummary`]. The summary is the only way accounting
//! leaves this module, so callers can never observe a non-terminal batch.

use crate::i18n::Translator;

/// Catalogue context for batch report messages.
const CONTEXT: &str = "TileLayer";

/// Resolution of a single tile request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileOutcome {
    /// Fetched from the network and stored in the cache.
    Downloaded,
    /// Served from the cache without network activity.
    CacheHit,
    /// The fetch resolved with an error.
    Failed,
    /// The fetch did not resolve within its deadline.
    TimedOut,
}

/// Accumulating counters for one batch of tile requests.
///
/// Invariant: `downloaded + cache_hits + failed + timed_out <= total`,
/// with equality exactly when the batch is terminal.
#[derive(Debug, Clone)]
pub struct DownloadBatch {
    total: u64,
    downloaded: u64,
    cache_hits: u64,
    failed: u64,
    timed_out: u64,
}

impl DownloadBatch {
    /// Creates a batch expecting `total` tile requests.
    pub fn new(total: u64) -> Self {
        Self {
            total,
            downloaded: 0,
            cache_hits: 0,
            failed: 0,
            timed_out: 0,
        }
    }

    /// Records one resolved request.
    ///
    /// # Panics
    ///
    /// Panics if more outcomes are recorded than the batch expects; that
    /// is a dispatch bug, not a runtime condition.
    pub fn record(&mut self, outcome: TileOutcome) {
        assert!(
            self.resolved() < self.total,
            "batch overflow: all {} requests already resolved",
            self.total
        );
        match outcome {
            TileOutcome::Downloaded => self.downloaded += 1,
            TileOutcome::CacheHit => self.cache_hits += 1,
            TileOutcome::Failed => self.failed += 1,
            TileOutcome::TimedOut => self.timed_out += 1,
        }
    }

    /// Number of resolved requests so far.
    pub fn resolved(&self) -> u64 {
        self.downloaded + self.cache_hits + self.failed + self.timed_out
    }

    /// Whether every request has resolved.
    pub fn is_terminal(&self) -> bool {
        self.resolved() == self.total
    }

    /// Declares every still-pending request timed out.
    ///
    /// Called when the overall batch deadline fires; makes the batch
    /// terminal.
    pub fn mark_remaining_timed_out(&mut self) {
        self.timed_out += self.total - self.resolved();
    }

    /// Consumes the batch into its summary.
    ///
    /// # Panics
    ///
    /// Panics if the batch is not terminal; the report must never be
    /// emitted early.
    pub fn into_summary(self) -> DownloadSummary {
        assert!(
            self.is_terminal(),
            "summary requested before batch terminal: {}/{} resolved",
            self.resolved(),
            self.total
        );
        DownloadSummary {
            total: self.total,
            downloaded: self.downloaded,
            cache_hits: self.cache_hits,
            failed: self.failed,
            timed_out: self.timed_out,
        }
    }
}

/// Final accounting for a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Requests the batch was created with.
    pub total: u64,
    /// Tiles fetched from the network.
    pub downloaded: u64,
    /// Tiles served from the cache.
    pub cache_hits: u64,
    /// Fetches that resolved with an error.
    pub failed: u64,
    /// Fetches that hit a deadline.
    pub timed_out: u64,
}

impl DownloadSummary {
    /// Requests that produced a usable tile.
    pub fn succeeded(&self) -> u64 {
        self.downloaded + self.cache_hits
    }

    /// Requests that produced no tile (failures and timeouts).
    pub fn unresolved(&self) -> u64 {
        self.failed + self.timed_out
    }

    /// Renders the user-facing batch report in the given locale.
    ///
    /// `layer_title` names the layer in the whole-batch-timeout and
    /// total-failure messages, matching how the reports read in the host.
    pub fn message(&self, tr: &Translator, layer_title: &str) -> String {
        if self.total > 0 && self.timed_out == self.total {
            return tr.format(CONTEXT, "Download Timeout - {}", &[&layer_title]);
        }

        if self.unresolved() == 0 {
            return tr.format(
                CONTEXT,
                "{0} files downloaded. {1} caches hit.",
                &[&self.downloaded, &self.cache_hits],
            );
        }

        if self.succeeded() == 0 {
            return tr.format(
                CONTEXT,
                "Failed to download all {0} files. - {1}",
                &[&self.total, &layer_title],
            );
        }

        let mut message = tr.format(
            CONTEXT,
            "{0} of {1} files downloaded.",
            &[&self.succeeded(), &self.total],
        );
        message.push_str(&tr.format(CONTEXT, " {} files failed.", &[&self.unresolved()]));
        message
    }
}

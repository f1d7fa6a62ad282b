//! Tile fetch coordination.
//!
//! [`TileFetchCoordinator`] turns a layer definition plus a viewport and
//! zoom level into a batch of tile requests, enforcing the tile count
//! limit and the layer's minimum zoom *before* any network activity, then
//! fanning the requests out with bounded concurrency. Each request checks
//! the cache first, downloads on a miss, and resolves to one of the four
//! [`TileOutcome`]s; the batch report is produced only once every request
//! has resolved or the overall deadline has declared the rest timed out.
//!
//! ```text
//! viewport + zoom ──► plan() ──► TileRange ──► fan-out ──► DownloadBatch
//!                      │ count limit            │ cache → net    │
//!                      │ zoom floor             │ per-req timeout▼
//!                      ▼                        ▼         DownloadSummary
//!                  FetchError              TileOutcome
//! ```

mod batch;
mod progress;

pub use batch::{DownloadBatch, DownloadSummary, TileOutcome};
pub use progress::{BatchProgress, ProgressSnapshot};

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::TileCache;
use crate::coord::{CoordError, Extent, TileCoord, TileRange};
use crate::i18n::Translator;
use crate::layer::TileLayerDefinition;
use crate::provider::{AsyncHttpClient, TemplateProvider};

/// Catalogue context for coordinator messages.
const CONTEXT: &str = "TileLayer";

/// Default maximum number of tiles per batch.
pub const DEFAULT_TILE_COUNT_LIMIT: u64 = 256;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of concurrently in-flight tile requests.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Tuning for a fetch coordinator.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum tiles one batch may request; larger batches are rejected
    /// before any request is dispatched.
    pub tile_count_limit: u64,

    /// Deadline for a single tile request; requests over it resolve as
    /// timed out.
    pub request_timeout: Duration,

    /// Optional deadline for the whole batch; requests still pending when
    /// it fires are counted timed out.
    pub batch_deadline: Option<Duration>,

    /// Maximum concurrently in-flight requests.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            tile_count_limit: DEFAULT_TILE_COUNT_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            batch_deadline: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl FetchConfig {
    /// Sets the tile count limit.
    pub fn with_tile_count_limit(mut self, limit: u64) -> Self {
        self.tile_count_limit = limit;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the overall batch deadline.
    pub fn with_batch_deadline(mut self, deadline: Duration) -> Self {
        self.batch_deadline = Some(deadline);
        self
    }

    /// Sets the concurrency limit.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Conditions that reject a batch before any network activity.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The computed tile count exceeds the configured limit.
    #[error("Tile count is over limit ({count}, max={limit})")]
    TileCountOverLimit {
        /// Tiles the viewport would require.
        count: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// The requested zoom is below the layer's minimum.
    #[error("Current zoom level ({requested}) is smaller than zmin ({minimum}): {layer}")]
    ZoomBelowMinimum {
        /// Zoom level that was requested.
        requested: u8,
        /// The layer's `zmin`.
        minimum: u8,
        /// Title of the rejecting layer.
        layer: String,
    },

    /// The viewport could not be mapped onto the tile grid.
    #[error(transparent)]
    Coord(#[from] CoordError),
}

impl FetchError {
    /// Renders the rejection for display in the user's locale.
    pub fn localized_message(&self, tr: &Translator) -> String {
        match self {
            FetchError::TileCountOverLimit { count, limit } => tr.format(
                CONTEXT,
                "Tile count is over limit ({0}, max={1})",
                &[count, limit],
            ),
            FetchError::ZoomBelowMinimum {
                requested,
                minimum,
                layer,
            } => tr.format(
                CONTEXT,
                "Current zoom level ({0}) is smaller than zmin ({1}): {2}",
                &[requested, minimum, layer],
            ),
            FetchError::Coord(e) => e.to_string(),
        }
    }
}

/// Coordinates one layer's tile downloads.
///
/// Construction wires together the layer definition, an HTTP client and a
/// cache; [`run`](Self::run) executes batches against them. The
/// coordinator is cheap to clone-free share behind an `Arc` since all of
/// its state is immutable after construction.
pub struct TileFetchCoordinator {
    layer: TileLayerDefinition,
    provider: TemplateProvider,
    http: Arc<dyn AsyncHttpClient>,
    cache: Arc<dyn TileCache>,
    config: FetchConfig,
    progress: Option<Arc<BatchProgress>>,
}

impl TileFetchCoordinator {
    /// Creates a coordinator for a layer.
    pub fn new(
        layer: TileLayerDefinition,
        http: Arc<dyn AsyncHttpClient>,
        cache: Arc<dyn TileCache>,
        config: FetchConfig,
    ) -> Self {
        let provider = TemplateProvider::new(&layer);
        Self {
            layer,
            provider,
            http,
            cache,
            config,
            progress: None,
        }
    }

    /// Attaches shared progress counters updated as requests resolve.
    pub fn with_progress(mut self, progress: Arc<BatchProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The layer this coordinator serves.
    pub fn layer(&self) -> &TileLayerDefinition {
        &self.layer
    }

    /// Validates a request and computes the tile range it covers.
    ///
    /// Returns `Ok(None)` when the viewport lies entirely outside the
    /// layer's extent (an empty batch, not an error). A requested zoom
    /// below the layer's `zmin` is rejected, never clamped; a zoom above
    /// `zmax` is served from the highest native level.
    pub fn plan(&self, viewport: &Extent, zoom: u8) -> Result<Option<TileRange>, FetchError> {
        let range = self.layer.zoom_range;
        if zoom < range.zmin {
            return Err(FetchError::ZoomBelowMinimum {
                requested: zoom,
                minimum: range.zmin,
                layer: self.layer.title.clone(),
            });
        }

        let effective_zoom = zoom.min(range.zmax);
        if effective_zoom != zoom {
            debug!(
                layer = %self.layer.title,
                requested = zoom,
                zmax = range.zmax,
                "zoom above zmax, serving highest native level"
            );
        }

        let area = match &self.layer.extent {
            Some(extent) => match extent.intersect(viewport) {
                Some(overlap) => overlap,
                None => return Ok(None),
            },
            None => *viewport,
        };

        let tiles = TileRange::from_extent(&area, effective_zoom)?;
        let count = tiles.count();
        if count > self.config.tile_count_limit {
            return Err(FetchError::TileCountOverLimit {
                count,
                limit: self.config.tile_count_limit,
            });
        }

        Ok(Some(tiles))
    }

    /// Runs a batch for the viewport at the requested zoom.
    ///
    /// Rejection conditions surface as [`FetchError`] without any request
    /// having been dispatched; everything after that resolves into the
    /// returned [`DownloadSummary`].
    pub async fn run(&self, viewport: &Extent, zoom: u8) -> Result<DownloadSummary, FetchError> {
        let tiles = match self.plan(viewport, zoom)? {
            Some(tiles) => tiles,
            None => {
                debug!(layer = %self.layer.title, "viewport outside layer extent, empty batch");
                return Ok(DownloadBatch::new(0).into_summary());
            }
        };

        let total = tiles.count();
        let mut batch = DownloadBatch::new(total);
        if let Some(progress) = &self.progress {
            progress.set_total(total);
        }
        debug!(layer = %self.layer.title, total, zoom = tiles.zoom, "dispatching batch");

        let mut outcomes = stream::iter(tiles.iter().map(|tile| self.fetch_tile(tile)))
            .buffer_unordered(self.config.concurrency);

        let deadline = self
            .config
            .batch_deadline
            .map(|d| tokio::time::Instant::now() + d);

        loop {
            let next = match deadline {
                Some(at) => match tokio::time::timeout_at(at, outcomes.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(layer = %self.layer.title, "batch deadline reached");
                        batch.mark_remaining_timed_out();
                        break;
                    }
                },
                None => outcomes.next().await,
            };

            match next {
                Some(outcome) => {
                    if let Some(progress) = &self.progress {
                        progress.record(outcome);
                    }
                    batch.record(outcome);
                }
                None => break,
            }
        }
        drop(outcomes);

        Ok(batch.into_summary())
    }

    /// Resolves a single tile request.
    async fn fetch_tile(&self, tile: TileCoord) -> TileOutcome {
        let url = match self.provider.tile_url(&tile) {
            Ok(url) => url,
            Err(e) => {
                warn!(%tile, error = %e, "could not build tile URL");
                return TileOutcome::Failed;
            }
        };

        if let Ok(Some(_)) = self.cache.get(&url).await {
            return TileOutcome::CacheHit;
        }

        match tokio::time::timeout(self.config.request_timeout, self.http.get(&url)).await {
            Err(_) => {
                warn!(%tile, "tile request timed out");
                TileOutcome::TimedOut
            }
            Ok(Err(e)) => {
                warn!(%tile, error = %e, "tile request failed");
                TileOutcome::Failed
            }
            Ok(Ok(bytes)) => {
                if let Err(e) = self.cache.set(&url, bytes).await {
                    // A cache write failure degrades to an uncached download
                    warn!(%tile, error = %e, "failed to cache tile");
                }
                TileOutcome::Downloaded
            }
        }
    }
}

//! Fetch command - run one tile batch for a layer.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tilestream::cache::MemoryTileCache;
use tilestream::config::Settings;
use tilestream::coord::Extent;
use tilestream::fetch::{BatchProgress, FetchConfig, TileFetchCoordinator};
use tilestream::i18n::Translator;
use tilestream::provider::AsyncReqwestClient;
use tracing::info;

use super::common::{resolve_layer, LayerArgs};
use crate::error::CliError;

/// In-memory cache capacity for one CLI invocation.
const CACHE_SIZE_BYTES: u64 = 256 * 1024 * 1024;

/// How often the progress bar re-reads the batch counters.
const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub layer: LayerArgs,

    /// Viewport edges in degrees: xmin ymin xmax ymax
    #[arg(long, required = true, num_args = 4, value_names = ["XMIN", "YMIN", "XMAX", "YMAX"], allow_negative_numbers = true)]
    pub extent: Vec<f64>,

    /// Zoom level to fetch at
    #[arg(long)]
    pub zoom: u8,

    /// Override the tile count limit
    #[arg(long)]
    pub limit: Option<u64>,

    /// Override the per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Overall batch deadline in seconds
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Maximum concurrently in-flight requests
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Run the fetch command.
pub fn run(args: FetchArgs, settings: &Settings, tr: &Translator) -> Result<(), CliError> {
    let layer = resolve_layer(&args.layer, settings, tr)?;
    let viewport = Extent::new(
        args.extent[0],
        args.extent[1],
        args.extent[2],
        args.extent[3],
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    let mut config: FetchConfig = settings.fetch_config();
    if let Some(limit) = args.limit {
        config = config.with_tile_count_limit(limit);
    }
    if let Some(secs) = args.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.deadline {
        config = config.with_batch_deadline(Duration::from_secs(secs));
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }

    let http = AsyncReqwestClient::with_timeout(config.request_timeout)
        .map_err(|e| CliError::Provider(e.to_string()))?;
    let cache = MemoryTileCache::new(CACHE_SIZE_BYTES, None);
    let progress = Arc::new(BatchProgress::new());
    let coordinator = TileFetchCoordinator::new(layer, Arc::new(http), Arc::new(cache), config)
        .with_progress(Arc::clone(&progress));

    info!(layer = %coordinator.layer().title, zoom = args.zoom, "starting batch");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(async {
        let bar = progress_bar();
        let poller = {
            let progress = Arc::clone(&progress);
            let bar = bar.clone();
            tokio::spawn(async move {
                loop {
                    let snap = progress.snapshot();
                    if snap.total > 0 {
                        bar.set_length(snap.total);
                        bar.set_position(snap.resolved());
                    }
                    tokio::time::sleep(PROGRESS_POLL_INTERVAL).await;
                }
            })
        };

        let result = coordinator.run(&viewport, args.zoom).await;
        poller.abort();
        bar.finish_and_clear();
        result
    });

    match summary {
        Ok(summary) => {
            println!("{}", summary.message(tr, &coordinator.layer().title));
            Ok(())
        }
        Err(e) => Err(CliError::Fetch(e.localized_message(tr))),
    }
}

fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} tiles")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(0);
    bar.set_style(style);
    bar
}

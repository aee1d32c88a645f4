//! Tile dispatcher: bounded concurrent fan-out over a planned tile list

use crate::downloader::config::{DownloadConfig, DEFAULT_PROGRESS_INTERVAL};
use crate::downloader::progress::{format_duration, ProgressState};
use crate::{metrics, FetchResult, TileId};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a dispatch run
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Tiles that are present on disk, in completion order
    pub successful: Vec<TileId>,
    /// Tiles that exhausted their attempts, in completion order
    pub failed: Vec<TileId>,
    /// Number of tiles planned
    pub planned: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl DispatchReport {
    /// Number of tiles with an outcome
    pub fn completed(&self) -> u64 {
        (self.successful.len() + self.failed.len()) as u64
    }

    /// Whether the plan held no tiles
    pub fn is_empty(&self) -> bool {
        self.planned == 0
    }
}

/// Runs a fetch function over every planned tile with at most `concurrency` in flight.
///
/// Tiles are submitted in plan order and complete in any order. Each completion is
/// recorded immediately; a failed tile is logged and never stops the others.
pub struct TileDispatcher {
    concurrency: usize,
    progress_interval: u64,
    progress_bar: Option<ProgressBar>,
}

impl TileDispatcher {
    /// Create a dispatcher with `concurrency` workers (minimum 1)
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            progress_bar: None,
        }
    }

    /// Create a dispatcher from a download config
    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(config.concurrency).with_progress_interval(config.progress_interval)
    }

    /// Emit a progress summary every `interval` completions (minimum 1)
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Advance a terminal progress bar on every completion
    pub fn with_progress_bar(mut self, progress_bar: ProgressBar) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }

    /// Number of concurrent workers
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetch every tile in `tiles` with `fetch`, which reports success per tile.
    ///
    /// An empty plan short-circuits with a diagnostic and an empty report.
    pub async fn run<F, Fut>(&self, tiles: Vec<TileId>, fetch: F) -> DispatchReport
    where
        F: Fn(TileId) -> Fut,
        Fut: Future<Output = bool>,
    {
        let total = tiles.len() as u64;
        let mut report = DispatchReport {
            planned: total,
            ..DispatchReport::default()
        };

        if tiles.is_empty() {
            info!("No tiles to download; check your bounds or zoom levels.");
            return report;
        }

        info!(
            total,
            concurrency = self.concurrency,
            "Downloading {} tiles with concurrency={}",
            total,
            self.concurrency
        );

        let mut progress = ProgressState::with_interval(total, self.progress_interval);
        if let Some(pb) = &self.progress_bar {
            pb.set_length(total);
        }

        let results = stream::iter(tiles)
            .map(|tile| {
                let attempt = fetch(tile);
                async move { FetchResult::new(tile, attempt.await) }
            })
            .buffer_unordered(self.concurrency);
        let mut results = std::pin::pin!(results);

        while let Some(result) = results.next().await {
            progress.record(result.success);
            if result.success {
                debug!(tile = %result.tile, "Tile complete");
                report.successful.push(result.tile);
            } else {
                warn!(tile = %result.tile, "Tile {} failed after retries", result.tile);
                metrics::record_tile_failed();
                report.failed.push(result.tile);
            }

            if let Some(pb) = &self.progress_bar {
                pb.inc(1);
            }

            if progress.should_emit_update() {
                info!(
                    completed = progress.completed,
                    total = progress.total,
                    "{}",
                    progress.format_progress()
                );
            }
        }

        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }

        report.elapsed = progress.elapsed();
        info!(
            succeeded = progress.succeeded,
            failed = progress.failed,
            rate = %format!("{:.1}/s", progress.rate()),
            "Finished {} tiles in {}",
            total,
            format_duration(report.elapsed)
        );

        report
    }
}

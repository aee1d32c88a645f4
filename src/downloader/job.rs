//! Download job: one bounding box and zoom range fetched into one output directory

use crate::downloader::config::DownloadConfig;
use crate::downloader::executor::{DispatchReport, TileDispatcher};
use crate::downloader::plan::plan;
use crate::downloader::DownloadError;
use crate::fetcher::{TileFetcher, TileSource, UrlTemplate};
use crate::geodesy::tile_count;
use crate::metrics::RunMetrics;
use crate::output::{Manifest, TilePathBuilder};
use crate::{BoundingBox, TileId};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Instrument};

/// One bounding box and zoom range to fetch into one directory
#[derive(Debug, Clone)]
pub struct DownloadJob {
    /// Requested bounds
    pub bounds: BoundingBox,
    /// First zoom level (inclusive)
    pub min_zoom: u8,
    /// Last zoom level (inclusive)
    pub max_zoom: u8,
    /// Tile URL template
    pub template: UrlTemplate,
    /// Output root directory
    pub out_dir: PathBuf,
    /// Concurrency, retries and layout settings
    pub config: DownloadConfig,
}

/// Result of an executed job
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Per-tile outcomes
    pub report: DispatchReport,
    /// Manifest as written
    pub manifest: Manifest,
    /// Where the manifest was written
    pub manifest_path: PathBuf,
}

impl DownloadJob {
    /// Create a job with default settings
    pub fn new(
        bounds: BoundingBox,
        min_zoom: u8,
        max_zoom: u8,
        template: UrlTemplate,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bounds,
            min_zoom,
            max_zoom,
            template,
            out_dir: out_dir.into(),
            config: DownloadConfig::default(),
        }
    }

    /// Replace the settings
    pub fn with_config(mut self, config: DownloadConfig) -> Self {
        self.config = config;
        self
    }

    /// Tiles this job will attempt, in submission order
    pub fn plan(&self) -> Vec<TileId> {
        plan(&self.bounds, self.min_zoom, self.max_zoom)
    }

    /// Number of tiles without materializing the plan
    pub fn planned_count(&self) -> u64 {
        (self.min_zoom..=self.max_zoom)
            .map(|zoom| tile_count(&self.bounds, zoom))
            .sum()
    }

    fn paths(&self) -> TilePathBuilder {
        TilePathBuilder::new(&self.out_dir).with_extension(&self.config.extension)
    }

    /// Plan, fetch every tile from `source`, and write the manifest.
    ///
    /// Only a missing output root or an unwritable manifest fail the job; tile
    /// failures are reported in [`JobOutcome::report`].
    pub async fn execute(
        &self,
        source: Arc<dyn TileSource>,
        progress_bar: Option<ProgressBar>,
    ) -> Result<JobOutcome, DownloadError> {
        let span = tracing::info_span!(
            "download_job",
            bounds = %self.bounds,
            min_zoom = self.min_zoom,
            max_zoom = self.max_zoom,
            out_dir = %self.out_dir.display()
        );
        self.run(source, progress_bar).instrument(span).await
    }

    async fn run(
        &self,
        source: Arc<dyn TileSource>,
        progress_bar: Option<ProgressBar>,
    ) -> Result<JobOutcome, DownloadError> {
        let paths = self.paths();
        paths.ensure_root().map_err(|e| DownloadError::OutputRoot {
            path: self.out_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let tiles = self.plan();
        info!(
            planned = tiles.len(),
            "Planned {} tiles for zoom {}..={}",
            tiles.len(),
            self.min_zoom,
            self.max_zoom
        );
        let run_metrics = RunMetrics::start(tiles.len() as u64);

        let fetcher = TileFetcher::new(
            source,
            self.template.clone(),
            &self.out_dir,
            self.config.retry_count,
        )
        .with_extension(&self.config.extension);

        let mut dispatcher = TileDispatcher::from_config(&self.config);
        if let Some(pb) = progress_bar {
            dispatcher = dispatcher.with_progress_bar(pb);
        }

        let report = dispatcher
            .run(tiles, |tile| fetcher.fetch_tile(tile))
            .await;
        run_metrics.finish(report.successful.len() as u64, report.failed.len() as u64);

        let manifest = Manifest::new(
            self.bounds,
            self.min_zoom,
            self.max_zoom,
            report.successful.clone(),
        );
        let manifest_path = paths.manifest_path();
        manifest.save(&manifest_path)?;

        Ok(JobOutcome {
            report,
            manifest,
            manifest_path,
        })
    }
}

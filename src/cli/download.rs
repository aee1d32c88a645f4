//! Tile download command

use crate::downloader::config::{DEFAULT_PROGRESS_INTERVAL, DEFAULT_TILE_EXTENSION};
use crate::downloader::{DownloadConfig, DownloadJob, JobOutcome};
use crate::fetcher::{HttpTileSource, TileSource, UrlTemplate};
use crate::BoundingBox;
use clap::Parser;
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::progress::create_progress_bar;
use super::CliError;

/// Deepest zoom level accepted; tile indices at 2^30 still fit in `u32`
const MAX_ZOOM: i64 = 30;

fn parse_template(s: &str) -> Result<UrlTemplate, String> {
    UrlTemplate::parse(s).map_err(|e| e.to_string())
}

fn parse_progress_every(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value == 0 {
        return Err("progress interval must be at least 1".to_string());
    }
    Ok(value)
}

/// Download XYZ tiles covering a bounding box
#[derive(Parser, Debug)]
#[command(name = "tile-fetcher")]
#[command(about = "Download XYZ map tiles covering a bounding box for offline use", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Southern latitude of the bounding box
    #[arg(long, allow_hyphen_values = true)]
    pub min_lat: f64,

    /// Western longitude of the bounding box
    #[arg(long, allow_hyphen_values = true)]
    pub min_lon: f64,

    /// Northern latitude of the bounding box
    #[arg(long, allow_hyphen_values = true)]
    pub max_lat: f64,

    /// Eastern longitude of the bounding box
    #[arg(long, allow_hyphen_values = true)]
    pub max_lon: f64,

    /// First zoom level to download (inclusive)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_ZOOM))]
    pub min_zoom: u8,

    /// Last zoom level to download (inclusive)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_ZOOM))]
    pub max_zoom: u8,

    /// Tile URL with literal {z}, {x} and {y} placeholders
    /// (e.g. https://tile.openstreetmap.org/{z}/{x}/{y}.png)
    #[arg(long, value_parser = parse_template)]
    pub url_template: UrlTemplate,

    /// Output directory; tiles are stored as <out-dir>/<z>/<x>/<y>.<ext>
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Number of concurrent downloads (values below 1 are treated as 1)
    #[arg(long, default_value_t = 8, allow_hyphen_values = true)]
    pub concurrency: i64,

    /// Attempts per tile before giving up (values below 1 are treated as 1)
    #[arg(long, default_value_t = 3, allow_hyphen_values = true)]
    pub retry_count: i64,

    /// File extension for stored tiles
    #[arg(long, default_value = DEFAULT_TILE_EXTENSION)]
    pub extension: String,

    /// Completed tiles between progress log lines
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL, value_parser = parse_progress_every)]
    pub progress_every: u64,

    /// Plan only: report how many tiles would be fetched and exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9000)
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,

    /// Run summary format (json or human)
    #[arg(long, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Run summary formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

impl Cli {
    /// Requested bounding box
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon)
    }

    /// Download settings with minimum-1 coercion applied
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig::new(self.concurrency, self.retry_count)
            .with_progress_interval(self.progress_every)
            .with_extension(self.extension.as_str())
    }

    /// Job described by these arguments
    pub fn job(&self) -> DownloadJob {
        DownloadJob::new(
            self.bounds(),
            self.min_zoom,
            self.max_zoom,
            self.url_template.clone(),
            &self.out_dir,
        )
        .with_config(self.download_config())
    }

    /// Run the download against the shared HTTP client, starting the metrics
    /// exporter first when `--metrics-addr` is given
    pub async fn execute(&self) -> Result<(), CliError> {
        if let Some(addr) = self.metrics_addr {
            crate::metrics::init_metrics(addr).map_err(|e| {
                CliError::ConfigurationError(format!("metrics exporter on {addr}: {e}"))
            })?;
        }
        self.execute_with_source(HttpTileSource::shared()).await
    }

    /// Run the download against `source`
    pub async fn execute_with_source(&self, source: Arc<dyn TileSource>) -> Result<(), CliError> {
        let job = self.job();
        info!(
            bounds = %job.bounds,
            template = %job.template,
            out_dir = %job.out_dir.display(),
            concurrency = job.config.concurrency,
            retry_count = job.config.retry_count,
            "Starting tile download"
        );

        if self.dry_run {
            let planned = job.planned_count();
            info!(
                planned,
                "Dry run: {} tiles would be fetched for zoom {}..={}",
                planned,
                job.min_zoom,
                job.max_zoom
            );
            output_dry_run(self.output_format, &job, planned);
            return Ok(());
        }

        let progress_bar = if std::io::stderr().is_terminal() {
            Some(create_progress_bar(job.planned_count()))
        } else {
            None
        };

        let outcome = job.execute(source, progress_bar).await?;

        match self.output_format {
            OutputFormat::Json => output_json(&job, &outcome),
            OutputFormat::Human => output_human(&job, &outcome),
        }
        Ok(())
    }
}

fn output_dry_run(format: OutputFormat, job: &DownloadJob, planned: u64) {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dry_run": true,
                "planned": planned,
                "min_zoom": job.min_zoom,
                "max_zoom": job.max_zoom,
                "out_dir": job.out_dir.display().to_string(),
            });
            println!("{output}");
        }
        OutputFormat::Human => {
            println!("Dry run: {planned} tiles planned");
        }
    }
}

fn output_json(job: &DownloadJob, outcome: &JobOutcome) {
    let output = serde_json::json!({
        "success": true,
        "planned": outcome.report.planned,
        "downloaded": outcome.report.successful.len(),
        "failed": outcome.report.failed.len(),
        "elapsed_secs": outcome.report.elapsed.as_secs_f64(),
        "out_dir": job.out_dir.display().to_string(),
        "manifest": outcome.manifest_path.display().to_string(),
    });
    println!("{output}");
}

fn output_human(job: &DownloadJob, outcome: &JobOutcome) {
    println!("\nTile download completed!");
    println!("Output: {}", job.out_dir.display());
    println!("Tiles planned: {}", outcome.report.planned);
    println!("Tiles available: {}", outcome.report.successful.len());
    if !outcome.report.failed.is_empty() {
        println!("Tiles failed: {}", outcome.report.failed.len());
    }
    println!("Manifest: {}", outcome.manifest_path.display());
}

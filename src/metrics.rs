//! Tile download metrics
//!
//! Counters are recorded through the `metrics` facade and cost next to nothing when
//! no recorder is installed. Passing `--metrics-addr` installs a Prometheus exporter
//! so long runs can be scraped while they progress.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{debug, info};

static METRICS_INITIALIZED: OnceCell<SocketAddr> = OnceCell::new();

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime. Calling it again is a no-op.
pub fn init_metrics(addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(existing) = METRICS_INITIALIZED.get() {
        debug!(addr = %existing, "Metrics already initialized, skipping");
        return Ok(());
    }

    info!("Initializing metrics system on {}", addr);

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        "tile_fetch_attempts_total",
        Unit::Count,
        "Total number of tile requests sent to the tile server"
    );
    describe_counter!(
        "tiles_downloaded_total",
        Unit::Count,
        "Tiles fetched and written to disk"
    );
    describe_counter!(
        "tile_bytes_downloaded_total",
        Unit::Bytes,
        "Bytes of tile data written to disk"
    );
    describe_counter!(
        "tiles_skipped_total",
        Unit::Count,
        "Tiles already present on disk and not fetched again"
    );
    describe_counter!(
        "tiles_failed_total",
        Unit::Count,
        "Tiles that failed on every attempt"
    );
    describe_gauge!("tiles_planned", Unit::Count, "Tiles planned for the current run");
    describe_histogram!(
        "tile_run_duration_seconds",
        Unit::Seconds,
        "Duration of a complete tile run"
    );

    let _ = METRICS_INITIALIZED.set(addr);
    Ok(())
}

/// Whether an exporter has been installed
pub fn is_initialized() -> bool {
    METRICS_INITIALIZED.get().is_some()
}

/// One request sent to the tile server
pub fn record_fetch_attempt() {
    counter!("tile_fetch_attempts_total").increment(1);
}

/// A tile body of `bytes` bytes was stored
pub fn record_tile_downloaded(bytes: u64) {
    counter!("tiles_downloaded_total").increment(1);
    counter!("tile_bytes_downloaded_total").increment(bytes);
}

/// A tile was already on disk
pub fn record_tile_skipped() {
    counter!("tiles_skipped_total").increment(1);
}

/// A tile exhausted its attempts
pub fn record_tile_failed() {
    counter!("tiles_failed_total").increment(1);
}

/// Run-level metrics
pub struct RunMetrics {
    planned: u64,
    start_time: Instant,
}

impl RunMetrics {
    /// Start tracking a run of `planned` tiles
    pub fn start(planned: u64) -> Self {
        gauge!("tiles_planned").set(planned as f64);
        Self {
            planned,
            start_time: Instant::now(),
        }
    }

    /// Record run completion
    pub fn finish(&self, succeeded: u64, failed: u64) {
        let duration = self.start_time.elapsed();
        histogram!("tile_run_duration_seconds").record(duration.as_secs_f64());

        debug!(
            planned = self.planned,
            succeeded,
            failed,
            duration_secs = duration.as_secs(),
            "Tile run metrics recorded"
        );
    }
}

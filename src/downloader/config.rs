//! Download configuration constants

/// Default number of concurrent tile workers.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default number of attempts per tile.
/// Retries are immediate; there is no backoff between attempts.
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Emit a progress summary every N completed tiles (and always on the last one).
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 50;

/// File extension of stored tiles
pub const DEFAULT_TILE_EXTENSION: &str = "png";

/// Name of the manifest written into the output directory
pub const MANIFEST_FILE_NAME: &str = "tiles_manifest.json";

/// Tunables for a download run.
///
/// Values below 1 are coerced up to 1 by [`DownloadConfig::new`] and the `with_*`
/// setters, so a config always describes at least one worker and one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Number of concurrent workers
    pub concurrency: usize,
    /// Attempts per tile
    pub retry_count: u32,
    /// Completions between progress summaries
    pub progress_interval: u64,
    /// Tile file extension without the leading dot
    pub extension: String,
}

impl DownloadConfig {
    /// Create a config, coercing concurrency and retry count to at least 1
    pub fn new(concurrency: i64, retry_count: i64) -> Self {
        Self::default()
            .with_concurrency(concurrency)
            .with_retry_count(retry_count)
    }

    /// Set worker count (minimum 1)
    pub fn with_concurrency(mut self, concurrency: i64) -> Self {
        self.concurrency = concurrency.max(1) as usize;
        self
    }

    /// Set attempts per tile (minimum 1)
    pub fn with_retry_count(mut self, retry_count: i64) -> Self {
        self.retry_count = retry_count.clamp(1, u32::MAX as i64) as u32;
        self
    }

    /// Set completions between progress summaries (minimum 1)
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Set the tile file extension; a leading dot is stripped
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            retry_count: DEFAULT_RETRY_COUNT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            extension: DEFAULT_TILE_EXTENSION.to_string(),
        }
    }
}

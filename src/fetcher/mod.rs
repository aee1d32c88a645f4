//! Tile fetching
//!
//! [`TileFetcher`] turns a [`TileId`] into a file on disk: it skips tiles that are
//! already present, renders the request URL from a [`UrlTemplate`], asks a
//! [`TileSource`] for the body up to `retry_limit` times, and persists the body
//! atomically. The network side sits behind the [`TileSource`] trait so the
//! pipeline can run against in-memory sources.

use crate::output::{write_atomic, TilePathBuilder};
use crate::{metrics, TileId};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub mod http;
pub mod retry_formatter;
pub mod template;

pub use http::HttpTileSource;
pub use retry_formatter::{RetryContext, RetryErrorType};
pub use template::UrlTemplate;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Non-success HTTP status
    #[error("HTTP status {status}")]
    HttpStatus {
        /// Status code returned by the server
        status: u16,
    },

    /// Request timed out
    #[error("timeout: {0}")]
    Timeout(String),

    /// Connection could not be established
    #[error("connection error: {0}")]
    Connection(String),

    /// Other transport error
    #[error("network error: {0}")]
    Network(String),

    /// Tile body could not be written
    #[error("IO error: {0}")]
    Io(String),

    /// URL template lacks a placeholder
    #[error("invalid URL template: {0}")]
    InvalidTemplate(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Something that can return the body of a tile URL
#[async_trait]
pub trait TileSource: Send + Sync {
    /// Fetch the full response body for `url`
    async fn fetch(&self, url: &str) -> FetcherResult<Bytes>;
}

/// Fetches single tiles into a `{root}/{z}/{x}/{y}.{ext}` hierarchy
pub struct TileFetcher {
    source: Arc<dyn TileSource>,
    template: UrlTemplate,
    paths: TilePathBuilder,
    retry_limit: u32,
}

impl TileFetcher {
    /// Create a fetcher writing `.png` tiles under `root`.
    ///
    /// `retry_limit` is the total number of attempts per tile (minimum 1).
    pub fn new(
        source: Arc<dyn TileSource>,
        template: UrlTemplate,
        root: impl Into<PathBuf>,
        retry_limit: u32,
    ) -> Self {
        Self {
            source,
            template,
            paths: TilePathBuilder::new(root),
            retry_limit: retry_limit.max(1),
        }
    }

    /// Store tiles with `extension` instead of `png`
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.paths = self.paths.with_extension(extension);
        self
    }

    /// Total attempts per tile
    pub fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    /// Destination of `tile` on disk
    pub fn tile_path(&self, tile: TileId) -> PathBuf {
        self.paths.tile_path(tile)
    }

    /// Make sure `tile` is on disk, fetching it if needed.
    ///
    /// Returns true when the tile file exists afterwards. An existing file counts as
    /// success without any request. Otherwise every attempt failure is logged and the
    /// next attempt follows immediately; the file is either fully written or absent.
    pub async fn fetch_tile(&self, tile: TileId) -> bool {
        let path = self.paths.tile_path(tile);

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            debug!(tile = %tile, "Tile already present, skipping");
            metrics::record_tile_skipped();
            return true;
        }

        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(
                    tile = %tile,
                    path = %parent.display(),
                    error = %e,
                    "Failed to create tile directory"
                );
                return false;
            }
        }

        let url = self.template.render(tile);

        for attempt in 1..=self.retry_limit {
            metrics::record_fetch_attempt();

            let result = match self.source.fetch(&url).await {
                Ok(body) => store(&path, body).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(bytes) => {
                    debug!(tile = %tile, attempt, bytes, "Tile stored");
                    metrics::record_tile_downloaded(bytes);
                    return true;
                }
                Err(error) => {
                    let context = RetryContext {
                        tile,
                        attempt,
                        max_attempts: self.retry_limit,
                        error: &error,
                    };
                    warn!(
                        tile = %tile,
                        attempt,
                        max_attempts = self.retry_limit,
                        url = %url,
                        "{}",
                        context.format_message()
                    );
                }
            }
        }

        false
    }
}

/// Persist `body` at `path` off the async runtime, returning the byte count
async fn store(path: &Path, body: Bytes) -> FetcherResult<u64> {
    let path = path.to_path_buf();
    let len = body.len() as u64;
    tokio::task::spawn_blocking(move || write_atomic(&path, &body))
        .await
        .map_err(|e| FetcherError::Io(format!("write task failed: {e}")))?
        .map_err(|e| FetcherError::Io(e.to_string()))?;
    Ok(len)
}

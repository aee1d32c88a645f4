//! CLI error types and conversions

use crate::downloader::DownloadError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Download error
    #[error("download error: {0}")]
    DownloadError(#[from] DownloadError),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

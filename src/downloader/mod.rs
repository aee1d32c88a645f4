//! Download planning and dispatch
//!
//! This module turns a bounding box and zoom range into a list of tiles and drives
//! the tile fetcher over that list with a bounded pool of concurrent workers.
//!
//! # Overview
//!
//! 1. **Planning**: [`plan::plan`] expands the request into ordered [`crate::TileId`]s
//! 2. **Dispatch**: [`executor::TileDispatcher`] runs one unit of work per tile
//! 3. **Progress**: [`progress::ProgressState`] counts completions and formats summaries
//! 4. **Configuration**: [`config::DownloadConfig`] holds concurrency/retry settings
//! 5. **Jobs**: [`job::DownloadJob`] ties the above together and writes the manifest
//!
//! # Quick Start
//!
//! ```no_run
//! use tile_fetcher::downloader::{plan, TileDispatcher};
//! use tile_fetcher::BoundingBox;
//!
//! # async fn example() {
//! let tiles = plan(&BoundingBox::new(40.70, -74.02, 40.72, -74.00), 10, 10);
//! let report = TileDispatcher::new(4)
//!     .run(tiles, |_tile| async { true })
//!     .await;
//! assert!(report.failed.is_empty());
//! # }
//! ```
//!
//! # Error Handling
//!
//! Individual tiles never fail the run: their outcome is recorded and the run moves
//! on. [`DownloadError`] covers the few run-level failures (output root, manifest).

pub mod config;
pub mod executor;
pub mod job;
pub mod plan;
pub mod progress;

pub use config::DownloadConfig;
pub use executor::{DispatchReport, TileDispatcher};
pub use job::{DownloadJob, JobOutcome};
pub use plan::plan;
pub use progress::ProgressState;

use crate::output::OutputError;

/// Run-level download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Output directory could not be created
    #[error("failed to create output directory {path}: {message}")]
    OutputRoot {
        /// Directory that could not be created
        path: String,
        /// Underlying IO error
        message: String,
    },

    /// Output error (manifest)
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

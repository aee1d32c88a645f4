//! Tile file layout
//!
//! Tiles are stored in the slippy-map directory layout used by most tile servers:
//!
//! ```text
//! {root}/{z}/{x}/{y}.{ext}
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use tile_fetcher::output::TilePathBuilder;
//! use tile_fetcher::TileId;
//! use std::path::Path;
//!
//! let builder = TilePathBuilder::new("tiles");
//! let path = builder.tile_path(TileId::new(10, 301, 385));
//! assert_eq!(path, Path::new("tiles/10/301/385.png"));
//! ```

use super::{OutputError, OutputResult};
use crate::downloader::config::{DEFAULT_TILE_EXTENSION, MANIFEST_FILE_NAME};
use crate::TileId;
use std::path::{Path, PathBuf};

/// Path builder for the `{z}/{x}/{y}` hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePathBuilder {
    root_dir: PathBuf,
    extension: String,
}

impl TilePathBuilder {
    /// Create a builder rooted at `root_dir` producing `.png` files
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            extension: DEFAULT_TILE_EXTENSION.to_string(),
        }
    }

    /// Use `extension` (with or without a leading dot)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Tile file extension
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `{root}/{z}/{x}`
    pub fn column_dir(&self, tile: TileId) -> PathBuf {
        self.root_dir
            .join(tile.z.to_string())
            .join(tile.x.to_string())
    }

    /// `{root}/{z}/{x}/{y}.{ext}`
    pub fn tile_path(&self, tile: TileId) -> PathBuf {
        self.column_dir(tile)
            .join(format!("{}.{}", tile.y, self.extension))
    }

    /// `{root}/tiles_manifest.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(MANIFEST_FILE_NAME)
    }

    /// Create the root directory (and parents) if missing
    pub fn ensure_root(&self) -> OutputResult<()> {
        std::fs::create_dir_all(&self.root_dir).map_err(|e| {
            OutputError::IoError(format!(
                "Failed to create directory {}: {}",
                self.root_dir.display(),
                e
            ))
        })
    }
}

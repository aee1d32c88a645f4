//! Coverage manifest
//!
//! Written once per run as `tiles_manifest.json` in the output directory:
//!
//! ```json
//! {
//!   "minLat": 40.7, "minLon": -74.02, "maxLat": 40.72, "maxLon": -74.0,
//!   "minZoom": 10, "maxZoom": 10,
//!   "tiles": [ { "z": 10, "x": 301, "y": 385 } ]
//! }
//! ```

use super::{write_atomic, OutputError, OutputResult};
use crate::downloader::config::MANIFEST_FILE_NAME;
use crate::{BoundingBox, TileId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Requested bounds and zoom range plus every tile retrieved, sorted by (z, x, y)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Southern latitude as requested
    pub min_lat: f64,
    /// Western longitude as requested
    pub min_lon: f64,
    /// Northern latitude as requested
    pub max_lat: f64,
    /// Eastern longitude as requested
    pub max_lon: f64,
    /// First zoom level requested
    pub min_zoom: u8,
    /// Last zoom level requested
    pub max_zoom: u8,
    /// Successfully retrieved tiles
    pub tiles: Vec<TileId>,
}

impl Manifest {
    /// Build a manifest; `tiles` may be in any order
    pub fn new(bounds: BoundingBox, min_zoom: u8, max_zoom: u8, mut tiles: Vec<TileId>) -> Self {
        tiles.sort_unstable();
        tiles.dedup();
        Self {
            min_lat: bounds.min_lat,
            min_lon: bounds.min_lon,
            max_lat: bounds.max_lat,
            max_lon: bounds.max_lon,
            min_zoom,
            max_zoom,
            tiles,
        }
    }

    /// Requested bounds
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> OutputResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OutputError::SerializationError(e.to_string()))
    }

    /// Write `tiles_manifest.json` into `dir`, replacing any earlier manifest
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> OutputResult<PathBuf> {
        let path = dir.as_ref().join(MANIFEST_FILE_NAME);
        self.save(&path)?;
        Ok(path)
    }

    /// Write the manifest to `path`
    pub fn save(&self, path: &Path) -> OutputResult<()> {
        debug!(path = %path.display(), tiles = self.tiles.len(), "Saving manifest");
        let json = self.to_json()?;
        write_atomic(path, json.as_bytes())?;
        info!(tiles = self.tiles.len(), "Wrote manifest to {}", path.display());
        Ok(())
    }

    /// Load a manifest from `path`
    pub fn load(path: &Path) -> OutputResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OutputError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| OutputError::SerializationError(e.to_string()))
    }
}

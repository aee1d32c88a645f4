//! # Tile Fetcher Library
//!
//! Downloads raster map tiles from XYZ ("slippy map") tile servers for offline use.
//! A geographic bounding box and a zoom range are expanded into the tiles that cover
//! them, every tile is fetched concurrently with bounded retries, and the results are
//! stored as `{z}/{x}/{y}.png` next to a `tiles_manifest.json` describing what was
//! retrieved.
//!
//! ## Features
//!
//! - **Web Mercator tiling**: Four-corner bounding box projection per zoom level
//! - **Bounded concurrency**: Fixed-size worker pool over the planned tile list
//! - **Resume by existence**: Tiles already on disk are never fetched again
//! - **Atomic writes**: A tile file is either complete or absent
//! - **Manifest**: Sorted record of every tile that was successfully retrieved
//!
//! ## Quick Start
//!
//! ```no_run
//! use tile_fetcher::downloader::{plan, DownloadConfig, TileDispatcher};
//! use tile_fetcher::fetcher::{HttpTileSource, TileFetcher, UrlTemplate};
//! use tile_fetcher::output::Manifest;
//! use tile_fetcher::BoundingBox;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bounds = BoundingBox::new(40.70, -74.02, 40.72, -74.00);
//! let tiles = plan(&bounds, 10, 12);
//!
//! let template = UrlTemplate::parse("https://tile.example.com/{z}/{x}/{y}.png")?;
//! let fetcher = TileFetcher::new(HttpTileSource::shared(), template, "./tiles", 3);
//!
//! let dispatcher = TileDispatcher::new(DownloadConfig::default().concurrency);
//! let report = dispatcher.run(tiles, |tile| fetcher.fetch_tile(tile)).await;
//!
//! Manifest::new(bounds, 10, 12, report.successful).write_to_dir("./tiles")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`geodesy`] - Latitude/longitude to tile index projection
//! - [`downloader`] - Planning, dispatching and progress accounting
//! - [`fetcher`] - URL templates, tile sources and the retrying tile fetcher
//! - [`output`] - Tile paths and the coverage manifest
//! - [`cli`] - Command-line interface
//! - [`metrics`] - Counters for fetched, skipped and failed tiles

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// CLI command implementation
pub mod cli;

/// Download planning and dispatch
pub mod downloader;

/// Tile fetching
pub mod fetcher;

/// Web Mercator tile projection
pub mod geodesy;

/// Tile metrics
pub mod metrics;

/// Tile and manifest output
pub mod output;

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Geographic bounding box in degrees.
///
/// `min <= max` is not enforced. Inverted or degenerate boxes are accepted as-is and
/// simply produce whatever tile range their corners project to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern latitude
    pub min_lat: f64,
    /// Western longitude
    pub min_lon: f64,
    /// Northern latitude
    pub max_lat: f64,
    /// Eastern longitude
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a bounding box from (min_lat, min_lon, max_lat, max_lon)
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// All four corners: SW, SE, NW, NE
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.min_lat, self.min_lon),
            GeoPoint::new(self.min_lat, self.max_lon),
            GeoPoint::new(self.max_lat, self.min_lon),
            GeoPoint::new(self.max_lat, self.max_lon),
        ]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] - [{}, {}]",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Slippy-map tile identifier.
///
/// Ordering is lexicographic on (z, x, y), which is the order tiles appear in the
/// manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    /// Zoom level
    pub z: u8,
    /// Column
    pub x: u32,
    /// Row (counted from the north)
    pub y: u32,
}

impl TileId {
    /// Create a new tile identifier
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Outcome of fetching a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchResult {
    /// The tile that was attempted
    pub tile: TileId,
    /// Whether the tile is now present on disk
    pub success: bool,
}

impl FetchResult {
    /// Record an outcome
    pub fn new(tile: TileId, success: bool) -> Self {
        Self { tile, success }
    }
}

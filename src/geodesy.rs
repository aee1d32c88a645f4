//! Web Mercator tile projection
//!
//! Maps latitude/longitude to slippy-map tile indices (EPSG:3857 tiling scheme) and
//! a bounding box to the rectangle of tiles covering it.
//!
//! # Known limitation
//!
//! Boxes crossing the antimeridian (±180°) are not handled. The four corners are
//! projected independently and the min/max rectangle is taken, so such a box yields
//! a range spanning the whole grid between its two longitudes instead of wrapping.

use crate::{BoundingBox, GeoPoint, TileId};
use std::f64::consts::PI;

/// Northern latitude limit of the Web Mercator projection
pub const MAX_LAT: f64 = 85.05112878;
/// Southern latitude limit of the Web Mercator projection
pub const MIN_LAT: f64 = -85.05112878;
/// Eastern longitude limit
pub const MAX_LON: f64 = 180.0;
/// Western longitude limit
pub const MIN_LON: f64 = -180.0;

/// Project a coordinate to tile indices at `zoom`.
///
/// Latitude is clamped to [`MIN_LAT`]..=[`MAX_LAT`] and longitude to
/// [`MIN_LON`]..=[`MAX_LON`]. Indices are floored, so a coordinate lying exactly on a
/// tile edge belongs to the tile with the lower index. The eastern and southern edges
/// of the world (lon = 180, lat = [`MIN_LAT`]) are folded into the last column/row.
pub fn project(lat: f64, lon: f64, zoom: u8) -> (u32, u32) {
    let lat = lat.clamp(MIN_LAT, MAX_LAT);
    let lon = lon.clamp(MIN_LON, MAX_LON);

    let lat_rad = lat.to_radians();
    let n = 2f64.powi(zoom as i32);
    let last = n - 1.0;

    let x = ((lon + 180.0) / 360.0 * n).floor();
    let merc = (PI / 4.0 + lat_rad / 2.0).tan().ln();
    let y = ((1.0 - merc / PI) / 2.0 * n).floor();

    (x.clamp(0.0, last) as u32, y.clamp(0.0, last) as u32)
}

/// Project a [`GeoPoint`] to tile indices at `zoom`
pub fn project_point(point: GeoPoint, zoom: u8) -> (u32, u32) {
    project(point.lat, point.lon, zoom)
}

/// Inclusive tile index rectangle at a single zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// Zoom level
    pub zoom: u8,
    /// Smallest column
    pub min_x: u32,
    /// Largest column
    pub max_x: u32,
    /// Smallest row
    pub min_y: u32,
    /// Largest row
    pub max_y: u32,
}

impl TileRange {
    /// Number of tiles in the rectangle; zero when `min > max` on either axis
    pub fn len(&self) -> u64 {
        if self.max_x < self.min_x || self.max_y < self.min_y {
            return 0;
        }
        let width = (self.max_x - self.min_x) as u64 + 1;
        let height = (self.max_y - self.min_y) as u64 + 1;
        width * height
    }

    /// Whether the rectangle holds no tiles.
    ///
    /// Ranges from [`covering_range`] always hold at least one tile; only a
    /// hand-built range with `min > max` is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate tiles x-outer, y-inner, both ascending
    pub fn iter(&self) -> impl Iterator<Item = TileId> {
        let TileRange {
            zoom,
            min_x,
            max_x,
            min_y,
            max_y,
        } = *self;
        (min_x..=max_x).flat_map(move |x| (min_y..=max_y).map(move |y| TileId::new(zoom, x, y)))
    }
}

/// Tile rectangle covering `bbox` at `zoom`.
///
/// All four corners are projected and the min/max over them is taken, which may
/// over-cover slightly but never under-covers.
pub fn covering_range(bbox: &BoundingBox, zoom: u8) -> TileRange {
    let projected = bbox.corners().map(|corner| project_point(corner, zoom));

    let mut range = TileRange {
        zoom,
        min_x: u32::MAX,
        max_x: 0,
        min_y: u32::MAX,
        max_y: 0,
    };
    for (x, y) in projected {
        range.min_x = range.min_x.min(x);
        range.max_x = range.max_x.max(x);
        range.min_y = range.min_y.min(y);
        range.max_y = range.max_y.max(y);
    }
    range
}

/// Every `(x, y)` covering `bbox` at `zoom`, x-outer then y-inner
pub fn tiles_covering(bbox: &BoundingBox, zoom: u8) -> impl Iterator<Item = (u32, u32)> {
    covering_range(bbox, zoom).iter().map(|tile| (tile.x, tile.y))
}

/// Number of tiles covering `bbox` at `zoom`
pub fn tile_count(bbox: &BoundingBox, zoom: u8) -> u64 {
    covering_range(bbox, zoom).len()
}

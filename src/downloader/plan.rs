//! Tile planning

use crate::geodesy::covering_range;
use crate::{BoundingBox, TileId};
use tracing::debug;

/// Expand `bbox` over `min_zoom..=max_zoom` into the tiles to fetch.
///
/// Zooms ascend; within a zoom tiles are ordered x-outer, y-inner. An inverted zoom
/// range yields an empty plan.
pub fn plan(bbox: &BoundingBox, min_zoom: u8, max_zoom: u8) -> Vec<TileId> {
    let mut tiles = Vec::new();
    for zoom in min_zoom..=max_zoom {
        let range = covering_range(bbox, zoom);
        debug!(
            zoom,
            min_x = range.min_x,
            max_x = range.max_x,
            min_y = range.min_y,
            max_y = range.max_y,
            tiles = range.len(),
            "Planned zoom level"
        );
        tiles.extend(range.iter());
    }
    tiles
}

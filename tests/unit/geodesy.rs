//! Projection properties over a sweep of coordinates and zoom levels

use tile_fetcher::geodesy::{covering_range, project, tile_count, tiles_covering, MAX_LAT, MIN_LAT};
use tile_fetcher::BoundingBox;

#[test]
fn test_indices_stay_inside_grid() {
    for zoom in 0..=20u8 {
        let last = (1u64 << zoom) - 1;
        for lat in [-90.0, MIN_LAT, -45.0, -0.0001, 0.0, 33.3, MAX_LAT, 90.0] {
            for lon in [-200.0, -180.0, -90.0, 0.0, 0.0001, 179.9999, 180.0, 200.0] {
                let (x, y) = project(lat, lon, zoom);
                assert!(x as u64 <= last, "x={x} zoom={zoom} lon={lon}");
                assert!(y as u64 <= last, "y={y} zoom={zoom} lat={lat}");
            }
        }
    }
}

#[test]
fn test_origin_is_grid_center() {
    for zoom in 1..=24u8 {
        let half = 1u32 << (zoom - 1);
        assert_eq!(project(0.0, 0.0, zoom), (half, half), "zoom {zoom}");
    }
}

#[test]
fn test_single_point_box_yields_one_tile() {
    let points = [(40.7128, -74.0060), (-33.8688, 151.2093), (51.5074, -0.1278)];
    for (lat, lon) in points {
        let bbox = BoundingBox::new(lat, lon, lat, lon);
        for zoom in [0u8, 5, 12, 18] {
            assert_eq!(tiles_covering(&bbox, zoom).count(), 1);
        }
    }
}

#[test]
fn test_growing_box_never_loses_tiles() {
    let (lat, lon) = (48.8566, 2.3522);
    let zoom = 12;
    let mut previous: Vec<(u32, u32)> = Vec::new();
    for step in 1..=10 {
        let d = step as f64 * 0.01;
        let bbox = BoundingBox::new(lat - d, lon - d, lat + d, lon + d);
        let tiles: Vec<(u32, u32)> = tiles_covering(&bbox, zoom).collect();
        assert!(previous.iter().all(|t| tiles.contains(t)), "step {step}");
        previous = tiles;
    }
}

#[test]
fn test_whole_world_covers_full_grid() {
    let world = BoundingBox::new(-90.0, -180.0, 90.0, 180.0);
    for zoom in 0..=6u8 {
        let side = 1u64 << zoom;
        assert_eq!(tile_count(&world, zoom), side * side);
        let range = covering_range(&world, zoom);
        assert_eq!((range.min_x, range.min_y), (0, 0));
        assert_eq!((range.max_x as u64, range.max_y as u64), (side - 1, side - 1));
    }
}

//! Manifest file format

use tempfile::TempDir;
use tile_fetcher::output::Manifest;
use tile_fetcher::{BoundingBox, TileId};

#[test]
fn test_written_file_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let manifest = Manifest::new(
        BoundingBox::new(40.70, -74.02, 40.72, -74.00),
        10,
        12,
        vec![TileId::new(12, 1206, 1539), TileId::new(10, 301, 384)],
    );

    let path = manifest.write_to_dir(dir.path()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    for key in ["minLat", "minLon", "maxLat", "maxLon", "minZoom", "maxZoom", "tiles"] {
        assert!(text.contains(&format!("\"{key}\"")), "missing {key}");
    }
    assert!(!text.contains("min_lat"));
    // two-space indentation
    assert!(text.contains("\n  \"minLat\""));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["tiles"][0], serde_json::json!({"z": 10, "x": 301, "y": 384}));
    assert_eq!(value["tiles"][1], serde_json::json!({"z": 12, "x": 1206, "y": 1539}));
}

#[test]
fn test_duplicate_tiles_collapse() {
    let tile = TileId::new(3, 2, 1);
    let manifest = Manifest::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 3, 3, vec![tile, tile]);
    assert_eq!(manifest.tiles, vec![tile]);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    assert!(Manifest::load(&dir.path().join("tiles_manifest.json")).is_err());
}

//! Tests for coordinate conversion

use super::*;

#[test]
fn test_new_york_city_at_zoom_16() {
    // New York City: 40.7128°N, 74.0060°W
    let tile = to_tile_coords(40.7128, -74.0060, 16).unwrap();
    assert_eq!(tile.x, 19295);
    assert_eq!(tile.y, 24640);
    assert_eq!(tile.zoom, 16);
}

#[test]
fn test_london_at_zoom_10() {
    let tile = to_tile_coords(51.5074, -0.1278, 10).unwrap();
    assert_eq!(tile, TileCoord::new(511, 340, 10));
}

#[test]
fn test_equator_prime_meridian() {
    // At zoom 1: 2×2 tiles, 0°N 0°E is the corner of tile (1, 1)
    let tile = to_tile_coords(0.0, 0.0, 1).unwrap();
    assert_eq!(tile.x, 1);
    assert_eq!(tile.y, 1);
}

#[test]
fn test_invalid_latitude() {
    assert!(matches!(
        to_tile_coords(90.0, 0.0, 10),
        Err(CoordError::InvalidLatitude(_))
    ));
    assert!(matches!(
        to_tile_coords(-90.0, 0.0, 10),
        Err(CoordError::InvalidLatitude(_))
    ));
}

#[test]
fn test_invalid_longitude() {
    assert!(matches!(
        to_tile_coords(0.0, 181.0, 10),
        Err(CoordError::InvalidLongitude(_))
    ));
    assert!(matches!(
        to_tile_coords(0.0, -181.0, 10),
        Err(CoordError::InvalidLongitude(_))
    ));
}

#[test]
fn test_invalid_zoom_too_high() {
    assert!(matches!(
        to_tile_coords(0.0, 0.0, 19),
        Err(CoordError::InvalidZoom(19))
    ));
}

#[test]
fn test_world_edges_clamp_into_last_tile() {
    let east = to_tile_coords(0.0, 180.0, 4).unwrap();
    assert_eq!(east.x, 15);

    let south = to_tile_coords(MIN_LAT, 0.0, 4).unwrap();
    assert_eq!(south.y, 15);

    let north = to_tile_coords(MAX_LAT, 0.0, 4).unwrap();
    assert_eq!(north.y, 0);
}

#[test]
fn test_error_display() {
    let msg = CoordError::InvalidZoom(25).to_string();
    assert!(msg.contains("25"));
    assert!(msg.contains("18"));
}

#[test]
fn test_roundtrip_northwest_corner_within_one_tile() {
    for zoom in [1u8, 5, 10, 14, 18] {
        let side = 1u32 << zoom;
        for (x, y) in [(0, 0), (side / 2, side / 3), (side - 1, side - 1)] {
            let tile = TileCoord::new(x, y, zoom);
            let (lat, lon) = tile_to_lat_lon(&tile);
            let back = to_tile_coords(lat.clamp(MIN_LAT, MAX_LAT), lon, zoom).unwrap();

            assert!(
                (back.x as i64 - tile.x as i64).abs() <= 1,
                "zoom {}: x {} -> {}",
                zoom,
                tile.x,
                back.x
            );
            assert!(
                (back.y as i64 - tile.y as i64).abs() <= 1,
                "zoom {}: y {} -> {}",
                zoom,
                tile.y,
                back.y
            );
        }
    }
}

#[test]
fn test_roundtrip_tile_center_is_exact() {
    let tile = TileCoord::new(8580, 5737, 14);
    let bounds = tile_bounds(&tile);
    let center_lat = (bounds.min_lat + bounds.max_lat) / 2.0;
    let center_lon = (bounds.min_lon + bounds.max_lon) / 2.0;

    assert_eq!(to_tile_coords(center_lat, center_lon, 14).unwrap(), tile);
}

#[test]
fn test_tile_bounds_match_neighbour_corners() {
    let tile = TileCoord::new(8580, 5738, 14);
    let bounds = tile_bounds(&tile);

    let (nw_lat, nw_lon) = tile_to_lat_lon(&tile);
    let (se_lat, se_lon) = tile_to_lat_lon(&TileCoord::new(8581, 5739, 14));

    assert_eq!(bounds.max_lat, nw_lat);
    assert_eq!(bounds.min_lon, nw_lon);
    assert_eq!(bounds.min_lat, se_lat);
    assert_eq!(bounds.max_lon, se_lon);
    assert!(bounds.min_lat < bounds.max_lat);
    assert!((bounds.max_lat - 47.368_594).abs() < 1e-5);
}

#[test]
fn test_bounds_contains() {
    let bounds = tile_bounds(&TileCoord::new(8580, 5738, 14));
    assert!(bounds.contains(bounds.min_lat, bounds.min_lon));
    assert!(bounds.contains(bounds.max_lat, bounds.max_lon));
    assert!(!bounds.contains(bounds.max_lat + 0.01, bounds.min_lon));
}

#[test]
fn test_projection_origin_and_monotonic() {
    assert!(lat_to_y(0.0).abs() < 1e-9);
    assert_eq!(lon_to_x(12.5), 12.5);
    assert!(lat_to_y(45.0) > lat_to_y(44.0));
    assert!((lat_to_y(45.0) - 50.498_986).abs() < 1e-5);
}

#[test]
fn test_projected_extent_is_positive() {
    let extent = tile_bounds(&TileCoord::new(8580, 5738, 14)).projected_extent();
    assert!(extent.width > 0.0);
    assert!(extent.height > 0.0);
    // Mercator tiles are square on the projected plane
    assert!((extent.width - extent.height).abs() < 1e-6);
}

#[test]
fn test_offset_inside_world() {
    let tile = TileCoord::new(5, 5, 4);
    assert_eq!(tile.offset(1, -1), Some(TileCoord::new(6, 4, 4)));
    assert_eq!(tile.offset(0, 0), Some(tile));
}

#[test]
fn test_offset_outside_world() {
    let tile = TileCoord::new(0, 15, 4);
    assert_eq!(tile.offset(-1, 0), None);
    assert_eq!(tile.offset(0, 1), None);
    assert_eq!(tile.tiles_per_side(), 16);
}

#[test]
fn test_offset_by_extreme_deltas() {
    let tile = TileCoord::new(5, 5, 4);
    assert_eq!(tile.offset(i64::MAX, 0), None);
    assert_eq!(tile.offset(0, i64::MIN), None);
}

#[test]
fn test_display() {
    assert_eq!(TileCoord::new(3, 4, 5).to_string(), "5/3/4");
}

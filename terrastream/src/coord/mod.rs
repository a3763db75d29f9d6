//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude),
//! slippy-map tile coordinates, and the local projected plane that chunk
//! contents are laid out on.

mod types;

pub use types::{
    CoordError, GeoBounds, ProjectedExtent, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT,
    MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Projects a longitude onto the local plane.
///
/// Spherical Mercator keeps longitude linear, so the projected value is the
/// longitude itself in degree units.
#[inline]
pub fn lon_to_x(lon: f64) -> f64 {
    lon
}

/// Projects a latitude onto the local plane (spherical Mercator, degree units).
#[inline]
pub fn lat_to_y(lat: f64) -> f64 {
    (PI / 4.0 + lat.to_radians() / 2.0).tan().ln().to_degrees()
}

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 18)
///
/// # Returns
///
/// A `Result` containing the tile coordinates or an error if inputs are invalid.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n - 1.0;

    // lon = 180 and lat = MIN_LAT land exactly on the far edge; clamp into the last tile
    let x = ((lon + 180.0) / 360.0 * n).floor().min(max_index) as u32;

    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n)
        .floor()
        .clamp(0.0, max_index) as u32;

    Ok(TileCoord { x, y, zoom })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the `(lat, lon)` of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    corner_lat_lon(tile.x as f64, tile.y as f64, tile.zoom)
}

/// Returns the geographic edges of a tile.
pub fn tile_bounds(tile: &TileCoord) -> GeoBounds {
    let (max_lat, min_lon) = corner_lat_lon(tile.x as f64, tile.y as f64, tile.zoom);
    let (min_lat, max_lon) = corner_lat_lon(tile.x as f64 + 1.0, tile.y as f64 + 1.0, tile.zoom);
    GeoBounds {
        min_lat,
        min_lon,
        max_lat,
        max_lon,
    }
}

fn corner_lat_lon(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let n = 2.0_f64.powi(zoom as i32);
    let lon = x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
    (lat, lon)
}

#[cfg(test)]
mod tests;

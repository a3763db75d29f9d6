//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Supported zoom levels
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 18;

/// Tile coordinates in the Web Mercator / Slippy Map system.
///
/// `x` grows eastward and `y` grows southward, so the tile north of
/// `(x, y)` is `(x, y - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// X coordinate (west-east), 0 at the antimeridian
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
    /// Zoom level (0-18)
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a tile coordinate.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Number of tiles along one side of the world at this zoom level.
    #[inline]
    pub fn tiles_per_side(&self) -> u64 {
        1u64 << self.zoom
    }

    /// Returns the tile `dx` columns east and `dy` rows south of this one.
    ///
    /// Returns `None` when the result falls outside the world at this zoom.
    pub fn offset(&self, dx: i64, dy: i64) -> Option<TileCoord> {
        let side = self.tiles_per_side() as i64;
        let x = (self.x as i64).checked_add(dx)?;
        let y = (self.y as i64).checked_add(dy)?;
        if !(0..side).contains(&x) || !(0..side).contains(&y) {
            return None;
        }
        Some(TileCoord {
            x: x as u32,
            y: y as u32,
            zoom: self.zoom,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Geographic edges of one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Size of these bounds on the projected plane.
    pub fn projected_extent(&self) -> ProjectedExtent {
        ProjectedExtent {
            width: super::lon_to_x(self.max_lon) - super::lon_to_x(self.min_lon),
            height: super::lat_to_y(self.max_lat) - super::lat_to_y(self.min_lat),
        }
    }

    /// Whether a geographic point lies inside (or on the edge of) the bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Width and height of a tile in projected units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedExtent {
    pub width: f64,
    pub height: f64,
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-85.05112878 to 85.05112878)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (0 to 18)
    InvalidZoom(u8),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}

//! Default values and constants for all configuration settings.

/// Side length of one chunk cell, in world units.
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

/// Rings of chunks kept around the viewpoint cell.
pub const DEFAULT_ADJACENT_LAYERS: u32 = 1;

/// Chunks retained beyond the required window before eviction starts.
pub const DEFAULT_MAX_RESIDUAL_CHUNKS: usize = 2;

/// Upper bound for adjacent layers; a window of 33x33 chunks is already
/// more than any source will serve in time.
pub const MAX_ADJACENT_LAYERS: u32 = 16;

pub const DEFAULT_START_LAT: f64 = 0.0;
pub const DEFAULT_START_LON: f64 = 0.0;
pub const DEFAULT_ZOOM: u8 = 14;

pub const DEFAULT_GENERATE_TERRAIN: bool = true;
pub const DEFAULT_GENERATE_OSM: bool = false;

/// Terrarium elevation tiles (256x256 PNG).
pub const DEFAULT_ELEVATION_URL: &str =
    "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png";

/// OSM API 0.6 `map` call for a tile's bounding box.
pub const DEFAULT_OSM_URL: &str =
    "https://api.openstreetmap.org/api/0.6/map?bbox={min_lon},{min_lat},{max_lon},{max_lat}";

/// HTTP request timeout for tile sources.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = crate::pipeline::http::DEFAULT_TIMEOUT_SECS;

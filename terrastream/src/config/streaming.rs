//! Chunk streaming configuration.

use thiserror::Error;

use super::defaults::*;
use crate::coord::{to_tile_coords, CoordError, TileCoord};
use crate::heightmap::ElevationRange;

/// Validation errors for [`StreamingConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cell size must be a positive, finite number
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    /// Too many adjacent layers
    #[error("adjacent layers must be at most {max}, got {value}")]
    TooManyLayers { value: u32, max: u32 },

    /// Start location or zoom out of range
    #[error("invalid start location: {0}")]
    InvalidLocation(#[from] CoordError),

    /// Elevation height span must be positive
    #[error("elevation height must be positive and finite, got {0}")]
    InvalidElevationRange(f32),
}

/// Parameters of the chunk streamer.
///
/// Read-only once handed to the streamer.
///
/// # Example
///
/// ```
/// use terrastream::config::StreamingConfig;
///
/// let config = StreamingConfig::new()
///     .with_start(48.8584, 2.2945)
///     .with_zoom(12)
///     .with_adjacent_layers(2);
/// assert_eq!(config.window_size(), 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamingConfig {
    /// World units per chunk side
    cell_size: f64,
    /// Chebyshev radius of the required window
    adjacent_layers: u32,
    /// Extra chunks kept before evicting
    max_residual_chunks: usize,
    start_lat: f64,
    start_lon: f64,
    zoom: u8,
    generate_terrain: bool,
    generate_osm: bool,
    elevation_range: ElevationRange,
}

impl StreamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set how many rings of chunks around the viewpoint cell are required.
    ///
    /// The required window holds `(2 * layers + 1)^2` chunks.
    pub fn with_adjacent_layers(mut self, layers: u32) -> Self {
        self.adjacent_layers = layers;
        self
    }

    pub fn with_max_residual_chunks(mut self, residual: usize) -> Self {
        self.max_residual_chunks = residual;
        self
    }

    /// Set the geographic location that world origin maps to.
    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.start_lat = lat;
        self.start_lon = lon;
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_generate_terrain(mut self, enabled: bool) -> Self {
        self.generate_terrain = enabled;
        self
    }

    pub fn with_generate_osm(mut self, enabled: bool) -> Self {
        self.generate_osm = enabled;
        self
    }

    pub fn with_elevation_range(mut self, range: ElevationRange) -> Self {
        self.elevation_range = range;
        self
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn adjacent_layers(&self) -> u32 {
        self.adjacent_layers
    }

    pub fn max_residual_chunks(&self) -> usize {
        self.max_residual_chunks
    }

    pub fn start_lat(&self) -> f64 {
        self.start_lat
    }

    pub fn start_lon(&self) -> f64 {
        self.start_lon
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn generate_terrain(&self) -> bool {
        self.generate_terrain
    }

    pub fn generate_osm(&self) -> bool {
        self.generate_osm
    }

    pub fn elevation_range(&self) -> ElevationRange {
        self.elevation_range
    }

    /// Number of chunks in the required window.
    pub fn window_size(&self) -> usize {
        let side = 2 * self.adjacent_layers as usize + 1;
        side * side
    }

    /// Chunk count above which eviction kicks in.
    pub fn retention_budget(&self) -> usize {
        self.window_size() + self.max_residual_chunks
    }

    /// Tile containing the start location; world cell (0, 0) maps here.
    pub fn start_tile(&self) -> Result<TileCoord, CoordError> {
        to_tile_coords(self.start_lat, self.start_lon, self.zoom)
    }

    /// Checks every value for range errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.adjacent_layers > MAX_ADJACENT_LAYERS {
            return Err(ConfigError::TooManyLayers {
                value: self.adjacent_layers,
                max: MAX_ADJACENT_LAYERS,
            });
        }
        let height = self.elevation_range.height;
        if !(height.is_finite() && height > 0.0) {
            return Err(ConfigError::InvalidElevationRange(height));
        }
        self.start_tile()?;
        Ok(())
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            adjacent_layers: DEFAULT_ADJACENT_LAYERS,
            max_residual_chunks: DEFAULT_MAX_RESIDUAL_CHUNKS,
            start_lat: DEFAULT_START_LAT,
            start_lon: DEFAULT_START_LON,
            zoom: DEFAULT_ZOOM,
            generate_terrain: DEFAULT_GENERATE_TERRAIN,
            generate_osm: DEFAULT_GENERATE_OSM,
            elevation_range: ElevationRange::default(),
        }
    }
}

//! Height sample grid and elevation range.

/// Depth of the lowest representable point, in metres.
pub const DEFAULT_TERRAIN_DEPTH: f32 = -4400.0;

/// Span between the lowest and highest representable points, in metres.
pub const DEFAULT_TERRAIN_HEIGHT: f32 = 8848.0;

/// Absolute elevation range normalized samples are rescaled into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    /// Elevation of a sample with value 0.
    pub depth: f32,
    /// Elevation difference between samples 0 and 1.
    pub height: f32,
}

impl ElevationRange {
    pub fn new(depth: f32, height: f32) -> Self {
        Self { depth, height }
    }

    /// Rescales a normalized sample to an absolute elevation.
    #[inline]
    pub fn elevation(&self, sample: f32) -> f32 {
        self.depth + sample * self.height
    }
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self {
            depth: DEFAULT_TERRAIN_DEPTH,
            height: DEFAULT_TERRAIN_HEIGHT,
        }
    }
}

/// Square grid of normalized height samples, stored row-major.
///
/// A grid with resolution 0 is the empty grid: the tile had no elevation
/// data and renders flat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightGrid {
    resolution: usize,
    samples: Vec<f32>,
}

impl HeightGrid {
    /// Creates a grid from row-major samples.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != resolution * resolution`.
    pub fn from_samples(resolution: usize, samples: Vec<f32>) -> Self {
        assert_eq!(
            samples.len(),
            resolution * resolution,
            "sample count does not match resolution"
        );
        Self {
            resolution,
            samples,
        }
    }

    /// Creates a grid with every sample set to `value`.
    pub fn filled(resolution: usize, value: f32) -> Self {
        Self {
            resolution,
            samples: vec![value; resolution * resolution],
        }
    }

    /// The grid for a tile without elevation data.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.resolution == 0
    }

    /// Samples per side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        Some(self.samples[row * self.resolution + col])
    }

    /// One full row, south edge first.
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.resolution {
            return None;
        }
        let start = row * self.resolution;
        Some(&self.samples[start..start + self.resolution])
    }

    /// One full column, copied out since columns are strided.
    pub fn column(&self, col: usize) -> Option<Vec<f32>> {
        if col >= self.resolution {
            return None;
        }
        Some(
            (0..self.resolution)
                .map(|row| self.samples[row * self.resolution + col])
                .collect(),
        )
    }

    /// Overwrites a row. Returns false if the index or length does not fit.
    pub fn set_row(&mut self, row: usize, values: &[f32]) -> bool {
        if row >= self.resolution || values.len() != self.resolution {
            return false;
        }
        let start = row * self.resolution;
        self.samples[start..start + self.resolution].copy_from_slice(values);
        true
    }

    /// Overwrites a column. Returns false if the index or length does not fit.
    pub fn set_column(&mut self, col: usize, values: &[f32]) -> bool {
        if col >= self.resolution || values.len() != self.resolution {
            return false;
        }
        for (row, value) in values.iter().enumerate() {
            self.samples[row * self.resolution + col] = *value;
        }
        true
    }

    /// Absolute elevations for every sample, row-major.
    pub fn elevations(&self, range: ElevationRange) -> Vec<f32> {
        self.samples.iter().map(|s| range.elevation(*s)).collect()
    }
}

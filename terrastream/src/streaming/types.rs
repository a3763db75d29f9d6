//! World-space positions and chunk-grid cells.

/// Planar world position. `x` grows east, `z` grows north.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorldPos {
    pub x: f64,
    pub z: f64,
}

impl WorldPos {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Integer cell of the chunk grid.
///
/// Cell `(0, 0)` holds the start tile; cell `(gx, gz)` covers world
/// positions `[gx * size, (gx + 1) * size) × [gz * size, (gz + 1) * size)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i64,
    pub z: i64,
}

impl GridCell {
    pub fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// Cell containing `pos`, by floor division.
    pub fn containing(pos: WorldPos, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }

    /// South-west corner of the cell in world space.
    pub fn anchor(&self, cell_size: f64) -> WorldPos {
        WorldPos::new(self.x as f64 * cell_size, self.z as f64 * cell_size)
    }

    /// Chebyshev distance: `max(|dx|, |dz|)`.
    pub fn chebyshev(&self, other: GridCell) -> u64 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }

    /// Cell `dx` east and `dz` north of this one.
    ///
    /// `None` when the result does not fit the grid's integer range.
    pub fn offset(&self, dx: i64, dz: i64) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.z.checked_add(dz)?))
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_negative_positions() {
        assert_eq!(GridCell::containing(WorldPos::new(0.5, 0.5), 1.0), GridCell::new(0, 0));
        assert_eq!(GridCell::containing(WorldPos::new(-0.5, 1.0), 1.0), GridCell::new(-1, 1));
        assert_eq!(
            GridCell::containing(WorldPos::new(2560.0, -1.0), 256.0),
            GridCell::new(10, -1)
        );
    }

    #[test]
    fn test_anchor_is_south_west_corner() {
        assert_eq!(GridCell::new(-2, 3).anchor(100.0), WorldPos::new(-200.0, 300.0));
    }

    #[test]
    fn test_chebyshev() {
        let center = GridCell::new(0, 0);
        assert_eq!(center.chebyshev(center), 0);
        assert_eq!(GridCell::new(1, -1).chebyshev(center), 1);
        assert_eq!(GridCell::new(-3, 2).chebyshev(center), 3);
        assert_eq!(GridCell::new(5, 9).chebyshev(GridCell::new(4, 4)), 5);
    }

    #[test]
    fn test_offset_stops_at_integer_range() {
        assert_eq!(GridCell::new(1, 2).offset(-3, 4), Some(GridCell::new(-2, 6)));
        assert_eq!(GridCell::new(i64::MAX, 0).offset(1, 0), None);
        assert_eq!(GridCell::new(0, i64::MIN).offset(0, -1), None);
    }

    #[test]
    fn test_containing_saturates_far_positions() {
        let far = GridCell::containing(WorldPos::new(1e30, -1e30), 1.0);
        assert_eq!(far, GridCell::new(i64::MAX, i64::MIN));
    }

    #[test]
    fn test_display() {
        assert_eq!(GridCell::new(-1, 2).to_string(), "(-1, 2)");
    }
}

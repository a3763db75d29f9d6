//! Required-window and eviction arithmetic.
//!
//! Pure functions over cells and tiles, kept apart from the streamer so the
//! policies can be checked without spawning any work.

use std::collections::HashSet;

use super::types::GridCell;
use crate::coord::TileCoord;

/// Tile shown in `cell`, relative to the start tile in cell `(0, 0)`.
///
/// World `z` grows north while tile `y` grows south, hence the sign flip.
/// `None` when the cell falls outside the world at the start tile's zoom.
pub fn tile_for_cell(start: TileCoord, cell: GridCell) -> Option<TileCoord> {
    start.offset(cell.x, cell.z.checked_neg()?)
}

/// Cells within Chebyshev distance `layers` of `center`, row by row from
/// the south-west.
///
/// Cells past the grid's integer range are left out; they lie outside the
/// world anyway.
pub fn window_cells(center: GridCell, layers: u32) -> Vec<GridCell> {
    let layers = layers as i64;
    let mut cells = Vec::with_capacity(((2 * layers + 1) * (2 * layers + 1)) as usize);
    for dz in -layers..=layers {
        for dx in -layers..=layers {
            if let Some(cell) = center.offset(dx, dz) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Picks the chunks to evict so that at most `budget` remain.
///
/// Chunks in `required` are never picked. Among the rest, the farthest from
/// `center` (Chebyshev) go first; ties come out in input order.
pub fn select_evictions<I>(
    live: I,
    center: GridCell,
    required: &HashSet<TileCoord>,
    budget: usize,
) -> Vec<TileCoord>
where
    I: IntoIterator<Item = (TileCoord, GridCell)>,
{
    let live: Vec<_> = live.into_iter().collect();
    let excess = live.len().saturating_sub(budget);
    if excess == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(u64, TileCoord)> = live
        .into_iter()
        .filter(|(tile, _)| !required.contains(tile))
        .map(|(tile, cell)| (cell.chebyshev(center), tile))
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    candidates
        .into_iter()
        .take(excess)
        .map(|(_, tile)| tile)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> TileCoord {
        TileCoord::new(100, 200, 10)
    }

    #[test]
    fn test_tile_for_cell_flips_north_south() {
        assert_eq!(tile_for_cell(start(), GridCell::new(0, 0)), Some(start()));
        // One cell north is one tile row up
        assert_eq!(
            tile_for_cell(start(), GridCell::new(0, 1)),
            Some(TileCoord::new(100, 199, 10))
        );
        assert_eq!(
            tile_for_cell(start(), GridCell::new(2, -3)),
            Some(TileCoord::new(102, 203, 10))
        );
    }

    #[test]
    fn test_tile_for_cell_outside_world() {
        let corner = TileCoord::new(0, 0, 2);
        assert_eq!(tile_for_cell(corner, GridCell::new(-1, 0)), None);
        assert_eq!(tile_for_cell(corner, GridCell::new(0, 1)), None);
        assert_eq!(
            tile_for_cell(corner, GridCell::new(3, -3)),
            Some(TileCoord::new(3, 3, 2))
        );
        assert_eq!(tile_for_cell(corner, GridCell::new(4, 0)), None);
    }

    #[test]
    fn test_window_cells() {
        let center = GridCell::new(5, -2);
        assert_eq!(window_cells(center, 0), vec![center]);

        let cells = window_cells(center, 2);
        assert_eq!(cells.len(), 25);
        assert!(cells.iter().all(|c| c.chebyshev(center) <= 2));
        let unique: HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_window_at_integer_range_edge() {
        let edge = GridCell::new(i64::MAX, i64::MIN);

        let cells = window_cells(edge, 1);

        // Only the cells west and north of the corner exist
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&edge));
        assert!(cells.iter().all(|c| tile_for_cell(start(), *c).is_none()));
    }

    #[test]
    fn test_tile_for_cell_far_south() {
        assert_eq!(tile_for_cell(start(), GridCell::new(0, i64::MIN)), None);
        assert_eq!(tile_for_cell(start(), GridCell::new(i64::MAX, 0)), None);
    }

    fn live_at_distances(distances: &[i64]) -> Vec<(TileCoord, GridCell)> {
        distances
            .iter()
            .enumerate()
            .map(|(i, d)| {
                // Alternate directions; the off axis stays within the distance
                let cell = if i % 2 == 0 {
                    GridCell::new(*d, -(*d).min(1))
                } else {
                    GridCell::new((*d).min(1), -*d)
                };
                (TileCoord::new(i as u32, 0, 10), cell)
            })
            .collect()
    }

    #[test]
    fn test_evicts_farthest_first() {
        let live = live_at_distances(&[0, 1, 1, 2, 3]);
        let center = GridCell::new(0, 0);
        let distances: Vec<u64> = live.iter().map(|(_, c)| c.chebyshev(center)).collect();
        assert_eq!(distances, vec![0, 1, 1, 2, 3]);

        let evicted = select_evictions(live, center, &HashSet::new(), 3);

        // Distance 3 is tile 4, distance 2 is tile 3
        assert_eq!(evicted, vec![TileCoord::new(4, 0, 10), TileCoord::new(3, 0, 10)]);
    }

    #[test]
    fn test_nothing_evicted_within_budget() {
        let live = live_at_distances(&[0, 1, 1, 2, 3]);
        assert!(select_evictions(live.clone(), GridCell::new(0, 0), &HashSet::new(), 5).is_empty());
        assert!(select_evictions(live, GridCell::new(0, 0), &HashSet::new(), 9).is_empty());
    }

    #[test]
    fn test_required_tiles_are_never_evicted() {
        let live = live_at_distances(&[0, 1, 1, 2, 3]);
        let required: HashSet<_> = [TileCoord::new(4, 0, 10)].into_iter().collect();

        let evicted = select_evictions(live, GridCell::new(0, 0), &required, 3);

        assert_eq!(evicted.len(), 2);
        assert!(!evicted.contains(&TileCoord::new(4, 0, 10)));
        assert_eq!(evicted[0], TileCoord::new(3, 0, 10));
        // The second pick is one of the two distance-1 chunks
        assert!(evicted[1] == TileCoord::new(1, 0, 10) || evicted[1] == TileCoord::new(2, 0, 10));
    }

    #[test]
    fn test_eviction_stops_when_only_required_remain() {
        let live = live_at_distances(&[0, 1, 1]);
        let required: HashSet<_> = live.iter().map(|(t, _)| *t).collect();

        assert!(select_evictions(live, GridCell::new(0, 0), &required, 1).is_empty());
    }
}

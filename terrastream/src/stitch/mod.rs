//! Border stitching between neighbouring chunks.
//!
//! Adjacent tiles are decoded independently, so their shared edges rarely
//! agree. Every generated chunk owns its northern and eastern border: once
//! the neighbour on that side is generated too, the chunk overwrites its
//! last row (or column) with the neighbour's first one. The neighbour is
//! never modified, and each border is fixed at most once.
//!
//! ```text
//!          (x, y-1)
//!        ┌──────────┐
//!        │ row 0 ───┼──┐ copied into
//!        └──────────┘  │
//!        ┌──────────┐  ▼
//!        │ last row │ ┌──────────┐
//!        │  (x, y)  │ │ (x+1, y) │
//!        │ last col ◄─┤ col 0    │
//!        └──────────┘ └──────────┘
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

pub use crate::chunk::Direction;

use crate::chunk::Chunk;
use crate::coord::TileCoord;
use crate::surface::{Edge, TerrainSurface};

/// Tile whose first row/column this chunk's `direction` border copies.
///
/// `None` at the edge of the world.
pub fn neighbor_tile(tile: TileCoord, direction: Direction) -> Option<TileCoord> {
    match direction {
        Direction::X => tile.offset(0, -1),
        Direction::Y => tile.offset(1, 0),
    }
}

/// Surface edge a fix in `direction` rewrites.
pub fn edge_for(direction: Direction) -> Edge {
    match direction {
        Direction::X => Edge::North,
        Direction::Y => Edge::East,
    }
}

/// A fix found during the read-only scan.
struct PendingFix {
    tile: TileCoord,
    neighbor: TileCoord,
    direction: Direction,
    /// The neighbour's first row/column, `None` when it has no samples.
    samples: Option<Vec<f32>>,
}

/// Runs one stitching pass over every chunk.
///
/// Returns the number of borders fixed. Chunks missing from the map (not
/// spawned yet, or evicted) simply leave the border pending.
pub fn stitch_chunks<S>(chunks: &mut HashMap<TileCoord, Chunk>, surface: &mut S) -> usize
where
    S: TerrainSurface + ?Sized,
{
    let pending = find_fixes(chunks);
    let mut fixed = 0;
    for fix in pending {
        if apply_fix(chunks, surface, fix) {
            fixed += 1;
        }
    }
    if fixed > 0 {
        debug!(fixed, "Stitched chunk borders");
    }
    fixed
}

fn find_fixes(chunks: &HashMap<TileCoord, Chunk>) -> Vec<PendingFix> {
    let mut pending = Vec::new();

    for chunk in chunks.values() {
        let Some(border) = chunk.state().border() else {
            continue;
        };

        for direction in [Direction::X, Direction::Y] {
            if border.is_fixed(direction) {
                continue;
            }
            let Some(neighbor) = neighbor_tile(chunk.tile(), direction) else {
                continue;
            };
            let Some(other) = chunks.get(&neighbor).filter(|c| c.is_generated()) else {
                continue;
            };

            let samples = other.heights().and_then(|grid| match direction {
                Direction::X => grid.row(0).map(<[f32]>::to_vec),
                Direction::Y => grid.column(0),
            });
            pending.push(PendingFix {
                tile: chunk.tile(),
                neighbor,
                direction,
                samples,
            });
        }
    }

    pending
}

fn apply_fix<S>(chunks: &mut HashMap<TileCoord, Chunk>, surface: &mut S, fix: PendingFix) -> bool
where
    S: TerrainSurface + ?Sized,
{
    let Some(chunk) = chunks.get_mut(&fix.tile) else {
        return false;
    };
    if !chunk.mark_fixed(fix.direction) {
        return false;
    }

    let copied = match (chunk.heights_mut(), fix.samples.as_deref()) {
        (Some(grid), Some(samples)) if !grid.is_empty() && grid.resolution() == samples.len() => {
            let last = grid.resolution() - 1;
            match fix.direction {
                Direction::X => grid.set_row(last, samples),
                Direction::Y => grid.set_column(last, samples),
            }
        }
        _ => false,
    };
    if copied {
        if let Some(samples) = fix.samples.as_deref() {
            surface.apply_border(fix.tile, edge_for(fix.direction), samples);
        }
    } else {
        trace!(
            tile = %fix.tile,
            neighbor = %fix.neighbor,
            direction = ?fix.direction,
            "Border fixed without samples"
        );
    }

    let links = chunk.neighbors_mut();
    match fix.direction {
        Direction::X => links.top = Some(fix.neighbor),
        Direction::Y => links.right = Some(fix.neighbor),
    }
    surface.set_neighbors(fix.tile, *links);

    if let Some(other) = chunks.get_mut(&fix.neighbor) {
        let links = other.neighbors_mut();
        match fix.direction {
            Direction::X => links.bottom = Some(fix.tile),
            Direction::Y => links.left = Some(fix.tile),
        }
        surface.set_neighbors(fix.neighbor, *links);
    }

    true
}

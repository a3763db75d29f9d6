//! Rendering collaborator interface.
//!
//! The streamer owns data, not meshes. Whatever turns height grids into
//! renderable terrain implements [`TerrainSurface`] and is told about every
//! change: freshly generated heights, stitched borders, neighbour links for
//! level-of-detail seams, and chunks going away.

use std::sync::{Arc, Mutex};

use crate::coord::TileCoord;
use crate::heightmap::{ElevationRange, HeightGrid};
use crate::streaming::WorldPos;

/// Which border of a chunk's grid was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The last row, shared with the tile to the north.
    North,
    /// The last column, shared with the tile to the east.
    East,
}

/// Neighbour tiles a chunk has been stitched to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborLinks {
    pub left: Option<TileCoord>,
    pub top: Option<TileCoord>,
    pub right: Option<TileCoord>,
    pub bottom: Option<TileCoord>,
}

impl NeighborLinks {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Receives terrain updates from the streamer.
///
/// Calls happen on the tick thread, in tick order.
pub trait TerrainSurface {
    /// A chunk finished loading; `grid` is empty when no data could be had.
    fn apply_heights(
        &mut self,
        tile: TileCoord,
        anchor: WorldPos,
        grid: &HeightGrid,
        range: ElevationRange,
    );

    /// One border of a chunk was overwritten with its neighbour's samples.
    fn apply_border(&mut self, tile: TileCoord, edge: Edge, samples: &[f32]);

    /// A chunk's neighbour links changed.
    fn set_neighbors(&mut self, tile: TileCoord, links: NeighborLinks);

    /// A chunk was evicted or cleared.
    fn release(&mut self, tile: TileCoord);
}

/// Surface that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl TerrainSurface for NullSurface {
    fn apply_heights(&mut self, _: TileCoord, _: WorldPos, _: &HeightGrid, _: ElevationRange) {}

    fn apply_border(&mut self, _: TileCoord, _: Edge, _: &[f32]) {}

    fn set_neighbors(&mut self, _: TileCoord, _: NeighborLinks) {}

    fn release(&mut self, _: TileCoord) {}
}

/// A surface update, as recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Heights {
        tile: TileCoord,
        anchor: WorldPos,
        resolution: usize,
    },
    Border {
        tile: TileCoord,
        edge: Edge,
        samples: Vec<f32>,
    },
    Neighbors {
        tile: TileCoord,
        links: NeighborLinks,
    },
    Released(TileCoord),
}

/// Surface that records every update into a shared log.
///
/// Clones share the log, so a test can keep one handle while the streamer
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the updates recorded so far.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn push(&self, event: SurfaceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl TerrainSurface for RecordingSurface {
    fn apply_heights(
        &mut self,
        tile: TileCoord,
        anchor: WorldPos,
        grid: &HeightGrid,
        _: ElevationRange,
    ) {
        self.push(SurfaceEvent::Heights {
            tile,
            anchor,
            resolution: grid.resolution(),
        });
    }

    fn apply_border(&mut self, tile: TileCoord, edge: Edge, samples: &[f32]) {
        self.push(SurfaceEvent::Border {
            tile,
            edge,
            samples: samples.to_vec(),
        });
    }

    fn set_neighbors(&mut self, tile: TileCoord, links: NeighborLinks) {
        self.push(SurfaceEvent::Neighbors { tile, links });
    }

    fn release(&mut self, tile: TileCoord) {
        self.push(SurfaceEvent::Released(tile));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_shares_log_between_clones() {
        let recorder = RecordingSurface::new();
        let mut owned = recorder.clone();
        let tile = TileCoord::new(1, 1, 2);

        owned.apply_heights(
            tile,
            WorldPos::new(0.0, 0.0),
            &HeightGrid::filled(3, 0.0),
            ElevationRange::default(),
        );
        owned.apply_border(tile, Edge::North, &[1.0, 2.0]);
        owned.release(tile);

        assert_eq!(
            recorder.events(),
            vec![
                SurfaceEvent::Heights {
                    tile,
                    anchor: WorldPos::new(0.0, 0.0),
                    resolution: 3
                },
                SurfaceEvent::Border {
                    tile,
                    edge: Edge::North,
                    samples: vec![1.0, 2.0]
                },
                SurfaceEvent::Released(tile),
            ]
        );
    }

    #[test]
    fn test_neighbor_links_default_is_empty() {
        let mut links = NeighborLinks::default();
        assert!(links.is_empty());
        links.top = Some(TileCoord::new(0, 0, 1));
        assert!(!links.is_empty());
    }
}

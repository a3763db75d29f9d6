//! Per-tile terrain chunk.
//!
//! A [`Chunk`] is created when its tile enters the required window and owns
//! everything about that tile: its background jobs, the data they deliver and
//! its lifecycle state. Dropping a chunk drops its jobs, which cancels them.

mod state;

pub use state::{BorderState, ChunkState, Direction};

use tracing::trace;

use crate::coord::TileCoord;
use crate::heightmap::HeightGrid;
use crate::osm::OsmDataset;
use crate::pipeline::LoadJob;
use crate::streaming::{GridCell, WorldPos};
use crate::surface::NeighborLinks;

/// Terrain for one tile.
#[derive(Debug)]
pub struct Chunk {
    tile: TileCoord,
    cell: GridCell,
    anchor: WorldPos,
    state: ChunkState,
    heights: Option<HeightGrid>,
    osm: Option<OsmDataset>,
    elevation_job: Option<LoadJob<HeightGrid>>,
    osm_job: Option<LoadJob<OsmDataset>>,
    neighbors: NeighborLinks,
}

impl Chunk {
    /// Creates a loading chunk waiting on the given jobs.
    ///
    /// A chunk without jobs becomes loaded on its first poll.
    pub(crate) fn new(
        tile: TileCoord,
        cell: GridCell,
        anchor: WorldPos,
        elevation_job: Option<LoadJob<HeightGrid>>,
        osm_job: Option<LoadJob<OsmDataset>>,
    ) -> Self {
        Self {
            tile,
            cell,
            anchor,
            state: ChunkState::Loading,
            heights: None,
            osm: None,
            elevation_job,
            osm_job,
            neighbors: NeighborLinks::default(),
        }
    }

    pub fn tile(&self) -> TileCoord {
        self.tile
    }

    /// Cell of the chunk grid this chunk occupies.
    pub fn cell(&self) -> GridCell {
        self.cell
    }

    /// World position of the chunk's south-west corner.
    pub fn anchor(&self) -> WorldPos {
        self.anchor
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    pub fn is_generated(&self) -> bool {
        self.state.is_generated()
    }

    /// Height samples, once the elevation job delivered.
    ///
    /// `Some` with an empty grid means the load failed.
    pub fn heights(&self) -> Option<&HeightGrid> {
        self.heights.as_ref()
    }

    pub fn osm(&self) -> Option<&OsmDataset> {
        self.osm.as_ref()
    }

    pub fn neighbors(&self) -> NeighborLinks {
        self.neighbors
    }

    /// Number of jobs that have not delivered yet.
    pub fn pending_jobs(&self) -> usize {
        self.elevation_job.is_some() as usize + self.osm_job.is_some() as usize
    }

    /// Collects finished job outputs.
    ///
    /// Returns `true` when this call moved the chunk from loading to loaded.
    pub(crate) fn poll_jobs(&mut self) -> bool {
        if self.state != ChunkState::Loading {
            return false;
        }

        if let Some(grid) = self.elevation_job.as_mut().and_then(LoadJob::poll) {
            trace!(tile = %self.tile, resolution = grid.resolution(), "Heights delivered");
            self.heights = Some(grid);
            self.elevation_job = None;
        }
        if let Some(dataset) = self.osm_job.as_mut().and_then(LoadJob::poll) {
            trace!(
                tile = %self.tile,
                nodes = dataset.nodes.len(),
                ways = dataset.ways.len(),
                "OSM data delivered"
            );
            self.osm = Some(dataset);
            self.osm_job = None;
        }

        if self.pending_jobs() > 0 {
            return false;
        }
        self.state = ChunkState::Loaded;
        true
    }

    /// Moves a loaded chunk to generated with both borders unfixed.
    ///
    /// Returns `false` (and changes nothing) unless the chunk is loaded and
    /// not yet generated.
    pub(crate) fn generate(&mut self) -> bool {
        if self.state != ChunkState::Loaded {
            return false;
        }
        self.state = ChunkState::Generated(BorderState::UnfixedBoth);
        true
    }

    /// Records that `direction` has been stitched.
    ///
    /// Returns `false` when the chunk is not generated or the border was
    /// already fixed.
    pub(crate) fn mark_fixed(&mut self, direction: Direction) -> bool {
        let ChunkState::Generated(border) = self.state else {
            return false;
        };
        match border.fix(direction) {
            Some(next) => {
                self.state = ChunkState::Generated(next);
                true
            }
            None => false,
        }
    }

    pub(crate) fn heights_mut(&mut self) -> Option<&mut HeightGrid> {
        self.heights.as_mut()
    }

    pub(crate) fn neighbors_mut(&mut self) -> &mut NeighborLinks {
        &mut self.neighbors
    }
}

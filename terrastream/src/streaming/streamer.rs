//! The chunk streamer.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, trace, warn};

use super::types::{GridCell, WorldPos};
use super::window::{select_evictions, tile_for_cell, window_cells};
use super::StreamError;
use crate::chunk::Chunk;
use crate::config::{ConfigError, StreamingConfig};
use crate::coord::TileCoord;
use crate::pipeline::{HeightmapParser, OsmParser, Pipeline};
use crate::stitch::stitch_chunks;
use crate::surface::TerrainSurface;

/// Counters over the streamer's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Ticks processed.
    pub ticks: u64,
    /// Chunks created.
    pub spawned: u64,
    /// Chunks removed by eviction (not by `clear`).
    pub evicted: u64,
    /// Chunks that reached the generated state.
    pub generated: u64,
    /// Borders fixed by the stitcher.
    pub stitched: u64,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The viewpoint entered a new cell (or this was the first tick).
    pub moved: bool,
    pub spawned: usize,
    pub evicted: usize,
    pub generated: usize,
    pub stitched: usize,
}

/// Keeps the chunks around a moving viewpoint loaded.
///
/// Owns every live chunk in a map keyed by tile; a tile has at most one
/// chunk. Each [`tick`](Self::tick) spawns chunks entering the window,
/// collects finished loads, stitches borders and evicts the farthest
/// chunks beyond the retention budget. Ticks never block.
pub struct ChunkStreamer<S: TerrainSurface> {
    config: StreamingConfig,
    start_tile: TileCoord,
    elevation: Option<Pipeline<HeightmapParser>>,
    osm: Option<Pipeline<OsmParser>>,
    surface: S,
    chunks: HashMap<TileCoord, Chunk>,
    required: Vec<TileCoord>,
    last_cell: Option<GridCell>,
    stats: StreamStats,
}

impl<S: TerrainSurface> ChunkStreamer<S> {
    /// Creates a streamer.
    ///
    /// The start tile is derived from the configuration once, here. A
    /// pipeline must be supplied for every enabled generation switch;
    /// pipelines for disabled switches are never used.
    pub fn new(
        config: StreamingConfig,
        elevation: Option<Pipeline<HeightmapParser>>,
        osm: Option<Pipeline<OsmParser>>,
        surface: S,
    ) -> Result<Self, StreamError> {
        config.validate()?;
        let start_tile = config.start_tile().map_err(ConfigError::from)?;

        if config.generate_terrain() && elevation.is_none() {
            return Err(StreamError::MissingPipeline("elevation"));
        }
        if config.generate_osm() && osm.is_none() {
            return Err(StreamError::MissingPipeline("osm"));
        }

        info!(
            start_tile = %start_tile,
            cell_size = config.cell_size(),
            adjacent_layers = config.adjacent_layers(),
            budget = config.retention_budget(),
            terrain = config.generate_terrain(),
            osm = config.generate_osm(),
            "Chunk streamer created"
        );

        Ok(Self {
            config,
            start_tile,
            elevation: elevation.filter(|_| config.generate_terrain()),
            osm: osm.filter(|_| config.generate_osm()),
            surface,
            chunks: HashMap::new(),
            required: Vec::new(),
            last_cell: None,
            stats: StreamStats::default(),
        })
    }

    /// Advances the streamer by one frame.
    pub fn tick(&mut self, viewpoint: WorldPos) -> TickSummary {
        self.stats.ticks += 1;
        let mut summary = TickSummary::default();

        let cell = GridCell::containing(viewpoint, self.config.cell_size());
        if self.last_cell != Some(cell) {
            trace!(cell = %cell, "Viewpoint entered new cell");
            self.last_cell = Some(cell);
            summary.moved = true;
            summary.spawned = self.refresh_window(cell);
            summary.evicted = self.evict(cell);
        }

        summary.generated = self.poll_chunks();

        summary.stitched = stitch_chunks(&mut self.chunks, &mut self.surface);
        self.stats.stitched += summary.stitched as u64;

        summary
    }

    /// Recomputes the required window around `center` and spawns missing
    /// chunks. Returns the number spawned.
    fn refresh_window(&mut self, center: GridCell) -> usize {
        self.required.clear();
        let mut spawned = 0;

        for cell in window_cells(center, self.config.adjacent_layers()) {
            let Some(tile) = tile_for_cell(self.start_tile, cell) else {
                trace!(cell = %cell, "Cell outside the world, skipping");
                continue;
            };
            self.required.push(tile);

            if self.chunks.contains_key(&tile) {
                continue;
            }
            let chunk = self.spawn(tile, cell);
            self.chunks.insert(tile, chunk);
            spawned += 1;
        }

        if spawned > 0 {
            debug!(center = %center, spawned, live = self.chunks.len(), "Spawned chunks");
        }
        self.stats.spawned += spawned as u64;
        spawned
    }

    fn spawn(&self, tile: TileCoord, cell: GridCell) -> Chunk {
        let elevation_job = self.elevation.as_ref().map(|p| p.start(tile));
        let osm_job = self.osm.as_ref().map(|p| p.start(tile));
        Chunk::new(tile, cell, cell.anchor(self.config.cell_size()), elevation_job, osm_job)
    }

    /// Drops the farthest non-required chunks until the budget is met.
    fn evict(&mut self, center: GridCell) -> usize {
        let required: HashSet<TileCoord> = self.required.iter().copied().collect();
        let victims = select_evictions(
            self.chunks.values().map(|c| (c.tile(), c.cell())),
            center,
            &required,
            self.config.retention_budget(),
        );

        for tile in &victims {
            if let Some(chunk) = self.chunks.remove(tile) {
                trace!(tile = %tile, state = %chunk.state(), "Evicting chunk");
                self.surface.release(*tile);
            }
        }

        if !victims.is_empty() {
            debug!(evicted = victims.len(), live = self.chunks.len(), "Evicted chunks");
        }
        self.stats.evicted += victims.len() as u64;
        victims.len()
    }

    /// Collects job results and generates chunks that finished loading.
    fn poll_chunks(&mut self) -> usize {
        let range = self.config.elevation_range();
        let mut generated = 0;

        for chunk in self.chunks.values_mut() {
            chunk.poll_jobs();
            if !chunk.generate() {
                continue;
            }
            generated += 1;

            match chunk.heights() {
                Some(grid) => {
                    if grid.is_empty() {
                        warn!(tile = %chunk.tile(), "Chunk generated without elevation data");
                    }
                    self.surface.apply_heights(chunk.tile(), chunk.anchor(), grid, range);
                }
                None => trace!(tile = %chunk.tile(), "Chunk generated without terrain"),
            }
        }

        self.stats.generated += generated as u64;
        generated
    }

    /// Live chunk for `tile`, if any.
    pub fn lookup(&self, tile: &TileCoord) -> Option<&Chunk> {
        self.chunks.get(tile)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All live chunks, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Tiles of the window computed on the last cell change.
    pub fn required_tiles(&self) -> &[TileCoord] {
        &self.required
    }

    /// Drops every chunk, cancelling their jobs.
    ///
    /// The next tick recomputes the window as if it were the first.
    pub fn clear(&mut self) {
        let count = self.chunks.len();
        for (tile, _) in self.chunks.drain() {
            self.surface.release(tile);
        }
        self.required.clear();
        self.last_cell = None;
        info!(cleared = count, "Cleared all chunks");
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Tile shown in cell `(0, 0)`.
    pub fn start_tile(&self) -> TileCoord {
        self.start_tile
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

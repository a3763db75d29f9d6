//! Chunk streaming around a moving viewpoint.
//!
//! The world plane is cut into square cells of `cell_size` units. Cell
//! `(0, 0)` shows the tile containing the configured start location; the
//! cell `(gx, gz)` shows the tile `gx` columns east and `gz` rows north of
//! it. Whenever the viewpoint enters a new cell, every cell within
//! `adjacent_layers` (Chebyshev) becomes required:
//!
//! ```text
//!   adjacent_layers = 1            z ▲
//!   ┌────┬────┬────┐                 │
//!   │    │    │    │  required       │
//!   ├────┼────┼────┤  window         └──► x
//!   │    │ VP │    │  (3x3)
//!   ├────┼────┼────┤
//!   │    │    │    │
//!   └────┴────┴────┘
//! ```
//!
//! Missing chunks are spawned; once more than `window + max_residual`
//! chunks are alive, the farthest ones outside the window are evicted.

mod streamer;
mod types;
mod window;

pub use streamer::{ChunkStreamer, StreamStats, TickSummary};
pub use types::{GridCell, WorldPos};
pub use window::{select_evictions, tile_for_cell, window_cells};

use thiserror::Error;

use crate::config::ConfigError;

/// Errors creating a [`ChunkStreamer`].
#[derive(Debug, Error)]
pub enum StreamError {
    /// The configuration failed validation
    #[error("invalid streaming configuration: {0}")]
    Config(#[from] ConfigError),

    /// A generation switch is on but no pipeline was supplied for it
    #[error("{0} generation is enabled but no {0} pipeline was supplied")]
    MissingPipeline(&'static str),
}

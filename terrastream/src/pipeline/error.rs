//! Error types for the load/parse pipeline.
//!
//! These never cross the async boundary: the runner logs them and delivers
//! the parser's empty output instead.

use thiserror::Error;

use super::source::SourceError;
use crate::heightmap::HeightmapError;
use crate::osm::OsmParseError;

/// Errors that can occur while loading a single tile.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetching the bytes failed
    #[error("fetch failed: {0}")]
    Source(#[from] SourceError),

    /// The elevation raster could not be decoded
    #[error("heightmap decode failed: {0}")]
    Heightmap(#[from] HeightmapError),

    /// The OSM document could not be parsed
    #[error("OSM parse failed: {0}")]
    Osm(#[from] OsmParseError),

    /// The blocking parse task panicked or was aborted
    #[error("parse task failed: {0}")]
    Task(String),
}

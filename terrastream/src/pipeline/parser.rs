//! Parsers turning fetched bytes into typed tile data.

use super::PipelineError;
use crate::coord::{tile_bounds, TileCoord};
use crate::heightmap::{decode_heightmap, HeightGrid};
use crate::osm::{parse_osm, OsmDataset};

/// Converts raw tile bytes into typed data.
///
/// `parse` runs on the blocking pool. `Output::default()` is the empty result
/// a job delivers when fetching or parsing fails.
pub trait TileParser: Send + Sync + 'static {
    type Output: Default + Send + 'static;

    /// Name for logging.
    fn name(&self) -> &'static str;

    fn parse(&self, tile: TileCoord, bytes: &[u8]) -> Result<Self::Output, PipelineError>;
}

/// Decodes elevation rasters into height grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightmapParser;

impl TileParser for HeightmapParser {
    type Output = HeightGrid;

    fn name(&self) -> &'static str {
        "heightmap"
    }

    fn parse(&self, _tile: TileCoord, bytes: &[u8]) -> Result<HeightGrid, PipelineError> {
        Ok(decode_heightmap(bytes)?)
    }
}

/// Parses OSM XML documents into normalized datasets.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsmParser;

impl TileParser for OsmParser {
    type Output = OsmDataset;

    fn name(&self) -> &'static str {
        "osm"
    }

    fn parse(&self, tile: TileCoord, bytes: &[u8]) -> Result<OsmDataset, PipelineError> {
        Ok(parse_osm(bytes, tile_bounds(&tile))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heightmap_parser_rejects_garbage() {
        let err = HeightmapParser
            .parse(TileCoord::new(0, 0, 1), b"garbage")
            .unwrap_err();
        assert!(matches!(err, PipelineError::Heightmap(_)));
    }

    #[test]
    fn test_osm_parser_uses_tile_bounds_as_fallback() {
        let tile = TileCoord::new(8580, 5738, 14);
        let dataset = OsmParser.parse(tile, b"<osm></osm>").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.bounds(), Some(tile_bounds(&tile)));
    }

    #[test]
    fn test_parser_names() {
        assert_eq!(HeightmapParser.name(), "heightmap");
        assert_eq!(OsmParser.name(), "osm");
    }
}

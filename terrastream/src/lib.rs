//! terrastream - streaming slippy-tile terrain chunks around a viewpoint
//!
//! This library keeps a window of terrain chunks loaded around a moving
//! viewpoint. Each chunk corresponds to one slippy tile; its elevation
//! raster (and optionally its OpenStreetMap features) is fetched and parsed
//! in the background, handed to a rendering surface, and stitched to its
//! neighbours so shared borders match.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use terrastream::config::{SourceConfig, StreamingConfig};
//! use terrastream::pipeline::{AsyncReqwestClient, HeightmapParser, HttpTileSource, Pipeline};
//! use terrastream::streaming::{ChunkStreamer, WorldPos};
//! use terrastream::surface::NullSurface;
//!
//! let sources = SourceConfig::default();
//! let client = AsyncReqwestClient::new()?;
//! let source = HttpTileSource::new("terrarium", sources.elevation_url().clone(), client);
//! let elevation = Pipeline::new(Arc::new(source), HeightmapParser, runtime.handle().clone());
//!
//! let config = StreamingConfig::new().with_start(46.5, 7.25).with_zoom(12);
//! let mut streamer = ChunkStreamer::new(config, Some(elevation), None, NullSurface)?;
//!
//! // Once per frame
//! streamer.tick(WorldPos::new(camera.x, camera.z));
//! ```

pub mod chunk;
pub mod config;
pub mod coord;
pub mod heightmap;
pub mod logging;
pub mod osm;
pub mod pipeline;
pub mod stitch;
pub mod streaming;
pub mod surface;

/// Version of the terrastream library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

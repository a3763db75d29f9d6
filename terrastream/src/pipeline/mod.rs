//! Async tile load/parse pipeline.
//!
//! Each chunk needs one or two pieces of remote data: an elevation raster and
//! optionally the OSM features inside its tile. A [`Pipeline`] pairs a
//! [`TileSource`] (where the bytes come from) with a [`TileParser`] (what
//! they become) and runs both off the tick thread.
//!
//! # Architecture
//!
//! ```text
//! Pipeline::start(tile) → spawn on runtime → fetch → spawn_blocking(parse) → oneshot
//!                                                                               ↓
//!                                                  tick loop: LoadJob::poll() ──┘
//! ```
//!
//! The tick loop never waits. A job yields its output once; failures arrive
//! as the empty output and are logged where they happen. Dropping a
//! [`LoadJob`] cancels the work.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use terrastream::pipeline::{HeightmapParser, MemoryTileSource, Pipeline};
//!
//! let pipeline = Pipeline::new(Arc::new(MemoryTileSource::new()), HeightmapParser, handle);
//! let mut job = pipeline.start(tile);
//!
//! // On a later tick
//! if let Some(grid) = job.poll() {
//!     // ...
//! }
//! ```

mod error;
pub mod http;
mod job;
mod parser;
mod runner;
mod source;

pub use error::PipelineError;
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use job::{JobStatus, LoadJob};
pub use parser::{HeightmapParser, OsmParser, TileParser};
pub use runner::Pipeline;
pub use source::{
    FetchFuture, HttpTileSource, MemoryTileSource, SourceError, TileSource, UrlTemplate,
};

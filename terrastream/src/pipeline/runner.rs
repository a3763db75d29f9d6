//! Pipeline runner spawning fetch+parse work for tiles.
//!
//! This is the bridge between the synchronous tick loop and the async
//! runtime: [`Pipeline::start`] spawns a task on the Tokio runtime and hands
//! back a [`LoadJob`] the caller polls on later ticks.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace, warn};

use super::job::LoadJob;
use super::parser::TileParser;
use super::source::TileSource;
use super::PipelineError;
use crate::coord::TileCoord;

/// Fetches tiles from one source and parses them with one parser.
pub struct Pipeline<P: TileParser> {
    source: Arc<dyn TileSource>,
    parser: Arc<P>,
    runtime: Handle,
}

impl<P: TileParser> Pipeline<P> {
    /// Creates a pipeline spawning its work on `runtime`.
    pub fn new(source: Arc<dyn TileSource>, parser: P, runtime: Handle) -> Self {
        Self {
            source,
            parser: Arc::new(parser),
            runtime,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    /// Starts loading `tile` in the background.
    ///
    /// Never blocks. Failures are logged and surface as the parser's empty
    /// output; dropping the returned job cancels the work.
    pub fn start(&self, tile: TileCoord) -> LoadJob<P::Output> {
        let (tx, rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let source = Arc::clone(&self.source);
        let parser = Arc::clone(&self.parser);

        self.runtime.spawn(async move {
            let output = tokio::select! {
                _ = token.cancelled() => {
                    trace!(tile = %tile, "Load cancelled");
                    return;
                }
                output = fetch_and_parse(source.as_ref(), parser, tile) => output,
            };

            // Receiver gone means the chunk was evicted meanwhile
            if tx.send(output).is_err() {
                trace!(tile = %tile, "Load finished after its job was dropped");
            }
        });

        LoadJob::new(tile, rx, cancel)
    }
}

impl<P: TileParser> Clone for Pipeline<P> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            parser: Arc::clone(&self.parser),
            runtime: self.runtime.clone(),
        }
    }
}

/// Runs one load to completion, degrading any failure to the empty output.
#[instrument(skip_all, fields(tile = %tile, source = source.name(), parser = parser.name()))]
async fn fetch_and_parse<P: TileParser>(
    source: &dyn TileSource,
    parser: Arc<P>,
    tile: TileCoord,
) -> P::Output {
    match load(source, parser, tile).await {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "Tile load failed, using empty result");
            P::Output::default()
        }
    }
}

async fn load<P: TileParser>(
    source: &dyn TileSource,
    parser: Arc<P>,
    tile: TileCoord,
) -> Result<P::Output, PipelineError> {
    let bytes = source.fetch(tile).await?;
    if bytes.is_empty() {
        debug!("Source returned no bytes");
        return Ok(P::Output::default());
    }

    // Decoding is CPU bound
    let output = tokio::task::spawn_blocking(move || parser.parse(tile, &bytes))
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))??;

    debug!("Tile loaded");
    Ok(output)
}

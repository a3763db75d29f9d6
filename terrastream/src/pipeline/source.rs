//! Remote and in-memory tile byte sources.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use super::http::AsyncHttpClient;
use crate::coord::{tile_bounds, TileCoord};

/// Errors a tile source can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source has no data for this tile
    #[error("No data for tile {0}")]
    NotFound(TileCoord),
}

/// Boxed future returned by [`TileSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, SourceError>> + Send + 'a>>;

/// Something that can deliver the raw bytes for a tile.
///
/// Object safe so the streamer can hold `Arc<dyn TileSource>` for both the
/// elevation and the OSM pipeline.
pub trait TileSource: Send + Sync {
    /// Fetches the encoded bytes for `tile`.
    fn fetch(&self, tile: TileCoord) -> FetchFuture<'_>;

    /// Name for logging.
    fn name(&self) -> &str;
}

/// URL pattern with tile placeholders.
///
/// Supported placeholders: `{z}`, `{x}`, `{y}` and the tile bounds
/// `{min_lat}`, `{min_lon}`, `{max_lat}`, `{max_lon}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes the placeholders for `tile`.
    pub fn expand(&self, tile: &TileCoord) -> String {
        let mut url = self
            .0
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string());

        if url.contains("_lat}") || url.contains("_lon}") {
            let bounds = tile_bounds(tile);
            url = url
                .replace("{min_lat}", &bounds.min_lat.to_string())
                .replace("{min_lon}", &bounds.min_lon.to_string())
                .replace("{max_lat}", &bounds.max_lat.to_string())
                .replace("{max_lon}", &bounds.max_lon.to_string());
        }
        url
    }
}

/// Fetches tiles over HTTP from a URL template.
pub struct HttpTileSource<C: AsyncHttpClient> {
    name: String,
    template: UrlTemplate,
    client: C,
}

impl<C: AsyncHttpClient> HttpTileSource<C> {
    pub fn new(name: impl Into<String>, template: UrlTemplate, client: C) -> Self {
        Self {
            name: name.into(),
            template,
            client,
        }
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }
}

impl<C: AsyncHttpClient> TileSource for HttpTileSource<C> {
    fn fetch(&self, tile: TileCoord) -> FetchFuture<'_> {
        let url = self.template.expand(&tile);
        Box::pin(async move { self.client.get(&url).await })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Serves tiles from memory.
///
/// Used for offline runs and tests. Tiles without an entry get the fallback
/// bytes, or [`SourceError::NotFound`] when there is none.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileSource {
    tiles: HashMap<TileCoord, Vec<u8>>,
    fallback: Option<Vec<u8>>,
    latency: Option<Duration>,
}

impl MemoryTileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tile(mut self, tile: TileCoord, bytes: Vec<u8>) -> Self {
        self.tiles.insert(tile, bytes);
        self
    }

    pub fn with_fallback(mut self, bytes: Vec<u8>) -> Self {
        self.fallback = Some(bytes);
        self
    }

    /// Delays every fetch, to mimic a slow network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl TileSource for MemoryTileSource {
    fn fetch(&self, tile: TileCoord) -> FetchFuture<'_> {
        Box::pin(async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.tiles
                .get(&tile)
                .or(self.fallback.as_ref())
                .cloned()
                .ok_or(SourceError::NotFound(tile))
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::http::tests::MockAsyncHttpClient;

    #[test]
    fn test_expand_xyz() {
        let template = UrlTemplate::new("https://tiles.example/{z}/{x}/{y}.png");
        assert_eq!(
            template.expand(&TileCoord::new(8580, 5738, 14)),
            "https://tiles.example/14/8580/5738.png"
        );
    }

    #[test]
    fn test_expand_bbox() {
        let template = UrlTemplate::new("map?bbox={min_lon},{min_lat},{max_lon},{max_lat}");
        let tile = TileCoord::new(0, 0, 0);
        let url = template.expand(&tile);
        let bounds = tile_bounds(&tile);
        assert_eq!(
            url,
            format!(
                "map?bbox=-180,{},180,{}",
                bounds.min_lat, bounds.max_lat
            )
        );
    }

    #[tokio::test]
    async fn test_http_source_requests_expanded_url() {
        let client = MockAsyncHttpClient::new(Ok(vec![9, 9]));
        let requested = client.requested.clone();
        let source = HttpTileSource::new(
            "test",
            UrlTemplate::new("http://h/{z}/{x}/{y}"),
            client,
        );

        let bytes = source.fetch(TileCoord::new(1, 2, 3)).await.unwrap();

        assert_eq!(bytes, vec![9, 9]);
        assert_eq!(requested.lock().unwrap().as_slice(), ["http://h/3/1/2"]);
        assert_eq!(source.name(), "test");
    }

    #[tokio::test]
    async fn test_memory_source_lookup_and_fallback() {
        let known = TileCoord::new(1, 1, 2);
        let source = MemoryTileSource::new().with_tile(known, vec![1]);
        assert_eq!(source.fetch(known).await, Ok(vec![1]));
        assert_eq!(
            source.fetch(TileCoord::new(0, 0, 2)).await,
            Err(SourceError::NotFound(TileCoord::new(0, 0, 2)))
        );

        let source = source.with_fallback(vec![7]);
        assert_eq!(source.fetch(TileCoord::new(0, 0, 2)).await, Ok(vec![7]));
    }
}

//! Remote tile source configuration.

use super::defaults::{DEFAULT_ELEVATION_URL, DEFAULT_OSM_URL, DEFAULT_SOURCE_TIMEOUT_SECS};
use crate::pipeline::UrlTemplate;

/// Where elevation and OSM data are fetched from.
///
/// # Example
///
/// ```
/// use terrastream::config::SourceConfig;
///
/// let config = SourceConfig::new().with_timeout_secs(10);
/// assert!(config.elevation_url().as_str().contains("{z}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    elevation_url: UrlTemplate,
    osm_url: UrlTemplate,
    timeout_secs: u64,
}

impl SourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elevation_url(mut self, template: impl Into<String>) -> Self {
        self.elevation_url = UrlTemplate::new(template);
        self
    }

    pub fn with_osm_url(mut self, template: impl Into<String>) -> Self {
        self.osm_url = UrlTemplate::new(template);
        self
    }

    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn elevation_url(&self) -> &UrlTemplate {
        &self.elevation_url
    }

    pub fn osm_url(&self) -> &UrlTemplate {
        &self.osm_url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            elevation_url: UrlTemplate::new(DEFAULT_ELEVATION_URL),
            osm_url: UrlTemplate::new(DEFAULT_OSM_URL),
            timeout_secs: DEFAULT_SOURCE_TIMEOUT_SECS,
        }
    }
}

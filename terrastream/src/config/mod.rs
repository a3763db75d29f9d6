//! Configuration types for terrastream.
//!
//! [`StreamingConfig`] drives the chunk streamer, [`SourceConfig`] says
//! where tiles come from, and [`ConfigFile`] loads both from
//! `~/.terrastream/config.ini`.
//!
//! # Example
//!
//! ```
//! use terrastream::config::{SourceConfig, StreamingConfig};
//!
//! let streaming = StreamingConfig::new()
//!     .with_start(40.7128, -74.0060)
//!     .with_zoom(14)
//!     .with_generate_osm(true);
//! let sources = SourceConfig::default();
//! ```

pub mod defaults;
mod file;
mod parser;
mod source;
mod streaming;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFile, ConfigFileError, LoggingSettings};
pub use source::SourceConfig;
pub use streaming::{ConfigError, StreamingConfig};

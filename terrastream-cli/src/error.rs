//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use terrastream::config::ConfigFileError;
use terrastream::heightmap::HeightmapError;
use terrastream::pipeline::SourceError;
use terrastream::streaming::StreamError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to create the HTTP client
    Http(SourceError),
    /// Failed to build synthetic offline terrain
    OfflineTerrain(HeightmapError),
    /// Failed to create the chunk streamer
    Stream(StreamError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Check the file passed with --config (default ~/.terrastream/config.ini)."
                );
            }
            CliError::Stream(StreamError::Config(_)) => {
                eprintln!();
                eprintln!("Valid ranges:");
                eprintln!("  latitude  -85.05112878 .. 85.05112878");
                eprintln!("  longitude -180 .. 180");
                eprintln!("  zoom      0 .. 18");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Http(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::OfflineTerrain(e) => write!(f, "Failed to build offline terrain: {}", e),
            CliError::Stream(e) => write!(f, "Failed to create chunk streamer: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) | CliError::Runtime(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::OfflineTerrain(e) => Some(e),
            CliError::Stream(e) => Some(e),
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<StreamError> for CliError {
    fn from(e: StreamError) -> Self {
        CliError::Stream(e)
    }
}

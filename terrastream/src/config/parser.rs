//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;

use super::file::{ConfigFile, ConfigFileError};
use crate::heightmap::ElevationRange;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [chunks] section
    if let Some(section) = ini.section(Some("chunks")) {
        let mut streaming = config.streaming;
        if let Some(v) = section.get("size") {
            streaming = streaming.with_cell_size(parse_value(
                "chunks",
                "size",
                v,
                "expected a positive number of world units",
            )?);
        }
        if let Some(v) = section.get("adjacent_layers") {
            streaming = streaming.with_adjacent_layers(parse_value(
                "chunks",
                "adjacent_layers",
                v,
                "expected a non-negative integer",
            )?);
        }
        if let Some(v) = section.get("max_residual") {
            streaming = streaming.with_max_residual_chunks(parse_value(
                "chunks",
                "max_residual",
                v,
                "expected a non-negative integer",
            )?);
        }
        config.streaming = streaming;
    }

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        let mut lat = config.streaming.start_lat();
        let mut lon = config.streaming.start_lon();
        if let Some(v) = section.get("lat") {
            lat = parse_value("location", "lat", v, "expected latitude in degrees")?;
        }
        if let Some(v) = section.get("lon") {
            lon = parse_value("location", "lon", v, "expected longitude in degrees")?;
        }
        config.streaming = config.streaming.with_start(lat, lon);
        if let Some(v) = section.get("zoom") {
            config.streaming = config.streaming.with_zoom(parse_value(
                "location",
                "zoom",
                v,
                "expected zoom level 0-18",
            )?);
        }
    }

    // [generation] section
    if let Some(section) = ini.section(Some("generation")) {
        if let Some(v) = section.get("terrain") {
            config.streaming = config.streaming.with_generate_terrain(parse_bool(v));
        }
        if let Some(v) = section.get("osm") {
            config.streaming = config.streaming.with_generate_osm(parse_bool(v));
        }
        let mut range = config.streaming.elevation_range();
        if let Some(v) = section.get("depth") {
            range.depth = parse_value("generation", "depth", v, "expected metres")?;
        }
        if let Some(v) = section.get("height") {
            range.height = parse_value("generation", "height", v, "expected metres")?;
        }
        config.streaming = config
            .streaming
            .with_elevation_range(ElevationRange::new(range.depth, range.height));
    }

    // [sources] section
    if let Some(section) = ini.section(Some("sources")) {
        if let Some(v) = non_empty(section.get("elevation_url")) {
            config.sources = config.sources.with_elevation_url(v);
        }
        if let Some(v) = non_empty(section.get("osm_url")) {
            config.sources = config.sources.with_osm_url(v);
        }
        if let Some(v) = section.get("timeout") {
            config.sources = config.sources.with_timeout_secs(parse_value(
                "sources",
                "timeout",
                v,
                "expected seconds",
            )?);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("directory")) {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

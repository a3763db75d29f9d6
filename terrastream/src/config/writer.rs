//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::file::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let streaming = &config.streaming;
    let range = streaming.elevation_range();

    format!(
        r#"[chunks]
; Side length of one chunk in world units
size = {}
; Rings of chunks kept around the viewpoint: 1 = 3x3 window, 2 = 5x5, ...
adjacent_layers = {}
; Chunks kept beyond the window before the farthest are evicted
max_residual = {}

[location]
; Geographic location of world origin
lat = {}
lon = {}
; Slippy tile zoom level (0-18)
zoom = {}

[generation]
terrain = {}
osm = {}
; Elevation of a zero sample and span up to a full sample, in metres
depth = {}
height = {}

[sources]
; Placeholders: {{z}} {{x}} {{y}} {{min_lat}} {{min_lon}} {{max_lat}} {{max_lon}}
elevation_url = {}
osm_url = {}
; HTTP timeout in seconds
timeout = {}

[logging]
directory = {}
file = {}
"#,
        streaming.cell_size(),
        streaming.adjacent_layers(),
        streaming.max_residual_chunks(),
        streaming.start_lat(),
        streaming.start_lon(),
        streaming.zoom(),
        streaming.generate_terrain(),
        streaming.generate_osm(),
        range.depth,
        range.height,
        config.sources.elevation_url().as_str(),
        config.sources.osm_url().as_str(),
        config.sources.timeout_secs(),
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

//! terrastream CLI - drive the chunk streamer from the command line
//!
//! Moves a viewpoint across the world plane for a number of ticks and
//! reports what the streamer loaded, stitched and evicted.

mod error;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing::info;

use terrastream::config::{config_file_path, ConfigFile};
use terrastream::heightmap::encode_heightmap_png;
use terrastream::logging::init_logging;
use terrastream::pipeline::{
    AsyncReqwestClient, HeightmapParser, HttpTileSource, MemoryTileSource, OsmParser, Pipeline,
    TileSource,
};
use terrastream::streaming::{ChunkStreamer, WorldPos};
use terrastream::surface::NullSurface;

use error::CliError;

/// Side of the synthetic elevation raster served offline.
const OFFLINE_RASTER_SIDE: u32 = 256;

#[derive(Parser)]
#[command(name = "terrastream")]
#[command(about = "Stream slippy-tile terrain chunks around a moving viewpoint", long_about = None)]
#[command(version = terrastream::VERSION)]
struct Args {
    /// Configuration file (default: ~/.terrastream/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start latitude in decimal degrees (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Start longitude in decimal degrees (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Zoom level 0-18 (overrides the config file)
    #[arg(long)]
    zoom: Option<u8>,

    /// Also load OpenStreetMap features
    #[arg(long)]
    osm: bool,

    /// Number of ticks to run
    #[arg(long, default_value = "200")]
    ticks: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value = "50")]
    tick_ms: u64,

    /// Viewpoint movement east per tick, in world units
    #[arg(long, default_value = "0.05", allow_hyphen_values = true)]
    step_x: f64,

    /// Viewpoint movement north per tick, in world units
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    step_z: f64,

    /// Serve synthetic tiles from memory instead of the network
    #[arg(long)]
    offline: bool,

    /// Print log events to stderr as well as the log file
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config_path = args.config.clone().unwrap_or_else(config_file_path);
    let file = ConfigFile::load_from(&config_path)?;

    let _logging = init_logging(&file.logging.directory, &file.logging.file, args.verbose)
        .map_err(CliError::LoggingInit)?;

    let mut streaming = file.streaming;
    if args.lat.is_some() || args.lon.is_some() {
        streaming = streaming.with_start(
            args.lat.unwrap_or(streaming.start_lat()),
            args.lon.unwrap_or(streaming.start_lon()),
        );
    }
    if let Some(zoom) = args.zoom {
        streaming = streaming.with_zoom(zoom);
    }
    if args.osm {
        streaming = streaming.with_generate_osm(true);
    }

    let runtime = Runtime::new().map_err(CliError::Runtime)?;
    let handle = runtime.handle().clone();

    let (elevation_source, osm_source): (Arc<dyn TileSource>, Arc<dyn TileSource>) =
        if args.offline {
            let raster = encode_heightmap_png(OFFLINE_RASTER_SIDE, rolling_hills)
                .map_err(CliError::OfflineTerrain)?;
            (
                Arc::new(MemoryTileSource::new().with_fallback(raster)),
                Arc::new(MemoryTileSource::new().with_fallback(b"<osm version=\"0.6\"/>".to_vec())),
            )
        } else {
            let client = AsyncReqwestClient::with_timeout(file.sources.timeout_secs())
                .map_err(CliError::Http)?;
            (
                Arc::new(HttpTileSource::new(
                    "elevation",
                    file.sources.elevation_url().clone(),
                    client.clone(),
                )),
                Arc::new(HttpTileSource::new("osm", file.sources.osm_url().clone(), client)),
            )
        };

    let elevation = Pipeline::new(elevation_source, HeightmapParser, handle.clone());
    let osm = Pipeline::new(osm_source, OsmParser, handle);
    let mut streamer = ChunkStreamer::new(streaming, Some(elevation), Some(osm), NullSurface)?;

    println!("Streaming terrain:");
    println!(
        "  Start: {}, {} (tile {})",
        streaming.start_lat(),
        streaming.start_lon(),
        streamer.start_tile()
    );
    println!(
        "  Window: {} chunks + {} residual",
        streaming.window_size(),
        streaming.max_residual_chunks()
    );
    println!("  Source: {}", if args.offline { "offline" } else { "network" });
    println!();

    let mut viewpoint = WorldPos::default();
    let interval = Duration::from_millis(args.tick_ms);
    for tick in 0..args.ticks {
        let summary = streamer.tick(viewpoint);
        if summary.moved {
            info!(
                tick,
                x = viewpoint.x,
                z = viewpoint.z,
                spawned = summary.spawned,
                evicted = summary.evicted,
                live = streamer.len(),
                "Viewpoint entered new cell"
            );
        }
        viewpoint.x += args.step_x;
        viewpoint.z += args.step_z;
        thread::sleep(interval);
    }

    let stats = streamer.stats();
    let generated = streamer.chunks().filter(|c| c.is_generated()).count();
    println!("Done after {} ticks:", stats.ticks);
    println!("  Spawned:   {}", stats.spawned);
    println!("  Generated: {}", stats.generated);
    println!("  Stitched:  {} borders", stats.stitched);
    println!("  Evicted:   {}", stats.evicted);
    println!("  Live:      {} ({} generated)", streamer.len(), generated);

    streamer.clear();
    Ok(())
}

/// Gentle synthetic relief for offline runs. Every tile gets the same pattern.
fn rolling_hills(col: u32, row: u32) -> f32 {
    let side = OFFLINE_RASTER_SIDE as f32;
    let u = col as f32 / side * std::f32::consts::TAU;
    let v = row as f32 / side * std::f32::consts::TAU;
    // Sea level is sample 0.497 in the default elevation range
    0.5 + 0.02 * (u.sin() + v.cos())
}

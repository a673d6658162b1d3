//! One generation run: build the generator, generate a region, save captures.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use strata_config::{CliArgs, ConfigError, WorldgenConfig};
use strata_terrain::{
    DebugMaps, ImageMapError, generate_region, generator_from_config, region_tasks,
};
use strata_voxel::CHUNK_WIDTH;
use tracing::{debug, info};

use crate::platform::{PlatformError, StrataDirs};

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to save debug maps: {0}")]
    DebugMaps(#[from] ImageMapError),
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub chunks: usize,
    /// Sum of per-chunk generation times across all workers.
    pub generation_time: Duration,
    pub wall_time: Duration,
    /// Mean height of the highest non-air block over every column.
    pub mean_surface: f64,
    pub debug_maps_dir: Option<PathBuf>,
}

/// Debug maps covering exactly the requested region.
pub fn region_debug_maps(center_x: i32, center_z: i32, radius: u32) -> DebugMaps {
    let width = CHUNK_WIDTH as i32;
    let r = radius as i32;
    let side = (2 * radius + 1) * CHUNK_WIDTH as u32;
    DebugMaps::new(side, side, (center_x - r) * width, (center_z - r) * width)
}

/// Generate the configured region and save debug maps when capture is on.
///
/// Capture is on when the config asks for it or `--debug-maps` names a
/// directory; without a configured map size the capture covers the region.
pub fn run(config: &WorldgenConfig, args: &CliArgs, dirs: &StrataDirs) -> Result<RunSummary, CliError> {
    let generation = &config.generation;
    let generator = generator_from_config(config, &dirs.config_dir)?;
    info!(
        "Generating world '{}' with '{}' (seed {}, radius {} around chunk {},{})",
        generation.world_name,
        generator.kind(),
        generation.seed,
        generation.radius,
        args.center_x,
        args.center_z
    );

    let debug_maps = match DebugMaps::from_config(config.image_maps.as_ref())? {
        Some(maps) => Some(maps),
        None if args.debug_maps.is_some() => Some(region_debug_maps(
            args.center_x,
            args.center_z,
            generation.radius,
        )),
        None => None,
    };

    let tasks = region_tasks(generation.seed, args.center_x, args.center_z, generation.radius);
    let start = Instant::now();
    let output = generate_region(generator, &tasks, generation.threads, debug_maps);
    let wall_time = start.elapsed();

    let generation_time = Duration::from_micros(
        output.chunks.iter().map(|chunk| chunk.generation_time_us).sum(),
    );
    let mut surface_total = 0i64;
    let mut columns = 0i64;
    for chunk in &output.chunks {
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                surface_total += chunk.data.highest_block(x, z).map_or(0, i64::from);
                columns += 1;
            }
        }
    }
    let mean_surface = if columns == 0 {
        0.0
    } else {
        surface_total as f64 / columns as f64
    };
    debug!("{} columns sampled for surface statistics", columns);

    let debug_maps_dir = match output.debug_maps {
        Some(maps) => {
            let dir = args
                .debug_maps
                .clone()
                .unwrap_or_else(|| dirs.world_output_dir(&generation.world_name));
            maps.save_debug_maps(&dir)?;
            Some(dir)
        }
        None => None,
    };

    Ok(RunSummary {
        chunks: output.chunks.len(),
        generation_time,
        wall_time,
        mean_surface,
        debug_maps_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_terrain::DEBUG_MAP_FILES;

    fn setup(generator: &str, radius: u32) -> (tempfile::TempDir, WorldgenConfig, StrataDirs) {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = StrataDirs::resolve_with_root(tmp.path());
        let mut config = WorldgenConfig::default();
        config.generation.generator = generator.to_string();
        config.generation.radius = radius;
        config.generation.threads = 2;
        (tmp, config, dirs)
    }

    #[test]
    fn test_run_generates_whole_region() {
        let (_tmp, config, dirs) = setup("simplex-octave", 1);
        let summary = run(&config, &CliArgs::default(), &dirs).unwrap();
        assert_eq!(summary.chunks, 9);
        assert!(summary.mean_surface > 0.0);
        assert!(summary.debug_maps_dir.is_none());
    }

    #[test]
    fn test_minimal_run_has_no_surface() {
        let (_tmp, config, dirs) = setup("minimal", 0);
        let summary = run(&config, &CliArgs::default(), &dirs).unwrap();
        assert_eq!(summary.chunks, 1);
        assert_eq!(summary.mean_surface, 0.0);
    }

    #[test]
    fn test_run_saves_debug_maps() {
        let (tmp, config, dirs) = setup("composed", 0);
        let out = tmp.path().join("captures");
        let args = CliArgs {
            debug_maps: Some(out.clone()),
            ..Default::default()
        };
        let summary = run(&config, &args, &dirs).unwrap();
        assert_eq!(summary.debug_maps_dir.as_deref(), Some(out.as_path()));
        for name in DEBUG_MAP_FILES {
            assert!(out.join(name).is_file(), "{name} missing");
        }
    }

    #[test]
    fn test_unknown_generator_fails() {
        let (_tmp, config, dirs) = setup("voronoi", 0);
        let err = run(&config, &CliArgs::default(), &dirs).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::UnknownGenerator(_))));
    }

    #[test]
    fn test_region_debug_maps_cover_region() {
        let maps = region_debug_maps(2, -1, 1);
        assert_eq!(maps.final_height.width(), 48);
        assert_eq!(maps.final_height.offset(), (16, -32));
    }
}

//! Command-line argument parsing for the strata generator.

use std::path::PathBuf;

use clap::Parser;

use crate::WorldgenConfig;

/// strata command-line arguments.
///
/// CLI values override settings loaded from `worldgen.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Deterministic terrain generator")]
pub struct CliArgs {
    /// Generator id (minimal, simplex-octave, simplex-octave-3d, simplex-noise, composed).
    #[arg(long)]
    pub generator: Option<String>,

    /// World name.
    #[arg(long)]
    pub world: Option<String>,

    /// World seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Region radius in chunks.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Center chunk X.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub center_x: i32,

    /// Center chunk Z.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub center_z: i32,

    /// Worker thread count.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to write debug capture maps into.
    #[arg(long)]
    pub debug_maps: Option<PathBuf>,
}

impl WorldgenConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref id) = args.generator {
            self.generation.generator = id.clone();
        }
        if let Some(ref name) = args.world {
            self.generation.world_name = name.clone();
        }
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(radius) = args.radius {
            self.generation.radius = radius;
        }
        if let Some(threads) = args.threads {
            self.generation.threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.logging.log_level = level.clone();
        }
    }
}

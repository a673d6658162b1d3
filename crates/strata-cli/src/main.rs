//! The `strata` binary: generate a region of terrain from the command line.

mod platform;
mod run;

use clap::Parser;
use strata_config::{CliArgs, WorldgenConfig};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match platform::StrataDirs::resolve_or_override(args.config.as_deref())
        .and_then(|dirs| dirs.create_dirs().map(|()| dirs))
    {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize directories: {e}");
            std::process::exit(1);
        }
    };

    let mut config = match WorldgenConfig::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    strata_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    match run::run(&config, &args, &dirs) {
        Ok(summary) => {
            info!(
                "Generated {} chunks in {:.2?} ({:.2?} of worker time), mean surface height {:.1}",
                summary.chunks, summary.wall_time, summary.generation_time, summary.mean_surface
            );
            if let Some(dir) = summary.debug_maps_dir {
                info!("Debug maps written to {}", dir.display());
            }
        }
        Err(e) => {
            error!("Generation failed: {e}");
            std::process::exit(1);
        }
    }
}

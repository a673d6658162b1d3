//! Configuration system for the strata terrain generators.
//!
//! Settings persist to disk as a RON file and are loaded once, before any
//! chunk is generated. Supports CLI overrides via clap and reload detection.
//! Everything here is plain data; turning it into validated samplers is the
//! job of `strata-terrain`.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeColorConfig, ComposedConfig, FlyingHillsSection, GenerationConfig, ImageMapsConfig,
    LoggingConfig, MapOffset, NoiseLayerSection, SimplexNoiseConfig, SimplexOctaveConfig,
    WorldgenConfig, CONFIG_FILE_NAME,
};
pub use error::ConfigError;

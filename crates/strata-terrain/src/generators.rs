//! Generator variants, selected by string id.
//!
//! Every variant is built once from validated configuration and then shared
//! immutably across worker threads. Samplers that depend on the world seed
//! are created inside each [`ChunkGenerator::generate_with_debug`] call.

mod composed;
mod minimal;
mod octave;
mod simplex_noise;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use strata_config::{ConfigError, WorldgenConfig};
use strata_voxel::ChunkData;

use crate::debug_maps::DebugMaps;
use crate::image_map::BiomeColorTable;
use crate::overlays::OverlayMaps;

pub use composed::{ComposedGenerator, TEMPERATURE_FLOOR};
pub use minimal::MinimalGenerator;
pub use octave::{OctaveNoise, SimplexOctaveGenerator};
pub use simplex_noise::SimplexNoiseGenerator;

/// Produces chunk data from a world seed and chunk coordinates.
///
/// Implementations hold no mutable state, so one instance serves every
/// thread.
pub trait ChunkGenerator: Send + Sync {
    /// Which variant this is.
    fn kind(&self) -> GeneratorKind;

    /// Generate a chunk, recording debug fields into `debug` when given.
    fn generate_with_debug(
        &self,
        seed: i64,
        chunk_x: i32,
        chunk_z: i32,
        debug: Option<&mut DebugMaps>,
    ) -> ChunkData;

    /// Generate a chunk.
    fn generate(&self, seed: i64, chunk_x: i32, chunk_z: i32) -> ChunkData {
        self.generate_with_debug(seed, chunk_x, chunk_z, None)
    }
}

/// The known generator variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Empty chunks.
    Minimal,
    /// Fractal octave heightmap, optional 3D noise.
    SimplexOctave,
    /// Fractal octave heightmap carved by 3D noise.
    SimplexOctave3d,
    /// Weighted-sum heightmap with cutouts, overlays, and biome surfaces.
    SimplexNoise,
    /// Height-field composer with continents, bands, and flying hills.
    Composed,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Minimal,
        GeneratorKind::SimplexOctave,
        GeneratorKind::SimplexOctave3d,
        GeneratorKind::SimplexNoise,
        GeneratorKind::Composed,
    ];

    /// The string id used in config files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            GeneratorKind::Minimal => "minimal",
            GeneratorKind::SimplexOctave => "simplex-octave",
            GeneratorKind::SimplexOctave3d => "simplex-octave-3d",
            GeneratorKind::SimplexNoise => "simplex-noise",
            GeneratorKind::Composed => "composed",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GeneratorKind {
    type Err = ConfigError;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| ConfigError::UnknownGenerator(s.to_string()))
    }
}

/// Build the generator named by `config.generation.generator`.
///
/// Overlay image paths resolve against `config_dir`.
pub fn generator_from_config(
    config: &WorldgenConfig,
    config_dir: &Path,
) -> Result<Arc<dyn ChunkGenerator>, ConfigError> {
    let kind = config.generation.generator.parse::<GeneratorKind>()?;
    build_generator(kind, config, config_dir)
}

/// Build a specific variant from its config section.
pub fn build_generator(
    kind: GeneratorKind,
    config: &WorldgenConfig,
    config_dir: &Path,
) -> Result<Arc<dyn ChunkGenerator>, ConfigError> {
    let overlays = || -> Result<Arc<OverlayMaps>, ConfigError> {
        let table = BiomeColorTable::from_config(&config.biome_colors)?;
        Ok(Arc::new(OverlayMaps::from_config(
            config.image_maps.as_ref(),
            &table,
            config_dir,
        )))
    };

    let generator: Arc<dyn ChunkGenerator> = match kind {
        GeneratorKind::Minimal => Arc::new(MinimalGenerator),
        GeneratorKind::SimplexOctave => {
            Arc::new(SimplexOctaveGenerator::new(&config.simplex_octave, false))
        }
        GeneratorKind::SimplexOctave3d => {
            Arc::new(SimplexOctaveGenerator::new(&config.simplex_octave, true))
        }
        GeneratorKind::SimplexNoise => Arc::new(SimplexNoiseGenerator::from_config(
            &config.simplex_noise,
            overlays()?,
        )?),
        GeneratorKind::Composed => {
            Arc::new(ComposedGenerator::from_config(&config.composed, overlays()?)?)
        }
    };
    Ok(generator)
}

/// Generate a chunk and return its content hash, for determinism checks.
pub fn generate_and_hash(
    generator: &dyn ChunkGenerator,
    seed: i64,
    chunk_x: i32,
    chunk_z: i32,
) -> u64 {
    generator.generate(seed, chunk_x, chunk_z).content_hash()
}

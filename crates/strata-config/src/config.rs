//! Configuration structs with sensible defaults and RON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "worldgen.ron";

/// Biome colour table: `#RRGGBB` hex string -> biome name.
pub type BiomeColorConfig = BTreeMap<String, String>;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldgenConfig {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Which generator to run and with which parameters.
    pub generation: GenerationConfig,
    /// The composed height-field generator. Left out of the file, it has no
    /// layer sections at all.
    #[serde(default = "ComposedConfig::without_layers")]
    pub composed: ComposedConfig,
    /// The weighted-sum simplex generator with cutouts and overlays.
    pub simplex_noise: SimplexNoiseConfig,
    /// The fractal octave generators (2D and 3D).
    pub simplex_octave: SimplexOctaveConfig,
    /// Image overlays and debug capture maps. `None` disables both.
    pub image_maps: Option<ImageMapsConfig>,
    /// Colour table used to decode biome overlay images.
    pub biome_colors: BiomeColorConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter (e.g., "debug", "info,strata_terrain=trace").
    pub log_level: String,
}

/// Generation run parameters. Every field can be overridden on the command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Generator id (`minimal`, `simplex-octave`, `simplex-octave-3d`,
    /// `simplex-noise`, `composed`).
    pub generator: String,
    /// World name, used for output naming.
    pub world_name: String,
    /// World seed.
    pub seed: i64,
    /// Region radius in chunks around the center chunk.
    pub radius: u32,
    /// Worker threads (0 = pick from CPU count).
    pub threads: usize,
}

/// One noise layer blend: `"freq:weight"` pairs plus redistribution.
///
/// `frequencies` has no default; a section without it fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoiseLayerSection {
    /// `"frequency:weight"` entries. At least one is required.
    pub frequencies: Vec<String>,
    /// Redistribution power applied to the blended value.
    #[serde(default = "default_exponent")]
    pub exponent: f64,
    /// Sigmoid steepness. 0 disables the sigmoid.
    #[serde(default)]
    pub sigmoid_multiplier: f64,
    /// Staircase step size. 0 or 1 selects the plain sigmoid.
    #[serde(default)]
    pub sigmoid_scale: f64,
}

/// Flying hills: floating terrain above the surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlyingHillsSection {
    /// Whether the overlay runs at all.
    #[serde(default)]
    pub enabled: bool,
    /// Noise driving where hills appear.
    pub layer: NoiseLayerSection,
}

/// The composed generator: four height layers plus temperature and flying hills.
///
/// Layer sections parse as `None` when left out of the file, so a missing
/// one is reported by name when the generator is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComposedConfig {
    /// Place marker blocks at min/max/final height instead of terrain.
    #[serde(default)]
    pub debug: bool,
    /// Bias heights toward sea level near coastlines.
    #[serde(default = "default_true")]
    pub use_continent_generator: bool,
    /// Final height layer.
    #[serde(default)]
    pub final_height: Option<NoiseLayerSection>,
    /// Continent (land vs. ocean) layer.
    #[serde(default)]
    pub continent_map: Option<NoiseLayerSection>,
    /// Minimum height layer.
    #[serde(default)]
    pub min_height: Option<NoiseLayerSection>,
    /// Maximum height layer.
    #[serde(default)]
    pub max_height: Option<NoiseLayerSection>,
    /// Temperature layer driving biome choice.
    #[serde(default)]
    pub temperature_map: Option<NoiseLayerSection>,
    /// Flying hills overlay.
    #[serde(default)]
    pub flying_hills: Option<FlyingHillsSection>,
}

/// The weighted-sum simplex generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimplexNoiseConfig {
    /// Layer frequencies.
    pub frequencies: Vec<f64>,
    /// Layer weights, parallel to `frequencies`.
    pub sizes: Vec<f64>,
    /// Redistribution power.
    pub exponent: f64,
    /// Height range above the minimum height.
    pub amplitude: i32,
    /// Lowest terrain height before overlay adjustment.
    pub minimum_height: i32,
    /// Carve overhangs and caves with 3D noise.
    pub cutouts: bool,
    /// Higher values produce fewer cutouts.
    pub cutout_threshold: f64,
    /// 3D cutout layer frequencies.
    pub cutout_frequencies: Vec<f64>,
    /// 3D cutout layer weights, parallel to `cutout_frequencies`.
    pub cutout_sizes: Vec<f64>,
}

/// The fractal octave generators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimplexOctaveConfig {
    /// Number of octaves.
    pub octaves: u32,
    /// Multiplier applied to every input coordinate.
    pub scale: f64,
    /// Frequency multiplier between octaves.
    pub frequency: f64,
    /// Amplitude multiplier between octaves.
    pub amplitude: f64,
    /// Normalize the octave sum to `[-1, 1]`.
    pub normalize: bool,
    /// Height range above the origin height.
    pub maximum_height: i32,
    /// Lowest terrain height.
    pub origin_height: i32,
    /// Power applied to `noise + 1`.
    pub exponent: f64,
    /// Add or carve single voxels from rounded 3D noise.
    pub enable_3d: bool,
    /// Threshold for the 3D cutout variant.
    pub cutout_threshold: f64,
}

/// World offset of an image map's top-left pixel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MapOffset {
    /// World X of pixel column 0.
    pub x: i32,
    /// World Z of pixel row 0.
    pub z: i32,
}

/// Image overlays and debug capture settings.
///
/// Relative paths are resolved against the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageMapsConfig {
    /// Offset shared by every map.
    pub offset: MapOffset,
    /// Greyscale map scaling terrain amplitude.
    pub amplitude: Option<PathBuf>,
    /// Greyscale map scaling the minimum height.
    pub minimum_height: Option<PathBuf>,
    /// Dye colour map placed as wool at the height ceiling.
    pub wool: Option<PathBuf>,
    /// Biome map decoded through the biome colour table.
    pub biomes: Option<PathBuf>,
    /// Capture internal fields into blank debug maps.
    pub draw_debug_maps: bool,
    /// Debug map width in pixels.
    pub width: u32,
    /// Debug map height in pixels.
    pub height: u32,
}

// --- Default implementations ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generator: "composed".to_string(),
            world_name: "world".to_string(),
            seed: 0,
            radius: 4,
            threads: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_exponent() -> f64 {
    1.0
}

impl NoiseLayerSection {
    fn with(frequencies: &[&str], exponent: f64, sigmoid_multiplier: f64) -> Self {
        Self {
            frequencies: frequencies.iter().map(|f| f.to_string()).collect(),
            exponent,
            sigmoid_multiplier,
            sigmoid_scale: 0.0,
        }
    }
}

impl Default for FlyingHillsSection {
    fn default() -> Self {
        Self {
            enabled: false,
            layer: NoiseLayerSection::with(&["0.01:1.0", "0.04:0.25"], 2.0, 0.0),
        }
    }
}

impl Default for ComposedConfig {
    fn default() -> Self {
        Self {
            debug: false,
            use_continent_generator: true,
            final_height: Some(NoiseLayerSection::with(
                &["0.004:1.0", "0.016:0.3", "0.064:0.06"],
                1.0,
                0.0,
            )),
            continent_map: Some(NoiseLayerSection::with(
                &["0.0007:1.0", "0.003:0.25"],
                1.0,
                0.0,
            )),
            min_height: Some(NoiseLayerSection::with(&["0.002:1.0", "0.01:0.2"], 1.5, 0.0)),
            max_height: Some(NoiseLayerSection::with(&["0.003:1.0", "0.012:0.3"], 2.0, 6.0)),
            temperature_map: Some(NoiseLayerSection::with(&["0.0015:1.0"], 1.0, 0.0)),
            flying_hills: Some(FlyingHillsSection::default()),
        }
    }
}

impl ComposedConfig {
    /// Composed settings with every layer section absent.
    pub fn without_layers() -> Self {
        Self {
            debug: false,
            use_continent_generator: true,
            final_height: None,
            continent_map: None,
            min_height: None,
            max_height: None,
            temperature_map: None,
            flying_hills: None,
        }
    }
}

impl Default for SimplexNoiseConfig {
    fn default() -> Self {
        Self {
            frequencies: vec![0.005, 0.02, 0.08],
            sizes: vec![1.0, 0.3, 0.05],
            exponent: 2.0,
            amplitude: 40,
            minimum_height: 50,
            cutouts: false,
            cutout_threshold: 2.0,
            cutout_frequencies: vec![0.02, 0.06],
            cutout_sizes: vec![1.0, 0.4],
        }
    }
}

impl Default for SimplexOctaveConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            scale: 0.005,
            frequency: 2.0,
            amplitude: 0.5,
            normalize: true,
            maximum_height: 40,
            origin_height: 50,
            exponent: 1.2,
            enable_3d: false,
            cutout_threshold: -0.5,
        }
    }
}

impl Default for ImageMapsConfig {
    fn default() -> Self {
        Self {
            offset: MapOffset::default(),
            amplitude: None,
            minimum_height: None,
            wool: None,
            biomes: None,
            draw_debug_maps: false,
            width: 1024,
            height: 1024,
        }
    }
}

// --- Load / Save / Reload ---

impl WorldgenConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::load(&config_path)?;
            log::info!("Loaded worldgen config from {}", config_path.display());
            Ok(config)
        } else {
            let config = WorldgenConfig::default();
            config.save(config_dir)?;
            log::info!("Created default worldgen config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Load config from an explicit file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Save config to the given directory as `worldgen.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// Generators built from the old value keep running with it; callers
    /// rebuild generators from the returned config before the next run.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::load(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Worldgen config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

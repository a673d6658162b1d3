//! Height field composition from four independently seeded noise layers.

use strata_config::{ComposedConfig, ConfigError, NoiseLayerSection};

use crate::math::{rescale, sigmoid, unit_to_range};
use crate::noise_layer::{NoiseLayerConfig, NoiseLayerSampler};
use crate::seed::{CONTINENT, MAXIMUM, MINIMUM, derive_layer_seed};

/// Lower bound of the minimum height without the continent policy.
pub const BASE_MIN_HEIGHT: i32 = 45;
/// Upper bound of the minimum height without the continent policy.
pub const BASE_MIN_CEILING: i32 = 128;
/// Highest terrain surface, 32 blocks below the world ceiling.
pub const MAX_TERRAIN_HEIGHT: i32 = 224;
/// Coastline reference height the continent policy starts from.
pub const COAST_HEIGHT: i32 = 61;
/// Largest rise of the minimum height above the coast on land.
pub const LAND_MIN_RISE: i32 = 66;
/// Largest drop of the minimum height below the coast at sea.
pub const OCEAN_MIN_DROP: i32 = 30;
/// Ceiling of ocean terrain. Just above the water, so islands can form.
pub const OCEAN_MAX_HEIGHT: i32 = 64;

/// Below this `|continent|`, the minimum-height noise is damped by an exponent.
const MIN_DAMPING_RANGE: f64 = 0.5;
/// Damping exponent at the coastline itself (`|continent| = 0`).
const MIN_DAMPING_EXPONENT: f64 = 3.25;
/// Exponent falloff per unit of `|continent|`; reaches 1 at the range edge.
const MIN_DAMPING_FALLOFF: f64 = 4.5;
/// Sigmoid steepness damping the maximum-height noise near the coast.
const MAX_DAMPING_STEEPNESS: f64 = 10.0;

/// Raw `[0, 1]` noise values for one column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerNoise {
    /// Continent layer (0.5 is the coastline).
    pub continent: f64,
    /// Minimum-height layer.
    pub minimum: f64,
    /// Maximum-height layer.
    pub maximum: f64,
    /// Final-height layer.
    pub final_height: f64,
}

/// Per-column heights plus the noise they came from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeightField {
    pub min_height: i32,
    pub max_height: i32,
    pub final_height: i32,
    pub noise: LayerNoise,
}

impl HeightField {
    /// Heights without the continent policy.
    ///
    /// Minimum in `[45, 128]`, maximum in `[min, 224]`, final in `[min, max]`.
    pub fn base(noise: LayerNoise) -> Self {
        let min_height = unit_to_range(noise.minimum, BASE_MIN_HEIGHT, BASE_MIN_CEILING);
        let max_height = unit_to_range(noise.maximum, min_height, MAX_TERRAIN_HEIGHT);
        let final_height = unit_to_range(noise.final_height, min_height, max_height);
        Self {
            min_height,
            max_height,
            final_height,
            noise,
        }
    }

    /// Heights relative to the coastline.
    ///
    /// The continent noise is mapped to `[-1, 1]`; positive is land. Near
    /// the coast the minimum and maximum noise are damped toward zero, so
    /// terrain flattens into the water instead of ending in a cliff.
    pub fn with_continent_policy(noise: LayerNoise) -> Self {
        let continent = rescale(noise.continent, 0.0, 1.0, -1.0, 1.0);
        let distance = continent.abs();

        let mut min_noise = noise.minimum.clamp(0.0, 1.0);
        if distance < MIN_DAMPING_RANGE {
            let exponent = MIN_DAMPING_EXPONENT - distance * MIN_DAMPING_FALLOFF;
            min_noise = libm::pow(min_noise, exponent);
        }

        let mut max_noise = noise.maximum.clamp(0.0, 1.0);
        if distance < 1.0 {
            max_noise *= sigmoid(distance, MAX_DAMPING_STEEPNESS);
        }

        let (min_height, max_height) = if continent > 0.0 {
            let min_height = COAST_HEIGHT + unit_to_range(min_noise, 0, LAND_MIN_RISE);
            (
                min_height,
                unit_to_range(max_noise, min_height, MAX_TERRAIN_HEIGHT),
            )
        } else {
            let min_height = COAST_HEIGHT - unit_to_range(min_noise, 0, OCEAN_MIN_DROP);
            (
                min_height,
                unit_to_range(max_noise, min_height, OCEAN_MAX_HEIGHT),
            )
        };
        let final_height = unit_to_range(noise.final_height, min_height, max_height);

        Self {
            min_height,
            max_height,
            final_height,
            noise,
        }
    }

    /// `final_height - min_height`; small values mean flat terrain.
    pub fn height_difference(&self) -> i32 {
        self.final_height - self.min_height
    }
}

/// Samples the four height layers and turns them into a [`HeightField`].
#[derive(Clone, Debug)]
pub struct HeightFieldComposer {
    continent: NoiseLayerSampler,
    minimum: NoiseLayerSampler,
    maximum: NoiseLayerSampler,
    final_height: NoiseLayerSampler,
    continent_policy: bool,
}

impl HeightFieldComposer {
    /// Seeds each layer from `seed`: the final layer uses it directly, the
    /// others use `seed × stable_hash(name)`.
    pub fn new(
        seed: i64,
        final_height: NoiseLayerConfig,
        continent: NoiseLayerConfig,
        minimum: NoiseLayerConfig,
        maximum: NoiseLayerConfig,
        continent_policy: bool,
    ) -> Self {
        Self {
            final_height: NoiseLayerSampler::new(final_height, seed),
            continent: NoiseLayerSampler::new(continent, derive_layer_seed(seed, CONTINENT)),
            minimum: NoiseLayerSampler::new(minimum, derive_layer_seed(seed, MINIMUM)),
            maximum: NoiseLayerSampler::new(maximum, derive_layer_seed(seed, MAXIMUM)),
            continent_policy,
        }
    }

    /// Build from the composed generator's config. Every layer section must
    /// be present.
    pub fn from_config(seed: i64, config: &ComposedConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            seed,
            layer_config("final_height", config.final_height.as_ref())?,
            layer_config("continent_map", config.continent_map.as_ref())?,
            layer_config("min_height", config.min_height.as_ref())?,
            layer_config("max_height", config.max_height.as_ref())?,
            config.use_continent_generator,
        ))
    }

    /// Whether coastline shaping is applied.
    pub fn continent_policy(&self) -> bool {
        self.continent_policy
    }

    /// Raw layer noise at a world column.
    pub fn layer_noise(&self, x: i32, z: i32) -> LayerNoise {
        let (x, z) = (x as f64, z as f64);
        LayerNoise {
            continent: self.continent.sample(x, z),
            minimum: self.minimum.sample(x, z),
            maximum: self.maximum.sample(x, z),
            final_height: self.final_height.sample(x, z),
        }
    }

    /// Height field for a world column.
    pub fn compute_height_field(&self, x: i32, z: i32) -> HeightField {
        let noise = self.layer_noise(x, z);
        if self.continent_policy {
            HeightField::with_continent_policy(noise)
        } else {
            HeightField::base(noise)
        }
    }
}

/// Validate an optional layer section, naming it when absent.
pub(crate) fn layer_config(
    name: &str,
    section: Option<&NoiseLayerSection>,
) -> Result<NoiseLayerConfig, ConfigError> {
    let section = section.ok_or_else(|| ConfigError::MissingSection(name.to_string()))?;
    NoiseLayerConfig::from_section(name, section)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(continent: f64, minimum: f64, maximum: f64, final_height: f64) -> LayerNoise {
        LayerNoise {
            continent,
            minimum,
            maximum,
            final_height,
        }
    }

    fn grid() -> impl Iterator<Item = LayerNoise> {
        let steps = [0.0, 0.05, 0.2, 0.3, 0.49, 0.5, 0.51, 0.7, 0.76, 0.9, 1.0];
        steps.into_iter().flat_map(move |c| {
            steps.into_iter().flat_map(move |mn| {
                steps
                    .into_iter()
                    .flat_map(move |mx| steps.into_iter().map(move |f| noise(c, mn, mx, f)))
            })
        })
    }

    #[test]
    fn test_base_heights_ordered_and_bounded() {
        for n in grid() {
            let field = HeightField::base(n);
            assert!((45..=128).contains(&field.min_height));
            assert!(field.max_height >= field.min_height && field.max_height <= 224);
            assert!(field.min_height <= field.final_height);
            assert!(field.final_height <= field.max_height);
        }
    }

    #[test]
    fn test_continent_policy_orders_heights() {
        for n in grid() {
            let field = HeightField::with_continent_policy(n);
            assert!(
                field.min_height <= field.final_height && field.final_height <= field.max_height,
                "{n:?} gave {field:?}"
            );
        }
    }

    #[test]
    fn test_ocean_stays_below_island_ceiling() {
        for n in grid().filter(|n| n.continent <= 0.5) {
            let field = HeightField::with_continent_policy(n);
            assert!((31..=61).contains(&field.min_height), "{field:?}");
            assert!(field.max_height <= OCEAN_MAX_HEIGHT);
        }
    }

    #[test]
    fn test_land_rises_from_coast() {
        for n in grid().filter(|n| n.continent > 0.5) {
            let field = HeightField::with_continent_policy(n);
            assert!((61..=127).contains(&field.min_height), "{field:?}");
            assert!(field.max_height <= MAX_TERRAIN_HEIGHT);
        }
    }

    #[test]
    fn test_deep_inland_values() {
        // continent 1.0 -> no damping at all.
        let field = HeightField::with_continent_policy(noise(1.0, 0.5, 1.0, 1.0));
        assert_eq!(field.min_height, 61 + 33);
        assert_eq!(field.max_height, 224);
        assert_eq!(field.final_height, 224);
    }

    #[test]
    fn test_coastline_flattens_terrain() {
        // At the coastline the minimum noise is raised to 3.25 and the maximum
        // noise is halved by the sigmoid.
        let field = HeightField::with_continent_policy(noise(0.5, 0.5, 1.0, 1.0));
        let expected_min = 61 - unit_to_range(libm::pow(0.5, 3.25), 0, 30);
        assert_eq!(field.min_height, expected_min);
        assert_eq!(field.max_height, unit_to_range(0.5, expected_min, 64));
    }

    #[test]
    fn test_height_difference() {
        let field = HeightField {
            min_height: 70,
            max_height: 120,
            final_height: 78,
            noise: LayerNoise::default(),
        };
        assert_eq!(field.height_difference(), 8);
    }

    #[test]
    fn test_missing_section_is_named() {
        let config = ComposedConfig {
            min_height: None,
            ..ComposedConfig::default()
        };
        let err = HeightFieldComposer::from_config(1, &config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref name) if name == "min_height"));
    }

    #[test]
    fn test_section_left_out_of_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(strata_config::CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "(composed: (final_height: Some((frequencies: [\"0.01:1.0\"])), \
             continent_map: Some((frequencies: [\"0.001:1.0\"]))))",
        )
        .unwrap();
        let config = strata_config::WorldgenConfig::load(&path).unwrap();
        let err = HeightFieldComposer::from_config(1, &config.composed).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref name) if name == "min_height"));
    }

    #[test]
    fn test_composer_invariant_over_world() {
        let composer = HeightFieldComposer::from_config(42, &ComposedConfig::default()).unwrap();
        assert!(composer.continent_policy());
        for x in (-2000..2000).step_by(37) {
            for z in (-2000..2000).step_by(41) {
                let field = composer.compute_height_field(x, z);
                assert!(field.min_height <= field.final_height);
                assert!(field.final_height <= field.max_height);
            }
        }
    }

    #[test]
    fn test_composer_deterministic() {
        let config = ComposedConfig::default();
        let a = HeightFieldComposer::from_config(-7, &config).unwrap();
        let b = HeightFieldComposer::from_config(-7, &config).unwrap();
        for i in 0..100 {
            assert_eq!(
                a.compute_height_field(i * 13, -i * 5),
                b.compute_height_field(i * 13, -i * 5)
            );
        }
    }
}

//! The composed generator: height field, bands, and overlay passes.

use std::sync::Arc;

use strata_config::{ComposedConfig, ConfigError};
use strata_voxel::{CHUNK_WIDTH, ChunkData};

use super::{ChunkGenerator, GeneratorKind};
use crate::column::{ChunkTerrainBuilder, ColumnOverrides};
use crate::debug_maps::DebugMaps;
use crate::height_field::{HeightFieldComposer, layer_config};
use crate::noise_layer::{NoiseLayerConfig, NoiseLayerSampler};
use crate::overlays::OverlayMaps;
use crate::seed::{FLYING_HILLS, TEMPERATURE, derive_layer_seed};

/// Lowest temperature the composed generator uses. Colder samples are
/// raised to it, so the snowy and frozen biomes never appear.
pub const TEMPERATURE_FLOOR: f64 = 0.6;

/// The `composed` generator.
#[derive(Clone, Debug)]
pub struct ComposedGenerator {
    final_height: NoiseLayerConfig,
    continent: NoiseLayerConfig,
    minimum: NoiseLayerConfig,
    maximum: NoiseLayerConfig,
    temperature: NoiseLayerConfig,
    flying_hills: Option<NoiseLayerConfig>,
    continent_policy: bool,
    debug: bool,
    overlays: Arc<OverlayMaps>,
}

impl ComposedGenerator {
    /// Every layer section is required, including `flying_hills`; its layer
    /// is validated only when the feature is enabled.
    pub fn from_config(
        config: &ComposedConfig,
        overlays: Arc<OverlayMaps>,
    ) -> Result<Self, ConfigError> {
        let flying_hills_section = config
            .flying_hills
            .as_ref()
            .ok_or_else(|| ConfigError::MissingSection("flying_hills".to_string()))?;
        let flying_hills = if flying_hills_section.enabled {
            Some(layer_config(
                "flying_hills",
                Some(&flying_hills_section.layer),
            )?)
        } else {
            None
        };

        Ok(Self {
            final_height: layer_config("final_height", config.final_height.as_ref())?,
            continent: layer_config("continent_map", config.continent_map.as_ref())?,
            minimum: layer_config("min_height", config.min_height.as_ref())?,
            maximum: layer_config("max_height", config.max_height.as_ref())?,
            temperature: layer_config("temperature_map", config.temperature_map.as_ref())?,
            flying_hills,
            continent_policy: config.use_continent_generator,
            debug: config.debug,
            overlays,
        })
    }

    fn composer(&self, seed: i64) -> HeightFieldComposer {
        HeightFieldComposer::new(
            seed,
            self.final_height.clone(),
            self.continent.clone(),
            self.minimum.clone(),
            self.maximum.clone(),
            self.continent_policy,
        )
    }
}

impl ChunkGenerator for ComposedGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Composed
    }

    fn generate_with_debug(
        &self,
        seed: i64,
        chunk_x: i32,
        chunk_z: i32,
        mut debug: Option<&mut DebugMaps>,
    ) -> ChunkData {
        let composer = self.composer(seed);
        let temperature = NoiseLayerSampler::new(
            self.temperature.clone(),
            derive_layer_seed(seed, TEMPERATURE),
        );
        let flying_hills = self
            .flying_hills
            .as_ref()
            .map(|layer| NoiseLayerSampler::new(layer.clone(), derive_layer_seed(seed, FLYING_HILLS)));
        let builder = ChunkTerrainBuilder::new(seed, flying_hills);

        let mut chunk = ChunkData::new();
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let world_x = chunk_x * CHUNK_WIDTH as i32 + x as i32;
                let world_z = chunk_z * CHUNK_WIDTH as i32 + z as i32;
                let field = composer.compute_height_field(world_x, world_z);

                if let Some(maps) = debug.as_deref_mut() {
                    maps.record_height_field(world_x, world_z, &field);
                }

                if self.debug {
                    builder.build_debug_column(chunk.column_mut(x, z), &field);
                    continue;
                }

                let temperature = temperature
                    .sample(world_x as f64, world_z as f64)
                    .max(TEMPERATURE_FLOOR);
                let overrides = ColumnOverrides {
                    biome: self.overlays.biome_override(world_x, world_z),
                    wool: self.overlays.wool(world_x, world_z),
                };
                let outcome = builder.build_column(
                    chunk.column_mut(x, z),
                    world_x,
                    world_z,
                    &field,
                    overrides,
                    temperature,
                );
                chunk.set_biome(x, z, outcome.biome);

                if let (Some(maps), Some(noise)) =
                    (debug.as_deref_mut(), outcome.flying_hills_noise)
                {
                    maps.record_flying_hills(world_x, world_z, noise);
                }
            }
        }
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use strata_config::FlyingHillsSection;
    use strata_voxel::{Biome, Block};

    fn generator(config: &ComposedConfig) -> ComposedGenerator {
        ComposedGenerator::from_config(config, Arc::new(OverlayMaps::none())).unwrap()
    }

    #[test]
    fn test_missing_sections_are_named() {
        let cases: [(&str, fn(&mut ComposedConfig)); 3] = [
            ("temperature_map", |c| c.temperature_map = None),
            ("continent_map", |c| c.continent_map = None),
            ("flying_hills", |c| c.flying_hills = None),
        ];
        for (name, strip) in cases {
            let mut config = ComposedConfig::default();
            strip(&mut config);
            let err = ComposedGenerator::from_config(&config, Arc::new(OverlayMaps::none()))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::MissingSection(ref s) if s == name),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn test_disabled_flying_hills_layer_not_validated() {
        let mut config = ComposedConfig::default();
        config.flying_hills = Some(FlyingHillsSection {
            enabled: false,
            layer: strata_config::NoiseLayerSection {
                frequencies: vec![],
                exponent: 1.0,
                sigmoid_multiplier: 0.0,
                sigmoid_scale: 0.0,
            },
        });
        assert!(ComposedGenerator::from_config(&config, Arc::new(OverlayMaps::none())).is_ok());
        config.flying_hills.as_mut().unwrap().enabled = true;
        assert!(matches!(
            ComposedGenerator::from_config(&config, Arc::new(OverlayMaps::none())),
            Err(ConfigError::EmptyFrequencies(_))
        ));
    }

    #[test]
    fn test_columns_have_bedrock_and_surface() {
        let chunk = generator(&ComposedConfig::default()).generate(42, 3, -2);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                assert_eq!(chunk.get(x, 0, z), Block::Bedrock);
                let top = chunk.highest_block(x, z).unwrap();
                assert!(top >= 62, "column {x},{z} tops out at {top}");
            }
        }
    }

    #[test]
    fn test_cold_biomes_unreachable() {
        let generator = generator(&ComposedConfig::default());
        for (cx, cz) in [(0, 0), (10, -10), (-40, 25)] {
            let chunk = generator.generate(7, cx, cz);
            for x in 0..CHUNK_WIDTH {
                for z in 0..CHUNK_WIDTH {
                    let biome = chunk.biome(x, z);
                    assert!(
                        !matches!(
                            biome,
                            Biome::SnowyTaiga
                                | Biome::SnowyTundra
                                | Biome::SnowyBeach
                                | Biome::FrozenOcean
                                | Biome::SnowyMountains
                                | Biome::SnowyTaigaMountains
                        ),
                        "{biome:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_debug_mode_places_markers_only() {
        let config = ComposedConfig {
            debug: true,
            ..ComposedConfig::default()
        };
        let chunk = generator(&config).generate(1, 0, 0);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let solid = chunk.column(x, z).iter().filter(|b| !b.is_air()).count();
                assert!((2..=4).contains(&solid), "{solid} solid blocks");
                assert_eq!(chunk.get(x, 0, z), Block::Bedrock);
            }
        }
    }

    #[test]
    fn test_debug_maps_capture_every_column() {
        let mut config = ComposedConfig::default();
        if let Some(hills) = config.flying_hills.as_mut() {
            hills.enabled = true;
        }
        let generator = generator(&config);
        let mut maps = DebugMaps::new(32, 32, 0, 0);
        let chunk = generator.generate_with_debug(5, 1, 1, Some(&mut maps));
        assert_eq!(chunk, generator.generate(5, 1, 1));
        for x in 16..32 {
            for z in 16..32 {
                assert!(maps.final_height.is_written(x, z));
                assert!(maps.flying_hills.is_written(x, z));
            }
        }
        assert!(!maps.final_height.is_written(0, 0));
        let Rgb([_, green, _]) = maps.final_height.pixel(16, 16);
        assert!(green >= 31);
    }

    #[test]
    fn test_without_continent_policy_heights_stay_in_base_range() {
        let config = ComposedConfig {
            use_continent_generator: false,
            debug: true,
            ..ComposedConfig::default()
        };
        let chunk = generator(&config).generate(99, -1, 4);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let top = chunk.highest_block(x, z).unwrap();
                assert!((45..=224).contains(&top));
            }
        }
    }
}

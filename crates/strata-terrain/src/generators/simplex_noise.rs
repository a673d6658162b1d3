//! Weighted-sum simplex terrain with image overlays, cutouts, and
//! biome-dependent surfaces.

use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_config::{ConfigError, SimplexNoiseConfig};
use strata_voxel::{Biome, Block, CHUNK_WIDTH, ChunkData, SEA_LEVEL};

use super::{ChunkGenerator, GeneratorKind};
use crate::column::{CEILING_Y, block_at, fill, put};
use crate::debug_maps::DebugMaps;
use crate::noise_layer::{NoiseLayerConfig, NoiseLayerSampler};
use crate::overlays::OverlayMaps;
use crate::seed::column_rng;

/// Surfaces above this are solid stone.
const ALL_STONE_ABOVE: i32 = 247;
/// Surfaces above this get a gravel and stone cap.
const ROCKY_ABOVE: i32 = 90;
/// Surfaces below this are underwater.
const SUBMERGED_BELOW: i32 = 63;
/// Snow caps mountain biomes above this.
const SNOW_ABOVE: i32 = 245;
/// Always rocky above this, whatever the biome.
const BARE_ROCK_ABOVE: i32 = 200;

#[derive(Clone, Debug)]
struct Cutouts {
    layer: NoiseLayerConfig,
    threshold: f64,
}

/// The `simplex-noise` generator.
#[derive(Clone, Debug)]
pub struct SimplexNoiseGenerator {
    terrain: NoiseLayerConfig,
    amplitude: i32,
    minimum_height: i32,
    cutouts: Option<Cutouts>,
    overlays: Arc<OverlayMaps>,
}

impl SimplexNoiseGenerator {
    /// Validate the section. Cutout lists are checked only when cutouts are on.
    pub fn from_config(
        config: &SimplexNoiseConfig,
        overlays: Arc<OverlayMaps>,
    ) -> Result<Self, ConfigError> {
        let terrain = NoiseLayerConfig::from_parallel(
            "simplex_noise",
            &config.frequencies,
            &config.sizes,
            config.exponent,
        )?;
        let cutouts = if config.cutouts {
            Some(Cutouts {
                layer: NoiseLayerConfig::from_parallel(
                    "simplex_noise.cutout",
                    &config.cutout_frequencies,
                    &config.cutout_sizes,
                    1.0,
                )?,
                threshold: config.cutout_threshold,
            })
        } else {
            None
        };
        Ok(Self {
            terrain,
            amplitude: config.amplitude,
            minimum_height: config.minimum_height,
            cutouts,
            overlays,
        })
    }

    /// Minimum height scaled by the minimum-height overlay.
    fn base_height(&self, world_x: i32, world_z: i32) -> i32 {
        (self.minimum_height as f64 * self.overlays.height_modifier(world_x, world_z)) as i32
    }

    /// Surface height of a column.
    pub fn terrain_height(&self, sampler: &NoiseLayerSampler, world_x: i32, world_z: i32) -> i32 {
        let modifier = self.overlays.amplitude_modifier(world_x, world_z);
        let sum = sampler.weighted_sum(world_x as f64, world_z as f64, modifier);
        let noise = libm::pow(sum, self.terrain.exponent);
        (noise * self.amplitude as f64 + self.base_height(world_x, world_z) as f64) as i32
    }
}

impl ChunkGenerator for SimplexNoiseGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::SimplexNoise
    }

    fn generate_with_debug(
        &self,
        seed: i64,
        chunk_x: i32,
        chunk_z: i32,
        _debug: Option<&mut DebugMaps>,
    ) -> ChunkData {
        let terrain = NoiseLayerSampler::new(self.terrain.clone(), seed);
        let cutouts = self
            .cutouts
            .as_ref()
            .map(|c| (NoiseLayerSampler::new(c.layer.clone(), seed), c.threshold));

        let mut chunk = ChunkData::new();
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let world_x = chunk_x * CHUNK_WIDTH as i32 + x as i32;
                let world_z = chunk_z * CHUNK_WIDTH as i32 + z as i32;
                let mut rng = column_rng(seed, world_x, world_z);
                let height = self.terrain_height(&terrain, world_x, world_z);
                let biome = self
                    .overlays
                    .biome_override(world_x, world_z)
                    .unwrap_or_default();

                let blocks = chunk.column_mut(x, z);
                place_bands(blocks, height, &mut rng);
                if let Some((sampler, threshold)) = &cutouts {
                    carve_cutouts(
                        blocks,
                        sampler,
                        *threshold,
                        world_x,
                        world_z,
                        height,
                        self.base_height(world_x, world_z),
                    );
                }
                apply_surface_rules(blocks, height, biome, &mut rng);
                if let Some(dye) = self.overlays.wool(world_x, world_z) {
                    put(blocks, CEILING_Y, Block::Wool(dye));
                }
                chunk.set_biome(x, z, biome);
            }
        }
        chunk
    }
}

/// Base fill by surface height.
fn place_bands(blocks: &mut [Block], height: i32, rng: &mut ChaCha8Rng) {
    if height > ALL_STONE_ABOVE {
        fill(blocks, 1..=height, Block::Stone);
    } else if height > ROCKY_ABOVE {
        for y in (1..=height).rev() {
            let block = if y >= height - 3 && rng.random_bool(0.5) {
                Block::Gravel
            } else {
                Block::Stone
            };
            put(blocks, y, block);
        }
    } else if height < SUBMERGED_BELOW {
        fill(blocks, 1..=height, Block::Stone);
        if height >= SEA_LEVEL {
            put(blocks, SEA_LEVEL, Block::Sand);
        }
    } else {
        put(blocks, height, Block::GrassBlock);
        put(blocks, height - 1, Block::Dirt);
        fill(blocks, 1..=height - 2, Block::Stone);
    }
    put(blocks, 0, Block::Bedrock);
}

/// Air wherever the 3D noise falls under a threshold rising with height.
///
/// The carved cell sits `base_height` above the sampled one.
fn carve_cutouts(
    blocks: &mut [Block],
    sampler: &NoiseLayerSampler,
    threshold: f64,
    world_x: i32,
    world_z: i32,
    height: i32,
    base_height: i32,
) {
    for y in 0..=height {
        let noise = sampler.blend_3d(world_x as f64, y as f64, world_z as f64);
        let height_fraction = y as f64 / height as f64;
        if noise * threshold <= height_fraction {
            put(blocks, y + base_height, Block::Air);
        }
    }
}

fn coin(rng: &mut ChaCha8Rng) -> bool {
    rng.random_bool(0.5)
}

fn rock(rng: &mut ChaCha8Rng) -> Block {
    if coin(rng) { Block::Gravel } else { Block::Stone }
}

/// Rewrite the top 2 to 5 solid blocks according to the biome.
fn apply_surface_rules(blocks: &mut [Block], height: i32, biome: Biome, rng: &mut ChaCha8Rng) {
    let depth: i32 = rng.random_range(2..=5);
    let soil = |y: i32| {
        if y == height {
            Block::GrassBlock
        } else {
            Block::Dirt
        }
    };

    for y in (height - depth + 1..=height).rev() {
        if block_at(blocks, y).is_air() {
            continue;
        }
        let block = match biome {
            Biome::Beach | Biome::SnowyBeach | Biome::Ocean => {
                fill(blocks, height + 1..=SEA_LEVEL, Block::Water);
                if y > 80 {
                    rock(rng)
                } else if y >= 64 {
                    soil(y)
                } else {
                    Block::Sand
                }
            }
            b if b.is_mountainous() || b == Biome::StoneShore => {
                if y > SNOW_ABOVE {
                    Block::SnowBlock
                } else if y > BARE_ROCK_ABOVE || (y > 80 && coin(rng)) {
                    rock(rng)
                } else {
                    soil(y)
                }
            }
            _ => {
                if y > BARE_ROCK_ABOVE || (y > 85 && coin(rng)) {
                    rock(rng)
                } else {
                    soil(y)
                }
            }
        };
        put(blocks, y, block);
    }

    put(blocks, 0, Block::Bedrock);
}

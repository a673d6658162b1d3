//! Fractal octave heightmaps.
//!
//! Octaves are summed with per-octave frequency and amplitude multipliers,
//! each octave drawing from its own seeded simplex primitive.

use noise::{NoiseFn, Simplex};
use strata_config::SimplexOctaveConfig;
use strata_voxel::{Block, CHUNK_WIDTH, ChunkData, WORLD_HEIGHT};

use super::{ChunkGenerator, GeneratorKind};
use crate::column::put;
use crate::debug_maps::DebugMaps;
use crate::math::round_half_up;
use crate::seed::noise_seed;

/// Multi-octave simplex noise.
#[derive(Clone, Debug)]
pub struct OctaveNoise {
    octaves: Vec<Simplex>,
    /// Multiplier applied to every input coordinate.
    scale: f64,
    /// Frequency multiplier between successive octaves.
    frequency: f64,
    /// Amplitude multiplier between successive octaves.
    amplitude: f64,
}

impl OctaveNoise {
    pub fn new(seed: i64, octaves: u32, scale: f64, frequency: f64, amplitude: f64) -> Self {
        let base = noise_seed(seed);
        Self {
            octaves: (0..octaves)
                .map(|i| Simplex::new(base.wrapping_add(i)))
                .collect(),
            scale,
            frequency,
            amplitude,
        }
    }

    /// Sum of all octave amplitudes; divides the sum when normalizing.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.octaves.len() {
            sum += amp;
            amp *= self.amplitude;
        }
        sum
    }

    /// 2D octave noise. With `normalize` the result is roughly in `[-1, 1]`.
    pub fn sample(&self, x: f64, z: f64, normalize: bool) -> f64 {
        let (x, z) = (x * self.scale, z * self.scale);
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for octave in &self.octaves {
            total += octave.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.frequency;
            amplitude *= self.amplitude;
        }
        self.finish(total, normalize)
    }

    /// 3D octave noise.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64, normalize: bool) -> f64 {
        let (x, y, z) = (x * self.scale, y * self.scale, z * self.scale);
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for octave in &self.octaves {
            total += octave.get([x * frequency, y * frequency, z * frequency]) * amplitude;
            frequency *= self.frequency;
            amplitude *= self.amplitude;
        }
        self.finish(total, normalize)
    }

    fn finish(&self, total: f64, normalize: bool) -> f64 {
        let max = self.max_amplitude();
        if normalize && max != 0.0 {
            total / max
        } else {
            total
        }
    }
}

/// The `simplex-octave` and `simplex-octave-3d` generators.
#[derive(Clone, Debug)]
pub struct SimplexOctaveGenerator {
    config: SimplexOctaveConfig,
    carve_3d: bool,
}

impl SimplexOctaveGenerator {
    /// `carve_3d` selects the variant that carves below the surface.
    pub fn new(config: &SimplexOctaveConfig, carve_3d: bool) -> Self {
        Self {
            config: config.clone(),
            carve_3d,
        }
    }

    /// Surface height: `trunc((noise + 1)^exponent × maximum + origin)`.
    pub fn surface_height(&self, noise: f64) -> i32 {
        let c = &self.config;
        (libm::pow(noise + 1.0, c.exponent) * c.maximum_height as f64 + c.origin_height as f64)
            as i32
    }

    fn build_column(
        &self,
        noise: &OctaveNoise,
        blocks: &mut [Block],
        world_x: f64,
        world_z: f64,
    ) {
        let c = &self.config;
        let noise_2d = noise.sample(world_x, world_z, c.normalize);
        let height = self.surface_height(noise_2d);

        put(blocks, height, Block::GrassBlock);
        put(blocks, height - 1, Block::Dirt);
        for y in 1..height - 1 {
            put(blocks, y, Block::Stone);
        }

        if self.carve_3d {
            for y in 0..height {
                let noise_3d = noise.sample_3d(world_x, y as f64, world_z, c.normalize);
                if noise_3d + noise_2d < c.cutout_threshold {
                    put(blocks, y, Block::Air);
                }
            }
        } else if c.enable_3d {
            for y in 0..WORLD_HEIGHT as i32 - 1 {
                match round_half_up(noise.sample_3d(world_x, y as f64, world_z, true)) {
                    -1 => put(blocks, y, Block::Air),
                    1 => put(blocks, y, Block::Stone),
                    _ => {}
                }
            }
        }

        put(blocks, 0, Block::Bedrock);
    }
}

impl ChunkGenerator for SimplexOctaveGenerator {
    fn kind(&self) -> GeneratorKind {
        if self.carve_3d {
            GeneratorKind::SimplexOctave3d
        } else {
            GeneratorKind::SimplexOctave
        }
    }

    fn generate_with_debug(
        &self,
        seed: i64,
        chunk_x: i32,
        chunk_z: i32,
        _debug: Option<&mut DebugMaps>,
    ) -> ChunkData {
        let c = &self.config;
        let noise = OctaveNoise::new(seed, c.octaves, c.scale, c.frequency, c.amplitude);
        let mut chunk = ChunkData::new();
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let world_x = chunk_x * CHUNK_WIDTH as i32 + x as i32;
                let world_z = chunk_z * CHUNK_WIDTH as i32 + z as i32;
                self.build_column(
                    &noise,
                    chunk.column_mut(x, z),
                    world_x as f64,
                    world_z as f64,
                );
            }
        }
        chunk
    }
}

//! Per-column block and biome rules of the composed generator.
//!
//! A column is classified into a band (water, flat, mountain) from its
//! height field, filled accordingly, then decorated by the overlay passes.

use rand::Rng;
use strata_voxel::{Biome, Block, DyeColor, SEA_LEVEL, WORLD_HEIGHT};

use crate::height_field::HeightField;
use crate::math::rescale;
use crate::noise_layer::NoiseLayerSampler;
use crate::seed::column_rng;

/// Columns whose surface is at or below this are underwater or beach.
pub const WATER_BAND_TOP: i32 = 63;
/// Lowest surface that still counts as beach rather than sea floor.
pub const BEACH_MIN_HEIGHT: i32 = 60;
/// Columns rising less than this above their minimum height are flat.
pub const FLAT_HEIGHT_DIFFERENCE: i32 = 10;
/// Thickness of the surface layer (sand, gravel, or grass and dirt).
pub const SURFACE_DEPTH: i32 = 4;
/// Vertical reach of flying hills above the surface.
pub const FLYING_HILLS_SPAN: i32 = 50;
/// Flying hill blocks below this offset are stone, the rest dirt.
pub const FLYING_HILLS_STONE_SPAN: i32 = 48;
/// Height at which the wool overlay is placed.
pub const CEILING_Y: i32 = WORLD_HEIGHT as i32 - 1;

/// Terrain class of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Water,
    Flat,
    Mountain,
}

impl Band {
    pub fn classify(field: &HeightField) -> Self {
        if field.final_height <= WATER_BAND_TOP {
            Band::Water
        } else if field.height_difference() < FLAT_HEIGHT_DIFFERENCE {
            Band::Flat
        } else {
            Band::Mountain
        }
    }
}

/// Beach above 60, otherwise an ocean picked by temperature.
pub fn water_biome(final_height: i32, temperature: f64) -> Biome {
    if final_height >= BEACH_MIN_HEIGHT {
        if temperature > 0.5 {
            Biome::Beach
        } else {
            Biome::SnowyBeach
        }
    } else if temperature > 0.7 {
        Biome::Ocean
    } else if temperature > 0.3 {
        Biome::ColdOcean
    } else {
        Biome::FrozenOcean
    }
}

pub fn flat_biome(temperature: f64) -> Biome {
    match temperature {
        t if t > 0.75 => Biome::GiantSpruceTaiga,
        t if t > 0.5 => Biome::Taiga,
        t if t > 0.25 => Biome::SnowyTaiga,
        _ => Biome::SnowyTundra,
    }
}

pub fn mountain_biome(temperature: f64) -> Biome {
    match temperature {
        t if t > 0.75 => Biome::Mountains,
        t if t > 0.5 => Biome::WoodedMountains,
        t if t > 0.25 => Biome::SnowyTaigaMountains,
        _ => Biome::SnowyMountains,
    }
}

/// Overlay values for one column, read from image maps by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub biome: Option<Biome>,
    pub wool: Option<DyeColor>,
}

/// What a built column reports back besides its blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnOutcome {
    pub biome: Biome,
    pub band: Band,
    /// Flying-hills noise, when that feature is enabled.
    pub flying_hills_noise: Option<f64>,
}

/// Fills columns from height fields.
#[derive(Clone, Debug)]
pub struct ChunkTerrainBuilder {
    seed: i64,
    flying_hills: Option<NoiseLayerSampler>,
}

impl ChunkTerrainBuilder {
    pub fn new(seed: i64, flying_hills: Option<NoiseLayerSampler>) -> Self {
        Self { seed, flying_hills }
    }

    /// Build one column into `blocks` (indexed by y, `WORLD_HEIGHT` long).
    pub fn build_column(
        &self,
        blocks: &mut [Block],
        world_x: i32,
        world_z: i32,
        field: &HeightField,
        overrides: ColumnOverrides,
        temperature: f64,
    ) -> ColumnOutcome {
        let top = field.final_height;
        let surface_bottom = top - SURFACE_DEPTH;
        let band = Band::classify(field);

        let mut biome = match band {
            Band::Water => {
                let biome = water_biome(top, temperature);
                let cover = if top >= BEACH_MIN_HEIGHT {
                    Block::Sand
                } else {
                    Block::Gravel
                };
                fill(blocks, surface_bottom + 1..=top, cover);
                fill(blocks, 1..=surface_bottom, Block::Stone);
                fill(blocks, top + 1..=SEA_LEVEL, Block::Water);
                biome
            }
            Band::Flat => {
                put(blocks, top, Block::GrassBlock);
                fill(blocks, surface_bottom + 1..=top - 1, Block::Dirt);
                fill(blocks, 1..=surface_bottom, Block::Stone);
                flat_biome(temperature)
            }
            Band::Mountain => {
                // One draw per column decides the whole cap.
                let draw: f64 = column_rng(self.seed, world_x, world_z).random();
                for y in surface_bottom + 1..=top {
                    let block = if draw > 0.5 {
                        if y == top {
                            Block::GrassBlock
                        } else {
                            Block::Dirt
                        }
                    } else if draw > 0.25 {
                        Block::Gravel
                    } else {
                        Block::Stone
                    };
                    put(blocks, y, block);
                }
                fill(blocks, 1..=surface_bottom, Block::Stone);
                mountain_biome(temperature)
            }
        };

        let flying_hills_noise = self.flying_hills.as_ref().map(|sampler| {
            let noise = sampler.sample(world_x as f64, world_z as f64);
            place_flying_hills(blocks, top, noise);
            noise
        });

        put(blocks, 0, Block::Bedrock);

        if let Some(dye) = overrides.wool {
            put(blocks, CEILING_Y, Block::Wool(dye));
        }
        if let Some(forced) = overrides.biome {
            biome = forced;
        }

        ColumnOutcome {
            biome,
            band,
            flying_hills_noise,
        }
    }

    /// Marker blocks only: glass at max, grass at final, stone at min.
    pub fn build_debug_column(&self, blocks: &mut [Block], field: &HeightField) {
        put(blocks, field.max_height, Block::Glass);
        put(blocks, field.final_height, Block::GrassBlock);
        put(blocks, field.min_height, Block::Stone);
        put(blocks, 0, Block::Bedrock);
    }
}

/// Floating terrain where `noise` beats a threshold that is low just above
/// the surface, peaks about a third of the way up, then dips again.
fn place_flying_hills(blocks: &mut [Block], surface: i32, noise: f64) {
    let top = surface + FLYING_HILLS_SPAN;
    for y in surface..top {
        let fraction = rescale(y as f64, surface as f64, top as f64, 0.0, 1.0);
        let l = 1.25 * fraction - 1.0;
        let threshold = 2.0 * (0.25 + l * l * l + l * l);
        if noise > threshold {
            let block = if y < surface + FLYING_HILLS_STONE_SPAN {
                Block::Stone
            } else {
                Block::Dirt
            };
            put(blocks, y, block);
        }
    }
}

/// Set `blocks[y]`, ignoring heights outside the column.
#[inline]
pub(crate) fn put(blocks: &mut [Block], y: i32, block: Block) {
    if let Some(slot) = usize::try_from(y).ok().and_then(|y| blocks.get_mut(y)) {
        *slot = block;
    }
}

/// `blocks[y]`, or air outside the column.
#[inline]
pub(crate) fn block_at(blocks: &[Block], y: i32) -> Block {
    usize::try_from(y)
        .ok()
        .and_then(|y| blocks.get(y))
        .copied()
        .unwrap_or(Block::Air)
}

pub(crate) fn fill(blocks: &mut [Block], range: std::ops::RangeInclusive<i32>, block: Block) {
    for y in range {
        put(blocks, y, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height_field::LayerNoise;
    use crate::noise_layer::NoiseLayerConfig;

    fn field(min: i32, max: i32, fin: i32) -> HeightField {
        HeightField {
            min_height: min,
            max_height: max,
            final_height: fin,
            noise: LayerNoise::default(),
        }
    }

    fn column() -> Vec<Block> {
        vec![Block::Air; WORLD_HEIGHT]
    }

    fn build(field: &HeightField, temperature: f64) -> (Vec<Block>, ColumnOutcome) {
        let builder = ChunkTerrainBuilder::new(42, None);
        let mut blocks = column();
        let outcome =
            builder.build_column(&mut blocks, 3, 4, field, ColumnOverrides::default(), temperature);
        (blocks, outcome)
    }

    #[test]
    fn test_water_column_at_fifty() {
        let (blocks, outcome) = build(&field(40, 64, 50), 0.8);
        assert_eq!(outcome.band, Band::Water);
        assert_eq!(outcome.biome, Biome::Ocean);
        assert_eq!(blocks[0], Block::Bedrock);
        assert!(blocks[1..=46].iter().all(|b| *b == Block::Stone));
        assert!(blocks[47..=50].iter().all(|b| *b == Block::Gravel));
        assert!(blocks[51..=62].iter().all(|b| *b == Block::Water));
        assert!(blocks[63..].iter().all(|b| b.is_air()));
    }

    #[test]
    fn test_ocean_biome_by_temperature() {
        assert_eq!(build(&field(40, 64, 50), 0.5).1.biome, Biome::ColdOcean);
        assert_eq!(build(&field(40, 64, 50), 0.2).1.biome, Biome::FrozenOcean);
        assert_eq!(build(&field(40, 64, 50), 0.7).1.biome, Biome::ColdOcean);
    }

    #[test]
    fn test_beach_column() {
        let (blocks, outcome) = build(&field(55, 64, 61), 0.6);
        assert_eq!(outcome.biome, Biome::Beach);
        assert!(blocks[58..=61].iter().all(|b| *b == Block::Sand));
        assert_eq!(blocks[57], Block::Stone);
        assert_eq!(blocks[62], Block::Water);
        assert!(blocks[63].is_air());
        assert_eq!(build(&field(55, 64, 61), 0.4).1.biome, Biome::SnowyBeach);
    }

    #[test]
    fn test_surface_at_sixty_three_has_no_water() {
        let (blocks, outcome) = build(&field(60, 70, 63), 0.9);
        assert_eq!(outcome.band, Band::Water);
        assert_eq!(blocks[63], Block::Sand);
        assert!(!blocks.contains(&Block::Water));
    }

    #[test]
    fn test_flat_warm_column() {
        let (blocks, outcome) = build(&field(70, 120, 75), 0.8);
        assert_eq!(outcome.band, Band::Flat);
        assert_eq!(outcome.biome, Biome::GiantSpruceTaiga);
        assert_eq!(blocks[75], Block::GrassBlock);
        assert!(blocks[72..=74].iter().all(|b| *b == Block::Dirt));
        assert!(blocks[1..=71].iter().all(|b| *b == Block::Stone));
        assert_eq!(blocks[0], Block::Bedrock);
        assert!(blocks[76..].iter().all(|b| b.is_air()));
    }

    #[test]
    fn test_flat_biome_thresholds() {
        assert_eq!(flat_biome(0.76), Biome::GiantSpruceTaiga);
        assert_eq!(flat_biome(0.75), Biome::Taiga);
        assert_eq!(flat_biome(0.5), Biome::SnowyTaiga);
        assert_eq!(flat_biome(0.25), Biome::SnowyTundra);
    }

    #[test]
    fn test_mountain_column_cap_is_uniform() {
        let (blocks, outcome) = build(&field(70, 200, 150), 0.6);
        assert_eq!(outcome.band, Band::Mountain);
        assert_eq!(outcome.biome, Biome::WoodedMountains);
        let cap = &blocks[147..=150];
        let uniform = match cap[3] {
            Block::GrassBlock => cap[..3].iter().all(|b| *b == Block::Dirt),
            Block::Gravel | Block::Stone => cap.iter().all(|b| *b == cap[3]),
            other => panic!("unexpected cap block {other:?}"),
        };
        assert!(uniform, "cap {cap:?}");
        assert!(blocks[1..=146].iter().all(|b| *b == Block::Stone));
    }

    #[test]
    fn test_mountain_cap_reproducible() {
        let f = field(70, 200, 150);
        assert_eq!(build(&f, 0.9).0, build(&f, 0.9).0);
    }

    #[test]
    fn test_overrides_apply() {
        let builder = ChunkTerrainBuilder::new(1, None);
        let mut blocks = column();
        let overrides = ColumnOverrides {
            biome: Some(Biome::Desert),
            wool: Some(DyeColor::Lime),
        };
        let outcome = builder.build_column(&mut blocks, 0, 0, &field(70, 90, 72), overrides, 0.8);
        assert_eq!(outcome.biome, Biome::Desert);
        assert_eq!(blocks[255], Block::Wool(DyeColor::Lime));
    }

    #[test]
    fn test_flying_hills_follow_threshold_curve() {
        // Noise at the origin is 0.5 before the exponent, so sqrt(0.5) after.
        let sampler = NoiseLayerSampler::new(NoiseLayerConfig::single(0.01, 0.5, 0.0), 9);
        let builder = ChunkTerrainBuilder::new(9, Some(sampler));
        let mut blocks = column();
        let outcome = builder.build_column(
            &mut blocks,
            0,
            0,
            &field(95, 110, 100),
            ColumnOverrides::default(),
            0.8,
        );
        let noise = outcome.flying_hills_noise.unwrap();
        assert!((noise - 0.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(blocks[100], Block::Stone); // threshold 0.5 at the surface
        assert!(blocks[120].is_air()); // threshold peaks near 0.8
        assert_eq!(blocks[140], Block::Stone); // dips back to 0.5
        assert_eq!(blocks[148], Block::Dirt);
        assert_eq!(blocks[149], Block::Dirt);
        assert!(blocks[150].is_air());
    }

    #[test]
    fn test_debug_column_markers() {
        let builder = ChunkTerrainBuilder::new(0, None);
        let mut blocks = column();
        builder.build_debug_column(&mut blocks, &field(60, 180, 100));
        assert_eq!(blocks[180], Block::Glass);
        assert_eq!(blocks[100], Block::GrassBlock);
        assert_eq!(blocks[60], Block::Stone);
        assert_eq!(blocks[0], Block::Bedrock);
        assert_eq!(blocks.iter().filter(|b| !b.is_air()).count(), 4);
    }
}

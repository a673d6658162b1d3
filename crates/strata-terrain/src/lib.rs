//! Procedural terrain generation: layered simplex noise, composed height
//! fields, image overlays, generator variants and a region worker pool.

mod column;
mod debug_maps;
mod generators;
mod height_field;
mod image_map;
mod noise_layer;
mod overlays;
mod region;

pub mod math;
pub mod seed;

pub use column::{
    BEACH_MIN_HEIGHT, Band, CEILING_Y, ChunkTerrainBuilder, ColumnOutcome, ColumnOverrides,
    FLAT_HEIGHT_DIFFERENCE, FLYING_HILLS_SPAN, FLYING_HILLS_STONE_SPAN, SURFACE_DEPTH,
    WATER_BAND_TOP, flat_biome, mountain_biome, water_biome,
};
pub use debug_maps::{DEBUG_MAP_FILES, DebugMaps};
pub use generators::{
    ChunkGenerator, ComposedGenerator, GeneratorKind, MinimalGenerator, OctaveNoise,
    SimplexNoiseGenerator, SimplexOctaveGenerator, TEMPERATURE_FLOOR, build_generator,
    generate_and_hash, generator_from_config,
};
pub use height_field::{
    BASE_MIN_CEILING, BASE_MIN_HEIGHT, COAST_HEIGHT, HeightField, HeightFieldComposer,
    LAND_MIN_RISE, LayerNoise, MAX_TERRAIN_HEIGHT, OCEAN_MAX_HEIGHT, OCEAN_MIN_DROP,
};
pub use image_map::{
    BiomeColorTable, BiomeMap, DyeColorMap, GreyscaleMap, ImageMap, ImageMapError, OUT_OF_BOUNDS,
};
pub use noise_layer::{NoiseLayerConfig, NoiseLayerSampler};
pub use overlays::OverlayMaps;
pub use region::{
    GeneratedChunk, GenerationTask, RegionGenerator, RegionOutput, default_thread_count,
    generate_region, region_tasks,
};

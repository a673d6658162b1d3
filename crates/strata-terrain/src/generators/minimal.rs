use strata_voxel::ChunkData;

use super::{ChunkGenerator, GeneratorKind};
use crate::debug_maps::DebugMaps;

/// Generates nothing: every chunk is air with the default biome.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimalGenerator;

impl ChunkGenerator for MinimalGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Minimal
    }

    fn generate_with_debug(
        &self,
        _seed: i64,
        _chunk_x: i32,
        _chunk_z: i32,
        _debug: Option<&mut DebugMaps>,
    ) -> ChunkData {
        ChunkData::new()
    }
}

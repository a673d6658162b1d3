//! Dense chunk storage: a 16×16 grid of 256-block columns plus one biome per column.
//!
//! Columns are stored contiguously (y varies fastest) so a generator can fill a
//! whole column through one slice. Writes outside the vertical range are
//! ignored rather than rejected, so terrain rules can compute `height + n`
//! freely near the ceiling.

use crate::biome::Biome;
use crate::block::Block;

/// Horizontal side length of a chunk in blocks.
pub const CHUNK_WIDTH: usize = 16;

/// Vertical extent of every column.
pub const WORLD_HEIGHT: usize = 256;

/// Number of columns in a chunk.
pub const COLUMN_COUNT: usize = CHUNK_WIDTH * CHUNK_WIDTH;

/// Highest y filled with water in oceans.
pub const SEA_LEVEL: i32 = 62;

/// Generated terrain for one chunk.
///
/// Owned by the generation call that produced it and then handed to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkData {
    /// `COLUMN_COUNT * WORLD_HEIGHT` blocks, column-major.
    blocks: Vec<Block>,
    /// One biome per column, indexed `z * 16 + x`.
    biomes: Vec<Biome>,
}

impl ChunkData {
    /// Creates an all-air chunk with the default biome.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::Air; COLUMN_COUNT * WORLD_HEIGHT],
            biomes: vec![Biome::default(); COLUMN_COUNT],
        }
    }

    /// Returns the block at `(x, y, z)`. Out-of-range `y` reads as air.
    ///
    /// `x` and `z` must be in `0..16`.
    pub fn get(&self, x: usize, y: i32, z: usize) -> Block {
        match Self::height_index(y) {
            Some(y) => self.blocks[Self::column_start(x, z) + y],
            None => Block::Air,
        }
    }

    /// Sets the block at `(x, y, z)`. Out-of-range `y` is a no-op.
    pub fn set(&mut self, x: usize, y: i32, z: usize, block: Block) {
        if let Some(y) = Self::height_index(y) {
            let start = Self::column_start(x, z);
            self.blocks[start + y] = block;
        }
    }

    /// Read-only view of one column, bottom to top.
    pub fn column(&self, x: usize, z: usize) -> &[Block] {
        let start = Self::column_start(x, z);
        &self.blocks[start..start + WORLD_HEIGHT]
    }

    /// Mutable view of one column, bottom to top.
    pub fn column_mut(&mut self, x: usize, z: usize) -> &mut [Block] {
        let start = Self::column_start(x, z);
        &mut self.blocks[start..start + WORLD_HEIGHT]
    }

    /// Biome of column `(x, z)`.
    pub fn biome(&self, x: usize, z: usize) -> Biome {
        self.biomes[Self::column_index(x, z)]
    }

    /// Assigns the biome of column `(x, z)` for its full height.
    pub fn set_biome(&mut self, x: usize, z: usize, biome: Biome) {
        self.biomes[Self::column_index(x, z)] = biome;
    }

    /// Y of the highest non-air block in the column, if any.
    pub fn highest_block(&self, x: usize, z: usize) -> Option<i32> {
        self.column(x, z)
            .iter()
            .rposition(|block| !block.is_air())
            .map(|y| y as i32)
    }

    /// Serializes block ids (little-endian `u16`) followed by biome ids.
    ///
    /// Two chunks are byte-identical exactly when their encodings match.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.blocks.len() * 2 + self.biomes.len());
        for block in &self.blocks {
            bytes.extend_from_slice(&block.id().to_le_bytes());
        }
        bytes.extend(self.biomes.iter().map(|biome| biome.id()));
        bytes
    }

    /// Content digest for determinism checks: 64-bit FNV-1a over
    /// [`to_bytes`](Self::to_bytes). Stable across builds and platforms.
    pub fn content_hash(&self) -> u64 {
        fnv1a_64(&self.to_bytes())
    }

    fn height_index(y: i32) -> Option<usize> {
        usize::try_from(y).ok().filter(|&y| y < WORLD_HEIGHT)
    }

    fn column_index(x: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_WIDTH && z < CHUNK_WIDTH);
        z * CHUNK_WIDTH + x
    }

    fn column_start(x: usize, z: usize) -> usize {
        Self::column_index(x, z) * WORLD_HEIGHT
    }
}

impl Default for ChunkData {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, &byte| (hash ^ byte as u64).wrapping_mul(PRIME))
}

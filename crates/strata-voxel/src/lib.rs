//! Block and biome types plus the fixed-size chunk grid handed to the host.

pub mod biome;
pub mod block;
pub mod chunk;

pub use biome::{Biome, UnknownBiome};
pub use block::{Block, DyeColor};
pub use chunk::{CHUNK_WIDTH, COLUMN_COUNT, ChunkData, SEA_LEVEL, WORLD_HEIGHT};

//! Externally authored override maps and blank debug capture maps.
//!
//! An [`ImageMap`] is a coordinate-indexed colour grid with a world offset.
//! The views in this module give it meaning: greyscale factors, biomes by
//! colour table, or wool dye colours. None of them know about terrain.

mod map;
mod views;

pub use map::{ImageMap, ImageMapError, OUT_OF_BOUNDS};
pub use views::{BiomeColorTable, BiomeMap, DyeColorMap, GreyscaleMap};

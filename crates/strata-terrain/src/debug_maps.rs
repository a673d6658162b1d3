//! Debug capture of internal height-field values into images.
//!
//! Every worker thread fills its own [`DebugMaps`] shard; shards are merged
//! into one set when the run finishes and then written as PNGs.

use std::path::Path;

use image::Rgb;
use strata_config::{ConfigError, ImageMapsConfig};
use tracing::info;

use crate::height_field::HeightField;
use crate::image_map::{ImageMap, ImageMapError};

/// File names written by [`DebugMaps::save_debug_maps`], in capture order.
pub const DEBUG_MAP_FILES: [&str; 5] = [
    "debug_map_max_height.png",
    "debug_map_final_height.png",
    "debug_map_min_height.png",
    "debug_map_continent.png",
    "debug_map_flying_hills.png",
];

/// The five capture maps of the composed generator.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugMaps {
    pub max_height: ImageMap,
    pub final_height: ImageMap,
    pub min_height: ImageMap,
    pub continent: ImageMap,
    pub flying_hills: ImageMap,
}

impl DebugMaps {
    /// Blank maps covering `width × height` columns from the offset.
    pub fn new(width: u32, height: u32, x_offset: i32, z_offset: i32) -> Self {
        let blank = || ImageMap::blank(width, height, x_offset, z_offset);
        Self {
            max_height: blank(),
            final_height: blank(),
            min_height: blank(),
            continent: blank(),
            flying_hills: blank(),
        }
    }

    /// Maps requested by config, or `None` when capture is off.
    pub fn from_config(config: Option<&ImageMapsConfig>) -> Result<Option<Self>, ConfigError> {
        let Some(config) = config.filter(|c| c.draw_debug_maps) else {
            return Ok(None);
        };
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::InvalidMapSize {
                width: config.width,
                height: config.height,
            });
        }
        Ok(Some(Self::new(
            config.width,
            config.height,
            config.offset.x,
            config.offset.z,
        )))
    }

    /// Blank maps with the same size and offset, for another worker.
    pub fn empty_shard(&self) -> Self {
        let (x, z) = self.max_height.offset();
        Self::new(self.max_height.width(), self.max_height.height(), x, z)
    }

    /// Record one column's heights and continent value.
    pub fn record_height_field(&mut self, world_x: i32, world_z: i32, field: &HeightField) {
        self.max_height
            .set_pixel_at_world(world_x, world_z, Rgb([0, 0, channel(field.max_height)]));
        self.final_height
            .set_pixel_at_world(world_x, world_z, Rgb([0, channel(field.final_height), 0]));
        self.min_height
            .set_pixel_at_world(world_x, world_z, Rgb([channel(field.min_height), 0, 0]));
        self.continent
            .set_pixel_at_world(world_x, world_z, grey(field.noise.continent));
    }

    /// Record one column's flying-hills noise.
    pub fn record_flying_hills(&mut self, world_x: i32, world_z: i32, noise: f64) {
        self.flying_hills
            .set_pixel_at_world(world_x, world_z, grey(noise));
    }

    /// Fold another shard into this one.
    pub fn merge(&mut self, other: &DebugMaps) {
        self.max_height.merge(&other.max_height);
        self.final_height.merge(&other.final_height);
        self.min_height.merge(&other.min_height);
        self.continent.merge(&other.continent);
        self.flying_hills.merge(&other.flying_hills);
    }

    /// Write one PNG per captured field into `dir`.
    pub fn save_debug_maps(&self, dir: &Path) -> Result<(), ImageMapError> {
        let maps = [
            &self.max_height,
            &self.final_height,
            &self.min_height,
            &self.continent,
            &self.flying_hills,
        ];
        for (map, name) in maps.into_iter().zip(DEBUG_MAP_FILES) {
            map.save(&dir.join(name))?;
        }
        info!("Saved {} debug maps to {}", maps.len(), dir.display());
        Ok(())
    }
}

fn channel(height: i32) -> u8 {
    height.clamp(0, 255) as u8
}

fn grey(value: f64) -> Rgb<u8> {
    let v = libm::floor(value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    Rgb([v, v, v])
}

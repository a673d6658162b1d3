//! Image overlays loaded once from configuration.

use std::path::{Path, PathBuf};

use strata_config::ImageMapsConfig;
use strata_voxel::{Biome, DyeColor};
use tracing::{info, warn};

use crate::image_map::{BiomeColorTable, BiomeMap, DyeColorMap, GreyscaleMap, ImageMap};

/// The optional override maps shared by the overlay-aware generators.
///
/// A map that failed to load is simply absent; generation then behaves as
/// if it had never been configured.
#[derive(Clone, Debug, Default)]
pub struct OverlayMaps {
    pub amplitude: Option<GreyscaleMap>,
    pub minimum_height: Option<GreyscaleMap>,
    pub wool: Option<DyeColorMap>,
    pub biomes: Option<BiomeMap>,
}

impl OverlayMaps {
    /// No overlays at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Load every configured map. Relative paths resolve against `base_dir`.
    pub fn from_config(
        config: Option<&ImageMapsConfig>,
        biome_colors: &BiomeColorTable,
        base_dir: &Path,
    ) -> Self {
        let Some(config) = config else {
            return Self::none();
        };
        let (x, z) = (config.offset.x, config.offset.z);
        let load = |kind: &str, path: &Option<PathBuf>| -> Option<ImageMap> {
            let path = path.as_ref()?;
            let resolved = if path.is_absolute() {
                path.clone()
            } else {
                base_dir.join(path)
            };
            match ImageMap::load(&resolved, x, z) {
                Ok(map) => {
                    info!(
                        "Loaded {kind} map {} ({}x{})",
                        resolved.display(),
                        map.width(),
                        map.height()
                    );
                    Some(map)
                }
                Err(e) => {
                    warn!("Ignoring {kind} map: {e}");
                    None
                }
            }
        };

        Self {
            amplitude: load("amplitude", &config.amplitude).map(GreyscaleMap),
            minimum_height: load("minimum height", &config.minimum_height).map(GreyscaleMap),
            wool: load("wool", &config.wool).map(DyeColorMap),
            biomes: load("biome", &config.biomes)
                .map(|map| BiomeMap::new(map, biome_colors.clone())),
        }
    }

    /// Terrain amplitude factor in `[0.75, 1.5]`, or 1 without a map.
    pub fn amplitude_modifier(&self, world_x: i32, world_z: i32) -> f64 {
        self.amplitude.as_ref().map_or(1.0, |map| {
            0.75 * map.value_at_world(world_x, world_z) + 0.75
        })
    }

    /// Minimum height factor in `[0.8, 1.2]`, or 1 without a map.
    pub fn height_modifier(&self, world_x: i32, world_z: i32) -> f64 {
        self.minimum_height.as_ref().map_or(1.0, |map| {
            0.4 * map.value_at_world(world_x, world_z) + 0.8
        })
    }

    pub fn biome_override(&self, world_x: i32, world_z: i32) -> Option<Biome> {
        self.biomes.as_ref()?.biome_at_world(world_x, world_z)
    }

    pub fn wool(&self, world_x: i32, world_z: i32) -> Option<DyeColor> {
        self.wool.as_ref()?.dye_at_world(world_x, world_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_no_config_means_neutral_modifiers() {
        let overlays = OverlayMaps::from_config(None, &BiomeColorTable::default(), Path::new("."));
        assert_eq!(overlays.amplitude_modifier(5, 5), 1.0);
        assert_eq!(overlays.height_modifier(5, 5), 1.0);
        assert_eq!(overlays.biome_override(5, 5), None);
        assert_eq!(overlays.wool(5, 5), None);
    }

    #[test]
    fn test_missing_file_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let config = ImageMapsConfig {
            amplitude: Some(PathBuf::from("does_not_exist.png")),
            ..ImageMapsConfig::default()
        };
        let overlays =
            OverlayMaps::from_config(Some(&config), &BiomeColorTable::default(), dir.path());
        assert!(overlays.amplitude.is_none());
        assert_eq!(overlays.amplitude_modifier(0, 0), 1.0);
    }

    #[test]
    fn test_loads_relative_paths_with_offset() {
        let dir = tempfile::tempdir().unwrap();
        let mut grey = ImageMap::blank(4, 4, 0, 0);
        grey.set_pixel(1, 2, Rgb([255, 255, 255]));
        grey.save(&dir.path().join("amp.png")).unwrap();

        let mut wool = ImageMap::blank(4, 4, 0, 0);
        wool.set_pixel(0, 0, Rgb(DyeColor::Blue.rgb()));
        wool.save(&dir.path().join("wool.png")).unwrap();

        let config = ImageMapsConfig {
            offset: strata_config::MapOffset { x: 10, z: 10 },
            amplitude: Some(PathBuf::from("amp.png")),
            minimum_height: Some(PathBuf::from("amp.png")),
            wool: Some(PathBuf::from("wool.png")),
            ..ImageMapsConfig::default()
        };
        let overlays =
            OverlayMaps::from_config(Some(&config), &BiomeColorTable::default(), dir.path());
        assert!((overlays.amplitude_modifier(11, 12) - 1.5).abs() < 1e-12);
        assert!((overlays.amplitude_modifier(10, 10) - 0.75).abs() < 1e-12);
        assert!((overlays.height_modifier(11, 12) - 1.2).abs() < 1e-12);
        assert_eq!(overlays.wool(10, 10), Some(DyeColor::Blue));
        assert_eq!(overlays.wool(11, 10), None);
    }
}

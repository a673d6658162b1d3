//! Typed interpretations of an [`ImageMap`].

use hashbrown::HashMap;
use image::Rgb;
use strata_config::{BiomeColorConfig, ConfigError};
use strata_voxel::{Biome, DyeColor};

use super::map::ImageMap;

/// Reads a map as greyscale factors in `[0, 1]`.
///
/// Pure black and every non-grey colour read as 0, so an unpainted or
/// mis-painted area never scales anything up.
#[derive(Clone, Debug)]
pub struct GreyscaleMap(pub ImageMap);

impl GreyscaleMap {
    /// Convert a colour to its greyscale factor.
    pub fn greyscale(color: Rgb<u8>) -> f64 {
        let Rgb([r, g, b]) = color;
        if r != g || r != b {
            return 0.0;
        }
        // Black falls out as 0 here.
        r as f64 / 255.0
    }

    pub fn value(&self, x: i32, y: i32) -> f64 {
        Self::greyscale(self.0.pixel(x, y))
    }

    pub fn value_at_world(&self, world_x: i32, world_z: i32) -> f64 {
        Self::greyscale(self.0.pixel_at_world(world_x, world_z))
    }
}

/// Exact colour to biome lookup, validated when built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiomeColorTable {
    colors: HashMap<[u8; 3], Biome>,
}

impl BiomeColorTable {
    /// Parse `#RRGGBB` (or `0xRRGGBB`) keys and biome names.
    pub fn from_config(config: &BiomeColorConfig) -> Result<Self, ConfigError> {
        let mut colors = HashMap::with_capacity(config.len());
        for (color, name) in config {
            let rgb = parse_hex_color(color)?;
            let biome = name.parse::<Biome>().map_err(|_| ConfigError::UnknownBiome {
                color: color.clone(),
                name: name.clone(),
            })?;
            colors.insert(rgb, biome);
        }
        Ok(Self { colors })
    }

    pub fn insert(&mut self, color: [u8; 3], biome: Biome) {
        self.colors.insert(color, biome);
    }

    pub fn get(&self, color: Rgb<u8>) -> Option<Biome> {
        self.colors.get(&color.0).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

fn parse_hex_color(text: &str) -> Result<[u8; 3], ConfigError> {
    let invalid = || ConfigError::InvalidColor(text.to_string());
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(invalid)?;
    if digits.len() != 6 {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    Ok([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

/// Reads a map as biome overrides. Unmapped colours mean "no override".
#[derive(Clone, Debug)]
pub struct BiomeMap {
    map: ImageMap,
    table: BiomeColorTable,
}

impl BiomeMap {
    pub fn new(map: ImageMap, table: BiomeColorTable) -> Self {
        Self { map, table }
    }

    pub fn biome(&self, x: i32, y: i32) -> Option<Biome> {
        self.table.get(self.map.pixel(x, y))
    }

    pub fn biome_at_world(&self, world_x: i32, world_z: i32) -> Option<Biome> {
        self.table.get(self.map.pixel_at_world(world_x, world_z))
    }
}

/// Reads a map as wool dye colours; only the 16 exact dye colours match.
#[derive(Clone, Debug)]
pub struct DyeColorMap(pub ImageMap);

impl DyeColorMap {
    pub fn dye(&self, x: i32, y: i32) -> Option<DyeColor> {
        DyeColor::from_rgb(self.0.pixel(x, y).0)
    }

    pub fn dye_at_world(&self, world_x: i32, world_z: i32) -> Option<DyeColor> {
        DyeColor::from_rgb(self.0.pixel_at_world(world_x, world_z).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> BiomeColorConfig {
        entries
            .iter()
            .map(|(c, b)| (c.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_greyscale_rules() {
        assert_eq!(GreyscaleMap::greyscale(Rgb([0, 0, 0])), 0.0);
        assert_eq!(GreyscaleMap::greyscale(Rgb([255, 255, 255])), 1.0);
        assert_eq!(GreyscaleMap::greyscale(Rgb([51, 51, 51])), 0.2);
        assert_eq!(GreyscaleMap::greyscale(Rgb([200, 10, 10])), 0.0);
        assert_eq!(GreyscaleMap::greyscale(Rgb([10, 10, 11])), 0.0);
    }

    #[test]
    fn test_greyscale_map_out_of_bounds_is_zero() {
        let mut map = ImageMap::blank(2, 2, 0, 0);
        map.set_pixel(0, 0, Rgb([102, 102, 102]));
        let grey = GreyscaleMap(map);
        assert!((grey.value_at_world(0, 0) - 0.4).abs() < 1e-12);
        assert_eq!(grey.value_at_world(9, 9), 0.0);
    }

    #[test]
    fn test_biome_table_parses_hex() {
        let parsed = BiomeColorTable::from_config(&table(&[
            ("#00FF00", "plains"),
            ("0x0000ff", "OCEAN"),
        ]))
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(Rgb([0, 255, 0])), Some(Biome::Plains));
        assert_eq!(parsed.get(Rgb([0, 0, 255])), Some(Biome::Ocean));
        assert_eq!(parsed.get(Rgb([1, 1, 1])), None);
    }

    #[test]
    fn test_biome_table_rejects_unknown_biome() {
        let err = BiomeColorTable::from_config(&table(&[("#123456", "lava_lake")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBiome { ref name, .. } if name == "lava_lake"));
    }

    #[test]
    fn test_biome_table_rejects_bad_colour() {
        for color in ["123456", "#12345", "#GGGGGG", "#1234567"] {
            let err = BiomeColorTable::from_config(&table(&[(color, "plains")])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidColor(_)), "{color}");
        }
    }

    #[test]
    fn test_biome_map_lookup() {
        let mut map = ImageMap::blank(4, 4, 10, 10);
        map.set_pixel(1, 2, Rgb([0, 255, 0]));
        let mut colors = BiomeColorTable::default();
        colors.insert([0, 255, 0], Biome::Desert);
        let biomes = BiomeMap::new(map, colors);
        assert_eq!(biomes.biome_at_world(11, 12), Some(Biome::Desert));
        assert_eq!(biomes.biome(1, 2), Some(Biome::Desert));
        assert_eq!(biomes.biome_at_world(10, 10), None);
    }

    #[test]
    fn test_dye_map_exact_match_only() {
        let mut map = ImageMap::blank(2, 1, 0, 0);
        let red = DyeColor::Red.rgb();
        map.set_pixel(0, 0, Rgb(red));
        map.set_pixel(1, 0, Rgb([red[0].wrapping_add(1), red[1], red[2]]));
        let dyes = DyeColorMap(map);
        assert_eq!(dyes.dye(0, 0), Some(DyeColor::Red));
        assert_eq!(dyes.dye_at_world(1, 0), None);
    }
}

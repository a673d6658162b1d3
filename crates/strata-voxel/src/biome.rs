//! Biome assignments written into every chunk column.

use std::fmt;
use std::str::FromStr;

/// Biome of a chunk column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Biome {
    Ocean,
    DeepOcean,
    ColdOcean,
    FrozenOcean,
    LukewarmOcean,
    WarmOcean,
    River,
    Beach,
    SnowyBeach,
    StoneShore,
    #[default]
    Plains,
    Forest,
    BirchForest,
    DarkForest,
    Swamp,
    Desert,
    Savanna,
    Jungle,
    Badlands,
    Taiga,
    SnowyTaiga,
    GiantSpruceTaiga,
    SnowyTundra,
    Mountains,
    WoodedMountains,
    GravellyMountains,
    ModifiedGravellyMountains,
    MountainEdge,
    SnowyMountains,
    SnowyTaigaMountains,
    TaigaMountains,
}

/// Returned when a biome name does not match any [`Biome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown biome name: {0}")]
pub struct UnknownBiome(pub String);

impl Biome {
    /// Every biome, in id order.
    pub const ALL: [Biome; 31] = [
        Biome::Ocean,
        Biome::DeepOcean,
        Biome::ColdOcean,
        Biome::FrozenOcean,
        Biome::LukewarmOcean,
        Biome::WarmOcean,
        Biome::River,
        Biome::Beach,
        Biome::SnowyBeach,
        Biome::StoneShore,
        Biome::Plains,
        Biome::Forest,
        Biome::BirchForest,
        Biome::DarkForest,
        Biome::Swamp,
        Biome::Desert,
        Biome::Savanna,
        Biome::Jungle,
        Biome::Badlands,
        Biome::Taiga,
        Biome::SnowyTaiga,
        Biome::GiantSpruceTaiga,
        Biome::SnowyTundra,
        Biome::Mountains,
        Biome::WoodedMountains,
        Biome::GravellyMountains,
        Biome::ModifiedGravellyMountains,
        Biome::MountainEdge,
        Biome::SnowyMountains,
        Biome::SnowyTaigaMountains,
        Biome::TaigaMountains,
    ];

    /// Lowercase snake_case name, as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::DeepOcean => "deep_ocean",
            Biome::ColdOcean => "cold_ocean",
            Biome::FrozenOcean => "frozen_ocean",
            Biome::LukewarmOcean => "lukewarm_ocean",
            Biome::WarmOcean => "warm_ocean",
            Biome::River => "river",
            Biome::Beach => "beach",
            Biome::SnowyBeach => "snowy_beach",
            Biome::StoneShore => "stone_shore",
            Biome::Plains => "plains",
            Biome::Forest => "forest",
            Biome::BirchForest => "birch_forest",
            Biome::DarkForest => "dark_forest",
            Biome::Swamp => "swamp",
            Biome::Desert => "desert",
            Biome::Savanna => "savanna",
            Biome::Jungle => "jungle",
            Biome::Badlands => "badlands",
            Biome::Taiga => "taiga",
            Biome::SnowyTaiga => "snowy_taiga",
            Biome::GiantSpruceTaiga => "giant_spruce_taiga",
            Biome::SnowyTundra => "snowy_tundra",
            Biome::Mountains => "mountains",
            Biome::WoodedMountains => "wooded_mountains",
            Biome::GravellyMountains => "gravelly_mountains",
            Biome::ModifiedGravellyMountains => "modified_gravelly_mountains",
            Biome::MountainEdge => "mountain_edge",
            Biome::SnowyMountains => "snowy_mountains",
            Biome::SnowyTaigaMountains => "snowy_taiga_mountains",
            Biome::TaigaMountains => "taiga_mountains",
        }
    }

    /// Stable numeric id (index in [`Biome::ALL`]).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Ocean-family biomes, including beaches.
    pub fn is_watery(self) -> bool {
        matches!(
            self,
            Biome::Ocean
                | Biome::DeepOcean
                | Biome::ColdOcean
                | Biome::FrozenOcean
                | Biome::LukewarmOcean
                | Biome::WarmOcean
                | Biome::Beach
                | Biome::SnowyBeach
        )
    }

    /// Mountain-family biomes.
    pub fn is_mountainous(self) -> bool {
        matches!(
            self,
            Biome::Mountains
                | Biome::WoodedMountains
                | Biome::GravellyMountains
                | Biome::ModifiedGravellyMountains
                | Biome::MountainEdge
                | Biome::SnowyMountains
                | Biome::SnowyTaigaMountains
                | Biome::TaigaMountains
        )
    }
}

impl FromStr for Biome {
    type Err = UnknownBiome;

    /// Case-insensitive; accepts `snowy_taiga` as well as `SNOWY_TAIGA`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Biome::ALL
            .into_iter()
            .find(|biome| biome.name() == wanted)
            .ok_or_else(|| UnknownBiome(s.to_string()))
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Block types placed by the generators.
//!
//! Air is id 0 so that a freshly allocated chunk represents empty space.

/// The sixteen dye colours, used for the decorative wool overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DyeColor {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl DyeColor {
    /// Every dye colour in ordinal order.
    pub const ALL: [DyeColor; 16] = [
        DyeColor::White,
        DyeColor::Orange,
        DyeColor::Magenta,
        DyeColor::LightBlue,
        DyeColor::Yellow,
        DyeColor::Lime,
        DyeColor::Pink,
        DyeColor::Gray,
        DyeColor::LightGray,
        DyeColor::Cyan,
        DyeColor::Purple,
        DyeColor::Blue,
        DyeColor::Brown,
        DyeColor::Green,
        DyeColor::Red,
        DyeColor::Black,
    ];

    /// Canonical RGB value of this dye.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            DyeColor::White => [0xF9, 0xFF, 0xFE],
            DyeColor::Orange => [0xF9, 0x80, 0x1D],
            DyeColor::Magenta => [0xC7, 0x4E, 0xBD],
            DyeColor::LightBlue => [0x3A, 0xB3, 0xDA],
            DyeColor::Yellow => [0xFE, 0xD8, 0x3D],
            DyeColor::Lime => [0x80, 0xC7, 0x1F],
            DyeColor::Pink => [0xF3, 0x8B, 0xAA],
            DyeColor::Gray => [0x47, 0x4F, 0x52],
            DyeColor::LightGray => [0x9D, 0x9D, 0x97],
            DyeColor::Cyan => [0x16, 0x9C, 0x9C],
            DyeColor::Purple => [0x89, 0x32, 0xB8],
            DyeColor::Blue => [0x3C, 0x44, 0xAA],
            DyeColor::Brown => [0x83, 0x54, 0x32],
            DyeColor::Green => [0x5E, 0x7C, 0x16],
            DyeColor::Red => [0xB0, 0x2E, 0x26],
            DyeColor::Black => [0x1D, 0x1D, 0x21],
        }
    }

    /// Exact-match lookup. Anything that is not a canonical dye value is `None`.
    pub fn from_rgb(rgb: [u8; 3]) -> Option<DyeColor> {
        Self::ALL.into_iter().find(|dye| dye.rgb() == rgb)
    }

    /// Ordinal in [`DyeColor::ALL`].
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// A single block cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Block {
    #[default]
    Air,
    Stone,
    Dirt,
    GrassBlock,
    Gravel,
    Sand,
    Water,
    Bedrock,
    SnowBlock,
    /// Marker block used by the composed generator's debug mode.
    Glass,
    Wool(DyeColor),
}

impl Block {
    /// Stable numeric id. Wool colours occupy `64..80`.
    pub fn id(self) -> u16 {
        match self {
            Block::Air => 0,
            Block::Stone => 1,
            Block::Dirt => 2,
            Block::GrassBlock => 3,
            Block::Gravel => 4,
            Block::Sand => 5,
            Block::Water => 6,
            Block::Bedrock => 7,
            Block::SnowBlock => 8,
            Block::Glass => 9,
            Block::Wool(color) => 64 + color.ordinal() as u16,
        }
    }

    /// Returns `true` for air.
    pub fn is_air(self) -> bool {
        self == Block::Air
    }
}

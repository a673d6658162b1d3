//! Configuration error types.

/// Errors raised while loading, saving, or validating generator configuration.
///
/// All of these surface at configuration-load time. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A required configuration section is absent.
    #[error("missing required config section `{0}`")]
    MissingSection(String),

    /// A noise layer was configured without any frequency entries.
    #[error("`{0}` has an empty frequency list")]
    EmptyFrequencies(String),

    /// Parallel frequency and weight lists differ in length.
    #[error("`{section}` lists {frequencies} frequencies but {weights} weights")]
    MismatchedFrequencies {
        /// Section holding the lists.
        section: String,
        /// Number of frequency entries.
        frequencies: usize,
        /// Number of weight entries.
        weights: usize,
    },

    /// A `"freq:weight"` token could not be parsed.
    #[error("`{section}`: cannot parse frequency entry `{token}`")]
    InvalidFrequencyToken {
        /// Section holding the token.
        section: String,
        /// The offending token.
        token: String,
    },

    /// A layer weight is zero, negative, or not finite.
    #[error("`{section}`: weight {weight} for frequency {frequency} must be positive")]
    InvalidWeight {
        /// Section holding the weight.
        section: String,
        /// The frequency the weight belongs to.
        frequency: f64,
        /// The offending weight.
        weight: f64,
    },

    /// The layer weights sum to zero, so the weighted average is undefined.
    #[error("`{0}`: total layer weight is zero")]
    ZeroTotalWeight(String),

    /// A biome colour table entry names a biome that does not exist.
    #[error("unknown biome `{name}` for colour `{color}`")]
    UnknownBiome {
        /// Hex colour key of the entry.
        color: String,
        /// The unrecognized biome name.
        name: String,
    },

    /// A biome colour table key is not a `#RRGGBB` hex colour.
    #[error("invalid hex colour `{0}`")]
    InvalidColor(String),

    /// The requested generator id does not name a known generator.
    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),

    /// Debug capture maps were requested with a zero dimension.
    #[error("debug map size {width}x{height} is invalid")]
    InvalidMapSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

//! Multi-layer noise blending.
//!
//! A [`NoiseLayerSampler`] evaluates several frequencies of one simplex noise
//! primitive, averages them by weight into `[0, 1]`, then reshapes the result
//! with an exponent and an optional (staircase) sigmoid.

use noise::{NoiseFn, Simplex};
use strata_config::{ConfigError, NoiseLayerSection};

use crate::math::{sigmoid, staircase_sigmoid, unit_to_range};
use crate::seed::noise_seed;

/// Validated blend parameters for one noise layer.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseLayerConfig {
    /// `(frequency, weight)` pairs in configuration order. Weights are > 0.
    layers: Vec<(f64, f64)>,
    total_weight: f64,
    /// Redistribution power.
    pub exponent: f64,
    /// Sigmoid steepness, 0 disables.
    pub sigmoid_multiplier: f64,
    /// Staircase step, 0 or 1 selects the plain sigmoid.
    pub sigmoid_scale: f64,
}

impl NoiseLayerConfig {
    /// Build from explicit `(frequency, weight)` pairs.
    ///
    /// A repeated frequency replaces the earlier entry's weight. Zero weights
    /// are dropped; negative or non-finite weights are rejected. `section`
    /// only labels errors.
    pub fn new(
        section: &str,
        pairs: impl IntoIterator<Item = (f64, f64)>,
        exponent: f64,
        sigmoid_multiplier: f64,
        sigmoid_scale: f64,
    ) -> Result<Self, ConfigError> {
        let mut layers: Vec<(f64, f64)> = Vec::new();
        let mut seen_any = false;
        for (frequency, weight) in pairs {
            seen_any = true;
            if !weight.is_finite() || weight < 0.0 || !frequency.is_finite() {
                return Err(ConfigError::InvalidWeight {
                    section: section.to_string(),
                    frequency,
                    weight,
                });
            }
            match layers.iter_mut().find(|(f, _)| *f == frequency) {
                Some(existing) => existing.1 = weight,
                None => layers.push((frequency, weight)),
            }
        }
        if !seen_any {
            return Err(ConfigError::EmptyFrequencies(section.to_string()));
        }

        layers.retain(|&(_, weight)| weight > 0.0);
        let total_weight: f64 = layers.iter().map(|&(_, w)| w).sum();
        if layers.is_empty() || total_weight <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight(section.to_string()));
        }

        Ok(Self {
            layers,
            total_weight,
            exponent,
            sigmoid_multiplier,
            sigmoid_scale,
        })
    }

    /// Build from a config section of `"frequency:weight"` tokens.
    pub fn from_section(name: &str, section: &NoiseLayerSection) -> Result<Self, ConfigError> {
        let pairs = section
            .frequencies
            .iter()
            .map(|token| parse_frequency_token(name, token))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            name,
            pairs,
            section.exponent,
            section.sigmoid_multiplier,
            section.sigmoid_scale,
        )
    }

    /// Build from parallel frequency and weight lists. No sigmoid.
    pub fn from_parallel(
        name: &str,
        frequencies: &[f64],
        weights: &[f64],
        exponent: f64,
    ) -> Result<Self, ConfigError> {
        if frequencies.len() != weights.len() {
            return Err(ConfigError::MismatchedFrequencies {
                section: name.to_string(),
                frequencies: frequencies.len(),
                weights: weights.len(),
            });
        }
        Self::new(
            name,
            frequencies.iter().copied().zip(weights.iter().copied()),
            exponent,
            0.0,
            0.0,
        )
    }

    /// A single layer of weight 1.
    pub fn single(frequency: f64, exponent: f64, sigmoid_multiplier: f64) -> Self {
        Self {
            layers: vec![(frequency, 1.0)],
            total_weight: 1.0,
            exponent,
            sigmoid_multiplier,
            sigmoid_scale: 0.0,
        }
    }

    /// The `(frequency, weight)` pairs.
    pub fn layers(&self) -> &[(f64, f64)] {
        &self.layers
    }

    /// Sum of all layer weights. Always > 0.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

fn parse_frequency_token(section: &str, token: &str) -> Result<(f64, f64), ConfigError> {
    let invalid = || ConfigError::InvalidFrequencyToken {
        section: section.to_string(),
        token: token.to_string(),
    };
    let (frequency, weight) = token.split_once(':').ok_or_else(invalid)?;
    let frequency = frequency.trim().parse::<f64>().map_err(|_| invalid())?;
    let weight = weight.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((frequency, weight))
}

/// Samples a blended noise layer at 2D or 3D coordinates.
///
/// Immutable after construction; share freely across threads.
#[derive(Clone, Debug)]
pub struct NoiseLayerSampler {
    noise: Simplex,
    config: NoiseLayerConfig,
}

impl NoiseLayerSampler {
    /// Create a sampler whose noise primitive is seeded from `seed`.
    pub fn new(config: NoiseLayerConfig, seed: i64) -> Self {
        Self {
            noise: Simplex::new(noise_seed(seed)),
            config,
        }
    }

    /// The blend parameters.
    pub fn config(&self) -> &NoiseLayerConfig {
        &self.config
    }

    /// Weighted average of all layers in `[0, 1]`, before any reshaping.
    pub fn blend(&self, x: f64, z: f64) -> f64 {
        let sum: f64 = self
            .config
            .layers
            .iter()
            .map(|&(frequency, weight)| weight * self.unit_2d(x * frequency, z * frequency))
            .sum();
        sum / self.config.total_weight
    }

    /// 3D counterpart of [`blend`](Self::blend).
    pub fn blend_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let sum: f64 = self
            .config
            .layers
            .iter()
            .map(|&(frequency, weight)| {
                weight * self.unit_3d(x * frequency, y * frequency, z * frequency)
            })
            .sum();
        sum / self.config.total_weight
    }

    /// Weighted *sum* of all layers, each layer in `[0, 1]` scaled by
    /// `modifier × weight`. Unbounded above.
    pub fn weighted_sum(&self, x: f64, z: f64, modifier: f64) -> f64 {
        self.config
            .layers
            .iter()
            .map(|&(frequency, weight)| {
                modifier * weight * self.unit_2d(x * frequency, z * frequency)
            })
            .sum()
    }

    /// Blended and reshaped noise at `(x, z)`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.shape(self.blend(x, z))
    }

    /// Blended and reshaped noise at `(x, y, z)`.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.shape(self.blend_3d(x, y, z))
    }

    /// [`sample`](Self::sample) mapped onto `[min, max]` and rounded.
    ///
    /// Always inside `[min, max]`, even when the sigmoid overshoots `[0, 1]`.
    pub fn scaled_sample(&self, x: f64, z: f64, min: i32, max: i32) -> i32 {
        unit_to_range(self.sample(x, z), min, max)
    }

    fn shape(&self, blended: f64) -> f64 {
        let config = &self.config;
        let mut value = libm::pow(blended, config.exponent);
        if config.sigmoid_multiplier != 0.0 {
            value = if config.sigmoid_scale != 0.0 && config.sigmoid_scale != 1.0 {
                staircase_sigmoid(value, config.sigmoid_multiplier, config.sigmoid_scale)
            } else {
                sigmoid(value, config.sigmoid_multiplier)
            };
        }
        value
    }

    #[inline]
    fn unit_2d(&self, x: f64, z: f64) -> f64 {
        ((self.noise.get([x, z]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    #[inline]
    fn unit_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        ((self.noise.get([x, y, z]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

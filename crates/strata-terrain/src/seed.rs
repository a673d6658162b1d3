//! Deterministic seed derivation.
//!
//! Layer seeds are derived from the world seed and a stable string hash of
//! the layer name, so that every named noise layer is independent while the
//! whole world stays reproducible from one number. Per-column RNGs are seeded
//! from the world seed and the world column coordinates.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Layer name for the continent (land/ocean) map.
pub const CONTINENT: &str = "CONTINENT";
/// Layer name for the minimum-height map.
pub const MINIMUM: &str = "MINIMUM";
/// Layer name for the maximum-height map.
pub const MAXIMUM: &str = "MAXIMUM";
/// Layer name for the temperature map.
pub const TEMPERATURE: &str = "TEMPERATURE";
/// Layer name for the 3D flying-hills field.
pub const FLYING_HILLS: &str = "FLYING_HILLS";

/// Stable 32-bit hash of a string.
///
/// Computed as `h = 31·h + unit` over the UTF-16 code units with wrapping
/// arithmetic. The value never depends on process, platform, or compiler
/// version, which `std`'s `DefaultHasher` does not guarantee.
pub fn stable_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Seed for a named noise layer: `world_seed × stable_hash(name)`, wrapping.
pub fn derive_layer_seed(world_seed: i64, name: &str) -> i64 {
    world_seed.wrapping_mul(stable_hash(name) as i64)
}

/// Folds a 64-bit seed into the 32-bit seed taken by `noise` generators.
///
/// Both halves contribute, so seeds differing only in the high word still
/// produce different noise.
#[inline]
pub fn noise_seed(seed: i64) -> u32 {
    let bits = seed as u64;
    (bits ^ (bits >> 32)) as u32
}

/// Derive a well-mixed seed for a single world column.
pub fn column_seed(world_seed: i64, world_x: i32, world_z: i32) -> u64 {
    let mut h = mix64(world_seed as u64);
    h = mix64(h ^ (world_x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    mix64(h ^ (world_z as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
}

/// Deterministic RNG for a world column.
///
/// The same `(world_seed, x, z)` triple yields the same sequence regardless
/// of which chunk, thread, or generation order produced it.
pub fn column_rng(world_seed: i64, world_x: i32, world_z: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(column_seed(world_seed, world_x, world_z))
}

// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_stable_hash_known_values() {
        assert_eq!(stable_hash(""), 0);
        assert_eq!(stable_hash("a"), 97);
        assert_eq!(stable_hash(CONTINENT), -1_911_800_428);
        assert_eq!(stable_hash(MINIMUM), 1_782_520_814);
        assert_eq!(stable_hash(MAXIMUM), 1_562_722_816);
        assert_eq!(stable_hash(TEMPERATURE), -1_820_305_068);
        assert_eq!(stable_hash(FLYING_HILLS), 2_083_501_186);
    }

    #[test]
    fn test_layer_seed_is_product() {
        assert_eq!(derive_layer_seed(3, MINIMUM), 3 * 1_782_520_814);
        assert_eq!(derive_layer_seed(0, CONTINENT), 0);
        assert_eq!(derive_layer_seed(-2, CONTINENT), 2 * 1_911_800_428);
    }

    #[test]
    fn test_layer_seed_wraps_instead_of_overflowing() {
        let seed = derive_layer_seed(i64::MAX, TEMPERATURE);
        assert_eq!(seed, i64::MAX.wrapping_mul(-1_820_305_068));
    }

    #[test]
    fn test_layer_seeds_differ_per_name() {
        let names = [CONTINENT, MINIMUM, MAXIMUM, TEMPERATURE, FLYING_HILLS];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(derive_layer_seed(12345, a), derive_layer_seed(12345, b));
            }
        }
    }

    #[test]
    fn test_noise_seed_uses_high_bits() {
        assert_ne!(noise_seed(1), noise_seed(1 | (1 << 40)));
        assert_eq!(noise_seed(7), 7);
    }

    #[test]
    fn test_column_rng_deterministic() {
        let mut a = column_rng(42, -17, 300);
        let mut b = column_rng(42, -17, 300);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_column_seed_varies_with_inputs() {
        let base = column_seed(42, 0, 0);
        assert_ne!(base, column_seed(43, 0, 0));
        assert_ne!(base, column_seed(42, 1, 0));
        assert_ne!(base, column_seed(42, 0, 1));
        assert_ne!(column_seed(42, 1, 2), column_seed(42, 2, 1));
    }
}

//! Pure shaping functions shared by the samplers and terrain rules.
//!
//! All transcendental calls go through `libm` so that a given seed produces
//! the same terrain on every platform.

/// Sigmoid compression of a value in `[0, 1]` toward 0 or 1.
///
/// Computes `1 / (1 + e^-(2·s·x − s))`. The curve is centred on 0.5; larger
/// `steepness` flattens peaks and valleys. Steepness must exceed `2e` for the
/// output to span (almost) the full `[0, 1]` range.
#[inline]
pub fn sigmoid(x: f64, steepness: f64) -> f64 {
    let k = 2.0 * steepness * x - steepness;
    1.0 / (1.0 + libm::exp(-k))
}

/// Staircase sigmoid: repeats the sigmoid curve every `scale` units.
///
/// Produces several plateaus inside `[0, 1]` when `scale` is in `(0, 1)`. A
/// scale of 1 behaves like [`sigmoid`] on `[0, 1)`. Works for any `x`.
#[inline]
pub fn staircase_sigmoid(x: f64, steepness: f64, scale: f64) -> f64 {
    let x_scaled = x / scale;
    let step = libm::floor(x_scaled);
    scale * (sigmoid(x_scaled - step, steepness) + step)
}

/// Linearly maps `x` from `[old_min, old_max]` to `[new_min, new_max]`.
///
/// Not clamped: values outside the old range map outside the new one.
/// `old_min` must differ from `old_max`.
#[inline]
pub fn rescale(x: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> f64 {
    (new_max - new_min) * (x - old_min) / (old_max - old_min) + new_min
}

/// [`rescale`] followed by rounding half up to the nearest integer.
#[inline]
pub fn rescale_to_int(x: f64, old_min: f64, old_max: f64, new_min: i32, new_max: i32) -> i32 {
    round_half_up(rescale(x, old_min, old_max, new_min as f64, new_max as f64))
}

/// Maps a unit value into `[min, max]`, rounds half up, and clamps.
///
/// The clamp keeps the result inside the bounds even when shaping pushed
/// `unit` slightly outside `[0, 1]` (e.g. staircase sigmoid).
#[inline]
pub fn unit_to_range(unit: f64, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rescale_to_int(unit, 0.0, 1.0, min, max).clamp(lo, hi)
}

/// Rounds to the nearest integer, with halves going up (toward +∞).
#[inline]
pub fn round_half_up(x: f64) -> i32 {
    libm::floor(x + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_sigmoid_centre_is_half() {
        for steepness in [0.5, 1.0, 6.0, 20.0] {
            assert!((sigmoid(0.5, steepness) - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_sigmoid_monotonic_on_unit_interval() {
        for steepness in [0.1, 1.0, 2.0 * std::f64::consts::E, 12.0] {
            let mut previous = sigmoid(0.0, steepness);
            for i in 1..=1000 {
                let x = i as f64 / 1000.0;
                let value = sigmoid(x, steepness);
                assert!(
                    value >= previous,
                    "sigmoid decreased at x={x} for steepness {steepness}"
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_sigmoid_stays_in_unit_interval() {
        for i in 0..=100 {
            let v = sigmoid(i as f64 / 100.0, 50.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_staircase_with_unit_scale_matches_sigmoid() {
        for i in 0..100 {
            let x = i as f64 / 100.0;
            assert!((staircase_sigmoid(x, 8.0, 1.0) - sigmoid(x, 8.0)).abs() < EPSILON);
        }
    }

    #[test]
    fn test_staircase_has_plateaus() {
        // With scale 0.25 the value inside each step stays within that step.
        for i in 0..100 {
            let x = i as f64 / 100.0;
            let v = staircase_sigmoid(x, 10.0, 0.25);
            let step = (x / 0.25).floor() * 0.25;
            assert!(v >= step - EPSILON && v <= step + 0.25 + EPSILON, "x={x} v={v}");
        }
    }

    #[test]
    fn test_rescale_examples() {
        assert!((rescale(0.5, 0.0, 1.0, 50.0, 100.0) - 75.0).abs() < EPSILON);
        assert!((rescale(0.0, 0.0, 1.0, -1.0, 1.0) + 1.0).abs() < EPSILON);
        assert!((rescale(75.0, 50.0, 100.0, 0.0, 1.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_rescale_round_trip() {
        let ranges = [
            (0.0, 1.0, -1.0, 1.0),
            (45.0, 128.0, 0.0, 1.0),
            (-3.5, 9.25, 100.0, -100.0),
            (1e-3, 2e-3, 7.0, 7.5),
        ];
        for &(a, b, c, d) in &ranges {
            for i in -10..=20 {
                let v = a + (b - a) * i as f64 / 10.0;
                let back = rescale(rescale(v, a, b, c, d), c, d, a, b);
                assert!(
                    (back - v).abs() <= 1e-9 * (1.0 + v.abs()),
                    "round trip {v} -> {back} for {a},{b},{c},{d}"
                );
            }
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
    }

    #[test]
    fn test_unit_to_range_is_bounded() {
        for unit in [-0.5, 0.0, 0.3, 0.999, 1.0, 1.7] {
            let v = unit_to_range(unit, 45, 128);
            assert!((45..=128).contains(&v), "{unit} -> {v}");
        }
        assert_eq!(unit_to_range(0.0, 45, 128), 45);
        assert_eq!(unit_to_range(1.0, 45, 128), 128);
        assert_eq!(unit_to_range(0.5, 60, 60), 60);
    }
}

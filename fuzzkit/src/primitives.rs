//! Primitive fuzzers: the only place the raw source is sampled.

use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::rng::unit;

/// Exponent of the weighting curve used by [`int`] and [`array`] lengths.
const WEIGHT_EXPONENT: i32 = 30;

/// Upper bound (exclusive) on generated string lengths.
pub const MAX_STRING_LENGTH: usize = 100;

/// Upper bound (exclusive) on generated array lengths.
pub const MAX_ARRAY_LENGTH: usize = 100;

/// Lowest and highest printable ASCII code points.
const PRINTABLE_MIN: i64 = 32;
const PRINTABLE_MAX: i64 = 126;

fn weighted(p: f64) -> f64 {
    p.powi(WEIGHT_EXPONENT)
}

fn sample_int(rng: &mut dyn rand::RngCore) -> i64 {
    let p = unit(rng);
    let w = weighted(p);
    // `as` saturates, so w == 1.0 against the rounded i64::MAX stays in range.
    if p < 0.5 {
        (w * i64::MIN as f64).ceil() as i64
    } else {
        (w * i64::MAX as f64).floor() as i64
    }
}

/// Callers guarantee `min <= max`.
fn sample_range(rng: &mut dyn rand::RngCore, min: i64, max: i64) -> i64 {
    let span = max as i128 - min as i128 + 1;
    let offset = (unit(rng) * span as f64).floor() as i128;
    // f64 rounding on wide spans can land exactly on `span`
    (min as i128 + offset.min(span - 1)) as i64
}

/// Any `i64`, strongly skewed toward small magnitudes.
///
/// One raw draw `p` is raised to the 30th power. Below `p = 0.5` the result
/// scales toward `i64::MIN` and can never exceed about nine billion in
/// magnitude; above it the result scales toward `i64::MAX`. Values close to
/// zero are therefore far more likely than values near either bound.
pub fn int() -> Fuzzer<i64> {
    Fuzzer::from_fn(sample_int)
}

/// An `i64` in `[min, max]`, both ends inclusive, uniformly distributed.
///
/// Returns [`FuzzError::InvalidRange`] when `min > max`.
///
/// ```rust
/// use fuzzkit::{FuzzError, int_range};
///
/// assert!(int_range(1, 6).is_ok());
/// assert_eq!(
///     int_range(6, 1).unwrap_err(),
///     FuzzError::InvalidRange { min: 6, max: 1 }
/// );
/// ```
pub fn int_range(min: i64, max: i64) -> Result<Fuzzer<i64>, FuzzError> {
    if min > max {
        return Err(FuzzError::InvalidRange { min, max });
    }
    Ok(Fuzzer::from_fn(move |rng| sample_range(rng, min, max)))
}

/// A finite `f64`: an [`int`] draw plus a fractional offset in `[0, 1)`.
///
/// Never NaN or infinite.
pub fn float() -> Fuzzer<f64> {
    Fuzzer::from_fn(|rng| {
        let whole = sample_int(rng);
        whole as f64 + unit(rng)
    })
}

/// A string of printable ASCII (`' '` through `'~'`).
///
/// The length is `floor(100 * p)`, so every length below
/// [`MAX_STRING_LENGTH`] is equally likely, the empty string included.
pub fn string() -> Fuzzer<String> {
    Fuzzer::from_fn(|rng| {
        let len = (unit(rng) * MAX_STRING_LENGTH as f64).floor() as usize;
        (0..len)
            .map(|_| char::from(sample_range(rng, PRINTABLE_MIN, PRINTABLE_MAX) as u8))
            .collect()
    })
}

/// Always the same value.
///
/// Each generation hands out a clone. Wrap the value in an `Arc` to hand
/// out the very same allocation every time.
pub fn constant<T>(value: T) -> Fuzzer<T>
where
    T: Clone + Send + Sync + 'static,
{
    Fuzzer::from_fn(move |_| value.clone())
}

/// A `Vec` of independently generated elements.
///
/// The length uses the same steep weighting as [`int`], so empty and short
/// vectors dominate and lengths stay below [`MAX_ARRAY_LENGTH`].
pub fn array<T: 'static>(fuzzer: &Fuzzer<T>) -> Fuzzer<Vec<T>> {
    let element = fuzzer.clone();
    Fuzzer::from_fn(move |rng| {
        let len = (MAX_ARRAY_LENGTH as f64 * weighted(unit(rng))).floor() as usize;
        (0..len).map(|_| element.generate(rng)).collect()
    })
}

/// `true` or `false` with equal probability.
pub fn boolean() -> Fuzzer<bool> {
    Fuzzer::from_fn(|rng| unit(rng) >= 0.5)
}

/// One of `values`, chosen uniformly.
///
/// Returns [`FuzzError::EmptyChoices`] if `values` is empty.
pub fn one_of<T>(values: Vec<T>) -> Result<Fuzzer<T>, FuzzError>
where
    T: Clone + Send + Sync + 'static,
{
    if values.is_empty() {
        return Err(FuzzError::EmptyChoices);
    }
    let last = values.len() as i64 - 1;
    Ok(Fuzzer::from_fn(move |rng| {
        values[sample_range(rng, 0, last) as usize].clone()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_seeded_rng;
    use std::sync::Arc;

    const SAMPLES: usize = 10_000;

    fn sample<T: 'static>(fuzzer: &Fuzzer<T>, seed: u64) -> Vec<T> {
        let mut rng = create_seeded_rng(seed);
        (0..SAMPLES).map(|_| fuzzer.generate(&mut rng)).collect()
    }

    #[test]
    fn test_int_favors_small_magnitudes() {
        let values = sample(&int(), 1);

        let small = values.iter().filter(|v| v.unsigned_abs() < 10_000_000_000).count();
        let near_bounds = values
            .iter()
            .filter(|v| v.unsigned_abs() > 9_000_000_000_000_000_000)
            .count();

        assert!(small > SAMPLES * 45 / 100, "only {} small values", small);
        assert!(near_bounds < SAMPLES / 20, "{} values near the bounds", near_bounds);
    }

    #[test]
    fn test_int_negative_side_is_bounded() {
        // p < 0.5 gives at most 0.5^30 * |i64::MIN| in magnitude
        let limit = (0.5f64.powi(30) * i64::MIN as f64).ceil() as i64;
        for value in sample(&int(), 2) {
            if value < 0 {
                assert!(value >= limit);
            }
        }
    }

    #[test]
    fn test_int_range_stays_in_bounds() {
        let ranges = [
            (0, 0),
            (5, 5),
            (-3, 3),
            (1, 100),
            (-1_000_000, -999_990),
            (i64::MIN, i64::MAX),
            (i64::MAX - 2, i64::MAX),
            (i64::MIN, i64::MIN + 2),
        ];

        for (i, &(min, max)) in ranges.iter().enumerate() {
            let fuzzer = int_range(min, max).unwrap();
            for value in sample(&fuzzer, i as u64) {
                assert!(
                    (min..=max).contains(&value),
                    "{} outside [{}, {}]",
                    value,
                    min,
                    max
                );
            }
        }
    }

    #[test]
    fn test_int_range_reaches_both_ends() {
        let values = sample(&int_range(-3, 3).unwrap(), 3);
        assert!(values.contains(&-3));
        assert!(values.contains(&3));
    }

    #[test]
    fn test_int_range_rejects_reversed_bounds() {
        assert_eq!(
            int_range(10, 1).unwrap_err(),
            FuzzError::InvalidRange { min: 10, max: 1 }
        );
    }

    #[test]
    fn test_float_is_finite() {
        for value in sample(&float(), 4) {
            assert!(value.is_finite(), "{} is not finite", value);
        }
    }

    #[test]
    fn test_float_uses_two_draws() {
        let actual = float().generate(&mut create_seeded_rng(5));

        let mut rng = create_seeded_rng(5);
        let whole = int().generate(&mut rng);
        let fraction = unit(&mut rng);

        assert_eq!(actual, whole as f64 + fraction);
    }

    #[test]
    fn test_string_is_printable_ascii() {
        let values = sample(&string(), 6);

        for value in &values {
            assert!(value.len() < MAX_STRING_LENGTH);
            assert!(value.chars().all(|c| (' '..='~').contains(&c)), "{:?}", value);
        }
        assert!(values.iter().any(String::is_empty));
    }

    #[test]
    fn test_array_lengths_skew_short() {
        let values = sample(&array(&int()), 7);

        assert!(values.iter().all(|v| v.len() < MAX_ARRAY_LENGTH));
        let short = values.iter().filter(|v| v.len() <= 5).count();
        assert!(short > SAMPLES * 3 / 4, "only {} short arrays", short);
        assert!(values.iter().any(Vec::is_empty));
        assert!(values.iter().any(|v| v.len() > 5));
    }

    #[test]
    fn test_array_elements_follow_element_fuzzer() {
        let values = sample(&array(&int_range(0, 3).unwrap()), 8);

        for value in values {
            assert!(value.iter().all(|e| (0..=3).contains(e)));
        }
    }

    #[test]
    fn test_array_elements_are_independent() {
        let values = sample(&array(&int_range(0, 1_000_000).unwrap()), 9);

        let long = values
            .iter()
            .find(|v| v.len() >= 3)
            .expect("expected at least one array with three elements");
        assert!(long.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_constant_always_returns_value() {
        for value in sample(&constant("fixed".to_string()), 10) {
            assert_eq!(value, "fixed");
        }
    }

    #[test]
    fn test_constant_preserves_arc_identity() {
        let shared = Arc::new(vec![1, 2, 3]);
        let fuzzer = constant(Arc::clone(&shared));
        let mut rng = create_seeded_rng(11);

        for _ in 0..10 {
            assert!(Arc::ptr_eq(&fuzzer.generate(&mut rng), &shared));
        }
    }

    #[test]
    fn test_boolean_produces_both() {
        let values = sample(&boolean(), 12);
        assert!(values.contains(&true));
        assert!(values.contains(&false));
    }

    #[test]
    fn test_one_of_covers_all_values() {
        let choices = vec!['a', 'b', 'c'];
        let values = sample(&one_of(choices.clone()).unwrap(), 13);

        assert!(values.iter().all(|v| choices.contains(v)));
        for choice in &choices {
            assert!(values.contains(choice));
        }
    }

    #[test]
    fn test_one_of_rejects_empty() {
        assert_eq!(one_of::<i32>(vec![]).unwrap_err(), FuzzError::EmptyChoices);
    }
}

//! Statistical properties of the primitives, observed through the public harness.

use fuzzkit::{
    FuzzConfig, Fuzzer, TestSuite, and_then, array, constant, float, int, int_range, map, string,
};
use std::sync::{Arc, Mutex};

const SAMPLES: usize = 10_000;

/// Collect `SAMPLES` values of `fuzzer` by running a batched test over them
fn collect<T>(fuzzer: &Fuzzer<T>) -> Vec<T>
where
    T: std::fmt::Debug + Send + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::with_capacity(SAMPLES)));
    let config = FuzzConfig::new(SAMPLES).unwrap();
    let mut suite = TestSuite::new("collect");

    let sink = seen.clone();
    config.fuzz(&mut suite, fuzzer, "collect", move |value| {
        sink.lock().unwrap().push(value);
    });
    suite.run().assert_success();

    let mut seen = seen.lock().unwrap();
    std::mem::take(&mut *seen)
}

#[test]
fn test_map_preserves_source_values() {
    let values = collect(&map(&int_range(0, 9).unwrap(), |n| (n, n * n)));

    for (n, square) in values {
        assert!((0..=9).contains(&n));
        assert_eq!(square, n * n);
    }
}

#[test]
fn test_int_range_boundaries() {
    for (min, max) in [(-5, 5), (0, 1), (i64::MIN, i64::MAX), (42, 42)] {
        let values = collect(&int_range(min, max).unwrap());
        assert!(values.iter().all(|v| (min..=max).contains(v)));
    }

    let small = collect(&int_range(-2, 2).unwrap());
    for expected in -2..=2 {
        assert!(small.contains(&expected), "never produced {}", expected);
    }
}

#[test]
fn test_int_and_float_are_finite() {
    let ints = collect(&int());
    assert!(ints.iter().all(|v| (*v as f64).is_finite()));

    let floats = collect(&float());
    assert!(floats.iter().all(|v| v.is_finite() && !v.is_nan()));
}

#[test]
fn test_string_shape() {
    let values = collect(&string());

    assert!(values.iter().all(|s| s.len() < 100));
    assert!(values.iter().all(|s| s.bytes().all(|b| (32..=126).contains(&b))));
    assert!(values.iter().any(|s| s.is_empty()));
}

#[test]
fn test_array_shape() {
    let values = collect(&array(&int_range(-1, 1).unwrap()));

    assert!(values.iter().all(|v| v.len() < 100));
    assert!(values.iter().flatten().all(|e| (-1..=1).contains(e)));

    let short = values.iter().filter(|v| v.len() <= 5).count();
    let long = values.len() - short;
    assert!(short > long * 3, "{} short vs {} long", short, long);
}

#[test]
fn test_constant_is_stable() {
    let values = collect(&constant(vec![1, 2, 3]));
    assert!(values.iter().all(|v| v == &vec![1, 2, 3]));
}

#[test]
fn test_and_then_array_matches_drawn_length() {
    let sized = and_then(&int_range(0, 8).unwrap(), |n| {
        let mut values = constant(Vec::<i64>::new());
        for _ in 0..n {
            values = values.map2(&int(), |mut acc, e| {
                acc.push(e);
                acc
            });
        }
        map(&values, move |values| (n, values))
    });

    for (n, values) in collect(&sized) {
        assert_eq!(values.len() as i64, n);
    }
}

use std::collections::BTreeSet;

use super::*;
use crate::foundation::core::Shape;

fn ramp(shape: Shape) -> DiopterMap {
    let n = shape.len() as f64;
    DiopterMap::from_fn(shape, |y, x| ((y * shape.width + x) as f64 / n).powf(1.3)).unwrap()
}

fn distinct(map: &DiopterMap) -> BTreeSet<u64> {
    map.data().iter().map(|v| v.to_bits()).collect()
}

#[test]
fn zero_levels_is_rejected() {
    let m = ramp(Shape::new(4, 4));
    assert!(matches!(
        quantize_depth(&m, 0),
        Err(HoloError::Validation(_))
    ));
}

#[test]
fn constant_map_is_returned_unchanged() {
    let m = DiopterMap::filled(Shape::new(40, 25), 0.5).unwrap();
    let q = quantize_depth(&m, 50).unwrap();
    assert_eq!(q, m);
}

#[test]
fn output_values_are_bin_values_within_extent() {
    let m = ramp(Shape::new(16, 16));
    let (lo, hi) = m.min_max();
    for levels in [1usize, 2, 3, 7, 50] {
        let q = quantize_depth(&m, levels).unwrap();
        assert_eq!(q.shape(), m.shape());
        assert!(distinct(&q).len() <= levels);
        let bins = depth_bins(lo, hi, levels);
        for (&orig, &out) in m.data().iter().zip(q.data()) {
            assert!(out >= lo && out <= hi);
            assert!(out <= orig);
            assert!(bins.contains(&out));
        }
    }
}

#[test]
fn extremes_survive_quantization() {
    let m = DiopterMap::new(Shape::new(1, 5), vec![0.1, 0.2, 0.45, 0.7, 0.9]).unwrap();
    let q = quantize_depth(&m, 3).unwrap();
    // bins = [0.1, 0.5, 0.9]
    assert_eq!(q.data()[0], 0.1);
    assert_eq!(q.data()[1], 0.1);
    assert_eq!(q.data()[2], 0.1);
    assert!((q.data()[3] - 0.5).abs() < 1e-12);
    assert_eq!(q.data()[4], 0.9);
}

#[test]
fn single_level_collapses_to_minimum() {
    let m = ramp(Shape::new(3, 3));
    let q = quantize_depth(&m, 1).unwrap();
    let (lo, _) = m.min_max();
    assert!(q.data().iter().all(|&v| v == lo));
}

#[test]
fn quantization_is_idempotent() {
    let m = ramp(Shape::new(32, 8));
    for levels in [2usize, 5, 50] {
        let once = quantize_depth(&m, levels).unwrap();
        let twice = quantize_depth(&once, levels).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn non_finite_samples_are_a_quantize_error() {
    let m = DiopterMap::new(Shape::new(1, 2), vec![0.0, f64::INFINITY]).unwrap();
    assert!(matches!(quantize_depth(&m, 4), Err(HoloError::Quantize(_))));
}

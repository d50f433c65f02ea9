use super::*;
use crate::foundation::core::Shape;

fn small_panel(w: f64) -> OpticalParams {
    OpticalParams {
        slm_width: 16,
        slm_height: 6,
        ..OpticalParams::default()
    }
    .with_working_range(w)
}

fn tilted_depth(shape: Shape) -> DiopterMap {
    DiopterMap::from_fn(shape, |y, x| ((x + 2 * y) % 5) as f64 / 4.0).unwrap()
}

/// Straight transcription of the lens/grating relation, normalized.
fn reference(depth: &DiopterMap, p: &OpticalParams, mod_num: f64) -> Vec<f64> {
    let (h, w) = (p.slm_height, p.slm_width);
    let mut out = Vec::with_capacity(h * w);
    for row in 0..h {
        for col in 0..w {
            let x = -(w as f64) / 2.0 + col as f64;
            let y = -(h as f64) / 2.0 + row as f64;
            let d = depth.get(row, col) * p.working_range;
            let scale_y = ((p.c0 * p.slm_pitch * p.fe.powi(2))
                / (3.0 * p.wavelength * p.f0.powi(3)))
                * (p.working_range / 2.0 - d);
            let scale_x = scale_y / p.nominal_a;
            let dx = -scale_x * ((p.wavelength * p.f0) / (2.0 * p.slm_pitch));
            let dy = -scale_y * ((p.wavelength * p.f0) / (2.0 * p.slm_pitch));
            let n = (p.wavelength * p.f0) / p.slm_pitch;
            let raw = mod_num * ((dx / n) * x + (dy / n) * y);
            out.push(raw.rem_euclid(mod_num) / (mod_num / (2.0 * PI)));
        }
    }
    let lo = out.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = out.iter().map(|v| v - lo).fold(f64::NEG_INFINITY, f64::max);
    out.iter().map(|v| (v - lo) / hi).collect()
}

fn assert_unit_range(mask: &PhaseMask) {
    let (lo, hi) = mask.min_max();
    assert_eq!(lo, 0.0);
    assert_eq!(hi, 1.0);
    assert!(mask.data().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn matches_closed_form_reference() {
    let p = small_panel(4.0);
    let depth = tilted_depth(p.slm_shape());
    for mod_num in [1.0, 3.0] {
        let mask = synthesize_phase_mask(&depth, &p, mod_num).unwrap();
        let want = reference(&depth, &p, mod_num);
        for (got, want) in mask.data().iter().zip(&want) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        assert_unit_range(&mask);
    }
}

#[test]
fn fringe_slope_vanishes_at_mid_range() {
    let p = OpticalParams::default();
    let s = FringeSlope::for_diopter(&p, 0.5);
    assert_eq!(s.theta_x, 0.0);
    assert_eq!(s.theta_y, 0.0);

    let near = FringeSlope::for_diopter(&p, 0.0);
    let far = FringeSlope::for_diopter(&p, 1.0);
    assert!((near.theta_y + far.theta_y).abs() < 1e-15);
    assert!((near.theta_x * p.nominal_a - near.theta_y).abs() < 1e-12);
}

#[test]
fn zero_working_range_gives_flat_zero_mask() {
    let p = small_panel(0.0);
    let mask = synthesize_phase_mask(&tilted_depth(p.slm_shape()), &p, 1.0).unwrap();
    assert!(mask.data().iter().all(|&v| v == 0.0));
}

#[test]
fn constant_depth_off_mid_range_spans_unit_interval() {
    let p = small_panel(4.0);
    let depth = DiopterMap::filled(p.slm_shape(), 0.1).unwrap();
    let a = synthesize_phase_mask(&depth, &p, 1.0).unwrap();
    let b = synthesize_phase_mask(&depth, &p, 1.0).unwrap();
    assert_eq!(a, b);
    assert_unit_range(&a);
}

#[test]
fn depth_must_match_declared_panel() {
    let p = small_panel(4.0);
    let wrong = DiopterMap::filled(Shape::new(16, 6), 0.2).unwrap();
    let err = synthesize_phase_mask(&wrong, &p, 1.0).unwrap_err();
    assert!(matches!(err, HoloError::Synthesis(_)));
}

#[test]
fn invalid_mod_num_and_non_finite_depth_are_rejected() {
    let p = small_panel(4.0);
    let depth = tilted_depth(p.slm_shape());
    assert!(synthesize_phase_mask(&depth, &p, 0.0).is_err());
    assert!(synthesize_phase_mask(&depth, &p, f64::NAN).is_err());

    let mut data = depth.into_data();
    data[3] = f64::NAN;
    let bad = DiopterMap::new(p.slm_shape(), data).unwrap();
    assert!(matches!(
        synthesize_phase_mask(&bad, &p, 1.0),
        Err(HoloError::Synthesis(_))
    ));
}

#[test]
fn full_panel_half_depth_at_w4_is_degenerate_flat() {
    let p = OpticalParams::default().with_working_range(4.0);
    let depth = DiopterMap::filled(p.slm_shape(), 0.5).unwrap();
    let mask = synthesize_phase_mask(&depth, &p, 1.0).unwrap();
    assert_eq!(mask.shape(), Shape::new(2464, 4000));
    assert!(mask.data().iter().all(|&v| v == 0.0));
}

#[test]
fn full_panel_near_plane_spans_unit_interval() {
    let p = OpticalParams::default();
    let depth = DiopterMap::filled(p.slm_shape(), 0.0).unwrap();
    let mask = synthesize_phase_mask(&depth, &p, 1.0).unwrap();
    assert_unit_range(&mask);
}

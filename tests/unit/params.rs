use super::*;

#[test]
fn defaults_match_reference_device() {
    let p = OpticalParams::default();
    assert!((p.nominal_a + 1.75).abs() < 1e-12);
    assert_eq!(p.slm_shape(), Shape::new(2464, 4000));
    assert_eq!(p.working_range, 4.0);
    p.validate().unwrap();
    PipelineConfig::default().validate().unwrap();
}

#[test]
fn with_working_range_leaves_original_untouched() {
    let p = OpticalParams::default();
    let q = p.with_working_range(0.0);
    assert_eq!(p.working_range, 4.0);
    assert_eq!(q.working_range, 0.0);
    assert_eq!(q.c0, p.c0);
}

#[test]
fn derived_constants() {
    let p = OpticalParams::default();
    let n = 530e-9 * 100e-3 / 3.74e-6;
    assert!((p.grating_period() - n).abs() < 1e-12);
    let g = (0.0193 * 3.74e-6 * 40e-3 * 40e-3) / (3.0 * 530e-9 * 1e-3);
    assert!((p.shift_gain() - g).abs() / g < 1e-12);
}

#[test]
fn validate_rejects_bad_constants() {
    let mut p = OpticalParams::default();
    p.wavelength = 0.0;
    assert!(p.validate().is_err());

    let p = OpticalParams::default().with_working_range(-1.0);
    assert!(p.validate().is_err());

    let mut p = OpticalParams::default();
    p.f0 = f64::NAN;
    assert!(p.validate().is_err());
}

#[test]
fn config_json_fills_defaults_and_rejects_unknown_fields() {
    let cfg = PipelineConfig::from_reader(
        br#"{ "num_depths": 8, "params": { "working_range": 2.5 } }"#.as_slice(),
    )
    .unwrap();
    assert_eq!(cfg.num_depths, 8);
    assert!(cfg.discretize);
    assert_eq!(cfg.params.working_range, 2.5);
    assert_eq!(cfg.params.slm_width, 4000);

    let err = PipelineConfig::from_reader(br#"{ "bogus": 1 }"#.as_slice()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn config_validate_catches_panel_mismatch() {
    let cfg = PipelineConfig {
        slm_shape: Shape::new(10, 10),
        ..PipelineConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = PipelineConfig {
        mod_num: 0.0,
        ..PipelineConfig::default()
    };
    assert!(cfg.validate().is_err());
}

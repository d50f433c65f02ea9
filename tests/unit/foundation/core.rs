use super::*;

#[test]
fn new_rejects_length_mismatch_and_empty_shapes() {
    assert!(Raster::new(Shape::new(2, 2), vec![0.0; 3]).is_err());
    assert!(Raster::<f64>::new(Shape::new(0, 2), vec![]).is_err());
    assert!(Raster::filled(Shape::new(3, 0), 1.0).is_err());
}

#[test]
fn from_fn_is_row_major() {
    let r = Raster::from_fn(Shape::new(2, 3), |y, x| (y * 10 + x) as f64).unwrap();
    assert_eq!(r.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    assert_eq!(r.row(1), &[10.0, 11.0, 12.0]);
    assert_eq!(r.get(1, 2), 12.0);
}

#[test]
fn min_max_and_map() {
    let r = Raster::new(Shape::new(1, 4), vec![0.25, -1.0, 3.0, 0.0]).unwrap();
    assert_eq!(r.min_max(), (-1.0, 3.0));
    let doubled = r.map(|v| v * 2.0);
    assert_eq!(doubled.shape(), r.shape());
    assert_eq!(doubled.get(0, 2), 6.0);
}

#[test]
fn shape_display_is_height_by_width() {
    assert_eq!(Shape::new(2464, 4000).to_string(), "2464x4000");
    assert_eq!(Shape::new(2, 3).len(), 6);
}

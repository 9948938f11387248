use {
  super::*,
  crate::params::Params,
  euclid::Point2D,
};

#[test] fn classify_default_thresholds() {
  let c = Classifier::default();
  assert_eq!(c.classify(0.0), 0);
  assert_eq!(c.classify(0.27), 0);
  assert_eq!(c.classify(0.3), 1);
  assert_eq!(c.classify(0.5), 2);
  assert_eq!(c.classify(0.9), 3);
}

#[test] fn classify_boundaries_go_up() {
  let c = Classifier::new([0.28, 0.45, 0.65]);
  assert_eq!(c.classify(0.28), 1);
  assert_eq!(c.classify(0.45), 2);
  assert_eq!(c.classify(0.65), 3);
}

#[test] fn classify_monotonic() {
  let c = Classifier::new([0.65, 0.28, 0.45]); // unsorted input
  let mut last = 0;
  for i in 0..=1000 {
    let category = c.classify(i as f64 / 1000.0);
    assert!(category >= last);
    last = category;
  }
  assert_eq!(last, 3);
}

#[test] fn two_thresholds_never_reach_three() {
  let c = Classifier::new([0.3, 0.6]);
  assert_eq!(c.buckets(), 3);
  assert!((0..=100).all(|i| c.classify(i as f64 / 100.0) < 3));
}

#[test] fn classify_drops_nan_thresholds() {
  let c = Classifier::new([f64::NAN, 0.5]);
  assert_eq!(c.thresholds(), &[0.5]);
}

#[test] fn angle_remap() {
  let range = AngleRange::default();
  assert_eq!(range.angle(0.0), 90.0);
  assert_eq!(range.angle(0.5), 0.0);
  assert_eq!(range.angle(1.0), -90.0);
}

#[test] fn length_band_from_base_and_range() {
  let band = LengthBand::new(1.5, 2.0);
  assert_eq!(band.min, 0.75);
  assert_eq!(band.max, 3.0);
  assert_eq!(band.length(0.0), 0.75);
  assert_eq!(band.length(1.0), 3.0);
}

#[test] fn length_range_below_one_is_one() {
  let band = LengthBand::new(1.5, 0.25);
  assert_eq!(band, LengthBand { min: 1.5, max: 1.5 });
  assert_eq!(length_factor(0.3, 1.5, 0.25), 1.5);
}

#[test] fn length_never_negative() {
  assert_eq!(length_factor(0.5, -2.0, 2.0), 0.0);
}

#[test] fn scalar_map_bounds() {
  let map = ScalarMap::from_fn(4, 3, |x, y| (y * 10 + x) as u8);
  assert_eq!(map.get(3, 2), Some(23));
  assert_eq!(map.get(4, 0), None);
  assert_eq!(map.get(0, 3), None);
  assert_eq!(map.sample_or(Point2D::new(9, 9), 0), 0);
}

#[test] fn field_maps_cover_canvas() {
  let noise = NoiseField::new(99);
  let maps = FieldMaps::generate(&noise, &Params::default(), AngleRange::default(), 64, 0.0);
  for map in [&maps.bottom_area, &maps.top_area] {
    assert_eq!((map.width(), map.height()), (64, 64));
    assert!((0..64).all(|x| map.get(x, 63).map_or(false, |c| c <= 3)));
  }
  let band = Params::default().length_band();
  assert!((0..64).all(|x| {
    let l = maps.bottom_length.get(x, x).unwrap_or(-1.0) as f64;
    l >= band.min - 1e-6 && l <= band.max + 1e-6
  }));
}

#[test] fn field_maps_repeatable() {
  let noise = NoiseField::new(5);
  let a = FieldMaps::generate(&noise, &Params::default(), AngleRange::default(), 32, 0.0);
  let b = FieldMaps::generate(&noise, &Params::default(), AngleRange::default(), 32, 0.0);
  assert_eq!(a.top_area, b.top_area);
  assert_eq!(a.bottom_angle, b.bottom_angle);
}

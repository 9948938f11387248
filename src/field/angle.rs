use {
  super::remap,
  crate::{brush::FlowField, geometry::PixelPoint, noise_field::NoiseField},
  serde::{Deserialize, Serialize},
  std::sync::Arc,
};

/// Degrees assigned to noise values 0 and 1.
/// Default is inverted, higher noise turns strokes clockwise.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleRange {
  pub start: f64,
  pub end: f64,
}

impl Default for AngleRange {
  fn default() -> Self {
    Self { start: 90.0, end: -90.0 }
  }
}

impl AngleRange {
  pub fn angle(&self, value: f64) -> f64 {
    remap(value, 0.0, 1.0, self.start, self.end)
  }
}

/// Flow field evaluated lazily at any canvas point.
pub fn flow_field(noise: NoiseField, scale: f64, range: AngleRange, t: f64) -> FlowField {
  Arc::new(move |p: PixelPoint| {
    range.angle(noise.sample(p.x as f64, p.y as f64, t, scale)) as f32
  })
}

/// Constant zero field; the drift angle alone steers the stroke.
pub fn flat_field() -> FlowField {
  Arc::new(|_| 0.0)
}

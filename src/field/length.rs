use super::remap;

/// `[base / range, base * range]`, with `range < 1` read as 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LengthBand {
  pub min: f64,
  pub max: f64,
}

impl LengthBand {
  pub fn new(base: f64, range: f64) -> Self {
    let range = range.max(1.0);
    Self {
      min: base / range,
      max: base * range
    }
  }

  /// Brush length multiplier for a noise value in `[0, 1]`, never negative.
  pub fn length(&self, value: f64) -> f64 {
    remap(value, 0.0, 1.0, self.min, self.max).max(0.0)
  }
}

pub fn length_factor(value: f64, base: f64, range: f64) -> f64 {
  LengthBand::new(base, range).length(value)
}

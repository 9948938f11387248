use serde::{Deserialize, Serialize};

/// Closed interval with a step granularity.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
  pub min: f64,
  pub max: f64,
  pub step: f64,
}

impl Domain {
  pub const fn new(min: f64, max: f64, step: f64) -> Self {
    Self { min, max, step }
  }

  pub fn clamp(&self, value: f64) -> f64 {
    value.clamp(self.min, self.max)
  }

  pub fn midpoint(&self) -> f64 {
    (self.min + self.max) / 2.0
  }

  pub fn width(&self) -> f64 {
    self.max - self.min
  }

  /// Nearest multiple of `step` above `min`, rounded to 4 decimals.
  pub fn snap(&self, value: f64) -> f64 {
    let snapped = ((value - self.min) / self.step).round() * self.step + self.min;
    (snapped * 1e4).round() / 1e4
  }

  /// Clamp then snap. Snapping may overshoot `max` by less than one step when the width is
  /// not a multiple of the step, the result is clamped again.
  pub fn quantize(&self, value: f64) -> f64 {
    self.clamp(self.snap(self.clamp(value)))
  }
}

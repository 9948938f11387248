//! The drawing primitive the renderer drives.
//!
//! A backend keeps named brushes and named flow fields, a current stroke color, and draws
//! "flow lines": strokes that start at a point and keep turning to follow the selected field.
//! The renderer never touches pixels itself.

use {
  crate::geometry::{PixelPoint, PixelSpace},
  anyhow::Result,
  euclid::Box2D,
  serde::{Deserialize, Serialize},
  std::sync::Arc,
};

mod color;
mod recorder;

pub use {
  color::{Color, Palette},
  recorder::{Call, Recorder, RecorderFactory, Stroke},
};

/// Angle in degrees at a canvas point.
pub type FlowField = Arc<dyn Fn(PixelPoint) -> f32 + Send + Sync>;

/// Stroke width multiplier along a stroke.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pressure {
  /// fraction of the stroke spent ramping up, and ramping down
  pub curve: [f32; 2],
  pub min_max: [f32; 2],
}

impl Default for Pressure {
  fn default() -> Self {
    Self { curve: [0.15, 0.2], min_max: [0.9, 1.2] }
  }
}

impl Pressure {
  /// `t` is the position along the stroke, `[0, 1]`.
  pub fn at(&self, t: f32) -> f32 {
    let [rise, fall] = self.curve;
    let [lo, hi] = self.min_max;
    let up = if rise > 0.0 { (t / rise).min(1.0) } else { 1.0 };
    let down = if fall > 0.0 { ((1.0 - t) / fall).min(1.0) } else { 1.0 };
    lo + (hi - lo) * up.min(down).max(0.0)
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushSpec {
  pub weight: f32,
  /// random wobble of each stamp, pixels
  pub vibration: f32,
  pub definition: f32,
  pub quality: f32,
  /// 0..=100
  pub opacity: f32,
  /// stamp distance as a fraction of the weight
  pub spacing: f32,
  pub blend: bool,
  pub pressure: Pressure,
}

impl BrushSpec {
  pub fn standard(weight: f32, vibration: f32, spacing: f32) -> Self {
    Self {
      weight,
      vibration,
      definition: 1.0,
      quality: 1.0,
      opacity: 100.0,
      spacing,
      blend: false,
      pressure: Pressure::default()
    }
  }
}

pub trait BrushBackend {
  /// Side length of the square canvas, pixels.
  fn size(&self) -> u32;
  fn set_brush(&mut self, name: &str, spec: BrushSpec);
  fn set_flow_field(&mut self, name: &str, field: FlowField);
  fn set_stroke_color(&mut self, color: Color);
  fn select_brush(&mut self, name: &str);
  fn select_flow_field(&mut self, name: &str);
  /// `drift_angle` (degrees) is added to the field angle at every step.
  fn draw_flow_line(&mut self, origin: PixelPoint, length: f32, drift_angle: f32);
  fn clear(&mut self, color: Color);
  fn outline_tile(&mut self, _bounds: Box2D<f32, PixelSpace>) {}
}

/// Off-screen backend rendered once and then consumed.
pub trait Surface: BrushBackend {
  type Output: Send;
  fn finish(self) -> Result<Self::Output>;
}

pub trait SurfaceFactory: Sync {
  type Surface: Surface;
  fn create(&self, size: u32) -> Result<Self::Surface>;
}

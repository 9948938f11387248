use {
  crate::{
    brush::{BrushBackend, Color, Palette},
    geometry::{PixelPoint, TileGrid},
    params::{Params, Visibility},
    planner::DrawJob
  },
  serde::{Deserialize, Serialize},
};

pub const BRUSH_COARSE: &str = "b1";
pub const BRUSH_FINE: &str = "b2";
/// Used by straight strokes.
pub const BRUSH_LINE: &str = "line";
pub const BOTTOM_FIELD: &str = "bottomField";
pub const TOP_FIELD: &str = "topField";
pub const FLAT_FIELD: &str = "flat";

/// Where stroke lengths come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMode {
  /// length maps, reproducible for a given seed
  #[default]
  Field,
  /// fixed bottom length; top length scaled by the job's random variation
  Jitter,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrokeStyle {
  /// Flow lines following the layer fields. Background tiles are painted in the background
  /// color and strokes start one tile to the left of the jittered point.
  Flow,
  /// Straight lines along the tile-sampled angle from the jittered point, measured clockwise
  /// (y down). Background tiles are skipped.
  Straight,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layer {
  Bottom,
  Top,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Tone {
  Background,
  High,
  Low,
}

impl Layer {
  fn category(self, job: &DrawJob) -> u8 {
    match self {
      Layer::Bottom => job.bottom_area,
      Layer::Top => job.top_area,
    }
  }

  fn angle(self, job: &DrawJob) -> f32 {
    match self {
      Layer::Bottom => job.bottom_angle,
      Layer::Top => job.top_angle,
    }
  }

  pub fn field(self) -> &'static str {
    match self {
      Layer::Bottom => BOTTOM_FIELD,
      Layer::Top => TOP_FIELD,
    }
  }

  fn stroke(self, category: u8) -> (Tone, &'static str) {
    use Tone::*;
    match (self, category) {
      (Layer::Bottom, 1) => (Low, BRUSH_COARSE),
      (Layer::Bottom, 2) => (High, BRUSH_FINE),
      (Layer::Bottom, 3) => (High, BRUSH_COARSE),
      (Layer::Bottom, _) => (Background, BRUSH_FINE),
      (Layer::Top, 1) => (High, BRUSH_FINE),
      (Layer::Top, 2) => (High, BRUSH_COARSE),
      (Layer::Top, 3) => (Low, BRUSH_FINE),
      (Layer::Top, _) => (Background, BRUSH_COARSE),
    }
  }
}

/// Turns a draw job into backend calls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Painter {
  pub palette: Palette,
  pub style: StrokeStyle,
  pub visibility: Visibility,
  pub length_mode: LengthMode,
  pub grid: TileGrid,
  pub length_base: f32,
  pub top_multiplier: f32,
}

impl Painter {
  pub fn new(params: &Params, palette: Palette, style: StrokeStyle, length_mode: LengthMode, grid: TileGrid) -> Self {
    Self {
      palette,
      style,
      visibility: params.visibility(),
      length_mode,
      grid,
      length_base: params.brush_length_base as f32,
      top_multiplier: params.brush_length_top_multiplier as f32
    }
  }

  fn color(&self, tone: Tone) -> Color {
    match tone {
      Tone::Background => self.palette.background,
      Tone::High => self.palette.high,
      Tone::Low => self.palette.low,
    }
  }

  /// Stroke length in tile widths.
  pub fn length(&self, job: &DrawJob, layer: Layer) -> f32 {
    match (self.length_mode, layer) {
      (LengthMode::Field, Layer::Bottom) => job.bottom_length,
      (LengthMode::Field, Layer::Top) => job.top_length * self.top_multiplier,
      (LengthMode::Jitter, Layer::Bottom) => self.length_base,
      (LengthMode::Jitter, Layer::Top) => job.variation * self.length_base * self.top_multiplier,
    }
  }

  pub fn paint<B: BrushBackend + ?Sized>(&self, backend: &mut B, job: &DrawJob) {
    if self.visibility.tiles {
      backend.outline_tile(self.grid.bounds(job.tile));
    }
    if self.visibility.bottom {
      self.stroke(backend, job, Layer::Bottom);
    }
    if self.visibility.top {
      self.stroke(backend, job, Layer::Top);
    }
  }

  fn stroke<B: BrushBackend + ?Sized>(&self, backend: &mut B, job: &DrawJob, layer: Layer) {
    let category = layer.category(job);
    let tile_width = self.grid.tile_width();
    let length = self.length(job, layer) * tile_width;
    let (tone, brush) = layer.stroke(category);

    match self.style {
      StrokeStyle::Flow => {
        backend.set_stroke_color(self.color(tone));
        backend.select_brush(brush);
        backend.select_flow_field(layer.field());
        backend.draw_flow_line(PixelPoint::new(job.start.x - tile_width, job.start.y), length, 0.0);
      }
      StrokeStyle::Straight => {
        if category == 0 {
          return;
        }
        backend.set_stroke_color(self.color(tone));
        backend.select_brush(BRUSH_LINE);
        backend.select_flow_field(FLAT_FIELD);
        // canvas headings turn counter-clockwise, thumbnail lines turn clockwise
        backend.draw_flow_line(job.start, length, -layer.angle(job));
      }
    }
  }
}

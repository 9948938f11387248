use {
  super::{BrushBackend, BrushSpec, Color, FlowField, Surface, SurfaceFactory},
  crate::{error::ErrorKind, geometry::{PixelPoint, PixelSpace}},
  anyhow::Result,
  euclid::Box2D,
  std::collections::HashMap,
};

/// One flow line together with the state it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
  pub origin: PixelPoint,
  pub length: f32,
  pub drift: f32,
  pub color: Option<Color>,
  pub brush: Option<String>,
  pub field: Option<String>,
  /// selected field evaluated at `origin`
  pub angle: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
  SetBrush(String, BrushSpec),
  SetFlowField(String),
  SetStrokeColor(Color),
  SelectBrush(String),
  SelectFlowField(String),
  FlowLine(Stroke),
  Clear(Color),
  OutlineTile(Box2D<f32, PixelSpace>),
}

/// Backend that draws nothing and keeps a log of every call.
#[derive(Default)]
pub struct Recorder {
  size: u32,
  pub calls: Vec<Call>,
  pub brushes: HashMap<String, BrushSpec>,
  fields: HashMap<String, FlowField>,
  color: Option<Color>,
  brush: Option<String>,
  field: Option<String>,
}

impl Recorder {
  pub fn new(size: u32) -> Self {
    Self { size, ..Default::default() }
  }

  pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
    self.calls.iter().filter_map(|call| match call {
      Call::FlowLine(stroke) => Some(stroke),
      _ => None
    })
  }

  /// Strokes drawn since the last clear.
  pub fn visible_strokes(&self) -> Vec<&Stroke> {
    let start = self.calls.iter()
      .rposition(|call| matches!(call, Call::Clear(_)))
      .map_or(0, |i| i + 1);
    self.calls[start..].iter().filter_map(|call| match call {
      Call::FlowLine(stroke) => Some(stroke),
      _ => None
    }).collect()
  }

  pub fn field(&self, name: &str) -> Option<&FlowField> {
    self.fields.get(name)
  }
}

impl BrushBackend for Recorder {
  fn size(&self) -> u32 { self.size }

  fn set_brush(&mut self, name: &str, spec: BrushSpec) {
    self.brushes.insert(name.to_string(), spec);
    self.calls.push(Call::SetBrush(name.to_string(), spec));
  }

  fn set_flow_field(&mut self, name: &str, field: FlowField) {
    self.fields.insert(name.to_string(), field);
    self.calls.push(Call::SetFlowField(name.to_string()));
  }

  fn set_stroke_color(&mut self, color: Color) {
    self.color = Some(color);
    self.calls.push(Call::SetStrokeColor(color));
  }

  fn select_brush(&mut self, name: &str) {
    self.brush = Some(name.to_string());
    self.calls.push(Call::SelectBrush(name.to_string()));
  }

  fn select_flow_field(&mut self, name: &str) {
    self.field = Some(name.to_string());
    self.calls.push(Call::SelectFlowField(name.to_string()));
  }

  fn draw_flow_line(&mut self, origin: PixelPoint, length: f32, drift_angle: f32) {
    let angle = self.field.as_ref()
      .and_then(|name| self.fields.get(name))
      .map(|field| field(origin));
    self.calls.push(Call::FlowLine(Stroke {
      origin,
      length,
      drift: drift_angle,
      color: self.color,
      brush: self.brush.clone(),
      field: self.field.clone(),
      angle
    }));
  }

  fn clear(&mut self, color: Color) {
    self.calls.push(Call::Clear(color));
  }

  fn outline_tile(&mut self, bounds: Box2D<f32, PixelSpace>) {
    self.calls.push(Call::OutlineTile(bounds));
  }
}

impl Surface for Recorder {
  type Output = Vec<Stroke>;

  fn finish(self) -> Result<Vec<Stroke>> {
    Ok(self.strokes().cloned().collect())
  }
}

/// Creates [`Recorder`] surfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecorderFactory;

impl SurfaceFactory for RecorderFactory {
  type Surface = Recorder;

  fn create(&self, size: u32) -> Result<Recorder> {
    if size == 0 {
      return Err(ErrorKind::EmptySurface(size).into());
    }
    Ok(Recorder::new(size))
  }
}

//! Raster backend on top of `image`.
//!
//! A flow line is a trail of anti-aliased disc stamps. At every step the heading is the selected
//! field's angle plus the drift angle (degrees, counter-clockwise with y pointing down), the
//! stamp radius follows the brush pressure curve, and each stamp is shaken by up to
//! `vibration` pixels.

use {
  crate::{
    brush::{BrushBackend, BrushSpec, Color, FlowField, Surface, SurfaceFactory},
    error::ErrorKind,
    geometry::{PixelPoint, PixelSpace},
  },
  anyhow::{Context, Result},
  euclid::{Angle, Box2D, Vector2D as V2},
  image::{imageops, Rgba, RgbaImage},
  rand::{Rng, SeedableRng},
  rand_pcg::Pcg64,
  std::{collections::HashMap, path::Path},
  tracing::{debug, trace},
};

mod stamp;

pub use stamp::{outline_box, stamp_disc};

/// Finest stamp distance, pixels. Keeps dense brushes from stamping the same pixel hundreds
/// of times.
pub const MIN_STEP: f32 = 0.25;
pub const OUTLINE: Rgba<u8> = Rgba([40, 40, 40, 96]);

impl From<Color> for Rgba<u8> {
  fn from(color: Color) -> Self {
    Rgba(color.0)
  }
}

pub struct Canvas {
  image: RgbaImage,
  brushes: HashMap<String, BrushSpec>,
  fields: HashMap<String, FlowField>,
  color: Rgba<u8>,
  brush: Option<String>,
  field: Option<String>,
  rng: Pcg64,
}

impl Canvas {
  /// Transparent `size`×`size` canvas. `seed` drives the brush vibration.
  pub fn new(size: u32, seed: u64) -> Self {
    Self {
      image: RgbaImage::new(size, size),
      brushes: HashMap::new(),
      fields: HashMap::new(),
      color: Rgba([0, 0, 0, 255]),
      brush: None,
      field: None,
      rng: Pcg64::seed_from_u64(seed)
    }
  }

  pub fn image(&self) -> &RgbaImage { &self.image }
  pub fn into_image(self) -> RgbaImage { self.image }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    self.image.save(path)
      .with_context(|| format!("saving {}", path.display()))?;
    debug!(path = %path.display(), "canvas saved");
    Ok(())
  }

  fn heading(&self, at: PixelPoint, drift: f32) -> V2<f32, PixelSpace> {
    let field = self.field.as_ref()
      .and_then(|name| self.fields.get(name))
      .map_or(0.0, |field| field(at));
    let angle = Angle::degrees(field + drift);
    V2::new(angle.radians.cos(), -angle.radians.sin())
  }
}

impl BrushBackend for Canvas {
  fn size(&self) -> u32 { self.image.width() }

  fn set_brush(&mut self, name: &str, spec: BrushSpec) {
    self.brushes.insert(name.to_string(), spec);
  }

  fn set_flow_field(&mut self, name: &str, field: FlowField) {
    self.fields.insert(name.to_string(), field);
  }

  fn set_stroke_color(&mut self, color: Color) {
    self.color = color.into();
  }

  fn select_brush(&mut self, name: &str) {
    self.brush = Some(name.to_string());
  }

  fn select_flow_field(&mut self, name: &str) {
    self.field = Some(name.to_string());
  }

  fn draw_flow_line(&mut self, origin: PixelPoint, length: f32, drift_angle: f32) {
    let spec = match self.brush.as_ref().and_then(|name| self.brushes.get(name)) {
      Some(spec) => *spec,
      None => {
        trace!(brush = ?self.brush, "no brush selected, stroke skipped");
        return;
      }
    };
    if length <= 0.0 || spec.weight <= 0.0 {
      return;
    }

    let mut color = self.color;
    color.0[3] = (color.0[3] as f32 * (spec.opacity / 100.0).clamp(0.0, 1.0)) as u8;
    let step = (spec.weight * spec.spacing).max(MIN_STEP);
    let steps = (length / step).ceil() as usize;

    let mut at = origin;
    for i in 0..=steps {
      let t = i as f32 / steps.max(1) as f32;
      let radius = 0.5 * spec.weight * spec.pressure.at(t);
      let shake = if spec.vibration > 0.0 {
        V2::new(
          self.rng.gen_range(-spec.vibration..=spec.vibration),
          self.rng.gen_range(-spec.vibration..=spec.vibration)
        )
      } else {
        V2::zero()
      };
      stamp_disc(&mut self.image, at + shake, radius, color);
      at += self.heading(at, drift_angle) * step;
    }
  }

  fn clear(&mut self, color: Color) {
    let color: Rgba<u8> = color.into();
    self.image.pixels_mut().for_each(|pixel| *pixel = color);
  }

  fn outline_tile(&mut self, bounds: Box2D<f32, PixelSpace>) {
    outline_box(&mut self.image, bounds, OUTLINE);
  }
}

impl Surface for Canvas {
  type Output = RgbaImage;

  fn finish(self) -> Result<RgbaImage> {
    Ok(self.image)
  }
}

/// Creates [`Canvas`] surfaces, all sharing one vibration seed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasFactory {
  pub seed: u64,
}

impl SurfaceFactory for CanvasFactory {
  type Surface = Canvas;

  fn create(&self, size: u32) -> Result<Canvas> {
    if size == 0 {
      return Err(ErrorKind::EmptySurface(size).into());
    }
    Ok(Canvas::new(size, self.seed))
  }
}

/// Tile images into a grid `columns` wide, `gap` pixels apart. Missing entries stay blank.
pub fn contact_sheet(images: &[Option<&RgbaImage>], columns: u32, gap: u32, background: Color) -> RgbaImage {
  let columns = columns.max(1);
  let rows = (images.len() as u32 + columns - 1) / columns;
  let (cell_w, cell_h) = images.iter()
    .flatten()
    .map(|image| image.dimensions())
    .fold((0, 0), |(w, h), (iw, ih)| (w.max(iw), h.max(ih)));

  let width = columns * cell_w + (columns + 1) * gap;
  let height = rows * cell_h + (rows + 1) * gap;
  let mut sheet = RgbaImage::from_pixel(width, height, background.into());

  images.iter().enumerate().for_each(|(i, image)| {
    if let Some(image) = image {
      let (col, row) = (i as u32 % columns, i as u32 / columns);
      let x = gap + col * (cell_w + gap);
      let y = gap + row * (cell_h + gap);
      imageops::overlay(&mut sheet, *image, x as i64, y as i64);
    }
  });
  sheet
}

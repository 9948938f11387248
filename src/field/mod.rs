//! Per-pixel maps derived from coherent noise: area categories, flow angles and brush lengths.
//!
//! Maps are built at full canvas resolution on every regeneration and replaced wholesale,
//! never edited in place. The planner samples them once per tile.

use {
  crate::{
    geometry::PixelSpace,
    noise_field::NoiseField,
    params::Params
  },
  euclid::Point2D,
  num_traits::Float,
  rayon::prelude::*,
};

mod classify;
mod angle;
mod length;
#[cfg(test)] mod tests;

pub use {
  classify::Classifier,
  angle::{AngleRange, flow_field, flat_field},
  length::{LengthBand, length_factor},
};

/// Linear map of `v` from `[a0, a1]` onto `[b0, b1]`, unclamped.
pub fn remap<T: Float>(v: T, a0: T, a1: T, b0: T, b1: T) -> T {
  b0 + (v - a0) / (a1 - a0) * (b1 - b0)
}

/// Row-major 2D array, one entry per canvas pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarMap<T> {
  width: usize,
  height: usize,
  data: Vec<T>,
}

impl <T: Copy + Send + Sync> ScalarMap<T> {
  /// Evaluate `f(x, y)` for every pixel. Rows are filled in parallel, the result does not
  /// depend on scheduling.
  pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> T + Sync) -> Self {
    let f = &f;
    let data = (0..height)
      .into_par_iter()
      .flat_map_iter(|y| (0..width).map(move |x| f(x, y)))
      .collect::<Vec<_>>();
    Self { width, height, data }
  }

  pub fn width(&self) -> usize { self.width }
  pub fn height(&self) -> usize { self.height }

  pub fn get(&self, x: usize, y: usize) -> Option<T> {
    (x < self.width && y < self.height)
      .then(|| self.data[y * self.width + x])
  }

  /// Value at `pixel`, or `neutral` when the pixel lies outside the map.
  pub fn sample_or(&self, pixel: Point2D<usize, PixelSpace>, neutral: T) -> T {
    self.get(pixel.x, pixel.y).unwrap_or(neutral)
  }
}

pub fn area_map(noise: &NoiseField, size: usize, t: f64, scale: f64, classifier: &Classifier) -> ScalarMap<u8> {
  ScalarMap::from_fn(size, size, |x, y|
    classifier.classify(noise.sample(x as f64, y as f64, t, scale)))
}

pub fn angle_map(noise: &NoiseField, size: usize, t: f64, scale: f64, range: AngleRange) -> ScalarMap<f32> {
  ScalarMap::from_fn(size, size, |x, y|
    range.angle(noise.sample(x as f64, y as f64, t, scale)) as f32)
}

pub fn length_map(noise: &NoiseField, size: usize, t: f64, scale: f64, band: LengthBand) -> ScalarMap<f32> {
  ScalarMap::from_fn(size, size, |x, y|
    band.length(noise.sample(x as f64, y as f64, t, scale)) as f32)
}

/// All maps of one generation pass. Top-layer scales are the bottom scales times their
/// top/bottom multiplier.
#[derive(Debug, Clone)]
pub struct FieldMaps {
  pub bottom_area: ScalarMap<u8>,
  pub top_area: ScalarMap<u8>,
  pub bottom_angle: ScalarMap<f32>,
  pub top_angle: ScalarMap<f32>,
  pub bottom_length: ScalarMap<f32>,
  pub top_length: ScalarMap<f32>,
}

impl FieldMaps {
  pub fn generate(noise: &NoiseField, params: &Params, angle_range: AngleRange, size: u32, t: f64) -> Self {
    let size = size as usize;
    let classifier = params.classifier();
    let band = params.length_band();
    Self {
      bottom_area: area_map(noise, size, t, params.area_noise_scale, &classifier),
      top_area: area_map(noise, size, t, params.area_noise_scale * params.area_noise_multiplier, &classifier),
      bottom_angle: angle_map(noise, size, t, params.angle_noise_scale, angle_range),
      top_angle: angle_map(noise, size, t, params.angle_noise_scale * params.angle_noise_multiplier, angle_range),
      bottom_length: length_map(noise, size, t, params.length_noise_scale, band),
      top_length: length_map(noise, size, t, params.length_noise_scale * params.length_noise_multiplier, band),
    }
  }
}

//! Walks the tile grid and turns sampled fields into draw jobs.
//!
//! Fields are computed per pixel but read once per tile, at the tile's floored top-left pixel.
//! Stroke variation is therefore coherent across a tile and coarse across the canvas. Each
//! job starts at a random point inside its tile, which keeps the grid from showing.

use {
  crate::{
    field::FieldMaps,
    geometry::{PixelPoint, TileGrid, TilePoint}
  },
  rand::Rng,
  std::{ops::Range, sync::Arc},
};

#[cfg(test)] mod tests;

/// Range of the per-job random length factor.
pub const VARIATION: Range<f32> = 0.5..2.0;

/// Everything needed to draw one tile's strokes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawJob {
  pub tile: TilePoint,
  pub start: PixelPoint,
  pub bottom_area: u8,
  pub top_area: u8,
  /// degrees
  pub bottom_angle: f32,
  pub top_angle: f32,
  /// brush length multipliers, in tile widths
  pub bottom_length: f32,
  pub top_length: f32,
  /// random length factor drawn at plan time, replays identically
  pub variation: f32,
}

/// Ordered jobs of one generation, row-major.
#[derive(Debug, Clone)]
pub struct Plan {
  pub grid: TileGrid,
  pub jobs: Arc<[DrawJob]>,
}

/// Values used where a tile's sample pixel falls outside the maps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Neutral {
  pub area: u8,
  pub angle: f32,
  pub length: f32,
}

impl Neutral {
  pub fn with_length(length: f32) -> Self {
    Self { area: 0, angle: 0.0, length }
  }
}

fn jitter(rng: &mut impl Rng, range: Range<f32>) -> f32 {
  if range.start < range.end {
    rng.gen_range(range)
  } else {
    range.start
  }
}

/// Produces exactly `tiles²` jobs in row-major order. Random draws per tile, in order: start x,
/// start y, length variation.
pub fn plan(grid: TileGrid, maps: &FieldMaps, neutral: Neutral, rng: &mut impl Rng) -> Plan {
  let jobs = grid.iter()
    .map(|tile| {
      let bounds = grid.bounds(tile);
      let start = PixelPoint::new(
        jitter(rng, bounds.min.x..bounds.max.x),
        jitter(rng, bounds.min.y..bounds.max.y)
      );
      let variation = jitter(rng, VARIATION);
      let px = grid.sample_pixel(tile);

      DrawJob {
        tile,
        start,
        bottom_area: maps.bottom_area.sample_or(px, neutral.area),
        top_area: maps.top_area.sample_or(px, neutral.area),
        bottom_angle: maps.bottom_angle.sample_or(px, neutral.angle),
        top_angle: maps.top_angle.sample_or(px, neutral.angle),
        bottom_length: maps.bottom_length.sample_or(px, neutral.length),
        top_length: maps.top_length.sample_or(px, neutral.length),
        variation
      }
    })
    .collect::<Arc<[_]>>();

  Plan { grid, jobs }
}

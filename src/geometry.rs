//! Canvas and tile coordinates.
//!
//! The origin of coordinate system is in top-left corner. Canvas coordinates are pixels,
//! grid coordinates count tiles.

use euclid::{Box2D, Point2D, Size2D};

/// Pixel coordinate basis
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelSpace;
/// Tile grid coordinate basis
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileSpace;

pub type PixelPoint = Point2D<f32, PixelSpace>;
pub type TilePoint = Point2D<u32, TileSpace>;

/// Square N×N partition of a square canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileGrid {
  pub canvas: Size2D<u32, PixelSpace>,
  pub tiles: u32,
}

impl TileGrid {
  pub fn new(canvas_size: u32, tiles: u32) -> Self {
    Self {
      canvas: Size2D::splat(canvas_size),
      tiles: tiles.max(1)
    }
  }

  pub fn tile_width(&self) -> f32 {
    self.canvas.width as f32 / self.tiles as f32
  }

  pub fn tile_count(&self) -> usize {
    (self.tiles as usize).pow(2)
  }

  /// Pixel bounds of a tile, `[min, max)`.
  pub fn bounds(&self, tile: TilePoint) -> Box2D<f32, PixelSpace> {
    let w = self.tile_width();
    let min = Point2D::new(tile.x as f32 * w, tile.y as f32 * w);
    Box2D::new(min, min + Size2D::splat(w))
  }

  /// Floored top-left pixel of a tile, the point its fields are sampled at.
  pub fn sample_pixel(&self, tile: TilePoint) -> Point2D<usize, PixelSpace> {
    self.bounds(tile).min.floor().cast()
  }

  /// Row-major (y outer, x inner) tile iterator.
  pub fn iter(&self) -> impl Iterator<Item = TilePoint> {
    let n = self.tiles;
    itertools::iproduct!(0..n, 0..n).map(|(y, x)| TilePoint::new(x, y))
  }
}

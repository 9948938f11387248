#![allow(non_snake_case)]
use {
  crate::geometry::{PixelPoint, PixelSpace},
  euclid::{Box2D, Point2D},
  image::{Pixel, Rgba, RgbaImage},
};

/// Signed distance from `pixel` to a disc, negative inside.
fn disc_sdf(pixel: PixelPoint, center: PixelPoint, radius: f32) -> f32 {
  (pixel - center).length() - radius
}

/// Pixels of `image` covered by `bounds`, or `None` off canvas.
fn clip(image: &RgbaImage, bounds: Box2D<f32, PixelSpace>) -> Option<Box2D<u32, PixelSpace>> {
  let (w, h) = image.dimensions();
  bounds
    .round_out()
    .intersection(&Box2D::new(Point2D::zero(), Point2D::new(w as f32, h as f32)))
    .map(|b| b.to_u32())
}

/// Anti-aliased disc, alpha-blended over the existing pixels.
pub fn stamp_disc(image: &mut RgbaImage, center: PixelPoint, radius: f32, color: Rgba<u8>) {
  let Δp = 1.0;
  let reach = euclid::Vector2D::splat(radius + Δp);
  let bounds = match clip(image, Box2D::new(center - reach, center + reach)) {
    Some(bounds) => bounds,
    None => return
  };

  itertools::iproduct!(bounds.y_range(), bounds.x_range())
    .for_each(|(y, x)| {
      let sdf = disc_sdf(PixelPoint::new(x as f32 + 0.5, y as f32 + 0.5), center, radius);
      let pixel = image.get_pixel_mut(x, y);
      *pixel = sdf_overlay_aa(sdf, Δp, *pixel, color);
    });
}

/// One pixel wide rectangle border.
pub fn outline_box(image: &mut RgbaImage, bounds: Box2D<f32, PixelSpace>, color: Rgba<u8>) {
  let bounds = match clip(image, bounds) {
    Some(bounds) if !bounds.is_empty() => bounds,
    _ => return
  };
  let (x0, y0) = (bounds.min.x, bounds.min.y);
  let (x1, y1) = (bounds.max.x - 1, bounds.max.y - 1);
  let mut blend = |x: u32, y: u32| image.get_pixel_mut(x, y).blend(&color);

  for x in x0..=x1 {
    blend(x, y0);
    if y1 != y0 { blend(x, y1); }
  }
  for y in (y0 + 1)..y1 {
    blend(x0, y);
    if x1 != x0 { blend(x1, y); }
  }
}

fn sdf_overlay_aa(sdf: f32, Δp: f32, mut col1: Rgba<u8>, mut col2: Rgba<u8>) -> Rgba<u8> {
  let Δf = (0.5 * Δp - sdf) // antialias
    .clamp(0.0, Δp);
  let alpha = Δf / Δp;
  if alpha <= 0.0 {
    return col1;
  }
  // overlay blending with premultiplied alpha
  col2.0[3] = ((col2.0[3] as f32) * alpha) as u8;
  col1.blend(&col2);
  col1
}

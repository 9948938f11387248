use {
  crate::{
    brush::{BrushBackend, BrushSpec, Pressure, Surface, SurfaceFactory},
    config::RendererConfig,
    field::flat_field,
    params::Params,
    renderer::{build_plan, Painter, Seeds, StrokeStyle, BRUSH_LINE, FLAT_FIELD}
  },
  anyhow::Result,
};

/// Draw every tile of `params` at once, straight strokes, no progressive reveal.
pub fn render<B: BrushBackend + ?Sized>(backend: &mut B, look: &RendererConfig, params: &Params, seeds: Seeds) {
  let size = backend.size();
  backend.clear(look.palette.background);
  backend.set_brush(BRUSH_LINE, BrushSpec {
    pressure: Pressure { curve: [0.0, 0.0], min_max: [1.0, 1.0] },
    ..BrushSpec::standard(params.brush_weight as f32, 0.0, 0.1)
  });
  backend.set_flow_field(FLAT_FIELD, flat_field());

  let plan = build_plan(look, params, seeds, size);
  let painter = Painter::new(params, look.palette, StrokeStyle::Straight, look.length_mode, plan.grid);
  plan.jobs.iter().for_each(|job| painter.paint(backend, job));
}

/// Fresh surface, one-shot render, finished output.
pub fn render_surface<F: SurfaceFactory>(
  factory: &F,
  size: u32,
  look: &RendererConfig,
  params: &Params,
  seeds: Seeds
) -> Result<<F::Surface as Surface>::Output> {
  let mut surface = factory.create(size)?;
  render(&mut surface, look, params, seeds);
  surface.finish()
}

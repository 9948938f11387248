//! Owns the live configuration and drives one canvas through regenerations.
//!
//! - [`Renderer::regenerate`]: merge parameters, draw fresh seeds, rebuild every map and the job
//!   list, clear the canvas and start a progressive reveal.
//! - [`Renderer::refresh`]: merge the layer visibility switches and replay the existing job
//!   list on a cleared canvas. Noise, jitter and flow fields are kept, so the layout stays
//!   identical.
//! - [`Renderer::tick`]: draw the next batch; call once per frame.

use {
  crate::{
    brush::{BrushBackend, BrushSpec},
    config::RendererConfig,
    field::{flow_field, FieldMaps},
    geometry::TileGrid,
    handoff::{self, KeyValueStore},
    noise_field::NoiseField,
    params::{ParamBag, Params, Visibility},
    planner::{self, DrawJob, Neutral, Plan},
    scheduler::Scheduler
  },
  rand::{Rng, SeedableRng},
  rand_pcg::Pcg64,
  tracing::{debug, info},
};

mod paint;
#[cfg(test)] mod tests;

pub use paint::{
  Layer, LengthMode, Painter, StrokeStyle,
  BRUSH_COARSE, BRUSH_FINE, BRUSH_LINE, BOTTOM_FIELD, TOP_FIELD, FLAT_FIELD
};

/// Upper bound (exclusive) of drawn noise seeds.
pub const SEED_RANGE: u32 = 1_000_000_000;

/// Noise seed and the jitter seed derived from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Seeds {
  pub noise: u32,
  pub jitter: u64,
}

impl Seeds {
  pub fn from_seed(seed: u32) -> Self {
    Self { noise: seed, jitter: seed as u64 + 1 }
  }

  pub fn noise_field(&self, detail: crate::noise_field::NoiseDetail) -> NoiseField {
    NoiseField::with_detail(self.noise, detail)
  }

  pub fn jitter_rng(&self) -> Pcg64 {
    Pcg64::seed_from_u64(self.jitter)
  }
}

/// The two named stroke brushes, `b1` coarse-spaced and `b2` dense.
pub fn brush_presets(params: &Params) -> [(&'static str, BrushSpec); 2] {
  let weight = params.brush_weight as f32;
  let vibration = params.brush_vibration as f32;
  [
    (BRUSH_COARSE, BrushSpec::standard(weight, vibration, 0.1)),
    (BRUSH_FINE, BrushSpec::standard(weight, vibration, 0.01)),
  ]
}

/// Maps and job list for `params` on a `size`×`size` canvas. Synchronous.
pub fn build_plan(config: &RendererConfig, params: &Params, seeds: Seeds, size: u32) -> Plan {
  let noise = seeds.noise_field(config.noise);
  let maps = FieldMaps::generate(&noise, params, config.angle_range, size, config.time);
  let grid = TileGrid::new(size, params.tiles);
  let neutral = Neutral::with_length(params.brush_length_base as f32);
  planner::plan(grid, &maps, neutral, &mut seeds.jitter_rng())
}

pub struct Renderer<B> {
  config: RendererConfig,
  backend: B,
  rng: Pcg64,
  seeds: Seeds,
  plan: Option<Plan>,
  scheduler: Scheduler<DrawJob>,
}

impl <B: BrushBackend> Renderer<B> {
  /// Seeds are drawn from OS entropy.
  pub fn new(config: RendererConfig, backend: B) -> Self {
    Self::with_rng(config, backend, Pcg64::from_entropy())
  }

  /// Reproducible seed sequence.
  pub fn with_seed(config: RendererConfig, backend: B, seed: u64) -> Self {
    Self::with_rng(config, backend, Pcg64::seed_from_u64(seed))
  }

  fn with_rng(mut config: RendererConfig, backend: B, rng: Pcg64) -> Self {
    config.params.clamp_all();
    let mut renderer = Self {
      config,
      backend,
      rng,
      seeds: Seeds::from_seed(0),
      plan: None,
      scheduler: Scheduler::new()
    };
    renderer.configure_brushes();
    renderer.reseed();
    renderer
  }

  pub fn config(&self) -> &RendererConfig { &self.config }
  pub fn params(&self) -> &Params { &self.config.params }
  pub fn seeds(&self) -> Seeds { self.seeds }
  pub fn plan(&self) -> Option<&Plan> { self.plan.as_ref() }
  pub fn scheduler(&self) -> &Scheduler<DrawJob> { &self.scheduler }
  pub fn backend(&self) -> &B { &self.backend }
  pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }
  pub fn into_backend(self) -> B { self.backend }

  /// Merge a parameter bag and reconfigure brushes and flow fields. Returns the number of
  /// fields taken.
  pub fn apply(&mut self, bag: &ParamBag) -> usize {
    let applied = self.merge(bag);
    self.initialize_flow_fields();
    applied
  }

  /// Draw a new noise seed, the jitter seed is the next integer.
  pub fn reseed(&mut self) -> Seeds {
    self.seeds = Seeds::from_seed(self.rng.gen_range(0..SEED_RANGE));
    self.initialize_flow_fields();
    debug!(noise = self.seeds.noise, jitter = self.seeds.jitter, "reseeded");
    self.seeds
  }

  pub fn regenerate(&mut self, bag: &ParamBag) {
    // reseed registers the flow fields
    self.merge(bag);
    self.reseed();
    self.generate();
  }

  /// Rebuild maps and jobs from the current parameters and seeds, then start drawing.
  /// Whatever was still rendering is abandoned.
  pub fn generate(&mut self) {
    let size = self.backend.size();
    let plan = build_plan(&self.config, &self.config.params, self.seeds, size);
    info!(
      noise_seed = self.seeds.noise,
      tiles = plan.grid.tiles,
      jobs = plan.jobs.len(),
      "regenerating"
    );
    self.backend.clear(self.config.palette.background);
    self.scheduler.install(plan.jobs.clone());
    self.plan = Some(plan);
  }

  /// Merge the layer visibility switches of `bag` and replay the current jobs on a cleared
  /// canvas. Every other field is ignored, the layout on screen stays the same.
  pub fn refresh(&mut self, bag: &ParamBag) {
    let flags = bag.iter()
      .filter(|(key, _)| Visibility::KEYS.contains(&key.as_str()))
      .map(|(key, value)| (key.clone(), value.clone()))
      .collect::<ParamBag>();
    if flags.len() < bag.len() {
      debug!(ignored = bag.len() - flags.len(), "refresh takes visibility switches only");
    }
    self.config.params.apply(&flags);
    if self.plan.is_none() {
      return;
    }
    self.backend.clear(self.config.palette.background);
    self.scheduler.replay();
    debug!(jobs = self.scheduler.len(), "replaying");
  }

  /// Draw the next batch. Returns whether jobs remain.
  pub fn tick(&mut self) -> bool {
    let Self { config, backend, plan, scheduler, .. } = self;
    let grid = match plan {
      Some(plan) => plan.grid,
      None => return false
    };
    let painter = Painter::new(
      &config.params,
      config.palette,
      StrokeStyle::Flow,
      config.length_mode,
      grid
    );
    scheduler.tick(|job| painter.paint(backend, job));
    scheduler.is_rendering()
  }

  /// Tick until drained, returns the number of ticks.
  pub fn finish(&mut self) -> usize {
    let mut ticks = 0;
    while self.scheduler.is_rendering() {
      self.tick();
      ticks += 1;
    }
    ticks
  }

  /// Apply a pending explorer hand-off, if any.
  pub fn load_handoff(&mut self, store: &mut (impl KeyValueStore + ?Sized)) -> bool {
    match handoff::take_selection(store) {
      Some(bag) => {
        let applied = self.apply(&bag);
        info!(applied, "applied explorer selection");
        true
      }
      None => false
    }
  }

  fn merge(&mut self, bag: &ParamBag) -> usize {
    let applied = self.config.params.apply(bag);
    self.configure_brushes();
    applied
  }

  fn configure_brushes(&mut self) {
    for (name, spec) in brush_presets(&self.config.params) {
      self.backend.set_brush(name, spec);
    }
  }

  fn initialize_flow_fields(&mut self) {
    let noise = self.seeds.noise_field(self.config.noise);
    let params = &self.config.params;
    let (range, t) = (self.config.angle_range, self.config.time);
    self.backend.set_flow_field(
      BOTTOM_FIELD,
      flow_field(noise.clone(), params.angle_noise_scale, range, t)
    );
    self.backend.set_flow_field(
      TOP_FIELD,
      flow_field(noise, params.angle_noise_scale * params.angle_noise_multiplier, range, t)
    );
  }
}

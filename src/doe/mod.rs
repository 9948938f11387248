//! Design-of-experiments explorer.
//!
//! Each round shows a batch of candidates sampled around the previous pick. Picking one makes it
//! the new focus and shrinks the sampling spread by `decay`; after `rounds` picks the session
//! is finished and the last pick can be handed to the main renderer.
//!
//! ```text
//! round 1: focus = domain midpoints, spread = 1.2
//! round 2: focus = pick #1,          spread = 1.2 · 0.45
//! round 3: focus = pick #2,          spread = 1.2 · 0.45²
//! ```

use {
  crate::{
    brush::{Surface, SurfaceFactory},
    config::RendererConfig,
    error::ErrorKind,
    handoff::{self, KeyValueStore},
    params::Params,
    renderer::Seeds
  },
  anyhow::{Context, Result},
  rand::{Rng, SeedableRng},
  rand_pcg::Pcg64,
  rayon::prelude::*,
  serde::{Deserialize, Serialize},
  tracing::{debug, info, warn},
};

mod sample;
pub mod thumbnail;

pub use sample::sample_params;

pub const ROUNDS: u32 = 3;
pub const BATCH_SIZE: usize = 8;
/// Upper bound (exclusive) of thumbnail seeds.
pub const THUMBNAIL_SEED_RANGE: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoeConfig {
  pub rounds: u32,
  pub batch_size: usize,
  /// thumbnail side, pixels
  pub canvas_size: u32,
  pub initial_spread: f64,
  pub decay: f64,
  /// render a batch on the rayon pool
  pub parallel: bool,
  /// Palette, noise and length mode of the thumbnails. Its non-tunable parameters (thresholds,
  /// visibility) seed the first round.
  pub renderer: RendererConfig,
}

impl Default for DoeConfig {
  fn default() -> Self {
    Self {
      rounds: ROUNDS,
      batch_size: BATCH_SIZE,
      canvas_size: 300,
      initial_spread: 1.2,
      decay: 0.45,
      parallel: true,
      renderer: RendererConfig::default()
    }
  }
}

impl DoeConfig {
  pub fn from_toml_str(s: &str) -> Result<Self> {
    let mut config: Self = toml::from_str(s).context("parsing explorer config")?;
    config.rounds = config.rounds.max(1);
    config.batch_size = config.batch_size.max(1);
    config.renderer.params.clamp_all();
    Ok(config)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Preview<T> {
  Ready(T),
  /// the backend failed for this candidate only
  Failed(String),
}

impl <T> Preview<T> {
  pub fn ready(&self) -> Option<&T> {
    match self {
      Preview::Ready(output) => Some(output),
      Preview::Failed(_) => None
    }
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, Preview::Failed(_))
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
  pub params: Params,
  pub seeds: Seeds,
  pub preview: Preview<T>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
  AwaitingSelection,
  Finished,
}

/// Outcome of [`Session::select`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Progress {
  /// a new batch is shown for this round
  Round(u32),
  Finished,
}

pub type Output<F> = <<F as SurfaceFactory>::Surface as Surface>::Output;

pub struct Session<F: SurfaceFactory> {
  config: DoeConfig,
  factory: F,
  rng: Pcg64,
  round: u32,
  spread: f64,
  focus: Option<Params>,
  selection: Option<Params>,
  phase: Phase,
  candidates: Vec<Candidate<Output<F>>>,
}

impl <F: SurfaceFactory> Session<F> {
  /// Starts round 1 right away.
  pub fn new(config: DoeConfig, factory: F, seed: u64) -> Self {
    let mut session = Self {
      spread: config.initial_spread,
      config,
      factory,
      rng: Pcg64::seed_from_u64(seed),
      round: 1,
      focus: None,
      selection: None,
      phase: Phase::AwaitingSelection,
      candidates: vec![]
    };
    session.restart();
    session
  }

  pub fn config(&self) -> &DoeConfig { &self.config }
  pub fn round(&self) -> u32 { self.round }
  pub fn spread(&self) -> f64 { self.spread }
  pub fn focus(&self) -> Option<&Params> { self.focus.as_ref() }
  pub fn selection(&self) -> Option<&Params> { self.selection.as_ref() }
  pub fn phase(&self) -> Phase { self.phase }
  pub fn is_finished(&self) -> bool { self.phase == Phase::Finished }
  pub fn candidates(&self) -> &[Candidate<Output<F>>] { &self.candidates }

  /// Back to round 1 with the initial spread and no focus.
  pub fn restart(&mut self) {
    self.round = 1;
    self.spread = self.config.initial_spread;
    self.focus = None;
    self.selection = None;
    self.phase = Phase::AwaitingSelection;
    info!(rounds = self.config.rounds, "explorer session started");
    self.render_batch();
  }

  /// New batch for the current round. On round 1 this is a full restart.
  pub fn reroll(&mut self) -> Result<()> {
    if self.is_finished() {
      return Err(ErrorKind::SessionFinished(self.config.rounds).into());
    }
    if self.round == 1 {
      self.restart();
    } else {
      self.render_batch();
    }
    Ok(())
  }

  /// Pick candidate `index` of the current batch.
  pub fn select(&mut self, index: usize) -> Result<Progress> {
    if self.is_finished() {
      return Err(ErrorKind::SessionFinished(self.config.rounds).into());
    }
    let picked = self.candidates.get(index)
      .ok_or(ErrorKind::NoSuchCandidate { index, batch: self.candidates.len() })?
      .params
      .clone();
    debug!(round = self.round, index, "candidate selected");

    self.selection = Some(picked.clone());
    self.focus = Some(picked);
    self.spread *= self.config.decay;
    self.round += 1;

    if self.round > self.config.rounds {
      self.phase = Phase::Finished;
      self.candidates.clear();
      info!("explorer session finished");
      return Ok(Progress::Finished);
    }
    self.render_batch();
    Ok(Progress::Round(self.round))
  }

  /// The last pick, once every round is done.
  pub fn final_selection(&self) -> Option<&Params> {
    match self.phase {
      Phase::Finished => self.selection.as_ref(),
      Phase::AwaitingSelection => None
    }
  }

  /// Write the final pick for the main renderer.
  pub fn hand_off(&self, store: &mut (impl KeyValueStore + ?Sized)) -> Result<()> {
    let params = self.final_selection()
      .context("no final selection to hand off")?;
    handoff::write_selection(store, params)?;
    info!("selection handed off");
    Ok(())
  }

  pub fn status(&self) -> String {
    match self.phase {
      Phase::AwaitingSelection => format!("Round {}/{} • Pick one", self.round, self.config.rounds),
      Phase::Finished => "Finished all rounds".to_string()
    }
  }

  fn render_batch(&mut self) {
    self.selection = None;
    let base = &self.config.renderer.params;
    // sample sequentially so the batch only depends on the session seed
    let drafts = (0..self.config.batch_size)
      .map(|_| {
        let params = sample_params(base, self.focus.as_ref(), self.spread, &mut self.rng);
        let seeds = Seeds::from_seed(self.rng.gen_range(0..THUMBNAIL_SEED_RANGE));
        (params, seeds)
      })
      .collect::<Vec<_>>();

    let (factory, config) = (&self.factory, &self.config);
    let render = |(params, seeds): (Params, Seeds)| {
      let preview = match thumbnail::render_surface(factory, config.canvas_size, &config.renderer, &params, seeds) {
        Ok(output) => Preview::Ready(output),
        Err(err) => {
          warn!(noise_seed = seeds.noise, "thumbnail failed: {:#}", err);
          Preview::Failed(format!("{:#}", err))
        }
      };
      Candidate { params, seeds, preview }
    };
    self.candidates = if config.parallel {
      drafts.into_par_iter().map(render).collect()
    } else {
      drafts.into_iter().map(render).collect()
    };
    debug!(round = self.round, spread = self.spread, batch = self.candidates.len(), "batch rendered");
  }
}

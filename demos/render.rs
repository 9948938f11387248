//! Render one image, frame by frame, and save it as PNG.
//!
//! `cargo run --release --example render --features drawing -- --tiles 120 --seed 7 -o out.png`
//!
//! A pending explorer pick in the store file (see the `doe` demo) is applied before rendering.

use {
  brushfield::{
    config::RendererConfig,
    drawing::Canvas,
    error::{self, Result},
    handoff::JsonFileStore,
    params::ParamBag,
    renderer::Renderer
  },
  clap::Parser,
  serde_json::Value,
  std::{path::PathBuf, time::Instant},
  tracing::info,
  tracing_subscriber::EnvFilter,
};

#[derive(Parser, Debug)]
#[command(about = "Noise-driven brush stroke field")]
struct Args {
  /// TOML renderer config
  #[arg(short, long)]
  config: Option<PathBuf>,
  /// hand-off store shared with the explorer
  #[arg(long, default_value = "brushfield-store.json")]
  store: PathBuf,
  /// parameter overrides as a JSON object, e.g. '{"tiles": 80}'
  #[arg(short, long)]
  params: Option<String>,
  #[arg(long)]
  tiles: Option<u32>,
  /// seed of the noise seed sequence, random if absent
  #[arg(long)]
  seed: Option<u64>,
  #[arg(short, long, default_value = "out.png")]
  output: PathBuf,
  /// open the result in the default viewer
  #[arg(long)]
  open: bool,
}

fn overrides(args: &Args) -> Result<ParamBag> {
  let mut bag = match &args.params {
    Some(json) => match serde_json::from_str(json)? {
      Value::Object(bag) => bag,
      _ => error::bail!("--params must be a JSON object")
    },
    None => ParamBag::new()
  };
  if let Some(tiles) = args.tiles {
    bag.insert("tiles".to_string(), tiles.into());
  }
  Ok(bag)
}

fn run(args: Args) -> Result<()> {
  let config = match &args.config {
    Some(path) => RendererConfig::load(path)?,
    None => RendererConfig::default()
  };
  let canvas = Canvas::new(config.canvas_size, args.seed.unwrap_or(0));
  let mut renderer = match args.seed {
    Some(seed) => Renderer::with_seed(config, canvas, seed),
    None => Renderer::new(config, canvas)
  };
  renderer.load_handoff(&mut JsonFileStore::new(&args.store));

  let t0 = Instant::now();
  renderer.regenerate(&overrides(&args)?);
  let frames = renderer.finish();
  info!(frames, elapsed = ?t0.elapsed(), "render finished");

  renderer.backend().save(&args.output)?;
  info!(path = %args.output.display(), "saved");
  if args.open {
    open::that(&args.output)?;
  }
  Ok(())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  if let Err(err) = run(Args::parse()) {
    error::display(&err);
    std::process::exit(1);
  }
}

//! Terminal front end of the explorer.
//!
//! Every round writes a contact sheet of numbered thumbnails (left to right, top to bottom,
//! starting at 0) and asks for a pick on stdin. `r` re-rolls the round, `s` restarts, `q` quits.
//! The final pick goes to the store file, where the `render` demo picks it up.

use {
  brushfield::{
    doe::{DoeConfig, Preview, Progress, Session},
    drawing::{contact_sheet, CanvasFactory},
    error::{self, Result},
    handoff::JsonFileStore,
  },
  clap::Parser,
  std::{io::{self, BufRead, Write}, path::PathBuf},
  tracing::{info, warn},
  tracing_subscriber::EnvFilter,
};

#[derive(Parser, Debug)]
#[command(about = "Pick the best of eight, three times")]
struct Args {
  /// TOML explorer config
  #[arg(short, long)]
  config: Option<PathBuf>,
  #[arg(long, default_value = "brushfield-store.json")]
  store: PathBuf,
  #[arg(long, default_value_t = 0)]
  seed: u64,
  #[arg(short, long, default_value = "doe-round.png")]
  sheet: PathBuf,
  /// open each contact sheet in the default viewer
  #[arg(long)]
  open: bool,
}

fn write_sheet(session: &Session<CanvasFactory>, args: &Args) -> Result<()> {
  let thumbnails = session.candidates().iter()
    .map(|candidate| match &candidate.preview {
      Preview::Ready(image) => Some(image),
      Preview::Failed(reason) => {
        warn!(reason = %reason, "thumbnail missing from sheet");
        None
      }
    })
    .collect::<Vec<_>>();
  let palette = session.config().renderer.palette;
  contact_sheet(&thumbnails, 4, 8, palette.background).save(&args.sheet)?;
  if args.open {
    open::that(&args.sheet)?;
  }
  Ok(())
}

fn run(args: Args) -> Result<()> {
  let config = match &args.config {
    Some(path) => DoeConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
    None => DoeConfig::default()
  };
  let mut session = Session::new(config, CanvasFactory { seed: args.seed }, args.seed);
  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();

  while !session.is_finished() {
    write_sheet(&session, &args)?;
    print!("{} [0-{}, r, s, q]: ", session.status(), session.candidates().len() - 1);
    io::stdout().flush()?;

    let line = match lines.next() {
      Some(line) => line?,
      None => return Ok(())
    };
    match line.trim() {
      "q" => return Ok(()),
      "r" => session.reroll()?,
      "s" => session.restart(),
      pick => match pick.parse::<usize>().map_err(error::Error::from).and_then(|i| session.select(i)) {
        Ok(Progress::Round(round)) => info!(round, "next round"),
        Ok(Progress::Finished) => {}
        Err(err) => println!("{:#}", err)
      }
    }
  }

  session.hand_off(&mut JsonFileStore::new(&args.store))?;
  println!("{}; selection saved to {}", session.status(), args.store.display());
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

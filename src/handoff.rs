//! Passing the explorer's final pick to the main renderer.
//!
//! The explorer writes one JSON parameter object under [`SELECTION_KEY`]; the renderer takes
//! it once on load and clears it. A missing or unreadable payload means "no hand-off".

use {
  crate::{error::ErrorKind, params::{ParamBag, Params}},
  anyhow::{Context, Result},
  serde_json::Value,
  std::{
    collections::HashMap,
    path::{Path, PathBuf}
  },
  tracing::{debug, warn},
};

pub const SELECTION_KEY: &str = "doeSelection";

/// String key-value storage shared between the explorer and the renderer.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Result<Option<String>>;
  fn set(&mut self, key: &str, value: String) -> Result<()>;
  fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore(pub HashMap<String, String>);

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.0.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: String) -> Result<()> {
    self.0.insert(key.to_string(), value);
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<()> {
    self.0.remove(key);
    Ok(())
  }
}

/// All keys in one JSON object file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self { path: path.as_ref().to_path_buf() }
  }

  fn read(&self) -> Result<HashMap<String, String>> {
    if !self.path.exists() {
      return Ok(HashMap::new());
    }
    let text = std::fs::read_to_string(&self.path)
      .with_context(|| format!("reading {}", self.path.display()))?;
    serde_json::from_str(&text)
      .with_context(|| format!("parsing {}", self.path.display()))
  }

  fn write(&self, entries: &HashMap<String, String>) -> Result<()> {
    std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)
      .with_context(|| format!("writing {}", self.path.display()))
  }
}

impl KeyValueStore for JsonFileStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.read()?.remove(key))
  }

  fn set(&mut self, key: &str, value: String) -> Result<()> {
    let mut entries = self.read()?;
    entries.insert(key.to_string(), value);
    self.write(&entries)
  }

  fn remove(&mut self, key: &str) -> Result<()> {
    let mut entries = self.read()?;
    if entries.remove(key).is_some() {
      self.write(&entries)?;
    }
    Ok(())
  }
}

pub fn write_selection(store: &mut (impl KeyValueStore + ?Sized), params: &Params) -> Result<()> {
  let payload = serde_json::to_string(&Value::Object(params.to_bag()))?;
  store.set(SELECTION_KEY, payload)
}

fn parse_selection(payload: &str) -> Result<ParamBag> {
  match serde_json::from_str::<Value>(payload)? {
    Value::Object(bag) => Ok(bag),
    _ => Err(ErrorKind::MalformedHandoff(SELECTION_KEY.to_string()).into())
  }
}

/// Read and clear the hand-off. Failures are logged and reported as `None`.
pub fn take_selection(store: &mut (impl KeyValueStore + ?Sized)) -> Option<ParamBag> {
  let payload = match store.get(SELECTION_KEY) {
    Ok(Some(payload)) => payload,
    Ok(None) => return None,
    Err(err) => {
      warn!("hand-off store unreadable: {:#}", err);
      return None;
    }
  };
  if let Err(err) = store.remove(SELECTION_KEY) {
    warn!("could not clear hand-off: {:#}", err);
  }
  match parse_selection(&payload) {
    Ok(bag) => {
      debug!(fields = bag.len(), "hand-off received");
      Some(bag)
    }
    Err(err) => {
      warn!("ignoring corrupt hand-off: {:#}", err);
      None
    }
  }
}

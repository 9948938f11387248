//! Error types.
//!
//! Fallible operations return [`anyhow::Result`], which is re-exported here. Failures a caller
//! may want to tell apart are variants of [`ErrorKind`]; downcast with
//! `err.downcast_ref::<ErrorKind>()`.
//!
//! Malformed parameter input is never an error: absent or mistyped fields are ignored and
//! out-of-domain values are clamped (see [`crate::params::Params::apply`]).

pub use anyhow::{Result, Error, Context, bail};

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
  #[error("candidate #{index} does not exist, batch holds {batch} candidates")]
  NoSuchCandidate { index: usize, batch: usize },
  #[error("session has already finished all {0} rounds")]
  SessionFinished(u32),
  #[error("cannot create a {0}x{0} surface")]
  EmptySurface(u32),
  #[error("hand-off payload under `{0}` is not a parameter object")]
  MalformedHandoff(String),
}

/// Log the whole error chain, one cause per line.
pub fn display(error: &Error) -> String {
  let mut msg = "Error:\n".to_string();
  error
    .chain()
    .enumerate()
    .for_each(|(index, cause)| msg.push_str(&format!("└> {} - {}\n", index, cause)));
  tracing::error!("{}", msg);
  msg
}

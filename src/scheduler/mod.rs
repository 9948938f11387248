//! Spreads the drawing of a job list over animation frames.
//!
//! The host calls [`Scheduler::tick`] once per frame. Each tick executes at most
//! `max(1, len / REVEAL_FRAMES)` jobs in queue order, so a full reveal takes about
//! [`REVEAL_FRAMES`] frames whatever the tile count.
//!
//! Installing a queue replaces the previous one outright: its cursor resets to zero and no job
//! of the old queue runs afterwards.

use {
  std::sync::Arc,
  tracing::trace,
};

#[cfg(test)] mod tests;

pub const REVEAL_FRAMES: usize = 80;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
  /// nothing installed
  Idle,
  Rendering,
  /// every job of the current queue has run
  Drained,
}

pub fn jobs_per_frame(len: usize) -> usize {
  (len / REVEAL_FRAMES).max(1)
}

#[derive(Debug, Clone)]
pub struct Scheduler<J> {
  queue: Arc<[J]>,
  cursor: usize,
  jobs_per_frame: usize,
  state: State,
}

impl <J> Default for Scheduler<J> {
  fn default() -> Self {
    Self {
      queue: Arc::from(Vec::new()),
      cursor: 0,
      jobs_per_frame: 1,
      state: State::Idle
    }
  }
}

impl <J> Scheduler<J> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the queue and start from its first job.
  pub fn install(&mut self, queue: impl Into<Arc<[J]>>) {
    self.queue = queue.into();
    self.replay();
  }

  /// Run the current queue again from the start.
  pub fn replay(&mut self) {
    self.cursor = 0;
    self.jobs_per_frame = jobs_per_frame(self.queue.len());
    self.state = if self.queue.is_empty() { State::Drained } else { State::Rendering };
  }

  /// Drop the queue.
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// Execute the next batch. Returns the number of jobs run.
  pub fn tick(&mut self, mut execute: impl FnMut(&J)) -> usize {
    if self.state != State::Rendering {
      return 0;
    }
    let batch = self.jobs_per_frame.min(self.remaining());
    let end = self.cursor + batch;
    self.queue[self.cursor..end].iter().for_each(&mut execute);
    self.cursor = end;
    if self.cursor == self.queue.len() {
      self.state = State::Drained;
    }
    trace!(cursor = self.cursor, len = self.queue.len(), "scheduler tick");
    batch
  }

  /// Tick until drained, returns the number of ticks taken.
  pub fn drain(&mut self, mut execute: impl FnMut(&J)) -> usize {
    let mut ticks = 0;
    while self.tick(&mut execute) > 0 {
      ticks += 1;
    }
    ticks
  }

  pub fn state(&self) -> State { self.state }
  pub fn cursor(&self) -> usize { self.cursor }
  pub fn len(&self) -> usize { self.queue.len() }
  pub fn is_empty(&self) -> bool { self.queue.is_empty() }
  pub fn jobs_per_frame(&self) -> usize { self.jobs_per_frame }
  pub fn queue(&self) -> &Arc<[J]> { &self.queue }

  pub fn remaining(&self) -> usize {
    self.queue.len() - self.cursor
  }

  pub fn is_rendering(&self) -> bool {
    self.state == State::Rendering
  }
}

use std::hash::Hash;

use crate::runtime::timers::{TimerId, Timers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocateOutcome {
    Found,
    Retrying,
    GaveUp,
}

/// Bounded per-frame polling for a reveal target that may not be mounted yet.
#[derive(Clone, Debug)]
pub struct TargetLocator {
    max_retries: u32,
    retries: u32,
    pending: Option<TimerId>,
}

impl TargetLocator {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retries: 0,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a fresh activation, dropping any retry still queued from the last one.
    pub fn begin<E>(&mut self, found: bool, retry: E, timers: &mut Timers<E>) -> LocateOutcome
    where
        E: Clone + Eq + Hash,
    {
        self.cancel(timers);
        self.retries = 0;
        self.attempt(found, retry, timers)
    }

    /// Handle a retry frame. Returns `None` for a stale frame.
    pub fn on_frame<E>(
        &mut self,
        found: bool,
        retry: E,
        timers: &mut Timers<E>,
    ) -> Option<LocateOutcome>
    where
        E: Clone + Eq + Hash,
    {
        self.pending.take()?;
        Some(self.attempt(found, retry, timers))
    }

    pub fn cancel<E>(&mut self, timers: &mut Timers<E>)
    where
        E: Clone + Eq + Hash,
    {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    fn attempt<E>(&mut self, found: bool, retry: E, timers: &mut Timers<E>) -> LocateOutcome
    where
        E: Clone + Eq + Hash,
    {
        if found {
            return LocateOutcome::Found;
        }
        if self.retries >= self.max_retries {
            tracing::debug!(retries = self.retries, "reveal target never mounted");
            return LocateOutcome::GaveUp;
        }
        self.retries += 1;
        self.pending = Some(timers.request_frame(retry));
        LocateOutcome::Retrying
    }
}

use std::collections::BTreeSet;

use crate::foundation::error::{MotionError, MotionResult};

/// What a completion signal did to the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateTransition {
    /// Key was already complete; nothing changed.
    Duplicate,
    /// Key recorded, other keys still outstanding.
    Progress,
    /// Key recorded and it was the last one.
    Opened,
}

/// Tracks completion of a fixed set of media resources.
///
/// Success and failure both count as completion so a broken asset never holds the page.
/// There is no timeout: a resource that never reports keeps the gate closed.
#[derive(Clone, Debug)]
pub struct LoadGate {
    required: BTreeSet<String>,
    completed: BTreeSet<String>,
}

impl LoadGate {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: keys.into_iter().map(Into::into).collect(),
            completed: BTreeSet::new(),
        }
    }

    /// Like [`LoadGate::new`], with some resources already complete at registration
    /// (media served from cache may never emit a load signal).
    pub fn new_with_completed<I, S, C>(keys: I, already: C) -> MotionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = S>,
    {
        let mut gate = Self::new(keys);
        for key in already {
            let key: String = key.into();
            gate.mark_complete(&key)?;
        }
        Ok(gate)
    }

    /// Record that `key` finished loading (or failed). Idempotent.
    pub fn mark_complete(&mut self, key: &str) -> MotionResult<GateTransition> {
        if !self.required.contains(key) {
            return Err(MotionError::validation(format!(
                "resource '{key}' is not tracked by the load gate"
            )));
        }
        if !self.completed.insert(key.to_owned()) {
            return Ok(GateTransition::Duplicate);
        }
        if self.is_open() {
            tracing::debug!(resources = self.required.len(), "load gate opened");
            Ok(GateTransition::Opened)
        } else {
            Ok(GateTransition::Progress)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.completed.len() < self.required.len()
    }

    pub fn is_open(&self) -> bool {
        !self.is_loading()
    }

    pub fn completed(&self) -> usize {
        self.completed.len()
    }

    pub fn required(&self) -> usize {
        self.required.len()
    }

    pub fn outstanding(&self) -> impl Iterator<Item = &str> {
        self.required.difference(&self.completed).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gate/load_gate.rs"]
mod tests;

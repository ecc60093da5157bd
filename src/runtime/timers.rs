use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::foundation::core::Millis;

/// Handle for a queued timeout or frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Timeout,
    Frame,
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub at: Millis,
    pub kind: TimerKind,
    pub payload: E,
}

#[derive(Debug)]
struct Entry<E> {
    payload: E,
    kind: TimerKind,
}

/// Deterministic single-threaded timer queue over virtual milliseconds.
///
/// Ordering rule: timers fire by due time, and in scheduling order when due times tie.
/// Frame callbacks are due on the next frame boundary and are coalesced by payload.
#[derive(Debug)]
pub struct Timers<E> {
    now: Millis,
    frame_interval: Millis,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(Millis, u64)>>,
    live: HashMap<u64, Entry<E>>,
    frames: HashMap<E, TimerId>,
}

impl<E> Timers<E>
where
    E: Clone + Eq + Hash,
{
    pub fn new(frame_interval: Millis) -> Self {
        Self {
            now: Millis::ZERO,
            frame_interval: Millis(frame_interval.0.max(1)),
            next_seq: 0,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
            frames: HashMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn frame_interval(&self) -> Millis {
        self.frame_interval
    }

    /// Number of timers that are still armed.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.live.contains_key(&id.0)
    }

    pub fn set_timeout(&mut self, delay: Millis, payload: E) -> TimerId {
        let due = self.now.saturating_add(delay);
        self.push(due, payload, TimerKind::Timeout)
    }

    /// Queue `payload` for the next frame. A payload already waiting for a frame is
    /// absorbed and its existing id returned.
    pub fn request_frame(&mut self, payload: E) -> TimerId {
        if let Some(&id) = self.frames.get(&payload) {
            return id;
        }
        let iv = self.frame_interval.0;
        let due = Millis((self.now.0 / iv + 1).saturating_mul(iv));
        let id = self.push(due, payload.clone(), TimerKind::Frame);
        self.frames.insert(payload, id);
        id
    }

    /// Disarm a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(entry) = self.live.remove(&id.0) else {
            return false;
        };
        if entry.kind == TimerKind::Frame {
            self.frames.remove(&entry.payload);
        }
        true
    }

    pub fn cancel_all(&mut self) {
        self.live.clear();
        self.frames.clear();
        self.queue.clear();
    }

    /// Pop the earliest armed timer due at or before `until`, moving `now` to its due time.
    /// When nothing is due, `now` moves to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<E>> {
        while let Some(&Reverse((due, seq))) = self.queue.peek() {
            if due > until {
                break;
            }
            self.queue.pop();
            let Some(entry) = self.live.remove(&seq) else {
                continue;
            };
            if entry.kind == TimerKind::Frame {
                self.frames.remove(&entry.payload);
            }
            self.now = self.now.max(due);
            return Some(Fired {
                id: TimerId(seq),
                at: due,
                kind: entry.kind,
                payload: entry.payload,
            });
        }
        self.now = self.now.max(until);
        None
    }

    fn push(&mut self, due: Millis, payload: E, kind: TimerKind) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq)));
        self.live.insert(seq, Entry { payload, kind });
        TimerId(seq)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;

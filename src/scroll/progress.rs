use std::hash::Hash;

use crate::foundation::core::{Millis, Rect};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{clamp01, frame_alpha};
use crate::runtime::timers::{TimerId, Timers};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettleConfig {
    /// Share of the remaining gap kept after one reference frame.
    pub retain_per_frame: f64,
    pub reference_frame_ms: f64,
    pub epsilon: f64,
    /// Floor for the inter-frame gap so a zero-length frame still makes progress.
    pub min_dt_ms: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            retain_per_frame: 0.85,
            reference_frame_ms: 16.67,
            epsilon: 1e-4,
            min_dt_ms: 1.0,
        }
    }
}

impl SettleConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.retain_per_frame > 0.0 && self.retain_per_frame < 1.0) {
            return Err(MotionError::config(
                "settle retain_per_frame must be within (0, 1)",
            ));
        }
        if self.reference_frame_ms <= 0.0 || self.min_dt_ms <= 0.0 {
            return Err(MotionError::config("settle frame durations must be > 0"));
        }
        if self.epsilon <= 0.0 {
            return Err(MotionError::config("settle epsilon must be > 0"));
        }
        Ok(())
    }
}

/// Frame-loop payload for the settle mapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SettleFrame;

/// `0` while the element's top sits at the viewport top, `1` once it has scrolled
/// fully past.
pub fn settle_target(rect: Rect) -> f64 {
    clamp01(-rect.y0 / rect.height().max(1.0))
}

/// Smoothed scroll progress of a tracked element.
///
/// Scroll and resize samples move `target`; a frame loop chases it with `current`
/// until they agree within epsilon, then parks until the next sample.
#[derive(Debug)]
pub struct ScrollProgress {
    cfg: SettleConfig,
    target: f64,
    current: f64,
    enabled: bool,
    last_frame: Option<Millis>,
    pending: Option<TimerId>,
}

impl ScrollProgress {
    pub fn new(cfg: SettleConfig) -> Self {
        Self {
            cfg,
            target: 0.0,
            current: 0.0,
            enabled: false,
            last_frame: None,
            pending: None,
        }
    }

    /// Published value.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// Start accepting samples. Samples before this are dropped.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Feed a fresh geometry sample. A missing element leaves the target untouched.
    pub fn sample<E>(&mut self, rect: Option<Rect>, timers: &mut Timers<E>)
    where
        E: From<SettleFrame> + Clone + Eq + Hash,
    {
        if !self.enabled {
            return;
        }
        let Some(rect) = rect else {
            return;
        };
        self.target = settle_target(rect);
        if self.gap() > self.cfg.epsilon && self.pending.is_none() {
            self.pending = Some(timers.request_frame(E::from(SettleFrame)));
        }
    }

    /// Advance `current` by one smoothing step covering `dt_ms`. Snaps onto the target
    /// once within epsilon. Returns the new `current`.
    pub fn step(&mut self, dt_ms: f64) -> f64 {
        let dt = dt_ms.max(self.cfg.min_dt_ms);
        let alpha = frame_alpha(self.cfg.retain_per_frame, dt, self.cfg.reference_frame_ms);
        self.current += (self.target - self.current) * alpha;
        if self.gap() <= self.cfg.epsilon {
            self.current = self.target;
        }
        self.current = clamp01(self.current);
        self.current
    }

    pub fn on_frame<E>(&mut self, at: Millis, timers: &mut Timers<E>)
    where
        E: From<SettleFrame> + Clone + Eq + Hash,
    {
        if self.pending.take().is_none() {
            return;
        }
        let dt = match self.last_frame {
            Some(prev) => at.saturating_sub(prev).as_f64(),
            None => timers.frame_interval().as_f64(),
        };
        self.step(dt);
        tracing::trace!(current = self.current, target = self.target, "settle frame");

        if self.gap() > self.cfg.epsilon {
            self.last_frame = Some(at);
            self.pending = Some(timers.request_frame(E::from(SettleFrame)));
        } else {
            self.last_frame = None;
        }
    }

    pub fn cancel<E>(&mut self, timers: &mut Timers<E>)
    where
        E: Clone + Eq + Hash,
    {
        self.enabled = false;
        self.last_frame = None;
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    fn gap(&self) -> f64 {
        (self.target - self.current).abs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;

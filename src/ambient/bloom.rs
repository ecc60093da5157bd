use std::hash::Hash;

use rand::Rng;

use crate::ambient::lamps::{Lamp, LampState, default_lamps};
use crate::foundation::core::{Millis, Span};
use crate::foundation::error::{MotionError, MotionResult};
use crate::runtime::timers::{TimerId, Timers};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmbientConfig {
    pub lamps: Vec<Lamp>,
    /// Wait before each bloom tick.
    pub interval_ms: Span<u64>,
    /// Chance that a tick blooms two distinct lamps instead of one.
    pub pair_probability: f64,
    pub amplitude: Span<f64>,
    pub duration_ms: Span<u64>,
    pub start_delay_ms: Span<u64>,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            lamps: default_lamps(),
            interval_ms: Span { min: 300, max: 1200 },
            pair_probability: 0.4,
            amplitude: Span {
                min: 0.85,
                max: 1.6,
            },
            duration_ms: Span {
                min: 800,
                max: 3500,
            },
            start_delay_ms: Span { min: 0, max: 200 },
        }
    }
}

impl AmbientConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.lamps.is_empty() {
            return Err(MotionError::config("ambient lamp catalogue is empty"));
        }
        let mut ids: Vec<&str> = self.lamps.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(MotionError::config("ambient lamp ids must be unique"));
        }
        if !(0.0..=1.0).contains(&self.pair_probability) {
            return Err(MotionError::config(
                "ambient pair_probability must be within [0, 1]",
            ));
        }
        Span::new(self.interval_ms.min, self.interval_ms.max)?;
        Span::new(self.amplitude.min, self.amplitude.max)?;
        Span::new(self.duration_ms.min, self.duration_ms.max)?;
        Span::new(self.start_delay_ms.min, self.start_delay_ms.max)?;
        Ok(())
    }
}

/// Cosmetic animation parameters, rolled fresh for every bloom and never stored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BloomParams {
    pub amplitude: f64,
    pub duration_ms: u64,
    pub delay_ms: u64,
}

impl BloomParams {
    pub fn roll<R: Rng + ?Sized>(cfg: &AmbientConfig, rng: &mut R) -> Self {
        Self {
            amplitude: rng.gen_range(cfg.amplitude.min..=cfg.amplitude.max),
            duration_ms: rng.gen_range(cfg.duration_ms.min..=cfg.duration_ms.max),
            delay_ms: rng.gen_range(cfg.start_delay_ms.min..=cfg.start_delay_ms.max),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LampBloom {
    pub lamp_id: String,
    pub seq: u64,
    pub params: BloomParams,
}

/// One scheduler tick: the lamps that bloomed together.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BloomEvent {
    pub at: Millis,
    pub blooms: Vec<LampBloom>,
}

/// Timer payload for the bloom loop. The generation pins a tick to the arming that
/// produced it, so a stale tick is ignored even if it slips through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AmbientTick {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Cancelled,
}

/// Self-rescheduling loop of randomly timed lamp blooms.
pub struct BloomScheduler<R> {
    cfg: AmbientConfig,
    rng: R,
    state: SchedulerState,
    generation: u64,
    pending: Option<TimerId>,
}

impl<R: Rng> BloomScheduler<R> {
    pub fn new(cfg: AmbientConfig, rng: R) -> MotionResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng,
            state: SchedulerState::Idle,
            generation: 0,
            pending: None,
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn lamps(&self) -> &[Lamp] {
        &self.cfg.lamps
    }

    /// Arm the first tick. No-op unless idle; a cancelled scheduler stays cancelled.
    pub fn start<E>(&mut self, timers: &mut Timers<E>)
    where
        E: From<AmbientTick> + Clone + Eq + Hash,
    {
        if self.state != SchedulerState::Idle {
            return;
        }
        self.state = SchedulerState::Running;
        self.arm(timers);
    }

    /// Handle a fired tick: bloom one or two lamps and arm the next tick.
    pub fn on_tick<E>(
        &mut self,
        tick: AmbientTick,
        at: Millis,
        lamps: &mut LampState,
        timers: &mut Timers<E>,
    ) -> Option<BloomEvent>
    where
        E: From<AmbientTick> + Clone + Eq + Hash,
    {
        if self.state != SchedulerState::Running || tick.generation != self.generation {
            return None;
        }
        self.pending = None;

        let n = self.cfg.lamps.len();
        let count = if self.rng.gen_bool(self.cfg.pair_probability) {
            2.min(n)
        } else {
            1
        };
        let picked = rand::seq::index::sample(&mut self.rng, n, count);

        let mut blooms = Vec::with_capacity(count);
        for i in picked.into_iter() {
            let id = &self.cfg.lamps[i].id;
            let seq = lamps.bump(id);
            let params = BloomParams::roll(&self.cfg, &mut self.rng);
            blooms.push(LampBloom {
                lamp_id: id.clone(),
                seq,
                params,
            });
        }
        tracing::trace!(at = at.0, count, "lamp bloom");

        self.arm(timers);
        Some(BloomEvent { at, blooms })
    }

    /// Stop the loop. The pending tick is disarmed and later ticks are refused.
    pub fn cancel<E>(&mut self, timers: &mut Timers<E>)
    where
        E: Clone + Eq + Hash,
    {
        self.state = SchedulerState::Cancelled;
        self.generation = self.generation.wrapping_add(1);
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    fn arm<E>(&mut self, timers: &mut Timers<E>)
    where
        E: From<AmbientTick> + Clone + Eq + Hash,
    {
        self.generation = self.generation.wrapping_add(1);
        let delay = self
            .rng
            .gen_range(self.cfg.interval_ms.min..=self.cfg.interval_ms.max);
        let tick = AmbientTick {
            generation: self.generation,
        };
        self.pending = Some(timers.set_timeout(Millis(delay), E::from(tick)));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ambient/bloom.rs"]
mod tests;

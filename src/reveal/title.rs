use crate::foundation::core::Millis;
use crate::foundation::error::{MotionError, MotionResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleTimelineConfig {
    /// Quiet time after becoming visible before the glitch starts.
    pub lead_in_ms: u64,
    /// Length of the glitch phase before the title settles.
    pub glitch_ms: u64,
}

impl Default for TitleTimelineConfig {
    fn default() -> Self {
        Self {
            lead_in_ms: 120,
            glitch_ms: 650,
        }
    }
}

impl TitleTimelineConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.glitch_ms == 0 {
            return Err(MotionError::config("title glitch_ms must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePhase {
    /// Initial state, nothing shown yet.
    Hidden,
    /// Transitional glitch/blur effect active.
    Glitch,
    /// Final, settled text.
    Settled,
}

/// Glitch-then-settle text timeline keyed purely on time since the title was shown.
#[derive(Clone, Debug)]
pub struct TitleTimeline {
    cfg: TitleTimelineConfig,
    extra_delay: Millis,
    started_at: Option<Millis>,
}

impl TitleTimeline {
    pub fn new(cfg: TitleTimelineConfig, extra_delay: Millis) -> Self {
        Self {
            cfg,
            extra_delay,
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start again from zero.
    pub fn restart(&mut self, now: Millis) {
        self.started_at = Some(now);
    }

    /// Back to the initial visual state so the next entry replays identically.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn phase(&self, now: Millis) -> TitlePhase {
        let Some(start) = self.started_at else {
            return TitlePhase::Hidden;
        };
        let elapsed = now.saturating_sub(start).0;
        let glitch_at = self.cfg.lead_in_ms + self.extra_delay.0;
        if elapsed < glitch_at {
            TitlePhase::Hidden
        } else if elapsed < glitch_at + self.cfg.glitch_ms {
            TitlePhase::Glitch
        } else {
            TitlePhase::Settled
        }
    }
}

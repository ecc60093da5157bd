use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{MotionError, MotionResult};
use crate::reveal::observer::ThresholdObserver;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RearmConfig {
    pub enter_ratio: f64,
    pub exit_ratio: f64,
    /// Bands the observer reports on.
    pub thresholds: Vec<f64>,
}

impl Default for RearmConfig {
    fn default() -> Self {
        Self {
            enter_ratio: 0.2,
            exit_ratio: 0.05,
            thresholds: vec![0.0, 0.05, 0.2],
        }
    }
}

impl RearmConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(0.0..=1.0).contains(&self.enter_ratio) || !(0.0..=1.0).contains(&self.exit_ratio) {
            return Err(MotionError::config("re-armable ratios must be within [0, 1]"));
        }
        if self.exit_ratio >= self.enter_ratio {
            return Err(MotionError::config(
                "re-armable exit_ratio must be below enter_ratio",
            ));
        }
        Ok(())
    }
}

/// Visibility latch with a dead zone: on at `ratio >= enter`, off at `ratio <= exit`,
/// held in between. Shared by every section that replays its reveal on re-entry.
#[derive(Clone, Debug)]
pub struct RearmableReveal {
    enter: f64,
    exit: f64,
    observer: ThresholdObserver,
    visible: bool,
}

impl RearmableReveal {
    pub fn new(cfg: &RearmConfig) -> MotionResult<Self> {
        cfg.validate()?;
        Ok(Self {
            enter: cfg.enter_ratio,
            exit: cfg.exit_ratio,
            observer: ThresholdObserver::new(&cfg.thresholds, 0.0)?,
            visible: false,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the new visibility when it flips.
    pub fn on_ratio(&mut self, ratio: f64) -> Option<bool> {
        let next = if ratio >= self.enter {
            true
        } else if ratio <= self.exit {
            false
        } else {
            self.visible
        };
        if next == self.visible {
            return None;
        }
        self.visible = next;
        Some(next)
    }

    pub fn observe(&mut self, rect: Option<Rect>, viewport: Size) -> Option<bool> {
        let ratio = self.observer.observe(rect, viewport)?;
        self.on_ratio(ratio)
    }

    pub fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

use crate::foundation::core::Rect;
use crate::foundation::error::{MotionError, MotionResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepperConfig {
    pub enter_floor_px: f64,
    pub enter_viewport_fraction: f64,
    /// `exit_at = enter_at * exit_ratio`.
    pub exit_ratio: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            enter_floor_px: 180.0,
            enter_viewport_fraction: 0.18,
            exit_ratio: 0.55,
        }
    }
}

impl StepperConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(self.exit_ratio >= 0.0 && self.exit_ratio < 1.0) {
            return Err(MotionError::config("stepper exit_ratio must be within [0, 1)"));
        }
        if self.enter_floor_px <= 0.0 || self.enter_viewport_fraction < 0.0 {
            return Err(MotionError::config(
                "stepper enter floor must be > 0 and viewport fraction >= 0",
            ));
        }
        Ok(())
    }
}

/// How far a sticky section has been scrolled through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionScroll {
    /// Scrollable extent: section height minus viewport height.
    pub total: f64,
    /// Pixels scrolled into the section, clamped to `[0, total]`.
    pub scrolled: f64,
}

impl SectionScroll {
    pub fn measure(section: Rect, viewport_height: f64) -> Self {
        let total = section.height() - viewport_height;
        let scrolled = if total > 0.0 {
            (-section.y0).clamp(0.0, total)
        } else {
            0.0
        };
        Self { total, scrolled }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepThresholds {
    pub enter_at: f64,
    pub exit_at: f64,
}

impl StepThresholds {
    /// Thresholds for a section; `None` when the section cannot scroll.
    pub fn for_section(cfg: &StepperConfig, total: f64, viewport_height: f64) -> Option<Self> {
        if total <= 0.0 {
            return None;
        }
        let floor = cfg
            .enter_floor_px
            .max(cfg.enter_viewport_fraction * viewport_height);
        let enter_at = floor.min(total);
        Some(Self {
            enter_at,
            exit_at: enter_at * cfg.exit_ratio,
        })
    }
}

/// Two-state step driven by scroll depth, with separate enter and exit thresholds.
///
/// Rule: `0 -> 1` once `scrolled >= enter_at`, `1 -> 0` once `scrolled < exit_at`,
/// otherwise hold. Nothing moves until [`HysteresisStepper::arm`] is called.
#[derive(Clone, Debug, Default)]
pub struct HysteresisStepper {
    step: u8,
    armed: bool,
}

impl HysteresisStepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Allow transitions; called once the section has been seen.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Apply one scroll sample. Returns the new step if it changed.
    pub fn apply(&mut self, scrolled: f64, th: StepThresholds) -> Option<u8> {
        if !self.armed {
            return None;
        }
        let next = match self.step {
            0 if scrolled >= th.enter_at => 1,
            1 if scrolled < th.exit_at => 0,
            s => s,
        };
        if next == self.step {
            return None;
        }
        self.step = next;
        tracing::debug!(step = next, scrolled, "section step changed");
        Some(next)
    }

    /// Measure `section` and apply. Missing or non-scrollable sections are ignored.
    pub fn sample(
        &mut self,
        cfg: &StepperConfig,
        section: Option<Rect>,
        viewport_height: f64,
    ) -> Option<u8> {
        let m = SectionScroll::measure(section?, viewport_height);
        let th = StepThresholds::for_section(cfg, m.total, viewport_height)?;
        self.apply(m.scrolled, th)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/stepper.rs"]
mod tests;

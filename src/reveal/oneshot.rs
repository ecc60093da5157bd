use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{MotionError, MotionResult};
use crate::reveal::observer::ThresholdObserver;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OneShotConfig {
    pub threshold: f64,
    /// Fraction of the viewport height added to (or, negative, removed from) its bottom edge.
    pub root_margin_bottom: f64,
}

impl Default for OneShotConfig {
    fn default() -> Self {
        Self {
            threshold: 0.28,
            root_margin_bottom: -0.10,
        }
    }
}

impl OneShotConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::config("one-shot threshold must be within [0, 1]"));
        }
        if self.root_margin_bottom <= -1.0 {
            return Err(MotionError::config(
                "one-shot root_margin_bottom must be > -1",
            ));
        }
        Ok(())
    }
}

/// Reveal that latches on first sight and then stops observing.
///
/// After the latch, [`OneShotReveal::replay`] reruns the visual reveal (for example when
/// the section's step or copy changes) without ever clearing `has_entered_once`.
#[derive(Clone, Debug)]
pub struct OneShotReveal {
    threshold: f64,
    observer: ThresholdObserver,
    entered: bool,
    reveal_seq: u64,
}

impl OneShotReveal {
    pub fn new(cfg: &OneShotConfig) -> MotionResult<Self> {
        Ok(Self {
            threshold: cfg.threshold,
            observer: ThresholdObserver::new(&[cfg.threshold], cfg.root_margin_bottom)?,
            entered: false,
            reveal_seq: 0,
        })
    }

    pub fn has_entered_once(&self) -> bool {
        self.entered
    }

    /// Bumped every time the reveal sequence should (re)play.
    pub fn reveal_seq(&self) -> u64 {
        self.reveal_seq
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_connected()
    }

    /// Feed geometry through the built-in observer. Returns `true` on the first entry.
    pub fn observe(&mut self, rect: Option<Rect>, viewport: Size) -> bool {
        match self.observer.observe(rect, viewport) {
            Some(ratio) => self.on_ratio(ratio),
            None => false,
        }
    }

    /// Feed an externally observed ratio. Returns `true` on the first entry.
    pub fn on_ratio(&mut self, ratio: f64) -> bool {
        if self.entered || ratio < self.threshold {
            return false;
        }
        self.entered = true;
        self.observer.disconnect();
        tracing::debug!(ratio, "one-shot reveal entered");
        true
    }

    /// Mark the reveal sequence as played. No-op before the first entry.
    pub fn replay(&mut self) -> Option<u64> {
        if !self.entered {
            return None;
        }
        self.reveal_seq += 1;
        Some(self.reveal_seq)
    }

    pub fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

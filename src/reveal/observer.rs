use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{MotionError, MotionResult};

/// Share of `rect` inside the viewport, after shrinking (negative margin) or growing
/// the viewport's bottom edge by `root_margin_bottom * viewport.height`.
pub fn intersection_ratio(rect: Rect, viewport: Size, root_margin_bottom: f64) -> f64 {
    let area = rect.width().max(0.0) * rect.height().max(0.0);
    if area <= 0.0 {
        return 0.0;
    }
    let root = Rect::new(
        0.0,
        0.0,
        viewport.width,
        viewport.height * (1.0 + root_margin_bottom),
    );
    let w = (rect.x1.min(root.x1) - rect.x0.max(root.x0)).max(0.0);
    let h = (rect.y1.min(root.y1) - rect.y0.max(root.y0)).max(0.0);
    (w * h / area).clamp(0.0, 1.0)
}

/// Emulates a browser intersection observer over synthetic geometry.
///
/// A sample is reported only when the ratio moves into a different threshold band.
/// The first sample after connecting is always reported.
#[derive(Clone, Debug)]
pub struct ThresholdObserver {
    thresholds: Vec<f64>,
    root_margin_bottom: f64,
    band: Option<usize>,
    connected: bool,
}

impl ThresholdObserver {
    pub fn new(thresholds: &[f64], root_margin_bottom: f64) -> MotionResult<Self> {
        if thresholds.is_empty() {
            return Err(MotionError::validation("observer needs at least one threshold"));
        }
        if thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err(MotionError::validation(
                "observer thresholds must be within [0, 1]",
            ));
        }
        let mut thresholds = thresholds.to_vec();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        Ok(Self {
            thresholds,
            root_margin_bottom,
            band: None,
            connected: true,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Stop observing for good.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.band = None;
    }

    /// Feed the target's current rect. Returns the ratio if the crossing should be reported.
    pub fn observe(&mut self, rect: Option<Rect>, viewport: Size) -> Option<f64> {
        if !self.connected {
            return None;
        }
        let ratio = intersection_ratio(rect?, viewport, self.root_margin_bottom);
        let band = self.band_of(ratio);
        if self.band == Some(band) {
            return None;
        }
        self.band = Some(band);
        Some(ratio)
    }

    fn band_of(&self, ratio: f64) -> usize {
        // A zero threshold is crossed by any overlap at all, not by touching.
        self.thresholds
            .iter()
            .filter(|&&t| if t == 0.0 { ratio > 0.0 } else { ratio >= t })
            .count()
    }
}

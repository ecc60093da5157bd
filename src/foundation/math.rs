use crate::foundation::core::Vec2;

pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Per-frame blend factor for exponential smoothing that is independent of frame rate.
///
/// `retain` is the fraction of the remaining distance kept after one reference
/// frame of `ref_frame_ms`; longer gaps compound it.
pub(crate) fn frame_alpha(retain: f64, dt_ms: f64, ref_frame_ms: f64) -> f64 {
    1.0 - retain.powf(dt_ms / ref_frame_ms)
}

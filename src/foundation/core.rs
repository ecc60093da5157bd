use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Virtual time in whole milliseconds since page mount.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Inclusive numeric range used for randomized timing and cosmetic parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + std::fmt::Debug> Span<T> {
    pub fn new(min: T, max: T) -> MotionResult<Self> {
        if min > max {
            return Err(MotionError::validation(format!(
                "span min {min:?} must be <= max {max:?}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(self, v: T) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Page sections whose geometry and visibility the choreography tracks.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementId {
    Hero,
    AboutSection,
    AboutCopy,
    FeaturesSection,
    FeaturesTitle,
    BlastSection,
    BlastTitle,
    CollageSection,
    CollageContainer,
}

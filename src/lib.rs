//! Scroll- and visibility-driven animation choreography for the Yatra 2026 landing page.
//!
//! The crate renders nothing. It turns resource-load signals, scroll and resize samples,
//! visibility ratios and the passage of time into *state* (flags, step indices, progress
//! scalars, per-element transforms) that a presentation layer applies.
//!
//! # Components
//!
//! 1. **Load gate** ([`LoadGate`]): the page stays in its loading state until every tracked
//!    resource has reported, success or failure.
//! 2. **Ambient blooms** ([`BloomScheduler`]): randomly timed lamp glows once loading ends.
//! 3. **Settle progress** ([`ScrollProgress`]): frame-rate independent smoothing of the
//!    hero's scroll position.
//! 4. **Step stepper** ([`HysteresisStepper`]): two-state sticky swap with enter/exit thresholds.
//! 5. **Reveals** ([`OneShotReveal`], [`RearmableReveal`], [`TitleTimeline`]).
//! 6. **Collage convergence** ([`ConvergenceAnimator`]): one-by-one staggered entrance.
//!
//! [`Choreographer`] wires them together over a deterministic virtual clock ([`Timers`]).
//! Geometry comes from a [`GeometryProvider`], so everything runs headless.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: randomness is injected, time is virtual.
#![forbid(unsafe_code)]

mod ambient;
mod animation;
mod collage;
mod config;
mod foundation;
mod gate;
mod page;
mod reveal;
mod runtime;
mod scroll;

/// Geometry capability and a synthetic implementation.
pub mod geometry;

pub use ambient::bloom::{
    AmbientConfig, AmbientTick, BloomEvent, BloomParams, BloomScheduler, LampBloom,
    SchedulerState,
};
pub use ambient::lamps::{Lamp, LampState, default_lamps};
pub use animation::ease::Ease;
pub use collage::convergence::{
    CollageConfig, CollageItem, CollageLayout, ConvergenceAnimator, ItemTransform,
    item_transform, local_progress,
};
pub use config::{ChoreoConfig, RevealConfig};
pub use foundation::core::{ElementId, Millis, Point, Rect, Size, Span, Vec2};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::math::{Lerp, clamp01};
pub use gate::load_gate::{GateTransition, LoadGate};
pub use geometry::{GeometryProvider, SyntheticGeometry};
pub use page::choreographer::Choreographer;
pub use page::state::{PageEvent, PageState, SectionId};
pub use reveal::locate::{LocateOutcome, TargetLocator};
pub use reveal::observer::{ThresholdObserver, intersection_ratio};
pub use reveal::oneshot::{OneShotConfig, OneShotReveal};
pub use reveal::rearm::{RearmConfig, RearmableReveal};
pub use reveal::title::{TitlePhase, TitleTimeline, TitleTimelineConfig};
pub use runtime::timers::{Fired, TimerId, TimerKind, Timers};
pub use scroll::progress::{ScrollProgress, SettleConfig, SettleFrame, settle_target};
pub use scroll::stepper::{HysteresisStepper, SectionScroll, StepThresholds, StepperConfig};

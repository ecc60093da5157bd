use crate::animation::ease::Ease;
use crate::foundation::core::{Rect, Size, Vec2};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{Lerp, clamp01};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    /// Resting offsets from the container center, as fractions of its width and height.
    pub final_offsets: Vec<Vec2>,
    /// Outward displacement of the start layout, as a fraction of the shorter side.
    pub scatter: f64,
    pub start_scale: f64,
    pub end_scale: f64,
    /// Items hold until the section top passes this fraction of the viewport height.
    pub gate_fraction: f64,
    pub step_floor_px: f64,
    pub step_viewport_fraction: f64,
    pub ease: Ease,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            final_offsets: vec![
                Vec2::new(-0.28, -0.20),
                Vec2::new(0.26, -0.22),
                Vec2::new(-0.30, 0.18),
                Vec2::new(0.29, 0.20),
                Vec2::new(0.0, -0.02),
                Vec2::new(0.02, 0.27),
            ],
            scatter: 0.9,
            start_scale: 1.55,
            end_scale: 1.0,
            gate_fraction: 0.55,
            step_floor_px: 90.0,
            step_viewport_fraction: 0.12,
            ease: Ease::InOutCubic,
        }
    }
}

impl CollageConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.final_offsets.is_empty() {
            return Err(MotionError::config("collage needs at least one item"));
        }
        if self.step_floor_px <= 0.0 {
            return Err(MotionError::config("collage step_floor_px must be > 0"));
        }
        if self.scatter < 0.0 || self.start_scale <= 0.0 || self.end_scale <= 0.0 {
            return Err(MotionError::config(
                "collage scatter must be >= 0 and scales must be > 0",
            ));
        }
        Ok(())
    }

    /// Scroll distance each item gets for its own entrance.
    pub fn stagger_step(&self, viewport_height: f64) -> f64 {
        self.step_floor_px
            .max(self.step_viewport_fraction * viewport_height)
    }

    /// Pixels the section top has travelled past the gate line.
    pub fn after_gate(&self, section_top: f64, viewport_height: f64) -> f64 {
        (self.gate_fraction * viewport_height - section_top).max(0.0)
    }
}

/// Static geometry of one collage element, in pixels from the container center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CollageItem {
    pub index: usize,
    pub start_offset: Vec2,
    pub final_offset: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollageLayout {
    pub size: Size,
    pub items: Vec<CollageItem>,
}

impl CollageLayout {
    pub fn compute(cfg: &CollageConfig, size: Size) -> Self {
        let reach = cfg.scatter * size.width.min(size.height).max(0.0);
        let items = cfg
            .final_offsets
            .iter()
            .enumerate()
            .map(|(index, norm)| {
                let final_offset = Vec2::new(norm.x * size.width, norm.y * size.height);
                let dir = outward(*norm, index);
                CollageItem {
                    index,
                    start_offset: final_offset + dir * reach,
                    final_offset,
                }
            })
            .collect();
        Self { size, items }
    }
}

fn outward(norm: Vec2, index: usize) -> Vec2 {
    if norm.hypot() > 1e-6 {
        return norm.normalize();
    }
    // Dead-center items get a golden-angle spoke so no two share a direction.
    let angle = index as f64 * 2.399_963_229_728_653;
    Vec2::new(angle.cos(), angle.sin())
}

/// Per-element animation output consumed by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ItemTransform {
    /// Item index; also the stagger slot.
    pub index: usize,
    /// Un-eased local progress in `[0, 1]`.
    pub progress: f64,
    /// Eased opacity, `0` before the item starts.
    pub opacity: f64,
    /// Eased scale, from the start scale down to the end scale.
    pub scale: f64,
    /// Horizontal offset from the container center, in px.
    pub x: f64,
    /// Vertical offset from the container center, in px.
    pub y: f64,
    /// Stacking order; later items sit on top.
    pub z: i32,
}

/// Staggered progress of item `index`: it starts once the previous item has
/// had a full `step` of scroll.
pub fn local_progress(after_gate: f64, index: usize, step: f64) -> f64 {
    let step = step.max(f64::EPSILON);
    clamp01((after_gate - index as f64 * step) / step)
}

/// Eased opacity, scale and offset of `item` at local `progress`.
pub fn item_transform(cfg: &CollageConfig, item: &CollageItem, progress: f64) -> ItemTransform {
    let e = cfg.ease.apply(progress);
    let pos = <Vec2 as Lerp>::lerp(&item.start_offset, &item.final_offset, e);
    ItemTransform {
        index: item.index,
        progress,
        opacity: <f64 as Lerp>::lerp(&0.0, &1.0, e),
        scale: <f64 as Lerp>::lerp(&cfg.start_scale, &cfg.end_scale, e),
        x: pos.x,
        y: pos.y,
        z: i32::try_from(item.index + 1).unwrap_or(i32::MAX),
    }
}

/// Maps one scroll-derived scalar onto a staggered, one-by-one entrance.
///
/// Output depends only on the current geometry, so scrolling back retraces it exactly.
#[derive(Clone, Debug)]
pub struct ConvergenceAnimator {
    cfg: CollageConfig,
    layout: Option<CollageLayout>,
    transforms: Vec<ItemTransform>,
}

impl ConvergenceAnimator {
    pub fn new(cfg: CollageConfig) -> MotionResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            layout: None,
            transforms: Vec::new(),
        })
    }

    pub fn layout(&self) -> Option<&CollageLayout> {
        self.layout.as_ref()
    }

    pub fn transforms(&self) -> &[ItemTransform] {
        &self.transforms
    }

    /// Recompute from the section and container rects. Missing targets leave the previous
    /// output in place. Returns `true` if the output changed.
    pub fn sample(
        &mut self,
        section: Option<Rect>,
        container: Option<Rect>,
        viewport_height: f64,
    ) -> bool {
        let (Some(section), Some(container)) = (section, container) else {
            return false;
        };
        let size = container.size();
        if self.layout.as_ref().map(|l| l.size) != Some(size) {
            tracing::debug!(w = size.width, h = size.height, "collage layout recomputed");
            self.layout = Some(CollageLayout::compute(&self.cfg, size));
        }
        let Some(layout) = self.layout.as_ref() else {
            return false;
        };

        let after_gate = self.cfg.after_gate(section.y0, viewport_height);
        let step = self.cfg.stagger_step(viewport_height);
        let next: Vec<ItemTransform> = layout
            .items
            .iter()
            .map(|item| {
                item_transform(
                    &self.cfg,
                    item,
                    local_progress(after_gate, item.index, step),
                )
            })
            .collect();
        if next == self.transforms {
            return false;
        }
        self.transforms = next;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collage/convergence.rs"]
mod tests;

//! Geometry capability the choreography reads from.
//!
//! The engine never touches a rendering surface. A presentation layer implements
//! [`GeometryProvider`] over its real layout; tests and the CLI use [`SyntheticGeometry`].

use std::collections::BTreeMap;

use crate::foundation::core::{ElementId, Rect, Size};

/// Read-only view of viewport size and element boxes.
pub trait GeometryProvider {
    fn viewport(&self) -> Size;

    /// Bounding box relative to the viewport's top-left corner, or `None` when the
    /// element is not mounted.
    fn rect(&self, id: ElementId) -> Option<Rect>;
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn viewport(&self) -> Size {
        (**self).viewport()
    }

    fn rect(&self, id: ElementId) -> Option<Rect> {
        (**self).rect(id)
    }
}

/// Document-space rects plus a vertical scroll offset.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SyntheticGeometry {
    pub viewport: Size,
    pub scroll_y: f64,
    pub elements: BTreeMap<ElementId, Rect>,
}

impl SyntheticGeometry {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn with_element(mut self, id: ElementId, doc_rect: Rect) -> Self {
        self.elements.insert(id, doc_rect);
        self
    }

    pub fn set_element(&mut self, id: ElementId, doc_rect: Rect) {
        self.elements.insert(id, doc_rect);
    }

    pub fn remove_element(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }
}

impl GeometryProvider for SyntheticGeometry {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements
            .get(&id)
            .map(|r| Rect::new(r.x0, r.y0 - self.scroll_y, r.x1, r.y1 - self.scroll_y))
    }
}

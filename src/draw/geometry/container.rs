//! Ordered collections of primitives

use super::primitives::Primitive;
use super::types::{BoundingBox, Point, RenderContext};
use crate::draw::svg::Fragment;
use serde::Serialize;

/// Primitives in document order. Later primitives draw on top of earlier
/// ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Geometry {
    primitives: Vec<Primitive>,
}

impl Geometry {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub const fn empty() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Min/max over every primitive's box.
    ///
    /// The reduction starts from the origin rather than from the first
    /// primitive, so an empty container reports `((0, 0), (0, 0))` and any
    /// non-empty one always includes the origin.
    pub fn bounding_box(&self) -> BoundingBox {
        let seed = BoundingBox::new(Point::ORIGIN, Point::ORIGIN);
        self.primitives
            .iter()
            .fold(seed, |acc, p| acc.union(&p.bounding_box()))
    }

    pub fn render_fragments(&self, ctx: &RenderContext) -> Vec<Fragment> {
        self.primitives.iter().flat_map(|p| p.render(ctx)).collect()
    }
}

impl From<Vec<Primitive>> for Geometry {
    fn from(primitives: Vec<Primitive>) -> Self {
        Self::new(primitives)
    }
}

impl<'a> IntoIterator for &'a Geometry {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

/// Anything that can be handed to the SVG renderer
pub trait HasGeometry {
    fn geometry(&self) -> &Geometry;

    fn bounding_box(&self) -> BoundingBox {
        self.geometry().bounding_box()
    }
}

impl<T: HasGeometry + ?Sized> HasGeometry for &T {
    fn geometry(&self) -> &Geometry {
        (**self).geometry()
    }
}

impl HasGeometry for Geometry {
    fn geometry(&self) -> &Geometry {
        self
    }
}

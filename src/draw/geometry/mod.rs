//! Geometry for EAGLE drawings
//!
//! # Submodules
//! - `types` - Points, boxes, rotations and the render context
//! - `primitives` - Wires, pads, text and the other drawable primitives
//! - `container` - Ordered primitive collections and the [`HasGeometry`] trait

mod container;
mod primitives;
mod types;

pub use types::{BoundingBox, Flip, Point, RenderContext, Rotation, Sign};

pub use primitives::{
    Circle, Hole, Pad, Pin, PinLength, Polygon, Primitive, Rectangle, Smd, Text, Via, Wire,
    PIN_GRID, PIN_ORIGIN_RADIUS,
};

pub use container::{Geometry, HasGeometry};

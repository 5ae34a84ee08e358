//! Drawing support: geometry primitives, layers, palette and SVG output

pub mod colors;
pub mod geometry;
pub mod layers;
pub mod svg;

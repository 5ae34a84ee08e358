//! Parser and SVG renderer for EAGLE CAD libraries, schematics and boards.
//!
//! ```ignore
//! let doc = eagle_cad::open("tests/data/sample.lbr")?;
//! let library = doc.as_library().unwrap();
//! let renderer = eagle_cad::SvgRenderer::default();
//! for package in library.packages.values() {
//!     renderer.render(package, &library.layers).save(format!("{}.svg", package.name))?;
//! }
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod model;
pub mod names;
pub mod parse_xml;
pub mod parsing;
pub mod serialize_xml;

pub use config::{AppConfig, RenderOptions};
pub use draw::geometry::{BoundingBox, Geometry, HasGeometry, Point, Primitive};
pub use draw::layers::{Layer, LayerSet};
pub use draw::svg::{SvgDocument, SvgRenderer};
pub use error::{EagleError, Result};
pub use model::{Board, Document, Drawing, EagleWrite, Library, Schematic};
pub use parsing::{open, parse_document, parse_reader, parse_str};

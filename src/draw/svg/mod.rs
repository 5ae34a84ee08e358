//! SVG output: typed shape fragments and the document renderer

mod fragment;
mod renderer;

pub use fragment::{fmt_num, Fragment, Style};
pub use renderer::{SvgDocument, SvgRenderer, SVG_NAMESPACE, XML_PREAMBLE};

//! The drawing wrapper shared by libraries, schematics and boards.

use super::board::Board;
use super::library::Library;
use super::schematic::Schematic;
use crate::draw::layers::LayerSet;
use indexmap::IndexMap;
use std::ops::Deref;
use std::path::PathBuf;

/// Every `<setting>` attribute, flattened in document order
pub type Settings = IndexMap<String, String>;

/// Editor grid parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub distance: f64,
    pub unit_dist: String,
    pub unit: String,
    /// `lines` or `dots`
    pub style: String,
    pub multiple: i32,
    pub display: bool,
    pub alt_distance: Option<f64>,
    pub alt_unit_dist: Option<String>,
    pub alt_unit: Option<String>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            distance: 0.1,
            unit_dist: "inch".to_string(),
            unit: "inch".to_string(),
            style: "lines".to_string(),
            multiple: 1,
            display: false,
            alt_distance: None,
            alt_unit_dist: None,
            alt_unit: None,
        }
    }
}

/// Layers, settings and grid together with the drawing's content.
/// Derefs to the content.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing<T> {
    /// `version` attribute of the `<eagle>` root
    pub version: Option<String>,
    /// File the drawing was read from, if any
    pub source: Option<PathBuf>,
    pub settings: Settings,
    pub grid: Grid,
    pub layers: LayerSet,
    pub content: T,
}

impl<T> Drawing<T> {
    pub fn into_content(self) -> T {
        self.content
    }
}

impl<T> Deref for Drawing<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.content
    }
}

/// A parsed EAGLE file
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Library(Drawing<Library>),
    Schematic(Drawing<Schematic>),
    Board(Drawing<Board>),
}

impl Document {
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Library(_) => "library",
            Document::Schematic(_) => "schematic",
            Document::Board(_) => "board",
        }
    }

    pub fn layers(&self) -> &LayerSet {
        match self {
            Document::Library(d) => &d.layers,
            Document::Schematic(d) => &d.layers,
            Document::Board(d) => &d.layers,
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Document::Library(d) => d.version.as_deref(),
            Document::Schematic(d) => d.version.as_deref(),
            Document::Board(d) => d.version.as_deref(),
        }
    }

    pub fn as_library(&self) -> Option<&Drawing<Library>> {
        match self {
            Document::Library(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_schematic(&self) -> Option<&Drawing<Schematic>> {
        match self {
            Document::Schematic(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_board(&self) -> Option<&Drawing<Board>> {
        match self {
            Document::Board(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_library(self) -> Option<Drawing<Library>> {
        match self {
            Document::Library(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_schematic(self) -> Option<Drawing<Schematic>> {
        match self {
            Document::Schematic(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_board(self) -> Option<Drawing<Board>> {
        match self {
            Document::Board(d) => Some(d),
            _ => None,
        }
    }
}

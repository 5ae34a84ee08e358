//! Layer definitions: name, palette color and visibility per layer number.

use crate::draw::colors;
use crate::error::Result;
use crate::names::collect_unique;
use indexmap::IndexMap;
use serde::Serialize;

// Board layers
pub const TOP_LAYER: i32 = 1;
pub const BOTTOM_LAYER: i32 = 16;
pub const PADS_LAYER: i32 = 17;
pub const VIAS_LAYER: i32 = 18;
pub const DRILLS_LAYER: i32 = 44;
pub const HOLES_LAYER: i32 = 45;

// Schematic layers
pub const PINS_LAYER: i32 = 93;
pub const SYMBOLS_LAYER: i32 = 94;

/// A single `<layer>` definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub number: i32,
    pub name: String,
    /// Palette index, see [`colors::as_rgb`]
    pub color: i32,
    /// Fill pattern index
    pub fill: i32,
    pub visible: bool,
    pub active: bool,
}

impl Layer {
    pub fn new(number: i32, name: impl Into<String>, color: i32) -> Self {
        Self {
            number,
            name: name.into(),
            color,
            fill: 1,
            visible: true,
            active: true,
        }
    }
}

/// The layer table of a drawing, keyed by layer number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerSet {
    layers: IndexMap<i32, Layer>,
    by_name: IndexMap<String, i32>,
}

impl LayerSet {
    /// Build the table; a repeated layer number or name is an error.
    pub fn new(layers: impl IntoIterator<Item = Layer>) -> Result<Self> {
        let layers = collect_unique("layer", layers.into_iter().map(|layer| (layer.number, layer)))?;
        let by_name = collect_unique(
            "layer",
            layers.values().map(|layer| (layer.name.clone(), layer.number)),
        )?;
        Ok(Self { layers, by_name })
    }

    pub fn get(&self, number: i32) -> Option<&Layer> {
        self.layers.get(&number)
    }

    pub fn by_name(&self, name: &str) -> Option<&Layer> {
        self.by_name.get(name).and_then(|n| self.layers.get(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Both the active and the visible flag are set. Undefined layers are
    /// never visible.
    pub fn is_visible(&self, number: i32) -> bool {
        self.layers
            .get(&number)
            .is_some_and(|layer| layer.active && layer.visible)
    }

    /// CSS color of a visible layer; `None` means "do not render".
    pub fn get_css_color(&self, number: i32) -> Option<String> {
        if !self.is_visible(number) {
            return None;
        }
        self.layers.get(&number).map(|layer| colors::as_css(layer.color))
    }
}

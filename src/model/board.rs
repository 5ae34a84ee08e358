//! Board layouts: placed packages, routed signals and manufacturing rules.

use super::library::{Library, Package};
use super::schematic::SignalClass;
use crate::draw::geometry::{Geometry, HasGeometry, Point, Rotation};
use crate::names::NamedMap;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub description: Option<String>,
    pub plain: Geometry,
    pub libraries: NamedMap<Library>,
    pub classes: Vec<SignalClass>,
    pub design_rules: DesignRules,
    pub autorouter: AutorouterRules,
    pub elements: NamedMap<Element>,
    pub signals: NamedMap<Signal>,
}

impl Board {
    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    pub fn class(&self, number: i32) -> Option<&SignalClass> {
        self.classes.iter().find(|c| c.number == number)
    }

    pub fn element_package(&self, element: &Element) -> Option<&Package> {
        self.library(&element.library)?.package(&element.package)
    }
}

impl HasGeometry for Board {
    fn geometry(&self) -> &Geometry {
        &self.plain
    }
}

/// Captured design-rule set; nothing here enforces the rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignRules {
    pub name: Option<String>,
    /// Description text keyed by language code
    pub descriptions: IndexMap<String, String>,
    pub params: IndexMap<String, String>,
}

impl DesignRules {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutorouterRules {
    pub passes: Vec<AutorouterPass>,
}

impl AutorouterRules {
    pub fn pass(&self, name: &str) -> Option<&AutorouterPass> {
        self.passes.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutorouterPass {
    pub name: String,
    /// Pass whose parameters this one inherits
    pub refer: Option<String>,
    pub active: bool,
    pub params: IndexMap<String, String>,
}

/// A package placed on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub library: String,
    pub package: String,
    pub value: Option<String>,
    pub position: Point,
    pub rotation: Rotation,
    pub locked: bool,
    pub smashed: bool,
    pub attributes: IndexMap<String, String>,
}

/// Routed copper of one net
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub class: i32,
    pub airwires_hidden: bool,
    pub contact_refs: Vec<ContactRef>,
    pub geometry: Geometry,
}

impl HasGeometry for Signal {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRef {
    pub element: String,
    pub pad: String,
    pub route: Option<String>,
}

//! Schematics: parts placed from embedded libraries, sheets, nets and busses.

use super::library::{Device, DeviceSet, Library};
use crate::draw::geometry::{Geometry, HasGeometry, Point, Rotation};
use crate::names::NamedMap;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Schematic {
    pub description: Option<String>,
    pub libraries: NamedMap<Library>,
    /// Ordered by appearance, looked up by class number
    pub classes: Vec<SignalClass>,
    pub parts: NamedMap<Part>,
    pub sheets: Vec<Sheet>,
}

impl Schematic {
    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.get(name)
    }

    pub fn class(&self, number: i32) -> Option<&SignalClass> {
        self.classes.iter().find(|c| c.number == number)
    }

    /// Device set a part was placed from
    pub fn part_device_set(&self, part: &Part) -> Option<&DeviceSet> {
        self.library(&part.library)?.device_set(&part.device_set)
    }

    pub fn part_device(&self, part: &Part) -> Option<&Device> {
        self.part_device_set(part)?.device(&part.device)
    }
}

/// Named bundle of electrical rules referenced by nets and signals
#[derive(Debug, Clone, PartialEq)]
pub struct SignalClass {
    pub number: i32,
    pub name: String,
    pub width: f64,
    pub drill: f64,
    pub clearances: Vec<Clearance>,
}

/// Minimum distance to another class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearance {
    pub class: i32,
    pub value: f64,
}

/// A component on the schematic. The library, device set and device names
/// are checked against the schematic's embedded libraries during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub library: String,
    pub device_set: String,
    pub device: String,
    pub technology: Option<String>,
    pub value: Option<String>,
    pub attributes: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub description: Option<String>,
    pub plain: Geometry,
    /// Keyed by `(part, gate)`
    pub instances: IndexMap<(String, String), Instance>,
    pub nets: NamedMap<Net>,
    pub busses: NamedMap<Bus>,
}

impl Sheet {
    pub fn instance(&self, part: &str, gate: &str) -> Option<&Instance> {
        self.instances.get(&(part.to_string(), gate.to_string()))
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.get(name)
    }
}

impl HasGeometry for Sheet {
    fn geometry(&self) -> &Geometry {
        &self.plain
    }
}

/// Placement of one gate of a part
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub part: String,
    pub gate: String,
    pub position: Point,
    pub rotation: Rotation,
    pub smashed: bool,
    /// Attribute display overrides
    pub attributes: IndexMap<String, String>,
}

impl Instance {
    pub fn mirrored(&self) -> bool {
        self.rotation.mirrored
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    pub name: String,
    pub class: i32,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,
    pub segments: Vec<Segment>,
}

/// Connected piece of a net or bus
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub geometry: Geometry,
    pub pinrefs: Vec<PinRef>,
    pub junctions: Vec<Point>,
}

impl HasGeometry for Segment {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRef {
    pub part: String,
    pub gate: String,
    pub pin: String,
}

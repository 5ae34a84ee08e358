//! Libraries and their packages, symbols and device sets.

use crate::draw::geometry::{Geometry, HasGeometry, Pad, Pin, Point, Primitive, Smd};
use crate::names::NamedMap;

/// A component library: packages, symbols and device sets, each keyed by
/// name in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    /// Only set for libraries embedded in schematics and boards
    pub name: Option<String>,
    pub description: Option<String>,
    pub packages: NamedMap<Package>,
    pub symbols: NamedMap<Symbol>,
    pub device_sets: NamedMap<DeviceSet>,
}

static PLACEHOLDER_PACKAGE: Package = Package::placeholder();

impl Library {
    pub fn new(name: Option<String>, description: Option<String>) -> Self {
        Self {
            name,
            description,
            packages: NamedMap::new("package"),
            symbols: NamedMap::new("symbol"),
            device_sets: NamedMap::new("device set"),
        }
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn device_set(&self, name: &str) -> Option<&DeviceSet> {
        self.device_sets.get(name)
    }

    /// Package a device is drawn with. Devices whose package could not be
    /// found get an empty package with an empty name.
    pub fn device_package(&self, device: &Device) -> &Package {
        match &device.package {
            PackageRef::Resolved { name } => self.packages.get(name).unwrap_or(&PLACEHOLDER_PACKAGE),
            PackageRef::Placeholder { .. } => &PLACEHOLDER_PACKAGE,
        }
    }

    /// Explicit lookup of a gate's symbol; parsing never does this.
    pub fn gate_symbol(&self, gate: &Gate) -> Option<&Symbol> {
        self.symbols.get(gate.symbol.name())
    }
}

/// A pad of either kind, as seen through [`Package::pads`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadRef<'a> {
    ThroughHole(&'a Pad),
    Surface(&'a Smd),
}

impl PadRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            PadRef::ThroughHole(pad) => &pad.name,
            PadRef::Surface(smd) => &smd.name,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PadRef::ThroughHole(pad) => pad.position,
            PadRef::Surface(smd) => smd.position,
        }
    }
}

/// Physical footprint of a component
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub description: Option<String>,
    geometry: Geometry,
    /// Indices of pad primitives, fixed at construction
    pad_indices: Vec<usize>,
}

impl Package {
    pub fn new(name: impl Into<String>, description: Option<String>, geometry: Geometry) -> Self {
        let pad_indices = geometry
            .primitives()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_pad())
            .map(|(i, _)| i)
            .collect();
        Self {
            name: name.into(),
            description,
            geometry,
            pad_indices,
        }
    }

    const fn placeholder() -> Self {
        Self {
            name: String::new(),
            description: None,
            geometry: Geometry::empty(),
            pad_indices: Vec::new(),
        }
    }

    /// The empty stand-in used for unresolved device packages
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty() && self.geometry.is_empty()
    }

    /// Through-hole and surface-mount pads in document order
    pub fn pads(&self) -> impl Iterator<Item = PadRef<'_>> + '_ {
        self.pad_indices
            .iter()
            .filter_map(|&i| match &self.geometry.primitives()[i] {
                Primitive::Pad(pad) => Some(PadRef::ThroughHole(pad)),
                Primitive::Smd(smd) => Some(PadRef::Surface(smd)),
                _ => None,
            })
    }

    pub fn pad_count(&self) -> usize {
        self.pad_indices.len()
    }
}

impl HasGeometry for Package {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

/// Schematic representation of a gate
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub description: Option<String>,
    geometry: Geometry,
    pin_indices: Vec<usize>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, description: Option<String>, geometry: Geometry) -> Self {
        let pin_indices = geometry
            .primitives()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_pin())
            .map(|(i, _)| i)
            .collect();
        Self {
            name: name.into(),
            description,
            geometry,
            pin_indices,
        }
    }

    pub fn pins(&self) -> impl Iterator<Item = &Pin> + '_ {
        self.pin_indices
            .iter()
            .filter_map(|&i| match &self.geometry.primitives()[i] {
                Primitive::Pin(pin) => Some(pin),
                _ => None,
            })
    }

    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins().find(|pin| pin.name == name)
    }
}

impl HasGeometry for Symbol {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

/// A family of interchangeable devices sharing the same gates
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSet {
    pub name: String,
    /// Reference designator prefix, e.g. `R` or `U`
    pub prefix: Option<String>,
    pub uservalue: bool,
    pub description: Option<String>,
    pub gates: NamedMap<Gate>,
    pub devices: NamedMap<Device>,
}

impl DeviceSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            uservalue: false,
            description: None,
            gates: NamedMap::new("gate"),
            devices: NamedMap::new("device"),
        }
    }

    pub fn gate(&self, name: &str) -> Option<&Gate> {
        self.gates.get(name)
    }

    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.get(name)
    }
}

/// Symbol reference of a gate. Gates may name symbols defined later in the
/// file, so the reference is kept by name and never resolved while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolRef {
    Unresolved { name: String },
}

impl SymbolRef {
    pub fn name(&self) -> &str {
        match self {
            SymbolRef::Unresolved { name } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub name: String,
    pub symbol: SymbolRef,
    pub position: Point,
    /// `must`, `can`, `next`, `request` or `always`
    pub add_level: Option<String>,
    pub swap_level: i32,
}

/// Package reference of a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageRef {
    Resolved { name: String },
    /// The requested package (if any) is not in the library
    Placeholder { requested: Option<String> },
}

impl PackageRef {
    pub fn is_resolved(&self) -> bool {
        matches!(self, PackageRef::Resolved { .. })
    }

    /// Name of the package actually used; empty for the placeholder
    pub fn name(&self) -> &str {
        match self {
            PackageRef::Resolved { name } => name,
            PackageRef::Placeholder { .. } => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub name: String,
    pub package: PackageRef,
    pub connects: Vec<Connect>,
    pub technologies: NamedMap<Technology>,
}

impl Device {
    pub fn technology(&self, name: &str) -> Option<&Technology> {
        self.technologies.get(name)
    }
}

/// Gate pin to package pad mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect {
    pub gate: String,
    pub pin: String,
    /// One pad, or several separated by spaces
    pub pad: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Technology {
    pub name: String,
    pub attributes: NamedMap<Attribute>,
}

impl Technology {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
    pub constant: bool,
}

//! Schematic parsing
//!
//! Embedded libraries come first, then classes and parts (checked against
//! the libraries), then sheets whose instances are checked against parts.

use super::attrs::{
    attribute_map, description, f64_or, flag, i32_or, optional_string, point, required,
    required_i32, rotation,
};
use super::geometry::parse_geometry;
use super::library::parse_library;
use crate::draw::geometry::Geometry;
use crate::error::{EagleError, Result};
use crate::model::{
    Bus, Clearance, Instance, Library, Net, Part, PinRef, Schematic, Segment, Sheet, SignalClass,
};
use crate::names::NamedMap;
use crate::parse_xml::XmlNode;
use indexmap::IndexMap;
use tracing::debug;

pub(crate) fn parse_schematic(node: &XmlNode) -> Result<Schematic> {
    let libraries = parse_embedded_libraries(node)?;
    let classes = parse_classes(node)?;

    let mut parts = NamedMap::new("part");
    for part in node.select("parts/part") {
        let part = parse_part(part, &libraries)?;
        parts.insert_unique(part.name.clone(), part)?;
    }

    let sheets = node
        .select("sheets/sheet")
        .into_iter()
        .map(|sheet| parse_sheet(sheet, &libraries, &parts))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        libraries = libraries.len(),
        classes = classes.len(),
        parts = parts.len(),
        sheets = sheets.len(),
        "parsed schematic"
    );

    Ok(Schematic {
        description: description(node),
        libraries,
        classes,
        parts,
        sheets,
    })
}

/// `<libraries>` of a schematic or board; every embedded library is named
pub(crate) fn parse_embedded_libraries(node: &XmlNode) -> Result<NamedMap<Library>> {
    let mut libraries = NamedMap::new("library");
    for lib in node.select("libraries/library") {
        let name = required(lib, "name")?.to_string();
        libraries.insert_unique(name, parse_library(lib)?)?;
    }
    Ok(libraries)
}

/// `<classes>`; class numbers must be unique
pub(crate) fn parse_classes(node: &XmlNode) -> Result<Vec<SignalClass>> {
    let mut classes: Vec<SignalClass> = Vec::new();
    for class in node.select("classes/class") {
        let class = parse_class(class)?;
        if classes.iter().any(|c| c.number == class.number) {
            return Err(EagleError::DuplicateName {
                kind: "class",
                name: class.number.to_string(),
            });
        }
        classes.push(class);
    }
    Ok(classes)
}

fn parse_class(node: &XmlNode) -> Result<SignalClass> {
    let clearances = node
        .children_named("clearance")
        .map(|c| {
            Ok(Clearance {
                class: required_i32(c, "class")?,
                value: f64_or(c, "value", 0.0)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(SignalClass {
        number: required_i32(node, "number")?,
        name: required(node, "name")?.to_string(),
        width: f64_or(node, "width", 0.0)?,
        drill: f64_or(node, "drill", 0.0)?,
        clearances,
    })
}

fn parse_part(node: &XmlNode, libraries: &NamedMap<Library>) -> Result<Part> {
    let name = required(node, "name")?.to_string();
    let library = required(node, "library")?;
    let device_set = required(node, "deviceset")?;
    let device = required(node, "device")?;
    let scope = || format!("part {name}");

    let lib = libraries
        .get(library)
        .ok_or_else(|| EagleError::unresolved("library", library, scope()))?;
    let ds = lib
        .device_set(device_set)
        .ok_or_else(|| EagleError::unresolved("device set", device_set, scope()))?;
    if ds.device(device).is_none() {
        return Err(EagleError::unresolved("device", device, scope()));
    }

    Ok(Part {
        library: library.to_string(),
        device_set: device_set.to_string(),
        device: device.to_string(),
        technology: optional_string(node, "technology"),
        value: optional_string(node, "value"),
        attributes: attribute_map(node)?,
        name,
    })
}

fn parse_sheet(
    node: &XmlNode,
    libraries: &NamedMap<Library>,
    parts: &NamedMap<Part>,
) -> Result<Sheet> {
    let plain = match node.child("plain") {
        Some(plain) => parse_geometry(plain)?,
        None => Geometry::default(),
    };

    let mut instances = IndexMap::new();
    for instance in node.select("instances/instance") {
        let instance = parse_instance(instance, libraries, parts)?;
        let key = (instance.part.clone(), instance.gate.clone());
        if instances.contains_key(&key) {
            return Err(EagleError::DuplicateName {
                kind: "instance",
                name: format!("{}/{}", key.0, key.1),
            });
        }
        instances.insert(key, instance);
    }

    let mut nets = NamedMap::new("net");
    for net in node.select("nets/net") {
        let net = Net {
            name: required(net, "name")?.to_string(),
            class: i32_or(net, "class", 0)?,
            segments: parse_segments(net)?,
        };
        nets.insert_unique(net.name.clone(), net)?;
    }

    let mut busses = NamedMap::new("bus");
    for bus in node.select("busses/bus") {
        let bus = Bus {
            name: required(bus, "name")?.to_string(),
            segments: parse_segments(bus)?,
        };
        busses.insert_unique(bus.name.clone(), bus)?;
    }

    Ok(Sheet {
        description: description(node),
        plain,
        instances,
        nets,
        busses,
    })
}

fn parse_instance(
    node: &XmlNode,
    libraries: &NamedMap<Library>,
    parts: &NamedMap<Part>,
) -> Result<Instance> {
    let part_name = required(node, "part")?;
    let gate = required(node, "gate")?;
    let scope = || format!("instance {part_name}/{gate}");

    let part = parts
        .get(part_name)
        .ok_or_else(|| EagleError::unresolved("part", part_name, scope()))?;
    let has_gate = libraries
        .get(&part.library)
        .and_then(|lib| lib.device_set(&part.device_set))
        .is_some_and(|ds| ds.gate(gate).is_some());
    if !has_gate {
        return Err(EagleError::unresolved("gate", gate, scope()));
    }

    Ok(Instance {
        part: part_name.to_string(),
        gate: gate.to_string(),
        position: point(node, "x", "y")?,
        rotation: rotation(node)?,
        smashed: flag(node, "smashed", false),
        attributes: attribute_map(node)?,
    })
}

fn parse_segments(node: &XmlNode) -> Result<Vec<Segment>> {
    node.children_named("segment").map(parse_segment).collect()
}

fn parse_segment(node: &XmlNode) -> Result<Segment> {
    let pinrefs = node
        .children_named("pinref")
        .map(|p| {
            Ok(PinRef {
                part: required(p, "part")?.to_string(),
                gate: required(p, "gate")?.to_string(),
                pin: required(p, "pin")?.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let junctions = node
        .children_named("junction")
        .map(|j| point(j, "x", "y"))
        .collect::<Result<Vec<_>>>()?;
    Ok(Segment {
        geometry: parse_geometry(node)?,
        pinrefs,
        junctions,
    })
}

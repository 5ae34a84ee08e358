//! Primitive parsing
//!
//! Any element that can hold drawing primitives (package, symbol, plain,
//! segment, signal) is scanned child by child; tags that are not primitives
//! are skipped.

use super::attrs::{
    f64_or, flag, i32_or, optional_f64, optional_string, point, required, required_f64,
    required_i32, rotation,
};
use crate::draw::geometry::{
    Circle, Geometry, Hole, Pad, Pin, PinLength, Polygon, Primitive, Rectangle, Smd, Text, Via, Wire,
};
use crate::error::{EagleError, Result};
use crate::parse_xml::XmlNode;
use tracing::trace;

pub(crate) fn parse_geometry(node: &XmlNode) -> Result<Geometry> {
    let mut primitives = Vec::with_capacity(node.children.len());
    for child in &node.children {
        match parse_primitive(child)? {
            Some(primitive) => primitives.push(primitive),
            None => trace!(tag = %child.name, parent = %node.name, "skipping non-primitive element"),
        }
    }
    Ok(Geometry::new(primitives))
}

/// `Ok(None)` for tags that are not primitives
pub(crate) fn parse_primitive(node: &XmlNode) -> Result<Option<Primitive>> {
    let primitive = match node.name.as_str() {
        "wire" => Primitive::Wire(parse_wire(node)?),
        "smd" => Primitive::Smd(parse_smd(node)?),
        "pad" => Primitive::Pad(parse_pad(node)?),
        "text" => Primitive::Text(parse_text(node)?),
        "rectangle" => Primitive::Rectangle(parse_rectangle(node)?),
        "polygon" => Primitive::Polygon(parse_polygon(node)?),
        "hole" => Primitive::Hole(parse_hole(node)?),
        "pin" => Primitive::Pin(parse_pin(node)?),
        "circle" => Primitive::Circle(parse_circle(node)?),
        "via" => Primitive::Via(parse_via(node)?),
        _ => return Ok(None),
    };
    Ok(Some(primitive))
}

fn parse_wire(node: &XmlNode) -> Result<Wire> {
    Ok(Wire {
        start: point(node, "x1", "y1")?,
        end: point(node, "x2", "y2")?,
        width: required_f64(node, "width")?,
        layer: required_i32(node, "layer")?,
        curve: optional_f64(node, "curve")?,
        cap: optional_string(node, "cap"),
    })
}

fn parse_smd(node: &XmlNode) -> Result<Smd> {
    Ok(Smd {
        name: required(node, "name")?.to_string(),
        position: point(node, "x", "y")?,
        dx: required_f64(node, "dx")?,
        dy: required_f64(node, "dy")?,
        layer: required_i32(node, "layer")?,
        roundness: i32_or(node, "roundness", 0)?,
        rotation: rotation(node)?,
        stop: flag(node, "stop", true),
        cream: flag(node, "cream", true),
    })
}

fn parse_pad(node: &XmlNode) -> Result<Pad> {
    Ok(Pad {
        name: required(node, "name")?.to_string(),
        position: point(node, "x", "y")?,
        drill: required_f64(node, "drill")?,
        diameter: f64_or(node, "diameter", 0.0)?,
        shape: optional_string(node, "shape"),
        rotation: rotation(node)?,
        stop: flag(node, "stop", true),
        thermals: flag(node, "thermals", true),
        first: flag(node, "first", false),
    })
}

fn parse_text(node: &XmlNode) -> Result<Text> {
    Ok(Text {
        text: node.text_content.clone(),
        position: point(node, "x", "y")?,
        size: required_f64(node, "size")?,
        layer: required_i32(node, "layer")?,
        ratio: optional_f64(node, "ratio")?,
        rotation: rotation(node)?,
        font: optional_string(node, "font"),
        align: optional_string(node, "align"),
    })
}

fn parse_rectangle(node: &XmlNode) -> Result<Rectangle> {
    Ok(Rectangle {
        start: point(node, "x1", "y1")?,
        end: point(node, "x2", "y2")?,
        layer: required_i32(node, "layer")?,
        rotation: rotation(node)?,
    })
}

fn parse_polygon(node: &XmlNode) -> Result<Polygon> {
    let vertices = node
        .children_named("vertex")
        .map(|v| point(v, "x", "y"))
        .collect::<Result<Vec<_>>>()?;
    if vertices.is_empty() {
        return Err(EagleError::invalid_element("polygon", "polygon has no vertices"));
    }
    Ok(Polygon {
        width: required_f64(node, "width")?,
        layer: required_i32(node, "layer")?,
        vertices,
    })
}

fn parse_hole(node: &XmlNode) -> Result<Hole> {
    Ok(Hole {
        position: point(node, "x", "y")?,
        drill: required_f64(node, "drill")?,
    })
}

fn parse_pin(node: &XmlNode) -> Result<Pin> {
    let length = match node.attr("length") {
        Some(value) => PinLength::parse(value).ok_or_else(|| EagleError::InvalidAttribute {
            element: node.name.clone(),
            attribute: "length",
            value: value.to_string(),
        })?,
        None => PinLength::default(),
    };
    Ok(Pin {
        name: required(node, "name")?.to_string(),
        position: point(node, "x", "y")?,
        length,
        direction: optional_string(node, "direction"),
        function: optional_string(node, "function"),
        rotation: rotation(node)?,
        visible: node.attr("visible") != Some("off"),
        swap_level: i32_or(node, "swaplevel", 0)?,
    })
}

fn parse_circle(node: &XmlNode) -> Result<Circle> {
    Ok(Circle {
        center: point(node, "x", "y")?,
        radius: required_f64(node, "radius")?,
        width: required_f64(node, "width")?,
        layer: required_i32(node, "layer")?,
    })
}

fn parse_via(node: &XmlNode) -> Result<Via> {
    Ok(Via {
        position: point(node, "x", "y")?,
        drill: required_f64(node, "drill")?,
        diameter: optional_f64(node, "diameter")?,
        extent: required(node, "extent")?.to_string(),
        shape: optional_string(node, "shape"),
    })
}

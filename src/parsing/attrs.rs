//! Attribute coercion helpers
//!
//! Numbers parse as `f64` (coordinates, sizes) or `i32` (layers, classes).
//! A present but unparsable value aborts the parse with
//! [`EagleError::InvalidAttribute`].

use crate::draw::geometry::{Point, Rotation};
use crate::error::{EagleError, Result};
use crate::names::collect_unique;
use crate::parse_xml::XmlNode;
use std::str::FromStr;

fn invalid(node: &XmlNode, attribute: &'static str, value: &str) -> EagleError {
    EagleError::InvalidAttribute {
        element: node.name.clone(),
        attribute,
        value: value.to_string(),
    }
}

pub(crate) fn required<'a>(node: &'a XmlNode, attribute: &'static str) -> Result<&'a str> {
    node.attr(attribute).ok_or_else(|| EagleError::MissingAttribute {
        element: node.name.clone(),
        attribute,
    })
}

pub(crate) fn optional_string(node: &XmlNode, attribute: &str) -> Option<String> {
    node.attr(attribute).map(str::to_string)
}

fn parse_number<T: FromStr>(node: &XmlNode, attribute: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| invalid(node, attribute, value))
}

pub(crate) fn required_f64(node: &XmlNode, attribute: &'static str) -> Result<f64> {
    let value = required(node, attribute)?;
    let number: f64 = parse_number(node, attribute, value)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(invalid(node, attribute, value))
    }
}

pub(crate) fn optional_f64(node: &XmlNode, attribute: &'static str) -> Result<Option<f64>> {
    match node.attr(attribute) {
        Some(_) => required_f64(node, attribute).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn f64_or(node: &XmlNode, attribute: &'static str, default: f64) -> Result<f64> {
    Ok(optional_f64(node, attribute)?.unwrap_or(default))
}

pub(crate) fn required_i32(node: &XmlNode, attribute: &'static str) -> Result<i32> {
    let value = required(node, attribute)?;
    parse_number(node, attribute, value)
}

pub(crate) fn i32_or(node: &XmlNode, attribute: &'static str, default: i32) -> Result<i32> {
    match node.attr(attribute) {
        Some(value) => parse_number(node, attribute, value),
        None => Ok(default),
    }
}

/// `yes` is true, `no` is false, anything else keeps the default
pub(crate) fn flag(node: &XmlNode, attribute: &str, default: bool) -> bool {
    match node.attr(attribute) {
        Some("yes") => true,
        Some("no") => false,
        _ => default,
    }
}

pub(crate) fn point(node: &XmlNode, x: &'static str, y: &'static str) -> Result<Point> {
    Ok(Point::new(required_f64(node, x)?, required_f64(node, y)?))
}

/// The `rot` attribute; no rotation when absent
pub(crate) fn rotation(node: &XmlNode) -> Result<Rotation> {
    match node.attr("rot") {
        Some(value) => Rotation::parse(value).ok_or_else(|| invalid(node, "rot", value)),
        None => Ok(Rotation::default()),
    }
}

/// Text of the first direct `<description>` child
pub(crate) fn description(node: &XmlNode) -> Option<String> {
    node.child("description").map(|d| d.text_content.clone())
}

/// `<attribute name=".." value=".."/>` children as a name/value map
pub(crate) fn attribute_map(node: &XmlNode) -> Result<indexmap::IndexMap<String, String>> {
    let pairs = node
        .children_named("attribute")
        .map(|attr| {
            let name = required(attr, "name")?.to_string();
            let value = attr.attr("value").unwrap_or_default().to_string();
            Ok((name, value))
        })
        .collect::<Result<Vec<_>>>()?;
    collect_unique("attribute", pairs)
}

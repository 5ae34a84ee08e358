//! Shared drawing sections: `<layers>`, `<settings>` and `<grid>`

use super::attrs::{f64_or, flag, i32_or, optional_f64, optional_string, required, required_i32};
use crate::draw::layers::{Layer, LayerSet};
use crate::error::Result;
use crate::model::{Grid, Settings};
use crate::names::collect_unique;
use crate::parse_xml::XmlNode;

pub(crate) fn parse_layers(drawing: &XmlNode) -> Result<LayerSet> {
    let layers = drawing
        .select("layers/layer")
        .into_iter()
        .map(parse_layer)
        .collect::<Result<Vec<_>>>()?;
    LayerSet::new(layers)
}

/// Layer flags are on only for an exact `yes`. EAGLE omits them when on.
fn layer_flag(node: &XmlNode, attribute: &str) -> bool {
    node.attr(attribute).map_or(true, |value| value == "yes")
}

fn parse_layer(node: &XmlNode) -> Result<Layer> {
    Ok(Layer {
        number: required_i32(node, "number")?,
        name: required(node, "name")?.to_string(),
        color: required_i32(node, "color")?,
        fill: i32_or(node, "fill", 1)?,
        visible: layer_flag(node, "visible"),
        active: layer_flag(node, "active"),
    })
}

pub(crate) fn parse_settings(drawing: &XmlNode) -> Result<Settings> {
    let pairs = drawing
        .select("settings/setting")
        .into_iter()
        .flat_map(|setting| setting.attributes.iter())
        .map(|(k, v)| (k.clone(), v.clone()));
    collect_unique("setting", pairs)
}

pub(crate) fn parse_grid(drawing: &XmlNode) -> Result<Grid> {
    let Some(node) = drawing.child("grid") else {
        return Ok(Grid::default());
    };
    let defaults = Grid::default();
    Ok(Grid {
        distance: f64_or(node, "distance", defaults.distance)?,
        unit_dist: optional_string(node, "unitdist").unwrap_or(defaults.unit_dist),
        unit: optional_string(node, "unit").unwrap_or(defaults.unit),
        style: optional_string(node, "style").unwrap_or(defaults.style),
        multiple: i32_or(node, "multiple", defaults.multiple)?,
        display: flag(node, "display", defaults.display),
        alt_distance: optional_f64(node, "altdistance")?,
        alt_unit_dist: optional_string(node, "altunitdist"),
        alt_unit: optional_string(node, "altunit"),
    })
}

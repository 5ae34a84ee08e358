//! Typed SVG shape fragments produced by primitives.

use crate::parse_xml::XmlNode;
use std::fmt::Display;

/// Format a coordinate for output. Negative zero prints as `0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Ordered inline CSS declarations (`stroke:red;stroke-width:1`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style(Vec<(&'static str, String)>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// Numeric declaration, formatted like coordinates
    pub fn with_num(self, key: &'static str, value: f64) -> Self {
        self.with(key, fmt_num(value))
    }

    /// Parse a fixed `key:value;key:value` declaration list
    pub fn from_encoded(encoded: &'static str) -> Self {
        Self(
            encoded
                .split(';')
                .filter_map(|decl| decl.split_once(':'))
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// One renderable SVG shape in output coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Style,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    /// Vertices are truncated to whole output units
    Polygon {
        points: Vec<(i64, i64)>,
        style: Style,
    },
    Text {
        content: String,
        x: f64,
        y: f64,
        transform: String,
        style: Style,
    },
}

impl Fragment {
    /// SVG element name
    pub fn tag(&self) -> &'static str {
        match self {
            Fragment::Line { .. } => "line",
            Fragment::Rect { .. } => "rect",
            Fragment::Circle { .. } => "circle",
            Fragment::Polygon { .. } => "polygon",
            Fragment::Text { .. } => "text",
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            Fragment::Line { style, .. }
            | Fragment::Rect { style, .. }
            | Fragment::Circle { style, .. }
            | Fragment::Polygon { style, .. }
            | Fragment::Text { style, .. } => style,
        }
    }

    pub fn to_node(&self) -> XmlNode {
        let node = XmlNode::new(self.tag());
        let node = match self {
            Fragment::Line { x1, y1, x2, y2, .. } => node
                .with_attr("x1", fmt_num(*x1))
                .with_attr("y1", fmt_num(*y1))
                .with_attr("x2", fmt_num(*x2))
                .with_attr("y2", fmt_num(*y2)),
            Fragment::Rect {
                x,
                y,
                width,
                height,
                ..
            } => node
                .with_attr("x", fmt_num(*x))
                .with_attr("y", fmt_num(*y))
                .with_attr("width", fmt_num(*width))
                .with_attr("height", fmt_num(*height)),
            Fragment::Circle { cx, cy, r, .. } => node
                .with_attr("r", fmt_num(*r))
                .with_attr("cx", fmt_num(*cx))
                .with_attr("cy", fmt_num(*cy)),
            Fragment::Polygon { points, .. } => {
                let points = points
                    .iter()
                    .map(|(x, y)| format!("{},{}", x, y))
                    .collect::<Vec<_>>()
                    .join(" ");
                node.with_attr("points", points)
            }
            Fragment::Text {
                content,
                x,
                y,
                transform,
                ..
            } => node
                .with_attr("x", fmt_num(*x))
                .with_attr("y", fmt_num(*y))
                .with_attr("transform", transform.clone())
                .with_text(content.clone()),
        };
        node.with_attr("style", self.style().encode())
    }
}

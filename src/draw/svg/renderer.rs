//! Turns a geometry container into a standalone SVG document.

use super::fragment::{fmt_num, Fragment, Style};
use crate::config::RenderOptions;
use crate::draw::geometry::{HasGeometry, Point, RenderContext, Sign};
use crate::draw::layers::LayerSet;
use crate::error::Result;
use crate::parse_xml::XmlNode;
use crate::serialize_xml::{
    write_xml, xml_node_to_compact_string, xml_node_to_file, xml_node_to_pretty_string,
};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XML_PREAMBLE: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>"#;

const BOUNDING_BOX_STYLE: &str = "stroke-width:1;stroke:red;fill:rgba(255, 0, 0, 0.1)";

/// A rendered drawing: root size plus shapes in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub width: f64,
    pub height: f64,
    pub fragments: Vec<Fragment>,
}

impl SvgDocument {
    pub fn to_node(&self) -> XmlNode {
        XmlNode::new("svg")
            .with_attr("xmlns", SVG_NAMESPACE)
            .with_attr("width", fmt_num(self.width))
            .with_attr("height", fmt_num(self.height))
            .with_children(self.fragments.iter().map(Fragment::to_node).collect())
    }

    /// Compact markup without the XML preamble
    pub fn to_svg_string(&self) -> io::Result<String> {
        xml_node_to_compact_string(&self.to_node())
    }

    /// Indented markup, one element per line
    pub fn to_pretty_string(&self) -> io::Result<String> {
        xml_node_to_pretty_string(&self.to_node())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_xml(&self.to_node(), Some(XML_PREAMBLE), writer)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        xml_node_to_file(&self.to_node(), Some(XML_PREAMBLE), path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    options: RenderOptions,
}

impl SvgRenderer {
    /// Rejects options that would put non-finite numbers in the output,
    /// such as a zero scale.
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one container.
    ///
    /// The offset cancels the native origin and, on a flipped axis, reflects
    /// about the far edge so the drawing stays in positive output space.
    pub fn render<G: HasGeometry + ?Sized>(&self, entity: &G, layers: &LayerSet) -> SvgDocument {
        let RenderOptions {
            scale,
            margin,
            flip,
            add_bounding_box,
        } = self.options;

        let bbox = entity.bounding_box();
        let native_width = bbox.width();
        let native_height = bbox.height();
        let width = (native_width * scale).ceil();
        let height = (native_height * scale).ceil();

        let offset_margin = margin / scale;
        let offset_x = match flip.x() {
            Sign::Negative => native_width + bbox.min.x,
            Sign::Positive => -bbox.min.x,
        };
        let offset_y = match flip.y() {
            Sign::Negative => native_height + bbox.min.y,
            Sign::Positive => -bbox.min.y,
        };
        let offset = Point::new(offset_x + offset_margin, offset_y + offset_margin);

        debug!(
            min = ?bbox.min,
            max = ?bbox.max,
            width,
            height,
            offset_x = offset.x,
            offset_y = offset.y,
            "computed SVG transform"
        );

        let ctx = RenderContext::new(offset, scale, flip, layers);
        let mut fragments = Vec::new();
        if add_bounding_box {
            fragments.push(Fragment::Rect {
                x: margin,
                y: margin,
                width,
                height,
                style: Style::from_encoded(BOUNDING_BOX_STYLE),
            });
        }
        fragments.extend(entity.geometry().render_fragments(&ctx));

        SvgDocument {
            width: width + 2.0 * margin,
            height: height + 2.0 * margin,
            fragments,
        }
    }

    /// Render a batch in parallel; output order matches input order.
    pub fn render_many<G>(&self, entities: &[G], layers: &LayerSet) -> Vec<SvgDocument>
    where
        G: HasGeometry + Sync,
    {
        entities
            .par_iter()
            .map(|entity| self.render(entity, layers))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::{Flip, Geometry, Primitive, Wire};
    use crate::draw::layers::Layer;
    use crate::error::EagleError;

    fn geometry() -> Geometry {
        Geometry::new(vec![Primitive::Wire(Wire {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 5.0),
            width: 0.0,
            layer: 1,
            curve: None,
            cap: None,
        })])
    }

    fn layers() -> LayerSet {
        LayerSet::new([Layer::new(1, "Top", 4)]).unwrap()
    }

    #[test]
    fn test_root_size_includes_margin() {
        let renderer = SvgRenderer::new(RenderOptions {
            scale: 2.5,
            ..RenderOptions::default()
        })
        .unwrap();
        let doc = renderer.render(&geometry(), &layers());
        assert_eq!(doc.width, 25.0 + 20.0);
        assert_eq!(doc.height, 13.0 + 20.0);
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        for scale in [0.0, -1.0, f64::NAN] {
            let result = SvgRenderer::new(RenderOptions {
                scale,
                ..RenderOptions::default()
            });
            assert!(matches!(result, Err(EagleError::Config(_))), "scale {}", scale);
        }
    }

    #[test]
    fn test_default_flip_maps_top_edge_to_margin() {
        let doc = SvgRenderer::default().render(&geometry(), &layers());
        match &doc.fragments[0] {
            Fragment::Line { x1, y1, x2, y2, .. } => {
                assert_eq!((*x1, *y1), (10.0, 15.0));
                assert_eq!((*x2, *y2), (20.0, 10.0));
            }
            other => panic!("unexpected fragment {:?}", other),
        }
    }

    #[test]
    fn test_bounding_box_outline_comes_first() {
        let renderer = SvgRenderer::new(RenderOptions {
            add_bounding_box: true,
            flip: Flip(Sign::Negative, Sign::Positive),
            ..RenderOptions::default()
        })
        .unwrap();
        let doc = renderer.render(&geometry(), &layers());
        assert_eq!(doc.fragments.len(), 2);
        let node = doc.fragments[0].to_node();
        assert_eq!(node.attr("x"), Some("10"));
        assert_eq!(node.attr("width"), Some("10"));
        assert_eq!(node.attr("style"), Some(BOUNDING_BOX_STYLE));
    }

    #[test]
    fn test_svg_string_has_namespace_and_size() {
        let doc = SvgRenderer::default().render(&Geometry::default(), &layers());
        assert_eq!(
            doc.to_svg_string().unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" />"#
        );
    }

    #[test]
    fn test_pretty_string_puts_fragments_on_own_lines() {
        let doc = SvgRenderer::default().render(&geometry(), &layers());
        let pretty = doc.to_pretty_string().unwrap();
        let lines: Vec<&str> = pretty.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  <line "));
    }

    #[test]
    fn test_write_to_prefixes_preamble() {
        let doc = SvgRenderer::default().render(&geometry(), &layers());
        let mut out = Vec::new();
        doc.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(XML_PREAMBLE));
        assert!(text.contains("<line "));
    }

    #[test]
    fn test_render_many_keeps_order() {
        let small = Geometry::default();
        let large = geometry();
        let docs = SvgRenderer::default().render_many(&[&small, &large], &layers());
        assert_eq!(docs.len(), 2);
        assert!(docs[0].fragments.is_empty());
        assert_eq!(docs[1].width, 30.0);
    }
}

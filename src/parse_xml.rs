//! Generic XML parse tree consumed by the EAGLE document parser.
//!
//! The tree is deliberately dumb: element name, ordered attributes, text and
//! children. Everything EAGLE-specific lives in [`crate::parsing`].

use crate::error::{EagleError, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A parsed XML element with its attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    /// The name/tag of this element
    pub name: String,
    /// Attribute names to (unescaped) values, in document order
    pub attributes: IndexMap<String, String>,
    /// Non-blank text content of this node
    pub text_content: String,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute insertion, mostly used when assembling
    /// output trees.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    pub fn with_children(mut self, children: Vec<XmlNode>) -> Self {
        self.children = children;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == tag)
    }

    /// All direct children with the given tag, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == tag)
    }

    /// Walk a slash-separated path of direct-child tags, e.g. `"packages/package"`.
    pub fn select<'a>(&'a self, path: &str) -> Vec<&'a XmlNode> {
        let mut current = vec![self];
        for tag in path.split('/').filter(|t| !t.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node: &'a XmlNode| node.children.iter().filter(move |c| c.name == tag))
                .collect();
        }
        current
    }
}

/// Parses an XML file and returns the root node.
///
/// The file handle only lives for the duration of this call.
pub fn parse_xml_file<P: AsRef<Path>>(path: P) -> Result<XmlNode> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| EagleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_xml_reader(BufReader::new(file))
}

pub fn parse_xml_str(source: &str) -> Result<XmlNode> {
    parse_xml_reader(source.as_bytes())
}

/// Parses XML from any buffered reader and returns the root element.
pub fn parse_xml_reader<R: BufRead>(source: R) -> Result<XmlNode> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let maybe_root = match reader.read_event_into(&mut buf)? {
            Event::Start(start) => Some((start.into_owned(), false)),
            Event::Empty(start) => Some((start.into_owned(), true)),
            Event::Eof => return Err(EagleError::EmptyDocument),
            _ => None,
        };

        if let Some((start, self_closing)) = maybe_root {
            let mut node_buf = Vec::new();
            return parse_node(&mut reader, &mut node_buf, start, self_closing);
        }
    }
}

fn parse_node<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
    start: BytesStart<'static>,
    self_closing: bool,
) -> Result<XmlNode> {
    let element_name_bytes = start.name().as_ref().to_vec();
    let mut node = XmlNode {
        name: String::from_utf8_lossy(&element_name_bytes).to_string(),
        attributes: collect_attributes(&start)?,
        text_content: String::new(),
        children: Vec::new(),
    };

    if self_closing {
        return Ok(node);
    }

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(child_start) => {
                let mut child_buf = Vec::new();
                let child = parse_node(reader, &mut child_buf, child_start.into_owned(), false)?;
                node.children.push(child);
            }
            Event::Empty(child_start) => {
                let mut child_buf = Vec::new();
                let child = parse_node(reader, &mut child_buf, child_start.into_owned(), true)?;
                node.children.push(child);
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                if !value.trim().is_empty() {
                    node.text_content.push_str(&value);
                }
            }
            Event::CData(text) => {
                let value = String::from_utf8_lossy(text.as_ref()).to_string();
                if !value.trim().is_empty() {
                    node.text_content.push_str(&value);
                }
            }
            Event::End(end) => {
                if end.name().as_ref() != element_name_bytes.as_slice() {
                    return Err(EagleError::invalid_element(
                        node.name,
                        format!(
                            "unexpected closing tag '</{}>'",
                            String::from_utf8_lossy(end.name().as_ref())
                        ),
                    ));
                }
                return Ok(node);
            }
            Event::Eof => {
                return Err(EagleError::invalid_element(
                    node.name,
                    "unexpected end of file",
                ));
            }
            _ => {}
        }
    }
}

fn collect_attributes(start: &BytesStart<'_>) -> Result<IndexMap<String, String>> {
    let mut map = IndexMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes_text_and_children() {
        let root = parse_xml_str(
            r#"<eagle version="9.6"><drawing><library><description>&lt;b&gt;Parts&lt;/b&gt;</description></library></drawing></eagle>"#,
        )
        .expect("parse");

        assert_eq!(root.name, "eagle");
        assert_eq!(root.attr("version"), Some("9.6"));
        let desc = root.select("drawing/library/description");
        assert_eq!(desc.len(), 1);
        assert_eq!(desc[0].text_content, "<b>Parts</b>");
    }

    #[test]
    fn test_select_keeps_document_order() {
        let root = parse_xml_str(
            r#"<a><b><c n="1"/><c n="2"/></b><b><c n="3"/></b><d/></a>"#,
        )
        .expect("parse");

        let names: Vec<_> = root
            .select("b/c")
            .iter()
            .filter_map(|c| c.attr("n"))
            .collect();
        assert_eq!(names, vec!["1", "2", "3"]);
        assert!(root.child("d").is_some());
        assert!(root.child("e").is_none());
        assert_eq!(root.children_named("b").count(), 2);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let err = parse_xml_str("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, EagleError::EmptyDocument));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_xml_str("<a><b></a>").is_err());
    }
}

//! XML serialization for output trees (rendered SVG documents).
//!
//! Writes [`XmlNode`] trees either compactly or indented. Attribute order is
//! preserved, so rendered documents are byte-for-byte reproducible.

use crate::error::{EagleError, Result};
use crate::parse_xml::XmlNode;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Children count above which pretty output is produced in parallel
const PARALLEL_CHILD_THRESHOLD: usize = 64;

/// Serializes a node tree without any whitespace between elements
pub fn xml_node_to_compact_string(node: &XmlNode) -> io::Result<String> {
    let mut buffer = Vec::with_capacity(1024);
    write_node_compact(node, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Serializes a node tree with two-space indentation
pub fn xml_node_to_pretty_string(node: &XmlNode) -> io::Result<String> {
    let mut buffer = Vec::with_capacity(1024);
    write_node_pretty(node, &mut buffer, 0)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes `preamble` (if any) followed by the compact node tree
pub fn write_xml<W: Write>(node: &XmlNode, preamble: Option<&str>, writer: &mut W) -> io::Result<()> {
    if let Some(preamble) = preamble {
        writer.write_all(preamble.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    write_node_compact(node, writer)
}

/// Serializes a node tree to a file on disk, prefixed by `preamble`
pub fn xml_node_to_file<P: AsRef<Path>>(node: &XmlNode, preamble: Option<&str>, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| EagleError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_xml(node, preamble, &mut writer).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

fn write_start_tag<W: Write>(node: &XmlNode, writer: &mut W) -> io::Result<()> {
    writer.write_all(b"<")?;
    writer.write_all(node.name.as_bytes())?;
    for (key, value) in &node.attributes {
        writer.write_all(b" ")?;
        writer.write_all(key.as_bytes())?;
        writer.write_all(b"=\"")?;
        write_escaped_attr(writer, value)?;
        writer.write_all(b"\"")?;
    }
    Ok(())
}

fn write_node_pretty<W: Write>(node: &XmlNode, writer: &mut W, indent_level: usize) -> io::Result<()> {
    write_indent(writer, indent_level)?;
    write_start_tag(node, writer)?;

    let has_text = !node.text_content.is_empty();
    if node.children.is_empty() && !has_text {
        writer.write_all(b" />\n")?;
        return Ok(());
    }

    if node.children.is_empty() {
        // Text-only elements stay on one line; whitespace inside <text> is visible.
        writer.write_all(b">")?;
        write_escaped_text(writer, &node.text_content)?;
    } else {
        writer.write_all(b">\n")?;
        if has_text {
            write_indent(writer, indent_level + 1)?;
            write_escaped_text(writer, &node.text_content)?;
            writer.write_all(b"\n")?;
        }

        if node.children.len() > PARALLEL_CHILD_THRESHOLD {
            let child_buffers: io::Result<Vec<Vec<u8>>> = node
                .children
                .par_iter()
                .map(|child| {
                    let mut buf = Vec::with_capacity(256);
                    write_node_pretty(child, &mut buf, indent_level + 1)?;
                    Ok(buf)
                })
                .collect();
            for buf in child_buffers? {
                writer.write_all(&buf)?;
            }
        } else {
            for child in &node.children {
                write_node_pretty(child, writer, indent_level + 1)?;
            }
        }
        write_indent(writer, indent_level)?;
    }

    writer.write_all(b"</")?;
    writer.write_all(node.name.as_bytes())?;
    writer.write_all(b">\n")?;
    Ok(())
}

fn write_node_compact<W: Write>(node: &XmlNode, writer: &mut W) -> io::Result<()> {
    write_start_tag(node, writer)?;

    if node.children.is_empty() && node.text_content.is_empty() {
        writer.write_all(b" />")?;
        return Ok(());
    }

    writer.write_all(b">")?;
    write_escaped_text(writer, &node.text_content)?;
    for child in &node.children {
        write_node_compact(child, writer)?;
    }
    writer.write_all(b"</")?;
    writer.write_all(node.name.as_bytes())?;
    writer.write_all(b">")?;
    Ok(())
}

fn write_indent<W: Write>(writer: &mut W, indent_level: usize) -> io::Result<()> {
    for _ in 0..indent_level {
        writer.write_all(b"  ")?;
    }
    Ok(())
}

fn write_escaped<W: Write>(writer: &mut W, input: &str, quote_entities: bool) -> io::Result<()> {
    let mut last = 0;
    for (idx, ch) in input.char_indices() {
        let entity: Option<&[u8]> = match ch {
            '&' => Some(b"&amp;"),
            '<' => Some(b"&lt;"),
            '>' => Some(b"&gt;"),
            '"' if quote_entities => Some(b"&quot;"),
            '\'' if quote_entities => Some(b"&apos;"),
            _ => None,
        };

        if let Some(bytes) = entity {
            if last < idx {
                writer.write_all(input[last..idx].as_bytes())?;
            }
            writer.write_all(bytes)?;
            last = idx + ch.len_utf8();
        }
    }

    if last < input.len() {
        writer.write_all(input[last..].as_bytes())?;
    }
    Ok(())
}

fn write_escaped_attr<W: Write>(writer: &mut W, input: &str) -> io::Result<()> {
    write_escaped(writer, input, true)
}

fn write_escaped_text<W: Write>(writer: &mut W, input: &str) -> io::Result<()> {
    write_escaped(writer, input, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_node() -> XmlNode {
        XmlNode::new("svg")
            .with_attr("width", "40")
            .with_attr("height", "30")
            .with_children(vec![
                XmlNode::new("text").with_attr("x", "1").with_text(">NAME"),
                XmlNode::new("line").with_attr("x1", "0"),
            ])
    }

    #[test]
    fn test_compact_output_keeps_attribute_order() {
        let xml = xml_node_to_compact_string(&create_test_node()).unwrap();
        assert_eq!(
            xml,
            r#"<svg width="40" height="30"><text x="1">&gt;NAME</text><line x1="0" /></svg>"#
        );
    }

    #[test]
    fn test_pretty_output_indents_children() {
        let xml = xml_node_to_pretty_string(&create_test_node()).unwrap();
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], r#"  <text x="1">&gt;NAME</text>"#);
        assert_eq!(lines[2], r#"  <line x1="0" />"#);
    }

    #[test]
    fn test_escape_attribute_chars() {
        let node = XmlNode::new("t").with_attr("style", "a\"b<c>&'");
        let xml = xml_node_to_compact_string(&node).unwrap();
        assert!(xml.contains("a&quot;b&lt;c&gt;&amp;&apos;"));
    }

    #[test]
    fn test_preamble_is_written_first() {
        let mut out = Vec::new();
        write_xml(&XmlNode::new("svg"), Some("<?xml version=\"1.0\"?>"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<?xml version=\"1.0\"?>\n<svg />");
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_are_returned() {
        let node = create_test_node();
        assert!(write_xml(&node, None, &mut FullDisk).is_err());
        assert!(write_xml(&node, Some("<?xml?>"), &mut FullDisk).is_err());
        let err = write_node_pretty(&node, &mut FullDisk, 0).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}

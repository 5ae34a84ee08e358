//! EAGLE document parsing
//!
//! Turns a parse tree into a typed [`Document`]. The `<drawing>` element must
//! hold exactly one of `<library>`, `<schematic>` or `<board>`.
//!
//! # Submodules
//! - `attrs` - Attribute coercion (numbers, flags, rotations)
//! - `geometry` - Primitive parsing
//! - `layers` - Layers, settings and grid
//! - `library` - Packages, symbols and device sets
//! - `schematic` - Parts, sheets, nets and busses
//! - `board` - Elements, signals and manufacturing rules

mod attrs;
mod board;
mod geometry;
mod layers;
mod library;
mod schematic;

use crate::error::{EagleError, Result};
use crate::model::{Document, Drawing};
use crate::parse_xml::{parse_xml_file, parse_xml_reader, parse_xml_str, XmlNode};
use std::io::BufRead;
use std::path::Path;
use tracing::info;

const DOCUMENT_KINDS: [&str; 3] = ["library", "schematic", "board"];

/// Read and parse an EAGLE file. The file is closed before this returns.
pub fn open(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let root = parse_xml_file(path)?;
    let mut document = parse_document(&root)?;
    let source = Some(path.to_path_buf());
    match &mut document {
        Document::Library(d) => d.source = source,
        Document::Schematic(d) => d.source = source,
        Document::Board(d) => d.source = source,
    }
    info!(path = %path.display(), kind = document.kind(), "loaded EAGLE document");
    Ok(document)
}

pub fn parse_str(source: &str) -> Result<Document> {
    parse_document(&parse_xml_str(source)?)
}

pub fn parse_reader<R: BufRead>(source: R) -> Result<Document> {
    parse_document(&parse_xml_reader(source)?)
}

/// Build a document from an `<eagle>` root or a bare `<drawing>` element
pub fn parse_document(root: &XmlNode) -> Result<Document> {
    let drawing = match root.name.as_str() {
        "drawing" => root,
        "eagle" => root.child("drawing").ok_or_else(|| EagleError::UnsupportedDocumentKind {
            found: "<eagle> without <drawing>".to_string(),
        })?,
        other => {
            return Err(EagleError::UnsupportedDocumentKind {
                found: format!("<{other}> root"),
            })
        }
    };

    let kinds: Vec<&XmlNode> = drawing
        .children
        .iter()
        .filter(|c| DOCUMENT_KINDS.contains(&c.name.as_str()))
        .collect();
    let content = match kinds.as_slice() {
        [single] => *single,
        [] => {
            return Err(EagleError::UnsupportedDocumentKind {
                found: "no library, schematic or board".to_string(),
            })
        }
        several => {
            let names: Vec<&str> = several.iter().map(|n| n.name.as_str()).collect();
            return Err(EagleError::UnsupportedDocumentKind {
                found: names.join(", "),
            });
        }
    };

    let version = if root.name == "eagle" {
        root.attr("version").map(str::to_string)
    } else {
        None
    };
    let settings = layers::parse_settings(drawing)?;
    let grid = layers::parse_grid(drawing)?;
    let layers = layers::parse_layers(drawing)?;

    macro_rules! wrap {
        ($variant:ident, $content:expr) => {
            Document::$variant(Drawing {
                version,
                source: None,
                settings,
                grid,
                layers,
                content: $content,
            })
        };
    }

    let document = match content.name.as_str() {
        "library" => wrap!(Library, library::parse_library(content)?),
        "schematic" => wrap!(Schematic, schematic::parse_schematic(content)?),
        _ => wrap!(Board, board::parse_board(content)?),
    };
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_must_be_a_drawing() {
        let err = parse_str("<svg/>").unwrap_err();
        assert!(matches!(err, EagleError::UnsupportedDocumentKind { .. }));
        let err = parse_str(r#"<eagle version="9.6.2"/>"#).unwrap_err();
        assert!(matches!(err, EagleError::UnsupportedDocumentKind { .. }));
    }

    #[test]
    fn test_exactly_one_kind() {
        let none = r#"<eagle><drawing><layers/></drawing></eagle>"#;
        assert!(matches!(
            parse_str(none),
            Err(EagleError::UnsupportedDocumentKind { .. })
        ));
        let two = r#"<eagle><drawing><library/><board/></drawing></eagle>"#;
        match parse_str(two) {
            Err(EagleError::UnsupportedDocumentKind { found }) => assert_eq!(found, "library, board"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_bare_drawing_root() {
        let doc = parse_str(
            r#"<drawing>
                <layers><layer number="1" name="Top" color="4"/></layers>
                <library/>
            </drawing>"#,
        )
        .unwrap();
        assert_eq!(doc.kind(), "library");
        assert_eq!(doc.version(), None);
        assert!(doc.layers().is_visible(1));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_str("<eagle><drawing></eagle>").is_err());
    }
}

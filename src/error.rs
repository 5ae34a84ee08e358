//! Error types shared by the parse tree, the document parser and the renderer.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = EagleError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EagleError {
    /// Root is not a drawing holding exactly one of library/schematic/board
    #[error("unsupported document kind: {found}")]
    UnsupportedDocumentKind { found: String },

    #[error("unresolved {kind} reference '{name}' in {scope}")]
    UnresolvedReference {
        kind: &'static str,
        name: String,
        scope: String,
    },

    #[error("{operation} is not supported for {entity}")]
    UnsupportedOperation {
        operation: &'static str,
        entity: &'static str,
    },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("invalid <{element}>: {reason}")]
    InvalidElement { element: String, reason: String },

    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("XML document is empty")]
    EmptyDocument,

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EagleError {
    pub(crate) fn unresolved(
        kind: &'static str,
        name: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            kind,
            name: name.into(),
            scope: scope.into(),
        }
    }

    pub(crate) fn invalid_element(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidElement {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

//! Writing entities back to EAGLE XML. Not implemented: every call fails
//! with [`EagleError::UnsupportedOperation`].

use super::board::{AutorouterRules, Board, DesignRules, Element, Signal};
use super::drawing::{Document, Drawing};
use super::library::{Attribute, Device, DeviceSet, Gate, Library, Package, Symbol, Technology};
use super::schematic::{Bus, Instance, Net, Part, Schematic, Segment, Sheet, SignalClass};
use crate::draw::layers::{Layer, LayerSet};
use crate::error::{EagleError, Result};
use crate::parse_xml::XmlNode;
use std::path::Path;

pub trait EagleWrite {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn to_xml(&self) -> Result<XmlNode> {
        Err(EagleError::UnsupportedOperation {
            operation: "to_xml",
            entity: Self::ENTITY,
        })
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let _ = path;
        Err(EagleError::UnsupportedOperation {
            operation: "save",
            entity: Self::ENTITY,
        })
    }
}

macro_rules! unsupported_write {
    ($($ty:ty => $entity:literal),* $(,)?) => {
        $(impl EagleWrite for $ty {
            const ENTITY: &'static str = $entity;
        })*
    };
}

unsupported_write! {
    Library => "library",
    Package => "package",
    Symbol => "symbol",
    DeviceSet => "device set",
    Gate => "gate",
    Device => "device",
    Technology => "technology",
    Attribute => "attribute",
    Schematic => "schematic",
    Part => "part",
    Sheet => "sheet",
    Instance => "instance",
    Net => "net",
    Segment => "segment",
    Bus => "bus",
    SignalClass => "signal class",
    Board => "board",
    DesignRules => "design rules",
    AutorouterRules => "autorouter rules",
    Element => "element",
    Signal => "signal",
    Layer => "layer",
    LayerSet => "layer set",
    Document => "document",
}

impl<T: EagleWrite> EagleWrite for Drawing<T> {
    const ENTITY: &'static str = T::ENTITY;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_write_fails_loudly() {
        let library = Library::new(None, None);
        assert!(matches!(
            library.to_xml(),
            Err(EagleError::UnsupportedOperation {
                operation: "to_xml",
                entity: "library"
            })
        ));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.lbr");
        assert!(matches!(
            library.save(&path),
            Err(EagleError::UnsupportedOperation { operation: "save", .. })
        ));
        assert!(!path.exists());
        assert!(matches!(
            LayerSet::default().to_xml(),
            Err(EagleError::UnsupportedOperation { entity: "layer set", .. })
        ));
    }
}

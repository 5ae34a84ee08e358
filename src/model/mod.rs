//! Typed document model for EAGLE libraries, schematics and boards.
//!
//! Cross references are kept by name and looked up in the owning scope, so
//! the model is a plain ownership tree with no cycles.

mod board;
mod drawing;
mod library;
mod schematic;
mod write;

pub use board::{AutorouterPass, AutorouterRules, Board, ContactRef, DesignRules, Element, Signal};
pub use drawing::{Document, Drawing, Grid, Settings};
pub use library::{
    Attribute, Connect, Device, DeviceSet, Gate, Library, Package, PackageRef, PadRef, Symbol,
    SymbolRef, Technology,
};
pub use schematic::{
    Bus, Clearance, Instance, Net, Part, PinRef, Schematic, Segment, Sheet, SignalClass,
};
pub use write::EagleWrite;

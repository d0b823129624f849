//! Layout engine for modular LED matrix enclosures.
//!
//! Turns an arrangement of LED panels and a set of design parameters into
//! a [`Part`] tree: one module per enclosure cell, each made of a chassis
//! and a lid. Geometry stays symbolic until the tree is evaluated through a
//! kernel.

pub mod builders;
pub mod error;
pub mod layout;
pub mod led_matrix;
pub mod parameters;

pub use builders::EnclosureBuilder;
pub use error::EngineError;
pub use layout::{DiffuserLayout, GridLayout, ModuleParameters, ModuleTemplate};
pub use led_matrix::{profile, CompositeLedMatrix, LedMatrix, PROFILE_NAMES};
pub use parameters::*;

use modeling_ops::Part;

/// Build the enclosure described by `enclosure`.
pub fn build_enclosure(enclosure: &EnclosureParameters) -> Result<Part, EngineError> {
    EnclosureBuilder::new(enclosure).build()
}

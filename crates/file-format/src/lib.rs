//! Part files: STL meshes and STEP documents written to a build directory.

pub mod errors;
pub mod exporter;
pub mod stl;

pub use errors::ExportError;
pub use exporter::{sanitize, ExportFormat, Exporter};
pub use stl::{export_ascii_stl, export_binary_stl};

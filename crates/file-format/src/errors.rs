use std::path::PathBuf;

use geometry_kernel::KernelError;
use modeling_ops::OpError;

/// Errors while encoding or writing part files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("'{object}' has no solid to export")]
    NoSolid { object: String },

    #[error("cannot create build directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Op(#[from] OpError),
}

//! Writes parts into a build directory, one file per part.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use geometry_kernel::{Kernel, RenderMesh};
use modeling_ops::{evaluate_part, EvalOptions, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::errors::ExportError;
use crate::stl::{export_ascii_stl, export_binary_stl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Stl,
    Step,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::Step => "step",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Build directory and naming of exported files.
///
/// A file is written to `{directory}/{object}.{name}.{ext}`, or
/// `{directory}/{object}.{ext}` without a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Exporter {
    pub directory: PathBuf,
    pub name: Option<String>,
    pub enabled: bool,
    /// Chordal tolerance of STL meshes, in mm.
    pub stl_tolerance: f64,
    pub ascii_stl: bool,
    /// Fail when a boolean operation has to fall back to separate solids.
    pub strict: bool,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("build"),
            name: None,
            enabled: true,
            stl_tolerance: 0.05,
            ascii_stl: false,
            strict: false,
        }
    }
}

impl Exporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn path(&self, object: &str, format: ExportFormat) -> PathBuf {
        let object = sanitize(object);
        let file = match self.name.as_deref() {
            Some(name) if !name.is_empty() => {
                format!("{object}.{}.{}", sanitize(name), format.extension())
            }
            _ => format!("{object}.{}", format.extension()),
        };
        self.directory.join(file)
    }

    /// Evaluate `part` and write it as `object`.
    ///
    /// Returns the written path, or `None` when exporting is disabled.
    #[instrument(skip_all, fields(object = %object, format = %format))]
    pub fn export(
        &self,
        kernel: &mut dyn Kernel,
        part: &Part,
        object: &str,
        format: ExportFormat,
    ) -> Result<Option<PathBuf>, ExportError> {
        if !self.enabled {
            info!("Skipping export of {object}");
            return Ok(None);
        }

        let options = EvalOptions {
            strict: self.strict,
        };
        let evaluated = evaluate_part(kernel, part, &options)?;
        if evaluated.bodies.is_empty() {
            return Err(ExportError::NoSolid {
                object: object.to_string(),
            });
        }

        let path = self.path(object, format);
        let contents = match format {
            ExportFormat::Stl => self.encode_stl(kernel, &evaluated.handles(), object)?,
            ExportFormat::Step => kernel
                .export_step(&evaluated.handles(), &file_name(&path))?
                .into_bytes(),
        };
        self.write(&path, &contents)?;
        info!(path = %path.display(), bodies = evaluated.bodies.len(), "exported");
        Ok(Some(path))
    }

    fn encode_stl(
        &self,
        kernel: &mut dyn Kernel,
        handles: &[geometry_kernel::KernelSolidHandle],
        object: &str,
    ) -> Result<Vec<u8>, ExportError> {
        let mut mesh = RenderMesh::default();
        for handle in handles {
            mesh.merge(&kernel.tessellate(handle, self.stl_tolerance)?);
        }
        debug!(triangles = mesh.triangle_count(), "tessellated");
        if self.ascii_stl {
            Ok(export_ascii_stl(&mesh, object)?.into_bytes())
        } else {
            export_binary_stl(&mesh, object)
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), ExportError> {
        fs::create_dir_all(&self.directory).map_err(|source| ExportError::CreateDirectory {
            path: self.directory.clone(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Keeps file names portable: anything but ASCII alphanumerics, `.`, `-`
/// and `_` becomes `-`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

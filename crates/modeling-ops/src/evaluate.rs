//! Evaluation of shapes and part trees against a kernel.

use std::time::Instant;

use enclosure_types::{Color, Placement};
use geometry_kernel::{Kernel, KernelSolidHandle};
use tracing::{debug, info, instrument};

use crate::boolean::{cut_all, fuse_all, EvalSolid};
use crate::part::Part;
use crate::shape::Shape;
use crate::types::{Diagnostics, OpError};

const IDENTITY_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, Default)]
pub struct EvalOptions {
    /// Fail instead of keeping operands separate when a boolean fails.
    pub strict: bool,
}

/// One kernel solid produced by a part.
#[derive(Debug, Clone)]
pub struct Body {
    /// Slash-separated path of part labels from the root.
    pub label: String,
    pub color: Option<Color>,
    pub handle: KernelSolidHandle,
}

#[derive(Debug, Clone, Default)]
pub struct Evaluated {
    pub bodies: Vec<Body>,
    pub diagnostics: Diagnostics,
}

impl Evaluated {
    pub fn handles(&self) -> Vec<KernelSolidHandle> {
        self.bodies.iter().map(|b| b.handle.clone()).collect()
    }
}

struct Evaluator<'a> {
    kernel: &'a mut dyn Kernel,
    options: EvalOptions,
    diagnostics: Diagnostics,
}

impl Evaluator<'_> {
    fn shape(
        &mut self,
        shape: &Shape,
        world: &Placement,
        label: &str,
    ) -> Result<Vec<EvalSolid>, OpError> {
        match shape {
            Shape::Primitive(primitive) => {
                let started = Instant::now();
                let mut handle = primitive.build(self.kernel)?;
                if !world.is_identity(IDENTITY_TOLERANCE) {
                    handle = self.kernel.transform(&handle, world)?;
                }
                self.diagnostics.kernel_time_ms += started.elapsed().as_secs_f64() * 1000.0;
                Ok(vec![EvalSolid {
                    handle,
                    bounds: primitive.bounding_box().transformed(world),
                }])
            }
            Shape::Transformed { shape, placement } => {
                self.shape(shape, &(*world * *placement), label)
            }
            Shape::Union(shapes) => {
                let operands = self.all(shapes, world, label)?;
                fuse_all(
                    self.kernel,
                    operands,
                    label,
                    self.options.strict,
                    &mut self.diagnostics,
                )
            }
            Shape::Group(shapes) => self.all(shapes, world, label),
            Shape::Subtract { base, tools } => {
                let bases = self.shape(base, world, label)?;
                let tools = self.all(tools, world, label)?;
                cut_all(
                    self.kernel,
                    bases,
                    &tools,
                    label,
                    self.options.strict,
                    &mut self.diagnostics,
                )
            }
        }
    }

    fn all(
        &mut self,
        shapes: &[Shape],
        world: &Placement,
        label: &str,
    ) -> Result<Vec<EvalSolid>, OpError> {
        let mut out = Vec::new();
        for shape in shapes {
            out.extend(self.shape(shape, world, label)?);
        }
        Ok(out)
    }

    fn part(
        &mut self,
        part: &Part,
        parent: &Placement,
        prefix: &str,
        bodies: &mut Vec<Body>,
    ) -> Result<(), OpError> {
        let world = *parent * part.placement;
        let label = if prefix.is_empty() {
            part.label.clone()
        } else {
            format!("{prefix}/{}", part.label)
        };

        if let Some(shape) = &part.shape {
            let solids = self.shape(shape, &world, &label)?;
            debug!(label = %label, solids = solids.len(), "evaluated part");
            bodies.extend(solids.into_iter().map(|s| Body {
                label: label.clone(),
                color: part.color,
                handle: s.handle,
            }));
        }
        for child in &part.children {
            self.part(child, &world, &label, bodies)?;
        }
        Ok(())
    }
}

/// Build `shape` in the kernel.
pub fn evaluate_shape(
    kernel: &mut dyn Kernel,
    shape: &Shape,
    options: &EvalOptions,
) -> Result<(Vec<KernelSolidHandle>, Diagnostics), OpError> {
    let mut evaluator = Evaluator {
        kernel,
        options: *options,
        diagnostics: Diagnostics::default(),
    };
    let solids = evaluator.shape(shape, &Placement::identity(), "shape")?;
    Ok((
        solids.into_iter().map(|s| s.handle).collect(),
        evaluator.diagnostics,
    ))
}

/// Build every shape in the tree under `part`, placed in `part`'s parent frame.
#[instrument(skip_all, fields(part = %part.label))]
pub fn evaluate_part(
    kernel: &mut dyn Kernel,
    part: &Part,
    options: &EvalOptions,
) -> Result<Evaluated, OpError> {
    let mut evaluator = Evaluator {
        kernel,
        options: *options,
        diagnostics: Diagnostics::default(),
    };
    let mut bodies = Vec::new();
    evaluator.part(part, &Placement::identity(), "", &mut bodies)?;

    let diagnostics = evaluator.diagnostics;
    info!(
        bodies = bodies.len(),
        warnings = diagnostics.warnings.len(),
        kernel_ms = format!("{:.1}", diagnostics.kernel_time_ms),
        "evaluated part tree"
    );
    Ok(Evaluated {
        bodies,
        diagnostics,
    })
}

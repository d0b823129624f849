use std::time::Instant;

use enclosure_types::BoundingBox;
use geometry_kernel::{Kernel, KernelError, KernelSolidHandle};
use tracing::{debug, warn};

use crate::types::{Diagnostics, OpError};

/// A solid living in the kernel together with its analytic bounds.
#[derive(Debug, Clone)]
pub struct EvalSolid {
    pub handle: KernelSolidHandle,
    pub bounds: BoundingBox,
}

/// Fuse `solids` into as few solids as the kernel manages.
///
/// A union the kernel rejects leaves that operand as a separate solid. The
/// degraded result is recorded in `diagnostics`, or returned as an error when
/// `strict` is set.
pub fn fuse_all(
    kernel: &mut dyn Kernel,
    solids: Vec<EvalSolid>,
    label: &str,
    strict: bool,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<EvalSolid>, OpError> {
    let mut iter = solids.into_iter();
    let Some(mut fused) = iter.next() else {
        return Ok(Vec::new());
    };
    let mut separate = Vec::new();

    for next in iter {
        let started = Instant::now();
        let result = kernel.boolean_union(&fused.handle, &next.handle);
        diagnostics.kernel_time_ms += started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(handle) => {
                fused = EvalSolid {
                    handle,
                    bounds: fused.bounds.union(&next.bounds),
                };
            }
            Err(e) => {
                fallback("union", label, &e, strict, diagnostics)?;
                separate.push(next);
            }
        }
    }

    let mut out = vec![fused];
    out.extend(separate);
    Ok(out)
}

/// Remove every tool from every base solid.
///
/// Tools whose bounds do not overlap a base are skipped. A subtraction the
/// kernel rejects keeps the base as it was.
pub fn cut_all(
    kernel: &mut dyn Kernel,
    bases: Vec<EvalSolid>,
    tools: &[EvalSolid],
    label: &str,
    strict: bool,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<EvalSolid>, OpError> {
    let mut out = Vec::with_capacity(bases.len());
    for mut base in bases {
        for tool in tools {
            if !base.bounds.intersects(&tool.bounds) {
                debug!(label, "skipping subtraction of a disjoint tool");
                continue;
            }

            let started = Instant::now();
            let result = kernel.boolean_subtract(&base.handle, &tool.handle);
            diagnostics.kernel_time_ms += started.elapsed().as_secs_f64() * 1000.0;

            match result {
                Ok(handle) => base.handle = handle,
                Err(e) => fallback("subtraction", label, &e, strict, diagnostics)?,
            }
        }
        out.push(base);
    }
    Ok(out)
}

fn fallback(
    operation: &'static str,
    label: &str,
    error: &KernelError,
    strict: bool,
    diagnostics: &mut Diagnostics,
) -> Result<(), OpError> {
    if strict {
        return Err(OpError::StrictFallback {
            operation,
            label: label.to_string(),
            reason: error.to_string(),
        });
    }
    warn!(label, %error, "{operation} failed, {}", kept_after_failure(operation));
    diagnostics.warn(format!("{label}: {operation} failed ({error})"));
    Ok(())
}

/// What a degraded result holds once `operation` has failed.
fn kept_after_failure(operation: &str) -> &'static str {
    match operation {
        "union" => "keeping operands separate",
        _ => "keeping the base",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosure_types::{Placement, Point3, Vector3};
    use geometry_kernel::MockKernel;

    fn boxed(kernel: &mut MockKernel, x: f64) -> EvalSolid {
        let h = kernel.make_box(2.0, 2.0, 2.0).unwrap();
        let handle = kernel
            .transform(&h, &Placement::translation(x, 0.0, 0.0))
            .unwrap();
        EvalSolid {
            handle,
            bounds: BoundingBox::centered(Point3::new(x, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0)),
        }
    }

    #[test]
    fn fuse_all_collapses_to_one_solid() {
        let mut kernel = MockKernel::new();
        let solids = vec![boxed(&mut kernel, 0.0), boxed(&mut kernel, 1.0), boxed(&mut kernel, 2.0)];
        let mut diagnostics = Diagnostics::default();

        let fused = fuse_all(&mut kernel, solids, "test", false, &mut diagnostics).unwrap();
        assert_eq!(fused.len(), 1);
        assert_eq!(kernel.count_operations("boolean_union"), 2);
        assert!((fused[0].bounds.max.x - 3.0).abs() < 1e-12);
        assert!(diagnostics.is_clean());
    }

    #[test]
    fn fuse_all_falls_back_to_separate_solids() {
        let mut kernel = MockKernel::new();
        let solids = vec![boxed(&mut kernel, 0.0), boxed(&mut kernel, 1.0)];
        kernel.fail_on("boolean_union");
        let mut diagnostics = Diagnostics::default();

        let fused = fuse_all(&mut kernel, solids, "pillars", false, &mut diagnostics).unwrap();
        assert_eq!(fused.len(), 2);
        assert_eq!(diagnostics.warnings.len(), 1);
        assert!(diagnostics.warnings[0].starts_with("pillars: union failed"));
    }

    #[test]
    fn strict_mode_turns_fallback_into_error() {
        let mut kernel = MockKernel::new();
        let solids = vec![boxed(&mut kernel, 0.0), boxed(&mut kernel, 1.0)];
        kernel.fail_on("boolean_union");
        let mut diagnostics = Diagnostics::default();

        let err = fuse_all(&mut kernel, solids, "pillars", true, &mut diagnostics).unwrap_err();
        assert!(matches!(err, OpError::StrictFallback { operation: "union", .. }));
    }

    #[test]
    fn cut_all_skips_disjoint_tools() {
        let mut kernel = MockKernel::new();
        let base = boxed(&mut kernel, 0.0);
        let near = boxed(&mut kernel, 1.0);
        let far = boxed(&mut kernel, 10.0);
        let mut diagnostics = Diagnostics::default();

        let out = cut_all(&mut kernel, vec![base], &[near, far], "test", false, &mut diagnostics)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(kernel.count_operations("boolean_subtract"), 1);
    }

    #[test]
    fn cut_all_keeps_base_when_kernel_fails() {
        let mut kernel = MockKernel::new();
        let base = boxed(&mut kernel, 0.0);
        let base_handle = base.handle.clone();
        let tool = boxed(&mut kernel, 1.0);
        kernel.fail_on("boolean_subtract");
        let mut diagnostics = Diagnostics::default();

        let out = cut_all(&mut kernel, vec![base], &[tool], "border", false, &mut diagnostics)
            .unwrap();
        assert_eq!(out[0].handle, base_handle);
        assert_eq!(diagnostics.warnings.len(), 1);
        assert!(diagnostics.warnings[0].starts_with("border: subtraction failed"));
        assert_eq!(kept_after_failure("subtraction"), "keeping the base");
        assert_eq!(kept_after_failure("union"), "keeping operands separate");
    }
}

use enclosure_types::{BoundingBox, Corner, Placement, Point3};

use crate::types::*;

/// Core geometry kernel trait: primitive construction, rigid moves and booleans.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
///
/// Every primitive is created in its own local frame; callers position it with
/// [`Kernel::transform`].
pub trait Kernel {
    /// Box centered on the origin.
    fn make_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Cylinder along Z, centered on the origin.
    fn make_cylinder(&mut self, radius: f64, height: f64)
        -> Result<KernelSolidHandle, KernelError>;

    /// Box centered on the origin whose vertical edges at `corners` are
    /// rounded with `radius`.
    fn make_rounded_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
        radius: f64,
        corners: &[Corner],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Solid of revolution around Z. `profile` is a polyline of `[radius, z]`
    /// points that starts and ends on the axis.
    fn make_revolved(&mut self, profile: &[[f64; 2]]) -> Result<KernelSolidHandle, KernelError>;

    /// Right triangular prism: right angle on the Z axis, legs along +X and +Y,
    /// extruded from z = 0 to z = `length`.
    fn make_right_triangle_prism(
        &mut self,
        leg_x: f64,
        leg_y: f64,
        length: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Closed solid bounded by planar `faces`, each a loop of indices into
    /// `points` wound counter-clockwise seen from outside.
    fn make_polyhedron(
        &mut self,
        points: &[Point3<f64>],
        faces: &[Vec<usize>],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// A moved copy of `solid`.
    fn transform(
        &mut self,
        solid: &KernelSolidHandle,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Axis-aligned bounds of a solid.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Encode solids as one STEP document.
    fn export_step(
        &mut self,
        solids: &[KernelSolidHandle],
        name: &str,
    ) -> Result<String, KernelError>;
}

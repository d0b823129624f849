//! TruckKernel: real geometry kernel wrapping truck's API.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use enclosure_types::{BoundingBox, Corner, Placement};
use tracing::{debug, instrument};
use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::{Matrix4, Point3};

use crate::primitives;
use crate::step;
use crate::tessellation;
use crate::traits::Kernel;
use crate::types::*;

/// Tolerance handed to truck-shapeops for every boolean.
pub const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Tessellation tolerance used to measure solids.
const BOUNDS_TOLERANCE: f64 = 0.1;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_id: u64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            solids: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::missing(handle))
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// nalgebra stores matrices column-major, as does cgmath's constructor.
fn to_truck_matrix(placement: &Placement) -> Matrix4 {
    let h = placement.to_homogeneous();
    let m = h.as_slice();
    Matrix4::new(
        m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12], m[13],
        m[14], m[15],
    )
}

/// Run a truck-shapeops boolean, turning both a `None` result and a panic
/// inside truck into [`KernelError::BooleanFailed`].
fn guarded<F>(op: &str, f: F) -> Result<Solid, KernelError>
where
    F: FnOnce() -> Option<Solid>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Some(solid)) => Ok(solid),
        Ok(None) => Err(KernelError::BooleanFailed {
            reason: format!("truck {op}() returned None"),
        }),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(KernelError::BooleanFailed {
                reason: format!("truck {op}() panicked: {message}"),
            })
        }
    }
}

impl Kernel for TruckKernel {
    #[instrument(skip(self))]
    fn make_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        debug!("creating box primitive");
        let solid = primitives::make_box(length, width, height)?;
        Ok(self.store_solid(solid))
    }

    #[instrument(skip(self))]
    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        debug!("creating cylinder primitive");
        let solid = primitives::make_cylinder(radius, height)?;
        Ok(self.store_solid(solid))
    }

    #[instrument(skip(self, corners))]
    fn make_rounded_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
        radius: f64,
        corners: &[Corner],
    ) -> Result<KernelSolidHandle, KernelError> {
        debug!(?corners, "creating rounded box primitive");
        let solid = primitives::make_rounded_box(length, width, height, radius, corners)?;
        Ok(self.store_solid(solid))
    }

    #[instrument(skip(self, profile), fields(points = profile.len()))]
    fn make_revolved(&mut self, profile: &[[f64; 2]]) -> Result<KernelSolidHandle, KernelError> {
        debug!("creating revolved primitive");
        let solid = primitives::make_revolved(profile)?;
        Ok(self.store_solid(solid))
    }

    #[instrument(skip(self))]
    fn make_right_triangle_prism(
        &mut self,
        leg_x: f64,
        leg_y: f64,
        length: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        debug!("creating triangle prism primitive");
        let solid = primitives::make_right_triangle_prism(leg_x, leg_y, length)?;
        Ok(self.store_solid(solid))
    }

    #[instrument(skip(self, points, faces), fields(faces = faces.len()))]
    fn make_polyhedron(
        &mut self,
        points: &[enclosure_types::Point3<f64>],
        faces: &[Vec<usize>],
    ) -> Result<KernelSolidHandle, KernelError> {
        debug!("creating polyhedron primitive");
        let points: Vec<Point3> = points.iter().map(|p| Point3::new(p.x, p.y, p.z)).collect();
        let solid = primitives::polyhedron(&points, faces)?;
        Ok(self.store_solid(solid))
    }

    fn transform(
        &mut self,
        solid: &KernelSolidHandle,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        let moved = builder::transformed(self.get_solid(solid)?, to_truck_matrix(placement));
        Ok(self.store_solid(moved))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?;
        let solid_b = self.get_solid(b)?;

        let result = guarded("or", || truck_shapeops::or(solid_a, solid_b, BOOLEAN_TOLERANCE))?;
        Ok(self.store_solid(result))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?;
        let mut solid_b = self.get_solid(b)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result = guarded("and", || truck_shapeops::and(solid_a, &solid_b, BOOLEAN_TOLERANCE))?;
        Ok(self.store_solid(result))
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError> {
        Ok(tessellation::mesh_bounds(self.get_solid(solid)?, BOUNDS_TOLERANCE))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let truck_solid = self
            .solids
            .get(&solid.id())
            .ok_or_else(|| KernelError::missing(solid))?;

        tessellation::tessellate_solid(truck_solid, tolerance, &mut self.next_id)
    }

    fn export_step(
        &mut self,
        solids: &[KernelSolidHandle],
        name: &str,
    ) -> Result<String, KernelError> {
        let selected = solids
            .iter()
            .map(|h| self.get_solid(h))
            .collect::<Result<Vec<_>, _>>()?;
        step::encode_solids(&selected, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use enclosure_types::Vector3;

    #[test]
    fn test_truck_kernel_tessellate_box() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(1.0, 1.0, 1.0).unwrap();

        let mesh = kernel.tessellate(&handle, 0.1).unwrap();

        assert!(!mesh.vertices.is_empty(), "Mesh should have vertices");
        assert!(!mesh.indices.is_empty(), "Mesh should have indices");
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        assert_eq!(mesh.face_ranges.len(), 6, "Box should have 6 face ranges");

        let covered: u32 = mesh
            .face_ranges
            .iter()
            .map(|r| r.end_index - r.start_index)
            .sum();
        assert_eq!(
            covered,
            mesh.indices.len() as u32,
            "Face ranges should cover all indices"
        );
    }

    #[test]
    fn test_transform_moves_bounds() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(2.0, 2.0, 2.0).unwrap();
        let moved = kernel
            .transform(&handle, &Placement::translation(10.0, 0.0, -1.0))
            .unwrap();

        let bb = kernel.bounding_box(&moved).unwrap();
        assert_relative_eq!(bb.center().coords, Vector3::new(10.0, 0.0, -1.0), epsilon = 1e-9);
        assert_relative_eq!(bb.size(), Vector3::new(2.0, 2.0, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_subtract_punches_through_box() {
        let mut kernel = TruckKernel::new();
        let cube = kernel.make_box(2.0, 2.0, 2.0).unwrap();
        let hole = kernel.make_cylinder(0.5, 3.0).unwrap();

        let punched = kernel.boolean_subtract(&cube, &hole).unwrap();
        let bb = kernel.bounding_box(&punched).unwrap();
        assert_relative_eq!(bb.size(), Vector3::new(2.0, 2.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_union_of_overlapping_boxes() {
        let mut kernel = TruckKernel::new();
        let a = kernel.make_box(2.0, 2.0, 2.0).unwrap();
        let b = kernel.make_box(2.0, 2.0, 2.0).unwrap();
        let b = kernel
            .transform(&b, &Placement::translation(1.0, 0.5, 0.5))
            .unwrap();

        let fused = kernel.boolean_union(&a, &b).unwrap();
        let bb = kernel.bounding_box(&fused).unwrap();
        assert_relative_eq!(bb.min.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(bb.max.x, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_panicking_boolean_becomes_error() {
        let err = guarded("or", || -> Option<Solid> { panic!("This shell is not oriented and closed.") })
            .unwrap_err();
        match err {
            KernelError::BooleanFailed { reason } => {
                assert!(reason.contains("or() panicked"));
                assert!(reason.contains("not oriented and closed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            guarded("and", || None),
            Err(KernelError::BooleanFailed { .. })
        ));
    }

    #[test]
    fn test_rounded_box_and_revolved_bounds() {
        let mut kernel = TruckKernel::new();
        let plate = kernel
            .make_rounded_box(20.0, 10.0, 2.0, 3.0, &Corner::ALL)
            .unwrap();
        let bb = kernel.bounding_box(&plate).unwrap();
        assert_relative_eq!(bb.size(), Vector3::new(20.0, 10.0, 2.0), epsilon = 1e-6);

        let pillar = kernel
            .make_revolved(&[[0.0, -5.0], [4.0, -5.0], [2.0, -3.0], [2.0, 5.0], [0.0, 5.0]])
            .unwrap();
        let bb = kernel.bounding_box(&pillar).unwrap();
        assert_relative_eq!(bb.min.z, -5.0, epsilon = 1e-6);
        assert_relative_eq!(bb.max.z, 5.0, epsilon = 1e-6);
        assert!(bb.max.x > 3.8 && bb.max.x <= 4.0 + 1e-6);
    }

    #[test]
    fn test_missing_handle_is_reported() {
        let mut kernel = TruckKernel::new();
        let err = kernel.tessellate(&KernelSolidHandle(99), 0.1).unwrap_err();
        assert!(matches!(err, KernelError::EntityNotFound { id } if id == KernelId(99)));
    }

    #[test]
    fn test_export_step_header_names_file() {
        let mut kernel = TruckKernel::new();
        let handle = kernel.make_box(1.0, 2.0, 3.0).unwrap();
        let step = kernel.export_step(&[handle], "lid.step").unwrap();
        assert!(step.starts_with("ISO-10303-21;"));
        assert!(step.contains("lid.step"));
        assert!(step.trim_end().ends_with("END-ISO-10303-21;"));
    }
}

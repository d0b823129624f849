//! MockKernel: deterministic test double implementing Kernel.
//!
//! Every solid is reduced to its axis-aligned bounds. Unions merge bounds,
//! subtractions keep the base, and every call is recorded in an operation log
//! so builders can be tested without a BREP backend.

use std::collections::{HashMap, HashSet};

use enclosure_types::{BoundingBox, Corner, Placement, Point3, Vector3};

use crate::traits::Kernel;
use crate::types::*;

#[derive(Debug, Clone)]
struct MockSolid {
    bounds: BoundingBox,
    /// Number of primitives fused into this solid.
    primitives: usize,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_handle: u64,
    next_id: u64,
    solids: HashMap<u64, MockSolid>,
    log: Vec<String>,
    failing: HashSet<String>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            solids: HashMap::new(),
            log: Vec::new(),
            failing: HashSet::new(),
        }
    }

    /// Make every later call of `operation` (e.g. `"boolean_union"`) fail.
    pub fn fail_on(&mut self, operation: &str) {
        self.failing.insert(operation.to_string());
    }

    /// Names of the operations performed so far, in call order.
    pub fn operations(&self) -> &[String] {
        &self.log
    }

    pub fn count_operations(&self, operation: &str) -> usize {
        self.log.iter().filter(|op| *op == operation).count()
    }

    /// Number of primitives fused into `solid`.
    pub fn primitive_count(&self, solid: &KernelSolidHandle) -> Option<usize> {
        self.solids.get(&solid.id()).map(|s| s.primitives)
    }

    fn record(&mut self, operation: &str) -> Result<(), KernelError> {
        self.log.push(operation.to_string());
        if self.failing.contains(operation) {
            return Err(KernelError::BooleanFailed {
                reason: format!("mock kernel configured to fail {operation}"),
            });
        }
        Ok(())
    }

    fn store(&mut self, bounds: BoundingBox, primitives: usize) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(h.id(), MockSolid { bounds, primitives });
        h
    }

    fn get(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::missing(handle))
    }

    fn primitive(
        &mut self,
        operation: &str,
        bounds: BoundingBox,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.record(operation)?;
        Ok(self.store(bounds, 1))
    }

    /// Generate a deterministic box mesh: 2 triangles per face = 12 triangles for 6 faces.
    fn tessellate_bounds(&mut self, bounds: &BoundingBox) -> RenderMesh {
        let corners = bounds.corners();
        // Outward winding for the corner order of BoundingBox::corners.
        const QUADS: [([usize; 4], [f32; 3]); 6] = [
            ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
            ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
            ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
            ([2, 3, 7, 6], [0.0, 1.0, 0.0]),
            ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
            ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
        ];

        let mut mesh = RenderMesh::default();
        for (quad, normal) in QUADS {
            let start_index = mesh.indices.len() as u32;
            let base_vertex = (mesh.vertices.len() / 3) as u32;
            for &c in &quad {
                let p = corners[c];
                mesh.vertices
                    .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
                mesh.normals.extend_from_slice(&normal);
            }
            mesh.indices.extend_from_slice(&[
                base_vertex,
                base_vertex + 1,
                base_vertex + 2,
                base_vertex,
                base_vertex + 2,
                base_vertex + 3,
            ]);
            let face_id = KernelId(self.next_id);
            self.next_id += 1;
            mesh.face_ranges.push(FaceRange {
                face_id,
                start_index,
                end_index: mesh.indices.len() as u32,
            });
        }
        mesh
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(length: f64, width: f64, height: f64) -> BoundingBox {
    BoundingBox::centered(Point3::origin(), Vector3::new(length, width, height))
}

impl Kernel for MockKernel {
    fn make_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("box", "length", length)?;
        check_positive("box", "width", width)?;
        check_positive("box", "height", height)?;
        self.primitive("make_box", centered(length, width, height))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("cylinder", "radius", radius)?;
        check_positive("cylinder", "height", height)?;
        self.primitive("make_cylinder", centered(2.0 * radius, 2.0 * radius, height))
    }

    fn make_rounded_box(
        &mut self,
        length: f64,
        width: f64,
        height: f64,
        radius: f64,
        corners: &[Corner],
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("rounded box", "length", length)?;
        check_positive("rounded box", "width", width)?;
        check_positive("rounded box", "height", height)?;
        if !corners.is_empty() {
            check_corner_radius(length, width, radius, corners)?;
        }
        self.primitive("make_rounded_box", centered(length, width, height))
    }

    fn make_revolved(&mut self, profile: &[[f64; 2]]) -> Result<KernelSolidHandle, KernelError> {
        check_revolved_profile(profile)?;
        let r = profile.iter().map(|[r, _]| *r).fold(0.0, f64::max);
        let (z_min, z_max) = profile
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), [_, z]| (lo.min(*z), hi.max(*z)));
        let bounds = BoundingBox::new(Point3::new(-r, -r, z_min), Point3::new(r, r, z_max));
        self.primitive("make_revolved", bounds)
    }

    fn make_right_triangle_prism(
        &mut self,
        leg_x: f64,
        leg_y: f64,
        length: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        check_positive("triangle prism", "x leg", leg_x)?;
        check_positive("triangle prism", "y leg", leg_y)?;
        check_positive("triangle prism", "length", length)?;
        let bounds = BoundingBox::new(Point3::origin(), Point3::new(leg_x, leg_y, length));
        self.primitive("make_right_triangle_prism", bounds)
    }

    fn make_polyhedron(
        &mut self,
        points: &[Point3<f64>],
        faces: &[Vec<usize>],
    ) -> Result<KernelSolidHandle, KernelError> {
        check_polyhedron(points.len(), faces)?;
        self.primitive("make_polyhedron", BoundingBox::from_points(points))
    }

    fn transform(
        &mut self,
        solid: &KernelSolidHandle,
        placement: &Placement,
    ) -> Result<KernelSolidHandle, KernelError> {
        let source = self.get(solid)?.clone();
        self.record("transform")?;
        Ok(self.store(source.bounds.transformed(placement), source.primitives))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get(a)?.clone();
        let solid_b = self.get(b)?.clone();
        self.record("boolean_union")?;

        Ok(self.store(
            solid_a.bounds.union(&solid_b.bounds),
            solid_a.primitives + solid_b.primitives,
        ))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get(a)?.clone();
        self.get(b)?;
        self.record("boolean_subtract")?;

        // Subtract in mock returns copy of A.
        Ok(self.store(solid_a.bounds, solid_a.primitives))
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError> {
        Ok(self.get(solid)?.bounds)
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(KernelError::TessellationFailed {
                reason: format!("tolerance must be positive, got {tolerance}"),
            });
        }
        let bounds = self.get(solid)?.bounds;
        self.record("tessellate")?;
        Ok(self.tessellate_bounds(&bounds))
    }

    fn export_step(
        &mut self,
        solids: &[KernelSolidHandle],
        name: &str,
    ) -> Result<String, KernelError> {
        if solids.is_empty() {
            return Err(KernelError::ExportFailed {
                reason: "nothing to export".to_string(),
            });
        }
        let bounds = solids
            .iter()
            .map(|h| self.get(h).map(|s| s.bounds))
            .collect::<Result<Vec<_>, _>>()?;
        self.record("export_step")?;

        let mut out = String::from("ISO-10303-21;\nHEADER;\n");
        out.push_str(&format!("FILE_NAME('{name}');\nENDSEC;\nDATA;\n"));
        for (i, bb) in bounds.iter().enumerate() {
            out.push_str(&format!(
                "#{} = MOCK_SOLID(({}, {}, {}), ({}, {}, {}));\n",
                i + 1,
                bb.min.x,
                bb.min.y,
                bb.min.z,
                bb.max.x,
                bb.max.y,
                bb.max.z
            ));
        }
        out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
        Ok(out)
    }
}

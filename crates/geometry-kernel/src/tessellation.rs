//! Tessellation wrapper with face-range metadata.
//!
//! Wraps truck-meshalgo to produce a RenderMesh whose FaceRange entries map
//! triangle index ranges back to the BREP faces they came from.

use enclosure_types::{BoundingBox, Point3};
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

use crate::types::*;

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a RenderMesh with per-face tracking.
pub fn tessellate_solid(
    solid: &TruckSolid,
    tolerance: f64,
    next_id: &mut u64,
) -> std::result::Result<RenderMesh, KernelError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {tolerance}"),
        });
    }

    let meshed_solid = solid.triangulation(tolerance);
    let mut mesh = RenderMesh::default();

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let face_id = KernelId(*next_id);
            *next_id += 1;

            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                continue;
            };

            // Inverted faces carry their mesh with the wrong winding.
            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };

            append_polygon(&mut mesh, &face_mesh, face_id);
        }
    }

    if mesh.vertices.is_empty() {
        return tessellate_solid_merged(solid, tolerance, next_id);
    }
    Ok(mesh)
}

/// Fallback tessellation: merge everything into a single PolygonMesh.
fn tessellate_solid_merged(
    solid: &TruckSolid,
    tolerance: f64,
    next_id: &mut u64,
) -> std::result::Result<RenderMesh, KernelError> {
    let polygon = solid.triangulation(tolerance).to_polygon();
    let face_id = KernelId(*next_id);
    *next_id += 1;

    let mut mesh = RenderMesh::default();
    append_polygon(&mut mesh, &polygon, face_id);
    if mesh.indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }
    Ok(mesh)
}

fn append_polygon(mesh: &mut RenderMesh, polygon: &PolygonMesh, face_id: KernelId) {
    let start_index = mesh.indices.len() as u32;
    let base_vertex = (mesh.vertices.len() / 3) as u32;

    let positions = polygon.positions();
    let normals = polygon.normals();

    for pos in positions {
        mesh.vertices
            .extend_from_slice(&[pos[0] as f32, pos[1] as f32, pos[2] as f32]);
    }
    if normals.len() == positions.len() {
        for n in normals {
            mesh.normals
                .extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
        }
    } else {
        for _ in positions {
            mesh.normals.extend_from_slice(&[0.0, 0.0, 1.0]);
        }
    }

    for tri in polygon.tri_faces() {
        for v in tri.iter() {
            mesh.indices.push(v.pos as u32 + base_vertex);
        }
    }

    let end_index = mesh.indices.len() as u32;
    if end_index > start_index {
        mesh.face_ranges.push(FaceRange {
            face_id,
            start_index,
            end_index,
        });
    }
}

/// Bounds of a solid from a coarse tessellation, so curved faces count fully.
pub fn mesh_bounds(solid: &TruckSolid, tolerance: f64) -> BoundingBox {
    let polygon = solid.triangulation(tolerance).to_polygon();
    let points: Vec<Point3<f64>> = polygon
        .positions()
        .iter()
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();
    BoundingBox::from_points(&points)
}

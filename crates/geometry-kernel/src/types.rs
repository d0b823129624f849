use enclosure_types::Corner;
use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the kernel session that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel-internal entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("invalid {primitive} parameter: {reason}")]
    InvalidParameter {
        primitive: &'static str,
        reason: String,
    },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("STEP export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },

    #[error("kernel error: {message}")]
    Other { message: String },
}

impl KernelError {
    pub(crate) fn missing(handle: &KernelSolidHandle) -> Self {
        KernelError::EntityNotFound {
            id: KernelId(handle.id()),
        }
    }
}

/// Reject non-finite or non-positive sizes before they reach a builder.
pub fn check_positive(primitive: &'static str, name: &str, value: f64) -> Result<(), KernelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidParameter {
            primitive,
            reason: format!("{name} must be positive, got {value}"),
        })
    }
}

/// Whether `radius` can round the vertical edges at `corners` of a
/// `length` x `width` footprint: along every side, the arcs at both ends must
/// leave part of the side straight.
pub fn corner_radius_fits(length: f64, width: f64, radius: f64, corners: &[Corner]) -> bool {
    let rounded = |a: Corner, b: Corner| {
        [a, b].iter().filter(|c| corners.contains(c)).count() as f64
    };
    let sides = [
        (rounded(Corner::FrontLeft, Corner::FrontRight), length),
        (rounded(Corner::BackLeft, Corner::BackRight), length),
        (rounded(Corner::FrontLeft, Corner::BackLeft), width),
        (rounded(Corner::FrontRight, Corner::BackRight), width),
    ];
    radius.is_finite() && radius > 0.0 && sides.iter().all(|(n, side)| n * radius < *side)
}

pub fn check_corner_radius(
    length: f64,
    width: f64,
    radius: f64,
    corners: &[Corner],
) -> Result<(), KernelError> {
    if corner_radius_fits(length, width, radius, corners) {
        Ok(())
    } else {
        Err(KernelError::InvalidParameter {
            primitive: "rounded box",
            reason: format!("corner radius {radius} does not fit a {length}x{width} footprint"),
        })
    }
}

/// Tessellated triangle mesh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals [nx0, ny0, nz0, nx1, ny1, nz1, ...].
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
    /// Mapping from triangle ranges to logical faces.
    pub face_ranges: Vec<FaceRange>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append `other`, re-basing its indices.
    pub fn merge(&mut self, other: &RenderMesh) {
        let base_vertex = (self.vertices.len() / 3) as u32;
        let base_index = self.indices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|i| i + base_vertex));
        self.face_ranges.extend(other.face_ranges.iter().map(|r| FaceRange {
            face_id: r.face_id,
            start_index: r.start_index + base_index,
            end_index: r.end_index + base_index,
        }));
    }
}

/// Maps a contiguous range of triangles to a logical face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRange {
    pub face_id: KernelId,
    /// Start index in the indices array (inclusive).
    pub start_index: u32,
    /// End index in the indices array (exclusive).
    pub end_index: u32,
}

/// A revolved profile runs from a point on the axis to another point on the
/// axis at a different height, through finite points off the axis.
pub fn check_revolved_profile(profile: &[[f64; 2]]) -> Result<(), KernelError> {
    let invalid = |reason: String| KernelError::InvalidParameter {
        primitive: "revolved profile",
        reason,
    };
    let (first, last, inner) = match profile {
        [first, inner @ .., last] if !inner.is_empty() => (first, last, inner),
        _ => return Err(invalid(format!("needs at least 3 points, got {}", profile.len()))),
    };
    if first[0] != 0.0 || last[0] != 0.0 || !first[1].is_finite() || first[1] == last[1] {
        return Err(invalid(format!(
            "must start and end on the axis at different heights, got {first:?} and {last:?}"
        )));
    }
    if let Some([r, z]) = inner
        .iter()
        .find(|[r, z]| !r.is_finite() || !z.is_finite() || *r <= 0.0)
    {
        return Err(invalid(format!("bad profile point ({r}, {z})")));
    }
    Ok(())
}

/// A polyhedron needs four faces of at least three in-range point indices.
pub fn check_polyhedron(point_count: usize, faces: &[Vec<usize>]) -> Result<(), KernelError> {
    let invalid = |reason: String| KernelError::InvalidParameter {
        primitive: "polyhedron",
        reason,
    };
    if point_count < 4 || faces.len() < 4 {
        return Err(invalid(format!(
            "needs at least 4 points and 4 faces, got {point_count} and {}",
            faces.len()
        )));
    }
    for face in faces {
        if face.len() < 3 {
            return Err(invalid(format!("face {face:?} has fewer than 3 points")));
        }
        if let Some(index) = face.iter().find(|&&i| i >= point_count) {
            return Err(invalid(format!("point index {index} out of range")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(offset: f32) -> RenderMesh {
        RenderMesh {
            vertices: vec![offset, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            face_ranges: vec![FaceRange {
                face_id: KernelId(1),
                start_index: 0,
                end_index: 3,
            }],
        }
    }

    #[test]
    fn merge_rebases_indices() {
        let mut mesh = triangle(0.0);
        mesh.merge(&triangle(5.0));
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.face_ranges[1].start_index, 3);
        assert_eq!(mesh.face_ranges[1].end_index, 6);
    }

    #[test]
    fn check_positive_rejects_zero_and_nan() {
        assert!(check_positive("box", "length", 1.0).is_ok());
        assert!(check_positive("box", "length", 0.0).is_err());
        assert!(check_positive("box", "length", f64::NAN).is_err());
    }

    #[test]
    fn corner_radius_must_leave_every_side_straight() {
        // A 2 mm border can round one corner per short side.
        assert!(corner_radius_fits(84.0, 2.0, 1.99, &[Corner::FrontLeft, Corner::FrontRight]));
        assert!(!corner_radius_fits(84.0, 2.0, 1.99, &[Corner::FrontLeft, Corner::BackLeft]));
        assert!(!corner_radius_fits(10.0, 10.0, 5.0, &Corner::ALL));
        assert!(!corner_radius_fits(10.0, 10.0, 0.0, &Corner::ALL));
        assert!(check_corner_radius(10.0, 10.0, 4.9, &Corner::ALL).is_ok());
    }
}

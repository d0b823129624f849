//! Higher-level primitive builders on top of truck's sweep API.
//!
//! truck has no built-in box/cylinder/fillet, everything is successive sweeps
//! or hand-stitched planar faces.

use std::collections::HashMap;
use std::f64::consts::PI;

use enclosure_types::Corner;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Shell, Solid, Vertex, Wire};
use truck_modeling::{InnerSpace, Point3, Rad, Vector3};

use crate::types::{
    check_corner_radius, check_polyhedron, check_positive, check_revolved_profile, KernelError,
};

/// Box centered on the origin, via successive translational sweeps.
pub fn make_box(length: f64, width: f64, height: f64) -> Result<Solid, KernelError> {
    check_positive("box", "length", length)?;
    check_positive("box", "width", width)?;
    check_positive("box", "height", height)?;

    let v = builder::vertex(Point3::new(-length / 2.0, -width / 2.0, -height / 2.0));
    let edge = builder::tsweep(&v, Vector3::new(length, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, width, 0.0));
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Cylinder along Z centered on the origin: circle wire, face, translational sweep.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    check_positive("cylinder", "radius", radius)?;
    check_positive("cylinder", "height", height)?;

    let base = Point3::new(0.0, 0.0, -height / 2.0);
    let v = builder::vertex(Point3::new(radius, 0.0, -height / 2.0));
    let wire = builder::rsweep(&v, base, Vector3::unit_z(), Rad(2.0 * PI));
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create circular face: {e}"),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Box centered on the origin with the vertical edges at `corners` rounded.
///
/// The footprint is drawn counter-clockwise with a circle arc at each rounded
/// corner, then swept along Z, so no boolean is involved.
pub fn make_rounded_box(
    length: f64,
    width: f64,
    height: f64,
    radius: f64,
    corners: &[Corner],
) -> Result<Solid, KernelError> {
    check_positive("rounded box", "length", length)?;
    check_positive("rounded box", "width", width)?;
    check_positive("rounded box", "height", height)?;
    if corners.is_empty() {
        return make_box(length, width, height);
    }
    check_corner_radius(length, width, radius, corners)?;

    let (hl, hw, z) = (length / 2.0, width / 2.0, -height / 2.0);
    // Corner, direction of the side arriving at it, direction of the side leaving it.
    let outline = [
        (Corner::FrontLeft, Point3::new(-hl, -hw, z), -Vector3::unit_y(), Vector3::unit_x()),
        (Corner::FrontRight, Point3::new(hl, -hw, z), Vector3::unit_x(), Vector3::unit_y()),
        (Corner::BackRight, Point3::new(hl, hw, z), Vector3::unit_y(), -Vector3::unit_x()),
        (Corner::BackLeft, Point3::new(-hl, hw, z), -Vector3::unit_x(), -Vector3::unit_y()),
    ];

    // Each point with the transit point of the arc starting there, if any.
    let mut points: Vec<(Point3, Option<Point3>)> = Vec::with_capacity(8);
    for (corner, p, arriving, leaving) in outline {
        if corners.contains(&corner) {
            let center = p - arriving * radius + leaving * radius;
            let transit = center + (arriving - leaving).normalize() * radius;
            points.push((p - arriving * radius, Some(transit)));
            points.push((p + leaving * radius, None));
        } else {
            points.push((p, None));
        }
    }

    let vertices: Vec<Vertex> = points.iter().map(|(p, _)| builder::vertex(*p)).collect();
    let wire: Wire = (0..vertices.len())
        .map(|i| {
            let (v0, v1) = (&vertices[i], &vertices[(i + 1) % vertices.len()]);
            match points[i].1 {
                Some(transit) => builder::circle_arc(v0, v1, transit),
                None => builder::line(v0, v1),
            }
        })
        .collect();
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create rounded footprint: {e}"),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Solid of revolution around Z.
///
/// `profile` is a polyline of `[radius, z]` points in the XZ plane from the
/// axis back to the axis. truck's cone sweep collapses the on-axis ends to
/// single vertices so the shell has no degenerate edges.
pub fn make_revolved(profile: &[[f64; 2]]) -> Result<Solid, KernelError> {
    check_revolved_profile(profile)?;

    // The sweep expects the polyline to start at the top of the axis.
    let mut points: Vec<Point3> = profile
        .iter()
        .map(|[r, z]| Point3::new(*r, 0.0, *z))
        .collect();
    if points[0].z < points[points.len() - 1].z {
        points.reverse();
    }

    let vertices: Vec<Vertex> = points.iter().map(|p| builder::vertex(*p)).collect();
    let wire: Wire = vertices
        .windows(2)
        .map(|pair| builder::line(&pair[0], &pair[1]))
        .collect();
    let shell = builder::cone(&wire, Vector3::unit_z(), Rad(2.0 * PI));
    Solid::try_new(vec![shell]).map_err(|e| KernelError::Other {
        message: format!("revolved profile is not a closed solid: {e}"),
    })
}

/// Right triangular prism, right angle on the Z axis, extruded along +Z.
pub fn make_right_triangle_prism(leg_x: f64, leg_y: f64, length: f64) -> Result<Solid, KernelError> {
    check_positive("triangle prism", "x leg", leg_x)?;
    check_positive("triangle prism", "y leg", leg_y)?;
    check_positive("triangle prism", "length", length)?;

    let v0 = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let v1 = builder::vertex(Point3::new(leg_x, 0.0, 0.0));
    let v2 = builder::vertex(Point3::new(0.0, leg_y, 0.0));
    let wire = Wire::from_iter([
        builder::line(&v0, &v1),
        builder::line(&v1, &v2),
        builder::line(&v2, &v0),
    ]);
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create triangle face: {e}"),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, length)))
}

/// Closed solid from planar polygons wound counter-clockwise seen from outside.
///
/// Shared edges are created once and reused inverted by the neighbouring face
/// so the shell is closed and consistently oriented.
pub fn polyhedron(points: &[Point3], faces: &[Vec<usize>]) -> Result<Solid, KernelError> {
    check_polyhedron(points.len(), faces)?;
    let vertices: Vec<Vertex> = points.iter().map(|p| builder::vertex(*p)).collect();
    let mut edges: HashMap<(usize, usize), Edge> = HashMap::new();
    let mut shell_faces = Vec::with_capacity(faces.len());

    for polygon in faces {
        let mut wire = Wire::new();
        for (k, &a) in polygon.iter().enumerate() {
            let b = polygon[(k + 1) % polygon.len()];
            let edge = match edges.get(&(b, a)) {
                Some(reverse) => reverse.inverse(),
                None => edges
                    .entry((a, b))
                    .or_insert_with(|| builder::line(&vertices[a], &vertices[b]))
                    .clone(),
            };
            wire.push_back(edge);
        }
        let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
            message: format!("failed to create planar face: {e}"),
        })?;
        shell_faces.push(face);
    }

    Solid::try_new(vec![Shell::from(shell_faces)]).map_err(|e| KernelError::Other {
        message: format!("polyhedron is not a closed solid: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn extent(solid: &Solid) -> ([f64; 3], [f64; 3]) {
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for v in solid.boundaries()[0].vertex_iter() {
            let p = v.point();
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        (min, max)
    }

    #[test]
    fn test_make_box_topology() {
        let solid = make_box(1.0, 2.0, 3.0).unwrap();

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Box should have 1 shell");

        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();
        let edge_ids: HashSet<_> = shell.edge_iter().map(|e| e.id()).collect();
        let vert_ids: HashSet<_> = shell.vertex_iter().map(|v| v.id()).collect();

        assert_eq!(faces.len(), 6, "Box should have 6 faces");
        assert_eq!(edge_ids.len(), 12, "Box should have 12 edges");
        assert_eq!(vert_ids.len(), 8, "Box should have 8 vertices");
    }

    #[test]
    fn test_make_box_is_centered() {
        let solid = make_box(2.0, 3.0, 4.0).unwrap();
        let (min, max) = extent(&solid);

        let eps = 1e-10;
        assert!((min[0] + 1.0).abs() < eps && (max[0] - 1.0).abs() < eps);
        assert!((min[1] + 1.5).abs() < eps && (max[1] - 1.5).abs() < eps);
        assert!((min[2] + 2.0).abs() < eps && (max[2] - 2.0).abs() < eps);
    }

    #[test]
    fn test_make_cylinder_topology() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let faces: Vec<_> = solid.boundaries()[0].face_iter().collect();
        assert!(faces.len() >= 3, "Cylinder should have at least 3 faces");
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        assert!(make_box(0.0, 1.0, 1.0).is_err());
        assert!(make_cylinder(-1.0, 1.0).is_err());
        assert!(make_revolved(&[[0.0, 0.0], [1.0, 0.0]]).is_err());
        assert!(make_revolved(&[[0.0, 0.0], [-1.0, 0.0], [0.0, 1.0]]).is_err());
        assert!(make_revolved(&[[0.0, 0.0], [1.0, 0.5], [0.0, 0.0]]).is_err());
        assert!(make_rounded_box(4.0, 4.0, 1.0, 2.0, &[Corner::FrontLeft, Corner::FrontRight]).is_err());
        assert!(check_polyhedron(4, &[vec![0, 1, 2], vec![0, 1, 4], vec![1, 2, 3], vec![0, 2, 3]]).is_err());
    }

    #[test]
    fn test_rounded_box_keeps_its_footprint() {
        let solid = make_rounded_box(10.0, 6.0, 2.0, 1.0, &[Corner::BackLeft, Corner::BackRight]).unwrap();
        let faces = solid.boundaries()[0].face_iter().count();
        // Top, bottom, four flat sides and two quarter cylinders.
        assert_eq!(faces, 8);

        let (min, max) = extent(&solid);
        let eps = 1e-10;
        assert!((min[0] + 5.0).abs() < eps && (max[0] - 5.0).abs() < eps);
        assert!((min[1] + 3.0).abs() < eps && (max[1] - 3.0).abs() < eps);
        assert!((min[2] + 1.0).abs() < eps && (max[2] - 1.0).abs() < eps);
    }

    #[test]
    fn test_rounded_box_without_corners_is_a_box() {
        let solid = make_rounded_box(1.0, 2.0, 3.0, 0.5, &[]).unwrap();
        assert_eq!(solid.boundaries()[0].face_iter().count(), 6);
    }

    #[test]
    fn test_revolved_profile_spans_its_z_range() {
        let solid = make_revolved(&[[0.0, -2.0], [3.0, -2.0], [1.0, 0.0], [1.0, 2.0], [0.0, 2.0]]).unwrap();
        let (min, max) = extent(&solid);
        assert!((min[2] + 2.0).abs() < 1e-10);
        assert!((max[2] - 2.0).abs() < 1e-10);
        assert!((max[0] - 3.0).abs() < 1e-10);
        assert_eq!(solid.boundaries().len(), 1);
    }

    #[test]
    fn test_polyhedron_tetrahedron() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![0, 3, 2]];
        let solid = polyhedron(&points, &faces).unwrap();
        assert_eq!(solid.boundaries()[0].face_iter().count(), 4);
    }

    #[test]
    fn test_make_triangle_prism_extent() {
        let solid = make_right_triangle_prism(2.0, 3.0, 10.0).unwrap();
        let (min, max) = extent(&solid);
        assert_eq!(min, [0.0, 0.0, 0.0]);
        assert_eq!(max, [2.0, 3.0, 10.0]);
    }
}

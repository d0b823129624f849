use std::ops::Mul;

use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

/// A rigid transform: rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    iso: Isometry3<f64>,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            iso: Isometry3::identity(),
        }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_vector(Vector3::new(x, y, z))
    }

    pub fn from_vector(offset: Vector3<f64>) -> Self {
        Self {
            iso: Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity()),
        }
    }

    /// Rotation from intrinsic X, then Y, then Z angles in degrees.
    ///
    /// Intrinsic XYZ composes as `Rx * Ry * Rz`.
    pub fn rotation_xyz_degrees(rx: f64, ry: f64, rz: f64) -> Self {
        let qx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), rx.to_radians());
        let qy = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), ry.to_radians());
        let qz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), rz.to_radians());
        Self {
            iso: Isometry3::from_parts(Translation3::identity(), qx * qy * qz),
        }
    }

    /// Translation to `position` with an intrinsic XYZ rotation in degrees.
    pub fn located(position: Vector3<f64>, rotation_degrees: [f64; 3]) -> Self {
        let [rx, ry, rz] = rotation_degrees;
        Self::from_vector(position) * Self::rotation_xyz_degrees(rx, ry, rz)
    }

    /// Frame at `origin` whose local X and Y axes map onto `x_axis` and
    /// `y_axis`. The axes must be orthonormal; local Z is their cross product.
    pub fn from_frame(origin: Point3<f64>, x_axis: Vector3<f64>, y_axis: Vector3<f64>) -> Self {
        let basis = Matrix3::from_columns(&[x_axis, y_axis, x_axis.cross(&y_axis)]);
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));
        Self {
            iso: Isometry3::from_parts(Translation3::from(origin.coords), rotation),
        }
    }

    /// `self` applied after `inner`.
    pub fn then_inner(&self, inner: &Placement) -> Placement {
        Placement {
            iso: self.iso * inner.iso,
        }
    }

    pub fn offset(&self) -> Vector3<f64> {
        self.iso.translation.vector
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.iso.transform_point(point)
    }

    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.iso.transform_vector(vector)
    }

    pub fn inverse(&self) -> Placement {
        Placement {
            iso: self.iso.inverse(),
        }
    }

    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.iso.to_homogeneous()
    }

    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.iso.translation.vector.norm() <= tolerance
            && self.iso.rotation.angle().abs() <= tolerance
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Placement {
    type Output = Placement;

    fn mul(self, rhs: Placement) -> Self::Output {
        self.then_inner(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn translation_moves_points() {
        let p = Placement::translation(1.0, 2.0, 3.0);
        let moved = p.transform_point(&Point3::origin());
        assert_relative_eq!(moved, Point3::new(1.0, 2.0, 3.0));
        assert!(!p.is_identity(1e-12));
        assert!(Placement::identity().is_identity(1e-12));
    }

    #[test]
    fn intrinsic_rotation_order() {
        // Ry(90) sends +Z to +X, which Rx(90) leaves alone.
        let r = Placement::rotation_xyz_degrees(90.0, 90.0, 0.0);
        let z = r.transform_vector(&Vector3::z());
        assert_relative_eq!(z, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);

        let r = Placement::rotation_xyz_degrees(90.0, 0.0, 0.0);
        let z = r.transform_vector(&Vector3::z());
        assert_relative_eq!(z, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn located_rotates_before_translating() {
        let p = Placement::located(Vector3::new(10.0, 0.0, 0.0), [0.0, 0.0, 90.0]);
        let moved = p.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(10.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn frame_maps_local_axes() {
        let p = Placement::from_frame(
            Point3::new(1.0, 2.0, 3.0),
            -Vector3::y(),
            -Vector3::z(),
        );
        assert_relative_eq!(p.transform_vector(&Vector3::z()), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(
            p.transform_point(&Point3::new(1.0, 0.0, 0.0)),
            Point3::new(1.0, 1.0, 3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn inverse_undoes_placement() {
        let p = Placement::located(Vector3::new(1.0, -2.0, 3.0), [30.0, 45.0, 60.0]);
        let point = Point3::new(0.5, 0.25, -4.0);
        let back = p.inverse().transform_point(&p.transform_point(&point));
        assert_relative_eq!(back, point, epsilon = 1e-12);
    }
}

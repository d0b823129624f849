//! Rounded vertical edges.
//!
//! The kernel has no fillet operation, so a box with rounded vertical edges
//! is its own primitive: a footprint with corner arcs swept along Z.

use enclosure_types::Corner;
use geometry_kernel::corner_radius_fits;
use tracing::debug;

use crate::shape::{Primitive, Shape};

/// Centered cuboid with the vertical edges at `corners` rounded by `radius`.
///
/// A non-positive radius, or one that does not leave every side a straight
/// segment, gives a plain cuboid.
pub fn rounded_cuboid(length: f64, width: f64, height: f64, corners: &[Corner], radius: f64) -> Shape {
    if corners.is_empty() || radius <= 0.0 {
        return Shape::cuboid(length, width, height);
    }
    if !corner_radius_fits(length, width, radius, corners) {
        debug!(length, width, radius, "corner radius does not fit, keeping sharp corners");
        return Shape::cuboid(length, width, height);
    }
    Shape::from(Primitive::RoundedBox {
        length,
        width,
        height,
        radius,
        corners: corners.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use enclosure_types::Vector3;

    #[test]
    fn rounding_keeps_the_footprint() {
        let slab = rounded_cuboid(20.0, 10.0, 2.0, &Corner::ALL, 4.99);
        match &slab {
            Shape::Primitive(Primitive::RoundedBox { corners, .. }) => assert_eq!(corners.len(), 4),
            other => panic!("expected a rounded box, got {other:?}"),
        }
        assert_relative_eq!(slab.bounding_box().size(), Vector3::new(20.0, 10.0, 2.0));
    }

    #[test]
    fn radius_that_does_not_fit_keeps_sharp_corners() {
        let sharp = Shape::cuboid(20.0, 10.0, 2.0);
        assert_eq!(rounded_cuboid(20.0, 10.0, 2.0, &[], 1.0), sharp);
        assert_eq!(rounded_cuboid(20.0, 10.0, 2.0, &Corner::ALL, 0.0), sharp);
        assert_eq!(rounded_cuboid(20.0, 10.0, 2.0, &Corner::ALL, 5.0), sharp);
        // One rounded end per side only needs the radius to fit once.
        assert_ne!(
            rounded_cuboid(20.0, 10.0, 2.0, &[Corner::BackRight], 9.0),
            sharp
        );
    }
}

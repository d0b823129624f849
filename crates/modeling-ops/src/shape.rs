//! Constructive solid geometry trees.
//!
//! A [`Shape`] only describes geometry. Nothing touches a kernel until the
//! tree is handed to [`crate::evaluate_shape`], so builders stay pure and
//! their output can be inspected and measured directly.

use enclosure_types::{BoundingBox, Corner, Placement, Point3, Vector3};
use geometry_kernel::{Kernel, KernelError, KernelSolidHandle};

/// How far cutting tools reach past the faces they trim. Well above the
/// kernel's boolean tolerance so no cut leaves a coplanar sliver.
pub const CUTTER_OVERSHOOT: f64 = 0.5;

/// A solid primitive in its own local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Centered box.
    Box { length: f64, width: f64, height: f64 },
    /// Centered cylinder along Z.
    Cylinder { radius: f64, height: f64 },
    /// Centered box with the vertical edges at `corners` rounded.
    RoundedBox {
        length: f64,
        width: f64,
        height: f64,
        radius: f64,
        corners: Vec<Corner>,
    },
    /// Revolution around Z of a `[radius, z]` polyline running from the axis
    /// back to the axis.
    Revolved { profile: Vec<[f64; 2]> },
    /// Right angle on the Z axis, legs along +X/+Y, extruded from z = 0.
    TrianglePrism { leg_x: f64, leg_y: f64, length: f64 },
    /// Planar faces over `points`, each wound counter-clockwise from outside.
    Polyhedron {
        points: Vec<Point3<f64>>,
        faces: Vec<Vec<usize>>,
    },
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Box { .. } => "box",
            Primitive::Cylinder { .. } => "cylinder",
            Primitive::RoundedBox { .. } => "rounded box",
            Primitive::Revolved { .. } => "revolved profile",
            Primitive::TrianglePrism { .. } => "triangle prism",
            Primitive::Polyhedron { .. } => "polyhedron",
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let centered = |l: f64, w: f64, h: f64| {
            BoundingBox::centered(Point3::origin(), Vector3::new(l, w, h))
        };
        match self {
            Primitive::Box {
                length,
                width,
                height,
            }
            | Primitive::RoundedBox {
                length,
                width,
                height,
                ..
            } => centered(*length, *width, *height),
            Primitive::Cylinder { radius, height } => centered(2.0 * radius, 2.0 * radius, *height),
            Primitive::Revolved { profile } => {
                let r = profile.iter().map(|[r, _]| *r).fold(0.0, f64::max);
                let (z_min, z_max) = profile
                    .iter()
                    .fold((f64::MAX, f64::MIN), |(lo, hi), [_, z]| (lo.min(*z), hi.max(*z)));
                BoundingBox::new(Point3::new(-r, -r, z_min), Point3::new(r, r, z_max))
            }
            Primitive::TrianglePrism {
                leg_x,
                leg_y,
                length,
            } => BoundingBox::new(Point3::origin(), Point3::new(*leg_x, *leg_y, *length)),
            Primitive::Polyhedron { points, .. } => BoundingBox::from_points(points),
        }
    }

    pub fn build(&self, kernel: &mut dyn Kernel) -> Result<KernelSolidHandle, KernelError> {
        match self {
            Primitive::Box {
                length,
                width,
                height,
            } => kernel.make_box(*length, *width, *height),
            Primitive::Cylinder { radius, height } => kernel.make_cylinder(*radius, *height),
            Primitive::RoundedBox {
                length,
                width,
                height,
                radius,
                corners,
            } => kernel.make_rounded_box(*length, *width, *height, *radius, corners),
            Primitive::Revolved { profile } => kernel.make_revolved(profile),
            Primitive::TrianglePrism {
                leg_x,
                leg_y,
                length,
            } => kernel.make_right_triangle_prism(*leg_x, *leg_y, *length),
            Primitive::Polyhedron { points, faces } => kernel.make_polyhedron(points, faces),
        }
    }
}

/// Where a shape's bounds land relative to the origin on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Min,
    Center,
    Max,
}

impl Align {
    fn offset(self, min: f64, max: f64) -> f64 {
        match self {
            Align::Min => -min,
            Align::Center => -(min + max) / 2.0,
            Align::Max => -max,
        }
    }
}

/// A CSG tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Primitive(Primitive),
    Transformed {
        shape: Box<Shape>,
        placement: Placement,
    },
    /// Fused solids.
    Union(Vec<Shape>),
    /// `base` with every tool removed.
    Subtract { base: Box<Shape>, tools: Vec<Shape> },
    /// Solids kept side by side without fusing.
    Group(Vec<Shape>),
}

impl Shape {
    pub fn cuboid(length: f64, width: f64, height: f64) -> Shape {
        Shape::Primitive(Primitive::Box {
            length,
            width,
            height,
        })
    }

    pub fn cylinder(radius: f64, height: f64) -> Shape {
        Shape::Primitive(Primitive::Cylinder { radius, height })
    }

    /// Solid of revolution around Z, see [`Primitive::Revolved`].
    pub fn revolved(profile: Vec<[f64; 2]>) -> Shape {
        Shape::Primitive(Primitive::Revolved { profile })
    }

    pub fn triangle_prism(leg_x: f64, leg_y: f64, length: f64) -> Shape {
        Shape::Primitive(Primitive::TrianglePrism {
            leg_x,
            leg_y,
            length,
        })
    }

    pub fn polyhedron(points: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Shape {
        Shape::Primitive(Primitive::Polyhedron { points, faces })
    }

    /// Fuse `shapes`; a single shape is returned unchanged.
    pub fn union(mut shapes: Vec<Shape>) -> Shape {
        if shapes.len() == 1 {
            return shapes.remove(0);
        }
        Shape::Union(shapes)
    }

    pub fn group(shapes: Vec<Shape>) -> Shape {
        Shape::Group(shapes)
    }

    /// Remove `tools` from this shape; no tools leaves it unchanged.
    pub fn subtract(self, tools: Vec<Shape>) -> Shape {
        if tools.is_empty() {
            return self;
        }
        match self {
            Shape::Subtract {
                base,
                tools: mut existing,
            } => {
                existing.extend(tools);
                Shape::Subtract {
                    base,
                    tools: existing,
                }
            }
            other => Shape::Subtract {
                base: Box::new(other),
                tools,
            },
        }
    }

    /// This shape moved by `placement`, applied after any existing placement.
    pub fn moved(self, placement: Placement) -> Shape {
        match self {
            Shape::Transformed {
                shape,
                placement: inner,
            } => Shape::Transformed {
                shape,
                placement: placement * inner,
            },
            other => Shape::Transformed {
                shape: Box::new(other),
                placement,
            },
        }
    }

    pub fn translated(self, x: f64, y: f64, z: f64) -> Shape {
        self.moved(Placement::translation(x, y, z))
    }

    /// Translate so the bounds sit on the origin as requested per axis.
    pub fn aligned(self, align: [Align; 3]) -> Shape {
        let bb = self.bounding_box();
        let x = align[0].offset(bb.min.x, bb.max.x);
        let y = align[1].offset(bb.min.y, bb.max.y);
        let z = align[2].offset(bb.min.z, bb.max.z);
        self.translated(x, y, z)
    }

    /// Analytic bounds. Subtraction keeps the base's bounds.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Primitive(p) => p.bounding_box(),
            Shape::Transformed { shape, placement } => shape.bounding_box().transformed(placement),
            Shape::Union(shapes) | Shape::Group(shapes) => shapes
                .iter()
                .fold(BoundingBox::empty(), |acc, s| acc.union(&s.bounding_box())),
            Shape::Subtract { base, .. } => base.bounding_box(),
        }
    }

    /// Number of primitives in the tree, tools included.
    pub fn primitive_count(&self) -> usize {
        match self {
            Shape::Primitive(_) => 1,
            Shape::Transformed { shape, .. } => shape.primitive_count(),
            Shape::Union(shapes) | Shape::Group(shapes) => {
                shapes.iter().map(Shape::primitive_count).sum()
            }
            Shape::Subtract { base, tools } => {
                base.primitive_count() + tools.iter().map(Shape::primitive_count).sum::<usize>()
            }
        }
    }
}

impl From<Primitive> for Shape {
    fn from(value: Primitive) -> Self {
        Shape::Primitive(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn translated_box_bounds() {
        let shape = Shape::cuboid(2.0, 4.0, 6.0).translated(1.0, 0.0, 3.0);
        let bb = shape.bounding_box();
        assert_relative_eq!(bb.min, Point3::new(0.0, -2.0, 0.0));
        assert_relative_eq!(bb.max, Point3::new(2.0, 2.0, 6.0));
    }

    #[test]
    fn nested_moves_compose() {
        let shape = Shape::cuboid(1.0, 1.0, 1.0)
            .translated(1.0, 0.0, 0.0)
            .translated(0.0, 2.0, 0.0);
        match &shape {
            Shape::Transformed { shape, .. } => {
                assert!(matches!(**shape, Shape::Primitive(_)))
            }
            other => panic!("expected a single transform, got {other:?}"),
        }
        assert_relative_eq!(shape.bounding_box().center(), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn aligned_min_puts_corner_on_origin() {
        let shape = Shape::cuboid(4.0, 2.0, 1.0).aligned([Align::Min; 3]);
        let bb = shape.bounding_box();
        assert_relative_eq!(bb.min, Point3::origin());
        assert_relative_eq!(bb.max, Point3::new(4.0, 2.0, 1.0));

        let shape = Shape::triangle_prism(1.0, 1.0, 3.0).aligned([Align::Center, Align::Max, Align::Min]);
        let bb = shape.bounding_box();
        assert_relative_eq!(bb.min, Point3::new(-0.5, -1.0, 0.0));
    }

    #[test]
    fn subtract_keeps_base_bounds_and_flattens_tools() {
        let shape = Shape::cuboid(10.0, 10.0, 1.0)
            .subtract(vec![Shape::cylinder(1.0, 5.0)])
            .subtract(vec![Shape::cylinder(20.0, 5.0)]);
        assert_relative_eq!(shape.bounding_box().size(), Vector3::new(10.0, 10.0, 1.0));
        match &shape {
            Shape::Subtract { tools, .. } => assert_eq!(tools.len(), 2),
            other => panic!("expected subtract, got {other:?}"),
        }
        assert_eq!(shape.primitive_count(), 3);
        assert_eq!(Shape::cuboid(1.0, 1.0, 1.0).subtract(vec![]), Shape::cuboid(1.0, 1.0, 1.0));
    }

    #[test]
    fn union_of_one_is_identity() {
        let single = Shape::union(vec![Shape::cylinder(1.0, 1.0)]);
        assert_eq!(single, Shape::cylinder(1.0, 1.0));
        let pillar = Shape::revolved(vec![[0.0, 1.5], [1.5, 1.5], [1.5, 0.0], [5.0, -1.5], [0.0, -1.5]]);
        assert_relative_eq!(pillar.bounding_box().size(), Vector3::new(10.0, 10.0, 3.0));
    }
}

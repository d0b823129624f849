//! Property-based tests for the value types using the `proptest` crate.

use proptest::prelude::*;

use enclosure_types::{
    BoundingBox, Dimension2D, Object2D, Placement, Point3, Position2D, Side, SideSet, Vector3,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn arb_positive_dim() -> impl Strategy<Value = f64> {
    0.1f64..500.0
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop::sample::select(Side::ALL.to_vec())
}

fn arb_side_set() -> impl Strategy<Value = SideSet> {
    (any::<bool>(), prop::collection::vec(arb_side(), 0..4))
        .prop_map(|(default, sides)| {
            sides
                .into_iter()
                .fold(SideSet::new(default), |set, side| set.with(side, !default))
        })
}

fn arb_angle_degrees() -> impl Strategy<Value = f64> {
    -360.0f64..360.0
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Dimensions and positions
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn dimension_display_parses_back(l in arb_positive_dim(), w in arb_positive_dim()) {
        let dim = Dimension2D::new(l, w);
        let parsed = Dimension2D::parse(&dim.to_string()).unwrap();
        prop_assert_eq!(parsed, dim);
    }

    #[test]
    fn position_add_then_sub_is_identity(
        x in arb_coord(), y in arb_coord(), dx in arb_coord(), dy in arb_coord(),
    ) {
        let p = Position2D::new(x, y);
        let back = (p + (dx, dy)) - (dx, dy);
        prop_assert!((back.x - x).abs() < TOL);
        prop_assert!((back.y - y).abs() < TOL);
    }

    #[test]
    fn rectangle_contains_its_own_corners(
        l in arb_positive_dim(), w in arb_positive_dim(), x in arb_coord(), y in arb_coord(),
    ) {
        let obj = Object2D::from_parts(l, w, x, y);
        for corner in obj.corners() {
            prop_assert!(obj.contains(corner));
        }
        prop_assert!(obj.overlaps(&obj));
    }

    #[test]
    fn translated_rectangles_keep_overlap(
        l in arb_positive_dim(), w in arb_positive_dim(),
        x in arb_coord(), y in arb_coord(), dx in arb_coord(), dy in arb_coord(),
    ) {
        let a = Object2D::from_parts(l, w, x, y);
        let b = Object2D::from_parts(l / 2.0, w / 2.0, x + l / 4.0, y + w / 4.0);
        prop_assert_eq!(b.overlaps(&a), (b + (dx, dy)).overlaps(&(a + (dx, dy))));
    }
}

// ---------------------------------------------------------------------------
// Side sets
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn double_inversion_is_identity(set in arb_side_set()) {
        prop_assert_eq!(!!set, set);
    }

    #[test]
    fn inversion_complements_presence(set in arb_side_set(), side in arb_side()) {
        prop_assert_ne!(set.contains(side), (!set).contains(side));
    }

    #[test]
    fn horizontal_and_vertical_cover_the_set(set in arb_side_set()) {
        prop_assert_eq!(set.horizontal().len() + set.vertical().len(), set.count());
    }

    #[test]
    fn adjacents_are_present_and_perpendicular(set in arb_side_set(), side in arb_side()) {
        for adjacent in set.adjacents(side) {
            prop_assert!(set.contains(adjacent));
            prop_assert_ne!(adjacent.is_horizontal(), side.is_horizontal());
        }
    }
}

// ---------------------------------------------------------------------------
// Placements and bounds
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rotation_preserves_distances(
        rx in arb_angle_degrees(), ry in arb_angle_degrees(), rz in arb_angle_degrees(),
        x in arb_coord(), y in arb_coord(), z in arb_coord(),
    ) {
        let r = Placement::rotation_xyz_degrees(rx, ry, rz);
        let v = Vector3::new(x, y, z);
        prop_assert!((r.transform_vector(&v).norm() - v.norm()).abs() < TOL * v.norm().max(1.0));
    }

    #[test]
    fn transformed_bounds_contain_moved_center(
        l in arb_positive_dim(), w in arb_positive_dim(), h in arb_positive_dim(),
        rz in arb_angle_degrees(), dx in arb_coord(),
    ) {
        let bb = BoundingBox::centered(Point3::origin(), Vector3::new(l, w, h));
        let p = Placement::located(Vector3::new(dx, 0.0, 0.0), [0.0, 0.0, rz]);
        let moved = bb.transformed(&p);
        prop_assert!(moved.contains_point(&p.transform_point(&Point3::origin())));
        prop_assert!((moved.size().z - h).abs() < TOL);
    }
}

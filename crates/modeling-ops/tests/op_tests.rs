use approx::assert_relative_eq;
use enclosure_types::{BoundingBox, Color, Corner, Placement, Point3, Vector3};
use geometry_kernel::{Kernel, MockKernel, TruckKernel};
use modeling_ops::{
    evaluate_part, evaluate_shape, rounded_cuboid, EvalOptions, OpError, Part, Shape,
    CUTTER_OVERSHOOT,
};

fn strict() -> EvalOptions {
    EvalOptions { strict: true }
}

// ── Shape evaluation ───────────────────────────────────────────────────────

#[test]
fn kernel_bounds_match_analytic_bounds() {
    let mut kernel = MockKernel::new();
    let shape = Shape::cuboid(4.0, 2.0, 1.0)
        .moved(Placement::rotation_xyz_degrees(0.0, 0.0, 90.0))
        .translated(10.0, 0.0, 0.5);

    let (handles, _) = evaluate_shape(&mut kernel, &shape, &EvalOptions::default()).unwrap();
    let from_kernel = kernel.bounding_box(&handles[0]).unwrap();
    let analytic = shape.bounding_box();

    assert_relative_eq!(from_kernel.min, analytic.min, epsilon = 1e-9);
    assert_relative_eq!(from_kernel.max, analytic.max, epsilon = 1e-9);
    assert_relative_eq!(analytic.size(), Vector3::new(2.0, 4.0, 1.0), epsilon = 1e-9);
}

#[test]
fn union_fuses_into_one_solid() {
    let mut kernel = MockKernel::new();
    let border = Shape::union(vec![
        Shape::cuboid(160.0, 2.0, 10.0),
        Shape::cylinder(1.5, 10.0).translated(0.0, 1.0, 0.0),
    ]);

    let (handles, diagnostics) = evaluate_shape(&mut kernel, &border, &strict()).unwrap();
    assert_eq!(handles.len(), 1);
    assert_eq!(kernel.primitive_count(&handles[0]), Some(2));
    assert!(diagnostics.is_clean());
}

#[test]
fn subtraction_of_touching_tool_is_skipped() {
    let mut kernel = MockKernel::new();
    let shape = Shape::cuboid(2.0, 2.0, 2.0)
        .subtract(vec![Shape::cuboid(2.0, 2.0, 2.0).translated(2.0, 0.0, 0.0)]);

    evaluate_shape(&mut kernel, &shape, &strict()).unwrap();
    assert_eq!(kernel.count_operations("boolean_subtract"), 0);
}

#[test]
fn failed_union_degrades_to_separate_bodies() {
    let mut kernel = MockKernel::new();
    kernel.fail_on("boolean_union");
    let shape = Shape::union(vec![
        Shape::cuboid(1.0, 1.0, 1.0),
        Shape::cuboid(1.0, 1.0, 1.0).translated(0.5, 0.0, 0.0),
        Shape::cuboid(1.0, 1.0, 1.0).translated(1.0, 0.0, 0.0),
    ]);

    let (handles, diagnostics) =
        evaluate_shape(&mut kernel, &shape, &EvalOptions::default()).unwrap();
    assert_eq!(handles.len(), 3);
    assert_eq!(diagnostics.warnings.len(), 2);

    let err = evaluate_shape(&mut kernel, &shape, &strict()).unwrap_err();
    assert!(matches!(err, OpError::StrictFallback { .. }));
}

#[test]
fn rounded_slab_needs_no_boolean() {
    let mut kernel = MockKernel::new();
    let rounded = rounded_cuboid(40.0, 20.0, 2.0, &Corner::ALL, 1.99);

    let (handles, _) = evaluate_shape(&mut kernel, &rounded, &strict()).unwrap();
    assert_eq!(handles.len(), 1);
    assert_eq!(kernel.operations(), ["make_rounded_box"]);
}

// ── Part trees ─────────────────────────────────────────────────────────────

fn stacked_assembly() -> Part {
    let mut base = Part::with_shape("base", Shape::cuboid(20.0, 10.0, 2.0));
    base.add_joint("top", Point3::new(-10.0, -5.0, 1.0));

    let mut cover = Part::with_shape("cover", Shape::cuboid(20.0, 10.0, 0.5))
        .colored(Color::WHITE);
    cover.add_joint("bottom", Point3::new(-10.0, -5.0, -0.25));
    base.connect("top", &mut cover, "bottom").unwrap();

    Part::with_children("assembly", vec![base, cover])
}

#[test]
fn connected_parts_stack() {
    let assembly = stacked_assembly();
    let bb = assembly.bounding_box();
    assert_relative_eq!(bb.min.z, -1.0);
    assert_relative_eq!(bb.max.z, 1.5);
    assert_relative_eq!(assembly.child("cover").unwrap().bounding_box().min.z, 1.0);
}

#[test]
fn evaluated_bodies_carry_labels_and_colors() {
    let mut kernel = MockKernel::new();
    let mut assembly = stacked_assembly();
    assembly.placement = Placement::translation(0.0, 0.0, 100.0);

    let evaluated = evaluate_part(&mut kernel, &assembly, &strict()).unwrap();
    let labels: Vec<&str> = evaluated.bodies.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["assembly/base", "assembly/cover"]);
    assert_eq!(evaluated.bodies[1].color, Some(Color::WHITE));

    let cover: BoundingBox = kernel.bounding_box(&evaluated.bodies[1].handle).unwrap();
    assert_relative_eq!(cover.min.z, 101.0, epsilon = 1e-9);
    assert_relative_eq!(cover.max.z, 101.5, epsilon = 1e-9);
}

// ── Truck kernel ───────────────────────────────────────────────────────────

#[test]
fn truck_fuses_overlapping_blocks() {
    let mut kernel = TruckKernel::new();
    let shape = Shape::union(vec![
        Shape::cuboid(20.0, 2.0, 10.0),
        Shape::cuboid(16.0, 4.0, 3.0).translated(0.0, 2.0, 2.5),
    ]);

    let (handles, diagnostics) = evaluate_shape(&mut kernel, &shape, &strict()).unwrap();
    assert_eq!(handles.len(), 1);
    assert!(diagnostics.is_clean());
    let bb = kernel.bounding_box(&handles[0]).unwrap();
    assert_relative_eq!(bb.max.y, 4.0, epsilon = 1e-6);
}

#[test]
fn truck_cuts_slots_through_a_rounded_plate() {
    let mut kernel = TruckKernel::new();
    let e = CUTTER_OVERSHOOT;
    let plate = rounded_cuboid(40.0, 20.0, 2.0, &Corner::ALL, 4.0).subtract(vec![
        Shape::cylinder(1.5, 2.0 + 2.0 * e).translated(-10.0, 0.0, 0.0),
        Shape::cuboid(6.0, 4.0, 2.0 + 2.0 * e).translated(10.0, 0.0, 0.0),
    ]);

    let (handles, diagnostics) = evaluate_shape(&mut kernel, &plate, &strict()).unwrap();
    assert_eq!(handles.len(), 1);
    assert!(diagnostics.is_clean());
}

#[test]
fn truck_builds_a_revolved_pillar() {
    let mut kernel = TruckKernel::new();
    let pillar = Shape::revolved(vec![[0.0, 5.0], [1.5, 5.0], [1.5, -2.0], [5.0, -5.0], [0.0, -5.0]])
        .translated(25.0, 0.0, 6.0);

    let (handles, diagnostics) = evaluate_shape(&mut kernel, &pillar, &strict()).unwrap();
    assert!(diagnostics.is_clean());
    let bb = kernel.bounding_box(&handles[0]).unwrap();
    assert_relative_eq!(bb.min.z, 1.0, epsilon = 1e-6);
    assert_relative_eq!(bb.max.z, 11.0, epsilon = 1e-6);
}

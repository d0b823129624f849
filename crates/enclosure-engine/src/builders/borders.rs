//! Chassis borders with their support ledges and wire slots.

use enclosure_types::{Color, Corner, Placement, Point3, Side, Vector3};
use modeling_ops::{rounded_cuboid, Align, Part, Shape, CUTTER_OVERSHOOT};
use tracing::{debug, info, instrument};

use crate::layout::ModuleParameters;

/// The ledge's vertical leg is this much longer than its horizontal one.
const LEDGE_BORDER_RATIO: f64 = 0.5;

/// Gap left between a ledge and the open end of its border.
pub const LEDGE_CLEARANCE: f64 = 0.5;

/// Room for a female JST connector, in mm.
pub const WIRE_SLOT_HEIGHT: f64 = 9.5;

/// Builds one border per present side.
pub struct BordersBuilder<'a> {
    module: &'a ModuleParameters<'a>,
}

impl<'a> BordersBuilder<'a> {
    pub fn new(module: &'a ModuleParameters<'a>) -> Self {
        Self { module }
    }

    /// `None` when the module has no border at all.
    #[instrument(skip_all)]
    pub fn build(&self) -> Option<Part> {
        info!(borders = %self.module.borders, "building chassis borders");

        let borders: Vec<Part> = self
            .module
            .borders
            .iter()
            .map(|side| {
                Part::with_shape(format!("border:{side}"), self.border(side)).colored(Color::BLACK)
            })
            .collect();

        if borders.is_empty() {
            return None;
        }
        Some(Part::with_children("borders", borders).colored(Color::BLACK))
    }

    /// Border box on `side` fused with its ledge, in the chassis frame.
    pub fn border(&self, side: Side) -> Shape {
        debug!(%side, "building border");
        let m = self.module;
        let t = m.border_thickness();
        let (length, width) = if side.is_horizontal() {
            (t, m.outer.width)
        } else {
            (m.outer.length, t)
        };
        let position = m.border_position(side);
        let corners: Vec<Corner> = Corner::enclosed_by(&m.borders)
            .into_iter()
            .filter(|corner| {
                let (a, b) = corner.sides();
                a == side || b == side
            })
            .collect();

        let border = rounded_cuboid(
            length,
            width,
            m.inner.height,
            &corners,
            m.corner_radius(),
        )
        .translated(position.x, position.y, position.z);
        let body = match self.support_ledge(side) {
            Some(ledge) => Shape::union(vec![border, ledge]),
            None => border,
        };
        if side == Side::Back {
            body.subtract(self.wire_slots())
        } else {
            body
        }
    }

    /// Right triangle prism along the inner face of the border on `side`.
    ///
    /// The horizontal leg points into the chassis and its top is flush with
    /// the pillar tops. It runs between the inner faces of the neighbouring
    /// borders that exist, and stops [`LEDGE_CLEARANCE`] short of an open end.
    /// The prism reaches half a border thickness into the border so the two
    /// fuse through a volume rather than a shared face.
    pub fn support_ledge(&self, side: Side) -> Option<Shape> {
        let m = self.module;
        let t = m.border_thickness();
        let size = m.parameters.chassis_borders.support_ledge_size;
        if size <= 0.0 {
            return None;
        }
        let top = m.bottom_thickness() / 2.0 + m.parameters.chassis_pillar.height;

        let (inward, half_run, face) = match side {
            Side::Back => (-Vector3::y(), m.outer.length / 2.0, m.outer.width / 2.0 - t),
            Side::Front => (Vector3::y(), m.outer.length / 2.0, -m.outer.width / 2.0 + t),
            Side::Left => (Vector3::x(), m.outer.width / 2.0, -m.outer.length / 2.0 + t),
            Side::Right => (-Vector3::x(), m.outer.width / 2.0, m.outer.length / 2.0 - t),
        };
        let (start_side, end_side) = if side.is_horizontal() {
            (Side::Front, Side::Back)
        } else {
            (Side::Left, Side::Right)
        };
        let inset = |present: bool| if present { t } else { LEDGE_CLEARANCE };
        let start = -half_run + inset(m.borders.contains(start_side));
        let end = half_run - inset(m.borders.contains(end_side));

        // Local X points inward, local Y down, so local Z runs along the border.
        let down = -Vector3::z();
        let run = inward.cross(&down);
        let along = if run.x + run.y > 0.0 { start } else { end };
        let on_face = if side.is_horizontal() {
            Point3::new(face, along, top)
        } else {
            Point3::new(along, face, top)
        };
        let depth = t / 2.0;
        let origin = on_face - inward * depth;

        // Same slope as a `size` ledge starting on the face.
        let reach = size + depth;
        let prism = Shape::triangle_prism(reach, reach * (1.0 + LEDGE_BORDER_RATIO), end - start);
        Some(prism.moved(Placement::from_frame(origin, inward, down)))
    }

    /// Slots through the back border and its ledge, resting on the floor.
    ///
    /// Each slot reaches [`CUTTER_OVERSHOOT`] past the outer face, the ledge
    /// tip and the floor top so no cut face lies on a border face.
    pub fn wire_slots(&self) -> Vec<Shape> {
        let m = self.module;
        if m.back_wire_slots.is_empty() {
            return Vec::new();
        }
        info!(count = m.back_wire_slots.len(), "building back wire slots");

        let t = m.border_thickness();
        let ledge = m.parameters.chassis_borders.support_ledge_size;
        let e = CUTTER_OVERSHOOT;
        let (x0, _) = m.inner_origin();
        let y = m.outer.width / 2.0 - (t + ledge) / 2.0;
        let z = m.bottom_thickness() / 2.0 - e;

        m.back_wire_slots
            .iter()
            .map(|slot| {
                Shape::cuboid(slot.dimensions.length, t + ledge + 2.0 * e, WIRE_SLOT_HEIGHT + e)
                    .aligned([Align::Min, Align::Center, Align::Min])
                    .translated(x0 + slot.position.x, y, z)
            })
            .collect()
    }
}

//! Screw tabs joining a module to its neighbours.
//!
//! Every open side gets one tab standing in the opening and one on each
//! border next to it. The tab's chamfered underside lets it print without
//! supports.

use enclosure_types::{Color, Dimension3D, Placement, Point3, Side, Vector3};
use modeling_ops::{Part, Shape, CUTTER_OVERSHOOT};
use tracing::{debug, info, instrument};

use crate::error::EngineError;
use crate::layout::ModuleParameters;

/// Intrinsic XYZ rotation, in degrees, of a tab built on `build` for an
/// opening on `opening`.
pub fn connector_rotation(build: Side, opening: Side) -> Result<[f64; 3], EngineError> {
    use Side::*;
    let rotation = match (build, opening) {
        (Left, Left) => [90.0, 270.0, 0.0],
        (Right, Right) => [90.0, 90.0, 0.0],
        (Back, Back) => [270.0, 0.0, 180.0],
        (Front, Front) => [90.0, 0.0, 0.0],
        (Left, Back) => [270.0, 0.0, 270.0],
        (Left, Front) => [90.0, 0.0, 270.0],
        (Right, Front) => [90.0, 0.0, 90.0],
        (Right, Back) => [270.0, 0.0, 90.0],
        (Back, Right) => [0.0, 90.0, 180.0],
        (Back, Left) => [0.0, 270.0, 180.0],
        (Front, Left) => [0.0, 270.0, 0.0],
        (Front, Right) => [0.0, 90.0, 0.0],
        _ => return Err(EngineError::UnsupportedConnectorPlacement { build, opening }),
    };
    Ok(rotation)
}

pub struct ConnectorsBuilder<'a> {
    module: &'a ModuleParameters<'a>,
}

impl<'a> ConnectorsBuilder<'a> {
    pub fn new(module: &'a ModuleParameters<'a>) -> Self {
        Self { module }
    }

    /// Square tab as tall as the pillars, `wall + chamfer` thick.
    pub fn dimensions(&self) -> Dimension3D {
        let size = self.module.parameters.chassis_pillar.height;
        let connectors = &self.module.parameters.module_connectors;
        Dimension3D::new(
            size,
            size,
            connectors.wall_thickness + connectors.chamfer_length,
        )
    }

    /// A tab centered on the origin, screw hole along Z.
    ///
    /// The underside is hollowed by a frustum: the tab's outer walls stop
    /// `chamfer_tolerance` above the bottom and slope inward by
    /// `chamfer_length` up to a flat ceiling. The solid is built directly
    /// from its faces, only the hole is a boolean.
    pub fn template(&self) -> Shape {
        let parameters = &self.module.parameters.module_connectors;
        let d = self.dimensions();
        let e = CUTTER_OVERSHOOT;
        let hole_radius = (parameters.hole_diameter + parameters.hole_tolerance) / 2.0;
        debug!(hole_radius, "connector template");

        let c = parameters.chamfer_length;
        let (x, y) = (d.length / 2.0, d.width / 2.0);
        let rim = -d.height / 2.0 + parameters.chamfer_tolerance;
        let rings = [(x, y, rim), (x - c, y - c, rim + c), (x, y, d.height / 2.0)];
        // Rim, ceiling and top rings, each counter-clockwise seen from above.
        let points = rings
            .iter()
            .flat_map(|&(x, y, z)| {
                [
                    Point3::new(-x, -y, z),
                    Point3::new(x, -y, z),
                    Point3::new(x, y, z),
                    Point3::new(-x, y, z),
                ]
            })
            .collect();

        let mut faces = vec![vec![8, 9, 10, 11], vec![4, 7, 6, 5]];
        for i in 0..4 {
            let j = (i + 1) % 4;
            faces.push(vec![i, j, 8 + j, 8 + i]);
            faces.push(vec![i, 4 + i, 4 + j, j]);
        }

        Shape::polyhedron(points, faces)
            .subtract(vec![Shape::cylinder(hole_radius, d.height + 2.0 * e)])
    }

    /// Position of the tab built on `build` for the opening on `opening`,
    /// in the chassis frame.
    pub fn position(&self, build: Side, opening: Side) -> Vector3<f64> {
        let m = self.module;
        let d = self.dimensions();
        let on_opening = build == opening;
        let border = m.border_position(build);

        let (main_size, border_main, border_cross) = if opening.is_horizontal() {
            (m.outer.length, border.x, border.y)
        } else {
            (m.outer.width, border.y, border.x)
        };

        let main_direction = if opening.is_start() { -1.0 } else { 1.0 };
        let main_base = if on_opening { 0.0 } else { border_main };
        let main = main_base + main_direction * (main_size - d.height) / 2.0;

        let cross_direction = if build.is_start() { 1.0 } else { -1.0 };
        let cross_offset = if on_opening {
            0.0
        } else {
            (m.border_thickness() + d.width) / 2.0
        };
        let cross = border_cross + cross_direction * cross_offset;

        let z = (d.length + m.bottom_thickness()) / 2.0;
        if opening.is_horizontal() {
            Vector3::new(main, cross, z)
        } else {
            Vector3::new(cross, main, z)
        }
    }

    /// Every (build side, opening side) pair needing a tab.
    pub fn placements(&self) -> Vec<(Side, Side)> {
        let borders = &self.module.borders;
        Side::ALL
            .into_iter()
            .filter(|side| !borders.contains(*side))
            .flat_map(|opening| {
                std::iter::once((opening, opening))
                    .chain(borders.adjacents(opening).into_iter().map(move |b| (b, opening)))
            })
            .collect()
    }

    /// `None` when every side has a border.
    #[instrument(skip_all)]
    pub fn build(&self) -> Result<Option<Part>, EngineError> {
        info!("building chassis connectors");
        let placements = self.placements();
        if placements.is_empty() {
            debug!("no connectors to build");
            return Ok(None);
        }

        let template = self.template();
        let mut connectors = Vec::with_capacity(placements.len());
        for (build, opening) in placements {
            let rotation = connector_rotation(build, opening)?;
            let position = self.position(build, opening);
            debug!(%build, %opening, ?position, ?rotation, "placing connector");

            let shape = template
                .clone()
                .moved(Placement::located(position, rotation));
            connectors.push(
                Part::with_shape(format!("connector:build={build},opening={opening}"), shape)
                    .colored(Color::BLACK),
            );
        }
        Ok(Some(Part::with_children("connectors", connectors)))
    }
}

//! Per-module dimensions derived from the design parameters.

use enclosure_types::{
    is_integral, Color, Dimension2D, Dimension3D, Object2D, Point3, Position2D, Side, SideSet,
    Vector3,
};
use tracing::debug;

use crate::error::EngineError;
use crate::parameters::{EnclosureParameters, Parameters};

/// Shortest straight stretch left on a border side next to a rounded corner,
/// in mm. Kept well above the kernel's boolean tolerance.
pub const MIN_STRAIGHT_EDGE: f64 = 0.1;

/// What every module of an enclosure shares.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleTemplate {
    /// Module size in pixels.
    pub shape: Dimension2D,
    /// Inside of the chassis in mm, floor to lid.
    pub inner: Dimension3D,
    pub pixel_size: f64,
}

impl ModuleTemplate {
    pub fn new(enclosure: &EnclosureParameters) -> Result<Self, EngineError> {
        let matrix = &enclosure.led_matrix;
        let parameters = &enclosure.parameters;
        let layout = parameters.enclosure.layout;
        let composite = matrix.shape();

        let shape = composite.divide(&layout);
        if !shape.is_integral() {
            return Err(EngineError::NonIntegerModuleShape {
                shape: composite,
                layout,
            });
        }

        let pixel_size = matrix.pixel_size();
        let inner = Dimension3D::new(
            shape.length * pixel_size,
            shape.width * pixel_size,
            parameters.chassis_pillar.height
                + matrix.min_height()
                + parameters.lid_grid.max_line_height()
                + parameters.enclosure.height_tolerance,
        );
        debug!(%shape, %inner, "module template");

        Ok(Self {
            shape,
            inner,
            pixel_size,
        })
    }

    /// Distance between two neighbouring modules, in mm.
    pub fn step(&self) -> Dimension2D {
        self.inner.to_2d()
    }
}

/// Dimensions of one module at a given place in the enclosure.
#[derive(Debug, Clone)]
pub struct ModuleParameters<'a> {
    pub parameters: &'a Parameters,
    pub shape: Dimension2D,
    pub inner: Dimension3D,
    pub outer: Dimension3D,
    pub pixel_size: f64,
    /// Front-left corner of the module's inner footprint in the enclosure.
    pub position: Position2D,
    pub is_back_row: bool,
    /// Sides closed by a border. Open sides face a neighbouring module.
    pub borders: SideSet,
    /// Wire slots to cut in the back border, in the inner frame.
    pub back_wire_slots: Vec<Object2D>,
    /// Panel connectors over this module, in the inner frame.
    pub panel_connectors: Vec<Object2D>,
}

impl<'a> ModuleParameters<'a> {
    pub fn new(
        enclosure: &'a EnclosureParameters,
        template: &ModuleTemplate,
        position: Position2D,
        is_back_row: bool,
        borders: SideSet,
    ) -> Self {
        let parameters = &enclosure.parameters;
        let inner = template.inner;
        let thickness = parameters.chassis_borders.thickness;
        let outer = Dimension3D::new(
            inner.length + borders.horizontal().len() as f64 * thickness,
            inner.width + borders.vertical().len() as f64 * thickness,
            inner.height + parameters.chassis_bottom.thickness,
        );

        let back_wire_slots = if is_back_row {
            enclosure
                .led_matrix
                .scoped_back_wire_slots(position.x, inner.length)
        } else {
            Vec::new()
        };
        let scope = Object2D::new(inner.to_2d(), position);
        let panel_connectors = enclosure.led_matrix.scoped_connectors(&scope);

        Self {
            parameters,
            shape: template.shape,
            inner,
            outer,
            pixel_size: template.pixel_size,
            position,
            is_back_row,
            borders,
            back_wire_slots,
            panel_connectors,
        }
    }

    /// `module:x=X,y=Y`, positions in mm.
    pub fn label(&self) -> String {
        format!("module:x={},y={}", self.position.x, self.position.y)
    }

    pub fn border_thickness(&self) -> f64 {
        self.parameters.chassis_borders.thickness
    }

    pub fn bottom_thickness(&self) -> f64 {
        self.parameters.chassis_bottom.thickness
    }

    /// Radius of the rounded outer corners, shared by the floor and the
    /// borders. Capped so every border side keeps a straight stretch of at
    /// least [`MIN_STRAIGHT_EDGE`].
    pub fn corner_radius(&self) -> f64 {
        let radius = self.parameters.chassis_borders.radius;
        let cap = self.border_thickness() - MIN_STRAIGHT_EDGE;
        if radius > cap {
            debug!(radius, cap, "capping corner radius to the border thickness");
            return cap.max(0.0);
        }
        radius
    }

    /// Center of the border box on `side`, in the chassis frame.
    ///
    /// Computed for every side, present or not; connectors on open sides use
    /// the coordinates of the missing border.
    pub fn border_position(&self, side: Side) -> Vector3<f64> {
        let half_t = self.border_thickness() / 2.0;
        let half_l = self.outer.length / 2.0;
        let half_w = self.outer.width / 2.0;
        let z = self.inner.height / 2.0 + self.bottom_thickness() / 2.0;
        match side {
            Side::Back => Vector3::new(0.0, half_w - half_t, z),
            Side::Front => Vector3::new(0.0, -half_w + half_t, z),
            Side::Left => Vector3::new(-half_l + half_t, 0.0, z),
            Side::Right => Vector3::new(half_l - half_t, 0.0, z),
        }
    }

    /// Offset from the inner frame (origin at the inner front-left corner) to
    /// the chassis frame (centered, floor slab centered on z = 0).
    pub fn inner_origin(&self) -> (f64, f64) {
        let t = self.border_thickness();
        let left = if self.borders.contains(Side::Left) { t } else { 0.0 };
        let front = if self.borders.contains(Side::Front) { t } else { 0.0 };
        (
            -self.outer.length / 2.0 + left,
            -self.outer.width / 2.0 + front,
        )
    }

    /// Where the lid's front-left corner rests: on top of the borders.
    pub fn lid_anchor(&self) -> Point3<f64> {
        Point3::new(
            -self.outer.length / 2.0,
            -self.outer.width / 2.0,
            self.inner.height + self.bottom_thickness() / 2.0,
        )
    }

    /// Center of the floor slab's face on `side`, where a neighbour attaches.
    pub fn side_joint(&self, side: Side) -> Point3<f64> {
        let half_l = self.outer.length / 2.0;
        let half_w = self.outer.width / 2.0;
        match side {
            Side::Back => Point3::new(0.0, half_w, 0.0),
            Side::Front => Point3::new(0.0, -half_w, 0.0),
            Side::Left => Point3::new(-half_l, 0.0, 0.0),
            Side::Right => Point3::new(half_l, 0.0, 0.0),
        }
    }

    /// Pillar grid inputs as whole millimetres.
    pub fn pillar_grid(&self) -> Result<(u32, u32, u32), EngineError> {
        let spacing = self.parameters.chassis_pillar.spacing;
        let integral =
            is_integral(self.inner.length) && is_integral(self.inner.width) && is_integral(spacing);
        if !integral || spacing < 1.0 {
            return Err(EngineError::NonIntegerPillarGrid {
                length: self.inner.length,
                width: self.inner.width,
                spacing,
            });
        }
        Ok((
            self.inner.length.round() as u32,
            self.inner.width.round() as u32,
            spacing.round() as u32,
        ))
    }

    /// Grid lines of the lid.
    ///
    /// Back and right lines are always drawn: the neighbour on that side has
    /// no front or left border line of its own.
    pub fn lid_grid(&self) -> GridLayout {
        let grid = &self.parameters.lid_grid;
        GridLayout {
            shape: self.shape,
            borders: self.borders + Side::Back + Side::Right,
            cell_size: self.pixel_size,
            horizontal_lines_height: grid.horizontal_lines_height,
            vertical_lines_height: grid.vertical_lines_height,
            gap: grid.gap,
            color: grid.color,
        }
    }

    pub fn lid_diffuser(&self) -> DiffuserLayout {
        DiffuserLayout {
            grid_dimensions: self.inner.to_2d(),
            margins: self.borders,
            margin_size: self.border_thickness(),
            thickness: self.parameters.lid_diffuser.thickness,
        }
    }
}

/// Lid grid inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Cells along X and Y.
    pub shape: Dimension2D,
    pub borders: SideSet,
    pub cell_size: f64,
    pub horizontal_lines_height: f64,
    pub vertical_lines_height: f64,
    pub gap: f64,
    pub color: Color,
}

/// Lid diffuser inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffuserLayout {
    /// Footprint of the grid it covers, in mm.
    pub grid_dimensions: Dimension2D,
    /// Sides where the diffuser extends over a border.
    pub margins: SideSet,
    pub margin_size: f64,
    pub thickness: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led_matrix::CompositeLedMatrix;
    use approx::assert_relative_eq;

    fn enclosure(rows: &[&str], layout: (f64, f64)) -> EnclosureParameters {
        let mut parameters = Parameters::default();
        parameters.enclosure.layout = Dimension2D::new(layout.0, layout.1);
        EnclosureParameters::new(CompositeLedMatrix::parse(rows).unwrap(), parameters)
    }

    #[test]
    fn template_splits_the_composite_shape() {
        let enclosure = enclosure(&["16x16,16x16"], (2.0, 1.0));
        let template = ModuleTemplate::new(&enclosure).unwrap();
        assert_eq!(template.shape, Dimension2D::new(16.0, 16.0));
        assert_relative_eq!(template.inner.length, 160.0);
        // 10 + 1.25 + 5 + 0.1
        assert_relative_eq!(template.inner.height, 16.35, epsilon = 1e-12);
    }

    #[test]
    fn uneven_split_is_an_error() {
        let enclosure = enclosure(&["16x16,8x8"], (2.0, 1.0));
        assert!(matches!(
            ModuleTemplate::new(&enclosure),
            Err(EngineError::NonIntegerModuleShape { .. })
        ));
    }

    #[test]
    fn outer_dimensions_count_present_borders() {
        let enclosure = enclosure(&["16x16,16x16"], (2.0, 1.0));
        let template = ModuleTemplate::new(&enclosure).unwrap();
        let borders = SideSet::all() - Side::Right;
        let module =
            ModuleParameters::new(&enclosure, &template, Position2D::ORIGIN, true, borders);

        assert_relative_eq!(module.outer.length, 162.0);
        assert_relative_eq!(module.outer.width, 164.0);
        assert_relative_eq!(module.outer.height, 18.35, epsilon = 1e-12);
        assert_eq!(module.back_wire_slots.len(), 3);
        assert_eq!(module.panel_connectors.len(), 3);

        let back = module.border_position(Side::Back);
        assert_relative_eq!(back.y, 81.0);
        assert_relative_eq!(back.z, 16.35 / 2.0 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(module.border_position(Side::Left).x, -80.0);
        assert_eq!(module.inner_origin(), (-79.0, -80.0));
        assert_eq!(module.label(), "module:x=0,y=0");
    }

    #[test]
    fn corner_radius_leaves_a_straight_border_side() {
        let mut enclosure = enclosure(&["8x8"], (1.0, 1.0));
        let template = ModuleTemplate::new(&enclosure).unwrap();
        let module =
            ModuleParameters::new(&enclosure, &template, Position2D::ORIGIN, true, SideSet::all());
        assert_relative_eq!(module.corner_radius(), 2.0 - MIN_STRAIGHT_EDGE, epsilon = 1e-12);

        enclosure.parameters.chassis_borders.radius = 1.0;
        let module =
            ModuleParameters::new(&enclosure, &template, Position2D::ORIGIN, true, SideSet::all());
        assert_relative_eq!(module.corner_radius(), 1.0);
    }

    #[test]
    fn lid_grid_always_closes_back_and_right() {
        let enclosure = enclosure(&["16x16,16x16"], (2.0, 1.0));
        let template = ModuleTemplate::new(&enclosure).unwrap();
        let borders = SideSet::none() + Side::Left + Side::Front;
        let module =
            ModuleParameters::new(&enclosure, &template, Position2D::ORIGIN, false, borders);

        assert_eq!(module.lid_grid().borders.count(), 4);
        assert_eq!(module.lid_diffuser().margins, borders);
        assert!(module.back_wire_slots.is_empty());
    }

    #[test]
    fn pillar_grid_needs_whole_millimetres() {
        let mut enclosure = enclosure(&["8x8"], (1.0, 1.0));
        enclosure.parameters.chassis_pillar.spacing = 12.5;
        let template = ModuleTemplate::new(&enclosure).unwrap();
        let module = ModuleParameters::new(
            &enclosure,
            &template,
            Position2D::ORIGIN,
            true,
            SideSet::all(),
        );
        assert!(matches!(
            module.pillar_grid(),
            Err(EngineError::NonIntegerPillarGrid { .. })
        ));
    }
}

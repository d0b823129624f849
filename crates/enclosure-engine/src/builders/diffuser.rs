//! Translucent sheet covering the grid.

use enclosure_types::{Color, Corner, Point3, Side};
use modeling_ops::{rounded_cuboid, Align, Part, Shape};
use tracing::{debug, info, instrument};

use crate::layout::DiffuserLayout;

/// Half transparent white.
pub const DIFFUSER_COLOR: Color = Color {
    r: 255,
    g: 255,
    b: 255,
    a: 128,
};

pub struct DiffuserBuilder<'a> {
    layout: &'a DiffuserLayout,
}

impl<'a> DiffuserBuilder<'a> {
    pub fn new(layout: &'a DiffuserLayout) -> Self {
        Self { layout }
    }

    /// Sheet with its min corner on the origin.
    pub fn sheet(&self) -> Shape {
        let l = self.layout;
        let margins_x = l.margins.horizontal().len() as f64;
        let margins_y = l.margins.vertical().len() as f64;
        rounded_cuboid(
            l.grid_dimensions.length + margins_x * l.margin_size,
            l.grid_dimensions.width + margins_y * l.margin_size,
            l.thickness,
            &Corner::enclosed_by(&l.margins),
            l.margin_size,
        )
        .aligned([Align::Min; 3])
    }

    /// Bottom point right under the grid's center.
    ///
    /// The sheet center moves by half a margin away from every side
    /// without one.
    pub fn grid_joint(&self) -> Point3<f64> {
        let l = self.layout;
        let half = l.margin_size / 2.0;
        let center = self.sheet().bounding_box().center();
        let (mut x, mut y) = (center.x, center.y);

        if !l.margins.contains(Side::Left) {
            x -= half;
        }
        if !l.margins.contains(Side::Right) {
            x += half;
        }
        if !l.margins.contains(Side::Back) {
            y += half;
        }
        if !l.margins.contains(Side::Front) {
            y -= half;
        }
        debug!(x, y, "diffuser grid joint");
        Point3::new(x, y, 0.0)
    }

    #[instrument(skip_all)]
    pub fn build(&self) -> Part {
        info!(margins = %self.layout.margins, "building diffuser");
        let mut diffuser = Part::with_shape("diffuser", self.sheet()).colored(DIFFUSER_COLOR);
        diffuser.add_joint("grid", self.grid_joint());
        diffuser
    }
}

//! Lid grid separating the pixels.
//!
//! Horizontal lines run along X and are stacked along Y; vertical lines run
//! along Y. The grid frame has its origin at the nominal front-left corner of
//! the first cell, with lines standing on z = 0.

use enclosure_types::{Point3, Side};
use modeling_ops::{Align, Part, Shape};
use tracing::{info, instrument};

use crate::layout::GridLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Sides bounding the axis the lines are stacked along.
    fn sides(self) -> (Side, Side) {
        match self {
            Orientation::Horizontal => (Side::Front, Side::Back),
            Orientation::Vertical => (Side::Left, Side::Right),
        }
    }
}

pub struct GridBuilder<'a> {
    layout: &'a GridLayout,
}

impl<'a> GridBuilder<'a> {
    pub fn new(layout: &'a GridLayout) -> Self {
        Self { layout }
    }

    /// Line indices drawn for `orientation`.
    ///
    /// Index `i` sits on the boundary between cell `i - 1` and cell `i`; the
    /// outer boundaries are drawn only where a border is requested.
    pub fn indices(&self, orientation: Orientation) -> std::ops::Range<u32> {
        let (start_side, end_side) = orientation.sides();
        let cells = match orientation {
            Orientation::Horizontal => self.layout.shape.width,
            Orientation::Vertical => self.layout.shape.length,
        }
        .round() as u32;
        let start = if self.layout.borders.contains(start_side) { 0 } else { 1 };
        let end = cells + u32::from(self.layout.borders.contains(end_side));
        start..end
    }

    /// Offset of line `index` along its stacking axis.
    ///
    /// Lines straddle the cell boundary, except the outer ones which are
    /// pulled inside the grid footprint.
    pub fn offset(&self, orientation: Orientation, index: u32) -> f64 {
        let (start_side, end_side) = orientation.sides();
        let half_gap = self.layout.gap / 2.0;
        let last = self.indices(orientation).end.saturating_sub(1);

        let mut offset = f64::from(index) * self.layout.cell_size - half_gap;
        if index == 0 && self.layout.borders.contains(start_side) {
            offset += half_gap;
        }
        if index == last && self.layout.borders.contains(end_side) {
            offset -= half_gap;
        }
        offset
    }

    fn lines(&self, orientation: Orientation) -> Vec<Shape> {
        let l = self.layout;
        let template = match orientation {
            Orientation::Horizontal => Shape::cuboid(
                l.shape.length * l.cell_size,
                l.gap,
                l.horizontal_lines_height,
            ),
            Orientation::Vertical => Shape::cuboid(
                l.gap,
                l.shape.width * l.cell_size,
                l.vertical_lines_height,
            ),
        }
        .aligned([Align::Min; 3]);

        self.indices(orientation)
            .map(|index| {
                let offset = self.offset(orientation, index);
                match orientation {
                    Orientation::Horizontal => template.clone().translated(0.0, offset, 0.0),
                    Orientation::Vertical => template.clone().translated(
                        offset,
                        0.0,
                        l.horizontal_lines_height - l.vertical_lines_height,
                    ),
                }
            })
            .collect()
    }

    /// Point the diffuser attaches to: above the nominal grid center. Both
    /// line sets end at the height of the horizontal lines.
    pub fn diffuser_joint(&self) -> Point3<f64> {
        let l = self.layout;
        Point3::new(
            l.shape.length * l.cell_size / 2.0,
            l.shape.width * l.cell_size / 2.0,
            l.horizontal_lines_height,
        )
    }

    #[instrument(skip_all)]
    pub fn build(&self) -> Part {
        info!(shape = %self.layout.shape, borders = %self.layout.borders, "building grid");

        let mut lines = self.lines(Orientation::Horizontal);
        lines.extend(self.lines(Orientation::Vertical));

        let mut grid = Part::with_shape("grid", Shape::group(lines)).colored(self.layout.color);
        grid.add_joint("diffuser", self.diffuser_joint());
        grid
    }
}

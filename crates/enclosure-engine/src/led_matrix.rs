//! LED matrix panels and their arrangement in rows.
//!
//! A [`CompositeLedMatrix`] is read like the enclosure seen from above: the
//! first row is the back row. Panels in a row sit side by side along X.
//! Panels cannot be stacked inside a row.

use enclosure_types::{Dimension2D, Object2D};
use tracing::debug;

use crate::error::EngineError;

/// A single LED panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LedMatrix {
    /// Profile name, e.g. `16x16`.
    pub name: String,
    /// Layout in pixels.
    pub layout: Dimension2D,
    /// Pixel pitch in mm.
    pub pixel_size: f64,
    /// PCB plus tallest component between the LEDs, in mm.
    pub min_height: f64,
    /// Connector footprints, measured from the back-left corner of the panel
    /// with Y growing towards the front.
    pub connectors: Vec<Object2D>,
}

impl LedMatrix {
    /// Panel footprint in mm.
    pub fn dimensions(&self) -> Dimension2D {
        self.layout * self.pixel_size
    }
}

/// Names accepted by [`profile`].
pub const PROFILE_NAMES: [&str; 3] = ["8x8", "16x16", "32x8"];

/// Known panel profiles: input, power and output connectors on one line.
pub fn profile(name: &str) -> Result<LedMatrix, EngineError> {
    let (layout, min_height, connector, xs, y) = match name {
        "8x8" => ((8.0, 8.0), 1.15, (15.0, 50.0), [12.0, 32.0, 52.0], 15.0),
        "16x16" => ((16.0, 16.0), 1.25, (20.0, 100.0), [30.0, 70.0, 110.0], 30.0),
        "32x8" => ((32.0, 8.0), 1.15, (20.0, 50.0), [30.0, 150.0, 280.0], 15.0),
        _ => {
            return Err(EngineError::UnknownProfile {
                name: name.to_string(),
                known: PROFILE_NAMES.join(", "),
            })
        }
    };

    Ok(LedMatrix {
        name: name.to_string(),
        layout: Dimension2D::new(layout.0, layout.1),
        pixel_size: 10.0,
        min_height,
        connectors: xs
            .iter()
            .map(|x| Object2D::from_parts(connector.0, connector.1, *x, y))
            .collect(),
    })
}

/// Panels arranged in rows, back row first.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLedMatrix {
    rows: Vec<Vec<LedMatrix>>,
}

impl CompositeLedMatrix {
    /// Validate and wrap `rows`.
    pub fn new(rows: Vec<Vec<LedMatrix>>) -> Result<Self, EngineError> {
        let first = rows
            .first()
            .ok_or(EngineError::EmptyLayout)?
            .first()
            .ok_or(EngineError::EmptyRow { row: 0 })?;
        let expected = first.pixel_size;

        for (index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(EngineError::EmptyRow { row: index });
            }
            if let Some(panel) = row.iter().find(|p| p.pixel_size != expected) {
                return Err(EngineError::InconsistentPixelSize {
                    expected,
                    found: panel.pixel_size,
                });
            }
        }
        Ok(Self { rows })
    }

    /// Parse rows written as comma-separated profile names, e.g.
    /// `["16x16,16x16", "32x8"]`.
    ///
    /// A blank row is an empty row. An empty name inside a row, as in
    /// `16x16,`, is an unknown profile.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, EngineError> {
        let rows = rows
            .iter()
            .map(|row| {
                let row = row.as_ref();
                if row.trim().is_empty() {
                    return Ok(Vec::new());
                }
                row.split(',')
                    .map(str::trim)
                    .map(profile)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }

    pub fn rows(&self) -> &[Vec<LedMatrix>] {
        &self.rows
    }

    /// Pixel pitch shared by every panel, in mm.
    pub fn pixel_size(&self) -> f64 {
        self.rows[0][0].pixel_size
    }

    /// Tallest panel, in mm.
    pub fn min_height(&self) -> f64 {
        self.rows
            .iter()
            .flatten()
            .map(|p| p.min_height)
            .fold(0.0, f64::max)
    }

    /// Size in pixels: longest row by the sum of each row's tallest panel.
    pub fn shape(&self) -> Dimension2D {
        let (length, width) = self.rows.iter().fold((0.0_f64, 0.0), |(length, width), row| {
            let row_length: f64 = row.iter().map(|p| p.layout.length).sum();
            let row_width = row.iter().map(|p| p.layout.width).fold(0.0, f64::max);
            (length.max(row_length), width + row_width)
        });
        Dimension2D::new(length, width)
    }

    /// Footprint in mm.
    pub fn dimensions(&self) -> Dimension2D {
        self.shape() * self.pixel_size()
    }

    /// Connector footprints per row, in the enclosure frame: origin at the
    /// front-left corner, Y growing towards the back.
    pub fn connectors(&self) -> Vec<Vec<Object2D>> {
        let total_width = self.dimensions().width;
        let mut y_offset = 0.0;
        let mut grid = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut x_offset = 0.0;
            let mut row_width = 0.0_f64;
            let mut connectors = Vec::new();

            for panel in row {
                let dimensions = panel.dimensions();
                row_width = row_width.max(dimensions.width);
                connectors.extend(panel.connectors.iter().map(|c| {
                    let y = total_width - (c.position.y + y_offset) - c.dimensions.width;
                    Object2D::from_parts(
                        c.dimensions.length,
                        c.dimensions.width,
                        c.position.x + x_offset,
                        y,
                    )
                }));
                x_offset += dimensions.length;
            }

            y_offset += row_width;
            grid.push(connectors);
        }
        grid
    }

    /// Connectors of the back row; their cables leave through the back border.
    pub fn back_wire_slots(&self) -> Vec<Object2D> {
        self.connectors().into_iter().next().unwrap_or_default()
    }

    /// Back wire slots starting or ending within `[offset, offset + length]`
    /// on X, moved into a module frame starting at `offset`.
    pub fn scoped_back_wire_slots(&self, offset: f64, length: f64) -> Vec<Object2D> {
        let within = |x: f64| offset <= x && x <= offset + length;
        self.back_wire_slots()
            .into_iter()
            .filter(|slot| within(slot.position.x) || within(slot.end().x))
            .map(|slot| slot - (offset, 0.0))
            .collect()
    }

    /// Connectors overlapping `scope`, moved into the scope's frame.
    pub fn scoped_connectors(&self, scope: &Object2D) -> Vec<Object2D> {
        let scoped: Vec<Object2D> = self
            .connectors()
            .into_iter()
            .flatten()
            .filter(|c| c.overlaps(scope))
            .map(|c| c - scope.position)
            .collect();
        debug!(scope = %scope, count = scoped.len(), "scoped panel connectors");
        scoped
    }
}

//! The whole enclosure: a grid of modules joined on their open sides.

use enclosure_types::{Position2D, Side, SideSet};
use modeling_ops::Part;
use tracing::{debug, info, instrument, warn};

use crate::builders::module::ModuleBuilder;
use crate::error::EngineError;
use crate::layout::{ModuleParameters, ModuleTemplate};
use crate::parameters::EnclosureParameters;

/// Modules closer than this after both connections are considered agreeing.
const CONNECTION_TOLERANCE: f64 = 1e-6;

pub struct EnclosureBuilder<'a> {
    enclosure: &'a EnclosureParameters,
}

impl<'a> EnclosureBuilder<'a> {
    pub fn new(enclosure: &'a EnclosureParameters) -> Self {
        Self { enclosure }
    }

    /// Grid coordinates of every module, column by column, front row first.
    pub fn module_grid(&self) -> impl Iterator<Item = (u32, u32)> {
        let layout = self.enclosure.parameters.enclosure.layout;
        let (columns, rows) = (layout.length.round() as u32, layout.width.round() as u32);
        (0..columns).flat_map(move |column| (0..rows).map(move |row| (column, row)))
    }

    /// Borders of the module at (`column`, `row`): only the outer sides of
    /// the enclosure are closed.
    pub fn module_borders(&self, column: u32, row: u32) -> SideSet {
        let layout = self.enclosure.parameters.enclosure.layout;
        let last_column = (layout.length.round() as u32).saturating_sub(1);
        let last_row = (layout.width.round() as u32).saturating_sub(1);
        SideSet::none()
            .with(Side::Left, column == 0)
            .with(Side::Right, column == last_column)
            .with(Side::Front, row == 0)
            .with(Side::Back, row == last_row)
    }

    #[instrument(skip_all)]
    pub fn build(&self) -> Result<Part, EngineError> {
        let parameters = &self.enclosure.parameters;
        parameters.validate()?;
        let template = ModuleTemplate::new(self.enclosure)?;
        let step = template.step();
        let layout = parameters.enclosure.layout;
        let rows = layout.width.round() as usize;
        info!(
            matrix = %self.enclosure.led_matrix.shape(),
            %layout,
            module = %template.shape,
            "building enclosure"
        );

        let mut modules: Vec<Part> = Vec::new();
        for (column, row) in self.module_grid() {
            let position =
                Position2D::new(f64::from(column) * step.length, f64::from(row) * step.width);
            let borders = self.module_borders(column, row);
            let is_back_row = borders.contains(Side::Back);
            let module =
                ModuleParameters::new(self.enclosure, &template, position, is_back_row, borders);
            let mut part = ModuleBuilder::new(&module).build()?;

            let index = modules.len();
            if column > 0 {
                let left = &modules[index - rows];
                left.connect(Side::Right.name(), &mut part, Side::Left.name())?;
            }
            if row > 0 {
                let before = part.placement;
                let front = &modules[index - 1];
                front.connect(Side::Back.name(), &mut part, Side::Front.name())?;
                let drift = (part.placement.offset() - before.offset()).norm();
                if column > 0 && drift > CONNECTION_TOLERANCE {
                    warn!(
                        label = %part.label,
                        drift,
                        "front and left connections disagree"
                    );
                }
            }
            debug!(label = %part.label, offset = ?part.placement.offset(), "module placed");
            modules.push(part);
        }

        Ok(Part::with_children("enclosure", modules))
    }
}

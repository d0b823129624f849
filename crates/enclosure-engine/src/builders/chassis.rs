//! The chassis: floor, borders, pillars and module connectors.

use enclosure_types::{Color, Corner};
use modeling_ops::{rounded_cuboid, Part};
use tracing::{debug, info, instrument, warn};

use crate::builders::borders::BordersBuilder;
use crate::builders::connectors::ConnectorsBuilder;
use crate::builders::pillars::PillarsBuilder;
use crate::error::EngineError;
use crate::layout::ModuleParameters;

pub struct ChassisBuilder<'a> {
    module: &'a ModuleParameters<'a>,
}

impl<'a> ChassisBuilder<'a> {
    pub fn new(module: &'a ModuleParameters<'a>) -> Self {
        Self { module }
    }

    /// Floor slab centered on the origin, rounded where two borders meet.
    pub fn bottom(&self) -> Part {
        let m = self.module;
        let corners = Corner::enclosed_by(&m.borders);
        if corners.is_empty() {
            debug!("no outer corner to round");
        }
        let shape = rounded_cuboid(
            m.outer.length,
            m.outer.width,
            m.bottom_thickness(),
            &corners,
            m.corner_radius(),
        );
        Part::with_shape("bottom", shape).colored(Color::BLACK)
    }

    #[instrument(skip_all, fields(module = %self.module.label()))]
    pub fn build(&self) -> Result<Part, EngineError> {
        info!(outer = %self.module.outer, "building chassis");

        let mut chassis = Part::with_children("chassis", vec![self.bottom()]);

        if let Some(connectors) = ConnectorsBuilder::new(self.module).build()? {
            chassis.add_child(connectors);
        }
        match PillarsBuilder::new(self.module).build()? {
            Some(pillars) => chassis.add_child(pillars),
            None => warn!("No pillars to add to the chassis. Is the chassis too small?"),
        }
        if let Some(borders) = BordersBuilder::new(self.module).build() {
            chassis.add_child(borders);
        }

        chassis.add_joint("lid", self.module.lid_anchor());
        Ok(chassis)
    }
}

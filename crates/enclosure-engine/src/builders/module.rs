//! One module of the enclosure: a chassis and the lid resting on it.

use enclosure_types::{Placement, Side};
use modeling_ops::Part;
use tracing::{debug, info, instrument};

use crate::builders::chassis::ChassisBuilder;
use crate::builders::lid::LidBuilder;
use crate::error::EngineError;
use crate::layout::ModuleParameters;

pub struct ModuleBuilder<'a> {
    module: &'a ModuleParameters<'a>,
}

impl<'a> ModuleBuilder<'a> {
    pub fn new(module: &'a ModuleParameters<'a>) -> Self {
        Self { module }
    }

    /// The module in the chassis frame, with a joint on every open side
    /// named after the side.
    #[instrument(skip_all, fields(module = %self.module.label()))]
    pub fn build(&self) -> Result<Part, EngineError> {
        let m = self.module;
        let flags = &m.parameters.enclosure;
        info!(
            borders = %m.borders,
            chassis = flags.build_chassis,
            lid = flags.build_lid,
            "building module"
        );

        let chassis = if flags.build_chassis {
            Some(ChassisBuilder::new(m).build()?)
        } else {
            None
        };

        let lid = if flags.build_lid {
            let mut lid = LidBuilder::new(m).build()?;
            match &chassis {
                Some(chassis) => chassis.connect("lid", &mut lid, "chassis")?,
                None => {
                    let offset = m.lid_anchor() - lid.joint("chassis")?;
                    lid.placement = Placement::from_vector(offset) * lid.placement;
                }
            }
            Some(lid)
        } else {
            None
        };

        let mut part = Part::with_children(m.label(), chassis.into_iter().chain(lid).collect());
        for side in Side::ALL {
            if !m.borders.contains(side) {
                debug!(%side, "adding side joint");
                part.add_joint(side.name(), m.side_joint(side));
            }
        }
        Ok(part)
    }
}

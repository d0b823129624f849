//! The lid: a diffuser sheet with the pixel grid hanging under it.

use modeling_ops::Part;
use tracing::{info, instrument};

use crate::builders::diffuser::DiffuserBuilder;
use crate::builders::grid::GridBuilder;
use crate::error::EngineError;
use crate::layout::ModuleParameters;

pub struct LidBuilder<'a> {
    module: &'a ModuleParameters<'a>,
}

impl<'a> LidBuilder<'a> {
    pub fn new(module: &'a ModuleParameters<'a>) -> Self {
        Self { module }
    }

    /// The lid in its own frame, the diffuser's min corner on the origin.
    /// Joint `chassis` sits on that corner.
    #[instrument(skip_all, fields(module = %self.module.label()))]
    pub fn build(&self) -> Result<Part, EngineError> {
        info!("building lid");
        let diffuser = DiffuserBuilder::new(&self.module.lid_diffuser()).build();
        let mut grid = GridBuilder::new(&self.module.lid_grid()).build();
        diffuser.connect("grid", &mut grid, "diffuser")?;

        let anchor = diffuser.bounding_box().min;
        let mut lid = Part::with_children("lid", vec![diffuser, grid]);
        lid.add_joint("chassis", anchor);
        Ok(lid)
    }
}

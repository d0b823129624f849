//! Pillars the panels rest on.

use enclosure_types::{Color, Object2D};
use modeling_ops::{Part, Shape};
use tracing::{debug, info, instrument};

use crate::error::EngineError;
use crate::layout::ModuleParameters;
use crate::parameters::ChassisPillar;

/// A single pillar centered on the origin: a cylinder on a conical foot,
/// revolved as one profile.
pub fn pillar(parameters: &ChassisPillar) -> Shape {
    let half = parameters.height / 2.0;
    let radius = parameters.diameter / 2.0;
    let foot_top = -half + parameters.base_height;
    Shape::revolved(vec![
        [0.0, half],
        [radius, half],
        [radius, foot_top],
        [parameters.base_diameter / 2.0, -half],
        [0.0, -half],
    ])
}

/// Center of the box spanned by `positions`, `None` when there are none.
fn footprint_center(positions: &[(f64, f64)]) -> Option<(f64, f64)> {
    let (&(x, y), rest) = positions.split_first()?;
    let (min_x, max_x, min_y, max_y) = rest.iter().fold((x, x, y, y), |(a, b, c, d), &(x, y)| {
        (a.min(x), b.max(x), c.min(y), d.max(y))
    });
    Some(((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
}

/// Lays pillars on a square grid, skipping spots under a panel connector.
pub struct PillarsBuilder<'a> {
    module: &'a ModuleParameters<'a>,
}

impl<'a> PillarsBuilder<'a> {
    pub fn new(module: &'a ModuleParameters<'a>) -> Self {
        Self { module }
    }

    /// Pillar centers in the inner frame.
    pub fn positions(&self) -> Result<Vec<(f64, f64)>, EngineError> {
        let (length, width, spacing) = self.module.pillar_grid()?;
        let half = spacing / 2;
        let diameter = self.module.parameters.chassis_pillar.diameter;
        let axis = |size: u32| (half..size.saturating_sub(half)).step_by(spacing as usize);

        let mut positions = Vec::new();
        for x in axis(length) {
            for y in axis(width) {
                let (x, y) = (f64::from(x), f64::from(y));
                let footprint =
                    Object2D::from_parts(diameter, diameter, x - diameter / 2.0, y - diameter / 2.0);

                if let Some(connector) = self
                    .module
                    .panel_connectors
                    .iter()
                    .find(|c| footprint.overlaps(c))
                {
                    debug!(x, y, %connector, "skipping pillar over a panel connector");
                    continue;
                }
                debug!(x, y, "adding pillar");
                positions.push((x, y));
            }
        }
        Ok(positions)
    }

    /// `None` when no pillar fits.
    ///
    /// The set of pillars is centered on the chassis as a whole, so a grid
    /// with skipped spots shifts away from them.
    #[instrument(skip_all)]
    pub fn build(&self) -> Result<Option<Part>, EngineError> {
        info!("building chassis pillars");
        let positions = self.positions()?;
        let Some((cx, cy)) = footprint_center(&positions) else {
            return Ok(None);
        };
        debug!(cx, cy, "centering pillars");

        let parameters = &self.module.parameters.chassis_pillar;
        let template = pillar(parameters);
        let z = (self.module.bottom_thickness() + parameters.height) / 2.0;

        let pillars = positions
            .into_iter()
            .map(|(x, y)| template.clone().translated(x - cx, y - cy, z))
            .collect();
        Ok(Some(
            Part::with_shape("pillars", Shape::group(pillars)).colored(Color::BLACK),
        ))
    }
}

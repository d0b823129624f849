//! Design parameters, grouped the way they appear in configuration files.
//!
//! Every group deserializes with defaults for missing keys, so a TOML file
//! only needs the values it changes:
//!
//! ```toml
//! [chassis_pillar]
//! spacing = 20
//!
//! [lid_grid]
//! color = "#202020"
//! ```

use enclosure_types::{Color, Dimension2D};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::led_matrix::CompositeLedMatrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChassisBorders {
    /// Fillet radius of the outer vertical edges, in mm.
    pub radius: f64,
    pub thickness: f64,
    /// Horizontal leg of the ledge the panels rest on, in mm.
    pub support_ledge_size: f64,
}

impl Default for ChassisBorders {
    fn default() -> Self {
        Self {
            radius: 1.99,
            thickness: 2.0,
            support_ledge_size: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChassisBottom {
    pub thickness: f64,
}

impl Default for ChassisBottom {
    fn default() -> Self {
        Self { thickness: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChassisPillar {
    pub diameter: f64,
    pub height: f64,
    /// Height of the conical foot.
    pub base_height: f64,
    pub base_diameter: f64,
    /// Distance between pillar centers; must be a whole number of mm.
    pub spacing: f64,
}

impl Default for ChassisPillar {
    fn default() -> Self {
        Self {
            diameter: 3.0,
            height: 10.0,
            base_height: 3.0,
            base_diameter: 10.0,
            spacing: 25.0,
        }
    }
}

/// Screw tabs joining neighbouring modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConnectors {
    pub hole_diameter: f64,
    pub hole_tolerance: f64,
    pub wall_thickness: f64,
    pub chamfer_length: f64,
    pub chamfer_tolerance: f64,
}

impl Default for ModuleConnectors {
    fn default() -> Self {
        Self {
            hole_diameter: 3.0,
            hole_tolerance: 0.1,
            wall_thickness: 2.0,
            chamfer_length: 2.0,
            chamfer_tolerance: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LidGrid {
    /// Height of the lines running along X.
    pub horizontal_lines_height: f64,
    /// Height of the lines running along Y.
    pub vertical_lines_height: f64,
    /// Width of a line, i.e. the gap between two cells.
    pub gap: f64,
    pub color: Color,
}

impl LidGrid {
    pub fn max_line_height(&self) -> f64 {
        self.horizontal_lines_height.max(self.vertical_lines_height)
    }
}

impl Default for LidGrid {
    fn default() -> Self {
        Self {
            horizontal_lines_height: 5.0,
            vertical_lines_height: 3.0,
            gap: 0.6,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LidDiffuser {
    pub thickness: f64,
}

impl Default for LidDiffuser {
    fn default() -> Self {
        Self { thickness: 0.3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnclosureLayout {
    /// Number of modules along X and Y.
    pub layout: Dimension2D,
    /// Extra room above the panels, in mm.
    pub height_tolerance: f64,
    pub build_lid: bool,
    pub build_chassis: bool,
}

impl Default for EnclosureLayout {
    fn default() -> Self {
        Self {
            layout: Dimension2D::new(1.0, 1.0),
            height_tolerance: 0.1,
            build_lid: true,
            build_chassis: true,
        }
    }
}

/// All design parameters except the panel layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub chassis_borders: ChassisBorders,
    pub chassis_bottom: ChassisBottom,
    pub chassis_pillar: ChassisPillar,
    pub module_connectors: ModuleConnectors,
    pub lid_grid: LidGrid,
    pub lid_diffuser: LidDiffuser,
    pub enclosure: EnclosureLayout,
}

impl Parameters {
    /// Reject values no enclosure can be built from.
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("chassis_borders.thickness", self.chassis_borders.thickness),
            ("chassis_bottom.thickness", self.chassis_bottom.thickness),
            ("chassis_pillar.diameter", self.chassis_pillar.diameter),
            ("chassis_pillar.height", self.chassis_pillar.height),
            ("chassis_pillar.base_height", self.chassis_pillar.base_height),
            ("chassis_pillar.base_diameter", self.chassis_pillar.base_diameter),
            ("chassis_pillar.spacing", self.chassis_pillar.spacing),
            ("module_connectors.hole_diameter", self.module_connectors.hole_diameter),
            ("module_connectors.wall_thickness", self.module_connectors.wall_thickness),
            ("module_connectors.chamfer_length", self.module_connectors.chamfer_length),
            ("lid_grid.horizontal_lines_height", self.lid_grid.horizontal_lines_height),
            ("lid_grid.vertical_lines_height", self.lid_grid.vertical_lines_height),
            ("lid_grid.gap", self.lid_grid.gap),
            ("lid_diffuser.thickness", self.lid_diffuser.thickness),
            ("enclosure.layout.length", self.enclosure.layout.length),
            ("enclosure.layout.width", self.enclosure.layout.width),
        ];
        let non_negative = [
            ("chassis_borders.radius", self.chassis_borders.radius),
            ("chassis_borders.support_ledge_size", self.chassis_borders.support_ledge_size),
            ("module_connectors.hole_tolerance", self.module_connectors.hole_tolerance),
            ("module_connectors.chamfer_tolerance", self.module_connectors.chamfer_tolerance),
            ("enclosure.height_tolerance", self.enclosure.height_tolerance),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidParameter {
                    name,
                    value,
                    expected: "must be greater than zero",
                });
            }
        }
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::InvalidParameter {
                    name,
                    value,
                    expected: "must not be negative",
                });
            }
        }
        let connectors = &self.module_connectors;
        if 2.0 * connectors.chamfer_length >= self.chassis_pillar.height {
            return Err(EngineError::InvalidParameter {
                name: "module_connectors.chamfer_length",
                value: connectors.chamfer_length,
                expected: "must be less than half the pillar height",
            });
        }
        if connectors.chamfer_tolerance >= connectors.wall_thickness {
            return Err(EngineError::InvalidParameter {
                name: "module_connectors.chamfer_tolerance",
                value: connectors.chamfer_tolerance,
                expected: "must be less than the connector wall thickness",
            });
        }
        if !self.enclosure.layout.is_integral() {
            return Err(EngineError::InvalidParameter {
                name: "enclosure.layout",
                value: self.enclosure.layout.area(),
                expected: "must count whole modules",
            });
        }
        if !self.enclosure.build_lid && !self.enclosure.build_chassis {
            return Err(EngineError::NothingToBuild);
        }
        Ok(())
    }
}

/// Everything needed to build an enclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct EnclosureParameters {
    pub led_matrix: CompositeLedMatrix,
    pub parameters: Parameters,
}

impl EnclosureParameters {
    pub fn new(led_matrix: CompositeLedMatrix, parameters: Parameters) -> Self {
        Self {
            led_matrix,
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let parameters = Parameters::default();
        parameters.validate().unwrap();
        assert_eq!(parameters.lid_grid.max_line_height(), 5.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let parameters: Parameters = toml::from_str(
            r##"
            [chassis_pillar]
            spacing = 20.0

            [lid_grid]
            color = "#202020"

            [enclosure]
            layout = "2x1"
            "##,
        )
        .unwrap();

        assert_eq!(parameters.chassis_pillar.spacing, 20.0);
        assert_eq!(parameters.chassis_pillar.diameter, 3.0);
        assert_eq!(parameters.lid_grid.color, Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(parameters.enclosure.layout, Dimension2D::new(2.0, 1.0));
        assert!(parameters.enclosure.build_lid);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Parameters, _> = toml::from_str("[chassis_pillar]\nradius = 2.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_names_the_offending_value() {
        let mut parameters = Parameters::default();
        parameters.chassis_pillar.spacing = 0.0;
        let err = parameters.validate().unwrap_err();
        assert!(err.to_string().contains("chassis_pillar.spacing"));

        let mut parameters = Parameters::default();
        parameters.enclosure.layout = Dimension2D::new(1.5, 1.0);
        assert!(parameters.validate().is_err());

        let mut parameters = Parameters::default();
        parameters.module_connectors.chamfer_length = 5.0;
        let err = parameters.validate().unwrap_err();
        assert!(err.to_string().contains("module_connectors.chamfer_length"));

        let mut parameters = Parameters::default();
        parameters.enclosure.build_lid = false;
        parameters.enclosure.build_chassis = false;
        assert!(matches!(parameters.validate(), Err(EngineError::NothingToBuild)));
    }
}

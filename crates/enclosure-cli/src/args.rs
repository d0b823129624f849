//! Command line flags. Every design parameter is optional so that values
//! from a configuration file, or the defaults, show through.

use std::path::PathBuf;

use clap::Parser;
use enclosure_engine::{
    ChassisBorders, ChassisBottom, ChassisPillar, EnclosureLayout, LidDiffuser, LidGrid,
    ModuleConnectors,
};
use enclosure_types::{Color, Dimension2D};

#[derive(Debug, Parser)]
#[command(name = "led-matrix-enclosure", version)]
#[command(about = "Generate printable enclosures for LED matrix panels")]
pub struct Args {
    /// LED matrix rows, back row first: comma-separated panel profiles,
    /// e.g. `16x16,16x16 32x8`
    #[arg(value_name = "LAYOUT_ROW")]
    pub rows: Vec<String>,

    /// TOML file with parameter sections, e.g. `[chassis_pillar]`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug messages and the enclosure topology
    #[arg(short = 'D', long)]
    pub debug: bool,

    #[command(flatten)]
    pub borders: BorderArgs,

    #[command(flatten)]
    pub bottom: BottomArgs,

    #[command(flatten)]
    pub pillar: PillarArgs,

    #[command(flatten)]
    pub connectors: ConnectorArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub diffuser: DiffuserArgs,

    #[command(flatten)]
    pub enclosure: EnclosureArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Chassis borders")]
pub struct BorderArgs {
    /// Radius of the rounded outer corners, in mm
    #[arg(long = "border-radius", value_name = "MM")]
    pub radius: Option<f64>,

    #[arg(id = "border_thickness", long = "border-thickness", value_name = "MM")]
    pub thickness: Option<f64>,

    /// Width of the ledge the panels rest on, in mm
    #[arg(long = "border-support-ledge-size", value_name = "MM")]
    pub support_ledge_size: Option<f64>,
}

impl BorderArgs {
    pub fn apply(&self, borders: &mut ChassisBorders) {
        set(&mut borders.radius, self.radius);
        set(&mut borders.thickness, self.thickness);
        set(&mut borders.support_ledge_size, self.support_ledge_size);
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Chassis bottom")]
pub struct BottomArgs {
    #[arg(id = "bottom_thickness", long = "bottom-thickness", value_name = "MM")]
    pub thickness: Option<f64>,
}

impl BottomArgs {
    pub fn apply(&self, bottom: &mut ChassisBottom) {
        set(&mut bottom.thickness, self.thickness);
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Chassis pillars")]
pub struct PillarArgs {
    #[arg(long = "pillar-diameter", value_name = "MM")]
    pub diameter: Option<f64>,

    #[arg(long = "pillar-height", value_name = "MM")]
    pub height: Option<f64>,

    #[arg(long = "pillar-base-height", value_name = "MM")]
    pub base_height: Option<f64>,

    #[arg(long = "pillar-base-diameter", value_name = "MM")]
    pub base_diameter: Option<f64>,

    /// Distance between pillars, a whole number of mm
    #[arg(long = "pillar-spacing", value_name = "MM")]
    pub spacing: Option<f64>,
}

impl PillarArgs {
    pub fn apply(&self, pillar: &mut ChassisPillar) {
        set(&mut pillar.diameter, self.diameter);
        set(&mut pillar.height, self.height);
        set(&mut pillar.base_height, self.base_height);
        set(&mut pillar.base_diameter, self.base_diameter);
        set(&mut pillar.spacing, self.spacing);
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Module connectors")]
pub struct ConnectorArgs {
    #[arg(long = "connector-hole-diameter", value_name = "MM")]
    pub hole_diameter: Option<f64>,

    #[arg(long = "connector-hole-tolerance", value_name = "MM")]
    pub hole_tolerance: Option<f64>,

    #[arg(long = "connector-wall-thickness", value_name = "MM")]
    pub wall_thickness: Option<f64>,

    #[arg(long = "connector-chamfer-length", value_name = "MM")]
    pub chamfer_length: Option<f64>,

    #[arg(long = "connector-chamfer-tolerance", value_name = "MM")]
    pub chamfer_tolerance: Option<f64>,
}

impl ConnectorArgs {
    pub fn apply(&self, connectors: &mut ModuleConnectors) {
        set(&mut connectors.hole_diameter, self.hole_diameter);
        set(&mut connectors.hole_tolerance, self.hole_tolerance);
        set(&mut connectors.wall_thickness, self.wall_thickness);
        set(&mut connectors.chamfer_length, self.chamfer_length);
        set(&mut connectors.chamfer_tolerance, self.chamfer_tolerance);
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Lid grid")]
pub struct GridArgs {
    #[arg(long = "grid-horizontal-lines-height", value_name = "MM")]
    pub horizontal_lines_height: Option<f64>,

    #[arg(long = "grid-vertical-lines-height", value_name = "MM")]
    pub vertical_lines_height: Option<f64>,

    /// Width of the grid lines, in mm
    #[arg(long = "grid-gap", value_name = "MM")]
    pub gap: Option<f64>,

    /// Color name or `#rrggbb`
    #[arg(long = "grid-color", value_name = "COLOR")]
    pub color: Option<Color>,
}

impl GridArgs {
    pub fn apply(&self, grid: &mut LidGrid) {
        set(&mut grid.horizontal_lines_height, self.horizontal_lines_height);
        set(&mut grid.vertical_lines_height, self.vertical_lines_height);
        set(&mut grid.gap, self.gap);
        set(&mut grid.color, self.color);
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Lid diffuser")]
pub struct DiffuserArgs {
    #[arg(id = "diffuser_thickness", long = "diffuser-thickness", value_name = "MM")]
    pub thickness: Option<f64>,
}

impl DiffuserArgs {
    pub fn apply(&self, diffuser: &mut LidDiffuser) {
        set(&mut diffuser.thickness, self.thickness);
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Enclosure")]
pub struct EnclosureArgs {
    /// Modules along X and Y, e.g. `2x1`
    #[arg(long = "enclosure-layout", value_name = "LxW")]
    pub layout: Option<Dimension2D>,

    /// Extra room above the panels, in mm
    #[arg(long = "enclosure-height-tolerance", value_name = "MM")]
    pub height_tolerance: Option<f64>,

    /// Only build the chassis
    #[arg(long, conflicts_with = "no_chassis")]
    pub no_lid: bool,

    /// Only build the lid
    #[arg(long)]
    pub no_chassis: bool,
}

impl EnclosureArgs {
    pub fn apply(&self, enclosure: &mut EnclosureLayout) {
        set(&mut enclosure.layout, self.layout);
        set(&mut enclosure.height_tolerance, self.height_tolerance);
        if self.no_lid {
            enclosure.build_lid = false;
        }
        if self.no_chassis {
            enclosure.build_chassis = false;
        }
    }
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Export")]
pub struct ExportArgs {
    /// Directory receiving the part files [default: build]
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Added to every file name, e.g. `enclosure.module-x0-y0.lid.NAME.step`
    #[arg(long, value_name = "NAME")]
    pub build_name: Option<String>,

    /// Build the enclosure without writing any file
    #[arg(long)]
    pub no_export: bool,

    /// Chordal tolerance of STL meshes, in mm [default: 0.05]
    #[arg(long, value_name = "MM")]
    pub stl_tolerance: Option<f64>,

    /// Write ASCII instead of binary STL
    #[arg(long)]
    pub ascii_stl: bool,

    /// Fail when a boolean operation cannot be completed
    #[arg(long)]
    pub strict: bool,
}

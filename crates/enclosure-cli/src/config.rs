//! Resolution of the settings: command line, then configuration file, then
//! built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use enclosure_engine::{
    ChassisBorders, ChassisBottom, ChassisPillar, EnclosureLayout, LidDiffuser, LidGrid,
    ModuleConnectors, Parameters,
};
use file_format::Exporter;
use serde::Deserialize;

use crate::args::{Args, ExportArgs};

/// Contents of a `--config` file.
///
/// ```toml
/// layout = ["16x16,16x16"]
///
/// [chassis_pillar]
/// spacing = 20
///
/// [export]
/// directory = "out"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// LED matrix rows, used when none are given on the command line.
    pub layout: Vec<String>,
    pub chassis_borders: ChassisBorders,
    pub chassis_bottom: ChassisBottom,
    pub chassis_pillar: ChassisPillar,
    pub module_connectors: ModuleConnectors,
    pub lid_grid: LidGrid,
    pub lid_diffuser: LidDiffuser,
    pub enclosure: EnclosureLayout,
    pub export: Exporter,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("invalid configuration file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rows: Vec<String>,
    pub parameters: Parameters,
    pub exporter: Exporter,
}

impl Settings {
    pub fn resolve(args: &Args, config: ConfigFile) -> Result<Self> {
        let rows = if args.rows.is_empty() {
            config.layout
        } else {
            args.rows.clone()
        };
        if rows.is_empty() {
            bail!("no LED matrix layout given, pass rows such as `16x16,16x16` or set `layout` in the configuration file");
        }

        let mut parameters = Parameters {
            chassis_borders: config.chassis_borders,
            chassis_bottom: config.chassis_bottom,
            chassis_pillar: config.chassis_pillar,
            module_connectors: config.module_connectors,
            lid_grid: config.lid_grid,
            lid_diffuser: config.lid_diffuser,
            enclosure: config.enclosure,
        };
        args.borders.apply(&mut parameters.chassis_borders);
        args.bottom.apply(&mut parameters.chassis_bottom);
        args.pillar.apply(&mut parameters.chassis_pillar);
        args.connectors.apply(&mut parameters.module_connectors);
        args.grid.apply(&mut parameters.lid_grid);
        args.diffuser.apply(&mut parameters.lid_diffuser);
        args.enclosure.apply(&mut parameters.enclosure);

        let mut exporter = config.export;
        apply_export(&args.export, &mut exporter);

        Ok(Self {
            rows,
            parameters,
            exporter,
        })
    }
}

fn apply_export(args: &ExportArgs, exporter: &mut Exporter) {
    if let Some(directory) = &args.build_dir {
        exporter.directory = directory.clone();
    }
    if let Some(name) = &args.build_name {
        exporter.name = Some(name.clone());
    }
    if let Some(tolerance) = args.stl_tolerance {
        exporter.stl_tolerance = tolerance;
    }
    if args.no_export {
        exporter.enabled = false;
    }
    if args.ascii_stl {
        exporter.ascii_stl = true;
    }
    if args.strict {
        exporter.strict = true;
    }
}

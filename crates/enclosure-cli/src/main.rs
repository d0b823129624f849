mod args;
mod config;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use enclosure_engine::{build_enclosure, CompositeLedMatrix, EnclosureParameters};
use file_format::{ExportFormat, Exporter};
use geometry_kernel::{Kernel, TruckKernel};
use modeling_ops::Part;
use tracing::{debug, info, Level};

use crate::args::Args;
use crate::config::{ConfigFile, Settings};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.debug);
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let settings = Settings::resolve(args, config)?;
    debug!(parameters = ?settings.parameters, exporter = ?settings.exporter, "resolved settings");

    let led_matrix =
        CompositeLedMatrix::parse(&settings.rows).context("invalid LED matrix layout")?;
    info!(
        rows = settings.rows.len(),
        shape = %led_matrix.shape(),
        dimensions = %led_matrix.dimensions(),
        "LED matrix"
    );

    let enclosure = EnclosureParameters::new(led_matrix, settings.parameters);
    let part = build_enclosure(&enclosure).context("cannot build the enclosure")?;
    if tracing::enabled!(Level::DEBUG) {
        debug!("enclosure topology:\n{}", part.topology());
    }

    let mut kernel = TruckKernel::new();
    export_modules(&mut kernel, &settings.exporter, &part)
}

/// `module:x=0,y=160` becomes `module-x0-y160`.
fn module_stem(label: &str) -> String {
    label.replace([':', ','], "-").replace('=', "")
}

/// Chassis as STL for printing, lid as STEP.
fn export_modules(kernel: &mut dyn Kernel, exporter: &Exporter, enclosure: &Part) -> Result<()> {
    for module in &enclosure.children {
        let stem = format!("{}.{}", enclosure.label, module_stem(&module.label));
        let parts = [("chassis", ExportFormat::Stl), ("lid", ExportFormat::Step)];

        for (label, format) in parts {
            let Ok(part) = module.child(label) else {
                continue;
            };
            let object = format!("{stem}.{label}");
            exporter
                .export(kernel, part, &object, format)
                .with_context(|| format!("cannot export {object}"))?;
        }
    }
    Ok(())
}

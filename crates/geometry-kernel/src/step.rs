//! STEP AP203 encoding through truck-stepio.

use truck_modeling::topology::{Shell, Solid};
use truck_stepio::out;

use crate::types::KernelError;

/// Encode `solids` as a single STEP document named `name`.
///
/// The solids' boundary shells are gathered into one solid so the document
/// carries one model.
pub fn encode_solids(solids: &[&Solid], name: &str) -> Result<String, KernelError> {
    if solids.is_empty() {
        return Err(KernelError::ExportFailed {
            reason: "nothing to export".to_string(),
        });
    }

    let shells: Vec<Shell> = solids
        .iter()
        .flat_map(|s| s.boundaries().iter().cloned())
        .collect();
    let merged = Solid::try_new(shells).map_err(|e| KernelError::ExportFailed {
        reason: format!("cannot gather shells: {e}"),
    })?;

    let compressed = merged.compress();
    let header = out::StepHeaderDescriptor {
        file_name: name.to_string(),
        ..Default::default()
    };
    Ok(out::CompleteStepDisplay::new(out::StepModel::from(&compressed), header).to_string())
}

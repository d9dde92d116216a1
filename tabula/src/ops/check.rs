//! Check operation - generation without writing.

use std::path::Path;

use eyre::Result;
use tabula_codegen::pipeline::Severity;
use tabula_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the full generation in memory and collects its diagnostics.
pub fn check(manifest: Manifest, config_path: &Path) -> Result<CheckReport> {
    let generated = super::generator(manifest)?.process()?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &generated.diagnostics {
        let msg = super::describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        file_count: generated.files.len(),
        errors,
        warnings,
        infos,
    })
}

//! Core operations.
//!
//! This module contains the business logic for tabula commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

pub use check::check;
pub use generate::{GenerateOptions, generate};

use eyre::{Context, Result};
use tabula_codegen_typescript::Generator;
use tabula_manifest::Manifest;
use tabula_schema::{SchemaProvider, SnapshotProvider};
use tracing::debug;

/// Load the schema snapshot named by the manifest and build a generator.
fn generator(manifest: Manifest) -> Result<Generator> {
    let provider = SnapshotProvider::new(&manifest.connection.snapshot);
    let snapshot = provider.load().wrap_err("Failed to load schema")?;
    debug!(
        path = %provider.path().display(),
        entities = snapshot.graph.len(),
        "loaded schema snapshot"
    );
    Ok(Generator::new(snapshot, manifest))
}

/// Diagnostic text with its location on a second line.
fn describe(diagnostic: &tabula_codegen::pipeline::Diagnostic) -> String {
    match &diagnostic.location {
        Some(location) => format!("{}\n  --> {}", diagnostic.message, location),
        None => diagnostic.message.clone(),
    }
}

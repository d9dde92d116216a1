//! Schema providers.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Entity, QualifiedName, SchemaGraph};

/// Source of the entity graph.
///
/// Live introspection lives outside Tabula; anything able to produce a
/// [`Snapshot`] can drive code generation.
pub trait SchemaProvider {
    /// Load the full snapshot.
    fn load(&self) -> Result<Snapshot>;
}

/// A loaded schema: the entity graph plus the rows of enum-like tables.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub graph: SchemaGraph,
    /// Values of tables tagged `@enum`, keyed by table name.
    pub enum_values: IndexMap<QualifiedName, Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    entities: Vec<Entity>,
    #[serde(default)]
    enum_values: IndexMap<QualifiedName, Vec<String>>,
}

impl Snapshot {
    /// Parse a JSON snapshot document.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawSnapshot =
            serde_json::from_str(content).wrap_err("invalid schema snapshot")?;
        Ok(Self {
            graph: SchemaGraph::new(raw.entities),
            enum_values: raw.enum_values,
        })
    }
}

/// Reads a JSON snapshot produced by an external introspection step.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    path: PathBuf,
}

impl SnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaProvider for SnapshotProvider {
    fn load(&self) -> Result<Snapshot> {
        let content = std::fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("failed to read snapshot '{}'", self.path.display()))?;
        Snapshot::from_json(&content)
            .wrap_err_with(|| format!("failed to load snapshot '{}'", self.path.display()))
    }
}

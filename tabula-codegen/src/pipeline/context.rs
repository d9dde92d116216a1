//! Inputs shared by generators and hooks, and the result of a run.

use tabula_manifest::GenerateConfig;
use tabula_schema::{Entity, SchemaGraph};

use super::diagnostic::{Diagnostic, Severity};
use crate::{ir::Output, metadata::MetadataComposer, resolver::TypeResolver, type_map::TypeMap};

/// Read-only inputs of a generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub graph: &'a SchemaGraph,
    pub config: &'a GenerateConfig,
    pub metadata: &'a MetadataComposer,
    pub type_map: &'a TypeMap,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        graph: &'a SchemaGraph,
        config: &'a GenerateConfig,
        metadata: &'a MetadataComposer,
        type_map: &'a TypeMap,
    ) -> Self {
        Self {
            graph,
            config,
            metadata,
            type_map,
        }
    }

    /// A resolver over the same graph, type map and metadata.
    pub fn resolver(&self) -> TypeResolver<'a> {
        TypeResolver::new(self.graph, self.type_map, self.metadata, self.config)
    }

    /// Entities in the configured schemas, in snapshot order.
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> {
        self.graph.entities_in(&self.config.schemas)
    }
}

/// Declarations and diagnostics produced by a pipeline run.
#[derive(Debug, Default)]
pub struct GenerationResult {
    pub output: Output,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}

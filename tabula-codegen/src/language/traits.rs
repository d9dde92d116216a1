//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

use crate::pipeline::Diagnostic;

/// Trait for language-specific code generators.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "ts")
    fn file_extension(&self) -> &str;

    /// Render every file without writing to disk
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files whose content changed, relative to the output directory
    pub written: Vec<String>,
    /// Files that already had the generated content
    pub unchanged: Vec<String>,
    /// Non-fatal problems found while generating
    pub diagnostics: Vec<Diagnostic>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory, with extension
    pub path: String,
    /// File content
    pub content: String,
}

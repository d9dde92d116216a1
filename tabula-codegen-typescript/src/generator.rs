//! TypeScript declaration generator.

use std::path::Path;

use eyre::Result;
use tabula_codegen::{
    CodegenError, TypeMap,
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    metadata::MetadataComposer,
    pipeline::{Diagnostic, GenerationContext, Pipeline, PostRenderHook, PreRenderHook},
};
use tabula_core::{File, WriteResult};
use tabula_manifest::Manifest;
use tabula_schema::Snapshot;
use tracing::{debug, info};

use crate::{
    hooks::{EnumTables, IndexFile, MarkAsGenerated},
    naming::TS_NAMING,
    renderer,
    type_map::postgres_type_map,
};

/// Rendered files and the diagnostics collected while producing them.
#[derive(Debug, Default)]
pub struct Generated {
    pub files: Vec<File>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generates TypeScript declarations for a schema snapshot.
///
/// Built-in hooks are enabled from the manifest's `[hooks]` table; further
/// hooks run after them in the order they are added.
pub struct Generator {
    snapshot: Snapshot,
    manifest: Manifest,
    metadata: MetadataComposer,
    type_map: TypeMap,
    pipeline: Pipeline,
}

impl Generator {
    pub fn new(snapshot: Snapshot, manifest: Manifest) -> Self {
        let type_map = postgres_type_map().with_overrides(&manifest.type_map);

        let mut pipeline = Pipeline::new();
        if manifest.hooks.enum_tables {
            pipeline = pipeline.pre_render(EnumTables::new(snapshot.enum_values.clone()));
        }
        if manifest.hooks.index_file {
            pipeline = pipeline.pre_render(IndexFile);
        }
        if manifest.hooks.banner {
            pipeline = pipeline.post_render(MarkAsGenerated);
        }

        Self {
            snapshot,
            manifest,
            metadata: MetadataComposer::new().with_naming(TS_NAMING),
            type_map,
            pipeline,
        }
    }

    /// Replace the metadata composer (custom names, comments, paths).
    ///
    /// TypeScript naming applies unless the composer carries its own.
    pub fn with_metadata(mut self, metadata: MetadataComposer) -> Self {
        self.metadata = match metadata.naming() {
            Some(_) => metadata,
            None => metadata.with_naming(TS_NAMING),
        };
        self
    }

    pub fn pre_render(mut self, hook: impl PreRenderHook + 'static) -> Self {
        self.pipeline = self.pipeline.pre_render(hook);
        self
    }

    pub fn post_render(mut self, hook: impl PostRenderHook + 'static) -> Self {
        self.pipeline = self.pipeline.post_render(hook);
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Run generators and hooks and render every output path.
    ///
    /// Fails as a whole: an import conflict, an invalid path or a failing
    /// hook yields no files.
    pub fn process(&self) -> Result<Generated> {
        let ctx = GenerationContext::new(
            &self.snapshot.graph,
            &self.manifest.generate,
            &self.metadata,
            &self.type_map,
        );
        let result = self.pipeline.run(&ctx)?;
        let extension = &self.manifest.output.extension;

        let mut files = Vec::with_capacity(result.output.len());
        for (path, declarations) in result.output.iter() {
            validate_path(path)?;
            let lines = renderer::render(declarations, path)?;
            let lines = self.pipeline.hooks().run_post_render(path, lines)?;
            debug!(path, declarations = declarations.len(), "rendered file");
            files.push(File::from_lines(path, extension, &lines));
        }

        info!(
            files = files.len(),
            warnings = result.warning_count(),
            "generation finished"
        );
        Ok(Generated {
            files,
            diagnostics: result.diagnostics,
        })
    }
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &str {
        &self.manifest.output.extension
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        Ok(self
            .process()?
            .files
            .into_iter()
            .map(|file| PreviewFile {
                path: file.path().to_string_lossy().into_owned(),
                content: file.content().to_string(),
            })
            .collect())
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let generated = self.process()?;
        let mut result = GenerateResult {
            diagnostics: generated.diagnostics,
            ..GenerateResult::default()
        };

        for file in &generated.files {
            let path = file.path().to_string_lossy().into_owned();
            match file.write(output_dir)? {
                WriteResult::Written => result.written.push(path),
                WriteResult::Unchanged => result.unchanged.push(path),
            }
        }
        Ok(result)
    }
}

/// Output paths are relative, `/`-separated and stay below the output root.
fn validate_path(path: &str) -> Result<(), CodegenError> {
    let reason = if path.is_empty() {
        Some("path is empty")
    } else if path.starts_with('/') || path.contains('\\') {
        Some("path must be relative and use '/' separators")
    } else if path.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        Some("path segments must be non-empty names")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CodegenError::InvalidOutputPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

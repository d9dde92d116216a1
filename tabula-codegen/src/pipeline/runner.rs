//! Pipeline orchestrator.

use std::collections::HashSet;

use eyre::Result;

use super::{Diagnostic, EntityGenerator, GenerationContext, GenerationResult, Hooks};
use crate::{
    generators::{CompositeGenerator, DomainGenerator, EnumGenerator, RangeGenerator, RoutineGenerator},
    ir::{ExportAs, Output},
};

/// Runs entity generators into one [`Output`], then the pre-render hooks.
///
/// Post-render hooks are kept here too but run by the language renderer,
/// once per rendered file.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().pre_render(IndexFile::new());
/// let result = pipeline.run(&ctx)?;
///
/// for diag in result.warnings() {
///     eprintln!("{}", diag);
/// }
/// ```
pub struct Pipeline {
    generators: Vec<Box<dyn EntityGenerator>>,
    hooks: Hooks,
}

impl Pipeline {
    /// A pipeline with the built-in generators and no hooks.
    pub fn new() -> Self {
        Self::empty()
            .generator(CompositeGenerator)
            .generator(EnumGenerator)
            .generator(DomainGenerator)
            .generator(RangeGenerator)
            .generator(RoutineGenerator)
    }

    /// A pipeline with no generators at all.
    pub fn empty() -> Self {
        Self {
            generators: Vec::new(),
            hooks: Hooks::new(),
        }
    }

    pub fn generator(mut self, generator: impl EntityGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn pre_render(mut self, hook: impl super::PreRenderHook + 'static) -> Self {
        self.hooks = self.hooks.pre_render(hook);
        self
    }

    pub fn post_render(mut self, hook: impl super::PostRenderHook + 'static) -> Self {
        self.hooks = self.hooks.post_render(hook);
        self
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn generator_names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// Run every generator, then the pre-render hooks.
    ///
    /// Paths that would not compile (a name declared twice, two default
    /// exports) are reported as error diagnostics; the run itself succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first fatal generator or hook error.
    pub fn run(&self, ctx: &GenerationContext<'_>) -> Result<GenerationResult> {
        let mut output = Output::new();
        let mut diagnostics = Vec::new();

        for generator in &self.generators {
            tracing::debug!(generator = generator.name(), "running generator");
            generator.generate(ctx, &mut output, &mut diagnostics)?;
        }

        let output = self.hooks.run_pre_render(output, ctx)?;
        check_declarations(&output, &mut diagnostics);
        tracing::debug!(
            files = output.len(),
            declarations = output.declaration_count(),
            "generation finished"
        );

        Ok(GenerationResult {
            output,
            diagnostics,
        })
    }
}

/// Report names declared twice and repeated default exports, per path.
fn check_declarations(output: &Output, diagnostics: &mut Vec<Diagnostic>) {
    for (path, declarations) in output.iter() {
        let mut seen = HashSet::new();
        let mut default_export: Option<&str> = None;

        for declaration in declarations {
            let Some(name) = declaration.name() else {
                continue;
            };
            if !seen.insert(name) {
                diagnostics.push(
                    Diagnostic::error("validate", format!("duplicate declaration '{}'", name))
                        .at(path),
                );
            }
            if declaration.export_as() == Some(ExportAs::Default) {
                match default_export {
                    Some(first) if first != name => diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "'{}' is a second default export (conflicts with '{}')",
                                name, first
                            ),
                        )
                        .at(path),
                    ),
                    Some(_) => {}
                    None => default_export = Some(name),
                }
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("generators", &self.generator_names())
            .field("hooks", &self.hooks)
            .finish()
    }
}

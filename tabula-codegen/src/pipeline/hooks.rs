//! Pre-render and post-render hook chains.

use eyre::Result;

use super::GenerationContext;
use crate::ir::Output;

/// A structural transformation of the whole output before rendering.
///
/// Hooks may add, remove or replace declarations and paths.
pub trait PreRenderHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, output: Output, ctx: &GenerationContext<'_>) -> Result<Output>;
}

/// A textual transformation of one rendered file.
pub trait PostRenderHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, path: &str, lines: Vec<String>) -> Result<Vec<String>>;
}

/// Ordered hook lists, folded left to right.
#[derive(Default)]
pub struct Hooks {
    pre_render: Vec<Box<dyn PreRenderHook>>,
    post_render: Vec<Box<dyn PostRenderHook>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_render(mut self, hook: impl PreRenderHook + 'static) -> Self {
        self.pre_render.push(Box::new(hook));
        self
    }

    pub fn post_render(mut self, hook: impl PostRenderHook + 'static) -> Self {
        self.post_render.push(Box::new(hook));
        self
    }

    pub fn pre_render_names(&self) -> Vec<&'static str> {
        self.pre_render.iter().map(|h| h.name()).collect()
    }

    pub fn post_render_names(&self) -> Vec<&'static str> {
        self.post_render.iter().map(|h| h.name()).collect()
    }

    /// Run every pre-render hook in order. The first error aborts the chain.
    pub fn run_pre_render(&self, output: Output, ctx: &GenerationContext<'_>) -> Result<Output> {
        self.pre_render.iter().try_fold(output, |output, hook| {
            tracing::debug!(hook = hook.name(), "running pre-render hook");
            hook.apply(output, ctx)
        })
    }

    /// Run every post-render hook in order on one file.
    pub fn run_post_render(&self, path: &str, lines: Vec<String>) -> Result<Vec<String>> {
        self.post_render.iter().try_fold(lines, |lines, hook| {
            tracing::debug!(hook = hook.name(), path, "running post-render hook");
            hook.apply(path, lines)
        })
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("pre_render", &self.pre_render_names())
            .field("post_render", &self.post_render_names())
            .finish()
    }
}

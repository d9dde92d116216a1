//! Entity generator trait.

use eyre::Result;

use super::{Diagnostic, GenerationContext};
use crate::ir::Output;

/// Produces declarations for one family of entities.
///
/// Generators run one at a time against a shared [`Output`]. Non-fatal
/// problems go to `diagnostics`; an `Err` aborts the run.
pub trait EntityGenerator: Send + Sync {
    /// The name of this generator (used in diagnostics and logs).
    fn name(&self) -> &'static str;

    /// Emit declarations for every matching entity in `ctx`.
    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        output: &mut Output,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()>;
}

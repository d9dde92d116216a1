//! Generation pipeline.
//!
//! Entity generators fill one [`Output`](crate::ir::Output); pre-render
//! hooks then transform it as a whole. Post-render hooks run later, once per
//! rendered file.
//!
//! ```text
//! SchemaGraph → EntityGenerator* → Output → PreRenderHook* → render → PostRenderHook*
//! ```

mod context;
mod diagnostic;
mod hooks;
mod phase;
mod runner;

pub use context::{GenerationContext, GenerationResult};
pub use diagnostic::{Diagnostic, Severity};
pub use hooks::{Hooks, PostRenderHook, PreRenderHook};
pub use phase::EntityGenerator;
pub use runner::Pipeline;

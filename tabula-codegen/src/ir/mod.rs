//! Intermediate representation between entity generators and the renderer.

mod declaration;
mod output;
mod types;

pub use declaration::{Declaration, ExportAs, InterfaceField};
pub use output::Output;
pub use types::{ImportRecord, ImportSource, TypeExpression, array_type};

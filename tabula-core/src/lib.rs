//! Core utilities and types for the Tabula generator.
//!
//! This crate provides the string helpers and the generated-file sink used
//! across the Tabula workspace.

mod file;
mod utils;

// File operations
pub use file::{File, WriteResult};
// String utilities
pub use utils::{is_identifier, to_pascal_case};

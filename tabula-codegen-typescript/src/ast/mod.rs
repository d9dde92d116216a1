//! TypeScript AST builders for interfaces, imports and exports.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which can then be rendered via CodeBuilder.

mod exports;
mod imports;
mod interface;

pub use exports::Export;
pub use imports::{Import, ImportMember};
pub use interface::{Interface, InterfaceField};

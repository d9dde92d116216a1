//! tabula.toml parsing and validation.
//!
//! The manifest tells Tabula where the schema snapshot lives, where generated
//! files go, and how generation is tuned (schemas, enum style, type map,
//! built-in hooks). Errors are `miette` diagnostics pointing into the file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{
    ConnectionConfig, EnumStyle, GenerateConfig, HooksConfig, Manifest, OutputConfig,
    TypeMapEntry,
};

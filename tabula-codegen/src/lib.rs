//! Language-agnostic core of the Tabula generator.
//!
//! This crate turns a [`SchemaGraph`](tabula_schema::SchemaGraph) into
//! declaration IR grouped by output path. Target-language crates (e.g.
//! `tabula-codegen-typescript`) render that IR to text.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`ir`] - Declarations, type expressions, import records and the output map
//! - [`metadata`] - Names, comments and paths with user overrides
//! - [`resolver`] - Property → type expression resolution
//! - [`generators`] - Built-in entity generators
//! - [`pipeline`] - Generator/hook orchestration and diagnostics
//! - [`language`] - Traits for target-language generators

pub mod builder;
pub mod generators;
pub mod ir;
pub mod language;
pub mod metadata;
pub mod pipeline;
pub mod resolver;

mod error;
mod type_map;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use error::CodegenError;
pub use type_map::TypeMap;

//! TypeScript target for the Tabula generator.
//!
//! Renders the declaration IR produced by `tabula-codegen` into `.ts`
//! files: one file per output path, imports collected per file, built-in
//! hooks for generated banners, index files and enum tables.
//!
//! # Usage
//!
//! ```ignore
//! use tabula_codegen_typescript::{Generator, LanguageCodegen};
//! use tabula_manifest::Manifest;
//! use tabula_schema::{SchemaProvider, SnapshotProvider};
//! use std::path::Path;
//!
//! let manifest = Manifest::from_file("tabula.toml")?;
//! let snapshot = SnapshotProvider::new(&manifest.connection.snapshot).load()?;
//! let generator = Generator::new(snapshot, manifest);
//!
//! // Preview files without writing
//! let files = generator.preview()?;
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("src/models"))?;
//! ```

mod generator;
mod import_generator;
mod naming;
mod renderer;
mod type_map;

pub mod ast;
pub mod hooks;

pub use generator::{Generated, Generator};
pub use import_generator::{ImportGenerator, relative_location};
pub use naming::TS_NAMING;
pub use renderer::render;
pub use tabula_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use type_map::postgres_type_map;

//! Fatal code generation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    /// Two different default bindings requested from one module.
    #[error(
        "conflicting default imports from '{location}': '{existing}' and '{requested}'"
    )]
    ConflictingDefaultImport {
        location: String,
        existing: String,
        requested: String,
    },

    /// A table tagged `@enum` with no rows in the value source.
    #[error("no enum values for table '{entity}'")]
    MissingEnumValues { entity: String },

    /// An output path that would escape the output directory.
    #[error("invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: String, reason: &'static str },
}

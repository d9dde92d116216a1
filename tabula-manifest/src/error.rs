use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a missing-section error.
    pub fn missing_error(&self, section: &'static str, field: &'static str) -> Box<Error> {
        Box::new(Error::Missing {
            src: self.named_source(),
            section,
            field,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid type-map key error.
    pub fn type_map_key_error(&self, key: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::InvalidTypeMapKey {
            src: self.named_source(),
            span,
            key: key.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a tabula.toml next to your schema snapshot"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tabula.toml")]
    #[diagnostic(code(tabula::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required setting '{section}.{field}'")]
    #[diagnostic(
        code(tabula::missing_setting),
        help("add a [{section}] table with a '{field}' entry")
    )]
    Missing {
        #[source_code]
        src: NamedSource<String>,
        section: &'static str,
        field: &'static str,
    },

    #[error("invalid type-map key '{key}'")]
    #[diagnostic(
        code(tabula::invalid_type_map_key),
        help("type-map keys are fully-qualified type names, e.g. \"pg_catalog.int8\"")
    )]
    InvalidTypeMapKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected 'schema.type'")]
        span: Option<SourceSpan>,
        key: String,
    },

    #[error("{message}")]
    #[diagnostic(code(tabula::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

//! Checks that run after the manifest has been deserialized.

use miette::SourceSpan;
use tabula_schema::QualifiedName;

use super::Manifest;
use crate::{Result, error::SourceContext};

/// Validate settings serde cannot express.
pub(super) fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let extension = &manifest.output.extension;
    if extension.is_empty() || extension.starts_with('.') {
        return Err(ctx.validation_error(
            format!("output extension must be non-empty and have no leading dot, got '{extension}'"),
            find_value_span(ctx.src(), "extension", extension),
        ));
    }

    for schema in &manifest.generate.schemas {
        if schema.trim().is_empty() {
            return Err(ctx.validation_error(
                "schema names in 'generate.schemas' cannot be empty",
                None,
            ));
        }
    }

    for key in manifest.type_map.keys() {
        if key.parse::<QualifiedName>().is_err() {
            return Err(ctx.type_map_key_error(key, find_key_span(ctx.src(), key)));
        }
    }

    Ok(())
}

/// Find the span of a (possibly quoted) table key in the TOML source.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{key}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, key.len())));
        }
    }

    // Bare keys: must start a line.
    src.lines()
        .scan(0usize, |offset, line| {
            let start = *offset;
            *offset += line.len() + 1;
            Some((start, line))
        })
        .find_map(|(start, line)| {
            let trimmed = line.trim_start();
            let rest = trimmed.strip_prefix(key)?;
            rest.trim_start().starts_with('=').then(|| {
                let indent = line.len() - trimmed.len();
                SourceSpan::from((start + indent, key.len()))
            })
        })
}

/// Find the span of `value` in a `key = "value"` assignment.
pub(crate) fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        for sep in ["=", " = "] {
            let pattern = format!("{key}{sep}{quote}{value}{quote}");
            if let Some(pos) = src.find(&pattern) {
                let start = pos + key.len() + sep.len() + 1;
                return Some(SourceSpan::from((start, value.len())));
            }
        }
    }
    None
}

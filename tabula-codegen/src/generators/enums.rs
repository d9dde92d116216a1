//! Enum types.

use eyre::Result;
use tabula_manifest::EnumStyle;
use tabula_schema::EntityKind;
use tracing::debug;

use crate::{
    ir::{Declaration, ExportAs, Output},
    metadata::Role,
    pipeline::{Diagnostic, EntityGenerator, GenerationContext},
};

/// Emits a literal union or a runtime `enum` per enum type.
///
/// Enums carrying an `@type` tag are declared elsewhere and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumGenerator;

impl EntityGenerator for EnumGenerator {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        output: &mut Output,
        _diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        for entity in ctx.entities() {
            let EntityKind::Enum { values } = &entity.kind else {
                continue;
            };
            if entity.tagged_comment().has_tag("type") {
                debug!(entity = %entity.qualified_name(), "enum overridden, skipping");
                continue;
            }

            let meta = ctx.metadata.entity(entity, Role::Selector);
            let declaration = match ctx.config.enum_style {
                EnumStyle::LiteralUnion => Declaration::TypeAlias {
                    name: meta.name,
                    comment: meta.comment,
                    export_as: ExportAs::Default,
                    type_definition: literal_union(values),
                    imports: Vec::new(),
                },
                EnumStyle::Enum => Declaration::Enum {
                    name: meta.name,
                    comment: meta.comment,
                    export_as: ExportAs::Default,
                    values: values.clone(),
                },
            };
            output.push(meta.path, declaration);
        }
        Ok(())
    }
}

/// `'a' | 'b'`, or `never` when there are no values.
pub fn literal_union(values: &[String]) -> String {
    if values.is_empty() {
        return "never".to_string();
    }
    values
        .iter()
        .map(|v| string_literal(v))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// A single-quoted string literal.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

//! Domains and ranges: aliases of their inner type.

use eyre::Result;
use tabula_schema::{Entity, EntityKind, TypeDescriptor};
use tracing::debug;

use crate::{
    ir::{Declaration, ExportAs, Output, array_type},
    metadata::Role,
    pipeline::{Diagnostic, EntityGenerator, GenerationContext},
};

/// Emits `type Name = Inner;` for every domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainGenerator;

/// Emits `type Name = Inner;` for every range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeGenerator;

impl EntityGenerator for DomainGenerator {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        output: &mut Output,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        generate_aliases(ctx, output, diagnostics, |entity| match &entity.kind {
            EntityKind::Domain { inner } => Some(inner),
            _ => None,
        });
        Ok(())
    }
}

impl EntityGenerator for RangeGenerator {
    fn name(&self) -> &'static str {
        "range"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        output: &mut Output,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        generate_aliases(ctx, output, diagnostics, |entity| match &entity.kind {
            EntityKind::Range { inner } => Some(inner),
            _ => None,
        });
        Ok(())
    }
}

fn generate_aliases(
    ctx: &GenerationContext<'_>,
    output: &mut Output,
    diagnostics: &mut Vec<Diagnostic>,
    inner_of: impl Fn(&Entity) -> Option<&TypeDescriptor>,
) {
    let resolver = ctx.resolver();
    for entity in ctx.entities() {
        let Some(inner) = inner_of(entity) else {
            continue;
        };
        if entity.tagged_comment().has_tag("type") {
            debug!(entity = %entity.qualified_name(), "overridden, skipping");
            continue;
        }

        let ty = resolver.resolve_type(entity, inner, diagnostics);
        let meta = ctx.metadata.entity(entity, Role::Selector);
        output.push(
            meta.path,
            Declaration::TypeAlias {
                name: meta.name,
                comment: meta.comment,
                export_as: ExportAs::Default,
                type_definition: array_type(ty.name(), inner.innermost().1),
                imports: ty.imports().to_vec(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use tabula_manifest::GenerateConfig;
    use tabula_schema::SchemaGraph;

    use super::*;
    use crate::{ir::TypeExpression, metadata::MetadataComposer, type_map::TypeMap};

    fn run(generator: &dyn EntityGenerator, entities: Vec<Entity>) -> (Output, Vec<Diagnostic>) {
        let graph = SchemaGraph::new(entities);
        let config = GenerateConfig::default();
        let metadata = MetadataComposer::new();
        let type_map: TypeMap = [
            ("pg_catalog.text", TypeExpression::builtin("string")),
            ("pg_catalog.tstzrange", TypeExpression::builtin("string")),
        ]
        .into_iter()
        .collect();
        let ctx = GenerationContext::new(&graph, &config, &metadata, &type_map);
        let mut output = Output::new();
        let mut diagnostics = Vec::new();
        generator
            .generate(&ctx, &mut output, &mut diagnostics)
            .unwrap();
        (output, diagnostics)
    }

    fn definition(output: &Output, path: &str, name: &str) -> String {
        match output.find(path, name) {
            Some(Declaration::TypeAlias {
                type_definition, ..
            }) => type_definition.clone(),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_domain_alias() {
        let email = Entity::new(
            "public",
            "email_address",
            EntityKind::Domain {
                inner: TypeDescriptor::base("pg_catalog.text"),
            },
        );
        let (output, diagnostics) = run(&DomainGenerator, vec![email]);
        assert!(diagnostics.is_empty());
        assert_eq!(definition(&output, "public/EmailAddress", "EmailAddress"), "string");
    }

    #[test]
    fn test_array_domain() {
        let tags = Entity::new(
            "public",
            "tag_list",
            EntityKind::Domain {
                inner: TypeDescriptor::array_of(TypeDescriptor::base("pg_catalog.text")),
            },
        );
        let (output, _) = run(&DomainGenerator, vec![tags]);
        assert_eq!(definition(&output, "public/TagList", "TagList"), "string[]");
    }

    #[test]
    fn test_range_alias_and_domain_generator_ignores_ranges() {
        let period = Entity::new(
            "public",
            "period",
            EntityKind::Range {
                inner: TypeDescriptor::base("pg_catalog.tstzrange"),
            },
        );
        let (output, _) = run(&DomainGenerator, vec![period.clone()]);
        assert!(output.is_empty());

        let (output, _) = run(&RangeGenerator, vec![period]);
        assert_eq!(definition(&output, "public/Period", "Period"), "string");
    }

    #[test]
    fn test_overridden_domain_is_skipped() {
        let email = Entity::new(
            "public",
            "email_address",
            EntityKind::Domain {
                inner: TypeDescriptor::base("pg_catalog.text"),
            },
        )
        .with_comment("@type:Email @from:@app/email");
        let (output, _) = run(&DomainGenerator, vec![email]);
        assert!(output.is_empty());
    }

    #[test]
    fn test_unknown_inner_type_warns() {
        let weird = Entity::new(
            "public",
            "weird",
            EntityKind::Domain {
                inner: TypeDescriptor::base("pg_catalog.money"),
            },
        );
        let (output, diagnostics) = run(&DomainGenerator, vec![weird]);
        assert_eq!(definition(&output, "public/Weird", "Weird"), "unknown");
        assert_eq!(diagnostics.len(), 1);
    }
}

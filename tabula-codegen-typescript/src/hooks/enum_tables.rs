use eyre::Result;
use indexmap::IndexMap;
use tabula_codegen::{
    CodegenError,
    generators::literal_union,
    ir::{Declaration, Output},
    metadata::Role,
    pipeline::{GenerationContext, PreRenderHook},
};
use tabula_schema::{QualifiedName, Snapshot};
use tracing::debug;

/// Where the rows of `@enum` tables come from.
pub trait EnumValueSource: Send + Sync {
    fn values(&self, table: &QualifiedName) -> Option<&[String]>;
}

impl EnumValueSource for IndexMap<QualifiedName, Vec<String>> {
    fn values(&self, table: &QualifiedName) -> Option<&[String]> {
        self.get(table).map(Vec::as_slice)
    }
}

impl EnumValueSource for Snapshot {
    fn values(&self, table: &QualifiedName) -> Option<&[String]> {
        EnumValueSource::values(&self.enum_values, table)
    }
}

/// Rewrites the identifier type of every table tagged `@enum` into a
/// literal union of the table's rows.
///
/// Columns referencing the table resolve to its identifier type, so they
/// see the union as well.
#[derive(Debug, Clone)]
pub struct EnumTables<S> {
    source: S,
}

impl<S: EnumValueSource> EnumTables<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: EnumValueSource> PreRenderHook for EnumTables<S> {
    fn name(&self) -> &'static str {
        "enum-tables"
    }

    fn apply(&self, mut output: Output, ctx: &GenerationContext<'_>) -> Result<Output> {
        let resolver = ctx.resolver();

        for entity in ctx.entities() {
            if !entity.is_table() || !entity.tagged_comment().has_tag("enum") {
                continue;
            }

            let name = entity.qualified_name();
            let values = self
                .source
                .values(&name)
                .ok_or_else(|| CodegenError::MissingEnumValues {
                    entity: name.to_string(),
                })?;

            let mut diagnostics = Vec::new();
            let Some((_, identifier)) = resolver.identifier(entity, &mut diagnostics) else {
                debug!(entity = %name, "enum table has no identifier type");
                continue;
            };

            let path = ctx.metadata.entity(entity, Role::Selector).path;
            if let Some(Declaration::TypeAlias {
                type_definition,
                imports,
                ..
            }) = output.find_mut(&path, &identifier.name)
            {
                debug!(entity = %name, values = values.len(), "rewriting enum table identifier");
                *type_definition = literal_union(values);
                imports.clear();
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use tabula_codegen::{TypeMap, metadata::MetadataComposer, pipeline::Pipeline};
    use tabula_manifest::GenerateConfig;
    use tabula_schema::{Entity, Property, PropertyRef, SchemaGraph, TypeDescriptor};

    use super::*;

    fn graph() -> SchemaGraph {
        SchemaGraph::new([
            Entity::table(
                "public",
                "status",
                vec![Property::new("value", TypeDescriptor::base("pg_catalog.text")).primary_key()],
            )
            .with_comment("@enum"),
            Entity::table(
                "public",
                "tickets",
                vec![
                    Property::new("status", TypeDescriptor::base("pg_catalog.text"))
                        .references(PropertyRef::new("public", "status", "value")),
                ],
            ),
        ])
    }

    #[test]
    fn test_identifier_becomes_literal_union() {
        let graph = graph();
        let config = GenerateConfig::default();
        let metadata = MetadataComposer::new();
        let type_map = TypeMap::new();
        let ctx = GenerationContext::new(&graph, &config, &metadata, &type_map);

        let mut values = IndexMap::new();
        values.insert(
            QualifiedName::new("public", "status"),
            vec!["open".to_string(), "closed".to_string()],
        );

        let result = Pipeline::new()
            .pre_render(EnumTables::new(values))
            .run(&ctx)
            .unwrap();

        let Some(Declaration::TypeAlias {
            type_definition, ..
        }) = result.output.find("public/Status", "StatusId")
        else {
            panic!("expected StatusId alias");
        };
        assert_eq!(type_definition, "'open' | 'closed'");
    }

    #[test]
    fn test_missing_values_fail() {
        let graph = graph();
        let config = GenerateConfig::default();
        let metadata = MetadataComposer::new();
        let type_map = TypeMap::new();
        let ctx = GenerationContext::new(&graph, &config, &metadata, &type_map);

        let hook = EnumTables::new(IndexMap::<QualifiedName, Vec<String>>::new());
        let err = hook.apply(Output::new(), &ctx).unwrap_err();
        assert!(err.to_string().contains("public.status"));
    }
}

//! Tables, views, materialized views and composite types.

use eyre::Result;
use tabula_schema::{Entity, Generated, Property};
use tracing::debug;

use crate::{
    ir::{Declaration, ExportAs, InterfaceField, Output, TypeExpression},
    metadata::Role,
    pipeline::{Diagnostic, EntityGenerator, GenerationContext},
};

/// Emits, per composite-like entity:
///
/// - the branded identifier type of its primary key (base tables only)
/// - the selector interface, default-exported
/// - the initializer and mutator interfaces (base tables only)
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeGenerator;

impl EntityGenerator for CompositeGenerator {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        output: &mut Output,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let resolver = ctx.resolver();

        for entity in ctx.entities().filter(|e| e.is_composite_like()) {
            debug!(entity = %entity.qualified_name(), "generating composite declarations");
            let selector = ctx.metadata.entity(entity, Role::Selector);

            if let Some((_, id)) = resolver.identifier(entity, diagnostics) {
                output.push(
                    &selector.path,
                    Declaration::TypeAlias {
                        name: id.name,
                        comment: id.comment,
                        export_as: ExportAs::Named,
                        type_definition: id.type_definition.name().to_string(),
                        imports: id.type_definition.imports().to_vec(),
                    },
                );
            }

            // Resolve each property once; all three interfaces share the result.
            let resolved: Vec<(&Property, TypeExpression)> = entity
                .properties()
                .iter()
                .map(|p| (p, resolver.resolve(entity, p, diagnostics)))
                .collect();

            output.push(
                &selector.path,
                Declaration::Interface {
                    name: selector.name.clone(),
                    comment: selector.comment.clone(),
                    export_as: ExportAs::Default,
                    fields: resolved
                        .iter()
                        .map(|(p, ty)| field(ctx, entity, p, ty, Role::Selector, false))
                        .collect(),
                },
            );

            if !entity.is_table() {
                continue;
            }

            let writable: Vec<_> = resolved
                .iter()
                .filter(|(p, _)| p.generated != Generated::Always)
                .collect();

            for role in [Role::Initializer, Role::Mutator] {
                let meta = ctx.metadata.entity(entity, role);
                let fields = writable
                    .iter()
                    .map(|(p, ty)| {
                        let optional = match role {
                            Role::Initializer => is_insert_optional(p),
                            _ => true,
                        };
                        field(ctx, entity, p, ty, role, optional)
                    })
                    .collect();
                output.push(
                    &meta.path,
                    Declaration::Interface {
                        name: meta.name,
                        comment: meta.comment,
                        export_as: ExportAs::Named,
                        fields,
                    },
                );
            }
        }

        Ok(())
    }
}

/// Columns the database can fill in on insert.
fn is_insert_optional(property: &Property) -> bool {
    property.nullable
        || property.has_default()
        || property.identity
        || property.generated == Generated::ByDefault
}

fn field(
    ctx: &GenerationContext<'_>,
    entity: &Entity,
    property: &Property,
    ty: &TypeExpression,
    role: Role,
    optional: bool,
) -> InterfaceField {
    let meta = ctx.metadata.property(entity, property, role);
    let optional = meta.optional_override.unwrap_or(optional);
    let mut nullable = meta.nullable_override.unwrap_or(property.nullable);
    if optional && role != Role::Selector && ctx.config.strip_null_from_optional {
        nullable = false;
    }

    InterfaceField {
        name: meta.name,
        type_name: ty.name().to_string(),
        nullable,
        optional,
        dimensions: property.ty.innermost().1,
        comment: meta.comment,
        imports: ty.imports().to_vec(),
    }
}

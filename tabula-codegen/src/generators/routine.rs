//! Functions and procedures.

use std::collections::HashMap;

use eyre::Result;
use tabula_schema::{EntityKind, RoutineReturn};
use tracing::debug;

use crate::{
    ir::{Declaration, ExportAs, InterfaceField, Output, array_type},
    metadata::Role,
    pipeline::{Diagnostic, EntityGenerator, GenerationContext},
};

/// Emits a parameter interface and a return type per routine.
///
/// Scalar returns become an alias (an array alias for set-returning
/// routines); table returns become an interface describing one row.
/// Overloads share a path and are told apart by the overload number the
/// metadata composer receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutineGenerator;

impl EntityGenerator for RoutineGenerator {
    fn name(&self) -> &'static str {
        "routine"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        output: &mut Output,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let resolver = ctx.resolver();
        let mut overloads: HashMap<_, usize> = HashMap::new();

        for entity in ctx.entities() {
            let EntityKind::Routine {
                parameters,
                returns,
            } = &entity.kind
            else {
                continue;
            };
            let overload = overloads.entry(entity.qualified_name()).or_insert(0);
            debug!(
                entity = %entity.qualified_name(),
                overload = *overload,
                "generating routine declarations"
            );
            let meta = ctx.metadata.routine(entity, *overload);
            *overload += 1;

            let fields = parameters
                .iter()
                .enumerate()
                .map(|(i, parameter)| {
                    let ty = resolver.resolve(entity, parameter, diagnostics);
                    let property = ctx.metadata.property(entity, parameter, Role::Selector);
                    InterfaceField {
                        name: meta
                            .parameter_names
                            .get(i)
                            .cloned()
                            .unwrap_or(property.name),
                        type_name: ty.name().to_string(),
                        nullable: parameter.nullable,
                        optional: parameter.has_default(),
                        dimensions: parameter.ty.innermost().1,
                        comment: property.comment,
                        imports: ty.imports().to_vec(),
                    }
                })
                .collect();
            output.push(
                &meta.path,
                Declaration::Interface {
                    name: meta.parameters_name.clone(),
                    comment: meta.comment.clone(),
                    export_as: ExportAs::Named,
                    fields,
                },
            );

            let return_comment = vec![format!("Return type of {}", entity.qualified_name())];
            let declaration = match returns {
                RoutineReturn::Void => Declaration::TypeAlias {
                    name: meta.return_name.clone(),
                    comment: return_comment,
                    export_as: ExportAs::Named,
                    type_definition: "void".to_string(),
                    imports: Vec::new(),
                },
                RoutineReturn::Scalar { ty, set } => {
                    let resolved = resolver.resolve_type(entity, ty, diagnostics);
                    let dimensions = ty.innermost().1 + usize::from(*set);
                    Declaration::TypeAlias {
                        name: meta.return_name.clone(),
                        comment: return_comment,
                        export_as: ExportAs::Named,
                        type_definition: array_type(resolved.name(), dimensions),
                        imports: resolved.imports().to_vec(),
                    }
                }
                RoutineReturn::Table { columns } => Declaration::Interface {
                    name: meta.return_name.clone(),
                    comment: return_comment,
                    export_as: ExportAs::Named,
                    fields: columns
                        .iter()
                        .map(|column| {
                            let ty = resolver.resolve(entity, column, diagnostics);
                            InterfaceField {
                                name: column.name.clone(),
                                type_name: ty.name().to_string(),
                                nullable: column.nullable,
                                optional: false,
                                dimensions: column.ty.innermost().1,
                                comment: Vec::new(),
                                imports: ty.imports().to_vec(),
                            }
                        })
                        .collect(),
                },
            };
            output.push(&meta.path, declaration);
        }
        Ok(())
    }
}

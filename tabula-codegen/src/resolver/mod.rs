//! Property → type expression resolution.
//!
//! Resolution order, first match wins:
//!
//! 1. property type override (`@type` tag or metadata override)
//! 2. branded identifier type of a base table's primary key
//! 3. outbound references, unioned when they disagree
//! 4. view column source link
//! 5. type map entry for the (innermost) raw type
//! 6. declaration of a composite/enum/domain/range entity
//! 7. `unknown`, with a warning
//!
//! Cycles through references and source links are cut with a
//! [`ResolutionScope`]: re-entering a property that is still being resolved
//! yields a placeholder, which the caller discards before falling through to
//! the next step.

mod scope;

pub use scope::ResolutionScope;
use scope::Visit;
use tabula_core::to_pascal_case;
use tabula_manifest::GenerateConfig;
use tabula_schema::{Entity, EntityKind, Property, SchemaGraph, TypeDescriptor};
use tracing::{debug, warn};

use crate::{
    ir::{ImportRecord, ImportSource, TypeExpression},
    metadata::{IdentifierMetadata, MetadataComposer, Role, type_override},
    pipeline::Diagnostic,
    type_map::TypeMap,
};

const PHASE: &str = "resolve";

/// Extra switches for a single resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Resolve the type underneath an identifier type instead of the
    /// identifier type itself.
    pub inner: bool,
}

enum Resolution {
    Resolved(TypeExpression),
    /// Placeholder for a property that is still being resolved.
    Cycle,
}

/// Maps properties to type expressions across the schema graph.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    graph: &'a SchemaGraph,
    type_map: &'a TypeMap,
    metadata: &'a MetadataComposer,
    config: &'a GenerateConfig,
}

impl<'a> TypeResolver<'a> {
    pub fn new(
        graph: &'a SchemaGraph,
        type_map: &'a TypeMap,
        metadata: &'a MetadataComposer,
        config: &'a GenerateConfig,
    ) -> Self {
        Self {
            graph,
            type_map,
            metadata,
            config,
        }
    }

    /// Resolve `property` of `entity` in a fresh tree.
    ///
    /// Never fails: unresolvable types become `unknown` and a warning is
    /// pushed to `diagnostics`.
    pub fn resolve(
        &self,
        entity: &Entity,
        property: &Property,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TypeExpression {
        let mut scope = ResolutionScope::new(&entity.schema);
        self.resolve_in(
            entity,
            property,
            ResolveOptions::default(),
            &mut scope,
            diagnostics,
        )
    }

    /// Resolve within an existing tree.
    pub fn resolve_in(
        &self,
        entity: &Entity,
        property: &Property,
        options: ResolveOptions,
        scope: &mut ResolutionScope,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TypeExpression {
        let ty = match self.resolve_slot(entity, property, options, scope, diagnostics) {
            Resolution::Resolved(ty) => ty,
            Resolution::Cycle => TypeExpression::unknown(),
        };
        self.finish(ty)
    }

    /// Resolve a raw type descriptor (domain inner types, scalar routine
    /// returns) as seen from `consumer`. Only the raw-type steps apply.
    pub fn resolve_type(
        &self,
        consumer: &Entity,
        ty: &TypeDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TypeExpression {
        let scope = ResolutionScope::new(&consumer.schema);
        let location = consumer.qualified_name().to_string();
        let resolved = self.resolve_raw(ty, &scope, &location, diagnostics);
        self.finish(resolved)
    }

    /// The branded identifier type of `entity`, if it has one.
    ///
    /// Only base tables with a single-column primary key that references
    /// nothing get an identifier type, and only when identifier types are
    /// enabled.
    pub fn identifier(
        &self,
        entity: &Entity,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<(&'a Property, IdentifierMetadata)> {
        if !self.config.identifier_types {
            return None;
        }
        let entity = self.graph.entity(&entity.qualified_name())?;
        let column = identifier_column(entity)?;
        let mut scope = ResolutionScope::new(&entity.schema);
        let mut metadata = self.identifier_in(entity, column, &mut scope, diagnostics);
        metadata.type_definition = self.finish(metadata.type_definition);
        Some((column, metadata))
    }

    fn identifier_in(
        &self,
        entity: &Entity,
        property: &Property,
        scope: &mut ResolutionScope,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> IdentifierMetadata {
        let inner = match self.resolve_slot(
            entity,
            property,
            ResolveOptions { inner: true },
            scope,
            diagnostics,
        ) {
            Resolution::Resolved(ty) => ty,
            Resolution::Cycle => TypeExpression::unknown(),
        };
        self.metadata.identifier(entity, property, &inner)
    }

    fn resolve_slot(
        &self,
        entity: &Entity,
        property: &Property,
        options: ResolveOptions,
        scope: &mut ResolutionScope,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolution {
        let name = entity.qualified_name();
        match scope.visit(&name, &property.name, options.inner) {
            Visit::Cycle => {
                debug!(entity = %name, property = %property.name, "reference cycle");
                return Resolution::Cycle;
            }
            Visit::Done(ty) => return Resolution::Resolved(ty),
            Visit::Fresh => {}
        }

        let ty = self.resolve_uncached(entity, property, options, scope, diagnostics);
        scope.complete(&name, &property.name, options.inner, ty.clone());
        Resolution::Resolved(ty)
    }

    fn resolve_uncached(
        &self,
        entity: &Entity,
        property: &Property,
        options: ResolveOptions,
        scope: &mut ResolutionScope,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TypeExpression {
        let location = format!("{}.{}", entity.qualified_name(), property.name);

        // 1. explicit override
        let meta = self.metadata.property(entity, property, Role::Selector);
        if let Some(ty) = meta.type_override {
            return ty;
        }

        // 2. identifier type
        if !options.inner
            && self.config.identifier_types
            && identifier_column(entity).is_some_and(|c| c.name == property.name)
        {
            let id = self.identifier_in(entity, property, scope, diagnostics);
            let path = self.metadata.entity(entity, Role::Selector).path;
            return self.reference(&entity.schema, &id.name, &path, false, scope);
        }

        // 3. references
        if !property.references.is_empty() {
            let mut results = Vec::new();
            for target in &property.references {
                let Some((target_entity, target_property)) = self.graph.property(target) else {
                    warn!(location = %location, target = %target, "reference to unknown column");
                    diagnostics.push(
                        Diagnostic::warning(PHASE, format!("reference to unknown column '{}'", target))
                            .at(&location),
                    );
                    continue;
                };
                match self.resolve_slot(
                    target_entity,
                    target_property,
                    ResolveOptions::default(),
                    scope,
                    diagnostics,
                ) {
                    Resolution::Resolved(ty) => results.push(ty),
                    Resolution::Cycle => {}
                }
            }
            if !results.is_empty() {
                return TypeExpression::union(results);
            }
        }

        // 4. view source
        if entity.is_view_like()
            && let Some(source) = &property.source
            && let Some((source_entity, source_property)) = self.graph.property(source)
            && let Resolution::Resolved(ty) = self.resolve_slot(
                source_entity,
                source_property,
                options,
                scope,
                diagnostics,
            )
        {
            return ty;
        }

        // 5-7. raw type
        self.resolve_raw(&property.ty, scope, &location, diagnostics)
    }

    fn resolve_raw(
        &self,
        ty: &TypeDescriptor,
        scope: &ResolutionScope,
        location: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TypeExpression {
        let (inner, _) = ty.innermost();

        if let Some(mapped) = self.type_map.get(&inner.full_name) {
            return mapped.clone();
        }

        if let Some(target) = self.graph.entity_for_type(&inner.full_name)
            && is_type_entity(target)
        {
            if let Some(ty) = type_override(&target.tagged_comment()) {
                return ty;
            }
            let meta = self.metadata.entity(target, Role::Selector);
            return self.reference(&target.schema, &meta.name, &meta.path, true, scope);
        }

        warn!(location, raw_type = %inner.full_name, "no type found, using unknown");
        diagnostics.push(
            Diagnostic::warning(PHASE, format!("no type found for '{}'", inner.full_name))
                .at(location),
        );
        TypeExpression::unknown()
    }

    /// A reference to a generated declaration, aliased when it lives in
    /// another schema than the consumer.
    fn reference(
        &self,
        schema: &str,
        name: &str,
        path: &str,
        is_default: bool,
        scope: &ResolutionScope,
    ) -> TypeExpression {
        let source = ImportSource::Relative(path.to_string());
        let local = if schema == scope.consumer_schema() {
            name.to_string()
        } else {
            format!("{}{}", to_pascal_case(schema), name)
        };

        let record = if is_default {
            ImportRecord::default_export(&local, source)
        } else if local != name {
            ImportRecord::named(name, source).alias(&local)
        } else {
            ImportRecord::named(name, source)
        };
        TypeExpression::named(local, vec![record])
    }

    /// Apply the configured import flavour to every record.
    fn finish(&self, ty: TypeExpression) -> TypeExpression {
        match ty {
            TypeExpression::Named { name, imports } => TypeExpression::Named {
                name,
                imports: imports
                    .into_iter()
                    .map(|r| r.type_only(self.config.prefer_type_imports))
                    .collect(),
            },
            builtin => builtin,
        }
    }
}

/// The column that owns an identifier type: the single primary-key column
/// of a base table, provided it references nothing.
pub fn identifier_column(entity: &Entity) -> Option<&Property> {
    if !entity.is_table() {
        return None;
    }
    let mut keys = entity.properties().iter().filter(|p| p.primary_key);
    match (keys.next(), keys.next()) {
        (Some(key), None) if key.references.is_empty() => Some(key),
        _ => None,
    }
}

/// Entities whose declaration can stand in for a column type.
fn is_type_entity(entity: &Entity) -> bool {
    matches!(
        entity.kind,
        EntityKind::CompositeType { .. }
            | EntityKind::Enum { .. }
            | EntityKind::Domain { .. }
            | EntityKind::Range { .. }
            | EntityKind::Table { .. }
            | EntityKind::View { .. }
            | EntityKind::MaterializedView { .. }
    )
}

#[cfg(test)]
mod tests {
    use tabula_schema::{PropertyRef, TypeKind};

    use super::*;

    fn type_map() -> TypeMap {
        [
            ("pg_catalog.int4", TypeExpression::builtin("number")),
            ("pg_catalog.text", TypeExpression::builtin("string")),
        ]
        .into_iter()
        .collect()
    }

    fn int4(name: &str) -> Property {
        Property::new(name, TypeDescriptor::base("pg_catalog.int4"))
    }

    struct Fixture {
        graph: SchemaGraph,
        type_map: TypeMap,
        metadata: MetadataComposer,
        config: GenerateConfig,
    }

    impl Fixture {
        fn new(entities: Vec<Entity>) -> Self {
            Self {
                graph: SchemaGraph::new(entities),
                type_map: type_map(),
                metadata: MetadataComposer::new(),
                config: GenerateConfig::default(),
            }
        }

        fn resolver(&self) -> TypeResolver<'_> {
            TypeResolver::new(&self.graph, &self.type_map, &self.metadata, &self.config)
        }

        fn resolve(&self, entity: &str, property: &str) -> (TypeExpression, Vec<Diagnostic>) {
            let (schema, name) = entity.split_once('.').unwrap();
            let entity = self
                .graph
                .entity(&tabula_schema::QualifiedName::new(schema, name))
                .unwrap();
            let property = entity.property(property).unwrap();
            let mut diagnostics = Vec::new();
            let ty = self.resolver().resolve(entity, property, &mut diagnostics);
            (ty, diagnostics)
        }
    }

    #[test]
    fn test_identifier_column_rules() {
        let single = Entity::table("public", "users", vec![int4("id").primary_key()]);
        assert_eq!(identifier_column(&single).map(|p| p.name.as_str()), Some("id"));

        let compound = Entity::table(
            "public",
            "memberships",
            vec![int4("a").primary_key(), int4("b").primary_key()],
        );
        assert!(identifier_column(&compound).is_none());

        let referencing = Entity::table(
            "public",
            "profiles",
            vec![int4("user_id").primary_key().references(PropertyRef::new("public", "users", "id"))],
        );
        assert!(identifier_column(&referencing).is_none());

        let view = Entity::view("public", "v", vec![int4("id").primary_key()]);
        assert!(identifier_column(&view).is_none());
    }

    #[test]
    fn test_primary_key_resolves_to_identifier() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "users",
            vec![int4("id").primary_key()],
        )]);
        let (ty, diagnostics) = fixture.resolve("public.users", "id");

        assert_eq!(ty.name(), "UsersId");
        let record = &ty.imports()[0];
        assert!(!record.is_default);
        assert!(record.type_only);
        assert_eq!(record.source, ImportSource::Relative("public/Users".into()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_identifier_types_disabled() {
        let mut fixture = Fixture::new(vec![Entity::table(
            "public",
            "users",
            vec![int4("id").primary_key()],
        )]);
        fixture.config.identifier_types = false;
        let (ty, _) = fixture.resolve("public.users", "id");
        assert_eq!(ty, TypeExpression::builtin("number"));
    }

    #[test]
    fn test_foreign_key_uses_referenced_identifier() {
        let fixture = Fixture::new(vec![
            Entity::table("public", "users", vec![int4("id").primary_key()]),
            Entity::table(
                "public",
                "posts",
                vec![
                    int4("id").primary_key(),
                    int4("author_id").references(PropertyRef::new("public", "users", "id")),
                ],
            ),
        ]);
        let (ty, _) = fixture.resolve("public.posts", "author_id");
        assert_eq!(ty.name(), "UsersId");
    }

    #[test]
    fn test_multiple_references_union() {
        let fixture = Fixture::new(vec![
            Entity::table("public", "users", vec![int4("id").primary_key()]),
            Entity::table("public", "teams", vec![int4("id").primary_key()]),
            Entity::table(
                "public",
                "owners",
                vec![
                    int4("owner_id")
                        .references(PropertyRef::new("public", "users", "id"))
                        .references(PropertyRef::new("public", "teams", "id"))
                        .references(PropertyRef::new("public", "users", "id")),
                ],
            ),
        ]);
        let (ty, _) = fixture.resolve("public.owners", "owner_id");
        assert_eq!(ty.name(), "UsersId | TeamsId");
        assert_eq!(ty.imports().len(), 2);
    }

    #[test]
    fn test_mutual_reference_cycle_terminates() {
        let fixture = Fixture::new(vec![
            Entity::table(
                "public",
                "a",
                vec![int4("b_ref").references(PropertyRef::new("public", "b", "a_ref"))],
            ),
            Entity::table(
                "public",
                "b",
                vec![int4("a_ref").references(PropertyRef::new("public", "a", "b_ref"))],
            ),
        ]);
        let (ty, diagnostics) = fixture.resolve("public.a", "b_ref");
        assert_eq!(ty, TypeExpression::builtin("number"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_self_reference_terminates() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "nodes",
            vec![int4("loop_col").references(PropertyRef::new("public", "nodes", "loop_col"))],
        )]);
        let (ty, _) = fixture.resolve("public.nodes", "loop_col");
        assert_eq!(ty, TypeExpression::builtin("number"));
    }

    #[test]
    fn test_three_entity_cycle_terminates() {
        let fixture = Fixture::new(vec![
            Entity::table(
                "public",
                "a",
                vec![int4("x").references(PropertyRef::new("public", "b", "y"))],
            ),
            Entity::table(
                "public",
                "b",
                vec![int4("y").references(PropertyRef::new("public", "c", "z"))],
            ),
            Entity::table(
                "public",
                "c",
                vec![int4("z").references(PropertyRef::new("public", "a", "x"))],
            ),
        ]);
        for (entity, property) in [("public.a", "x"), ("public.b", "y"), ("public.c", "z")] {
            let (ty, diagnostics) = fixture.resolve(entity, property);
            assert_eq!(ty, TypeExpression::builtin("number"), "{}.{}", entity, property);
            assert!(diagnostics.is_empty(), "{}.{}: {:?}", entity, property, diagnostics);
        }
    }

    #[test]
    fn test_compound_keys_referencing_each_other_terminate() {
        let fixture = Fixture::new(vec![
            Entity::table(
                "public",
                "left_side",
                vec![
                    int4("k1")
                        .primary_key()
                        .references(PropertyRef::new("public", "right_side", "k1")),
                    int4("k2")
                        .primary_key()
                        .references(PropertyRef::new("public", "right_side", "k2")),
                ],
            ),
            Entity::table(
                "public",
                "right_side",
                vec![
                    int4("k1")
                        .primary_key()
                        .references(PropertyRef::new("public", "left_side", "k1")),
                    int4("k2")
                        .primary_key()
                        .references(PropertyRef::new("public", "left_side", "k2")),
                ],
            ),
        ]);
        for entity in ["public.left_side", "public.right_side"] {
            for property in ["k1", "k2"] {
                let (ty, diagnostics) = fixture.resolve(entity, property);
                assert_eq!(ty, TypeExpression::builtin("number"), "{}.{}", entity, property);
                assert!(diagnostics.is_empty());
            }
        }
        let left = fixture
            .graph
            .entity(&tabula_schema::QualifiedName::new("public", "left_side"))
            .unwrap();
        assert!(identifier_column(left).is_none());
    }

    #[test]
    fn test_view_column_follows_source() {
        let fixture = Fixture::new(vec![
            Entity::table("public", "users", vec![int4("id").primary_key()]),
            Entity::view(
                "public",
                "active_users",
                vec![int4("id").source(PropertyRef::new("public", "users", "id"))],
            ),
        ]);
        let (ty, _) = fixture.resolve("public.active_users", "id");
        assert_eq!(ty.name(), "UsersId");
    }

    #[test]
    fn test_array_uses_element_type() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "t",
            vec![Property::new(
                "tags",
                TypeDescriptor::array_of(TypeDescriptor::base("pg_catalog.text")),
            )],
        )]);
        let (ty, _) = fixture.resolve("public.t", "tags");
        assert_eq!(ty, TypeExpression::builtin("string"));
    }

    #[test]
    fn test_enum_reference_and_cross_schema_alias() {
        let fixture = Fixture::new(vec![
            Entity::new("audit", "status", EntityKind::Enum { values: vec!["ok".into()] }),
            Entity::new("public", "mood", EntityKind::Enum { values: vec!["happy".into()] }),
            Entity::table(
                "public",
                "events",
                vec![
                    Property::new("status", TypeDescriptor::of_kind("audit.status", TypeKind::Enum)),
                    Property::new("mood", TypeDescriptor::of_kind("public.mood", TypeKind::Enum)),
                ],
            ),
        ]);

        let (status, _) = fixture.resolve("public.events", "status");
        assert_eq!(status.name(), "AuditStatus");
        let record = &status.imports()[0];
        assert!(record.is_default);
        assert_eq!(record.name, "AuditStatus");
        assert_eq!(record.source, ImportSource::Relative("audit/Status".into()));

        let (mood, _) = fixture.resolve("public.events", "mood");
        assert_eq!(mood.name(), "Mood");
    }

    #[test]
    fn test_overridden_enum_uses_override() {
        let fixture = Fixture::new(vec![
            Entity::new("public", "mood", EntityKind::Enum { values: vec!["happy".into()] })
                .with_comment("@type:Mood @from:@app/mood"),
            Entity::table(
                "public",
                "people",
                vec![Property::new("mood", TypeDescriptor::of_kind("public.mood", TypeKind::Enum))],
            ),
        ]);
        let (ty, _) = fixture.resolve("public.people", "mood");
        assert_eq!(ty.name(), "Mood");
        assert_eq!(
            ty.imports()[0].source,
            ImportSource::Absolute("@app/mood".into())
        );
    }

    #[test]
    fn test_property_override_wins() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "users",
            vec![int4("id").primary_key().comment("@type:bigint")],
        )]);
        let (ty, _) = fixture.resolve("public.users", "id");
        assert_eq!(ty, TypeExpression::builtin("bigint"));
    }

    #[test]
    fn test_unknown_type_warns() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "orders",
            vec![Property::new("total", TypeDescriptor::base("pg_catalog.money"))],
        )]);
        let (ty, diagnostics) = fixture.resolve("public.orders", "total");
        assert!(ty.is_unknown());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "no type found for 'pg_catalog.money'");
        assert_eq!(diagnostics[0].location.as_deref(), Some("public.orders.total"));
    }

    #[test]
    fn test_dangling_reference_falls_through() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "posts",
            vec![int4("author_id").references(PropertyRef::new("public", "ghosts", "id"))],
        )]);
        let (ty, diagnostics) = fixture.resolve("public.posts", "author_id");
        assert_eq!(ty, TypeExpression::builtin("number"));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let fixture = Fixture::new(vec![
            Entity::table("public", "users", vec![int4("id").primary_key()]),
            Entity::table(
                "public",
                "posts",
                vec![int4("author_id").references(PropertyRef::new("public", "users", "id"))],
            ),
        ]);
        assert_eq!(
            fixture.resolve("public.posts", "author_id").0,
            fixture.resolve("public.posts", "author_id").0
        );
    }

    #[test]
    fn test_identifier_metadata() {
        let fixture = Fixture::new(vec![Entity::table(
            "public",
            "users",
            vec![int4("id").primary_key()],
        )]);
        let users = fixture.graph.entities().next().unwrap();
        let mut diagnostics = Vec::new();
        let (column, id) = fixture.resolver().identifier(users, &mut diagnostics).unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(id.name, "UsersId");
        assert_eq!(
            id.type_definition,
            TypeExpression::builtin("number & { __brand: 'public.users' }")
        );
    }
}

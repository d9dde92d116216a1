//! Lookup structure over all entities of a snapshot.

use indexmap::IndexMap;

use crate::{Entity, Property, PropertyRef, QualifiedName};

/// All entities of a schema snapshot.
///
/// Tables, views and types share one namespace and are keyed by qualified
/// name; a later entity reusing a taken name is ignored. Routines live in a
/// namespace of their own and may be overloaded, so they are kept as a list.
/// Iteration order is snapshot order within each group, which keeps
/// generated output stable.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    relations: IndexMap<QualifiedName, Entity>,
    routines: Vec<Entity>,
}

impl SchemaGraph {
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut graph = Self::default();
        for entity in entities {
            if entity.is_routine() {
                graph.routines.push(entity);
            } else {
                graph
                    .relations
                    .entry(entity.qualified_name())
                    .or_insert(entity);
            }
        }
        graph
    }

    /// The table, view or type called `name`. Routines are never returned.
    pub fn entity(&self, name: &QualifiedName) -> Option<&Entity> {
        self.relations.get(name)
    }

    /// Find the entity a raw type name such as `public.mood` refers to.
    pub fn entity_for_type(&self, full_name: &str) -> Option<&Entity> {
        let name: QualifiedName = full_name.parse().ok()?;
        self.entity(&name)
    }

    /// Resolve a reference or source link to its entity and property.
    pub fn property(&self, target: &PropertyRef) -> Option<(&Entity, &Property)> {
        let entity = self.entity(&target.entity_name())?;
        let property = entity.property(&target.property)?;
        Some((entity, property))
    }

    /// Every routine overload called `name`, in snapshot order.
    pub fn overloads<'a>(&'a self, name: &'a QualifiedName) -> impl Iterator<Item = &'a Entity> {
        self.routines
            .iter()
            .filter(move |routine| routine.schema == name.schema && routine.name == name.name)
    }

    /// Tables, views and types, then routines.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.relations.values().chain(&self.routines)
    }

    /// Entities belonging to one of `schemas`; every entity when `schemas` is empty.
    pub fn entities_in<'a>(&'a self, schemas: &'a [String]) -> impl Iterator<Item = &'a Entity> {
        self.entities()
            .filter(move |e| schemas.is_empty() || schemas.iter().any(|s| *s == e.schema))
    }

    pub fn len(&self) -> usize {
        self.relations.len() + self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty() && self.routines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityKind, RoutineReturn, TypeDescriptor};

    fn graph() -> SchemaGraph {
        SchemaGraph::new([
            Entity::table(
                "public",
                "users",
                vec![Property::new("id", TypeDescriptor::base("pg_catalog.int4")).primary_key()],
            ),
            Entity::new(
                "audit",
                "level",
                EntityKind::Enum {
                    values: vec!["info".into()],
                },
            ),
        ])
    }

    #[test]
    fn test_lookup_property() {
        let graph = graph();
        let (entity, property) = graph
            .property(&PropertyRef::new("public", "users", "id"))
            .unwrap();
        assert_eq!(entity.name, "users");
        assert!(property.primary_key);

        assert!(graph.property(&PropertyRef::new("public", "users", "missing")).is_none());
        assert!(graph.property(&PropertyRef::new("public", "nope", "id")).is_none());
    }

    #[test]
    fn test_entity_for_type() {
        let graph = graph();
        assert_eq!(graph.entity_for_type("audit.level").unwrap().name, "level");
        assert!(graph.entity_for_type("pg_catalog.int4").is_none());
        assert!(graph.entity_for_type("nodot").is_none());
    }

    #[test]
    fn test_entities_in_filters_by_schema() {
        let graph = graph();
        let audit = vec!["audit".to_string()];
        let names: Vec<_> = graph.entities_in(&audit).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["level"]);
        assert_eq!(graph.entities_in(&[]).count(), 2);
    }

    fn routine(name: &str, parameter: &str, ty: &str) -> Entity {
        Entity::new(
            "public",
            name,
            EntityKind::Routine {
                parameters: vec![Property::new(parameter, TypeDescriptor::base(ty))],
                returns: RoutineReturn::Void,
            },
        )
    }

    #[test]
    fn test_routine_does_not_shadow_table() {
        let graph = SchemaGraph::new([
            Entity::table(
                "public",
                "users",
                vec![Property::new("id", TypeDescriptor::base("pg_catalog.int4")).primary_key()],
            ),
            routine("users", "limit", "pg_catalog.int4"),
        ]);

        assert_eq!(graph.len(), 2);
        let users = graph.entity(&QualifiedName::new("public", "users")).unwrap();
        assert!(users.is_table());
        assert!(graph.entity_for_type("public.users").unwrap().is_table());
        assert!(graph.property(&PropertyRef::new("public", "users", "id")).is_some());

        let kinds: Vec<_> = graph.entities().map(|e| e.kind.label()).collect();
        assert_eq!(kinds, vec!["table", "routine"]);
    }

    #[test]
    fn test_overloads_are_all_kept() {
        let graph = SchemaGraph::new([
            routine("find_user", "id", "pg_catalog.int4"),
            routine("find_user", "email", "pg_catalog.text"),
            routine("count_users", "active", "pg_catalog.bool"),
        ]);
        let name = QualifiedName::new("public", "find_user");

        let parameters: Vec<_> = graph
            .overloads(&name)
            .map(|e| match &e.kind {
                EntityKind::Routine { parameters, .. } => parameters[0].name.as_str(),
                other => panic!("expected routine, got {other:?}"),
            })
            .collect();
        assert_eq!(parameters, vec!["id", "email"]);
        assert_eq!(graph.len(), 3);
        assert!(graph.entity(&name).is_none());
    }
}

//! Schema entities.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Property, TaggedComment, TypeDescriptor};

/// A schema-qualified name such as `public.users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    pub schema: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

impl FromStr for QualifiedName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((schema, name)) if !schema.is_empty() && !name.is_empty() => {
                Ok(Self::new(schema, name))
            }
            _ => Err(format!("expected 'schema.name', got '{}'", s)),
        }
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

/// What a routine returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoutineReturn {
    /// Procedures and `returns void` functions.
    Void,
    /// A single value, or a set of values when `set` is true.
    Scalar {
        #[serde(rename = "type")]
        ty: TypeDescriptor,
        #[serde(default)]
        set: bool,
    },
    /// `returns table (...)` and `out` parameter lists.
    Table { columns: Vec<Property> },
}

/// The kind-specific part of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EntityKind {
    Table {
        properties: Vec<Property>,
    },
    View {
        properties: Vec<Property>,
    },
    MaterializedView {
        properties: Vec<Property>,
    },
    CompositeType {
        properties: Vec<Property>,
    },
    Enum {
        values: Vec<String>,
    },
    Domain {
        inner: TypeDescriptor,
    },
    Range {
        inner: TypeDescriptor,
    },
    Routine {
        #[serde(default)]
        parameters: Vec<Property>,
        returns: RoutineReturn,
    },
}

impl EntityKind {
    /// Human-readable kind name used in generated comments.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Table { .. } => "table",
            EntityKind::View { .. } => "view",
            EntityKind::MaterializedView { .. } => "materialized view",
            EntityKind::CompositeType { .. } => "composite type",
            EntityKind::Enum { .. } => "enum",
            EntityKind::Domain { .. } => "domain",
            EntityKind::Range { .. } => "range",
            EntityKind::Routine { .. } => "routine",
        }
    }
}

/// A table, view, type or routine in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub schema: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(schema: impl Into<String>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            comment: None,
            kind,
        }
    }

    pub fn table(
        schema: impl Into<String>,
        name: impl Into<String>,
        properties: Vec<Property>,
    ) -> Self {
        Self::new(schema, name, EntityKind::Table { properties })
    }

    pub fn view(schema: impl Into<String>, name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self::new(schema, name, EntityKind::View { properties })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.schema, &self.name)
    }

    /// Columns or attributes; empty for non-composite entities.
    pub fn properties(&self) -> &[Property] {
        match &self.kind {
            EntityKind::Table { properties }
            | EntityKind::View { properties }
            | EntityKind::MaterializedView { properties }
            | EntityKind::CompositeType { properties } => properties,
            _ => &[],
        }
    }

    /// Look up a column or attribute by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.name == name)
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, EntityKind::Table { .. })
    }

    pub fn is_routine(&self) -> bool {
        matches!(self.kind, EntityKind::Routine { .. })
    }

    pub fn is_view_like(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::View { .. } | EntityKind::MaterializedView { .. }
        )
    }

    /// Tables, views, materialized views and composite types.
    pub fn is_composite_like(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Table { .. }
                | EntityKind::View { .. }
                | EntityKind::MaterializedView { .. }
                | EntityKind::CompositeType { .. }
        )
    }

    /// The comment split into text lines and structured tags.
    pub fn tagged_comment(&self) -> TaggedComment {
        TaggedComment::parse(self.comment.as_deref())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.kind.label(), self.schema, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_parse() {
        let name: QualifiedName = "public.users".parse().unwrap();
        assert_eq!(name, QualifiedName::new("public", "users"));
        assert_eq!(name.to_string(), "public.users");
        assert!("users".parse::<QualifiedName>().is_err());
        assert!(".users".parse::<QualifiedName>().is_err());
    }

    #[test]
    fn test_entity_deserialize_table() {
        let json = r#"{
            "schema": "public",
            "name": "users",
            "comment": "Registered users",
            "kind": "table",
            "properties": [
                { "name": "id", "type": { "fullName": "pg_catalog.int4" }, "primaryKey": true }
            ]
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();

        assert!(entity.is_table());
        assert_eq!(entity.qualified_name().to_string(), "public.users");
        assert_eq!(entity.properties().len(), 1);
        assert!(entity.property("id").unwrap().primary_key);
    }

    #[test]
    fn test_entity_deserialize_materialized_view() {
        let json = r#"{
            "schema": "public",
            "name": "user_stats",
            "kind": "materializedView",
            "properties": []
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert!(entity.is_view_like());
        assert!(entity.is_composite_like());
        assert_eq!(entity.to_string(), "materialized view public.user_stats");
    }

    #[test]
    fn test_entity_deserialize_routine() {
        let json = r#"{
            "schema": "public",
            "name": "count_posts",
            "kind": "routine",
            "parameters": [{ "name": "author", "type": { "fullName": "pg_catalog.int4" } }],
            "returns": { "kind": "scalar", "type": { "fullName": "pg_catalog.int8" } }
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();

        match entity.kind {
            EntityKind::Routine {
                parameters,
                returns: RoutineReturn::Scalar { ty, set },
            } => {
                assert_eq!(parameters.len(), 1);
                assert_eq!(ty.full_name, "pg_catalog.int8");
                assert!(!set);
            }
            other => panic!("expected routine, got {:?}", other),
        }
    }

    #[test]
    fn test_non_composite_has_no_properties() {
        let entity = Entity::new(
            "public",
            "mood",
            EntityKind::Enum {
                values: vec!["happy".into(), "sad".into()],
            },
        );
        assert!(entity.properties().is_empty());
        assert!(!entity.is_composite_like());
    }
}

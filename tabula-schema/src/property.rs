//! Properties (columns and attributes) and raw type descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

/// Kind of a raw database type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    #[default]
    Base,
    Composite,
    Enum,
    Domain,
    Range,
    Array,
}

/// A raw database type as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Fully-qualified type name (e.g. `pg_catalog.int4`, `public.mood`).
    pub full_name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Element type, only set for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// A base type such as `pg_catalog.text`.
    pub fn base(full_name: impl Into<String>) -> Self {
        Self::of_kind(full_name, TypeKind::Base)
    }

    /// A type of the given kind.
    pub fn of_kind(full_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            full_name: full_name.into(),
            kind,
            element: None,
        }
    }

    /// An array whose elements are `element`.
    pub fn array_of(element: TypeDescriptor) -> Self {
        Self {
            full_name: format!("{}[]", element.full_name),
            kind: TypeKind::Array,
            element: Some(Box::new(element)),
        }
    }

    /// The innermost element type and the number of array dimensions around it.
    pub fn innermost(&self) -> (&TypeDescriptor, usize) {
        let mut current = self;
        let mut dimensions = 0;
        while let (TypeKind::Array, Some(element)) = (current.kind, current.element.as_deref()) {
            current = element;
            dimensions += 1;
        }
        (current, dimensions)
    }
}

/// Generation status of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Generated {
    #[default]
    Never,
    Always,
    ByDefault,
}

/// Points at a property of another entity.
///
/// Used both for foreign-key references and for view column source links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyRef {
    pub schema: String,
    pub entity: String,
    pub property: String,
}

impl PropertyRef {
    pub fn new(
        schema: impl Into<String>,
        entity: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            entity: entity.into(),
            property: property.into(),
        }
    }

    /// The qualified name of the entity this points into.
    pub fn entity_name(&self) -> QualifiedName {
        QualifiedName::new(&self.schema, &self.entity)
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.schema, self.entity, self.property)
    }
}

/// A column of a table/view or an attribute of a composite type.
///
/// Routine parameters and table-returning routine columns use the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    #[serde(default)]
    pub nullable: bool,
    /// Default expression, when the column has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub generated: Generated,
    #[serde(default)]
    pub identity: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<PropertyRef>,
    /// For view columns: the base table column this one is selected from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PropertyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Property {
    /// A non-null column with no default, no references and no comment.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            default_value: None,
            generated: Generated::Never,
            identity: false,
            primary_key: false,
            references: Vec::new(),
            source: None,
            comment: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default_value = Some(expr.into());
        self
    }

    pub fn generated(mut self, generated: Generated) -> Self {
        self.generated = generated;
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn references(mut self, target: PropertyRef) -> Self {
        self.references.push(target);
        self
    }

    pub fn source(mut self, source: PropertyRef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_of_base_type() {
        let ty = TypeDescriptor::base("pg_catalog.text");
        let (inner, dims) = ty.innermost();
        assert_eq!(inner.full_name, "pg_catalog.text");
        assert_eq!(dims, 0);
    }

    #[test]
    fn test_innermost_of_nested_array() {
        let ty = TypeDescriptor::array_of(TypeDescriptor::array_of(TypeDescriptor::of_kind(
            "public.mood",
            TypeKind::Enum,
        )));
        let (inner, dims) = ty.innermost();
        assert_eq!(inner.full_name, "public.mood");
        assert_eq!(inner.kind, TypeKind::Enum);
        assert_eq!(dims, 2);
    }

    #[test]
    fn test_property_deserialize_defaults() {
        let json = r#"{ "name": "email", "type": { "fullName": "pg_catalog.text" } }"#;
        let property: Property = serde_json::from_str(json).unwrap();

        assert_eq!(property.name, "email");
        assert!(!property.nullable);
        assert!(!property.has_default());
        assert_eq!(property.generated, Generated::Never);
        assert!(property.references.is_empty());
    }

    #[test]
    fn test_property_deserialize_reference() {
        let json = r#"{
            "name": "author_id",
            "type": { "fullName": "pg_catalog.int4" },
            "generated": "byDefault",
            "references": [{ "schema": "public", "entity": "users", "property": "id" }]
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();

        assert_eq!(property.generated, Generated::ByDefault);
        assert_eq!(
            property.references,
            vec![PropertyRef::new("public", "users", "id")]
        );
        assert_eq!(property.references[0].to_string(), "public.users.id");
    }
}

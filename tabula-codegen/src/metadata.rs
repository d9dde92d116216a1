//! Naming and commenting of generated declarations.
//!
//! Every declaration name, comment and path comes from one of four
//! functions. Each has a built-in default; callers can wrap it with an
//! override that receives the built-in result last and returns the value to
//! use, unchanged, patched or replaced.

use std::sync::Arc;

use tabula_core::to_pascal_case;
use tabula_schema::{Entity, EntityKind, Property, TaggedComment};

use crate::{
    ir::{ImportRecord, ImportSource, TypeExpression},
    language::NamingConvention,
};

/// Which declaration of a composite entity is being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Selector,
    Initializer,
    Mutator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMetadata {
    pub name: String,
    pub comment: Vec<String>,
    /// Output path without extension, relative to the output root.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    pub name: String,
    pub comment: Vec<String>,
    /// Replaces type resolution for this property.
    pub type_override: Option<TypeExpression>,
    pub nullable_override: Option<bool>,
    pub optional_override: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMetadata {
    pub name: String,
    pub comment: Vec<String>,
    /// The branded definition, e.g. `number & { __brand: 'public.users' }`.
    pub type_definition: TypeExpression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineMetadata {
    pub path: String,
    pub comment: Vec<String>,
    pub parameters_name: String,
    pub return_name: String,
    /// One name per parameter, in declaration order.
    pub parameter_names: Vec<String>,
}

pub type EntityMetadataFn =
    Arc<dyn Fn(&Entity, Role, EntityMetadata) -> EntityMetadata + Send + Sync>;
pub type PropertyMetadataFn =
    Arc<dyn Fn(&Entity, &Property, Role, PropertyMetadata) -> PropertyMetadata + Send + Sync>;
pub type IdentifierMetadataFn =
    Arc<dyn Fn(&Entity, &Property, IdentifierMetadata) -> IdentifierMetadata + Send + Sync>;
pub type RoutineMetadataFn = Arc<dyn Fn(&Entity, RoutineMetadata) -> RoutineMetadata + Send + Sync>;

/// Built-in metadata plus optional user overrides.
#[derive(Clone, Default)]
pub struct MetadataComposer {
    entity: Option<EntityMetadataFn>,
    property: Option<PropertyMetadataFn>,
    identifier: Option<IdentifierMetadataFn>,
    routine: Option<RoutineMetadataFn>,
    naming: Option<NamingConvention>,
}

impl std::fmt::Debug for MetadataComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataComposer")
            .field("entity", &self.entity.is_some())
            .field("property", &self.property.is_some())
            .field("identifier", &self.identifier.is_some())
            .field("routine", &self.routine.is_some())
            .field("naming", &self.naming.is_some())
            .finish()
    }
}

impl MetadataComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(
        mut self,
        f: impl Fn(&Entity, Role, EntityMetadata) -> EntityMetadata + Send + Sync + 'static,
    ) -> Self {
        self.entity = Some(Arc::new(f));
        self
    }

    pub fn with_property(
        mut self,
        f: impl Fn(&Entity, &Property, Role, PropertyMetadata) -> PropertyMetadata
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.property = Some(Arc::new(f));
        self
    }

    pub fn with_identifier(
        mut self,
        f: impl Fn(&Entity, &Property, IdentifierMetadata) -> IdentifierMetadata
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.identifier = Some(Arc::new(f));
        self
    }

    pub fn with_routine(
        mut self,
        f: impl Fn(&Entity, RoutineMetadata) -> RoutineMetadata + Send + Sync + 'static,
    ) -> Self {
        self.routine = Some(Arc::new(f));
        self
    }

    /// Make built-in declaration names safe under `naming`. Names returned
    /// by overrides are used as given.
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn naming(&self) -> Option<&NamingConvention> {
        self.naming.as_ref()
    }

    fn safe_name(&self, name: String) -> String {
        match &self.naming {
            Some(naming) => naming.safe_name(&name),
            None => name,
        }
    }

    pub fn entity(&self, entity: &Entity, role: Role) -> EntityMetadata {
        let mut builtin = builtin_entity(entity, role);
        builtin.name = self.safe_name(builtin.name);
        match &self.entity {
            Some(f) => f(entity, role, builtin),
            None => builtin,
        }
    }

    pub fn property(&self, entity: &Entity, property: &Property, role: Role) -> PropertyMetadata {
        let builtin = builtin_property(property, role);
        match &self.property {
            Some(f) => f(entity, property, role, builtin),
            None => builtin,
        }
    }

    /// Metadata for the branded identifier type of `property`, wrapping `inner`.
    pub fn identifier(
        &self,
        entity: &Entity,
        property: &Property,
        inner: &TypeExpression,
    ) -> IdentifierMetadata {
        let owner = self.entity(entity, Role::Selector).name;
        let mut builtin = builtin_identifier(entity, property, &owner, inner);
        builtin.name = self.safe_name(builtin.name);
        match &self.identifier {
            Some(f) => f(entity, property, builtin),
            None => builtin,
        }
    }

    /// Metadata for one routine. `overload` is the routine's position among
    /// same-named routines of its schema, `0` for the first.
    pub fn routine(&self, entity: &Entity, overload: usize) -> RoutineMetadata {
        let mut builtin = builtin_routine(entity, overload);
        builtin.parameters_name = self.safe_name(builtin.parameters_name);
        builtin.return_name = self.safe_name(builtin.return_name);
        match &self.routine {
            Some(f) => f(entity, builtin),
            None => builtin,
        }
    }
}

/// The type named by `@type`, imported from `@from` when present.
///
/// `@default` makes the import a default import.
pub fn type_override(tags: &TaggedComment) -> Option<TypeExpression> {
    let name = tags.tag("type")?;
    Some(match tags.tag("from") {
        Some(from) => {
            let source = ImportSource::Absolute(from.to_string());
            let record = if tags.has_tag("default") {
                ImportRecord::default_export(name, source)
            } else {
                ImportRecord::named(name, source)
            };
            TypeExpression::named(name, vec![record.type_only(true)])
        }
        None => TypeExpression::builtin(name),
    })
}

fn entity_path(entity: &Entity) -> String {
    format!("{}/{}", entity.schema, to_pascal_case(&entity.name))
}

fn builtin_entity(entity: &Entity, role: Role) -> EntityMetadata {
    let base = to_pascal_case(&entity.name);
    let tags = entity.tagged_comment();

    let (name, comment) = match role {
        Role::Selector => {
            let comment = if tags.lines.is_empty() {
                vec![format!("Represents the {}", entity)]
            } else {
                tags.lines
            };
            (base, comment)
        }
        Role::Initializer => (
            format!("{}Initializer", base),
            vec![format!("Represents the initializer for the {}", entity)],
        ),
        Role::Mutator => (
            format!("{}Mutator", base),
            vec![format!("Represents the mutator for the {}", entity)],
        ),
    };

    EntityMetadata {
        name,
        comment,
        path: entity_path(entity),
    }
}

fn builtin_property(property: &Property, role: Role) -> PropertyMetadata {
    let tags = TaggedComment::parse(property.comment.as_deref());
    let mut comment = tags.lines.clone();
    if let (Role::Initializer, Some(default)) = (role, &property.default_value) {
        comment.push(format!("Default value: {}", default));
    }

    PropertyMetadata {
        name: property.name.clone(),
        comment,
        type_override: type_override(&tags),
        nullable_override: None,
        optional_override: None,
    }
}

fn builtin_identifier(
    entity: &Entity,
    property: &Property,
    owner: &str,
    inner: &TypeExpression,
) -> IdentifierMetadata {
    let qualified = entity.qualified_name();
    let inner_text = if inner.name().contains(" | ") {
        format!("({})", inner.name())
    } else {
        inner.name().to_string()
    };

    IdentifierMetadata {
        name: format!("{}{}", owner, to_pascal_case(&property.name)),
        comment: vec![format!("Identifier type for {}", qualified)],
        type_definition: inner
            .with_name(format!("{} & {{ __brand: '{}' }}", inner_text, qualified)),
    }
}

fn builtin_routine(entity: &Entity, overload: usize) -> RoutineMetadata {
    let mut base = to_pascal_case(&entity.name);
    if overload > 0 {
        base.push_str(&(overload + 1).to_string());
    }
    let tags = entity.tagged_comment();
    let comment = if tags.lines.is_empty() {
        vec![format!("Represents the {}", entity)]
    } else {
        tags.lines
    };

    let parameter_names = match &entity.kind {
        EntityKind::Routine { parameters, .. } => parameters
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if p.name.is_empty() {
                    format!("arg{}", i + 1)
                } else {
                    p.name.clone()
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    RoutineMetadata {
        path: entity_path(entity),
        comment,
        parameters_name: format!("{}Params", base),
        return_name: format!("{}Return", base),
        parameter_names,
    }
}

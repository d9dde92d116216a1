//! Per-tree memo of resolved properties.

use std::collections::HashMap;

use tabula_schema::QualifiedName;

use crate::ir::TypeExpression;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScopeKey {
    entity: QualifiedName,
    property: String,
    inner: bool,
}

#[derive(Debug, Clone)]
enum Slot {
    Pending,
    Resolved(TypeExpression),
}

/// What a lookup found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Visit {
    /// Not seen yet; the slot is now pending.
    Fresh,
    /// Re-entered while still being resolved.
    Cycle,
    /// Already resolved in this tree.
    Done(TypeExpression),
}

/// Tracks which properties are being or have been resolved in one tree.
///
/// A scope is created for each top-level resolution and threaded through
/// every nested call, including identifier-type generation. It also records
/// the schema of the consuming declaration, which decides whether imports
/// need a schema-qualified alias.
#[derive(Debug, Clone)]
pub struct ResolutionScope {
    consumer_schema: String,
    slots: HashMap<ScopeKey, Slot>,
}

impl ResolutionScope {
    pub fn new(consumer_schema: impl Into<String>) -> Self {
        Self {
            consumer_schema: consumer_schema.into(),
            slots: HashMap::new(),
        }
    }

    pub fn consumer_schema(&self) -> &str {
        &self.consumer_schema
    }

    /// Look up a slot, marking it pending when it is new.
    pub(crate) fn visit(&mut self, entity: &QualifiedName, property: &str, inner: bool) -> Visit {
        let key = ScopeKey {
            entity: entity.clone(),
            property: property.to_string(),
            inner,
        };
        match self.slots.get(&key) {
            Some(Slot::Pending) => Visit::Cycle,
            Some(Slot::Resolved(ty)) => Visit::Done(ty.clone()),
            None => {
                self.slots.insert(key, Slot::Pending);
                Visit::Fresh
            }
        }
    }

    /// Store the final result of a pending slot.
    pub(crate) fn complete(
        &mut self,
        entity: &QualifiedName,
        property: &str,
        inner: bool,
        ty: TypeExpression,
    ) {
        let key = ScopeKey {
            entity: entity.clone(),
            property: property.to_string(),
            inner,
        };
        self.slots.insert(key, Slot::Resolved(ty));
    }

    /// Number of slots touched so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

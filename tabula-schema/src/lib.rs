//! Schema entity graph for the Tabula generator.
//!
//! This crate defines the read-only view of a database schema that code
//! generation works from: entities (tables, views, composite types, enums,
//! domains, ranges, routines), their properties, and the references between
//! them. Live introspection is not part of Tabula; graphs are loaded from a
//! JSON snapshot through a [`SchemaProvider`].
//!
//! # Architecture
//!
//! ```text
//! snapshot.json → SchemaProvider → Snapshot { SchemaGraph } → codegen
//! ```

mod entity;
mod graph;
mod property;
mod provider;
mod tags;

pub use entity::{Entity, EntityKind, QualifiedName, RoutineReturn};
pub use graph::SchemaGraph;
pub use property::{Generated, Property, PropertyRef, TypeDescriptor, TypeKind};
pub use provider::{SchemaProvider, Snapshot, SnapshotProvider};
pub use tags::TaggedComment;

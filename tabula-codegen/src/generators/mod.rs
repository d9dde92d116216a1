//! Built-in entity generators, one per entity family.

mod composite;
mod domain;
mod enums;
mod routine;

pub use composite::CompositeGenerator;
pub use domain::{DomainGenerator, RangeGenerator};
pub use enums::{EnumGenerator, literal_union, string_literal};
pub use routine::RoutineGenerator;

//! Built-in pre-render and post-render hooks.

mod banner;
mod enum_tables;
mod index_file;

pub use banner::MarkAsGenerated;
pub use enum_tables::{EnumTables, EnumValueSource};
pub use index_file::IndexFile;

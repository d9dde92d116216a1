//! Manifest types and parsing for tabula.toml files.

mod parse;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;

/// Where the schema comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectionConfig {
    /// JSON snapshot produced by the introspection step.
    pub snapshot: PathBuf,
}

/// Where generated files go.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    pub path: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "ts".to_string()
}

/// How enums are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumStyle {
    /// `type Mood = 'happy' | 'sad';`
    #[default]
    LiteralUnion,
    /// `enum Mood { happy = 'happy', ... }`
    Enum,
}

impl fmt::Display for EnumStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumStyle::LiteralUnion => write!(f, "literal-union"),
            EnumStyle::Enum => write!(f, "enum"),
        }
    }
}

/// Generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GenerateConfig {
    /// Schemas to generate; empty means every schema in the snapshot.
    pub schemas: Vec<String>,
    /// Emit branded identifier types for primary keys.
    pub identifier_types: bool,
    pub enum_style: EnumStyle,
    /// Drop `| null` from initializer fields that are already optional.
    pub strip_null_from_optional: bool,
    /// Emit `import type` for generated type references.
    pub prefer_type_imports: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            identifier_types: true,
            enum_style: EnumStyle::default(),
            strip_null_from_optional: false,
            prefer_type_imports: true,
        }
    }
}

/// A `[type-map]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeMapEntry {
    /// A built-in type name used verbatim, e.g. `"bigint"`.
    Name(String),
    /// A named type imported from a module.
    Import {
        name: String,
        from: String,
        #[serde(default)]
        default: bool,
    },
}

/// Built-in hooks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HooksConfig {
    /// Prepend a "generated, do not edit" banner to every file.
    pub banner: bool,
    /// Emit an `index` file re-exporting every declaration.
    pub index_file: bool,
    /// Turn `@enum` tables into literal unions of their rows.
    pub enum_tables: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            banner: true,
            index_file: false,
            enum_tables: true,
        }
    }
}

/// Root manifest for tabula.toml
#[derive(Debug, Clone)]
pub struct Manifest {
    pub connection: ConnectionConfig,
    pub output: OutputConfig,
    pub generate: GenerateConfig,
    /// Raw type name -> override, in file order.
    pub type_map: IndexMap<String, TypeMapEntry>,
    pub hooks: HooksConfig,
}

impl Manifest {
    /// A manifest with default settings.
    pub fn new(snapshot: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            connection: ConnectionConfig {
                snapshot: snapshot.into(),
            },
            output: OutputConfig {
                path: output.into(),
                extension: default_extension(),
            },
            generate: GenerateConfig::default(),
            type_map: IndexMap::new(),
            hooks: HooksConfig::default(),
        }
    }

    /// Resolve relative paths against `dir` (usually the manifest's directory).
    pub fn rebase(mut self, dir: &Path) -> Self {
        if self.connection.snapshot.is_relative() {
            self.connection.snapshot = dir.join(&self.connection.snapshot);
        }
        if self.output.path.is_relative() {
            self.output.path = dir.join(&self.output.path);
        }
        self
    }
}

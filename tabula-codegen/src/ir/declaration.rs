//! Declaration IR.
//!
//! Entity generators emit [`Declaration`]s; the renderer turns them into
//! source text. The IR serializes with an explicit `declarationType`
//! discriminant so it can be dumped and inspected.

use serde::{Deserialize, Serialize};

use super::ImportRecord;

/// How a declaration is exported from its file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportAs {
    #[default]
    Named,
    Default,
}

/// A field of an interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceField {
    pub name: String,
    /// Element type text; array suffixes come from `dimensions`.
    pub type_name: String,
    pub nullable: bool,
    pub optional: bool,
    #[serde(default)]
    pub dimensions: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comment: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportRecord>,
}

/// One top-level item of a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "declarationType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Declaration {
    /// `type Name = definition;`
    TypeAlias {
        name: String,
        comment: Vec<String>,
        export_as: ExportAs,
        type_definition: String,
        imports: Vec<ImportRecord>,
    },
    /// `interface Name { ... }`
    Interface {
        name: String,
        comment: Vec<String>,
        export_as: ExportAs,
        fields: Vec<InterfaceField>,
    },
    /// `enum Name { value = 'value', ... }`
    Enum {
        name: String,
        comment: Vec<String>,
        export_as: ExportAs,
        values: Vec<String>,
    },
    /// `const name: type = value;`
    Constant {
        name: String,
        comment: Vec<String>,
        export_as: ExportAs,
        type_name: Option<String>,
        value: Vec<String>,
        imports: Vec<ImportRecord>,
    },
    /// Pre-formatted lines emitted verbatim.
    Generic {
        comment: Vec<String>,
        lines: Vec<String>,
        imports: Vec<ImportRecord>,
    },
}

impl Declaration {
    /// The declared name; `None` for generic blocks.
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::TypeAlias { name, .. }
            | Declaration::Interface { name, .. }
            | Declaration::Enum { name, .. }
            | Declaration::Constant { name, .. } => Some(name),
            Declaration::Generic { .. } => None,
        }
    }

    pub fn comment(&self) -> &[String] {
        match self {
            Declaration::TypeAlias { comment, .. }
            | Declaration::Interface { comment, .. }
            | Declaration::Enum { comment, .. }
            | Declaration::Constant { comment, .. }
            | Declaration::Generic { comment, .. } => comment,
        }
    }

    /// Export mode; generic blocks carry their own `export` keywords.
    pub fn export_as(&self) -> Option<ExportAs> {
        match self {
            Declaration::TypeAlias { export_as, .. }
            | Declaration::Interface { export_as, .. }
            | Declaration::Enum { export_as, .. }
            | Declaration::Constant { export_as, .. } => Some(*export_as),
            Declaration::Generic { .. } => None,
        }
    }

    /// Whether the declaration only exists at the type level.
    pub fn is_type_only(&self) -> bool {
        matches!(
            self,
            Declaration::TypeAlias { .. } | Declaration::Interface { .. }
        )
    }

    /// Every import the declaration and its fields need, in field order.
    pub fn imports(&self) -> Vec<&ImportRecord> {
        match self {
            Declaration::TypeAlias { imports, .. }
            | Declaration::Constant { imports, .. }
            | Declaration::Generic { imports, .. } => imports.iter().collect(),
            Declaration::Interface { fields, .. } => {
                fields.iter().flat_map(|f| f.imports.iter()).collect()
            }
            Declaration::Enum { .. } => Vec::new(),
        }
    }
}

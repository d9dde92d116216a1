//! Resolved type expressions and the imports they need.

use serde::{Deserialize, Serialize};

/// Where an import comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ImportSource {
    /// A module specifier used verbatim, e.g. `postgres-interval`.
    Absolute(String),
    /// An output path relative to the output root, without extension,
    /// e.g. `public/Users`.
    Relative(String),
}

/// One binding a declaration needs from another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Exported name, or the local binding for default imports.
    pub name: String,
    /// Local binding for named imports, when it differs from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub is_default: bool,
    pub source: ImportSource,
    pub type_only: bool,
}

impl ImportRecord {
    /// A named import.
    pub fn named(name: impl Into<String>, source: ImportSource) -> Self {
        Self {
            name: name.into(),
            alias: None,
            is_default: false,
            source,
            type_only: false,
        }
    }

    /// A default import bound to `binding`.
    pub fn default_export(binding: impl Into<String>, source: ImportSource) -> Self {
        Self {
            is_default: true,
            ..Self::named(binding, source)
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn type_only(mut self, type_only: bool) -> Self {
        self.type_only = type_only;
        self
    }

    /// The name the binding has inside the importing file.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// The type of a property or alias, as written in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeExpression {
    /// A built-in type (`string`, `number`, `unknown`) needing no import.
    Builtin { name: String },
    /// A type that must be imported.
    Named {
        name: String,
        imports: Vec<ImportRecord>,
    },
}

impl TypeExpression {
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Builtin { name: name.into() }
    }

    pub fn named(name: impl Into<String>, imports: Vec<ImportRecord>) -> Self {
        Self::Named {
            name: name.into(),
            imports,
        }
    }

    /// The sentinel for types that could not be resolved.
    pub fn unknown() -> Self {
        Self::builtin("unknown")
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Builtin { name } | Self::Named { name, .. } => name,
        }
    }

    pub fn imports(&self) -> &[ImportRecord] {
        match self {
            Self::Builtin { .. } => &[],
            Self::Named { imports, .. } => imports,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Builtin { name } if name == "unknown")
    }

    /// A union of distinct expressions, names joined with ` | `.
    ///
    /// Returns `unknown` for an empty input.
    pub fn union(types: Vec<TypeExpression>) -> Self {
        let mut members: Vec<TypeExpression> = Vec::new();
        for ty in types {
            if !members.contains(&ty) {
                members.push(ty);
            }
        }

        match members.len() {
            0 => Self::unknown(),
            1 => members.remove(0),
            _ => {
                let name = members
                    .iter()
                    .map(TypeExpression::name)
                    .collect::<Vec<_>>()
                    .join(" | ");
                let mut imports: Vec<ImportRecord> = Vec::new();
                for record in members.iter().flat_map(|m| m.imports()) {
                    if !imports.contains(record) {
                        imports.push(record.clone());
                    }
                }
                if imports.is_empty() {
                    Self::builtin(name)
                } else {
                    Self::named(name, imports)
                }
            }
        }
    }

    /// Same imports, different text.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        match self {
            Self::Builtin { .. } => Self::builtin(name),
            Self::Named { imports, .. } => Self::named(name, imports.clone()),
        }
    }
}

/// Append `dimensions` array suffixes to a type, parenthesising unions.
pub fn array_type(name: &str, dimensions: usize) -> String {
    if dimensions == 0 {
        return name.to_string();
    }
    let base = if name.contains(" | ") || name.contains(" & ") {
        format!("({})", name)
    } else {
        name.to_string()
    };
    format!("{}{}", base, "[]".repeat(dimensions))
}

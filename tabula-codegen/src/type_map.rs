//! Raw database type → target type lookup.

use indexmap::IndexMap;
use tabula_manifest::TypeMapEntry;

use crate::ir::{ImportRecord, ImportSource, TypeExpression};

/// Maps fully-qualified raw type names (`pg_catalog.int4`) to type expressions.
///
/// Maps are layered: a language supplies its built-in defaults and the
/// manifest's `[type-map]` entries replace them one by one.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    entries: IndexMap<String, TypeExpression>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, raw: impl Into<String>, ty: TypeExpression) -> &mut Self {
        self.entries.insert(raw.into(), ty);
        self
    }

    pub fn get(&self, raw: &str) -> Option<&TypeExpression> {
        self.entries.get(raw)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains_key(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layer manifest overrides on top of this map.
    pub fn with_overrides(mut self, overrides: &IndexMap<String, TypeMapEntry>) -> Self {
        for (raw, entry) in overrides {
            self.entries.insert(raw.clone(), entry_to_type(entry));
        }
        self
    }
}

impl<K: Into<String>> FromIterator<(K, TypeExpression)> for TypeMap {
    fn from_iter<I: IntoIterator<Item = (K, TypeExpression)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn entry_to_type(entry: &TypeMapEntry) -> TypeExpression {
    match entry {
        TypeMapEntry::Name(name) => TypeExpression::builtin(name),
        TypeMapEntry::Import {
            name,
            from,
            default,
        } => {
            let source = ImportSource::Absolute(from.clone());
            let record = if *default {
                ImportRecord::default_export(name, source)
            } else {
                ImportRecord::named(name, source)
            };
            TypeExpression::named(name, vec![record.type_only(true)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> TypeMap {
        [
            ("pg_catalog.int4", TypeExpression::builtin("number")),
            ("pg_catalog.int8", TypeExpression::builtin("string")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let map = defaults();
        assert_eq!(map.get("pg_catalog.int4"), Some(&TypeExpression::builtin("number")));
        assert!(map.get("pg_catalog.money").is_none());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "pg_catalog.int8".to_string(),
            TypeMapEntry::Name("bigint".into()),
        );
        overrides.insert(
            "public.citext".to_string(),
            TypeMapEntry::Import {
                name: "CiText".into(),
                from: "citext-ts".into(),
                default: true,
            },
        );

        let map = defaults().with_overrides(&overrides);
        assert_eq!(map.get("pg_catalog.int8"), Some(&TypeExpression::builtin("bigint")));

        let citext = map.get("public.citext").unwrap();
        assert_eq!(citext.name(), "CiText");
        let record = &citext.imports()[0];
        assert!(record.is_default);
        assert_eq!(record.source, ImportSource::Absolute("citext-ts".into()));
    }
}

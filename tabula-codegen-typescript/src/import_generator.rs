//! Per-file import collection.

use indexmap::IndexMap;
use tabula_codegen::{
    CodegenError,
    ir::{ImportRecord, ImportSource},
};

use crate::ast::{Import, ImportMember};

#[derive(Debug, Clone)]
struct Binding {
    name: String,
    alias: Option<String>,
    type_only: bool,
}

#[derive(Debug, Default)]
struct ImportGroup {
    default: Option<Binding>,
    named: Vec<Binding>,
}

impl ImportGroup {
    fn all_type_only(&self) -> bool {
        self.default.iter().chain(&self.named).all(|b| b.type_only)
    }

    fn to_import(&self, location: &str) -> Import {
        let mut import = Import::new(location);
        if let Some(default) = &self.default {
            import = import.default(&default.name);
        }

        let all_type_only = self.all_type_only();
        for binding in &self.named {
            let mut member = ImportMember::new(&binding.name);
            if let Some(alias) = &binding.alias {
                member = member.alias(alias);
            }
            if binding.type_only && !all_type_only {
                member = member.type_only();
            }
            import = import.member(member);
        }

        if all_type_only {
            import = import.type_only();
        }
        import
    }
}

/// Collects the imports of one output file and renders one statement per
/// module location.
#[derive(Debug)]
pub struct ImportGenerator {
    path: String,
    groups: IndexMap<String, ImportGroup>,
}

impl ImportGenerator {
    /// An import generator for the file at `path` (extension-less, relative
    /// to the output root).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            groups: IndexMap::new(),
        }
    }

    /// Record one import.
    ///
    /// Imports of the file itself are ignored. A second, different default
    /// binding for the same location is an error.
    pub fn add_import(&mut self, record: &ImportRecord) -> Result<(), CodegenError> {
        let location = match &record.source {
            ImportSource::Absolute(module) => module.clone(),
            ImportSource::Relative(target) if *target == self.path => return Ok(()),
            ImportSource::Relative(target) => relative_location(&self.path, target),
        };

        let group = self.groups.entry(location.clone()).or_default();

        if record.is_default {
            match &mut group.default {
                Some(existing) if existing.name == record.name => {
                    existing.type_only &= record.type_only;
                }
                Some(existing) => {
                    return Err(CodegenError::ConflictingDefaultImport {
                        location,
                        existing: existing.name.clone(),
                        requested: record.name.clone(),
                    });
                }
                None => {
                    group.default = Some(Binding {
                        name: record.name.clone(),
                        alias: None,
                        type_only: record.type_only,
                    });
                }
            }
            return Ok(());
        }

        match group
            .named
            .iter_mut()
            .find(|b| b.name == record.name && b.alias == record.alias)
        {
            Some(existing) => existing.type_only &= record.type_only,
            None => group.named.push(Binding {
                name: record.name.clone(),
                alias: record.alias.clone(),
                type_only: record.type_only,
            }),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// One import statement per location, in first-added order.
    pub fn generate_lines(&self) -> Vec<String> {
        self.groups
            .iter()
            .map(|(location, group)| group.to_import(location).to_line())
            .collect()
    }
}

/// The module specifier that reaches `target` from the file at `from`.
///
/// Both paths are extension-less and relative to the output root.
pub fn relative_location(from: &str, target: &str) -> String {
    let from_dir: Vec<&str> = from.split('/').collect();
    let from_dir = &from_dir[..from_dir.len().saturating_sub(1)];
    let target: Vec<&str> = target.split('/').collect();

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dir.len() - common;
    let rest = target[common..].join("/");

    if ups == 0 {
        format!("./{}", rest)
    } else {
        format!("{}{}", "../".repeat(ups), rest)
    }
}

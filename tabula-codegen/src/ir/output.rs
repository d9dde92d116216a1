//! The path → declarations map shared by generators and hooks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Declaration;

/// Declarations grouped by output path.
///
/// Paths are relative to the output root and carry no extension
/// (`public/Users`). Paths and the declarations within them keep
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Output {
    files: IndexMap<String, Vec<Declaration>>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration to `path`.
    pub fn push(&mut self, path: impl Into<String>, declaration: Declaration) {
        self.files.entry(path.into()).or_default().push(declaration);
    }

    /// Replace everything at `path`.
    pub fn insert(&mut self, path: impl Into<String>, declarations: Vec<Declaration>) {
        self.files.insert(path.into(), declarations);
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<Declaration>> {
        self.files.shift_remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&[Declaration]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Vec<Declaration>> {
        self.files.get_mut(path)
    }

    /// Find a named declaration at `path`.
    pub fn find(&self, path: &str, name: &str) -> Option<&Declaration> {
        self.get(path)?.iter().find(|d| d.name() == Some(name))
    }

    /// Find a named declaration at `path` for modification.
    pub fn find_mut(&mut self, path: &str, name: &str) -> Option<&mut Declaration> {
        self.get_mut(path)?
            .iter_mut()
            .find(|d| d.name() == Some(name))
    }

    /// Merge `other` into this output, appending to shared paths.
    pub fn merge(&mut self, other: Output) {
        for (path, declarations) in other.files {
            self.files.entry(path).or_default().extend(declarations);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.files.iter().map(|(p, d)| (p.as_str(), d.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn declaration_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

impl IntoIterator for Output {
    type Item = (String, Vec<Declaration>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Declaration>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ExportAs;

    fn alias(name: &str) -> Declaration {
        Declaration::TypeAlias {
            name: name.into(),
            comment: Vec::new(),
            export_as: ExportAs::Named,
            type_definition: "string".into(),
            imports: Vec::new(),
        }
    }

    #[test]
    fn test_push_keeps_order() {
        let mut output = Output::new();
        output.push("public/Users", alias("UsersId"));
        output.push("public/Posts", alias("PostsId"));
        output.push("public/Users", alias("Users"));

        assert_eq!(output.paths().collect::<Vec<_>>(), vec!["public/Users", "public/Posts"]);
        let names: Vec<_> = output.get("public/Users").unwrap().iter().filter_map(Declaration::name).collect();
        assert_eq!(names, vec!["UsersId", "Users"]);
        assert_eq!(output.declaration_count(), 3);
    }

    #[test]
    fn test_merge_appends() {
        let mut a = Output::new();
        a.push("public/Users", alias("UsersId"));
        let mut b = Output::new();
        b.push("public/Users", alias("Users"));
        b.push("index", alias("Index"));

        a.merge(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get("public/Users").unwrap().len(), 2);
    }

    #[test]
    fn test_find_mut_and_remove() {
        let mut output = Output::new();
        output.push("public/Users", alias("UsersId"));

        if let Some(Declaration::TypeAlias { type_definition, .. }) =
            output.find_mut("public/Users", "UsersId")
        {
            *type_definition = "number".into();
        }
        assert!(matches!(
            output.find("public/Users", "UsersId"),
            Some(Declaration::TypeAlias { type_definition, .. }) if type_definition == "number"
        ));

        assert!(output.remove("public/Users").is_some());
        assert!(output.is_empty());
    }
}

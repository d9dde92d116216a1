//! TypeScript export statement builder.

use tabula_codegen::{CodeBuilder, CodeFragment, Renderable};

/// Builder for TypeScript export statements.
#[derive(Debug, Clone)]
pub struct Export {
    from: Option<String>,
    default: Option<String>,
    named: Vec<String>,
    type_only: bool,
}

impl Export {
    pub fn new() -> Self {
        Self {
            from: None,
            default: None,
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Re-export from another module.
    pub fn from(mut self, module: impl Into<String>) -> Self {
        self.from = Some(module.into());
        self
    }

    /// Export as default.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Export a named item.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Export an item under another name (`default as Users`).
    pub fn named_as(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.named.push(format!("{} as {}", name.into(), alias.into()));
        self
    }

    /// Make this a type-only export (`export type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// The statement as a single line, or `None` for an empty export.
    pub fn to_line(&self) -> Option<String> {
        let type_kw = if self.type_only { "type " } else { "" };

        match (&self.from, &self.default, self.named.is_empty()) {
            // Re-export all: export * from "module"
            (Some(from), None, true) => Some(format!("export * from \"{}\";", from)),
            // Re-export named: export { a, b } from "module"
            (Some(from), None, false) => Some(format!(
                "export {}{{ {} }} from \"{}\";",
                type_kw,
                self.named.join(", "),
                from
            )),
            // Export default: export default foo
            (None, Some(def), true) => Some(format!("export default {};", def)),
            // Export named: export { a, b }
            (None, None, false) => Some(format!(
                "export {}{{ {} }};",
                type_kw,
                self.named.join(", ")
            )),
            _ => None,
        }
    }

    /// Build the export as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.to_line().map(CodeFragment::line).into_iter().collect()
    }
}

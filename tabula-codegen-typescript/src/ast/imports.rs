//! TypeScript import statement builder.

use tabula_codegen::{CodeBuilder, CodeFragment, Renderable};

/// One binding inside the braces of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMember {
    pub name: String,
    pub alias: Option<String>,
    /// Rendered with an inline `type` marker.
    pub type_only: bool,
}

impl ImportMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_only: false,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    fn render(&self) -> String {
        let marker = if self.type_only { "type " } else { "" };
        match &self.alias {
            Some(alias) => format!("{}{} as {}", marker, self.name, alias),
            None => format!("{}{}", marker, self.name),
        }
    }
}

/// Builder for TypeScript import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    default: Option<String>,
    named: Vec<ImportMember>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Import a default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(ImportMember::new(name));
        self
    }

    /// Import a named export with full configuration.
    pub fn member(mut self, member: ImportMember) -> Self {
        self.named.push(member);
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// The statement as a single line.
    pub fn to_line(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        let named = self
            .named
            .iter()
            .map(ImportMember::render)
            .collect::<Vec<_>>()
            .join(", ");

        match (&self.default, self.named.is_empty()) {
            (Some(def), true) => {
                format!("import {}{} from \"{}\";", type_kw, def, self.from)
            }
            // `import type D, { X }` is not valid TypeScript
            (Some(def), false) if self.type_only => {
                format!(
                    "import type {{ default as {}, {} }} from \"{}\";",
                    def, named, self.from
                )
            }
            (Some(def), false) => {
                format!(
                    "import {}{}, {{ {} }} from \"{}\";",
                    type_kw, def, named, self.from
                )
            }
            (None, false) => {
                format!("import {}{{ {} }} from \"{}\";", type_kw, named, self.from)
            }
            (None, true) => {
                format!("import \"{}\";", self.from)
            }
        }
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.to_line())]
    }
}

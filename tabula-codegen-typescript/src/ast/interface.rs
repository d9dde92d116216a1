//! TypeScript interface builder.

use tabula_codegen::{CodeBuilder, CodeFragment, Renderable};

/// A field in a TypeScript interface.
#[derive(Debug, Clone)]
pub struct InterfaceField {
    /// Property key, already quoted when needed.
    pub key: String,
    pub ty: String,
    pub optional: bool,
    pub doc: Vec<String>,
}

impl InterfaceField {
    pub fn new(key: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ty: ty.into(),
            optional: false,
            doc: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn doc(mut self, doc: Vec<String>) -> Self {
        self.doc = doc;
        self
    }

    fn to_line(&self) -> String {
        let optional = if self.optional { "?" } else { "" };
        format!("{}{}: {};", self.key, optional, self.ty)
    }
}

/// Builder for TypeScript interfaces.
///
/// Fields are separated by blank lines so their doc comments stay readable.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Vec<String>,
    fields: Vec<InterfaceField>,
    export: &'static str,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            fields: Vec::new(),
            export: "export ",
        }
    }

    pub fn doc(mut self, doc: Vec<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn field_with(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// Export as the module's default (`export default interface`).
    pub fn default_export(mut self) -> Self {
        self.export = "export default ";
        self
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }

    fn fields_to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                fragments.push(CodeFragment::blank());
            }
            fragments.push(CodeFragment::JsDoc(field.doc.clone()));
            fragments.push(CodeFragment::line(field.to_line()));
        }
        fragments
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = format!("{}interface {}", self.export, self.name);
        let body = if self.fields.is_empty() {
            CodeFragment::line(format!("{} {{}}", header))
        } else {
            CodeFragment::block(
                format!("{} {{", header),
                self.fields_to_fragments(),
                Some("}".to_string()),
            )
        };
        vec![CodeFragment::JsDoc(self.doc.clone()), body]
    }
}

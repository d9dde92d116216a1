//! Naming conventions for target languages.

use tabula_core::is_identifier;

/// Language-specific naming rules.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word used as a declaration name (e.g. `type` -> `_type`)
    pub escape_reserved: fn(&str) -> String,
    /// Quote a string as a literal (e.g. `it's` -> `'it\'s'`)
    pub quote: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// A name safe to declare: reserved words are escaped, characters an
    /// identifier cannot hold are dropped and a `_` is prefixed when the
    /// rest cannot start one (e.g. `2faCodes` -> `_2faCodes`).
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            return (self.escape_reserved)(name);
        }
        let mut safe: String = name
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        if !is_identifier(&safe) {
            safe.insert(0, '_');
        }
        safe
    }

    /// A property key: bare when it is an identifier, quoted otherwise.
    ///
    /// Reserved words are valid property keys and stay bare.
    pub fn property_key(&self, name: &str) -> String {
        if is_identifier(name) {
            name.to_string()
        } else {
            (self.quote)(name)
        }
    }
}

//! Structured tags embedded in database comments.
//!
//! A tag is written `@name` or `@name:value`. The tags in [`SPACED_VALUE_TAGS`]
//! also take the next word as value (`@type Mood`). Tags are removed from the
//! comment text; unknown tags are kept in the map and ignored by consumers
//! that don't recognise them.

use indexmap::IndexMap;

/// Tags whose value may follow after a space.
const SPACED_VALUE_TAGS: &[&str] = &["type", "from"];

/// A comment split into its free-text lines and its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedComment {
    /// Comment text with tags removed.
    pub lines: Vec<String>,
    /// Tag name -> optional value, in order of first appearance.
    pub tags: IndexMap<String, Option<String>>,
}

impl TaggedComment {
    /// Parse a raw comment. `None` yields an empty comment.
    pub fn parse(comment: Option<&str>) -> Self {
        let mut parsed = Self::default();
        let Some(comment) = comment else {
            return parsed;
        };

        for line in comment.lines() {
            let mut words = Vec::new();
            let mut had_tag = false;
            let mut tokens = line.split_whitespace().peekable();

            while let Some(token) = tokens.next() {
                let Some((name, inline_value)) = split_tag(token) else {
                    words.push(token);
                    continue;
                };
                had_tag = true;

                let value = match inline_value {
                    Some(value) => Some(value.to_string()),
                    None if SPACED_VALUE_TAGS.contains(&name) => tokens
                        .next_if(|next| !next.starts_with('@'))
                        .map(str::to_string),
                    None => None,
                };
                parsed.tags.entry(name.to_string()).or_insert(value);
            }

            let text = words.join(" ");
            if !(had_tag && text.is_empty()) {
                parsed.lines.push(if had_tag { text } else { line.trim().to_string() });
            }
        }

        while parsed.lines.first().is_some_and(|l| l.is_empty()) {
            parsed.lines.remove(0);
        }
        while parsed.lines.last().is_some_and(|l| l.is_empty()) {
            parsed.lines.pop();
        }

        parsed
    }

    /// Whether the tag is present, with or without a value.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// The value of a tag, if present and valued.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).and_then(|v| v.as_deref())
    }
}

/// Split `@name` / `@name:value` tokens. Returns `None` for ordinary words.
fn split_tag(token: &str) -> Option<(&str, Option<&str>)> {
    let body = token.strip_prefix('@')?;
    let (name, value) = match body.split_once(':') {
        Some((name, value)) => (name, Some(value).filter(|v| !v.is_empty())),
        None => (body, None),
    };

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some((name, value))
}

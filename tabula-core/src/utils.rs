//! Shared utility functions for code generation.

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == '_' || c == '-' || c == ' ' || c == '.')
        .filter(|part| !part.is_empty())
}

/// Convert a string to PascalCase (e.g., "user_accounts" -> "UserAccounts")
pub fn to_pascal_case(s: &str) -> String {
    words(s)
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Check whether a string can be used as a bare JavaScript identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

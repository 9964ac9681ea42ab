//! Company name helpers shared by the cache, the resolver and the roster
//!
//! The normalized name is the canonical cache key; initials are the
//! placeholder rendered when no logo can be resolved.

/// Placeholder used when a name contains no usable characters
pub const FALLBACK_INITIALS: &str = "CO";

/// Canonical cache key: lowercased and trimmed
pub fn normalize_company_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Derive an initials badge of at most two uppercase alphanumeric characters
///
/// Non-word characters are dropped before splitting on whitespace. A single
/// word yields its first two characters, several words yield the first
/// character of each of the first two.
pub fn company_initials(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let picked: Vec<char> = match words.as_slice() {
        [] => return FALLBACK_INITIALS.to_string(),
        [only] => only.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };

    let initials: String = picked
        .into_iter()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .collect();

    if initials.is_empty() {
        FALLBACK_INITIALS.to_string()
    } else {
        initials
    }
}

//! Text canonicalization for answer comparison.
//!
//! Both key points and learner answers go through [`normalize`] before they
//! are compared, so casing, accents and punctuation never cause a mismatch.

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block (U+0300..=U+036F).
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// ASCII word characters, hyphen and whitespace. Letters without an ASCII
/// decomposition (`œ`, `ß`, other scripts) become spaces.
fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}

/// Canonicalize free text: lowercase, strip accents and punctuation, collapse
/// whitespace, trim. Never fails; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an optional value; absent text is treated as empty.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

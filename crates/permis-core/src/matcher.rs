//! Key-point presence checks.

use crate::normalize::normalize;

/// Fraction of a multi-word key point's tokens, in tenths, that must appear
/// in the answer for the key point to count as present.
pub const TOKEN_COVERAGE_TENTHS: usize = 7;

/// Number of tokens required out of `token_count`, i.e. `ceil(0.7 * n)`.
pub fn required_tokens(token_count: usize) -> usize {
    (token_count * TOKEN_COVERAGE_TENTHS).div_ceil(10)
}

/// Decide whether `key_point` is covered by an already normalized answer.
///
/// A key point is present when its normalized form is a substring of the
/// answer. Multi-word key points are also present when at least
/// [`required_tokens`] of their tokens each appear as a substring. A single
/// word gets no such fallback.
pub fn is_present(key_point: &str, normalized_answer: &str) -> bool {
    let kp = normalize(key_point);
    if kp.is_empty() {
        return false;
    }

    if normalized_answer.contains(&kp) {
        return true;
    }

    let tokens: Vec<&str> = kp.split_whitespace().collect();
    if tokens.len() < 2 {
        return false;
    }

    let hits = tokens
        .iter()
        .filter(|token| normalized_answer.contains(*token))
        .count();
    let needed = required_tokens(tokens.len());
    tracing::trace!(key_point = %kp, hits, needed, "fuzzy key-point check");
    hits >= needed
}

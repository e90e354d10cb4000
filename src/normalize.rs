//! Text normalization for similarity comparison.
//!
//! All fuzzy matching in the verification cascade operates on normalized
//! text: lowercased, stripped of punctuation, with whitespace collapsed.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is neither a word character nor whitespace.
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
    /// Runs of whitespace.
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize text for comparison: lowercase, strip punctuation, collapse
/// whitespace runs to a single space, trim.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

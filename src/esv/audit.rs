//! Heuristic sanity auditing of the passage cache.
//!
//! Read-only: flags cache rows that look wrong (missing, mismatched,
//! truncated) without changing anything. Thresholds are deliberately
//! loose; translations legitimately differ in length.

use crate::esv::cache::EsvCache;
use crate::store::Entry;

/// Cached text shorter than half the quoted text is suspicious.
const LOW_LENGTH_RATIO: f64 = 0.5;
/// Cached text more than double the quoted text is suspicious.
const HIGH_LENGTH_RATIO: f64 = 2.0;

/// Characters a complete passage may legitimately end with.
const VALID_ENDINGS: &[char] = &['.', '!', '?', '"', '\u{201d}', '\'', '\u{2019}'];

/// What an audit heuristic flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Entry exists but has no cached passage.
    MissingInCache,
    /// Entry citation and cached citation disagree.
    RefMismatch,
    /// Cached passage text is empty.
    EmptyText,
    /// Cached text much shorter than the quoted text.
    LengthLow,
    /// Cached text much longer than the quoted text.
    LengthHigh,
    /// Cached text ends mid-sentence.
    SuspiciousEnding,
}

impl IssueKind {
    /// Fixed-width label for the audit table.
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingInCache => "Missing in Cache",
            Self::RefMismatch => "Ref Mismatch",
            Self::EmptyText => "Empty Text",
            Self::LengthLow => "Length Warning (Low)",
            Self::LengthHigh => "Length Warning (High)",
            Self::SuspiciousEnding => "Suspicious Ending",
        }
    }
}

/// One flagged cache row.
#[derive(Debug, Clone)]
pub struct AuditIssue {
    /// Entry key.
    pub mmdd: String,
    /// Which heuristic fired.
    pub kind: IssueKind,
    /// Human-readable specifics.
    pub detail: String,
}

impl AuditIssue {
    fn new(mmdd: &str, kind: IssueKind, detail: impl Into<String>) -> Self {
        Self { mmdd: mmdd.to_string(), kind, detail: detail.into() }
    }
}

/// Collapse whitespace runs for reference comparison.
fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Audit the cache against the entry collection.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn audit(entries: &[Entry], cache: &EsvCache) -> Vec<AuditIssue> {
    let mut issues = Vec::new();

    for entry in entries {
        let Some(cached) = cache.get(&entry.mmdd) else {
            issues.push(AuditIssue::new(
                &entry.mmdd,
                IssueKind::MissingInCache,
                "entry has no cached passage",
            ));
            continue;
        };

        let entry_ref = squash(&entry.verse_ref);
        let cache_ref = squash(&cached.reference);
        if entry_ref != cache_ref {
            issues.push(AuditIssue::new(
                &entry.mmdd,
                IssueKind::RefMismatch,
                format!("Entry: '{entry_ref}' vs Cache: '{cache_ref}'"),
            ));
        }

        let cached_text = cached.text.trim();
        if cached_text.is_empty() {
            issues.push(AuditIssue::new(
                &entry.mmdd,
                IssueKind::EmptyText,
                "cached passage text is empty",
            ));
            continue;
        }

        let quoted_len = entry.bible_verse.chars().count();
        let cached_len = cached.text.chars().count();
        if quoted_len > 0 {
            let ratio = cached_len as f64 / quoted_len as f64;
            let pct = (ratio * 100.0) as u32;
            if ratio < LOW_LENGTH_RATIO {
                issues.push(AuditIssue::new(
                    &entry.mmdd,
                    IssueKind::LengthLow,
                    format!("cached text is {pct}% the quoted length ({cached_len} vs {quoted_len} chars)"),
                ));
            } else if ratio > HIGH_LENGTH_RATIO {
                issues.push(AuditIssue::new(
                    &entry.mmdd,
                    IssueKind::LengthHigh,
                    format!("cached text is {pct}% the quoted length ({cached_len} vs {quoted_len} chars)"),
                ));
            }
        }

        if let Some(last) = cached_text.chars().last() {
            if !VALID_ENDINGS.contains(&last) {
                issues.push(AuditIssue::new(
                    &entry.mmdd,
                    IssueKind::SuspiciousEnding,
                    format!("Ends with: '{last}'"),
                ));
            }
        }
    }

    issues
}

//! The verification cascade and batch runner.
//!
//! For each entry the engine decides, in order: strict whole match against
//! the cited verses, subsequence match (protects intentionally elided
//! quotations), chapter-wide longest-match relocation, and finally manual
//! review. The first qualifying stage wins; entries are mutated in place
//! when a correction or expansion is accepted.

use std::collections::BTreeSet;

use crate::align;
use crate::bible::chapter::ChapterIndex;
use crate::bible::reference::{parse_reference, Reference};
use crate::bible::{Bible, BookResolver};
use crate::normalize::normalize;
use crate::store::Entry;

/// Whole-text similarity against the cited verses.
const STRICT_THRESHOLD: f64 = 0.85;
/// Matched-block coverage of the entry text.
const SUBSEQ_THRESHOLD: f64 = 0.90;
/// Longest chapter-wide run coverage of the entry text.
const CHAPTER_THRESHOLD: f64 = 0.85;

/// What the cascade decided for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Quoted text matches the citation; nothing changed.
    Verified,
    /// Text replaced with the canonical text; reference untouched.
    Corrected,
    /// Reference and text rewritten to the verses the quote actually covers.
    Expanded,
    /// Ambiguous; queued for a human.
    NeedsReview,
}

/// One entry queued for manual review. Never mutates the entry.
#[derive(Debug, Clone)]
pub struct ReviewItem {
    /// Entry key.
    pub mmdd: String,
    /// Entry title.
    pub title: String,
    /// Citation as stored.
    pub verse_ref: String,
    /// Quoted text as stored.
    pub text: String,
    /// Why the entry needs a human.
    pub reason: String,
    /// Normalized length of the cited canonical text, when diagnostic.
    pub target_len: Option<usize>,
    /// Normalized length of the quoted text, when diagnostic.
    pub entry_len: Option<usize>,
}

impl ReviewItem {
    fn new(entry: &Entry, reason: impl Into<String>) -> Self {
        Self {
            mmdd: entry.mmdd.clone(),
            title: entry.title.clone(),
            verse_ref: entry.verse_ref.clone(),
            text: entry.bible_verse.clone(),
            reason: reason.into(),
            target_len: None,
            entry_len: None,
        }
    }
}

/// Per-run outcome counters. Each entry increments exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyStats {
    /// Entries verified as-is.
    pub verified: usize,
    /// Entries whose text was overwritten.
    pub corrected: usize,
    /// Entries whose reference and text were rewritten.
    pub expanded: usize,
    /// Entries queued for manual review.
    pub manual_review: usize,
}

impl VerifyStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Verified => self.verified += 1,
            Outcome::Corrected => self.corrected += 1,
            Outcome::Expanded => self.expanded += 1,
            Outcome::NeedsReview => self.manual_review += 1,
        }
    }
}

/// The verification engine.
pub struct Verifier<'a> {
    bible: &'a Bible,
    resolver: BookResolver,
}

impl<'a> Verifier<'a> {
    /// Create an engine over a loaded canonical source.
    pub fn new(bible: &'a Bible) -> Self {
        Self { bible, resolver: BookResolver::new(bible) }
    }

    /// Verify every entry in collection order.
    ///
    /// Counters and the review list are owned here and threaded through
    /// each call; one entry's failure never halts the batch.
    pub fn verify_all(&self, entries: &mut [Entry]) -> (VerifyStats, Vec<ReviewItem>) {
        let mut stats = VerifyStats::default();
        let mut review = Vec::new();
        for entry in entries.iter_mut() {
            let outcome = self.verify_entry(entry, &mut review);
            tracing::debug!(mmdd = %entry.mmdd, ?outcome, "verified entry");
            stats.record(outcome);
        }
        (stats, review)
    }

    /// Run the cascade for one entry, mutating it when a correction or
    /// expansion is accepted.
    #[allow(clippy::cast_precision_loss, clippy::too_many_lines)]
    pub fn verify_entry(&self, entry: &mut Entry, review: &mut Vec<ReviewItem>) -> Outcome {
        if entry.verse_ref.is_empty() || entry.bible_verse.is_empty() {
            review.push(ReviewItem::new(entry, "missing ref or text"));
            return Outcome::NeedsReview;
        }

        let Ok(parsed) = parse_reference(&entry.verse_ref) else {
            review.push(ReviewItem::new(
                entry,
                format!("unparseable ref: {}", entry.verse_ref),
            ));
            return Outcome::NeedsReview;
        };

        let Some(book) = self.resolver.resolve(&parsed.book) else {
            review.push(ReviewItem::new(
                entry,
                format!("unknown book: {}", parsed.book),
            ));
            return Outcome::NeedsReview;
        };

        let chapter = ChapterIndex::assemble(self.bible, book, parsed.chapter);
        if chapter.is_empty() {
            review.push(ReviewItem::new(
                entry,
                format!("empty chapter: {book} {}", parsed.chapter),
            ));
            return Outcome::NeedsReview;
        }

        // An empty verse list cites the whole chapter
        let cited: Vec<u32> = if parsed.verses.is_empty() {
            chapter.verses.keys().copied().collect()
        } else {
            parsed.verses.clone()
        };

        let target_text = chapter.join_verses(&cited);
        let norm_entry = normalize(&entry.bible_verse);
        let norm_target = normalize(&target_text);
        let entry_len = norm_entry.chars().count();

        // Strict whole match against the cited verses
        let strict_ratio = align::similarity(&norm_entry, &norm_target);
        if strict_ratio > STRICT_THRESHOLD {
            if target_text != entry.bible_verse {
                entry.bible_verse = target_text;
                return Outcome::Corrected;
            }
            return Outcome::Verified;
        }

        // High block coverage of the entry against the exact cited verses
        // indicates an intentionally elided quotation. Accept without
        // mutating; rewriting would break ellipses.
        let matched: usize = align::matching_blocks(&norm_target, &norm_entry)
            .iter()
            .map(|m| m.len)
            .sum();
        let subseq_ratio = if entry_len == 0 {
            0.0
        } else {
            matched as f64 / entry_len as f64
        };
        if subseq_ratio > SUBSEQ_THRESHOLD {
            return Outcome::Verified;
        }

        // Locate where in the chapter the quote actually lives
        let longest = align::longest_match(&chapter.normalized, &norm_entry);
        let chapter_ratio = if entry_len == 0 {
            0.0
        } else {
            longest.len as f64 / entry_len as f64
        };
        if chapter_ratio > CHAPTER_THRESHOLD {
            let covered = chapter.verses_in_span(longest.a, longest.a + longest.len);
            if covered.is_empty() {
                review.push(ReviewItem::new(entry, "match found but no verses mapped"));
                return Outcome::NeedsReview;
            }

            let cited_set: BTreeSet<u32> = cited.iter().copied().collect();
            let covered_set: BTreeSet<u32> = covered.iter().copied().collect();
            let new_text = chapter.join_verses(&covered);

            if cited_set != covered_set {
                entry.verse_ref = Reference {
                    book: parsed.book,
                    chapter: parsed.chapter,
                    verses: covered,
                }
                .to_string();
                entry.bible_verse = new_text;
                return Outcome::Expanded;
            }
            if normalize(&new_text) != norm_entry {
                entry.bible_verse = new_text;
                return Outcome::Corrected;
            }
            return Outcome::Verified;
        }

        // Nothing met its threshold; never mutate what we cannot
        // confidently classify
        let best = strict_ratio.max(chapter_ratio);
        let mut item = ReviewItem::new(entry, format!("low match ({best:.2})"));
        item.target_len = Some(norm_target.chars().count());
        item.entry_len = Some(entry_len);
        review.push(item);
        Outcome::NeedsReview
    }
}

//! Chapter text assembly with a verse-offset index.

use std::collections::BTreeMap;

use crate::bible::Bible;
use crate::normalize::normalize;

/// Probe ceiling, comfortably above the longest canonical chapter
/// (Psalm 119 has 176 verses).
const MAX_CHAPTER_VERSES: u32 = 200;

/// A character span of `normalized` covering exactly one verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseSpan {
    /// Span start (inclusive), in characters.
    pub start: usize,
    /// Span end (exclusive), in characters.
    pub end: usize,
    /// Verse number the span covers.
    pub verse: u32,
}

impl VerseSpan {
    /// Half-open interval overlap with `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start.max(start) < self.end.min(end)
    }
}

/// One chapter's raw verses, concatenated normalized text, and the offset
/// index mapping character spans back to verse numbers.
///
/// Spans are contiguous left-to-right, separated by exactly one space in
/// `normalized`, and sorted identically by verse number and by start.
#[derive(Debug, Default)]
pub struct ChapterIndex {
    /// Raw verse text by verse number.
    pub verses: BTreeMap<u32, String>,
    /// All verses' normalized text, space-joined.
    pub normalized: String,
    /// Offset index over `normalized`.
    pub spans: Vec<VerseSpan>,
}

impl ChapterIndex {
    /// Assemble a chapter by probing verses upward from 1.
    ///
    /// Probing stops only when two consecutive lookups both come back
    /// absent, tolerating a single missing verse number. A chapter the
    /// source does not know yields an empty index, which callers treat as
    /// a manual-review condition.
    pub fn assemble(bible: &Bible, book: &str, chapter: u32) -> Self {
        let mut index = Self::default();
        let mut char_len = 0usize;

        for verse in 1..=MAX_CHAPTER_VERSES {
            let Some(text) = present(bible, book, chapter, verse) else {
                if present(bible, book, chapter, verse + 1).is_none() {
                    break;
                }
                continue;
            };

            let norm = normalize(text);
            if char_len > 0 {
                index.normalized.push(' ');
                char_len += 1;
            }
            let start = char_len;
            index.normalized.push_str(&norm);
            char_len += norm.chars().count();
            index.spans.push(VerseSpan { start, end: char_len, verse });
            index.verses.insert(verse, text.to_string());
        }

        index
    }

    /// True when the source had no text for this chapter.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Space-joined raw text of the given verses, skipping ones the
    /// chapter does not have.
    pub fn join_verses(&self, verses: &[u32]) -> String {
        verses
            .iter()
            .filter_map(|v| self.verses.get(v))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Verse numbers whose spans overlap `[start, end)`, in verse order.
    pub fn verses_in_span(&self, start: usize, end: usize) -> Vec<u32> {
        self.spans
            .iter()
            .filter(|s| s.overlaps(start, end))
            .map(|s| s.verse)
            .collect()
    }
}

/// A verse that exists and is non-empty. Absent and empty are treated
/// identically by assembly.
fn present<'a>(bible: &'a Bible, book: &str, chapter: u32, verse: u32) -> Option<&'a str> {
    bible.get_verse(book, chapter, verse).filter(|t| !t.is_empty())
}

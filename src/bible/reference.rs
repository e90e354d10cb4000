//! Scripture citation parsing and verse-range formatting.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// `<book-name> <chapter>[:<verse-list>]`
    static ref REF_RE: Regex =
        Regex::new(r"^(\d?\s?[A-Za-z ]+)\s+(\d+)(?::([\d\-, ]+))?$").unwrap();
}

/// Books with a single chapter. For these, `"<book> <N>"` cites verse `N`
/// of chapter 1 rather than a whole chapter `N`.
const SINGLE_CHAPTER_BOOKS: &[&str] = &[
    "Jude", "Philemon", "Obadiah", "2 John", "3 John", "II John", "III John",
];

/// A citation that does not match the reference grammar.
///
/// Expected and recoverable; the verification engine converts it into a
/// manual-review reason rather than propagating it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scripture reference: {0}")]
pub struct RefParseError(String);

/// A parsed scripture citation.
///
/// An empty verse list means the whole chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Book name as written in the citation.
    pub book: String,
    /// Chapter number (1-based).
    pub chapter: u32,
    /// Cited verse numbers, in citation order.
    pub verses: Vec<u32>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verses.is_empty() {
            write!(f, "{} {}", self.book, self.chapter)
        } else {
            write!(f, "{} {}:{}", self.book, self.chapter, format_verses(&self.verses))
        }
    }
}

/// Parse a citation like `"John 3:16"`, `"Romans 8:28-30,35"`, or
/// `"Psalm 23"`.
///
/// The no-verse-list form is ambiguous: for the single-chapter books the
/// trailing number is a verse of chapter 1 (`"Jude 3"`); for every other
/// book it cites the whole chapter (`"Psalm 23"`).
pub fn parse_reference(input: &str) -> Result<Reference, RefParseError> {
    let input = input.trim();
    let caps = REF_RE
        .captures(input)
        .ok_or_else(|| RefParseError(input.to_string()))?;

    let book = caps[1].trim().to_string();
    let number: u32 = caps[2]
        .parse()
        .map_err(|_| RefParseError(input.to_string()))?;

    if let Some(list) = caps.get(3) {
        let verses = parse_verse_list(list.as_str())
            .ok_or_else(|| RefParseError(input.to_string()))?;
        return Ok(Reference { book, chapter: number, verses });
    }

    if SINGLE_CHAPTER_BOOKS.contains(&book.as_str()) {
        Ok(Reference { book, chapter: 1, verses: vec![number] })
    } else {
        Ok(Reference { book, chapter: number, verses: Vec::new() })
    }
}

/// Parse a comma-separated verse list of numbers and inclusive ranges.
fn parse_verse_list(list: &str) -> Option<Vec<u32>> {
    let mut verses = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let start: u32 = start.trim().parse().ok()?;
            let end: u32 = end.trim().parse().ok()?;
            verses.extend(start..=end);
        } else {
            verses.push(part.parse().ok()?);
        }
    }
    Some(verses)
}

/// Collapse verse numbers into a compact range string.
///
/// Dedupes and sorts, folds consecutive runs into `start-end`, joins runs
/// with `", "`. Empty input yields the empty string.
pub fn format_verses(verses: &[u32]) -> String {
    let mut sorted: Vec<u32> = verses.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut parts: Vec<String> = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let (mut start, mut prev) = (first, first);
    for v in iter.chain(std::iter::once(0)) {
        if v == prev + 1 {
            prev = v;
            continue;
        }
        if start == prev {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{prev}"));
        }
        start = v;
        prev = v;
    }
    parts.join(", ")
}

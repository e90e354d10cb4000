//! Canonical Bible text source and book name resolution.

pub mod chapter;
pub mod reference;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Bible data structure: Book -> Chapter -> Verse -> Text
type BibleData = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// The canonical source text, loaded once at start-up.
///
/// Verse lookup is `Option`-typed so "verse does not exist" is
/// distinguishable from "verse exists and is empty".
pub struct Bible {
    data: BibleData,
}

impl Bible {
    /// Load the canonical text from a JSON file.
    ///
    /// Failure here is fatal for a verification run: partial verification
    /// against a broken source would misclassify every entry.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .map_err(|e| Error::Source(format!("Failed to read {}: {e}", path.display())))?;
        let bible = Self::from_json_str(&content)
            .map_err(|e| Error::Source(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(bible)
    }

    /// Parse the canonical text from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let data: BibleData =
            serde_json::from_str(content).map_err(|e| Error::Source(e.to_string()))?;
        if data.is_empty() {
            return Err(Error::Source("no books in canonical source".to_string()));
        }
        Ok(Self { data })
    }

    /// Canonical book names exposed by the source.
    pub fn books(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Raw text of one verse, or `None` when the verse does not exist.
    pub fn get_verse(&self, book: &str, chapter: u32, verse: u32) -> Option<&str> {
        self.data
            .get(book)?
            .get(&chapter.to_string())?
            .get(&verse.to_string())
            .map(String::as_str)
    }
}

/// Maps citation book-name spellings to the canonical names of the source.
///
/// Seeded from every canonical book name plus accepted aliases: Roman and
/// Arabic numeral-prefix variants in both directions, and a few named
/// special cases.
pub struct BookResolver {
    map: HashMap<String, String>,
}

impl BookResolver {
    /// Build the alias table from the source's canonical book names.
    pub fn new(bible: &Bible) -> Self {
        let mut map = HashMap::new();
        for book in bible.books() {
            map.insert(book.to_string(), book.to_string());
            for (roman, arabic) in [("I ", "1 "), ("II ", "2 "), ("III ", "3 ")] {
                if let Some(rest) = book.strip_prefix(roman) {
                    map.insert(format!("{arabic}{rest}"), book.to_string());
                }
                if let Some(rest) = book.strip_prefix(arabic) {
                    map.insert(format!("{roman}{rest}"), book.to_string());
                }
            }
        }

        // Named special cases, only where the source carries the target
        for (name, canonical) in [("Psalm", "Psalms"), ("Canticles", "Song of Solomon")] {
            if bible.books().any(|b| b == canonical) {
                map.insert(name.to_string(), canonical.to_string());
            }
        }
        // Sources differ on the canonical Revelation spelling
        if let Some(rev) = bible.books().find(|b| b.starts_with("Revelation")) {
            map.insert("Revelation".to_string(), rev.to_string());
        }

        Self { map }
    }

    /// Resolve a citation book name to its canonical form.
    ///
    /// `None` is an expected condition; callers route it to manual review.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }
}

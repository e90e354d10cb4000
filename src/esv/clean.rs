//! Cache text touch-up: terminal punctuation and capitalization.
//!
//! The passage API often returns fragments that start mid-sentence or
//! stop at a clause boundary. This pass makes cached text presentable
//! without re-fetching.

use crate::esv::cache::EsvCache;

/// Quote characters that may precede the first letter.
const OPENING_QUOTES: &[char] = &['"', '\u{201c}', '\'', '\u{2018}'];

/// Trailing punctuation that should become a period.
const DANGLING_ENDINGS: &[char] = &[',', ';', ':', '\u{2014}'];

/// Normalize one passage: repair the ending, capitalize the start,
/// collapse internal whitespace.
pub fn clean_text(text: &str) -> String {
    let mut s = text.trim().to_string();
    if s.is_empty() {
        return s;
    }

    match s.chars().last() {
        Some(c) if DANGLING_ENDINGS.contains(&c) => {
            s.pop();
            s.push('.');
        }
        Some(c) if c.is_alphabetic() => s.push('.'),
        _ => {}
    }

    let mut chars: Vec<char> = s.chars().collect();
    if let Some(&first) = chars.first() {
        if first.is_lowercase() {
            chars[0] = first.to_uppercase().next().unwrap_or(first);
        } else if OPENING_QUOTES.contains(&first) && chars.len() > 1 {
            let second = chars[1];
            if second.is_lowercase() {
                chars[1] = second.to_uppercase().next().unwrap_or(second);
            }
        }
    }

    let joined: String = chars.into_iter().collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Touch up every cached passage. Returns how many changed.
pub fn clean(cache: &mut EsvCache) -> usize {
    let mut fixed = 0;
    for (_, passage) in cache.iter_mut() {
        if passage.text.is_empty() {
            continue;
        }
        let cleaned = clean_text(&passage.text);
        if cleaned != passage.text {
            passage.text = cleaned;
            fixed += 1;
        }
    }
    fixed
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::esv::cache::CachedPassage;

    #[test]
    fn replaces_dangling_punctuation() {
        assert_eq!(clean_text("And he said unto them,"), "And he said unto them.");
        assert_eq!(clean_text("Hear, O Israel;"), "Hear, O Israel.");
        assert_eq!(clean_text("It is written:"), "It is written.");
        assert_eq!(clean_text("The LORD is my strength\u{2014}"), "The LORD is my strength.");
    }

    #[test]
    fn appends_period_after_trailing_letter() {
        assert_eq!(clean_text("but have everlasting life"), "But have everlasting life.");
    }

    #[test]
    fn leaves_good_endings_alone() {
        assert_eq!(clean_text("It is finished."), "It is finished.");
        assert_eq!(clean_text("Is it I?"), "Is it I?");
    }

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(clean_text("knowing this first."), "Knowing this first.");
    }

    #[test]
    fn capitalizes_after_opening_quote() {
        assert_eq!(
            clean_text("\u{201c}knowing this first.\u{201d}"),
            "\u{201c}Knowing this first.\u{201d}"
        );
    }

    #[test]
    fn collapses_double_spaces() {
        assert_eq!(clean_text("In the  beginning   God."), "In the beginning God.");
    }

    #[test]
    fn idempotent() {
        let once = clean_text("and he said,  \u{201c}go in peace;");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn clean_counts_only_changes() {
        let mut cache = EsvCache::default();
        cache.insert("0101", CachedPassage {
            reference: "John 3:16".to_string(),
            text: "for God so loved the world,".to_string(),
        });
        cache.insert("0102", CachedPassage {
            reference: "John 3:17".to_string(),
            text: "Already clean.".to_string(),
        });

        assert_eq!(clean(&mut cache), 1);
        assert_eq!(cache.get("0101").unwrap().text, "For God so loved the world.");
        // second pass finds nothing left to fix
        assert_eq!(clean(&mut cache), 0);
    }
}

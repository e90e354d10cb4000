//! End-to-end tests for the verification pipeline: canonical source and
//! entries loaded from disk, the full cascade, report and persistence.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::path::PathBuf;

use versecheck::bible::Bible;
use versecheck::report::render_report;
use versecheck::store::{load_entries, save_entries};
use versecheck::verify::{Outcome, Verifier};

const JOHN_3_16: &str = "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life.";
const JOHN_3_17: &str = "For God sent not his Son into the world to condemn the world; but that the world through him might be saved.";
const JOHN_3_18: &str = "He that believeth on him is not condemned: but he that believeth not is condemned already, because he hath not believed in the name of the only begotten Son of God.";

/// Write a small canonical source and entry collection into a temp dir.
fn setup(entries_json: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let bible_path = dir.path().join("kjv.json");
    let entries_path = dir.path().join("entries.json");

    let mut bible = serde_json::json!({
        "John": {
            "3": { "16": JOHN_3_16, "17": JOHN_3_17, "18": JOHN_3_18 }
        },
        "Jude": {
            "1": {
                "2": "Mercy unto you, and peace, and love, be multiplied.",
                "3": "Beloved, when I gave all diligence to write unto you of the common salvation."
            }
        }
    });
    // Chapter assembly probes upward from verse 1; populate the chapter
    // below the verses the entries cite
    let john3 = bible["John"]["3"].as_object_mut().unwrap();
    for v in 1..=15u32 {
        john3.insert(
            v.to_string(),
            serde_json::Value::String(format!("And verse {v} spoke of other matters entirely.")),
        );
    }
    fs_err::write(&bible_path, serde_json::to_string_pretty(&bible).unwrap()).unwrap();
    fs_err::write(&entries_path, entries_json).unwrap();

    (dir, bible_path, entries_path)
}

#[test]
fn corrections_and_expansions_persist() {
    let drifted = JOHN_3_16.to_lowercase().replace('.', ",");
    let both = format!("{JOHN_3_16} {JOHN_3_17}");
    let entries_json = serde_json::to_string(&serde_json::json!([
        {
            "mmdd": "0101",
            "title": "Exact",
            "verse_ref": "John 3:16",
            "bible_verse": JOHN_3_16,
            "poem": "kept as-is"
        },
        {
            "mmdd": "0102",
            "title": "Drifted",
            "verse_ref": "John 3:16",
            "bible_verse": drifted
        },
        {
            "mmdd": "0103",
            "title": "Underinclusive",
            "verse_ref": "John 3:16",
            "bible_verse": both
        },
        {
            "mmdd": "0104",
            "title": "Unknown book",
            "verse_ref": "Gondor 3:16",
            "bible_verse": JOHN_3_16
        },
        {
            "mmdd": "0105",
            "title": "Unrelated",
            "verse_ref": "John 3:16",
            "bible_verse": "The quick brown fox jumps over the lazy dog."
        }
    ]))
    .unwrap();

    let (_dir, bible_path, entries_path) = setup(&entries_json);

    let bible = Bible::load(&bible_path).unwrap();
    let mut entries = load_entries(&entries_path).unwrap();

    let verifier = Verifier::new(&bible);
    let (stats, review) = verifier.verify_all(&mut entries);

    assert_eq!(stats.verified, 1);
    assert_eq!(stats.corrected, 1);
    assert_eq!(stats.expanded, 1);
    assert_eq!(stats.manual_review, 2);

    save_entries(&entries_path, &entries).unwrap();
    let reloaded = load_entries(&entries_path).unwrap();

    // exact entry untouched, extra field preserved
    assert_eq!(reloaded[0].bible_verse, JOHN_3_16);
    assert_eq!(reloaded[0].extra["poem"], "kept as-is");
    // drift repaired to the canonical string
    assert_eq!(reloaded[1].bible_verse, JOHN_3_16);
    assert_eq!(reloaded[1].verse_ref, "John 3:16");
    // reference expanded to the verses the quote covers
    assert_eq!(reloaded[2].verse_ref, "John 3:16-17");
    assert_eq!(reloaded[2].bible_verse, both);
    // review entries never mutated
    assert_eq!(reloaded[3].verse_ref, "Gondor 3:16");
    assert_eq!(
        reloaded[4].bible_verse,
        "The quick brown fox jumps over the lazy dog."
    );

    // review queue carries the reasons, report renders them
    assert_eq!(review.len(), 2);
    assert_eq!(review[0].reason, "unknown book: Gondor");
    assert!(review[1].reason.starts_with("low match ("));
    let report = render_report(&stats, &review);
    assert!(report.contains("### 0104 - Unknown book"));
    assert!(report.contains("- Verified: 1"));
}

#[test]
fn verification_is_a_fixpoint() {
    let drifted = JOHN_3_16.to_lowercase().replace('.', ",");
    let entries_json = serde_json::to_string(&serde_json::json!([
        { "mmdd": "0102", "title": "Drifted", "verse_ref": "John 3:16", "bible_verse": drifted }
    ]))
    .unwrap();

    let (_dir, bible_path, entries_path) = setup(&entries_json);
    let bible = Bible::load(&bible_path).unwrap();
    let mut entries = load_entries(&entries_path).unwrap();
    let verifier = Verifier::new(&bible);

    let (first, _) = verifier.verify_all(&mut entries);
    assert_eq!(first.corrected, 1);

    // a second run over the repaired collection changes nothing
    let (second, review) = verifier.verify_all(&mut entries);
    assert_eq!(second.verified, 1);
    assert_eq!(second.corrected, 0);
    assert!(review.is_empty());
    assert_eq!(entries[0].bible_verse, JOHN_3_16);
}

#[test]
fn single_chapter_book_citation_verifies() {
    let entries_json = serde_json::to_string(&serde_json::json!([
        {
            "mmdd": "0601",
            "title": "Contend",
            "verse_ref": "Jude 3",
            "bible_verse": "Beloved, when I gave all diligence to write unto you of the common salvation."
        }
    ]))
    .unwrap();

    let (_dir, bible_path, entries_path) = setup(&entries_json);
    let bible = Bible::load(&bible_path).unwrap();
    let mut entries = load_entries(&entries_path).unwrap();

    let verifier = Verifier::new(&bible);
    let mut review = Vec::new();
    let outcome = verifier.verify_entry(&mut entries[0], &mut review);
    assert_eq!(outcome, Outcome::Verified);
    assert!(review.is_empty());
}

#[test]
fn missing_source_file_is_fatal() {
    assert!(Bible::load(&PathBuf::from("/nonexistent/kjv.json")).is_err());
}

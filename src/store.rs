//! Devotional entry collection storage.
//!
//! Entries live in a single JSON array. Fields beyond the ones the
//! verifier touches are preserved across the load/save round trip.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One devotional entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Month-day key, e.g. `"0316"`.
    #[serde(default)]
    pub mmdd: String,
    /// Entry title.
    #[serde(default)]
    pub title: String,
    /// Scripture citation, e.g. `"John 3:16"`.
    #[serde(default)]
    pub verse_ref: String,
    /// The quoted passage text.
    #[serde(default)]
    pub bible_verse: String,
    /// Everything else in the entry, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Load the entry collection.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let content = fs_err::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::parse(format!("Invalid entries JSON: {e}"), Some(path.to_path_buf())))
}

/// Persist the (possibly mutated) entry collection.
pub fn save_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| Error::parse(format!("Failed to serialize entries: {e}"), None))?;
    fs_err::write(path, json + "\n")?;
    Ok(())
}

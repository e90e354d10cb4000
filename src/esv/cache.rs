//! On-disk cache of fetched ESV passages, keyed by entry date.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One cached passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPassage {
    /// The reference the passage was fetched for.
    #[serde(rename = "ref")]
    pub reference: String,
    /// The fetched passage text.
    pub text: String,
}

/// The passage cache. A `BTreeMap` keeps the serialized file key-sorted
/// so diffs stay clean.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EsvCache {
    passages: BTreeMap<String, CachedPassage>,
}

impl EsvCache {
    /// Load the cache, or start empty when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs_err::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("Invalid cache JSON: {e}"), Some(path.to_path_buf())))
    }

    /// Persist the cache.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(format!("Failed to serialize cache: {e}"), None))?;
        fs_err::write(path, json + "\n")?;
        Ok(())
    }

    /// Look up a cached passage by entry key.
    pub fn get(&self, mmdd: &str) -> Option<&CachedPassage> {
        self.passages.get(mmdd)
    }

    /// Whether an entry key is cached.
    pub fn contains(&self, mmdd: &str) -> bool {
        self.passages.contains_key(mmdd)
    }

    /// Insert or replace a cached passage.
    pub fn insert(&mut self, mmdd: impl Into<String>, passage: CachedPassage) {
        self.passages.insert(mmdd.into(), passage);
    }

    /// Iterate passages in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CachedPassage)> {
        self.passages.iter()
    }

    /// Iterate passages mutably, in key order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut CachedPassage)> {
        self.passages.iter_mut()
    }

    /// Number of cached passages.
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let cache = EsvCache::load(Path::new("/nonexistent/esv_cache.json")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn round_trip_sorts_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esv_cache.json");

        let mut cache = EsvCache::default();
        cache.insert("0302", CachedPassage {
            reference: "John 3:16".to_string(),
            text: "For God so loved the world...".to_string(),
        });
        cache.insert("0101", CachedPassage {
            reference: "Genesis 1:1".to_string(),
            text: "In the beginning...".to_string(),
        });
        cache.save(&path).unwrap();

        let content = fs_err::read_to_string(&path).unwrap();
        assert!(content.find("0101").unwrap() < content.find("0302").unwrap());

        let reloaded = EsvCache::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("0101").unwrap().reference, "Genesis 1:1");
    }

    #[test]
    fn serialized_field_is_named_ref() {
        let passage = CachedPassage {
            reference: "Jude 3".to_string(),
            text: "Beloved...".to_string(),
        };
        let json = serde_json::to_value(&passage).unwrap();
        assert_eq!(json["ref"], "Jude 3");
    }
}

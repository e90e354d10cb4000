//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the devotional entries file
    pub entries_path: PathBuf,
    /// Path to the ESV passage cache file
    pub cache_path: PathBuf,
    /// Path to the canonical Bible text file
    pub bible_path: PathBuf,
    /// Path the review report is written to
    pub report_path: PathBuf,
    /// ESV API key
    pub esv_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries_path: PathBuf::from("data/entries.json"),
            cache_path: PathBuf::from("data/esv_cache.json"),
            bible_path: PathBuf::from("data/kjv.json"),
            report_path: PathBuf::from("docs/verse_review.md"),
            esv_api_key: String::new(),
        }
    }
}

/// Expand a `~`-prefixed path from the environment.
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // DATA_DIR relocates the whole data directory at once
        if let Ok(dir) = env::var("DATA_DIR") {
            let dir = expand(&dir);
            config.entries_path = dir.join("entries.json");
            config.cache_path = dir.join("esv_cache.json");
            config.bible_path = dir.join("kjv.json");
        }

        if let Ok(path) = env::var("BIBLE_PATH") {
            config.bible_path = expand(&path);
        }

        if let Ok(path) = env::var("REPORT_PATH") {
            config.report_path = expand(&path);
        }

        if let Ok(key) = env::var("ESV_API_KEY") {
            config.esv_api_key = key;
        }

        Ok(config)
    }

    /// Check if an ESV API key is configured
    pub fn has_esv_key(&self) -> bool {
        !self.esv_api_key.is_empty()
    }
}

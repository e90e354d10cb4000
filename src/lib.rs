//! `versecheck` - devotional scripture verification and repair.
//!
//! Verifies a corpus of quoted scripture passages against a canonical
//! source text, auto-repairs trivial drift, and maintains a cache of
//! alternate-translation passage text.

// Re-export public modules for use in integration tests and as a library
pub mod align;
pub mod bible;
pub mod cli;
pub mod config;
pub mod error;
pub mod esv;
pub mod normalize;
pub mod report;
pub mod store;
pub mod verify;

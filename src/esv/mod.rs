//! ESV passage fetching, caching, and cache maintenance.
//!
//! The verification core never touches the network; these modules keep a
//! local cache of alternate-translation text alongside the entries.

pub mod api;
pub mod audit;
pub mod cache;
pub mod clean;

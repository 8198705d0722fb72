//! Cross-dataset record linking
//!
//! Canonical identities are indexed once by exact keys; each incoming
//! identity is compared only against its block candidates.

mod blocking;
mod engine;
mod similarity;

pub use blocking::{address_key, BlockKey, BlockingIndex};
pub use engine::{targets_by_source, MatchLink, MatchType, MatchingEngine};
pub use similarity::{BlendedSimilarity, Similarity};

//! mergepurge-core: normalization and duplicate linking for contact and
//! account datasets
//!
//! This library provides:
//! - Address, person name, company name, and phone normalization driven by
//!   pluggable sequence taggers
//! - Recovery from taggers that repeat single-valued labels
//! - Blocking and weighted fuzzy scoring to link an incoming dataset to a
//!   canonical one
//!
//! Taggers and the string similarity are capability traits, implemented by
//! plain closures, so callers bring their own models.

pub mod config;
pub mod dataset;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod tagging;

pub use config::{
    BlockingConfig, FieldWeights, MatchConfig, MergePurgeConfig, NormalizationConfig,
};
pub use dataset::{Dataset, RawRecord, Row};
pub use error::{AmbiguousLabel, ConfigError, DatasetError, MergePurgeError, Result};
pub use matching::{
    targets_by_source, BlendedSimilarity, BlockingIndex, MatchLink, MatchType, MatchingEngine,
    Similarity,
};
pub use normalize::{
    augment_dataset, ColumnGroups, IdentityNormalizer, NormalizedIdentity, Strictness,
};
pub use tagging::{
    AddressLabel, AddressTagger, LabelMap, NameLabel, NameTagger, ParserMode, Token,
};

//! Links incoming identities to canonical ones

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{BlockingConfig, MatchConfig, MergePurgeConfig};
use crate::error::Result;
use crate::normalize::NormalizedIdentity;

use super::blocking::{BlockKey, BlockingIndex};
use super::similarity::{BlendedSimilarity, Similarity};

/// How a link was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Phone, address key, or full name agree
    Exact,
    /// Weighted field similarity above the threshold
    Fuzzy,
}

/// A relation from an incoming record to a canonical one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLink {
    pub match_type: MatchType,
    /// Index into the incoming identities
    pub source_index: usize,
    /// Index into the canonical identities
    pub target_index: usize,
    /// Fuzzy score; 1.0 for exact links
    pub score: f64,
}

impl MatchLink {
    pub fn is_exact(&self) -> bool {
        self.match_type == MatchType::Exact
    }
}

/// Group link targets per source record, in link order
pub fn targets_by_source(links: &[MatchLink], sources: usize) -> Vec<Vec<usize>> {
    let mut grouped = vec![Vec::new(); sources];
    for link in links {
        if let Some(targets) = grouped.get_mut(link.source_index) {
            targets.push(link.target_index);
        }
    }
    grouped
}

/// Scores candidate pairs and emits [`MatchLink`]s
#[derive(Debug, Clone)]
pub struct MatchingEngine<S = BlendedSimilarity> {
    config: MatchConfig,
    blocking: BlockingConfig,
    similarity: S,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(BlendedSimilarity::default())
    }
}

impl<S: Similarity> MatchingEngine<S> {
    pub fn new(similarity: S) -> Self {
        Self {
            config: MatchConfig::default(),
            blocking: BlockingConfig::default(),
            similarity,
        }
    }

    /// Build an engine from a validated configuration
    pub fn from_config(config: &MergePurgeConfig, similarity: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.matching.clone(),
            blocking: config.blocking.clone(),
            similarity,
        })
    }

    /// Replace scoring parameters; invalid ones are ignored with a warning
    pub fn with_match_config(mut self, config: MatchConfig) -> Self {
        match config.validate() {
            Ok(()) => self.config = config,
            Err(e) => tracing::warn!("ignoring match config: {}", e),
        }
        self
    }

    pub fn with_blocking_config(mut self, blocking: BlockingConfig) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Index `canonical` and link every incoming identity against it
    pub fn find_related(
        &self,
        incoming: &[NormalizedIdentity],
        canonical: &[NormalizedIdentity],
    ) -> Vec<MatchLink> {
        let index = BlockingIndex::build_with_config(canonical, &self.blocking);
        self.find_related_with_index(incoming, canonical, &index)
    }

    /// Link incoming identities using an index built over `canonical`
    pub fn find_related_with_index(
        &self,
        incoming: &[NormalizedIdentity],
        canonical: &[NormalizedIdentity],
        index: &BlockingIndex,
    ) -> Vec<MatchLink> {
        #[cfg(feature = "parallel")]
        let per_source: Vec<Vec<MatchLink>> = incoming
            .par_iter()
            .enumerate()
            .map(|(i, identity)| self.links_for(i, identity, canonical, index))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_source: Vec<Vec<MatchLink>> = incoming
            .iter()
            .enumerate()
            .map(|(i, identity)| self.links_for(i, identity, canonical, index))
            .collect();

        let links: Vec<MatchLink> = per_source.into_iter().flatten().collect();

        let exact = links.iter().filter(|l| l.is_exact()).count();
        tracing::info!(
            incoming = incoming.len(),
            canonical = canonical.len(),
            exact,
            fuzzy = links.len() - exact,
            "matching run complete"
        );

        links
    }

    fn links_for(
        &self,
        source_index: usize,
        identity: &NormalizedIdentity,
        canonical: &[NormalizedIdentity],
        index: &BlockingIndex,
    ) -> Vec<MatchLink> {
        let key = BlockKey::of(identity);
        let mut links = Vec::new();

        for target_index in index.candidates(identity) {
            let Some(target) = canonical.get(target_index) else {
                continue;
            };

            let exact = match index.key(target_index) {
                Some(target_key) => key.shares_any(target_key),
                None => key.shares_any(&BlockKey::of(target)),
            };
            if exact {
                links.push(MatchLink {
                    match_type: MatchType::Exact,
                    source_index,
                    target_index,
                    score: 1.0,
                });
                continue;
            }

            if let Some(score) = self.score(identity, target) {
                tracing::trace!(source_index, target_index, score, "scored candidate");
                if score > self.config.threshold {
                    links.push(MatchLink {
                        match_type: MatchType::Fuzzy,
                        source_index,
                        target_index,
                        score,
                    });
                }
            }
        }

        links
    }

    /// Weighted similarity over fields present on both sides.
    ///
    /// `None` when the compared fields carry less than `min_compared_weight`.
    pub fn score(&self, a: &NormalizedIdentity, b: &NormalizedIdentity) -> Option<f64> {
        let w = &self.config.weights;
        let fields = [
            (&a.first_name, &b.first_name, w.first_name),
            (&a.last_name, &b.last_name, w.last_name),
            (&a.company_name, &b.company_name, w.company_name),
            (&a.street_number, &b.street_number, w.street_number),
            (&a.street, &b.street, w.street),
            (&a.city, &b.city, w.city),
            (&a.state, &b.state, w.state),
            (&a.zip, &b.zip, w.zip),
        ];

        let mut compared = 0.0;
        let mut total = 0.0;
        for (left, right, weight) in fields {
            if let (Some(left), Some(right)) = (left, right) {
                if weight <= 0.0 || left.trim().is_empty() || right.trim().is_empty() {
                    continue;
                }
                compared += weight;
                total += weight * self.similarity.similarity(left, right);
            }
        }

        if compared <= 0.0 || compared < self.config.min_compared_weight {
            return None;
        }
        Some(total / compared)
    }
}

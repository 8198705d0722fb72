//! String similarity capability

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::normalize::comparison_key;

/// Symmetric string similarity in `[0, 1]`, with `similarity(a, a) == 1`
/// for any `a` with comparable content
pub trait Similarity: Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Sync,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Jaro-Winkler blended with normalized Levenshtein.
///
/// Jaro-Winkler rewards shared prefixes (typos at the end of names), while
/// Levenshtein keeps transpositions deep inside longer strings honest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendedSimilarity {
    pub jaro_winkler_weight: f64,
}

impl Default for BlendedSimilarity {
    fn default() -> Self {
        Self {
            jaro_winkler_weight: 0.6,
        }
    }
}

impl Similarity for BlendedSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a = comparison_key(a);
        let b = comparison_key(b);

        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }

        let jw = jaro_winkler(&a, &b);
        let lev = normalized_levenshtein(&a, &b);
        let score = jw * self.jaro_winkler_weight + lev * (1.0 - self.jaro_winkler_weight);
        score.clamp(0.0, 1.0)
    }
}

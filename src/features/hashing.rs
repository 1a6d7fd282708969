//! Hashing featurization for review text.
//!
//! Tokens are mapped to a fixed number of buckets with a seeded hash
//! function; bucket values are term frequencies. Unlike a vocabulary-based
//! vectorizer there is nothing to fit, so transform works on any text
//! immediately and the output dimension never changes.

use std::collections::BTreeMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::{PolarityError, Result};
use crate::features::vector::SparseVector;

/// Default number of hash buckets.
pub const DEFAULT_NUM_FEATURES: usize = 1 << 16;

/// Fixed seeds for the bucket hasher.
///
/// ahash randomizes its state per process by default; pinning the seeds
/// keeps bucket assignment identical across runs so a persisted model can
/// score new text after reload.
const HASH_SEEDS: (u64, u64, u64, u64) = (
    0x9e37_79b9_7f4a_7c15,
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
);

/// Serializable configuration of a [`HashingVectorizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Number of hash buckets (output dimensionality of the text features).
    pub num_features: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            num_features: DEFAULT_NUM_FEATURES,
        }
    }
}

/// Hashing vectorizer mapping tokens to term-frequency buckets.
#[derive(Clone)]
pub struct HashingVectorizer {
    num_features: usize,
    hasher: ahash::RandomState,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for HashingVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashingVectorizer")
            .field("num_features", &self.num_features)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl HashingVectorizer {
    /// Create a new hashing vectorizer with the specified analyzer and the
    /// default bucket count.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self::with_config(analyzer, HashingConfig::default())
    }

    /// Create a hashing vectorizer from an explicit configuration.
    pub fn with_config(analyzer: Arc<dyn Analyzer>, config: HashingConfig) -> Self {
        Self {
            num_features: config.num_features.max(1),
            hasher: ahash::RandomState::with_seeds(
                HASH_SEEDS.0,
                HASH_SEEDS.1,
                HASH_SEEDS.2,
                HASH_SEEDS.3,
            ),
            analyzer,
        }
    }

    /// Number of hash buckets.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// The configuration needed to rebuild this vectorizer.
    pub fn config(&self) -> HashingConfig {
        HashingConfig {
            num_features: self.num_features,
        }
    }

    /// Bucket index for a single token.
    pub fn bucket(&self, token_text: &str) -> u32 {
        (self.hasher.hash_one(token_text) % self.num_features as u64) as u32
    }

    /// Transform a document into a sparse term-frequency vector.
    pub fn transform(&self, text: &str) -> Result<SparseVector> {
        let mut counts: BTreeMap<u32, f64> = BTreeMap::new();

        for token in self.analyzer.analyze(text)? {
            *counts.entry(self.bucket(&token.text)).or_insert(0.0) += 1.0;
        }

        let (indices, values): (Vec<u32>, Vec<f64>) = counts.into_iter().unzip();
        SparseVector::new(self.num_features, indices, values)
    }

    /// Transform a batch of documents.
    pub fn transform_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<SparseVector>> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }

    /// Validate that a stored configuration is compatible with this build.
    pub fn check_config(config: &HashingConfig) -> Result<()> {
        if config.num_features == 0 {
            return Err(PolarityError::feature(
                "Hashing configuration must have at least one bucket",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::standard::StandardAnalyzer;

    fn vectorizer(num_features: usize) -> HashingVectorizer {
        HashingVectorizer::with_config(
            Arc::new(StandardAnalyzer::new()),
            HashingConfig { num_features },
        )
    }

    #[test]
    fn test_transform_counts_term_frequencies() {
        let v = vectorizer(1 << 12);
        let features = v.transform("good good bad").unwrap();

        assert_eq!(features.dim, 1 << 12);
        assert_eq!(features.nnz(), 2);
        let mut values: Vec<f64> = features.values.clone();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_bucket_is_deterministic() {
        let a = vectorizer(1 << 12);
        let b = vectorizer(1 << 12);

        assert_eq!(a.bucket("wonderful"), b.bucket("wonderful"));
        assert_eq!(
            a.transform("a wonderful book").unwrap(),
            b.transform("a wonderful book").unwrap()
        );
    }

    #[test]
    fn test_case_folding_shares_buckets() {
        let v = vectorizer(1 << 12);
        let features = v.transform("Great GREAT great").unwrap();

        // All three hash to the same bucket after lowercasing
        assert_eq!(features.nnz(), 1);
        assert_eq!(features.values[0], 3.0);
    }

    #[test]
    fn test_empty_text() {
        let v = vectorizer(1 << 12);
        let features = v.transform("").unwrap();

        assert!(features.is_empty());
        assert_eq!(features.dim, 1 << 12);
    }

    #[test]
    fn test_check_config() {
        assert!(HashingVectorizer::check_config(&HashingConfig { num_features: 0 }).is_err());
        assert!(HashingVectorizer::check_config(&HashingConfig::default()).is_ok());
    }
}

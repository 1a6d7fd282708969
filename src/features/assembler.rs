//! Feature assembly: hashed text features plus dense numeric columns.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::features::hashing::{HashingConfig, HashingVectorizer};
use crate::features::numeric::NumericFeatures;
use crate::features::vector::SparseVector;

/// Number of dense numeric columns appended after the hashed features.
pub const NUMERIC_COLUMNS: usize = 2;

/// Assembles the full feature vector for a review.
///
/// Layout: buckets `0..num_features` hold hashed term frequencies; the last
/// two positions hold word count and mean word length. The assembled
/// dimension is therefore `num_features + 2` and is constant for a given
/// configuration.
#[derive(Clone)]
pub struct FeatureAssembler {
    vectorizer: HashingVectorizer,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for FeatureAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureAssembler")
            .field("num_features", &self.vectorizer.num_features())
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl FeatureAssembler {
    /// Create an assembler sharing one analyzer between the hashed and
    /// numeric feature paths.
    pub fn new(analyzer: Arc<dyn Analyzer>, config: HashingConfig) -> Self {
        Self {
            vectorizer: HashingVectorizer::with_config(analyzer.clone(), config),
            analyzer,
        }
    }

    /// Total dimension of assembled vectors.
    pub fn dim(&self) -> usize {
        self.vectorizer.num_features() + NUMERIC_COLUMNS
    }

    /// The hashing configuration in use.
    pub fn hashing_config(&self) -> HashingConfig {
        self.vectorizer.config()
    }

    /// Assemble the feature vector for one review text.
    pub fn assemble(&self, text: &str) -> Result<SparseVector> {
        let hashed = self.vectorizer.transform(text)?;
        let numeric = NumericFeatures::compute(self.analyzer.as_ref(), text)?;

        let dim = self.dim();
        let mut indices = hashed.indices;
        let mut values = hashed.values;

        let base = self.vectorizer.num_features() as u32;
        for (offset, column) in numeric.columns().into_iter().enumerate() {
            if column != 0.0 {
                indices.push(base + offset as u32);
                values.push(column);
            }
        }

        SparseVector::new(dim, indices, values)
    }

    /// Assemble feature vectors for a batch of review texts.
    pub fn assemble_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<SparseVector>> {
        texts.iter().map(|t| self.assemble(t.as_ref())).collect()
    }
}

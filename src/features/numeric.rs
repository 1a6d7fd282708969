//! Numeric features derived from the token stream.

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// Simple per-review statistics used as dense feature columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericFeatures {
    /// Number of words in the review.
    pub word_count: f64,
    /// Mean word length in characters; 0.0 for empty text.
    pub mean_word_length: f64,
}

impl NumericFeatures {
    /// Compute the statistics for a review using the given analyzer.
    pub fn compute(analyzer: &dyn Analyzer, text: &str) -> Result<Self> {
        let mut word_count = 0usize;
        let mut total_chars = 0usize;

        for token in analyzer.analyze(text)? {
            word_count += 1;
            total_chars += token.text.chars().count();
        }

        let mean_word_length = if word_count > 0 {
            total_chars as f64 / word_count as f64
        } else {
            0.0
        };

        Ok(NumericFeatures {
            word_count: word_count as f64,
            mean_word_length,
        })
    }

    /// The two columns in assembly order.
    pub fn columns(&self) -> [f64; 2] {
        [self.word_count, self.mean_word_length]
    }
}

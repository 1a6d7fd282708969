//! Analyzer implementations combining tokenizers and filters.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// This is the core trait that all analyzers must implement. Analyzers are
/// responsible for the complete text processing pipeline, from raw text to
/// tokens ready for featurization.
///
/// # Thread Safety
///
/// The trait requires `Send + Sync` so analyzers can be shared across worker
/// threads during parallel training.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual analyzer modules
pub mod pipeline;
pub mod standard;

// Re-export all analyzers for convenient access
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;

/// Named analyzer configurations.
///
/// Persisted models record which analyzer produced their features; this
/// enum rebuilds the same analyzer after a model is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Unicode word tokenizer + lowercase.
    #[default]
    Standard,
    /// Unicode word tokenizer + lowercase + English stop words.
    StandardStop,
    /// Whitespace tokenizer + lowercase.
    Whitespace,
}

impl AnalyzerKind {
    /// Build the analyzer this kind describes.
    pub fn build(&self) -> Arc<dyn Analyzer> {
        match self {
            AnalyzerKind::Standard => Arc::new(StandardAnalyzer::new()),
            AnalyzerKind::StandardStop => Arc::new(StandardAnalyzer::with_stop_words()),
            AnalyzerKind::Whitespace => Arc::new(
                PipelineAnalyzer::new(Arc::new(
                    crate::analysis::tokenizer::whitespace::WhitespaceTokenizer::new(),
                ))
                .add_filter(Arc::new(
                    crate::analysis::token_filter::lowercase::LowercaseFilter::new(),
                ))
                .with_name("whitespace_lower".to_string()),
            ),
        }
    }

    /// Stable name for display and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyzerKind::Standard => "standard",
            AnalyzerKind::StandardStop => "standard_stop",
            AnalyzerKind::Whitespace => "whitespace",
        }
    }
}

//! # Polarity
//!
//! Binary sentiment classification for product review text.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Flexible text analysis pipeline
//! - Hashing featurization with derived numeric columns
//! - Logistic regression with hyperparameter grid search
//! - AUC-based model selection and evaluation
//! - JSON model persistence

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod sweep;

pub mod prelude {
    pub use crate::dataset::{Review, ReviewDataset};
    pub use crate::error::{PolarityError, Result};
    pub use crate::model::{LogisticRegression, SentimentModel};
    pub use crate::pipeline::{PipelineConfig, SentimentPipeline};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Classification models and persistence.

pub mod artifact;
pub mod logistic;

pub use artifact::{EvaluationReport, SentimentModel};
pub use logistic::LogisticRegression;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Model metadata for tracking model information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
    /// Performance metrics on held-out data.
    pub validation_metrics: HashMap<String, f64>,
}

impl ModelMetadata {
    /// Create metadata for a freshly trained model.
    pub fn new<S: Into<String>>(name: S, training_examples: usize) -> Self {
        Self {
            name: name.into(),
            version: crate::VERSION.to_string(),
            trained_at: chrono::Utc::now(),
            training_examples,
            hyperparameters: HashMap::new(),
            validation_metrics: HashMap::new(),
        }
    }
}

/// Training statistics and performance metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Training loss curve (one entry per iteration).
    pub training_losses: Vec<f64>,
    /// Number of training iterations completed.
    pub iterations: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Final training loss.
    pub final_training_loss: f64,
    /// Whether the loss converged before the iteration limit.
    pub converged: bool,
}

//! The persisted sentiment model artifact.
//!
//! A [`SentimentModel`] bundles the trained classifier with the
//! featurization configuration that produced its inputs, so a loaded model
//! can score raw review text without any external state.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerKind;
use crate::dataset::Review;
use crate::error::{PolarityError, Result};
use crate::eval::{accuracy, roc_auc};
use crate::features::assembler::FeatureAssembler;
use crate::features::hashing::{HashingConfig, HashingVectorizer};
use crate::model::logistic::LogisticRegression;
use crate::model::{ModelMetadata, TrainingStats};

/// Evaluation results over a labeled set of reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Area under the ROC curve.
    pub auc: f64,
    /// Fraction of correct predictions at the 0.5 threshold.
    pub accuracy: f64,
    /// Number of evaluated reviews.
    pub examples: usize,
}

/// A trained sentiment classifier together with its featurization config.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentimentModel {
    classifier: LogisticRegression,
    hashing: HashingConfig,
    analyzer: AnalyzerKind,
    /// Model provenance and hyperparameters.
    pub metadata: ModelMetadata,
    /// Statistics from the winning training run.
    pub stats: TrainingStats,
    #[serde(skip)]
    assembler: OnceLock<FeatureAssembler>,
}

impl SentimentModel {
    /// Bundle a trained classifier with its featurization configuration.
    pub fn new(
        classifier: LogisticRegression,
        hashing: HashingConfig,
        analyzer: AnalyzerKind,
        metadata: ModelMetadata,
        stats: TrainingStats,
    ) -> Result<Self> {
        if !classifier.is_trained() {
            return Err(PolarityError::model(
                "Cannot build an artifact from an untrained classifier",
            ));
        }
        HashingVectorizer::check_config(&hashing)?;

        Ok(Self {
            classifier,
            hashing,
            analyzer,
            metadata,
            stats,
            assembler: OnceLock::new(),
        })
    }

    /// The analyzer kind this model featurizes with.
    pub fn analyzer_kind(&self) -> AnalyzerKind {
        self.analyzer
    }

    /// The hashing configuration this model featurizes with.
    pub fn hashing_config(&self) -> &HashingConfig {
        &self.hashing
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    fn assembler(&self) -> &FeatureAssembler {
        self.assembler
            .get_or_init(|| FeatureAssembler::new(self.analyzer.build(), self.hashing.clone()))
    }

    /// Probability that the given text is a positive review.
    pub fn score(&self, text: &str) -> Result<f64> {
        let features = self.assembler().assemble(text)?;
        self.classifier.predict_proba(&features)
    }

    /// Predicted sentiment at the 0.5 decision boundary.
    pub fn predict(&self, text: &str) -> Result<bool> {
        Ok(self.score(text)? >= 0.5)
    }

    /// Positive-class probabilities for a batch of reviews.
    pub fn score_reviews(&self, reviews: &[Review]) -> Result<Vec<f64>> {
        let assembler = self.assembler();
        reviews
            .iter()
            .map(|r| {
                let features = assembler.assemble(&r.text)?;
                self.classifier.predict_proba(&features)
            })
            .collect()
    }

    /// Evaluate AUC and accuracy over a labeled review set.
    pub fn evaluate(&self, reviews: &[Review]) -> Result<EvaluationReport> {
        let labels: Vec<bool> = reviews.iter().map(|r| r.label()).collect();
        let scores = self.score_reviews(reviews)?;
        let predictions: Vec<bool> = scores.iter().map(|s| *s >= 0.5).collect();

        Ok(EvaluationReport {
            auc: roc_auc(&labels, &scores)?,
            accuracy: accuracy(&labels, &predictions)?,
            examples: reviews.len(),
        })
    }

    /// Save the model as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            PolarityError::model(format!("Failed to serialize model for {}: {e}", path.display()))
        })?;

        std::fs::write(path, json).map_err(|e| {
            PolarityError::model(format!("Failed to write model to {}: {e}", path.display()))
        })?;

        Ok(())
    }

    /// Load a model previously written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PolarityError::model(format!("Failed to read model from {}: {e}", path.display()))
        })?;

        let model: SentimentModel = serde_json::from_str(&content).map_err(|e| {
            PolarityError::model(format!("Failed to parse model from {}: {e}", path.display()))
        })?;

        if !model.classifier.is_trained() {
            return Err(PolarityError::model(format!(
                "Model at {} has no trained weights",
                path.display()
            )));
        }
        HashingVectorizer::check_config(&model.hashing)?;

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::hashing::HashingConfig;

    fn trained_model() -> SentimentModel {
        let hashing = HashingConfig { num_features: 1 << 10 };
        let analyzer = AnalyzerKind::Standard;
        let assembler = FeatureAssembler::new(analyzer.build(), hashing.clone());

        let texts = [
            "great book loved it",
            "wonderful great story",
            "loved this wonderful read",
            "terrible book hated it",
            "awful terrible story",
            "hated this awful read",
        ];
        let labels = vec![true, true, true, false, false, false];
        let features: Vec<_> = texts.iter().map(|t| assembler.assemble(t).unwrap()).collect();

        let mut classifier = LogisticRegression::new().with_max_iter(300);
        let stats = classifier.fit(&features, &labels).unwrap();
        let metadata = ModelMetadata::new("sentiment_lr", texts.len());

        SentimentModel::new(classifier, hashing, analyzer, metadata, stats).unwrap()
    }

    #[test]
    fn test_score_raw_text() {
        let model = trained_model();

        let positive = model.score("a great wonderful book").unwrap();
        let negative = model.score("an awful terrible book").unwrap();

        assert!(positive > negative);
        assert!(model.predict("great wonderful").unwrap());
        assert!(!model.predict("terrible awful").unwrap());
    }

    #[test]
    fn test_untrained_classifier_rejected() {
        let result = SentimentModel::new(
            LogisticRegression::new(),
            HashingConfig::default(),
            AnalyzerKind::Standard,
            ModelMetadata::new("m", 0),
            TrainingStats {
                training_losses: vec![],
                iterations: 0,
                training_time_ms: 0,
                final_training_loss: 0.0,
                converged: false,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let model = trained_model();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.json");

        model.save(&path).unwrap();
        let restored = SentimentModel::load(&path).unwrap();

        let text = "a great wonderful book";
        assert_eq!(model.score(text).unwrap(), restored.score(text).unwrap());
        assert_eq!(restored.analyzer_kind(), AnalyzerKind::Standard);
        assert_eq!(restored.hashing_config().num_features, 1 << 10);
    }

    #[test]
    fn test_evaluate() {
        let model = trained_model();
        let reviews = vec![
            Review::new(5, "great wonderful book"),
            Review::new(1, "terrible awful book"),
        ];

        let report = model.evaluate(&reviews).unwrap();
        assert_eq!(report.examples, 2);
        assert!(report.auc > 0.5);
        assert_eq!(report.accuracy, 1.0);
    }
}

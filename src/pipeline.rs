//! End-to-end training pipeline.
//!
//! [`SentimentPipeline`] is the convenience path: it owns the whole
//! analyze → hash → assemble → sweep → validate sequence behind a single
//! `fit` call. The same pieces are public, so the manual path is calling
//! [`DatasetSplit`](crate::dataset::DatasetSplit),
//! [`FeatureAssembler`](crate::features::FeatureAssembler), and
//! [`GridSearch`](crate::sweep::GridSearch) step by step; both paths give
//! the same result for the same configuration.

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerKind;
use crate::dataset::{DatasetSplit, Review, SplitFractions};
use crate::error::Result;
use crate::eval::roc_auc;
use crate::features::assembler::FeatureAssembler;
use crate::features::hashing::HashingConfig;
use crate::features::vector::SparseVector;
use crate::model::artifact::SentimentModel;
use crate::model::ModelMetadata;
use crate::sweep::{CandidateScore, GridSearch, ParamGrid, ParamPoint};

/// Configuration for the end-to-end pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Analyzer used for both hashed and numeric features.
    pub analyzer: AnalyzerKind,
    /// Hashing featurizer configuration.
    pub hashing: HashingConfig,
    /// Train / test / validation fractions.
    pub fractions: SplitFractions,
    /// Seed for the dataset split.
    pub seed: u64,
    /// Hyperparameter grid for the sweep.
    pub grid: ParamGrid,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerKind::default(),
            hashing: HashingConfig::default(),
            fractions: SplitFractions::default(),
            seed: 42,
            grid: ParamGrid::default(),
        }
    }
}

/// Result of fitting the pipeline.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The winning model, ready to persist.
    pub model: SentimentModel,
    /// Hyperparameters of the winner.
    pub best_point: ParamPoint,
    /// Held-out AUC used for selection.
    pub test_auc: f64,
    /// AUC on the untouched validation split.
    pub validation_auc: f64,
    /// All sweep candidates with their held-out AUCs.
    pub candidates: Vec<CandidateScore>,
    /// Rows in the training split.
    pub train_size: usize,
    /// Rows in the test split.
    pub test_size: usize,
    /// Rows in the validation split.
    pub validation_size: usize,
}

/// The one-call training path: split, featurize, sweep, validate.
#[derive(Debug, Clone, Default)]
pub struct SentimentPipeline {
    config: PipelineConfig,
}

impl SentimentPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fit the pipeline on a review dataset.
    ///
    /// Splits the data, featurizes every split with one shared assembler,
    /// sweeps the hyperparameter grid on the train split, selects the best
    /// candidate by test AUC, and reports the winner's AUC on the
    /// validation split. The validation AUC is recorded in the model's
    /// metadata under `validation_metrics["auc"]`.
    pub fn fit(&self, reviews: &[Review]) -> Result<PipelineOutcome> {
        let split = DatasetSplit::new(reviews, self.config.fractions, self.config.seed)?;

        let assembler =
            FeatureAssembler::new(self.config.analyzer.build(), self.config.hashing.clone());

        let (train_features, train_labels) = featurize(&assembler, &split.train)?;
        let (test_features, test_labels) = featurize(&assembler, &split.test)?;
        let (validation_features, validation_labels) = featurize(&assembler, &split.validation)?;

        let search = GridSearch::new(self.config.grid.clone());
        let outcome = search.run(&train_features, &train_labels, &test_features, &test_labels)?;

        let validation_scores = outcome.best.predict_proba_batch(&validation_features)?;
        let validation_auc = roc_auc(&validation_labels, &validation_scores)?;

        let mut metadata = ModelMetadata::new("sentiment_lr", split.train.len());
        metadata.hyperparameters = outcome.best.hyperparameters();
        metadata
            .validation_metrics
            .insert("auc".to_string(), validation_auc);
        metadata
            .validation_metrics
            .insert("test_auc".to_string(), outcome.best_auc);

        let model = SentimentModel::new(
            outcome.best,
            self.config.hashing.clone(),
            self.config.analyzer,
            metadata,
            outcome.best_stats,
        )?;

        Ok(PipelineOutcome {
            model,
            best_point: outcome.best_point,
            test_auc: outcome.best_auc,
            validation_auc,
            candidates: outcome.candidates,
            train_size: split.train.len(),
            test_size: split.test.len(),
            validation_size: split.validation.len(),
        })
    }
}

/// Assemble features and derive labels for one split.
fn featurize(
    assembler: &FeatureAssembler,
    reviews: &[Review],
) -> Result<(Vec<SparseVector>, Vec<bool>)> {
    let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
    let features = assembler.assemble_batch(&texts)?;
    let labels = reviews.iter().map(|r| r.label()).collect();
    Ok((features, labels))
}

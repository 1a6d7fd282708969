//! Hyperparameter sweep and best-model selection.
//!
//! A [`GridSearch`] trains one logistic-regression model per grid point on
//! the training split, scores every candidate on the held-out test split by
//! AUC, and keeps the best. Candidates train in parallel.

use rayon::prelude::*;

use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::eval::roc_auc;
use crate::features::vector::SparseVector;
use crate::model::logistic::LogisticRegression;
use crate::model::TrainingStats;

/// Hyperparameter grid for the sweep.
///
/// The sweep trains the cartesian product of `l2_penalties` and
/// `learning_rates`, all with the same iteration budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    /// L2 regularization strengths to try.
    pub l2_penalties: Vec<f64>,
    /// Gradient descent learning rates to try.
    pub learning_rates: Vec<f64>,
    /// Iteration budget per candidate.
    pub max_iter: usize,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            l2_penalties: vec![0.0, 0.01, 0.1],
            learning_rates: vec![0.1, 0.5],
            max_iter: 100,
        }
    }
}

/// One point of the hyperparameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamPoint {
    /// L2 regularization strength.
    pub l2_penalty: f64,
    /// Gradient descent learning rate.
    pub learning_rate: f64,
}

impl ParamGrid {
    /// Enumerate the grid points in sweep order.
    pub fn points(&self) -> Vec<ParamPoint> {
        let mut points = Vec::with_capacity(self.l2_penalties.len() * self.learning_rates.len());
        for &l2_penalty in &self.l2_penalties {
            for &learning_rate in &self.learning_rates {
                points.push(ParamPoint {
                    l2_penalty,
                    learning_rate,
                });
            }
        }
        points
    }

    /// Validate that the grid is usable.
    pub fn validate(&self) -> Result<()> {
        if self.l2_penalties.is_empty() || self.learning_rates.is_empty() {
            return Err(PolarityError::training("Hyperparameter grid is empty"));
        }
        if self.max_iter == 0 {
            return Err(PolarityError::training(
                "Hyperparameter grid needs at least one training iteration",
            ));
        }
        Ok(())
    }
}

/// Score of one sweep candidate on the held-out test split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CandidateScore {
    /// The grid point this candidate was trained with.
    pub point: ParamPoint,
    /// Held-out AUC of the candidate.
    pub test_auc: f64,
}

/// Outcome of a grid search.
#[derive(Debug)]
pub struct GridSearchOutcome {
    /// The winning classifier.
    pub best: LogisticRegression,
    /// Training statistics of the winning run.
    pub best_stats: TrainingStats,
    /// Grid point of the winner.
    pub best_point: ParamPoint,
    /// Held-out AUC of the winner.
    pub best_auc: f64,
    /// All candidate scores, in grid order.
    pub candidates: Vec<CandidateScore>,
}

/// Grid search over logistic-regression hyperparameters.
#[derive(Debug, Clone, Default)]
pub struct GridSearch {
    grid: ParamGrid,
}

impl GridSearch {
    /// Create a grid search over the given grid.
    pub fn new(grid: ParamGrid) -> Self {
        Self { grid }
    }

    /// The grid being swept.
    pub fn grid(&self) -> &ParamGrid {
        &self.grid
    }

    /// Train one candidate per grid point and pick the best by test AUC.
    pub fn run(
        &self,
        train_features: &[SparseVector],
        train_labels: &[bool],
        test_features: &[SparseVector],
        test_labels: &[bool],
    ) -> Result<GridSearchOutcome> {
        self.grid.validate()?;

        if train_features.is_empty() || test_features.is_empty() {
            return Err(PolarityError::training(
                "Grid search needs non-empty train and test splits",
            ));
        }

        let points = self.grid.points();
        let max_iter = self.grid.max_iter;

        let candidates: Vec<(ParamPoint, LogisticRegression, TrainingStats, f64)> = points
            .par_iter()
            .map(|&point| {
                let mut model = LogisticRegression::new()
                    .with_learning_rate(point.learning_rate)
                    .with_l2_penalty(point.l2_penalty)
                    .with_max_iter(max_iter);

                let stats = model.fit(train_features, train_labels)?;
                let scores = model.predict_proba_batch(test_features)?;
                let test_auc = roc_auc(test_labels, &scores)?;

                Ok((point, model, stats, test_auc))
            })
            .collect::<Result<Vec<_>>>()?;

        let scores: Vec<CandidateScore> = candidates
            .iter()
            .map(|(point, _, _, test_auc)| CandidateScore {
                point: *point,
                test_auc: *test_auc,
            })
            .collect();

        // First candidate wins ties, keeping selection deterministic
        let (best_point, best, best_stats, best_auc) = candidates
            .into_iter()
            .reduce(|best, candidate| if candidate.3 > best.3 { candidate } else { best })
            .ok_or_else(|| PolarityError::training("Grid search produced no candidates"))?;

        Ok(GridSearchOutcome {
            best,
            best_stats,
            best_point,
            best_auc,
            candidates: scores,
        })
    }
}

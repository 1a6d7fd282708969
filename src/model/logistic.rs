//! Logistic regression trained by gradient descent.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};
use crate::features::vector::SparseVector;
use crate::model::TrainingStats;

/// Binary logistic regression over sparse feature vectors.
///
/// Trained with full-batch gradient descent on the logistic loss, with
/// optional L2 regularization. Hyperparameters are set builder-style before
/// calling [`fit`](Self::fit).
///
/// # Examples
///
/// ```
/// use polarity::features::SparseVector;
/// use polarity::model::LogisticRegression;
///
/// let features = vec![
///     SparseVector::new(2, vec![0], vec![1.0]).unwrap(),
///     SparseVector::new(2, vec![1], vec![1.0]).unwrap(),
/// ];
/// let labels = vec![true, false];
///
/// let mut model = LogisticRegression::new()
///     .with_learning_rate(0.5)
///     .with_max_iter(200);
/// model.fit(&features, &labels).unwrap();
///
/// assert!(model.predict_proba(&features[0]).unwrap() > 0.5);
/// assert!(model.predict_proba(&features[1]).unwrap() < 0.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Gradient descent step size.
    learning_rate: f64,
    /// Maximum number of gradient descent iterations.
    max_iter: usize,
    /// L2 regularization strength.
    l2_penalty: f64,
    /// Convergence tolerance on the loss delta between iterations.
    tolerance: f64,
    /// Trained weights, one per feature dimension.
    weights: Option<Vec<f64>>,
    /// Trained intercept.
    bias: f64,
}

impl LogisticRegression {
    /// Create an untrained model with default hyperparameters.
    pub fn new() -> Self {
        Self {
            learning_rate: 0.5,
            max_iter: 100,
            l2_penalty: 0.0,
            tolerance: 1e-6,
            weights: None,
            bias: 0.0,
        }
    }

    /// Set the gradient descent learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the L2 regularization strength.
    pub fn with_l2_penalty(mut self, l2_penalty: f64) -> Self {
        self.l2_penalty = l2_penalty;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Gradient descent learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Maximum number of iterations.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// L2 regularization strength.
    pub fn l2_penalty(&self) -> f64 {
        self.l2_penalty
    }

    /// Check if the model is trained.
    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// Train on feature vectors and binary labels.
    pub fn fit(&mut self, features: &[SparseVector], labels: &[bool]) -> Result<TrainingStats> {
        if features.is_empty() {
            return Err(PolarityError::training("Training set is empty"));
        }
        if features.len() != labels.len() {
            return Err(PolarityError::training(format!(
                "Feature count {} does not match label count {}",
                features.len(),
                labels.len()
            )));
        }

        let dim = features[0].dim;
        if features.iter().any(|f| f.dim != dim) {
            return Err(PolarityError::training(
                "All feature vectors must have the same dimension",
            ));
        }

        let start_time = Instant::now();
        let n = features.len() as f64;
        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;

        let mut training_losses = Vec::with_capacity(self.max_iter);
        let mut converged = false;

        for _ in 0..self.max_iter {
            let mut gradient = vec![0.0; dim];
            let mut bias_gradient = 0.0;
            let mut loss = 0.0;

            for (x, &y) in features.iter().zip(labels.iter()) {
                let z = x.dot(&weights)? + bias;
                let p = sigmoid(z);
                let target = if y { 1.0 } else { 0.0 };
                let residual = p - target;

                for (idx, value) in x.iter() {
                    gradient[idx as usize] += residual * value;
                }
                bias_gradient += residual;

                loss += log_loss(p, target);
            }

            loss /= n;
            if self.l2_penalty > 0.0 {
                let weight_norm: f64 = weights.iter().map(|w| w * w).sum();
                loss += 0.5 * self.l2_penalty * weight_norm;
            }

            for (w, g) in weights.iter_mut().zip(gradient.iter()) {
                let regularized = g / n + self.l2_penalty * *w;
                *w -= self.learning_rate * regularized;
            }
            bias -= self.learning_rate * bias_gradient / n;

            let improved_below_tolerance = training_losses
                .last()
                .is_some_and(|prev: &f64| (prev - loss).abs() < self.tolerance);
            training_losses.push(loss);

            if improved_below_tolerance {
                converged = true;
                break;
            }
        }

        self.weights = Some(weights);
        self.bias = bias;

        let training_time = start_time.elapsed();
        Ok(TrainingStats {
            iterations: training_losses.len(),
            final_training_loss: training_losses.last().copied().unwrap_or(0.0),
            training_losses,
            training_time_ms: training_time.as_millis() as u64,
            converged,
        })
    }

    /// Probability of the positive class for one feature vector.
    pub fn predict_proba(&self, features: &SparseVector) -> Result<f64> {
        let weights = self
            .weights
            .as_ref()
            .ok_or_else(|| PolarityError::training("Model is not trained"))?;

        Ok(sigmoid(features.dot(weights)? + self.bias))
    }

    /// Predicted class at the 0.5 decision boundary.
    pub fn predict(&self, features: &SparseVector) -> Result<bool> {
        Ok(self.predict_proba(features)? >= 0.5)
    }

    /// Positive-class probabilities for a batch of feature vectors.
    pub fn predict_proba_batch(&self, features: &[SparseVector]) -> Result<Vec<f64>> {
        features.iter().map(|f| self.predict_proba(f)).collect()
    }

    /// Hyperparameters as a name/value map for model metadata.
    pub fn hyperparameters(&self) -> std::collections::HashMap<String, f64> {
        let mut params = std::collections::HashMap::new();
        params.insert("learning_rate".to_string(), self.learning_rate);
        params.insert("max_iter".to_string(), self.max_iter as f64);
        params.insert("l2_penalty".to_string(), self.l2_penalty);
        params.insert("tolerance".to_string(), self.tolerance);
        params
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

/// Numerically stable sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Logistic loss for one prediction, clamped away from log(0).
fn log_loss(p: f64, target: f64) -> f64 {
    let p = p.clamp(1e-12, 1.0 - 1e-12);
    -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
}

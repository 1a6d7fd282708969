//! Evaluation metrics for binary classifiers.

pub mod auc;

pub use auc::{accuracy, roc_auc};

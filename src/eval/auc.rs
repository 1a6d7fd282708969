//! Area under the ROC curve and related metrics.

use crate::error::{PolarityError, Result};

/// Area under the ROC curve for binary labels and real-valued scores.
///
/// Computed rank-based (Mann-Whitney U): the probability that a randomly
/// chosen positive example scores higher than a randomly chosen negative
/// one. Tied scores receive their average rank, so deterministic scorers
/// that collapse many examples onto one score are handled correctly.
///
/// Errors if the inputs are empty, have mismatched lengths, or contain only
/// one class.
pub fn roc_auc(labels: &[bool], scores: &[f64]) -> Result<f64> {
    if labels.is_empty() {
        return Err(PolarityError::evaluation("AUC over empty input"));
    }
    if labels.len() != scores.len() {
        return Err(PolarityError::evaluation(format!(
            "Label count {} does not match score count {}",
            labels.len(),
            scores.len()
        )));
    }
    if scores.iter().any(|s| s.is_nan()) {
        return Err(PolarityError::evaluation("AUC over NaN scores"));
    }

    let positives = labels.iter().filter(|&&l| l).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(PolarityError::evaluation(
            "AUC requires both positive and negative examples",
        ));
    }

    // Sort indices by score ascending, then walk tie groups assigning the
    // average rank (1-based) to every member of a group.
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap());

    let mut positive_rank_sum = 0.0;
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // Ranks i+1 ..= j+1 share this score
        let average_rank = (i + 1 + j + 1) as f64 / 2.0;
        for &idx in &order[i..=j] {
            if labels[idx] {
                positive_rank_sum += average_rank;
            }
        }
        i = j + 1;
    }

    let n_pos = positives as f64;
    let n_neg = negatives as f64;
    let u = positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0;

    Ok(u / (n_pos * n_neg))
}

/// Fraction of predictions matching the labels.
pub fn accuracy(labels: &[bool], predictions: &[bool]) -> Result<f64> {
    if labels.is_empty() {
        return Err(PolarityError::evaluation("Accuracy over empty input"));
    }
    if labels.len() != predictions.len() {
        return Err(PolarityError::evaluation(format!(
            "Label count {} does not match prediction count {}",
            labels.len(),
            predictions.len()
        )));
    }

    let correct = labels
        .iter()
        .zip(predictions.iter())
        .filter(|(l, p)| l == p)
        .count();

    Ok(correct as f64 / labels.len() as f64)
}

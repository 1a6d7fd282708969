//! Seeded random splitting into train / test / validation parts.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use serde::{Deserialize, Serialize};

use crate::dataset::Review;
use crate::error::{PolarityError, Result};

/// Fractions of the dataset assigned to each part.
///
/// Fractions must be positive and sum to at most 1.0. Any remainder after
/// the validation cut is discarded, matching the usual random-split
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    /// Fraction used for model training.
    pub train: f64,
    /// Fraction used for sweep selection (held-out AUC).
    pub test: f64,
    /// Fraction used for final validation reporting.
    pub validation: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self {
            train: 0.7,
            test: 0.15,
            validation: 0.15,
        }
    }
}

impl SplitFractions {
    /// Validate that the fractions are usable.
    pub fn validate(&self) -> Result<()> {
        let parts = [self.train, self.test, self.validation];
        if parts.iter().any(|f| *f <= 0.0 || !f.is_finite()) {
            return Err(PolarityError::dataset(
                "Split fractions must be positive and finite",
            ));
        }
        let sum: f64 = parts.iter().sum();
        if sum > 1.0 + 1e-9 {
            return Err(PolarityError::dataset(format!(
                "Split fractions sum to {sum:.4}, which exceeds 1.0"
            )));
        }
        Ok(())
    }
}

/// A three-way split of the dataset.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    /// Training rows.
    pub train: Vec<Review>,
    /// Held-out rows used to pick the best sweep candidate.
    pub test: Vec<Review>,
    /// Rows used only for final validation reporting.
    pub validation: Vec<Review>,
}

impl DatasetSplit {
    /// Shuffle the reviews with a seeded RNG and cut them into three parts.
    ///
    /// The split is deterministic for a given seed and input order, and the
    /// three parts are disjoint.
    pub fn new(reviews: &[Review], fractions: SplitFractions, seed: u64) -> Result<Self> {
        fractions.validate()?;

        if reviews.is_empty() {
            return Err(PolarityError::dataset("Cannot split an empty dataset"));
        }

        let mut shuffled: Vec<Review> = reviews.to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);

        let n = shuffled.len();
        let train_end = (n as f64 * fractions.train).round() as usize;
        let test_end = train_end + (n as f64 * fractions.test).round() as usize;
        let validation_end = test_end + (n as f64 * fractions.validation).round() as usize;

        let train_end = train_end.min(n);
        let test_end = test_end.min(n);
        let validation_end = validation_end.min(n);

        let validation = shuffled.split_off(test_end.min(validation_end));
        let validation = validation[..validation_end - test_end].to_vec();
        let test = shuffled.split_off(train_end);
        let train = shuffled;

        Ok(DatasetSplit {
            train,
            test,
            validation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reviews(n: usize) -> Vec<Review> {
        (0..n)
            .map(|i| Review::new((i % 5 + 1) as u8, format!("review number {i}")))
            .collect()
    }

    #[test]
    fn test_split_is_deterministic() {
        let reviews = sample_reviews(100);

        let a = DatasetSplit::new(&reviews, SplitFractions::default(), 42).unwrap();
        let b = DatasetSplit::new(&reviews, SplitFractions::default(), 42).unwrap();

        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
        assert_eq!(a.validation, b.validation);
    }

    #[test]
    fn test_split_differs_across_seeds() {
        let reviews = sample_reviews(100);

        let a = DatasetSplit::new(&reviews, SplitFractions::default(), 1).unwrap();
        let b = DatasetSplit::new(&reviews, SplitFractions::default(), 2).unwrap();

        assert_ne!(a.train, b.train);
    }

    #[test]
    fn test_split_sizes() {
        let reviews = sample_reviews(200);
        let split = DatasetSplit::new(&reviews, SplitFractions::default(), 7).unwrap();

        assert_eq!(split.train.len(), 140);
        assert_eq!(split.test.len(), 30);
        assert_eq!(split.validation.len(), 30);
        assert_eq!(
            split.train.len() + split.test.len() + split.validation.len(),
            200
        );
    }

    #[test]
    fn test_split_parts_are_disjoint() {
        let reviews = sample_reviews(50);
        let split = DatasetSplit::new(&reviews, SplitFractions::default(), 3).unwrap();

        // Texts are unique, so text overlap means row overlap.
        for r in &split.test {
            assert!(!split.train.contains(r));
            assert!(!split.validation.contains(r));
        }
    }

    #[test]
    fn test_invalid_fractions() {
        let reviews = sample_reviews(10);
        let bad = SplitFractions {
            train: 0.8,
            test: 0.3,
            validation: 0.2,
        };
        assert!(DatasetSplit::new(&reviews, bad, 0).is_err());

        let zero = SplitFractions {
            train: 0.0,
            test: 0.5,
            validation: 0.5,
        };
        assert!(DatasetSplit::new(&reviews, zero, 0).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        assert!(DatasetSplit::new(&[], SplitFractions::default(), 0).is_err());
    }
}

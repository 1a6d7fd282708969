//! Review dataset acquisition, parsing, and splitting.
//!
//! The dataset is a two-column TSV of `(rating, text)` rows with no header.
//! Ratings are 1-5 stars; the binary sentiment label is derived as
//! `rating > 3`.

pub mod fetch;
pub mod loader;
pub mod split;

pub use fetch::{DEFAULT_DATASET_URL, ensure_dataset};
pub use loader::{LoadReport, load_tsv};
pub use split::{DatasetSplit, SplitFractions};

use serde::{Deserialize, Serialize};

/// A single review row: star rating and free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Star rating, 1-5.
    pub rating: u8,
    /// Review text.
    pub text: String,
}

impl Review {
    /// Create a new review.
    pub fn new<S: Into<String>>(rating: u8, text: S) -> Self {
        Review {
            rating,
            text: text.into(),
        }
    }

    /// Binary sentiment label: true iff the rating is above 3 stars.
    pub fn label(&self) -> bool {
        self.rating > 3
    }
}

/// A loaded collection of reviews together with its load report.
#[derive(Debug, Clone)]
pub struct ReviewDataset {
    /// The parsed review rows, in file order.
    pub reviews: Vec<Review>,
    /// Counts of parsed and skipped lines.
    pub report: LoadReport,
}

impl ReviewDataset {
    /// Number of loaded reviews.
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Check whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Derived binary labels, in row order.
    pub fn labels(&self) -> Vec<bool> {
        self.reviews.iter().map(|r| r.label()).collect()
    }

    /// Fraction of positive labels.
    pub fn positive_ratio(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let positives = self.reviews.iter().filter(|r| r.label()).count();
        positives as f64 / self.reviews.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_threshold() {
        assert!(!Review::new(1, "awful").label());
        assert!(!Review::new(3, "fine").label());
        assert!(Review::new(4, "good").label());
        assert!(Review::new(5, "great").label());
    }

    #[test]
    fn test_positive_ratio() {
        let dataset = ReviewDataset {
            reviews: vec![
                Review::new(5, "great"),
                Review::new(1, "bad"),
                Review::new(4, "good"),
                Review::new(2, "poor"),
            ],
            report: LoadReport::default(),
        };

        assert_eq!(dataset.positive_ratio(), 0.5);
        assert_eq!(dataset.labels(), vec![true, false, true, false]);
    }
}

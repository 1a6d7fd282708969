//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};

/// A sparse vector of `f64` values.
///
/// Indices are kept sorted and unique; values align with indices by
/// position. This is the natural representation for hashed text features,
/// where only a handful of the `num_features` buckets are non-zero for any
/// one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    /// Total dimensionality of the vector.
    pub dim: usize,
    /// Sorted indices of non-zero entries.
    pub indices: Vec<u32>,
    /// Values at the corresponding indices.
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a sparse vector from parallel index/value slices.
    ///
    /// Indices must be strictly increasing and within `dim`.
    pub fn new(dim: usize, indices: Vec<u32>, values: Vec<f64>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(PolarityError::feature(
                "Sparse vector indices and values must have the same length",
            ));
        }
        if !indices.windows(2).all(|w| w[0] < w[1]) {
            return Err(PolarityError::feature(
                "Sparse vector indices must be strictly increasing",
            ));
        }
        if let Some(&last) = indices.last()
            && last as usize >= dim
        {
            return Err(PolarityError::feature(format!(
                "Sparse vector index {last} out of range for dimension {dim}"
            )));
        }

        Ok(SparseVector {
            dim,
            indices,
            values,
        })
    }

    /// An all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        SparseVector {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check whether the vector has no non-zero entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dot product against a dense weight slice of length `dim`.
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dim {
            return Err(PolarityError::feature(format!(
                "Weight slice length {} does not match vector dimension {}",
                weights.len(),
                self.dim
            )));
        }

        Ok(self
            .indices
            .iter()
            .zip(self.values.iter())
            .map(|(&i, &v)| v * weights[i as usize])
            .sum())
    }

    /// Iterate over `(index, value)` pairs of non-zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_input() {
        assert!(SparseVector::new(4, vec![0, 2], vec![1.0, 2.0]).is_ok());
        assert!(SparseVector::new(4, vec![0, 2], vec![1.0]).is_err());
        assert!(SparseVector::new(4, vec![2, 0], vec![1.0, 2.0]).is_err());
        assert!(SparseVector::new(4, vec![0, 4], vec![1.0, 2.0]).is_err());
        assert!(SparseVector::new(4, vec![1, 1], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_dot() {
        let v = SparseVector::new(4, vec![0, 2], vec![2.0, 3.0]).unwrap();
        let weights = [1.0, 10.0, 0.5, 100.0];

        assert_eq!(v.dot(&weights).unwrap(), 2.0 + 1.5);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let v = SparseVector::zeros(4);
        assert!(v.dot(&[0.0; 3]).is_err());
    }

    #[test]
    fn test_zeros() {
        let v = SparseVector::zeros(16);
        assert_eq!(v.dim, 16);
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.dot(&vec![1.0; 16]).unwrap(), 0.0);
    }
}

//! Feature derivation and assembly for review text.
//!
//! A review is featurized in three steps:
//!
//! 1. Numeric features derived from the token stream (word count, mean word
//!    length).
//! 2. Hashed term-frequency features over the same tokens.
//! 3. Assembly: the dense numeric columns are appended after the hashed
//!    features, giving a vector of dimension `num_features + 2`.

pub mod assembler;
pub mod hashing;
pub mod numeric;
pub mod vector;

pub use assembler::FeatureAssembler;
pub use hashing::HashingVectorizer;
pub use numeric::NumericFeatures;
pub use vector::SparseVector;

//! Error handling for dnary_huffman.
//!
//! Every failure is a validation failure detected before the first merge step,
//! so a returned error never leaves a partially built code behind.

use thiserror::Error;

use crate::min_heap::HeapErr;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HuffmanError {
    /// The coding alphabet needs at least two digits.
    #[error("invalid radix {radix}: a code alphabet needs at least 2 digits")]
    InvalidRadix { radix: usize },

    #[error("cannot build a code for an empty alphabet")]
    EmptyAlphabet,

    #[error("symbol #{index} has negative weight {weight}")]
    NegativeWeight { index: usize, weight: f64 },

    #[error("symbol #{index} has non-finite weight {weight}")]
    NonFiniteWeight { index: usize, weight: f64 },

    /// Bernoulli parameter outside `[0, 1]`.
    #[error("invalid probability {p}: must lie in [0, 1]")]
    InvalidProbability { p: f64 },

    #[error("invalid block length {n}: must lie in 1..={max}")]
    InvalidBlockLength { n: usize, max: usize },

    #[error("priority queue error: {0}")]
    Heap(#[from] HeapErr),
}

impl HuffmanError {
    pub fn invalid_radix(radix: usize) -> Self {
        Self::InvalidRadix { radix }
    }

    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidProbability { p }
    }

    pub fn invalid_block_length(n: usize, max: usize) -> Self {
        Self::InvalidBlockLength { n, max }
    }
}

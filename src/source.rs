//! Memoryless binary sources and their block (superletter) alphabets.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::symbols::WeightedSymbolSet;

/// Largest supported block length; 2^20 superletters.
pub const MAX_BLOCK_LENGTH: usize = 20;

/// A block of `len` binary source letters, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Superletter {
    bits: u32,
    len: u8,
}

impl Superletter {
    pub fn new(bits: u32, len: usize) -> Result<Self> {
        if len == 0 || len > MAX_BLOCK_LENGTH || (bits >> len) != 0 {
            return Err(HuffmanError::invalid_block_length(len, MAX_BLOCK_LENGTH));
        }
        Ok(Superletter {
            bits,
            len: len as u8,
        })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn zeros(&self) -> usize {
        self.len() - self.ones()
    }
}

impl fmt::Display for Superletter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.len())
    }
}

impl Serialize for Superletter {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> std::result::Result<Z::Ok, Z::Error> {
        serializer.collect_str(self)
    }
}

/// A Bernoulli(p) source: each letter is 1 with probability `p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BernoulliSource {
    p: f64,
}

impl BernoulliSource {
    pub fn new(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(HuffmanError::invalid_probability(p));
        }
        Ok(BernoulliSource { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Probability of the block: p^ones · (1-p)^zeros.
    pub fn probability(&self, letter: &Superletter) -> f64 {
        self.p.powi(letter.ones() as i32) * (1.0 - self.p).powi(letter.zeros() as i32)
    }

    /// All 2^n superletters of length `n` in ascending numeric order, weighted
    /// by their probability.
    pub fn superletters(&self, n: usize) -> Result<WeightedSymbolSet<Superletter>> {
        if n == 0 || n > MAX_BLOCK_LENGTH {
            return Err(HuffmanError::invalid_block_length(n, MAX_BLOCK_LENGTH));
        }
        debug!(p = self.p, n, count = 1u32 << n, "generating superletter table");

        (0..1u32 << n)
            .map(|bits| -> Result<(Superletter, f64)> {
                let letter = Superletter::new(bits, n)?;
                Ok((letter, self.probability(&letter)))
            })
            .collect::<Result<Vec<_>>>()
            .map(WeightedSymbolSet::from)
    }

    /// Entropy per letter in bits.
    pub fn entropy(&self) -> f64 {
        binary_entropy(self.p)
    }
}

/// H(p) = -p·log2 p - (1-p)·log2(1-p), with 0·log 0 = 0.
pub fn binary_entropy(p: f64) -> f64 {
    plogp(p) + plogp(1.0 - p)
}

/// -x·log2 x, zero at x = 0.
pub(crate) fn plogp(x: f64) -> f64 {
    if x > 0.0 { -x * x.log2() } else { 0.0 }
}

//! Weighted input alphabets.

use serde::Serialize;

use crate::error::{HuffmanError, Result};

/// One symbol of the input alphabet together with its weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedSymbol<S> {
    pub symbol: S,
    pub weight: f64,
}

impl<S> WeightedSymbol<S> {
    pub fn new(symbol: S, weight: f64) -> Self {
        WeightedSymbol { symbol, weight }
    }
}

/// An immutable, ordered collection of weighted symbols.
///
/// Weights are not normalized and are not validated on construction; the
/// builder checks them before it starts merging. Input order is preserved
/// and decides ties between equal weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedSymbolSet<S> {
    symbols: Vec<WeightedSymbol<S>>,
}

impl<S> WeightedSymbolSet<S> {
    pub fn new(symbols: Vec<WeightedSymbol<S>>) -> Self {
        WeightedSymbolSet { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedSymbol<S>> {
        self.symbols.iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.symbols.iter().map(|ws| ws.weight).sum()
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.symbols.iter().map(|ws| ws.weight)
    }

    /// Checks the set is non-empty and every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }
        for (index, ws) in self.symbols.iter().enumerate() {
            let weight = ws.weight;
            if weight.is_nan() || weight.is_infinite() {
                return Err(HuffmanError::NonFiniteWeight { index, weight });
            }
            if weight < 0.0 {
                return Err(HuffmanError::NegativeWeight { index, weight });
            }
        }
        Ok(())
    }
}

impl<S> FromIterator<(S, f64)> for WeightedSymbolSet<S> {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        WeightedSymbolSet {
            symbols: iter
                .into_iter()
                .map(|(symbol, weight)| WeightedSymbol::new(symbol, weight))
                .collect(),
        }
    }
}

impl<S> From<Vec<(S, f64)>> for WeightedSymbolSet<S> {
    fn from(pairs: Vec<(S, f64)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a, S> IntoIterator for &'a WeightedSymbolSet<S> {
    type Item = &'a WeightedSymbol<S>;
    type IntoIter = std::slice::Iter<'a, WeightedSymbol<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

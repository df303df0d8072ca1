//! Codewords and the symbol → codeword table produced by the builder.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Serialize, Serializer};

/// A codeword over the digits `0..radix`, most significant digit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Codeword {
    digits: Vec<usize>,
}

impl Codeword {
    pub fn new(digits: Vec<usize>) -> Self {
        Codeword { digits }
    }

    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.digits.starts_with(&self.digits)
    }
}

impl From<Vec<usize>> for Codeword {
    fn from(digits: Vec<usize>) -> Self {
        Codeword::new(digits)
    }
}

impl PartialOrd for Codeword {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Codeword {
    /// Shorter codewords first, then by digit value.
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(chars) = self
            .digits
            .iter()
            .map(|&d| u32::try_from(d).ok().and_then(|d| char::from_digit(d, 36)))
            .collect::<Option<String>>()
        {
            return f.write_str(&chars);
        }
        // radix above 36: no single-character digits left
        for (i, d) in self.digits.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl Serialize for Codeword {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeEntry<S> {
    pub symbol: S,
    pub weight: f64,
    pub codeword: Codeword,
}

/// Mapping from every input symbol to its codeword.
///
/// Entries are kept in tree order, which is lexicographic codeword order.
/// Use [`CodeAssignment::sorted`] for the (length, value) presentation order.
#[derive(Debug, Clone)]
pub struct CodeAssignment<S> {
    radix: usize,
    root_weight: f64,
    entries: Vec<CodeEntry<S>>,
    index: HashMap<S, usize>,
}

impl<S: Clone + Eq + Hash> CodeAssignment<S> {
    pub(crate) fn new(radix: usize, root_weight: f64, entries: Vec<CodeEntry<S>>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.symbol.clone()).or_insert(i);
        }
        CodeAssignment {
            radix,
            root_weight,
            entries,
            index,
        }
    }

    pub fn get(&self, symbol: &S) -> Option<&Codeword> {
        self.index.get(symbol).map(|&i| &self.entries[i].codeword)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }
}

impl<S> CodeAssignment<S> {
    pub fn radix(&self) -> usize {
        self.radix
    }

    /// Combined weight of the tree root; equals the sum of the input weights.
    pub fn root_weight(&self) -> f64 {
        self.root_weight
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeEntry<S>> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<CodeEntry<S>> {
        self.entries
    }

    /// Entries ordered by codeword length, then codeword value.
    pub fn sorted(&self) -> Vec<&CodeEntry<S>> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.codeword.cmp(&b.codeword));
        sorted
    }

    /// Σ weight · length, not normalized.
    pub fn expected_length(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.weight * e.codeword.len() as f64)
            .sum()
    }

    /// Expected codeword length under the normalized weights. Zero when all
    /// weights are zero.
    pub fn average_length(&self) -> f64 {
        let total: f64 = self.entries.iter().map(|e| e.weight).sum();
        if total > 0.0 {
            self.expected_length() / total
        } else {
            0.0
        }
    }

    pub fn max_length(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.codeword.len())
            .max()
            .unwrap_or(0)
    }

    /// Σ radix^-len over the assigned codewords. At most 1 for any prefix code.
    pub fn kraft_sum(&self) -> f64 {
        let radix = self.radix as f64;
        self.entries
            .iter()
            .map(|e| radix.powi(-(e.codeword.len() as i32)))
            .sum()
    }

    pub fn is_prefix_free(&self) -> bool {
        let mut words: Vec<&[usize]> = self.entries.iter().map(|e| e.codeword.digits()).collect();
        words.sort_unstable();
        // in lexicographic order a prefix is always followed by one of its extensions
        words
            .windows(2)
            .all(|pair| !pair[1].starts_with(pair[0]))
    }
}

impl<'a, S> IntoIterator for &'a CodeAssignment<S> {
    type Item = &'a CodeEntry<S>;
    type IntoIter = std::slice::Iter<'a, CodeEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Average code length against source entropy, for one block length or a
//! sweep over many.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::code_table::{CodeAssignment, Codeword};
use crate::error::Result;
use crate::hufftree::DnaryHuffmanBuilder;
use crate::source::{BernoulliSource, Superletter, plogp};

/// Shannon entropy in bits of the normalized `weights`. Zero when the weights
/// sum to zero.
pub fn entropy<I: IntoIterator<Item = f64>>(weights: I) -> f64 {
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    weights.iter().map(|&w| plogp(w / total)).sum()
}

/// Code performance for one block length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockMetrics {
    pub block_length: usize,
    pub radix: usize,
    /// Source entropy per letter, in bits.
    pub entropy_bits: f64,
    /// Source entropy per letter, in radix-D digits.
    pub entropy_digits: f64,
    pub avg_len_superletter: f64,
    pub avg_len_per_letter: f64,
    /// Per-letter length minus the radix-D entropy.
    pub redundancy: f64,
    /// Per-letter length minus the entropy in bits. Same as `redundancy` for
    /// a binary code; for D > 2 it mixes digits and bits and can go negative.
    pub redundancy_bits: f64,
    pub max_codeword_length: usize,
}

impl BlockMetrics {
    fn measure(
        source: &BernoulliSource,
        block_length: usize,
        assignment: &CodeAssignment<Superletter>,
    ) -> Self {
        let radix = assignment.radix();
        let entropy_bits = source.entropy();
        let entropy_digits = entropy_bits / (radix as f64).log2();
        let avg_len_superletter = assignment.average_length();
        let avg_len_per_letter = avg_len_superletter / block_length as f64;

        BlockMetrics {
            block_length,
            radix,
            entropy_bits,
            entropy_digits,
            avg_len_superletter,
            avg_len_per_letter,
            redundancy: avg_len_per_letter - entropy_digits,
            redundancy_bits: avg_len_per_letter - entropy_bits,
            max_codeword_length: assignment.max_length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeRow {
    pub symbol: Superletter,
    pub probability: f64,
    pub codeword: Codeword,
}

/// Codeword table and metrics for the superletters of one block length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockReport {
    pub p: f64,
    #[serde(flatten)]
    pub metrics: BlockMetrics,
    pub table: Vec<CodeRow>,
}

impl BlockReport {
    pub fn compute(source: &BernoulliSource, block_length: usize, radix: usize) -> Result<Self> {
        let builder = DnaryHuffmanBuilder::new(radix)?;
        let symbols = source.superletters(block_length)?;
        let assignment = builder.build(&symbols)?;

        let metrics = BlockMetrics::measure(source, block_length, &assignment);
        info!(
            n = block_length,
            radix,
            avg_len = metrics.avg_len_per_letter,
            redundancy = metrics.redundancy,
            "block code built"
        );

        let table = assignment
            .sorted()
            .into_iter()
            .map(|entry| CodeRow {
                symbol: entry.symbol,
                probability: entry.weight,
                codeword: entry.codeword.clone(),
            })
            .collect();

        Ok(BlockReport {
            p: source.p(),
            metrics,
            table,
        })
    }
}

impl fmt::Display for BlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        writeln!(f, "Symbol\tProb\tHuffman Code")?;
        for row in &self.table {
            writeln!(f, "{}\t{:.4}\t{}", row.symbol, row.probability, row.codeword)?;
        }
        writeln!(f, "H(x): {:.4}", m.entropy_bits)?;
        if m.radix != 2 {
            writeln!(f, "H(x) in base {}: {:.4}", m.radix, m.entropy_digits)?;
        }
        writeln!(
            f,
            "average huffman code length of superletter (len={}): {:.4}",
            m.block_length, m.avg_len_superletter
        )?;
        writeln!(
            f,
            "average huffman code length per letter: {:.4}",
            m.avg_len_per_letter
        )?;
        if m.radix != 2 {
            writeln!(f, "redundancy (bits): {:.4}", m.redundancy_bits)?;
        }
        writeln!(f, "redundancy: {:.4}", m.redundancy)
    }
}

/// Per-letter code length for a range of block lengths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub p: f64,
    pub radix: usize,
    pub points: Vec<BlockMetrics>,
}

/// Builds one code per block length. Each build is independent, so they run
/// on the rayon pool; results come back in `block_lengths` order.
pub fn sweep<I>(source: &BernoulliSource, block_lengths: I, radix: usize) -> Result<SweepReport>
where
    I: IntoIterator<Item = usize>,
{
    let builder = DnaryHuffmanBuilder::new(radix)?;
    let block_lengths: Vec<usize> = block_lengths.into_iter().collect();
    debug!(p = source.p(), radix, blocks = block_lengths.len(), "starting sweep");

    let points = block_lengths
        .par_iter()
        .map(|&n| -> Result<BlockMetrics> {
            let symbols = source.superletters(n)?;
            let assignment = builder.build(&symbols)?;
            Ok(BlockMetrics::measure(source, n, &assignment))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepReport {
        p: source.p(),
        radix,
        points,
    })
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in &self.points {
            writeln!(
                f,
                "n = {} : avg len = {:.4}",
                point.block_length, point.avg_len_per_letter
            )?;
        }
        Ok(())
    }
}

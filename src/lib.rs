//! # dnary_huffman
//!
//! Optimal D-ary prefix codes (Huffman codes) over arbitrary weighted
//! alphabets, plus the tooling to study block coding of a Bernoulli source:
//! superletter tables, entropy and per-letter redundancy.
//!
//! ## Quick Start
//!
//! ```rust
//! use dnary_huffman::{WeightedSymbolSet, build};
//!
//! let symbols: WeightedSymbolSet<char> =
//!     vec![('a', 0.5), ('b', 0.25), ('c', 0.125), ('d', 0.125)].into();
//! let code = build(&symbols, 2)?;
//!
//! assert_eq!(code.get(&'a').map(|c| c.to_string()), Some("0".to_string()));
//! assert_eq!(code.average_length(), 1.75);
//! # Ok::<(), dnary_huffman::HuffmanError>(())
//! ```
//!
//! Block coding a Bernoulli(0.8) source with a ternary code alphabet:
//!
//! ```rust
//! use dnary_huffman::{BernoulliSource, BlockReport};
//!
//! let source = BernoulliSource::new(0.8)?;
//! let report = BlockReport::compute(&source, 4, 3)?;
//! assert!(report.metrics.avg_len_per_letter >= report.metrics.entropy_digits);
//! # Ok::<(), dnary_huffman::HuffmanError>(())
//! ```

pub mod code_table;
pub mod config;
pub mod error;
pub mod hufftree;
pub mod min_heap;
pub mod report;
pub mod source;
pub mod symbols;

// Re-export main types for convenience
pub use code_table::{CodeAssignment, CodeEntry, Codeword};
pub use config::{OutputFormat, ReportConfig};
pub use error::{HuffmanError, Result};
pub use hufftree::{DnaryHuffmanBuilder, HuffmanTree, MergeNode, build, padding_count};
pub use report::{BlockMetrics, BlockReport, SweepReport, entropy, sweep};
pub use source::{BernoulliSource, MAX_BLOCK_LENGTH, Superletter, binary_entropy};
pub use symbols::{WeightedSymbol, WeightedSymbolSet};

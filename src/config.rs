use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};
use crate::source::{BernoulliSource, MAX_BLOCK_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Parameters of one report run: a single block report, optionally followed
/// by a sweep over block lengths `1..=sweep_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Probability of a 1 in the Bernoulli source.
    pub probability: f64,
    pub block_length: usize,
    pub radix: usize,
    /// Largest block length of the sweep; 0 disables it.
    pub sweep_max: usize,
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            probability: 0.8,
            block_length: 3,
            radix: 2,
            sweep_max: 14,
            format: OutputFormat::Text,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        BernoulliSource::new(self.probability)?;
        if self.radix < 2 {
            return Err(HuffmanError::invalid_radix(self.radix));
        }
        for n in [self.block_length, self.sweep_max] {
            if n > MAX_BLOCK_LENGTH {
                return Err(HuffmanError::invalid_block_length(n, MAX_BLOCK_LENGTH));
            }
        }
        if self.block_length == 0 {
            return Err(HuffmanError::invalid_block_length(0, MAX_BLOCK_LENGTH));
        }
        Ok(())
    }

    pub fn source(&self) -> Result<BernoulliSource> {
        BernoulliSource::new(self.probability)
    }

    pub fn sweep_lengths(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.sweep_max
    }
}

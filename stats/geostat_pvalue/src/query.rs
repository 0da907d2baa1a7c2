//! Inputs and outputs of a p-value lookup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rejection::Rejection;

/// Which family of tables a query is answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TableFamily {
    /// Normal table when `n >= min_n`, Student's t otherwise.
    #[default]
    Auto,
    /// Chi-square table; `n` counts categories and df is `n - 1`.
    ChiSquare,
}

/// A test statistic and the facts needed to look up its p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PValueQuery {
    /// The statistic as computed by the test. Its sign is ignored.
    pub test_statistic: f64,
    /// Sample size, paired-sample size, or category count for chi-square.
    pub sample_size: u32,
    /// Rejection region.
    pub rejection: Rejection,
    /// Normal/t threshold for this query; `None` uses the engine default.
    pub min_n: Option<u32>,
    /// Table family.
    pub family: TableFamily,
}

impl PValueQuery {
    /// Normal-or-t query with the engine's default threshold.
    pub fn new(test_statistic: f64, sample_size: u32, rejection: Rejection) -> Self {
        Self {
            test_statistic,
            sample_size,
            rejection,
            min_n: None,
            family: TableFamily::Auto,
        }
    }

    /// Upper-tail chi-square query over `categories` categories.
    pub fn chi_square(chi_square: f64, categories: u32) -> Self {
        Self {
            test_statistic: chi_square,
            sample_size: categories,
            rejection: Rejection::Positive,
            min_n: None,
            family: TableFamily::ChiSquare,
        }
    }

    /// Use the normal table from `min_n` observations upwards
    /// (e.g. 10 for the Wilcoxon signed-rank test).
    pub fn with_min_n(mut self, min_n: u32) -> Self {
        self.min_n = Some(min_n);
        self
    }
}

/// The outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PValueResult {
    /// Area read from the table: between the mean and the statistic for the
    /// normal and t tables, to the left of the statistic for chi-square.
    pub area: f64,
    /// The p-value.
    pub pvalue: f64,
}

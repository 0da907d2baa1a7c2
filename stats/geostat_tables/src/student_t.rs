//! Student's t critical-value tables.
//!
//! Rows are degrees of freedom and columns are tail probabilities. The
//! one-tailed table is headed by the probability in a single tail, the
//! two-tailed table by the probability split across both tails, so the same
//! critical value sits under `0.01` in one and `0.02` in the other.

use std::io::Read;

use log::debug;

use crate::error::{Result, TableError};
use crate::grid::{load_rectangular_table, Grid};
use crate::nearest::{nearest_index, nearest_row};
use crate::round_to;
use crate::tails::Tails;

const TABLE_NAME: &str = "Student's t";

/// A loaded Student's t table for one tail convention.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentTTable {
    grid: Grid,
    tails: Tails,
}

impl StudentTTable {
    /// Row-key header of a t table
    pub const ROW_KEY: &'static str = "df";

    /// Wrap an already loaded grid whose columns follow `tails`.
    pub fn from_grid(grid: Grid, tails: Tails) -> Result<Self> {
        if grid.row_key_name() != Self::ROW_KEY {
            return Err(TableError::load(
                grid.source(),
                format!("Student's t table must be keyed by '{}'", Self::ROW_KEY),
            ));
        }
        Ok(Self { grid, tails })
    }

    /// Load from CSV text.
    pub fn from_reader<R: Read>(source: &str, reader: R, tails: Tails) -> Result<Self> {
        Self::from_grid(load_rectangular_table(source, reader, Self::ROW_KEY)?, tails)
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tail convention of the column headers.
    pub fn tails(&self) -> Tails {
        self.tails
    }

    /// One-tailed area between the mean and `t` at `df` degrees of freedom.
    ///
    /// The nearest tabulated df is chosen, then the nearest tabulated value to
    /// `|t|` in that row. Its column probability is turned into the area on one
    /// side of the mean: `0.5 - column / tails`, which for the two-tailed table
    /// is `(1 - column) / 2`.
    pub fn confidence_for_statistic(&self, t: f64, df: u32) -> Result<f64> {
        let row = nearest_row(&self.grid, TABLE_NAME, f64::from(df))?;
        let values = self.grid.row(row).unwrap_or_default();
        let column = nearest_index(values.iter().copied(), t.abs())?;
        let alpha = self.grid.column_keys()[column];
        let confidence = round_to(0.5 - alpha / self.tails.divisor(), 6);
        debug!(
            "t ({}): t = {t}, df = {df} -> df row {}, column {alpha} -> {confidence}",
            self.tails,
            self.grid.row_keys()[row]
        );
        Ok(confidence)
    }

    /// Critical t for `df` degrees of freedom at the given confidence, to 4
    /// decimals. Textbook default confidence is 0.95.
    pub fn statistic_for_confidence(&self, df: u32, confidence: f64) -> Result<f64> {
        check_confidence(confidence)?;
        let row = nearest_row(&self.grid, TABLE_NAME, f64::from(df))?;
        let column = nearest_index(self.grid.column_keys().iter().copied(), 1.0 - confidence)?;
        Ok(round_to(self.grid.at(row, column), 4))
    }
}

pub(crate) fn check_confidence(confidence: f64) -> Result<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(TableError::InvalidArgument(format!(
            "confidence must lie strictly between 0 and 1, got {confidence}"
        )))
    }
}

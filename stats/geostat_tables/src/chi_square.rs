//! Chi-square critical-value table.
//!
//! Rows are degrees of freedom; columns are upper-tail probabilities, from
//! 0.995 down to 0.001. The table is one-tailed by convention.

use std::io::Read;

use log::debug;

use crate::error::{Result, TableError};
use crate::grid::{load_rectangular_table, Grid};
use crate::nearest::{nearest_index, nearest_row};
use crate::round_to;
use crate::student_t::check_confidence;

const TABLE_NAME: &str = "chi-square";

/// A loaded chi-square table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareTable {
    grid: Grid,
}

impl ChiSquareTable {
    /// Row-key header of a chi-square table
    pub const ROW_KEY: &'static str = "df";

    /// Wrap an already loaded grid.
    pub fn from_grid(grid: Grid) -> Result<Self> {
        if grid.row_key_name() != Self::ROW_KEY {
            return Err(TableError::load(
                grid.source(),
                format!("chi-square table must be keyed by '{}'", Self::ROW_KEY),
            ));
        }
        Ok(Self { grid })
    }

    /// Load from CSV text.
    pub fn from_reader<R: Read>(source: &str, reader: R) -> Result<Self> {
        Self::from_grid(load_rectangular_table(source, reader, Self::ROW_KEY)?)
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Area to the left of `chi2` at `df` degrees of freedom: one minus the
    /// upper-tail probability heading the nearest tabulated value.
    pub fn confidence_for_statistic(&self, chi2: f64, df: u32) -> Result<f64> {
        let row = nearest_row(&self.grid, TABLE_NAME, f64::from(df))?;
        let values = self.grid.row(row).unwrap_or_default();
        let column = nearest_index(values.iter().copied(), chi2)?;
        let alpha = self.grid.column_keys()[column];
        let confidence = round_to(1.0 - alpha, 6);
        debug!(
            "chi-square: chi2 = {chi2}, df = {df} -> df row {}, column {alpha} -> {confidence}",
            self.grid.row_keys()[row]
        );
        Ok(confidence)
    }

    /// Critical chi-square for `df` degrees of freedom at the given confidence,
    /// to 4 decimals.
    pub fn statistic_for_confidence(&self, df: u32, confidence: f64) -> Result<f64> {
        check_confidence(confidence)?;
        let row = nearest_row(&self.grid, TABLE_NAME, f64::from(df))?;
        let column = nearest_index(self.grid.column_keys().iter().copied(), 1.0 - confidence)?;
        Ok(round_to(self.grid.at(row, column), 4))
    }
}

//! Standard normal table.
//!
//! Rows are keyed by the Z-score to one decimal (`0.0`, `0.1`, ...), columns by
//! the second decimal (`0.00` to `0.09`), and each cell holds the area between
//! the mean and z. The table covers one half of the curve; lookups use the
//! magnitude of z.

use std::io::Read;

use log::debug;

use crate::error::{Result, TableError};
use crate::grid::{load_rectangular_table, Grid};
use crate::nearest::nearest_cell;
use crate::round_to;
use crate::tails::Tails;

/// A loaded normal table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalTable {
    grid: Grid,
}

impl NormalTable {
    /// Row-key header of a normal table
    pub const ROW_KEY: &'static str = "z";

    /// Wrap an already loaded grid.
    pub fn from_grid(grid: Grid) -> Result<Self> {
        if grid.row_key_name() != Self::ROW_KEY {
            return Err(TableError::load(
                grid.source(),
                format!("normal table must be keyed by '{}'", Self::ROW_KEY),
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

    /// Area between the mean and `z`, to 6 decimals.
    ///
    /// `|z|` is rounded to hundredths and split into its tenths (row) and the
    /// remaining hundredth (column); both must exist in the table.
    pub fn probability_for_score(&self, z: f64) -> Result<f64> {
        if !z.is_finite() {
            return Err(TableError::InvalidArgument(format!(
                "z-score must be finite, got {z}"
            )));
        }

        let hundredths = (z.abs() * 100.0).round();
        let row_key = (hundredths / 10.0).trunc() / 10.0;
        let column_key = (hundredths % 10.0) / 100.0;

        let row = self
            .grid
            .row_index(row_key)
            .ok_or_else(|| TableError::key_not_found("normal", "z", row_key))?;
        let column = self
            .grid
            .column_index(column_key)
            .ok_or_else(|| TableError::key_not_found("normal", "z column", column_key))?;

        let area = round_to(self.grid.at(row, column), 6);
        debug!("normal: z = {z} -> [{row_key}][{column_key}] = {area}");
        Ok(area)
    }

    /// [`probability_for_score`](Self::probability_for_score) scaled by the
    /// number of tails.
    pub fn probability_for_score_tails(&self, z: f64, tails: Tails) -> Result<f64> {
        self.probability_for_score(z)
            .map(|area| round_to(area * tails.divisor(), 6))
    }

    /// Z-score whose tabulated area is nearest to `prob / tails`.
    pub fn score_for_probability(&self, prob: f64, tails: Tails) -> Result<f64> {
        if !prob.is_finite() || prob < 0.0 {
            return Err(TableError::InvalidArgument(format!(
                "probability must be a non-negative number, got {prob}"
            )));
        }

        let target = prob / tails.divisor();
        let (row, column) = nearest_cell(&self.grid, target)?;
        let z = round_to(self.grid.row_keys()[row] + self.grid.column_keys()[column], 2);
        debug!("normal: area {target} -> z = {z}");
        Ok(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{EmbeddedTables, TableId, TableResolver};

    fn table() -> NormalTable {
        let text = EmbeddedTables.read(TableId::Normal).unwrap();
        NormalTable::from_reader("normal", text.as_bytes()).unwrap()
    }

    #[test]
    fn looks_up_area_by_row_and_column() {
        let table = table();
        assert_eq!(table.probability_for_score(1.45).unwrap(), 0.4265);
        assert_eq!(table.probability_for_score(1.96).unwrap(), 0.475);
        assert_eq!(table.probability_for_score(0.0).unwrap(), 0.0);
    }

    #[test]
    fn uses_magnitude_and_rounds_to_hundredths() {
        let table = table();
        assert_eq!(table.probability_for_score(-1.245).unwrap(), 0.39435);
        assert_eq!(table.probability_for_score(1.449).unwrap(), 0.4265);
    }

    #[test]
    fn scores_outside_the_table_are_not_found() {
        let err = table().probability_for_score(100.0).unwrap_err();
        assert!(matches!(err, TableError::KeyNotFound { .. }), "{err:?}");
    }

    #[test]
    fn doubles_area_for_two_tails() {
        let table = table();
        assert_eq!(table.probability_for_score_tails(1.96, Tails::Two).unwrap(), 0.95);
    }

    #[test]
    fn finds_score_for_area() {
        let table = table();
        assert_eq!(table.score_for_probability(0.4265, Tails::One).unwrap(), 1.45);
        assert_eq!(table.score_for_probability(0.95, Tails::Two).unwrap(), 1.96);
        // 0.45 sits halfway between 1.64 and 1.65; the earlier column wins
        assert_eq!(table.score_for_probability(0.45, Tails::One).unwrap(), 1.64);
    }

    #[test]
    fn rejects_wrongly_keyed_grid() {
        let text = "df,0.1\n1,3.078\n";
        let grid = load_rectangular_table("t", text.as_bytes(), "df").unwrap();
        assert!(NormalTable::from_grid(grid).is_err());
    }
}

//! Nearest-value search over tabulated values.
//!
//! All lookups in this crate go through [`nearest_index`]: it walks the
//! candidates in their declared order and keeps the first one with the smallest
//! absolute difference. Callers rely on that order when they map the winner back
//! to a row or column key, so candidates are never sorted.

use log::trace;

use crate::error::{Result, TableError};
use crate::grid::Grid;

/// Position of the candidate closest to `target`.
///
/// Ties go to the candidate that comes first.
pub fn nearest_index<I>(candidates: I, target: f64) -> Result<usize>
where
    I: IntoIterator<Item = f64>,
{
    if !target.is_finite() {
        return Err(TableError::InvalidArgument(format!(
            "cannot search for non-finite value {target}"
        )));
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.into_iter().enumerate() {
        let distance = (candidate - target).abs();
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i).ok_or_else(|| {
        TableError::InvalidArgument("nearest-value search needs at least one candidate".into())
    })
}

/// The candidate closest to `target`.
pub fn nearest(candidates: &[f64], target: f64) -> Result<f64> {
    nearest_index(candidates.iter().copied(), target).map(|i| candidates[i])
}

/// (row, column) of the cell whose value is nearest to `target`.
///
/// The search runs in two passes: first the nearest value within each column,
/// then the nearest among those per-column winners. That is nearest in value
/// only, and can differ from a true two-dimensional search when the table has
/// repeated values; published lookups were computed this way, so keep it.
pub fn nearest_cell(grid: &Grid, target: f64) -> Result<(usize, usize)> {
    let mut per_column = Vec::with_capacity(grid.column_count());
    for column in 0..grid.column_count() {
        let row = nearest_index(grid.column(column).into_iter().flatten(), target)?;
        per_column.push((row, grid.at(row, column)));
    }

    let column = nearest_index(per_column.iter().map(|&(_, value)| value), target)?;
    let row = per_column[column].0;
    trace!(
        "nearest cell to {target} in {}: row {row}, column {column} ({})",
        grid.source(),
        grid.at(row, column)
    );
    Ok((row, column))
}

/// Index of the tabulated row key nearest to `key`.
///
/// Keys past the last row collapse onto it, which is how df tables
/// represent "effectively infinite" degrees of freedom. Keys below the first
/// row are outside the table.
pub(crate) fn nearest_row(grid: &Grid, table: &str, key: f64) -> Result<usize> {
    let smallest = grid.row_keys().iter().copied().fold(f64::INFINITY, f64::min);
    if key < smallest {
        return Err(TableError::key_not_found(table, grid.row_key_name(), key));
    }
    nearest_index(grid.row_keys().iter().copied(), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::load_rectangular_table;

    #[test]
    fn picks_closest_value() {
        assert_eq!(nearest(&[0.1, 0.4, 0.9], 0.45).unwrap(), 0.4);
        assert_eq!(nearest(&[0.1, 0.4, 0.9], 5.0).unwrap(), 0.9);
        assert_eq!(nearest(&[0.1, 0.4, 0.9], -5.0).unwrap(), 0.1);
    }

    #[test]
    fn ties_go_to_first_in_declared_order() {
        // 2.0 and 4.0 are both 1.0 away from 3.0
        assert_eq!(nearest_index([4.0, 2.0], 3.0).unwrap(), 0);
        assert_eq!(nearest_index([2.0, 4.0], 3.0).unwrap(), 0);
        assert_eq!(nearest(&[9.0, 4.0, 2.0], 3.0).unwrap(), 4.0);
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let err = nearest(&[], 1.0).unwrap_err();
        assert!(matches!(err, TableError::InvalidArgument(_)));
    }

    #[test]
    fn non_finite_targets_are_rejected() {
        assert!(nearest(&[1.0], f64::NAN).is_err());
        assert!(nearest(&[1.0], f64::INFINITY).is_err());
    }

    #[test]
    fn two_pass_cell_search_prefers_earlier_column_on_ties() {
        // 0.30 appears in both columns; the first column wins.
        let text = "k,1,2\n1,0.10,0.20\n2,0.30,0.30\n3,0.50,0.60\n";
        let grid = load_rectangular_table("tie", text.as_bytes(), "k").unwrap();
        assert_eq!(nearest_cell(&grid, 0.31).unwrap(), (1, 0));
    }

    #[test]
    fn rows_below_the_first_key_are_not_found() {
        let text = "df,0.1\n1,3.078\n2,1.886\n";
        let grid = load_rectangular_table("df", text.as_bytes(), "df").unwrap();
        assert_eq!(nearest_row(&grid, "test", 1.0).unwrap(), 0);
        assert_eq!(nearest_row(&grid, "test", 50.0).unwrap(), 1);
        let err = nearest_row(&grid, "test", 0.0).unwrap_err();
        assert!(
            matches!(err, TableError::KeyNotFound { ref axis, .. } if axis == "df"),
            "{err:?}"
        );
    }

    #[test]
    fn two_pass_cell_search_is_value_nearest() {
        let text = "k,1,2\n1,0.10,0.40\n2,0.35,0.90\n";
        let grid = load_rectangular_table("value", text.as_bytes(), "k").unwrap();
        // column 1 offers 0.35, column 2 offers 0.40: 0.40 is closer to 0.39
        assert_eq!(nearest_cell(&grid, 0.39).unwrap(), (0, 1));
    }
}

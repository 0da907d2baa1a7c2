//! Rectangular, read-only grids of tabulated values.
//!
//! A [`Grid`] is what every distribution table is built from: an ordered list
//! of row keys (degrees of freedom, or the tenths of a Z-score), an ordered list
//! of column keys parsed from the header row, and one value per (row, column).
//! The loader checks that the source is rectangular and fully numeric. It does
//! not check monotonicity; textbook tables are assumed to be well formed.

use std::io::Read;

use log::debug;

use crate::error::{Result, TableError};

/// Tolerance used when matching a derived key against a tabulated key.
const KEY_TOLERANCE: f64 = 1e-9;

/// An immutable two-dimensional table keyed by row and column.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    source: String,
    row_key_name: String,
    row_keys: Vec<f64>,
    column_headers: Vec<String>,
    column_keys: Vec<f64>,
    /// Row-major, `row_keys.len() * column_keys.len()` entries
    cells: Vec<f64>,
}

impl Grid {
    /// Description of the source the grid was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the row-key header (`z`, `df`, ...).
    pub fn row_key_name(&self) -> &str {
        &self.row_key_name
    }

    /// Row keys in table order.
    pub fn row_keys(&self) -> &[f64] {
        &self.row_keys
    }

    /// Column keys in table order.
    pub fn column_keys(&self) -> &[f64] {
        &self.column_keys
    }

    /// Column headers exactly as they appear in the source.
    pub fn column_headers(&self) -> &[String] {
        &self.column_headers
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    /// Number of value columns (the row-key column is not counted).
    pub fn column_count(&self) -> usize {
        self.column_keys.len()
    }

    /// Value at (`row`, `column`), if both indices are in range.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.row_count() && column < self.column_count() {
            Some(self.at(row, column))
        } else {
            None
        }
    }

    /// One row of values in column order, if `row` is in range.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.row_count() {
            return None;
        }
        let width = self.column_count();
        Some(&self.cells[row * width..(row + 1) * width])
    }

    /// One column of values in row order, if `column` is in range.
    pub fn column(&self, column: usize) -> Option<impl Iterator<Item = f64> + '_> {
        if column >= self.column_count() {
            return None;
        }
        Some(
            self.cells
                .iter()
                .skip(column)
                .step_by(self.column_count())
                .copied(),
        )
    }

    /// Index of the row whose key equals `key`.
    pub fn row_index(&self, key: f64) -> Option<usize> {
        self.row_keys
            .iter()
            .position(|k| (k - key).abs() < KEY_TOLERANCE)
    }

    /// Index of the column whose key equals `key`.
    pub fn column_index(&self, key: f64) -> Option<usize> {
        self.column_keys
            .iter()
            .position(|k| (k - key).abs() < KEY_TOLERANCE)
    }

    pub(crate) fn at(&self, row: usize, column: usize) -> f64 {
        self.cells[row * self.column_count() + column]
    }
}

/// Load a rectangular CSV table.
///
/// The header named `row_key_name` is the row axis; every other header is a
/// column key and must parse as a float, as must every data cell. `source` only
/// labels errors and log lines. It is not opened here.
pub fn load_rectangular_table<R: Read>(
    source: &str,
    reader: R,
    row_key_name: &str,
) -> Result<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| TableError::load(source, e.to_string()))?
        .clone();
    let key_position = headers
        .iter()
        .position(|h| h == row_key_name)
        .ok_or_else(|| TableError::load(source, format!("no '{row_key_name}' header column")))?;

    let mut column_headers = Vec::with_capacity(headers.len().saturating_sub(1));
    let mut column_keys = Vec::with_capacity(headers.len().saturating_sub(1));
    for (i, header) in headers.iter().enumerate() {
        if i == key_position {
            continue;
        }
        let key = parse_number(header).ok_or_else(|| {
            TableError::load(source, format!("column header '{header}' is not a number"))
        })?;
        column_headers.push(header.to_string());
        column_keys.push(key);
    }
    if column_keys.is_empty() {
        return Err(TableError::load(source, "table has no value columns"));
    }

    let mut row_keys = Vec::new();
    let mut cells = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        // header is line 1
        let line = line + 2;
        let record = record.map_err(|e| TableError::load(source, e.to_string()))?;
        if record.len() != headers.len() {
            return Err(TableError::load(
                source,
                format!(
                    "line {line} has {} cells, expected {}",
                    record.len(),
                    headers.len()
                ),
            ));
        }
        for (i, field) in record.iter().enumerate() {
            let value = parse_number(field).ok_or_else(|| {
                TableError::load(source, format!("line {line}: '{field}' is not a number"))
            })?;
            if i == key_position {
                row_keys.push(value);
            } else {
                cells.push(value);
            }
        }
    }
    if row_keys.is_empty() {
        return Err(TableError::load(source, "table has no rows"));
    }

    debug!(
        "loaded {source}: {} rows keyed by '{row_key_name}', {} columns",
        row_keys.len(),
        column_keys.len()
    );

    Ok(Grid {
        source: source.to_string(),
        row_key_name: row_key_name.to_string(),
        row_keys,
        column_headers,
        column_keys,
        cells,
    })
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

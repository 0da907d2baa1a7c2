//! Tabulated statistical distributions for geostat
//!
//! This crate loads the discretized normal, Student's t and chi-square tables
//! found at the back of statistics textbooks and answers lookups against them
//! by nearest-value search. There is no interpolation: a value between two
//! tabulated entries resolves to whichever entry is closer, and a value outside
//! the table is an error.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod chi_square;
pub mod error;
pub mod grid;
pub mod nearest;
pub mod normal;
pub mod source;
pub mod student_t;
pub mod tails;

// Re-export the main types for convenience
pub use catalog::TableCatalog;
pub use chi_square::ChiSquareTable;
pub use error::{Result, TableError};
pub use grid::{load_rectangular_table, Grid};
pub use nearest::{nearest, nearest_cell, nearest_index};
pub use normal::NormalTable;
pub use source::{DirectoryTables, EmbeddedTables, TableId, TableResolver};
pub use student_t::StudentTTable;
pub use tails::Tails;

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_to_requested_places() {
        assert_eq!(round_to(0.5 - 0.4265, 6), 0.0735);
        assert_eq!(round_to(0.5 - 0.39435, 6), 0.10565);
        assert_eq!(round_to(1.2449, 2), 1.24);
        assert_eq!(round_to(-0.3125, 2), -0.31);
    }
}

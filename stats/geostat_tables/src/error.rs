//! Errors raised while loading or querying a distribution table.

use thiserror::Error;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while loading or querying a table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// The table source is missing, unreadable, malformed or not rectangular.
    #[error("failed to load table '{table}': {reason}")]
    TableLoad {
        /// Human-readable description of the source that failed.
        table: String,
        /// What went wrong.
        reason: String,
    },

    /// A derived lookup key falls outside the tabulated domain.
    #[error("{axis} = {key} is outside the tabulated range of the {table} table")]
    KeyNotFound {
        /// Table that was queried.
        table: String,
        /// Axis the key belongs to (`z`, `df`, or a column axis).
        axis: String,
        /// The key that could not be resolved.
        key: f64,
    },

    /// An argument cannot be used for a lookup at all.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TableError {
    pub(crate) fn load(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TableLoad {
            table: table.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn key_not_found(table: &str, axis: &str, key: f64) -> Self {
        Self::KeyNotFound {
            table: table.to_string(),
            axis: axis.to_string(),
            key,
        }
    }

    /// True when the error means "value outside the table" rather than a
    /// broken table or a bad argument.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::key_not_found("normal", "z", 10.0);
        assert_eq!(
            err.to_string(),
            "z = 10 is outside the tabulated range of the normal table"
        );
        assert!(err.is_out_of_range());

        let err = TableError::load("tables/normal_table.csv", "row 3 has 4 cells, expected 11");
        assert!(err.to_string().contains("tables/normal_table.csv"));
        assert!(!err.is_out_of_range());
    }
}

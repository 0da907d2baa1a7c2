//! Error types for p-value lookups.

use geostat_tables::TableError;
use thiserror::Error;

/// Result type for p-value operations.
pub type Result<T> = std::result::Result<T, PValueError>;

/// Errors raised while turning a statistic into a p-value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PValueError {
    /// The underlying table could not be loaded or did not cover the value.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The query itself is unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The table returned an area the p-value formula cannot use.
    #[error(
        "looked-up area {area} is outside [0, 0.5); \
         the table is malformed or the statistic is out of range"
    )]
    AreaOutOfRange {
        /// The offending area.
        area: f64,
    },
}

impl PValueError {
    /// True when the statistic or df fell outside the tabulated range.
    pub fn is_out_of_range(&self) -> bool {
        match self {
            PValueError::Table(err) => err.is_out_of_range(),
            PValueError::AreaOutOfRange { .. } => true,
            PValueError::InvalidArgument(_) => false,
        }
    }
}

//! Table-driven p-values for classical hypothesis tests
//!
//! A hypothesis test computes its own statistic and hands it to the
//! [`PValueEngine`] together with the sample size and rejection region. The
//! engine picks the normal table for large samples and the Student's t table
//! for small ones, looks up the area between the mean and the statistic, and
//! turns that into a p-value. Chi-square statistics take their own path.
//!
//! ```ignore
//! use geostat_pvalue::{PValueEngine, PValueQuery, Rejection};
//!
//! let engine = PValueEngine::embedded();
//! let result = engine.evaluate(&PValueQuery::new(1.45, 85, Rejection::Positive))?;
//! assert_eq!(result.pvalue, 0.0735);
//! ```

#![warn(missing_docs)]

pub mod critical;
pub mod engine;
pub mod error;
pub mod query;
pub mod rejection;

pub use critical::Decision;
pub use engine::{EngineConfig, PValueEngine, DEFAULT_MIN_N};
pub use error::{PValueError, Result};
pub use query::{PValueQuery, PValueResult, TableFamily};
pub use rejection::Rejection;

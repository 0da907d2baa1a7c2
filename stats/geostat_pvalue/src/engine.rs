//! The p-value engine.
//!
//! Every hypothesis test ends here with `(test_stat, n, rejection)`. For the
//! normal and t tables the engine reads the area between the mean and `|test_stat|`
//! and returns `pvalue = (0.5 - area) * rejection`: the one-tailed mass beyond
//! the statistic, doubled for two-tailed tests and sign-flipped for tests
//! rejecting on the negative side. Chi-square statistics return the upper-tail
//! probability directly.
//!
//! Nothing is interpolated. A statistic outside the table is an error, not an
//! approximation, and so is an area of 0.5 or more, which would leave no tail.

use std::sync::Arc;

use geostat_tables::{round_to, TableCatalog, Tails};
use log::debug;

use crate::error::{PValueError, Result};
use crate::query::{PValueQuery, PValueResult, TableFamily};
use crate::rejection::Rejection;

/// Sample size from which the normal table replaces Student's t
pub const DEFAULT_MIN_N: u32 = 30;

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Queries with `n >= min_n` use the normal table unless they override it.
    pub min_n: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_n: DEFAULT_MIN_N,
        }
    }
}

/// Looks up p-values in a [`TableCatalog`].
#[derive(Debug, Clone)]
pub struct PValueEngine {
    catalog: Arc<TableCatalog>,
    config: EngineConfig,
}

impl PValueEngine {
    /// An engine over `catalog` with default settings.
    pub fn new(catalog: Arc<TableCatalog>) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    /// An engine over `catalog` with explicit settings.
    pub fn with_config(catalog: Arc<TableCatalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// An engine over the process-wide embedded tables.
    pub fn embedded() -> Self {
        Self::new(TableCatalog::embedded())
    }

    /// The catalog tables are read from.
    pub fn catalog(&self) -> &Arc<TableCatalog> {
        &self.catalog
    }

    /// The engine settings.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// The normal/t threshold that applies to `query`.
    pub fn min_n_for(&self, query: &PValueQuery) -> u32 {
        query.min_n.unwrap_or(self.config.min_n)
    }

    /// Normal-or-t lookup from the textbook's integer rejection code.
    pub fn pvalue(&self, test_statistic: f64, n: u32, rejection: i32) -> Result<PValueResult> {
        let rejection = Rejection::try_from(rejection)?;
        self.evaluate(&PValueQuery::new(test_statistic, n, rejection))
    }

    /// Look up the area and p-value for `query`.
    pub fn evaluate(&self, query: &PValueQuery) -> Result<PValueResult> {
        let statistic = checked_statistic(query)?;

        let result = match query.family {
            TableFamily::Auto => {
                let area = self.tail_area(statistic, query)?;
                if !(0.0..0.5).contains(&area) {
                    return Err(PValueError::AreaOutOfRange { area });
                }
                PValueResult {
                    area,
                    pvalue: round_to((0.5 - area) * query.rejection.factor(), 6),
                }
            }
            TableFamily::ChiSquare => {
                if query.rejection != Rejection::Positive {
                    return Err(PValueError::InvalidArgument(format!(
                        "chi-square p-values are upper-tailed; got {} rejection",
                        query.rejection
                    )));
                }
                let df = chi_square_df(query.sample_size)?;
                let area = self
                    .catalog
                    .chi_square()?
                    .confidence_for_statistic(statistic, df)?;
                PValueResult {
                    area,
                    pvalue: round_to(1.0 - area, 6),
                }
            }
        };

        debug!(
            "p-value: stat = {}, n = {}, {} ({:?}) -> area = {}, p = {}",
            query.test_statistic,
            query.sample_size,
            query.rejection,
            query.family,
            result.area,
            result.pvalue
        );
        Ok(result)
    }

    fn tail_area(&self, statistic: f64, query: &PValueQuery) -> Result<f64> {
        let area = if query.sample_size >= self.min_n_for(query) {
            self.catalog.normal()?.probability_for_score(statistic)?
        } else {
            self.catalog
                .student_t(Tails::One)?
                .confidence_for_statistic(statistic, query.sample_size)?
        };
        Ok(area)
    }
}

pub(crate) fn checked_statistic(query: &PValueQuery) -> Result<f64> {
    if query.test_statistic.is_finite() {
        Ok(query.test_statistic.abs())
    } else {
        Err(PValueError::InvalidArgument(format!(
            "test statistic must be finite, got {}",
            query.test_statistic
        )))
    }
}

/// Degrees of freedom of a goodness-of-fit test over `categories` categories.
pub(crate) fn chi_square_df(categories: u32) -> Result<u32> {
    if categories < 2 {
        return Err(PValueError::InvalidArgument(format!(
            "a chi-square test needs at least two categories, got {categories}"
        )));
    }
    Ok(categories - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geostat_tables::TableError;
    use pretty_assertions::assert_eq;

    fn engine() -> PValueEngine {
        PValueEngine::embedded()
    }

    #[test]
    fn large_samples_use_the_normal_table() {
        let result = engine()
            .evaluate(&PValueQuery::new(1.45, 85, Rejection::Positive))
            .unwrap();
        assert_eq!(result, PValueResult { area: 0.4265, pvalue: 0.0735 });
    }

    #[test]
    fn sign_of_statistic_is_ignored() {
        let positive = engine().pvalue(1.45, 85, 1).unwrap();
        let negative = engine().pvalue(-1.45, 85, 1).unwrap();
        assert_eq!(positive, negative);
    }

    #[test]
    fn min_n_override_switches_table() {
        let query = PValueQuery::new(-1.245, 11, Rejection::Positive);
        let t = engine().evaluate(&query).unwrap();
        let z = engine().evaluate(&query.with_min_n(10)).unwrap();
        assert_eq!(z, PValueResult { area: 0.39435, pvalue: 0.10565 });
        assert_ne!(t.area, z.area);
    }

    #[test]
    fn small_samples_use_the_t_table() {
        let result = engine().pvalue(2.96, 10, 1).unwrap();
        assert_eq!(result, PValueResult { area: 0.49, pvalue: 0.01 });
    }

    #[test]
    fn rejection_scales_the_tail() {
        let one = engine().pvalue(1.45, 85, 1).unwrap();
        let two = engine().pvalue(1.45, 85, 2).unwrap();
        let neg = engine().pvalue(1.45, 85, -1).unwrap();
        assert_eq!(two.pvalue, 2.0 * one.pvalue);
        assert_eq!(neg.pvalue, -one.pvalue);
        assert_eq!(one.area, two.area);
    }

    #[test]
    fn invalid_rejection_code() {
        let err = engine().pvalue(1.45, 85, 3).unwrap_err();
        assert!(matches!(err, PValueError::InvalidArgument(_)), "{err:?}");
    }

    #[test]
    fn out_of_range_statistic_propagates_key_not_found() {
        let err = engine().pvalue(100.0, 85, 1).unwrap_err();
        assert!(
            matches!(err, PValueError::Table(TableError::KeyNotFound { .. })),
            "{err:?}"
        );
        assert!(err.is_out_of_range());
    }

    #[test]
    fn non_finite_statistic_is_invalid() {
        assert!(engine().pvalue(f64::NAN, 85, 1).is_err());
    }

    #[test]
    fn chi_square_goodness_of_fit() {
        let result = engine().evaluate(&PValueQuery::chi_square(3.96, 5)).unwrap();
        assert_eq!(result.pvalue, 0.41);
        assert_eq!(result.area, 0.59);
    }

    #[test]
    fn chi_square_needs_upper_tail_and_categories() {
        let mut query = PValueQuery::chi_square(3.96, 5);
        query.rejection = Rejection::TwoTailed;
        assert!(engine().evaluate(&query).is_err());
        assert!(engine().evaluate(&PValueQuery::chi_square(3.96, 1)).is_err());
    }

    #[test]
    fn top_of_the_normal_table_still_leaves_a_tail() {
        let result = engine().pvalue(3.95, 85, 1).unwrap();
        assert_eq!(result, PValueResult { area: 0.49996, pvalue: 0.00004 });
        assert!(engine().pvalue(4.09, 85, 2).unwrap().pvalue > 0.0);
    }

    #[test]
    fn zero_sample_size_is_outside_the_t_table() {
        let err = engine().pvalue(2.96, 0, 1).unwrap_err();
        assert!(
            matches!(err, PValueError::Table(TableError::KeyNotFound { .. })),
            "{err:?}"
        );
    }

    #[test]
    fn engine_default_threshold_is_configurable() {
        let config = EngineConfig { min_n: 10 };
        let engine = PValueEngine::with_config(TableCatalog::embedded(), config);
        let result = engine.pvalue(-1.245, 11, 1).unwrap();
        assert_eq!(result.area, 0.39435);
    }
}

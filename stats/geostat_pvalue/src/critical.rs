//! Critical values and accept/reject decisions.
//!
//! The rejection region for significance level `alpha` is `alpha / tails`. The
//! critical value comes from the same table the p-value would: the normal table
//! for `n >= min_n`, Student's t below it, chi-square for goodness-of-fit. The
//! null hypothesis is rejected when `|test_stat|` reaches the critical value.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geostat_tables::Tails;
use log::debug;

use crate::engine::{checked_statistic, chi_square_df, PValueEngine};
use crate::error::{PValueError, Result};
use crate::query::{PValueQuery, TableFamily};

/// The outcome of comparing a statistic with its critical value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decision {
    /// `|test_stat|`.
    pub test_statistic: f64,
    /// Tabulated critical value for `alpha`.
    pub critical_value: f64,
    /// Significance level.
    pub alpha: f64,
    /// Whether the null hypothesis is rejected.
    pub reject_null: bool,
}

impl PValueEngine {
    /// Critical value for `query` at significance level `alpha`.
    ///
    /// The statistic in `query` is not used; only its sample size, rejection
    /// region, threshold and table family.
    pub fn critical_value(&self, query: &PValueQuery, alpha: f64) -> Result<f64> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(PValueError::InvalidArgument(format!(
                "alpha must lie strictly between 0 and 1, got {alpha}"
            )));
        }

        let tails = query.rejection.tails();
        let critical = match query.family {
            TableFamily::Auto if query.sample_size >= self.min_n_for(query) => {
                let region = alpha / f64::from(tails.count());
                self.catalog()
                    .normal()?
                    .score_for_probability(0.5 - region, Tails::One)?
            }
            TableFamily::Auto => self
                .catalog()
                .student_t(tails)?
                .statistic_for_confidence(query.sample_size, 1.0 - alpha)?,
            TableFamily::ChiSquare => self
                .catalog()
                .chi_square()?
                .statistic_for_confidence(chi_square_df(query.sample_size)?, 1.0 - alpha)?,
        };

        debug!(
            "critical value: n = {}, alpha = {alpha}, {} ({:?}) -> {critical}",
            query.sample_size, query.rejection, query.family
        );
        Ok(critical)
    }

    /// Decide whether `query`'s statistic falls in the rejection region.
    pub fn decide(&self, query: &PValueQuery, alpha: f64) -> Result<Decision> {
        let test_statistic = checked_statistic(query)?;
        let critical_value = self.critical_value(query, alpha)?;
        Ok(Decision {
            test_statistic,
            critical_value,
            alpha,
            reject_null: test_statistic >= critical_value,
        })
    }
}

//! Rejection regions of the null hypothesis.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PValueError;

/// Where the null hypothesis is rejected.
///
/// The integer codes are the textbook's: `2` two-tailed (alpha split between
/// both tails), `1` one-tailed on the positive side, `-1` one-tailed on the
/// negative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i32", into = "i32"))]
pub enum Rejection {
    /// One-tailed, alpha on the negative side (`-1`).
    Negative,
    /// One-tailed, alpha on the positive side (`1`).
    Positive,
    /// Two-tailed, alpha / 2 on each side (`2`).
    TwoTailed,
}

impl Rejection {
    /// The textbook integer code.
    pub fn code(self) -> i32 {
        match self {
            Rejection::Negative => -1,
            Rejection::Positive => 1,
            Rejection::TwoTailed => 2,
        }
    }

    /// Multiplier applied to the one-tailed tail area.
    pub fn factor(self) -> f64 {
        f64::from(self.code())
    }

    /// Number of tails alpha is split across.
    pub fn tails(self) -> geostat_tables::Tails {
        match self {
            Rejection::TwoTailed => geostat_tables::Tails::Two,
            Rejection::Negative | Rejection::Positive => geostat_tables::Tails::One,
        }
    }
}

impl TryFrom<i32> for Rejection {
    type Error = PValueError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Rejection::Negative),
            1 => Ok(Rejection::Positive),
            2 => Ok(Rejection::TwoTailed),
            other => Err(PValueError::InvalidArgument(format!(
                "rejection must be -1, 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<Rejection> for i32 {
    fn from(rejection: Rejection) -> Self {
        rejection.code()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Negative => write!(f, "one-tailed (negative)"),
            Rejection::Positive => write!(f, "one-tailed (positive)"),
            Rejection::TwoTailed => write!(f, "two-tailed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geostat_tables::Tails;

    #[test]
    fn codes_round_trip() {
        for rejection in [Rejection::Negative, Rejection::Positive, Rejection::TwoTailed] {
            assert_eq!(Rejection::try_from(rejection.code()).unwrap(), rejection);
        }
    }

    #[test]
    fn other_codes_are_invalid() {
        for code in [0, 3, -2] {
            assert!(matches!(
                Rejection::try_from(code),
                Err(PValueError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn tails_follow_region() {
        assert_eq!(Rejection::TwoTailed.tails(), Tails::Two);
        assert_eq!(Rejection::Negative.tails(), Tails::One);
        assert_eq!(Rejection::Positive.factor(), 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Rejection::TwoTailed).unwrap(), "2");
        let parsed: Rejection = serde_json::from_str("-1").unwrap();
        assert_eq!(parsed, Rejection::Negative);
        assert!(serde_json::from_str::<Rejection>("5").is_err());
    }
}

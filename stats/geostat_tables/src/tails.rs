//! One- or two-tailed table conventions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// How many tails of the distribution a probability refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tails {
    /// Probability in a single tail.
    #[default]
    One,
    /// Probability split across both tails.
    Two,
}

impl Tails {
    /// 1 or 2.
    pub fn count(self) -> u32 {
        match self {
            Tails::One => 1,
            Tails::Two => 2,
        }
    }

    pub(crate) fn divisor(self) -> f64 {
        f64::from(self.count())
    }
}

impl TryFrom<u32> for Tails {
    type Error = TableError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tails::One),
            2 => Ok(Tails::Two),
            other => Err(TableError::InvalidArgument(format!(
                "tails must be 1 or 2, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Tails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tails::One => write!(f, "one-tailed"),
            Tails::Two => write!(f, "two-tailed"),
        }
    }
}

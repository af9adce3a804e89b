use std::{
    fmt::{Debug, Display},
    num::NonZero,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Price, rolling::RollingMean};

/// Moving-average strategy used for the basis line.
///
/// Implementations map a source series to an aligned series of the same
/// length, with `None` for positions that lack enough history. The
/// deviation, band and offset stages only ever see this output, so new
/// averages plug in here without touching them.
pub trait MovingAverage: Send + Sync + Debug {
    /// Computes the average of `values` over windows of `length`.
    fn average(&self, values: &[Price], length: NonZero<usize>) -> Vec<Option<Price>>;
}

/// Simple Moving Average (SMA).
///
/// Unweighted mean of the last *n* values, where *n* is the window length.
/// Position `i` is `None` while `i < n - 1`.
///
/// Uses a compensated running sum, so a full series costs O(len) whatever
/// the window. A window of one repeated value averages to exactly that value.
///
/// # Example
///
/// ```rust
/// use bandline::{MovingAverage, Sma};
/// use std::num::NonZero;
///
/// let sma = Sma.average(&[10.0, 20.0, 30.0, 40.0], NonZero::new(3).unwrap());
///
/// assert_eq!(sma, vec![None, None, Some(20.0), Some(30.0)]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sma;

impl MovingAverage for Sma {
    fn average(&self, values: &[Price], length: NonZero<usize>) -> Vec<Option<Price>> {
        RollingMean::new(values, length.get()).collect()
    }
}

/// Kind of moving average used for the basis line.
///
/// Only the simple moving average exists today. Unknown kinds are rejected
/// on parse and on deserialization; they are never mapped to SMA.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub enum AverageKind {
    /// Simple moving average.
    #[default]
    #[serde(rename = "SMA")]
    Sma,
}

impl AverageKind {
    /// Schema name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sma => "SMA",
        }
    }

    /// Strategy implementing this kind.
    #[must_use]
    pub fn strategy(self) -> &'static dyn MovingAverage {
        match self {
            Self::Sma => &Sma,
        }
    }
}

impl Display for AverageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AverageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("sma") {
            Ok(Self::Sma)
        } else {
            Err(Error::invalid_parameter(
                "maType",
                format!("unsupported moving average {s:?}, expected SMA"),
            ))
        }
    }
}

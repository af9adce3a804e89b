use crate::{Error, Ohlcv, Price};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Price field read from each [`Ohlcv`] sample before computing bands.
///
/// Serialized in lowercase (`"close"`, `"open"`, `"high"`, `"low"`), matching
/// the settings schema.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
}

impl PriceSource {
    /// All sources, in the order the settings form lists them.
    pub const ALL: [Self; 4] = [Self::Close, Self::Open, Self::High, Self::Low];

    /// Schema name of the source.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }

    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Close => ohlcv.close(),
        }
    }

    /// Reads this source from every sample of `series`.
    pub(crate) fn extract_all<T: Ohlcv>(self, series: &[T]) -> Vec<Price> {
        series.iter().map(|sample| self.extract(sample)).collect()
    }
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for PriceSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::invalid_parameter(
                    "source",
                    format!("unknown price source {s:?}, expected one of close, open, high, low"),
                )
            })
    }
}

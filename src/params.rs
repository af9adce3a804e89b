use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use serde::{Deserialize, Serialize};

use crate::{AverageKind, Error, PriceSource, Result};

/// Standard deviation multiplier for the upper and lower bands.
///
/// Wraps a positive, finite `f64`. [`Multiplier::new`] rejects zero,
/// negative, NaN and infinite values.
///
/// Defaults to `2.0` (the standard Bollinger Bands setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct Multiplier(f64);

impl Multiplier {
    /// Creates a new multiplier.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `value` is not finite or not positive.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::invalid_parameter(
                "stdDevMultiplier",
                format!("must be finite, got {value}"),
            ));
        }
        if value <= 0.0 {
            return Err(Error::invalid_parameter(
                "stdDevMultiplier",
                format!("must be positive, got {value}"),
            ));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Multiplier {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Multiplier {}

impl Hash for Multiplier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self(2.0)
    }
}

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(20).unwrap();

/// Parameters of the band overlay.
///
/// Only constructible through [`BandParams::builder`], [`Default`] or
/// deserialization, all of which validate. A `BandParams` in hand is
/// therefore always legal input for [`compute_bands`](crate::compute_bands).
///
/// The serialized form follows the host's settings schema:
///
/// ```json
/// { "length": 20, "source": "close", "stdDevMultiplier": 2, "offset": 0, "maType": "SMA" }
/// ```
///
/// # Example
///
/// ```
/// use bandline::{BandParams, PriceSource};
///
/// let params = BandParams::builder()
///     .length(10)
///     .source(PriceSource::High)
///     .multiplier(1.5)
///     .offset(-3)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.length(), 10);
/// assert_eq!(params.to_string(), "BandParams(10, High, 1.5, -3, SMA)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawParams", into = "RawParams")]
pub struct BandParams {
    length: NonZero<usize>,
    source: PriceSource,
    multiplier: Multiplier,
    offset: isize,
    average: AverageKind,
}

impl BandParams {
    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> BandParamsBuilder {
        BandParamsBuilder::new()
    }

    /// Window length in candles.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }

    /// Price field the bands are computed on.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// Standard deviation multiplier for the upper and lower bands.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Signed shift, in candles, applied to the computed values.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Moving average used for the basis line.
    #[inline]
    #[must_use]
    pub fn average(&self) -> AverageKind {
        self.average
    }

    pub(crate) fn window(&self) -> NonZero<usize> {
        self.length
    }
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            source: PriceSource::Close,
            multiplier: Multiplier::default(),
            offset: 0,
            average: AverageKind::Sma,
        }
    }
}

/// Default parameters: length 20, close, 2σ, no offset, SMA.
///
/// Used when the host has no prior configuration.
#[must_use]
pub fn default_params() -> BandParams {
    BandParams::default()
}

impl Display for BandParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BandParams({}, {}, {}, {}, {})",
            self.length,
            self.source,
            self.multiplier.value(),
            self.offset,
            self.average
        )
    }
}

/// Builder for [`BandParams`].
///
/// Defaults match [`default_params`]. Values are checked in
/// [`build`](BandParamsBuilder::build), so raw numbers from a settings form
/// can be passed straight through.
#[derive(Clone, Debug)]
pub struct BandParamsBuilder {
    length: usize,
    source: PriceSource,
    multiplier: f64,
    offset: isize,
    average: AverageKind,
}

impl BandParamsBuilder {
    fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH.get(),
            source: PriceSource::Close,
            multiplier: Multiplier::default().value(),
            offset: 0,
            average: AverageKind::Sma,
        }
    }

    #[inline]
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[inline]
    #[must_use]
    pub fn offset(mut self, offset: isize) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    #[must_use]
    pub fn average(mut self, average: AverageKind) -> Self {
        self.average = average;
        self
    }

    /// Validates and builds the parameters.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the length is zero or the multiplier is
    /// not a positive finite number.
    pub fn build(self) -> Result<BandParams> {
        let length = NonZero::new(self.length)
            .ok_or_else(|| Error::invalid_parameter("length", "must be at least 1"))?;

        Ok(BandParams {
            length,
            source: self.source,
            multiplier: Multiplier::new(self.multiplier)?,
            offset: self.offset,
            average: self.average,
        })
    }
}

/// Wire form of [`BandParams`]. Kinds and sources stay strings so unknown
/// values surface as [`Error::InvalidParameter`] messages.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawParams {
    length: i64,
    source: String,
    std_dev_multiplier: f64,
    offset: i64,
    ma_type: String,
}

impl Default for RawParams {
    fn default() -> Self {
        BandParams::default().into()
    }
}

impl TryFrom<RawParams> for BandParams {
    type Error = Error;

    fn try_from(raw: RawParams) -> Result<Self> {
        let length = usize::try_from(raw.length).map_err(|_| {
            Error::invalid_parameter("length", format!("must be at least 1, got {}", raw.length))
        })?;
        let offset = isize::try_from(raw.offset).map_err(|_| {
            Error::invalid_parameter("offset", format!("{} does not fit this platform", raw.offset))
        })?;

        BandParams::builder()
            .length(length)
            .source(raw.source.parse()?)
            .multiplier(raw.std_dev_multiplier)
            .offset(offset)
            .average(raw.ma_type.parse()?)
            .build()
    }
}

impl From<BandParams> for RawParams {
    #[allow(clippy::cast_possible_wrap)]
    fn from(params: BandParams) -> Self {
        Self {
            length: params.length() as i64,
            source: params.source.as_str().to_owned(),
            std_dev_multiplier: params.multiplier.value(),
            offset: params.offset as i64,
            ma_type: params.average.as_str().to_owned(),
        }
    }
}

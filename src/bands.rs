use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    BandParams, Ohlcv, Price, Timestamp, deviation::population_std_dev, offset::shift,
};

/// One position of the band overlay.
///
/// `timestamp` is always the timestamp of the input sample at the same
/// position. Each line is `None` where it cannot be computed: during the
/// warm-up window, or where the offset left the position without a value.
/// A computed zero stays `Some(0.0)`; non-finite inputs yield
/// `Some(NaN)`/`Some(inf)` rather than `None`.
///
/// ```text
/// upper = basis + k × σ
/// basis = SMA
/// lower = basis − k × σ
/// ```
///
/// Serializes as `{ "timestamp", "basis", "upper", "lower" }` with `null`
/// for missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSample {
    pub timestamp: Timestamp,
    pub basis: Option<Price>,
    pub upper: Option<Price>,
    pub lower: Option<Price>,
}

impl BandSample {
    /// Band width: `upper − lower`, when both bands exist.
    ///
    /// Narrow width indicates consolidation (Bollinger squeeze); wide width
    /// indicates high volatility.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        Some(self.upper? - self.lower?)
    }

    /// `true` when all three lines carry a value.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.basis.is_some() && self.upper.is_some() && self.lower.is_some()
    }
}

impl Display for BandSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn line(value: Option<Price>) -> String {
            value.map_or_else(|| "-".to_owned(), |v| v.to_string())
        }

        write!(
            f,
            "BB@{}(u: {}, m: {}, l: {})",
            self.timestamp,
            line(self.upper),
            line(self.basis),
            line(self.lower)
        )
    }
}

/// Computes the band overlay for `series`.
///
/// Returns one [`BandSample`] per input sample, in the same order. The call
/// is pure: it never mutates its inputs, keeps no state between calls and
/// returns identical output for identical input. An empty series yields an
/// empty result.
///
/// Stages, each over the whole series:
///
/// 1. read the configured [`PriceSource`](crate::PriceSource) of every sample;
/// 2. basis: the configured moving average over `length` samples;
/// 3. σ: population standard deviation around the basis, same window;
/// 4. `upper = basis + k·σ` and `lower = basis − k·σ`;
/// 5. shift basis, upper and lower by `offset` positions; timestamps stay put.
///
/// # Example
///
/// ```
/// use bandline::{BandParams, Candle, compute_bands};
///
/// let series: Vec<Candle> = [10.0, 12.0, 14.0, 16.0, 18.0]
///     .iter()
///     .zip(1..)
///     .map(|(&close, t)| Candle {
///         timestamp: t * 60_000,
///         open: close,
///         high: close,
///         low: close,
///         close,
///         volume: 0.0,
///     })
///     .collect();
///
/// let params = BandParams::builder().length(3).build().unwrap();
/// let bands = compute_bands(&series, &params);
///
/// assert_eq!(bands.len(), 5);
/// assert_eq!(bands[1].basis, None);
/// assert_eq!(bands[2].basis, Some(12.0));
/// assert!((bands[2].upper.unwrap() - 15.266).abs() < 1e-3);
/// ```
#[must_use]
pub fn compute_bands<T: Ohlcv>(series: &[T], params: &BandParams) -> Vec<BandSample> {
    debug!(len = series.len(), %params, "computing bands");

    if series.is_empty() {
        return Vec::new();
    }

    let window = params.window();
    let values = params.source().extract_all(series);
    let basis = params.average().strategy().average(&values, window);
    let std_dev = population_std_dev(&values, &basis, window);
    let (upper, lower) = derive_bands(&basis, &std_dev, params.multiplier().value());

    let offset = params.offset();
    let basis = shift(&basis, offset);
    let upper = shift(&upper, offset);
    let lower = shift(&lower, offset);

    trace!(
        determinate = basis.iter().filter(|v| v.is_some()).count(),
        offset,
        "bands computed"
    );

    series
        .iter()
        .zip(basis.into_iter().zip(upper).zip(lower))
        .map(|(sample, ((basis, upper), lower))| BandSample {
            timestamp: sample.timestamp(),
            basis,
            upper,
            lower,
        })
        .collect()
}

/// Upper and lower bands from the basis and σ. Both are `None` wherever
/// either input is.
fn derive_bands(
    basis: &[Option<Price>],
    std_dev: &[Option<Price>],
    multiplier: f64,
) -> (Vec<Option<Price>>, Vec<Option<Price>>) {
    basis
        .iter()
        .zip(std_dev)
        .map(|(basis, std_dev)| match (basis, std_dev) {
            (Some(basis), Some(std_dev)) => {
                let spread = multiplier * std_dev;
                (Some(basis + spread), Some(basis - spread))
            }
            _ => (None, None),
        })
        .unzip()
}

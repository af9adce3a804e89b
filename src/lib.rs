//! Volatility band overlay for price charts.
//!
//! [`compute_bands`] takes any series of [`Ohlcv`] samples plus
//! [`BandParams`] and returns one [`BandSample`] per input sample: a
//! basis line (moving average of the chosen [`PriceSource`]) and upper and
//! lower bands a multiple of the population standard deviation away from
//! it. Values are `None` until the window is full, and may be shifted in
//! time by a signed offset.
//!
//! ```
//! use bandline::{BandParams, Candle, compute_bands};
//!
//! let series: Vec<Candle> = [10.0, 12.0, 14.0, 16.0, 18.0]
//!     .into_iter()
//!     .zip(1..)
//!     .map(|(close, t)| Candle {
//!         timestamp: t * 60_000,
//!         open: close,
//!         high: close,
//!         low: close,
//!         close,
//!         volume: 0.0,
//!     })
//!     .collect();
//!
//! let params = BandParams::builder().length(3).build().unwrap();
//! let bands = compute_bands(&series, &params);
//!
//! assert_eq!(bands[1].basis, None);
//! assert_eq!(bands[2].basis, Some(12.0));
//! ```
//!
//! The engine is pure. Presentation ([`BandStyle`]), persisted settings
//! ([`BandSettings`]) and the chart boundary ([`BandOverlay`],
//! [`ChartSurface`]) sit around it and never feed back into the numbers.

mod average;
mod bands;
mod chart;
mod deviation;
mod error;
mod offset;
mod ohlcv;
mod params;
mod price_source;
mod rolling;
mod settings;
mod style;

pub use crate::error::{Error, Result};
pub use crate::ohlcv::{Candle, Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;

pub use crate::average::{AverageKind, MovingAverage, Sma};
pub use crate::bands::{BandSample, compute_bands};
pub use crate::offset::shift;
pub use crate::params::{BandParams, BandParamsBuilder, Multiplier, default_params};

pub use crate::chart::{
    BandOverlay, ChartSurface, OVERLAY_ID, OVERLAY_SHORT_NAME, Overlay, OverlayGuard,
    OverlayPoint, PlotSpec,
};
pub use crate::settings::{
    BandSettings, LENGTH_RANGE, LINE_WIDTH_RANGE, MULTIPLIER_RANGE, OFFSET_RANGE,
};
pub use crate::style::{BandStyle, FillStyle, LineStyle, StrokePattern};

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod thread_safety {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_send_and_sync() {
        assert_send_sync::<BandParams>();
        assert_send_sync::<BandSample>();
        assert_send_sync::<BandSettings>();
        assert_send_sync::<BandOverlay>();
        assert_send_sync::<Overlay>();
        assert_send_sync::<Error>();
        assert_send_sync::<&'static dyn MovingAverage>();
    }
}

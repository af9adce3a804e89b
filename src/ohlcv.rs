use serde::{Deserialize, Serialize};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Candle timestamp, milliseconds since the Unix epoch.
///
/// Copied verbatim into each output sample; never shifted, re-sorted or
/// deduplicated.
pub type Timestamp = i64;

/// OHLCV candle data used as input to [`compute_bands`](crate::compute_bands).
///
/// Implement this on your own kline/candle type to avoid a conversion pass
/// before computing. The engine extracts the configured
/// [`PriceSource`](crate::PriceSource) from each sample internally.
///
/// A series is expected in non-decreasing timestamp order. The engine does
/// not check this; gaps and duplicates are the caller's concern.
///
/// # Example
///
/// ```
/// use bandline::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: i64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn timestamp(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the candle.
    fn open(&self) -> Price;

    /// Highest price during the candle.
    fn high(&self) -> Price;

    /// Lowest price during the candle.
    fn low(&self) -> Price;

    /// Closing price of the candle.
    fn close(&self) -> Price;

    /// Candle timestamp in milliseconds since the Unix epoch.
    fn timestamp(&self) -> Timestamp;

    /// Traded volume. Defaults to `0.0`; band computation ignores it.
    fn volume(&self) -> f64 {
        0.0
    }
}

/// Owned candle matching the host's price-series schema:
/// `{ timestamp, open, high, low, close, volume }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl Ohlcv for Candle {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    fn volume(&self) -> f64 {
        self.volume
    }
}

impl<T: Ohlcv + ?Sized> Ohlcv for &T {
    fn open(&self) -> Price {
        (**self).open()
    }

    fn high(&self) -> Price {
        (**self).high()
    }

    fn low(&self) -> Price {
        (**self).low()
    }

    fn close(&self) -> Price {
        (**self).close()
    }

    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }

    fn volume(&self) -> f64 {
        (**self).volume()
    }
}

use crate::{Ohlcv, Price, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: i64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            timestamp: 0,
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Convenience: bar with just a close price and timestamp (OHLC all equal to close).
pub fn bar(close: f64, time: i64) -> Bar {
    Bar::new(close, close, close, close).at(time)
}

/// Close-only bars stamped `1000, 2000, ...`.
pub fn closes(values: &[f64]) -> Vec<Bar> {
    (1_i64..)
        .zip(values)
        .map(|(i, &close)| bar(close, i * 1000))
        .collect()
}

/// Unwraps a determinate value and compares it within `1e-3`.
pub fn assert_some_near(actual: Option<f64>, expected: f64) {
    let v = actual.unwrap_or_else(|| panic!("expected Some({expected}), got None"));
    assert!(
        (v - expected).abs() < 1e-3,
        "expected {expected}, got {v}"
    );
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

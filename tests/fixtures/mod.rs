#![allow(dead_code)]

use bandline::{BandSample, Candle, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// Reference band row. Empty cells are positions with no value.
#[derive(Debug, Deserialize)]
pub struct RefBands {
    pub timestamp: Timestamp,
    pub basis: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

const CANDLES_PATH: &str = "tests/fixtures/data/candles.csv";

/// Load the hourly reference candles.
pub fn load_candles() -> Vec<Candle> {
    load_records(CANDLES_PATH, "invalid candle record")
}

/// Load reference bands (basis, upper, lower).
pub fn load_bands_ref(path: &str) -> Vec<RefBands> {
    load_records(path, "invalid band reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert an optional value matches the reference, `None` included.
pub fn assert_option_near(
    actual: Option<f64>,
    expected: Option<f64>,
    tolerance: f64,
    context: &str,
) {
    match (actual, expected) {
        (None, None) => {}
        (Some(a), Some(e)) => assert_near(a, e, tolerance, context),
        (a, e) => panic!("{context}: presence mismatch, expected {e:?}, got {a:?}"),
    }
}

/// Assert a computed series matches reference rows position by position.
pub fn assert_bands_match(actual: &[BandSample], reference: &[RefBands], tolerance: f64) {
    assert_eq!(
        actual.len(),
        reference.len(),
        "output length differs from reference"
    );

    for (i, (sample, expected)) in actual.iter().zip(reference).enumerate() {
        assert_eq!(
            sample.timestamp, expected.timestamp,
            "timestamp mismatch at bar {i}"
        );
        let ctx = format!("bar {i} (t={})", sample.timestamp);

        for (band, a, e) in [
            ("basis", sample.basis, expected.basis),
            ("upper", sample.upper, expected.upper),
            ("lower", sample.lower, expected.lower),
        ] {
            assert_option_near(a, e, tolerance, &format!("{ctx} {band}"));
        }
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}

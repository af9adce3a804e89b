//! Property-based tests for the band engine.
//!
//! Random price series and parameters check the invariants that hold for
//! every valid input: alignment, warm-up, ordering of the lines, purity and
//! offset behavior.

use proptest::prelude::*;

use bandline::{BandParams, Candle, Multiplier, PriceSource, compute_bands, shift};

// ==================== Test Data Generators ====================

/// Random close-only candles stamped one minute apart.
fn arb_candles(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len).prop_map(|closes| {
        (0_i64..)
            .zip(closes)
            .map(|(t, close)| Candle {
                timestamp: t * 60_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect()
    })
}

fn arb_source() -> impl Strategy<Value = PriceSource> {
    prop::sample::select(PriceSource::ALL.to_vec())
}

fn params(length: usize, multiplier: f64, offset: isize) -> BandParams {
    BandParams::builder()
        .length(length)
        .multiplier(multiplier)
        .offset(offset)
        .build()
        .unwrap()
}

// ==================== Engine Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Output is aligned with the input for any offset
    #[test]
    fn prop_alignment(
        candles in arb_candles(0, 120),
        length in 1usize..=30,
        offset in -150isize..=150,
        source in arb_source(),
    ) {
        let params = BandParams::builder()
            .length(length)
            .offset(offset)
            .source(source)
            .build()
            .unwrap();
        let bands = compute_bands(&candles, &params);

        prop_assert_eq!(bands.len(), candles.len());
        for (sample, candle) in bands.iter().zip(&candles) {
            prop_assert_eq!(sample.timestamp, candle.timestamp);
        }
    }

    /// Exactly length-1 leading positions are empty without an offset
    #[test]
    fn prop_warm_up(candles in arb_candles(30, 120), length in 1usize..=30) {
        let bands = compute_bands(&candles, &params(length, 2.0, 0));

        let missing = bands.iter().take_while(|s| s.basis.is_none()).count();
        prop_assert_eq!(missing, length - 1);
        prop_assert!(bands[length - 1..].iter().all(|s| s.is_complete()));
    }

    /// Upper never falls below the basis and lower never rises above it
    #[test]
    fn prop_line_order(
        candles in arb_candles(1, 120),
        length in 1usize..=30,
        multiplier in 0.1..10.0_f64,
    ) {
        for sample in compute_bands(&candles, &params(length, multiplier, 0)) {
            if let (Some(upper), Some(basis), Some(lower)) = (sample.upper, sample.basis, sample.lower) {
                prop_assert!(upper >= basis, "upper {} < basis {}", upper, basis);
                prop_assert!(lower <= basis, "lower {} > basis {}", lower, basis);
            }
        }
    }

    /// A constant series has bands collapsed onto the basis
    #[test]
    fn prop_constant_series(constant in 1.0..1000.0_f64, len in 1usize..80, length in 1usize..=20) {
        let candles: Vec<Candle> = (0..len)
            .map(|i| Candle {
                timestamp: i64::try_from(i).unwrap(),
                open: constant,
                high: constant,
                low: constant,
                close: constant,
                volume: 0.0,
            })
            .collect();

        for sample in compute_bands(&candles, &params(length, 2.0, 0)) {
            if sample.basis.is_some() {
                prop_assert_eq!(sample.basis, Some(constant));
                prop_assert_eq!(sample.upper, Some(constant));
                prop_assert_eq!(sample.lower, Some(constant));
            }
        }
    }

    /// A constant tail collapses the bands exactly, whatever came before it
    #[test]
    fn prop_constant_tail(
        prefix in prop::collection::vec(1.0..1000.0_f64, 0..40),
        constant in 0.01..1000.0_f64,
        length in 1usize..=20,
    ) {
        let mut closes = prefix;
        closes.extend(std::iter::repeat_n(constant, length));
        let candles: Vec<Candle> = (0_i64..)
            .zip(closes)
            .map(|(t, close)| Candle {
                timestamp: t,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();

        let bands = compute_bands(&candles, &params(length, 2.0, 0));
        let last = bands.last().unwrap();

        prop_assert_eq!(last.basis, Some(constant));
        prop_assert_eq!(last.upper, last.lower);
        prop_assert_eq!(last.width(), Some(0.0));
    }

    /// Identical inputs give bitwise identical outputs
    #[test]
    fn prop_purity(candles in arb_candles(0, 120), length in 1usize..=30, offset in -40isize..=40) {
        let params = params(length, 2.0, offset);
        let first = compute_bands(&candles, &params);
        let second = compute_bands(&candles, &params);

        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.basis.map(f64::to_bits), b.basis.map(f64::to_bits));
            prop_assert_eq!(a.upper.map(f64::to_bits), b.upper.map(f64::to_bits));
            prop_assert_eq!(a.lower.map(f64::to_bits), b.lower.map(f64::to_bits));
        }
    }

    /// Offset bands equal the unshifted bands moved by the offset
    #[test]
    fn prop_offset_moves_values(
        candles in arb_candles(1, 120),
        length in 1usize..=20,
        offset in -40isize..=40,
    ) {
        let plain = compute_bands(&candles, &params(length, 2.0, 0));
        let shifted = compute_bands(&candles, &params(length, 2.0, offset));

        let basis: Vec<_> = plain.iter().map(|s| s.basis).collect();
        let expected = shift(&basis, offset);
        let actual: Vec<_> = shifted.iter().map(|s| s.basis).collect();
        prop_assert_eq!(actual, expected);
    }
}

// ==================== Shift Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Shifting back restores every value except the boundary positions
    #[test]
    fn prop_shift_round_trip(
        values in prop::collection::vec(prop::option::of(-1e6..1e6_f64), 0..60),
        offset in -80isize..=80,
    ) {
        let restored = shift(&shift(&values, offset), -offset);
        let k = offset.unsigned_abs();

        prop_assert_eq!(restored.len(), values.len());
        for (i, (r, v)) in restored.iter().zip(&values).enumerate() {
            let lost = if offset >= 0 { i + k >= values.len() } else { i < k };
            if lost {
                prop_assert_eq!(*r, None);
            } else {
                prop_assert_eq!(r, v);
            }
        }
    }

    /// Non-positive or non-finite multipliers are rejected
    #[test]
    fn prop_rejects_non_positive_multiplier(value in -1e6..=0.0_f64) {
        prop_assert!(Multiplier::new(value).is_err());
        prop_assert!(BandParams::builder().multiplier(value).build().is_err());
    }
}

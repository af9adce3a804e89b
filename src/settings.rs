use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{BandParams, BandStyle, Error, Result, params::RawParams};

/// Window lengths the settings form offers.
pub const LENGTH_RANGE: RangeInclusive<usize> = 1..=200;
/// Multipliers the settings form offers (step 0.1).
pub const MULTIPLIER_RANGE: RangeInclusive<f64> = 0.1..=10.0;
/// Offsets the settings form offers.
pub const OFFSET_RANGE: RangeInclusive<isize> = -100..=100;
/// Line widths the settings form offers.
pub const LINE_WIDTH_RANGE: RangeInclusive<u32> = 1..=5;

/// Everything the settings surface edits: computation inputs and style.
///
/// Read and written as a whole. Missing sections fall back to their
/// defaults; present but malformed values are rejected.
///
/// ```
/// use bandline::BandSettings;
///
/// let settings = BandSettings::from_json(r#"{ "inputs": { "length": 50 } }"#).unwrap();
///
/// assert_eq!(settings.inputs.length(), 50);
/// assert_eq!(settings.style.basis.color, "#FF6D00");
/// ```
#[derive(PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BandSettings {
    pub inputs: BandParams,
    pub style: BandStyle,
}

impl BandSettings {
    /// Parses a settings document and validates inputs and style.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] for malformed JSON or mistyped fields,
    /// [`Error::InvalidParameter`] for illegal inputs (zero length, unknown
    /// source or average kind, bad multiplier),
    /// [`Error::InvalidStyle`] for malformed style values.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSettings = serde_json::from_str(json)?;

        let settings = Self {
            inputs: BandParams::try_from(raw.inputs)?,
            style: raw.style,
        };
        settings.style.validate()?;
        Ok(settings)
    }

    /// Writes the settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the values against the ranges the settings form offers.
    ///
    /// The engine accepts values outside these ranges; this is for hosts
    /// that want to keep stored settings editable in the form.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] for the first field outside its range.
    #[allow(clippy::cast_precision_loss)]
    pub fn check_ui_bounds(&self) -> Result<()> {
        let inputs = &self.inputs;

        check(
            "length",
            inputs.length() as f64,
            *LENGTH_RANGE.start() as f64,
            *LENGTH_RANGE.end() as f64,
        )?;
        check(
            "stdDevMultiplier",
            inputs.multiplier().value(),
            *MULTIPLIER_RANGE.start(),
            *MULTIPLIER_RANGE.end(),
        )?;
        check(
            "offset",
            inputs.offset() as f64,
            *OFFSET_RANGE.start() as f64,
            *OFFSET_RANGE.end() as f64,
        )?;

        for (name, line) in [
            ("basis.lineWidth", &self.style.basis),
            ("upper.lineWidth", &self.style.upper),
            ("lower.lineWidth", &self.style.lower),
        ] {
            check(
                name,
                f64::from(line.line_width),
                f64::from(*LINE_WIDTH_RANGE.start()),
                f64::from(*LINE_WIDTH_RANGE.end()),
            )?;
        }

        check("fill.opacity", self.style.fill.opacity, 0.0, 1.0)
    }
}

/// Settings document with inputs not yet validated, so parameter errors
/// reach the caller as [`Error::InvalidParameter`].
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    inputs: RawParams,
    style: BandStyle,
}

fn check(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfBounds {
            name,
            value,
            min,
            max,
        })
    }
}

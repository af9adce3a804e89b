use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Stroke pattern of a line.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokePattern {
    #[default]
    Solid,
    Dashed,
}

/// How one of the three lines is drawn.
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub visible: bool,
    /// `#RRGGBB` hex color.
    pub color: String,
    /// Stroke width in pixels.
    pub line_width: u32,
    #[serde(rename = "lineStyle")]
    pub pattern: StrokePattern,
}

impl LineStyle {
    /// Visible solid line of width 1.
    #[must_use]
    pub fn solid(color: &str) -> Self {
        Self {
            visible: true,
            color: color.to_owned(),
            line_width: 1,
            pattern: StrokePattern::Solid,
        }
    }

    fn validate(&self, color_field: &'static str, width_field: &'static str) -> Result<()> {
        if !is_hex_color(&self.color) {
            return Err(Error::invalid_style(
                color_field,
                format!("expected #RRGGBB, got {:?}", self.color),
            ));
        }
        if self.line_width == 0 {
            return Err(Error::invalid_style(width_field, "must be at least 1"));
        }
        Ok(())
    }
}

/// Shading of the area between the upper and lower bands.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FillStyle {
    pub visible: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: 0.1,
        }
    }
}

/// Presentation of the overlay: one [`LineStyle`] per line plus the fill.
///
/// Pure display metadata for the charting surface. Band computation never
/// reads it, so restyling never triggers a recompute.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BandStyle {
    pub basis: LineStyle,
    pub upper: LineStyle,
    pub lower: LineStyle,
    pub fill: FillStyle,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            basis: LineStyle::solid("#FF6D00"),
            upper: LineStyle::solid("#2196F3"),
            lower: LineStyle::solid("#2196F3"),
            fill: FillStyle::default(),
        }
    }
}

impl BandStyle {
    /// Checks colors, widths and fill opacity.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStyle`] naming the first malformed field.
    pub fn validate(&self) -> Result<()> {
        self.basis.validate("basis.color", "basis.lineWidth")?;
        self.upper.validate("upper.color", "upper.lineWidth")?;
        self.lower.validate("lower.color", "lower.lineWidth")?;

        if !(0.0..=1.0).contains(&self.fill.opacity) {
            return Err(Error::invalid_style(
                "fill.opacity",
                format!("must be within [0, 1], got {}", self.fill.opacity),
            ));
        }
        Ok(())
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

//! Boundary to the charting surface.
//!
//! The surface (a third-party chart widget) owns drawing, axes and crosshair
//! readout. This module only shapes computed bands into a named overlay
//! series, ties the overlay's lifetime to a scope, and recomputes bands
//! when the host reports a change.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    BandParams, BandSample, BandSettings, BandStyle, Candle, FillStyle, LineStyle, Price, Result,
    StrokePattern, Timestamp, compute_bands,
};

/// Identifier of the band overlay on the chart.
pub const OVERLAY_ID: &str = "bollinger_bands";

/// Short label shown in the chart legend.
pub const OVERLAY_SHORT_NAME: &str = "BB";

/// Drawing surface that can show candles and overlay series.
pub trait ChartSurface {
    /// Replaces the candles on the chart.
    fn apply_candles(&mut self, candles: &[Candle]);

    /// Draws an overlay. An overlay with the same id is replaced.
    fn create_overlay(&mut self, overlay: &Overlay);

    /// Removes the overlay with `id`, if present.
    fn remove_overlay(&mut self, id: &str);
}

/// One line of the overlay as the surface should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub color: String,
    pub line_width: u32,
    pub pattern: StrokePattern,
    pub visible: bool,
}

impl PlotSpec {
    fn new(key: &'static str, title: &'static str, line: &LineStyle) -> Self {
        Self {
            key,
            title,
            color: line.color.clone(),
            line_width: line.line_width,
            pattern: line.pattern,
            visible: line.visible,
        }
    }
}

/// One overlay point. Hidden lines and missing values are both absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<Price>,
}

/// Named overlay series handed to a [`ChartSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: &'static str,
    pub short_name: &'static str,
    pub plots: Vec<PlotSpec>,
    pub fill: FillStyle,
    pub points: Vec<OverlayPoint>,
}

impl Overlay {
    /// Builds the overlay for `bands` drawn with `style`.
    ///
    /// Every band sample yields a point at its timestamp, so the overlay
    /// stays aligned with the candles. Values of hidden lines are left out,
    /// as are non-finite ones the surface could not plot.
    #[must_use]
    pub fn from_bands(bands: &[BandSample], style: &BandStyle) -> Self {
        let keep = |line: &LineStyle, value: Option<Price>| {
            value.filter(|v| line.visible && v.is_finite())
        };

        let points = bands
            .iter()
            .map(|sample| OverlayPoint {
                timestamp: sample.timestamp,
                upper: keep(&style.upper, sample.upper),
                basis: keep(&style.basis, sample.basis),
                lower: keep(&style.lower, sample.lower),
            })
            .collect();

        Self {
            id: OVERLAY_ID,
            short_name: OVERLAY_SHORT_NAME,
            plots: vec![
                PlotSpec::new("upper", "Upper", &style.upper),
                PlotSpec::new("basis", "Basis", &style.basis),
                PlotSpec::new("lower", "Lower", &style.lower),
            ],
            fill: style.fill,
            points,
        }
    }
}

/// Keeps an overlay on a surface for as long as the guard lives.
///
/// Creating the guard draws the overlay; dropping it removes the overlay,
/// including on early return or unwinding.
pub struct OverlayGuard<'s, S: ChartSurface + ?Sized> {
    surface: &'s mut S,
    id: &'static str,
}

impl<'s, S: ChartSurface + ?Sized> OverlayGuard<'s, S> {
    /// Draws `overlay` on `surface`.
    pub fn new(surface: &'s mut S, overlay: &Overlay) -> Self {
        surface.create_overlay(overlay);
        Self {
            surface,
            id: overlay.id,
        }
    }

    /// Replaces the drawn overlay with `overlay`, keeping the guard.
    pub fn redraw(&mut self, overlay: &Overlay) {
        self.surface.remove_overlay(self.id);
        self.surface.create_overlay(overlay);
        self.id = overlay.id;
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }
}

impl<S: ChartSurface + ?Sized> Drop for OverlayGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.remove_overlay(self.id);
    }
}

/// Host-side controller for the band overlay.
///
/// Holds the candles, the settings and the bands computed from them. Every
/// change goes through an explicit method that recomputes on the spot when
/// the computation inputs change; style and visibility changes never
/// recompute. Nothing is computed lazily.
#[derive(Debug, Clone)]
pub struct BandOverlay {
    candles: Vec<Candle>,
    settings: BandSettings,
    bands: Vec<BandSample>,
    visible: bool,
}

impl Default for BandOverlay {
    fn default() -> Self {
        Self::new(BandSettings::default())
    }
}

impl BandOverlay {
    /// Visible overlay with `settings` and no candles yet.
    #[must_use]
    pub fn new(settings: BandSettings) -> Self {
        Self {
            candles: Vec::new(),
            settings,
            bands: Vec::new(),
            visible: true,
        }
    }

    /// Replaces the candles and recomputes.
    pub fn set_series(&mut self, candles: Vec<Candle>) {
        self.candles = candles;
        self.recompute();
    }

    /// Replaces the computation inputs and recomputes when they differ.
    pub fn set_inputs(&mut self, inputs: BandParams) {
        if self.settings.inputs == inputs {
            return;
        }
        self.settings.inputs = inputs;
        self.recompute();
    }

    /// Replaces the style after validating it. Bands are not recomputed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStyle`](crate::Error::InvalidStyle) if the style is
    /// malformed; the previous style stays in place.
    pub fn set_style(&mut self, style: BandStyle) -> Result<()> {
        if let Err(err) = style.validate() {
            warn!(%err, "rejected overlay style");
            return Err(err);
        }
        self.settings.style = style;
        Ok(())
    }

    /// Replaces inputs and style together, as the settings surface hands
    /// them back.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStyle`](crate::Error::InvalidStyle) if the style is
    /// malformed; nothing changes in that case.
    pub fn apply_settings(&mut self, settings: BandSettings) -> Result<()> {
        self.set_style(settings.style)?;
        self.set_inputs(settings.inputs);
        Ok(())
    }

    /// Parses a settings document from the settings surface and applies it.
    ///
    /// # Errors
    ///
    /// Any error of [`BandSettings::from_json`]; nothing changes in that case.
    pub fn apply_settings_json(&mut self, json: &str) -> Result<()> {
        match BandSettings::from_json(json) {
            Ok(settings) => self.apply_settings(settings),
            Err(err) => {
                warn!(%err, "rejected overlay settings");
                Err(err)
            }
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn settings(&self) -> &BandSettings {
        &self.settings
    }

    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Bands computed from the current candles and inputs.
    #[must_use]
    pub fn bands(&self) -> &[BandSample] {
        &self.bands
    }

    /// Overlay to draw, or `None` when hidden or there is nothing to draw.
    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        (self.visible && !self.bands.is_empty())
            .then(|| Overlay::from_bands(&self.bands, &self.settings.style))
    }

    /// Pushes candles and the current overlay to `surface`, replacing any
    /// overlay drawn before.
    pub fn render<S: ChartSurface + ?Sized>(&self, surface: &mut S) {
        surface.apply_candles(&self.candles);
        surface.remove_overlay(OVERLAY_ID);

        if let Some(overlay) = self.overlay() {
            surface.create_overlay(&overlay);
        }
    }

    /// Draws the overlay for the lifetime of the returned guard.
    pub fn mount<'s, S: ChartSurface + ?Sized>(
        &self,
        surface: &'s mut S,
    ) -> Option<OverlayGuard<'s, S>> {
        self.overlay()
            .map(|overlay| OverlayGuard::new(surface, &overlay))
    }

    fn recompute(&mut self) {
        self.bands = compute_bands(&self.candles, &self.settings.inputs);
        debug!(
            candles = self.candles.len(),
            inputs = %self.settings.inputs,
            "recomputed band overlay"
        );
    }
}

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the double-tap-and-hold zoom gesture.
///
/// The defaults match common web-map behavior; none of them is a correctness
/// requirement, so embedders are free to retune for feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldZoomConfig {
    /// Maximum gap between two taps for the second one to start a hold
    pub double_tap_window: Duration,
    /// Vertical travel (px) before the hold counts as a drag instead of a
    /// plain double-tap
    pub drag_activation_threshold: f64,
    /// Zoom levels per pixel of upward finger travel
    pub zoom_per_pixel: f64,
    /// Exponential smoothing factor in (0, 1]; higher is snappier
    pub ease_alpha: f64,
    /// Convergence band for the eased zoom, in zoom-level units
    pub settle_epsilon: f64,
    /// Zoom step applied when the hold releases without dragging
    pub tap_zoom_step: f64,
}

impl Default for HoldZoomConfig {
    fn default() -> Self {
        Self {
            double_tap_window: Duration::from_millis(300),
            drag_activation_threshold: 10.0,
            zoom_per_pixel: 0.015,
            ease_alpha: 0.3,
            settle_epsilon: 1e-3,
            tap_zoom_step: 1.0,
        }
    }
}

impl HoldZoomConfig {
    /// Rejects configurations the state machine cannot run on
    pub fn validate(&self) -> Result<()> {
        if self.double_tap_window.is_zero() {
            return Err(Error::Config("double_tap_window must be non-zero".into()));
        }
        if !(self.drag_activation_threshold >= 0.0) {
            return Err(Error::Config(
                "drag_activation_threshold must be non-negative".into(),
            ));
        }
        if !(self.zoom_per_pixel > 0.0) || !self.zoom_per_pixel.is_finite() {
            return Err(Error::Config(
                "zoom_per_pixel must be positive and finite".into(),
            ));
        }
        if !(self.ease_alpha > 0.0 && self.ease_alpha <= 1.0) {
            return Err(Error::Config("ease_alpha must be in (0, 1]".into()));
        }
        if !(self.settle_epsilon > 0.0) || !self.settle_epsilon.is_finite() {
            return Err(Error::Config(
                "settle_epsilon must be positive and finite".into(),
            ));
        }
        if !(self.tap_zoom_step > 0.0) || !self.tap_zoom_step.is_finite() {
            return Err(Error::Config(
                "tap_zoom_step must be positive and finite".into(),
            ));
        }
        Ok(())
    }
}

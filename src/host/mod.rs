//! Contract between the gesture controller and the underlying map engine.
//!
//! The controller never reaches into a map library's internals; everything it
//! needs from the host is listed here. The optional anchored-zoom primitive is
//! discovered by capability detection and decides which of the two
//! [`ZoomApplyStrategy`] variants drives the per-frame updates.

use crate::core::geo::{LatLng, Point};

/// Map engine the gesture controller temporarily takes control of.
///
/// Coordinate conventions: screen points are pixels relative to the top-left
/// of the viewport, world points are Web-Mercator-style pixels at a given
/// zoom with y growing downward. `project`/`unproject` must be exact inverses
/// of each other at every zoom level.
pub trait MapHost {
    fn zoom(&self) -> f64;
    fn min_zoom(&self) -> f64;
    fn max_zoom(&self) -> f64;

    /// Size of the visible map area in screen pixels
    fn viewport_size(&self) -> Point;

    fn screen_to_geo(&self, point: Point) -> LatLng;
    fn geo_to_screen(&self, geo: &LatLng) -> Point;

    /// Geographic to world-pixel coordinates at an arbitrary zoom
    fn project(&self, geo: &LatLng, zoom: f64) -> Point;
    fn unproject(&self, point: &Point, zoom: f64) -> LatLng;

    /// Hand drag control to the gesture layer (and back)
    fn set_dragging_enabled(&mut self, enabled: bool);

    /// Abort any in-flight pan/zoom animation of the host's own
    fn stop_animations(&mut self);

    /// Move the camera center by a screen-pixel delta
    fn pan_by(&mut self, delta: Point);

    /// Jump (or, if the host wants, glide) to a view
    fn apply_view(&mut self, center: LatLng, zoom: f64, animate: bool);

    /// Low-level anchored-zoom primitive, when the engine has one.
    ///
    /// Hosts without it keep these defaults and get the projected-pan
    /// fallback; hosts overriding one of the two must override both.
    fn supports_animated_zoom(&self) -> bool {
        false
    }

    fn animate_zoom_around(&mut self, _center: LatLng, _zoom: f64, _anchor: Point) {}
}

/// How anchored zoom updates reach the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomApplyStrategy {
    /// The host's own anchored-zoom primitive gets the computed view
    NativeAnimated,
    /// Zoom without animation, then pan out the anchor's residual drift
    ProjectedPan,
}

impl ZoomApplyStrategy {
    /// Capability detection: prefer the host's anchored-zoom primitive
    pub fn detect<H: MapHost + ?Sized>(host: &H) -> Self {
        if host.supports_animated_zoom() {
            ZoomApplyStrategy::NativeAnimated
        } else {
            ZoomApplyStrategy::ProjectedPan
        }
    }
}

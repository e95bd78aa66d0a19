use crate::core::geo::{LatLng, Point};
use crate::host::MapHost;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
const TILE_SIZE: f64 = 256.0;
const EARTH_RADIUS: f64 = 6378137.0;

/// Reference implementation of the [`MapHost`] contract.
///
/// A plain camera over the Web Mercator plane: center, zoom, zoom limits and
/// a pixel-sized viewport. It backs the doc examples and the test suites; a
/// real embedding would implement [`MapHost`] for its own map engine instead.
/// View changes apply immediately, so the "animated" capability can be toggled
/// to exercise either zoom-apply strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    center: LatLng,
    zoom: f64,
    size: Point,
    min_zoom: f64,
    max_zoom: f64,
    dragging_enabled: bool,
    animated_zoom: bool,
    animating: bool,
}

impl Viewport {
    /// Creates a new viewport with the default 0..=18 zoom range
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center: Self::wrap_center(center),
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
            dragging_enabled: true,
            animated_zoom: false,
            animating: false,
        }
    }

    /// Sets the zoom limits, re-clamping the current zoom
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Advertise (or hide) the low-level anchored-zoom primitive
    pub fn set_animated_zoom(&mut self, enabled: bool) {
        self.animated_zoom = enabled;
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn dragging_enabled(&self) -> bool {
        self.dragging_enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    fn wrap_center(center: LatLng) -> LatLng {
        LatLng::new(LatLng::clamp_lat(center.lat), LatLng::wrap_lng(center.lng))
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = Self::wrap_center(center);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0, Point::new(800.0, 600.0))
    }
}

impl MapHost for Viewport {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    fn viewport_size(&self) -> Point {
        self.size
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (standard EPSG:3857, 256px tiles)
    fn project(&self, geo: &LatLng, zoom: f64) -> Point {
        let scale = TILE_SIZE * 2_f64.powf(zoom);
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = geo.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + LatLng::clamp_lat(geo.lat).to_radians() / 2.0)
            .tan()
            .ln()
            * EARTH_RADIUS;

        Point::new(
            (x + PI * EARTH_RADIUS) / world * scale,
            (PI * EARTH_RADIUS - y) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    fn unproject(&self, point: &Point, zoom: f64) -> LatLng {
        let scale = TILE_SIZE * 2_f64.powf(zoom);
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = point.x / scale * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - point.y / scale * world;

        LatLng::new(
            (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
            (x / EARTH_RADIUS).to_degrees(),
        )
    }

    fn screen_to_geo(&self, point: Point) -> LatLng {
        let center_world = self.project(&self.center, self.zoom);
        let world = Point::new(
            center_world.x + point.x - self.size.x / 2.0,
            center_world.y + point.y - self.size.y / 2.0,
        );
        self.unproject(&world, self.zoom)
    }

    fn geo_to_screen(&self, geo: &LatLng) -> Point {
        let world = self.project(geo, self.zoom);
        let center_world = self.project(&self.center, self.zoom);
        Point::new(
            world.x - center_world.x + self.size.x / 2.0,
            world.y - center_world.y + self.size.y / 2.0,
        )
    }

    fn set_dragging_enabled(&mut self, enabled: bool) {
        self.dragging_enabled = enabled;
    }

    fn stop_animations(&mut self) {
        self.animating = false;
    }

    /// Moves the camera center by a screen-pixel delta
    fn pan_by(&mut self, delta: Point) {
        let center_world = self.project(&self.center, self.zoom).add(&delta);
        let center = self.unproject(&center_world, self.zoom);
        self.set_center(center);
    }

    fn apply_view(&mut self, center: LatLng, zoom: f64, animate: bool) {
        self.set_center(center);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if animate {
            self.animating = true;
        }
    }

    fn supports_animated_zoom(&self) -> bool {
        self.animated_zoom
    }

    fn animate_zoom_around(&mut self, center: LatLng, zoom: f64, _anchor: Point) {
        self.set_center(center);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(40.7128, -74.0060), 10.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_viewport_creation() {
        let viewport = viewport();
        assert_eq!(viewport.zoom(), 10.0);
        assert_eq!(viewport.center().lat, 40.7128);
        assert!(viewport.dragging_enabled());
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.apply_view(LatLng::default(), 1.0, false);
        assert_eq!(viewport.zoom(), 2.0);

        viewport.apply_view(LatLng::default(), 20.0, false);
        assert_eq!(viewport.zoom(), 15.0);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let viewport = viewport();
        let geo = LatLng::new(51.5074, -0.1278);

        let world = viewport.project(&geo, 12.0);
        let back = viewport.unproject(&world, 12.0);

        assert!((back.lat - geo.lat).abs() < 1e-9);
        assert!((back.lng - geo.lng).abs() < 1e-9);
    }

    #[test]
    fn test_screen_geo_roundtrip() {
        let viewport = viewport();

        let center_geo = viewport.screen_to_geo(Point::new(400.0, 300.0));
        assert!((center_geo.lat - 40.7128).abs() < 1e-9);
        assert!((center_geo.lng + 74.0060).abs() < 1e-9);

        let screen = Point::new(123.0, 456.0);
        let geo = viewport.screen_to_geo(screen);
        let back = viewport.geo_to_screen(&geo);
        assert!(back.distance_to(&screen) < 1e-6);
    }

    #[test]
    fn test_pan_by_shifts_content() {
        let mut viewport = viewport();
        let probe = viewport.screen_to_geo(Point::new(400.0, 300.0));

        viewport.pan_by(Point::new(50.0, 0.0));

        // The camera moved right, so the probed geo now sits 50px to the left.
        let moved = viewport.geo_to_screen(&probe);
        assert!((moved.x - 350.0).abs() < 1e-6);
        assert!((moved.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_stop_animations_clears_flag() {
        let mut viewport = viewport();
        viewport.apply_view(LatLng::default(), 5.0, true);
        assert!(viewport.is_animating());

        viewport.stop_animations();
        assert!(!viewport.is_animating());
    }
}

//! Anchor-preserving projection math.
//!
//! The whole gesture stands on one property: the geographic coordinate under
//! the finger at hold-start must stay under the finger at every zoom level
//! the trajectory passes through. [`view_for_zoom`] computes the map center
//! that makes that true; [`apply_anchored_zoom`] pushes it to the host using
//! whichever strategy capability detection picked.

use crate::core::geo::{LatLng, Point};
use crate::host::{MapHost, ZoomApplyStrategy};

/// Computes the view that keeps `anchor_geo` pinned under `anchor_point`.
///
/// Projects the anchor into world-pixel space at `target_zoom`, backs off by
/// the anchor's offset from the viewport center, and unprojects the result.
/// Re-projecting `anchor_geo` at the returned center/zoom lands back on
/// `anchor_point` exactly, up to floating-point precision.
pub fn view_for_zoom<H: MapHost + ?Sized>(
    host: &H,
    anchor_geo: &LatLng,
    anchor_point: Point,
    target_zoom: f64,
) -> (LatLng, f64) {
    let size = host.viewport_size();
    let world = host.project(anchor_geo, target_zoom);
    let offset = anchor_point.subtract(&Point::new(size.x / 2.0, size.y / 2.0));
    let center = host.unproject(&world.subtract(&offset), target_zoom);
    (center, target_zoom)
}

/// Pushes an anchored zoom to the host.
///
/// `animate` asks the host to glide rather than jump; during per-frame easing
/// it stays false because the controller owns the animation. With the
/// `ProjectedPan` strategy and `animate == false` the zoom is applied in two
/// steps (zoom in place, then pan out the anchor's residual drift), which is
/// less smooth than a native anchored zoom but reaches the same end state.
pub fn apply_anchored_zoom<H: MapHost + ?Sized>(
    host: &mut H,
    strategy: ZoomApplyStrategy,
    anchor_geo: &LatLng,
    anchor_point: Point,
    zoom: f64,
    animate: bool,
) {
    match strategy {
        ZoomApplyStrategy::NativeAnimated => {
            let (center, zoom) = view_for_zoom(host, anchor_geo, anchor_point, zoom);
            host.animate_zoom_around(center, zoom, anchor_point);
        }
        ZoomApplyStrategy::ProjectedPan if animate => {
            let (center, zoom) = view_for_zoom(host, anchor_geo, anchor_point, zoom);
            host.apply_view(center, zoom, true);
        }
        ZoomApplyStrategy::ProjectedPan => {
            let size = host.viewport_size();
            let center = host.screen_to_geo(Point::new(size.x / 2.0, size.y / 2.0));
            host.apply_view(center, zoom, false);

            let residual = host.geo_to_screen(anchor_geo).subtract(&anchor_point);
            host.pan_by(residual);
        }
    }
}

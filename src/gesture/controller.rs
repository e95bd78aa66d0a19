//! The double-tap-and-hold state machine.
//!
//! `Idle → Armed → Holding → Idle`. A first tap arms the machine; a second
//! tap inside the double-tap window starts a hold, during which vertical
//! finger travel drives the desired zoom and an animation-frame loop eases
//! the host map toward it around a fixed anchor. End and cancel always
//! return to `Idle` and hand drag control back to the host.
//!
//! Everything runs on the embedder's event loop: touch handlers and the
//! frame tick never overlap, so the controller holds no locks and owns its
//! state exclusively.

use crate::animation::trajectory::ZoomTrajectory;
use crate::core::geo::{LatLng, Point};
use crate::gesture::anchor::apply_anchored_zoom;
use crate::gesture::config::HoldZoomConfig;
use crate::host::{MapHost, ZoomApplyStrategy};
use crate::input::events::{EventHandled, TouchEvent, TouchEventType, TouchPoint};
use crate::Result;
use instant::Instant;

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    /// A first tap landed; a second one inside the double-tap window starts a
    /// hold
    Armed { last_tap: Instant },
    Holding,
}

/// Screen/geo pair captured at hold-start, fixed for the whole hold
#[derive(Debug, Clone, Copy)]
struct Anchor {
    point: Point,
    geo: LatLng,
    start_y: f64,
}

/// Single-finger double-tap-and-hold zoom controller.
///
/// Feed it the host's touch events via [`process_event`] and pump
/// [`on_frame`] from the platform's animation-frame callback whenever
/// [`frame_pending`] reports true.
///
/// [`process_event`]: HoldZoomController::process_event
/// [`on_frame`]: HoldZoomController::on_frame
/// [`frame_pending`]: HoldZoomController::frame_pending
pub struct HoldZoomController {
    config: HoldZoomConfig,
    phase: GesturePhase,
    anchor: Option<Anchor>,
    start_zoom: f64,
    trajectory: ZoomTrajectory,
    moved_beyond_threshold: bool,
    frame_pending: bool,
    strategy: ZoomApplyStrategy,
}

impl HoldZoomController {
    pub fn new(config: HoldZoomConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            trajectory: ZoomTrajectory::new(config.ease_alpha, config.settle_epsilon),
            config,
            phase: GesturePhase::Idle,
            anchor: None,
            start_zoom: 0.0,
            moved_beyond_threshold: false,
            frame_pending: false,
            strategy: ZoomApplyStrategy::ProjectedPan,
        })
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.phase, GesturePhase::Holding)
    }

    /// True while an animation-frame callback should be scheduled
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn config(&self) -> &HoldZoomConfig {
        &self.config
    }

    /// The zoom trajectory being driven, for inspection
    pub fn trajectory(&self) -> &ZoomTrajectory {
        &self.trajectory
    }

    /// Feeds one platform touch event through the state machine.
    ///
    /// A `Handled` return means the embedder must suppress the platform
    /// default for this event (`preventDefault` on the DOM).
    pub fn process_event<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &TouchEvent,
    ) -> EventHandled {
        self.process_event_at(host, event, Instant::now())
    }

    /// Timestamp-explicit variant of [`process_event`] for platforms that
    /// deliver event timestamps (and for deterministic tests).
    ///
    /// [`process_event`]: HoldZoomController::process_event
    pub fn process_event_at<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &TouchEvent,
        now: Instant,
    ) -> EventHandled {
        match event.event_type {
            TouchEventType::Start => self.on_touch_start(host, &event.touches, now),
            TouchEventType::Move => self.on_touch_move(host, &event.touches),
            TouchEventType::End => self.on_touch_end(host),
            TouchEventType::Cancel => self.on_touch_cancel(host),
        }
    }

    /// Animation-frame tick: ease the zoom one step and push it to the host.
    ///
    /// Returns true when another frame should be scheduled. A tick that
    /// observes the hold is over clears the pending flag and stops the loop.
    pub fn on_frame<H: MapHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let anchor = match (self.phase, self.anchor) {
            (GesturePhase::Holding, Some(anchor)) => anchor,
            _ => {
                self.frame_pending = false;
                return false;
            }
        };

        self.trajectory.tick();
        if self.trajectory.needs_apply() {
            let zoom = self
                .trajectory
                .eased()
                .clamp(host.min_zoom(), host.max_zoom());
            apply_anchored_zoom(host, self.strategy, &anchor.geo, anchor.point, zoom, false);
            self.trajectory.mark_applied();
        }

        // The hold is still active: keep ticking so a late drag, or a not yet
        // settled trajectory, is picked up next frame.
        self.frame_pending = true;
        true
    }

    /// Abandons any gesture in progress and restores the host.
    ///
    /// Call before detaching the controller from its event source.
    pub fn release<H: MapHost + ?Sized>(&mut self, host: &mut H) {
        if self.is_holding() {
            self.abort(host);
        } else {
            self.reset();
        }
    }

    fn on_touch_start<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        touches: &[TouchPoint],
        now: Instant,
    ) -> EventHandled {
        if touches.is_empty() {
            if self.is_holding() {
                log::warn!("touch-start with no contacts during a hold; cancelling");
                self.abort(host);
            }
            return EventHandled::NotHandled;
        }
        if touches.len() > 1 {
            // Multi-finger sequences are the host's business.
            return EventHandled::NotHandled;
        }

        let touch = touches[0];
        match self.phase {
            GesturePhase::Holding => {
                // The platform lost our end event somewhere; bail out like a
                // cancel and let this sequence start over.
                log::warn!("touch-start while a hold is active; cancelling");
                self.abort(host);
                self.phase = GesturePhase::Armed { last_tap: now };
                EventHandled::NotHandled
            }
            GesturePhase::Armed { last_tap }
                if now.duration_since(last_tap) < self.config.double_tap_window =>
            {
                self.begin_hold(host, touch);
                EventHandled::Handled
            }
            _ => {
                self.phase = GesturePhase::Armed { last_tap: now };
                EventHandled::NotHandled
            }
        }
    }

    fn on_touch_move<H: MapHost + ?Sized>(
        &mut self,
        host: &mut H,
        touches: &[TouchPoint],
    ) -> EventHandled {
        if !self.is_holding() {
            return EventHandled::NotHandled;
        }
        if touches.is_empty() {
            log::warn!("touch-move with no contacts during a hold; cancelling");
            self.abort(host);
            return EventHandled::NotHandled;
        }
        if touches.len() > 1 {
            return EventHandled::NotHandled;
        }
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => return EventHandled::NotHandled,
        };

        // Upward travel zooms in.
        let climb = anchor.start_y - touches[0].position.y;
        if climb.abs() > self.config.drag_activation_threshold {
            self.moved_beyond_threshold = true;
        }

        let desired = (self.start_zoom + climb * self.config.zoom_per_pixel)
            .clamp(host.min_zoom(), host.max_zoom());
        self.trajectory.retarget(desired);
        self.frame_pending = true;

        EventHandled::Handled
    }

    fn on_touch_end<H: MapHost + ?Sized>(&mut self, host: &mut H) -> EventHandled {
        if !self.is_holding() {
            return EventHandled::NotHandled;
        }
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => return EventHandled::NotHandled,
        };

        host.set_dragging_enabled(true);

        if self.moved_beyond_threshold {
            // Land exactly on the dragged-to zoom; easing must not lag the
            // release.
            let zoom = self
                .trajectory
                .desired()
                .clamp(host.min_zoom(), host.max_zoom());
            apply_anchored_zoom(host, self.strategy, &anchor.geo, anchor.point, zoom, false);
            self.trajectory.finish();
            log::trace!("hold-to-zoom released at zoom {zoom}");
        } else {
            // Never really dragged: treat the whole gesture as a plain
            // double-tap and step one level in around the anchor.
            let zoom = (self.start_zoom + self.config.tap_zoom_step)
                .clamp(host.min_zoom(), host.max_zoom());
            apply_anchored_zoom(host, self.strategy, &anchor.geo, anchor.point, zoom, true);
            log::trace!("double-tap zoom to {zoom}");
        }

        self.reset();
        EventHandled::Handled
    }

    fn on_touch_cancel<H: MapHost + ?Sized>(&mut self, host: &mut H) -> EventHandled {
        if !self.is_holding() {
            return EventHandled::NotHandled;
        }
        log::trace!("hold-to-zoom cancelled");
        self.abort(host);
        EventHandled::Handled
    }

    fn begin_hold<H: MapHost + ?Sized>(&mut self, host: &mut H, touch: TouchPoint) {
        let zoom = host.zoom();
        self.anchor = Some(Anchor {
            point: touch.position,
            geo: host.screen_to_geo(touch.position),
            start_y: touch.position.y,
        });
        self.start_zoom = zoom;
        self.trajectory.begin(zoom);
        self.moved_beyond_threshold = false;
        self.strategy = ZoomApplyStrategy::detect(host);

        host.stop_animations();
        host.set_dragging_enabled(false);

        self.phase = GesturePhase::Holding;
        self.frame_pending = true;
        log::debug!(
            "hold-to-zoom started at ({}, {}), zoom {zoom}, strategy {:?}",
            touch.position.x,
            touch.position.y,
            self.strategy
        );
    }

    fn abort<H: MapHost + ?Sized>(&mut self, host: &mut H) {
        host.set_dragging_enabled(true);
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.anchor = None;
        self.moved_beyond_threshold = false;
        self.frame_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;
    use std::time::Duration;

    fn controller() -> HoldZoomController {
        HoldZoomController::new(HoldZoomConfig::default()).unwrap()
    }

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(40.0, -74.0), 10.0, Point::new(800.0, 600.0))
    }

    fn start(position: Point) -> TouchEvent {
        TouchEvent::single(TouchEventType::Start, position)
    }

    fn double_tap(
        controller: &mut HoldZoomController,
        host: &mut Viewport,
        position: Point,
        t0: Instant,
    ) -> EventHandled {
        controller.process_event_at(host, &start(position), t0);
        controller.process_event_at(
            host,
            &TouchEvent::new(TouchEventType::End, vec![]),
            t0 + Duration::from_millis(50),
        );
        controller.process_event_at(host, &start(position), t0 + Duration::from_millis(100))
    }

    #[test]
    fn test_single_tap_only_arms() {
        let mut controller = controller();
        let mut host = viewport();

        let handled = controller.process_event_at(&mut host, &start(Point::new(100.0, 100.0)), Instant::now());
        assert_eq!(handled, EventHandled::NotHandled);
        assert!(matches!(controller.phase(), GesturePhase::Armed { .. }));
        assert!(!controller.frame_pending());
    }

    #[test]
    fn test_slow_second_tap_never_holds() {
        let mut controller = controller();
        let mut host = viewport();
        let t0 = Instant::now();

        controller.process_event_at(&mut host, &start(Point::new(100.0, 100.0)), t0);
        let handled = controller.process_event_at(
            &mut host,
            &start(Point::new(100.0, 100.0)),
            t0 + Duration::from_millis(300),
        );

        assert_eq!(handled, EventHandled::NotHandled);
        assert!(!controller.is_holding());
        // The slow tap re-arms, so a third quick tap still holds.
        let handled = controller.process_event_at(
            &mut host,
            &start(Point::new(100.0, 100.0)),
            t0 + Duration::from_millis(400),
        );
        assert_eq!(handled, EventHandled::Handled);
        assert!(controller.is_holding());
    }

    #[test]
    fn test_quick_second_tap_always_holds() {
        let mut controller = controller();
        let mut host = viewport();

        let handled = double_tap(&mut controller, &mut host, Point::new(300.0, 200.0), Instant::now());
        assert_eq!(handled, EventHandled::Handled);
        assert!(controller.is_holding());
        assert!(controller.frame_pending());
        assert!(!host.dragging_enabled());
    }

    #[test]
    fn test_hold_suspends_host_animation() {
        let mut controller = controller();
        let mut host = viewport();
        host.apply_view(LatLng::new(40.0, -74.0), 10.0, true);
        assert!(host.is_animating());

        double_tap(&mut controller, &mut host, Point::new(300.0, 200.0), Instant::now());
        assert!(!host.is_animating());
    }

    #[test]
    fn test_multi_finger_start_is_ignored() {
        let mut controller = controller();
        let mut host = viewport();
        let t0 = Instant::now();

        controller.process_event_at(&mut host, &start(Point::new(100.0, 100.0)), t0);
        let two = TouchEvent::new(
            TouchEventType::Start,
            vec![
                TouchPoint::new(0, Point::new(100.0, 100.0)),
                TouchPoint::new(1, Point::new(200.0, 200.0)),
            ],
        );
        let handled = controller.process_event_at(&mut host, &two, t0 + Duration::from_millis(50));

        assert_eq!(handled, EventHandled::NotHandled);
        assert!(!controller.is_holding());
    }

    #[test]
    fn test_move_without_hold_passes_through() {
        let mut controller = controller();
        let mut host = viewport();

        let handled = controller.process_event_at(
            &mut host,
            &TouchEvent::single(TouchEventType::Move, Point::new(10.0, 10.0)),
            Instant::now(),
        );
        assert_eq!(handled, EventHandled::NotHandled);
    }

    #[test]
    fn test_drag_retargets_and_clamps() {
        let mut controller = controller();
        let mut host = viewport();
        host.set_zoom_limits(0.0, 11.0);
        let t0 = Instant::now();

        double_tap(&mut controller, &mut host, Point::new(300.0, 400.0), t0);

        // A huge upward drag: desired zoom must stop at max_zoom.
        controller.process_event_at(
            &mut host,
            &TouchEvent::single(TouchEventType::Move, Point::new(300.0, -600.0)),
            t0 + Duration::from_millis(150),
        );
        assert_eq!(controller.trajectory().desired(), 11.0);

        // And a huge downward drag at min_zoom.
        controller.process_event_at(
            &mut host,
            &TouchEvent::single(TouchEventType::Move, Point::new(300.0, 3000.0)),
            t0 + Duration::from_millis(200),
        );
        assert_eq!(controller.trajectory().desired(), 0.0);
    }

    #[test]
    fn test_cancel_restores_dragging_without_zooming() {
        let mut controller = controller();
        let mut host = viewport();
        let t0 = Instant::now();

        double_tap(&mut controller, &mut host, Point::new(300.0, 200.0), t0);
        controller.process_event_at(
            &mut host,
            &TouchEvent::single(TouchEventType::Move, Point::new(300.0, 250.0)),
            t0 + Duration::from_millis(150),
        );
        let handled = controller.process_event_at(
            &mut host,
            &TouchEvent::new(TouchEventType::Cancel, vec![]),
            t0 + Duration::from_millis(200),
        );

        assert_eq!(handled, EventHandled::Handled);
        assert!(!controller.is_holding());
        assert!(!controller.frame_pending());
        assert!(host.dragging_enabled());
        assert_eq!(host.zoom(), 10.0);
    }

    #[test]
    fn test_zero_contact_move_mid_hold_cancels() {
        let mut controller = controller();
        let mut host = viewport();
        let t0 = Instant::now();

        double_tap(&mut controller, &mut host, Point::new(300.0, 200.0), t0);
        controller.process_event_at(
            &mut host,
            &TouchEvent::new(TouchEventType::Move, vec![]),
            t0 + Duration::from_millis(150),
        );

        assert!(!controller.is_holding());
        assert!(host.dragging_enabled());
        assert!(!controller.frame_pending());
    }

    #[test]
    fn test_frame_after_idle_stops_loop() {
        let mut controller = controller();
        let mut host = viewport();

        assert!(!controller.on_frame(&mut host));
        assert!(!controller.frame_pending());
    }

    #[test]
    fn test_release_mid_hold_restores_host() {
        let mut controller = controller();
        let mut host = viewport();

        double_tap(&mut controller, &mut host, Point::new(300.0, 200.0), Instant::now());
        controller.release(&mut host);

        assert!(!controller.is_holding());
        assert!(host.dragging_enabled());
        assert!(!controller.frame_pending());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = HoldZoomConfig::default();
        config.ease_alpha = 2.0;
        assert!(HoldZoomController::new(config).is_err());
    }
}

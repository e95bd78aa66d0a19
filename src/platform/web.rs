//! Browser glue: DOM touch listeners plus a `requestAnimationFrame` pump.
//!
//! [`attach`] registers non-passive `touchstart`/`touchmove`/`touchend`/
//! `touchcancel` listeners on a map container element, converts DOM touches
//! into [`TouchEvent`]s relative to the element, calls `preventDefault`
//! whenever the controller consumes an event, and keeps an animation-frame
//! loop running for as long as the controller asks for frames.
//!
//! On a platform without touch support nothing is installed at all and
//! [`attach`] returns `None`; the page keeps its native mouse handling.

use crate::core::geo::Point;
use crate::gesture::controller::HoldZoomController;
use crate::host::MapHost;
use crate::input::events::{TouchEvent, TouchEventType, TouchPoint};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element};

type FramePump = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// True when the platform reports touch support
pub fn touch_capable() -> bool {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return false,
    };
    if window.navigator().max_touch_points() > 0 {
        return true;
    }
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Keeps the DOM listeners and the frame pump alive.
///
/// Dropping the attachment removes every registered listener; drop it after
/// calling [`HoldZoomController::release`] if a gesture may be in flight.
pub struct Attachment {
    element: Element,
    listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::TouchEvent)>)>,
    _pump: FramePump,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        for (name, closure) in &self.listeners {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

/// Attaches the controller to a map container element.
///
/// Returns `None` on platforms without touch support, installing nothing.
pub fn attach<H>(
    element: &Element,
    controller: Rc<RefCell<HoldZoomController>>,
    host: Rc<RefCell<H>>,
) -> Option<Attachment>
where
    H: MapHost + 'static,
{
    if !touch_capable() {
        log::debug!("no touch support, hold-to-zoom stays inert");
        return None;
    }

    let pump: FramePump = Rc::new(RefCell::new(None));
    let scheduled = Rc::new(Cell::new(false));

    {
        let controller = controller.clone();
        let host = host.clone();
        let pump_ref = pump.clone();
        let scheduled_ref = scheduled.clone();
        *pump.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            scheduled_ref.set(false);
            let again = controller
                .borrow_mut()
                .on_frame(&mut *host.borrow_mut());
            if again {
                schedule_frame(&pump_ref, &scheduled_ref);
            }
        }) as Box<dyn FnMut()>));
    }

    let mut listeners = Vec::with_capacity(4);
    let bindings = [
        ("touchstart", TouchEventType::Start),
        ("touchmove", TouchEventType::Move),
        ("touchend", TouchEventType::End),
        ("touchcancel", TouchEventType::Cancel),
    ];

    for (name, event_type) in bindings {
        let controller = controller.clone();
        let host = host.clone();
        let element_ref = element.clone();
        let pump_ref = pump.clone();
        let scheduled_ref = scheduled.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
            let converted = convert(&event, &element_ref, event_type);
            let handled = controller
                .borrow_mut()
                .process_event(&mut *host.borrow_mut(), &converted);
            if handled.is_handled() {
                event.prevent_default();
            }
            if controller.borrow().frame_pending() {
                schedule_frame(&pump_ref, &scheduled_ref);
            }
        }) as Box<dyn FnMut(web_sys::TouchEvent)>);

        // Listeners must be non-passive or preventDefault is ignored.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        element
            .add_event_listener_with_callback_and_add_event_listener_options(
                name,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok();
        listeners.push((name, closure));
    }

    Some(Attachment {
        element: element.clone(),
        listeners,
        _pump: pump,
    })
}

fn schedule_frame(pump: &FramePump, scheduled: &Rc<Cell<bool>>) {
    if scheduled.get() {
        return;
    }
    let window = match web_sys::window() {
        Some(window) => window,
        None => return,
    };
    if let Some(closure) = pump.borrow().as_ref() {
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_ok()
        {
            scheduled.set(true);
        }
    }
}

/// DOM touches to gesture touches, relative to the container's box
fn convert(
    event: &web_sys::TouchEvent,
    element: &Element,
    event_type: TouchEventType,
) -> TouchEvent {
    let rect = element.get_bounding_client_rect();
    let list = event.touches();
    let mut touches = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        if let Some(touch) = list.item(index) {
            touches.push(TouchPoint::new(
                touch.identifier() as u64,
                Point::new(
                    touch.client_x() as f64 - rect.left(),
                    touch.client_y() as f64 - rect.top(),
                ),
            ));
        }
    }
    TouchEvent::new(event_type, touches)
}

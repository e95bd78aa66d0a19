use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Lifecycle step of a platform touch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch contact point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// One platform touch event: the lifecycle step plus the active contacts.
///
/// `touches` carries the contacts still on the surface after the event, the
/// way DOM `TouchEvent.touches` does; an `End` event for the last finger
/// therefore arrives with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub event_type: TouchEventType,
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(event_type: TouchEventType, touches: Vec<TouchPoint>) -> Self {
        Self {
            event_type,
            touches,
        }
    }

    /// Convenience constructor for a single-contact event
    pub fn single(event_type: TouchEventType, position: Point) -> Self {
        Self::new(event_type, vec![TouchPoint::new(0, position)])
    }

    /// The first contact, if any
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

/// Whether the controller consumed an event.
///
/// `Handled` tells the embedder to suppress the platform default (for the DOM,
/// call `preventDefault`); `NotHandled` lets native map handling proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        self == EventHandled::Handled
    }
}

pub mod events;

pub use events::{EventHandled, TouchEvent, TouchEventType, TouchPoint};

//! # tapzoom
//!
//! One-finger "double-tap-and-hold to zoom" for slippy maps.
//!
//! A double-tap followed by a sustained touch turns vertical finger travel
//! into a continuous zoom gesture: the controller keeps the tapped point
//! pinned under the finger while an exponentially-smoothed zoom trajectory
//! is pushed to the host map once per animation frame.
//!
//! The crate does not render anything and does not own an event loop. It
//! attaches to any map engine implementing [`host::MapHost`] and to any
//! touch-event source that can feed it [`input::events::TouchEvent`]s; a
//! browser adapter doing exactly that is available behind the `wasm` feature.

pub mod animation;
pub mod core;
pub mod gesture;
pub mod host;
pub mod input;
pub mod platform;
pub mod prelude;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::gesture::{
    anchor::view_for_zoom,
    config::HoldZoomConfig,
    controller::{GesturePhase, HoldZoomController},
};

pub use crate::host::{MapHost, ZoomApplyStrategy};

pub use crate::input::events::{EventHandled, TouchEvent, TouchEventType, TouchPoint};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid gesture configuration: {0}")]
    Config(String),
}

//! Prelude module for common tapzoom types and traits
//!
//! Re-exports the most commonly used types and functions for easy importing
//! with `use tapzoom::prelude::*;`

pub use crate::animation::trajectory::ZoomTrajectory;

pub use crate::core::{
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::gesture::{
    anchor::{apply_anchored_zoom, view_for_zoom},
    config::HoldZoomConfig,
    controller::{GesturePhase, HoldZoomController},
};

pub use crate::host::{MapHost, ZoomApplyStrategy};

pub use crate::input::events::{EventHandled, TouchEvent, TouchEventType, TouchPoint};

#[cfg(feature = "wasm")]
pub use crate::platform::web::{attach, Attachment};

pub use crate::{Error, Result};

pub use instant::Instant;
pub use std::time::Duration;

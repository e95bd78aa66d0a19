pub mod anchor;
pub mod config;
pub mod controller;

pub use anchor::{apply_anchored_zoom, view_for_zoom};
pub use config::HoldZoomConfig;
pub use controller::{GesturePhase, HoldZoomController};

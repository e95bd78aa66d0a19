//! Platform adapters wiring the controller to a real event source.
//!
//! Only the browser adapter exists today; native shells embed the controller
//! directly by forwarding their own touch events and per-frame callback.

#[cfg(feature = "wasm")]
pub mod web;

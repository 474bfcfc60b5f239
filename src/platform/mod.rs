//! Platform abstraction layer
//!
//! Browser bindings for the pieces the simulation leaves open:
//! - Time (`performance.now()`)
//! - Drawing (Canvas 2D)

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{Canvas2dPainter, PerformanceClock};

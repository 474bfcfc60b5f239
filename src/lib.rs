//! Spell Duel - two wizards bounce up and down a canvas and trade spells
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, transitions, frame loop)
//! - `input`: Pointer position tracking in canvas coordinates
//! - `render`: Read-only painting of a simulation snapshot
//! - `platform`: Browser bindings (clock, Canvas 2D painter)
//! - `tuning`: Data-driven game balance
//! - `settings`: Front-end configuration

pub mod error;
pub mod input;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{DuelError, Result};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions (pixels)
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Lower/upper bound of the speed and cast rate controls
    pub const CONTROL_MIN: u32 = 1;
    pub const CONTROL_MAX: u32 = 10;

    /// Nominal display refresh used by the headless runner (ms per frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

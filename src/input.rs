//! Pointer tracking
//!
//! Converts window-relative pointer coordinates into canvas-local ones. Only
//! the newest sample is kept.

use glam::Vec2;

/// Origin of the drawing surface in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
}

/// Latest known pointer position on the canvas
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer sample, replacing the previous one
    pub fn observe(&mut self, client_x: f32, client_y: f32, rect: SurfaceRect) {
        self.position = Some(Vec2::new(client_x - rect.left, client_y - rect.top));
    }

    /// Forget the pointer (e.g. it left the window)
    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }
}

//! Scrolling viewport
//!
//! The camera is a world-space offset: `pos` is the top-left corner of
//! the visible window. Each frame the driver recomputes it from the
//! tracked entity's position through `follow`. There is no smoothing
//! and no hysteresis; the whole state machine is the clamp.

use crate::math::{Size, Vec2};

/// Follow policy for the camera.
#[derive(Debug, Clone, Copy)]
pub struct CameraBounds {
    /// Horizontal lead: the camera sits this far left of the target,
    /// keeping look-ahead space in front of the player.
    pub lead: f32,
    /// World-space minimum for the camera corner. `(0, 0)` means the
    /// view never scrolls past the world origin.
    pub min: Vec2,
    /// Right clamp for the camera corner, if the level has a known end.
    pub max_x: Option<f32>,
    /// Whether to track the target vertically at all. Side scrollers
    /// usually keep the vertical axis fixed.
    pub track_y: bool,
    /// Bottom clamp for the camera corner when tracking vertically.
    pub max_y: Option<f32>,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self {
            lead: 100.0,
            min: Vec2::ZERO,
            max_x: None,
            track_y: false,
            max_y: None,
        }
    }
}

/// Viewport into level world space.
pub struct Camera {
    /// World-space top-left of the viewport. Externally settable; the
    /// follow policy overwrites it once per frame.
    pub pos: Vec2,
    /// Viewport size in world units.
    pub size: Size,
    bounds: CameraBounds,
}

impl Camera {
    pub fn new(size: Size, bounds: CameraBounds) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            bounds,
        }
    }

    pub fn bounds(&self) -> &CameraBounds {
        &self.bounds
    }

    /// Recompute the viewport corner from the tracked position:
    /// lead offset, then clamp to the configured world bounds.
    pub fn follow(&mut self, target: Vec2) {
        let b = &self.bounds;

        let mut x = target.x - b.lead;
        x = x.max(b.min.x);
        if let Some(max_x) = b.max_x {
            x = x.min(max_x);
        }
        self.pos.x = x;

        if b.track_y {
            let mut y = target.y - self.size.h * 0.5;
            y = y.max(b.min.y);
            if let Some(max_y) = b.max_y {
                y = y.min(max_y);
            }
            self.pos.y = y;
        }
    }

    /// World coordinate translated to surface coordinates.
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }
}

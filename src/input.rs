//! Input state management
//!
//! Polls the keyboard (macroquad) once per frame into a plain snapshot,
//! then writes the snapshot into the player's movement traits. Keeping
//! the sampled state separate from the polling makes the apply step
//! testable without a window.

use macroquad::prelude::{is_key_down, KeyCode};

use crate::game::traits::{Jump, Walk};
use crate::game::Entity;

/// Keyboard state sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Requested walk direction in -1..=1
    pub intent: f32,
    /// Jump key held this frame
    pub jump: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame before applying to entities
    pub fn poll(&mut self) {
        let mut intent = 0.0;
        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            intent -= 1.0;
        }
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            intent += 1.0;
        }
        self.intent = intent;
        self.jump = is_key_down(KeyCode::Space)
            || is_key_down(KeyCode::Up)
            || is_key_down(KeyCode::W);
    }

    /// Write the sampled state into the entity's movement traits.
    /// Entities without a walk or jump trait just ignore that part.
    pub fn apply(&self, entity: &mut Entity) {
        if let Some(walk) = entity.trait_mut::<Walk>(Walk::KIND) {
            walk.intent = self.intent;
        }
        if let Some(jump) = entity.trait_mut::<Jump>(Jump::KIND) {
            jump.requested = self.jump;
        }
    }
}

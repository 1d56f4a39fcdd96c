//! Horizontal walk control

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;

/// Intent-driven horizontal movement.
///
/// An input adapter sets `intent` in [-1, 1]; each step the trait
/// derives the horizontal velocity from it. Setting velocity rather
/// than position keeps the collision layer authoritative about where
/// the entity actually ends up.
pub struct Walk {
    /// Current steering, -1 (left) to 1 (right). Externally settable.
    pub intent: f32,
    /// Top speed in world units per second.
    pub speed: f32,
}

impl Walk {
    pub const KIND: TraitKind = TraitKind("walk");

    pub fn new(speed: f32) -> Self {
        Self { intent: 0.0, speed }
    }
}

impl EntityTrait for Walk {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, state: &mut EntityState, _ctx: &mut GameContext) -> Result<(), TraitError> {
        state.vel.x = self.intent.clamp(-1.0, 1.0) * self.speed;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

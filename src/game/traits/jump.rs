//! Jump control

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;

/// Impulse jump off solid ground.
///
/// The input adapter holds `requested` true while the jump control is
/// down; the trait launches only when the entity is grounded, so the
/// grounded flag written by the collision layer gates re-jumping.
pub struct Jump {
    /// Jump control currently held. Externally settable.
    pub requested: bool,
    /// Launch speed in world units per second (upward).
    pub speed: f32,
}

impl Jump {
    pub const KIND: TraitKind = TraitKind("jump");

    pub fn new(speed: f32) -> Self {
        Self {
            requested: false,
            speed,
        }
    }
}

impl EntityTrait for Jump {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, state: &mut EntityState, ctx: &mut GameContext) -> Result<(), TraitError> {
        if self.requested && state.grounded {
            state.vel.y = -self.speed;
            state.grounded = false;
            ctx.audio.play("jump");
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

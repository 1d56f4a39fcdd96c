//! Velocity integration

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;

/// Integrates velocity into position each step. Attached after the
/// intent and gravity traits so it integrates this step's velocity.
pub struct Velocity;

impl Velocity {
    pub const KIND: TraitKind = TraitKind("velocity");
}

impl EntityTrait for Velocity {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, state: &mut EntityState, ctx: &mut GameContext) -> Result<(), TraitError> {
        state.pos += state.vel * ctx.delta_time;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

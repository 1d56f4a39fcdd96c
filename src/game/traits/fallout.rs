//! World-bottom fallout

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;
use crate::game::event::FalloutEvent;

/// What to do when the entity crosses the world bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalloutAction {
    /// Flag the entity for removal (rank-and-file actors).
    Remove,
    /// Report a fallout event and leave the entity alone; something
    /// else (a `PlayerController`) decides what happens to it.
    Report,
}

/// Watches the entity's position against the world bottom.
pub struct Fallout {
    /// World-space y below which the entity has fallen out.
    pub bottom: f32,
    pub action: FalloutAction,
    /// Set while below the bottom, so `Report` fires once per fall,
    /// not once per step.
    reported: bool,
}

impl Fallout {
    pub const KIND: TraitKind = TraitKind("fallout");

    pub fn new(bottom: f32, action: FalloutAction) -> Self {
        Self {
            bottom,
            action,
            reported: false,
        }
    }
}

impl EntityTrait for Fallout {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, state: &mut EntityState, ctx: &mut GameContext) -> Result<(), TraitError> {
        let below = state.pos.y > self.bottom;
        if !below {
            self.reported = false;
            return Ok(());
        }

        match self.action {
            FalloutAction::Remove => state.remove = true,
            FalloutAction::Report => {
                if !self.reported {
                    ctx.events.fallout.send(FalloutEvent { entity: state.id });
                    self.reported = true;
                }
            }
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

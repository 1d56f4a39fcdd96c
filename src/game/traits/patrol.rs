//! Patrol AI

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;

/// Walks in one direction, reversing when the collision layer reports
/// a horizontal block. The `blocked_x` flag it reads was written by
/// the previous step's collision pass.
pub struct Patrol {
    /// Walk speed in world units per second.
    pub speed: f32,
    /// Current heading, -1 or 1.
    direction: f32,
}

impl Patrol {
    pub const KIND: TraitKind = TraitKind("patrol");

    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            direction: -1.0,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }
}

impl EntityTrait for Patrol {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, state: &mut EntityState, _ctx: &mut GameContext) -> Result<(), TraitError> {
        if state.blocked_x {
            self.direction = -self.direction;
        }
        state.vel.x = self.direction * self.speed;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::game::event::Events;

    #[test]
    fn test_reverses_on_block() {
        let mut state = EntityState::new("walker");
        let mut events = Events::new();
        let mut audio = NullAudio;
        let mut ctx = GameContext::new(1.0 / 60.0, &mut audio, &mut events);

        let mut patrol = Patrol::new(30.0);
        patrol.update(&mut state, &mut ctx).unwrap();
        assert_eq!(state.vel.x, -30.0);

        // Hit a wall: heading flips next update.
        state.blocked_x = true;
        patrol.update(&mut state, &mut ctx).unwrap();
        assert_eq!(state.vel.x, 30.0);
    }
}

//! Gravity

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;

/// Constant downward acceleration. Attach before `Velocity` so the
/// acceleration applied this step moves the entity this step; the
/// semi-implicit order keeps jump arcs stable across frame rates.
pub struct Gravity {
    /// Acceleration in world units per second squared.
    pub accel: f32,
}

impl Gravity {
    pub const KIND: TraitKind = TraitKind("gravity");

    pub fn new(accel: f32) -> Self {
        Self { accel }
    }
}

impl EntityTrait for Gravity {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, state: &mut EntityState, ctx: &mut GameContext) -> Result<(), TraitError> {
        state.vel.y += self.accel * ctx.delta_time;
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
    fn test_accelerates_downward() {
        let mut state = EntityState::new("test");
        let mut events = Events::new();
        let mut audio = NullAudio;
        let mut ctx = GameContext::new(0.5, &mut audio, &mut events);

        let mut g = Gravity::new(1000.0);
        g.update(&mut state, &mut ctx).unwrap();
        assert_eq!(state.vel.y, 500.0);
        // Position untouched; that's Velocity's job.
        assert_eq!(state.pos.y, 0.0);
    }

    #[test]
    fn test_idempotent_at_zero_dt() {
        let mut state = EntityState::new("test");
        state.vel.y = 42.0;
        let mut events = Events::new();
        let mut audio = NullAudio;
        let mut ctx = GameContext::new(0.0, &mut audio, &mut events);

        let mut g = Gravity::new(1000.0);
        g.update(&mut state, &mut ctx).unwrap();
        g.update(&mut state, &mut ctx).unwrap();
        assert_eq!(state.vel.y, 42.0);
    }
}

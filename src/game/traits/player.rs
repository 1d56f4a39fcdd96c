//! Player life management

use std::any::Any;

use crate::game::context::GameContext;
use crate::game::entity::{EntityId, EntityState, EntityTrait, TraitKind};
use crate::game::error::TraitError;
use crate::game::event::RespawnEvent;
use crate::math::Vec2;

/// Owns the player's checkpoint and brings the player back after a
/// fall. Attached to a controller env entity, not to the player
/// itself, so it survives whatever happens to the player.
///
/// Holds the controlled entity as a plain `EntityId` back-reference;
/// all action on the player flows through the respawn event queue,
/// which the level applies at end of step.
pub struct PlayerController {
    /// The entity this controller manages.
    player: EntityId,
    /// Respawn point. Externally settable (checkpoint triggers).
    pub checkpoint: Vec2,
    /// Seconds between fallout and respawn.
    pub respawn_delay: f32,
    /// Countdown while a respawn is pending.
    pending: Option<f32>,
}

impl PlayerController {
    pub const KIND: TraitKind = TraitKind("player-controller");

    pub fn new(player: EntityId) -> Self {
        Self {
            player,
            checkpoint: Vec2::ZERO,
            respawn_delay: 1.0,
            pending: None,
        }
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn respawn_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl EntityTrait for PlayerController {
    fn kind(&self) -> TraitKind {
        Self::KIND
    }

    fn update(&mut self, _state: &mut EntityState, ctx: &mut GameContext) -> Result<(), TraitError> {
        if self.pending.is_none() {
            let fell = ctx
                .events
                .fallout
                .iter()
                .any(|ev| ev.entity == self.player);
            if fell {
                self.pending = Some(self.respawn_delay);
            }
        }

        if let Some(remaining) = self.pending {
            let remaining = remaining - ctx.delta_time;
            if remaining <= 0.0 {
                ctx.events.respawn.send(RespawnEvent {
                    entity: self.player,
                    pos: self.checkpoint,
                });
                ctx.audio.play("respawn");
                self.pending = None;
            } else {
                self.pending = Some(remaining);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::game::event::{Events, FalloutEvent};

    fn controller() -> PlayerController {
        let mut c = PlayerController::new(EntityId::first());
        c.checkpoint = Vec2::new(64.0, 64.0);
        c.respawn_delay = 0.05; // three 60Hz steps
        c
    }

    #[test]
    fn test_respawns_after_delay() {
        let mut c = controller();
        let mut state = EntityState::new("player-env");
        let mut events = Events::new();
        let mut audio = RecordingAudio::new();

        events.fallout.send(FalloutEvent {
            entity: EntityId::first(),
        });

        let dt = 1.0 / 60.0;
        for _ in 0..2 {
            let mut ctx = GameContext::new(dt, &mut audio, &mut events);
            c.update(&mut state, &mut ctx).unwrap();
            assert!(c.respawn_pending());
        }
        assert!(events.respawn.is_empty());

        let mut ctx = GameContext::new(dt, &mut audio, &mut events);
        c.update(&mut state, &mut ctx).unwrap();

        assert!(!c.respawn_pending());
        let sent: Vec<_> = events.respawn.drain().collect();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].entity, EntityId::first());
        assert_eq!(sent[0].pos, Vec2::new(64.0, 64.0));
        assert_eq!(audio.played, vec!["respawn"]);
    }

    #[test]
    fn test_ignores_other_entities_fallout() {
        let mut c = controller();
        let mut state = EntityState::new("player-env");
        let mut events = Events::new();
        let mut audio = RecordingAudio::new();

        events.fallout.send(FalloutEvent {
            entity: EntityId::first().next(),
        });

        let mut ctx = GameContext::new(1.0 / 60.0, &mut audio, &mut events);
        c.update(&mut state, &mut ctx).unwrap();
        assert!(!c.respawn_pending());
    }
}

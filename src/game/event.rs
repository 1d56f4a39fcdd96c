//! Per-step event queues
//!
//! Traits never touch another entity directly; an entity's traits only
//! see that entity's own state. Anything cross-entity goes through an
//! event: the sender queues it during the layer pass, `Level::update`
//! applies it after the pass, and the queues are cleared before the
//! next step. This keeps ownership single-rooted and makes the
//! update order of a step independent of who reacts to what.

use crate::math::Vec2;
use super::entity::EntityId;

/// A queue for events of a single type.
/// Filled during the layer pass, drained or cleared at step end.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Queue an event.
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate without consuming. Used by traits reacting to events
    /// raised earlier in the same step.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events, clearing the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All event queues for one step.
pub struct Events {
    /// An entity crossed the bottom of the world.
    pub fallout: EventQueue<FalloutEvent>,
    /// Move an entity back to a safe position at end of step.
    pub respawn: EventQueue<RespawnEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            fallout: EventQueue::new(),
            respawn: EventQueue::new(),
        }
    }

    /// Clear every queue. `Level::update` calls this at step end so
    /// nothing leaks into the next step.
    pub fn clear_all(&mut self) {
        self.fallout.clear();
        self.respawn.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

/// An entity fell below the world bottom
#[derive(Debug, Clone, Copy)]
pub struct FalloutEvent {
    /// Who fell
    pub entity: EntityId,
}

/// Teleport an entity to a safe position, zeroing its velocity
#[derive(Debug, Clone, Copy)]
pub struct RespawnEvent {
    /// Who to move
    pub entity: EntityId,
    /// Where to put them
    pub pos: Vec2,
}

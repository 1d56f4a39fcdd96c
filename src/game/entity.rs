//! Entities and trait composition
//!
//! An entity is a generic actor: a bundle of spatial state plus an
//! ordered list of attached traits. All behavior lives in traits
//! (velocity integration, gravity, player control, AI) so actor kinds
//! are combinations, not a class hierarchy. A walker gets physics and
//! patrol AI; the player gets physics and control; a controller env
//! entity gets nothing but a `PlayerController`.
//!
//! Ordering matters and is guaranteed: traits update in attach order,
//! stable for the entity's lifetime. A physics trait attached before a
//! response trait always runs first.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::math::{Rect, Size, Vec2};
use super::context::GameContext;
use super::error::{StepError, TraitError};

/// Non-owning handle to an entity.
///
/// Ids are handed out by the stage, monotonically, and never reused
/// within a level, so a stale handle can never silently alias a newer
/// entity. Traits that control another entity (a `PlayerController`
/// controlling the player) store one of these, never the entity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Id of an entity not yet inserted into a stage.
    pub const UNSET: EntityId = EntityId(0);

    pub(crate) fn first() -> Self {
        EntityId(1)
    }

    pub(crate) fn next(self) -> Self {
        EntityId(self.0 + 1)
    }

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lookup key for a trait attached to an entity.
///
/// Each trait implementation declares one, conventionally a
/// `pub const KIND` on the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraitKind(pub &'static str);

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The spatial and lifecycle state traits operate on.
///
/// Kept separate from the trait list so a trait can mutate the entity
/// it is attached to without aliasing its own storage.
#[derive(Debug, Clone)]
pub struct EntityState {
    /// Assigned by the stage on insert; `EntityId::UNSET` before that.
    pub id: EntityId,
    /// Actor kind name, as registered in the factory ("player", "walker").
    pub kind: String,
    /// World position, top-left corner.
    pub pos: Vec2,
    /// World velocity in units per second.
    pub vel: Vec2,
    /// Bounding box size. Zero-sized entities are skipped by collision.
    pub size: Size,
    /// Request removal from the level. Honored at end of the entity
    /// pass; never removed mid-iteration.
    pub remove: bool,
    /// Standing on a solid tile. Written by the collision layer,
    /// read by traits like `Jump`.
    pub grounded: bool,
    /// Pushed back horizontally by a solid tile this step. Written by
    /// the collision layer, read by traits like `Patrol`.
    pub blocked_x: bool,
}

impl EntityState {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: EntityId::UNSET,
            kind: kind.into(),
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Size::ZERO,
            remove: false,
            grounded: false,
            blocked_x: false,
        }
    }

    /// Bounding box at the current position.
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A named, stateful behavior unit attached to an entity.
///
/// `update` runs once per fixed step and must be idempotent with
/// respect to repeated calls at dt = 0: all accumulation goes through
/// `delta_time`, never a hidden per-call counter.
pub trait EntityTrait {
    /// Lookup key for cross-trait queries.
    fn kind(&self) -> TraitKind;

    /// Called once when attached to an entity.
    fn on_attach(&mut self, _state: &mut EntityState) {}

    /// Called once when detached.
    fn on_detach(&mut self, _state: &mut EntityState) {}

    /// Advance one fixed step. Errors abort the whole step (fail-fast).
    fn update(&mut self, state: &mut EntityState, ctx: &mut GameContext) -> Result<(), TraitError>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A generic actor: state plus an ordered collection of traits.
pub struct Entity {
    state: EntityState,
    traits: Vec<Box<dyn EntityTrait>>,
    /// Kind -> slot in `traits`. On duplicate kinds the later attach
    /// wins the lookup (a specialized trait shadows a generic one);
    /// both instances still update, in attach order.
    index: HashMap<TraitKind, usize>,
}

impl Entity {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            state: EntityState::new(kind),
            traits: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.state.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.state.id = id;
    }

    pub fn state(&self) -> &EntityState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    /// Append a trait, run its attach hook, and index it by kind.
    pub fn add_trait(&mut self, mut t: Box<dyn EntityTrait>) {
        t.on_attach(&mut self.state);
        let kind = t.kind();
        self.index.insert(kind, self.traits.len());
        self.traits.push(t);
    }

    /// Detach the trait currently indexed under `kind`, running its
    /// detach hook. Returns the removed instance, or `None` if the
    /// entity has no such capability.
    pub fn remove_trait(&mut self, kind: TraitKind) -> Option<Box<dyn EntityTrait>> {
        let slot = self.index.remove(&kind)?;
        let mut t = self.traits.remove(slot);
        t.on_detach(&mut self.state);
        // Every slot after the removed one shifted down by one.
        for idx in self.index.values_mut() {
            if *idx > slot {
                *idx -= 1;
            }
        }
        // A surviving duplicate of the same kind takes over the
        // lookup slot, latest attach winning as usual.
        if let Some(idx) = self.traits.iter().rposition(|other| other.kind() == kind) {
            self.index.insert(kind, idx);
        }
        Some(t)
    }

    pub fn has_trait(&self, kind: TraitKind) -> bool {
        self.index.contains_key(&kind)
    }

    /// Typed view of the trait indexed under `kind`.
    /// Absence is not an error; the caller decides what missing means.
    pub fn trait_ref<T: Any>(&self, kind: TraitKind) -> Option<&T> {
        let slot = *self.index.get(&kind)?;
        self.traits[slot].as_any().downcast_ref::<T>()
    }

    pub fn trait_mut<T: Any>(&mut self, kind: TraitKind) -> Option<&mut T> {
        let slot = *self.index.get(&kind)?;
        self.traits[slot].as_any_mut().downcast_mut::<T>()
    }

    /// Number of attached traits.
    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    /// Run every trait in attach order. The first failure aborts and
    /// is reported with this entity's id and the failing trait's kind.
    pub fn update(&mut self, ctx: &mut GameContext) -> Result<(), StepError> {
        for t in &mut self.traits {
            t.update(&mut self.state, ctx).map_err(|e| StepError::Trait {
                entity: self.state.id,
                kind: t.kind(),
                message: e.message,
            })?;
        }
        Ok(())
    }
}

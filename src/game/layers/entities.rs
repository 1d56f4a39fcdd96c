//! Entity update pass

use crate::game::context::GameContext;
use crate::game::error::StepError;
use crate::game::layer::Layer;
use crate::game::stage::Stage;

/// Runs every live entity's trait list, in insertion order, then
/// purges entities flagged for removal so later layers in the same
/// step never see them. Entities already flagged when the pass starts
/// are skipped entirely.
pub struct EntityLayer;

impl Layer for EntityLayer {
    fn name(&self) -> &'static str {
        "entities"
    }

    fn update(&mut self, stage: &mut Stage, ctx: &mut GameContext) -> Result<(), StepError> {
        for entity in stage.entities_mut() {
            if entity.state().remove {
                continue;
            }
            entity.update(ctx)?;
        }
        stage.purge_removed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::audio::NullAudio;
    use crate::game::entity::{Entity, EntityState, EntityTrait, TraitKind};
    use crate::game::error::TraitError;
    use crate::game::event::Events;
    use crate::game::stage::TileMap;

    /// Counts updates; optionally flags its entity for removal.
    struct Counter {
        updates: std::rc::Rc<std::cell::Cell<u32>>,
        remove_self: bool,
    }

    impl EntityTrait for Counter {
        fn kind(&self) -> TraitKind {
            TraitKind("counter")
        }

        fn update(&mut self, state: &mut EntityState, _ctx: &mut GameContext) -> Result<(), TraitError> {
            self.updates.set(self.updates.get() + 1);
            if self.remove_self {
                state.remove = true;
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

    fn counting_entity(
        updates: &std::rc::Rc<std::cell::Cell<u32>>,
        remove_self: bool,
    ) -> Entity {
        let mut e = Entity::new("test");
        e.add_trait(Box::new(Counter {
            updates: updates.clone(),
            remove_self,
        }));
        e
    }

    #[test]
    fn test_flagged_entity_gone_after_pass() {
        let updates = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut stage = Stage::new(TileMap::new(4, 4, 16.0));
        let doomed = stage.insert(counting_entity(&updates, true));
        let alive = stage.insert(counting_entity(&updates, false));

        let mut layer = EntityLayer;
        let mut events = Events::new();
        let mut audio = NullAudio;
        let mut ctx = GameContext::new(1.0 / 60.0, &mut audio, &mut events);
        layer.update(&mut stage, &mut ctx).unwrap();

        // Both updated this pass (removal is deferred), but the
        // flagged one is purged before the pass ends.
        assert_eq!(updates.get(), 2);
        assert!(!stage.contains(doomed));
        assert!(stage.contains(alive));
    }

    #[test]
    fn test_preflagged_entity_is_skipped() {
        let updates = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut stage = Stage::new(TileMap::new(4, 4, 16.0));
        let id = stage.insert(counting_entity(&updates, false));
        stage.entity_mut(id).unwrap().state_mut().remove = true;

        let mut layer = EntityLayer;
        let mut events = Events::new();
        let mut audio = NullAudio;
        let mut ctx = GameContext::new(1.0 / 60.0, &mut audio, &mut events);
        layer.update(&mut stage, &mut ctx).unwrap();

        assert_eq!(updates.get(), 0);
        assert!(!stage.contains(id));
    }
}

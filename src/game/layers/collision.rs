//! Tile collision pass

use crate::game::context::GameContext;
use crate::game::error::StepError;
use crate::game::layer::Layer;
use crate::game::stage::Stage;

/// Resolves entity boxes against solid tiles after the entity pass
/// has integrated velocities.
///
/// Per overlapping tile the entity is pushed out along the axis of
/// least penetration and the velocity on that axis is cancelled.
/// Contact flags (`grounded`, `blocked_x`) are recomputed from scratch
/// every step; traits read them the following step.
pub struct CollisionLayer;

/// Bail-out for degenerate overlap loops (an entity buried in tiles).
const MAX_RESOLVE_PASSES: usize = 8;

impl Layer for CollisionLayer {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, stage: &mut Stage, _ctx: &mut GameContext) -> Result<(), StepError> {
        let (tiles, entities) = stage.tiles_and_entities();
        if tiles.tile_size() <= 0.0 {
            return Err(StepError::InvariantViolation(
                "collision layer needs a positive tile size".into(),
            ));
        }

        for entity in entities {
            let state = entity.state_mut();
            if state.size.w <= 0.0 || state.size.h <= 0.0 {
                continue; // bodiless actors (controller envs) don't collide
            }

            state.grounded = false;
            state.blocked_x = false;

            for _ in 0..MAX_RESOLVE_PASSES {
                let rect = state.rect();
                let Some(tile) = tiles
                    .solid_tiles_in(rect)
                    .into_iter()
                    .find(|t| rect.overlaps(t))
                else {
                    break;
                };

                let overlap_x =
                    rect.right().min(tile.right()) - rect.left().max(tile.left());
                let overlap_y =
                    rect.bottom().min(tile.bottom()) - rect.top().max(tile.top());

                if overlap_x < overlap_y {
                    // Horizontal push, toward the entity's side.
                    if rect.left() < tile.left() {
                        state.pos.x -= overlap_x;
                    } else {
                        state.pos.x += overlap_x;
                    }
                    state.vel.x = 0.0;
                    state.blocked_x = true;
                } else if rect.top() < tile.top() {
                    // Landed on top of the tile.
                    state.pos.y -= overlap_y;
                    if state.vel.y > 0.0 {
                        state.vel.y = 0.0;
                    }
                    state.grounded = true;
                } else {
                    // Bumped a ceiling.
                    state.pos.y += overlap_y;
                    if state.vel.y < 0.0 {
                        state.vel.y = 0.0;
                    }
                }
            }
        }
        Ok(())
    }
}

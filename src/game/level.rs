//! Level: the scene and its pipeline
//!
//! A level owns the stage and the ordered layer list and exposes the
//! two entry points the driver calls per step: `update` then `draw`.
//! Layer order is fixed at composition time and shared by both passes,
//! which is the core's one big ordering promise: a collision layer
//! registered before the dashboard has always resolved this step's
//! overlaps by the time the dashboard reads entity state.

use std::mem;

use crate::math::Vec2;
use crate::render::DrawSurface;
use super::camera::Camera;
use super::context::GameContext;
use super::error::StepError;
use super::layer::Layer;
use super::stage::Stage;

pub struct Level {
    name: String,
    stage: Stage,
    layers: Vec<Box<dyn Layer>>,
}

impl Level {
    pub fn new(name: impl Into<String>, stage: Stage) -> Self {
        Self {
            name: name.into(),
            stage,
            layers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Append a pass. Composition-time only; order never changes after.
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Advance the whole scene one fixed step: every layer's update
    /// hook in registration order, then deferred cross-entity events,
    /// then queued spawns. Fail-fast: the first layer error aborts the
    /// step with the remaining layers untouched.
    pub fn update(&mut self, ctx: &mut GameContext) -> Result<(), StepError> {
        // The layer list leaves `self` while it runs so layers can
        // borrow the stage mutably.
        let mut layers = mem::take(&mut self.layers);
        let mut result = Ok(());
        for layer in &mut layers {
            result = layer.update(&mut self.stage, ctx);
            if result.is_err() {
                break;
            }
        }
        self.layers = layers;
        if let Err(e) = result {
            // The aborted step's queued events die with it; nothing
            // from a half-run step may leak into the next one.
            ctx.events.clear_all();
            return Err(e);
        }

        self.apply_events(ctx);
        self.stage.flush_pending();
        ctx.events.clear_all();
        Ok(())
    }

    /// Render every layer in registration order. Later layers paint
    /// over earlier ones; all receive the same camera offset.
    pub fn draw(&self, surface: &mut dyn DrawSurface, camera: &Camera) {
        for layer in &self.layers {
            layer.draw(&self.stage, surface, camera);
        }
    }

    /// Apply queued cross-entity effects now that no pass is iterating.
    fn apply_events(&mut self, ctx: &mut GameContext) {
        for ev in ctx.events.respawn.drain() {
            if let Some(entity) = self.stage.entity_mut(ev.entity) {
                let state = entity.state_mut();
                state.pos = ev.pos;
                state.vel = Vec2::ZERO;
            }
        }
    }
}

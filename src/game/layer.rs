//! Scene passes
//!
//! A layer is one ordered pass over the stage, with an update hook,
//! a draw hook, or both. The level runs update hooks in registration
//! order, then draw hooks in the same order: later layers paint over
//! earlier ones, and a layer's draw always sees the state every
//! earlier layer's update produced this step. Entity simulation,
//! collision resolution and HUD rendering are all just layers.

use crate::render::DrawSurface;
use super::camera::Camera;
use super::context::GameContext;
use super::error::StepError;
use super::stage::Stage;

/// One pass in the level pipeline. Both hooks default to no-ops so a
/// draw-only or update-only layer implements just what it needs.
pub trait Layer {
    /// Name for step-abort diagnostics.
    fn name(&self) -> &'static str;

    /// Advance scene state one fixed step.
    fn update(&mut self, _stage: &mut Stage, _ctx: &mut GameContext) -> Result<(), StepError> {
        Ok(())
    }

    /// Render this pass. Receives the shared camera so every layer
    /// translates world coordinates consistently.
    fn draw(&self, _stage: &Stage, _surface: &mut dyn DrawSurface, _camera: &Camera) {}
}

//! Dashboard (HUD) pass

use crate::game::camera::Camera;
use crate::game::context::GameContext;
use crate::game::error::StepError;
use crate::game::layer::Layer;
use crate::game::stage::Stage;
use crate::render::{Color, DrawSurface};

/// Draws level name, elapsed simulation time and actor count in
/// screen space (no camera offset, the HUD doesn't scroll).
/// Registered last so it reads fully resolved entity state.
pub struct DashboardLayer {
    level_name: String,
    /// Simulated seconds accumulated from fixed steps.
    elapsed: f64,
}

impl DashboardLayer {
    pub fn new(level_name: impl Into<String>) -> Self {
        Self {
            level_name: level_name.into(),
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Layer for DashboardLayer {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn update(&mut self, _stage: &mut Stage, ctx: &mut GameContext) -> Result<(), StepError> {
        self.elapsed += ctx.delta_time as f64;
        Ok(())
    }

    fn draw(&self, stage: &Stage, surface: &mut dyn DrawSurface, _camera: &Camera) {
        let line = format!(
            "{}  TIME {:>5.1}  ACTORS {}",
            self.level_name,
            self.elapsed,
            stage.entity_count()
        );
        surface.draw_text(&line, 8.0, 16.0, 16.0, Color::HUD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::game::camera::CameraBounds;
    use crate::game::entity::Entity;
    use crate::game::event::Events;
    use crate::game::stage::TileMap;
    use crate::math::Size;
    use crate::render::{DrawCall, RecordingSurface};

    #[test]
    fn test_reports_simulated_time_and_count() {
        let mut stage = Stage::new(TileMap::new(4, 4, 16.0));
        stage.insert(Entity::new("a"));
        stage.insert(Entity::new("b"));

        let mut layer = DashboardLayer::new("1-1");
        let mut events = Events::new();
        let mut audio = NullAudio;
        let dt = 1.0 / 60.0;
        for _ in 0..60 {
            let mut ctx = GameContext::new(dt, &mut audio, &mut events);
            layer.update(&mut stage, &mut ctx).unwrap();
        }
        assert!((layer.elapsed() - 1.0).abs() < 1e-4);

        let camera = Camera::new(Size::new(320.0, 240.0), CameraBounds::default());
        let mut surface = RecordingSurface::new();
        layer.draw(&stage, &mut surface, &camera);

        match &surface.calls[0] {
            DrawCall::Text { text, .. } => {
                assert!(text.starts_with("1-1"));
                assert!(text.contains("ACTORS 2"));
            }
            other => panic!("unexpected draw call: {:?}", other),
        }
    }
}

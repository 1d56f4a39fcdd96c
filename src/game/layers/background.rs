//! Tile background pass

use crate::game::camera::Camera;
use crate::game::layer::Layer;
use crate::game::stage::Stage;
use crate::math::{Rect, Size};
use crate::render::{Color, DrawSurface};

/// Draws the sky and the solid tiles visible through the camera.
/// Draw-only; registered before the sprite-ish layers so everything
/// else paints over it.
pub struct BackgroundLayer {
    pub sky: Color,
    pub ground: Color,
}

impl Default for BackgroundLayer {
    fn default() -> Self {
        Self {
            sky: Color::SKY,
            ground: Color::GROUND,
        }
    }
}

impl Layer for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn draw(&self, stage: &Stage, surface: &mut dyn DrawSurface, camera: &Camera) {
        surface.clear(self.sky);

        // Only the camera window's worth of tiles.
        let view = Rect::new(camera.pos, camera.size);
        let ts = stage.tiles.tile_size();
        for tile in stage.tiles.solid_tiles_in(view) {
            let screen = camera.to_screen(tile.pos);
            surface.fill_rect(screen.x, screen.y, ts, ts, self.ground);
        }
    }
}

/// Draws every sized entity as a colored box. Stands in for a sprite
/// layer; the render surface has no image primitive and does not need
/// one for the runtime core.
pub struct EntitySpriteLayer;

impl EntitySpriteLayer {
    fn color_for(kind: &str) -> Color {
        match kind {
            "player" => Color::PLAYER,
            _ => Color::WALKER,
        }
    }
}

impl Layer for EntitySpriteLayer {
    fn name(&self) -> &'static str {
        "entity-sprites"
    }

    fn draw(&self, stage: &Stage, surface: &mut dyn DrawSurface, camera: &Camera) {
        for entity in stage.entities() {
            let state = entity.state();
            if state.size == Size::ZERO {
                continue;
            }
            let screen = camera.to_screen(state.pos);
            surface.fill_rect(
                screen.x,
                screen.y,
                state.size.w,
                state.size.h,
                Self::color_for(&state.kind),
            );
        }
    }
}

//! Drawing seam
//!
//! The core draws through `DrawSurface`, an abstract 2D target that
//! accepts primitive operations at surface coordinates. Layers apply
//! the camera offset themselves before calling in, so any backend that
//! can fill rectangles and draw text can render a level. The shipped
//! backend is macroquad (`ScreenSurface`).

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const SKY: Color = Color::rgb(92, 148, 252);
    pub const GROUND: Color = Color::rgb(124, 84, 48);
    pub const PLAYER: Color = Color::rgb(216, 40, 0);
    pub const WALKER: Color = Color::rgb(136, 112, 0);
    pub const HUD: Color = Color::rgb(255, 255, 255);
}

/// Abstract 2D render target.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// macroquad-backed surface drawing straight to the window.
pub struct ScreenSurface;

impl ScreenSurface {
    fn convert(color: Color) -> macroquad::color::Color {
        macroquad::color::Color::from_rgba(color.r, color.g, color.b, color.a)
    }
}

impl DrawSurface for ScreenSurface {
    fn clear(&mut self, color: Color) {
        macroquad::prelude::clear_background(Self::convert(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        macroquad::prelude::draw_rectangle(x, y, w, h, Self::convert(color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        macroquad::prelude::draw_text(text, x, y, size, Self::convert(color));
    }
}

/// Records draw calls for asserting on paint order in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Text { text: String, x: f32, y: f32 },
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.calls.push(DrawCall::Rect { x, y, w, h, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

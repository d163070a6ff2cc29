//! Draw-primitive contract
//!
//! Everything is drawn in the logical arena space (half-width 80, half-height 50,
//! origin at the centre). Pixel scaling, the bitmap font and presentation belong
//! to whatever implements [`Canvas`].

pub mod draw_list;
pub mod scene;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

/// Packed `0xRRGGBB` colour
pub type Color = u32;

/// Palette
pub mod palette {
    use super::Color;

    pub const WHITE: Color = 0xFFFFFF;
    pub const HIGHLIGHT: Color = 0xFFCC66;
    pub const DIMMED: Color = 0x666666;
    pub const VALUE: Color = 0xAAAAAA;
    pub const MENU_PLATE: Color = 0x102030;
    pub const SCORE: Color = 0xBBFFBB;
    pub const WARNING: Color = 0xFF0000;
    pub const BALL: Color = 0x00FFFF;
    pub const PLAYER_1: Color = 0xFF6B6B;
    pub const PLAYER_2: Color = 0x4DABF7;
}

/// Target for fill-rect and draw-text requests
pub trait Canvas {
    /// False while the surface is zero-sized or not yet allocated
    fn is_ready(&self) -> bool {
        true
    }

    fn fill_rect(&mut self, center: Vec2, half_extents: Vec2, color: Color);

    fn draw_text(&mut self, text: &str, center: Vec2, glyph_size: f32, spacing: f32, color: Color);
}

#[inline]
fn channels(c: Color) -> (f32, f32, f32) {
    (
        ((c >> 16) & 0xFF) as f32,
        ((c >> 8) & 0xFF) as f32,
        (c & 0xFF) as f32,
    )
}

/// Pack floating channels, truncating like a byte cast
#[inline]
pub fn rgb(r: f32, g: f32, b: f32) -> Color {
    let to_byte = |v: f32| v.clamp(0.0, 255.0) as u32;
    (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Blend toward white by `t` (0 = unchanged, 1 = white)
pub fn lighten(color: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (r, g, b) = channels(color);
    rgb(
        r + (255.0 - r) * t,
        g + (255.0 - g) * t,
        b + (255.0 - b) * t,
    )
}

/// Scale every channel by `a` (fade toward black)
pub fn scale(color: Color, a: f32) -> Color {
    let a = a.clamp(0.0, 1.0);
    let (r, g, b) = channels(color);
    rgb(r * a, g * a, b * a)
}

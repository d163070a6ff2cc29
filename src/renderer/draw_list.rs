//! Recording canvas
//!
//! Collects draw requests for a frame so a backend can replay them (or a test
//! can inspect them).

use glam::Vec2;

use super::{Canvas, Color};

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        center: Vec2,
        half_extents: Vec2,
        color: Color,
    },
    Text {
        text: String,
        center: Vec2,
        glyph_size: f32,
        spacing: f32,
        color: Color,
    },
}

/// Frame-sized list of draw commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Surface size in pixels; zero in either axis means nothing can be drawn
    size: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    /// Window resized or minimized
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Colour a given string was drawn with, if it was drawn
    pub fn text_color(&self, needle: &str) -> Option<Color> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text, color, .. } if text == needle => Some(*color),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn is_ready(&self) -> bool {
        self.size.0 > 0 && self.size.1 > 0
    }

    fn fill_rect(&mut self, center: Vec2, half_extents: Vec2, color: Color) {
        if !self.is_ready() {
            return;
        }
        self.commands.push(DrawCommand::Rect {
            center,
            half_extents,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, center: Vec2, glyph_size: f32, spacing: f32, color: Color) {
        if !self.is_ready() || text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            center,
            glyph_size,
            spacing,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_surface_records_nothing() {
        let mut list = DrawList::new(0, 720);
        assert!(!list.is_ready());
        list.fill_rect(Vec2::ZERO, Vec2::ONE, 0xFFFFFF);
        list.draw_text("PAUSED", Vec2::ZERO, 1.0, 1.0, 0xFFFFFF);
        assert!(list.is_empty());

        list.resize(1080, 720);
        list.draw_text("PAUSED", Vec2::ZERO, 1.0, 1.0, 0xFFFFFF);
        assert!(list.contains_text("PAUSED"));
    }

    #[test]
    fn test_text_color_lookup() {
        let mut list = DrawList::new(10, 10);
        list.draw_text("A", Vec2::ZERO, 1.0, 1.0, 0x123456);
        assert_eq!(list.text_color("A"), Some(0x123456));
        assert_eq!(list.text_color("B"), None);
    }
}

//! Headless surface that records draw calls
//!
//! Used by tests and the native smoke run; nothing is rasterized.

use glam::Vec2;

use super::{Color, Surface, TextAlign};
use crate::assets::ImageHandle;

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    Background(Color),
    Rect { x: f32, y: f32, w: f32, h: f32, fill: Color },
    Ellipse { cx: f32, cy: f32, w: f32, h: f32, fill: Color },
    Triangle { fill: Color },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        align: TextAlign,
        fill: Color,
    },
    Image { id: usize, x: f32, y: f32, w: f32, h: f32 },
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    fill: Color,
    text_size: f32,
    align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Color::gray(255),
            text_size: 12.0,
            align: TextAlign::Left,
        }
    }
}

/// In-memory `Surface` implementation
#[derive(Debug)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    state: DrawState,
    stack: Vec<DrawState>,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            stack: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Current save/restore nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drop recorded calls (call between frames to inspect one frame)
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(*c)).count()
    }

    /// All text drawn since the last clear
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("restore() without matching save()"),
        }
        self.calls.push(DrawCall::Restore);
    }

    fn background(&mut self, color: Color) {
        self.calls.push(DrawCall::Background(color));
    }

    fn fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn text_size(&mut self, size: f32) {
        self.state.text_size = size;
    }

    fn text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, _radius: f32) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            w,
            h,
            fill: self.state.fill,
        });
    }

    fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Ellipse {
            cx,
            cy,
            w,
            h,
            fill: self.state.fill,
        });
    }

    fn triangle(&mut self, _a: Vec2, _b: Vec2, _c: Vec2) {
        self.calls.push(DrawCall::Triangle {
            fill: self.state.fill,
        });
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            size: self.state.text_size,
            align: self.state.align,
            fill: self.state.fill,
        });
    }

    fn image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Image {
            id: image.id,
            x,
            y,
            w,
            h,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::colors;

    #[test]
    fn test_fill_is_restored() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        s.fill(colors::TITLE);
        s.save();
        s.fill(colors::SUCCESS);
        s.rect(0.0, 0.0, 1.0, 1.0, 0.0);
        s.restore();
        s.rect(0.0, 0.0, 1.0, 1.0, 0.0);

        let fills: Vec<Color> = s
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![colors::SUCCESS, colors::TITLE]);
    }

    #[test]
    fn test_unbalanced_restore_is_harmless() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        s.restore();
        assert_eq!(s.depth(), 0);
    }
}

//! Screen rendering for each mode
//!
//! Every routine opens its own [`DrawScope`], so nothing it sets leaks into
//! the next routine or the active mini-game.

pub mod banner;
pub mod debug_menu;
pub mod game_over;
pub mod hud;
pub mod menu;
pub mod pause;
pub mod transition;

use crate::Rect;
use crate::platform::{Color, DrawScope, Surface, TextAlign, colors};

/// Rounded button with a centered white label
pub(crate) fn button(surface: &mut dyn Surface, rect: Rect, color: Color, label: &str, size: f32) {
    let mut s = DrawScope::new(surface);
    s.fill(color);
    s.rect_of(rect, 10.0);
    s.fill(colors::WHITE);
    s.text_align(TextAlign::Center);
    s.text_size(size);
    let c = rect.center();
    s.text(label, c.x, c.y);
}

/// Large centered heading
pub(crate) fn heading(surface: &mut dyn Surface, text: &str, y: f32, color: Color, size: f32) {
    let mut s = DrawScope::new(surface);
    let cx = s.width() / 2.0;
    s.fill(color);
    s.text_align(TextAlign::Center);
    s.text_size(size);
    s.text(text, cx, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCall, RecordingSurface};

    #[test]
    fn test_button_label_centered_in_rect() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        button(&mut surface, Rect::new(100.0, 100.0, 100.0, 40.0), colors::PLAY_BUTTON, "GO", 20.0);
        assert_eq!(surface.depth(), 0);
        let text = surface
            .calls()
            .iter()
            .find_map(|c| match c {
                DrawCall::Text { x, y, align, .. } => Some((*x, *y, *align)),
                _ => None,
            });
        assert_eq!(text, Some((150.0, 120.0, TextAlign::Center)));
    }
}

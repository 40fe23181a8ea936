//! Pause overlay
//!
//! The frozen game frame stays on the canvas; the first paused frame dims
//! it, later frames only repaint the opaque panel on top.

use super::{button, heading};
use crate::platform::{Color, DrawScope, Surface, colors};
use crate::session::{Layout, PauseAction};

pub fn draw(surface: &mut dyn Surface, layout: &Layout, dim: bool, from_debug: bool) {
    {
        let mut s = DrawScope::new(surface);
        let (w, h) = (s.width(), s.height());
        if dim {
            s.fill(colors::DIM);
            s.rect(0.0, 0.0, w, h, 0.0);
        }
        s.fill(colors::PANEL);
        s.rect_of(layout.pause_panel(), 12.0);
    }

    let panel = layout.pause_panel();
    heading(surface, "PAUSED", panel.y + 30.0, colors::WHITE, 28.0);

    for (action, rect) in layout.pause_buttons(from_debug) {
        let color = match action {
            PauseAction::Resume => colors::PLAY_BUTTON,
            PauseAction::MainMenu => colors::REPLAY_BUTTON,
            PauseAction::DebugMenu => colors::DEBUG_BUTTON,
        };
        button(surface, rect, color, action.label(), 18.0);
    }

    heading(
        surface,
        "ESC to resume",
        panel.y + panel.h - 8.0,
        Color::gray(150),
        11.0,
    );
}

//! Title screen

use super::{button, heading};
use crate::platform::{DrawScope, Surface, TextAlign, colors};
use crate::session::Layout;

pub const TITLE: &str = "VIBE-WARE";
pub const PLAY_LABEL: &str = "PLAY";
pub const DEBUG_LABEL: &str = "DEBUG";

pub fn draw(surface: &mut dyn Surface, layout: &Layout, debug_enabled: bool) {
    let (cx, h) = (layout.viewport.width / 2.0, layout.viewport.height);
    {
        let mut s = DrawScope::new(surface);
        s.background(colors::MENU_BG);
    }

    heading(surface, TITLE, h / 3.0, colors::TITLE, 40.0);
    heading(surface, "A game so simple anyone can play it", h / 3.0 + 40.0, colors::SUBTITLE, 16.0);

    button(surface, layout.play_button(), colors::PLAY_BUTTON, PLAY_LABEL, 24.0);

    if debug_enabled {
        button(surface, layout.debug_button(), colors::DEBUG_BUTTON, DEBUG_LABEL, 18.0);
    } else {
        let mut s = DrawScope::new(surface);
        s.fill(colors::HINT);
        s.text_align(TextAlign::Center);
        s.text_size(14.0);
        s.text("Quick mini-games - 3 lives - press ENTER", cx, h / 2.0 + 120.0);
    }
}

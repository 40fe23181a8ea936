//! Debug list screen

use glam::Vec2;

use super::heading;
use crate::Rect;
use crate::platform::{Color, DrawScope, Surface, TextAlign, colors};
use crate::session::{DebugItem, DebugMenu, Layout};

pub const BACK_LABEL: &str = "BACK TO MENU";

pub fn draw(surface: &mut dyn Surface, layout: &Layout, menu: &DebugMenu, offset: usize, names: &[&str]) {
    {
        let mut s = DrawScope::new(surface);
        s.background(colors::MENU_BG);
    }
    heading(surface, "DEBUG MENU", 30.0, colors::DEBUG_BUTTON, 28.0);
    let range = menu.visible_range(offset);
    let position = format!("{}-{} of {}", range.start + 1, range.end, menu.total_items());
    heading(surface, &position, 52.0, colors::HINT, 12.0);

    draw_arrow(surface, layout.debug_scroll_up(), true, menu.can_scroll_up(offset));
    draw_arrow(
        surface,
        layout.debug_scroll_down(menu.visible_items()),
        false,
        menu.can_scroll_down(offset),
    );

    let mut s = DrawScope::new(surface);
    s.text_align(TextAlign::Center);
    s.text_size(18.0);
    for slot in 0..menu.visible_items() {
        let Some(item) = menu.item_in_slot(offset, slot) else {
            break;
        };
        let row = layout.debug_row(slot);
        let (label, color) = match item {
            DebugItem::Game(i) => (names.get(i).copied().unwrap_or("?"), Color::rgb(70, 70, 110)),
            DebugItem::Back => (BACK_LABEL, colors::REPLAY_BUTTON),
        };
        s.fill(color);
        s.rect_of(row, 8.0);
        s.fill(colors::WHITE);
        let c = row.center();
        s.text(label, c.x, c.y);
    }
}

fn draw_arrow(surface: &mut dyn Surface, r: Rect, up: bool, enabled: bool) {
    let mut s = DrawScope::new(surface);
    s.fill(if enabled { colors::WHITE } else { Color::gray(90) });
    let c = r.center();
    let (hw, hh) = (r.w / 4.0, r.h / 3.0);
    let dir = if up { -1.0 } else { 1.0 };
    s.triangle(
        Vec2::new(c.x - hw, c.y - dir * hh),
        Vec2::new(c.x + hw, c.y - dir * hh),
        Vec2::new(c.x, c.y + dir * hh),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingSurface;

    const NAMES: [&str; 6] = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];

    #[test]
    fn test_back_row_only_at_bottom() {
        let menu = DebugMenu::new(NAMES.len(), 5);
        let layout = Layout::default();
        let mut surface = RecordingSurface::new(400.0, 400.0);

        draw(&mut surface, &layout, &menu, 0, &NAMES);
        assert!(surface.has_text("Echo"));
        assert!(!surface.has_text(BACK_LABEL));

        surface.clear();
        draw(&mut surface, &layout, &menu, 2, &NAMES);
        assert!(surface.has_text(BACK_LABEL));
        assert!(!surface.has_text("Bravo"));
        assert!(surface.has_text("Foxtrot"));
        assert!(surface.has_text("3-7 of 7"));
        assert_eq!(surface.depth(), 0);
    }
}

//! Screen-space button rectangles
//!
//! Rendering and hit-testing both read from here so a button is always
//! clickable exactly where it is drawn.

use glam::Vec2;

use crate::Rect;
use crate::consts::*;
use crate::platform::Viewport;

/// Buttons on the pause overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    MainMenu,
    DebugMenu,
}

impl PauseAction {
    pub fn label(self) -> &'static str {
        match self {
            PauseAction::Resume => "RESUME",
            PauseAction::MainMenu => "MAIN MENU",
            PauseAction::DebugMenu => "DEBUG MENU",
        }
    }
}

/// Layout for the current viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
}

impl Layout {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    fn center(&self) -> Vec2 {
        self.viewport.center()
    }

    /// Menu start button (also the replay button on game over)
    pub fn play_button(&self) -> Rect {
        let c = self.center();
        Rect::new(
            c.x - MENU_BUTTON_WIDTH / 2.0,
            c.y + 40.0,
            MENU_BUTTON_WIDTH,
            MENU_BUTTON_HEIGHT,
        )
    }

    pub fn replay_button(&self) -> Rect {
        self.play_button()
    }

    pub fn debug_button(&self) -> Rect {
        let c = self.center();
        Rect::new(c.x - MENU_BUTTON_WIDTH / 2.0, c.y + 100.0, MENU_BUTTON_WIDTH, 40.0)
    }

    /// Top right, below the score
    pub fn pause_button(&self) -> Rect {
        Rect::new(
            self.viewport.width - PAUSE_BUTTON_SIZE - 10.0,
            30.0,
            PAUSE_BUTTON_SIZE,
            PAUSE_BUTTON_SIZE,
        )
    }

    pub fn pause_panel(&self) -> Rect {
        Rect::centered(self.center(), 240.0, 220.0)
    }

    /// Overlay buttons in display order; the debug entry only when paused from debug play
    pub fn pause_buttons(&self, from_debug: bool) -> Vec<(PauseAction, Rect)> {
        let c = self.center();
        let mut actions = vec![PauseAction::Resume, PauseAction::MainMenu];
        if from_debug {
            actions.push(PauseAction::DebugMenu);
        }
        actions
            .into_iter()
            .enumerate()
            .map(|(i, action)| {
                let y = c.y - 30.0 + i as f32 * (OVERLAY_BUTTON_HEIGHT + 10.0);
                (
                    action,
                    Rect::centered(Vec2::new(c.x, y), OVERLAY_BUTTON_WIDTH, OVERLAY_BUTTON_HEIGHT),
                )
            })
            .collect()
    }

    /// Row rectangle for an on-screen slot of the debug list
    pub fn debug_row(&self, slot: usize) -> Rect {
        Rect::new(
            self.viewport.width / 2.0 - DEBUG_ROW_WIDTH / 2.0,
            DEBUG_LIST_TOP + slot as f32 * (DEBUG_ROW_HEIGHT + DEBUG_ROW_GAP),
            DEBUG_ROW_WIDTH,
            DEBUG_ROW_HEIGHT,
        )
    }

    pub fn debug_scroll_up(&self) -> Rect {
        Rect::new(self.viewport.width / 2.0 - 30.0, DEBUG_LIST_TOP - 26.0, 60.0, 22.0)
    }

    pub fn debug_scroll_down(&self, visible_items: usize) -> Rect {
        let bottom = DEBUG_LIST_TOP + visible_items as f32 * (DEBUG_ROW_HEIGHT + DEBUG_ROW_GAP);
        Rect::new(self.viewport.width / 2.0 - 30.0, bottom, 60.0, 22.0)
    }

    /// Slot whose row contains `p`
    pub fn debug_slot_at(&self, p: Vec2, visible_items: usize) -> Option<usize> {
        (0..visible_items).find(|&slot| self.debug_row(slot).contains(p))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_button_matches_menu_geometry() {
        let l = Layout::default();
        assert_eq!(l.play_button(), Rect::new(125.0, 240.0, 150.0, 50.0));
        assert!(l.play_button().contains(Vec2::new(200.0, 265.0)));
    }

    #[test]
    fn test_pause_buttons_depend_on_origin() {
        let l = Layout::default();
        assert_eq!(l.pause_buttons(false).len(), 2);
        let with_debug = l.pause_buttons(true);
        assert_eq!(with_debug.len(), 3);
        assert_eq!(with_debug[2].0, PauseAction::DebugMenu);
        // Every overlay button sits inside the panel
        let panel = l.pause_panel();
        for (_, r) in with_debug {
            assert!(panel.contains(r.center()));
            assert!(r.y + r.h < panel.y + panel.h);
        }
    }

    #[test]
    fn test_debug_rows_fit_between_arrows() {
        let l = Layout::default();
        let visible = DEBUG_VISIBLE_ITEMS;
        let up = l.debug_scroll_up();
        let down = l.debug_scroll_down(visible);
        assert!(up.y + up.h <= l.debug_row(0).y);
        let last = l.debug_row(visible - 1);
        assert!(last.y + last.h <= down.y);
        assert!(down.y + down.h <= l.viewport.height);
    }

    #[test]
    fn test_debug_slot_hit_test() {
        let l = Layout::default();
        let row = l.debug_row(3);
        assert_eq!(l.debug_slot_at(row.center(), 5), Some(3));
        // The gap between rows hits nothing
        assert_eq!(l.debug_slot_at(Vec2::new(200.0, row.y - 2.0), 5), None);
        assert_eq!(l.debug_slot_at(row.center(), 3), None);
    }

    #[test]
    fn test_layout_follows_viewport() {
        let l = Layout::new(Viewport::new(800.0, 600.0));
        assert_eq!(l.pause_button().x, 800.0 - 40.0);
        assert_eq!(l.play_button().center().x, 400.0);
    }
}

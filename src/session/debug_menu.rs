//! Scrollable debug list: every mini-game plus a final "back" row

use std::ops::Range;

/// What a row in the debug list stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugItem {
    Game(usize),
    Back,
}

/// Scroll math for the debug list; the offset itself lives in the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugMenu {
    game_count: usize,
    visible_items: usize,
}

impl DebugMenu {
    pub fn new(game_count: usize, visible_items: usize) -> Self {
        Self {
            game_count,
            visible_items,
        }
    }

    pub fn visible_items(&self) -> usize {
        self.visible_items
    }

    /// Games plus the back row
    pub fn total_items(&self) -> usize {
        self.game_count + 1
    }

    pub fn max_offset(&self) -> usize {
        self.total_items().saturating_sub(self.visible_items)
    }

    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.max_offset())
    }

    /// Move one row in the direction of `delta`; zero is a no-op
    pub fn scroll(&self, offset: usize, delta: i32) -> usize {
        let offset = self.clamp(offset);
        match delta.signum() {
            1 => self.clamp(offset + 1),
            -1 => offset.saturating_sub(1),
            _ => offset,
        }
    }

    pub fn can_scroll_up(&self, offset: usize) -> bool {
        self.clamp(offset) > 0
    }

    pub fn can_scroll_down(&self, offset: usize) -> bool {
        self.clamp(offset) < self.max_offset()
    }

    /// Item indices currently on screen
    pub fn visible_range(&self, offset: usize) -> Range<usize> {
        let start = self.clamp(offset);
        start..(start + self.visible_items).min(self.total_items())
    }

    pub fn item(&self, index: usize) -> Option<DebugItem> {
        match index {
            i if i < self.game_count => Some(DebugItem::Game(i)),
            i if i == self.game_count => Some(DebugItem::Back),
            _ => None,
        }
    }

    /// Item shown in the given on-screen slot
    pub fn item_in_slot(&self, offset: usize, slot: usize) -> Option<DebugItem> {
        if slot >= self.visible_items {
            return None;
        }
        self.item(self.clamp(offset) + slot)
    }
}

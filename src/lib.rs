//! Vibe-Ware - a rapid-fire mini-game party game
//!
//! Core modules:
//! - `session`: Orchestrator state machine (menu, rounds, pause, debug flows)
//! - `minigame`: The mini-game contract and the shipped lineup
//! - `platform`: Rendering surface and input seams (Canvas2D / headless)
//! - `assets`: Image handles that may or may not be loaded yet
//! - `ui`: Screen rendering for each mode

pub mod assets;
pub mod error;
pub mod minigame;
pub mod platform;
pub mod session;
pub mod settings;
pub mod ui;

pub use error::{ConfigError, SetupError};
pub use session::{Mode, Orchestrator, SessionState};
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the host driver
    pub const FRAME_RATE: u32 = 60;
    /// Frame duration in milliseconds at the target rate
    pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;
    /// Maximum catch-up frames per animation callback
    pub const MAX_FRAMES_PER_TICK: u32 = 4;

    /// Round budget (3 seconds at 60 fps)
    pub const ROUND_FRAMES: u32 = 180;
    /// Interstitial between rounds (0.5 seconds)
    pub const TRANSITION_FRAMES: u32 = 30;
    /// Lives at session start
    pub const STARTING_LIVES: u8 = 3;
    /// Upper bound on lives
    pub const MAX_LIVES: u8 = 3;
    /// How long the debug result banner stays up before the game restarts
    pub const DEBUG_RESULT_FRAMES: u32 = 60;
    /// Rows shown at once in the debug list
    pub const DEBUG_VISIBLE_ITEMS: usize = 5;

    /// Default canvas size
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Menu / game over button
    pub const MENU_BUTTON_WIDTH: f32 = 150.0;
    pub const MENU_BUTTON_HEIGHT: f32 = 50.0;
    /// Pause button (top right, under the score)
    pub const PAUSE_BUTTON_SIZE: f32 = 30.0;
    /// Pause overlay buttons
    pub const OVERLAY_BUTTON_WIDTH: f32 = 180.0;
    pub const OVERLAY_BUTTON_HEIGHT: f32 = 40.0;
    /// Debug list rows
    pub const DEBUG_ROW_WIDTH: f32 = 260.0;
    pub const DEBUG_ROW_HEIGHT: f32 = 44.0;
    pub const DEBUG_ROW_GAP: f32 = 6.0;
    pub const DEBUG_LIST_TOP: f32 = 90.0;
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect from its center point
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict containment, matching the button hit-tests (edges are misses)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    /// Shrink around the center by a factor (hitbox tolerance)
    pub fn scaled(&self, factor: f32) -> Self {
        Self::centered(self.center(), self.w * factor, self.h * factor)
    }

    /// AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Whole seconds left on a frame countdown, rounded up
#[inline]
pub fn frames_to_seconds(frames: u32) -> u32 {
    frames.div_ceil(consts::FRAME_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_strict() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(15.0, 15.0)));
        assert!(!r.contains(Vec2::new(10.0, 15.0)));
        assert!(!r.contains(Vec2::new(30.0, 15.0)));
    }

    #[test]
    fn test_rect_overlap_and_scale() {
        let a = Rect::centered(Vec2::new(50.0, 50.0), 40.0, 40.0);
        let b = Rect::centered(Vec2::new(85.0, 50.0), 40.0, 40.0);
        assert!(a.overlaps(&b));
        // Shrinking both hitboxes to 70% opens a gap
        assert!(!a.scaled(0.7).overlaps(&b.scaled(0.7)));
    }

    #[test]
    fn test_frames_to_seconds() {
        assert_eq!(frames_to_seconds(180), 3);
        assert_eq!(frames_to_seconds(179), 3);
        assert_eq!(frames_to_seconds(120), 2);
        assert_eq!(frames_to_seconds(1), 1);
        assert_eq!(frames_to_seconds(0), 0);
    }
}

//! Session state owned by the orchestrator

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Top-level screen; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen
    #[default]
    Menu,
    /// Scored rounds
    Playing,
    /// Session ended, waiting for replay
    GameOver,
    /// Scrollable mini-game picker
    DebugMenu,
    /// A single mini-game outside the scored flow
    DebugGame,
    /// Frozen, with the pause overlay on top
    Paused,
}

impl Mode {
    /// Modes that can be paused
    pub fn is_pausable(self) -> bool {
        matches!(self, Mode::Playing | Mode::DebugGame)
    }
}

/// Result banner shown in debug play before the game restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugResult {
    pub success: bool,
    pub frames_remaining: u32,
}

/// Everything the state machine tracks between frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: Mode,
    /// Mode to restore when leaving PAUSED
    pub previous_mode: Option<Mode>,
    pub score: u32,
    pub lives: u8,
    /// Frames left in the current round
    pub round_timer: u32,
    pub active_game_index: usize,
    pub is_transitioning: bool,
    pub transition_frames_remaining: u32,
    pub debug_scroll_offset: usize,
    /// Pending banner in debug play
    pub debug_result: Option<DebugResult>,
}

impl SessionState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            mode: Mode::Menu,
            previous_mode: None,
            score: 0,
            lives: settings.starting_lives,
            round_timer: settings.round_frames,
            active_game_index: 0,
            is_transitioning: false,
            transition_frames_remaining: 0,
            debug_scroll_offset: 0,
            debug_result: None,
        }
    }

    /// Fresh scored session starting at the first game
    pub fn start_session(&mut self, settings: &Settings) {
        self.mode = Mode::Playing;
        self.score = 0;
        self.lives = settings.starting_lives;
        self.active_game_index = 0;
        self.round_timer = settings.round_frames;
        self.is_transitioning = false;
        self.transition_frames_remaining = 0;
        self.debug_result = None;
    }

    pub fn begin_transition(&mut self, frames: u32) {
        self.is_transitioning = true;
        self.transition_frames_remaining = frames;
    }

    /// Count down one round frame; true once time is up
    pub fn tick_round_timer(&mut self) -> bool {
        self.round_timer = self.round_timer.saturating_sub(1);
        self.round_timer == 0
    }

    /// Take one life; true if that was the last
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn pause(&mut self) {
        if !self.mode.is_pausable() {
            return;
        }
        self.previous_mode = Some(self.mode);
        self.mode = Mode::Paused;
    }

    pub fn resume(&mut self) {
        if self.mode != Mode::Paused {
            return;
        }
        // Pausing always records the origin; fall back to the menu if it somehow didn't
        self.mode = self.previous_mode.unwrap_or(Mode::Menu);
    }
}

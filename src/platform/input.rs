//! Input sampling
//!
//! Discrete events (press, key, scroll) go straight to the orchestrator;
//! this module holds the continuous state mini-games poll each frame.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Legacy DOM `keyCode` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const Q: KeyCode = KeyCode(81);
    pub const S: KeyCode = KeyCode(83);
    pub const W: KeyCode = KeyCode(87);
    pub const Z: KeyCode = KeyCode(90);

    /// Map a DOM `KeyboardEvent.key` string, for hosts without keyCode
    pub fn from_key_name(key: &str) -> Option<Self> {
        let code = match key {
            "Enter" => Self::ENTER,
            "Escape" | "Esc" => Self::ESCAPE,
            " " | "Spacebar" => Self::SPACE,
            "ArrowLeft" | "Left" => Self::LEFT,
            "ArrowUp" | "Up" => Self::UP,
            "ArrowRight" | "Right" => Self::RIGHT,
            "ArrowDown" | "Down" => Self::DOWN,
            k if k.len() == 1 => {
                let c = k.chars().next()?.to_ascii_uppercase();
                if c.is_ascii_alphanumeric() {
                    KeyCode(c as u32)
                } else {
                    return None;
                }
            }
            _ => return None,
        };
        Some(code)
    }
}

/// Pointer position and held keys, updated by the host between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Vec2,
    keys_down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Drop all held keys (focus loss)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_down(*k))
    }

    /// Horizontal/vertical direction from arrows plus WASD/ZQSD, each axis in -1..=1
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.any_down(&[KeyCode::LEFT, KeyCode::A, KeyCode::Q]) {
            dir.x -= 1.0;
        }
        if self.any_down(&[KeyCode::RIGHT, KeyCode::D]) {
            dir.x += 1.0;
        }
        if self.any_down(&[KeyCode::UP, KeyCode::W, KeyCode::Z]) {
            dir.y -= 1.0;
        }
        if self.any_down(&[KeyCode::DOWN, KeyCode::S]) {
            dir.y += 1.0;
        }
        dir
    }
}

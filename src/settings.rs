//! Game settings
//!
//! Read-only configuration supplied by the host page; nothing is written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Flow ===
    /// Expose the debug menu button on the main menu
    pub debug_enabled: bool,
    /// Frames per round before the timer runs out
    pub round_frames: u32,
    /// Frames the interstitial lasts between rounds
    pub transition_frames: u32,
    /// Lives granted at session start
    pub starting_lives: u8,

    // === Debug menu ===
    /// Rows visible at once in the debug list
    pub debug_visible_items: usize,
    /// Frames the debug result banner stays up
    pub debug_result_frames: u32,

    // === HUD ===
    /// Show timer, score and lives during play
    pub show_hud: bool,

    /// Fixed RNG seed for mini-game layouts (None = host picks one)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_enabled: false,
            round_frames: ROUND_FRAMES,
            transition_frames: TRANSITION_FRAMES,
            starting_lives: STARTING_LIVES,

            debug_visible_items: DEBUG_VISIBLE_ITEMS,
            debug_result_frames: DEBUG_RESULT_FRAMES,

            show_hud: true,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults with the debug menu turned on
    pub fn debug() -> Self {
        Self {
            debug_enabled: true,
            ..Self::default()
        }
    }

    /// Reject values the state machine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_frames == 0 {
            return Err(ConfigError::Invalid {
                field: "round_frames",
                reason: "must be at least one frame",
            });
        }
        if self.transition_frames == 0 {
            return Err(ConfigError::Invalid {
                field: "transition_frames",
                reason: "must be at least one frame",
            });
        }
        if self.starting_lives == 0 || self.starting_lives > MAX_LIVES {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be between 1 and 3",
            });
        }
        if self.debug_visible_items == 0 {
            return Err(ConfigError::Invalid {
                field: "debug_visible_items",
                reason: "must show at least one row",
            });
        }
        Ok(())
    }

    /// Element id of the inline JSON settings block (used only in wasm32)
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "vibe-settings";

    /// Load settings from the page (WASM only)
    ///
    /// Reads an inline `<script id="vibe-settings" type="application/json">`
    /// block, then lets a `?debug` query flag switch the debug menu on.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let document = window.as_ref().and_then(|w| w.document());

        let mut settings = match document
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content())
        {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring page settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };

        let query = window
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if query_has_flag(&query, "debug") {
            log::info!("Debug menu enabled from query string");
            settings.debug_enabled = true;
        }

        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// True if `flag` appears as a bare or `flag=...` query parameter
pub fn query_has_flag(query: &str, flag: &str) -> bool {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split('=').next().unwrap_or_default())
        .any(|key| key == flag)
}

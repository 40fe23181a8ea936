//! Error types for construction-time failures
//!
//! Per-frame and input paths never fail; only building an orchestrator or
//! loading settings can.

use thiserror::Error;

/// Errors raised while building the orchestrator
#[derive(Debug, Error)]
pub enum SetupError {
    /// The lineup must contain at least one mini-game
    #[error("no mini-games registered")]
    NoGames,

    /// Two entries share a display name (the debug list would be ambiguous)
    #[error("duplicate mini-game name: {0}")]
    DuplicateName(&'static str),

    /// Settings failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

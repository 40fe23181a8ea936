//! Session flow: modes, bookkeeping and the orchestrator that drives them

pub mod debug_menu;
pub mod layout;
pub mod orchestrator;
pub mod state;

pub use debug_menu::{DebugItem, DebugMenu};
pub use layout::{Layout, PauseAction};
pub use orchestrator::Orchestrator;
pub use state::{DebugResult, Mode, SessionState};

//! End-of-session screen with a score-dependent jab

use super::{button, heading};
use crate::platform::{DrawScope, Surface, colors};
use crate::session::Layout;

pub const REPLAY_LABEL: &str = "REPLAY";

/// Commentary tier for a final score
pub fn comment(score: u32) -> &'static str {
    match score {
        0 => "My grandmother would do better. Blindfolded.",
        1..=4 => "You call that playing? I call it embarrassing.",
        5..=9 => "Not totally pathetic... but close.",
        _ => "Not bad for a human. Still mediocre.",
    }
}

pub fn draw(surface: &mut dyn Surface, layout: &Layout, score: u32) {
    let h = layout.viewport.height;
    {
        let mut s = DrawScope::new(surface);
        s.background(colors::GAME_OVER_BG);
    }

    heading(surface, "GAME OVER", h / 3.0, colors::TITLE, 40.0);
    heading(surface, &format!("Final score: {score}"), h / 3.0 + 50.0, colors::SUBTITLE, 20.0);
    heading(surface, comment(score), h / 3.0 + 80.0, colors::HINT, 16.0);

    button(surface, layout.replay_button(), colors::REPLAY_BUTTON, REPLAY_LABEL, 24.0);
}

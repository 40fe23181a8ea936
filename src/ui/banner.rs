//! Debug play result banner

use super::heading;
use crate::platform::{DrawScope, Surface, colors};

pub fn draw(surface: &mut dyn Surface, success: bool, game_name: &str) {
    let h = {
        let mut s = DrawScope::new(surface);
        s.background(colors::PANEL);
        s.height()
    };
    let (text, color) = if success {
        ("SUCCESS", colors::SUCCESS)
    } else {
        ("FAILED", colors::FAILURE)
    };
    heading(surface, text, h / 2.0 - 10.0, color, 40.0);
    heading(surface, &format!("Restarting {game_name}..."), h / 2.0 + 30.0, colors::HINT, 14.0);
}

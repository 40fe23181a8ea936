//! In-round overlay: time, score, lives and the pause button

use glam::Vec2;

use crate::frames_to_seconds;
use crate::platform::{Color, DrawScope, Surface, TextAlign, colors};
use crate::session::Layout;

/// What the HUD shows this frame
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub round_timer: u32,
    pub score: u32,
    pub lives: u8,
}

pub fn draw(surface: &mut dyn Surface, layout: &Layout, info: HudInfo) {
    {
        let mut s = DrawScope::new(surface);
        let w = s.width();
        s.fill(colors::BLACK);
        s.text_size(16.0);
        s.text(&format!("Time: {}", frames_to_seconds(info.round_timer)), 10.0, 20.0);
        s.text(&format!("Score: {}", info.score), w - 100.0, 20.0);

        s.fill(colors::LIFE);
        for i in 0..info.lives {
            s.circle(20.0 + f32::from(i) * 25.0, 40.0, 15.0);
        }
    }
    draw_pause_button(surface, layout);
}

/// Debug play: game name and time left, no score or lives
pub fn draw_debug(surface: &mut dyn Surface, layout: &Layout, name: &str, round_timer: u32) {
    {
        let mut s = DrawScope::new(surface);
        let (w, h) = (s.width(), s.height());
        s.fill(colors::DEBUG_BUTTON);
        s.text_size(14.0);
        s.text(&format!("DEBUG: {name}"), 10.0, h - 20.0);
        s.text_align(TextAlign::Right);
        s.text(&format!("Time: {}", frames_to_seconds(round_timer)), w - 10.0, h - 20.0);
    }
    draw_pause_button(surface, layout);
}

/// Two bars in a rounded square
pub fn draw_pause_button(surface: &mut dyn Surface, layout: &Layout) {
    let r = layout.pause_button();
    let mut s = DrawScope::new(surface);
    s.fill(Color::rgba(0, 0, 0, 120));
    s.rect_of(r, 6.0);
    s.fill(colors::WHITE);
    let c: Vec2 = r.center();
    let (bar_w, bar_h) = (r.w * 0.15, r.h * 0.5);
    s.rect(c.x - bar_w * 1.5, c.y - bar_h / 2.0, bar_w, bar_h, 0.0);
    s.rect(c.x + bar_w * 0.5, c.y - bar_h / 2.0, bar_w, bar_h, 0.0);
}

//! Flashing interstitial between rounds

use crate::platform::{Color, DrawScope, Surface};

/// Red and blue channels strobe at different rates as the counter runs down
pub fn flash_color(counter: u32) -> Color {
    let r = if counter % 10 < 5 { 255 } else { 0 };
    let b = if counter % 8 < 4 { 255 } else { 0 };
    Color::rgb(r, 0, b)
}

pub fn draw(surface: &mut dyn Surface, counter: u32) {
    let mut s = DrawScope::new(surface);
    s.background(flash_color(counter));
}

//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Rendering primitives (`Surface`)
//! - Scoped drawing state (`DrawScope`)
//! - Input sampling (`InputState`, `KeyCode`)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod headless;
pub mod input;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use headless::{DrawCall, RecordingSurface};
pub use input::{InputState, KeyCode};

use std::ops::{Deref, DerefMut};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::assets::ImageHandle;

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// CSS color string for Canvas2D
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Shared palette
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::gray(0);
    pub const WHITE: Color = Color::gray(255);
    pub const MENU_BG: Color = Color::rgb(40, 40, 60);
    pub const GAME_OVER_BG: Color = Color::rgb(40, 20, 30);
    pub const PLAY_BG: Color = Color::gray(240);
    pub const TITLE: Color = Color::rgb(255, 50, 50);
    pub const SUBTITLE: Color = Color::gray(200);
    pub const HINT: Color = Color::gray(180);
    pub const PLAY_BUTTON: Color = Color::rgb(60, 220, 60);
    pub const REPLAY_BUTTON: Color = Color::rgb(60, 60, 220);
    pub const DEBUG_BUTTON: Color = Color::rgb(220, 160, 40);
    pub const LIFE: Color = Color::rgb(255, 0, 0);
    pub const DIM: Color = Color::rgba(0, 0, 0, 150);
    pub const PANEL: Color = Color::rgb(30, 30, 45);
    pub const SUCCESS: Color = Color::rgb(0, 255, 0);
    pub const FAILURE: Color = Color::rgb(255, 0, 0);
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::consts::CANVAS_WIDTH, crate::consts::CANVAS_HEIGHT)
    }
}

/// Immediate-mode 2D drawing surface
///
/// Coordinates are canvas pixels with the origin at the top-left. Fill
/// color is sticky until changed or until `restore` pops it. Text is drawn
/// vertically centered on `y`.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Push the current drawing state (fill, text settings)
    fn save(&mut self);
    /// Pop the last pushed drawing state
    fn restore(&mut self);

    /// Paint the whole canvas
    fn background(&mut self, color: Color);
    fn fill(&mut self, color: Color);
    fn text_size(&mut self, size: f32);
    fn text_align(&mut self, align: TextAlign);

    /// Rectangle with optional corner radius
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32);
    /// Ellipse centered on (cx, cy)
    fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32);
    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2);
    fn text(&mut self, text: &str, x: f32, y: f32);
    /// Image stretched into the given rect (top-left anchored)
    fn image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32);

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width(), self.height())
    }

    fn rect_of(&mut self, r: Rect, radius: f32) {
        self.rect(r.x, r.y, r.w, r.h, radius);
    }

    fn circle(&mut self, cx: f32, cy: f32, d: f32) {
        self.ellipse(cx, cy, d, d);
    }

    /// Image centered on (cx, cy)
    fn image_centered(&mut self, image: &ImageHandle, cx: f32, cy: f32, w: f32, h: f32) {
        self.image(image, cx - w / 2.0, cy - h / 2.0, w, h);
    }
}

/// Drawing state held for the lifetime of the scope
///
/// `save` on creation, `restore` on drop, so every exit path of a render
/// routine (including early returns) leaves the surface as it found it.
pub struct DrawScope<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> DrawScope<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        // Known defaults inside every scope
        surface.text_align(TextAlign::Left);
        Self { surface }
    }
}

impl<'a> Deref for DrawScope<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for DrawScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for DrawScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

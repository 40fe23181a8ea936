//! Mini-game contract and lineup
//!
//! The orchestrator only ever talks to a mini-game through [`MiniGame`].
//! Optional capabilities (pointer, keys, failure) have no-op defaults so
//! callers never need to probe for them.

pub mod avoid_obstacle;
pub mod back_popper;
pub mod catch_poop;
pub mod click_circle;
pub mod finger_nose;
pub mod lick_feet;
pub mod timing;

pub use avoid_obstacle::AvoidObstacle;
pub use back_popper::BackPopper;
pub use catch_poop::CatchPoop;
pub use click_circle::ClickCircle;
pub use finger_nose::FingerNose;
pub use lick_feet::LickFeet;
pub use timing::Timing;

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{AssetRef, AssetStore};
use crate::platform::{Color, DrawScope, InputState, KeyCode, Surface, TextAlign, Viewport, colors};

/// Everything a mini-game may touch during one frame
pub struct Frame<'a> {
    pub surface: &'a mut dyn Surface,
    pub input: &'a InputState,
    pub assets: &'a AssetStore,
}

impl<'a> Frame<'a> {
    pub fn new(surface: &'a mut dyn Surface, input: &'a InputState, assets: &'a AssetStore) -> Self {
        Self {
            surface,
            input,
            assets,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    /// Save/restore-guarded access to the surface
    pub fn scope(&mut self) -> DrawScope<'_> {
        DrawScope::new(&mut *self.surface)
    }
}

/// A single short round the player must win
pub trait MiniGame {
    /// One-time initialization when the game is registered
    fn setup(&mut self, viewport: Viewport) {
        self.reset(viewport);
    }

    /// Start a fresh round; afterwards neither completed nor failed
    fn reset(&mut self, viewport: Viewport);

    /// Render and advance one frame
    fn draw(&mut self, frame: &mut Frame<'_>);

    /// Pointer press not consumed by the orchestrator's own buttons
    fn mouse_pressed(&mut self, _pointer: Vec2) {}

    /// Key press not consumed by the orchestrator
    fn key_pressed(&mut self, _key: KeyCode) {}

    /// Win condition reached this round
    fn is_completed(&self) -> bool;

    /// Lose condition reached this round (games that cannot be lost keep the default)
    fn has_failed(&self) -> bool {
        false
    }

    /// Running outside the scored flow; may only change auxiliary display
    fn set_debug_mode(&mut self, debug: bool);

    /// Frames a round lasts; games with a survival goal size it to fit
    fn set_round_frames(&mut self, _frames: u32) {}

    /// Images this game may draw
    fn assets(&self) -> &'static [AssetRef] {
        &[]
    }
}

/// A registered mini-game with its display name
pub struct GameEntry {
    pub name: &'static str,
    pub game: Box<dyn MiniGame>,
}

impl GameEntry {
    pub fn new(name: &'static str, game: impl MiniGame + 'static) -> Self {
        Self {
            name,
            game: Box::new(game),
        }
    }
}

impl std::fmt::Debug for GameEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEntry").field("name", &self.name).finish()
    }
}

/// The shipped mini-games in play order
pub fn lineup(seed: u64) -> Vec<GameEntry> {
    // Each game gets its own stream so adding one doesn't reshuffle the others
    let rng = |n: u64| Pcg32::seed_from_u64(seed.wrapping_add(n.wrapping_mul(0x9E37_79B9)));
    vec![
        GameEntry::new("Click Circle", ClickCircle::new(rng(0))),
        GameEntry::new("Avoid Obstacle", AvoidObstacle::new(rng(1))),
        GameEntry::new("Finger Nose", FingerNose::new(rng(2))),
        GameEntry::new("Lick Feet", LickFeet::new(rng(3))),
        GameEntry::new("Back Popper", BackPopper::new(rng(4))),
        GameEntry::new("Catch Poop", CatchPoop::new(rng(5))),
        GameEntry::new("Timing", Timing::new()),
    ]
}

/// Every asset referenced by a lineup, deduplicated by name
pub fn asset_manifest(games: &[GameEntry]) -> Vec<AssetRef> {
    let mut out: Vec<AssetRef> = Vec::new();
    for entry in games {
        for asset in entry.game.assets() {
            if !out.iter().any(|a| a.name == asset.name) {
                out.push(*asset);
            }
        }
    }
    out
}

/// Uniform sample in [lo, hi), collapsing to `lo` on an empty range
pub(crate) fn random_between(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Centered instruction line(s) at the top of the screen
pub(crate) fn draw_instructions(surface: &mut dyn Surface, color: Color, title: &str, hint: Option<&str>) {
    let mut s = DrawScope::new(surface);
    let cx = s.width() / 2.0;
    s.fill(color);
    s.text_align(TextAlign::Center);
    s.text_size(if hint.is_some() { 18.0 } else { 24.0 });
    s.text(title, cx, 30.0);
    if let Some(hint) = hint {
        s.text_size(14.0);
        s.text(hint, cx, 55.0);
    }
}

/// Dimmed strip across the middle with a big message
pub(crate) fn draw_result_strip(surface: &mut dyn Surface, text: &str, color: Color) {
    let mut s = DrawScope::new(surface);
    let (w, h) = (s.width(), s.height());
    s.fill(colors::DIM);
    s.rect(0.0, h / 2.0 - 40.0, w, 80.0, 0.0);
    s.fill(color);
    s.text_align(TextAlign::Center);
    s.text_size(32.0);
    s.text(text, w / 2.0, h / 2.0);
}

/// Small marker used by debug overlays
pub(crate) fn draw_debug_point(surface: &mut dyn Surface, p: Vec2, label: &str) {
    let mut s = DrawScope::new(surface);
    s.fill(Color::rgb(255, 0, 255));
    s.circle(p.x, p.y, 6.0);
    s.text_size(10.0);
    s.text(label, p.x + 6.0, p.y - 6.0);
}

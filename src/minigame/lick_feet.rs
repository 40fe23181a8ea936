//! Steer the feet onto the tongue tip
//!
//! The tongue hangs at a fixed 45 degree angle below-left of the head and is
//! invisible; only its tip matters for the hit test.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{Frame, MiniGame, draw_debug_point, draw_instructions, draw_result_strip, random_between};
use crate::assets::AssetRef;
use crate::platform::{Color, Viewport, colors};

const ASSETS: &[AssetRef] = &[
    AssetRef::new("lick_feet.head", "assets/lick_feet/head.png"),
    AssetRef::new("lick_feet.feet", "assets/lick_feet/feet.png"),
    AssetRef::new("lick_feet.background", "assets/lick_feet/background.jpeg"),
];

const FEET_SPEED: f32 = 5.0;
const FEET_EDGE: f32 = 30.0;
const FEET_RADIUS: f32 = 50.0;
const TONGUE_RADIUS: f32 = 15.0;
const TONGUE_LENGTH: f32 = 70.0;
const TONGUE_OFFSET: Vec2 = Vec2::new(-10.0, 10.0);
const HEAD_SCALE: f32 = 0.15;
const FEET_SCALE: f32 = 0.12;

pub struct LickFeet {
    rng: Pcg32,
    viewport: Viewport,
    head: Vec2,
    feet: Vec2,
    completed: bool,
    debug: bool,
}

impl LickFeet {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            viewport: Viewport::default(),
            head: Vec2::ZERO,
            feet: Vec2::ZERO,
            completed: false,
            debug: false,
        }
    }

    pub fn tongue_tip(&self) -> Vec2 {
        let base = self.head + TONGUE_OFFSET;
        let angle = std::f32::consts::FRAC_PI_4;
        base + Vec2::new(-angle.cos(), angle.sin()) * TONGUE_LENGTH
    }

    fn update(&mut self, dir: Vec2) {
        if self.completed {
            return;
        }
        self.feet += dir * FEET_SPEED;
        let max = Vec2::new(self.viewport.width - FEET_EDGE, self.viewport.height - FEET_EDGE)
            .max(Vec2::splat(FEET_EDGE));
        self.feet = self.feet.clamp(Vec2::splat(FEET_EDGE), max);

        if self.feet.distance(self.tongue_tip()) < FEET_RADIUS + TONGUE_RADIUS {
            log::debug!("LickFeet: tongue reached the feet");
            self.completed = true;
        }
    }
}

impl MiniGame for LickFeet {
    fn reset(&mut self, viewport: Viewport) {
        let (w, h) = (viewport.width, viewport.height);
        self.viewport = viewport;
        // Head in the bottom half, feet in the top half
        self.head = Vec2::new(
            random_between(&mut self.rng, 100.0, w - 100.0),
            random_between(&mut self.rng, h / 2.0, h - 100.0),
        );
        self.feet = Vec2::new(
            random_between(&mut self.rng, 100.0, w - 100.0),
            random_between(&mut self.rng, 50.0, h / 2.0 - 50.0),
        );
        self.completed = false;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let background = frame.assets.image("lick_feet.background");
        let head = frame.assets.image("lick_feet.head");
        let feet = frame.assets.image("lick_feet.feet");

        {
            let mut s = frame.scope();
            let (w, h) = (s.width(), s.height());
            match background {
                Some(img) => s.image(&img, 0.0, 0.0, w, h),
                None => s.background(Color::rgb(120, 220, 220)),
            }
        }

        self.update(frame.input.direction());

        {
            let mut s = frame.scope();
            match feet {
                Some(img) => {
                    let (fw, fh) = (img.width as f32 * FEET_SCALE, img.height as f32 * FEET_SCALE);
                    s.image_centered(&img, self.feet.x, self.feet.y, fw, fh);
                }
                None => {
                    s.fill(Color::rgb(255, 200, 200));
                    s.ellipse(self.feet.x, self.feet.y, 40.0, 20.0);
                }
            }
            match head {
                Some(img) => {
                    let (hw, hh) = (img.width as f32 * HEAD_SCALE, img.height as f32 * HEAD_SCALE);
                    s.image_centered(&img, self.head.x, self.head.y, hw, hh);
                }
                None => {
                    s.fill(Color::rgb(255, 220, 180));
                    s.circle(self.head.x, self.head.y, 80.0);
                }
            }
        }

        draw_instructions(
            frame.surface,
            colors::BLACK,
            "BRING THE FEET TO THE TONGUE!",
            Some("Move the feet with WASD / ZQSD or the arrows"),
        );

        if self.completed {
            draw_result_strip(frame.surface, "WELL LICKED!", colors::SUCCESS);
        }

        if self.debug {
            draw_debug_point(frame.surface, self.tongue_tip(), "tongue");
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
        log::debug!("LickFeet: debug mode {}", if debug { "on" } else { "off" });
    }

    fn assets(&self) -> &'static [AssetRef] {
        ASSETS
    }
}

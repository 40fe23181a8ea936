//! Stop the sweeping hand over the poop with Space
//!
//! One attempt per round. A miss stays on screen for a second before the
//! game reports failure.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{Frame, MiniGame, draw_debug_point, draw_instructions, draw_result_strip, random_between};
use crate::assets::AssetRef;
use crate::platform::{Color, KeyCode, Viewport, colors};

const ASSETS: &[AssetRef] = &[
    AssetRef::new("catch_poop.hand", "assets/catch_poop/hand.png"),
    AssetRef::new("catch_poop.poopy_hand", "assets/catch_poop/poopy-hand.png"),
    AssetRef::new("catch_poop.poop", "assets/catch_poop/poop.png"),
    AssetRef::new("catch_poop.plate", "assets/catch_poop/plate.jpeg"),
];

const POOP_SIZE: f32 = 60.0;
const HAND_WIDTH: f32 = 100.0;
const HAND_HEIGHT: f32 = 115.0;
const HAND_SPEED: f32 = 10.0;
/// Frames a miss is shown before it counts as a failure
const FEEDBACK_FRAMES: u32 = 60;
const HIT_DISTANCE: f32 = (POOP_SIZE + HAND_WIDTH) / 2.0 * 0.7;

pub struct CatchPoop {
    rng: Pcg32,
    viewport: Viewport,
    poop: Vec2,
    hand: Vec2,
    direction: f32,
    attempted: bool,
    feedback: u32,
    completed: bool,
    debug: bool,
}

impl CatchPoop {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            viewport: Viewport::default(),
            poop: Vec2::ZERO,
            hand: Vec2::ZERO,
            direction: 1.0,
            attempted: false,
            feedback: 0,
            completed: false,
            debug: false,
        }
    }

    fn update(&mut self) {
        if !self.attempted {
            self.hand.x += HAND_SPEED * self.direction;
            let (lo, hi) = (HAND_WIDTH / 2.0, self.viewport.width - HAND_WIDTH / 2.0);
            if self.hand.x > hi || self.hand.x < lo {
                self.direction = -self.direction;
            }
            return;
        }

        if !self.completed {
            if self.hand.distance(self.poop) < HIT_DISTANCE {
                self.completed = true;
            }
            self.feedback = self.feedback.saturating_sub(1);
        }
    }
}

impl MiniGame for CatchPoop {
    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.poop = Vec2::new(
            random_between(&mut self.rng, POOP_SIZE, viewport.width - POOP_SIZE),
            viewport.height * 0.5,
        );
        // Hand sweeps at poop level
        self.hand = Vec2::new(HAND_WIDTH / 2.0, self.poop.y - 20.0);
        self.direction = 1.0;
        self.attempted = false;
        self.feedback = 0;
        self.completed = false;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let plate = frame.assets.image("catch_poop.plate");
        let poop = frame.assets.image("catch_poop.poop");
        let hand = if self.completed {
            frame
                .assets
                .image("catch_poop.poopy_hand")
                .or_else(|| frame.assets.image("catch_poop.hand"))
        } else {
            frame.assets.image("catch_poop.hand")
        };

        self.update();

        {
            let mut s = frame.scope();
            let (w, h) = (s.width(), s.height());
            s.background(colors::WHITE);
            if let Some(plate) = plate {
                s.image_centered(&plate, w / 2.0, h / 2.0, w * 0.9, h * 0.9);
            }

            match poop {
                Some(img) => s.image_centered(&img, self.poop.x, self.poop.y, POOP_SIZE, POOP_SIZE),
                None => {
                    s.fill(Color::rgb(139, 69, 19));
                    s.circle(self.poop.x, self.poop.y, POOP_SIZE);
                }
            }

            match hand {
                Some(img) => s.image_centered(&img, self.hand.x, self.hand.y, HAND_WIDTH, HAND_HEIGHT),
                None => {
                    s.fill(Color::rgba(230, 190, 160, 220));
                    s.rect(
                        self.hand.x - HAND_WIDTH / 2.0,
                        self.hand.y - HAND_HEIGHT / 2.0,
                        HAND_WIDTH,
                        HAND_HEIGHT,
                        20.0,
                    );
                }
            }
        }

        draw_instructions(
            frame.surface,
            colors::BLACK,
            "CATCH THE POOP AT THE RIGHT TIME",
            Some("Press SPACE when the hand is over it"),
        );

        if self.completed {
            draw_result_strip(frame.surface, "GOT IT!", colors::SUCCESS);
        } else if self.has_failed() {
            draw_result_strip(frame.surface, "MISSED!", colors::FAILURE);
        }

        if self.debug {
            draw_debug_point(frame.surface, self.poop, &format!("hit < {HIT_DISTANCE:.0}"));
        }
    }

    fn key_pressed(&mut self, key: KeyCode) {
        if key == KeyCode::SPACE && !self.attempted {
            self.attempted = true;
            self.feedback = FEEDBACK_FRAMES;
            log::debug!("CatchPoop: stopped at {:.1}, poop at {:.1}", self.hand.x, self.poop.x);
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn has_failed(&self) -> bool {
        self.attempted && !self.completed && self.feedback == 0
    }

    fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn assets(&self) -> &'static [AssetRef] {
        ASSETS
    }
}

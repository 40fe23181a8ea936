//! Press Space when the sliding box lines up with the target bar

use super::{Frame, MiniGame, draw_instructions};
use crate::platform::{Color, KeyCode, TextAlign, Viewport, colors};

const EDGE: f32 = 50.0;
const BOX_SPEED: f32 = 5.0;
const BOX_WIDTH: f32 = 50.0;
const LANE_TOP: f32 = 100.0;
const LANE_HEIGHT: f32 = 100.0;
const TOLERANCE: f32 = 30.0;
const FEEDBACK_FRAMES: u32 = 60;

/// Layout is fixed, so unlike the other games this one needs no rng
pub struct Timing {
    viewport: Viewport,
    target_x: f32,
    box_x: f32,
    speed: f32,
    attempted: bool,
    feedback: u32,
    completed: bool,
    debug: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            target_x: 0.0,
            box_x: EDGE,
            speed: BOX_SPEED,
            attempted: false,
            feedback: 0,
            completed: false,
            debug: false,
        }
    }

    fn update(&mut self) {
        self.box_x += self.speed;
        if self.box_x > self.viewport.width - EDGE || self.box_x < EDGE {
            self.speed = -self.speed;
        }
        self.feedback = self.feedback.saturating_sub(1);
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for Timing {
    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.target_x = viewport.width / 2.0;
        self.box_x = EDGE;
        self.speed = BOX_SPEED;
        self.attempted = false;
        self.feedback = 0;
        self.completed = false;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        self.update();

        {
            let mut s = frame.scope();
            s.fill(Color::rgb(255, 0, 0));
            s.rect(self.target_x - 5.0, LANE_TOP, 10.0, LANE_HEIGHT, 0.0);
            s.fill(Color::rgb(0, 0, 255));
            s.rect(self.box_x - BOX_WIDTH / 2.0, LANE_TOP, BOX_WIDTH, LANE_HEIGHT, 0.0);

            if self.feedback > 0 {
                let (text, fill) = if self.completed {
                    ("PERFECT!", Color::rgba(0, 255, 0, 200))
                } else {
                    ("MISSED!", Color::rgba(255, 0, 0, 200))
                };
                s.fill(fill);
                s.text_align(TextAlign::Center);
                s.text_size(24.0);
                s.text(text, self.viewport.width / 2.0, LANE_TOP + LANE_HEIGHT + 30.0);
            }

            if self.debug {
                s.fill(Color::rgb(255, 0, 255));
                s.text_size(10.0);
                s.text(
                    &format!("off by {:.0}", (self.box_x - self.target_x).abs()),
                    10.0,
                    LANE_TOP - 10.0,
                );
            }
        }

        draw_instructions(frame.surface, colors::BLACK, "PRESS SPACE WHEN ALIGNED!", None);
    }

    fn key_pressed(&mut self, key: KeyCode) {
        if key != KeyCode::SPACE || self.attempted {
            return;
        }
        self.attempted = true;
        self.feedback = FEEDBACK_FRAMES;
        self.completed = (self.box_x - self.target_x).abs() < TOLERANCE;
        self.speed = 0.0;
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn has_failed(&self) -> bool {
        self.attempted && !self.completed
    }

    fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
    }
}

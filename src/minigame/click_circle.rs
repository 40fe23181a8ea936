//! Click the red circle before time runs out

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{Frame, MiniGame, draw_debug_point, draw_instructions, random_between};
use crate::platform::{Color, Viewport, colors};

const CIRCLE_DIAMETER: f32 = 50.0;
const EDGE_MARGIN: f32 = 50.0;

pub struct ClickCircle {
    rng: Pcg32,
    target: Vec2,
    completed: bool,
    debug: bool,
}

impl ClickCircle {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            target: Vec2::ZERO,
            completed: false,
            debug: false,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }
}

impl MiniGame for ClickCircle {
    fn reset(&mut self, viewport: Viewport) {
        self.target = Vec2::new(
            random_between(&mut self.rng, EDGE_MARGIN, viewport.width - EDGE_MARGIN),
            random_between(&mut self.rng, EDGE_MARGIN, viewport.height - EDGE_MARGIN),
        );
        self.completed = false;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        {
            let mut s = frame.scope();
            s.fill(Color::rgb(255, 0, 0));
            s.circle(self.target.x, self.target.y, CIRCLE_DIAMETER);
        }
        draw_instructions(frame.surface, colors::BLACK, "CLICK THE CIRCLE!", None);
        if self.debug {
            draw_debug_point(frame.surface, self.target, "target");
        }
    }

    fn mouse_pressed(&mut self, pointer: Vec2) {
        if pointer.distance(self.target) < CIRCLE_DIAMETER / 2.0 {
            self.completed = true;
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
    }
}

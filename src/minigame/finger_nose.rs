//! Put the finger (pointer) in the nose

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{Frame, MiniGame, draw_debug_point, draw_instructions, random_between};
use crate::assets::AssetRef;
use crate::platform::{Color, TextAlign, Viewport, colors};

const ASSETS: &[AssetRef] = &[
    AssetRef::new("finger_nose.finger", "assets/finger_nose/finger.png"),
    AssetRef::new("finger_nose.nose", "assets/finger_nose/nose.png"),
    AssetRef::new("finger_nose.face", "assets/finger_nose/face.png"),
];

const NOSE_MARGIN: f32 = 100.0;
const NOSE_HIT_RADIUS: f32 = 30.0;
const NOSE_IMAGE_SIZE: f32 = 100.0;
const NOSE_FALLBACK_SIZE: f32 = 60.0;
const FINGER_WIDTH: f32 = 60.0;
const FINGER_HEIGHT: f32 = 120.0;

pub struct FingerNose {
    rng: Pcg32,
    nose: Vec2,
    finger: Vec2,
    completed: bool,
    debug: bool,
}

impl FingerNose {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            nose: Vec2::ZERO,
            finger: Vec2::ZERO,
            completed: false,
            debug: false,
        }
    }
}

impl MiniGame for FingerNose {
    fn reset(&mut self, viewport: Viewport) {
        self.nose = Vec2::new(
            random_between(&mut self.rng, NOSE_MARGIN, viewport.width - NOSE_MARGIN),
            random_between(&mut self.rng, NOSE_MARGIN, viewport.height - NOSE_MARGIN),
        );
        self.completed = false;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let face = frame.assets.image("finger_nose.face");
        let nose = frame.assets.image("finger_nose.nose");
        let finger = frame.assets.image("finger_nose.finger");
        self.finger = frame.input.pointer();

        {
            let mut s = frame.scope();
            let (w, h) = (s.width(), s.height());
            s.background(colors::BLACK);

            // Face is decoration only, no fallback needed beyond the black backdrop
            if let Some(face) = face {
                s.image_centered(&face, w / 2.0, h / 3.0, w, h);
            }

            match nose {
                Some(img) => s.image_centered(&img, self.nose.x, self.nose.y, NOSE_IMAGE_SIZE, NOSE_IMAGE_SIZE),
                None => {
                    s.fill(Color::rgb(150, 50, 50));
                    s.circle(self.nose.x, self.nose.y, NOSE_FALLBACK_SIZE);
                }
            }

            match finger {
                // Fingertip sits on the pointer
                Some(img) => s.image(
                    &img,
                    self.finger.x - FINGER_WIDTH / 2.0,
                    self.finger.y - 10.0,
                    FINGER_WIDTH,
                    FINGER_HEIGHT,
                ),
                None => {
                    s.fill(Color::rgb(200, 180, 160));
                    s.rect(self.finger.x - 10.0, self.finger.y - 40.0, 20.0, 40.0, 0.0);
                    s.fill(colors::WHITE);
                    s.circle(self.finger.x, self.finger.y, 15.0);
                }
            }
        }

        if self.finger.distance(self.nose) < NOSE_HIT_RADIUS {
            self.completed = true;
        }

        draw_instructions(frame.surface, colors::WHITE, "PICK THE NOSE!", None);

        if self.completed {
            let mut s = frame.scope();
            let (w, h) = (s.width(), s.height());
            s.fill(colors::SUCCESS);
            s.text_align(TextAlign::Center);
            s.text_size(40.0);
            s.text("NICE ONE!", w / 2.0, h / 2.0);
        }

        if self.debug {
            draw_debug_point(frame.surface, self.nose, "nose");
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn assets(&self) -> &'static [AssetRef] {
        ASSETS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigame::testing::{Harness, rng};

    #[test]
    fn test_pointer_in_nose_completes() {
        let mut h = Harness::new();
        let mut game = FingerNose::new(rng());
        game.reset(h.viewport());

        let nose = game.nose;
        h.input.set_pointer(nose.x + 40.0, nose.y);
        h.step(&mut game);
        assert!(!game.is_completed());

        h.input.set_pointer(nose.x + 5.0, nose.y - 5.0);
        h.step(&mut game);
        assert!(game.is_completed());
        assert!(h.surface.has_text("NICE ONE!"));
    }
}

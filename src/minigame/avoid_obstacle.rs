//! Steer the cat out of the van's path until the survival timer fills
//!
//! Van falls from the top at a random speed and respawns when it leaves the
//! screen. Hitboxes are shrunk to 70% so near misses count as misses.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{Frame, MiniGame, draw_debug_point, draw_instructions, draw_result_strip, random_between};
use crate::Rect;
use crate::assets::{AssetRef, ImageHandle};
use crate::platform::{Color, Surface, Viewport, colors};

const ASSETS: &[AssetRef] = &[
    AssetRef::new("avoid.cat", "assets/avoid_obstacle/cat.png"),
    AssetRef::new("avoid.van", "assets/avoid_obstacle/van.png"),
    AssetRef::new("avoid.road", "assets/avoid_obstacle/road.jpeg"),
];

const VAN_WIDTH: f32 = 100.0;
const VAN_DEFAULT_HEIGHT: f32 = 120.0;
const VAN_SPEED_MIN: f32 = 3.0;
const VAN_SPEED_MAX: f32 = 6.0;
const CAT_WIDTH: f32 = 60.0;
const CAT_DEFAULT_HEIGHT: f32 = 40.0;
const CAT_SPEED: f32 = 6.0;
const HITBOX_SCALE: f32 = 0.7;
/// Frames to survive unless the round budget says otherwise
const SURVIVE_FRAMES: u32 = 180;

pub struct AvoidObstacle {
    rng: Pcg32,
    viewport: Viewport,
    cat: Vec2,
    van: Vec2,
    van_speed: f32,
    survived: u32,
    survive_frames: u32,
    completed: bool,
    failed: bool,
    debug: bool,
}

impl AvoidObstacle {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            viewport: Viewport::default(),
            cat: Vec2::ZERO,
            van: Vec2::ZERO,
            van_speed: VAN_SPEED_MIN,
            survived: 0,
            survive_frames: SURVIVE_FRAMES,
            completed: false,
            failed: false,
            debug: false,
        }
    }

    fn respawn_van(&mut self, van_height: f32) {
        self.van = Vec2::new(
            random_between(
                &mut self.rng,
                VAN_WIDTH / 2.0,
                self.viewport.width - VAN_WIDTH / 2.0,
            ),
            -van_height,
        );
        self.van_speed = random_between(&mut self.rng, VAN_SPEED_MIN, VAN_SPEED_MAX);
    }

    fn update(&mut self, dx: f32, cat_h: f32, van_h: f32) {
        if self.failed || self.completed {
            return;
        }

        self.van.y += self.van_speed;
        if self.van.y > self.viewport.height + van_h {
            self.respawn_van(van_h);
        }

        self.cat.x = (self.cat.x + dx * CAT_SPEED).clamp(
            CAT_WIDTH / 2.0,
            (self.viewport.width - CAT_WIDTH / 2.0).max(CAT_WIDTH / 2.0),
        );

        let cat_box = Rect::centered(self.cat, CAT_WIDTH, cat_h).scaled(HITBOX_SCALE);
        let van_box = Rect::centered(self.van, VAN_WIDTH, van_h).scaled(HITBOX_SCALE);
        if cat_box.overlaps(&van_box) {
            self.failed = true;
            log::debug!("AvoidObstacle: cat hit at {:?}", self.cat);
            return;
        }

        self.survived += 1;
        if self.survived >= self.survive_frames {
            self.completed = true;
        }
    }

    fn draw_road(&self, surface: &mut dyn Surface, road: Option<ImageHandle>) {
        let (w, h) = (surface.width(), surface.height());
        surface.background(Color::gray(80));
        if let Some(road) = road {
            surface.image(&road, 0.0, 0.0, w, h);
            return;
        }
        surface.fill(Color::gray(60));
        surface.rect(0.0, 0.0, w, h, 0.0);
        // Lane markings
        surface.fill(colors::WHITE);
        let (line_w, line_h, gap) = (40.0, 10.0, 30.0);
        let mut y = -line_h;
        while y < h + line_h {
            surface.rect(w / 2.0 - line_w / 2.0, y, line_w, line_h, 0.0);
            y += line_h + gap;
        }
    }
}

impl MiniGame for AvoidObstacle {
    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cat = Vec2::new(viewport.width / 2.0, viewport.height - 60.0);
        self.respawn_van(VAN_DEFAULT_HEIGHT);
        self.survived = 0;
        self.completed = false;
        self.failed = false;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let cat_img = frame.assets.image("avoid.cat");
        let van_img = frame.assets.image("avoid.van");
        let road_img = frame.assets.image("avoid.road");
        // Keep the art's proportions once it has loaded
        let cat_h = cat_img
            .and_then(|i| i.aspect())
            .map_or(CAT_DEFAULT_HEIGHT, |a| CAT_WIDTH * a);
        let van_h = van_img
            .and_then(|i| i.aspect())
            .map_or(VAN_DEFAULT_HEIGHT, |a| VAN_WIDTH * a);

        {
            let mut s = frame.scope();
            self.draw_road(&mut *s, road_img);
        }

        self.update(frame.input.direction().x, cat_h, van_h);

        {
            let mut s = frame.scope();
            match cat_img {
                Some(img) => s.image_centered(&img, self.cat.x, self.cat.y, CAT_WIDTH, cat_h),
                None => {
                    s.fill(Color::rgb(255, 165, 0));
                    s.ellipse(self.cat.x, self.cat.y, CAT_WIDTH, cat_h);
                }
            }
            match van_img {
                Some(img) => s.image_centered(&img, self.van.x, self.van.y, VAN_WIDTH, van_h),
                None => {
                    s.fill(Color::rgb(255, 0, 0));
                    s.rect_of(Rect::centered(self.van, VAN_WIDTH, van_h), 0.0);
                }
            }
        }

        draw_instructions(
            frame.surface,
            colors::WHITE,
            "SAVE THE CAT FROM THE VAN!",
            Some("Move the cat with the arrow keys"),
        );

        if self.completed {
            draw_result_strip(frame.surface, "CAT SAVED!", colors::SUCCESS);
        } else if self.failed {
            draw_result_strip(frame.surface, "CAT SQUASHED!", colors::FAILURE);
        }

        if self.debug {
            draw_debug_point(frame.surface, self.van, &format!("{}/{}", self.survived, self.survive_frames));
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn has_failed(&self) -> bool {
        self.failed
    }

    fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn set_round_frames(&mut self, frames: u32) {
        // Surviving the whole round is the win; completion outranks the
        // timeout reported on the same frame
        self.survive_frames = frames.clamp(1, SURVIVE_FRAMES);
    }

    fn assets(&self) -> &'static [AssetRef] {
        ASSETS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigame::testing::{Harness, rng};
    use crate::platform::KeyCode;

    #[test]
    fn test_van_on_cat_fails() {
        let mut h = Harness::new();
        let mut game = AvoidObstacle::new(rng());
        game.reset(h.viewport());
        // Drop the van right on top of the cat
        game.van = game.cat - Vec2::new(0.0, game.van_speed);
        h.step(&mut game);
        assert!(game.has_failed());
        assert!(!game.is_completed());
    }

    #[test]
    fn test_survival_completes() {
        let mut h = Harness::new();
        let mut game = AvoidObstacle::new(rng());
        game.reset(h.viewport());
        // Park the van far above so it never reaches the cat
        for _ in 0..SURVIVE_FRAMES {
            game.van = Vec2::new(game.cat.x, -10_000.0);
            h.step(&mut game);
        }
        assert!(game.is_completed());
        assert!(!game.has_failed());
    }

    #[test]
    fn test_cat_moves_and_stays_on_screen() {
        let mut h = Harness::new();
        let mut game = AvoidObstacle::new(rng());
        game.reset(h.viewport());
        h.input.key_down(KeyCode::LEFT);
        for _ in 0..100 {
            game.van = Vec2::new(390.0, -10_000.0);
            h.step(&mut game);
        }
        assert_eq!(game.cat.x, CAT_WIDTH / 2.0);
    }

    #[test]
    fn test_short_round_still_winnable() {
        let mut h = Harness::new();
        let mut game = AvoidObstacle::new(rng());
        game.set_round_frames(120);
        game.reset(h.viewport());
        for _ in 0..119 {
            game.van = Vec2::new(game.cat.x, -10_000.0);
            h.step(&mut game);
        }
        assert!(!game.is_completed());
        game.van = Vec2::new(game.cat.x, -10_000.0);
        h.step(&mut game);
        assert!(game.is_completed());
    }
}

//! Pop every pimple on the back
//!
//! Buttons are scattered over a 3x3 grid, at most one per cell, jittered
//! within the cell so the layout never looks like a grid.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::{Frame, MiniGame, draw_instructions, draw_result_strip, random_between};
use crate::assets::AssetRef;
use crate::platform::{Color, Viewport, colors};

const ASSETS: &[AssetRef] = &[
    AssetRef::new("back_popper.back", "assets/back_popper/back.png"),
    AssetRef::new("back_popper.button", "assets/back_popper/button.png"),
    AssetRef::new("back_popper.button_popped", "assets/back_popper/button_popped.png"),
    AssetRef::new("back_popper.background", "assets/back_popper/background.jpg"),
];

const GRID: usize = 3;
const MARGIN_X: f32 = 50.0;
/// Larger at the top to keep clear of the instructions
const MARGIN_Y: f32 = 60.0;
const MIN_BUTTONS: usize = 3;
const MAX_BUTTONS: usize = 7;
const BASE_SIZE: f32 = 40.0;
const SIZE_VARIATION: f32 = 10.0;
const MAX_OFFSET_RATIO: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Button {
    pos: Vec2,
    size: f32,
    popped: bool,
}

pub struct BackPopper {
    rng: Pcg32,
    buttons: Vec<Button>,
    completed: bool,
    debug: bool,
}

impl BackPopper {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            buttons: Vec::new(),
            completed: false,
            debug: false,
        }
    }

    pub fn button_positions(&self) -> Vec<Vec2> {
        self.buttons.iter().map(|b| b.pos).collect()
    }

    pub fn remaining(&self) -> usize {
        self.buttons.iter().filter(|b| !b.popped).count()
    }

    fn layout(&mut self, viewport: Viewport) {
        let cell_w = (viewport.width - 2.0 * MARGIN_X) / GRID as f32;
        let cell_h = (viewport.height - 2.0 * MARGIN_Y) / GRID as f32;
        let max_offset = cell_w.min(cell_h).max(0.0) * MAX_OFFSET_RATIO;

        let count = self.rng.random_range(MIN_BUTTONS..=MAX_BUTTONS);
        let mut cells: Vec<usize> = (0..GRID * GRID).collect();
        cells.shuffle(&mut self.rng);

        self.buttons = cells
            .into_iter()
            .take(count)
            .map(|cell| {
                let (col, row) = (cell % GRID, cell / GRID);
                let center = Vec2::new(
                    MARGIN_X + (col as f32 + 0.5) * cell_w,
                    MARGIN_Y + (row as f32 + 0.5) * cell_h,
                );
                let jitter = Vec2::new(
                    random_between(&mut self.rng, -max_offset, max_offset),
                    random_between(&mut self.rng, -max_offset, max_offset),
                );
                Button {
                    pos: center + jitter,
                    size: BASE_SIZE + random_between(&mut self.rng, -SIZE_VARIATION / 2.0, SIZE_VARIATION),
                    popped: false,
                }
            })
            .collect();
    }
}

impl MiniGame for BackPopper {
    fn reset(&mut self, viewport: Viewport) {
        self.completed = false;
        self.layout(viewport);
        log::debug!("BackPopper: {} buttons", self.buttons.len());
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let background = frame.assets.image("back_popper.background");
        let back = frame.assets.image("back_popper.back");
        let button = frame.assets.image("back_popper.button");
        let popped = frame.assets.image("back_popper.button_popped");

        {
            let mut s = frame.scope();
            let (w, h) = (s.width(), s.height());
            match background {
                Some(img) => s.image(&img, 0.0, 0.0, w, h),
                None => s.background(Color::rgb(200, 200, 220)),
            }

            // Back covers the screen, cropped to keep its ratio
            if let Some(back) = back {
                let img_ratio = back.width as f32 / back.height.max(1) as f32;
                let (dw, dh) = if img_ratio > w / h {
                    (h * img_ratio, h)
                } else {
                    (w, w / img_ratio)
                };
                s.image(&back, (w - dw) / 2.0, (h - dh) / 2.0, dw, dh);
            }

            for b in &self.buttons {
                let img = if b.popped { popped } else { button };
                match img {
                    Some(img) => s.image_centered(&img, b.pos.x, b.pos.y, b.size, b.size),
                    None => {
                        s.fill(Color::rgb(if b.popped { 255 } else { 200 }, 50, 50));
                        s.circle(b.pos.x, b.pos.y, b.size);
                    }
                }
                if self.debug {
                    s.fill(Color::rgb(255, 0, 255));
                    s.text_size(10.0);
                    s.text(&format!("{:.0}", b.size), b.pos.x + b.size / 2.0, b.pos.y);
                }
            }
        }

        if !self.buttons.is_empty() && self.buttons.iter().all(|b| b.popped) {
            self.completed = true;
        }

        draw_instructions(frame.surface, colors::BLACK, "POP ALL THE PIMPLES!", None);

        if self.completed {
            draw_result_strip(frame.surface, "SQUEAKY CLEAN!", colors::SUCCESS);
        }
    }

    fn mouse_pressed(&mut self, pointer: Vec2) {
        if self.completed {
            return;
        }
        // One pop per click
        if let Some(b) = self
            .buttons
            .iter_mut()
            .find(|b| !b.popped && pointer.distance(b.pos) < b.size / 2.0)
        {
            b.popped = true;
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

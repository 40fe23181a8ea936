//! Top-level state machine
//!
//! The host calls `setup` once, then `advance_frame` at 60 Hz and the input
//! entry points between frames. Every call is synchronous and infallible;
//! input that the current mode has no use for is dropped.

use glam::Vec2;

use super::debug_menu::{DebugItem, DebugMenu};
use super::layout::{Layout, PauseAction};
use super::state::{DebugResult, Mode, SessionState};
use crate::assets::AssetRef;
use crate::error::SetupError;
use crate::minigame::{self, Frame, GameEntry, MiniGame};
use crate::platform::{DrawScope, KeyCode, Viewport, colors};
use crate::settings::Settings;
use crate::ui;
use crate::ui::hud::HudInfo;

#[derive(Debug)]
pub struct Orchestrator {
    games: Vec<GameEntry>,
    settings: Settings,
    state: SessionState,
    debug_menu: DebugMenu,
    layout: Layout,
    is_setup: bool,
    warned_before_setup: bool,
    /// The frozen frame under the pause overlay has been dimmed
    pause_dimmed: bool,
}

impl Orchestrator {
    /// Build from a fixed lineup; the list must be non-empty with unique names
    pub fn new(games: Vec<GameEntry>, settings: Settings) -> Result<Self, SetupError> {
        settings.validate()?;
        if games.is_empty() {
            return Err(SetupError::NoGames);
        }
        for (i, entry) in games.iter().enumerate() {
            if games[i + 1..].iter().any(|other| other.name == entry.name) {
                return Err(SetupError::DuplicateName(entry.name));
            }
        }

        let debug_menu = DebugMenu::new(games.len(), settings.debug_visible_items);
        log::info!(
            "Orchestrator created with {} mini-games (debug {})",
            games.len(),
            if settings.debug_enabled { "on" } else { "off" }
        );

        Ok(Self {
            state: SessionState::new(&settings),
            games,
            settings,
            debug_menu,
            layout: Layout::default(),
            is_setup: false,
            warned_before_setup: false,
            pause_dimmed: false,
        })
    }

    /// One-time initialization of every mini-game; must precede the first frame
    pub fn setup(&mut self, viewport: Viewport) {
        if self.is_setup {
            log::warn!("setup() called more than once; ignoring");
            return;
        }
        self.layout = Layout::new(viewport);
        for entry in &mut self.games {
            entry.game.set_round_frames(self.settings.round_frames);
            entry.game.setup(viewport);
        }
        self.is_setup = true;
        log::info!("Setup complete at {}x{}", viewport.width, viewport.height);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn debug_menu(&self) -> &DebugMenu {
        &self.debug_menu
    }

    pub fn game_names(&self) -> Vec<&'static str> {
        self.games.iter().map(|g| g.name).collect()
    }

    pub fn active_game_name(&self) -> &'static str {
        self.games[self.state.active_game_index].name
    }

    /// Images any registered mini-game may ask for
    pub fn asset_manifest(&self) -> Vec<AssetRef> {
        minigame::asset_manifest(&self.games)
    }

    // === Frame ===

    /// Update and render the current mode
    pub fn advance_frame(&mut self, frame: &mut Frame<'_>) {
        if !self.is_setup {
            if !self.warned_before_setup {
                log::warn!("advance_frame() before setup(); skipping");
                self.warned_before_setup = true;
            }
            return;
        }

        // Canvas may have been resized since the last frame
        let viewport = frame.viewport();
        if viewport != self.layout.viewport {
            // A resize clears the canvas, so the paused frame needs dimming again
            self.pause_dimmed = false;
            self.layout = Layout::new(viewport);
        }

        match self.state.mode {
            Mode::Menu => ui::menu::draw(frame.surface, &self.layout, self.settings.debug_enabled),
            Mode::Playing => self.frame_playing(frame),
            Mode::GameOver => ui::game_over::draw(frame.surface, &self.layout, self.state.score),
            Mode::DebugMenu => self.frame_debug_menu(frame),
            Mode::DebugGame => self.frame_debug_game(frame),
            Mode::Paused => self.frame_paused(frame),
        }
    }

    fn frame_playing(&mut self, frame: &mut Frame<'_>) {
        if self.state.is_transitioning {
            ui::transition::draw(frame.surface, self.state.transition_frames_remaining);
            self.state.transition_frames_remaining = self.state.transition_frames_remaining.saturating_sub(1);
            if self.state.transition_frames_remaining == 0 {
                self.next_round();
            }
            return;
        }

        let timed_out = self.state.tick_round_timer();
        self.draw_active_game(frame);
        if self.settings.show_hud {
            let info = HudInfo {
                round_timer: self.state.round_timer,
                score: self.state.score,
                lives: self.state.lives,
            };
            ui::hud::draw(frame.surface, &self.layout, info);
        } else {
            ui::hud::draw_pause_button(frame.surface, &self.layout);
        }

        let entry = &self.games[self.state.active_game_index];
        // Completion wins over failure reported in the same frame
        if entry.game.is_completed() {
            self.state.score += 1;
            log::debug!("{} completed, score {}", entry.name, self.state.score);
            self.state.begin_transition(self.settings.transition_frames);
        } else if entry.game.has_failed() || timed_out {
            log::debug!(
                "{} {}, {} lives left",
                entry.name,
                if timed_out { "timed out" } else { "failed" },
                self.state.lives.saturating_sub(1)
            );
            if self.state.lose_life() {
                self.state.mode = Mode::GameOver;
                log::info!("Game over with score {}", self.state.score);
            } else {
                self.state.begin_transition(self.settings.transition_frames);
            }
        }
    }

    fn next_round(&mut self) {
        self.state.active_game_index = (self.state.active_game_index + 1) % self.games.len();
        self.state.round_timer = self.settings.round_frames;
        self.state.is_transitioning = false;
        self.state.transition_frames_remaining = 0;
        let viewport = self.layout.viewport;
        self.active_game_mut().reset(viewport);
        log::debug!("Next round: {}", self.active_game_name());
    }

    fn frame_debug_menu(&mut self, frame: &mut Frame<'_>) {
        self.state.debug_scroll_offset = self.debug_menu.clamp(self.state.debug_scroll_offset);
        let names = self.game_names();
        ui::debug_menu::draw(
            frame.surface,
            &self.layout,
            &self.debug_menu,
            self.state.debug_scroll_offset,
            &names,
        );
    }

    fn frame_debug_game(&mut self, frame: &mut Frame<'_>) {
        let name = self.active_game_name();

        if let Some(mut result) = self.state.debug_result {
            ui::banner::draw(frame.surface, result.success, name);
            result.frames_remaining = result.frames_remaining.saturating_sub(1);
            if result.frames_remaining == 0 {
                self.state.debug_result = None;
                self.restart_debug_game();
            } else {
                self.state.debug_result = Some(result);
            }
            return;
        }

        let timed_out = self.state.tick_round_timer();
        self.draw_active_game(frame);
        if self.settings.show_hud {
            ui::hud::draw_debug(frame.surface, &self.layout, name, self.state.round_timer);
        } else {
            ui::hud::draw_pause_button(frame.surface, &self.layout);
        }

        let game = &self.games[self.state.active_game_index].game;
        let success = if game.is_completed() {
            Some(true)
        } else if game.has_failed() || timed_out {
            Some(false)
        } else {
            None
        };
        if let Some(success) = success {
            log::info!("[debug] {} {}", name, if success { "succeeded" } else { "failed" });
            self.state.debug_result = Some(DebugResult {
                success,
                frames_remaining: self.settings.debug_result_frames,
            });
        }
    }

    fn frame_paused(&mut self, frame: &mut Frame<'_>) {
        let from_debug = self.state.previous_mode == Some(Mode::DebugGame);
        ui::pause::draw(frame.surface, &self.layout, !self.pause_dimmed, from_debug);
        self.pause_dimmed = true;
    }

    /// Play background plus one frame of the active mini-game, inside its own scope
    fn draw_active_game(&mut self, frame: &mut Frame<'_>) {
        let (input, assets) = (frame.input, frame.assets);
        let mut scope = DrawScope::new(&mut *frame.surface);
        scope.background(colors::PLAY_BG);
        let mut game_frame = Frame::new(&mut *scope, input, assets);
        self.games[self.state.active_game_index].game.draw(&mut game_frame);
    }

    // === Input ===

    /// Pointer press at canvas coordinates
    pub fn on_pointer_press(&mut self, x: f32, y: f32) {
        if !self.is_setup {
            return;
        }
        let p = Vec2::new(x, y);
        match self.state.mode {
            Mode::Menu => {
                if self.layout.play_button().contains(p) {
                    self.start_session();
                } else if self.settings.debug_enabled && self.layout.debug_button().contains(p) {
                    self.open_debug_menu();
                }
            }
            Mode::Playing | Mode::DebugGame => {
                if self.input_suppressed() {
                    return;
                }
                if self.layout.pause_button().contains(p) {
                    self.pause();
                } else {
                    self.active_game_mut().mouse_pressed(p);
                }
            }
            Mode::Paused => {
                let from_debug = self.state.previous_mode == Some(Mode::DebugGame);
                let action = self
                    .layout
                    .pause_buttons(from_debug)
                    .into_iter()
                    .find(|(_, rect)| rect.contains(p))
                    .map(|(action, _)| action);
                match action {
                    Some(PauseAction::Resume) => self.resume(),
                    Some(PauseAction::MainMenu) => self.go_to_menu(),
                    Some(PauseAction::DebugMenu) => self.open_debug_menu(),
                    None => {}
                }
            }
            Mode::DebugMenu => {
                let visible = self.debug_menu.visible_items();
                if self.layout.debug_scroll_up().contains(p) {
                    self.scroll_debug(-1);
                } else if self.layout.debug_scroll_down(visible).contains(p) {
                    self.scroll_debug(1);
                } else if let Some(slot) = self.layout.debug_slot_at(p, visible) {
                    match self.debug_menu.item_in_slot(self.state.debug_scroll_offset, slot) {
                        Some(DebugItem::Game(i)) => self.enter_debug_game(i),
                        Some(DebugItem::Back) => self.go_to_menu(),
                        None => {}
                    }
                }
            }
            Mode::GameOver => {
                if self.layout.replay_button().contains(p) {
                    self.start_session();
                }
            }
        }
    }

    /// Key-down event
    pub fn on_key_press(&mut self, key: KeyCode) {
        if !self.is_setup {
            return;
        }
        match self.state.mode {
            Mode::Menu => {
                if key == KeyCode::ENTER {
                    self.start_session();
                } else if key == KeyCode::D && self.settings.debug_enabled {
                    self.open_debug_menu();
                }
            }
            Mode::Playing | Mode::DebugGame => {
                if self.input_suppressed() {
                    return;
                }
                if key == KeyCode::ESCAPE {
                    self.pause();
                } else {
                    self.active_game_mut().key_pressed(key);
                }
            }
            Mode::Paused => {
                if key == KeyCode::ESCAPE {
                    self.resume();
                }
            }
            Mode::DebugMenu => match key {
                KeyCode::UP => self.scroll_debug(-1),
                KeyCode::DOWN => self.scroll_debug(1),
                KeyCode::ESCAPE => self.go_to_menu(),
                _ => {}
            },
            Mode::GameOver => {
                if key == KeyCode::ENTER {
                    self.start_session();
                }
            }
        }
    }

    /// Wheel event; true if the host should suppress page scrolling
    pub fn on_scroll(&mut self, delta: f32) -> bool {
        if !self.is_setup || self.state.mode != Mode::DebugMenu {
            return false;
        }
        if delta > 0.0 {
            self.scroll_debug(1);
        } else if delta < 0.0 {
            self.scroll_debug(-1);
        }
        true
    }

    /// Window lost focus; pauses wherever the player could pause by hand
    pub fn on_focus_lost(&mut self) {
        if !self.is_setup || self.input_suppressed() || !self.state.mode.is_pausable() {
            return;
        }
        log::info!("Auto-pausing (focus lost)");
        self.pause();
    }

    // === Transitions ===

    fn active_game_mut(&mut self) -> &mut dyn MiniGame {
        self.games[self.state.active_game_index].game.as_mut()
    }

    /// Transition interstitial and debug banner swallow all input
    fn input_suppressed(&self) -> bool {
        self.state.is_transitioning || self.state.debug_result.is_some()
    }

    fn start_session(&mut self) {
        for entry in &mut self.games {
            entry.game.set_debug_mode(false);
        }
        self.state.start_session(&self.settings);
        let viewport = self.layout.viewport;
        self.active_game_mut().reset(viewport);
        log::info!("Session started with {}", self.active_game_name());
    }

    fn pause(&mut self) {
        if !self.state.mode.is_pausable() {
            return;
        }
        self.state.pause();
        self.pause_dimmed = false;
        log::info!("Paused from {:?}", self.state.previous_mode);
    }

    fn resume(&mut self) {
        self.state.resume();
        log::info!("Resumed {:?}", self.state.mode);
    }

    fn go_to_menu(&mut self) {
        self.state.mode = Mode::Menu;
        self.state.debug_result = None;
        self.state.is_transitioning = false;
        log::info!("Back to main menu");
    }

    fn open_debug_menu(&mut self) {
        self.state.mode = Mode::DebugMenu;
        self.state.debug_result = None;
        self.state.debug_scroll_offset = self.debug_menu.clamp(self.state.debug_scroll_offset);
        log::info!("Debug menu opened");
    }

    fn scroll_debug(&mut self, delta: i32) {
        self.state.debug_scroll_offset = self.debug_menu.scroll(self.state.debug_scroll_offset, delta);
    }

    fn enter_debug_game(&mut self, index: usize) {
        self.state.mode = Mode::DebugGame;
        self.state.active_game_index = index;
        self.state.is_transitioning = false;
        self.state.debug_result = None;
        self.active_game_mut().set_debug_mode(true);
        self.restart_debug_game();
        log::info!("[debug] Running {}", self.active_game_name());
    }

    fn restart_debug_game(&mut self) {
        self.state.round_timer = self.settings.round_frames;
        let viewport = self.layout.viewport;
        self.active_game_mut().reset(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::assets::AssetStore;
    use crate::platform::{DrawCall, InputState, RecordingSurface};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Knobs and counters shared between a test and its scripted game
    #[derive(Debug, Default)]
    struct Probe {
        complete: bool,
        fail: bool,
        resets: u32,
        draws: u32,
        clicks: u32,
        keys: Vec<KeyCode>,
        debug: bool,
        round_frames: Option<u32>,
    }

    struct Scripted(Rc<RefCell<Probe>>);

    impl MiniGame for Scripted {
        fn reset(&mut self, _viewport: Viewport) {
            let mut p = self.0.borrow_mut();
            p.complete = false;
            p.fail = false;
            p.resets += 1;
        }

        fn draw(&mut self, frame: &mut Frame<'_>) {
            self.0.borrow_mut().draws += 1;
            let mut s = frame.scope();
            s.fill(colors::BLACK);
            s.rect(0.0, 0.0, 10.0, 10.0, 0.0);
        }

        fn mouse_pressed(&mut self, _pointer: Vec2) {
            self.0.borrow_mut().clicks += 1;
        }

        fn key_pressed(&mut self, key: KeyCode) {
            self.0.borrow_mut().keys.push(key);
        }

        fn is_completed(&self) -> bool {
            self.0.borrow().complete
        }

        fn has_failed(&self) -> bool {
            self.0.borrow().fail
        }

        fn set_debug_mode(&mut self, debug: bool) {
            self.0.borrow_mut().debug = debug;
        }

        fn set_round_frames(&mut self, frames: u32) {
            self.0.borrow_mut().round_frames = Some(frames);
        }
    }

    const NAMES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

    struct Rig {
        orch: Orchestrator,
        probes: Vec<Rc<RefCell<Probe>>>,
        surface: RecordingSurface,
        input: InputState,
        assets: AssetStore,
    }

    impl Rig {
        fn new(count: usize, settings: Settings) -> Self {
            let probes: Vec<_> = (0..count).map(|_| Rc::new(RefCell::new(Probe::default()))).collect();
            let games = probes
                .iter()
                .zip(NAMES)
                .map(|(p, name)| GameEntry::new(name, Scripted(p.clone())))
                .collect();
            let mut orch = Orchestrator::new(games, settings).unwrap();
            orch.setup(Viewport::default());
            Self {
                orch,
                probes,
                surface: RecordingSurface::new(400.0, 400.0),
                input: InputState::new(),
                assets: AssetStore::new(),
            }
        }

        fn frame(&mut self) {
            let mut frame = Frame::new(&mut self.surface, &self.input, &self.assets);
            self.orch.advance_frame(&mut frame);
        }

        fn frames(&mut self, n: u32) {
            for _ in 0..n {
                self.frame();
            }
        }

        fn click(&mut self, rect: Rect) {
            let c = rect.center();
            self.orch.on_pointer_press(c.x, c.y);
        }

        fn probe(&self, i: usize) -> std::cell::RefMut<'_, Probe> {
            self.probes[i].borrow_mut()
        }

        fn state(&self) -> &SessionState {
            self.orch.state()
        }

        fn start(&mut self) {
            let play = self.orch.layout().play_button();
            self.click(play);
            assert_eq!(self.orch.mode(), Mode::Playing);
        }

        fn debug_row_for(&mut self, index: usize) -> Rect {
            // Scroll until the row is on screen
            while index >= self.orch.debug_menu().visible_range(self.state().debug_scroll_offset).end {
                self.orch.on_key_press(KeyCode::DOWN);
            }
            let slot = index - self.state().debug_scroll_offset;
            self.orch.layout().debug_row(slot)
        }
    }

    fn scripted(name: &'static str) -> GameEntry {
        GameEntry::new(name, Scripted(Rc::default()))
    }

    #[test]
    fn test_rejects_empty_lineup() {
        let err = Orchestrator::new(Vec::new(), Settings::default()).unwrap_err();
        assert!(matches!(err, SetupError::NoGames));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Orchestrator::new(vec![scripted("A"), scripted("B"), scripted("A")], Settings::default())
            .unwrap_err();
        assert!(matches!(err, SetupError::DuplicateName("A")));
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings {
            starting_lives: 0,
            ..Settings::default()
        };
        let err = Orchestrator::new(vec![scripted("A")], settings).unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }

    #[test]
    fn test_frame_before_setup_is_ignored() {
        let mut orch = Orchestrator::new(vec![scripted("A")], Settings::default()).unwrap();
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let (input, assets) = (InputState::new(), AssetStore::new());
        orch.advance_frame(&mut Frame::new(&mut surface, &input, &assets));
        orch.on_key_press(KeyCode::ENTER);
        assert!(surface.calls().is_empty());
        assert_eq!(orch.mode(), Mode::Menu);
    }

    #[test]
    fn test_start_session_resets_first_game() {
        let mut rig = Rig::new(3, Settings::default());
        let resets_after_setup = rig.probe(0).resets;
        rig.start();
        let s = rig.state();
        assert_eq!((s.active_game_index, s.lives, s.score, s.round_timer), (0, 3, 0, 180));
        assert_eq!(rig.probe(0).resets, resets_after_setup + 1);
        assert!(!rig.probe(0).debug);
    }

    #[test]
    fn test_completion_scenario() {
        let mut rig = Rig::new(3, Settings::default());
        rig.start();
        rig.frames(49);
        assert_eq!(rig.state().round_timer, 131);

        rig.probe(0).complete = true;
        rig.frame();
        assert_eq!(rig.state().score, 1);
        assert!(rig.state().is_transitioning);
        assert_eq!(rig.state().transition_frames_remaining, 30);

        let draws = rig.probe(0).draws;
        rig.frames(29);
        assert!(rig.state().is_transitioning);
        assert_eq!(rig.state().active_game_index, 0);
        // Interstitial never runs the game
        assert_eq!(rig.probe(0).draws, draws);

        let resets_b = rig.probe(1).resets;
        rig.frame();
        let s = rig.state();
        assert_eq!(s.active_game_index, 1);
        assert_eq!(s.round_timer, 180);
        assert!(!s.is_transitioning);
        assert_eq!(rig.probe(1).resets, resets_b + 1);
    }

    #[test]
    fn test_timeout_on_last_life_ends_session() {
        let settings = Settings {
            starting_lives: 1,
            ..Settings::default()
        };
        let mut rig = Rig::new(3, settings);
        rig.start();
        rig.frames(179);
        assert_eq!(rig.orch.mode(), Mode::Playing);
        assert_eq!(rig.state().round_timer, 1);
        rig.frame();
        assert_eq!(rig.state().lives, 0);
        assert_eq!(rig.orch.mode(), Mode::GameOver);
        assert!(!rig.state().is_transitioning);
    }

    #[test]
    fn test_failure_costs_a_life_and_moves_on() {
        let mut rig = Rig::new(3, Settings::default());
        rig.start();
        rig.probe(0).fail = true;
        rig.frame();
        assert_eq!(rig.state().lives, 2);
        assert_eq!(rig.state().score, 0);
        assert!(rig.state().is_transitioning);
        rig.frames(30);
        assert_eq!(rig.state().active_game_index, 1);
    }

    #[test]
    fn test_completion_beats_failure_same_frame() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        {
            let mut p = rig.probe(0);
            p.complete = true;
            p.fail = true;
        }
        rig.frame();
        assert_eq!(rig.state().score, 1);
        assert_eq!(rig.state().lives, 3);
    }

    #[test]
    fn test_failure_and_timeout_cost_one_life() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        rig.frames(179);
        rig.probe(0).fail = true;
        rig.frame();
        assert_eq!(rig.state().lives, 2);
    }

    #[test]
    fn test_index_wraps_after_last_game() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        for expected in [1, 0, 1] {
            let idx = rig.state().active_game_index;
            rig.probe(idx).complete = true;
            rig.frames(31);
            assert_eq!(rig.state().active_game_index, expected);
        }
        assert_eq!(rig.state().score, 3);
    }

    #[test]
    fn test_pause_and_resume_freezes_round() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        rig.frames(10);
        let (timer, draws) = (rig.state().round_timer, rig.probe(0).draws);

        rig.orch.on_key_press(KeyCode::ESCAPE);
        assert_eq!(rig.orch.mode(), Mode::Paused);
        assert_eq!(rig.state().previous_mode, Some(Mode::Playing));
        rig.frames(50);
        assert_eq!(rig.state().round_timer, timer);
        assert_eq!(rig.probe(0).draws, draws);
        // Input does not reach the frozen game
        rig.orch.on_key_press(KeyCode::SPACE);
        assert!(rig.probe(0).keys.is_empty());

        rig.orch.on_key_press(KeyCode::ESCAPE);
        assert_eq!(rig.orch.mode(), Mode::Playing);
        rig.frame();
        assert_eq!(rig.state().round_timer, timer - 1);
    }

    #[test]
    fn test_focus_loss_pauses_only_live_play() {
        let mut rig = Rig::new(2, Settings::default());
        rig.orch.on_focus_lost();
        assert_eq!(rig.orch.mode(), Mode::Menu);

        rig.start();
        rig.frame();
        rig.orch.on_focus_lost();
        assert_eq!(rig.orch.mode(), Mode::Paused);
        // A second blur while paused keeps the original origin
        rig.orch.on_focus_lost();
        assert_eq!(rig.state().previous_mode, Some(Mode::Playing));
    }

    #[test]
    fn test_pause_button_and_overlay() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        rig.frame();
        let pause = rig.orch.layout().pause_button();
        rig.click(pause);
        assert_eq!(rig.orch.mode(), Mode::Paused);
        // The pause click was not forwarded
        assert_eq!(rig.probe(0).clicks, 0);

        rig.surface.clear();
        rig.frames(3);
        let dims = rig
            .surface
            .count(|c| matches!(c, DrawCall::Rect { fill, .. } if *fill == colors::DIM));
        assert_eq!(dims, 1);
        assert!(!rig.surface.has_text("DEBUG MENU"));

        let buttons = rig.orch.layout().pause_buttons(false);
        rig.click(buttons[1].1);
        assert_eq!(rig.orch.mode(), Mode::Menu);
    }

    #[test]
    fn test_no_pause_during_transition() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        rig.probe(0).complete = true;
        rig.frame();
        rig.orch.on_key_press(KeyCode::ESCAPE);
        let pause = rig.orch.layout().pause_button();
        rig.click(pause);
        assert_eq!(rig.orch.mode(), Mode::Playing);
    }

    #[test]
    fn test_input_forwarded_to_active_game() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        rig.orch.on_pointer_press(200.0, 200.0);
        rig.orch.on_key_press(KeyCode::SPACE);
        assert_eq!(rig.probe(0).clicks, 1);
        assert_eq!(rig.probe(0).keys, vec![KeyCode::SPACE]);

        // Nothing reaches a game during the interstitial
        rig.probe(0).complete = true;
        rig.frame();
        rig.orch.on_pointer_press(200.0, 200.0);
        rig.orch.on_key_press(KeyCode::SPACE);
        assert_eq!(rig.probe(0).clicks, 1);
        assert_eq!(rig.probe(1).clicks, 0);
        assert!(rig.probe(1).keys.is_empty());
    }

    #[test]
    fn test_replay_from_game_over() {
        let settings = Settings {
            starting_lives: 1,
            ..Settings::default()
        };
        let mut rig = Rig::new(3, settings);
        rig.start();
        rig.probe(0).complete = true;
        rig.frames(31);
        rig.probe(1).fail = true;
        rig.frame();
        assert_eq!(rig.orch.mode(), Mode::GameOver);
        rig.frame();
        assert!(rig.surface.has_text("Final score: 1"));

        let replay = rig.orch.layout().replay_button();
        rig.click(replay);
        let s = rig.state();
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!((s.score, s.lives, s.active_game_index, s.round_timer), (0, 1, 0, 180));
    }

    #[test]
    fn test_keyboard_shortcuts_from_menu() {
        let mut rig = Rig::new(2, Settings::default());
        rig.orch.on_key_press(KeyCode::D);
        assert_eq!(rig.orch.mode(), Mode::Menu);
        rig.orch.on_key_press(KeyCode::ENTER);
        assert_eq!(rig.orch.mode(), Mode::Playing);

        let mut rig = Rig::new(2, Settings::debug());
        rig.orch.on_key_press(KeyCode::D);
        assert_eq!(rig.orch.mode(), Mode::DebugMenu);
        rig.orch.on_key_press(KeyCode::ESCAPE);
        assert_eq!(rig.orch.mode(), Mode::Menu);
    }

    #[test]
    fn test_debug_button_needs_debug_enabled() {
        let mut rig = Rig::new(2, Settings::default());
        let debug = rig.orch.layout().debug_button();
        rig.click(debug);
        assert_eq!(rig.orch.mode(), Mode::Menu);

        let mut rig = Rig::new(2, Settings::debug());
        let debug = rig.orch.layout().debug_button();
        rig.click(debug);
        assert_eq!(rig.orch.mode(), Mode::DebugMenu);
    }

    #[test]
    fn test_debug_menu_scroll_clamps() {
        let mut rig = Rig::new(6, Settings::debug());
        assert!(!rig.orch.on_scroll(1.0));
        rig.orch.on_key_press(KeyCode::D);

        for _ in 0..10 {
            assert!(rig.orch.on_scroll(3.5));
        }
        assert_eq!(rig.state().debug_scroll_offset, 2);
        rig.orch.on_key_press(KeyCode::DOWN);
        assert_eq!(rig.state().debug_scroll_offset, 2);

        let up = rig.orch.layout().debug_scroll_up();
        rig.click(up);
        assert_eq!(rig.state().debug_scroll_offset, 1);
        assert!(rig.orch.on_scroll(0.0));
        assert_eq!(rig.state().debug_scroll_offset, 1);
        for _ in 0..5 {
            rig.orch.on_scroll(-1.0);
        }
        assert_eq!(rig.state().debug_scroll_offset, 0);
    }

    #[test]
    fn test_debug_back_row_returns_to_menu() {
        let mut rig = Rig::new(6, Settings::debug());
        rig.orch.on_key_press(KeyCode::D);
        let back = rig.debug_row_for(6);
        rig.frame();
        assert!(rig.surface.has_text("BACK TO MENU"));
        rig.click(back);
        assert_eq!(rig.orch.mode(), Mode::Menu);
    }

    #[test]
    fn test_debug_game_banner_then_restart() {
        let mut rig = Rig::new(6, Settings::debug());
        rig.orch.on_key_press(KeyCode::D);
        let row = rig.debug_row_for(5);
        let resets = rig.probe(5).resets;
        rig.click(row);

        let s = rig.state();
        assert_eq!(s.mode, Mode::DebugGame);
        assert_eq!(s.active_game_index, 5);
        assert_eq!(s.round_timer, 180);
        assert!(rig.probe(5).debug);
        assert_eq!(rig.probe(5).resets, resets + 1);

        rig.frames(5);
        rig.probe(5).complete = true;
        rig.frame();
        assert_eq!(rig.state().debug_result.map(|r| r.success), Some(true));
        assert_eq!((rig.state().score, rig.state().lives), (0, 3));

        // Banner blocks pausing and game input
        rig.orch.on_key_press(KeyCode::ESCAPE);
        assert_eq!(rig.orch.mode(), Mode::DebugGame);

        rig.frames(59);
        assert!(rig.state().debug_result.is_some());
        assert!(rig.surface.has_text("SUCCESS"));
        rig.frame();
        assert!(rig.state().debug_result.is_none());
        assert_eq!(rig.probe(5).resets, resets + 2);
        assert_eq!(rig.state().round_timer, 180);
        assert_eq!(rig.state().active_game_index, 5);
    }

    #[test]
    fn test_debug_timeout_reports_failure() {
        let mut rig = Rig::new(2, Settings::debug());
        rig.orch.on_key_press(KeyCode::D);
        let row = rig.debug_row_for(0);
        rig.click(row);
        rig.frames(180);
        assert_eq!(rig.state().debug_result.map(|r| r.success), Some(false));
        assert_eq!(rig.state().lives, 3);
    }

    #[test]
    fn test_pause_from_debug_game_to_debug_menu() {
        let mut rig = Rig::new(3, Settings::debug());
        rig.orch.on_key_press(KeyCode::D);
        let row = rig.debug_row_for(1);
        rig.click(row);
        rig.frame();

        let pause = rig.orch.layout().pause_button();
        rig.click(pause);
        assert_eq!(rig.orch.mode(), Mode::Paused);
        assert_eq!(rig.state().previous_mode, Some(Mode::DebugGame));
        rig.frame();
        assert!(rig.surface.has_text("DEBUG MENU"));

        let buttons = rig.orch.layout().pause_buttons(true);
        assert_eq!(buttons[2].0, PauseAction::DebugMenu);
        rig.click(buttons[2].1);
        assert_eq!(rig.orch.mode(), Mode::DebugMenu);
    }

    #[test]
    fn test_playing_clears_debug_flag() {
        let mut rig = Rig::new(2, Settings::debug());
        rig.orch.on_key_press(KeyCode::D);
        let row = rig.debug_row_for(0);
        rig.click(row);
        assert!(rig.probe(0).debug);
        rig.orch.on_key_press(KeyCode::ESCAPE);
        let buttons = rig.orch.layout().pause_buttons(true);
        rig.click(buttons[1].1);
        rig.orch.on_key_press(KeyCode::ENTER);
        assert!(!rig.probe(0).debug);
    }

    #[test]
    fn test_layout_follows_surface_size() {
        let mut rig = Rig::new(1, Settings::default());
        rig.surface.resize(800.0, 600.0);
        rig.frame();
        assert_eq!(rig.orch.layout().play_button().center().x, 400.0);
        rig.orch.on_pointer_press(400.0, 600.0 / 2.0 + 60.0);
        assert_eq!(rig.orch.mode(), Mode::Playing);
    }

    #[test]
    fn test_setup_hands_round_budget_to_games() {
        let settings = Settings {
            round_frames: 90,
            ..Settings::default()
        };
        let rig = Rig::new(2, settings);
        assert_eq!(rig.probe(0).round_frames, Some(90));
        assert_eq!(rig.probe(1).round_frames, Some(90));
    }

    #[test]
    fn test_resize_while_paused_dims_again() {
        let mut rig = Rig::new(2, Settings::default());
        rig.start();
        rig.frame();
        rig.orch.on_key_press(KeyCode::ESCAPE);
        rig.frames(3);

        rig.surface.resize(600.0, 500.0);
        rig.surface.clear();
        rig.frames(3);
        let dims = rig
            .surface
            .count(|c| matches!(c, DrawCall::Rect { fill, .. } if *fill == colors::DIM));
        assert_eq!(dims, 1);
        assert_eq!(rig.orch.layout().viewport, Viewport::new(600.0, 500.0));
    }

    #[test]
    fn test_hud_can_be_hidden() {
        let settings = Settings {
            show_hud: false,
            ..Settings::default()
        };
        let mut rig = Rig::new(1, settings);
        rig.start();
        rig.frame();
        assert!(!rig.surface.has_text("Score"));
        assert_eq!(rig.surface.depth(), 0);
    }

    #[derive(Debug, Clone, Copy)]
    enum Event {
        Idle,
        Complete,
        Fail,
    }

    fn event() -> impl Strategy<Value = Event> {
        prop_oneof![
            6 => Just(Event::Idle),
            1 => Just(Event::Complete),
            1 => Just(Event::Fail),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_session_invariants(
            count in 1usize..6,
            events in prop::collection::vec(event(), 1..600),
        ) {
            let settings = Settings { round_frames: 40, ..Settings::default() };
            let mut rig = Rig::new(count, settings);
            rig.start();
            let mut rounds = 0usize;

            for ev in events {
                if rig.orch.mode() == Mode::GameOver {
                    break;
                }
                let before = rig.state().clone();
                let idx = before.active_game_index;
                match ev {
                    Event::Idle => {}
                    Event::Complete => rig.probe(idx).complete = true,
                    Event::Fail => rig.probe(idx).fail = true,
                }
                rig.frame();
                let after = rig.state().clone();

                // Lives never grow; score moves by at most one, only on a completion
                prop_assert!(after.lives <= before.lives);
                prop_assert!(after.score == before.score || after.score == before.score + 1);
                if after.score > before.score {
                    prop_assert!(matches!(ev, Event::Complete) && !before.is_transitioning);
                }
                prop_assert_eq!(after.mode == Mode::GameOver, after.lives == 0);

                if !before.is_transitioning && (after.score > before.score || after.lives < before.lives) {
                    rounds += 1;
                }

                if !before.is_transitioning && !after.is_transitioning && after.mode == Mode::Playing {
                    prop_assert_eq!(after.round_timer, before.round_timer - 1);
                }
                if before.is_transitioning && !after.is_transitioning {
                    prop_assert_eq!(after.round_timer, 40);
                }
                if !after.is_transitioning && after.mode == Mode::Playing {
                    prop_assert_eq!(after.active_game_index, rounds % count);
                }
            }
        }

        #[test]
        fn prop_pause_resume_restores_mode(debug_origin in any::<bool>(), frames in 0u32..20) {
            let mut rig = Rig::new(3, Settings::debug());
            if debug_origin {
                rig.orch.on_key_press(KeyCode::D);
                let row = rig.debug_row_for(2);
                rig.click(row);
            } else {
                rig.start();
            }
            rig.frames(frames);
            let origin = rig.orch.mode();
            let before = rig.state().clone();

            rig.orch.on_key_press(KeyCode::ESCAPE);
            prop_assert_eq!(rig.orch.mode(), Mode::Paused);
            rig.frames(frames);
            rig.orch.on_key_press(KeyCode::ESCAPE);

            prop_assert_eq!(rig.orch.mode(), origin);
            prop_assert_eq!(rig.state().round_timer, before.round_timer);
            prop_assert_eq!(rig.state().active_game_index, before.active_game_index);
        }
    }
}

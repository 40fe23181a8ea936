//! Vibe-Ware entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

    use vibe_ware::assets::AssetStore;
    use vibe_ware::consts::*;
    use vibe_ware::minigame::{self, Frame};
    use vibe_ware::platform::canvas::{self, CanvasSurface};
    use vibe_ware::platform::{InputState, KeyCode, Surface};
    use vibe_ware::{Orchestrator, Settings};

    /// Game instance holding all state
    struct Game {
        orchestrator: Orchestrator,
        surface: CanvasSurface,
        input: InputState,
        assets: Rc<RefCell<AssetStore>>,
        accumulator: f64,
        last_time: f64,
    }

    impl Game {
        /// Run as many fixed 60 Hz frames as the elapsed time covers
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FRAME_MS
            };
            self.last_time = time;

            // Cap catch-up after a long stall (background tab)
            self.accumulator = (self.accumulator + dt).min(FRAME_MS * MAX_FRAMES_PER_TICK as f64);
            self.surface.sync_size();

            let assets = self.assets.borrow();
            while self.accumulator >= FRAME_MS {
                let mut frame = Frame::new(&mut self.surface, &self.input, &assets);
                self.orchestrator.advance_frame(&mut frame);
                self.accumulator -= FRAME_MS;
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Vibe-Ware starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut surface = CanvasSurface::new(canvas.clone()).expect("Failed to get 2d context");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Mini-game seed: {}", seed);

        let mut orchestrator = match Orchestrator::new(minigame::lineup(seed), settings) {
            Ok(orchestrator) => orchestrator,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };

        let assets = Rc::new(RefCell::new(AssetStore::new()));
        if let Err(e) = canvas::load_images(&orchestrator.asset_manifest(), &assets, &mut surface) {
            log::error!("Image loading failed, shapes only: {:?}", e);
        }

        orchestrator.setup(surface.viewport());

        let game = Rc::new(RefCell::new(Game {
            orchestrator,
            surface,
            input: InputState::new(),
            assets,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Vibe-Ware running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Pointer position, polled by mini-games every frame
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.set_pointer(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = (event.offset_x() as f32, event.offset_y() as f32);
                let mut g = game.borrow_mut();
                g.input.set_pointer(x, y);
                g.orchestrator.on_pointer_press(x, y);
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Wheel scrolls the debug list; the page only scrolls when the game ignores it
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                if game.borrow_mut().orchestrator.on_scroll(event.delta_y() as f32) {
                    event.prevent_default();
                }
            });
            let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = key_of(&event) else {
                    return;
                };
                if matches!(
                    key,
                    KeyCode::SPACE | KeyCode::UP | KeyCode::DOWN | KeyCode::LEFT | KeyCode::RIGHT
                ) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.input.key_down(key);
                if !event.repeat() {
                    g.orchestrator.on_key_press(key);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_of(&event) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Prefer the named key, fall back to the legacy keyCode
    fn key_of(event: &KeyboardEvent) -> Option<KeyCode> {
        KeyCode::from_key_name(&event.key()).or_else(|| match event.key_code() {
            0 => None,
            code => Some(KeyCode(code)),
        })
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Window blur (click outside, tab switch): held keys would otherwise stick
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            g.orchestrator.on_focus_lost();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Vibe-Ware (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    println!("\nRunning headless session...");
    if let Err(e) = headless_session() {
        log::error!("Headless session failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the real lineup through a scripted session on a recording surface
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() -> Result<(), Box<dyn std::error::Error>> {
    use vibe_ware::assets::AssetStore;
    use vibe_ware::minigame::{self, Frame};
    use vibe_ware::platform::{InputState, KeyCode, RecordingSurface, Surface};
    use vibe_ware::{Mode, Orchestrator, Settings};

    let settings = Settings {
        seed: Some(7),
        ..Settings::default()
    };
    let seed = settings.seed.unwrap_or_default();
    let mut orchestrator = Orchestrator::new(minigame::lineup(seed), settings)?;

    let mut surface = RecordingSurface::new(400.0, 400.0);
    let mut input = InputState::new();
    // No images natively: every mini-game draws its fallback shapes
    let assets = AssetStore::new();
    orchestrator.setup(surface.viewport());

    orchestrator.on_key_press(KeyCode::ENTER);
    let mut frames = 0u32;
    while orchestrator.mode() != Mode::GameOver && frames < 60 * 60 {
        // Poke at whatever is on screen: a click and a Space every half second
        if frames % 30 == 0 {
            orchestrator.on_pointer_press(200.0, 200.0);
            orchestrator.on_key_press(KeyCode::SPACE);
        }
        input.set_pointer(200.0, 200.0);
        surface.clear();
        let mut frame = Frame::new(&mut surface, &input, &assets);
        orchestrator.advance_frame(&mut frame);
        frames += 1;
    }

    let state = orchestrator.state();
    println!(
        "Session ended after {} frames: mode {:?}, score {}, lives {}",
        frames, state.mode, state.score, state.lives
    );
    println!("{}", serde_json::to_string_pretty(state)?);
    if state.mode != Mode::GameOver {
        log::warn!("Session still running after {} frames", frames);
    }

    // Every routine must leave the surface balanced
    if surface.depth() != 0 {
        return Err(format!("unbalanced save/restore depth {}", surface.depth()).into());
    }
    println!("✓ Headless session passed!");
    Ok(())
}

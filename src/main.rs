//! Brick Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use brick_runner::consts::*;
    use brick_runner::renderer::{RenderState, build_scene};
    use brick_runner::sim::{GameEvent, GamePhase, GameState, TickInput, Tuning, tick};
    use brick_runner::{HudSnapshot, Settings};

    /// LocalStorage key holding optional tuning overrides
    const TUNING_KEY: &str = "brick_runner_tuning";

    /// Keys currently held down
    #[derive(Debug, Default, Clone, Copy)]
    struct HeldKeys {
        left: bool,
        right: bool,
        up: bool,
        space: bool,
    }

    impl HeldKeys {
        /// Snapshot for one simulation tick
        fn to_input(self) -> TickInput {
            TickInput {
                left: self.left,
                right: self.right,
                jump: self.up || self.space,
            }
        }

        /// Returns true if the key is one the game handles
        fn set(&mut self, key: &str, down: bool) -> bool {
            match key {
                "ArrowLeft" | "a" | "A" => self.left = down,
                "ArrowRight" | "d" | "D" => self.right = down,
                "ArrowUp" | "w" | "W" => self.up = down,
                " " => self.space = down,
                _ => return false,
            }
            true
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: HeldKeys,
        /// Tab hidden or window blurred
        suspended: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, tuning: Tuning) -> Self {
            Self {
                state: GameState::new(tuning),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                keys: HeldKeys::default(),
                suspended: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            if self.suspended {
                self.accumulator = 0.0;
            } else {
                let dt = dt.min(0.1);
                self.accumulator += dt;

                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    let input = self.keys.to_input();
                    tick(&mut self.state, &input);
                    self.accumulator -= SIM_DT;
                    substeps += 1;
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Drain simulation events and refresh the DOM if anything changed
        fn sync_dom(&mut self, document: &Document) {
            let events = self.state.drain_events();
            if !events.is_empty() {
                write_hud(document, &HudSnapshot::from_state(&self.state));
            }
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                show_game_over(document, &HudSnapshot::from_state(&self.state));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                    let _ = el.class_list().remove_1("hidden");
                } else {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }

        /// Start or restart a session from a menu button
        fn start(&mut self) {
            self.state.start_session();
            self.accumulator = 0.0;
            self.keys = HeldKeys::default();
        }
    }

    fn write_hud(document: &Document, hud: &HudSnapshot) {
        let fields = [
            ("score", hud.score_text()),
            ("coins", hud.coins_text()),
            ("world", hud.world.to_string()),
            ("time", hud.time_text()),
            ("lives", hud.lives_text()),
        ];
        for (id, text) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }
    }

    fn show_game_over(document: &Document, hud: &HudSnapshot) {
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&hud.final_score_text()));
        }
        set_screen_active(document, "game-over-screen", true);
    }

    fn set_screen_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    /// Tuning overrides from LocalStorage, defaults if absent or malformed
    fn load_tuning() -> Tuning {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(TUNING_KEY).ok().flatten());

        let Some(json) = stored else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides from LocalStorage");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring stored tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Back the canvas at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(Settings::load(), load_tuning())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Title screen shows the idle level behind the menu
        write_hud(&document, &HudSnapshot::from_state(&game.borrow().state));

        setup_input_handlers(game.clone());
        setup_menu_buttons(game.clone());
        setup_auto_suspend(game.clone());

        request_animation_frame(game);

        log::info!("Brick Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                // Keep arrows and space from scrolling the page
                if g.keys.set(&key, true) {
                    event.prevent_default();
                } else if !event.repeat() && g.settings.toggle_for_key(&key) {
                    g.settings.save();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.set(&event.key(), false);
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let buttons = [
            ("start-button", "menu-screen"),
            ("restart-button", "game-over-screen"),
        ];
        for (button_id, screen_id) in buttons {
            let Some(btn) = document.get_element_by_id(button_id) else {
                log::warn!("Missing #{}", button_id);
                continue;
            };
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set_screen_active(&document, screen_id, false);
                let mut g = game.borrow_mut();
                g.start();
                write_hud(&document, &HudSnapshot::from_state(&g.state));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_suspend(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                if hidden && g.settings.pause_on_blur && g.state.phase == GamePhase::Playing {
                    g.suspended = true;
                    log::info!("Suspended (tab hidden)");
                } else if !hidden {
                    g.suspended = false;
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside); held keys would otherwise stick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys = HeldKeys::default();
                if g.settings.pause_on_blur && g.state.phase == GamePhase::Playing {
                    g.suspended = true;
                    log::info!("Suspended (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().suspended = false;
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.sync_dom(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning_file(&path),
        None => brick_runner::sim::Tuning::default(),
    };
    run_demo(tuning);
}

/// Read tuning overrides from a JSON file, falling back to defaults on error
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning_file(path: &str) -> brick_runner::sim::Tuning {
    use brick_runner::sim::Tuning;

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Cannot read tuning file {}: {}", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning overrides from {}", path);
            tuning
        }
        Err(e) => {
            log::error!("Invalid tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run: walk right, hop every so often, until game over or time out
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(tuning: brick_runner::sim::Tuning) {
    use brick_runner::HudSnapshot;
    use brick_runner::consts::TICK_RATE_HZ;
    use brick_runner::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    const DEMO_SECONDS: u32 = 120;

    let mut state = GameState::new(tuning);
    state.start_session();

    let mut stomps = 0;
    let mut deaths = 0;
    let mut ticks = 0;
    for t in 0..DEMO_SECONDS * TICK_RATE_HZ {
        let input = TickInput {
            right: true,
            jump: t % 90 < 20,
            ..Default::default()
        };
        tick(&mut state, &input);
        ticks = t + 1;

        for event in state.drain_events() {
            match event {
                GameEvent::EnemyStomped => stomps += 1,
                GameEvent::PlayerDied => deaths += 1,
                GameEvent::GameOver { .. } => {
                    log::info!("Game over, {}", HudSnapshot::from_state(&state).final_score_text())
                }
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let hud = HudSnapshot::from_state(&state);
    log::info!(
        "Demo finished after {} ticks: x={:.0} score={} coins={} lives={} stomps={} deaths={}",
        ticks,
        state.player.pos.x,
        hud.score_text(),
        hud.coins_text(),
        hud.lives_text(),
        stomps,
        deaths
    );
}

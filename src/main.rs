//! Neon Runner entry point
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

    use neon_runner::consts::SIM_DT;
    use neon_runner::input::map_key;
    use neon_runner::renderer::RenderState;
    use neon_runner::sim::{GameEvent, GameState};
    use neon_runner::{FixedStepDriver, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        driver: FixedStepDriver,
        settings: Settings,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Whether an animation frame is scheduled
        running: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                driver: FixedStepDriver::new(settings.tick_hz),
                settings,
                render_state: None,
                last_time: 0.0,
                running: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let report = self.driver.advance(&mut self.state, dt);
            if report.events.contains(&GameEvent::Restarted) {
                log::info!("New run");
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

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
                match render_state.draw_state(&self.state, &self.settings) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Loop stops once the run is over and nothing is queued
        fn should_stop(&self) -> bool {
            self.state.game_over && !self.driver.has_pending()
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.game_over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Settings JSON comes from the canvas `data-settings` attribute
    fn read_settings(canvas: &HtmlCanvasElement) -> Settings {
        let json = canvas.get_attribute("data-settings");
        Settings::load_or_default(json.as_deref())
    }

    /// Size the canvas backing store to the window, returning physical and
    /// logical sizes
    fn fit_canvas(canvas: &HtmlCanvasElement) -> ((u32, u32), (f32, f32)) {
        let Some(window) = web_sys::window() else {
            return ((canvas.width(), canvas.height()), (canvas.width() as f32, canvas.height() as f32));
        };
        let dpr = window.device_pixel_ratio();
        let logical_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(canvas.client_width() as f64);
        let logical_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(canvas.client_height() as f64);
        let width = (logical_w * dpr) as u32;
        let height = (logical_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        ((width, height), (logical_w as f32, logical_h as f32))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Runner starting...");

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

        let settings = read_settings(&canvas);
        let ((width, height), logical) = fit_canvas(&canvas);

        // Initialize game
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        game.borrow_mut().state.resize(logical.0, logical.1);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
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

        // The simulation still runs without a device; only drawing is skipped
        match RenderState::new(surface, &adapter, width, height, logical).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_keyboard(game.clone());
        setup_resize(&canvas, game.clone());

        // Start game loop
        start_loop(game);

        log::info!("Neon Runner running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let restart_loop = {
                let mut g = game.borrow_mut();
                let Some(input) = map_key(&event.code(), g.state.game_over) else {
                    return;
                };
                // Keep Space/ArrowUp from scrolling the page
                event.prevent_default();
                g.driver.queue(input);
                input.restart && !g.running
            };
            if restart_loop {
                start_loop(game.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let ((width, height), logical) = fit_canvas(&canvas);
            let mut g = game.borrow_mut();
            g.state.resize(logical.0, logical.1);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height, logical);
            }
            // Redraw even when the loop is stopped on the game-over screen
            if !g.running {
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Begin (or resume) the frame loop from a clean clock
    fn start_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.running {
                return;
            }
            g.running = true;
            g.last_time = 0.0;
            g.driver.reset_clock();
        }
        request_animation_frame(game);
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
        let keep_going = {
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
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }

            if g.should_stop() {
                g.running = false;
                log::info!("Game over, final score {}", g.state.score);
            }
            g.running
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run driven by the autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use neon_runner::Settings;
    use neon_runner::autopilot::autopilot_input;
    use neon_runner::sim::{GameEvent, GameState, tick};

    /// Default run length (one minute of play at 60 Hz)
    const DEFAULT_TICKS: u64 = 3600;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        runs: u32,
        best_score: u64,
        jumps: u32,
        star_boosts: u32,
        flips: u32,
        crashes: Vec<GameEvent>,
    }

    struct Args {
        settings_path: Option<String>,
        ticks: u64,
    }

    fn parse_args() -> Args {
        let mut args = Args {
            settings_path: None,
            ticks: DEFAULT_TICKS,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--ticks" => match iter.next().map(|v| v.parse::<u64>()) {
                    Some(Ok(n)) => args.ticks = n,
                    _ => log::warn!("--ticks needs a number, keeping {}", args.ticks),
                },
                _ => args.settings_path = Some(arg),
            }
        }
        args
    }

    fn load_settings(path: Option<&str>) -> Settings {
        let json = path.and_then(|p| match std::fs::read_to_string(p) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Cannot read {}: {}", p, e);
                None
            }
        });
        Settings::load_or_default(json.as_deref())
    }

    pub fn run() {
        let args = parse_args();
        let settings = load_settings(args.settings_path.as_deref());
        let seed = settings.seed.unwrap_or(0x5eed);

        log::info!("Headless run: seed {}, {} ticks", seed, args.ticks);

        let mut state = GameState::new(seed);
        let mut summary = RunSummary {
            seed,
            ticks: args.ticks,
            runs: 1,
            best_score: 0,
            jumps: 0,
            star_boosts: 0,
            flips: 0,
            crashes: Vec::new(),
        };

        for _ in 0..args.ticks {
            let input = autopilot_input(&state);
            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::Jumped { .. } => summary.jumps += 1,
                    GameEvent::StarBoost => summary.star_boosts += 1,
                    GameEvent::FlipStarted => summary.flips += 1,
                    GameEvent::Restarted => summary.runs += 1,
                    GameEvent::Crashed { .. } => summary.crashes.push(event),
                    GameEvent::Landed | GameEvent::FlipEnded => {}
                }
            }
            summary.best_score = summary.best_score.max(state.score);
        }

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Runner (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

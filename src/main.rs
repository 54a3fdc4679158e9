//! Star Strike entry point
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

    use glam::Vec2;
    use star_strike::audio::AudioManager;
    use star_strike::consts::*;
    use star_strike::platform::{Action, InputTracker, PlatformError, degrade};
    use star_strike::renderer::{RenderState, build_scene};
    use star_strike::sim::{GamePhase, GameState, tick};
    use star_strike::{GameConfig, Settings};

    /// Buttons held down with touch or mouse while pressed
    const HOLD_BUTTONS: [&str; 4] = ["btn-left", "btn-right", "btn-fire", "btn-pause"];
    /// Buttons that act on click
    const CLICK_BUTTONS: [&str; 4] = ["start-btn", "restart-btn", "resume-btn", "menu-btn"];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        canvas: HtmlCanvasElement,
        render_state: Option<RenderState>,
        audio: Option<AudioManager>,
        tracker: InputTracker,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Phase the screens were last laid out for
        shown_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, canvas: HtmlCanvasElement) -> Self {
            Self {
                state: GameState::with_tuning(seed, config.tuning),
                settings: config.settings,
                canvas,
                render_state: None,
                audio: None,
                tracker: InputTracker::new(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                shown_phase: None,
            }
        }

        /// Run simulation ticks, then hand the frame's events to audio
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // One-shot presses only reach the first substep
                let input = if substeps == 0 {
                    self.tracker.take_input()
                } else {
                    self.tracker.take_input().held_only()
                };
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let events = self.state.drain_events();
            if let Some(audio) = &self.audio {
                audio.play_events(&events);
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

        /// Keep the drawing buffer matched to the canvas' CSS size
        fn sync_canvas_size(&mut self) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if width == 0 || height == 0 {
                return;
            }
            if self.canvas.width() != width || self.canvas.height() != height {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
            }
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.sync_canvas_size();
            let Some(render_state) = &mut self.render_state else {
                return;
            };
            let vertices = build_scene(&self.state, &self.settings);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, rendering disabled");
                    self.render_state = None;
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "#hud-score .hud-value", &self.state.score.to_string());
            set_text(&document, "#hud-lives .hud-value", &self.state.lives.to_string());
            if self.settings.show_fps {
                set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            }

            let phase = self.state.phase;
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            set_visible(&document, "start-screen", phase == GamePhase::Start);
            set_visible(&document, "pause-screen", phase == GamePhase::Paused);
            set_visible(&document, "game-over", phase == GamePhase::GameOver);
            set_visible(
                &document,
                "hud",
                matches!(phase, GamePhase::Playing | GamePhase::Paused),
            );
            set_visible(&document, "hud-fps", self.settings.show_fps);
            set_visible(&document, "touch-controls", phase == GamePhase::Playing);
            if phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
        }

        /// Browsers only allow audio after a user gesture
        fn resume_audio(&self) {
            if let Some(audio) = &self.audio {
                audio.resume();
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Inline JSON from `<script id="game-config" type="application/json">`
    fn read_config(document: &Document) -> GameConfig {
        let json = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content());
        GameConfig::from_json_or_default(json.as_deref())
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        play_size: Vec2,
    ) -> Result<RenderState, PlatformError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| PlatformError::Gpu(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| PlatformError::NoAdapter)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, play_size).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Star Strike starting...");

        if let Err(e) = start().await {
            log::error!("Star Strike failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoWindow)?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| PlatformError::MissingElement("canvas".into()))?
            .dyn_into()
            .map_err(|_| PlatformError::WrongElementType("canvas".into()))?;

        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let config = read_config(&document);
        let play_size = Vec2::new(config.tuning.play_width, config.tuning.play_height);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed, canvas.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Simulation keeps running without a renderer or audio
        let render_state = degrade(
            init_renderer(&canvas, width, height, play_size).await,
            "Rendering",
        );
        {
            let mut g = game.borrow_mut();
            g.render_state = render_state;
            g.audio = degrade(AudioManager::new(&g.settings), "Audio");
        }

        setup_keyboard(game.clone());
        setup_hold_buttons(&document, game.clone());
        setup_click_buttons(&document, game.clone());
        setup_auto_pause(&document, game.clone());

        game.borrow_mut().update_hud();
        request_animation_frame(game);

        log::info!("Star Strike running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.tracker.key_down(&event.key()).is_some() {
                    event.prevent_default();
                    g.resume_audio();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().tracker.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_hold_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in HOLD_BUTTONS {
            let (Some(btn), Some(action)) =
                (document.get_element_by_id(id), Action::from_button_id(id))
            else {
                log::debug!("Hold button #{} not present", id);
                continue;
            };

            for press in ["touchstart", "mousedown"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.tracker.button_down(action);
                    g.resume_audio();
                });
                let _ =
                    btn.add_event_listener_with_callback(press, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for release in ["touchend", "touchcancel", "mouseup", "mouseleave"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    game.borrow_mut().tracker.button_up(action);
                });
                let _ =
                    btn.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_click_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in CLICK_BUTTONS {
            let (Some(btn), Some(action)) =
                (document.get_element_by_id(id), Action::from_button_id(id))
            else {
                log::debug!("Button #{} not present", id);
                continue;
            };

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.tracker.tap(action);
                g.resume_audio();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    focus_lost(&mut game.borrow_mut(), "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                focus_lost(&mut game.borrow_mut(), "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys released while unfocused never send keyup
    fn focus_lost(game: &mut Game, reason: &str) {
        game.tracker.release_all();
        if game.settings.pause_on_blur
            && game.state.phase == GamePhase::Playing
            && game.state.toggle_pause()
        {
            log::info!("Auto-paused ({})", reason);
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
        {
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
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run with a simple autopilot, for exercising the simulation
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_strike::consts::SIM_DT;
    use star_strike::sim::{GamePhase, GameState, tick};

    env_logger::init();
    log::info!("Star Strike (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    let mut state = GameState::new(seed);
    state.start_run();

    let mut shots = 0u32;
    let mut kills = 0u32;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = autopilot::steer(&state);
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match event {
                star_strike::sim::GameEvent::ShotFired => shots += 1,
                star_strike::sim::GameEvent::EnemyDestroyed { .. } => kills += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Run finished: phase={:?} ticks={} score={} lives={} shots={} kills={}",
        state.phase,
        state.time_ticks,
        state.score,
        state.lives,
        shots,
        kills
    );
    println!(
        "seed {}: score {} after {:.1}s ({} kills, {} lives left)",
        seed,
        state.score,
        state.run_time_ms / 1000.0,
        kills,
        state.lives
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use star_strike::sim::{GameState, TickInput};

    /// Chase the lowest enemy's column and keep firing
    pub fn steer(state: &GameState) -> TickInput {
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.center().x);
        let ship_x = state.player.center_x();
        let dead_zone = state.player.size.x * 0.25;

        TickInput {
            move_left: target.is_some_and(|x| x < ship_x - dead_zone),
            move_right: target.is_some_and(|x| x > ship_x + dead_zone),
            fire: true,
            ..TickInput::default()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use glam::Vec2;

        #[test]
        fn test_autopilot_chases_lowest_enemy() {
            let mut state = GameState::new(1);
            state.start_run();
            state.spawn_enemy_at(Vec2::new(400.0, 100.0), 2.0);
            state.spawn_enemy_at(Vec2::new(10.0, 300.0), 2.0);
            let input = steer(&state);
            assert!(input.move_left && !input.move_right && input.fire);
        }

        #[test]
        fn test_autopilot_holds_still_without_targets() {
            let mut state = GameState::new(1);
            state.start_run();
            let input = steer(&state);
            assert!(!input.move_left && !input.move_right);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

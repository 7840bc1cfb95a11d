//! Tap Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use taptap::audio::AudioManager;
    use taptap::best::{self, BestScore};
    use taptap::consts::*;
    use taptap::render::CanvasRenderer;
    use taptap::settings::Settings;
    use taptap::sim::{GameEvent, GameOverReason, GameState, TickInput, start_round, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        best: BestScore,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(renderer: CanvasRenderer, seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_muted(settings.muted);
            Self {
                state: GameState::new(seed),
                renderer,
                audio,
                best: BestScore::load(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.tap = None;
            }
        }

        /// React to whatever the sim reported this frame
        fn drain_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::ToneStarted(zone) => {
                        self.audio.play_tone(zone.spec().tone_hz);
                    }
                    GameEvent::LevelStarted(level) => {
                        log::debug!("Level {} started", level);
                        set_text("#flash-msg", "");
                    }
                    GameEvent::PaceFeedback(pace) => {
                        if let Some(msg) = pace.message() {
                            set_text("#flash-msg", msg);
                        }
                    }
                    GameEvent::BonusStarted => {
                        set_text("#flash-msg", "BONUS: CUP GAME");
                    }
                    GameEvent::BonusWon => {
                        self.audio.play_bonus_win();
                        set_text("#flash-msg", "FOUND IT!");
                    }
                    GameEvent::GameOver { reason, score } => {
                        self.finish_round(reason, score);
                    }
                }
            }
        }

        fn finish_round(&mut self, reason: GameOverReason, score: u32) {
            let improved = self.best.record(score);
            if improved {
                self.audio.play_new_best();
            } else {
                self.audio.play_game_over();
            }
            log::info!(
                "Game over ({}): score {}, best {}",
                reason.as_str(),
                score,
                self.best.best()
            );

            set_text("#overlay-title", "ELIMINATED");
            set_text("#overlay-rank", best::rank_message(score));
            set_text(
                "#overlay-stats",
                &format!("BEST: {} | LEVEL: {}", self.best.best(), score),
            );
            if improved {
                set_text("#flash-msg", "NEW BEST!");
            }
            set_text("#start-btn", "RESTART");
            set_class("overlay", "");
        }

        /// Render the current frame
        fn render(&self) {
            self.renderer.draw(&self.state, self.settings.reduced_motion);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            set_text("#hud-score .hud-value", &self.state.score.to_string());
            set_text("#hud-best .hud-value", &self.best.best().to_string());
        }
    }

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(selector: &str, value: &str) {
        if let Some(el) = document().query_selector(selector).ok().flatten() {
            el.set_text_content(Some(value));
        }
    }

    fn set_class(id: &str, class: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    /// Convert a client-space position to logical canvas coordinates,
    /// correcting for any difference between CSS and logical size
    fn logical_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let x = (client_x - rect.left()) * (CANVAS_SIZE / rect.width());
        let y = (client_y - rect.top()) * (CANVAS_SIZE / rect.height());
        Some((x, y))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tap Tap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let renderer = CanvasRenderer::new(&canvas, dpr).expect("2d context unavailable");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(renderer, seed)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(game.clone());

        // Draw the idle board behind the start overlay
        game.borrow().render();
        game.borrow().update_hud();
        set_class("overlay", "");

        request_animation_frame(game);

        log::info!("Tap Tap running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(point) =
                    logical_point(&canvas_clone, event.client_x() as f64, event.client_y() as f64)
                {
                    g.input.tap = Some(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    if let Some(point) = logical_point(
                        &canvas_clone,
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                    ) {
                        g.input.tap = Some(point);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input = TickInput::default();
                start_round(&mut g.state, seed);

                set_class("overlay", "hidden");
                set_text("#flash-msg", "");
                log::info!("Round started with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.drain_events();
            g.render();
            g.update_hud();
        }

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
    log::info!("Tap Tap (native) starting...");
    log::info!("The game targets the browser - build the wasm package for the playable version");

    println!("\nRunning sim smoke test...");
    smoke_playback();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_playback() {
    use taptap::sim::{GamePhase, GameState, TickInput, start_round, tick};

    let mut state = GameState::new(1);
    start_round(&mut state, 1);
    let input = TickInput::default();
    for _ in 0..2000 {
        if state.phase == GamePhase::AwaitInput {
            break;
        }
        tick(&mut state, &input);
    }
    assert_eq!(
        state.phase,
        GamePhase::AwaitInput,
        "playback should open the input window"
    );
    println!("✓ Playback opened the input window (sequence {:?})", state.sequence);
}

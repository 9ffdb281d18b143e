//! Roll & Grow entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement};

    use roll_grow::sim::Outcome;
    use roll_grow::{FrameView, Presenter, Session, Tuning};

    /// Writes HUD text and the end-of-run modal; hands each frame to the
    /// page's 3D renderer through `window.rollGrowFrame`
    struct DomPresenter {
        document: Document,
    }

    impl DomPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_display(&self, id: &str, display: &str) {
            if let Some(el) = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("display", display);
            }
        }
    }

    impl Presenter for DomPresenter {
        fn on_tick(&mut self, frame: &FrameView<'_>) {
            self.set_text("hud-scale", &format!("{:.2}x", frame.player.scale));
            self.set_text("hud-pickups", &frame.pickups.len().to_string());

            if let Ok(json) = serde_json::to_string(&frame.snapshot()) {
                if let Some(window) = web_sys::window() {
                    let _ = js_sys::Reflect::set(
                        &window,
                        &JsValue::from_str("rollGrowFrame"),
                        &JsValue::from_str(&json),
                    );
                }
            }
        }

        fn on_game_over(&mut self, outcome: Outcome) {
            self.set_text("gameOverMessage", outcome.message());
            self.set_display("gameOverModal", "flex");
        }

        fn on_reset(&mut self) {
            self.set_display("gameOverModal", "none");
        }
    }

    /// Game instance: the session plus whether a frame callback is pending
    struct Game {
        session: Session<DomPresenter>,
        frame_pending: bool,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Roll & Grow starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let presenter = DomPresenter {
            document: document.clone(),
        };
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, tuning, presenter),
            frame_pending: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(&document, game.clone());

        start_frames(&game);

        log::info!("Roll & Grow running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            if g.session.handle_key(&event.key()) {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.reset();
                start_frames(&game);
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Begin a frame chain unless one is already pending
    fn start_frames(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_pending {
                return;
            }
            g.frame_pending = true;
        }
        request_animation_frame(game.clone());
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
            g.session.frame(time);

            // Game over ends the chain; restart begins a new one
            if !g.session.is_scheduled() {
                g.frame_pending = false;
                return;
            }
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
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use roll_grow::sim::{Direction, GameState, TickStatus};
    use roll_grow::{LogPresenter, Session, Tuning};

    env_logger::init();
    log::info!("Roll & Grow (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable game");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_file(std::path::Path::new(&path))
            .with_context(|| format!("loading tuning from {}", path))?,
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {:?}", s))?,
        None => 12345,
    };

    /// Steer toward the nearest pickup along the axis with the larger gap
    fn autopilot(state: &GameState) -> Option<Direction> {
        let pos = state.player.position;
        let nearest = state.pickups.iter().min_by(|a, b| {
            a.position
                .distance_squared(pos)
                .total_cmp(&b.position.distance_squared(pos))
        })?;
        let to = nearest.position - pos;
        let direction = if to.x.abs() >= to.z.abs() {
            if to.x < 0.0 { Direction::Left } else { Direction::Right }
        } else if to.z < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        Some(direction)
    }

    let mut session = Session::try_new(seed, tuning, LogPresenter::default())?;
    let mut now_ms = 0.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 10_000;

    for _ in 0..MAX_FRAMES {
        if let Some(direction) = autopilot(session.state()) {
            session.apply_impulse(direction);
        }
        if let TickStatus::Ended(_) = session.frame(now_ms) {
            break;
        }
        now_ms += FRAME_MS;
    }

    let state = session.state();
    println!(
        "seed {}: {} ticks, {} collected, {} left, scale {:.3}, outcome: {}",
        seed,
        state.time_ticks,
        state.collected,
        state.pickups.len(),
        state.player.scale,
        state.outcome().map(|o| o.message()).unwrap_or("still running")
    );

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

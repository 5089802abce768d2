//! Flappy Gap entry point
//!
//! Handles platform-specific initialization and starts the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, EventTarget, HtmlButtonElement, HtmlCanvasElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use flappy_gap::platform::web::{AnimationFrameScheduler, CanvasSurface, LocalStore};
    use flappy_gap::renderer::draw_frame;
    use flappy_gap::sim::PcgGaps;
    use flappy_gap::{FrameHandle, Session, SessionEvent, Tuning};

    type WebSession = Session<AnimationFrameScheduler, LocalStore, PcgGaps>;

    /// DOM elements mirroring session state
    struct Hud {
        document: Document,
    }

    impl Hud {
        fn set_number(&self, id: &str, value: u32) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(&value.to_string()));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }

        fn set_disabled(&self, id: &str, disabled: bool) {
            if let Some(btn) = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(disabled);
            }
        }

        fn apply(&self, event: SessionEvent) {
            match event {
                SessionEvent::Started => self.set_disabled("start-btn", true),
                SessionEvent::ScoreChanged(score) => self.set_number("score", score),
                SessionEvent::BestScoreChanged(best) => self.set_number("high-score", best),
                SessionEvent::GameOver { score } => {
                    self.set_number("final-score", score);
                    self.set_hidden("game-over", false);
                }
                SessionEvent::OverlayCleared => self.set_hidden("game-over", true),
            }
        }
    }

    /// Game instance holding all state
    struct App {
        session: WebSession,
        surface: CanvasSurface,
        hud: Hud,
    }

    impl App {
        fn frame(&mut self, handle: FrameHandle) {
            self.session.on_frame(handle, &mut self.surface);
            self.flush();
        }

        /// Push queued session events to the DOM
        fn flush(&mut self) {
            for event in self.session.drain_events() {
                self.hud.apply(event);
            }
        }

        fn start(&mut self) {
            self.session.start();
            self.flush();
        }

        fn restart(&mut self) {
            self.session.restart();
            self.flush();
        }

        fn jump(&mut self) {
            self.session.jump();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Gap starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let mut surface =
            CanvasSurface::new(&canvas).ok_or_else(|| JsValue::from_str("no 2d context"))?;

        let tuning = Tuning::load(canvas.width() as f32, canvas.height() as f32);
        if let Err(e) = tuning.validate() {
            log::warn!("Canvas geometry breaks pipe timing: {e}");
        }

        let seed = js_sys::Date::now() as u64;
        let hud = Hud {
            document: document.clone(),
        };

        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let weak = weak.clone();
            let scheduler = AnimationFrameScheduler::new(move |handle| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().frame(handle);
                }
            });
            let session = Session::new(tuning, scheduler, LocalStore::new(), PcgGaps::new(seed));
            draw_frame(session.state(), &mut surface);
            hud.set_number("high-score", session.best_score());
            RefCell::new(App {
                session,
                surface,
                hud,
            })
        });

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, &canvas, &app);
        setup_buttons(&document, &app);

        log::info!("Flappy Gap ready!");
        Ok(())
    }

    fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(document: &Document, canvas: &HtmlCanvasElement, app: &Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            listen(document, "keydown", move |event: KeyboardEvent| {
                if event.code() == "Space" || event.key() == "ArrowUp" {
                    app.borrow_mut().jump();
                }
            });
        }

        // Mouse click
        {
            let app = app.clone();
            listen(canvas, "click", move |_event: MouseEvent| {
                app.borrow_mut().jump();
            });
        }

        // Touch start; non-passive so the page doesn't scroll
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut app = app.borrow_mut();
                if app.session.state().is_running() {
                    app.jump();
                    event.prevent_default();
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                app.borrow_mut().start();
            });
        }

        for id in ["restart-btn", "try-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                listen(&btn, "click", move |_event: MouseEvent| {
                    app.borrow_mut().restart();
                });
            } else {
                log::warn!("Missing #{id}");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_gap::renderer::RecordingSurface;
    use flappy_gap::sim::{GamePhase, PcgGaps, autopilot};
    use flappy_gap::{ManualScheduler, MemoryStore, Session, SessionEvent, Tuning};

    /// Give up on a run that somehow never crashes
    const MAX_FRAMES: u64 = 100_000;
    const DEFAULT_SEED: u64 = 0x5eed;

    env_logger::init();
    log::info!("Flappy Gap (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build for the real game");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args
        .iter()
        .find_map(|a| a.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let snapshot = args.iter().any(|a| a == "--snapshot");

    let tuning = Tuning::default();
    let mut surface = RecordingSurface::new(tuning.width, tuning.height);
    let mut session = Session::new(
        tuning,
        ManualScheduler::new(),
        MemoryStore::new(),
        PcgGaps::new(seed),
    );

    session.start();
    let mut frames = 0u64;
    while session.phase() == GamePhase::Running && frames < MAX_FRAMES {
        if autopilot::wants_jump(session.state()) {
            session.jump();
        }
        for handle in session.scheduler_mut().take_due() {
            surface.reset();
            session.on_frame(handle, &mut surface);
        }
        for event in session.drain_events() {
            if let SessionEvent::ScoreChanged(score) = event {
                log::debug!("Score {score} at frame {frames} ({} draw calls)", surface.calls.len());
            }
        }
        frames += 1;
    }

    println!(
        "seed {seed}: scored {} in {frames} frames (best {})",
        session.score(),
        session.best_score()
    );

    // Final state as JSON, for replaying a crash
    if snapshot {
        match serde_json::to_string_pretty(session.state()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize final state: {e}"),
        }
    }
}

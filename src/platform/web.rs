//! Browser host: canvas drawing, LocalStorage and animation frames

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Storage};

use crate::persistence::{self, ScoreStore};
use crate::renderer::{Color, Surface};
use crate::session::{FrameHandle, Scheduler};

const SCORE_FONT: &str = "20px 'Press Start 2P', cursive";

/// A [`Surface`] over a 2D canvas context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    /// `None` if the canvas has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(cx as f64, cy as f64, radius as f64, 0.0, 2.0 * PI)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color) {
        let gradient = self
            .ctx
            .create_linear_gradient(x as f64, y as f64, x as f64, (y + h) as f64);
        if gradient.add_color_stop(0.0, &top.to_string()).is_err()
            || gradient.add_color_stop(1.0, &bottom.to_string()).is_err()
        {
            self.fill_rect(x, y, w, h, bottom);
            return;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.set_fill(color);
        self.ctx.set_font(SCORE_FONT);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

/// A [`ScoreStore`] over `window.localStorage`. Without storage (private
/// mode, sandboxed iframe) reads miss and writes are dropped.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, best score will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalStore {
    fn get(&self, key: &str) -> Option<i64> {
        let raw = self.storage.as_ref()?.get_item(key).ok()??;
        persistence::parse_score(&raw)
    }

    fn set(&mut self, key: &str, value: i64) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, &value.to_string()).is_err() {
                log::warn!("Failed to write {key} to LocalStorage");
            }
        }
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A [`Scheduler`] backed by `requestAnimationFrame`.
///
/// Each fired frame is handed to `on_frame` together with the handle that
/// scheduled it. The scheduler owns every callback it hands to the browser,
/// so cancelled frames free theirs on [`Scheduler::cancel`].
pub struct AnimationFrameScheduler {
    on_frame: Rc<dyn Fn(FrameHandle)>,
    /// Callbacks handed to the browser that have neither fired nor been
    /// cancelled, by request id
    live: Rc<RefCell<HashMap<i32, FrameCallback>>>,
    /// The callback that fired last. A callback cannot be dropped while it
    /// runs, so it is released when the next one fires.
    spent: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationFrameScheduler {
    pub fn new(on_frame: impl Fn(FrameHandle) + 'static) -> Self {
        Self {
            on_frame: Rc::new(on_frame),
            live: Rc::new(RefCell::new(HashMap::new())),
            spent: Rc::new(RefCell::new(None)),
        }
    }
}

impl Scheduler for AnimationFrameScheduler {
    fn schedule_next(&mut self) -> Option<FrameHandle> {
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule frames on");
            return None;
        };

        // Filled in once requestAnimationFrame hands back the id, which is
        // always before the callback can run
        let id = Rc::new(Cell::new(0));
        let callback = {
            let id = id.clone();
            let on_frame = self.on_frame.clone();
            let live = self.live.clone();
            let spent = self.spent.clone();
            FrameCallback::new(move |_time: f64| {
                let handle = FrameHandle(id.get());
                if let Some(done) = live.borrow_mut().remove(&handle.0) {
                    // Drops the previous spent callback, which has returned
                    *spent.borrow_mut() = Some(done);
                }
                on_frame(handle);
            })
        };

        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(raf_id) => {
                id.set(raf_id);
                self.live.borrow_mut().insert(raf_id, callback);
                Some(FrameHandle(raf_id))
            }
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
        self.live.borrow_mut().remove(&handle.0);
    }
}

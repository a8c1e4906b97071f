//! Browser host
//!
//! Canvas 2D drawing, `requestAnimationFrame`, `setInterval` and the DOM
//! controls. Expects a page with a `<canvas>`, buttons `#start`, `#stop`,
//! `#reset` and a `#score` element.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::{FrameHandle, FrameScheduler, IntervalTimer, RenderSink, ScoreDisplay, TimerHandle};
use crate::driver::{AnimationDriver, Control};
use crate::settings::Settings;

/// Driver plus the host it runs against
pub struct App {
    pub driver: AnimationDriver,
    pub host: WebHost,
}

/// Browser implementation of the collaborator traits
pub struct WebHost {
    window: Window,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    score: Option<HtmlElement>,
    app: Weak<RefCell<App>>,
    /// Live interval closures, dropped on cancel
    intervals: HashMap<i32, Closure<dyn FnMut()>>,
}

impl FrameScheduler for WebHost {
    fn request_frame(&mut self) -> FrameHandle {
        // The callback learns its own id once the browser hands it out
        let id = Rc::new(Cell::new(-1));
        let id_in = id.clone();
        let app = self.app.clone();
        let closure = Closure::once(move |time: f64| {
            if let Some(app) = app.upgrade() {
                let mut app = app.borrow_mut();
                let App { driver, host } = &mut *app;
                driver.on_frame(FrameHandle(id_in.get()), time, host);
            }
        });
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(raw) => {
                id.set(raw);
                closure.forget();
                FrameHandle(raw)
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(-1)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

impl IntervalTimer for WebHost {
    fn every(&mut self, period_ms: u32) -> TimerHandle {
        let id = Rc::new(Cell::new(-1));
        let id_in = id.clone();
        let app = self.app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(app) = app.upgrade() {
                app.borrow_mut().driver.on_second(TimerHandle(id_in.get()));
            }
        });
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(raw) => {
                id.set(raw);
                self.intervals.insert(raw, closure);
                TimerHandle(raw)
            }
            Err(e) => {
                log::warn!("setInterval failed: {:?}", e);
                TimerHandle(-1)
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.window.clear_interval_with_handle(handle.0);
        self.intervals.remove(&handle.0);
    }
}

impl ScoreDisplay for WebHost {
    fn show_escape_count(&mut self, count: u64) {
        let Some(el) = &self.score else {
            return;
        };
        el.set_inner_html(&format!("{}<span>BALLS ESCAPED</span>", count));

        // Replay the CSS pop animation: clear it, force a reflow, restore it
        let style = el.style();
        let _ = style.set_property("animation", "none");
        let _ = el.offset_height();
        let _ = style.remove_property("animation");
    }
}

impl RenderSink for WebHost {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start as f64,
            end as f64,
        ) {
            log::warn!("Ring arc failed: {:?}", e);
        }
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("Ball arc failed: {:?}", e);
        }
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}

/// Settings from the canvas `data-settings` attribute, or defaults
fn load_settings(canvas: &HtmlCanvasElement) -> Settings {
    match canvas.get_attribute("data-settings") {
        Some(json) => match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from data-settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring data-settings: {}", e);
                Settings::default()
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    }
}

/// Find the page elements, size the canvas, and wire the controls
///
/// The animation does not run until Start is clicked.
pub fn launch() -> Result<Rc<RefCell<App>>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .query_selector("canvas")?
        .ok_or_else(|| JsValue::from_str("no canvas element"))?
        .dyn_into()?;

    let mut settings = load_settings(&canvas);
    settings.canvas_width = canvas.width() as f32;
    canvas.set_height(settings.canvas_height() as u32);
    settings
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let score = document
        .get_element_by_id("score")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
    log::info!(
        "Canvas {}x{}, ring radius {}, seed {}",
        canvas.width(),
        canvas.height(),
        settings.ring_radius(),
        seed
    );

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let app = Rc::new_cyclic(|weak| {
        RefCell::new(App {
            driver: AnimationDriver::new(settings, seed),
            host: WebHost {
                window: window.clone(),
                ctx,
                width,
                height,
                score,
                app: weak.clone(),
                intervals: HashMap::new(),
            },
        })
    });

    for control in [Control::Start, Control::Stop, Control::Reset] {
        let Some(btn) = document.get_element_by_id(control.element_id()) else {
            log::warn!("Missing #{} button", control.element_id());
            continue;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut app = app.borrow_mut();
            let App { driver, host } = &mut *app;
            driver.handle(control, host);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(app)
}

//! `Host` backed by the page: the slide canvas, DOM media elements and window timers.
//! Control visibility is not written to the DOM directly; it is collected in a
//! `UiState` that the Yew tree renders after every engine call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement,
    HtmlVideoElement,
};
use yew::{Callback, NodeRef};

use crate::assets::{AssetRegistry, fit_rect};
use crate::host::{
    Controls, Drawn, Media, Notifier, Scheduler, SlideControls, StationMap, Surface, TimerId,
};
use crate::model::{Course, ImageKey};

pub type ImageRegistry = Rc<RefCell<AssetRegistry<HtmlImageElement>>>;

#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub slide_controls: SlideControls,
    pub yes_no: bool,
    pub answer_box: bool,
    /// Bumped on every clear so the answer field can empty itself.
    pub answer_epoch: u32,
    pub station_map: Option<StationMap>,
    pub canvas_visible: bool,
    pub video_visible: bool,
    /// Set by the app once the last step has finished.
    pub course_complete: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            slide_controls: SlideControls::HIDDEN,
            yes_no: false,
            answer_box: false,
            answer_epoch: 0,
            station_map: None,
            canvas_visible: true,
            video_visible: false,
            course_complete: false,
        }
    }
}

/// Elements rendered by `App` that the host drives imperatively.
#[derive(Clone, Default, PartialEq)]
pub struct PageRefs {
    pub canvas: NodeRef,
    pub video: NodeRef,
    pub click: NodeRef,
}

pub struct WebHost {
    refs: PageRefs,
    images: ImageRegistry,
    ui: UiState,
    timers: HashMap<TimerId, i32>,
    next_timer: u64,
    on_timer: Callback<TimerId>,
    click_volume: f64,
}

impl WebHost {
    pub fn new(
        refs: PageRefs,
        images: ImageRegistry,
        on_timer: Callback<TimerId>,
        click_volume: f64,
    ) -> Self {
        Self {
            refs,
            images,
            ui: UiState::default(),
            timers: HashMap::new(),
            next_timer: 0,
            on_timer,
            click_volume,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Drops the window handle of a timer that has already fired.
    pub fn timer_fired(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn canvas(&self) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = self.refs.canvas.cast::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some((canvas, ctx))
    }
}

// Canvas backing store follows the window size on every draw.
fn fit_to_window(canvas: &HtmlCanvasElement) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    if canvas.width() != w as u32 || canvas.height() != h as u32 {
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }
}

impl Surface for WebHost {
    fn draw(&mut self, key: &ImageKey) -> Drawn {
        if self.images.borrow_mut().note_missing(key) {
            return Drawn::Missing;
        }
        let images = self.images.borrow();
        let Some(img) = images.get(key) else {
            return Drawn::Skipped;
        };
        if !img.complete() || img.natural_width() == 0 {
            return Drawn::Skipped;
        }
        let Some((canvas, ctx)) = self.canvas() else {
            log::warn!("slide canvas is not mounted");
            return Drawn::Skipped;
        };
        fit_to_window(&canvas);
        let (cw, ch) = (canvas.width() as f64, canvas.height() as f64);
        let Some(r) = fit_rect(
            cw,
            ch,
            img.natural_width() as f64,
            img.natural_height() as f64,
        ) else {
            return Drawn::Skipped;
        };
        ctx.clear_rect(0.0, 0.0, cw, ch);
        match ctx.draw_image_with_html_image_element_and_dw_and_dh(img, r.x, r.y, r.w, r.h) {
            Ok(()) => Drawn::Shown,
            Err(e) => {
                log::warn!("could not draw {}: {:?}", key, e);
                Drawn::Skipped
            }
        }
    }

    fn clear(&mut self) {
        if let Some((canvas, ctx)) = self.canvas() {
            ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
    }
}

impl Controls for WebHost {
    fn has_slide_controls(&self) -> bool {
        true
    }

    fn set_slide_controls(&mut self, controls: SlideControls) {
        self.ui.slide_controls = controls;
    }

    fn set_yes_no(&mut self, visible: bool) {
        self.ui.yes_no = visible;
    }

    fn set_answer_box(&mut self, visible: bool) {
        self.ui.answer_box = visible;
    }

    fn clear_answer(&mut self) {
        self.ui.answer_epoch = self.ui.answer_epoch.wrapping_add(1);
    }

    fn set_station_map(&mut self, map: Option<StationMap>) {
        self.ui.station_map = map;
    }

    fn set_canvas_visible(&mut self, visible: bool) {
        self.ui.canvas_visible = visible;
    }
}

impl Scheduler for WebHost {
    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let on_timer = self.on_timer.clone();
        let cb = Closure::once_into_js(move || on_timer.emit(id));
        let handle = web_sys::window().and_then(|win| {
            win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                delay_ms as i32,
            )
            .ok()
        });
        match handle {
            Some(handle) => {
                self.timers.insert(id, handle);
            }
            None => log::error!("could not schedule timer {:?}", id),
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.timers.remove(&id) {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(handle);
            }
        }
    }
}

impl Media for WebHost {
    fn play_video(&mut self, src: &str) {
        self.ui.video_visible = true;
        let Some(video) = self.refs.video.cast::<HtmlVideoElement>() else {
            log::warn!("video element is not mounted");
            return;
        };
        video.set_src(src);
        video.set_current_time(0.0);
        video.set_muted(false);
        match video.play() {
            Ok(promise) => {
                let on_reject = Closure::wrap(Box::new(move |e: JsValue| {
                    log::warn!("video playback rejected: {:?}", e);
                }) as Box<dyn FnMut(JsValue)>);
                let _ = promise.catch(&on_reject);
                on_reject.forget();
            }
            Err(e) => log::warn!("video playback failed: {:?}", e),
        }
    }

    fn stop_video(&mut self) {
        self.ui.video_visible = false;
        if let Some(video) = self.refs.video.cast::<HtmlVideoElement>() {
            let _ = video.pause();
        }
    }

    fn play_click(&mut self) {
        if let Some(sound) = self.refs.click.cast::<HtmlAudioElement>() {
            sound.set_volume(self.click_volume);
            sound.set_current_time(0.0);
            let _ = sound.play();
        }
    }
}

impl Notifier for WebHost {
    fn alert(&mut self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}

/// Starts loading every slide of the course. Failed loads are dropped from the
/// registry as they are reported.
pub fn preload(course: &Course) -> ImageRegistry {
    let registry: ImageRegistry = Rc::new(RefCell::new(AssetRegistry::default()));
    for key in course.image_keys() {
        let Ok(img) = HtmlImageElement::new() else {
            log::error!("could not create image element for {}", key);
            continue;
        };
        let weak = Rc::downgrade(&registry);
        let failed = key.clone();
        let on_error = Closure::once_into_js(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().mark_failed(&failed);
            }
        });
        img.set_onerror(Some(on_error.unchecked_ref()));
        img.set_src(&key.path());
        registry.borrow_mut().insert(key, img);
    }
    log::info!("preloading {} slides", registry.borrow().len());
    registry
}

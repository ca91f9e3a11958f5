//! Browser glue: DOM lookup, click bindings, `<audio>` playback and the
//! `requestAnimationFrame` loop. All game state lives in one thread-local
//! [`Game`]; every callback borrows it for the duration of one event.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlAudioElement, HtmlCanvasElement,
    MouseEvent, window,
};

use crate::audio::{AssetState, AudioBackend, LoadToken};
use crate::config::GameConfig;
use crate::difficulty::DifficultyTable;
use crate::error::GameError;
use crate::game::{Backends, Game, Hud};
use crate::render::Surface;
use crate::scheduler::FrameScheduler;

const CANVAS_ID: &str = "gameCanvas";

type ClickHandler = Closure<dyn FnMut(MouseEvent)>;

thread_local! {
    static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
    /// Click listeners bound by the current `boot`, removed by the next one.
    static BINDINGS: RefCell<Vec<(Element, ClickHandler)>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` against the live game. Returns `None` when no game is installed
/// or the game is already borrowed further up the stack.
fn with_game<R>(f: impl FnOnce(&mut Game) -> R) -> Option<R> {
    GAME.with(|cell| cell.try_borrow_mut().ok()?.as_mut().map(f))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// --- Canvas -----------------------------------------------------------------

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) {
        self.ctx.begin_path();
        // arc only throws for a negative radius
        let _ = self
            .ctx
            .arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        self.ctx.close_path();
    }
}

// --- Animation frames -------------------------------------------------------

struct RafScheduler {
    callback: Closure<dyn FnMut(f64)>,
    handle: Rc<Cell<Option<i32>>>,
}

impl RafScheduler {
    fn new() -> Self {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let fired = handle.clone();
        let callback = Closure::wrap(Box::new(move |ts: f64| {
            fired.set(None);
            with_game(|game| game.tick(ts));
        }) as Box<dyn FnMut(f64)>);
        Self { callback, handle }
    }
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) {
        if self.handle.get().is_some() {
            return;
        }
        let Some(w) = window() else { return };
        match w.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
            Ok(id) => self.handle.set(Some(id)),
            Err(err) => log::warn!("requestAnimationFrame failed: {err:?}"),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }

    fn is_pending(&self) -> bool {
        self.handle.get().is_some()
    }
}

// --- Audio ------------------------------------------------------------------

const READINESS_EVENTS: [&str; 2] = ["canplaythrough", "error"];

/// One `<audio>` element per loaded track. Its readiness listener lives as
/// long as the element is current and is detached when the track changes.
#[derive(Default)]
struct HtmlAudio {
    element: Option<HtmlAudioElement>,
    on_readiness: Option<Closure<dyn FnMut(Event)>>,
}

impl HtmlAudio {
    fn detach(&mut self) {
        let listener = self.on_readiness.take();
        let Some(el) = self.element.take() else { return };
        let _ = el.pause();
        if let Some(cb) = &listener {
            for event in READINESS_EVENTS {
                let _ = el.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
            }
        }
    }
}

impl Drop for HtmlAudio {
    fn drop(&mut self) {
        self.detach();
    }
}

impl AudioBackend for HtmlAudio {
    fn load(&mut self, path: &str, token: LoadToken) {
        self.detach();
        let el = match HtmlAudioElement::new_with_src(path) {
            Ok(el) => el,
            Err(err) => {
                log::warn!("could not create audio for {path}: {err:?}");
                return;
            }
        };
        el.set_preload("auto");
        let cb = Closure::wrap(Box::new(move |evt: Event| {
            let state = if evt.type_() == "error" {
                AssetState::Failed
            } else {
                AssetState::Ready
            };
            with_game(|game| game.audio_event(token, state));
        }) as Box<dyn FnMut(Event)>);
        for event in READINESS_EVENTS {
            if let Err(err) = el.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            {
                log::warn!("could not watch '{event}' on audio: {err:?}");
            }
        }
        self.element = Some(el);
        self.on_readiness = Some(cb);
    }

    fn play(&mut self) {
        if let Some(el) = &self.element {
            // Autoplay policies may reject the promise; playback is best effort.
            let _ = el.play();
        }
    }

    fn pause(&mut self) {
        if let Some(el) = &self.element {
            let _ = el.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(el) = &self.element {
            let _ = el.pause();
            el.set_current_time(0.0);
        }
    }
}

// --- Score / combo / vinyl ----------------------------------------------------

struct DomHud {
    score: Element,
    combo: Element,
    vinyls: Vec<Element>,
}

impl Hud for DomHud {
    fn show_score(&mut self, score: u64, combo: u32) {
        self.score.set_text_content(Some(&score.to_string()));
        self.combo.set_text_content(Some(&combo.to_string()));
    }

    fn show_difficulty(&mut self, key: &str) {
        for vinyl in &self.vinyls {
            let classes = vinyl.class_list();
            let _ = classes.remove_1("active");
            if classes.contains(key) {
                let _ = classes.add_1("active");
            }
        }
    }
}

// --- Setup ------------------------------------------------------------------

fn by_id(doc: &Document, id: &str) -> Result<Element, GameError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| GameError::MissingElement(format!("#{id}")))
}

fn elements(doc: &Document, selector: &str) -> Result<Vec<Element>, GameError> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn on_click(target: &Element, mut handler: impl FnMut() + 'static) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
        handler();
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    BINDINGS.with(|b| b.borrow_mut().push((target.clone(), closure)));
    Ok(())
}

fn unbind_all() {
    let bindings = BINDINGS.with(|b| std::mem::take(&mut *b.borrow_mut()));
    for (target, closure) in &bindings {
        let _ = target.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
}

#[cfg(test)]
fn bound_listeners() -> usize {
    BINDINGS.with(|b| b.borrow().len())
}

/// Wires the page up and installs a fresh game. A game left over from an
/// earlier call is stopped and its click listeners removed first.
pub(crate) fn boot(table: DifficultyTable) -> Result<(), GameError> {
    if let Some(mut old) = GAME.with(|cell| cell.borrow_mut().take()) {
        old.stop();
    }
    unbind_all();

    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let canvas: HtmlCanvasElement = by_id(&doc, CANVAS_ID)?
        .dyn_into()
        .map_err(|_| GameError::NotACanvas(CANVAS_ID.to_string()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let start_btn = by_id(&doc, "startBtn")?;
    let pause_btn = by_id(&doc, "pauseBtn")?;
    let stop_btn = by_id(&doc, "stopBtn")?;
    let tap_zones = elements(&doc, ".tap-zones button")?;
    let vinyls = elements(&doc, ".vinyl")?;

    let hud = DomHud {
        score: by_id(&doc, "score")?,
        combo: by_id(&doc, "combo")?,
        vinyls: vinyls.clone(),
    };
    let cfg = GameConfig::default()
        .with_playfield(canvas.width() as f64, canvas.height() as f64);
    let backends = Backends {
        surface: Box::new(CanvasSurface { canvas, ctx }),
        scheduler: Box::new(RafScheduler::new()),
        audio: Box::new(HtmlAudio::default()),
        hud: Box::new(hud),
    };
    let game = Game::new(cfg, table, backends, StdRng::from_entropy())?;
    GAME.with(|cell| cell.replace(Some(game)));

    on_click(&start_btn, || {
        with_game(|game| game.start(now_ms()));
    })?;
    on_click(&pause_btn, || {
        with_game(|game| game.pause());
    })?;
    on_click(&stop_btn, || {
        with_game(|game| game.stop());
    })?;

    for (lane, button) in tap_zones.iter().enumerate() {
        on_click(button, move || {
            with_game(|game| game.tap(lane));
        })?;
    }

    for vinyl in &vinyls {
        let Some(key) = vinyl.get_attribute("data-difficulty") else {
            log::warn!("vinyl without data-difficulty, not bound");
            continue;
        };
        on_click(vinyl, move || {
            with_game(|game| game.set_difficulty(&key));
        })?;
    }

    log::info!(
        "lane-tap ready: {} lanes bound, {} difficulty selectors",
        tap_zones.len(),
        vinyls.len()
    );
    Ok(())
}

//! Browser runtime: DOM layers, input listeners and the animation loop.
//!
//! All mutable state lives in one `thread_local!` `App`. Listeners and the
//! frame callback borrow it briefly; nothing here blocks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, window};

use crate::config::GameConfig;
use crate::flow::{Director, Event, Notice};
use crate::games::wordle::parse_dictionary;
use crate::games::ActiveGame;
use crate::stage::Stage;

pub mod canvas;
pub mod markup;

use markup::{BOSS_ID, CANVAS_ID, DESKTOP_ID, PUNISH_ID, TASKBAR_ID, WINDOW_ID};

const ROOT_ID: &str = "os-root";
const LAYERS: [&str; 4] = [DESKTOP_ID, BOSS_ID, PUNISH_ID, TASKBAR_ID];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
/// Keys whose default browser action (scrolling) is suppressed during games.
const GAME_KEYS: [&str; 5] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", " "];

struct App {
    director: Director,
    game: Option<ActiveGame>,
    /// Stage the mounted game (or lack of one) was set up for.
    synced_stage: Option<Stage>,
    rng: SmallRng,
    dictionary: Vec<String>,
    last_ts: Option<f64>,
    window_pos: Option<(f64, f64)>,
    /// Grab offset inside the window plus the live position while dragging.
    drag: Option<((f64, f64), (f64, f64))>,
    confetti_seed: u64,
    rendered: [String; 4],
}

impl App {
    fn new(config: GameConfig) -> Self {
        let mut rng = SmallRng::from_entropy();
        let confetti_seed = rng.r#gen();
        Self {
            director: Director::new(config),
            game: None,
            synced_stage: None,
            rng,
            dictionary: Vec::new(),
            last_ts: None,
            window_pos: None,
            drag: None,
            confetti_seed,
            rendered: Default::default(),
        }
    }

    fn playing(&self) -> bool {
        self.director.boss().is_none() && self.director.punishment().is_none()
    }

    /// Mount or drop the minigame when the stage changed.
    fn sync_game(&mut self) {
        let stage = self.director.stage();
        if self.synced_stage == Some(stage) {
            return;
        }
        self.synced_stage = Some(stage);
        self.window_pos = None;
        self.drag = None;
        self.game = stage.minigame().map(|kind| {
            ActiveGame::new(kind, self.director.config(), &self.dictionary, &mut self.rng)
        });
    }

    fn dispatch(&mut self, event: Event, now: f64) {
        self.director.handle(event, now);
        self.after_director();
    }

    fn after_director(&mut self) {
        self.sync_game();
        for notice in self.director.drain_notices() {
            log_notice(&notice);
            if let Notice::StageChanged { to: Stage::Fired, .. } = notice {
                self.confetti_seed = self.rng.r#gen();
            }
        }
    }

    fn frame(&mut self, ts: f64) -> Result<(), JsValue> {
        let dt = self.last_ts.map(|last| ts - last).unwrap_or(0.0);
        self.last_ts = Some(ts);

        self.director.tick(ts);
        self.after_director();

        if self.playing() {
            let outcome = match self.game.as_mut() {
                Some(game) => game.as_minigame().advance(dt, &mut self.rng),
                None => None,
            };
            if let Some(outcome) = outcome {
                gloo::console::log!("minigame over", format!("{outcome:?}"));
                self.dispatch(Event::GameOver(outcome), ts);
            }
        }

        self.render(ts)
    }

    fn layer_html(&self, now: f64) -> [String; 4] {
        let wordle = match &self.game {
            Some(ActiveGame::Wordle(w)) => Some(w),
            _ => None,
        };
        let view = markup::DesktopView {
            stage: self.director.stage(),
            meter: self.director.meter(),
            skip_tutorials: self.director.skip_tutorials(),
            punishment_active: self.director.punishment().is_some(),
            window_pos: self.window_pos,
            wordle,
            confetti_seed: self.confetti_seed,
        };
        let boss = self
            .director
            .boss()
            .map(|b| markup::boss_dialog(b, now))
            .unwrap_or_default();
        let punish = self
            .director
            .punishment()
            .map(|p| markup::punishment_overlay(p, now))
            .unwrap_or_default();
        let taskbar = if self.director.stage().is_terminal() || self.director.stage() == Stage::Intro {
            String::new()
        } else {
            let (time, date) = clock_labels();
            markup::taskbar(&time, &date)
        };
        [markup::desktop(&view), boss, punish, taskbar]
    }

    fn render(&mut self, now: f64) -> Result<(), JsValue> {
        let doc = document()?;
        let html = self.layer_html(now);
        for ((id, fresh), last) in LAYERS.iter().zip(html).zip(self.rendered.iter_mut()) {
            if *last != fresh {
                if let Some(el) = doc.get_element_by_id(id) {
                    el.set_inner_html(&fresh);
                }
                *last = fresh;
            }
        }
        if let Some(game) = &self.game {
            if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
                let surface: HtmlCanvasElement = el.dyn_into()?;
                if let Some(ctx) = surface.get_context("2d")? {
                    let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
                    canvas::draw(&ctx, game)?;
                }
            }
        }
        Ok(())
    }
}

thread_local! {
    static APP: std::cell::RefCell<Option<App>> = const { std::cell::RefCell::new(None) };
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn log_notice(notice: &Notice) {
    match notice {
        Notice::StageChanged { from, to } => {
            gloo::console::log!("stage", from.as_str(), "->", to.as_str());
        }
        Notice::MeterMoved { delta, value } => {
            gloo::console::log!("meter", *delta, "now", *value);
        }
        Notice::PunishmentStarted(kind) => {
            gloo::console::log!("punishment", kind.title());
        }
        Notice::SkipTutorials(on) => {
            gloo::console::log!("skip tutorials", *on);
        }
        Notice::BossOpened | Notice::BossClosed | Notice::PunishmentFinished => {}
    }
}

fn clock_labels() -> (String, String) {
    let d = js_sys::Date::new_0();
    let time = format!("{:02}:{:02}", d.get_hours(), d.get_minutes());
    let month = MONTHS.get(d.get_month() as usize).copied().unwrap_or("");
    (time, format!("{month} {}", d.get_date()))
}

fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
        }
    });
}

/// Create the root and layer elements, or reuse them on restart.
fn mount(doc: &Document) -> Result<Element, JsValue> {
    if let Some(root) = doc.get_element_by_id(ROOT_ID) {
        // A fresh App assumes empty layers.
        for id in LAYERS {
            if let Some(layer) = doc.get_element_by_id(id) {
                layer.set_inner_html("");
            }
        }
        return Ok(root);
    }
    let style = doc.create_element("style")?;
    style.set_text_content(Some(markup::STYLESHEET));
    if let Some(head) = doc.head() {
        head.append_child(&style)?;
    }
    let root = doc.create_element("div")?;
    root.set_id(ROOT_ID);
    for id in LAYERS {
        let layer = doc.create_element("div")?;
        layer.set_id(id);
        root.append_child(&layer)?;
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&root)?;
    Ok(root)
}

fn target_element(evt: &web_sys::Event) -> Option<Element> {
    evt.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn install_listeners(doc: &Document, root: &Element) -> Result<(), JsValue> {
    // Game keys
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            with_app(|app| {
                if !app.playing() {
                    return;
                }
                if let Some(game) = app.game.as_mut() {
                    if GAME_KEYS.contains(&key.as_str()) {
                        evt.prevent_default();
                    }
                    game.as_minigame().key_down(&key);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            with_app(|app| {
                if let Some(game) = app.game.as_mut() {
                    game.as_minigame().key_up(&key);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Buttons: one delegated handler for every `data-action` / `data-key`.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(target) = target_element(&evt) else {
                return;
            };
            let now = now_ms();
            if let Ok(Some(el)) = target.closest("[data-action]") {
                let action = el.get_attribute("data-action").unwrap_or_default();
                match markup::action_event(&action) {
                    Some(event) => with_app(|app| app.dispatch(event, now)),
                    None => gloo::console::warn!("unknown action", action),
                }
                return;
            }
            if let Ok(Some(el)) = target.closest("[data-key]") {
                let key = el.get_attribute("data-key").unwrap_or_default();
                with_app(|app| {
                    if !app.playing() {
                        return;
                    }
                    if let Some(game) = app.game.as_mut() {
                        game.as_minigame().key_down(&key);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window dragging by the title bar.
    {
        let doc_down = doc.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(target) = target_element(&evt) else {
                return;
            };
            if !matches!(target.closest("[data-drag]"), Ok(Some(_))) {
                return;
            }
            let Some(win) = doc_down
                .get_element_by_id(WINDOW_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            let origin = (win.offset_left() as f64, win.offset_top() as f64);
            let grab = (
                evt.client_x() as f64 - origin.0,
                evt.client_y() as f64 - origin.1,
            );
            with_app(|app| app.drag = Some((grab, origin)));
        }) as Box<dyn FnMut(_)>);
        root.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let doc_move = doc.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let mut moved = None;
            with_app(|app| {
                if let Some((grab, pos)) = app.drag.as_mut() {
                    *pos = (
                        evt.client_x() as f64 - grab.0,
                        evt.client_y() as f64 - grab.1,
                    );
                    moved = Some(*pos);
                }
            });
            let Some((x, y)) = moved else {
                return;
            };
            if let Some(win) = doc_move
                .get_element_by_id(WINDOW_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let style = win.style();
                style.set_property("left", &format!("{x}px")).ok();
                style.set_property("top", &format!("{y}px")).ok();
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            // Commit on release so the desktop layer is not rebuilt mid-drag.
            with_app(|app| {
                if let Some((_, pos)) = app.drag.take() {
                    app.window_pos = Some(pos);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: web_sys::Response = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

fn load_dictionary(url: String) {
    spawn_local(async move {
        match fetch_text(&url).await {
            Ok(text) => {
                let words = parse_dictionary(&text);
                gloo::console::log!("dictionary loaded", url, words.len());
                with_app(|app| {
                    if let Some(ActiveGame::Wordle(w)) = app.game.as_mut() {
                        w.merge_dictionary(&words);
                    }
                    app.dictionary = words;
                });
            }
            Err(err) => {
                gloo::console::warn!("dictionary unavailable, using built-in words", url, err);
            }
        }
    });
}

fn start_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| {
            if let Err(err) = app.frame(ts) {
                gloo::console::warn!("frame failed", err);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Mount the desktop and start the day. Calling it again resets the game
/// with the new configuration but keeps the listeners and the loop.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let doc = document()?;
    let fresh = doc.get_element_by_id(ROOT_ID).is_none();
    let root = mount(&doc)?;
    let url = config.dictionary_url.clone();

    let was_running = APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let was_running = slot.is_some();
        let mut app = App::new(config);
        if let Some(old) = slot.take() {
            app.dictionary = old.dictionary;
        }
        app.sync_game();
        *slot = Some(app);
        was_running
    });
    gloo::console::log!("office simulator started");

    if fresh {
        install_listeners(&doc, &root)?;
    }
    if !was_running {
        start_loop();
    }
    if let Some(url) = url {
        load_dictionary(url);
    }
    Ok(())
}

//! Glyph Hunt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent};

    use glyph_hunt::notify::{Notifier, Severity};
    use glyph_hunt::sim::{ClickOutcome, Difficulty, RoundPhase};
    use glyph_hunt::storage::LocalStore;
    use glyph_hunt::Session;

    const STYLE: &str = "
        html, body { margin: 0; height: 100%; background: #10121a; color: #e8e8f0;
                     font-family: system-ui, sans-serif; overflow: hidden; }
        body.playing { cursor: none; }
        #hud { position: fixed; top: 0; left: 0; right: 0; height: 12vh;
               display: flex; align-items: center; justify-content: space-around;
               background: #181b26; font-size: 1.1rem; z-index: 10; }
        #hud .label { opacity: 0.6; margin-right: 0.4em; }
        #field { position: fixed; inset: 0; }
        .entity { position: absolute; font-size: 2rem; user-select: none;
                  transform: translate(-50%, -50%); cursor: pointer; }
        body.playing .entity { cursor: none; }
        .entity.found { opacity: 0.25; pointer-events: none; }
        #reticle { position: fixed; width: 44px; height: 44px; margin: -22px 0 0 -22px;
                   border: 2px solid #6cf; border-radius: 50%; pointer-events: none;
                   z-index: 20; }
        #reticle::after { content: ''; position: absolute; left: 50%; top: 50%;
                          width: 4px; height: 4px; margin: -2px 0 0 -2px;
                          border-radius: 50%; background: #6cf; }
        #menu { position: fixed; inset: 0; display: flex; flex-direction: column;
                gap: 1rem; align-items: center; justify-content: center;
                background: rgba(16, 18, 26, 0.85); z-index: 30; }
        #menu button { font-size: 1.1rem; padding: 0.6em 1.6em; border-radius: 8px;
                       border: 1px solid #444; background: #222635; color: inherit;
                       cursor: pointer; }
        #menu button.selected { border-color: #6cf; color: #6cf; }
        #menu #start-btn { font-size: 1.4rem; background: #2c5c8f; }
        #toasts { position: fixed; right: 1rem; top: 13vh; display: flex;
                  flex-direction: column; gap: 0.5rem; z-index: 40; }
        .toast { background: #222635; border-left: 4px solid #6cf; padding: 0.6em 1em;
                 border-radius: 6px; min-width: 14rem; }
        .toast.destructive { border-left-color: #f66; }
        .toast .title { font-weight: 600; }
        .toast .body { opacity: 0.7; font-size: 0.9rem; }
        .hidden { display: none !important; }
    ";

    /// Toast notifier rendering into the `#toasts` container
    struct DomNotifier;

    impl Notifier for DomNotifier {
        fn show(&self, title: &str, body: &str, severity: Severity) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(container) = document.get_element_by_id("toasts") else {
                return;
            };
            let Ok(toast) = document.create_element("div") else {
                return;
            };
            let class = match severity {
                Severity::Normal => "toast",
                Severity::Destructive => "toast destructive",
            };
            let _ = toast.set_attribute("class", class);
            toast.set_inner_html(&format!(
                "<div class='title'>{title}</div><div class='body'>{body}</div>"
            ));
            let _ = container.append_child(&toast);

            // Drop the toast after a short delay
            let closure = Closure::once(move || {
                toast.remove();
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    2500,
                );
            }
            closure.forget();
        }
    }

    /// Game instance holding the session and the one live timer handle
    struct Game {
        session: Session<LocalStore, DomNotifier>,
        /// Interval handle; `None` whenever no round is active. Every path
        /// out of Active must pass through `stop_timer`.
        timer: Option<i32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(seed, LocalStore::new(), DomNotifier),
                timer: None,
            }
        }

        fn stop_timer(&mut self) {
            if let Some(handle) = self.timer.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }

        fn update_hud(&self) {
            let round = self.session.round();
            set_text("hud-score", &round.score.to_string());
            set_text("hud-time", &format!("{}s", round.time_left));
            set_text("hud-level", &round.level.to_string());
            set_text("hud-best", &self.session.best().to_string());
        }

        /// Rebuild the field from the current entity set
        fn render_field(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(field) = document.get_element_by_id("field") else {
                return;
            };
            field.set_inner_html("");
            for entity in &self.session.round().entities {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                let class = if entity.found { "entity found" } else { "entity" };
                let _ = el.set_attribute("class", class);
                let _ = el.set_attribute("id", &format!("entity-{}", entity.id));
                let _ = el.set_attribute("data-id", &entity.id.to_string());
                let _ = el.set_attribute(
                    "style",
                    &format!("left: {:.2}%; top: {:.2}%;", entity.x, entity.y),
                );
                el.set_text_content(Some(&entity.glyph.to_string()));
                let _ = field.append_child(&el);
            }
        }

        /// Toggle everything that only exists while a round runs
        fn set_round_visuals(&self, active: bool) {
            set_hidden("reticle", !active);
            set_hidden("menu", active);
            if let Some(body) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.body())
            {
                let _ = body.set_attribute("class", if active { "playing" } else { "" });
            }
        }

        /// Round just left Active (win, timeout, or reset)
        fn finish_round_ui(&self) {
            self.set_round_visuals(false);
            let label = match self.session.round().phase {
                RoundPhase::Won => "Next level",
                RoundPhase::Lost => "Try again",
                RoundPhase::Idle | RoundPhase::Active => "Start",
            };
            set_text("start-btn", label);
            self.update_hud();
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            let class = el.get_attribute("class").unwrap_or_default();
            let base = class.replace("hidden", "");
            let base = base.trim();
            let next = if hidden {
                format!("{base} hidden")
            } else {
                base.to_string()
            };
            let _ = el.set_attribute("class", next.trim());
        }
    }

    /// Build the static page: styles, HUD, field, reticle, toasts, menu
    fn build_dom(document: &Document) -> Result<(), JsValue> {
        let head = document.head().ok_or("no head")?;
        let style = document.create_element("style")?;
        style.set_text_content(Some(STYLE));
        head.append_child(&style)?;

        let body: HtmlElement = document.body().ok_or("no body")?;
        body.set_inner_html(
            "<div id='hud'>\
               <div><span class='label'>Score</span><span id='hud-score'>0</span></div>\
               <div><span class='label'>Time</span><span id='hud-time'>60s</span></div>\
               <div><span class='label'>Level</span><span id='hud-level'>1</span></div>\
               <div><span class='label'>Best</span><span id='hud-best'>0</span></div>\
             </div>\
             <div id='field'></div>\
             <div id='reticle' class='hidden'></div>\
             <div id='toasts'></div>\
             <div id='menu'>\
               <h1>Glyph Hunt</h1>\
               <p>Click every \u{1F47E} before the clock runs out</p>\
               <div id='difficulty'>\
                 <button id='diff-easy'>Easy</button>\
                 <button id='diff-normal'>Normal</button>\
                 <button id='diff-hard'>Hard</button>\
               </div>\
               <button id='start-btn'>Start</button>\
               <button id='reset-btn'>Reset progress</button>\
             </div>",
        );
        Ok(())
    }

    /// Begin a round. Stopping any previous timer comes first, so at most
    /// one interval is ever live.
    fn start_round(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.stop_timer();
            g.session.start();
            g.render_field();
            g.update_hud();
            g.set_round_visuals(true);
        }
        start_timer(game);
    }

    fn start_timer(game: &Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut()>::new({
            let game = game.clone();
            move || {
                let mut g = game.borrow_mut();
                let phase = g.session.tick();
                g.update_hud();
                if phase != RoundPhase::Active {
                    g.stop_timer();
                    g.finish_round_ui();
                }
            }
        });
        let window = web_sys::window().expect("no window");
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .expect("failed to start round timer");
        closure.forget();
        game.borrow_mut().timer = Some(handle);
    }

    fn setup_field_clicks(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(field) = document.get_element_by_id("field") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let Ok(Some(entity_el)) = target.closest(".entity") else {
                return;
            };
            let Some(id) = entity_el
                .get_attribute("data-id")
                .and_then(|raw| raw.parse::<u32>().ok())
            else {
                return;
            };

            let mut g = game.borrow_mut();
            match g.session.click(id) {
                ClickOutcome::TargetFound => {
                    let _ = entity_el.set_attribute("class", "entity found");
                }
                ClickOutcome::Cleared => {
                    let _ = entity_el.set_attribute("class", "entity found");
                    g.stop_timer();
                    g.finish_round_ui();
                }
                ClickOutcome::Miss | ClickOutcome::Ignored => {}
            }
            g.update_hud();
        });
        let _ = field.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Pointer tracking for the purely visual aiming reticle
    fn setup_reticle(document: &Document) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("reticle"))
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            {
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", event.client_x()));
                let _ = style.set_property("top", &format!("{}px", event.client_y()));
            }
        });
        let _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn mark_selected_difficulty(document: &Document, difficulty: Difficulty) {
        for (id, d) in [
            ("diff-easy", Difficulty::Easy),
            ("diff-normal", Difficulty::Normal),
            ("diff-hard", Difficulty::Hard),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let _ = btn.set_attribute("class", if d == difficulty { "selected" } else { "" });
            }
        }
    }

    fn setup_menu(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, difficulty) in [
            ("diff-easy", Difficulty::Easy),
            ("diff-normal", Difficulty::Normal),
            ("diff-hard", Difficulty::Hard),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().session.set_difficulty(difficulty);
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        mark_selected_difficulty(&document, difficulty);
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_round(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.stop_timer();
                g.session.reset();
                if let Some(field) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("field"))
                {
                    field.set_inner_html("");
                }
                g.finish_round_ui();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Glyph Hunt starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        build_dom(&document)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {seed}");

        mark_selected_difficulty(&document, game.borrow().session.round().difficulty);
        game.borrow().update_hud();

        setup_field_clicks(&document, game.clone());
        setup_reticle(&document);
        setup_menu(&document, game.clone());

        log::info!("Glyph Hunt running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("startup failed: {err:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Glyph Hunt (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    // Headless demo round as a smoke test
    demo_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_round() {
    use glyph_hunt::Session;
    use glyph_hunt::notify::NullNotifier;
    use glyph_hunt::sim::RoundPhase;
    use glyph_hunt::storage::MemoryStore;

    let mut session = Session::new(0xC0FFEE, MemoryStore::new(), NullNotifier);
    session.start();

    let targets: Vec<u32> = session
        .round()
        .entities
        .iter()
        .filter(|e| e.is_target)
        .map(|e| e.id)
        .collect();
    for id in targets {
        session.click(id);
    }

    assert_eq!(session.round().phase, RoundPhase::Won);
    println!(
        "✓ Demo round cleared: score {}, best {}",
        session.round().score,
        session.best()
    );
}

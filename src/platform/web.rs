//! Browser entry point
//!
//! One `App` per page. DOM listeners translate events into `InputEvent`s,
//! the arcade returns effects, and effects are applied after the arcade
//! borrow is released: `ClickButton` synthesizes a native click that
//! re-enters `dispatch` synchronously.
//!
//! Timers are driven by a single host `setTimeout` armed for the earliest
//! pending deadline and re-armed after every dispatch.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, KeyboardEvent, Node};

use super::dom::{Page, element_center};
use crate::audio::AudioManager;
use crate::persistence::LocalStore;
use crate::settings::Settings;
use crate::sim::{Arcade, ClickTarget, Effect, InputEvent, Key};

struct App {
    arcade: RefCell<Arcade<LocalStore>>,
    page: Page,
    audio: RefCell<AudioManager>,
    timer: Cell<Option<i32>>,
    pump: RefCell<Option<Closure<dyn FnMut()>>>,
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() as u64)
        .unwrap_or(0)
}

impl App {
    /// Returns whether the DOM default action should be suppressed
    fn dispatch(&self, event: InputEvent) -> bool {
        let dispatch = self.arcade.borrow_mut().handle_event(now_ms(), &event);
        self.apply(dispatch.effects);
        self.rearm();
        dispatch.prevent_default
    }

    fn run(&self, f: impl FnOnce(&mut Arcade<LocalStore>, u64) -> Vec<Effect>) {
        let effects = {
            let mut arcade = self.arcade.borrow_mut();
            f(&mut arcade, now_ms())
        };
        self.apply(effects);
        self.rearm();
    }

    fn on_timer(&self) {
        self.timer.set(None);
        self.run(|arcade, now| arcade.advance(now));
    }

    fn rearm(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(id) = self.timer.take() {
            window.clear_timeout_with_handle(id);
        }
        let Some(deadline) = self.arcade.borrow().next_deadline() else {
            return;
        };
        let delay = deadline.saturating_sub(now_ms()).min(i32::MAX as u64) as i32;
        let pump = self.pump.borrow();
        let Some(callback) = pump.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => self.timer.set(Some(id)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    }

    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Beep(tone) => self.audio.borrow_mut().beep(&tone),
                Effect::ClickButton(card) => {
                    if let Some(button) = self.page.card_button(card) {
                        button.click();
                    }
                }
                Effect::OpenUrl(url) => {
                    let Some(window) = web_sys::window() else {
                        continue;
                    };
                    if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
                        log::warn!("Failed to open {}: {:?}", url, e);
                    }
                }
                other => self.page.apply(&other),
            }
        }
    }
}

fn listen(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    app: &Rc<App>,
    handler: impl Fn(&App, &Event) + 'static,
) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| handler(&app, &event));
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn click_on(target: &EventTarget, app: &Rc<App>, click: ClickTarget) -> Result<(), JsValue> {
    listen(target, "click", false, app, move |app, event| {
        let anchor = event
            .current_target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|el| element_center(&el))
            .unwrap_or_default();
        if app.dispatch(InputEvent::Click {
            target: click,
            anchor,
        }) {
            event.prevent_default();
        }
    })
}

fn wire_listeners(app: &Rc<App>, document: &Document) -> Result<(), JsValue> {
    let page = &app.page;

    listen(document, "keydown", false, app, |app, event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if app.dispatch(InputEvent::KeyDown(Key::from_dom(&event.key()))) {
            event.prevent_default();
        }
    })?;
    listen(document, "mousemove", true, app, |app, _| {
        app.dispatch(InputEvent::MouseMove);
    })?;
    listen(document, "touchstart", true, app, |app, _| {
        app.dispatch(InputEvent::TouchStart);
    })?;

    if let Some(screen) = &page.loading_screen {
        click_on(screen, app, ClickTarget::LoadingScreen)?;
    }

    for (i, card) in page.cards.iter().enumerate() {
        listen(&card.root, "mouseenter", true, app, move |app, _| {
            app.dispatch(InputEvent::Hover(i));
        })?;
        if let Some(button) = &card.button {
            click_on(button, app, ClickTarget::PlayButton(i))?;
        }
    }

    for (direction, el) in &page.dpad {
        click_on(el, app, ClickTarget::Dpad(*direction))?;
    }

    if let Some(start) = &page.start_button {
        click_on(start, app, ClickTarget::StartButton)?;
    }

    if let Some(modal) = &page.modal {
        let overlay: Node = modal.clone().into();
        listen(modal, "click", false, app, move |app, event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|t| t.is_same_node(Some(&overlay)));
            let target = if on_backdrop {
                ClickTarget::ModalBackdrop
            } else {
                ClickTarget::ModalContent
            };
            app.dispatch(InputEvent::click(target));
        })?;
    }

    if let Some(close) = &page.modal_close {
        click_on(close, app, ClickTarget::ModalClose)?;
    }

    Ok(())
}

fn with_app(f: impl FnOnce(&App)) {
    let app = APP.with(|slot| slot.borrow().clone());
    match app {
        Some(app) => f(&app),
        None => log::warn!("Arcade is not running"),
    }
}

/// Open the game-select modal
#[wasm_bindgen(js_name = openGameSelectModal)]
pub fn open_game_select_modal() {
    with_app(|app| app.run(|arcade, now| arcade.open_modal(now)));
}

/// Select tone plus a brief `flash` class on `el`
#[wasm_bindgen(js_name = flashBtn)]
pub fn flash_btn(el: Element) {
    with_app(|app| {
        let handle = app.page.register_flash(el);
        app.run(|arcade, now| arcade.flash_button(now, handle));
    });
}

/// Launch arpeggio, then open `url` in a new tab
#[wasm_bindgen(js_name = gsLaunch)]
pub fn gs_launch(url: String) {
    with_app(|app| app.run(|arcade, now| arcade.launch(now, &url)));
}

#[wasm_bindgen(js_name = setSoundMuted)]
pub fn set_sound_muted(muted: bool) {
    with_app(|app| {
        let volume = {
            let mut arcade = app.arcade.borrow_mut();
            arcade.set_muted(muted);
            arcade.settings().effective_volume()
        };
        app.audio.borrow_mut().set_master_volume(volume);
    });
}

/// Inline `onclick` handlers in the page call these by name
fn expose_globals(window: &web_sys::Window) -> Result<(), JsValue> {
    let open = Closure::<dyn Fn()>::new(open_game_select_modal);
    js_sys::Reflect::set(window, &"_openGameSelectModal".into(), open.as_ref())?;
    open.forget();

    let flash = Closure::<dyn Fn(Element)>::new(flash_btn);
    js_sys::Reflect::set(window, &"flashBtn".into(), flash.as_ref())?;
    flash.forget();

    let launch = Closure::<dyn Fn(String)>::new(gs_launch);
    js_sys::Reflect::set(window, &"gsLaunch".into(), launch.as_ref())?;
    launch.forget();

    Ok(())
}

fn start(document: &Document) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let page = Page::discover(document);
    page.inject_styles()?;

    let store = LocalStore::new();
    let settings = Settings::load(&store);
    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.effective_volume());

    let seed = js_sys::Date::now() as u64;
    let arcade = Arcade::new(page.spec(), settings, store, Box::new(page.layout()), seed);

    let app = Rc::new(App {
        arcade: RefCell::new(arcade),
        page,
        audio: RefCell::new(audio),
        timer: Cell::new(None),
        pump: RefCell::new(None),
    });
    let weak = Rc::downgrade(&app);
    *app.pump.borrow_mut() = Some(Closure::new(move || {
        if let Some(app) = weak.upgrade() {
            app.on_timer();
        }
    }));

    wire_listeners(&app, document)?;
    expose_globals(&window)?;
    APP.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&app)));

    app.run(|arcade, now| arcade.start(now));
    log::info!("Arcade cabinet running");
    Ok(())
}

/// Start the arcade once the DOM is parsed
pub fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if document.ready_state() != "loading" {
        return start(&document);
    }

    let doc = document.clone();
    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = start(&doc) {
            log::error!("Arcade failed to start: {:?}", e);
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

//! DOM collaborators and visual effects

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::banner::ConsoleLine;
use crate::sim::{CardSpec, Direction, Effect, GlitchLine, Layout, PageSpec};

/// Keyboard focus ring, injected at startup
const KB_FOCUS_CSS: &str = "
    .game-card.kb-focus {
      border-color: var(--yellow) !important;
      box-shadow: 0 0 28px rgba(255,255,0,.7), 0 8px 24px rgba(0,0,0,.6) !important;
      transform: translateY(-4px) !important;
    }
";

/// One `.game-card` and its parts
pub struct CardElements {
    pub root: HtmlElement,
    pub title: String,
    pub available: bool,
    pub button: Option<HtmlElement>,
    pub button_enabled: bool,
}

/// Everything the arcade touches on the page. Missing elements are `None`.
pub struct Page {
    pub document: Document,
    pub body: Option<HtmlElement>,
    pub loading_screen: Option<HtmlElement>,
    pub load_bar: Option<HtmlElement>,
    pub main_wrapper: Option<HtmlElement>,
    pub crt_frame: Option<HtmlElement>,
    pub cards: Vec<CardElements>,
    pub dpad: Vec<(Direction, HtmlElement)>,
    pub start_button: Option<HtmlElement>,
    pub modal: Option<HtmlElement>,
    pub modal_close: Option<HtmlElement>,
    stat_played: Option<Element>,
    high_score: Vec<Element>,
    glitches: RefCell<HashMap<u32, Element>>,
    particles: RefCell<HashMap<u32, HtmlElement>>,
    flashed: RefCell<HashMap<u32, Element>>,
    next_flash: Cell<u32>,
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn select<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Screen-space center of an element
pub fn element_center(el: &Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        (rect.left() + rect.width() / 2.0) as f32,
        (rect.top() + rect.height() / 2.0) as f32,
    )
}

impl Page {
    pub fn discover(document: &Document) -> Self {
        let mut cards = Vec::new();
        if let Ok(list) = document.query_selector_all(".game-card") {
            for i in 0..list.length() {
                let Some(root) = list.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                    continue;
                };
                let title = select::<Element>(&root, ".card-title")
                    .and_then(|t| t.text_content())
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                let button = select::<HtmlElement>(&root, ".play-btn");
                let button_enabled = button.as_ref().is_some_and(|b| !has_class(b, "disabled"));
                cards.push(CardElements {
                    available: !has_class(&root, "coming-soon"),
                    root,
                    title,
                    button,
                    button_enabled,
                });
            }
        }

        let dpad = Direction::ALL
            .iter()
            .filter_map(|&d| by_id::<HtmlElement>(document, d.element_id()).map(|el| (d, el)))
            .collect();

        let high_score = ["hi-score-val", "stat-score"]
            .iter()
            .filter_map(|id| document.get_element_by_id(id))
            .collect();

        let page = Self {
            document: document.clone(),
            body: document.body(),
            loading_screen: by_id(document, "loading-screen"),
            load_bar: by_id(document, "load-bar"),
            main_wrapper: by_id(document, "main-wrapper"),
            crt_frame: document
                .query_selector(".crt-frame")
                .ok()
                .flatten()
                .and_then(|e| e.dyn_into().ok()),
            cards,
            dpad,
            start_button: by_id(document, "start-btn"),
            modal: by_id(document, "game-select-modal"),
            modal_close: by_id(document, "gs-close-btn"),
            stat_played: document.get_element_by_id("stat-played"),
            high_score,
            glitches: RefCell::new(HashMap::new()),
            particles: RefCell::new(HashMap::new()),
            flashed: RefCell::new(HashMap::new()),
            next_flash: Cell::new(0),
        };
        log::info!(
            "Found {} cards ({} available)",
            page.cards.len(),
            page.cards.iter().filter(|c| c.available).count()
        );
        page
    }

    /// Core view of the page
    pub fn spec(&self) -> PageSpec {
        PageSpec {
            cards: self
                .cards
                .iter()
                .map(|c| CardSpec {
                    title: c.title.clone(),
                    available: c.available,
                    has_button: c.button.is_some(),
                    button_enabled: c.button_enabled,
                })
                .collect(),
            loading_screen: self.loading_screen.is_some(),
            crt_frame: self.crt_frame.is_some(),
            modal: self.modal.is_some(),
        }
    }

    pub fn layout(&self) -> DomLayout {
        DomLayout {
            buttons: self.cards.iter().map(|c| c.button.clone()).collect(),
        }
    }

    pub fn card_button(&self, card: usize) -> Option<&HtmlElement> {
        self.cards.get(card)?.button.as_ref()
    }

    pub fn inject_styles(&self) -> Result<(), JsValue> {
        let Some(head) = self.document.head() else {
            return Ok(());
        };
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(KB_FOCUS_CSS));
        head.append_child(&style)?;
        Ok(())
    }

    /// Track an arbitrary element for `SetButtonFlash`
    pub fn register_flash(&self, el: Element) -> u32 {
        let handle = self.next_flash.get();
        self.next_flash.set(handle.wrapping_add(1));
        self.flashed.borrow_mut().insert(handle, el);
        handle
    }

    /// Apply a visual effect. Audio, clicks and navigation are handled by
    /// the caller.
    pub fn apply(&self, effect: &Effect) {
        match effect {
            Effect::SetLoadProgress(p) => {
                if let Some(bar) = &self.load_bar {
                    set_style(bar, "width", &format!("{}%", p));
                }
            }
            Effect::FadeOutLoading => {
                if let Some(screen) = &self.loading_screen {
                    set_style(screen, "transition", "opacity .5s ease");
                    set_style(screen, "opacity", "0");
                }
            }
            Effect::RevealMain => {
                if let Some(screen) = &self.loading_screen {
                    set_style(screen, "display", "none");
                }
                if let Some(wrapper) = &self.main_wrapper {
                    let _ = wrapper.class_list().remove_1("hidden");
                    set_style(wrapper, "animation", "fadeUp .6s ease both");
                }
            }
            Effect::SetFrameOpacity(opacity) => {
                if let Some(frame) = &self.crt_frame {
                    let value = if *opacity >= 1.0 {
                        "1".to_string()
                    } else {
                        format!("{:.2}", opacity)
                    };
                    set_style(frame, "opacity", &value);
                }
            }
            Effect::AddGlitchLine(line) => self.add_glitch(line),
            Effect::RemoveGlitchLine(id) => {
                if let Some(el) = self.glitches.borrow_mut().remove(id) {
                    el.remove();
                }
            }
            Effect::SetKeyboardFocus(card) => {
                for (i, c) in self.cards.iter().enumerate() {
                    let _ = if i == *card {
                        c.root.class_list().add_1("kb-focus")
                    } else {
                        c.root.class_list().remove_1("kb-focus")
                    };
                }
            }
            Effect::ScrollIntoView(card) => {
                if let Some(c) = self.cards.get(*card) {
                    let opts = ScrollIntoViewOptions::new();
                    opts.set_behavior(ScrollBehavior::Smooth);
                    opts.set_block(ScrollLogicalPosition::Nearest);
                    c.root.scroll_into_view_with_scroll_into_view_options(&opts);
                }
            }
            Effect::SetDpadPressed { direction, pressed } => {
                if let Some((_, el)) = self.dpad.iter().find(|(d, _)| d == direction) {
                    let _ = if *pressed {
                        el.class_list().add_1("pressed")
                    } else {
                        el.class_list().remove_1("pressed")
                    };
                }
            }
            Effect::SpawnParticle {
                id,
                pos,
                size,
                color,
            } => self.spawn_particle(*id, *pos, *size, color),
            Effect::MoveParticle { id, pos, opacity } => {
                if let Some(p) = self.particles.borrow().get(id) {
                    set_style(p, "left", &format!("{}px", pos.x));
                    set_style(p, "top", &format!("{}px", pos.y));
                    set_style(p, "opacity", &format!("{:.2}", opacity));
                }
            }
            Effect::RemoveParticle(id) => {
                if let Some(p) = self.particles.borrow_mut().remove(id) {
                    p.remove();
                }
            }
            Effect::SetPlayedCount(text) => {
                if let Some(el) = &self.stat_played {
                    el.set_text_content(Some(text));
                }
            }
            Effect::SetHighScore(text) => {
                for el in &self.high_score {
                    el.set_text_content(Some(text));
                }
            }
            Effect::Highlight(card) => {
                self.clear_highlights();
                if let Some(c) = self.cards.get(*card) {
                    set_style(&c.root, "border-color", "var(--yellow)");
                    set_style(&c.root, "box-shadow", "0 0 22px rgba(255,255,0,.5)");
                }
            }
            Effect::ClearHighlights => self.clear_highlights(),
            Effect::ShowModal => {
                if let Some(modal) = &self.modal {
                    let _ = modal.class_list().remove_1("hidden");
                }
                if let Some(body) = &self.body {
                    set_style(body, "overflow", "hidden");
                }
            }
            Effect::HideModal => {
                if let Some(modal) = &self.modal {
                    let _ = modal.class_list().add_1("hidden");
                }
                if let Some(body) = &self.body {
                    let _ = body.style().remove_property("overflow");
                }
            }
            Effect::Console(line) => log_styled(line),
            Effect::SetButtonFlash { handle, on } => {
                let mut flashed = self.flashed.borrow_mut();
                if *on {
                    if let Some(el) = flashed.get(handle) {
                        let _ = el.class_list().add_1("flash");
                    }
                } else if let Some(el) = flashed.remove(handle) {
                    let _ = el.class_list().remove_1("flash");
                }
            }
            Effect::Beep(_) | Effect::ClickButton(_) | Effect::OpenUrl(_) => {}
        }
    }

    fn clear_highlights(&self) {
        for c in &self.cards {
            set_style(&c.root, "border-color", "");
            set_style(&c.root, "box-shadow", "");
        }
    }

    fn add_glitch(&self, line: &GlitchLine) {
        let Some(frame) = &self.crt_frame else { return };
        let Ok(el) = self.document.create_element("div") else { return };
        let css = format!(
            "position:absolute; left:0; right:0; height:{}px; top:{}%; \
             background:rgba(0,255,255,{:.2}); pointer-events:none; z-index:25; animation:none;",
            line.height_px, line.top_percent, line.alpha
        );
        let _ = el.set_attribute("style", &css);
        if frame.append_child(&el).is_ok() {
            self.glitches.borrow_mut().insert(line.id, el);
        }
    }

    fn spawn_particle(&self, id: u32, pos: Vec2, size: u32, color: &str) {
        let Some(body) = &self.body else { return };
        let Some(el) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let css = format!(
            "position:fixed; width:{size}px; height:{size}px; background:{color}; \
             border-radius:1px; box-shadow:0 0 6px {color}; left:{x}px; top:{y}px; \
             pointer-events:none; z-index:9999; transform:translate(-50%,-50%);",
            x = pos.x,
            y = pos.y,
        );
        el.style().set_css_text(&css);
        if body.append_child(&el).is_ok() {
            self.particles.borrow_mut().insert(id, el);
        }
    }
}

fn log_styled(line: &ConsoleLine) {
    web_sys::console::log_2(
        &JsValue::from_str(&format!("%c{}", line.text)),
        &JsValue::from_str(line.style),
    );
}

/// Button geometry from the live DOM
pub struct DomLayout {
    buttons: Vec<Option<HtmlElement>>,
}

impl Layout for DomLayout {
    fn button_center(&self, card: usize) -> Option<Vec2> {
        self.buttons.get(card)?.as_ref().map(|b| element_center(b))
    }
}

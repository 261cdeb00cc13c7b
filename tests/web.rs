#![cfg(target_arch = "wasm32")]

use arcade_cabinet::audio::AudioManager;
use arcade_cabinet::persistence::LocalStore;
use arcade_cabinet::platform::dom::Page;
use arcade_cabinet::sim::{Effect, Layout};
use arcade_cabinet::{KeyValueStore, Settings, Tone};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r#"
<div id="loading-screen"><div id="load-bar"></div></div>
<div id="main-wrapper" class="hidden">
  <div class="crt-frame"></div>
  <div class="game-card"><div class="card-title"> Star Pong </div><button class="play-btn">PLAY</button></div>
  <div class="game-card coming-soon"><div class="card-title">Soon</div><button class="play-btn disabled">SOON</button></div>
  <span id="stat-played">00</span><span id="hi-score-val"></span><span id="stat-score"></span>
</div>
"#;

fn mount() -> Page {
    let document = web_sys::window()
        .expect("no window")
        .document()
        .expect("no document");
    let body = document.body().expect("no body");
    body.set_inner_html(FIXTURE);
    Page::discover(&document)
}

#[wasm_bindgen_test]
fn local_store_round_trip() {
    let mut store = LocalStore::new();
    assert!(store.is_available());
    store.set("arcade-test", "41");
    assert_eq!(store.get("arcade-test").as_deref(), Some("41"));
    store.remove("arcade-test");
    assert_eq!(store.get("arcade-test"), None);
}

#[wasm_bindgen_test]
fn audio_beep_does_not_panic() {
    let mut audio = AudioManager::new();
    audio.beep(&Tone::default());
    audio.set_master_volume(Settings { muted: true, ..Default::default() }.effective_volume());
    assert_eq!(audio.master_volume(), 0.0);
    audio.beep(&Tone::default());
}

#[wasm_bindgen_test]
fn page_discovery_reads_cards() {
    let page = mount();
    let spec = page.spec();
    assert!(spec.loading_screen);
    assert!(spec.crt_frame);
    assert!(!spec.modal);
    assert_eq!(spec.cards.len(), 2);
    assert_eq!(spec.cards[0].title, "Star Pong");
    assert!(spec.cards[0].is_activatable());
    assert!(!spec.cards[1].available);
    assert!(!spec.cards[1].button_enabled);
    assert!(page.layout().button_center(0).is_some());
    assert!(page.layout().button_center(5).is_none());
}

#[wasm_bindgen_test]
fn effects_update_dom() {
    let page = mount();
    page.apply(&Effect::SetPlayedCount("05".into()));
    page.apply(&Effect::SetHighScore("012600".into()));
    page.apply(&Effect::SetKeyboardFocus(0));
    page.apply(&Effect::RevealMain);

    let document = page.document.clone();
    let text = |id: &str| document.get_element_by_id(id).and_then(|e| e.text_content());
    assert_eq!(text("stat-played").as_deref(), Some("05"));
    assert_eq!(text("hi-score-val").as_deref(), Some("012600"));
    assert_eq!(text("stat-score").as_deref(), Some("012600"));
    assert!(page.cards[0].root.class_list().contains("kb-focus"));

    let wrapper = document.get_element_by_id("main-wrapper").expect("wrapper");
    assert!(!wrapper.class_list().contains("hidden"));
}

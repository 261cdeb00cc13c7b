//! Arcade Cabinet entry point
//!
//! On the web this boots the platform layer. Natively it runs a short
//! headless session against an in-memory store and logs what the page
//! would have done.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Arcade Cabinet starting...");
    if let Err(e) = arcade_cabinet::platform::boot() {
        log::error!("Arcade failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arcade_cabinet::consts::{ATTRACT_IDLE_MS, PLAYED_KEY};
    use arcade_cabinet::sim::{CardSpec, ClickTarget, FixedLayout, Key, PageSpec};
    use arcade_cabinet::{Arcade, Effect, InputEvent, KeyValueStore, MemoryStore, Settings};
    use glam::Vec2;

    env_logger::init();
    log::info!("Arcade Cabinet (native) starting headless session...");

    let page = PageSpec {
        cards: vec![
            CardSpec::playable("Star Pong"),
            CardSpec::playable("Snake 3D"),
            CardSpec::coming_soon("Asteroids"),
        ],
        ..PageSpec::default()
    };
    let layout = FixedLayout(vec![
        Vec2::new(160.0, 300.0),
        Vec2::new(480.0, 300.0),
        Vec2::new(800.0, 300.0),
    ]);
    let store = MemoryStore::with_items([(PLAYED_KEY, "7")]);
    let mut arcade = Arcade::new(page, Settings::default(), store, Box::new(layout), 42);

    let log_effects = |at: u64, effects: Vec<Effect>| {
        for effect in effects {
            match effect {
                // Per-frame noise
                Effect::MoveParticle { .. } | Effect::SetLoadProgress(_) => {}
                other => log::info!("[{:>6} ms] {:?}", at, other),
            }
        }
    };

    log_effects(0, arcade.start(0));
    log_effects(400, arcade.advance(400));

    // Any key skips the loading bar
    let d = arcade.handle_event(400, &InputEvent::KeyDown(Key::Other));
    log_effects(400, d.effects);
    log_effects(1200, arcade.advance(1200));

    for (at, key) in [(1300, Key::ArrowDown), (1500, Key::ArrowDown), (1700, Key::Enter)] {
        let d = arcade.handle_event(at, &InputEvent::KeyDown(key));
        log_effects(at, d.effects);
    }
    log_effects(1900, arcade.advance(1900));

    // What the browser does with ClickButton: click the card's button
    let d = arcade.handle_event(
        1900,
        &InputEvent::Click {
            target: ClickTarget::PlayButton(1),
            anchor: Vec2::new(480.0, 300.0),
        },
    );
    log_effects(1900, d.effects);
    log_effects(2500, arcade.advance(2500));

    let idle_until = 1700 + ATTRACT_IDLE_MS + 4000;
    log_effects(idle_until, arcade.advance(idle_until));

    println!(
        "Session over: phase {:?}, focus {}, played {} (stored {:?}), high score {}, highlight {:?}",
        arcade.loading_phase(),
        arcade.focus_index(),
        arcade.stats().played(),
        arcade.store().get(PLAYED_KEY),
        arcade.stats().high_score(),
        arcade.attract_highlight(),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

//! Event dispatcher
//!
//! Owns every component, the task queue and the RNG. The platform feeds it
//! input events and clock updates and applies the returned effects.

use glam::Vec2;

use super::attract::AttractMode;
use super::burst::PixelBurst;
use super::cards::CardEffects;
use super::context::{Command, Context, Runtime, Task};
use super::crt::CrtEffects;
use super::effect::Effect;
use super::event::{ClickTarget, InputEvent};
use super::loading::{LoadingPhase, LoadingSequence};
use super::modal::{Modal, ModalState};
use super::navigator::Navigator;
use super::page::{Layout, PageSpec};
use super::stats::Stats;
use crate::audio::SoundEffect;
use crate::banner::banner;
use crate::consts::{BUTTON_FLASH_MS, LAUNCH_DELAY_MS};
use crate::persistence::KeyValueStore;
use crate::settings::Settings;

/// Result of dispatching one input event
#[derive(Debug, Default)]
pub struct Dispatch {
    pub effects: Vec<Effect>,
    /// The browser's default action should be suppressed
    pub prevent_default: bool,
}

struct Components {
    loading: LoadingSequence,
    crt: CrtEffects,
    navigator: Navigator,
    cards: CardEffects,
    bursts: PixelBurst,
    stats: Stats,
    attract: AttractMode,
    modal: Modal,
}

impl Components {
    /// Subscribers in registration order
    fn on_event<S: KeyValueStore>(
        &mut self,
        event: &InputEvent,
        cx: &mut Context,
        store: &mut S,
        layout: &dyn Layout,
    ) {
        self.loading.on_event(event, cx);
        self.navigator.on_event(event, cx, layout);
        self.cards.on_event(event, cx);
        if let InputEvent::Click {
            target: ClickTarget::StartButton,
            ..
        } = event
        {
            cx.prevent_default();
            cx.command(Command::OpenModal);
        }
        self.modal.on_event(event, cx);
        self.attract.on_event(event, cx);
        self.run_commands(cx, store);
    }

    fn on_task<S: KeyValueStore>(&mut self, task: Task, cx: &mut Context, store: &mut S) {
        match task {
            Task::Tone(tone) => cx.emit(Effect::Beep(tone)),
            Task::Loading(t) => self.loading.on_task(t, cx),
            Task::Crt(t) => self.crt.on_task(t, cx),
            Task::Nav(t) => self.navigator.on_task(t, cx),
            Task::BurstFrame(id) => self.bursts.on_frame(id, cx),
            Task::Attract(t) => self.attract.on_task(t, cx),
            Task::ButtonFlashOff(handle) => cx.emit(Effect::SetButtonFlash { handle, on: false }),
            Task::OpenUrl(url) => cx.emit(Effect::OpenUrl(url)),
        }
        self.run_commands(cx, store);
    }

    fn run_commands<S: KeyValueStore>(&mut self, cx: &mut Context, store: &mut S) {
        while let Some(command) = cx.next_command() {
            match command {
                Command::SpawnBurst(anchor) => {
                    self.bursts.spawn(anchor, cx);
                }
                Command::RecordPlay => self.stats.record_play(store, cx),
                Command::OpenModal => {
                    self.modal.open(cx);
                }
            }
        }
    }
}

/// The whole interaction layer
pub struct Arcade<S: KeyValueStore> {
    now: u64,
    started: bool,
    page: PageSpec,
    settings: Settings,
    store: S,
    layout: Box<dyn Layout>,
    runtime: Runtime,
    parts: Components,
}

impl<S: KeyValueStore> Arcade<S> {
    pub fn new(page: PageSpec, settings: Settings, store: S, layout: Box<dyn Layout>, seed: u64) -> Self {
        let parts = Components {
            loading: LoadingSequence::new(page.loading_screen),
            crt: CrtEffects::new(page.crt_frame && settings.effective_crt_effects()),
            navigator: Navigator::new(&page),
            cards: CardEffects::new(&page),
            bursts: PixelBurst::new(settings.effective_particles()),
            stats: Stats::load(&store),
            attract: AttractMode::new(page.cards.len(), settings.attract_mode),
            modal: Modal::new(page.modal),
        };
        Self {
            now: 0,
            started: false,
            page,
            settings,
            store,
            layout,
            runtime: Runtime::new(seed),
            parts,
        }
    }

    /// Wire everything up: stats display, loading bar, CRT timers, attract
    /// countdown and the console banner. Only the first call does anything.
    pub fn start(&mut self, now: u64) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        self.now = now;

        let mut cx = Context::new(now, &mut self.runtime);
        self.parts.loading.start(&mut cx);
        self.parts.crt.start(&mut cx);
        self.parts.attract.start(&mut cx);
        self.parts.stats.render(&mut cx);
        for line in banner(self.page.available_cards().count()) {
            cx.emit(Effect::Console(line));
        }

        log::info!(
            "Arcade started: {} cards, scheduler holds {} tasks",
            self.page.cards.len(),
            self.runtime.scheduler.len()
        );
        self.runtime.take_effects()
    }

    /// Run every task due up to `now`
    pub fn advance(&mut self, now: u64) -> Vec<Effect> {
        self.run_due(now);
        self.runtime.take_effects()
    }

    /// Dispatch one input event at `now`; due tasks run first
    pub fn handle_event(&mut self, now: u64, event: &InputEvent) -> Dispatch {
        self.run_due(now);
        log::trace!("event {:?} at {}", event, self.now);

        let mut cx = Context::new(self.now, &mut self.runtime);
        self.parts
            .on_event(event, &mut cx, &mut self.store, self.layout.as_ref());
        let prevent_default = cx.default_prevented();

        Dispatch {
            effects: self.runtime.take_effects(),
            prevent_default,
        }
    }

    /// Open the game-select modal (global entry point for the start button)
    pub fn open_modal(&mut self, now: u64) -> Vec<Effect> {
        self.with_context(now, |parts, cx| {
            parts.modal.open(cx);
        })
    }

    /// Select tone plus a short `flash` on an arbitrary button
    pub fn flash_button(&mut self, now: u64, handle: u32) -> Vec<Effect> {
        self.with_context(now, |_, cx| {
            cx.play(SoundEffect::Select);
            cx.emit(Effect::SetButtonFlash { handle, on: true });
            cx.schedule(BUTTON_FLASH_MS, Task::ButtonFlashOff(handle));
        })
    }

    /// Play the launch arpeggio, then open `url` in a new tab
    pub fn launch(&mut self, now: u64, url: &str) -> Vec<Effect> {
        let url = url.to_string();
        self.with_context(now, move |_, cx| {
            cx.play(SoundEffect::Play);
            cx.schedule(LAUNCH_DELAY_MS, Task::OpenUrl(url));
        })
    }

    /// Spawn a pixel burst at an arbitrary point
    pub fn burst_at(&mut self, now: u64, anchor: Vec2) -> Vec<Effect> {
        self.with_context(now, |parts, cx| {
            parts.bursts.spawn(anchor, cx);
        })
    }

    /// Update and persist the mute preference
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings.save(&mut self.store);
    }

    /// Deadline of the next scheduled task, for arming the host timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.runtime.scheduler.next_deadline()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn page(&self) -> &PageSpec {
        &self.page
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn loading_phase(&self) -> LoadingPhase {
        self.parts.loading.phase()
    }

    pub fn load_progress(&self) -> f32 {
        self.parts.loading.progress()
    }

    /// Keyboard focus index, -1 when nothing is focused
    pub fn focus_index(&self) -> i64 {
        self.parts.navigator.focus_index()
    }

    pub fn modal_state(&self) -> ModalState {
        self.parts.modal.state()
    }

    pub fn live_particles(&self) -> usize {
        self.parts.bursts.live_particles()
    }

    pub fn live_glitches(&self) -> usize {
        self.parts.crt.live_glitches()
    }

    pub fn attract_highlight(&self) -> Option<usize> {
        self.parts.attract.highlighted()
    }

    pub fn stats(&self) -> &Stats {
        &self.parts.stats
    }

    fn run_due(&mut self, now: u64) {
        // Clock never runs backwards
        let now = now.max(self.now);
        while let Some((deadline, task)) = self.runtime.scheduler.pop_due(now) {
            let mut cx = Context::overdue(deadline, now, &mut self.runtime);
            self.parts.on_task(task, &mut cx, &mut self.store);
        }
        self.now = now;
    }

    fn with_context(&mut self, now: u64, f: impl FnOnce(&mut Components, &mut Context)) -> Vec<Effect> {
        self.run_due(now);
        let mut cx = Context::new(self.now, &mut self.runtime);
        f(&mut self.parts, &mut cx);
        self.parts.run_commands(&mut cx, &mut self.store);
        self.runtime.take_effects()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;
    use crate::sim::event::{Direction, Key};
    use crate::sim::page::{CardSpec, FixedLayout};
    use proptest::prelude::*;

    fn page() -> PageSpec {
        PageSpec {
            cards: vec![
                CardSpec::playable("Snake"),
                CardSpec::playable("Breakout"),
                CardSpec::coming_soon("Galaga"),
            ],
            ..Default::default()
        }
    }

    fn layout() -> Box<dyn Layout> {
        Box::new(FixedLayout(vec![
            Vec2::new(100.0, 200.0),
            Vec2::new(300.0, 200.0),
            Vec2::new(500.0, 200.0),
        ]))
    }

    fn arcade_with(page: PageSpec, settings: Settings, store: MemoryStore) -> Arcade<MemoryStore> {
        Arcade::new(page, settings, store, layout(), 42)
    }

    fn arcade() -> Arcade<MemoryStore> {
        arcade_with(page(), Settings::default(), MemoryStore::new())
    }

    /// Advance in small steps, the way a live host timer would
    fn run_to(a: &mut Arcade<MemoryStore>, until: u64) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut t = a.now();
        while t < until {
            t = (t + 10).min(until);
            effects.extend(a.advance(t));
        }
        effects
    }

    fn count(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> usize {
        effects.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_start_renders_stats_and_banner() {
        let store = MemoryStore::with_items([(PLAYED_KEY, "4")]);
        let mut a = arcade_with(page(), Settings::default(), store);
        let effects = a.start(0);
        assert!(effects.contains(&Effect::SetPlayedCount("04".to_string())));
        assert!(effects.contains(&Effect::SetHighScore("012600".to_string())));
        assert_eq!(count(&effects, |e| matches!(e, Effect::Console(_))), 6);
        assert!(a.start(5).is_empty());
    }

    #[test]
    fn test_forced_completion_reveal_timing() {
        let mut a = arcade();
        a.start(0);
        let d = a.handle_event(100, &InputEvent::key(Key::Other));
        assert!(d.effects.contains(&Effect::SetLoadProgress(100.0)));
        assert_eq!(a.load_progress(), 100.0);

        a.advance(299);
        assert_eq!(a.loading_phase(), LoadingPhase::Loading);
        let effects = a.advance(300);
        assert_eq!(a.loading_phase(), LoadingPhase::Revealing);
        assert!(effects.contains(&Effect::FadeOutLoading));
        assert!(effects.iter().any(|e| matches!(e, Effect::Beep(_))));

        let effects = a.advance(799);
        assert!(!effects.contains(&Effect::RevealMain));
        let effects = a.advance(800);
        assert!(effects.contains(&Effect::RevealMain));
        assert_eq!(a.loading_phase(), LoadingPhase::Revealed);
    }

    #[test]
    fn test_loading_screen_click_triggers_once() {
        let mut a = arcade();
        a.start(0);
        a.handle_event(50, &InputEvent::click(ClickTarget::LoadingScreen));
        a.handle_event(60, &InputEvent::click(ClickTarget::LoadingScreen));
        a.handle_event(70, &InputEvent::key(Key::Enter));
        let effects = a.advance(5_000);
        assert_eq!(count(&effects, |e| *e == Effect::FadeOutLoading), 1);
        assert_eq!(count(&effects, |e| *e == Effect::RevealMain), 1);
        // No bar updates after the forced fill
        assert!(!effects.iter().any(|e| matches!(e, Effect::SetLoadProgress(_))));
    }

    #[test]
    fn test_full_bar_waits_for_input() {
        let mut a = arcade();
        a.start(0);
        run_to(&mut a, 10_000);
        assert_eq!(a.load_progress(), 100.0);
        assert_eq!(a.loading_phase(), LoadingPhase::Loading);

        a.handle_event(10_000, &InputEvent::click(ClickTarget::LoadingScreen));
        a.advance(10_700);
        assert_eq!(a.loading_phase(), LoadingPhase::Revealed);
    }

    #[test]
    fn test_no_loading_screen_reveals_immediately() {
        let page = PageSpec {
            loading_screen: false,
            ..page()
        };
        let mut a = arcade_with(page, Settings::default(), MemoryStore::new());
        let effects = a.start(0);
        assert!(effects.contains(&Effect::RevealMain));
        assert_eq!(a.loading_phase(), LoadingPhase::Revealed);
    }

    #[test]
    fn test_card_click_records_play_and_bursts() {
        let store = MemoryStore::with_items([(PLAYED_KEY, "3")]);
        let mut a = arcade_with(page(), Settings::default(), store);
        a.start(0);

        let click = InputEvent::Click {
            target: ClickTarget::PlayButton(1),
            anchor: Vec2::new(300.0, 200.0),
        };
        a.handle_event(1_000, &click);
        let d = a.handle_event(1_010, &click);

        assert_eq!(a.store().get(PLAYED_KEY).as_deref(), Some("5"));
        assert!(d.effects.contains(&Effect::SetPlayedCount("05".to_string())));
        assert_eq!(a.stats().played(), 5);
        assert_eq!(a.live_particles(), 2 * BURST_PARTICLES);

        a.advance(1_010 + BURST_FRAMES as u64 * BURST_FRAME_MS);
        assert_eq!(a.live_particles(), 0);
    }

    #[test]
    fn test_disabled_card_click_ignored() {
        let mut a = arcade();
        a.start(0);
        let d = a.handle_event(100, &InputEvent::click(ClickTarget::PlayButton(2)));
        assert_eq!(a.stats().played(), 0);
        assert_eq!(a.live_particles(), 0);
        assert!(!d.effects.iter().any(|e| matches!(e, Effect::SetPlayedCount(_))));
    }

    #[test]
    fn test_enter_clicks_focused_button_after_delay() {
        let mut a = arcade();
        a.start(0);
        a.handle_event(10, &InputEvent::key(Key::ArrowDown));
        assert_eq!(a.focus_index(), 0);

        let d = a.handle_event(1_000, &InputEvent::key(Key::Enter));
        assert!(d.prevent_default);
        assert_eq!(a.live_particles(), BURST_PARTICLES);

        let effects = a.advance(1_199);
        assert!(!effects.contains(&Effect::ClickButton(0)));
        let effects = a.advance(1_200);
        assert!(effects.contains(&Effect::ClickButton(0)));
        // The real click comes back as an event; nothing counted yet
        assert_eq!(a.stats().played(), 0);
    }

    #[test]
    fn test_arrow_flashes_dpad() {
        let mut a = arcade();
        a.start(0);
        let d = a.handle_event(10, &InputEvent::key(Key::ArrowRight));
        assert!(d.effects.contains(&Effect::SetDpadPressed {
            direction: Direction::Down,
            pressed: true
        }));
        let effects = a.advance(10 + DPAD_FLASH_MS);
        assert!(effects.contains(&Effect::SetDpadPressed {
            direction: Direction::Down,
            pressed: false
        }));
    }

    #[test]
    fn test_attract_waits_for_idle() {
        let mut a = arcade();
        a.start(0);
        let effects = a.advance(ATTRACT_IDLE_MS - 1);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Highlight(_))));

        let effects = a.advance(ATTRACT_IDLE_MS);
        assert!(effects.contains(&Effect::Highlight(0)));
        let effects = a.advance(ATTRACT_IDLE_MS + ATTRACT_CYCLE_MS);
        assert!(effects.contains(&Effect::Highlight(1)));
        let effects = a.advance(ATTRACT_IDLE_MS + 2 * ATTRACT_CYCLE_MS);
        // Unavailable cards are part of the cycle
        assert!(effects.contains(&Effect::Highlight(2)));
        let effects = a.advance(ATTRACT_IDLE_MS + 3 * ATTRACT_CYCLE_MS);
        assert!(effects.contains(&Effect::Highlight(0)));
    }

    #[test]
    fn test_activity_resets_attract() {
        let mut a = arcade();
        a.start(0);
        a.handle_event(15_000, &InputEvent::MouseMove);
        let effects = a.advance(34_999);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Highlight(_))));
        a.advance(35_000);
        assert_eq!(a.attract_highlight(), Some(0));

        let d = a.handle_event(36_000, &InputEvent::TouchStart);
        assert!(d.effects.contains(&Effect::ClearHighlights));
        assert_eq!(a.attract_highlight(), None);
        a.advance(55_999);
        assert_eq!(a.attract_highlight(), None);
        a.advance(56_000);
        assert!(a.attract_highlight().is_some());
    }

    #[test]
    fn test_clicks_do_not_reset_attract() {
        let mut a = arcade();
        a.start(0);
        a.handle_event(19_000, &InputEvent::click(ClickTarget::Other));
        a.advance(20_000);
        assert_eq!(a.attract_highlight(), Some(0));
    }

    #[test]
    fn test_start_button_opens_modal() {
        let mut a = arcade();
        a.start(0);
        let d = a.handle_event(10, &InputEvent::click(ClickTarget::StartButton));
        assert!(d.prevent_default);
        assert!(d.effects.contains(&Effect::ShowModal));
        assert_eq!(a.modal_state(), ModalState::Open);

        a.handle_event(20, &InputEvent::click(ClickTarget::ModalContent));
        assert_eq!(a.modal_state(), ModalState::Open);

        let d = a.handle_event(30, &InputEvent::key(Key::Escape));
        assert!(d.effects.contains(&Effect::HideModal));
        let d = a.handle_event(40, &InputEvent::key(Key::Escape));
        assert!(!d.effects.contains(&Effect::HideModal));
    }

    #[test]
    fn test_open_modal_entry_point() {
        let mut a = arcade();
        a.start(0);
        let effects = a.open_modal(10);
        assert!(effects.contains(&Effect::ShowModal));
        assert!(a.open_modal(20).is_empty());
    }

    #[test]
    fn test_flash_button_and_launch() {
        let mut a = arcade();
        a.start(0);
        let effects = a.flash_button(100, 7);
        assert!(effects.contains(&Effect::SetButtonFlash { handle: 7, on: true }));
        let effects = a.advance(100 + BUTTON_FLASH_MS);
        assert!(effects.contains(&Effect::SetButtonFlash { handle: 7, on: false }));

        a.launch(1_000, "https://example.com/snake");
        let effects = a.advance(1_000 + LAUNCH_DELAY_MS);
        assert!(effects.contains(&Effect::OpenUrl("https://example.com/snake".to_string())));
    }

    #[test]
    fn test_reduced_motion_disables_crt_and_bursts() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut a = arcade_with(page(), settings, MemoryStore::new());
        a.start(0);
        let effects = a.advance(120_000);
        assert!(!effects.iter().any(|e| matches!(
            e,
            Effect::SetFrameOpacity(_) | Effect::AddGlitchLine(_)
        )));
        a.handle_event(120_000, &InputEvent::click(ClickTarget::PlayButton(0)));
        assert_eq!(a.live_particles(), 0);
        assert_eq!(a.stats().played(), 1);
    }

    #[test]
    fn test_crt_effects_stay_in_range() {
        let mut a = arcade();
        a.start(0);
        let effects = run_to(&mut a, 600_000);

        let mut added = 0;
        let mut removed = 0;
        for e in &effects {
            match e {
                Effect::SetFrameOpacity(o) => {
                    assert!(*o == 1.0 || (0.88..=0.98).contains(o), "opacity {}", o)
                }
                Effect::AddGlitchLine(line) => {
                    added += 1;
                    assert!((1..=2).contains(&line.height_px));
                    assert!(line.top_percent < 100);
                    assert!((0.04..=0.14).contains(&line.alpha));
                }
                Effect::RemoveGlitchLine(_) => removed += 1,
                _ => {}
            }
        }
        // ~1500 ticks at 7% - some glitches must have fired
        assert!(added > 0);
        assert_eq!(added - removed, a.live_glitches());
    }

    #[test]
    fn test_long_gap_collapses_missed_ticks() {
        let mut a = arcade();
        a.start(0);
        run_to(&mut a, 30_000);
        assert!(a.attract_highlight().is_some());

        // Tab in the background for an hour, then the mouse moves
        let wake = 30_000 + 3_600_000;
        let d = a.handle_event(wake, &InputEvent::MouseMove);
        assert!(count(&d.effects, |e| matches!(e, Effect::Highlight(_))) <= 1);
        assert!(count(&d.effects, |e| matches!(e, Effect::AddGlitchLine(_))) <= 1);
        assert!(count(&d.effects, |e| matches!(e, Effect::SetFrameOpacity(_))) <= 2);
        assert!(d.effects.len() < 20, "{} effects", d.effects.len());
        assert_eq!(a.attract_highlight(), None);
        assert!(a.next_deadline().is_some_and(|t| t > wake));
    }

    #[test]
    fn test_set_muted_persists() {
        let mut a = arcade();
        a.set_muted(true);
        assert!(Settings::load(a.store()).muted);
        assert_eq!(a.settings().effective_volume(), 0.0);
    }

    #[test]
    fn test_next_deadline_tracks_queue() {
        let mut a = arcade();
        assert_eq!(a.next_deadline(), None);
        a.start(0);
        assert_eq!(a.next_deadline(), Some(LOAD_TICK_MS));
    }

    proptest! {
        #[test]
        fn prop_loading_progress_monotonic(seed in any::<u64>()) {
            let mut a = Arcade::new(page(), Settings::default(), MemoryStore::new(), layout(), seed);
            a.start(0);
            let mut last = 0.0f32;
            for t in (0..4_000u64).step_by(20) {
                for e in a.advance(t) {
                    if let Effect::SetLoadProgress(p) = e {
                        prop_assert!(p >= last);
                        prop_assert!(p <= 100.0);
                        last = p;
                    }
                }
            }
            prop_assert_eq!(last, 100.0);
        }
    }
}

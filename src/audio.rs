//! Audio system using Web Audio API
//!
//! Every sound is a short oscillator beep with an exponential decay; the
//! presets below are sequences of beeps. Tone descriptions are plain data so
//! the core can schedule them; only `AudioManager` touches the browser.

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Square,
    Sawtooth,
    Sine,
}

/// A single beep: frequency (Hz), duration (s), waveform and start volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: f64,
    pub waveform: Waveform,
    pub volume: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            duration: 0.08,
            waveform: Waveform::Square,
            volume: 0.18,
        }
    }
}

impl Tone {
    pub const fn new(frequency: f32, duration: f64, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            waveform,
            volume,
        }
    }

    /// Beep at the default volume
    pub const fn beep(frequency: f32, duration: f64, waveform: Waveform) -> Self {
        Self::new(frequency, duration, waveform, 0.18)
    }
}

/// Named sound presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Two-tone ascending coin drop (loading launch)
    Coin,
    /// Single menu select tone
    Select,
    /// Soft hover blip
    Hover,
    /// Three-tone ascending arpeggio (card activation)
    Play,
    /// Low tone for closing the modal
    Close,
}

impl SoundEffect {
    /// Tones making up this effect as `(delay_ms, tone)` pairs
    pub fn tones(self) -> Vec<(u64, Tone)> {
        match self {
            SoundEffect::Coin => vec![
                (0, Tone::beep(600.0, 0.07, Waveform::Square)),
                (80, Tone::beep(900.0, 0.07, Waveform::Square)),
            ],
            SoundEffect::Select => vec![(0, Tone::beep(800.0, 0.06, Waveform::Square))],
            SoundEffect::Hover => vec![(0, Tone::new(500.0, 0.04, Waveform::Sine, 0.1))],
            SoundEffect::Play => [300.0, 500.0, 700.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| (i as u64 * 70, Tone::beep(f, 0.09, Waveform::Sawtooth)))
                .collect(),
            SoundEffect::Close => vec![(0, Tone::beep(300.0, 0.08, Waveform::Square))],
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{Tone, Waveform};
    use web_sys::{AudioContext, OscillatorType};

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Sine => OscillatorType::Sine,
            }
        }
    }

    /// Lazily created shared audio context
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Already folded with mute
        master_volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        /// No context is created until the first beep
        pub fn new() -> Self {
            Self {
                ctx: None,
                master_volume: 1.0,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn master_volume(&self) -> f32 {
            self.master_volume
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() {
                // Blocked or unsupported: try again on the next beep
                self.ctx = AudioContext::new().ok();
            }
            self.ctx.as_ref()
        }

        /// Play one tone. Any failure is silently dropped.
        pub fn beep(&mut self, tone: &Tone) {
            if self.master_volume <= 0.0 {
                return;
            }
            let vol = tone.volume * self.master_volume;
            let Some(ctx) = self.context() else { return };
            let _ = play(ctx, tone, vol);
        }
    }

    fn play(ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        osc.set_type(tone.waveform.into());
        osc.frequency().set_value(tone.frequency);

        let t = ctx.current_time();
        gain.gain().set_value_at_time(vol, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + tone.duration)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + tone.duration).ok()?;
        Some(())
    }
}

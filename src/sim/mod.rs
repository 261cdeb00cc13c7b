//! Deterministic interaction core
//!
//! All behaviour lives here. This module must stay pure and deterministic:
//! - Time only advances through the task queue
//! - Seeded RNG only
//! - No DOM or audio access; components emit `Effect`s instead

pub mod arcade;
pub mod attract;
pub mod burst;
pub mod cards;
pub mod context;
pub mod crt;
pub mod effect;
pub mod event;
pub mod loading;
pub mod modal;
pub mod navigator;
pub mod page;
pub mod scheduler;
pub mod stats;

pub use arcade::{Arcade, Dispatch};
pub use burst::Particle;
pub use effect::{Effect, GlitchLine};
pub use event::{ClickTarget, Direction, InputEvent, Key};
pub use loading::LoadingPhase;
pub use modal::ModalState;
pub use page::{CardSpec, FixedLayout, Layout, PageSpec};
pub use scheduler::{Scheduler, TimerId};
pub use stats::Stats;

//! Platform abstraction layer (wasm32 only)
//!
//! Handles everything the core must not touch:
//! - Discovering page collaborators in the DOM
//! - Translating DOM events into `InputEvent`s
//! - Applying `Effect`s to the DOM, Web Audio and the console
//! - Driving the task queue from one host timer

pub mod dom;
pub mod web;

pub use web::boot;

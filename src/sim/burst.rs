//! Pixel burst particles
//!
//! Each burst spawns a fixed ring of particles around an anchor point and
//! animates them for a fixed number of frames before removing every one.
//! Bursts are independent; any number may run at once.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::context::{Context, Task};
use super::effect::Effect;
use crate::consts::*;

/// A single particle's launch parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub origin: Vec2,
    /// Outward direction, radians (screen space, +y down)
    pub angle: f32,
    /// Distance travelled over the whole animation, px
    pub speed: f32,
    pub size: u32,
    pub color: &'static str,
}

impl Particle {
    /// Position at animation progress `t` in [0, 1]
    pub fn position(&self, t: f32) -> Vec2 {
        let dir = Vec2::new(self.angle.cos(), self.angle.sin());
        self.origin + dir * self.speed * t + Vec2::new(0.0, BURST_DROP * t * t)
    }

    pub fn opacity(&self, t: f32) -> f32 {
        ((1.0 - t) * 100.0).round() / 100.0
    }
}

#[derive(Debug)]
struct Burst {
    frame: u32,
    particles: Vec<Particle>,
}

#[derive(Debug)]
pub struct PixelBurst {
    enabled: bool,
    bursts: HashMap<u32, Burst>,
    next_burst_id: u32,
    next_particle_id: u32,
}

impl PixelBurst {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bursts: HashMap::new(),
            next_burst_id: 0,
            next_particle_id: 0,
        }
    }

    /// Particles currently in the document
    pub fn live_particles(&self) -> usize {
        self.bursts.values().map(|b| b.particles.len()).sum()
    }

    #[cfg(test)]
    fn active_bursts(&self) -> usize {
        self.bursts.len()
    }

    /// Spawn a burst at `anchor`, returning its id
    pub fn spawn(&mut self, anchor: Vec2, cx: &mut Context) -> Option<u32> {
        if !self.enabled {
            return None;
        }
        let burst_id = self.next_burst_id;
        self.next_burst_id = self.next_burst_id.wrapping_add(1);

        let particles: Vec<Particle> = (0..BURST_PARTICLES)
            .map(|i| {
                let rng = cx.rng();
                let base = TAU / BURST_PARTICLES as f32 * i as f32;
                let particle = Particle {
                    id: self.next_particle_id,
                    origin: anchor,
                    angle: base + rng.random_range(-BURST_ANGLE_JITTER..=BURST_ANGLE_JITTER),
                    speed: BURST_SPEED_MIN + rng.random::<f32>() * BURST_SPEED_SPREAD,
                    size: rng.random_range(BURST_SIZE_MIN..=BURST_SIZE_MAX),
                    color: BURST_PALETTE[rng.random_range(0..BURST_PALETTE.len())],
                };
                self.next_particle_id = self.next_particle_id.wrapping_add(1);
                particle
            })
            .collect();

        for p in &particles {
            cx.emit(Effect::SpawnParticle {
                id: p.id,
                pos: p.origin,
                size: p.size,
                color: p.color,
            });
        }
        self.bursts.insert(burst_id, Burst { frame: 0, particles });
        cx.schedule(BURST_FRAME_MS, Task::BurstFrame(burst_id));
        Some(burst_id)
    }

    /// Advance burst `id` by one frame
    pub fn on_frame(&mut self, id: u32, cx: &mut Context) {
        let Some(burst) = self.bursts.get_mut(&id) else { return };
        burst.frame += 1;
        let t = burst.frame as f32 / BURST_FRAMES as f32;

        for p in &burst.particles {
            cx.emit(Effect::MoveParticle {
                id: p.id,
                pos: p.position(t),
                opacity: p.opacity(t),
            });
        }

        if burst.frame >= BURST_FRAMES {
            if let Some(done) = self.bursts.remove(&id) {
                for p in done.particles {
                    cx.emit(Effect::RemoveParticle(p.id));
                }
            }
        } else {
            cx.schedule(BURST_FRAME_MS, Task::BurstFrame(id));
        }
    }
}

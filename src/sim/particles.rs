//! Ball trail particles
//!
//! A fixed pool of slots recycled in place. Nothing is allocated after
//! construction; a slot with `life <= 0` is free.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::render::Renderer;

/// Jitter applied to spawn positions (pixels, each way)
const SPAWN_JITTER: f32 = 2.5;
/// Fraction of the source velocity a particle inherits
const VELOCITY_SCALE: f32 = 0.1;
/// Alpha lost per second
const FADE_RATE: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec4,
    /// Counts down from 1; inactive once <= 0
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    /// Where the free-slot search resumes
    last_used: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity.max(1)],
            last_used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Emit `count` particles from `source`, recycling free slots
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, source: &Entity, offset: Vec2) {
        for _ in 0..count {
            let slot = self.free_slot();
            let jitter = rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER);
            let gray = (0.5 + rng.random::<f32>()).clamp(0.0, 1.0);
            self.particles[slot] = Particle {
                position: source.position + Vec2::splat(jitter) + offset,
                velocity: source.velocity * VELOCITY_SCALE,
                color: Vec4::new(gray, gray, gray, 1.0),
                life: 1.0,
            };
        }
    }

    /// Age every particle; live ones drift against their velocity and fade
    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.life -= dt;
            if p.is_alive() {
                p.position -= p.velocity * dt;
                p.color.w -= FADE_RATE * dt;
            }
        }
    }

    /// First dead slot scanning forward from the cursor, wrapping once.
    /// Falls back to slot 0 when the pool is saturated.
    fn free_slot(&mut self) -> usize {
        let n = self.particles.len();
        let found = (self.last_used..n)
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        self.last_used = found.unwrap_or(0);
        self.last_used
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for p in self.alive() {
            renderer.draw_particle(p.position, p.color);
        }
    }
}

//! Ball trail particles
//!
//! A fixed pool; dead slots are recycled in place, so the pool never grows.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Ball;

/// A single trail particle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Vec4,
    /// Seconds left; dead at <= 0
    pub life: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Pooled particle emitter that follows the ball
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticleGenerator {
    pub fn new(amount: usize) -> Self {
        Self {
            particles: vec![Particle::default(); amount],
            last_used: 0,
        }
    }

    /// Respawn `new_particles` at the ball, then age the whole pool
    pub fn update(&mut self, dt: f32, ball: &Ball, new_particles: usize, offset: Vec2, rng: &mut impl Rng) {
        if self.particles.is_empty() {
            return;
        }

        for _ in 0..new_particles {
            let slot = self.first_unused();
            let jitter = rng.random_range(-50..50) as f32 / 10.0;
            let shade = 0.5 + rng.random_range(0..100) as f32 / 100.0;
            self.particles[slot] = Particle {
                pos: ball.body.pos + jitter + offset,
                vel: ball.body.vel * 0.1,
                color: Vec4::new(shade, shade, shade, 1.0),
                life: 1.0,
            };
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            if particle.is_alive() {
                particle.pos -= particle.vel * dt;
                particle.color.w -= dt * 2.5;
            }
        }
    }

    /// Search from the last used slot, wrap once, else overwrite slot 0
    fn first_unused(&mut self) -> usize {
        let found = (self.last_used..self.particles.len())
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        self.last_used = found.unwrap_or(0);
        self.last_used
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }
}

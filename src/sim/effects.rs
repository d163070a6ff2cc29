//! Celebration effects
//!
//! Purely visual. The celebration phase waits for both effects to report
//! finished before the next serve.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::renderer::{self, Canvas, Color, palette};

/// Particles per burst
pub const BURST_PARTICLES: usize = 80;
/// Particle speed range
pub const BURST_SPEED: (f32, f32) = (30.0, 80.0);
/// Longest particle life in seconds
pub const BURST_LIFE: f32 = 1.0;
/// Half-size of a drawn particle
pub const PARTICLE_HALF_SIZE: f32 = 1.0;
/// Flash alpha lost per second
pub const FLASH_FADE_RATE: f32 = 3.0;
/// Flash overlay half-extent, larger than the arena on both axes
pub const FLASH_HALF_EXTENT: f32 = 100.0;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
}

/// Radial burst at the point where the ball left the field
#[derive(Debug, Clone, Default)]
pub struct ParticleBurst {
    particles: Vec<Particle>,
    color: Color,
}

impl ParticleBurst {
    /// Replace any running burst with a fresh one at `origin`
    ///
    /// Colour follows the side the ball left through.
    pub fn start<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        self.color = if origin.x > 0.0 {
            palette::PLAYER_2
        } else {
            palette::PLAYER_1
        };

        self.particles.clear();
        self.particles.reserve(BURST_PARTICLES);
        for _ in 0..BURST_PARTICLES {
            let angle = rng.random_range(0.0..TAU);
            let speed = BURST_SPEED.0 + rng.random::<f32>() * (BURST_SPEED.1 - BURST_SPEED.0);
            let life = BURST_LIFE * (0.5 + 0.5 * rng.random::<f32>());
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life,
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn finished(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn cancel(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Each particle fades toward black with its remaining life
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for p in &self.particles {
            let fade = (p.life / BURST_LIFE).clamp(0.0, 1.0);
            canvas.fill_rect(
                p.pos,
                Vec2::splat(PARTICLE_HALF_SIZE),
                renderer::scale(self.color, fade),
            );
        }
    }
}

/// Full-field fade after a point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlashEffect {
    alpha: f32,
}

impl FlashEffect {
    pub fn start(&mut self) {
        self.alpha = 1.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.alpha = (self.alpha - FLASH_FADE_RATE * dt).max(0.0);
    }

    pub fn finished(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn cancel(&mut self) {
        self.alpha = 0.0;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Grey wash over the whole arena, bright at the start
    pub fn render(&self, canvas: &mut dyn Canvas) {
        if self.finished() {
            return;
        }
        let level = 255.0 * (0.3 + 0.7 * self.alpha);
        canvas.fill_rect(
            Vec2::ZERO,
            Vec2::splat(FLASH_HALF_EXTENT),
            renderer::rgb(level, level, level),
        );
    }
}

//! Paddle motion
//!
//! Each paddle is a damped second-order integrator driven by a signed thrust
//! accumulator. Whoever drives the paddle this frame (keyboard mapping or the AI)
//! pushes up/down into a [`Thrust`]; opposing pushes cancel.

use glam::Vec2;

use crate::consts::*;
use crate::renderer::palette;

/// Which half of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Player 1
    Left,
    /// Player 2
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Fixed x of the paddle on this side
    pub fn paddle_x(self) -> f32 {
        match self {
            Side::Left => -PADDLE_X,
            Side::Right => PADDLE_X,
        }
    }
}

/// Vertical acceleration requested for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thrust(pub f32);

impl Thrust {
    /// Toward -y
    #[inline]
    pub fn up(&mut self, magnitude: f32) {
        self.0 -= magnitude;
    }

    /// Toward +y
    #[inline]
    pub fn down(&mut self, magnitude: f32) {
        self.0 += magnitude;
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub side: Side,
    /// Centre; x never changes after construction
    pub pos: Vec2,
    /// Vertical velocity
    pub vel: f32,
    /// Thrust added per held direction
    pub thrust: f32,
    /// Linear drag coefficient
    pub damping: f32,
    pub half_size: Vec2,
    pub color: u32,
    pub score: u32,
    /// Seconds of hit glow left
    pub hit_flash: f32,
}

impl Paddle {
    /// Paddle at rest in the middle of its side
    pub fn new(side: Side, speed: f32, damping: f32) -> Self {
        Self {
            side,
            pos: Vec2::new(side.paddle_x(), 0.0),
            vel: 0.0,
            thrust: PADDLE_BASE_THRUST * speed,
            damping: PADDLE_BASE_DAMPING * damping,
            half_size: Vec2::new(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT),
            color: match side {
                Side::Left => palette::PLAYER_1,
                Side::Right => palette::PLAYER_2,
            },
            score: 0,
            hit_flash: 0.0,
        }
    }

    pub fn push_up(&self, thrust: &mut Thrust) {
        thrust.up(self.thrust);
    }

    pub fn push_down(&self, thrust: &mut Thrust) {
        thrust.down(self.thrust);
    }

    /// Integrate one frame
    pub fn update(&mut self, dt: f32, thrust: Thrust) {
        let dt = dt.max(0.0);

        // Drag is capped at damping·dt = 1 so one long frame can stop the paddle but never flip it
        let damping = if dt > 0.0 {
            self.damping.min(1.0 / dt)
        } else {
            self.damping
        };
        let accel = thrust.0 - damping * self.vel;

        self.pos.y += self.vel * dt + accel * dt * dt * 0.5;
        self.vel += accel * dt;

        self.confine();

        if self.hit_flash > 0.0 {
            self.hit_flash = (self.hit_flash - dt).max(0.0);
        }
    }

    /// Keep the paddle inside the field, bouncing off the edge at reduced speed
    fn confine(&mut self) {
        let limit = ARENA_HALF_HEIGHT - self.half_size.y;
        if self.pos.y > limit {
            self.pos.y = limit;
            self.vel *= -PADDLE_EDGE_RESTITUTION;
        }
        if self.pos.y < -limit {
            self.pos.y = -limit;
            self.vel *= -PADDLE_EDGE_RESTITUTION;
        }
    }

    /// Recentre and stop; the score is kept
    pub fn reset(&mut self) {
        self.pos.y = 0.0;
        self.vel = 0.0;
        self.hit_flash = 0.0;
    }

    pub fn flash(&mut self) {
        self.hit_flash = PADDLE_HIT_FLASH;
    }

    /// Glow intensity, 1 right after a hit fading to 0
    pub fn flash_level(&self) -> f32 {
        (self.hit_flash / PADDLE_HIT_FLASH).clamp(0.0, 1.0)
    }
}

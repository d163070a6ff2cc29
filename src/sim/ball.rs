//! Ball kinematics, collision and scoring
//!
//! The ball only *reads* the paddles. Anything that changes a paddle (score
//! credit, hit glow) is reported back as a [`BallEvent`] for the owner to apply.

use glam::Vec2;

use super::paddle::{Paddle, Side};
use crate::consts::*;

/// Something the ball did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallEvent {
    /// Bounced off this side's paddle
    PaddleHit(Side),
    /// Point for this side
    Scored(Side),
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Set when a boundary was crossed; freezes the ball until [`Ball::reset`]
    pub scored: bool,
    /// 0 = nobody yet, 1 = left player, 2 = right player
    pub winner: u8,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Ball {
    /// Centred ball served toward the right paddle
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(BALL_BASE_SPEED * speed, 0.0),
            radius: BALL_RADIUS,
            scored: false,
            winner: 0,
        }
    }

    /// Fresh match serve toward the right paddle
    pub fn serve(&mut self, speed: f32) {
        *self = Self::new(speed);
    }

    /// Back to the centre for the next point, served the other way
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::new(-self.vel.x, 0.0);
        self.scored = false;
        self.winner = 0;
    }

    /// Side of the scoring player, if any
    pub fn scoring_side(&self) -> Option<Side> {
        match self.winner {
            1 => Some(Side::Left),
            2 => Some(Side::Right),
            _ => None,
        }
    }

    /// Advance one frame and resolve collisions against paddle 1, then paddle 2
    pub fn update(&mut self, dt: f32, paddles: &[Paddle; 2]) -> Vec<BallEvent> {
        let mut events = Vec::new();
        if self.scored {
            return events;
        }

        self.pos += self.vel * dt;

        for paddle in paddles {
            if let Some(event) = self.resolve(paddle) {
                events.push(event);
            }
            if self.scored {
                break;
            }
        }

        events
    }

    /// Walls, then scoring boundaries, then the paddle box
    fn resolve(&mut self, paddle: &Paddle) -> Option<BallEvent> {
        let size = self.radius;

        if self.pos.y + size > ARENA_HALF_HEIGHT {
            self.pos.y = ARENA_HALF_HEIGHT - size;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y - size < -ARENA_HALF_HEIGHT {
            self.pos.y = -ARENA_HALF_HEIGHT + size;
            self.vel.y = -self.vel.y;
        }

        // Right edge is a point for the left player and vice versa
        if self.pos.x + size > ARENA_HALF_WIDTH {
            self.scored = true;
            self.winner = 1;
            self.pos.x = ARENA_HALF_WIDTH + size;
            return Some(BallEvent::Scored(Side::Left));
        }
        if self.pos.x - size < -ARENA_HALF_WIDTH {
            self.scored = true;
            self.winner = 2;
            self.pos.x = -ARENA_HALF_WIDTH - size;
            return Some(BallEvent::Scored(Side::Right));
        }

        let delta = self.pos - paddle.pos;
        let reach = paddle.half_size + Vec2::splat(size);
        if delta.x.abs() > reach.x || delta.y.abs() > reach.y {
            return None;
        }

        // Put the ball flush on the face it was travelling toward
        self.pos.x = if self.vel.x < 0.0 {
            paddle.pos.x + reach.x
        } else {
            paddle.pos.x - reach.x
        };

        self.vel.x = -self.vel.x + BALL_STALL_BUMP;

        let hit = (self.pos.y - paddle.pos.y) / paddle.half_size.y;
        let spin = hit * BALL_SPIN_FACTOR;
        let english = paddle.vel * BALL_ENGLISH_FACTOR;
        self.vel.y += spin + english + BALL_STALL_BUMP;

        Some(BallEvent::PaddleHit(paddle.side))
    }
}

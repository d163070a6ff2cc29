//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied `dt` only, no clocks
//! - Seeded RNG only (AI error rolls and particle bursts)
//! - Fixed update order: paddle 1, paddle 2, then the ball
//! - No platform dependencies; drawing goes through `renderer::Canvas`

pub mod ai;
pub mod ball;
pub mod effects;
pub mod paddle;
pub mod state;

pub use ai::{AiController, AiDifficulty, AiNoise, AiStage, fold_into_arena};
pub use ball::{Ball, BallEvent};
pub use effects::{FlashEffect, Particle, ParticleBurst};
pub use paddle::{Paddle, Side, Thrust};
pub use state::{Driver, MatchMode, MatchState};

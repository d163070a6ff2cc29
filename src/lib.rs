//! Ping Pong - a two-paddle arcade game with a predictive AI opponent
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, AI, effects)
//! - `session`: Game phase state machine (menus, countdown, play, pause, time-up)
//! - `renderer`: Draw-primitive contract and logical-space scene drawing
//! - `audio`: Sound effect requests with per-effect cooldown
//! - `input`: Per-frame button snapshot
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use input::{Button, ButtonState, InputSnapshot};
pub use renderer::{Canvas, DrawList};
pub use session::{Frame, FrameOutcome, GameSession, MatchResult, Phase};
pub use settings::{SettingItem, Settings};

/// Game configuration constants
///
/// All positions live in a logical arena centred on the origin; the renderer maps it to pixels.
pub mod consts {
    /// Fixed simulation timestep used by the bundled host (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (scoring boundary and walls)
    pub const ARENA_HALF_WIDTH: f32 = 80.0;
    pub const ARENA_HALF_HEIGHT: f32 = 50.0;

    /// Paddle defaults
    pub const PADDLE_X: f32 = 70.0;
    pub const PADDLE_HALF_WIDTH: f32 = 2.0;
    pub const PADDLE_HALF_HEIGHT: f32 = 12.0;
    /// Thrust per held direction at speed multiplier 1.0
    pub const PADDLE_BASE_THRUST: f32 = 1700.0;
    /// Linear drag at damping multiplier 1.0
    pub const PADDLE_BASE_DAMPING: f32 = 9.0;
    /// Velocity kept (and inverted) when a paddle hits the field edge
    pub const PADDLE_EDGE_RESTITUTION: f32 = 0.5;
    /// How long a paddle glows after touching the ball (seconds)
    pub const PADDLE_HIT_FLASH: f32 = 0.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 1.2;
    /// Serve speed at ball speed multiplier 1.0
    pub const BALL_BASE_SPEED: f32 = 100.0;
    /// Vertical velocity added per unit of normalized contact offset
    pub const BALL_SPIN_FACTOR: f32 = 38.0;
    /// Share of the paddle's vertical velocity transferred on contact
    pub const BALL_ENGLISH_FACTOR: f32 = 0.20;
    /// Nudge applied on reflection so a component never stalls at zero
    pub const BALL_STALL_BUMP: f32 = 0.0001;

    /// Match flow timings (seconds)
    pub const COUNTDOWN_START: i32 = 3;
    pub const COUNTDOWN_TICK: f32 = 0.35;
    pub const TIME_UP_BANNER: f32 = 2.5;
    pub const TIMER_WARNING_SECS: u32 = 5;
    pub const TIMER_TICK_INTERVAL: f32 = 1.0;
}

/// Round to a fixed number of decimal places
///
/// Settings are stored at one decimal so repeated +0.1/-0.1 steps never drift.
#[inline]
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_one_decimal() {
        assert_eq!(round_to(1.44, 1), 1.4);
        assert_eq!(round_to(1.45001, 1), 1.5);
        assert_eq!(round_to(0.1 + 0.2, 1), 0.3);
        assert_eq!(round_to(-0.26, 1), -0.3);
    }

    #[test]
    fn test_round_to_whole() {
        assert_eq!(round_to(29.6, 0), 30.0);
    }
}

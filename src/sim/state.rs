//! Match state
//!
//! Everything a running match owns: both paddles, the ball, the celebration
//! effects and the seeded RNG behind the AI and particle rolls. The ball only
//! ever borrows the paddles; score credit and hit glow are applied here from
//! the events it returns.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ai::AiController;
use super::ball::{Ball, BallEvent};
use super::effects::{FlashEffect, ParticleBurst};
use super::paddle::{Paddle, Side, Thrust};
use crate::audio::{AudioSink, SoundEffect};
use crate::input::{Button, InputSnapshot};
use crate::settings::Settings;

/// Who moves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Driver {
    #[default]
    Human,
    Ai,
}

/// Match type picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Player 1 against the AI on the right
    #[default]
    VsAi,
    /// Two humans on one keyboard
    VsFriend,
    /// AI on both sides (attract mode / headless host)
    Demo,
}

impl MatchMode {
    pub fn drivers(self) -> [Driver; 2] {
        match self {
            MatchMode::VsAi => [Driver::Human, Driver::Ai],
            MatchMode::VsFriend => [Driver::Human, Driver::Human],
            MatchMode::Demo => [Driver::Ai, Driver::Ai],
        }
    }
}

/// Buttons a human uses for each side
fn paddle_buttons(side: Side) -> (Button, Button) {
    match side {
        Side::Left => (Button::P1Up, Button::P1Down),
        Side::Right => (Button::P2Up, Button::P2Down),
    }
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    pub mode: MatchMode,
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub burst: ParticleBurst,
    pub flash: FlashEffect,
    pub drivers: [Driver; 2],
    pub ai: AiController,
    /// Serve speed multiplier captured at match start
    ball_speed: f32,
    rng: Pcg32,
}

impl MatchState {
    /// Idle match with default tuning
    pub fn new(seed: u64) -> Self {
        let defaults = Settings::default();
        Self {
            mode: MatchMode::default(),
            paddles: [
                Paddle::new(Side::Left, defaults.paddle_speed, defaults.paddle_damping),
                Paddle::new(Side::Right, defaults.paddle_speed, defaults.paddle_damping),
            ],
            ball: Ball::new(defaults.ball_speed),
            burst: ParticleBurst::default(),
            flash: FlashEffect::default(),
            drivers: MatchMode::default().drivers(),
            ai: AiController::new(defaults.ai_difficulty),
            ball_speed: defaults.ball_speed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fresh match: rebuild paddles from the current settings, zero scores, serve
    pub fn start(&mut self, mode: MatchMode, settings: &Settings) {
        self.mode = mode;
        self.drivers = mode.drivers();
        self.ai = AiController::new(settings.ai_difficulty).with_noise(self.ai.noise);
        self.ball_speed = settings.ball_speed;
        for side in [Side::Left, Side::Right] {
            self.paddles[side.index()] =
                Paddle::new(side, settings.paddle_speed, settings.paddle_damping);
        }
        self.ball.serve(self.ball_speed);
        self.cancel_effects();

        log::info!(
            "Match start: {:?}, AI {}, ball x{:.1}",
            mode,
            self.ai.difficulty.label(),
            self.ball_speed
        );
    }

    /// After a celebration: recentre everything, keep the scores
    pub fn reset_round(&mut self) {
        self.ball.reset();
        for paddle in self.paddles.iter_mut() {
            paddle.reset();
        }
    }

    /// Same match again from 0-0 with a fresh serve
    pub fn restart(&mut self) {
        for paddle in self.paddles.iter_mut() {
            paddle.reset();
            paddle.score = 0;
        }
        self.ball.serve(self.ball_speed);
        self.cancel_effects();
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.paddles[0].score, self.paddles[1].score)
    }

    /// Drive and integrate paddle 1, then paddle 2
    pub fn step_paddles(&mut self, dt: f32, input: &InputSnapshot) {
        for i in 0..2 {
            let thrust = match self.drivers[i] {
                Driver::Human => {
                    let paddle = &self.paddles[i];
                    let (up, down) = paddle_buttons(paddle.side);
                    let mut thrust = Thrust::default();
                    if input.is_down(up) {
                        paddle.push_up(&mut thrust);
                    }
                    if input.is_down(down) {
                        paddle.push_down(&mut thrust);
                    }
                    thrust
                }
                Driver::Ai => self.ai.drive(&self.paddles[i], &self.ball, &mut self.rng),
            };
            self.paddles[i].update(dt, thrust);
        }
    }

    /// Move the ball and apply what happened
    ///
    /// Returns the side that scored, if any.
    pub fn step_ball(&mut self, dt: f32, audio: &mut dyn AudioSink) -> Option<Side> {
        let mut scorer = None;
        for event in self.ball.update(dt, &self.paddles) {
            match event {
                BallEvent::PaddleHit(side) => {
                    self.paddles[side.index()].flash();
                    audio.play_effect(SoundEffect::PaddleHit);
                }
                BallEvent::Scored(side) => {
                    self.paddles[side.index()].score += 1;
                    audio.play_effect(SoundEffect::Score);
                    let (left, right) = self.scores();
                    log::debug!("Point to {:?}: {} - {}", side, left, right);
                    scorer = Some(side);
                }
            }
        }
        scorer
    }

    /// Kick off the burst at the ball and the screen flash
    pub fn celebrate(&mut self) {
        self.burst.start(self.ball.pos, &mut self.rng);
        self.flash.start();
    }

    pub fn step_effects(&mut self, dt: f32) {
        self.burst.update(dt);
        self.flash.update(dt);
    }

    pub fn effects_finished(&self) -> bool {
        self.burst.finished() && self.flash.finished()
    }

    pub fn cancel_effects(&mut self) {
        self.burst.cancel();
        self.flash.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ai::{AiDifficulty, AiNoise};
    use crate::consts::*;
    use glam::Vec2;

    fn settings() -> Settings {
        Settings {
            ai_difficulty: AiDifficulty::Hard,
            ..Settings::default()
        }
    }

    #[test]
    fn test_start_applies_settings() {
        let mut state = MatchState::new(1);
        let s = Settings {
            paddle_speed: 2.0,
            paddle_damping: 1.5,
            ball_speed: 0.5,
            ..settings()
        };
        state.paddles[0].score = 3;
        state.start(MatchMode::VsAi, &s);

        assert_eq!(state.drivers, [Driver::Human, Driver::Ai]);
        assert_eq!(state.ai.difficulty, AiDifficulty::Hard);
        assert_eq!(state.paddles[0].thrust, PADDLE_BASE_THRUST * 2.0);
        assert_eq!(state.paddles[1].damping, PADDLE_BASE_DAMPING * 1.5);
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.ball.vel, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_human_buttons_map_to_own_paddle() {
        let mut state = MatchState::new(1);
        state.start(MatchMode::VsFriend, &settings());
        let mut input = InputSnapshot::new();
        input.press(Button::P1Up);
        input.press(Button::P2Down);

        state.step_paddles(0.05, &input);
        assert!(state.paddles[0].pos.y < 0.0);
        assert!(state.paddles[1].pos.y > 0.0);
    }

    #[test]
    fn test_opposing_buttons_cancel() {
        let mut state = MatchState::new(1);
        state.start(MatchMode::VsFriend, &settings());
        let mut input = InputSnapshot::new();
        input.press(Button::P1Up);
        input.press(Button::P1Down);
        state.step_paddles(0.05, &input);
        assert_eq!(state.paddles[0].pos.y, 0.0);
    }

    #[test]
    fn test_score_credit_and_sound() {
        let mut state = MatchState::new(1);
        state.start(MatchMode::VsFriend, &settings());
        state.ball.pos = Vec2::new(79.5, 30.0);
        let mut audio = Vec::new();

        assert_eq!(state.step_ball(0.01, &mut audio), Some(Side::Left));
        assert_eq!(state.scores(), (1, 0));
        assert_eq!(audio, vec![SoundEffect::Score]);

        // Frozen until the round is reset
        assert_eq!(state.step_ball(0.01, &mut audio), None);
        assert_eq!(state.scores(), (1, 0));
    }

    #[test]
    fn test_paddle_hit_flashes_paddle() {
        let mut state = MatchState::new(1);
        state.start(MatchMode::VsFriend, &settings());
        state.ball.pos = Vec2::new(66.0, 0.0);
        let mut audio = Vec::new();
        assert_eq!(state.step_ball(0.01, &mut audio), None);
        assert_eq!(audio, vec![SoundEffect::PaddleHit]);
        assert_eq!(state.paddles[1].flash_level(), 1.0);
        assert_eq!(state.paddles[0].flash_level(), 0.0);
    }

    #[test]
    fn test_celebration_runs_out() {
        let mut state = MatchState::new(3);
        state.ball.pos = Vec2::new(-81.2, 0.0);
        state.celebrate();
        assert!(!state.effects_finished());
        for _ in 0..130 {
            state.step_effects(SIM_DT);
        }
        assert!(state.effects_finished());
    }

    #[test]
    fn test_reset_round_keeps_scores_restart_clears() {
        let mut state = MatchState::new(1);
        state.paddles[0].score = 2;
        state.paddles[1].score = 1;
        state.paddles[1].pos.y = 20.0;
        state.ball.pos = Vec2::new(81.2, 0.0);
        state.ball.scored = true;

        state.reset_round();
        assert_eq!(state.scores(), (2, 1));
        assert_eq!(state.paddles[1].pos.y, 0.0);
        assert_eq!(state.ball.pos, Vec2::ZERO);
        assert!(!state.ball.scored);

        state.celebrate();
        state.restart();
        assert_eq!(state.scores(), (0, 0));
        assert!(state.effects_finished());
        assert!(state.ball.vel.x > 0.0);
    }

    fn run_demo(seed: u64, frames: usize) -> MatchState {
        let mut state = MatchState::new(seed);
        state.start(MatchMode::Demo, &settings());
        let input = InputSnapshot::new();
        let mut audio = Vec::new();
        for _ in 0..frames {
            state.step_paddles(SIM_DT, &input);
            if state.step_ball(SIM_DT, &mut audio).is_some() {
                state.celebrate();
            }
            state.step_effects(SIM_DT);
            if state.ball.scored && state.effects_finished() {
                state.reset_round();
            }
        }
        state
    }

    #[test]
    fn test_same_seed_same_match() {
        let a = run_demo(42, 3000);
        let b = run_demo(42, 3000);
        assert_eq!(a.paddles, b.paddles);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.burst.particles(), b.burst.particles());
    }

    #[test]
    fn test_new_is_idle_default_match() {
        let idle = MatchState::new(9);
        let mut started = MatchState::new(9);
        started.start(MatchMode::default(), &Settings::default());

        assert_eq!(idle.mode, started.mode);
        assert_eq!(idle.drivers, started.drivers);
        assert_eq!(idle.paddles, started.paddles);
        assert_eq!(idle.ball, started.ball);
        assert_eq!(idle.scores(), (0, 0));
        assert!(idle.effects_finished());
    }

    #[test]
    fn test_noise_setting_survives_restart() {
        let mut state = MatchState::new(1);
        state.ai = state.ai.with_noise(AiNoise::Off);
        state.start(MatchMode::Demo, &settings());
        assert_eq!(state.ai.noise, AiNoise::Off);
    }
}

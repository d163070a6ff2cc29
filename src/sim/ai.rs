//! AI opponent
//!
//! The AI is a fixed pipeline of stages run in order every frame:
//! `Predict` picks where to meet the ball, `Smash` steers hard once the ball is
//! close, `Follow` steers toward the target with a dead-zone. Each difficulty
//! tier enables a prefix-closed subset of the pipeline and, for `Predict`, its
//! own error model.
//!
//! The AI only reacts to a ball that is on its own half of the field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, Thrust};
use crate::consts::ARENA_HALF_HEIGHT;

/// Vertical speed above which a bouncing trajectory is worth predicting
pub const PREDICT_MIN_VY: f32 = 100.0;
/// Horizontal distance at which the smash stage takes over
pub const SMASH_DISTANCE: f32 = 10.0;
/// Within this gap the smash stage tracks the ball's vertical motion instead
pub const SMASH_DEAD_ZONE: f32 = 1.0;
/// No steering when this close to the target
pub const FOLLOW_DEAD_ZONE: f32 = 5.0;

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiStage {
    Predict,
    Smash,
    Follow,
}

/// AI difficulty, weakest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
    Unbeatable,
}

impl AiDifficulty {
    pub const ALL: [AiDifficulty; 5] = [
        AiDifficulty::Easy,
        AiDifficulty::Medium,
        AiDifficulty::Hard,
        AiDifficulty::VeryHard,
        AiDifficulty::Unbeatable,
    ];

    /// Numeric level 0..=4 (the persisted form)
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Out-of-range levels saturate to the nearest tier
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => AiDifficulty::Easy,
            1 => AiDifficulty::Medium,
            2 => AiDifficulty::Hard,
            3 => AiDifficulty::VeryHard,
            _ => AiDifficulty::Unbeatable,
        }
    }

    pub fn harder(self) -> Self {
        Self::from_level(self.level().saturating_add(1).min(4))
    }

    pub fn easier(self) -> Self {
        Self::from_level(self.level().saturating_sub(1))
    }

    pub fn label(self) -> &'static str {
        match self {
            AiDifficulty::Easy => "EASY",
            AiDifficulty::Medium => "NORMAL",
            AiDifficulty::Hard => "HARD",
            AiDifficulty::VeryHard => "VERYHARD",
            AiDifficulty::Unbeatable => "UNBEATABLE",
        }
    }

    /// Stages this tier runs, in pipeline order
    pub fn stages(self) -> &'static [AiStage] {
        match self {
            AiDifficulty::Easy => &[AiStage::Follow],
            AiDifficulty::Medium => &[AiStage::Smash, AiStage::Follow],
            AiDifficulty::Hard | AiDifficulty::VeryHard | AiDifficulty::Unbeatable => {
                &[AiStage::Predict, AiStage::Smash, AiStage::Follow]
            }
        }
    }

    pub fn runs(self, stage: AiStage) -> bool {
        self.stages().contains(&stage)
    }

    /// How far off this tier's landing prediction is allowed to be
    fn prediction_error(self) -> PredictionError {
        match self {
            AiDifficulty::Hard => PredictionError {
                band: Some((-16.0, -4.0)),
                wrong_guess_odds: Some(15),
                bias: 0.0,
            },
            AiDifficulty::VeryHard => PredictionError {
                band: Some((-10.0, 2.0)),
                wrong_guess_odds: Some(5),
                bias: 0.0,
            },
            AiDifficulty::Unbeatable => PredictionError {
                band: None,
                wrong_guess_odds: None,
                bias: 10.0,
            },
            AiDifficulty::Easy | AiDifficulty::Medium => PredictionError::EXACT,
        }
    }
}

impl From<u8> for AiDifficulty {
    fn from(level: u8) -> Self {
        Self::from_level(level)
    }
}

impl From<AiDifficulty> for u8 {
    fn from(difficulty: AiDifficulty) -> Self {
        difficulty.level()
    }
}

/// Error model applied to an exact landing prediction
#[derive(Debug, Clone, Copy)]
struct PredictionError {
    /// Uniform offset range, drawn once and applied twice
    band: Option<(f32, f32)>,
    /// 1-in-N chance of aiming at the +y wall instead
    wrong_guess_odds: Option<u32>,
    /// Constant offset
    bias: f32,
}

impl PredictionError {
    const EXACT: PredictionError = PredictionError {
        band: None,
        wrong_guess_odds: None,
        bias: 0.0,
    };

    fn apply<R: Rng + ?Sized>(&self, landing: f32, rng: &mut R) -> f32 {
        let offset = match self.band {
            Some((lo, hi)) => lo + rng.random::<f32>() * (hi - lo),
            None => 0.0,
        };
        let mut aim = landing + offset;
        if let Some(odds) = self.wrong_guess_odds {
            if rng.random_ratio(1, odds) {
                aim = ARENA_HALF_HEIGHT;
            }
        }
        aim + offset + self.bias
    }
}

/// Whether tier imperfections are rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiNoise {
    /// Per-tier offsets and wrong guesses
    #[default]
    Random,
    /// Exact landing prediction for every predicting tier
    Off,
}

/// Fold a projected y back into the arena as if it bounced off both walls
///
/// Mirrors the straight-line projection with a triangle wave of period twice
/// the arena height, so any number of wall bounces costs the same.
pub fn fold_into_arena(y: f32) -> f32 {
    let top = ARENA_HALF_HEIGHT;
    let bottom = -ARENA_HALF_HEIGHT;
    let span = top - bottom;

    let cycle = (y - bottom).rem_euclid(2.0 * span);
    if cycle <= span {
        bottom + cycle
    } else {
        top - (cycle - span)
    }
}

/// Drives one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiController {
    pub difficulty: AiDifficulty,
    pub noise: AiNoise,
}

impl AiController {
    pub fn new(difficulty: AiDifficulty) -> Self {
        Self {
            difficulty,
            noise: AiNoise::Random,
        }
    }

    pub fn with_noise(mut self, noise: AiNoise) -> Self {
        self.noise = noise;
        self
    }

    /// Thrust for this frame
    pub fn drive<R: Rng + ?Sized>(&self, paddle: &Paddle, ball: &Ball, rng: &mut R) -> Thrust {
        let mut thrust = Thrust::default();

        let same_half = (paddle.pos.x > 0.0 && ball.pos.x > 0.0)
            || (paddle.pos.x < 0.0 && ball.pos.x < 0.0);
        if !same_half {
            return thrust;
        }

        let dist_x = (paddle.pos.x - ball.pos.x).abs();
        let mut target_y = ball.pos.y;

        for stage in self.difficulty.stages() {
            match stage {
                AiStage::Predict => {
                    if let Some(y) = self.predict(paddle.pos.x, ball, rng) {
                        target_y = y;
                    }
                }
                AiStage::Smash => smash(dist_x, target_y, paddle, ball.vel.y, &mut thrust),
                AiStage::Follow => follow(target_y, paddle, &mut thrust),
            }
        }

        thrust
    }

    /// Where this AI will steer: the predicted landing point, or the ball's current y
    pub fn target_y<R: Rng + ?Sized>(&self, paddle_x: f32, ball: &Ball, rng: &mut R) -> f32 {
        if self.difficulty.runs(AiStage::Predict) {
            if let Some(y) = self.predict(paddle_x, ball, rng) {
                return y;
            }
        }
        ball.pos.y
    }

    /// Landing y at the paddle plane, perturbed per tier
    ///
    /// `None` when the ball is slow vertically or heading away.
    fn predict<R: Rng + ?Sized>(&self, paddle_x: f32, ball: &Ball, rng: &mut R) -> Option<f32> {
        let vel = ball.vel;
        let toward = (paddle_x >= 0.0 && vel.x > 0.0) || (paddle_x < 0.0 && vel.x < 0.0);
        if vel.y.abs() <= PREDICT_MIN_VY || vel.x.abs() <= 1e-4 || !toward {
            return None;
        }

        let t = (paddle_x - ball.pos.x) / vel.x;
        if t <= 0.0 {
            return Some(ball.pos.y);
        }

        let landing = fold_into_arena(ball.pos.y + vel.y * t);
        let aim = match self.noise {
            AiNoise::Random => self.difficulty.prediction_error().apply(landing, rng),
            AiNoise::Off => landing,
        };
        Some(aim)
    }
}

/// Close-range steering toward the target
fn smash(dist_x: f32, target_y: f32, paddle: &Paddle, ball_vy: f32, thrust: &mut Thrust) {
    if dist_x > SMASH_DISTANCE {
        return;
    }
    let diff = target_y - paddle.pos.y;
    if diff.abs() < SMASH_DEAD_ZONE {
        // Lined up: ride along with the ball's vertical motion
        if ball_vy > 0.0 {
            paddle.push_down(thrust);
        } else {
            paddle.push_up(thrust);
        }
    } else if diff > 0.0 {
        paddle.push_down(thrust);
    } else {
        paddle.push_up(thrust);
    }
}

/// Proportional-ish steering with a dead-zone
fn follow(target_y: f32, paddle: &Paddle, thrust: &mut Thrust) {
    let diff = target_y - paddle.pos.y;
    if diff > FOLLOW_DEAD_ZONE {
        paddle.push_down(thrust);
    } else if diff < -FOLLOW_DEAD_ZONE {
        paddle.push_up(thrust);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::BallEvent;
    use crate::sim::paddle::Side;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Yields the same word forever, pinning every draw to one end of its range
    struct ConstRng(u64);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0 as u8);
        }
    }

    /// Point-ball flight with explicit wall reflections
    fn simulate_landing(mut y: f32, mut vy: f32, mut t: f32) -> f32 {
        while t > 0.0 {
            let wall = if vy > 0.0 {
                ARENA_HALF_HEIGHT
            } else {
                -ARENA_HALF_HEIGHT
            };
            let to_wall = (wall - y) / vy;
            if to_wall >= t {
                return y + vy * t;
            }
            y = wall;
            vy = -vy;
            t -= to_wall;
        }
        y
    }

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(1.0);
        ball.pos = pos;
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_fold_identity_inside_arena() {
        for y in [-50.0, -12.5, 0.0, 33.0, 50.0] {
            assert!((fold_into_arena(y) - y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fold_mirrors_off_walls() {
        assert!((fold_into_arena(60.0) - 40.0).abs() < 1e-4);
        assert!((fold_into_arena(-70.0) - (-30.0)).abs() < 1e-4);
        // Two bounces: up past the top, back down past the bottom
        assert!((fold_into_arena(170.0) - (-30.0)).abs() < 1e-4);
        assert!((fold_into_arena(200.0) - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_stage_sets_are_nested() {
        for pair in AiDifficulty::ALL.windows(2) {
            let (weaker, stronger) = (pair[0], pair[1]);
            assert!(weaker < stronger);
            for stage in weaker.stages() {
                assert!(stronger.runs(*stage), "{stronger:?} is missing {stage:?}");
            }
            assert!(stronger.stages().len() >= weaker.stages().len());
        }
        assert_eq!(AiDifficulty::Easy.stages(), &[AiStage::Follow]);
        assert!(!AiDifficulty::Medium.runs(AiStage::Predict));
    }

    #[test]
    fn test_level_round_trip_and_saturation() {
        for difficulty in AiDifficulty::ALL {
            assert_eq!(AiDifficulty::from_level(difficulty.level()), difficulty);
        }
        assert_eq!(AiDifficulty::from_level(42), AiDifficulty::Unbeatable);
        assert_eq!(AiDifficulty::Unbeatable.harder(), AiDifficulty::Unbeatable);
        assert_eq!(AiDifficulty::Easy.easier(), AiDifficulty::Easy);
        assert_eq!(AiDifficulty::Medium.harder(), AiDifficulty::Hard);
    }

    #[test]
    fn test_ignores_ball_on_far_half() {
        let mut rng = Pcg32::seed_from_u64(1);
        let paddle = Paddle::new(Side::Right, 1.0, 1.0);
        let ball = ball_at(Vec2::new(-10.0, 40.0), Vec2::new(140.0, 200.0));
        for difficulty in AiDifficulty::ALL {
            let thrust = AiController::new(difficulty).drive(&paddle, &ball, &mut rng);
            assert_eq!(thrust, Thrust::default());
        }
    }

    #[test]
    fn test_follow_dead_zone() {
        let mut rng = Pcg32::seed_from_u64(1);
        let paddle = Paddle::new(Side::Right, 1.0, 1.0);
        let ai = AiController::new(AiDifficulty::Easy);

        let near = ball_at(Vec2::new(30.0, 4.0), Vec2::new(140.0, 0.0));
        assert_eq!(ai.drive(&paddle, &near, &mut rng), Thrust(0.0));

        let below = ball_at(Vec2::new(30.0, 20.0), Vec2::new(140.0, 0.0));
        assert_eq!(ai.drive(&paddle, &below, &mut rng), Thrust(paddle.thrust));

        let above = ball_at(Vec2::new(30.0, -20.0), Vec2::new(140.0, 0.0));
        assert_eq!(ai.drive(&paddle, &above, &mut rng), Thrust(-paddle.thrust));
    }

    #[test]
    fn test_smash_rides_ball_when_lined_up() {
        let mut rng = Pcg32::seed_from_u64(1);
        let paddle = Paddle::new(Side::Right, 1.0, 1.0);
        let ai = AiController::new(AiDifficulty::Medium);

        let rising = ball_at(Vec2::new(62.0, 0.5), Vec2::new(140.0, -30.0));
        assert_eq!(ai.drive(&paddle, &rising, &mut rng), Thrust(-paddle.thrust));

        let falling = ball_at(Vec2::new(62.0, 0.5), Vec2::new(140.0, 30.0));
        assert_eq!(ai.drive(&paddle, &falling, &mut rng), Thrust(paddle.thrust));
    }

    #[test]
    fn test_smash_and_follow_stack() {
        let mut rng = Pcg32::seed_from_u64(1);
        let paddle = Paddle::new(Side::Right, 1.0, 1.0);
        let ball = ball_at(Vec2::new(62.0, 20.0), Vec2::new(140.0, 0.0));

        let medium = AiController::new(AiDifficulty::Medium).drive(&paddle, &ball, &mut rng);
        assert_eq!(medium, Thrust(2.0 * paddle.thrust));

        // Easy has no smash stage, so only the follow push applies
        let easy = AiController::new(AiDifficulty::Easy).drive(&paddle, &ball, &mut rng);
        assert_eq!(easy, Thrust(paddle.thrust));
    }

    #[test]
    fn test_prediction_skipped_for_flat_or_receding_ball() {
        let mut rng = Pcg32::seed_from_u64(7);
        let ai = AiController::new(AiDifficulty::Unbeatable);

        let flat = ball_at(Vec2::new(10.0, 5.0), Vec2::new(140.0, 100.0));
        assert_eq!(ai.target_y(70.0, &flat, &mut rng), 5.0);

        let receding = ball_at(Vec2::new(10.0, 5.0), Vec2::new(-140.0, 300.0));
        assert_eq!(ai.target_y(70.0, &receding, &mut rng), 5.0);

        // Already past the paddle plane: aim at the ball itself
        let behind = ball_at(Vec2::new(75.0, 5.0), Vec2::new(140.0, 300.0));
        assert_eq!(ai.target_y(70.0, &behind, &mut rng), 5.0);
    }

    #[test]
    fn test_unbeatable_aims_fixed_offset_past_landing() {
        let mut rng = Pcg32::seed_from_u64(3);
        let ai = AiController::new(AiDifficulty::Unbeatable);
        let ball = ball_at(Vec2::new(0.0, 0.0), Vec2::new(140.0, 200.0));
        let landing = simulate_landing(0.0, 200.0, 0.5);
        assert!((ai.target_y(70.0, &ball, &mut rng) - (landing + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_noise_off_predicts_exact_landing() {
        let mut rng = Pcg32::seed_from_u64(11);
        let cases = [
            (0.0, 200.0),
            (-30.0, -350.0),
            (45.0, 120.0),
            (-10.0, 400.0),
            (20.0, -101.0),
        ];
        for (y0, vy) in cases {
            let ball = ball_at(Vec2::new(0.0, y0), Vec2::new(140.0, vy));
            let landing = simulate_landing(y0, vy, 70.0 / 140.0);
            for difficulty in AiDifficulty::ALL {
                let ai = AiController::new(difficulty).with_noise(AiNoise::Off);
                let target = ai.target_y(70.0, &ball, &mut rng);
                if difficulty.runs(AiStage::Predict) {
                    assert!(
                        (target - landing).abs() < 1e-2,
                        "{difficulty:?}: {target} vs {landing}"
                    );
                } else {
                    assert_eq!(target, y0);
                }
            }
        }
    }

    #[test]
    fn test_prediction_error_shrinks_with_tier() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut error = [0.0f64; 5];
        let samples = 3000;

        for _ in 0..samples {
            let y0 = rng.random_range(-45.0f32..45.0);
            let speed = rng.random_range(150.0f32..400.0);
            let vy = if rng.random_bool(0.5) { speed } else { -speed };
            let ball = ball_at(Vec2::new(0.0, y0), Vec2::new(140.0, vy));
            let landing = simulate_landing(y0, vy, 0.5);

            for (i, difficulty) in AiDifficulty::ALL.into_iter().enumerate() {
                let target = AiController::new(difficulty).target_y(70.0, &ball, &mut rng);
                error[i] += f64::from((target - landing).abs());
            }
        }

        let mean: Vec<f64> = error.iter().map(|e| e / samples as f64).collect();
        assert_eq!(mean[0], mean[1], "easy and medium both chase the ball");
        assert!(mean[2] < mean[1], "hard {} vs medium {}", mean[2], mean[1]);
        assert!(mean[3] < mean[2], "very hard {} vs hard {}", mean[3], mean[2]);
        assert!(mean[4] < mean[3], "unbeatable {} vs very hard {}", mean[4], mean[3]);
    }

    /// Serve from the centre line at the right-hand AI and report whether it came back
    fn returns_serve(ai: AiController, y0: f32, vy: f32) -> bool {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut paddles = [
            Paddle::new(Side::Left, 1.0, 1.0),
            Paddle::new(Side::Right, 1.0, 1.0),
        ];
        let mut ball = ball_at(Vec2::new(0.0, y0), Vec2::new(140.0, vy));
        let dt = 1.0 / 120.0;

        for _ in 0..240 {
            let thrust = ai.drive(&paddles[1], &ball, &mut rng);
            paddles[1].update(dt, thrust);
            for event in ball.update(dt, &paddles) {
                match event {
                    BallEvent::PaddleHit(Side::Right) => return true,
                    BallEvent::Scored(_) => return false,
                    BallEvent::PaddleHit(Side::Left) => {}
                }
            }
        }
        false
    }

    #[test]
    fn test_return_rate_grows_with_tier() {
        let serves: Vec<(f32, f32)> = [-45.0, -15.0, 15.0, 45.0]
            .into_iter()
            .flat_map(|y0| (0..100).map(move |i| (y0, -400.0 + 8.0 * i as f32)))
            .collect();

        let rates: Vec<usize> = AiDifficulty::ALL
            .into_iter()
            .map(|difficulty| {
                let ai = AiController::new(difficulty).with_noise(AiNoise::Off);
                serves
                    .iter()
                    .filter(|&&(y0, vy)| returns_serve(ai, y0, vy))
                    .count()
            })
            .collect();

        for pair in rates.windows(2) {
            assert!(pair[1] >= pair[0], "rates {rates:?}");
        }
        assert!(rates[0] < rates[2], "prediction should beat chasing: {rates:?}");
        assert!(rates[1] < rates[2], "prediction should beat smash: {rates:?}");
    }

    #[test]
    fn test_wrong_guess_aims_at_top_wall_plus_band() {
        // landing is 0.0 for this serve
        let ball = ball_at(Vec2::new(0.0, 0.0), Vec2::new(140.0, 200.0));

        // All-zero words: offset at the band's low end, wrong-guess roll always hits
        for (difficulty, low) in [(AiDifficulty::Hard, -16.0), (AiDifficulty::VeryHard, -10.0)] {
            let aim = AiController::new(difficulty).target_y(70.0, &ball, &mut ConstRng(0));
            assert!(
                (aim - (ARENA_HALF_HEIGHT + low)).abs() < 1e-3,
                "{difficulty:?}: {aim}"
            );
        }

        // All-ones words: offset at the high end, roll always misses, offset lands twice
        for (difficulty, high) in [(AiDifficulty::Hard, -4.0), (AiDifficulty::VeryHard, 2.0)] {
            let aim =
                AiController::new(difficulty).target_y(70.0, &ball, &mut ConstRng(u64::MAX));
            assert!((aim - 2.0 * high).abs() < 1e-3, "{difficulty:?}: {aim}");
        }
    }

    proptest! {
        #[test]
        fn prop_fold_stays_in_arena(y in -2000.0f32..2000.0) {
            let folded = fold_into_arena(y);
            prop_assert!(folded >= -ARENA_HALF_HEIGHT - 1e-3);
            prop_assert!(folded <= ARENA_HALF_HEIGHT + 1e-3);
        }

        #[test]
        fn prop_fold_matches_simulated_bounces(
            y0 in -49.0f32..49.0,
            vy in prop_oneof![-400.0f32..-101.0, 101.0f32..400.0],
            t in 0.01f32..1.5,
        ) {
            let folded = fold_into_arena(y0 + vy * t);
            let simulated = simulate_landing(y0, vy, t);
            prop_assert!((folded - simulated).abs() < 1e-2, "{} vs {}", folded, simulated);
        }
    }
}

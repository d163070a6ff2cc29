//! Countdown and match clock

use crate::audio::SoundEffect;
use crate::consts::{COUNTDOWN_START, COUNTDOWN_TICK, TIMER_TICK_INTERVAL, TIMER_WARNING_SECS};

/// Pre-serve countdown: 3, 2, 1, GO, then done
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    value: i32,
    time: f32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            value: COUNTDOWN_START,
            time: 0.0,
        }
    }
}

impl Countdown {
    /// Value on display; 0 shows "GO!"
    pub fn value(&self) -> i32 {
        self.value
    }

    /// True once "GO!" has been shown for a full tick
    pub fn finished(&self) -> bool {
        self.value < 0
    }

    /// At most one step per frame, however long the frame was
    pub fn advance(&mut self, dt: f32) -> Option<SoundEffect> {
        if self.finished() {
            return None;
        }
        self.time += dt;
        if self.time < COUNTDOWN_TICK {
            return None;
        }

        self.time = 0.0;
        self.value -= 1;
        match self.value {
            v if v > 0 => Some(SoundEffect::CountdownTick),
            0 => Some(SoundEffect::GoTick),
            _ => None,
        }
    }
}

/// Match time bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchClock {
    elapsed: f32,
    /// Time since the last warning tick
    tick_timer: f32,
}

impl MatchClock {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whole seconds left, rounded down
    pub fn remaining_secs(&self, duration_secs: u32) -> u32 {
        (duration_secs as f32 - self.elapsed).max(0.0) as u32
    }

    pub fn in_warning(&self, duration_secs: u32) -> bool {
        self.remaining_secs(duration_secs) <= TIMER_WARNING_SECS
    }

    pub fn expired(&self, duration_secs: u32) -> bool {
        self.elapsed >= duration_secs as f32
    }

    /// Advance; returns the warning tick sound when one is due
    pub fn advance(&mut self, dt: f32, duration_secs: u32) -> Option<SoundEffect> {
        self.elapsed += dt;
        if !self.in_warning(duration_secs) {
            return None;
        }
        self.tick_timer += dt;
        if self.tick_timer >= TIMER_TICK_INTERVAL {
            self.tick_timer = 0.0;
            Some(SoundEffect::TimerTick)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_sequence() {
        let mut countdown = Countdown::default();
        let mut sounds = Vec::new();
        let mut values = vec![countdown.value()];
        while !countdown.finished() {
            if let Some(sound) = countdown.advance(0.1) {
                sounds.push(sound);
            }
            if *values.last().unwrap_or(&99) != countdown.value() {
                values.push(countdown.value());
            }
        }
        assert_eq!(values, vec![3, 2, 1, 0, -1]);
        assert_eq!(
            sounds,
            vec![
                SoundEffect::CountdownTick,
                SoundEffect::CountdownTick,
                SoundEffect::GoTick
            ]
        );
    }

    #[test]
    fn test_countdown_huge_dt_steps_once_per_frame() {
        let mut countdown = Countdown::default();
        let mut frames = 0;
        while !countdown.finished() {
            countdown.advance(100.0);
            frames += 1;
        }
        assert_eq!(frames, 4);
        assert_eq!(countdown.advance(100.0), None);
    }

    #[test]
    fn test_clock_warning_ticks() {
        let mut clock = MatchClock::default();
        let mut ticks = 0;
        for _ in 0..310 {
            if clock.advance(0.1, 30) == Some(SoundEffect::TimerTick) {
                ticks += 1;
            }
        }
        assert!(clock.expired(30));
        assert_eq!(clock.remaining_secs(30), 0);
        // Warning starts below six seconds left
        assert!((5..=7).contains(&ticks), "ticks {ticks}");
    }

    #[test]
    fn test_remaining_rounds_down() {
        let mut clock = MatchClock::default();
        clock.advance(0.5, 30);
        assert_eq!(clock.remaining_secs(30), 29);
        assert!(!clock.in_warning(30));
        assert!(clock.in_warning(6));
    }
}

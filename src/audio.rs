//! Sound effect requests
//!
//! The game never talks to an audio device. It asks an [`AudioSink`] to play
//! named effects; [`AudioManager`] is the host-facing sink that applies volume,
//! mute and retrigger cooldowns and queues what the platform backend should play.

use std::collections::HashMap;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Menu cursor moved
    Navigation,
    /// Ball hits paddle
    PaddleHit,
    /// A setting value changed
    Setting,
    /// Menu item confirmed
    Button,
    /// Leaving a menu / restarting
    ButtonBack,
    /// Countdown reached "GO!"
    GoTick,
    /// Countdown 3, 2, 1
    CountdownTick,
    /// Ball crossed a scoring boundary
    Score,
    /// Match time ran out
    Winner,
    /// Final seconds of the match clock
    TimerTick,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 10] = [
        SoundEffect::Navigation,
        SoundEffect::PaddleHit,
        SoundEffect::Setting,
        SoundEffect::Button,
        SoundEffect::ButtonBack,
        SoundEffect::GoTick,
        SoundEffect::CountdownTick,
        SoundEffect::Score,
        SoundEffect::Winner,
        SoundEffect::TimerTick,
    ];

    /// Asset name the backend resolves (without extension)
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Navigation => "navigation",
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::Setting => "setting",
            SoundEffect::Button => "button",
            SoundEffect::ButtonBack => "button_back",
            SoundEffect::GoTick => "go_tick",
            SoundEffect::CountdownTick => "countdown_tick",
            SoundEffect::Score => "shine",
            SoundEffect::Winner => "winner",
            SoundEffect::TimerTick => "game_timer_tick",
        }
    }
}

/// Fire-and-forget audio contract used by the session
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect);

    fn set_music_enabled(&mut self, _enabled: bool) {}

    fn set_music_volume(&mut self, _volume: f32) {}

    fn set_sfx_volume(&mut self, _volume: f32) {}
}

/// Records effects in order; handy for headless runs and tests
impl AudioSink for Vec<SoundEffect> {
    fn play_effect(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Minimum time between two triggers of the same effect (seconds)
pub const SFX_COOLDOWN: f32 = 0.105;

/// A sound the backend should start now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    music_enabled: bool,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Seconds since each effect last fired
    since_played: HashMap<SoundEffect, f32>,
    pending: Vec<PlaybackRequest>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            music_enabled: false,
            music_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
            since_played: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Advance cooldown timers
    pub fn update(&mut self, dt: f32) {
        for elapsed in self.since_played.values_mut() {
            *elapsed += dt;
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Effective music volume (0 when disabled or muted)
    pub fn music_level(&self) -> f32 {
        if self.muted || !self.music_enabled {
            0.0
        } else {
            self.music_volume
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Take everything queued since the last drain
    pub fn drain(&mut self) -> Vec<PlaybackRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl AudioSink for AudioManager {
    fn play_effect(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        if let Some(&elapsed) = self.since_played.get(&effect) {
            if elapsed < SFX_COOLDOWN {
                log::trace!("{} suppressed by cooldown", effect.name());
                return;
            }
        }
        self.since_played.insert(effect, 0.0);
        self.pending.push(PlaybackRequest { effect, volume: vol });
    }

    fn set_music_enabled(&mut self, enabled: bool) {
        if self.music_enabled != enabled {
            log::info!("Music {}", if enabled { "enabled" } else { "disabled" });
        }
        self.music_enabled = enabled;
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }
}

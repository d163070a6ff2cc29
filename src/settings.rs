//! Game settings and preferences
//!
//! Persisted as pretty-printed JSON under a top-level `"settings"` object.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::round_to;
use crate::sim::ai::AiDifficulty;

/// Multiplier bounds for ball and paddle speed
pub const SPEED_RANGE: (f32, f32) = (0.5, 3.0);
/// Paddle friction (damping multiplier) bounds
pub const FRICTION_RANGE: (f32, f32) = (0.8, 2.0);
/// Match length bounds in seconds
pub const DURATION_RANGE: (u32, u32) = (5, 600);
/// Step for every one-decimal setting
pub const DECIMAL_STEP: f32 = 0.1;

/// Rows of the settings screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingItem {
    BallSpeed,
    PaddleSpeed,
    PaddleFriction,
    AiDifficulty,
    EnableMusic,
    MusicVolume,
    SfxVolume,
    GameDuration,
    Back,
}

impl SettingItem {
    pub const ALL: [SettingItem; 9] = [
        SettingItem::BallSpeed,
        SettingItem::PaddleSpeed,
        SettingItem::PaddleFriction,
        SettingItem::AiDifficulty,
        SettingItem::EnableMusic,
        SettingItem::MusicVolume,
        SettingItem::SfxVolume,
        SettingItem::GameDuration,
        SettingItem::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingItem::BallSpeed => "BALL SPEED",
            SettingItem::PaddleSpeed => "PADDLE SPEED",
            SettingItem::PaddleFriction => "PADDLE FRICTION",
            SettingItem::AiDifficulty => "AI DIFFICULTY",
            SettingItem::EnableMusic => "ENABLE MUSIC",
            SettingItem::MusicVolume => "MUSIC VOLUME",
            SettingItem::SfxVolume => "SFX VOLUME",
            SettingItem::GameDuration => "GAME DURATION",
            SettingItem::Back => "BACK",
        }
    }
}

/// Failure to write (or explicitly read) the settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Json(e) => write!(f, "settings JSON error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serve speed multiplier
    pub ball_speed: f32,
    /// Paddle thrust multiplier
    pub paddle_speed: f32,
    /// Paddle damping multiplier
    #[serde(rename = "paddle_friction")]
    pub paddle_damping: f32,
    #[serde(deserialize_with = "difficulty_from_number")]
    pub ai_difficulty: AiDifficulty,

    // === Audio ===
    pub music_enabled: bool,
    /// 0.0 - 1.0
    pub music_volume: f32,
    /// 0.0 - 1.0
    pub sfx_volume: f32,

    /// Match length
    #[serde(deserialize_with = "secs_from_number")]
    pub game_duration_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_speed: 1.4,
            paddle_speed: 1.0,
            paddle_damping: 1.0,
            ai_difficulty: AiDifficulty::Medium,

            music_enabled: false,
            music_volume: 1.0,
            sfx_volume: 1.0,

            game_duration_secs: 30,
        }
    }
}

/// Any number, rounded and saturated into 0..=4
fn difficulty_from_number<'de, D: Deserializer<'de>>(d: D) -> Result<AiDifficulty, D::Error> {
    let level = f64::deserialize(d)?;
    Ok(AiDifficulty::from_level(level.round().clamp(0.0, 4.0) as u8))
}

/// Older files store the duration as a float
fn secs_from_number<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let secs = f64::deserialize(d)?;
    Ok(secs.round().clamp(0.0, u32::MAX as f64) as u32)
}

/// On-disk envelope
#[derive(Serialize, Deserialize)]
struct ConfigFile {
    settings: Settings,
}

impl Settings {
    /// Round to one decimal and clamp everything into its editable range
    pub fn sanitize(&mut self) {
        self.ball_speed = round_to(self.ball_speed, 1).clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        self.paddle_speed = round_to(self.paddle_speed, 1).clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        self.paddle_damping =
            round_to(self.paddle_damping, 1).clamp(FRICTION_RANGE.0, FRICTION_RANGE.1);
        self.music_volume = round_to(self.music_volume, 1).clamp(0.0, 1.0);
        self.sfx_volume = round_to(self.sfx_volume, 1).clamp(0.0, 1.0);
        self.game_duration_secs = self
            .game_duration_secs
            .clamp(DURATION_RANGE.0, DURATION_RANGE.1);
    }

    /// One step left (`step < 0`) or right (`step > 0`)
    ///
    /// Music is switched on by a right step and off by a left one rather than toggled.
    pub fn adjust(&mut self, item: SettingItem, step: i32) {
        let dir = step.signum();
        if dir == 0 {
            return;
        }
        let delta = DECIMAL_STEP * dir as f32;

        match item {
            SettingItem::BallSpeed => {
                self.ball_speed =
                    round_to(self.ball_speed + delta, 1).clamp(SPEED_RANGE.0, SPEED_RANGE.1);
            }
            SettingItem::PaddleSpeed => {
                self.paddle_speed =
                    round_to(self.paddle_speed + delta, 1).clamp(SPEED_RANGE.0, SPEED_RANGE.1);
            }
            SettingItem::PaddleFriction => {
                self.paddle_damping = round_to(self.paddle_damping + delta, 1)
                    .clamp(FRICTION_RANGE.0, FRICTION_RANGE.1);
            }
            SettingItem::AiDifficulty => {
                self.ai_difficulty = if dir > 0 {
                    self.ai_difficulty.harder()
                } else {
                    self.ai_difficulty.easier()
                };
            }
            SettingItem::EnableMusic => self.music_enabled = dir > 0,
            SettingItem::MusicVolume => {
                self.music_volume = round_to(self.music_volume + delta, 1).clamp(0.0, 1.0);
            }
            SettingItem::SfxVolume => {
                self.sfx_volume = round_to(self.sfx_volume + delta, 1).clamp(0.0, 1.0);
            }
            SettingItem::GameDuration => {
                self.game_duration_secs = self
                    .game_duration_secs
                    .saturating_add_signed(dir)
                    .clamp(DURATION_RANGE.0, DURATION_RANGE.1);
            }
            SettingItem::Back => {}
        }
    }

    /// Value column text; empty for `Back`
    pub fn value_text(&self, item: SettingItem) -> String {
        let percent = |v: f32| format!("{}%", (v * 100.0).round() as i32);
        match item {
            SettingItem::BallSpeed => format!("{:.1}", self.ball_speed),
            SettingItem::PaddleSpeed => format!("{:.1}", self.paddle_speed),
            SettingItem::PaddleFriction => format!("{:.1}", self.paddle_damping),
            SettingItem::AiDifficulty => self.ai_difficulty.label().to_string(),
            SettingItem::EnableMusic => {
                let text = if self.music_enabled { "ON" } else { "OFF" };
                text.to_string()
            }
            SettingItem::MusicVolume => percent(self.music_volume),
            SettingItem::SfxVolume => percent(self.sfx_volume),
            SettingItem::GameDuration => format!("{}S", self.game_duration_secs),
            SettingItem::Back => String::new(),
        }
    }

    /// Parse a settings file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&json)?;
        let mut settings = file.settings;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load `path`, (re)creating it from `defaults_path` (or built-in defaults)
    /// when it is missing or unreadable
    pub fn load_or_init(path: impl AsRef<Path>, defaults_path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::read(path) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Rewriting {} from defaults ({})", path.display(), e),
            }
        }

        let defaults_path = defaults_path.as_ref();
        let settings = if defaults_path.exists() {
            Self::load(defaults_path)
        } else {
            log::info!("No {}, using built-in defaults", defaults_path.display());
            Self::default()
        };

        if let Err(e) = settings.save(path) {
            log::warn!("Could not create {}: {}", path.display(), e);
        }
        settings
    }

    /// Write settings, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut settings = self.clone();
        settings.sanitize();
        let json = serde_json::to_string_pretty(&ConfigFile { settings })?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

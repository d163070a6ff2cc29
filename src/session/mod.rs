//! Game phase state machine
//!
//! One `GameSession` owns the settings, the match and every piece of menu
//! state. The host calls [`GameSession::update`] once per frame with an
//! explicit [`Frame`] context; nothing is global.
//!
//! ```text
//! Menu ─► Countdown ─► Playing ◄─► Celebration
//!  ▲  ▲                   │
//!  │  └── Settings        ▼
//!  └───────────────── TimeUp
//! ```
//!
//! The pause modal sits on top of the four match phases and freezes them.

pub mod menu;
pub mod timers;

pub use menu::{ListMenu, MainMenuItem, PauseItem};
pub use timers::{Countdown, MatchClock};

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::TIME_UP_BANNER;
use crate::input::{Button, InputSnapshot};
use crate::renderer::scene::{self, Backdrop, MenuLayout};
use crate::renderer::{Canvas, Color, palette};
use crate::settings::{SettingItem, Settings};
use crate::sim::{MatchMode, MatchState};

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Settings,
    Countdown,
    Playing,
    /// Point scored; burst and flash running, ball frozen
    Celebration,
    /// Clock ran out; result banner shown
    TimeUp,
}

impl Phase {
    /// Phases that belong to a running match (and can be paused)
    pub fn in_match(self) -> bool {
        matches!(
            self,
            Phase::Countdown | Phase::Playing | Phase::Celebration | Phase::TimeUp
        )
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Player1,
    Player2,
    Draw,
}

impl MatchResult {
    pub fn from_scores(player1: u32, player2: u32) -> Self {
        use std::cmp::Ordering;
        match player1.cmp(&player2) {
            Ordering::Greater => MatchResult::Player1,
            Ordering::Less => MatchResult::Player2,
            Ordering::Equal => MatchResult::Draw,
        }
    }

    pub fn banner(self) -> &'static str {
        match self {
            MatchResult::Player1 => "PLAYER 1 WINS!",
            MatchResult::Player2 => "PLAYER 2 WINS!",
            MatchResult::Draw => "DRAW!",
        }
    }

    pub fn color(self) -> Color {
        match self {
            MatchResult::Player1 => palette::PLAYER_1,
            MatchResult::Player2 => palette::PLAYER_2,
            MatchResult::Draw => palette::HIGHLIGHT,
        }
    }
}

/// Per-frame context handed in by the host
pub struct Frame<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    pub input: &'a InputSnapshot,
    pub canvas: &'a mut dyn Canvas,
    pub audio: &'a mut dyn AudioSink,
}

/// Requests back to the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Settings were confirmed and should be written to disk
    pub save_settings: bool,
    /// EXIT was chosen
    pub quit: bool,
}

/// The whole game above the platform layer
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    phase: Phase,
    paused: bool,
    main_menu: ListMenu<MainMenuItem>,
    settings_menu: ListMenu<SettingItem>,
    pause_menu: ListMenu<PauseItem>,
    countdown: Countdown,
    clock: MatchClock,
    /// Seconds the time-up banner has been shown
    time_up_delay: f32,
    state: MatchState,
    backdrop: Backdrop,
}

impl GameSession {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            phase: Phase::Menu,
            paused: false,
            main_menu: ListMenu::new(&MainMenuItem::ALL),
            settings_menu: ListMenu::new(&SettingItem::ALL),
            pause_menu: ListMenu::new(&PauseItem::ALL),
            countdown: Countdown::default(),
            clock: MatchClock::default(),
            time_up_delay: 0.0,
            state: MatchState::new(seed),
            backdrop: Backdrop::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    /// Direct access for hosts and tests (e.g. switching AI noise off)
    pub fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn main_menu(&self) -> &ListMenu<MainMenuItem> {
        &self.main_menu
    }

    pub fn settings_menu(&self) -> &ListMenu<SettingItem> {
        &self.settings_menu
    }

    pub fn pause_menu(&self) -> &ListMenu<PauseItem> {
        &self.pause_menu
    }

    /// Current standing from the scores
    pub fn result(&self) -> MatchResult {
        let (left, right) = self.state.scores();
        MatchResult::from_scores(left, right)
    }

    /// Push music and volume settings to an audio sink
    pub fn apply_audio(&self, audio: &mut dyn AudioSink) {
        audio.set_music_enabled(self.settings.music_enabled);
        audio.set_music_volume(self.settings.music_volume);
        audio.set_sfx_volume(self.settings.sfx_volume);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Fresh match from 0-0 starting with the countdown
    pub fn start_match(&mut self, mode: MatchMode) {
        self.state.start(mode, &self.settings);
        self.countdown = Countdown::default();
        self.clock = MatchClock::default();
        self.time_up_delay = 0.0;
        self.paused = false;
        self.set_phase(Phase::Countdown);
    }

    /// Run one frame: input, simulation, drawing
    pub fn update(&mut self, frame: &mut Frame<'_>) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !frame.canvas.is_ready() {
            return outcome;
        }
        let dt = frame.dt.max(0.0);

        match self.phase {
            Phase::Menu => self.update_main_menu(frame, dt, &mut outcome),
            Phase::Settings => self.update_settings(frame, dt, &mut outcome),
            Phase::Countdown | Phase::Playing | Phase::Celebration | Phase::TimeUp => {
                self.update_match(frame, dt)
            }
        }

        outcome
    }

    fn update_main_menu(&mut self, frame: &mut Frame<'_>, dt: f32, outcome: &mut FrameOutcome) {
        self.backdrop.draw(frame.canvas, dt, false);
        let rows: Vec<(&str, String)> = MainMenuItem::ALL
            .iter()
            .map(|item| (item.label(), String::new()))
            .collect();
        scene::draw_menu(
            frame.canvas,
            &MenuLayout::MAIN,
            "PING PONG",
            &rows,
            self.main_menu.selected_index(),
        );

        self.main_menu.navigate(frame.input, frame.audio);

        if frame.input.is_pressed(Button::Confirm) {
            frame.audio.play_effect(SoundEffect::Button);
            match self.main_menu.selected() {
                MainMenuItem::PlayVsAi => self.start_match(MatchMode::VsAi),
                MainMenuItem::PlayVsFriend => self.start_match(MatchMode::VsFriend),
                MainMenuItem::Settings => self.set_phase(Phase::Settings),
                MainMenuItem::Exit => {
                    log::info!("Exit requested");
                    outcome.quit = true;
                }
            }
        }
    }

    fn update_settings(&mut self, frame: &mut Frame<'_>, dt: f32, outcome: &mut FrameOutcome) {
        self.backdrop.draw(frame.canvas, dt, false);
        let rows: Vec<(&str, String)> = SettingItem::ALL
            .iter()
            .map(|&item| (item.label(), self.settings.value_text(item)))
            .collect();
        scene::draw_menu(
            frame.canvas,
            &MenuLayout::SETTINGS,
            "SETTINGS",
            &rows,
            self.settings_menu.selected_index(),
        );

        self.settings_menu.navigate(frame.input, frame.audio);

        let item = self.settings_menu.selected();
        for (button, step) in [(Button::NavLeft, -1), (Button::NavRight, 1)] {
            if !frame.input.is_pressed(button) {
                continue;
            }
            frame.audio.play_effect(SoundEffect::Setting);
            self.settings.adjust(item, step);
            match item {
                SettingItem::EnableMusic => {
                    frame.audio.set_music_enabled(self.settings.music_enabled)
                }
                SettingItem::MusicVolume => frame.audio.set_music_volume(self.settings.music_volume),
                SettingItem::SfxVolume => frame.audio.set_sfx_volume(self.settings.sfx_volume),
                _ => {}
            }
        }

        if frame.input.is_pressed(Button::Confirm) && item == SettingItem::Back {
            frame.audio.play_effect(SoundEffect::ButtonBack);
            outcome.save_settings = true;
            self.set_phase(Phase::Menu);
        }
    }

    fn update_match(&mut self, frame: &mut Frame<'_>, dt: f32) {
        if frame.input.is_pressed(Button::Cancel) {
            self.paused = !self.paused;
            if self.paused {
                self.pause_menu.reset();
            }
            log::debug!("Paused: {}", self.paused);
        }

        if self.paused {
            self.update_pause_modal(frame, dt);
            return;
        }

        match self.phase {
            Phase::Countdown => self.update_countdown(frame, dt),
            Phase::Playing => self.update_playing(frame, dt),
            Phase::Celebration => self.update_celebration(frame, dt),
            Phase::TimeUp => self.update_time_up(frame, dt),
            Phase::Menu | Phase::Settings => {}
        }

        if self.phase.in_match() {
            scene::draw_effects(frame.canvas, &self.state);
        }
    }

    fn update_pause_modal(&mut self, frame: &mut Frame<'_>, dt: f32) {
        self.backdrop.draw(frame.canvas, dt, false);
        let rows: Vec<(&str, String)> = PauseItem::ALL
            .iter()
            .map(|item| (item.label(), String::new()))
            .collect();
        scene::draw_menu(
            frame.canvas,
            &MenuLayout::PAUSED,
            "PAUSED",
            &rows,
            self.pause_menu.selected_index(),
        );

        self.pause_menu.navigate(frame.input, frame.audio);

        if !frame.input.is_pressed(Button::Confirm) {
            return;
        }
        frame.audio.play_effect(SoundEffect::Button);
        match self.pause_menu.selected() {
            PauseItem::Resume => self.paused = false,
            PauseItem::Restart => {
                frame.audio.play_effect(SoundEffect::ButtonBack);
                self.state.restart();
                self.countdown = Countdown::default();
                self.clock = MatchClock::default();
                self.time_up_delay = 0.0;
                self.paused = false;
                log::info!("Match restarted");
                self.set_phase(Phase::Countdown);
            }
            PauseItem::MainMenu => {
                self.state.restart();
                self.paused = false;
                self.set_phase(Phase::Menu);
            }
        }
    }

    fn update_countdown(&mut self, frame: &mut Frame<'_>, dt: f32) {
        self.backdrop.draw(frame.canvas, dt, false);
        if let Some(sound) = self.countdown.advance(dt) {
            frame.audio.play_effect(sound);
        }
        scene::draw_countdown(frame.canvas, self.countdown.value());

        if self.countdown.finished() {
            self.clock = MatchClock::default();
            self.set_phase(Phase::Playing);
        }
    }

    fn update_playing(&mut self, frame: &mut Frame<'_>, dt: f32) {
        let duration = self.settings.game_duration_secs;

        self.backdrop.draw(frame.canvas, dt, true);
        self.state.step_paddles(dt, frame.input);
        self.state.step_ball(dt, frame.audio);
        scene::draw_match(frame.canvas, &self.state);

        if let Some(sound) = self.clock.advance(dt, duration) {
            frame.audio.play_effect(sound);
        }
        scene::draw_timer(
            frame.canvas,
            self.clock.remaining_secs(duration),
            self.clock.in_warning(duration),
        );

        if self.clock.expired(duration) {
            frame.audio.play_effect(SoundEffect::Winner);
            let (left, right) = self.state.scores();
            log::info!("Time up: {} - {} ({:?})", left, right, self.result());
            self.time_up_delay = 0.0;
            self.set_phase(Phase::TimeUp);
        } else if self.state.ball.scored {
            self.state.celebrate();
            self.set_phase(Phase::Celebration);
        }
    }

    fn update_celebration(&mut self, frame: &mut Frame<'_>, dt: f32) {
        self.state.step_effects(dt);
        if self.state.effects_finished() {
            self.state.reset_round();
            self.set_phase(Phase::Playing);
        }

        self.backdrop.draw(frame.canvas, 0.0, true);
        self.state.step_paddles(dt, frame.input);
        scene::draw_match(frame.canvas, &self.state);
    }

    fn update_time_up(&mut self, frame: &mut Frame<'_>, dt: f32) {
        self.backdrop.draw(frame.canvas, dt, false);
        let result = self.result();
        scene::draw_time_up(frame.canvas, result.banner(), result.color());

        self.time_up_delay += dt;
        if self.time_up_delay >= TIME_UP_BANNER {
            self.set_phase(Phase::Menu);
        }
    }
}

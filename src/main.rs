//! Ping Pong entry point
//!
//! Headless host: loads settings, plays an AI-vs-AI match on a recording
//! canvas with a fixed-timestep accumulator, and logs the sounds it would play.
//! A windowed build swaps `DrawList` and the audio drain for a real backend.

use std::time::{SystemTime, UNIX_EPOCH};

use ping_pong::consts::*;
use ping_pong::sim::MatchMode;
use ping_pong::{AudioManager, DrawList, Frame, FrameOutcome, GameSession, InputSnapshot, Phase, Settings};

const CONFIG_PATH: &str = "config/config.json";
const DEFAULTS_PATH: &str = "config/default.json";

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;
/// Recording surface size in pixels
const SURFACE_SIZE: (u32, u32) = (1280, 800);
/// Hard stop in case a match never reaches its time-up banner
const MAX_FRAMES: u64 = 60 * 60 * 15;

/// Game instance holding all host-side state
struct Host {
    session: GameSession,
    canvas: DrawList,
    audio: AudioManager,
    input: InputSnapshot,
    accumulator: f32,
    frames: u64,
}

impl Host {
    fn new(settings: Settings, seed: u64) -> Self {
        let mut audio = AudioManager::new();
        let session = GameSession::new(settings, seed);
        session.apply_audio(&mut audio);
        Self {
            session,
            canvas: DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1),
            audio,
            input: InputSnapshot::new(),
            accumulator: 0.0,
            frames: 0,
        }
    }

    /// Run simulation steps for one display frame
    fn update(&mut self, dt: f32) -> FrameOutcome {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        self.frames += 1;

        let mut outcome = FrameOutcome::default();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.canvas.clear();
            let mut frame = Frame {
                dt: SIM_DT,
                input: &self.input,
                canvas: &mut self.canvas,
                audio: &mut self.audio,
            };
            let step = self.session.update(&mut frame);
            outcome.save_settings |= step.save_settings;
            outcome.quit |= step.quit;

            self.audio.update(SIM_DT);
            // Clear one-shot edges after they were seen once
            self.input.begin_frame();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for request in self.audio.drain() {
            log::debug!("sfx {} @ {:.1}", request.effect.name(), request.volume);
        }
        log::trace!("frame {}: {} draw commands", self.frames, self.canvas.len());

        outcome
    }
}

fn main() {
    env_logger::init();
    log::info!("Ping Pong (headless) starting...");

    let settings = Settings::load_or_init(CONFIG_PATH, DEFAULTS_PATH);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed {}", seed);

    let mut host = Host::new(settings, seed);
    host.session.start_match(MatchMode::Demo);

    loop {
        let outcome = host.update(FRAME_DT);

        if outcome.save_settings {
            if let Err(e) = host.session.settings().save(CONFIG_PATH) {
                log::error!("Failed to save settings: {}", e);
            }
        }
        if outcome.quit || host.session.phase() == Phase::Menu {
            break;
        }
        if host.frames >= MAX_FRAMES {
            log::warn!("Demo did not finish after {} frames", host.frames);
            break;
        }
    }

    let (left, right) = host.session.match_state().scores();
    let result = host.session.result();
    log::info!("Demo finished after {} frames", host.frames);
    println!("{} - {}  {}", left, right, result.banner());
}

//! Astro Shooter entry point
//!
//! Headless driver: runs the simulation against a synthetic 60 Hz clock with
//! a scripted pilot, feeding the audio and rendering adapters each frame.

use std::time::Duration;

use astro_shooter::audio::{AudioManager, play_events};
use astro_shooter::consts::*;
use astro_shooter::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use astro_shooter::view::{Hud, LogRenderer, Renderer, end_screen_lines};
use astro_shooter::Settings;

/// Frames the pilot waits on an end screen before restarting
const RESTART_DELAY_FRAMES: u64 = 2 * TICKS_PER_SECOND as u64;

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager,
    renderer: LogRenderer,
    now: Duration,
    frame: u64,
    /// Frame at which the current end screen appeared
    ended_at: Option<u64>,
    /// Finished runs
    runs: u32,
}

impl Game {
    fn new(settings: &Settings) -> Self {
        let seed = settings.seed_or_time();
        let state = GameState::new(seed, settings.tuning(), Duration::ZERO);
        log::info!(
            "Game initialized with seed {} ({})",
            seed,
            settings.variant.as_str()
        );

        let mut audio = AudioManager::load(&settings.asset_dir);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        Self {
            state,
            audio,
            renderer: LogRenderer::new(TICKS_PER_SECOND as u64),
            now: Duration::ZERO,
            frame: 0,
            ended_at: None,
            runs: 0,
        }
    }

    /// Scripted input: keep firing, sweep side to side, fire missiles when
    /// stocked and restart a couple of seconds after a run ends
    fn pilot(&self) -> TickInput {
        let sweep_left = (self.frame / (3 * TICKS_PER_SECOND as u64)) % 2 == 0;
        let restart = self
            .ended_at
            .is_some_and(|at| self.frame >= at + RESTART_DELAY_FRAMES);
        TickInput {
            left: sweep_left,
            right: !sweep_left,
            fire: true,
            special: self.state.progression.special_weapon.ammo > 0 && self.frame % 30 == 0,
            restart,
            ..Default::default()
        }
    }

    fn update(&mut self) {
        let input = self.pilot();
        let was_terminal = self.state.phase.is_terminal();
        tick(&mut self.state, &input, self.now);

        let events = std::mem::take(&mut self.state.events);
        play_events(&mut self.audio, &events);
        for event in &events {
            match event {
                GameEvent::GameOver | GameEvent::Victory => self.finish_run(),
                GameEvent::AchievementUnlocked(kind) => {
                    log::info!("Achievement: {} - {}", kind.name(), kind.description())
                }
                _ => {}
            }
        }
        if was_terminal && self.state.phase == GamePhase::Playing {
            self.ended_at = None;
        }

        let hud = Hud::from_state(&self.state, self.now);
        self.renderer.draw(&self.state, &hud);

        self.frame += 1;
        self.now += TICK;
    }

    fn finish_run(&mut self) {
        self.ended_at = Some(self.frame);
        self.runs += 1;
        for line in end_screen_lines(&self.state) {
            log::info!("{}", line);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Astro Shooter (headless) starting...");

    let settings = Settings::load();
    let mut game = Game::new(&settings);

    for _ in 0..settings.demo_frames {
        game.update();
    }

    log::info!(
        "Simulated {} frames over {} finished runs, high score {}",
        game.frame,
        game.runs,
        game.state.high_score
    );
    let hud = Hud::from_state(&game.state, game.now);
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => log::info!("Final HUD:\n{}", json),
        Err(e) => log::warn!("Failed to serialize HUD: {}", e),
    }
}

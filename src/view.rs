//! Rendering adapter seam
//!
//! Renderers receive the state read-only plus a `Hud` snapshot and never feed
//! anything back into the simulation.

use std::time::Duration;

use serde::Serialize;

use crate::consts::{POWER_UP_MESSAGE_DURATION, SHIP_MAX_HEALTH};
use crate::sim::{GamePhase, GameState};

/// Heads-up display values for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    /// Fill fraction of the health bar (0.0 - 1.0)
    pub health: f32,
    /// Pickup notice, present only while it is fresh
    pub message: Option<String>,
    pub level: u32,
    pub elapsed: Duration,
    pub special_ammo: u32,
}

impl Hud {
    pub fn from_state(state: &GameState, now: Duration) -> Self {
        let message = state
            .power_up_message
            .as_ref()
            .filter(|m| now.saturating_sub(m.shown_at) < POWER_UP_MESSAGE_DURATION)
            .map(|m| m.text.clone());

        Self {
            score: state.score,
            high_score: state.high_score,
            health: (state.ship.health as f32 / SHIP_MAX_HEALTH as f32).clamp(0.0, 1.0),
            message,
            level: state.progression.level,
            elapsed: state.game_time,
            special_ammo: state.progression.special_weapon.ammo,
        }
    }
}

/// Text shown over the final frame of a run. Empty while playing.
pub fn end_screen_lines(state: &GameState) -> Vec<String> {
    let title = match state.phase {
        GamePhase::Playing => return Vec::new(),
        GamePhase::GameOver => "Game Over",
        GamePhase::Victory => "Victory!",
    };
    vec![
        title.to_string(),
        format!("Score: {}", state.score),
        format!("Asteroids Defeated: {}", state.progression.asteroids_defeated),
        format!("Enemy Ships Destroyed: {}", state.progression.enemies_destroyed),
        "Press SPACE to play again".to_string(),
    ]
}

/// Draws frames
pub trait Renderer {
    fn draw(&mut self, state: &GameState, hud: &Hud);
}

/// Headless renderer that logs a frame summary every `every` frames
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, state: &GameState, hud: &Hud) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        log::debug!(
            "frame {}: score={} hi={} hp={:.0}% lvl={} asteroids={} enemies={} boss={} bullets={}/{} pickups={}",
            self.frames,
            hud.score,
            hud.high_score,
            hud.health * 100.0,
            hud.level,
            state.asteroids.len(),
            state.enemies.len(),
            state.boss.is_some(),
            state.bullets.len(),
            state.enemy_bullets.len(),
            state.power_ups.len(),
        );
        if let Some(msg) = &hud.message {
            log::debug!("  {}", msg);
        }
        for line in end_screen_lines(state) {
            log::debug!("  {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUpKind, Tuning};

    #[test]
    fn test_hud_message_fades() {
        let mut state = GameState::new(1, Tuning::classic(), Duration::ZERO);
        state.activate_power_up(PowerUpKind::Nuke, Duration::from_secs(10));

        let hud = Hud::from_state(&state, Duration::from_secs(12));
        assert_eq!(hud.message.as_deref(), Some("Picked up Nuke"));

        let hud = Hud::from_state(&state, Duration::from_secs(13));
        assert_eq!(hud.message, None);
    }

    #[test]
    fn test_hud_health_fraction() {
        let mut state = GameState::new(1, Tuning::classic(), Duration::ZERO);
        state.ship.take_damage(25);
        let hud = Hud::from_state(&state, Duration::ZERO);
        assert!((hud.health - 0.75).abs() < 1e-6);
        assert_eq!(hud.level, 1);
    }

    #[test]
    fn test_end_screen() {
        let mut state = GameState::new(1, Tuning::classic(), Duration::ZERO);
        assert!(end_screen_lines(&state).is_empty());

        state.phase = GamePhase::GameOver;
        state.score = 42;
        state.progression.asteroids_defeated = 40;
        state.progression.enemies_destroyed = 2;
        assert_eq!(
            end_screen_lines(&state),
            [
                "Game Over",
                "Score: 42",
                "Asteroids Defeated: 40",
                "Enemy Ships Destroyed: 2",
                "Press SPACE to play again",
            ]
        );

        state.phase = GamePhase::Victory;
        assert_eq!(end_screen_lines(&state)[0], "Victory!");
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let state = GameState::new(1, Tuning::classic(), Duration::ZERO);
        let hud = Hud::from_state(&state, Duration::ZERO);
        let mut renderer = LogRenderer::new(0);
        renderer.draw(&state, &hud);
        renderer.draw(&state, &hud);
        assert_eq!(renderer.frames, 2);
    }
}

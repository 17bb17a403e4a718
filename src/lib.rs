//! Astro Shooter - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, progression)
//! - `audio`: Fire-and-forget sound effects driven by simulation events
//! - `view`: Read-only HUD snapshot and the renderer seam
//! - `settings`: Runtime configuration

pub mod audio;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Nominal frame rate of the external frame clock
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Duration of one tick at the nominal frame rate
    pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Asteroids are culled once they leave the canvas expanded by this margin
    pub const ASTEROID_CULL_MARGIN: f32 = 50.0;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 4.0;
    pub const SHIP_RADIUS: f32 = 20.0;
    pub const SHIP_MAX_HEALTH: u32 = 100;
    /// Ship spawns this far above the bottom edge
    pub const SHIP_SPAWN_OFFSET: f32 = 50.0;
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;

    /// Bullets (player and enemy) travel this far per tick
    pub const BULLET_SPEED: f32 = 6.0;
    pub const BULLET_DAMAGE: u32 = 1;
    pub const DOUBLE_DAMAGE: u32 = 2;
    pub const MISSILE_DAMAGE: u32 = 5;
    pub const ENEMY_BULLET_DAMAGE: u32 = 5;

    /// Asteroid population
    pub const MAX_ASTEROIDS: usize = 10;
    pub const ASTEROID_MIN_SIZE: u32 = 10;
    pub const ASTEROID_MAX_SIZE: u32 = 50;
    pub const ASTEROID_MIN_VERTICES: usize = 3;
    pub const ASTEROID_MAX_VERTICES: usize = 7;
    pub const ASTEROID_MIN_SPEED: u32 = 1;
    pub const ASTEROID_MAX_SPEED: u32 = 3;
    /// Size lost per bullet hit
    pub const ASTEROID_HIT_SHRINK: f32 = 5.0;
    /// Below this size an asteroid is destroyed regardless of health
    pub const ASTEROID_DESTROY_SIZE: f32 = 10.0;
    /// Destroyed asteroids larger than this (before the hit) split in two
    pub const ASTEROID_SPLIT_SIZE: f32 = 20.0;
    pub const SPLIT_SPEED_FACTOR: f32 = 1.5;
    /// Initial asteroid spawn interval in seconds and its per-tick decay
    pub const ASTEROID_SPAWN_RATE: f64 = 2.0;
    pub const ASTEROID_SPAWN_DECAY: f64 = 0.999;

    /// Ship damage by asteroid size tier
    pub const SMALL_ASTEROID_DAMAGE: u32 = 5;
    pub const MEDIUM_ASTEROID_DAMAGE: u32 = 15;
    pub const LARGE_ASTEROID_DAMAGE: u32 = 25;
    pub const SMALL_ASTEROID_LIMIT: f32 = 20.0;
    pub const MEDIUM_ASTEROID_LIMIT: f32 = 40.0;

    /// Enemy ships
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_HEALTH: u32 = 5;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_SCORE: u64 = 100;
    pub const ENEMY_RAM_DAMAGE: u32 = 20;
    pub const ENEMY_FIRE_COOLDOWN: Duration = Duration::from_secs(2);

    /// Boss
    pub const BOSS_RADIUS: f32 = 50.0;
    pub const BOSS_HEALTH: u32 = 50;
    pub const BOSS_SCORE: u64 = 1000;
    pub const BOSS_FIRE_COOLDOWN: Duration = Duration::from_secs(1);
    pub const BOSS_SPREAD_ANGLE: f32 = 0.25;
    pub const BOSS_RING_BULLETS: usize = 8;
    pub const BOSS_NUKE_DAMAGE: u32 = 10;
    /// The boss tracks the ship horizontally along this line
    pub const BOSS_HOVER_Y: f32 = 100.0;
    /// Boss spawns are accepted during the first second of each boundary
    pub const BOSS_INTERVAL_MINUTES: u64 = 5;
    pub const BOSS_SPAWN_WINDOW_SECS: f32 = 1.0;

    /// Power-ups
    pub const POWER_UP_DURATION: Duration = Duration::from_secs(30);
    pub const POWER_UP_MESSAGE_DURATION: Duration = Duration::from_secs(3);
    pub const POWER_UP_PICKUP_RADIUS: f32 = 10.0;

    /// Difficulty scaling per elapsed minute
    pub const ASTEROID_SPEED_PER_MINUTE: f32 = 0.25;
    pub const ENEMY_SPEED_PER_MINUTE: f32 = 0.5;

    /// Surviving this long wins the game
    pub const VICTORY_TIME: Duration = Duration::from_secs(5 * 60);

    /// Progression
    pub const ASTEROID_SCORE: u64 = 1;
    pub const LEVEL_SCORE_STEP: u64 = 1000;
    pub const MISSILES_PER_LEVEL: u32 = 3;
}

/// Unit vector pointing along `angle` (radians, screen space: +y is down)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Whether `pos` lies inside the canvas grown by `margin` on every side
#[inline]
pub fn in_canvas(pos: Vec2, margin: f32) -> bool {
    use consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    pos.x >= -margin
        && pos.x <= CANVAS_WIDTH + margin
        && pos.y >= -margin
        && pos.y <= CANVAS_HEIGHT + margin
}

/// Clamp a position to the canvas
#[inline]
pub fn clamp_to_canvas(pos: Vec2) -> Vec2 {
    use consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    pos.clamp(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_heading_cardinal() {
        assert!((heading(0.0) - Vec2::X).length() < 1e-6);
        assert!((heading(PI / 2.0) - Vec2::Y).length() < 1e-6);
        assert!((heading(-PI / 2.0) + Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_in_canvas_margin() {
        assert!(in_canvas(Vec2::new(0.0, 0.0), 0.0));
        assert!(in_canvas(Vec2::new(800.0, 600.0), 0.0));
        assert!(!in_canvas(Vec2::new(-0.1, 10.0), 0.0));
        assert!(in_canvas(Vec2::new(-49.0, 10.0), 50.0));
        assert!(!in_canvas(Vec2::new(10.0, 651.0), 50.0));
    }

    #[test]
    fn test_clamp_to_canvas() {
        assert_eq!(clamp_to_canvas(Vec2::new(-5.0, 700.0)), Vec2::new(0.0, 600.0));
    }
}

//! Game state and core simulation types
//!
//! Everything the simulation step touches lives in `GameState`; adapters only
//! read it.

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{self, Asteroid};
use super::progression::{AchievementKind, Progression};
use super::tuning::Tuning;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship destroyed, waiting for restart
    GameOver,
    /// Survived the full run, waiting for restart
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Facing angle (radians), snapped to a cardinal direction by movement
    pub angle: f32,
    pub radius: f32,
    pub health: u32,
    /// Last time a shot was fired
    pub last_shot: Option<Duration>,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - SHIP_SPAWN_OFFSET),
            angle: 0.0,
            radius: SHIP_RADIUS,
            health: SHIP_MAX_HEALTH,
            last_shot: None,
        }
    }
}

impl Ship {
    /// Move by `delta`, staying on the canvas
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos = crate::clamp_to_canvas(self.pos + delta);
    }

    /// Apply damage, flooring health at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// A hostile ship that homes in on the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShip {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub health: u32,
    pub speed: f32,
    pub last_shot: Duration,
}

/// Boss fire patterns, cycled one per volley
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossPattern {
    /// One bullet straight at the ship
    #[default]
    Aimed,
    /// Three bullets fanned around the ship direction
    Spread,
    /// A full ring of bullets
    Ring,
}

impl BossPattern {
    pub fn next(self) -> Self {
        match self {
            BossPattern::Aimed => BossPattern::Spread,
            BossPattern::Spread => BossPattern::Ring,
            BossPattern::Ring => BossPattern::Aimed,
        }
    }
}

/// The boss enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
    pub health: u32,
    pub speed: f32,
    pub last_shot: Duration,
    pub pattern: BossPattern,
}

/// A projectile (player or enemy, depending on which list holds it)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub angle: f32,
    pub damage: u32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, damage: u32) -> Self {
        Self { pos, angle, damage }
    }

    /// Advance one tick along the heading
    pub fn advance(&mut self) {
        self.pos += crate::heading(self.angle) * BULLET_SPEED;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// No effect active
    #[default]
    None,
    /// Clears the screen of asteroids and enemy ships
    Nuke,
    /// Player bullets deal double damage
    DoubleDamage,
    /// Special weapon fires without spending ammo
    InfiniteAmmo,
    /// Ship ignores all damage
    Shield,
    /// Ship moves faster
    SpeedBoost,
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PowerUpKind::None => "None",
            PowerUpKind::Nuke => "Nuke",
            PowerUpKind::DoubleDamage => "Double Damage",
            PowerUpKind::InfiniteAmmo => "Infinite Ammo",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::SpeedBoost => "Speed Boost",
        };
        f.write_str(name)
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Uncollected pickups vanish after this time
    pub expires_at: Duration,
}

/// Transient HUD message shown after a pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpMessage {
    pub text: String,
    pub shown_at: Duration,
}

/// Side effects produced by a tick, drained by the adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    MissileFired,
    PowerUpCollected(PowerUpKind),
    EnemyDestroyed,
    BossSpawned,
    BossDefeated,
    LevelUp(u32),
    AchievementUnlocked(AchievementKind),
    GameOver,
    Victory,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Balance table
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Active enemy ships (at most `tuning.max_enemies`)
    pub enemies: Vec<EnemyShip>,
    pub boss: Option<Boss>,
    /// Player bullets
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    /// Best score this process has seen (survives resets)
    pub high_score: u64,
    /// The single active power-up slot
    pub active_power_up: PowerUpKind,
    pub power_up_end: Duration,
    pub power_up_message: Option<PowerUpMessage>,
    pub last_power_up_spawn: Duration,
    /// Asteroid spawn interval in seconds, decays every tick
    pub asteroid_spawn_rate: f64,
    /// Speed multiplier for newly generated asteroids
    pub asteroid_speed: f32,
    /// Speed for newly spawned enemy ships
    pub enemy_speed: f32,
    pub game_start: Duration,
    /// Time since `game_start` as of the last tick
    pub game_time: Duration,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub progression: Progression,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state; `now` starts the run clock
    pub fn new(seed: u64, tuning: Tuning, now: Duration) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            ship: Ship::default(),
            enemies: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            asteroids: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            high_score: 0,
            active_power_up: PowerUpKind::None,
            power_up_end: now,
            power_up_message: None,
            last_power_up_spawn: now,
            asteroid_spawn_rate: ASTEROID_SPAWN_RATE,
            asteroid_speed: 1.0,
            enemy_speed: ENEMY_BASE_SPEED,
            game_start: now,
            game_time: Duration::ZERO,
            time_ticks: 0,
            progression: Progression::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_asteroid();
        state
    }

    /// Start a fresh run. The high score, achievements, seed and RNG stream
    /// carry over.
    pub fn reset(&mut self, now: Duration) {
        self.phase = GamePhase::Playing;
        self.ship = Ship::default();
        self.enemies.clear();
        self.boss = None;
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.asteroids.clear();
        self.power_ups.clear();
        self.score = 0;
        self.active_power_up = PowerUpKind::None;
        self.power_up_end = now;
        self.power_up_message = None;
        self.last_power_up_spawn = now;
        self.asteroid_spawn_rate = ASTEROID_SPAWN_RATE;
        self.asteroid_speed = 1.0;
        self.enemy_speed = ENEMY_BASE_SPEED;
        self.game_start = now;
        self.game_time = Duration::ZERO;
        self.time_ticks = 0;
        self.progression.reset_run();

        self.spawn_asteroid();
        log::info!("Run reset (high score {})", self.high_score);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Generate a random asteroid above the top edge
    pub fn spawn_asteroid(&mut self) {
        let id = self.next_entity_id();
        let asteroid = asteroid::generate(id, self.asteroid_speed, &mut self.rng);
        self.asteroids.push(asteroid);
    }

    /// Time since the run started, as seen by `now`
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.game_start)
    }

    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.active_power_up == kind
    }

    /// Damage dealt by a regular player bullet
    pub fn bullet_damage(&self) -> u32 {
        if self.has_power_up(PowerUpKind::DoubleDamage) {
            DOUBLE_DAMAGE
        } else {
            BULLET_DAMAGE
        }
    }

    pub fn ship_speed(&self) -> f32 {
        if self.has_power_up(PowerUpKind::SpeedBoost) {
            SHIP_SPEED * SPEED_BOOST_FACTOR
        } else {
            SHIP_SPEED
        }
    }

    /// Damage the ship unless shielded
    pub fn damage_ship(&mut self, amount: u32) {
        if self.has_power_up(PowerUpKind::Shield) {
            log::debug!("Shield absorbed {} damage", amount);
            return;
        }
        self.ship.take_damage(amount);
    }

    /// Fill the single power-up slot, replacing whatever was active
    pub fn activate_power_up(&mut self, kind: PowerUpKind, now: Duration) {
        if self.active_power_up != PowerUpKind::None {
            log::debug!("{} replaced by {}", self.active_power_up, kind);
        }
        self.active_power_up = kind;
        self.power_up_end = now + POWER_UP_DURATION;
        self.power_up_message = Some(PowerUpMessage {
            text: format!("Picked up {}", kind),
            shown_at: now,
        });
        self.events.push(GameEvent::PowerUpCollected(kind));
    }

    /// Raise the high score to the current score if it was beaten
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, Tuning::classic(), Duration::ZERO);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 550.0));
        assert_eq!(state.ship.angle, 0.0);
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.active_power_up, PowerUpKind::None);
    }

    #[test]
    fn test_ship_damage_floors_at_zero() {
        let mut ship = Ship::default();
        ship.take_damage(60);
        ship.take_damage(60);
        assert_eq!(ship.health, 0);
        assert!(ship.is_destroyed());
    }

    #[test]
    fn test_shield_blocks_damage() {
        let mut state = GameState::new(7, Tuning::extended(), Duration::ZERO);
        state.activate_power_up(PowerUpKind::Shield, Duration::ZERO);
        state.damage_ship(25);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH);
    }

    #[test]
    fn test_activate_overwrites_previous() {
        let mut state = GameState::new(7, Tuning::extended(), Duration::ZERO);
        state.activate_power_up(PowerUpKind::DoubleDamage, Duration::from_secs(1));
        assert_eq!(state.bullet_damage(), DOUBLE_DAMAGE);

        let now = Duration::from_secs(10);
        state.activate_power_up(PowerUpKind::SpeedBoost, now);
        assert_eq!(state.active_power_up, PowerUpKind::SpeedBoost);
        assert_eq!(state.power_up_end, now + Duration::from_secs(30));
        assert_eq!(state.bullet_damage(), BULLET_DAMAGE);
        assert_eq!(state.ship_speed(), SHIP_SPEED * SPEED_BOOST_FACTOR);
        assert_eq!(
            state.power_up_message.as_ref().map(|m| m.text.as_str()),
            Some("Picked up Speed Boost")
        );
    }

    #[test]
    fn test_boss_pattern_cycle() {
        let p = BossPattern::Aimed;
        assert_eq!(p.next(), BossPattern::Spread);
        assert_eq!(p.next().next(), BossPattern::Ring);
        assert_eq!(p.next().next().next(), BossPattern::Aimed);
    }
}

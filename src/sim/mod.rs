//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock readings are passed in, never sampled
//! - Seeded RNG only
//! - Stable iteration order (insertion order, filtered in place)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod progression;
pub mod state;
pub mod tick;
pub mod tuning;

pub use asteroid::Asteroid;
pub use progression::{Achievement, AchievementKind, Progression, SpecialWeapon, Upgrade};
pub use state::{
    Boss, BossPattern, Bullet, EnemyShip, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind,
    PowerUpMessage, Ship,
};
pub use tick::{TickInput, tick};
pub use tuning::{Tuning, Variant};

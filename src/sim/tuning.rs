//! Data-driven game balance
//!
//! The two rulesets differ only in this table; the tick code never branches
//! on the variant itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;

/// Which ruleset the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Asteroids, a single enemy ship and three power-ups
    Classic,
    /// Enemy squadrons with return fire, a boss and progression
    #[default]
    Extended,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Extended => "Extended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "simple" => Some(Variant::Classic),
            "extended" => Some(Variant::Extended),
            _ => None,
        }
    }
}

const CLASSIC_POWER_UPS: &[PowerUpKind] = &[
    PowerUpKind::Nuke,
    PowerUpKind::DoubleDamage,
    PowerUpKind::InfiniteAmmo,
];

const EXTENDED_POWER_UPS: &[PowerUpKind] = &[
    PowerUpKind::Nuke,
    PowerUpKind::DoubleDamage,
    PowerUpKind::InfiniteAmmo,
    PowerUpKind::Shield,
    PowerUpKind::SpeedBoost,
];

/// Balance table for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub variant: Variant,
    /// Asteroid population cap
    pub max_asteroids: usize,
    /// Concurrent enemy ship cap
    pub max_enemies: usize,
    /// Per-tick probability of an enemy spawn while under the cap
    pub enemy_spawn_chance: f64,
    /// Enemies and the boss shoot back
    pub enemy_fire: bool,
    pub boss_enabled: bool,
    pub power_up_interval: Duration,
    /// Power-ups the spawner draws from (uniformly)
    pub power_up_kinds: Vec<PowerUpKind>,
    /// Level-ups and achievements are evaluated
    pub progression: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Tuning {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Extended => Self::extended(),
        }
    }

    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            max_asteroids: crate::consts::MAX_ASTEROIDS,
            max_enemies: 1,
            enemy_spawn_chance: 0.01,
            enemy_fire: false,
            boss_enabled: false,
            power_up_interval: Duration::from_secs(30),
            power_up_kinds: CLASSIC_POWER_UPS.to_vec(),
            progression: false,
        }
    }

    pub fn extended() -> Self {
        Self {
            variant: Variant::Extended,
            max_asteroids: crate::consts::MAX_ASTEROIDS,
            max_enemies: 3,
            enemy_spawn_chance: 0.01,
            enemy_fire: true,
            boss_enabled: true,
            power_up_interval: Duration::from_secs(45),
            power_up_kinds: EXTENDED_POWER_UPS.to_vec(),
            progression: true,
        }
    }

    /// Same ruleset with every hostile spawn source switched off
    pub fn without_hostiles(mut self) -> Self {
        self.max_enemies = 0;
        self.enemy_spawn_chance = 0.0;
        self.boss_enabled = false;
        self
    }
}

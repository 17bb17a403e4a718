//! Run progression: kill counters, levels, achievements and the special weapon

use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_SCORE_STEP, MISSILES_PER_LEVEL, MISSILE_DAMAGE};

/// Named achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementKind {
    AsteroidHunter,
    EnemySlayer,
    BossKiller,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 3] = [
        AchievementKind::AsteroidHunter,
        AchievementKind::EnemySlayer,
        AchievementKind::BossKiller,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementKind::AsteroidHunter => "Asteroid Hunter",
            AchievementKind::EnemySlayer => "Enemy Slayer",
            AchievementKind::BossKiller => "Boss Killer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKind::AsteroidHunter => "Destroy 100 asteroids",
            AchievementKind::EnemySlayer => "Destroy 50 enemy ships",
            AchievementKind::BossKiller => "Defeat a boss",
        }
    }

    fn is_met(&self, progress: &Progression) -> bool {
        match self {
            AchievementKind::AsteroidHunter => progress.asteroids_defeated >= 100,
            AchievementKind::EnemySlayer => progress.enemies_destroyed >= 50,
            AchievementKind::BossKiller => progress.bosses_defeated >= 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub unlocked: bool,
}

/// Permanent upgrade catalog entry. Nothing purchases these yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub name: String,
    pub level: u32,
    pub cost: u32,
}

/// Limited-ammo secondary weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialWeapon {
    pub name: String,
    pub ammo: u32,
    pub damage: u32,
}

impl Default for SpecialWeapon {
    fn default() -> Self {
        Self {
            name: "Missile".to_string(),
            ammo: 0,
            damage: MISSILE_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub asteroids_defeated: u32,
    pub enemies_destroyed: u32,
    pub bosses_defeated: u32,
    /// Survives resets
    pub achievements: Vec<Achievement>,
    pub upgrades: Vec<Upgrade>,
    pub special_weapon: SpecialWeapon,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            asteroids_defeated: 0,
            enemies_destroyed: 0,
            bosses_defeated: 0,
            achievements: AchievementKind::ALL
                .iter()
                .map(|&kind| Achievement {
                    kind,
                    unlocked: false,
                })
                .collect(),
            upgrades: ["Health", "Speed", "Damage"]
                .iter()
                .map(|name| Upgrade {
                    name: name.to_string(),
                    level: 0,
                    cost: 100,
                })
                .collect(),
            special_weapon: SpecialWeapon::default(),
        }
    }

    /// Clear per-run counters, keeping unlocked achievements
    pub fn reset_run(&mut self) {
        self.level = 1;
        self.asteroids_defeated = 0;
        self.enemies_destroyed = 0;
        self.bosses_defeated = 0;
        self.special_weapon = SpecialWeapon::default();
    }

    /// Advance at most one level if `score` has reached the next threshold.
    /// Each level-up refills the special weapon.
    pub fn check_level_up(&mut self, score: u64) -> Option<u32> {
        if score < self.level as u64 * LEVEL_SCORE_STEP {
            return None;
        }
        self.level += 1;
        self.special_weapon.ammo += MISSILES_PER_LEVEL;
        Some(self.level)
    }

    /// Unlock every achievement whose threshold has been crossed. Returns only
    /// the ones unlocked by this call.
    pub fn check_achievements(&mut self) -> Vec<AchievementKind> {
        let met: Vec<bool> = self.achievements.iter().map(|a| a.kind.is_met(self)).collect();
        let mut unlocked = Vec::new();
        for (achievement, met) in self.achievements.iter_mut().zip(met) {
            if met && !achievement.unlocked {
                achievement.unlocked = true;
                unlocked.push(achievement.kind);
            }
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked(p: &Progression, kind: AchievementKind) -> bool {
        p.achievements.iter().any(|a| a.kind == kind && a.unlocked)
    }

    #[test]
    fn test_level_up_one_step_per_check() {
        let mut p = Progression::new();
        assert_eq!(p.check_level_up(999), None);
        assert_eq!(p.check_level_up(2500), Some(2));
        assert_eq!(p.check_level_up(2500), Some(3));
        assert_eq!(p.check_level_up(2500), None);
        assert_eq!(p.special_weapon.ammo, 2 * MISSILES_PER_LEVEL);
    }

    #[test]
    fn test_achievements_unlock_once() {
        let mut p = Progression::new();
        assert!(p.check_achievements().is_empty());

        p.asteroids_defeated = 100;
        assert_eq!(p.check_achievements(), vec![AchievementKind::AsteroidHunter]);
        assert!(p.check_achievements().is_empty());
        assert!(unlocked(&p, AchievementKind::AsteroidHunter));

        p.bosses_defeated = 1;
        p.enemies_destroyed = 50;
        assert_eq!(
            p.check_achievements(),
            vec![AchievementKind::EnemySlayer, AchievementKind::BossKiller]
        );
    }

    #[test]
    fn test_reset_keeps_achievements() {
        let mut p = Progression::new();
        p.bosses_defeated = 1;
        p.check_achievements();
        p.level = 4;
        p.special_weapon.ammo = 9;

        p.reset_run();
        assert_eq!(p.level, 1);
        assert_eq!(p.bosses_defeated, 0);
        assert_eq!(p.special_weapon.ammo, 0);
        assert!(unlocked(&p, AchievementKind::BossKiller));
    }

    #[test]
    fn test_upgrade_catalog() {
        let p = Progression::new();
        let names: Vec<_> = p.upgrades.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Health", "Speed", "Damage"]);
        assert!(p.upgrades.iter().all(|u| u.level == 0 && u.cost == 100));
    }
}

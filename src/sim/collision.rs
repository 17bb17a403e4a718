//! Collision detection and resolution
//!
//! Every entity is a circle, so detection is a distance check. Resolution
//! runs in a fixed order because the order decides scoring and survival:
//! player bullets hit ships first, then asteroids, then whatever is left
//! touches the player.

use std::time::Duration;

use glam::Vec2;

use super::asteroid::{self, impact_damage};
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::consts::*;

/// Whether two points are within `reach` of each other (touching counts)
#[inline]
pub fn within(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) <= reach
}

/// Drop every element whose flag is set, preserving order
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut flags = marked.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Run all collision passes for one tick
pub fn resolve(state: &mut GameState, now: Duration) {
    bullets_vs_ships(state);
    bullets_vs_asteroids(state);
    asteroids_vs_ship(state);
    enemy_fire_vs_ship(state);
    enemies_ram_ship(state);
    ship_vs_power_ups(state, now);
}

/// Player bullets against enemy ships, then the boss. A bullet hits at most one target.
pub fn bullets_vs_ships(state: &mut GameState) {
    let mut consumed = vec![false; state.bullets.len()];

    for (i, bullet) in state.bullets.iter().enumerate() {
        let target = state
            .enemies
            .iter_mut()
            .find(|e| e.health > 0 && within(bullet.pos, e.pos, e.radius));

        if let Some(enemy) = target {
            consumed[i] = true;
            enemy.health = enemy.health.saturating_sub(bullet.damage);
            continue;
        }

        if let Some(boss) = state.boss.as_mut().filter(|b| b.health > 0) {
            if within(bullet.pos, boss.pos, boss.radius) {
                consumed[i] = true;
                boss.health = boss.health.saturating_sub(bullet.damage);
            }
        }
    }

    retain_unmarked(&mut state.bullets, &consumed);
    reward_destroyed_ships(state);
}

/// Remove dead enemies and the dead boss, paying out their bounties
fn reward_destroyed_ships(state: &mut GameState) {
    let before = state.enemies.len();
    state.enemies.retain(|e| e.health > 0);
    let destroyed = before - state.enemies.len();
    for _ in 0..destroyed {
        state.score += ENEMY_SCORE;
        state.progression.enemies_destroyed += 1;
        state.emit(GameEvent::EnemyDestroyed);
    }

    if state.boss.as_ref().is_some_and(|b| b.health == 0) {
        state.boss = None;
        state.score += BOSS_SCORE;
        state.progression.bosses_defeated += 1;
        state.emit(GameEvent::BossDefeated);
        log::info!("Boss defeated! Score {}", state.score);
    }
}

/// Player bullets against asteroids. Large asteroids split when destroyed.
pub fn bullets_vs_asteroids(state: &mut GameState) {
    let mut consumed = vec![false; state.bullets.len()];
    let mut parents = Vec::new();

    for (i, bullet) in state.bullets.iter().enumerate() {
        let target = state
            .asteroids
            .iter_mut()
            .find(|a| !a.is_destroyed() && within(bullet.pos, a.pos, a.radius()));

        let Some(asteroid) = target else { continue };
        consumed[i] = true;

        let size_before = asteroid.size;
        asteroid.absorb_hit(bullet.damage);
        if asteroid.is_destroyed() {
            state.score += ASTEROID_SCORE;
            state.progression.asteroids_defeated += 1;
            if size_before > ASTEROID_SPLIT_SIZE {
                parents.push(asteroid.clone());
            }
        }
    }

    retain_unmarked(&mut state.bullets, &consumed);
    state.asteroids.retain(|a| !a.is_destroyed());

    for parent in parents {
        let ids = [state.next_entity_id(), state.next_entity_id()];
        let children = asteroid::split(&parent, ids, &mut state.rng);
        log::debug!(
            "Asteroid {} split into {} and {} (size {})",
            parent.id,
            ids[0],
            ids[1],
            children[0].size
        );
        state.asteroids.extend(children);
    }
}

/// Asteroids that touch the ship deal size-tiered damage and are removed
pub fn asteroids_vs_ship(state: &mut GameState) {
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let mut hits = Vec::new();

    state.asteroids.retain(|a| {
        if within(ship_pos, a.pos, a.radius() + ship_radius) {
            hits.push(impact_damage(a.size));
            false
        } else {
            true
        }
    });

    for damage in hits {
        state.damage_ship(damage);
    }
}

/// Enemy bullets that reach the ship
pub fn enemy_fire_vs_ship(state: &mut GameState) {
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let mut hits = Vec::new();

    state.enemy_bullets.retain(|b| {
        if within(ship_pos, b.pos, ship_radius) {
            hits.push(b.damage);
            false
        } else {
            true
        }
    });

    for damage in hits {
        state.damage_ship(damage);
    }
}

/// Enemy ships that crash into the ship are lost without a bounty
pub fn enemies_ram_ship(state: &mut GameState) {
    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let before = state.enemies.len();

    state
        .enemies
        .retain(|e| !within(ship_pos, e.pos, e.radius + ship_radius));

    for _ in state.enemies.len()..before {
        state.damage_ship(ENEMY_RAM_DAMAGE);
    }
}

/// Collect touched power-ups; the last one collected wins the slot
pub fn ship_vs_power_ups(state: &mut GameState, now: Duration) {
    let ship_pos = state.ship.pos;
    let reach = state.ship.radius + POWER_UP_PICKUP_RADIUS;
    let mut collected = Vec::new();

    state.power_ups.retain(|p| {
        if within(ship_pos, p.pos, reach) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        log::debug!("Picked up {}", kind);
        state.activate_power_up(kind, now);
        if kind == PowerUpKind::Nuke {
            detonate_nuke(state);
        }
    }
}

/// Destroy every asteroid and enemy ship on screen and hurt the boss
pub fn detonate_nuke(state: &mut GameState) {
    let asteroids = state.asteroids.len() as u32;
    state.asteroids.clear();
    state.score += ASTEROID_SCORE * asteroids as u64;
    state.progression.asteroids_defeated += asteroids;

    for enemy in &mut state.enemies {
        enemy.health = 0;
    }
    if let Some(boss) = state.boss.as_mut() {
        boss.health = boss.health.saturating_sub(BOSS_NUKE_DAMAGE);
    }
    reward_destroyed_ships(state);

    log::info!("Nuke cleared {} asteroids", asteroids);
}

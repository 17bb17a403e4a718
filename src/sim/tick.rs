//! Per-frame simulation step
//!
//! Core game loop that advances the simulation deterministically: the same
//! seed, inputs and clock readings always produce the same run.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{
    Boss, BossPattern, Bullet, EnemyShip, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind,
};
use crate::consts::*;

/// Held keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Primary fire
    pub fire: bool,
    /// Special weapon
    pub special: bool,
    /// Restart chord (only honored after the run has ended)
    pub restart: bool,
}

/// Advance the game by one frame. `now` is a monotonic clock reading.
pub fn tick(state: &mut GameState, input: &TickInput, now: Duration) {
    state.events.clear();

    if state.phase.is_terminal() {
        if input.restart {
            state.reset(now);
        }
        return;
    }

    state.time_ticks += 1;
    state.game_time = state.elapsed(now);

    if state.game_time >= VICTORY_TIME {
        finish_run(state, GamePhase::Victory);
        return;
    }

    move_ship(state, input);
    update_enemies(state, now);
    update_boss(state, now);
    fire(state, input, now);
    integrate_projectiles(state);
    integrate_asteroids(state);

    collision::resolve(state, now);
    if state.ship.is_destroyed() {
        finish_run(state, GamePhase::GameOver);
        return;
    }

    spawn(state, now);
    update_difficulty(state);
    expire_power_ups(state, now);
    update_progression(state);
}

/// Enter a terminal phase, keeping the best score
fn finish_run(state: &mut GameState, phase: GamePhase) {
    state.phase = phase;
    if state.record_high_score() {
        log::info!("New high score: {}", state.high_score);
    }
    match phase {
        GamePhase::GameOver => {
            log::info!("Game over - score {} after {:?}", state.score, state.game_time);
            state.emit(GameEvent::GameOver);
        }
        GamePhase::Victory => {
            log::info!("Victory! Final score {}", state.score);
            state.emit(GameEvent::Victory);
        }
        GamePhase::Playing => {}
    }
}

/// Each held direction moves the ship along its own axis and snaps the
/// facing; the last one checked decides where the nose points.
fn move_ship(state: &mut GameState, input: &TickInput) {
    let speed = state.ship_speed();
    let ship = &mut state.ship;

    if input.up {
        ship.move_by(Vec2::new(0.0, -speed));
        ship.angle = -FRAC_PI_2;
    }
    if input.down {
        ship.move_by(Vec2::new(0.0, speed));
        ship.angle = FRAC_PI_2;
    }
    if input.left {
        ship.move_by(Vec2::new(-speed, 0.0));
        ship.angle = PI;
    }
    if input.right {
        ship.move_by(Vec2::new(speed, 0.0));
        ship.angle = 0.0;
    }
}

/// Step `pos` toward `target` by `speed`. Returns the angle toward `target`.
fn home_in(pos: &mut Vec2, target: Vec2, speed: f32) -> f32 {
    let delta = target - *pos;
    let dist = delta.length();
    if dist > 0.0 {
        *pos += delta / dist * speed;
    }
    delta.y.atan2(delta.x)
}

/// Enemies chase the ship and fire on a cooldown
fn update_enemies(state: &mut GameState, now: Duration) {
    let ship_pos = state.ship.pos;
    let enemy_fire = state.tuning.enemy_fire;

    for enemy in &mut state.enemies {
        enemy.angle = home_in(&mut enemy.pos, ship_pos, enemy.speed);

        if enemy_fire && now.saturating_sub(enemy.last_shot) >= ENEMY_FIRE_COOLDOWN {
            state
                .enemy_bullets
                .push(Bullet::new(enemy.pos, enemy.angle, ENEMY_BULLET_DAMAGE));
            enemy.last_shot = now;
        }
    }
}

/// The boss shadows the ship along its hover line and cycles volleys
fn update_boss(state: &mut GameState, now: Duration) {
    let ship_pos = state.ship.pos;
    let enemy_fire = state.tuning.enemy_fire;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    home_in(&mut boss.pos, Vec2::new(ship_pos.x, BOSS_HOVER_Y), boss.speed);
    let to_ship = ship_pos - boss.pos;
    boss.angle = to_ship.y.atan2(to_ship.x);

    if !enemy_fire || now.saturating_sub(boss.last_shot) < BOSS_FIRE_COOLDOWN {
        return;
    }

    let aim = boss.angle;
    let angles: Vec<f32> = match boss.pattern {
        BossPattern::Aimed => vec![aim],
        BossPattern::Spread => vec![aim - BOSS_SPREAD_ANGLE, aim, aim + BOSS_SPREAD_ANGLE],
        BossPattern::Ring => (0..BOSS_RING_BULLETS)
            .map(|i| aim + i as f32 * TAU / BOSS_RING_BULLETS as f32)
            .collect(),
    };
    state.enemy_bullets.extend(
        angles
            .into_iter()
            .map(|angle| Bullet::new(boss.pos, angle, ENEMY_BULLET_DAMAGE)),
    );
    boss.pattern = boss.pattern.next();
    boss.last_shot = now;
}

/// Primary fire has no cooldown: one bullet per tick while held
fn fire(state: &mut GameState, input: &TickInput, now: Duration) {
    if input.fire {
        let damage = state.bullet_damage();
        state
            .bullets
            .push(Bullet::new(state.ship.pos, state.ship.angle, damage));
        state.ship.last_shot = Some(now);
        state.emit(GameEvent::ShotFired);
    }

    if input.special {
        let infinite = state.has_power_up(PowerUpKind::InfiniteAmmo);
        let weapon = &mut state.progression.special_weapon;
        if !infinite && weapon.ammo == 0 {
            return;
        }
        if !infinite {
            weapon.ammo -= 1;
        }
        let missile = Bullet::new(state.ship.pos, state.ship.angle, weapon.damage);
        state.bullets.push(missile);
        state.emit(GameEvent::MissileFired);
    }
}

/// Move every bullet and drop the ones that left the canvas
fn integrate_projectiles(state: &mut GameState) {
    for bullet in state.bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        bullet.advance();
    }
    state.bullets.retain(|b| crate::in_canvas(b.pos, 0.0));
    state.enemy_bullets.retain(|b| crate::in_canvas(b.pos, 0.0));
}

fn integrate_asteroids(state: &mut GameState) {
    for asteroid in &mut state.asteroids {
        asteroid.advance();
    }
    state
        .asteroids
        .retain(|a| crate::in_canvas(a.pos, ASTEROID_CULL_MARGIN));
}

fn spawn(state: &mut GameState, now: Duration) {
    if state.asteroids.len() < state.tuning.max_asteroids {
        state.spawn_asteroid();
    }

    state.power_ups.retain(|p| p.expires_at >= now);
    if now.saturating_sub(state.last_power_up_spawn) >= state.tuning.power_up_interval {
        spawn_power_up(state, now);
        state.last_power_up_spawn = now;
    }

    if state.enemies.len() < state.tuning.max_enemies
        && state.rng.random::<f64>() < state.tuning.enemy_spawn_chance
    {
        spawn_enemy(state, now);
    }

    if state.tuning.boss_enabled && state.boss.is_none() && in_boss_window(state.game_time) {
        spawn_boss(state, now);
    }
}

/// Boss spawns are accepted during the first second of every fifth minute
pub fn in_boss_window(game_time: Duration) -> bool {
    let minutes = game_time.as_secs() / 60;
    minutes % BOSS_INTERVAL_MINUTES == 0
        && game_time.as_secs_f32() % 60.0 < BOSS_SPAWN_WINDOW_SECS
}

fn spawn_power_up(state: &mut GameState, now: Duration) {
    if state.tuning.power_up_kinds.is_empty() {
        return;
    }
    let index = state.rng.random_range(0..state.tuning.power_up_kinds.len());
    let kind = state.tuning.power_up_kinds[index];
    let pos = Vec2::new(
        state.rng.random_range(0..CANVAS_WIDTH as u32) as f32,
        state.rng.random_range(0..CANVAS_HEIGHT as u32) as f32,
    );
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        pos,
        kind,
        expires_at: now + POWER_UP_DURATION,
    });
    log::debug!("Spawned {} power-up at {:?}", kind, pos);
}

fn spawn_enemy(state: &mut GameState, now: Duration) {
    let x = state.rng.random_range(0..CANVAS_WIDTH as u32) as f32;
    let id = state.next_entity_id();
    state.enemies.push(EnemyShip {
        id,
        pos: Vec2::new(x, -ENEMY_RADIUS),
        angle: FRAC_PI_2,
        radius: ENEMY_RADIUS,
        health: ENEMY_HEALTH,
        speed: state.enemy_speed,
        last_shot: now,
    });
    log::debug!("Enemy {} inbound at x={}", id, x);
}

fn spawn_boss(state: &mut GameState, now: Duration) {
    state.boss = Some(Boss {
        pos: Vec2::new(CANVAS_WIDTH / 2.0, -BOSS_RADIUS),
        angle: FRAC_PI_2,
        radius: BOSS_RADIUS,
        health: BOSS_HEALTH,
        speed: state.enemy_speed * 0.5,
        last_shot: now,
        pattern: BossPattern::default(),
    });
    state.emit(GameEvent::BossSpawned);
    log::info!("Boss incoming at {:?}", state.game_time);
}

/// Spawn interval decays every tick with no floor; speeds grow per minute
fn update_difficulty(state: &mut GameState) {
    state.asteroid_spawn_rate *= ASTEROID_SPAWN_DECAY;
    let minutes = state.game_time.as_secs_f32() / 60.0;
    state.asteroid_speed = 1.0 + minutes * ASTEROID_SPEED_PER_MINUTE;
    state.enemy_speed = ENEMY_BASE_SPEED + minutes * ENEMY_SPEED_PER_MINUTE;
}

fn expire_power_ups(state: &mut GameState, now: Duration) {
    if state.active_power_up != PowerUpKind::None && now > state.power_up_end {
        log::debug!("{} wore off", state.active_power_up);
        state.active_power_up = PowerUpKind::None;
    }
    if state
        .power_up_message
        .as_ref()
        .is_some_and(|m| now >= m.shown_at + POWER_UP_MESSAGE_DURATION)
    {
        state.power_up_message = None;
    }
}

fn update_progression(state: &mut GameState) {
    if !state.tuning.progression {
        return;
    }
    if let Some(level) = state.progression.check_level_up(state.score) {
        log::info!("Level {} reached", level);
        state.emit(GameEvent::LevelUp(level));
    }
    for kind in state.progression.check_achievements() {
        log::info!("Achievement unlocked: {}", kind.name());
        state.emit(GameEvent::AchievementUnlocked(kind));
    }
}

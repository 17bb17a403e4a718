//! Asteroid geometry and lifecycle
//!
//! Asteroids are regular polygons whose radius is their `size`. They shrink
//! when shot and split in two when a large one is destroyed.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Polygon vertex offsets from `pos`; the count never changes
    pub vertices: Vec<Vec2>,
    pub size: f32,
    /// Travel direction (radians)
    pub angle: f32,
    pub speed: f32,
    pub health: i32,
}

impl Asteroid {
    /// Collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Advance one tick along the travel direction
    pub fn advance(&mut self) {
        self.pos += crate::heading(self.angle) * self.speed;
    }

    /// Take a bullet hit: shrink, lose health, and die outright once too small
    pub fn absorb_hit(&mut self, damage: u32) {
        self.size -= ASTEROID_HIT_SHRINK;
        self.health -= damage as i32;
        if self.size < ASTEROID_DESTROY_SIZE {
            self.health = 0;
        }
        self.vertices = polygon(self.vertices.len(), self.size.max(0.0));
    }

    /// World-space outline for drawing
    pub fn outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().map(move |v| self.pos + *v)
    }
}

/// Regular polygon with `count` vertices at distance `size` from the centre
pub fn polygon(count: usize, size: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * (TAU / count as f32);
            Vec2::new(size * angle.cos(), size * angle.sin())
        })
        .collect()
}

/// Ship damage for an asteroid of the given size
pub fn impact_damage(size: f32) -> u32 {
    if size < SMALL_ASTEROID_LIMIT {
        SMALL_ASTEROID_DAMAGE
    } else if size < MEDIUM_ASTEROID_LIMIT {
        MEDIUM_ASTEROID_DAMAGE
    } else {
        LARGE_ASTEROID_DAMAGE
    }
}

/// Random asteroid entering from just above the canvas
pub fn generate(id: u32, speed_scale: f32, rng: &mut impl Rng) -> Asteroid {
    let size = rng.random_range(ASTEROID_MIN_SIZE..ASTEROID_MAX_SIZE) as f32;
    let count = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
    let x = rng.random_range(0..CANVAS_WIDTH as u32) as f32;
    let angle = rng.random::<f32>() * TAU;
    let speed = rng.random_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED) as f32 * speed_scale;

    Asteroid {
        id,
        pos: Vec2::new(x, -ASTEROID_CULL_MARGIN),
        vertices: polygon(count, size),
        size,
        angle,
        speed,
        health: size.floor() as i32,
    }
}

/// Break `parent` into two half-size fragments that fly off faster
pub fn split(parent: &Asteroid, ids: [u32; 2], rng: &mut impl Rng) -> [Asteroid; 2] {
    let size = parent.size / 2.0;
    ids.map(|id| Asteroid {
        id,
        pos: parent.pos,
        vertices: polygon(parent.vertices.len(), size),
        size,
        angle: rng.random::<f32>() * TAU,
        speed: parent.speed * SPLIT_SPEED_FACTOR,
        health: size.floor() as i32,
    })
}

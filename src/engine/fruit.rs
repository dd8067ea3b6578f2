//! Fruit spawning and flight
//!
//! The slicing phase's entity set: a spawner on a fixed cadence and ballistic
//! motion under gravity. Positions live in a normalized 0-100 percent space
//! with y growing downward, so launch velocities are negative-y. Hit testing
//! is the host's job; it reports the entity the blade touched and
//! [`FruitField::slice`] takes it from there.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Glyphs a fruit can wear (each a single scalar, so `char` works)
pub const FRUIT_GLYPHS: [char; 6] = ['🍉', '🍊', '🍎', '🍌', '🥥', '🍍'];
pub const BOMB_GLYPH: char = '💣';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitKind {
    Fruit,
    Bomb,
}

/// A sliceable entity in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub id: u32,
    /// Playfield position, percent units
    pub pos: Vec2,
    /// Percent units per second
    pub vel: Vec2,
    pub kind: FruitKind,
    pub glyph: char,
    pub sliced: bool,
    /// Seconds of despawn animation left once sliced
    pub despawn_secs: f32,
}

/// The set of fruit currently in flight, plus the spawner feeding it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FruitField {
    pub in_flight: Vec<Fruit>,
    /// Seconds accumulated toward the next spawn
    spawn_clock: f32,
    next_id: u32,
}

impl Default for FruitField {
    fn default() -> Self {
        Self::new()
    }
}

impl FruitField {
    pub fn new() -> Self {
        Self {
            in_flight: Vec::new(),
            spawn_clock: 0.0,
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Arm the spawner so the next frame launches a fruit immediately
    pub fn prime_spawner(&mut self) {
        self.spawn_clock = SPAWN_INTERVAL_SECS;
    }

    /// Advance flight physics and the spawn clock by `dt` seconds
    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) {
        self.spawn_clock += dt;
        while self.spawn_clock >= SPAWN_INTERVAL_SECS {
            self.spawn_clock -= SPAWN_INTERVAL_SECS;
            self.spawn(rng);
        }

        for fruit in &mut self.in_flight {
            if fruit.sliced {
                // Sliced fruit hangs in place while its animation plays out
                fruit.despawn_secs -= dt;
            } else {
                fruit.pos += fruit.vel * dt;
                fruit.vel.y += GRAVITY * dt;
            }
        }

        // Missed fruit falls off screen with no penalty
        self.in_flight.retain(|f| {
            if f.sliced {
                f.despawn_secs > 0.0
            } else {
                f.pos.y < FIELD_CULL_Y
            }
        });
    }

    fn spawn(&mut self, rng: &mut impl Rng) {
        let is_bomb = rng.random_bool(BOMB_PROBABILITY);
        let id = self.next_entity_id();
        self.in_flight.push(Fruit {
            id,
            pos: Vec2::new(rng.random_range(SPAWN_X_MIN..=SPAWN_X_MAX), SPAWN_Y),
            vel: Vec2::new(
                rng.random_range(-SPAWN_VX_MAX..=SPAWN_VX_MAX),
                rng.random_range(SPAWN_VY_MIN..=SPAWN_VY_MAX),
            ),
            kind: if is_bomb { FruitKind::Bomb } else { FruitKind::Fruit },
            glyph: if is_bomb {
                BOMB_GLYPH
            } else {
                FRUIT_GLYPHS.choose(rng).copied().unwrap_or(FRUIT_GLYPHS[0])
            },
            sliced: false,
            despawn_secs: FRUIT_DESPAWN_SECS,
        });
    }

    /// Mark entity `id` sliced.
    ///
    /// Returns the kind only on the call that actually sliced it; repeat
    /// slices and unknown ids return None so nothing scores twice.
    pub fn slice(&mut self, id: u32) -> Option<FruitKind> {
        let fruit = self.in_flight.iter_mut().find(|f| f.id == id)?;
        if fruit.sliced {
            return None;
        }
        fruit.sliced = true;
        Some(fruit.kind)
    }

    pub fn clear(&mut self) {
        self.in_flight.clear();
    }

    /// Fruit still live for slicing
    pub fn active_count(&self) -> usize {
        self.in_flight.iter().filter(|f| !f.sliced).count()
    }
}

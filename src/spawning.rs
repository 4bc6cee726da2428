//! Data-driven enemy spawning.
//!
//! Enemy archetypes come from the balance dataset; this module turns one
//! into a hecs entity and picks where new enemies appear.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::balance::EnemyDef;
use crate::components::{
    AttackCooldown, EnemyAI, EnemyId, EnemyKind, Health, Position, Velocity,
};
use crate::constants::SPAWN_PLACEMENT_ATTEMPTS;

impl EnemyDef {
    /// Spawn this enemy type at the given position
    pub fn spawn(&self, world: &mut World, id: EnemyId, type_tag: &str, position: Vec2) -> Entity {
        world.spawn((
            id,
            EnemyKind {
                type_tag: type_tag.to_string(),
                name: self.name.clone(),
                level: self.level,
            },
            Position(position),
            Velocity::default(),
            Health::new(self.stats.hp),
            self.stats,
            AttackCooldown::new(self.attack_interval),
            EnemyAI::new(self.aggro_range, self.attack_range),
        ))
    }
}

/// Point at `distance` from `center` along `angle` (radians).
pub fn ring_point(center: Vec2, angle: f32, distance: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * distance
}

/// Random point in the annulus `[min_distance, max_distance)` around
/// `center` that also lies inside the world inset by `margin`.
///
/// Rolls are retried a bounded number of times. Near a corner most of the
/// ring falls outside the world; if every roll misses, the point is placed
/// `min_distance` out toward the farthest inset corner (or on that corner
/// when the world is too small). `center` must itself be inside the inset.
pub fn random_spawn_position(
    center: Vec2,
    min_distance: f32,
    max_distance: f32,
    world_size: Vec2,
    margin: f32,
    rng: &mut impl Rng,
) -> Vec2 {
    let lo = Vec2::splat(margin);
    let hi = (world_size - Vec2::splat(margin)).max(lo);
    let inside = |p: Vec2| p.cmpge(lo).all() && p.cmple(hi).all();

    for _ in 0..SPAWN_PLACEMENT_ATTEMPTS {
        let angle = rng.gen_range(0.0..TAU);
        let distance = if max_distance > min_distance {
            rng.gen_range(min_distance..max_distance)
        } else {
            min_distance
        };
        let point = ring_point(center, angle, distance);
        if inside(point) {
            return point;
        }
    }

    let corner = Vec2::new(
        if center.x - lo.x > hi.x - center.x { lo.x } else { hi.x },
        if center.y - lo.y > hi.y - center.y { lo.y } else { hi.y },
    );
    let reach = corner - center;
    let point = if reach.length() <= min_distance {
        corner
    } else {
        center + reach.normalize_or_zero() * min_distance
    };
    point.clamp(lo, hi)
}

/// `count` points evenly spaced by angle around `center`, each at a random
/// distance in `[min_distance, max_distance)`.
pub fn initial_ring_positions(
    center: Vec2,
    count: usize,
    min_distance: f32,
    max_distance: f32,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            let distance = if max_distance > min_distance {
                rng.gen_range(min_distance..max_distance)
            } else {
                min_distance
            };
            ring_point(center, angle, distance)
        })
        .collect()
}

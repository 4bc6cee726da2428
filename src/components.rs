use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_AGGRO_RANGE, DEFAULT_ATTACK_RANGE, ENEMY_ATTACK_INTERVAL};

/// Character attributes shared by classes, enemies, and items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub hp: u32,
    pub mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub speed: u32,
    pub luck: u32,
}

impl StatBlock {
    /// `base + growth * (level - 1)` for every stat. Level 0 is treated as 1.
    pub fn grown(base: &StatBlock, growth: &StatBlock, level: u32) -> Self {
        let steps = level.saturating_sub(1);
        let grow = |b: u32, g: u32| b.saturating_add(g.saturating_mul(steps));
        Self {
            hp: grow(base.hp, growth.hp),
            mp: grow(base.mp, growth.mp),
            attack: grow(base.attack, growth.attack),
            defense: grow(base.defense, growth.defense),
            magic: grow(base.magic, growth.magic),
            speed: grow(base.speed, growth.speed),
            luck: grow(base.luck, growth.luck),
        }
    }
}

/// Stable enemy identifier, assigned in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u64);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of enemy this is
#[derive(Debug, Clone)]
pub struct EnemyKind {
    /// Key into the balance dataset's enemy table
    pub type_tag: String,
    pub name: String,
    pub level: u32,
}

/// Position component - world coordinates in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Velocity component - pixels per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Health component
///
/// `current` is signed: a killing blow may leave it negative until the
/// defeat check removes the entity.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = i32::try_from(max).unwrap_or(i32::MAX);
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

/// Countdown gating repeated attacks
#[derive(Debug, Clone, Copy)]
pub struct AttackCooldown {
    /// Seconds until the next attack is allowed; never negative
    pub remaining: f32,
    /// Value `remaining` is reset to after an attack
    pub interval: f32,
}

impl AttackCooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            remaining: 0.0,
            interval,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self) {
        self.remaining = self.interval;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// AI behavior states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AIState {
    /// Drifting in a random direction, re-rolled every wander interval
    #[default]
    Wander,
    /// Closing in on the player
    Chasing,
    /// Standing still and striking whenever the cooldown allows
    Attacking,
}

impl AIState {
    pub fn name(&self) -> &'static str {
        match self {
            AIState::Wander => "wander",
            AIState::Chasing => "chasing",
            AIState::Attacking => "attacking",
        }
    }
}

/// Enemy AI component
#[derive(Debug, Clone, Copy)]
pub struct EnemyAI {
    pub state: AIState,
    pub aggro_range: f32,
    pub attack_range: f32,
    /// Clock time of the last wander heading change; `None` until the first one
    pub last_action_time: Option<f32>,
}

impl EnemyAI {
    pub fn new(aggro_range: f32, attack_range: f32) -> Self {
        Self {
            state: AIState::Wander,
            aggro_range,
            attack_range,
            last_action_time: None,
        }
    }
}

impl Default for EnemyAI {
    fn default() -> Self {
        Self::new(DEFAULT_AGGRO_RANGE, DEFAULT_ATTACK_RANGE)
    }
}

impl Default for AttackCooldown {
    fn default() -> Self {
        Self::new(ENEMY_ATTACK_INTERVAL)
    }
}

/// Whether a character is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
}

/// Facing direction derived from the dominant movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Dominant-axis facing for a movement vector (screen coordinates, +y is down).
    /// Returns `None` for a zero vector.
    pub fn from_movement(dir: Vec2) -> Option<Self> {
        if dir == Vec2::ZERO {
            return None;
        }
        if dir.x.abs() > dir.y.abs() {
            Some(if dir.x > 0.0 { Facing::Right } else { Facing::Left })
        } else {
            Some(if dir.y > 0.0 { Facing::Down } else { Facing::Up })
        }
    }
}

/// Animation sub-state for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Animation {
    pub state: AnimationState,
    pub facing: Facing,
}

//! The player character and its persisted snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::balance::BalanceData;
use crate::components::{Animation, AttackCooldown, StatBlock};
use crate::constants::*;
use crate::error::GameResult;

/// Plain `{x, y}` pair as stored by persistence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedPosition {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for SavedPosition {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<SavedPosition> for Vec2 {
    fn from(p: SavedPosition) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Serializable copy of player state exchanged with persistence.
///
/// Inventory and equipment are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub name: String,
    pub class: String,
    pub level: u32,
    pub experience: u64,
    pub stats: StatBlock,
    #[serde(default)]
    pub current_hp: i32,
    #[serde(default)]
    pub current_mp: i32,
    pub position: SavedPosition,
    #[serde(default)]
    pub inventory: Vec<Value>,
    #[serde(default)]
    pub equipment: Map<String, Value>,
    #[serde(default = "default_gold")]
    pub gold: u64,
}

fn default_gold() -> u64 {
    STARTING_GOLD
}

impl PlayerSnapshot {
    /// A fresh level-1 character at the respawn point with full HP/MP.
    pub fn new_character(name: &str, class_tag: &str, data: &BalanceData) -> GameResult<Self> {
        let stats = data.stats_at_level(class_tag, 1)?;
        Ok(Self {
            name: name.to_string(),
            class: class_tag.to_string(),
            level: 1,
            experience: 0,
            stats,
            current_hp: stats.hp as i32,
            current_mp: stats.mp as i32,
            position: SavedPosition {
                x: RESPAWN_X,
                y: RESPAWN_Y,
            },
            inventory: Vec::new(),
            equipment: Map::new(),
            gold: STARTING_GOLD,
        })
    }
}

/// The player character, owned by the simulation for a session
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub class_tag: String,
    pub level: u32,
    /// Total experience; only ever increases
    pub experience: u64,
    pub stats: StatBlock,
    pub current_hp: i32,
    pub current_mp: i32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Movement speed in pixels per second
    pub speed: f32,
    pub attack_cooldown: AttackCooldown,
    pub animation: Animation,
    pub inventory: Vec<Value>,
    pub equipment: Map<String, Value>,
    pub gold: u64,
}

impl Player {
    /// Rebuild a player from a persisted snapshot.
    ///
    /// A stored HP/MP of zero or less means "not recorded" and restores to
    /// full; values above the stat maximum are clamped down.
    pub fn from_snapshot(snapshot: PlayerSnapshot, data: &BalanceData) -> GameResult<Self> {
        let class = data.class(&snapshot.class)?;
        let attack_interval = class.attack_interval;
        let stats = snapshot.stats;

        let restore = |current: i32, max: u32| {
            let max = max as i32;
            if current <= 0 {
                max
            } else {
                current.min(max)
            }
        };

        Ok(Self {
            current_hp: restore(snapshot.current_hp, stats.hp),
            current_mp: restore(snapshot.current_mp, stats.mp),
            name: snapshot.name,
            class_tag: snapshot.class,
            level: snapshot.level.max(1),
            experience: snapshot.experience,
            stats,
            position: snapshot.position.into(),
            velocity: Vec2::ZERO,
            speed: PLAYER_SPEED,
            attack_cooldown: AttackCooldown::new(attack_interval),
            animation: Animation::default(),
            inventory: snapshot.inventory,
            equipment: snapshot.equipment,
            gold: snapshot.gold,
        })
    }

    pub fn to_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            class: self.class_tag.clone(),
            level: self.level,
            experience: self.experience,
            stats: self.stats,
            current_hp: self.current_hp,
            current_mp: self.current_mp,
            position: self.position.into(),
            inventory: self.inventory.clone(),
            equipment: self.equipment.clone(),
            gold: self.gold,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn restore_full(&mut self) {
        self.current_hp = self.stats.hp as i32;
        self.current_mp = self.stats.mp as i32;
    }

    /// Put the player back on its feet at `spawn_point` with half HP.
    pub fn respawn(&mut self, spawn_point: Vec2) {
        self.current_hp = (self.stats.hp / 2) as i32;
        self.position = spawn_point;
        self.velocity = Vec2::ZERO;
    }
}

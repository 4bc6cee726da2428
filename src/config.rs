//! Runtime simulation settings.
//!
//! Every field defaults to the matching value in [`crate::constants`], so a
//! config file only needs the keys it wants to change.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub camera_smoothing: f32,
    pub enemy_spawn_interval: f32,
    pub max_live_enemies: usize,
    pub autosave_interval: f32,
    pub initial_enemy_count: usize,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
    pub max_tick_seconds: f32,
    pub respawn_x: f32,
    pub respawn_y: f32,
    /// Seed for the simulation RNG; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            camera_smoothing: CAMERA_SMOOTHING,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            max_live_enemies: MAX_LIVE_ENEMIES,
            autosave_interval: AUTOSAVE_INTERVAL,
            initial_enemy_count: INITIAL_ENEMY_COUNT,
            spawn_min_distance: SPAWN_MIN_DISTANCE,
            spawn_max_distance: SPAWN_MAX_DISTANCE,
            max_tick_seconds: MAX_TICK_SECONDS,
            respawn_x: RESPAWN_X,
            respawn_y: RESPAWN_Y,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> GameResult<Self> {
        serde_json::from_str(json).map_err(|source| GameError::Parse {
            what: "simulation config",
            source,
        })
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    pub fn respawn_point(&self) -> Vec2 {
        Vec2::new(self.respawn_x, self.respawn_y)
    }
}

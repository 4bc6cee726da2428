//! Time system constants.

/// Seconds between periodic enemy spawn attempts
pub const ENEMY_SPAWN_INTERVAL: f32 = 10.0;
/// Seconds between autosave requests
pub const AUTOSAVE_INTERVAL: f32 = 30.0;
/// Longest tick the simulation will integrate in one step
pub const MAX_TICK_SECONDS: f32 = 0.25;

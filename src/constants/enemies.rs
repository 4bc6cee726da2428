//! Enemy AI and spawning constants.

/// Archetype used when a requested enemy type is unknown
pub const DEFAULT_ENEMY_TYPE: &str = "greenSlime";
/// Aggro range when the archetype does not specify one
pub const DEFAULT_AGGRO_RANGE: f32 = 100.0;
/// Attack range when the archetype does not specify one
pub const DEFAULT_ATTACK_RANGE: f32 = 32.0;
/// Chasing enemies give up past this multiple of their aggro range
pub const LOST_TARGET_FACTOR: f32 = 1.5;
/// Seconds between wander heading changes
pub const WANDER_INTERVAL: f32 = 2.0;
/// Wandering speed (pixels per second)
pub const WANDER_SPEED: f32 = 30.0;
/// Chasing speed (pixels per second)
pub const CHASE_SPEED: f32 = 50.0;
/// Half of an enemy sprite's width, also its click radius
pub const ENEMY_HALF_EXTENT: f32 = 14.0;

/// Maximum live enemies before periodic spawning pauses
pub const MAX_LIVE_ENEMIES: usize = 15;
/// Enemies placed around the player when a session starts
pub const INITIAL_ENEMY_COUNT: usize = 8;
/// Initial population ring, inner radius
pub const INITIAL_SPAWN_MIN_DISTANCE: f32 = 200.0;
/// Initial population ring, outer radius
pub const INITIAL_SPAWN_MAX_DISTANCE: f32 = 500.0;
/// Periodic spawn ring, inner radius
pub const SPAWN_MIN_DISTANCE: f32 = 300.0;
/// Periodic spawn ring, outer radius
pub const SPAWN_MAX_DISTANCE: f32 = 500.0;
/// Angle rolls before a periodic spawn gives up on the ring and falls back
/// toward the far corner of the world
pub const SPAWN_PLACEMENT_ATTEMPTS: usize = 32;
/// Levels below the player an eligible spawn may be
pub const SPAWN_LEVEL_BELOW: u32 = 2;
/// Levels above the player an eligible spawn may be
pub const SPAWN_LEVEL_ABOVE: u32 = 3;

//! Core gameplay constants (player movement, respawn, progression).

/// Player movement speed (pixels per second)
pub const PLAYER_SPEED: f32 = 120.0;
/// Half of the player sprite's width; keeps the sprite inside the border
pub const PLAYER_HALF_EXTENT: f32 = 16.0;
/// Where the player reappears after being defeated
pub const RESPAWN_X: f32 = 400.0;
pub const RESPAWN_Y: f32 = 300.0;
/// Gold a freshly created character starts with
pub const STARTING_GOLD: u64 = 100;

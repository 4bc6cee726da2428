//! Combat system constants.

/// Damage variance for enemy attacks (0.3 = ±30%)
pub const ENEMY_DAMAGE_VARIANCE: f32 = 0.3;
/// Damage variance for player attacks (0.2 = ±20%)
pub const PLAYER_DAMAGE_VARIANCE: f32 = 0.2;
/// Seconds between player attacks when the class does not say otherwise
pub const PLAYER_ATTACK_INTERVAL: f32 = 1.0;
/// Seconds between enemy attacks when the archetype does not say otherwise
pub const ENEMY_ATTACK_INTERVAL: f32 = 1.5;
/// Radius around the player searched for an attack target
pub const PLAYER_ATTACK_RADIUS: f32 = 60.0;
/// Experience granted per level of a defeated enemy
pub const EXP_PER_ENEMY_LEVEL: u64 = 10;

//! World dimensions.

/// World width in pixels
pub const WORLD_WIDTH: f32 = 1600.0;
/// World height in pixels
pub const WORLD_HEIGHT: f32 = 1200.0;

//! Camera-related constants.

/// Fraction of the remaining distance the camera covers each tick
pub const CAMERA_SMOOTHING: f32 = 0.1;
/// Default viewport width in pixels
pub const VIEWPORT_WIDTH: f32 = 800.0;
/// Default viewport height in pixels
pub const VIEWPORT_HEIGHT: f32 = 600.0;

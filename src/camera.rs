use crate::constants::*;
use glam::Vec2;

/// Follow camera. It never owns or mutates what it tracks; the simulation
/// hands it the player's position each tick.
pub struct Camera {
    /// World position of the viewport's top-left corner
    pub offset: Vec2,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fraction of the remaining distance covered per update, in (0, 1]
    smoothing: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32, smoothing: f32) -> Self {
        let smoothing = if smoothing.is_finite() && smoothing > 0.0 {
            smoothing.min(1.0)
        } else {
            CAMERA_SMOOTHING
        };
        Self {
            offset: Vec2::ZERO,
            viewport_width,
            viewport_height,
            smoothing,
        }
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) * 0.5
    }

    /// Jump straight to the target without smoothing.
    pub fn snap_to(&mut self, target: Vec2, world_size: Vec2) {
        self.offset = self.clamp_to_world(target - self.half_extent(), world_size);
    }

    /// Move a fixed fraction of the way toward centering `target`, then clamp
    /// so the viewport stays inside the world.
    pub fn update(&mut self, target: Vec2, world_size: Vec2) {
        let desired = target - self.half_extent();
        self.offset += (desired - self.offset) * self.smoothing;
        self.offset = self.clamp_to_world(self.offset, world_size);
    }

    /// Clamp range collapses to 0 on any axis where the world is smaller
    /// than the viewport.
    fn clamp_to_world(&self, offset: Vec2, world_size: Vec2) -> Vec2 {
        let max_x = (world_size.x - self.viewport_width).max(0.0);
        let max_y = (world_size.y - self.viewport_height).max(0.0);
        Vec2::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y))
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// World-space rectangle currently in view as (min, max)
    pub fn visible_bounds(&self) -> (Vec2, Vec2) {
        (
            self.offset,
            self.offset + Vec2::new(self.viewport_width, self.viewport_height),
        )
    }
}

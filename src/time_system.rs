//! Frame-driven time: the simulation clock, periodic timers, and tick
//! validation.
//!
//! Time only advances by the elapsed seconds handed to the simulation;
//! nothing here reads the wall clock.

use crate::error::{GameError, GameResult};

// =============================================================================
// GAME CLOCK
// =============================================================================

/// Simulation time clock (in seconds)
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    /// Seconds of simulation time since the session started
    pub time: f32,
}

impl GameClock {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "Cannot go backwards in time: {}", dt);
        self.time += dt;
    }
}

// =============================================================================
// PERIODIC TIMERS
// =============================================================================

/// Accumulates elapsed time until an interval is reached
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    elapsed: f32,
    interval: f32,
}

impl PeriodicTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// The timer keeps accumulating past its interval until reset, so a
    /// blocked trigger fires as soon as it is allowed.
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.interval
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// The two periodic timers driven by the simulation step
#[derive(Debug, Clone)]
pub struct SimTimers {
    pub enemy_spawn: PeriodicTimer,
    pub autosave: PeriodicTimer,
}

impl SimTimers {
    pub fn new(enemy_spawn_interval: f32, autosave_interval: f32) -> Self {
        Self {
            enemy_spawn: PeriodicTimer::new(enemy_spawn_interval),
            autosave: PeriodicTimer::new(autosave_interval),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.enemy_spawn.tick(dt);
        self.autosave.tick(dt);
    }
}

// =============================================================================
// TICK VALIDATION
// =============================================================================

/// Reject negative or non-finite elapsed time; clamp long frames to `max_dt`.
///
/// A negative `max_dt` is treated as zero so the clock never runs backwards.
pub fn validate_tick(dt: f32, max_dt: f32) -> GameResult<f32> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(GameError::InvalidTick(dt));
    }
    Ok(dt.min(max_dt.max(0.0)))
}

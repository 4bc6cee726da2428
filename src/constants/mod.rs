//! Tuning constants, one submodule per domain.
//!
//! These are the compiled-in defaults. Anything a session may want to change
//! at runtime is mirrored in [`crate::config::SimConfig`].

mod camera;
mod combat;
mod enemies;
mod gameplay;
mod time;
mod world;

pub use camera::*;
pub use combat::*;
pub use enemies::*;
pub use gameplay::*;
pub use time::*;
pub use world::*;

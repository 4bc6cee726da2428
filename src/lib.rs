//! Drakoria: the simulation core of a 2D top-down action RPG.
//!
//! The host (renderer, input capture, persistence) drives a [`Simulation`]
//! one frame at a time and reacts to the [`GameEvent`]s it emits.

pub mod balance;
pub mod camera;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod input;
pub mod player;
pub mod spawning;
pub mod systems;
pub mod time_system;
pub mod world;

pub use balance::BalanceData;
pub use config::SimConfig;
pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use game_loop::Simulation;
pub use input::InputSnapshot;
pub use player::{Player, PlayerSnapshot};

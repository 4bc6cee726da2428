//! Game systems organized by domain.
//!
//! - `ai`: enemy state machine and per-tick decisions
//! - `combat`: damage resolution, targeting, and defeat handling
//! - `experience`: experience gain and leveling
//! - `movement`: velocity integration, bounds, and cooldown countdown

pub mod ai;
pub mod combat;
pub mod experience;
pub mod movement;

// Re-export commonly used items
pub use ai::{decide, update_enemies, AiAction};
pub use combat::{
    handle_player_defeat, player_attack, remove_dead_enemies, resolve_attack, AttackOutcome,
    Fighter, PlayerAttackResult,
};
pub use experience::{experience_progress, grant_experience};
pub use movement::{integrate_enemies, move_player};

//! Experience and leveling system.

use log::{info, warn};

use crate::balance::BalanceData;
use crate::events::{EventQueue, GameEvent};
use crate::player::Player;

/// Progress toward the player's next level (0.0 to 1.0)
pub fn experience_progress(player: &Player, data: &BalanceData) -> f32 {
    data.experience_progress(player.experience, player.level)
}

/// Add experience, handling level ups.
///
/// The level jumps straight to whatever the new total supports, so a large
/// reward can skip several levels at once. A level up recomputes stats for
/// the new level and refills HP/MP. Returns the new level when one was
/// gained.
pub fn grant_experience(
    player: &mut Player,
    amount: u64,
    data: &BalanceData,
    events: &mut EventQueue,
) -> Option<u32> {
    player.experience = player.experience.saturating_add(amount);

    let reached = data.level_for_experience(player.experience);
    if reached <= player.level {
        return None;
    }

    let stats = match data.stats_at_level(&player.class_tag, reached) {
        Ok(stats) => stats,
        Err(e) => {
            warn!("level up to {} skipped: {}", reached, e);
            return None;
        }
    };

    player.level = reached;
    player.stats = stats;
    player.restore_full();
    info!("{} reached level {}", player.name, reached);
    events.push(GameEvent::PlayerLeveledUp { new_level: reached });
    Some(reached)
}

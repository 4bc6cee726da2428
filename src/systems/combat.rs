//! Combat system functions.

use glam::Vec2;
use hecs::Entity;
use log::{debug, info};
use rand::Rng;

use crate::balance::{self, BalanceData};
use crate::components::{AttackCooldown, EnemyId, EnemyKind, Health, Position, StatBlock};
use crate::constants::*;
use crate::events::{Combatant, EventQueue, GameEvent};
use crate::input::InputSnapshot;
use crate::player::Player;
use crate::systems::experience::grant_experience;
use crate::world::GameWorld;

/// Anything that can trade blows
pub trait Fighter {
    fn attack_power(&self) -> u32;
    fn defense_power(&self) -> u32;
    fn hp_mut(&mut self) -> &mut i32;
    fn cooldown_mut(&mut self) -> &mut AttackCooldown;
}

impl Fighter for Player {
    fn attack_power(&self) -> u32 {
        self.stats.attack
    }

    fn defense_power(&self) -> u32 {
        self.stats.defense
    }

    fn hp_mut(&mut self) -> &mut i32 {
        &mut self.current_hp
    }

    fn cooldown_mut(&mut self) -> &mut AttackCooldown {
        &mut self.attack_cooldown
    }
}

/// Borrowed combat components of one enemy entity
pub struct EnemyFighter<'a> {
    pub stats: &'a StatBlock,
    pub health: &'a mut Health,
    pub cooldown: &'a mut AttackCooldown,
}

impl Fighter for EnemyFighter<'_> {
    fn attack_power(&self) -> u32 {
        self.stats.attack
    }

    fn defense_power(&self) -> u32 {
        self.stats.defense
    }

    fn hp_mut(&mut self) -> &mut i32 {
        &mut self.health.current
    }

    fn cooldown_mut(&mut self) -> &mut AttackCooldown {
        self.cooldown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage_dealt: u32,
    pub defender_defeated: bool,
}

/// Roll damage, apply it to the defender and start the attacker's cooldown.
///
/// The caller is responsible for checking the cooldown first.
pub fn resolve_attack(
    attacker: &mut impl Fighter,
    defender: &mut impl Fighter,
    variance: f32,
    rng: &mut impl Rng,
) -> AttackOutcome {
    let dealt = balance::damage(attacker.attack_power(), defender.defense_power(), variance, rng);
    let hp = defender.hp_mut();
    *hp = hp.saturating_sub(dealt.min(i32::MAX as u32) as i32);
    let defeated = *hp <= 0;
    attacker.cooldown_mut().trigger();
    AttackOutcome {
        damage_dealt: dealt,
        defender_defeated: defeated,
    }
}

/// Result of the player pressing attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAttackResult {
    /// Cooldown still running; nothing happens
    OnCooldown,
    /// No enemy in reach; the cooldown is not consumed
    NoTarget,
    Hit {
        enemy: EnemyId,
        damage: u32,
        defeated: bool,
    },
}

/// Pick the enemy the player is trying to hit.
///
/// An enemy under the pointer wins if it is also inside the attack radius;
/// otherwise the nearest enemy within the radius.
pub fn select_target(world: &GameWorld, player_pos: Vec2, pointer: Option<Vec2>) -> Option<(Entity, EnemyId)> {
    if let Some(point) = pointer {
        let under_pointer = world
            .nearest_enemy_within(point, ENEMY_HALF_EXTENT)
            .filter(|(entity, _)| {
                world
                    .ecs
                    .get::<&Position>(*entity)
                    .map(|pos| pos.0.distance(player_pos) <= PLAYER_ATTACK_RADIUS)
                    .unwrap_or(false)
            });
        if under_pointer.is_some() {
            return under_pointer;
        }
    }
    world.nearest_enemy_within(player_pos, PLAYER_ATTACK_RADIUS)
}

/// Player melee attack against the selected target
pub fn player_attack(
    world: &mut GameWorld,
    player: &mut Player,
    data: &BalanceData,
    input: &InputSnapshot,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> PlayerAttackResult {
    if !player.attack_cooldown.is_ready() {
        return PlayerAttackResult::OnCooldown;
    }

    let Some((entity, id)) = select_target(world, player.position, input.pointer_world_position) else {
        debug!("player attack: no target in range");
        return PlayerAttackResult::NoTarget;
    };

    let Ok((stats, health, cooldown)) =
        world
            .ecs
            .query_one_mut::<(&StatBlock, &mut Health, &mut AttackCooldown)>(entity)
    else {
        return PlayerAttackResult::NoTarget;
    };

    let mut defender = EnemyFighter { stats, health, cooldown };
    let outcome = resolve_attack(player, &mut defender, data.combat.player_damage_variance, rng);
    debug!("player hits enemy {} for {}", id, outcome.damage_dealt);
    events.push(GameEvent::AttackHit {
        attacker: Combatant::Player,
        target: Combatant::Enemy(id),
        damage: outcome.damage_dealt,
    });

    PlayerAttackResult::Hit {
        enemy: id,
        damage: outcome.damage_dealt,
        defeated: outcome.defender_defeated,
    }
}

/// Despawn every enemy at or below zero HP and pay out experience.
///
/// Returns the removed enemies in spawn order.
pub fn remove_dead_enemies(
    world: &mut GameWorld,
    player: &mut Player,
    data: &BalanceData,
    events: &mut EventQueue,
) -> Vec<EnemyId> {
    let mut dead: Vec<(Entity, EnemyId, u32)> = world
        .ecs
        .query::<(&EnemyId, &EnemyKind, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_depleted())
        .map(|(entity, (id, kind, _))| (entity, *id, kind.level))
        .collect();
    dead.sort_by_key(|(_, id, _)| *id);

    let mut removed = Vec::with_capacity(dead.len());
    for (entity, id, level) in dead {
        let _ = world.ecs.despawn(entity);

        let exp_reward = data.experience_reward(level);
        info!("enemy {} defeated, +{} exp", id, exp_reward);
        events.push(GameEvent::EnemyDefeated { enemy: id, exp_reward });
        grant_experience(player, exp_reward, data, events);
        removed.push(id);
    }
    removed
}

/// Send a defeated player back to the respawn point with half HP
pub fn handle_player_defeat(player: &mut Player, respawn_point: Vec2, events: &mut EventQueue) {
    info!("{} was defeated, respawning", player.name);
    player.respawn(respawn_point);
    events.push(GameEvent::PlayerDefeated);
}

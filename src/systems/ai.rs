//! Enemy AI state machine.
//!
//! Each tick every enemy measures its distance to the player and runs
//! [`decide`], a pure transition function, then the caller applies the
//! resulting action (velocity change or an attack on the player).

use std::f32::consts::TAU;

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::balance::BalanceData;
use crate::components::{AIState, AttackCooldown, EnemyAI, EnemyId, Health, Position, StatBlock, Velocity};
use crate::constants::{CHASE_SPEED, LOST_TARGET_FACTOR, WANDER_INTERVAL, WANDER_SPEED};
use crate::events::{Combatant, EventQueue, GameEvent};
use crate::player::Player;
use crate::systems::combat::{self, EnemyFighter};
use crate::time_system::GameClock;
use crate::world::GameWorld;

/// What an enemy does with its velocity this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Keep the current velocity
    Drift,
    /// Roll a new random wander heading
    NewHeading,
    /// Head straight for the player at chase speed
    Pursue,
    /// Stop moving
    Hold,
    /// Stop moving and strike the player
    Strike,
}

/// Decide the next state and action from distance to the player.
///
/// Priority order:
/// 1. Inside aggro range and not attacking: start (or keep) chasing.
/// 2. Wandering: re-roll heading when the wander interval has passed.
/// 3. Chasing: close enough to attack, too far to care, or keep pursuing.
/// 4. Attacking: hold still; fall back to chasing if the player stepped
///    out of range, otherwise strike when the cooldown allows.
pub fn decide(
    state: AIState,
    distance: f32,
    ai: &EnemyAI,
    wander_due: bool,
    cooldown_ready: bool,
) -> (AIState, AiAction) {
    let state = if distance <= ai.aggro_range && state != AIState::Attacking {
        AIState::Chasing
    } else {
        state
    };

    match state {
        AIState::Wander => {
            let action = if wander_due { AiAction::NewHeading } else { AiAction::Drift };
            (AIState::Wander, action)
        }
        AIState::Chasing => {
            // Zero distance lands here too, so pursuit never normalizes a zero vector
            if distance <= ai.attack_range {
                (AIState::Attacking, AiAction::Hold)
            } else if distance > ai.aggro_range * LOST_TARGET_FACTOR {
                (AIState::Wander, AiAction::Drift)
            } else {
                (AIState::Chasing, AiAction::Pursue)
            }
        }
        AIState::Attacking => {
            if distance > ai.attack_range {
                (AIState::Chasing, AiAction::Hold)
            } else if cooldown_ready {
                (AIState::Attacking, AiAction::Strike)
            } else {
                (AIState::Attacking, AiAction::Hold)
            }
        }
    }
}

/// Velocity that moves `from` toward `to` at `speed`; zero when they overlap.
pub fn pursuit_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

/// Run the AI for every live enemy in spawn order.
///
/// The player position is sampled once, so enemies processed later in the
/// tick see the same target as earlier ones. Strikes resolve immediately
/// against the player.
pub fn update_enemies(
    world: &mut GameWorld,
    player: &mut Player,
    data: &BalanceData,
    clock: &GameClock,
    respawn_point: Vec2,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    let player_pos = player.position;
    let variance = data.combat.enemy_damage_variance;

    for (entity, id) in world.enemies_in_order() {
        let Ok((pos, vel, ai, stats, health, cooldown)) = world.ecs.query_one_mut::<(
            &Position,
            &mut Velocity,
            &mut EnemyAI,
            &StatBlock,
            &mut Health,
            &mut AttackCooldown,
        )>(entity) else {
            continue;
        };

        let distance = pos.0.distance(player_pos);
        let wander_due = ai
            .last_action_time
            .map_or(true, |t| clock.time - t > WANDER_INTERVAL);

        let previous = ai.state;
        let (next, action) = decide(previous, distance, ai, wander_due, cooldown.is_ready());
        ai.state = next;

        match action {
            AiAction::Drift => {}
            AiAction::NewHeading => {
                let angle = rng.gen_range(0.0..TAU);
                vel.0 = Vec2::from_angle(angle) * WANDER_SPEED;
                ai.last_action_time = Some(clock.time);
            }
            AiAction::Pursue => {
                vel.0 = pursuit_velocity(pos.0, player_pos, CHASE_SPEED);
            }
            AiAction::Hold => {
                vel.0 = Vec2::ZERO;
            }
            AiAction::Strike => {
                vel.0 = Vec2::ZERO;
                let mut attacker = EnemyFighter { stats, health, cooldown };
                let outcome = combat::resolve_attack(&mut attacker, player, variance, rng);
                debug!("enemy {} hits player for {}", id, outcome.damage_dealt);
                events.push(GameEvent::AttackHit {
                    attacker: Combatant::Enemy(id),
                    target: Combatant::Player,
                    damage: outcome.damage_dealt,
                });
                if outcome.defender_defeated {
                    combat::handle_player_defeat(player, respawn_point, events);
                }
            }
        }

        if next != previous {
            log_transition(id, previous, next);
            events.push(GameEvent::AIStateChanged { enemy: id, new_state: next });
        }
    }
}

fn log_transition(id: EnemyId, from: AIState, to: AIState) {
    debug!("enemy {} {} -> {}", id, from.name(), to.name());
}

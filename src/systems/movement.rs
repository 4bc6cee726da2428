//! Movement integration for the player and enemies.

use crate::components::{AnimationState, AttackCooldown, Facing, Position, Velocity};
use crate::constants::*;
use crate::input::InputSnapshot;
use crate::player::Player;
use crate::world::GameWorld;

/// Move the player from this tick's input and count down its attack cooldown.
///
/// Velocity is the normalized input direction times the player's speed, so
/// diagonals are no faster than straight lines. The sprite stays fully
/// inside the world.
pub fn move_player(player: &mut Player, input: &InputSnapshot, world: &GameWorld, dt: f32) {
    let dir = input.movement_direction();
    player.velocity = dir * player.speed;
    player.position = world.clamp_to_bounds(player.position + player.velocity * dt, PLAYER_HALF_EXTENT);

    match Facing::from_movement(dir) {
        Some(facing) => {
            player.animation.state = AnimationState::Walking;
            player.animation.facing = facing;
        }
        None => player.animation.state = AnimationState::Idle,
    }

    player.attack_cooldown.tick(dt);
}

/// Integrate every enemy's velocity, keep it in bounds, and count down its
/// attack cooldown.
pub fn integrate_enemies(world: &mut GameWorld, dt: f32) {
    puffin::profile_function!();

    let (width, height) = (world.width, world.height);
    let clamp_axis = |v: f32, size: f32| v.clamp(ENEMY_HALF_EXTENT, (size - ENEMY_HALF_EXTENT).max(ENEMY_HALF_EXTENT));

    for (_, (pos, vel, cooldown)) in world
        .ecs
        .query_mut::<(&mut Position, &Velocity, &mut AttackCooldown)>()
    {
        let next = pos.0 + vel.0 * dt;
        pos.0.x = clamp_axis(next.x, width);
        pos.0.y = clamp_axis(next.y, height);
        cooldown.tick(dt);
    }
}

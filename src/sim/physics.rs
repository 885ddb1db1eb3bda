//! Per-tick motion: input response, gravity, integration and world bounds
//!
//! Everything here runs before collision resolution. Each `step_*` function
//! returns the entity's box from *before* the move so the resolver can tell
//! which side it came from.

use glam::Vec2;

use super::geometry::Aabb;
use super::level::Level;
use super::state::{Enemy, Player, PowerUp};
use super::tick::TickInput;
use super::tuning::Tuning;
use crate::consts::*;

/// Walk cycle: frames and ticks per frame
const PLAYER_WALK_FRAMES: u8 = 3;
const PLAYER_WALK_TICKS: u32 = 8;
const ENEMY_STEP_FRAMES: u8 = 2;
const ENEMY_STEP_TICKS: u32 = 20;

/// Accumulate gravity, capped at terminal fall speed
#[inline]
pub fn apply_gravity(vel: &mut Vec2, tuning: &Tuning) {
    vel.y = (vel.y + tuning.gravity).min(tuning.max_fall_speed);
}

/// Move by one tick of velocity
#[inline]
pub fn integrate(pos: &mut Vec2, vel: Vec2) {
    *pos += vel;
}

/// Snap to the ground plane if the box reached it this tick.
///
/// Returns true when the entity is resting on the ground. Over a pit there is
/// no ground; an entity already below the surface stays inside the pit walls.
pub fn clamp_to_ground(pos: &mut Vec2, size: Vec2, vel: &mut Vec2, prev: &Aabb, level: &Level) -> bool {
    if prev.bottom() > GROUND_Y {
        if let Some(pit) = level.pits.iter().find(|pit| pit.swallows(prev)) {
            pos.x = pos.x.clamp(pit.start, pit.end - size.x);
        }
        return false;
    }

    let rect = Aabb { pos: *pos, size };
    if rect.bottom() >= GROUND_Y && level.has_ground_under(&rect) {
        pos.y = GROUND_Y - size.y;
        vel.y = 0.0;
        true
    } else {
        false
    }
}

/// Keep a box inside [0, level width - box width]
#[inline]
pub fn clamp_to_level_x(pos: &mut Vec2, size: Vec2, level: &Level) {
    let max_x = level.pixel_width() - size.x;
    pos.x = pos.x.min(max_x).max(0.0);
}

/// Point horizontal velocity back inward when the box crosses a level bound
pub fn bounce_at_bounds(pos: Vec2, size: Vec2, vel: &mut Vec2, level: &Level) {
    if pos.x < 0.0 {
        vel.x = vel.x.abs();
    } else if pos.x > level.pixel_width() - size.x {
        vel.x = -vel.x.abs();
    }
}

/// True once the box has dropped entirely below the viewport
#[inline]
pub fn fell_out(rect: &Aabb) -> bool {
    rect.top() > VIEWPORT_HEIGHT
}

/// Advance a living player by one tick of input, gravity and movement
pub fn step_player(player: &mut Player, input: &TickInput, level: &Level, tuning: &Tuning) -> Aabb {
    // Horizontal velocity comes straight from input; no acceleration curve
    if input.left {
        player.vel.x = -tuning.move_speed;
        player.facing = -1.0;
        player.anim_timer += 1;
    } else if input.right {
        player.vel.x = tuning.move_speed;
        player.facing = 1.0;
        player.anim_timer += 1;
    } else {
        player.vel.x = 0.0;
        player.anim_timer = 0;
    }

    if player.anim_timer > PLAYER_WALK_TICKS {
        player.anim_frame = (player.anim_frame + 1) % PLAYER_WALK_FRAMES;
        player.anim_timer = 0;
    }

    if input.jump && player.on_ground && !player.jump_lock {
        player.vel.y = tuning.jump_impulse;
        player.jump_lock = true;
        player.on_ground = false;
    }
    if !input.jump {
        player.jump_lock = false;
    }

    apply_gravity(&mut player.vel, tuning);

    let prev = player.aabb();
    integrate(&mut player.pos, player.vel);
    player.on_ground = clamp_to_ground(&mut player.pos, player.size, &mut player.vel, &prev, level);
    clamp_to_level_x(&mut player.pos, player.size, level);

    prev
}

/// Death hop: gravity and velocity only, no ground, no input
pub fn step_dying_player(player: &mut Player, tuning: &Tuning) {
    apply_gravity(&mut player.vel, tuning);
    integrate(&mut player.pos, player.vel);
    player.on_ground = false;
}

/// Advance an enemy: drift, fall, land on the ground, turn at level bounds
pub fn step_enemy(enemy: &mut Enemy, level: &Level, tuning: &Tuning) -> Aabb {
    enemy.anim_timer += 1;
    if enemy.anim_timer > ENEMY_STEP_TICKS {
        enemy.anim_frame = (enemy.anim_frame + 1) % ENEMY_STEP_FRAMES;
        enemy.anim_timer = 0;
    }

    apply_gravity(&mut enemy.vel, tuning);
    let prev = enemy.aabb();
    integrate(&mut enemy.pos, enemy.vel);
    clamp_to_ground(&mut enemy.pos, enemy.size, &mut enemy.vel, &prev, level);
    bounce_at_bounds(enemy.pos, enemy.size, &mut enemy.vel, level);
    prev
}

/// Advance an active power-up; inactive ones stay put
pub fn step_powerup(powerup: &mut PowerUp, level: &Level, tuning: &Tuning) -> Aabb {
    let prev = powerup.aabb();
    if !powerup.active {
        return prev;
    }
    apply_gravity(&mut powerup.vel, tuning);
    integrate(&mut powerup.pos, powerup.vel);
    clamp_to_ground(&mut powerup.pos, powerup.size, &mut powerup.vel, &prev, level);
    bounce_at_bounds(powerup.pos, powerup.size, &mut powerup.vel, level);
    prev
}

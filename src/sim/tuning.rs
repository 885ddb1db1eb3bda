//! Data-driven game balance
//!
//! All velocities are pixels per tick and all durations are ticks, at
//! `consts::TICK_RATE_HZ`.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Horizontal player speed while a direction is held
    pub move_speed: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Vertical velocity after stomping an enemy
    pub stomp_bounce: f32,
    /// Vertical velocity given to the player on death
    pub death_hop: f32,
    /// Enemy drift speed (enemies start moving left)
    pub enemy_speed: f32,
    /// Power-up drift speed (power-ups start moving right)
    pub powerup_speed: f32,
    /// Vertical trim applied to side-block checks so corners don't snag
    pub side_margin: f32,
    /// How far the player's feet may sink past an enemy's head and still stomp
    pub stomp_tolerance: f32,

    pub coin_score: u64,
    pub stomp_score: u64,
    pub powerup_score: u64,
    /// Coins needed for an extra life
    pub coins_per_life: u32,

    pub base_height: f32,
    pub powered_height: f32,

    /// Ticks between death and respawn/game over
    pub death_delay_ticks: u32,
    /// Ticks a freshly shrunk player ignores enemy side contact
    pub invulnerable_ticks: u32,

    pub starting_lives: u32,
    pub starting_time: u32,
    /// Ticks per countdown unit
    pub ticks_per_time_unit: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: -12.0,
            move_speed: 4.0,
            max_fall_speed: 15.0,
            stomp_bounce: -8.0,
            death_hop: -10.0,
            enemy_speed: 1.0,
            powerup_speed: 2.0,
            side_margin: 5.0,
            stomp_tolerance: 10.0,

            coin_score: 100,
            stomp_score: 100,
            powerup_score: 1000,
            coins_per_life: 100,

            base_height: 32.0,
            powered_height: 48.0,

            death_delay_ticks: 120, // 2 seconds
            invulnerable_ticks: 60,

            starting_lives: 3,
            starting_time: 400,
            ticks_per_time_unit: 60,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Height difference between powered and base size
    pub fn grow_delta(&self) -> f32 {
        self.powered_height - self.base_height
    }
}

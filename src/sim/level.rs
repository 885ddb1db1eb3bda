//! Level layout: platforms, pipes, pits and spawn lists
//!
//! The layout is a fixed in-memory construction. `generate_level` is called
//! once per session; respawning after a death reuses the existing level so
//! spent question blocks stay spent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Brick,
    /// One-shot block: pays out a coin on first contact from above or below
    Question { consumed: bool },
}

/// A static, solid rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Aabb,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn brick(x: f32, y: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, TILE_SIZE, TILE_SIZE),
            kind: PlatformKind::Brick,
        }
    }

    pub fn question(x: f32, y: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, TILE_SIZE, TILE_SIZE),
            kind: PlatformKind::Question { consumed: false },
        }
    }

    /// Flip an unconsumed question block to consumed.
    ///
    /// Returns true only on the first call for a question block; bricks and
    /// spent blocks always return false.
    pub fn consume(&mut self) -> bool {
        match self.kind {
            PlatformKind::Question { consumed: false } => {
                self.kind = PlatformKind::Question { consumed: true };
                true
            }
            _ => false,
        }
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self.kind, PlatformKind::Question { consumed: true })
    }
}

/// Decorative pipe (no collision)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    /// Top of the pipe body (the lip is drawn above this)
    pub y: f32,
    pub height: f32,
}

/// Pipe body width in pixels
pub const PIPE_WIDTH: f32 = 64.0;

/// A horizontal span with no ground plane underneath
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pit {
    pub start: f32,
    pub end: f32,
}

impl Pit {
    /// True when the whole horizontal extent of `rect` lies over the pit
    pub fn swallows(&self, rect: &Aabb) -> bool {
        rect.left() >= self.start && rect.right() <= self.end
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Minor: grows the player and awards score
    Mushroom,
    /// Major: grants power-up state without resizing and awards score
    Flower,
}

/// Where and how a power-up appears at session start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUpSpawn {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub active: bool,
}

/// Level geometry plus the fixed spawn lists used to populate it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Width in tiles
    pub width_tiles: u32,
    pub platforms: Vec<Platform>,
    pub pipes: Vec<Pipe>,
    pub pits: Vec<Pit>,
    pub enemy_spawns: Vec<Vec2>,
    pub coin_spawns: Vec<Vec2>,
    pub powerup_spawns: Vec<PowerUpSpawn>,
}

impl Level {
    /// Level width in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width_tiles as f32 * TILE_SIZE
    }

    /// Whether the ground plane supports `rect` at its current x
    pub fn has_ground_under(&self, rect: &Aabb) -> bool {
        !self.pits.iter().any(|pit| pit.swallows(rect))
    }

    /// Number of question blocks not yet consumed
    pub fn unconsumed_question_blocks(&self) -> usize {
        self.platforms
            .iter()
            .filter(|p| matches!(p.kind, PlatformKind::Question { consumed: false }))
            .count()
    }
}

/// Build the 1-1 layout
pub fn generate_level() -> Level {
    let t = TILE_SIZE;
    let mut platforms = Vec::new();

    // Brick row
    let row_y = VIEWPORT_HEIGHT - 200.0;
    for i in 20..30 {
        platforms.push(Platform::brick(i as f32 * t, row_y));
    }

    // Question blocks (the second one shares a tile with the brick row)
    platforms.push(Platform::question(16.0 * t, row_y));
    platforms.push(Platform::question(22.0 * t, row_y));

    // Floating platform
    for i in 50..54 {
        platforms.push(Platform::brick(i as f32 * t, VIEWPORT_HEIGHT - 300.0));
    }

    // Staircase
    for i in 0..5 {
        for j in 0..=i {
            platforms.push(Platform::brick(
                (100 + i) as f32 * t,
                GROUND_Y - (j + 1) as f32 * t,
            ));
        }
    }

    let pipes = vec![
        Pipe {
            x: 40.0 * t,
            y: GROUND_Y - 64.0,
            height: 64.0,
        },
        Pipe {
            x: 60.0 * t,
            y: GROUND_Y - 96.0,
            height: 96.0,
        },
    ];

    let pits = vec![Pit {
        start: 70.0 * t,
        end: 73.0 * t,
    }];

    let coin_spawns = (0..20)
        .map(|i| Vec2::new(300.0 + i as f32 * 100.0, VIEWPORT_HEIGHT - 250.0))
        .collect();

    let powerup_spawns = vec![
        PowerUpSpawn {
            pos: Vec2::new(16.0 * t + 8.0, VIEWPORT_HEIGHT - 250.0),
            kind: PowerUpKind::Mushroom,
            active: true,
        },
        PowerUpSpawn {
            pos: Vec2::new(50.0 * t, VIEWPORT_HEIGHT - 350.0),
            kind: PowerUpKind::Flower,
            active: true,
        },
    ];

    Level {
        width_tiles: 200,
        platforms,
        pipes,
        pits,
        enemy_spawns: default_enemy_spawns(),
        coin_spawns,
        powerup_spawns,
    }
}

fn default_enemy_spawns() -> Vec<Vec2> {
    [400.0, 800.0, 1200.0, 1600.0]
        .into_iter()
        .map(|x| Vec2::new(x, 300.0))
        .collect()
}

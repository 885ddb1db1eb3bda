//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, velocities in pixels per tick
//! - Fixed level layout, no RNG
//! - Stable iteration order (platform and spawn list order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;
pub mod tuning;

pub use camera::{camera_offset, world_to_screen_x};
pub use geometry::{Aabb, aabb_overlap};
pub use level::{Level, Pipe, Pit, Platform, PlatformKind, PowerUpKind, generate_level};
pub use state::{Coin, Enemy, GameEvent, GamePhase, GameState, LifeState, Player, PowerUp};
pub use tick::{TickInput, tick};
pub use tuning::Tuning;

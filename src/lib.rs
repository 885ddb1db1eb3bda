//! Brick Runner - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, camera, session state)
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: HUD snapshot and text formatting
//! - `settings`: Player preferences

pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use hud::HudSnapshot;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Level tile size (pixels)
    pub const TILE_SIZE: f32 = 32.0;

    /// Top of the ground plane; everything above it is sky
    pub const GROUND_Y: f32 = VIEWPORT_HEIGHT - 96.0;

    /// Simulation rate. Tuning values are expressed per tick at this rate.
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player spawn point
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 32.0;

    /// World label shown on the HUD
    pub const WORLD_LABEL: &str = "1-1";
}

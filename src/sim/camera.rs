//! Horizontal follow camera
//!
//! The camera keeps the player one third of the way across the viewport and
//! snaps to the clamped target every tick. There is no vertical scrolling.

use crate::consts::VIEWPORT_WIDTH;

/// Largest valid camera offset for a level of the given pixel width
#[inline]
pub fn max_offset(level_pixel_width: f32) -> f32 {
    (level_pixel_width - VIEWPORT_WIDTH).max(0.0)
}

/// Camera offset for a player at `player_x`, clamped to the level
pub fn camera_offset(player_x: f32, level_pixel_width: f32) -> f32 {
    let target = player_x - VIEWPORT_WIDTH / 3.0;
    target.min(max_offset(level_pixel_width)).max(0.0)
}

/// World x to screen x
#[inline]
pub fn world_to_screen_x(world_x: f32, camera_x: f32) -> f32 {
    world_x - camera_x
}

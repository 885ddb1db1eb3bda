//! Scene builder
//!
//! Turns a `GameState` into one triangle list in screen pixels. World x is
//! shifted by the camera offset; anything entirely off screen is skipped.

use glam::Vec2;
use std::f32::consts::PI;

use super::shapes::{cloud, framed_rect, rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::level::{PIPE_WIDTH, Pipe, Platform, PlatformKind, PowerUpKind};
use crate::sim::state::{Coin, Enemy, GameState, Player, PowerUp};
use crate::sim::world_to_screen_x;

/// Depth of the ground band below `GROUND_Y`
const GROUND_TOP_DEPTH: f32 = 32.0;
const GRASS_SPACING: f32 = 64.0;
const CLOUD_PARALLAX: f32 = 0.5;
/// Invulnerable player is hidden on alternating blocks of this many ticks
const BLINK_TICKS: u64 = 4;

/// Build the full frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);
    let cam = state.camera_x;
    let animate = settings.effective_animations();

    draw_ground(&mut out, state);
    draw_clouds(&mut out, cam, settings);

    for platform in &state.level.platforms {
        draw_platform(&mut out, platform, cam);
    }
    for pipe in &state.level.pipes {
        draw_pipe(&mut out, pipe, cam);
    }
    for coin in &state.coin_items {
        draw_coin(&mut out, coin, cam, animate);
    }
    for powerup in &state.powerups {
        draw_powerup(&mut out, powerup, cam);
    }
    for enemy in &state.enemies {
        draw_enemy(&mut out, enemy, cam, animate);
    }

    let blink_hidden = settings.effective_blink()
        && state.player.invulnerable_ticks > 0
        && (state.time_ticks / BLINK_TICKS) % 2 == 1;
    if !blink_hidden {
        draw_player(&mut out, &state.player, cam, animate);
    }

    out
}

#[inline]
fn on_screen(screen_x: f32, width: f32) -> bool {
    screen_x + width > 0.0 && screen_x < VIEWPORT_WIDTH
}

fn draw_ground(out: &mut Vec<Vertex>, state: &GameState) {
    let cam = state.camera_x;

    // Solid spans between pits, in world x
    let mut spans = Vec::new();
    let mut start = 0.0;
    let mut pits: Vec<_> = state.level.pits.iter().collect();
    pits.sort_by(|a, b| a.start.total_cmp(&b.start));
    for pit in pits {
        spans.push((start, pit.start));
        start = pit.end;
    }
    spans.push((start, state.level.pixel_width()));

    for (a, b) in spans {
        let x0 = world_to_screen_x(a, cam).max(0.0);
        let x1 = world_to_screen_x(b, cam).min(VIEWPORT_WIDTH);
        if x1 <= x0 {
            continue;
        }
        out.extend(rect(x0, GROUND_Y, x1 - x0, GROUND_TOP_DEPTH, colors::GROUND_TOP));
        out.extend(rect(
            x0,
            GROUND_Y + GROUND_TOP_DEPTH,
            x1 - x0,
            VIEWPORT_HEIGHT - GROUND_Y - GROUND_TOP_DEPTH,
            colors::GROUND_DEEP,
        ));

        // Grass tufts scroll with the ground, clipped to the span
        let mut x = -(cam.rem_euclid(GRASS_SPACING));
        while x < x1 {
            let left = x.max(x0);
            let right = (x + GRASS_SPACING / 2.0).min(x1);
            if right > left {
                out.extend(rect(left, GROUND_Y, right - left, 8.0, colors::GRASS));
            }
            x += GRASS_SPACING;
        }
    }
}

fn draw_clouds(out: &mut Vec<Vertex>, cam: f32, settings: &Settings) {
    let count = settings.cloud_count();
    if count == 0 {
        return;
    }
    let wrap = VIEWPORT_WIDTH + 200.0;
    let spacing = wrap / count as f32;
    let segments = settings.quality.circle_segments();
    for i in 0..count {
        let base = 100.0 + i as f32 * spacing;
        let x = (base - cam * CLOUD_PARALLAX).rem_euclid(wrap) - 100.0;
        let y = 80.0 + (i % 3) as f32 * 25.0;
        out.extend(cloud(Vec2::new(x, y), colors::CLOUD, segments));
    }
}

fn draw_platform(out: &mut Vec<Vertex>, platform: &Platform, cam: f32) {
    let r = platform.rect;
    let x = world_to_screen_x(r.left(), cam);
    if !on_screen(x, r.size.x) {
        return;
    }
    let (w, h, y) = (r.size.x, r.size.y, r.top());

    match platform.kind {
        PlatformKind::Brick => {
            out.extend(framed_rect(x, y, w, h, 2.0, colors::BRICK_EDGE, colors::BRICK_FACE));
            out.extend(rect(x, y + h / 2.0 - 1.0, w, 2.0, colors::BRICK_MORTAR));
        }
        PlatformKind::Question { consumed: true } => {
            out.extend(framed_rect(x, y, w, h, 2.0, colors::SPENT_EDGE, colors::SPENT_FACE));
        }
        PlatformKind::Question { consumed: false } => {
            out.extend(framed_rect(x, y, w, h, 2.0, colors::QUESTION_EDGE, colors::QUESTION_FACE));
            draw_question_mark(out, x + w / 2.0, y + h / 2.0);
        }
    }
}

/// Blocky "?" glyph centered on (cx, cy)
fn draw_question_mark(out: &mut Vec<Vertex>, cx: f32, cy: f32) {
    let c = colors::QUESTION_MARK;
    out.extend(rect(cx - 6.0, cy - 10.0, 12.0, 3.0, c));
    out.extend(rect(cx + 3.0, cy - 10.0, 3.0, 9.0, c));
    out.extend(rect(cx - 2.0, cy - 2.0, 8.0, 3.0, c));
    out.extend(rect(cx - 2.0, cy - 2.0, 3.0, 6.0, c));
    out.extend(rect(cx - 2.0, cy + 6.0, 3.0, 3.0, c));
}

fn draw_pipe(out: &mut Vec<Vertex>, pipe: &Pipe, cam: f32) {
    let x = world_to_screen_x(pipe.x, cam);
    if !on_screen(x - 4.0, PIPE_WIDTH + 8.0) {
        return;
    }
    let (y, h) = (pipe.y, pipe.height);
    out.extend(rect(x, y, PIPE_WIDTH, h, colors::PIPE_BODY));
    out.extend(rect(x, y, 8.0, h, colors::PIPE_SHADE));
    out.extend(rect(x + PIPE_WIDTH - 8.0, y, 8.0, h, colors::PIPE_SHADE));
    // Lip
    out.extend(rect(x - 4.0, y - 8.0, PIPE_WIDTH + 8.0, 8.0, colors::PIPE_RIM));
    out.extend(rect(x - 4.0, y - 8.0, 8.0, 8.0, colors::PIPE_SHADE));
    out.extend(rect(x + PIPE_WIDTH, y - 8.0, 8.0, 8.0, colors::PIPE_SHADE));
}

fn draw_coin(out: &mut Vec<Vertex>, coin: &Coin, cam: f32, animate: bool) {
    let r = coin.aabb();
    let x = world_to_screen_x(r.left(), cam);
    if !on_screen(x, r.size.x) {
        return;
    }
    let frame = if animate { coin.anim_frame } else { 0 };
    // Spin by squashing the width
    let scale = (frame as f32 * PI / 2.0).cos().abs();
    let width = r.size.x * scale;
    let cx = x + r.size.x / 2.0;
    let cy = r.top() + r.size.y / 2.0;

    out.extend(rect(cx - width / 2.0, cy - 14.0, width, 28.0, colors::COIN));
    if scale > 0.3 {
        out.extend(rect(cx - width / 3.0, cy - 10.0, width * 0.6, 20.0, colors::COIN_INNER));
    }
}

fn draw_powerup(out: &mut Vec<Vertex>, powerup: &PowerUp, cam: f32) {
    let x = world_to_screen_x(powerup.pos.x, cam);
    if !on_screen(x, powerup.size.x) {
        return;
    }
    let y = powerup.pos.y;
    match powerup.kind {
        PowerUpKind::Mushroom => {
            out.extend(rect(x + 4.0, y, 24.0, 16.0, colors::MUSHROOM_CAP));
            out.extend(rect(x + 8.0, y + 4.0, 6.0, 6.0, colors::EYE_WHITE));
            out.extend(rect(x + 18.0, y + 4.0, 6.0, 6.0, colors::EYE_WHITE));
            out.extend(rect(x + 8.0, y + 16.0, 16.0, 16.0, colors::MUSHROOM_STEM));
            out.extend(rect(x + 10.0, y + 20.0, 3.0, 3.0, colors::EYE_PUPIL));
            out.extend(rect(x + 19.0, y + 20.0, 3.0, 3.0, colors::EYE_PUPIL));
        }
        PowerUpKind::Flower => {
            out.extend(rect(x + 14.0, y + 20.0, 4.0, 12.0, colors::FLOWER_STEM));
            out.extend(rect(x + 12.0, y + 4.0, 8.0, 8.0, colors::FLOWER_PETAL));
            out.extend(rect(x + 12.0, y + 20.0, 8.0, 8.0, colors::FLOWER_PETAL));
            out.extend(rect(x + 4.0, y + 12.0, 8.0, 8.0, colors::FLOWER_PETAL));
            out.extend(rect(x + 20.0, y + 12.0, 8.0, 8.0, colors::FLOWER_PETAL));
            out.extend(rect(x + 12.0, y + 12.0, 8.0, 8.0, colors::FLOWER_CORE));
        }
    }
}

fn draw_enemy(out: &mut Vec<Vertex>, enemy: &Enemy, cam: f32, animate: bool) {
    let x = world_to_screen_x(enemy.pos.x, cam);
    if !on_screen(x, enemy.size.x) {
        return;
    }
    let y = enemy.pos.y;
    out.extend(rect(x + 4.0, y + 8.0, 24.0, 24.0, colors::ENEMY_BODY));
    out.extend(rect(x + 8.0, y, 16.0, 16.0, colors::ENEMY_HEAD));
    out.extend(rect(x + 10.0, y + 6.0, 5.0, 5.0, colors::EYE_WHITE));
    out.extend(rect(x + 17.0, y + 6.0, 5.0, 5.0, colors::EYE_WHITE));
    out.extend(rect(x + 12.0, y + 8.0, 3.0, 3.0, colors::EYE_PUPIL));
    out.extend(rect(x + 19.0, y + 8.0, 3.0, 3.0, colors::EYE_PUPIL));

    let step = if animate && enemy.anim_frame == 1 { 2.0 } else { 0.0 };
    out.extend(rect(x + 2.0 + step, y + 28.0, 8.0, 4.0, colors::ENEMY_HEAD));
    out.extend(rect(x + 22.0 - step, y + 28.0, 8.0, 4.0, colors::ENEMY_HEAD));
}

fn draw_player(out: &mut Vec<Vertex>, player: &Player, cam: f32, animate: bool) {
    let sx = world_to_screen_x(player.pos.x, cam);
    if !on_screen(sx, player.size.x) {
        return;
    }
    let cx = sx + player.size.x / 2.0;
    let cy = player.pos.y + player.size.y / 2.0;
    let facing = player.facing;

    // Offsets are relative to the box center and mirrored when facing left
    let mut part = |dx: f32, dy: f32, w: f32, h: f32, color: [f32; 4]| {
        let left = if facing < 0.0 { -(dx + w) } else { dx };
        out.extend(rect(cx + left, cy + dy, w, h, color));
    };

    let body = if player.powered {
        colors::PLAYER_POWERED
    } else {
        colors::PLAYER
    };
    part(-12.0, -12.0, 24.0, 24.0, body);
    part(-14.0, -16.0, 28.0, 8.0, body);
    part(-8.0, -8.0, 16.0, 12.0, colors::PLAYER_FACE);
    part(-6.0, -6.0, 4.0, 4.0, colors::EYE_PUPIL);
    part(2.0, -6.0, 4.0, 4.0, colors::EYE_PUPIL);
    part(-8.0, 0.0, 16.0, 4.0, colors::PLAYER_MUSTACHE);

    let walking = player.vel.x != 0.0 && player.on_ground;
    if walking && animate {
        let stride = if player.anim_frame == 1 { 2.0 } else { 0.0 };
        part(-10.0 + stride, 8.0, 6.0, 8.0, colors::PLAYER_LEGS);
        part(4.0 - stride, 8.0, 6.0, 8.0, colors::PLAYER_LEGS);
    } else {
        part(-8.0, 8.0, 6.0, 8.0, colors::PLAYER_LEGS);
        part(2.0, 8.0, 6.0, 8.0, colors::PLAYER_LEGS);
    }
}

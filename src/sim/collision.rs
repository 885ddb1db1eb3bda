//! Collision detection and response
//!
//! Platform resolution walks the platform list in order and applies three
//! independent checks per platform (land on top, bump from below, side
//! block). There is no penetration sorting; later platforms overwrite earlier
//! corrections. Entity-vs-entity checks are player-only.

use glam::Vec2;

use super::geometry::Aabb;
use super::level::{Platform, PowerUpKind};
use super::state::{GameEvent, GameState, Player};
use super::tuning::Tuning;

/// Resolve the player against every platform.
///
/// `prev` is the player's box before this tick's move. Returns the indices of
/// question blocks consumed by this call, in platform order.
pub fn resolve_player_platforms(
    player: &mut Player,
    prev: &Aabb,
    platforms: &mut [Platform],
    tuning: &Tuning,
) -> Vec<usize> {
    let mut consumed = Vec::new();

    for (idx, platform) in platforms.iter_mut().enumerate() {
        let block = platform.rect;

        // Land on top
        let rect = player.aabb();
        if player.vel.y >= 0.0
            && rect.overlaps_x(&block)
            && prev.bottom() <= block.top()
            && rect.bottom() >= block.top()
        {
            player.pos.y = block.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
            if platform.consume() {
                consumed.push(idx);
            }
        }

        // Head bump
        let rect = player.aabb();
        if player.vel.y < 0.0
            && rect.overlaps_x(&block)
            && prev.top() >= block.bottom()
            && rect.top() <= block.bottom()
        {
            player.pos.y = block.bottom();
            player.vel.y = 0.0;
            if platform.consume() {
                consumed.push(idx);
            }
        }

        // Side block, with the vertical extent trimmed so corners don't snag
        let rect = player.aabb();
        if rect.overlaps_x(&block)
            && rect.bottom() > block.top() + tuning.side_margin
            && rect.top() < block.bottom() - tuning.side_margin
        {
            if player.vel.x > 0.0 {
                player.pos.x = block.left() - player.size.x;
            } else if player.vel.x < 0.0 {
                player.pos.x = block.right();
            }
            player.vel.x = 0.0;
        }
    }

    consumed
}

/// Top-landing only, for enemies and power-ups. Returns true if anything landed.
pub fn land_on_platforms(pos: &mut Vec2, size: Vec2, vel: &mut Vec2, prev: &Aabb, platforms: &[Platform]) -> bool {
    let mut landed = false;
    for platform in platforms {
        let block = platform.rect;
        let rect = Aabb { pos: *pos, size };
        if vel.y >= 0.0
            && rect.overlaps_x(&block)
            && prev.bottom() <= block.top()
            && rect.bottom() >= block.top()
        {
            pos.y = block.top() - size.y;
            vel.y = 0.0;
            landed = true;
        }
    }
    landed
}

/// Player vs enemies: stomp from above, otherwise take a hit
pub fn resolve_enemy_contacts(state: &mut GameState) {
    let tuning = state.tuning;

    for i in (0..state.enemies.len()).rev() {
        if !state.player.is_alive() {
            break;
        }

        let player_box = state.player.aabb();
        let enemy_box = state.enemies[i].aabb();
        if !player_box.overlaps(&enemy_box) {
            continue;
        }

        let falling = state.player.vel.y > 0.0;
        if falling && player_box.bottom() - tuning.stomp_tolerance < enemy_box.top() {
            state.enemies.remove(i);
            state.player.vel.y = tuning.stomp_bounce;
            state.score += tuning.stomp_score;
            state.events.push(GameEvent::EnemyStomped);
        } else if state.player.invulnerable_ticks > 0 {
            continue;
        } else if state.player.powered {
            state.player.shrink(&tuning);
            state.player.invulnerable_ticks = tuning.invulnerable_ticks;
            state.events.push(GameEvent::PlayerShrunk);
        } else {
            state.kill_player();
        }
    }
}

/// Player vs coins
pub fn resolve_coin_contacts(state: &mut GameState) {
    let player_box = state.player.aabb();
    for i in (0..state.coin_items.len()).rev() {
        if player_box.overlaps(&state.coin_items[i].aabb()) {
            state.coin_items.remove(i);
            state.collect_coin();
        }
    }
}

/// Player vs active power-ups
pub fn resolve_powerup_contacts(state: &mut GameState) {
    let tuning = state.tuning;
    for i in (0..state.powerups.len()).rev() {
        let powerup = &state.powerups[i];
        if !powerup.active || !state.player.aabb().overlaps(&powerup.aabb()) {
            continue;
        }

        let mut powerup = state.powerups.remove(i);
        powerup.active = false;

        match powerup.kind {
            PowerUpKind::Mushroom => state.player.grow(&tuning),
            PowerUpKind::Flower => state.player.powered = true,
        }
        state.score += tuning.powerup_score;
        state.events.push(GameEvent::PowerUpCollected(powerup.kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::{Platform, PlatformKind, generate_level};
    use crate::sim::state::{Coin, Enemy, LifeState, PowerUp};

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(x, y, &Tuning::default())
    }

    /// Move the player by its velocity and return the pre-move box
    fn advance(player: &mut Player) -> Aabb {
        let prev = player.aabb();
        player.pos += player.vel;
        prev
    }

    fn playing_state() -> GameState {
        let mut state = GameState::default();
        state.start_session();
        state.enemies.clear();
        state.coin_items.clear();
        state.powerups.clear();
        state
    }

    #[test]
    fn test_land_on_top() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        let mut player = player_at(100.0, 400.0 - 32.0 - 2.0);
        player.vel.y = 5.0;
        let prev = advance(&mut player);

        let hits = resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert!(hits.is_empty());
        assert_eq!(player.aabb().bottom(), 400.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_standing_on_platform_is_stable() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        let mut player = player_at(100.0, 400.0 - 32.0);
        for _ in 0..30 {
            player.vel.y += tuning.gravity;
            let prev = advance(&mut player);
            player.on_ground = false;
            resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
            assert!(player.on_ground);
            assert_eq!(player.aabb().bottom(), 400.0);
        }
    }

    #[test]
    fn test_head_bump() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        let mut player = player_at(100.0, 434.0);
        player.vel.y = -10.0;
        let prev = advance(&mut player);

        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.pos.y, 432.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_question_block_from_below_then_above_pays_once() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::question(100.0, 400.0)];

        let mut player = player_at(100.0, 434.0);
        player.vel.y = -10.0;
        let prev = advance(&mut player);
        let hits = resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(hits, vec![0]);
        assert!(platforms[0].is_consumed());

        let mut player = player_at(100.0, 400.0 - 34.0);
        player.vel.y = 5.0;
        let prev = advance(&mut player);
        let hits = resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert!(hits.is_empty());
        assert!(player.on_ground);
    }

    #[test]
    fn test_question_block_from_above_consumes() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(0.0, 400.0), Platform::question(100.0, 400.0)];
        let mut player = player_at(100.0, 400.0 - 34.0);
        player.vel.y = 5.0;
        let prev = advance(&mut player);
        let hits = resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_side_block_moving_right() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        let mut player = player_at(66.0, 400.0);
        player.vel.x = 4.0;
        let prev = advance(&mut player);

        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.aabb().right(), 100.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_side_block_moving_left() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        let mut player = player_at(134.0, 400.0);
        player.vel.x = -4.0;
        let prev = advance(&mut player);

        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.pos.x, 132.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_side_margin_ignores_corner_graze() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        // Feet 3px into the block's top edge: inside the margin, no side hit
        let mut player = player_at(70.0, 400.0 - 32.0 + 3.0);
        player.vel.x = 4.0;
        let prev = advance(&mut player);
        let before = player.pos.x;

        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.pos.x, before);
        assert_eq!(player.vel.x, 4.0);
    }

    #[test]
    fn test_stacked_brick_and_question_landing_pays() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(704.0, 400.0), Platform::question(704.0, 400.0)];
        let mut player = player_at(704.0, 400.0 - 34.0);
        player.vel.y = 5.0;
        let prev = advance(&mut player);

        // The brick snaps first, the question block still sees a landing
        let hits = resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(hits, vec![1]);
        assert_eq!(player.aabb().bottom(), 400.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_stacked_brick_absorbs_head_bump() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(704.0, 400.0), Platform::question(704.0, 400.0)];
        let mut player = player_at(704.0, 434.0);
        player.vel.y = -10.0;
        let prev = advance(&mut player);

        // The brick zeroes vy, so the question block never sees a bump
        let hits = resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert!(hits.is_empty());
        assert!(!platforms[1].is_consumed());
        assert_eq!(player.pos.y, 432.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_level_shared_tile_brick_comes_first() {
        let mut level = generate_level();
        let tuning = Tuning::default();
        let question = level
            .platforms
            .iter()
            .position(|p| matches!(p.kind, PlatformKind::Question { .. }) && p.rect.pos.x == 22.0 * TILE_SIZE)
            .expect("question block at tile 22");
        let brick = level
            .platforms
            .iter()
            .position(|p| p.kind == PlatformKind::Brick && p.rect.pos == level.platforms[question].rect.pos)
            .expect("brick sharing the tile");
        assert!(brick < question);

        let top = level.platforms[question].rect.top();
        let mut player = player_at(22.0 * TILE_SIZE, top - 34.0);
        player.vel.y = 5.0;
        let prev = advance(&mut player);
        let hits = resolve_player_platforms(&mut player, &prev, &mut level.platforms, &tuning);
        assert_eq!(hits, vec![question]);
        assert!(!level.platforms[brick].is_consumed());
    }

    #[test]
    fn test_later_platform_overwrites_earlier_landing() {
        let tuning = Tuning::default();
        // Two overlapping ledges, the lower one listed first
        let mut platforms = vec![Platform::brick(100.0, 400.0), Platform::brick(120.0, 390.0)];
        let mut player = player_at(110.0, 390.0 - 32.0 - 5.0);
        player.vel.y = 20.0;
        let prev = advance(&mut player);

        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.aabb().bottom(), 390.0);
        assert!(player.on_ground);

        // Same move with the order swapped: the upper ledge lands first and the
        // lower one no longer reaches the player
        platforms.reverse();
        let mut player = player_at(110.0, 390.0 - 32.0 - 5.0);
        player.vel.y = 20.0;
        let prev = advance(&mut player);
        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.aabb().bottom(), 390.0);
    }

    #[test]
    fn test_first_wall_in_order_stops_the_player() {
        let tuning = Tuning::default();
        let near = Platform::brick(90.0, 400.0);
        let far = Platform::brick(100.0, 400.0);

        let mut platforms = vec![far.clone(), near.clone()];
        let mut player = player_at(68.0, 400.0);
        player.vel.x = 4.0;
        let prev = advance(&mut player);
        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        // The far wall snaps and zeroes vx, the near wall has nothing to push
        assert_eq!(player.aabb().right(), 100.0);
        assert_eq!(player.vel.x, 0.0);

        let mut platforms = vec![near, far];
        let mut player = player_at(68.0, 400.0);
        player.vel.x = 4.0;
        let prev = advance(&mut player);
        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.aabb().right(), 90.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_diagonal_move_gets_vertical_and_side_correction() {
        let tuning = Tuning::default();
        // A floor block with a wall block standing on its right neighbour
        let mut platforms = vec![Platform::brick(100.0, 400.0), Platform::brick(132.0, 368.0)];
        let mut player = player_at(98.0, 400.0 - 32.0 - 3.0);
        player.vel = Vec2::new(4.0, 5.0);
        let prev = advance(&mut player);

        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.pos, Vec2::new(100.0, 368.0));
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(player.on_ground);
    }

    #[test]
    fn test_landing_snap_clears_side_check_on_same_block() {
        let tuning = Tuning::default();
        let mut platforms = vec![Platform::brick(100.0, 400.0)];
        let mut player = player_at(72.0, 400.0 - 32.0 - 3.0);
        player.vel = Vec2::new(4.0, 8.0);
        let prev = advance(&mut player);

        // Feet end 5px deep, but the landing snap runs before the side check
        resolve_player_platforms(&mut player, &prev, &mut platforms, &tuning);
        assert_eq!(player.pos, Vec2::new(76.0, 368.0));
        assert_eq!(player.vel.x, 4.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_enemy_lands_on_platform() {
        let platforms = vec![Platform::brick(100.0, 400.0)];
        let size = Vec2::splat(TILE_SIZE);
        let mut pos = Vec2::new(100.0, 400.0 - 32.0 - 1.0);
        let prev = Aabb { pos, size };
        let mut vel = Vec2::new(-1.0, 3.0);
        pos += vel;

        assert!(land_on_platforms(&mut pos, size, &mut vel, &prev, &platforms));
        assert_eq!(pos.y, 368.0);
        assert_eq!(vel.y, 0.0);
        assert_eq!(vel.x, -1.0);
    }

    #[test]
    fn test_stomp_removes_only_that_enemy() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.enemies = vec![
            Enemy::new(Vec2::new(1000.0, GROUND_Y - 32.0), &tuning),
            Enemy::new(Vec2::new(300.0, GROUND_Y - 32.0), &tuning),
            Enemy::new(Vec2::new(2000.0, GROUND_Y - 32.0), &tuning),
        ];
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0 - 32.0 + 4.0);
        state.player.vel = Vec2::new(0.0, 5.0);

        resolve_enemy_contacts(&mut state);

        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].pos.x, 1000.0);
        assert_eq!(state.enemies[1].pos.x, 2000.0);
        assert_eq!(state.player.vel.y, tuning.stomp_bounce);
        assert_eq!(state.score, 100);
        assert!(state.player.is_alive());
        assert_eq!(state.events, vec![GameEvent::EnemyStomped]);
    }

    #[test]
    fn test_side_hit_kills_small_player() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.enemies = vec![Enemy::new(Vec2::new(310.0, GROUND_Y - 32.0), &tuning)];
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0);
        state.player.vel = Vec2::new(4.0, 0.0);
        let lives = state.lives;

        resolve_enemy_contacts(&mut state);

        assert!(matches!(state.player.life, LifeState::Dying { .. }));
        assert_eq!(state.lives, lives - 1);
        assert_eq!(state.player.vel.y, tuning.death_hop);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.events.contains(&GameEvent::PlayerDied));
    }

    #[test]
    fn test_side_hit_shrinks_powered_player() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.enemies = vec![Enemy::new(Vec2::new(310.0, GROUND_Y - 32.0), &tuning)];
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0);
        state.player.grow(&tuning);

        resolve_enemy_contacts(&mut state);
        assert!(state.player.is_alive());
        assert!(!state.player.powered);
        assert_eq!(state.player.size.y, 32.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.events, vec![GameEvent::PlayerShrunk]);

        // Still touching next tick, but immune for a while
        resolve_enemy_contacts(&mut state);
        assert!(state.player.is_alive());
    }

    #[test]
    fn test_rising_player_does_not_stomp() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.enemies = vec![Enemy::new(Vec2::new(300.0, GROUND_Y - 32.0), &tuning)];
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0 - 28.0);
        state.player.vel = Vec2::new(0.0, -3.0);

        resolve_enemy_contacts(&mut state);
        assert!(!state.player.is_alive());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_coin_pickup() {
        let mut state = playing_state();
        state.coin_items = vec![Coin::new(Vec2::new(305.0, 300.0)), Coin::new(Vec2::new(900.0, 300.0))];
        state.player.pos = Vec2::new(300.0, 290.0);

        resolve_coin_contacts(&mut state);
        assert_eq!(state.coin_items.len(), 1);
        assert_eq!(state.coins, 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_mushroom_grows_and_scores() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0);
        state.powerups = vec![PowerUp::new(Vec2::new(310.0, GROUND_Y - 32.0), PowerUpKind::Mushroom, true, &tuning)];

        resolve_powerup_contacts(&mut state);
        assert!(state.powerups.is_empty());
        assert!(state.player.powered);
        assert_eq!(state.player.size.y, 48.0);
        assert_eq!(state.player.aabb().bottom(), GROUND_Y);
        assert_eq!(state.score, 1000);
    }

    #[test]
    fn test_mushroom_while_powered_only_scores() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0);
        state.player.grow(&tuning);
        let pos = state.player.pos;
        state.powerups = vec![PowerUp::new(Vec2::new(310.0, GROUND_Y - 32.0), PowerUpKind::Mushroom, true, &tuning)];

        resolve_powerup_contacts(&mut state);
        assert_eq!(state.player.size.y, 48.0);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.score, 1000);
    }

    #[test]
    fn test_flower_powers_without_resizing() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0);
        state.powerups = vec![PowerUp::new(Vec2::new(310.0, GROUND_Y - 32.0), PowerUpKind::Flower, true, &tuning)];

        resolve_powerup_contacts(&mut state);
        assert!(state.player.powered);
        assert_eq!(state.player.size.y, 32.0);
        assert_eq!(state.score, 1000);
        assert_eq!(state.events, vec![GameEvent::PowerUpCollected(PowerUpKind::Flower)]);
    }

    #[test]
    fn test_inactive_powerup_is_ignored() {
        let mut state = playing_state();
        let tuning = state.tuning;
        state.player.pos = Vec2::new(300.0, GROUND_Y - 32.0);
        state.powerups = vec![PowerUp::new(Vec2::new(310.0, GROUND_Y - 32.0), PowerUpKind::Mushroom, false, &tuning)];

        resolve_powerup_contacts(&mut state);
        assert_eq!(state.powerups.len(), 1);
        assert!(!state.player.powered);
        assert_eq!(state.score, 0);
    }
}

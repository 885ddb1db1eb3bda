//! Simulation tick
//!
//! One call advances the whole world by one frame: player input and physics,
//! player collisions, the death state machine, enemies, coins, power-ups and
//! finally the camera.

use super::camera::camera_offset;
use super::collision::{
    land_on_platforms, resolve_coin_contacts, resolve_enemy_contacts, resolve_player_platforms,
    resolve_powerup_contacts,
};
use super::physics::{fell_out, step_dying_player, step_enemy, step_player, step_powerup};
use super::state::{GameEvent, GamePhase, GameState, LifeState};

/// Coin spin: frames and ticks per frame
const COIN_SPIN_FRAMES: u8 = 4;
const COIN_SPIN_TICKS: u32 = 10;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump held (up or space)
    pub jump: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    match state.player.life {
        LifeState::Alive => update_living_player(state, input),
        LifeState::Dying { ticks_left } => {
            step_dying_player(&mut state.player, &state.tuning);
            let remaining = ticks_left.saturating_sub(1);
            if remaining == 0 {
                finish_dying(state);
            } else {
                state.player.life = LifeState::Dying {
                    ticks_left: remaining,
                };
            }
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    update_enemies(state);
    update_coins(state);
    update_powerups(state);

    state.camera_x = camera_offset(state.player.pos.x, state.level.pixel_width());
}

fn update_living_player(state: &mut GameState, input: &TickInput) {
    let tuning = state.tuning;

    let prev = step_player(&mut state.player, input, &state.level, &tuning);
    let consumed = resolve_player_platforms(&mut state.player, &prev, &mut state.level.platforms, &tuning);
    for idx in consumed {
        state.events.push(GameEvent::QuestionBlockHit(idx));
        state.collect_coin();
    }

    if state.player.invulnerable_ticks > 0 {
        state.player.invulnerable_ticks -= 1;
    }

    resolve_enemy_contacts(state);
    if state.player.is_alive() {
        resolve_coin_contacts(state);
        resolve_powerup_contacts(state);
    }

    if state.player.is_alive() && fell_out(&state.player.aabb()) {
        state.kill_player();
    }

    if state.player.is_alive() {
        count_down(state);
    }
}

/// Dying -> GameOver when out of lives, otherwise Dying -> Respawning -> Alive
fn finish_dying(state: &mut GameState) {
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over: final score {}", state.score);
    } else {
        state.reset_level();
        state.events.push(GameEvent::Respawned);
        log::debug!("Respawned with {} lives", state.lives);
    }
}

/// Cosmetic countdown; stops at zero
fn count_down(state: &mut GameState) {
    let per_unit = state.tuning.ticks_per_time_unit as u64;
    if per_unit == 0 || state.time == 0 {
        return;
    }
    if state.time_ticks % per_unit == 0 {
        state.time -= 1;
        state.events.push(GameEvent::TimeTick);
    }
}

fn update_enemies(state: &mut GameState) {
    let tuning = state.tuning;
    let level = &state.level;
    for enemy in &mut state.enemies {
        let prev = step_enemy(enemy, level, &tuning);
        land_on_platforms(&mut enemy.pos, enemy.size, &mut enemy.vel, &prev, &level.platforms);
    }
    state.enemies.retain(|e| !fell_out(&e.aabb()));
}

fn update_coins(state: &mut GameState) {
    for coin in &mut state.coin_items {
        coin.anim_timer += 1;
        if coin.anim_timer > COIN_SPIN_TICKS {
            coin.anim_frame = (coin.anim_frame + 1) % COIN_SPIN_FRAMES;
            coin.anim_timer = 0;
        }
    }
}

fn update_powerups(state: &mut GameState) {
    let tuning = state.tuning;
    let level = &state.level;
    for powerup in &mut state.powerups {
        if !powerup.active {
            continue;
        }
        let prev = step_powerup(powerup, level, &tuning);
        land_on_platforms(&mut powerup.pos, powerup.size, &mut powerup.vel, &prev, &level.platforms);
    }
    state.powerups.retain(|p| !fell_out(&p.aabb()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::Pit;
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::default();
        state.start_session();
        state
    }

    /// Session with nothing but the ground plane
    fn empty_playing() -> GameState {
        let mut state = playing();
        state.level.platforms.clear();
        state.level.pits.clear();
        state.enemies.clear();
        state.coin_items.clear();
        state.powerups.clear();
        state
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: u32) {
        for _ in 0..ticks {
            tick(state, input);
        }
    }

    #[test]
    fn test_tick_does_nothing_on_title() {
        let mut state = GameState::default();
        let before = state.player.pos;
        tick(&mut state, &TickInput { right: true, ..Default::default() });
        assert_eq!(state.player.pos, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_player_falls_to_ground_at_start() {
        let mut state = empty_playing();
        run(&mut state, &TickInput::default(), 60);
        assert!(state.player.on_ground);
        assert_eq!(state.player.aabb().bottom(), GROUND_Y);
    }

    #[test]
    fn test_jump_scenario() {
        let mut state = empty_playing();
        run(&mut state, &TickInput::default(), 60);
        let rest_y = state.player.pos.y;

        tick(&mut state, &TickInput { jump: true, ..Default::default() });
        assert!(!state.player.on_ground);
        assert_eq!(state.player.vel.y, state.tuning.jump_impulse + state.tuning.gravity);
        let first_y = state.player.pos.y;
        assert!(first_y < rest_y);

        tick(&mut state, &TickInput::default());
        assert!(state.player.pos.y < first_y);

        run(&mut state, &TickInput::default(), 60);
        assert!(state.player.on_ground);
        assert_eq!(state.player.pos.y, rest_y);
    }

    #[test]
    fn test_question_block_pays_once_per_session() {
        let mut state = playing();
        // Park the player right under the first question block
        let block = state.level.platforms[10].rect;
        state.enemies.clear();
        state.coin_items.clear();
        state.powerups.clear();
        state.player.pos = Vec2::new(block.left(), GROUND_Y - 32.0);
        run(&mut state, &TickInput::default(), 5);
        state.drain_events();

        let jump = TickInput { jump: true, ..Default::default() };
        let mut hits = 0;
        for _ in 0..10 {
            run(&mut state, &jump, 40);
            run(&mut state, &TickInput::default(), 5);
            hits += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::QuestionBlockHit(_)))
                .count();
        }
        assert_eq!(hits, 1);
        assert!(state.level.platforms[10].is_consumed());
        assert_eq!(state.coins, 1);
    }

    #[test]
    fn test_hundredth_coin_scenario() {
        let mut state = empty_playing();
        run(&mut state, &TickInput::default(), 60);
        state.coins = 99;
        let lives = state.lives;
        let score = state.score;
        let p = state.player.pos;
        state.coin_items = vec![crate::sim::state::Coin::new(p)];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.coins, 0);
        assert_eq!(state.lives, lives + 1);
        assert_eq!(state.score, score + state.tuning.coin_score);
    }

    #[test]
    fn test_fall_with_last_life_ends_game_after_delay() {
        let mut state = empty_playing();
        state.lives = 1;
        state.score = 4200;
        state.level.pits.push(Pit { start: 80.0, end: 160.0 });
        state.coin_items = vec![crate::sim::state::Coin::new(Vec2::new(2000.0, 100.0))];

        let mut died_at = None;
        for t in 0..200u32 {
            tick(&mut state, &TickInput::default());
            if died_at.is_none() && !state.player.is_alive() {
                died_at = Some(t);
                assert_eq!(state.lives, 0);
            }
        }
        let died_at = died_at.expect("player should fall into the pit");
        assert!(died_at < 80);

        // Nothing happens before the delay elapses
        let mut state2 = empty_playing();
        state2.lives = 1;
        state2.level.pits.push(Pit { start: 80.0, end: 160.0 });
        run(&mut state2, &TickInput::default(), died_at + 1);
        assert!(!state2.player.is_alive());
        let almost = state2.tuning.death_delay_ticks - 1;
        run(&mut state2, &TickInput::default(), almost);
        assert_eq!(state2.phase, GamePhase::Playing);
        tick(&mut state2, &TickInput::default());
        assert_eq!(state2.phase, GamePhase::GameOver);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 4200);
        assert!(state.events.contains(&GameEvent::GameOver { score: 4200 }));
    }

    #[test]
    fn test_death_with_lives_left_respawns() {
        let mut state = empty_playing();
        state.score = 700;
        state.coins = 12;
        let tuning = state.tuning;
        state.enemies = vec![crate::sim::state::Enemy::new(Vec2::new(110.0, GROUND_Y - 32.0), &tuning)];
        state.player.pos = Vec2::new(100.0, GROUND_Y - 32.0);
        state.player.on_ground = true;

        tick(&mut state, &TickInput::default());
        assert!(!state.player.is_alive());
        assert_eq!(state.lives, 2);

        run(&mut state, &TickInput::default(), tuning.death_delay_ticks);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.is_alive());
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 700);
        assert_eq!(state.coins, 12);
        // Enemy roster comes from the level's spawn list
        assert_eq!(state.enemies.len(), state.level.enemy_spawns.len());
        assert!(state.events.contains(&GameEvent::Respawned));
    }

    #[test]
    fn test_dying_player_ignores_input_and_collisions() {
        let mut state = empty_playing();
        state.kill_player();
        let x = state.player.pos.x;
        state.coin_items = vec![crate::sim::state::Coin::new(state.player.pos)];

        run(&mut state, &TickInput { right: true, jump: true, ..Default::default() }, 10);
        assert_eq!(state.player.pos.x, x);
        assert_eq!(state.coin_items.len(), 1);
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = empty_playing();
        run(&mut state, &TickInput { right: true, ..Default::default() }, 300);
        let expected = state.player.pos.x - VIEWPORT_WIDTH / 3.0;
        assert!((state.camera_x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_countdown() {
        let mut state = empty_playing();
        let three_units = state.tuning.ticks_per_time_unit * 3;
        run(&mut state, &TickInput::default(), three_units);
        assert_eq!(state.time, 397);
    }

    #[test]
    fn test_enemy_falling_into_pit_is_removed() {
        let mut state = empty_playing();
        let tuning = state.tuning;
        state.level.pits.push(Pit { start: 1000.0, end: 1100.0 });
        state.enemies = vec![crate::sim::state::Enemy::new(Vec2::new(1050.0, GROUND_Y - 32.0), &tuning)];
        state.player.pos = Vec2::new(100.0, GROUND_Y - 32.0);
        run(&mut state, &TickInput::default(), 120);
        assert!(state.enemies.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn input_from(bits: u8) -> TickInput {
            TickInput {
                left: bits & 1 != 0,
                right: bits & 2 != 0,
                jump: bits & 4 != 0,
            }
        }

        proptest! {
            #[test]
            fn fall_speed_never_exceeds_terminal(
                moves in proptest::collection::vec(0u8..8, 50..300)
            ) {
                let mut state = playing();
                let max_fall = state.tuning.max_fall_speed;
                for bits in moves {
                    tick(&mut state, &input_from(bits));
                    prop_assert!(state.player.vel.y <= max_fall);
                    for enemy in &state.enemies {
                        prop_assert!(enemy.vel.y <= max_fall);
                    }
                }
            }

            #[test]
            fn player_and_camera_stay_in_bounds(
                moves in proptest::collection::vec(0u8..8, 50..400)
            ) {
                let mut state = playing();
                let width = state.level.pixel_width();
                for bits in moves {
                    tick(&mut state, &input_from(bits));
                    if state.phase != GamePhase::Playing {
                        break;
                    }
                    let p = state.player.pos.x;
                    prop_assert!(p >= 0.0 && p <= width - state.player.size.x, "player x={}", p);
                    prop_assert!(state.camera_x >= 0.0);
                    prop_assert!(state.camera_x <= width - VIEWPORT_WIDTH);
                }
            }

            #[test]
            fn coin_counter_stays_bounded(
                moves in proptest::collection::vec(0u8..8, 50..400),
                start_coins in 0u32..100
            ) {
                let mut state = playing();
                state.coins = start_coins;
                for bits in moves {
                    tick(&mut state, &input_from(bits));
                    prop_assert!(state.coins < state.tuning.coins_per_life);
                }
            }
        }
    }
}

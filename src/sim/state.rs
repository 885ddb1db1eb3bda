//! Game state and core simulation types
//!
//! `GameState` is the single world bundle handed to `tick` each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::level::{Level, PowerUpKind, generate_level};
use super::tuning::Tuning;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu screen, simulation idle
    Title,
    /// Active gameplay
    Playing,
    /// Out of lives; simulation stopped
    GameOver,
}

/// Player life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    /// Death hop in progress; resolves to respawn or game over when the timer hits zero
    Dying { ticks_left: u32 },
}

/// Something that happened during a tick (drained by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected,
    ExtraLife,
    /// Index into `level.platforms`
    QuestionBlockHit(usize),
    EnemyStomped,
    PowerUpCollected(PowerUpKind),
    /// Powered-up player absorbed a hit
    PlayerShrunk,
    PlayerDied,
    Respawned,
    GameOver { score: u64 },
    /// Countdown timer changed
    TimeTick,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    /// Set by a jump, cleared when the jump input is released
    pub jump_lock: bool,
    pub powered: bool,
    pub life: LifeState,
    /// Remaining ticks of enemy side-contact immunity
    #[serde(default)]
    pub invulnerable_ticks: u32,
    /// Walk cycle frame (cosmetic)
    #[serde(skip)]
    pub anim_frame: u8,
    #[serde(skip)]
    pub anim_timer: u32,
}

impl Player {
    pub fn new(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(PLAYER_WIDTH, tuning.base_height),
            vel: Vec2::ZERO,
            on_ground: false,
            facing: 1.0,
            jump_lock: false,
            powered: false,
            life: LifeState::Alive,
            invulnerable_ticks: 0,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// Enter power-up state, growing upward so the feet stay put
    pub fn grow(&mut self, tuning: &Tuning) {
        if !self.powered {
            self.powered = true;
            self.size.y = tuning.powered_height;
            self.pos.y -= tuning.grow_delta();
        }
    }

    /// Leave power-up state and return to base size, keeping the feet planted
    pub fn shrink(&mut self, tuning: &Tuning) {
        self.powered = false;
        let delta = self.size.y - tuning.base_height;
        self.size.y = tuning.base_height;
        self.pos.y += delta;
    }
}

/// A walking enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    #[serde(skip)]
    pub anim_frame: u8,
    #[serde(skip)]
    pub anim_timer: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::splat(TILE_SIZE),
            vel: Vec2::new(-tuning.enemy_speed, 0.0),
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Coin size in pixels
pub const COIN_SIZE: Vec2 = Vec2::new(20.0, 28.0);

/// A static coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    #[serde(skip)]
    pub anim_frame: u8,
    #[serde(skip)]
    pub anim_timer: u32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: COIN_SIZE,
        }
    }
}

/// A drifting power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    /// Inactive power-ups neither move nor can be collected
    pub active: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind, active: bool, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::splat(TILE_SIZE),
            vel: Vec2::new(tuning.powerup_speed, 0.0),
            kind,
            active,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub tuning: Tuning,
    pub score: u64,
    /// Coin counter, always below `tuning.coins_per_life`
    pub coins: u32,
    pub lives: u32,
    /// Countdown shown on the HUD (cosmetic)
    pub time: u32,
    /// Horizontal camera offset in pixels
    pub camera_x: f32,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    pub level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coin_items: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Create a state sitting on the title screen with a populated level
    pub fn new(tuning: Tuning) -> Self {
        let level = generate_level();
        let mut state = Self {
            phase: GamePhase::Title,
            tuning,
            score: 0,
            coins: 0,
            lives: tuning.starting_lives,
            time: tuning.starting_time,
            camera_x: 0.0,
            time_ticks: 0,
            player: Player::new(PLAYER_START_X, PLAYER_START_Y, &tuning),
            enemies: Vec::new(),
            coin_items: Vec::new(),
            powerups: Vec::new(),
            level,
            events: Vec::new(),
        };
        state.populate();
        state
    }

    /// Start (or restart) a session: fresh counters, fresh level, fresh spawns
    pub fn start_session(&mut self) {
        self.score = 0;
        self.coins = 0;
        self.lives = self.tuning.starting_lives;
        self.time = self.tuning.starting_time;
        self.time_ticks = 0;
        self.level = generate_level();
        self.populate();
        self.events.clear();
        self.phase = GamePhase::Playing;
        log::info!("Session started: {} lives", self.lives);
    }

    /// Recreate player and enemies after a death. Score, coins, lives,
    /// level state, coins and power-ups persist.
    pub fn reset_level(&mut self) {
        self.player = Player::new(PLAYER_START_X, PLAYER_START_Y, &self.tuning);
        self.spawn_enemies();
        self.camera_x = 0.0;
    }

    fn populate(&mut self) {
        let tuning = self.tuning;
        self.player = Player::new(PLAYER_START_X, PLAYER_START_Y, &tuning);
        self.spawn_enemies();
        self.coin_items = self.level.coin_spawns.iter().copied().map(Coin::new).collect();
        self.powerups = self
            .level
            .powerup_spawns
            .iter()
            .map(|s| PowerUp::new(s.pos, s.kind, s.active, &tuning))
            .collect();
        self.camera_x = 0.0;
    }

    fn spawn_enemies(&mut self) {
        let tuning = self.tuning;
        self.enemies = self
            .level
            .enemy_spawns
            .iter()
            .map(|&pos| Enemy::new(pos, &tuning))
            .collect();
    }

    /// Shared coin-collect side effect: counter, score, extra life rollover
    pub fn collect_coin(&mut self) {
        self.coins += 1;
        self.score += self.tuning.coin_score;
        self.events.push(GameEvent::CoinCollected);
        if self.coins >= self.tuning.coins_per_life {
            self.coins -= self.tuning.coins_per_life;
            self.lives += 1;
            self.events.push(GameEvent::ExtraLife);
            log::info!("Extra life! lives={}", self.lives);
        }
    }

    /// Alive -> Dying: death hop, lose a life. No-op if already dying.
    pub fn kill_player(&mut self) {
        if !self.player.is_alive() {
            return;
        }
        self.player.life = LifeState::Dying {
            ticks_left: self.tuning.death_delay_ticks,
        };
        self.player.vel = Vec2::new(0.0, self.tuning.death_hop);
        self.player.on_ground = false;
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerDied);
        log::debug!("Player died at x={:.0}, lives left: {}", self.player.pos.x, self.lives);
    }

    /// Take the pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

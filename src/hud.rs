//! HUD snapshot
//!
//! The host reads a `HudSnapshot` after any tick that produced events and
//! writes the formatted strings into the page.

use crate::consts::WORLD_LABEL;
use crate::sim::GameState;

/// Values shown on the HUD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    pub coins: u32,
    pub lives: u32,
    pub world: &'static str,
    pub time: u32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            coins: state.coins,
            lives: state.lives,
            world: WORLD_LABEL,
            time: state.time,
        }
    }

    /// Score, zero padded to six digits
    pub fn score_text(&self) -> String {
        format!("{:06}", self.score)
    }

    pub fn coins_text(&self) -> String {
        format!("×{:02}", self.coins)
    }

    pub fn lives_text(&self) -> String {
        format!("×{:02}", self.lives)
    }

    pub fn time_text(&self) -> String {
        self.time.to_string()
    }

    /// Line shown on the game over screen
    pub fn final_score_text(&self) -> String {
        format!("SCORE: {}", self.score)
    }
}

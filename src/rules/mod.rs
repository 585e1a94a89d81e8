//! Rules: action dispatch, turn flow, end of game, and replay.
//!
//! The dispatch methods are inherent on `GameState` (see `engine`):
//! - `execute_action`: validate and apply one action
//! - `next_turn`: advance the seat and round counters
//! - `check_game_over`: finalize the game once the last round is set
//!
//! `replay` rebuilds a match from its seed and recorded actions.

pub mod engine;
pub mod replay;

pub use replay::replay;

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Seat with the strictly highest final score, earliest seat on ties.
    pub winner: PlayerId,
    /// Final scores in seat order.
    pub standings: Vec<(PlayerId, u32)>,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }

    /// Final score of one seat.
    #[must_use]
    pub fn points(&self, player: PlayerId) -> Option<u32> {
        self.standings
            .iter()
            .find(|(id, _)| *id == player)
            .map(|&(_, points)| points)
    }
}

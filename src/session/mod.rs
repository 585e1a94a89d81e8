//! Serialized action queue over one game.
//!
//! A `Session` owns its `GameState` and drains submissions one at a time,
//! so at most one mutation is ever in flight. It also owns the turn
//! bookkeeping the engine leaves to its caller:
//!
//! - a turn-ending action marks the seat's turn as taken
//! - once that seat has no pending discard, the end of game is checked
//!   and the turn advances
//!
//! `run_ai_match` drives every seat from a `DecisionPolicy`.

use std::collections::VecDeque;

use log::{debug, info, trace, warn};

use crate::ai::DecisionPolicy;
use crate::core::action::Action;
use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::GameResult;

/// Turn cap used by `run_ai_match` callers that have no preference.
pub const DEFAULT_MAX_TURNS: u32 = 1000;

/// Result of one drained submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub player: PlayerId,
    pub action: Action,
    pub result: Result<(), GameError>,
}

impl Outcome {
    /// Check if the action was applied.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }
}

/// One game plus its pending submissions.
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    queue: VecDeque<(PlayerId, Action)>,
    turn_action_taken: bool,
}

impl Session {
    /// Wrap an existing game.
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            queue: VecDeque::new(),
            turn_action_taken: false,
        }
    }

    /// Start a fresh game.
    pub fn start(config: GameConfig, seed: i64) -> Result<Self, GameError> {
        Ok(Self::new(GameState::with_config(config, seed)?))
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Give up the session and keep the game.
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Submissions not yet drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue an action. Nothing is applied until `drain`.
    pub fn submit(&mut self, player: PlayerId, action: Action) {
        self.queue.push_back((player, action));
    }

    /// Apply every queued submission in order.
    pub fn drain(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(self.queue.len());
        while let Some((player, action)) = self.queue.pop_front() {
            let result = self.apply(player, &action);
            outcomes.push(Outcome {
                player,
                action,
                result,
            });
        }
        outcomes
    }

    fn apply(&mut self, player: PlayerId, action: &Action) -> Result<(), GameError> {
        if let Err(err) = self.state.execute_action(player, action) {
            warn!("{} rejected {}: {}", player, action.name(), err);
            return Err(err);
        }
        debug!("{} played {}", player, action.name());

        if action.ends_turn() {
            self.turn_action_taken = true;
        }
        self.finish_turn(player);
        Ok(())
    }

    fn finish_turn(&mut self, player: PlayerId) {
        if !self.turn_action_taken {
            return;
        }
        let round = self.state.round;
        if !self.state.close_turn(player) {
            return;
        }
        if self.state.game_over {
            if let Some(winner) = self.state.winner {
                info!(
                    "game over in round {}: {} wins with {} points",
                    self.state.round,
                    winner,
                    self.state.final_points(winner)
                );
            }
            return;
        }

        self.turn_action_taken = false;
        trace!(
            "turn {} to {}",
            self.state.current_turn,
            self.state.current_player_id()
        );
        if self.state.round != round {
            trace!("round {} begins", self.state.round);
        }
    }

    /// Play automated turns until the game ends or `max_turns` have passed.
    ///
    /// A rejected choice falls back to settling the discard, or to Rest.
    /// Returns the result when the game finished.
    pub fn run_ai_match<P: DecisionPolicy + ?Sized>(
        &mut self,
        policy: &P,
        max_turns: u32,
    ) -> Option<GameResult> {
        // Each turn needs at most one action and one discard.
        let mut steps_left = max_turns.saturating_mul(2).saturating_add(2);

        while !self.state.game_over && self.state.current_turn < max_turns && steps_left > 0 {
            steps_left -= 1;
            let seat = self.state.current_player_id();
            let action = policy.choose_action(
                self.state.current_player(),
                &self.state.market,
                &self.state,
            );
            if self.apply(seat, &action).is_ok() {
                continue;
            }

            let fallback = {
                let player = self.state.current_player();
                if player.pending_discard > 0 {
                    Action::discard(player.cheapest_discard())
                } else {
                    Action::Rest
                }
            };
            warn!("{} falls back to {}", seat, fallback.name());
            if self.apply(seat, &fallback).is_err() {
                break;
            }
        }

        self.state.result()
    }
}

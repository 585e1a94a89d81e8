//! Rebuild a match from its seed and action log.
//!
//! `(config, seed, records)` fully determines a game: setup draws from the
//! seeded RNG and every later change comes from a recorded action.

use crate::core::action::ActionRecord;
use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::state::GameState;

/// Re-execute `records` on a fresh match.
///
/// Turns follow the same flow a `Session` uses: a turn-ending action
/// closes the turn once its seat has no pending discard. A record stamped
/// with a later turn first skips ahead to it.
///
/// ```
/// use golem_caravan::core::{Action, GameConfig, PlayerId};
/// use golem_caravan::rules::replay;
/// use golem_caravan::session::Session;
///
/// let mut live = Session::start(GameConfig::new(2), 42).unwrap();
/// live.submit(PlayerId::new(0), Action::Rest);
/// live.submit(PlayerId::new(1), Action::acquire(0));
/// live.drain();
///
/// let log: Vec<_> = live.state().history().iter().cloned().collect();
/// let rebuilt = replay(GameConfig::new(2), 42, &log).unwrap();
/// assert_eq!(&rebuilt, live.state());
/// ```
pub fn replay(
    config: GameConfig,
    seed: i64,
    records: &[ActionRecord],
) -> Result<GameState, GameError> {
    let mut state = GameState::with_config(config, seed)?;
    let mut turn_taken = false;
    for record in records {
        if state.current_turn < record.turn {
            turn_taken = false;
            while state.current_turn < record.turn {
                state.next_turn();
            }
        }
        state.execute_action(record.player, &record.action)?;

        turn_taken |= record.action.ends_turn();
        if turn_taken && state.close_turn(record.player) {
            turn_taken = false;
        }
    }
    Ok(state)
}

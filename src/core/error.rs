//! Typed failures returned by the rules engine.
//!
//! Every rejected call returns a `GameError` and leaves the game state
//! untouched. `GameError::kind` groups variants into four categories so
//! callers can choose a fallback without matching every variant.

use thiserror::Error;

use super::player::PlayerId;
use super::resources::Resources;
use crate::cards::CardId;

/// Broad failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad index, bounds, or payload shape.
    Validation,
    /// The player cannot pay.
    Affordability,
    /// Well-formed but against the rules right now.
    IllegalMove,
    /// The engine is not in a state that accepts the request.
    State,
}

/// A rejected engine call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    // === Validation ===
    #[error("player count must be 2-5, got {0}")]
    InvalidPlayerCount(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("{what} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("trade multiplier must be at least 1, got {0}")]
    InvalidMultiplier(u32),

    #[error("deposit position {0} is outside 1-5")]
    InvalidDepositPosition(usize),

    #[error("expected {expected} deposit crystals, got {got}")]
    DepositCountMismatch { expected: usize, got: usize },

    #[error("no deposit crystals supplied")]
    NothingToDeposit,

    #[error("exactly one collect position required, got {0}")]
    NoPositionSelected(usize),

    #[error("discard of {got} crystals does not match pending {expected}")]
    DiscardMismatch { expected: u32, got: u32 },

    // === Affordability ===
    #[error("insufficient crystals: need {required}, have {available}")]
    Insufficient {
        required: Resources,
        available: Resources,
    },

    // === Illegal moves ===
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("cannot upgrade {input} into {output} within {budget} levels")]
    IllegalUpgrade {
        input: Resources,
        output: Resources,
        budget: u32,
    },

    #[error("play arguments do not match the card's action")]
    WrongPlayArgs,

    #[error("{0} is not a playable action card")]
    NotPlayable(CardId),

    #[error("{0} is not a claimable point card")]
    NotClaimable(CardId),

    #[error("free acquisition needs deposits for all {required} earlier positions, got {supplied}")]
    MissingDeposits { required: usize, supplied: usize },

    #[error("caravan would hold {total} crystals, limit is {max}")]
    CapacityExceeded { total: u32, max: u32 },

    #[error("{0} crystals must be discarded first")]
    DiscardPending(u32),

    #[error("no discard is pending")]
    NoDiscardPending,

    #[error("a card must keep at least one deposit")]
    MustLeaveDeposit,

    #[error("no deposit at position {0}")]
    EmptyDepositPosition(u8),

    // === State ===
    #[error("game is over")]
    GameOver,

    #[error("{0} not found")]
    CardNotFound(CardId),
}

impl GameError {
    /// The taxonomy category of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            InvalidPlayerCount(_)
            | InvalidConfig(_)
            | IndexOutOfBounds { .. }
            | InvalidMultiplier(_)
            | InvalidDepositPosition(_)
            | DepositCountMismatch { .. }
            | NothingToDeposit
            | NoPositionSelected(_)
            | DiscardMismatch { .. } => ErrorKind::Validation,

            Insufficient { .. } => ErrorKind::Affordability,

            NotYourTurn(_)
            | IllegalUpgrade { .. }
            | WrongPlayArgs
            | NotPlayable(_)
            | NotClaimable(_)
            | MissingDeposits { .. }
            | CapacityExceeded { .. }
            | DiscardPending(_)
            | NoDiscardPending
            | MustLeaveDeposit
            | EmptyDepositPosition(_) => ErrorKind::IllegalMove,

            GameOver | CardNotFound(_) => ErrorKind::State,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(GameError::InvalidMultiplier(0).kind(), ErrorKind::Validation);
        assert_eq!(
            GameError::Insufficient {
                required: Resources::new(1, 0, 0, 0),
                available: Resources::empty(),
            }
            .kind(),
            ErrorKind::Affordability
        );
        assert_eq!(GameError::NotYourTurn(PlayerId::new(1)).kind(), ErrorKind::IllegalMove);
        assert_eq!(GameError::GameOver.kind(), ErrorKind::State);
    }

    #[test]
    fn test_messages() {
        let err = GameError::Insufficient {
            required: Resources::new(2, 0, 0, 0),
            available: Resources::new(1, 0, 0, 0),
        };
        assert_eq!(err.to_string(), "insufficient crystals: need 2 Yellow, have 1 Yellow");
        assert_eq!(
            GameError::NotYourTurn(PlayerId::new(1)).to_string(),
            "it is not Player 1's turn"
        );
    }
}

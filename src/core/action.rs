//! Player actions as a tagged union.
//!
//! Each variant carries only the payload its operation needs, so a
//! deposit can never arrive with a trade multiplier attached.
//!
//! Four actions end the turn (`PlayCard`, `AcquireCard`, `ClaimPointCard`,
//! `Rest`). The other four (`DiscardCrystals`, `DepositCrystals`,
//! `CollectCrystals`, `CollectAllCrystals`) are free bookkeeping moves the
//! active player may make around their turn-ending action.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::resources::{CrystalType, Resources};
use crate::cards::CardId;

/// Crystal list for deposits, one per market position.
pub type DepositList = SmallVec<[CrystalType; 4]>;

/// How an action card should be played.
///
/// Trade scales both sides by `multiplier`. Upgrade takes the absolute
/// crystals to convert and is never scaled.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayArgs {
    Produce,
    Trade { multiplier: u32 },
    Upgrade { input: Resources, output: Resources },
}

/// A complete player action.
///
/// ```
/// use golem_caravan::cards::CardId;
/// use golem_caravan::core::{Action, CrystalType};
///
/// let buy = Action::acquire_free(2, [CrystalType::Yellow, CrystalType::Yellow]);
/// assert!(buy.ends_turn());
/// assert!(!Action::collect_all(CardId(0)).ends_turn());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Play the hand card at `hand_index`.
    PlayCard { hand_index: usize, args: PlayArgs },

    /// Take the action card at market `position`.
    ///
    /// `deposits` is empty to pay the position cost, or holds exactly one
    /// crystal per earlier position to take the card free.
    AcquireCard {
        position: usize,
        deposits: DepositList,
    },

    /// Claim the golem at market `position`.
    ClaimPointCard { position: usize },

    /// Return played cards to hand.
    Rest,

    /// Settle a pending discard.
    DiscardCrystals { discard: Resources },

    /// Leave one crystal on each market card before `target`.
    DepositCrystals {
        target: usize,
        crystals: DepositList,
    },

    /// Take back the oldest crystal at one deposit position of `card`.
    CollectCrystals {
        card: CardId,
        positions: SmallVec<[u8; 2]>,
    },

    /// Take back every deposit on `card` except one.
    CollectAllCrystals { card: CardId },
}

impl Action {
    /// Play a hand card.
    #[must_use]
    pub fn play(hand_index: usize, args: PlayArgs) -> Self {
        Action::PlayCard { hand_index, args }
    }

    /// Buy the action card at `position` at its position cost.
    #[must_use]
    pub fn acquire(position: usize) -> Self {
        Action::AcquireCard {
            position,
            deposits: SmallVec::new(),
        }
    }

    /// Take the action card at `position` free by depositing on every
    /// earlier card.
    #[must_use]
    pub fn acquire_free(position: usize, deposits: impl IntoIterator<Item = CrystalType>) -> Self {
        Action::AcquireCard {
            position,
            deposits: deposits.into_iter().collect(),
        }
    }

    /// Claim the golem at `position`.
    #[must_use]
    pub fn claim(position: usize) -> Self {
        Action::ClaimPointCard { position }
    }

    /// Deposit toward `target`.
    #[must_use]
    pub fn deposit(target: usize, crystals: impl IntoIterator<Item = CrystalType>) -> Self {
        Action::DepositCrystals {
            target,
            crystals: crystals.into_iter().collect(),
        }
    }

    /// Collect the oldest crystal at `position` on `card`.
    #[must_use]
    pub fn collect(card: CardId, position: u8) -> Self {
        let mut positions = SmallVec::new();
        positions.push(position);
        Action::CollectCrystals { card, positions }
    }

    /// Collect all but one deposit from `card`.
    #[must_use]
    pub fn collect_all(card: CardId) -> Self {
        Action::CollectAllCrystals { card }
    }

    /// Settle a pending discard.
    #[must_use]
    pub fn discard(discard: Resources) -> Self {
        Action::DiscardCrystals { discard }
    }

    /// Whether a successful execution of this action ends the turn.
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(
            self,
            Action::PlayCard { .. }
                | Action::AcquireCard { .. }
                | Action::ClaimPointCard { .. }
                | Action::Rest
        )
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "play_card",
            Action::AcquireCard { .. } => "acquire_card",
            Action::ClaimPointCard { .. } => "claim_point_card",
            Action::Rest => "rest",
            Action::DiscardCrystals { .. } => "discard_crystals",
            Action::DepositCrystals { .. } => "deposit_crystals",
            Action::CollectCrystals { .. } => "collect_crystals",
            Action::CollectAllCrystals { .. } => "collect_all_crystals",
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay from an event log
/// - Debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn counter when the action was taken.
    pub turn: u32,

    /// Round when the action was taken.
    pub round: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, round: u32) -> Self {
        Self {
            player,
            action,
            turn,
            round,
        }
    }
}

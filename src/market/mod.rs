//! The shared card supply.
//!
//! ## Layout
//!
//! - Two face-down decks (action cards, golems), drawn from the front
//! - Two visible rows capped at `max_visible`, refilled after every removal
//! - Two coin stacks: bronze pays out at golem position 0, silver at 1
//!
//! Action-row slots carry the deposit ledger of the card they hold. A
//! card's deposits only exist while it sits in the row.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Deposits, MAX_DEPOSIT_POSITION};
use crate::core::error::GameError;
use crate::core::resources::{CrystalType, Resources};
use crate::core::rng::GameRng;

/// A visible action card and the crystals deposited on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSlot {
    pub card: CardId,
    pub deposits: Deposits,
}

impl MarketSlot {
    fn new(card: CardId) -> Self {
        Self {
            card,
            deposits: Deposits::new(),
        }
    }
}

/// A stack of identical bonus tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinStack {
    pub card: CardId,
    pub amount: u32,
}

/// The market.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    action_cards: Vec<MarketSlot>,
    point_cards: Vec<CardId>,
    action_deck: im::Vector<CardId>,
    point_deck: im::Vector<CardId>,
    coins: Vec<CoinStack>,
    max_visible: usize,
}

impl Market {
    /// Shuffle both decks with the match RNG and deal the visible rows.
    pub fn new(
        mut action_cards: Vec<CardId>,
        mut point_cards: Vec<CardId>,
        coins: Vec<CoinStack>,
        max_visible: usize,
        rng: &mut GameRng,
    ) -> Self {
        rng.shuffle(&mut action_cards);
        rng.shuffle(&mut point_cards);

        let mut market = Self {
            action_cards: Vec::with_capacity(max_visible),
            point_cards: Vec::with_capacity(max_visible),
            action_deck: action_cards.into_iter().collect(),
            point_deck: point_cards.into_iter().collect(),
            coins,
            max_visible,
        };
        market.refill_action_cards();
        market.refill_point_cards();
        market
    }

    /// Top up the action row from the deck.
    pub fn refill_action_cards(&mut self) {
        while self.action_cards.len() < self.max_visible {
            match self.action_deck.pop_front() {
                Some(card) => self.action_cards.push(MarketSlot::new(card)),
                None => break,
            }
        }
    }

    /// Top up the golem row from the deck.
    pub fn refill_point_cards(&mut self) {
        while self.point_cards.len() < self.max_visible {
            match self.point_deck.pop_front() {
                Some(card) => self.point_cards.push(card),
                None => break,
            }
        }
    }

    /// Price of the action card at `position`.
    ///
    /// Free at 0, then 1 and 2 Yellow, then 1 and 2 Green, then one more
    /// Green per step beyond.
    #[must_use]
    pub fn action_card_cost(position: usize) -> Resources {
        match position {
            0 => Resources::empty(),
            1 => Resources::of(CrystalType::Yellow, 1),
            2 => Resources::of(CrystalType::Yellow, 2),
            3 => Resources::of(CrystalType::Green, 1),
            4 => Resources::of(CrystalType::Green, 2),
            n => Resources::of(CrystalType::Green, n as u32 - 1),
        }
    }

    /// Price of the visible action card at `position`, bounds-checked.
    pub fn cost_at(&self, position: usize) -> Result<Resources, GameError> {
        self.action_slot(position)?;
        Ok(Self::action_card_cost(position))
    }

    /// The action-row slot at `position`.
    pub fn action_slot(&self, position: usize) -> Result<&MarketSlot, GameError> {
        self.action_cards
            .get(position)
            .ok_or(GameError::IndexOutOfBounds {
                what: "action market",
                index: position,
                len: self.action_cards.len(),
            })
    }

    /// Mutable action-row slot holding `card`.
    pub fn slot_for_card_mut(&mut self, card: CardId) -> Result<&mut MarketSlot, GameError> {
        self.action_cards
            .iter_mut()
            .find(|slot| slot.card == card)
            .ok_or(GameError::CardNotFound(card))
    }

    /// The golem at `position`.
    pub fn point_card(&self, position: usize) -> Result<CardId, GameError> {
        self.point_cards
            .get(position)
            .copied()
            .ok_or(GameError::IndexOutOfBounds {
                what: "point market",
                index: position,
                len: self.point_cards.len(),
            })
    }

    /// Remove the action card at `position` and refill the row.
    ///
    /// The returned slot still carries the card's deposits.
    pub fn acquire_action_card(&mut self, position: usize) -> Result<MarketSlot, GameError> {
        self.action_slot(position)?;
        let slot = self.action_cards.remove(position);
        self.refill_action_cards();
        Ok(slot)
    }

    /// Remove the golem at `position` and refill the row.
    pub fn acquire_point_card(&mut self, position: usize) -> Result<CardId, GameError> {
        let card = self.point_card(position)?;
        self.point_cards.remove(position);
        self.refill_point_cards();
        Ok(card)
    }

    /// Take a token from the coin stack paired with golem `position`.
    ///
    /// Only positions 0 and 1 pay out, and only while the stack lasts.
    pub fn award_coin(&mut self, position: usize) -> Option<CardId> {
        if position > 1 {
            return None;
        }
        let stack = self.coins.get_mut(position)?;
        if stack.amount == 0 {
            return None;
        }
        stack.amount -= 1;
        Some(stack.card)
    }

    /// Check a deposit list aimed at the action card at `target`.
    ///
    /// One crystal per earlier card is required. Returns the crystals as a
    /// multiset so the caller can check affordability.
    pub fn validate_deposits(
        &self,
        target: usize,
        crystals: &[CrystalType],
    ) -> Result<Resources, GameError> {
        self.action_slot(target)?;
        if crystals.is_empty() {
            return Err(GameError::NothingToDeposit);
        }
        if target > MAX_DEPOSIT_POSITION as usize {
            return Err(GameError::InvalidDepositPosition(target));
        }
        if crystals.len() != target {
            return Err(GameError::DepositCountMismatch {
                expected: target,
                got: crystals.len(),
            });
        }
        Ok(Resources::from_crystals(crystals.iter().copied()))
    }

    /// Place `crystals[i]` on the card at row index `i`, position `i + 1`.
    ///
    /// Call `validate_deposits` first; this only fails on a list the
    /// validation would have rejected.
    pub fn place_deposits(&mut self, crystals: &[CrystalType]) -> Result<(), GameError> {
        let len = self.action_cards.len();
        for (index, &crystal) in crystals.iter().enumerate() {
            let slot = self
                .action_cards
                .get_mut(index)
                .ok_or(GameError::IndexOutOfBounds {
                    what: "action market",
                    index,
                    len,
                })?;
            slot.deposits.push(index as u8 + 1, crystal)?;
        }
        Ok(())
    }

    /// Visible action row.
    #[must_use]
    pub fn action_cards(&self) -> &[MarketSlot] {
        &self.action_cards
    }

    /// Visible golem row.
    #[must_use]
    pub fn point_cards(&self) -> &[CardId] {
        &self.point_cards
    }

    /// Coin stacks, bronze first.
    #[must_use]
    pub fn coins(&self) -> &[CoinStack] {
        &self.coins
    }

    /// Cards left in the action deck.
    #[must_use]
    pub fn action_deck_len(&self) -> usize {
        self.action_deck.len()
    }

    /// Cards left in the golem deck.
    #[must_use]
    pub fn point_deck_len(&self) -> usize {
        self.point_deck.len()
    }

    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }
}

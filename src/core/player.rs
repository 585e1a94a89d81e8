//! Seats, per-seat storage, and per-seat mutable state.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seat 0 acts first; the active seat on turn `t`
//! is `t mod player_count`.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//!
//! ## Player
//!
//! A seat's caravan, hand, played cards, claimed golems and coins.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::action::PlayArgs;
use super::error::GameError;
use super::resources::{CrystalType, Resources};
use crate::cards::{CardArena, CardId};

/// Number of claimed point cards that triggers the last round.
pub const LAST_ROUND_POINT_CARDS: usize = 5;

/// Seat identifier. Seat indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use golem_caravan::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use golem_caravan::core::{PlayerId, PlayerMap};
///
/// let mut crystals: PlayerMap<u32> = PlayerMap::new(3, |_| 3);
/// crystals[PlayerId::new(1)] = 4;
/// assert_eq!(crystals[PlayerId::new(1)], 4);
/// assert_eq!(crystals.player_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Wrap per-seat values already in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seat IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Mutable state of one seat.
///
/// Cards are held as `CardId` handles into the game's `CardArena`; the
/// collection a handle sits in is the card's location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Table label assigned by the setup shuffle (1-based).
    pub id: u8,
    pub name: String,
    pub resources: Resources,
    /// Unplayed and newly acquired action cards.
    pub hand: Vec<CardId>,
    /// Cards played since the last rest.
    pub played_cards: Vec<CardId>,
    /// Claimed golems. Permanent.
    pub point_cards: Vec<CardId>,
    /// Bonus tokens, one handle per token. Permanent.
    pub coins: Vec<CardId>,
    pub has_rested: bool,
    /// Crystals owed back to the pool before this seat may act again.
    pub pending_discard: u32,
}

impl Player {
    /// Create a seat with starting crystals and an empty hand.
    pub fn new(id: u8, name: impl Into<String>, resources: Resources) -> Self {
        Self {
            id,
            name: name.into(),
            resources,
            hand: Vec::new(),
            played_cards: Vec::new(),
            point_cards: Vec::new(),
            coins: Vec::new(),
            has_rested: false,
            pending_discard: 0,
        }
    }

    /// Put a card into the hand.
    pub fn add_card(&mut self, card: CardId) {
        self.hand.push(card);
    }

    /// Play the hand card at `hand_index`.
    ///
    /// All-or-nothing: on error neither the hand nor the caravan changes.
    pub fn play_card(
        &mut self,
        cards: &CardArena,
        hand_index: usize,
        args: &PlayArgs,
    ) -> Result<(), GameError> {
        let card_id = *self.hand.get(hand_index).ok_or(GameError::IndexOutOfBounds {
            what: "hand",
            index: hand_index,
            len: self.hand.len(),
        })?;
        cards.get(card_id)?.play(&mut self.resources, args)?;

        self.hand.remove(hand_index);
        self.played_cards.push(card_id);
        Ok(())
    }

    /// Return every played card to the hand and mark the seat as rested.
    pub fn rest(&mut self) {
        self.hand.append(&mut self.played_cards);
        self.has_rested = true;
    }

    /// Pay a golem's requirement and keep it.
    pub fn claim_point_card(&mut self, cards: &CardArena, card_id: CardId) -> Result<(), GameError> {
        cards.get(card_id)?.claim(&mut self.resources)?;
        self.point_cards.push(card_id);
        Ok(())
    }

    /// Index of the first card in `candidates` this seat can claim.
    #[must_use]
    pub fn first_claimable(&self, cards: &CardArena, candidates: &[CardId]) -> Option<usize> {
        candidates.iter().position(|&id| {
            cards
                .get(id)
                .map_or(false, |card| card.can_claim(&self.resources).is_ok())
        })
    }

    /// Whether this seat has claimed enough golems to trigger the last round.
    #[must_use]
    pub fn check_last_round(&self) -> bool {
        self.point_cards.len() >= LAST_ROUND_POINT_CARDS
    }

    /// Points from golems and coins.
    #[must_use]
    pub fn points(&self, cards: &CardArena) -> u32 {
        self.point_cards
            .iter()
            .chain(self.coins.iter())
            .filter_map(|&id| cards.get(id).ok())
            .map(|card| card.points())
            .sum()
    }

    /// Final score: golems, coins, and one per non-Yellow crystal.
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn final_points(&self, cards: &CardArena) -> u32 {
        self.points(cards) + self.resources.final_score_contribution()
    }

    /// Record any excess over `max_crystals` as a pending discard.
    pub fn enforce_capacity(&mut self, max_crystals: u32) {
        let total = self.resources.total();
        if total > max_crystals {
            self.pending_discard = total - max_crystals;
        }
    }

    /// Return exactly the pending number of crystals to the pool.
    pub fn discard(&mut self, discard: &Resources) -> Result<(), GameError> {
        if self.pending_discard == 0 {
            return Err(GameError::NoDiscardPending);
        }
        if !self.resources.has_all(discard, 1) {
            return Err(GameError::Insufficient {
                required: *discard,
                available: self.resources,
            });
        }
        if discard.total() != self.pending_discard {
            return Err(GameError::DiscardMismatch {
                expected: self.pending_discard,
                got: discard.total(),
            });
        }
        self.resources.subtract_all(discard, 1)?;
        self.pending_discard = 0;
        Ok(())
    }

    /// The cheapest crystals that would settle the pending discard.
    #[must_use]
    pub fn cheapest_discard(&self) -> Resources {
        Resources::from_crystals(
            self.resources
                .crystals()
                .take(self.pending_discard as usize)
                .collect::<Vec<CrystalType>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::cards::catalog::parse_card;

    fn arena_with(names: &[&str]) -> (CardArena, Vec<CardId>) {
        let mut arena = CardArena::new();
        let ids = names
            .iter()
            .map(|name| arena.register(*name, parse_card(name).unwrap()))
            .collect();
        (arena, ids)
    }

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
        assert_eq!(PlayerId::all(4).count(), 4);
    }

    #[test]
    fn test_player_map() {
        let mut map: PlayerMap<u32> = PlayerMap::new(3, |p| p.index() as u32 * 10);
        assert_eq!(map[PlayerId::new(2)], 20);

        map[PlayerId::new(0)] = 5;
        let pairs: Vec<_> = map.iter().map(|(p, v)| (p.0, *v)).collect();
        assert_eq!(pairs, vec![(0, 5), (1, 10), (2, 20)]);

        assert!(map.get(PlayerId::new(3)).is_none());
    }

    #[test]
    fn test_play_produce_moves_card() {
        let (arena, ids) = arena_with(&["mint_0002"]);
        let mut player = Player::new(1, "P1", Resources::empty());
        player.add_card(ids[0]);

        player.play_card(&arena, 0, &PlayArgs::Produce).unwrap();

        assert_eq!(player.resources, Resources::new(2, 0, 0, 0));
        assert!(player.hand.is_empty());
        assert_eq!(player.played_cards, vec![ids[0]]);
    }

    #[test]
    fn test_failed_play_changes_nothing() {
        let (arena, ids) = arena_with(&["trade_0002_0100"]);
        let mut player = Player::new(1, "P1", Resources::new(1, 0, 0, 0));
        player.add_card(ids[0]);
        let before = player.clone();

        let err = player
            .play_card(&arena, 0, &PlayArgs::Trade { multiplier: 1 })
            .unwrap_err();
        assert!(matches!(err, GameError::Insufficient { .. }));
        assert_eq!(player, before);

        let err = player.play_card(&arena, 3, &PlayArgs::Produce).unwrap_err();
        assert!(matches!(err, GameError::IndexOutOfBounds { .. }));
        assert_eq!(player, before);
    }

    #[test]
    fn test_rest_returns_played_cards() {
        let (arena, ids) = arena_with(&["mint_0002", "mint_0003"]);
        let mut player = Player::new(1, "P1", Resources::empty());
        player.add_card(ids[0]);
        player.add_card(ids[1]);

        player.play_card(&arena, 0, &PlayArgs::Produce).unwrap();
        player.play_card(&arena, 0, &PlayArgs::Produce).unwrap();
        let crystals = player.resources;

        player.rest();

        assert_eq!(player.hand.len(), 2);
        assert!(player.played_cards.is_empty());
        assert!(player.has_rested);
        assert_eq!(player.resources, crystals);
    }

    #[test]
    fn test_claim_and_points() {
        let (arena, ids) = arena_with(&["golem_0022", "coin_3"]);
        let mut player = Player::new(1, "P1", Resources::new(2, 3, 0, 0));

        assert_eq!(player.first_claimable(&arena, &ids[..1]), Some(0));
        player.claim_point_card(&arena, ids[0]).unwrap();
        player.coins.push(ids[1]);

        assert_eq!(player.resources, Resources::new(0, 1, 0, 0));
        let golem_points = match &arena.get(ids[0]).unwrap().kind {
            CardKind::Point(point) => point.points,
            _ => unreachable!(),
        };
        assert_eq!(player.points(&arena), golem_points + 3);
        assert_eq!(player.final_points(&arena), golem_points + 3 + 1);
    }

    #[test]
    fn test_last_round_threshold() {
        let (_, ids) = arena_with(&["golem_0022"]);
        let mut player = Player::new(1, "P1", Resources::empty());
        for _ in 0..4 {
            player.point_cards.push(ids[0]);
        }
        assert!(!player.check_last_round());
        player.point_cards.push(ids[0]);
        assert!(player.check_last_round());
    }

    #[test]
    fn test_capacity_and_discard() {
        let mut player = Player::new(1, "P1", Resources::new(9, 3, 0, 0));
        player.enforce_capacity(10);
        assert_eq!(player.pending_discard, 2);
        assert_eq!(player.cheapest_discard(), Resources::new(2, 0, 0, 0));

        let err = player.discard(&Resources::new(1, 0, 0, 0)).unwrap_err();
        assert_eq!(err, GameError::DiscardMismatch { expected: 2, got: 1 });

        player.discard(&Resources::new(1, 1, 0, 0)).unwrap();
        assert_eq!(player.pending_discard, 0);
        assert_eq!(player.resources, Resources::new(8, 2, 0, 0));

        assert_eq!(player.discard(&Resources::empty()), Err(GameError::NoDiscardPending));
    }

    #[test]
    fn test_discard_checks_holdings_first() {
        let mut player = Player::new(1, "P1", Resources::new(11, 0, 0, 0));
        player.enforce_capacity(10);
        assert_eq!(player.pending_discard, 1);

        let oversized = Resources::new(u32::MAX, 2, 0, 0);
        assert!(matches!(
            player.discard(&oversized),
            Err(GameError::Insufficient { .. })
        ));
        assert_eq!(player.pending_discard, 1);
        assert_eq!(player.resources, Resources::new(11, 0, 0, 0));
    }
}

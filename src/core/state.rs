//! Game state: the single authoritative record of a match.
//!
//! ## GameState
//!
//! Owns the seats, the market, the card arena, the turn counters and the
//! match RNG. It changes only through the dispatch methods in
//! `crate::rules` (`execute_action`, `next_turn`, `check_game_over`).
//!
//! Uses `im` persistent structures for the arena, decks and history so a
//! clone (for an AI lookahead or a pre-action checkpoint) is cheap.
//!
//! ## Setup
//!
//! Seat labels are shuffled once with the match RNG; seat order is fixed
//! from then on. Starting crystals go by seat position, and every seat
//! gets the starting hand from `catalog::STARTING_CARDS`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::GameConfig;
use super::error::GameError;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use super::snapshot::GameSnapshot;
use crate::cards::catalog::{
    self, ACTION_CARDS, BACKGROUND_CARDS, COIN_CARDS, POINT_CARDS, STARTING_CARDS, STONE_CARDS,
};
use crate::cards::{CardArena, CardId};
use crate::market::{CoinStack, Market};

/// Complete match state.
///
/// ```
/// use golem_caravan::core::{GameState, PlayerId};
///
/// let state = GameState::new(2, 42).unwrap();
/// assert_eq!(state.current_player_id(), PlayerId::new(0));
/// assert_eq!(state.market.action_cards().len(), 5);
/// assert_eq!(state.round, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) cards: CardArena,

    /// Seats in turn order.
    pub players: PlayerMap<Player>,
    pub market: Market,

    /// Monotonic turn counter; the active seat is `current_turn mod N`.
    pub current_turn: u32,
    /// Starts at 1 and increments each time every seat has had a turn.
    pub round: u32,

    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// Set once a seat holds five golems.
    pub last_round: bool,

    pub(crate) rng: GameRng,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a match with default rules for `num_players` seats.
    pub fn new(num_players: usize, seed: i64) -> Result<Self, GameError> {
        Self::with_config(GameConfig::new(num_players), seed)
    }

    /// Create a match with explicit rules.
    pub fn with_config(config: GameConfig, seed: i64) -> Result<Self, GameError> {
        config.validate()?;

        // Signed seeds map bijectively onto the generator's seed space.
        let mut rng = GameRng::new(seed as u64);
        let mut cards = CardArena::new();

        let mut labels: Vec<u8> = (1..=config.player_count as u8).collect();
        rng.shuffle(&mut labels);

        let players: Vec<Player> = labels
            .iter()
            .enumerate()
            .map(|(seat, &label)| {
                let mut player = Player::new(
                    label,
                    format!("Player {}", label),
                    GameConfig::starting_resources(seat),
                );
                for id in register_all(&mut cards, STARTING_CARDS) {
                    player.add_card(id);
                }
                player
            })
            .collect();

        let action_deck = register_all(&mut cards, ACTION_CARDS);
        let point_deck = register_all(&mut cards, POINT_CARDS);
        let coins = register_all(&mut cards, COIN_CARDS)
            .into_iter()
            .map(|card| CoinStack {
                card,
                amount: config.coins_per_stack(),
            })
            .collect();
        register_all(&mut cards, STONE_CARDS);
        register_all(&mut cards, BACKGROUND_CARDS);

        let market = Market::new(action_deck, point_deck, coins, config.max_visible, &mut rng);

        log::debug!(
            "new game: {} players, seed {}, {} cards registered, seat labels {:?}",
            config.player_count,
            seed,
            cards.len(),
            labels
        );

        Ok(Self {
            config,
            cards,
            players: PlayerMap::from_vec(players),
            market,
            current_turn: 0,
            round: 1,
            game_over: false,
            winner: None,
            last_round: false,
            rng,
            history: Vector::new(),
        })
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        PlayerId::new((self.current_turn as usize % self.player_count()) as u8)
    }

    /// State of the seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_id()]
    }

    /// State of one seat.
    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::IndexOutOfBounds {
            what: "player",
            index: id.index(),
            len: self.player_count(),
        })
    }

    /// The card arena.
    #[must_use]
    pub fn cards(&self) -> &CardArena {
        &self.cards
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The seed the match was created with.
    #[must_use]
    pub fn seed(&self) -> i64 {
        self.rng.seed() as i64
    }

    /// Every successful action so far, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Final points of one seat, recomputed.
    #[must_use]
    pub fn final_points(&self, id: PlayerId) -> u32 {
        self.players
            .get(id)
            .map_or(0, |player| player.final_points(&self.cards))
    }

    /// Client-facing view of the whole table.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

fn register_all(cards: &mut CardArena, names: &[&str]) -> Vec<CardId> {
    names
        .iter()
        .filter_map(|&name| catalog::parse_card(name).map(|kind| cards.register(name, kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::Resources;

    #[test]
    fn test_rejects_bad_player_counts() {
        assert_eq!(GameState::new(1, 0), Err(GameError::InvalidPlayerCount(1)));
        assert_eq!(GameState::new(6, 0), Err(GameError::InvalidPlayerCount(6)));
        let empty_row = GameConfig::new(2).with_max_visible(0);
        assert!(matches!(
            GameState::with_config(empty_row, 0),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(3, 42).unwrap();

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.current_turn, 0);
        assert_eq!(state.round, 1);
        assert!(!state.game_over);
        assert!(!state.last_round);
        assert!(state.winner.is_none());
        assert!(state.history().is_empty());

        for (_, player) in state.players.iter() {
            assert_eq!(player.hand.len(), 2);
            assert!(player.played_cards.is_empty());
            assert_eq!(player.pending_discard, 0);
        }
    }

    #[test]
    fn test_starting_crystals_by_seat() {
        let state = GameState::new(5, 7).unwrap();
        let crystals: Vec<Resources> = state.players.iter().map(|(_, p)| p.resources).collect();
        assert_eq!(
            crystals,
            vec![
                Resources::new(3, 0, 0, 0),
                Resources::new(4, 0, 0, 0),
                Resources::new(4, 0, 0, 0),
                Resources::new(3, 1, 0, 0),
                Resources::new(3, 1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_seat_labels_are_a_permutation() {
        let state = GameState::new(4, 99).unwrap();
        let mut labels: Vec<u8> = state.players.iter().map(|(_, p)| p.id).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_starting_hands_are_distinct_cards() {
        let state = GameState::new(2, 1).unwrap();
        let a = &state.players[PlayerId::new(0)].hand;
        let b = &state.players[PlayerId::new(1)].hand;
        assert!(a.iter().all(|id| !b.contains(id)));
        assert_eq!(state.cards().get(a[0]).unwrap().name, "mint_0002");
        assert_eq!(state.cards().get(a[1]).unwrap().name, "upgrade_2");
    }

    #[test]
    fn test_same_seed_same_setup() {
        let a = GameState::new(4, -12).unwrap();
        let b = GameState::new(4, -12).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed(), -12);

        let c = GameState::new(4, 13).unwrap();
        assert_ne!(a.market, c.market);
    }

    #[test]
    fn test_coin_stacks() {
        let state = GameState::new(3, 5).unwrap();
        let coins = state.market.coins();
        assert_eq!(coins.len(), 2);
        assert_eq!(state.cards().get(coins[0].card).unwrap().points(), 3);
        assert_eq!(state.cards().get(coins[1].card).unwrap().points(), 1);
        assert!(coins.iter().all(|c| c.amount == 6));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(2).with_max_visible(3).with_coin_stack_size(1);
        let state = GameState::with_config(config, 42).unwrap();
        assert_eq!(state.market.action_cards().len(), 3);
        assert_eq!(state.market.point_cards().len(), 3);
        assert_eq!(state.market.coins()[0].amount, 1);
    }

    #[test]
    fn test_serde_roundtrip() {
        let state = GameState::new(2, 42).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}

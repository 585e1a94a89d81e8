//! Client-facing views of a match.
//!
//! A `GameSnapshot` resolves every card handle into full card data so a
//! transport layer can serialize it without access to the arena. It is a
//! read-only copy; nothing in it feeds back into the engine.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::resources::Resources;
use super::state::GameState;
use crate::cards::catalog::{BACKGROUND_CARDS, STONE_CARDS};
use crate::cards::{Card, CardArena, CardId, Deposits};
use crate::market::Market;

/// One seat as clients see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: PlayerId,
    pub id: u8,
    pub name: String,
    pub resources: Resources,
    pub hand: Vec<Card>,
    pub played_cards: Vec<Card>,
    pub point_cards: Vec<Card>,
    pub coins: Vec<Card>,
    pub has_rested: bool,
    pub pending_discard: u32,
    pub points: u32,
}

/// A visible action card with its position cost and deposits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCardView {
    pub card: Card,
    pub cost: Resources,
    pub deposits: Deposits,
}

/// A coin stack with its token card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinView {
    pub card: Card,
    pub amount: u32,
}

/// The market as clients see it. Deck contents stay hidden.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketView {
    pub action_cards: Vec<MarketCardView>,
    pub point_cards: Vec<Card>,
    pub action_deck_size: usize,
    pub point_deck_size: usize,
    pub coins: Vec<CoinView>,
}

/// Full client-visible state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerView>,
    pub market: MarketView,
    pub round: u32,
    pub current_turn: u32,
    pub current_player: PlayerId,
    pub game_over: bool,
    pub last_round: bool,
    pub winner: Option<PlayerId>,
    /// Stone and background cards, in catalog order.
    pub artwork: Vec<Card>,
}

impl GameSnapshot {
    pub(crate) fn capture(state: &GameState) -> Self {
        let cards = state.cards();
        let players = state
            .players
            .iter()
            .map(|(seat, player)| PlayerView {
                seat,
                id: player.id,
                name: player.name.clone(),
                resources: player.resources,
                hand: resolve(cards, &player.hand),
                played_cards: resolve(cards, &player.played_cards),
                point_cards: resolve(cards, &player.point_cards),
                coins: resolve(cards, &player.coins),
                has_rested: player.has_rested,
                pending_discard: player.pending_discard,
                points: player.final_points(cards),
            })
            .collect();

        Self {
            players,
            market: MarketView::capture(&state.market, cards),
            round: state.round,
            current_turn: state.current_turn,
            current_player: state.current_player_id(),
            game_over: state.game_over,
            last_round: state.last_round,
            winner: state.winner,
            artwork: STONE_CARDS
                .iter()
                .chain(BACKGROUND_CARDS)
                .filter_map(|name| cards.get(cards.find_by_name(name)?).ok().cloned())
                .collect(),
        }
    }

    /// View of one seat.
    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&PlayerView> {
        self.players.get(seat.index())
    }
}

impl MarketView {
    fn capture(market: &Market, cards: &CardArena) -> Self {
        let action_cards = market
            .action_cards()
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| {
                let card = cards.get(slot.card).ok()?.clone();
                Some(MarketCardView {
                    card,
                    cost: Market::action_card_cost(position),
                    deposits: slot.deposits.clone(),
                })
            })
            .collect();
        let coins = market
            .coins()
            .iter()
            .filter_map(|stack| {
                let card = cards.get(stack.card).ok()?.clone();
                Some(CoinView {
                    card,
                    amount: stack.amount,
                })
            })
            .collect();

        Self {
            action_cards,
            point_cards: resolve(cards, market.point_cards()),
            action_deck_size: market.action_deck_len(),
            point_deck_size: market.point_deck_len(),
            coins,
        }
    }
}

fn resolve(cards: &CardArena, ids: &[CardId]) -> Vec<Card> {
    ids.iter()
        .filter_map(|&id| cards.get(id).ok().cloned())
        .collect()
}

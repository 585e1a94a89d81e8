//! Decision policies for automated seats.
//!
//! Policies are trait-based so a session can plug in any strategy:
//! - `DecisionPolicy`: propose one action for the seat to move
//! - `PriorityPolicy`: fixed-priority reference strategy
//!
//! A policy reads the state and never mutates it. The engine never calls
//! a policy itself; the caller does.

use crate::cards::{ActionEffect, CardArena};
use crate::core::action::{Action, PlayArgs};
use crate::core::player::Player;
use crate::core::resources::{CrystalType, Resources};
use crate::core::state::GameState;
use crate::market::Market;

/// Proposes an action for the seat to move.
pub trait DecisionPolicy {
    /// Choose an action for `player`, the seat whose turn it is.
    fn choose_action(&self, player: &Player, market: &Market, state: &GameState) -> Action;
}

/// Single-crystal upgrade templates: (from, to).
const UPGRADE_TEMPLATES: [(CrystalType, CrystalType); 6] = [
    (CrystalType::Yellow, CrystalType::Pink),
    (CrystalType::Yellow, CrystalType::Blue),
    (CrystalType::Green, CrystalType::Pink),
    (CrystalType::Yellow, CrystalType::Green),
    (CrystalType::Green, CrystalType::Blue),
    (CrystalType::Blue, CrystalType::Pink),
];

/// Fixed-priority reference strategy.
///
/// 1. Settle a pending discard with the lowest crystals
/// 2. Claim the first affordable golem in market order
/// 3. Play a hand card: Produce, then Upgrade, then Trade at the largest
///    affordable multiplier
/// 4. Acquire the cheapest affordable action card that fits the caravan
/// 5. Rest
///
/// No lookahead. Deterministic given the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityPolicy;

impl DecisionPolicy for PriorityPolicy {
    fn choose_action(&self, player: &Player, market: &Market, state: &GameState) -> Action {
        if player.pending_discard > 0 {
            return Action::discard(player.cheapest_discard());
        }

        let cards = state.cards();
        if let Some(position) = player.first_claimable(cards, market.point_cards()) {
            return Action::claim(position);
        }

        if let Some(action) = self.find_playable(player, cards) {
            return action;
        }

        if let Some(position) = self.find_affordable(player, market, state.config().max_crystals) {
            return Action::acquire(position);
        }

        Action::Rest
    }
}

impl PriorityPolicy {
    fn find_playable(&self, player: &Player, cards: &CardArena) -> Option<Action> {
        let effects: Vec<(usize, ActionEffect)> = player
            .hand
            .iter()
            .enumerate()
            .filter_map(|(i, &id)| {
                let card = cards.get(id).ok()?;
                Some((i, card.as_action()?.effect))
            })
            .collect();
        let playable = |i: usize, args: &PlayArgs| {
            player
                .hand
                .get(i)
                .and_then(|&id| cards.get(id).ok())
                .map_or(false, |card| card.can_play(&player.resources, args).is_ok())
        };

        for &(i, effect) in &effects {
            if let ActionEffect::Produce { .. } = effect {
                if playable(i, &PlayArgs::Produce) {
                    return Some(Action::play(i, PlayArgs::Produce));
                }
            }
        }

        for &(i, effect) in &effects {
            if let ActionEffect::Upgrade { turn_upgrade } = effect {
                if let Some(args) = upgrade_args(&player.resources, turn_upgrade) {
                    if playable(i, &args) {
                        return Some(Action::play(i, args));
                    }
                }
            }
        }

        for &(i, effect) in &effects {
            if let ActionEffect::Trade { input, .. } = effect {
                let multiplier = player.resources.max_multiplier(&input);
                let args = PlayArgs::Trade { multiplier };
                if multiplier > 0 && playable(i, &args) {
                    return Some(Action::play(i, args));
                }
            }
        }

        None
    }

    fn find_affordable(&self, player: &Player, market: &Market, max_crystals: u32) -> Option<usize> {
        market
            .action_cards()
            .iter()
            .enumerate()
            .position(|(position, slot)| {
                let cost = Market::action_card_cost(position);
                let mut caravan = player.resources;
                caravan.add_all(&slot.deposits.as_resources(), 1);
                caravan.subtract_all(&cost, 1).is_ok() && caravan.total() <= max_crystals
            })
    }
}

/// First template within `budget` whose source crystal is held.
fn upgrade_args(resources: &Resources, budget: u32) -> Option<PlayArgs> {
    UPGRADE_TEMPLATES
        .iter()
        .find(|(from, to)| to.level() - from.level() <= budget && resources.has(*from, 1))
        .map(|&(from, to)| PlayArgs::Upgrade {
            input: Resources::of(from, 1),
            output: Resources::of(to, 1),
        })
}

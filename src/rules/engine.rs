//! Action dispatch and turn flow.
//!
//! ## Atomicity
//!
//! Every handler validates fully (bounds, payload shape, affordability,
//! capacity) before its first write. A rejected call returns a
//! `GameError` and leaves the state equal, field for field, to its
//! pre-call value.
//!
//! ## Pending discards
//!
//! Any action that leaves a caravan above `max_crystals` records the excess
//! as `pending_discard`. Until it is settled with `DiscardCrystals`, every
//! other action of that seat is rejected.

use smallvec::SmallVec;

use super::GameResult;
use crate::cards::CardId;
use crate::core::action::{Action, ActionRecord, PlayArgs};
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::resources::{CrystalType, Resources};
use crate::core::state::GameState;

impl GameState {
    /// Validate and apply one action for `player`.
    ///
    /// Does not advance the turn; call `next_turn` after a successful
    /// turn-ending action once any pending discard is settled.
    pub fn execute_action(&mut self, player: PlayerId, action: &Action) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if player != self.current_player_id() {
            return Err(GameError::NotYourTurn(player));
        }
        let pending = self.players[player].pending_discard;
        if pending > 0 && !matches!(action, Action::DiscardCrystals { .. }) {
            return Err(GameError::DiscardPending(pending));
        }

        match action {
            Action::PlayCard { hand_index, args } => self.play_card(player, *hand_index, args)?,
            Action::AcquireCard { position, deposits } => {
                self.acquire_card(player, *position, deposits)?
            }
            Action::ClaimPointCard { position } => self.claim_point_card(player, *position)?,
            Action::Rest => self.players[player].rest(),
            Action::DiscardCrystals { discard } => self.players[player].discard(discard)?,
            Action::DepositCrystals { target, crystals } => {
                self.deposit_crystals(player, *target, crystals)?
            }
            Action::CollectCrystals { card, positions } => {
                self.collect_crystals(player, *card, positions)?
            }
            Action::CollectAllCrystals { card } => self.collect_all_crystals(player, *card)?,
        }

        self.history.push_back(ActionRecord::new(
            player,
            action.clone(),
            self.current_turn,
            self.round,
        ));
        Ok(())
    }

    /// Advance to the next seat. Starts a new round, clearing every rest
    /// flag, when the counter wraps to a multiple of the seat count.
    pub fn next_turn(&mut self) {
        self.current_turn += 1;
        if self.current_turn as usize % self.player_count() == 0 {
            self.round += 1;
            for (_, player) in self.players.iter_mut() {
                player.has_rested = false;
            }
        }
    }

    /// End the game once the last round has been triggered.
    ///
    /// The game ends on the first call after a seat reaches five golems.
    /// The winner is the seat with the strictly highest final score;
    /// ties go to the earlier seat.
    pub fn check_game_over(&mut self) {
        if !self.last_round && self.players.iter().any(|(_, p)| p.check_last_round()) {
            self.last_round = true;
        }
        if self.last_round && !self.game_over {
            self.game_over = true;
            self.winner = self.leader();
        }
    }

    /// Close `player`'s turn after a turn-ending action.
    ///
    /// Waits while the seat owes a discard. Otherwise checks for the end
    /// of game and, if play continues, advances the turn. Returns whether
    /// the turn closed.
    pub fn close_turn(&mut self, player: PlayerId) -> bool {
        if self.players[player].pending_discard > 0 {
            return false;
        }
        self.check_game_over();
        if !self.game_over {
            self.next_turn();
        }
        true
    }

    /// Final scores in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<(PlayerId, u32)> {
        self.players
            .iter()
            .map(|(id, player)| (id, player.final_points(&self.cards)))
            .collect()
    }

    /// The finished game's outcome, or `None` while it continues.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.game_over {
            return None;
        }
        let winner = self.winner.or_else(|| self.leader())?;
        Some(GameResult {
            winner,
            standings: self.standings(),
        })
    }

    fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, u32)> = None;
        for (id, points) in self.standings() {
            if best.map_or(true, |(_, top)| points > top) {
                best = Some((id, points));
            }
        }
        best.map(|(id, _)| id)
    }

    fn play_card(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        args: &PlayArgs,
    ) -> Result<(), GameError> {
        let max = self.config.max_crystals;
        let seat = &mut self.players[player];
        seat.play_card(&self.cards, hand_index, args)?;
        seat.enforce_capacity(max);
        Ok(())
    }

    /// Take the action card at `position`.
    ///
    /// With no deposits the position cost is charged. With one deposit per
    /// earlier position the card is free and those crystals go onto the
    /// earlier cards. Either way the target's own deposits go to the buyer,
    /// and the resulting caravan must fit within `max_crystals`.
    fn acquire_card(
        &mut self,
        player: PlayerId,
        position: usize,
        deposits: &[CrystalType],
    ) -> Result<(), GameError> {
        let slot = self.market.action_slot(position)?;
        let supplied = deposits.len();
        if supplied > position {
            return Err(GameError::DepositCountMismatch {
                expected: position,
                got: supplied,
            });
        }
        let free = supplied == position;
        if !free && supplied > 0 {
            return Err(GameError::MissingDeposits {
                required: position,
                supplied,
            });
        }

        let charge = if position == 0 {
            Resources::empty()
        } else if free {
            self.market.validate_deposits(position, deposits)?
        } else {
            self.market.cost_at(position)?
        };

        let mut caravan = self.players[player].resources;
        caravan.add_all(&slot.deposits.as_resources(), 1);
        caravan.subtract_all(&charge, 1)?;
        let max = self.config.max_crystals;
        if caravan.total() > max {
            return Err(GameError::CapacityExceeded {
                total: caravan.total(),
                max,
            });
        }

        if free && position > 0 {
            self.market.place_deposits(deposits)?;
        }
        let slot = self.market.acquire_action_card(position)?;
        let seat = &mut self.players[player];
        seat.resources = caravan;
        seat.add_card(slot.card);
        Ok(())
    }

    fn claim_point_card(&mut self, player: PlayerId, position: usize) -> Result<(), GameError> {
        let card = self.market.point_card(position)?;
        self.cards
            .get(card)?
            .can_claim(&self.players[player].resources)?;

        self.market.acquire_point_card(position)?;
        let seat = &mut self.players[player];
        seat.claim_point_card(&self.cards, card)?;
        if let Some(coin) = self.market.award_coin(position) {
            seat.coins.push(coin);
        }
        if seat.check_last_round() {
            self.last_round = true;
        }
        Ok(())
    }

    fn deposit_crystals(
        &mut self,
        player: PlayerId,
        target: usize,
        crystals: &[CrystalType],
    ) -> Result<(), GameError> {
        let spend = self.market.validate_deposits(target, crystals)?;
        let mut caravan = self.players[player].resources;
        caravan.subtract_all(&spend, 1)?;

        self.market.place_deposits(crystals)?;
        self.players[player].resources = caravan;
        Ok(())
    }

    fn collect_crystals(
        &mut self,
        player: PlayerId,
        card: CardId,
        positions: &SmallVec<[u8; 2]>,
    ) -> Result<(), GameError> {
        let crystal = self
            .market
            .slot_for_card_mut(card)?
            .deposits
            .collect(positions)?;

        let max = self.config.max_crystals;
        let seat = &mut self.players[player];
        seat.resources.add(crystal, 1);
        seat.enforce_capacity(max);
        Ok(())
    }

    fn collect_all_crystals(&mut self, player: PlayerId, card: CardId) -> Result<(), GameError> {
        let collected = self.market.slot_for_card_mut(card)?.deposits.collect_all()?;

        let max = self.config.max_crystals;
        let seat = &mut self.players[player];
        seat.resources.add_all(&collected, 1);
        seat.enforce_capacity(max);
        Ok(())
    }
}

//! End-to-end rule scenarios.
//!
//! Each test drives a seeded game through the public API only and checks
//! the observable state afterwards.

use golem_caravan::core::{Action, CrystalType, GameError, GameState, PlayerId, Resources};
use golem_caravan::market::Market;

fn p(n: u8) -> PlayerId {
    PlayerId::new(n)
}

/// Setup deals the seat table and both market rows.
#[test]
fn test_new_game_setup() {
    let state = GameState::new(2, 42).unwrap();
    assert_eq!(state.players[p(0)].resources, Resources::new(3, 0, 0, 0));
    assert_eq!(state.players[p(1)].resources, Resources::new(4, 0, 0, 0));
    assert_eq!(state.market.action_cards().len(), 5);
    assert_eq!(state.market.point_cards().len(), 5);
    assert_eq!(state.current_player_id(), p(0));
    assert_eq!(state.round, 1);
}

/// Seats four and five start with a Green.
#[test]
fn test_five_seat_starting_resources() {
    let state = GameState::new(5, 9).unwrap();
    let expected = [
        Resources::new(3, 0, 0, 0),
        Resources::new(4, 0, 0, 0),
        Resources::new(4, 0, 0, 0),
        Resources::new(3, 1, 0, 0),
        Resources::new(3, 1, 0, 0),
    ];
    for (seat, resources) in expected.iter().enumerate() {
        assert_eq!(&state.players[p(seat as u8)].resources, resources);
        assert_eq!(state.players[p(seat as u8)].hand.len(), 2);
    }
}

/// Player counts outside 2..=5 are rejected.
#[test]
fn test_player_count_bounds() {
    assert_eq!(GameState::new(1, 0), Err(GameError::InvalidPlayerCount(1)));
    assert_eq!(GameState::new(6, 0), Err(GameError::InvalidPlayerCount(6)));
}

/// Upgrade feasibility respects the level budget.
#[test]
fn test_upgrade_budget() {
    let yellow = Resources::new(1, 0, 0, 0);
    let pink = Resources::new(0, 0, 0, 1);
    assert!(yellow.can_upgrade(&pink, 3));
    assert!(!yellow.can_upgrade(&pink, 1));
}

/// The paid path charges exactly the position cost.
#[test]
fn test_acquire_paid_path() {
    let mut state = GameState::new(2, 42).unwrap();
    let target = state.market.action_cards()[2].card;

    state.execute_action(p(0), &Action::acquire(2)).unwrap();

    let mut expected = Resources::new(3, 0, 0, 0);
    expected.subtract_all(&Market::action_card_cost(2), 1).unwrap();
    assert_eq!(state.players[p(0)].resources, expected);
    assert!(state.players[p(0)].hand.contains(&target));
    assert_eq!(state.market.action_cards().len(), 5);
}

/// The free path charges one crystal per earlier card and hands over the
/// target's own deposits.
#[test]
fn test_acquire_free_path_collects_target_deposits() {
    let mut state = GameState::new(2, 42).unwrap();
    state.players[p(0)].resources = Resources::new(4, 1, 0, 0);

    // Leaves one Yellow on each of cards 0, 1 and 2.
    state
        .execute_action(p(0), &Action::deposit(3, [CrystalType::Yellow; 3]))
        .unwrap();
    assert_eq!(state.players[p(0)].resources, Resources::new(1, 1, 0, 0));
    let first = state.market.action_cards()[0].card;
    let target = state.market.action_cards()[2].card;

    state
        .execute_action(
            p(0),
            &Action::acquire_free(2, [CrystalType::Yellow, CrystalType::Green]),
        )
        .unwrap();

    // Paid two, received the Yellow waiting on the target.
    assert_eq!(state.players[p(0)].resources, Resources::new(1, 0, 0, 0));
    assert!(state.players[p(0)].hand.contains(&target));
    let slot = &state.market.action_cards()[0];
    assert_eq!(slot.card, first);
    assert_eq!(slot.deposits.at(1), &[CrystalType::Yellow, CrystalType::Yellow]);
    assert_eq!(
        state.market.action_cards()[1].deposits.at(2),
        &[CrystalType::Yellow, CrystalType::Green]
    );
}

/// A deposit list shorter than the position is rejected without change.
#[test]
fn test_acquire_partial_deposits_rejected() {
    let mut state = GameState::new(2, 42).unwrap();
    let before = state.clone();
    assert_eq!(
        state.execute_action(p(0), &Action::acquire_free(3, [CrystalType::Yellow])),
        Err(GameError::MissingDeposits {
            required: 3,
            supplied: 1
        })
    );
    assert_eq!(state, before);
}

/// Position 0 pays a bronze coin, position 2 pays nothing.
#[test]
fn test_claim_coin_awards() {
    let mut state = GameState::new(2, 42).unwrap();
    state.players[p(0)].resources = Resources::new(9, 9, 9, 9);
    state.players[p(1)].resources = Resources::new(9, 9, 9, 9);
    let bronze_before = state.market.coins()[0].amount;
    assert!(bronze_before > 0);

    state.execute_action(p(0), &Action::claim(0)).unwrap();
    let coins = &state.players[p(0)].coins;
    assert_eq!(coins.len(), 1);
    assert_eq!(state.cards().get(coins[0]).unwrap().points(), 3);
    assert_eq!(state.market.coins()[0].amount, bronze_before - 1);

    state.next_turn();
    let silver = state.market.coins()[1].amount;
    state.execute_action(p(1), &Action::claim(2)).unwrap();
    assert!(state.players[p(1)].coins.is_empty());
    assert_eq!(state.market.coins()[1].amount, silver);
    assert_eq!(state.players[p(1)].point_cards.len(), 1);
}

/// The fifth golem triggers the last round and the next check ends the
/// game.
#[test]
fn test_fifth_golem_ends_game() {
    let mut state = GameState::new(2, 42).unwrap();
    state.players[p(0)].resources = Resources::new(30, 30, 30, 30);

    for claimed in 1..=5 {
        state.execute_action(p(0), &Action::claim(0)).unwrap();
        assert_eq!(state.players[p(0)].point_cards.len(), claimed);
        state.check_game_over();
        if claimed < 5 {
            assert!(!state.game_over);
            state.next_turn();
            state.execute_action(p(1), &Action::Rest).unwrap();
            state.next_turn();
        }
    }

    assert!(state.last_round);
    assert!(state.game_over);
    assert_eq!(state.winner, Some(p(0)));
    let result = state.result().unwrap();
    assert!(result.is_winner(p(0)));
    assert!(result.points(p(0)).unwrap() > result.points(p(1)).unwrap());
    assert_eq!(
        state.execute_action(p(0), &Action::Rest),
        Err(GameError::GameOver)
    );
}

/// Equal final scores go to the earlier seat.
#[test]
fn test_tie_goes_to_earlier_seat() {
    let mut state = GameState::new(3, 8).unwrap();
    for seat in 0..3 {
        state.players[p(seat)].resources = Resources::new(0, 1, 0, 0);
    }
    state.last_round = true;
    state.check_game_over();
    assert!(state.game_over);
    assert_eq!(state.winner, Some(p(0)));
}

/// Final score counts golems, coins, and every non-Yellow crystal.
#[test]
fn test_final_points_counts_crystals() {
    let mut state = GameState::new(2, 42).unwrap();
    state.players[p(1)].resources = Resources::new(5, 1, 2, 1);
    assert_eq!(state.final_points(p(1)), 4);
}

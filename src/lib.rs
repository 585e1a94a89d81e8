//! # golem-caravan
//!
//! A deterministic rules engine for a crystal-trading card game: players
//! produce, trade and upgrade crystals with action cards bought from a
//! shared market, then spend them to claim golems worth victory points.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: one seeded RNG per game. The same seed and the
//!    same action log always reach the same state.
//!
//! 2. **Atomic actions**: `GameState::execute_action` validates everything
//!    before its first write. A rejected action changes nothing.
//!
//! 3. **Stable card handles**: cards live in a `CardArena`; hands, the
//!    market and scoring piles hold `CardId`s. Deposits live on the market
//!    slot that owns the card.
//!
//! ## Modules
//!
//! - `core`: crystals, players, actions, state, RNG, configuration
//! - `cards`: card kinds, the deposit ledger, the catalog, the arena
//! - `market`: visible rows, hidden decks, coin stacks, costs
//! - `rules`: action dispatch, turn flow, end of game, replay
//! - `ai`: decision policies for automated seats
//! - `session`: serialized action queue and the automated match loop

pub mod core;
pub mod cards;
pub mod market;
pub mod rules;
pub mod ai;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CrystalType, ErrorKind, GameConfig, GameError, GameRng, GameSnapshot,
    GameState, PlayArgs, Player, PlayerId, PlayerMap, Resources,
};

pub use crate::cards::{ActionEffect, Card, CardArena, CardId, CardKind, Deposits};

pub use crate::market::{CoinStack, Market, MarketSlot};

pub use crate::rules::{replay, GameResult};

pub use crate::ai::{DecisionPolicy, PriorityPolicy};

pub use crate::session::{Outcome, Session, DEFAULT_MAX_TURNS};

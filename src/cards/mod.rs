//! Card system: card data, deposits, catalog, and the card arena.
//!
//! ## Key Types
//!
//! - `CardId`: Stable handle into the arena
//! - `Card` / `CardKind`: Immutable card data (action, golem, coin, artwork)
//! - `Deposits`: Per-position crystal ledger on a market card
//! - `CardArena`: Owner of every card in a match
//!
//! Card names follow the grammar in `catalog`.

pub mod arena;
pub mod card;
pub mod catalog;
pub mod deposit;

pub use arena::CardArena;
pub use card::{ActionCard, ActionEffect, ActionType, Card, CardId, CardKind, PointCard};
pub use deposit::{Deposits, MAX_DEPOSIT_POSITION};

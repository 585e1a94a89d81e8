//! Core engine types: crystals, players, state, actions, RNG, configuration.
//!
//! Everything here is deterministic and silent. Randomness comes only from
//! the `GameRng` owned by each `GameState`.

pub mod resources;
pub mod error;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod snapshot;

pub use resources::{CrystalType, Resources, MAX_CRYSTALS};
pub use error::{ErrorKind, GameError};
pub use player::{Player, PlayerId, PlayerMap, LAST_ROUND_POINT_CARDS};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Action, ActionRecord, DepositList, PlayArgs};
pub use state::GameState;
pub use snapshot::{CoinView, GameSnapshot, MarketCardView, MarketView, PlayerView};

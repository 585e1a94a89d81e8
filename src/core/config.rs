//! Match configuration.
//!
//! `GameConfig` carries the rule tunables a match is created with. It
//! deserializes with defaults for every missing field, so an outer layer
//! can load a partial JSON/TOML document and get a playable config.
//!
//! The last-round threshold (five point cards) is a fixed rule and lives
//! in `core::player::LAST_ROUND_POINT_CARDS`, not here.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::resources::{Resources, MAX_CRYSTALS};

/// Fewest seats a match can have.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a match can have.
pub const MAX_PLAYERS: usize = 5;

/// Default size of each visible market window.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Rule tunables for one match.
///
/// ```
/// use golem_caravan::core::GameConfig;
///
/// let config = GameConfig::new(4).with_max_visible(6);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.coins_per_stack(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats (2-5).
    pub player_count: usize,

    /// Caravan limit; excess after an action becomes a pending discard.
    pub max_crystals: u32,

    /// Visible window size for both the action row and the golem row.
    pub max_visible: usize,

    /// Tokens per coin stack. `None` means two per seat.
    pub coin_stack_size: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            max_crystals: MAX_CRYSTALS,
            max_visible: DEFAULT_MAX_VISIBLE,
            coin_stack_size: None,
        }
    }
}

impl GameConfig {
    /// Default rules for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the caravan limit.
    #[must_use]
    pub fn with_max_crystals(mut self, max_crystals: u32) -> Self {
        self.max_crystals = max_crystals;
        self
    }

    /// Set the visible window size.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible;
        self
    }

    /// Set an explicit coin stack size.
    #[must_use]
    pub fn with_coin_stack_size(mut self, size: u32) -> Self {
        self.coin_stack_size = Some(size);
        self
    }

    /// Reject configurations the rules cannot run.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::InvalidPlayerCount(self.player_count));
        }
        if self.max_crystals == 0 {
            return Err(GameError::InvalidConfig("max_crystals must be at least 1"));
        }
        if self.max_visible == 0 {
            return Err(GameError::InvalidConfig("max_visible must be at least 1"));
        }
        Ok(())
    }

    /// Tokens placed on each coin stack at setup.
    #[must_use]
    pub fn coins_per_stack(&self) -> u32 {
        self.coin_stack_size
            .unwrap_or(2 * self.player_count as u32)
    }

    /// Starting caravan for the seat at `seat` (0-based, after the shuffle).
    ///
    /// Seat 0 takes 3 Yellow, seats 1-2 take 4 Yellow, seats 3-4 take
    /// 3 Yellow and 1 Green.
    #[must_use]
    pub fn starting_resources(seat: usize) -> Resources {
        match seat {
            0 => Resources::new(3, 0, 0, 0),
            1 | 2 => Resources::new(4, 0, 0, 0),
            _ => Resources::new(3, 1, 0, 0),
        }
    }
}

//! Card data and the play/claim rules.
//!
//! A `Card` is immutable once registered in the arena. Mutable per-card
//! state (deposits) lives on the market slot that holds the card, so it
//! only exists while the card is market-resident.

use serde::{Deserialize, Serialize};

use crate::core::action::PlayArgs;
use crate::core::error::GameError;
use crate::core::resources::{CrystalType, Resources};

/// Stable handle of a card in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What an action card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Produce,
    Upgrade,
    Trade,
}

/// Effect payload of an action card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEffect {
    /// Gain `output` once.
    Produce { output: Resources },
    /// Raise crystals by up to `turn_upgrade` levels in total.
    Upgrade { turn_upgrade: u32 },
    /// Pay `input × m`, gain `output × m`.
    Trade { input: Resources, output: Resources },
}

impl ActionEffect {
    /// The effect's action type.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionEffect::Produce { .. } => ActionType::Produce,
            ActionEffect::Upgrade { .. } => ActionType::Upgrade,
            ActionEffect::Trade { .. } => ActionType::Trade,
        }
    }
}

/// A merchant card that converts crystals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCard {
    /// Printed price. Market acquisition charges by position instead.
    pub cost: Resources,
    pub effect: ActionEffect,
}

/// A golem claimed for victory points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointCard {
    pub requirement: Resources,
    pub points: u32,
}

/// Card variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKind {
    Action(ActionCard),
    Point(PointCard),
    /// Bonus token worth `points`.
    Coin { points: u32 },
    /// Crystal artwork; decorative.
    Stone { crystal: CrystalType },
    /// Table artwork; decorative.
    Background,
}

/// A registered card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
}

impl Card {
    /// Create a card.
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    /// The action payload, if this is an action card.
    #[must_use]
    pub fn as_action(&self) -> Option<&ActionCard> {
        match &self.kind {
            CardKind::Action(action) => Some(action),
            _ => None,
        }
    }

    /// The golem payload, if this is a point card.
    #[must_use]
    pub fn as_point(&self) -> Option<&PointCard> {
        match &self.kind {
            CardKind::Point(point) => Some(point),
            _ => None,
        }
    }

    /// Victory points this card is worth once owned.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self.kind {
            CardKind::Point(point) => point.points,
            CardKind::Coin { points } => points,
            _ => 0,
        }
    }

    /// Check whether playing with `args` would succeed against `resources`.
    pub fn can_play(&self, resources: &Resources, args: &PlayArgs) -> Result<(), GameError> {
        let mut scratch = *resources;
        self.apply_play(&mut scratch, args)
    }

    /// Play this card, converting `resources` in place.
    ///
    /// On error `resources` is unchanged.
    pub fn play(&self, resources: &mut Resources, args: &PlayArgs) -> Result<(), GameError> {
        let mut next = *resources;
        self.apply_play(&mut next, args)?;
        *resources = next;
        Ok(())
    }

    fn apply_play(&self, resources: &mut Resources, args: &PlayArgs) -> Result<(), GameError> {
        let action = self.as_action().ok_or(GameError::NotPlayable(self.id))?;

        match (&action.effect, args) {
            (ActionEffect::Produce { output }, PlayArgs::Produce) => {
                resources.add_all(output, 1);
            }
            (ActionEffect::Upgrade { turn_upgrade }, PlayArgs::Upgrade { input, output }) => {
                let illegal = GameError::IllegalUpgrade {
                    input: *input,
                    output: *output,
                    budget: *turn_upgrade,
                };
                if *turn_upgrade == 0 || input.is_empty() {
                    return Err(illegal);
                }
                resources.subtract_all(input, 1)?;
                if !input.can_upgrade(output, *turn_upgrade) {
                    return Err(illegal);
                }
                resources.add_all(output, 1);
            }
            (ActionEffect::Trade { input, output }, PlayArgs::Trade { multiplier }) => {
                if *multiplier == 0 {
                    return Err(GameError::InvalidMultiplier(*multiplier));
                }
                resources.subtract_all(input, *multiplier)?;
                resources.add_all(output, *multiplier);
            }
            _ => return Err(GameError::WrongPlayArgs),
        }
        Ok(())
    }

    /// Check whether `resources` covers this golem's requirement once.
    pub fn can_claim(&self, resources: &Resources) -> Result<(), GameError> {
        let point = self.as_point().ok_or(GameError::NotClaimable(self.id))?;
        if !resources.has_all(&point.requirement, 1) {
            return Err(GameError::Insufficient {
                required: point.requirement,
                available: *resources,
            });
        }
        Ok(())
    }

    /// Pay this golem's requirement and return its points.
    pub fn claim(&self, resources: &mut Resources) -> Result<u32, GameError> {
        let point = self.as_point().ok_or(GameError::NotClaimable(self.id))?;
        resources.subtract_all(&point.requirement, 1)?;
        Ok(point.points)
    }
}

//! Stable-ID card store.
//!
//! Every physical card in a match is registered once and addressed by its
//! `CardId` from then on. Hands, market rows and decks hold handles, so the
//! collection holding a handle is the card's location and no card is ever
//! shared by reference between collections.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardKind};
use crate::core::error::GameError;

/// Arena of every card in a match.
///
/// ## Example
///
/// ```
/// use golem_caravan::cards::{catalog, CardArena};
///
/// let mut arena = CardArena::new();
/// let kind = catalog::parse_card("mint_0002").unwrap();
/// let id = arena.register("mint_0002", kind);
///
/// assert_eq!(arena.get(id).unwrap().name, "mint_0002");
/// assert_eq!(arena.find_by_name("mint_0002"), Some(id));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardArena {
    cards: im::Vector<Card>,
    by_name: FxHashMap<String, CardId>,
}

impl CardArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card and return its handle.
    ///
    /// Names may repeat (every seat owns a `mint_0002`); name lookup
    /// returns the first registration.
    pub fn register(&mut self, name: impl Into<String>, kind: CardKind) -> CardId {
        let id = CardId::new(self.cards.len() as u32);
        let name = name.into();
        self.by_name.entry(name.clone()).or_insert(id);
        self.cards.push_back(Card::new(id, name, kind));
        id
    }

    /// Look up a card.
    pub fn get(&self, id: CardId) -> Result<&Card, GameError> {
        self.cards
            .get(id.raw() as usize)
            .ok_or(GameError::CardNotFound(id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        (id.raw() as usize) < self.cards.len()
    }

    /// First card registered under `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::parse_card;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut arena = CardArena::new();
        let a = arena.register("mint_0002", parse_card("mint_0002").unwrap());
        let b = arena.register("upgrade_2", parse_card("upgrade_2").unwrap());

        assert_eq!(a, CardId(0));
        assert_eq!(b, CardId(1));
        assert_eq!(arena.len(), 2);
        assert!(arena.contains(b));
        assert!(!arena.contains(CardId(2)));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let mut arena = CardArena::new();
        let first = arena.register("mint_0002", parse_card("mint_0002").unwrap());
        let second = arena.register("mint_0002", parse_card("mint_0002").unwrap());

        assert_ne!(first, second);
        assert_eq!(arena.find_by_name("mint_0002"), Some(first));
        assert_eq!(arena.get(second).unwrap().name, "mint_0002");
    }

    #[test]
    fn test_missing_card() {
        let arena = CardArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.get(CardId(3)), Err(GameError::CardNotFound(CardId(3))));
    }
}

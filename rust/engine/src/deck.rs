use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered sequence of the 52 cards plus a dealing cursor.
///
/// The deck never owns or seeds its own RNG: callers shuffle it with an RNG
/// they control (direct or seeded via `rand_chacha::ChaCha8Rng`), so the same
/// seed and action sequence reproduce bitwise-identical deals.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// A fresh deck in canonical (unshuffled) order.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    /// Builds a deck from an explicit card order, for deterministic test
    /// fixtures that need specific hole/board cards rather than a shuffle.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    /// A freshly shuffled deck, driven by the caller's RNG.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
        self.position = 0;
    }

    /// Deals `n` cards, advancing the cursor. Errors (without mutating the
    /// cursor) if fewer than `n` cards remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn deal_one(&mut self) -> Result<Card, GameError> {
        Ok(self.deal(1)?[0])
    }

    /// Advances the cursor by one card, discarding it.
    pub fn burn(&mut self) -> Result<(), GameError> {
        self.deal(1).map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

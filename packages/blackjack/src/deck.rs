use crate::card::{Card, Rank, Suit};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Draw was requested on an exhausted deck. The table's reshuffle policy is
/// meant to keep this unreachable; hitting it means a broken invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("draw from an empty deck")]
pub struct EmptyDeckError;

/// A single 52-card deck. The shuffle RNG lives inside the deck so a seeded
/// deck replays an entire session deterministically.
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Full shuffled deck with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Full shuffled deck with a fixed seed, for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng,
        };
        deck.reset_and_shuffle();
        deck
    }

    /// Deck that deals exactly the given cards in order. No shuffle is
    /// applied until the next `reset_and_shuffle`. Intended for tests and
    /// simulations that need a rigged deal.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Replaces the contents with all 52 rank/suit combinations in a uniform
    /// random order.
    pub fn reset_and_shuffle(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(rank, suit));
            }
        }
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the top card.
    pub fn draw_top(&mut self) -> Result<Card, EmptyDeckError> {
        if self.cards.is_empty() {
            return Err(EmptyDeckError);
        }
        Ok(self.cards.remove(0))
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_has_52_unique_cards() {
        let mut deck = Deck::seeded(7);
        assert_eq!(deck.size(), 52);
        let mut seen = HashSet::new();
        while let Ok(card) = deck.draw_top() {
            assert!(seen.insert(card), "duplicate card {} in deck", card);
        }
        assert_eq!(seen.len(), 52);
        assert_eq!(deck.size(), 0);
    }

    #[test]
    fn test_reset_restores_full_deck_regardless_of_prior_state() {
        let mut deck = Deck::seeded(1);
        for _ in 0..40 {
            deck.draw_top().unwrap();
        }
        assert_eq!(deck.size(), 12);
        deck.reset_and_shuffle();
        assert_eq!(deck.size(), 52);
        let mut seen = HashSet::new();
        for _ in 0..52 {
            seen.insert(deck.draw_top().unwrap());
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_draw_decrements_size_by_one() {
        let mut deck = Deck::seeded(3);
        let before = deck.size();
        deck.draw_top().unwrap();
        assert_eq!(deck.size(), before - 1);
    }

    #[test]
    fn test_empty_deck_draw_errors() {
        let mut deck = Deck::stacked(vec![Card::new(Rank::Five, Suit::Hearts)]);
        assert!(deck.draw_top().is_ok());
        assert_eq!(deck.draw_top(), Err(EmptyDeckError));
    }

    #[test]
    fn test_stacked_deck_deals_in_order() {
        let first = Card::new(Rank::Ace, Suit::Spades);
        let second = Card::new(Rank::King, Suit::Hearts);
        let mut deck = Deck::stacked(vec![first, second]);
        assert_eq!(deck.draw_top().unwrap(), first);
        assert_eq!(deck.draw_top().unwrap(), second);
    }

    #[test]
    fn test_seeded_decks_deal_identically() {
        let mut a = Deck::seeded(42);
        let mut b = Deck::seeded(42);
        for _ in 0..52 {
            assert_eq!(a.draw_top().unwrap(), b.draw_top().unwrap());
        }
    }
}

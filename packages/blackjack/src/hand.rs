use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Calculate the best value of a blackjack hand. Aces start at 11 and are
/// demoted to 1 one at a time while the total busts.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    while total > 21 && aces > 0 {
        total -= 10; // count one ace as 1 instead of 11
        aces -= 1;
    }

    total
}

/// Check if a hand is soft: at least one ace still counted as 11 in the
/// final total.
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let minimum: u8 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() })
        .sum();
    let value = hand_value(cards);
    cards.iter().any(Card::is_ace) && value <= 21 && minimum + 10 == value
}

/// Check if a hand is busted.
pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards) > 21
}

/// Check if a hand is a natural blackjack (21 with exactly 2 cards).
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}

/// An ordered hand of cards. Grows only by append; cleared between rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    #[test]
    fn test_hand_value_simple() {
        let cards = vec![card(Rank::Two), card(Rank::Three)];
        assert_eq!(hand_value(&cards), 5);
    }

    #[test]
    fn test_hand_value_face_cards() {
        let cards = vec![card(Rank::King), card(Rank::Queen)];
        assert_eq!(hand_value(&cards), 20);
    }

    #[test]
    fn test_hand_value_ace_king_is_21() {
        let cards = vec![card(Rank::Ace), card(Rank::King)];
        assert_eq!(hand_value(&cards), 21);
    }

    #[test]
    fn test_hand_value_two_aces_nine_is_21() {
        // one ace at 11, one demoted to 1
        let cards = vec![card(Rank::Ace), card(Rank::Ace), card(Rank::Nine)];
        assert_eq!(hand_value(&cards), 21);
    }

    #[test]
    fn test_hand_value_three_aces_nine_is_12() {
        // two demotions
        let cards = vec![
            card(Rank::Ace),
            card(Rank::Ace),
            card(Rank::Ace),
            card(Rank::Nine),
        ];
        assert_eq!(hand_value(&cards), 12);
    }

    #[test]
    fn test_hand_value_hard_ace() {
        let cards = vec![card(Rank::Ace), card(Rank::Six), card(Rank::Nine)];
        assert_eq!(hand_value(&cards), 16);
    }

    #[test]
    fn test_bust_total_is_minimal() {
        let cards = vec![
            card(Rank::King),
            card(Rank::Queen),
            card(Rank::Ace),
            card(Rank::Five),
        ];
        assert_eq!(hand_value(&cards), 26);
        assert!(is_busted(&cards));
    }

    #[test]
    fn test_is_soft_hand() {
        let cards = vec![card(Rank::Ace), card(Rank::Six)];
        assert!(is_soft_hand(&cards));
    }

    #[test]
    fn test_hard_ace_not_soft() {
        let cards = vec![card(Rank::Ace), card(Rank::Six), card(Rank::Nine)];
        assert!(!is_soft_hand(&cards));
    }

    #[test]
    fn test_no_ace_not_soft() {
        let cards = vec![card(Rank::King), card(Rank::Seven)];
        assert!(!is_soft_hand(&cards));
    }

    #[test]
    fn test_is_blackjack() {
        let cards = vec![card(Rank::Ace), card(Rank::King)];
        assert!(is_blackjack(&cards));
    }

    #[test]
    fn test_three_card_21_is_not_blackjack() {
        let cards = vec![card(Rank::Seven), card(Rank::Seven), card(Rank::Seven)];
        assert!(!is_blackjack(&cards));
    }

    #[test]
    fn test_two_card_20_is_not_blackjack() {
        let cards = vec![card(Rank::King), card(Rank::Queen)];
        assert!(!is_blackjack(&cards));
    }

    #[test]
    fn test_hand_struct_forwards() {
        let mut hand = Hand::new();
        hand.add_card(card(Rank::King));
        hand.add_card(card(Rank::Seven));
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.len(), 2);
        assert!(!hand.is_soft());
        hand.clear();
        assert!(hand.is_empty());
    }
}

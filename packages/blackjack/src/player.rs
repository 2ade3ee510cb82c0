use crate::card::Card;
use crate::hand::Hand;
use serde::{Deserialize, Serialize};

/// Dealer stands on 17 or above; hits on 16 or below, and on soft 17.
pub const DEALER_STAND_THRESHOLD: u8 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Hit,
    Stand,
}

/// A seat at the table. Only the dealer carries an automatic decision rule;
/// the human's actions arrive through the table's explicit entry points
/// (`player_hits` / `player_stands`), so `auto_action` returns `None` for
/// the human by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Participant {
    Dealer,
    Human,
}

impl Participant {
    /// Automatic hit/stand decision. The dealer's rule is card-blind: the
    /// up-card parameter is accepted for signature symmetry and unused.
    pub fn auto_action(&self, hand: &Hand, _dealer_up_card: Option<Card>) -> Option<PlayerAction> {
        match self {
            Participant::Dealer => {
                let total = hand.value();
                if total < DEALER_STAND_THRESHOLD
                    || (total == DEALER_STAND_THRESHOLD && hand.is_soft())
                {
                    Some(PlayerAction::Hit)
                } else {
                    Some(PlayerAction::Stand)
                }
            }
            Participant::Human => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.add_card(Card::new(rank, Suit::Diamonds));
        }
        hand
    }

    #[test]
    fn test_dealer_hits_below_17() {
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        assert_eq!(
            Participant::Dealer.auto_action(&hand, None),
            Some(PlayerAction::Hit)
        );
    }

    #[test]
    fn test_dealer_hits_soft_17() {
        let hand = hand_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(hand.value(), 17);
        assert_eq!(
            Participant::Dealer.auto_action(&hand, None),
            Some(PlayerAction::Hit)
        );
    }

    #[test]
    fn test_dealer_stands_hard_17() {
        let hand = hand_of(&[Rank::Ten, Rank::Seven]);
        assert_eq!(hand.value(), 17);
        assert_eq!(
            Participant::Dealer.auto_action(&hand, None),
            Some(PlayerAction::Stand)
        );
    }

    #[test]
    fn test_dealer_stands_on_18() {
        let hand = hand_of(&[Rank::Ten, Rank::Eight]);
        assert_eq!(
            Participant::Dealer.auto_action(&hand, None),
            Some(PlayerAction::Stand)
        );
    }

    #[test]
    fn test_dealer_stands_on_hard_17_with_demoted_ace() {
        // A+6+10: the ace is demoted, so this 17 is hard
        let hand = hand_of(&[Rank::Ace, Rank::Six, Rank::Ten]);
        assert_eq!(hand.value(), 17);
        assert_eq!(
            Participant::Dealer.auto_action(&hand, None),
            Some(PlayerAction::Stand)
        );
    }

    #[test]
    fn test_human_has_no_automatic_action() {
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        assert_eq!(Participant::Human.auto_action(&hand, None), None);
    }
}

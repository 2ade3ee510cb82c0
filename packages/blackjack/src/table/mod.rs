use crate::card::Card;
use crate::deck::{Deck, EmptyDeckError};
use crate::hand::Hand;
use crate::player::{Participant, PlayerAction};
use crate::record::{Record, RecordStore};
use serde::{Deserialize, Serialize};

/// Current phase of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InitialDeal,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Outcome of a round from the human player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Loss,
    Push,
}

impl RoundResult {
    /// Default display message for this result.
    pub fn message(&self) -> &'static str {
        match self {
            RoundResult::Win => "You win!",
            RoundResult::Loss => "You lose!",
            RoundResult::Push => "Push!",
        }
    }
}

/// A single-player blackjack table: one deck, one human, one rule-bound
/// dealer, and a cumulative win/loss record persisted through the injected
/// store.
///
/// Every operation runs to completion synchronously; none is fallible at
/// this surface. Persistence failures are logged and swallowed.
pub struct Table<S: RecordStore> {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    hole_card_hidden: bool,
    phase: GamePhase,
    record: Record,
    store: S,
}

impl<S: RecordStore> Table<S> {
    /// New table with a freshly shuffled deck. The record is loaded from the
    /// store up front.
    pub fn new(store: S) -> Self {
        Self::with_deck(Deck::new(), store)
    }

    /// New table around an existing deck, for seeded replays and tests.
    pub fn with_deck(deck: Deck, store: S) -> Self {
        let record = store.load();
        Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            hole_card_hidden: true,
            phase: GamePhase::NotStarted,
            record,
            store,
        }
    }

    /// Starts a new round: reshuffles a low deck, clears both hands, deals
    /// two cards each (dealer's second card hidden), and checks for a
    /// natural blackjack.
    ///
    /// Returns `Some(result)` when a blackjack settles the round on the
    /// spot, `None` to continue normal play.
    pub fn start_round(&mut self) -> Option<RoundResult> {
        // A round consumes at most 4 cards before anyone can hit, so one
        // pre-round reshuffle suffices.
        if self.deck.size() < 4 {
            self.deck.reset_and_shuffle();
        }

        self.player.clear();
        self.dealer.clear();
        self.phase = GamePhase::InitialDeal;
        self.hole_card_hidden = true;

        let card = self.draw();
        self.player.add_card(card);
        let card = self.draw();
        self.player.add_card(card);
        let card = self.draw();
        self.dealer.add_card(card); // up-card
        let card = self.draw();
        self.dealer.add_card(card); // hole card

        match self.check_blackjack() {
            Some(result) => Some(result),
            None => {
                self.phase = GamePhase::PlayerTurn;
                None
            }
        }
    }

    /// Deals one card to the human. The blackjack predicate requires exactly
    /// two cards, so this returns `None` from the first hit on; bust
    /// detection stays with the caller via `is_player_bust`.
    pub fn player_hits(&mut self) -> Option<RoundResult> {
        debug_assert!(
            self.phase == GamePhase::PlayerTurn,
            "hit outside the player's turn"
        );
        let card = self.draw();
        self.player.add_card(card);
        self.check_blackjack()
    }

    /// Reveals the hole card, plays the dealer's turn to completion, and
    /// settles the round.
    pub fn player_stands(&mut self) -> RoundResult {
        debug_assert!(
            self.phase == GamePhase::PlayerTurn,
            "stand outside the player's turn"
        );
        self.hole_card_hidden = false;
        self.phase = GamePhase::DealerTurn;
        // a busted player has already lost; the dealer stays pat
        if !self.player.is_busted() {
            self.run_dealer_turn();
        }
        let result = self.determine_outcome();
        self.settle(result);
        result
    }

    fn run_dealer_turn(&mut self) {
        while Participant::Dealer.auto_action(&self.dealer, Some(self.dealer_up_card()))
            == Some(PlayerAction::Hit)
        {
            let card = self.draw();
            self.dealer.add_card(card);
        }
    }

    fn determine_outcome(&self) -> RoundResult {
        let player_total = self.player.value();
        if player_total > 21 {
            return RoundResult::Loss;
        }
        let dealer_total = self.dealer.value();
        if dealer_total > 21 {
            return RoundResult::Win;
        }
        if player_total > dealer_total {
            RoundResult::Win
        } else if player_total < dealer_total {
            RoundResult::Loss
        } else {
            RoundResult::Push
        }
    }

    /// Settles a natural blackjack for either side: both hands blackjack is
    /// a push, otherwise the blackjack hand wins.
    fn check_blackjack(&mut self) -> Option<RoundResult> {
        let player_blackjack = self.player.is_blackjack();
        let dealer_blackjack = self.dealer.is_blackjack();
        if !player_blackjack && !dealer_blackjack {
            return None;
        }

        self.hole_card_hidden = false;
        let result = if player_blackjack && dealer_blackjack {
            RoundResult::Push
        } else if player_blackjack {
            RoundResult::Win
        } else {
            RoundResult::Loss
        };
        self.settle(result);
        Some(result)
    }

    /// Updates the tally and persists it for non-push results, then marks
    /// the round settled. A failed save loses nothing game-critical, so it
    /// is logged and swallowed.
    fn settle(&mut self, result: RoundResult) {
        match result {
            RoundResult::Win => self.record.wins += 1,
            RoundResult::Loss => self.record.losses += 1,
            RoundResult::Push => {}
        }
        if result != RoundResult::Push {
            if let Err(err) = self.store.save(self.record) {
                log::warn!("failed to persist win/loss record: {}", err);
            }
        }
        self.phase = GamePhase::Settled;
    }

    /// Draws one card. The pre-round reshuffle keeps the deck stocked under
    /// normal play; an abnormally long hand that empties it mid-round resets
    /// the deck rather than failing.
    fn draw(&mut self) -> Card {
        if self.deck.is_empty() {
            log::warn!("deck exhausted mid-round, resetting");
            self.deck.reset_and_shuffle();
        }
        match self.deck.draw_top() {
            Ok(card) => card,
            Err(EmptyDeckError) => unreachable!("deck was just refilled"),
        }
    }

    // Read-only queries for the presentation layer.

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_total(&self) -> u8 {
        self.player.value()
    }

    pub fn dealer_total(&self) -> u8 {
        self.dealer.value()
    }

    /// Dealer's first dealt card. Panics if called before any deal; the
    /// presentation layer gates on `phase`.
    pub fn dealer_up_card(&self) -> Card {
        debug_assert!(!self.dealer.is_empty(), "no up-card before the deal");
        self.dealer.cards()[0]
    }

    pub fn dealer_up_card_value(&self) -> u8 {
        self.dealer_up_card().value()
    }

    /// Whether the dealer's second card is still hidden. Presentation-only;
    /// valuation ignores it.
    pub fn hole_card_hidden(&self) -> bool {
        self.hole_card_hidden
    }

    pub fn is_player_bust(&self) -> bool {
        self.player.is_busted()
    }

    pub fn is_round_active(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::InitialDeal | GamePhase::PlayerTurn | GamePhase::DealerTurn
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn wins(&self) -> u32 {
        self.record.wins
    }

    pub fn losses(&self) -> u32 {
        self.record.losses
    }

    pub fn record(&self) -> Record {
        self.record
    }

    pub fn deck_size(&self) -> usize {
        self.deck.size()
    }
}

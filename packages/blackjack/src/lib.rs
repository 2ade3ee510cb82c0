mod card;
mod deck;
mod hand;
mod player;
mod record;
mod table;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, EmptyDeckError};
pub use hand::{hand_value, is_blackjack, is_busted, is_soft_hand, Hand};
pub use player::{Participant, PlayerAction, DEALER_STAND_THRESHOLD};
pub use record::{FileRecordStore, MemoryRecordStore, Record, RecordStore, RecordStoreError};
pub use table::{GamePhase, RoundResult, Table};

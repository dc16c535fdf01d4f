use crate::card::Card;
use crate::queue::FlashcardPriorityQueue;
use serde::{Deserialize, Serialize};

/// Point in time a card is due, local time without a zone.
pub type Timestamp = chrono::NaiveDateTime;

#[derive(Debug, thiserror::Error)]
pub enum FlashcardError {
    #[error("the queue is empty")]
    EmptyQueue,

    #[error("invalid timestamp {input:?}: {source}")]
    InvalidTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("card {front:?} can't be stored: {reason}")]
    UnstorableCard { front: String, reason: String },

    #[error("rescheduling past {0} overflows the calendar")]
    ScheduleOverflow(Timestamp),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type FlashcardResult<T> = Result<T, FlashcardError>;

/// How the user did on a card.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Deserialize, Serialize)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Decides when a reviewed card should be shown next.
pub trait Scheduler: std::fmt::Debug {
    /// New due time for a card answered with `outcome` at `now`.
    fn next_due(&self, outcome: Outcome, now: Timestamp) -> FlashcardResult<Timestamp>;
}

/// Something that holds a deck of cards outside of memory.
pub trait DeckStore: std::fmt::Debug {
    /// Read all cards into a fresh queue.
    fn load(&self) -> FlashcardResult<FlashcardPriorityQueue>;

    /// Write all cards in the queue. The queue holds the same cards afterwards, though cards
    /// with identical due times may come out in a different order later on.
    fn save(&self, queue: &mut FlashcardPriorityQueue) -> FlashcardResult<()>;

    /// Convenience to write a plain slice of cards.
    fn save_cards(&self, cards: &[Card]) -> FlashcardResult<()> {
        let mut queue = cards.iter().cloned().collect::<FlashcardPriorityQueue>();
        self.save(&mut queue)
    }
}

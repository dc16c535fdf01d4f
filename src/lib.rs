//! Spaced repetition flashcards, cards come back on a due date depending on how well they were
//! known.

/// Shared types, errors and traits.
pub mod traits;

// / A single card.
pub mod card;

/// Priority queue ordering cards by due date.
pub mod queue;

// / Algorithm things.
pub mod algorithm;

// / Decks on disk.
pub mod deck;

// / Session configuration.
pub mod config;

// / Implementor for a training loop.
pub mod training;

pub use card::Card;
pub use queue::FlashcardPriorityQueue;
pub use traits::{FlashcardError, FlashcardResult, Outcome, Timestamp};

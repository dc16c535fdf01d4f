use crate::traits::{FlashcardError, FlashcardResult, Timestamp};
use serde::{Deserialize, Serialize};

const DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DUE_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";

/// Parse a due date like `2019-11-04T13:03`, seconds and fractions thereof are optional.
pub fn parse_timestamp(input: &str) -> FlashcardResult<Timestamp> {
    let input = input.trim();
    Timestamp::parse_from_str(input, DUE_FORMAT)
        .or_else(|_| Timestamp::parse_from_str(input, DUE_FORMAT_MINUTES))
        .map_err(|source| FlashcardError::InvalidTimestamp {
            input: input.to_owned(),
            source,
        })
}

/// Format a due date such that [`parse_timestamp`] gives back the exact same value.
pub fn format_timestamp(due: &Timestamp) -> String {
    due.format(DUE_FORMAT).to_string()
}

/// A single flashcard, a front and a back and the moment it should be shown next.
///
/// Cards are ordered and compared by their due time only, two cards due at the same moment are
/// equal regardless of their text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Card {
    #[serde(with = "due_format")]
    due: Timestamp,
    front: String,
    back: String,
}

impl Card {
    /// Create a card from a textual due date, fails if the date can't be parsed.
    pub fn new(due: &str, front: &str, back: &str) -> FlashcardResult<Self> {
        Ok(Card::with_due(parse_timestamp(due)?, front, back))
    }

    pub fn with_due(due: Timestamp, front: &str, back: &str) -> Self {
        Card {
            due,
            front: front.to_owned(),
            back: back.to_owned(),
        }
    }

    /// Same texts, different due time.
    pub fn rescheduled(&self, due: Timestamp) -> Self {
        Card {
            due,
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }

    pub fn due(&self) -> Timestamp {
        self.due
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due
    }
}

impl Eq for Card {}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due.cmp(&other.due)
    }
}

/// Shows the due date the way decks are saved, so seconds are always present:
/// `DueDate: 2021-11-29T12:11:00 front: Belgrade back: Serbia`.
impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DueDate: {} front: {} back: {}",
            format_timestamp(&self.due),
            self.front,
            self.back
        )
    }
}

mod due_format {
    use super::{format_timestamp, parse_timestamp};
    use crate::traits::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(due: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(due))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

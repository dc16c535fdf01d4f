use crate::traits::*;
use chrono::Duration;

/// Longest delay a card can be pushed out by, about a century.
pub const MAX_INTERVAL_DAYS: i64 = 36500;

pub fn max_interval() -> Duration {
    Duration::days(MAX_INTERVAL_DAYS)
}

/// Shows a card again after a fixed delay, one for correct answers and one for incorrect ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIntervalScheduler {
    correct: Duration,
    incorrect: Duration,
}

fn check_interval(name: &str, interval: Duration) -> FlashcardResult<Duration> {
    if interval <= Duration::zero() {
        return Err(FlashcardError::InvalidConfig(format!(
            "{name} interval must be positive, got {interval}"
        )));
    }
    if interval > max_interval() {
        return Err(FlashcardError::InvalidConfig(format!(
            "{name} interval must be at most {MAX_INTERVAL_DAYS} days, got {interval}"
        )));
    }
    Ok(interval)
}

impl FixedIntervalScheduler {
    /// Both intervals must be positive and no longer than [`max_interval`].
    pub fn new(correct: Duration, incorrect: Duration) -> FlashcardResult<Self> {
        Ok(FixedIntervalScheduler {
            correct: check_interval("correct", correct)?,
            incorrect: check_interval("incorrect", incorrect)?,
        })
    }

    pub fn correct(&self) -> Duration {
        self.correct
    }

    pub fn incorrect(&self) -> Duration {
        self.incorrect
    }
}

impl Default for FixedIntervalScheduler {
    /// A day when known, a minute when missed.
    fn default() -> Self {
        FixedIntervalScheduler {
            correct: Duration::days(1),
            incorrect: Duration::minutes(1),
        }
    }
}

impl Scheduler for FixedIntervalScheduler {
    fn next_due(&self, outcome: Outcome, now: Timestamp) -> FlashcardResult<Timestamp> {
        let interval = match outcome {
            Outcome::Correct => self.correct,
            Outcome::Incorrect => self.incorrect,
        };
        now.checked_add_signed(interval)
            .ok_or(FlashcardError::ScheduleOverflow(now))
    }
}

use crate::card::Card;
use crate::queue::FlashcardPriorityQueue;
use crate::traits::*;
use tracing::debug;

/*
Implements the generic flow;
    Main flow;
        Load deck into queue

        While the earliest card is due:
            Take it out
            Present front, then back
            Obtain outcome
            Put it back with a new due time from the Scheduler

        Drain and refill the queue to save it.
*/

/// A review session, owns the queue of cards and the policy to reschedule them.
#[derive(Debug)]
pub struct Training<S: Scheduler> {
    queue: FlashcardPriorityQueue,
    scheduler: S,
}

impl<S: Scheduler> Training<S> {
    pub fn new(queue: FlashcardPriorityQueue, scheduler: S) -> Self {
        Training { queue, scheduler }
    }

    /// Take out the earliest card if it was due strictly before `now`.
    pub fn next_due(&mut self, now: Timestamp) -> Option<Card> {
        match self.queue.peek() {
            Ok(card) if card.due() < now => self.queue.extract_min().ok(),
            _ => None,
        }
    }

    /// Put a reviewed card back, returns the new due time. If no new due time can be picked the
    /// card goes back unchanged and the error is returned.
    pub fn answer(
        &mut self,
        card: Card,
        outcome: Outcome,
        now: Timestamp,
    ) -> FlashcardResult<Timestamp> {
        match self.scheduler.next_due(outcome, now) {
            Ok(due) => {
                debug!("{:?} for {:?}, next due {}", outcome, card.front(), due);
                self.queue.insert(card.rescheduled(due));
                Ok(due)
            }
            Err(e) => {
                self.queue.insert(card);
                Err(e)
            }
        }
    }

    /// Number of cards due strictly before `now`.
    pub fn due_count(&self, now: Timestamp) -> usize {
        self.queue.iter().filter(|c| c.due() < now).count()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queue(&self) -> &FlashcardPriorityQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut FlashcardPriorityQueue {
        &mut self.queue
    }

    pub fn into_queue(self) -> FlashcardPriorityQueue {
        self.queue
    }
}

//! Ternary min-heap of cards, keyed on their due time.
//!
//! The tree is stored implicitly in an array that is addressed 1-based; slot 0 is never used.
//! For a node at index `i` the children live at `3i - 1`, `3i` and `3i + 1`, and the parent at
//! `(i + 1) / 3`. The root, at index 1, is always a card with the earliest due time.

use crate::card::Card;
use crate::traits::{FlashcardError, FlashcardResult};
use tracing::debug;

/// Slots a fresh queue starts with, one usable slot plus the unused slot 0.
const DEFAULT_CAPACITY: usize = 2;

fn parent(index: usize) -> usize {
    (index + 1) / 3
}

fn children(index: usize) -> (usize, usize, usize) {
    (3 * index - 1, 3 * index, 3 * index + 1)
}

/// Priority queue holding cards, the card that is due first comes out first.
///
/// Cards that are due at the same moment come out in no particular order, and that order may
/// change as cards are taken out and put back.
#[derive(Debug, Clone)]
pub struct FlashcardPriorityQueue {
    /// Slot `i` of the heap lives at `cards[i - 1]`, so the unused slot 0 costs nothing.
    cards: Vec<Card>,
    /// Slot count including slot 0, doubles when full, never shrinks.
    capacity: usize,
}

impl Default for FlashcardPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashcardPriorityQueue {
    pub fn new() -> Self {
        FlashcardPriorityQueue {
            cards: Vec::with_capacity(DEFAULT_CAPACITY - 1),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Add a card, growing the storage if there is no free slot left.
    pub fn insert(&mut self, card: Card) {
        self.ensure_capacity();
        self.cards.push(card);
        self.sift_up(self.cards.len());
    }

    /// The card with the earliest due time, without removing it.
    pub fn peek(&self) -> FlashcardResult<&Card> {
        self.cards.first().ok_or(FlashcardError::EmptyQueue)
    }

    /// Remove and return the card with the earliest due time.
    pub fn extract_min(&mut self) -> FlashcardResult<Card> {
        if self.cards.is_empty() {
            return Err(FlashcardError::EmptyQueue);
        }
        // Moves the last card into the root and hands out the old root.
        let root = self.cards.swap_remove(0);
        if !self.cards.is_empty() {
            self.sift_down(1);
        }
        Ok(root)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards held.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Number of slots, including the unused slot 0.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all cards, the capacity is retained.
    pub fn clear(&mut self) {
        if !self.cards.is_empty() {
            debug!("clearing {} cards", self.cards.len());
        }
        self.cards.clear();
    }

    /// Cards in heap order, which is not sorted beyond the first entry.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Take out all cards in due order, leaves the queue empty.
    pub fn drain_sorted(&mut self) -> Vec<Card> {
        let mut res = Vec::with_capacity(self.len());
        while let Ok(card) = self.extract_min() {
            res.push(card);
        }
        res
    }

    fn slot(&self, index: usize) -> &Card {
        &self.cards[index - 1]
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.cards.swap(a - 1, b - 1);
    }

    fn ensure_capacity(&mut self) {
        if self.cards.len() + 1 == self.capacity {
            let new_capacity = self.capacity * 2;
            debug!(
                "growing queue from {} to {} slots",
                self.capacity, new_capacity
            );
            self.cards.reserve_exact(new_capacity - 1 - self.cards.len());
            self.capacity = new_capacity;
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        loop {
            let parent_index = parent(index);
            if parent_index == 0 || self.slot(parent_index) <= self.slot(index) {
                break;
            }
            self.swap_slots(index, parent_index);
            index = parent_index;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let size = self.cards.len();
        loop {
            let (left, middle, right) = children(index);
            if left > size {
                break;
            }
            // Left is the starting candidate, then right and middle in that order. Only matters
            // for ties.
            let mut earliest = left;
            if right <= size && self.slot(right) < self.slot(earliest) {
                earliest = right;
            }
            if middle <= size && self.slot(middle) < self.slot(earliest) {
                earliest = middle;
            }
            if self.slot(earliest) >= self.slot(index) {
                break;
            }
            self.swap_slots(index, earliest);
            index = earliest;
        }
    }
}

impl Extend<Card> for FlashcardPriorityQueue {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl FromIterator<Card> for FlashcardPriorityQueue {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut queue = FlashcardPriorityQueue::new();
        queue.extend(iter);
        queue
    }
}

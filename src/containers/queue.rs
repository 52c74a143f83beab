//! Unbounded FIFO queue.
//!
//! Backed by a growable ring buffer, so both `enqueue` (at the rear) and
//! `dequeue` (at the front) are O(1) amortised.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::OrderedContainer;
use crate::error::{CollectionError, Result};

/// First-in, first-out queue.
///
/// # Example
/// ```
/// use u_collections::containers::Queue;
///
/// let mut waiting = Queue::new();
/// waiting.enqueue("M001");
/// waiting.enqueue("M002");
///
/// assert_eq!(waiting.dequeue().unwrap(), "M001");
/// assert_eq!(waiting.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Adds `value` at the rear.
    pub fn enqueue(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes the front element.
    pub fn dequeue(&mut self) -> Result<T> {
        self.items
            .pop_front()
            .ok_or(CollectionError::EmptyCollection("Queue"))
    }

    /// Returns the front element.
    pub fn peek(&self) -> Result<&T> {
        self.items
            .front()
            .ok_or(CollectionError::EmptyCollection("Queue"))
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from front to rear.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> Queue<T> {
    /// Copies the queue contents, front first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedContainer<T> for Queue<T> {
    fn insert(&mut self, item: T) {
        self.enqueue(item);
    }

    fn take(&mut self) -> Result<T> {
        self.dequeue()
    }

    fn peek(&self) -> Result<&T> {
        Queue::peek(self)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Queue::new();
        for i in 1..=3 {
            queue.enqueue(i);
        }
        assert_eq!(queue.peek(), Ok(&1));
        assert_eq!(queue.dequeue(), Ok(1));
        assert_eq!(queue.dequeue(), Ok(2));
        queue.enqueue(4);
        assert_eq!(queue.to_vec(), vec![3, 4]);
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: Queue<String> = Queue::new();
        assert_eq!(
            queue.dequeue(),
            Err(CollectionError::EmptyCollection("Queue"))
        );
        assert!(queue.peek().is_err());
    }

    #[test]
    fn test_drain_then_reuse() {
        let mut queue = Queue::new();
        queue.enqueue('a');
        queue.dequeue().unwrap();
        assert!(queue.is_empty());

        queue.enqueue('b');
        assert_eq!(queue.peek(), Ok(&'b'));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear_and_iter() {
        let mut queue = Queue::new();
        queue.enqueue(10);
        queue.enqueue(20);
        assert_eq!(queue.iter().sum::<i32>(), 30);

        queue.clear();
        assert_eq!(queue.len(), 0);
    }
}

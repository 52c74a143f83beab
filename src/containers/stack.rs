//! Bounded LIFO stack with oldest-element eviction.
//!
//! Pushing onto a full stack drops the bottom element instead of
//! rejecting the new one, which suits undo histories: the most recent
//! `capacity` actions are always kept. Eviction shifts the backing vector
//! and costs O(n); fine for the intended small bounds (around 50), not for
//! large ones.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OrderedContainer;
use crate::config::StackConfig;
use crate::error::{CollectionError, Result};

/// Fixed-capacity stack. Bottom of the stack is index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stack<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T> Stack<T> {
    /// Creates a stack with the default capacity of 50.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: StackConfig::default().capacity,
        }
    }

    /// Creates a stack holding at most `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(&StackConfig { capacity })
    }

    /// Creates a stack from a validated configuration.
    pub fn with_config(config: &StackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            data: Vec::with_capacity(config.capacity),
            capacity: config.capacity,
        })
    }

    /// Pushes `value`, returning the evicted bottom element if the stack
    /// was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.data.len() >= self.capacity {
            debug!(capacity = self.capacity, "stack full, evicting bottom element");
            Some(self.data.remove(0))
        } else {
            None
        };
        self.data.push(value);
        evicted
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Result<T> {
        self.data.pop().ok_or(CollectionError::EmptyCollection("Stack"))
    }

    /// Returns the top element.
    pub fn peek(&self) -> Result<&T> {
        self.data.last().ok_or(CollectionError::EmptyCollection("Stack"))
    }

    /// Number of stacked elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum depth before eviction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedContainer<T> for Stack<T> {
    fn insert(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self) -> Result<T> {
        self.pop()
    }

    fn peek(&self) -> Result<&T> {
        Stack::peek(self)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = Stack::new();
        stack.push("a");
        stack.push("b");
        stack.push("c");

        assert_eq!(stack.peek(), Ok(&"c"));
        assert_eq!(stack.pop(), Ok("c"));
        assert_eq!(stack.pop(), Ok("b"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_empty_stack_errors() {
        let mut stack: Stack<u8> = Stack::new();
        assert_eq!(stack.pop(), Err(CollectionError::EmptyCollection("Stack")));
        assert!(stack.peek().is_err());
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut stack = Stack::with_capacity(3).unwrap();
        assert_eq!(stack.push(1), None);
        assert_eq!(stack.push(2), None);
        assert_eq!(stack.push(3), None);
        assert_eq!(stack.push(4), Some(1));

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn test_keeps_most_recent_after_many_pushes() {
        let mut stack = Stack::new();
        for i in 0..120 {
            stack.push(i);
        }
        assert_eq!(stack.len(), 50);
        assert_eq!(stack.pop(), Ok(119));
        assert_eq!(stack.iter().last(), Some(&70));
    }

    #[test]
    fn test_capacity_one() {
        let mut stack = Stack::with_capacity(1).unwrap();
        stack.push('x');
        assert_eq!(stack.push('y'), Some('x'));
        assert_eq!(stack.pop(), Ok('y'));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            Stack::<u8>::with_capacity(0),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 50);
    }
}

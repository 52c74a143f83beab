//! Sequential containers and history lists.
//!
//! | Type | Discipline | Notes |
//! |------|-----------|-------|
//! | [`Stack`] | LIFO | bounded; overflow evicts the oldest element |
//! | [`Queue`] | FIFO | unbounded, O(1) both ends |
//! | [`DoubleLinkedList`] | ordered list | navigation cursor (browser-style history) |
//! | [`XorLinkedList`] | ordered list | same contract, one combined link per node |
//!
//! The two lists store nodes in an index arena and address them by slot,
//! so no node holds a reference to another.
//!
//! # Contracts
//!
//! - [`OrderedContainer`]: insert / take / peek, shared with
//!   [`MinHeap`](crate::heap::MinHeap).
//! - [`HistoryNavigation`]: add / forward / backward / current / reset.

mod double_list;
mod queue;
mod stack;
mod xor_list;

pub use double_list::{DoubleLinkedList, Iter};
pub use queue::Queue;
pub use stack::Stack;
pub use xor_list::{Walk, XorLinkedList};

use crate::error::Result;

/// A container that hands elements back in a fixed discipline
/// (LIFO, FIFO, or smallest-first).
pub trait OrderedContainer<T> {
    /// Adds an element. A bounded container may evict to make room.
    fn insert(&mut self, item: T);

    /// Removes the next element in the container's order.
    ///
    /// Fails with `EmptyCollection` when there is nothing to take.
    fn take(&mut self) -> Result<T>;

    /// Returns the element `take` would remove.
    fn peek(&self) -> Result<&T>;

    /// Number of stored elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cursor-based back/forward navigation over an ordered list.
///
/// The cursor starts on the first element added. Moving past either end
/// returns `None` and leaves the cursor where it was.
pub trait HistoryNavigation<T> {
    /// Appends an element at the end.
    fn add(&mut self, item: T);

    /// Moves the cursor one step toward the tail.
    fn navigate_forward(&mut self) -> Option<&T>;

    /// Moves the cursor one step toward the head.
    fn navigate_backward(&mut self) -> Option<&T>;

    /// Element under the cursor.
    fn current(&self) -> Option<&T>;

    /// Moves the cursor back to the head.
    fn reset_navigation(&mut self);

    /// Number of stored elements.
    fn len(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::MinHeap;

    fn fill_and_drain<C: OrderedContainer<u32>>(container: &mut C) -> Vec<u32> {
        for value in [3, 1, 2] {
            container.insert(value);
        }
        let mut out = Vec::new();
        while let Ok(item) = container.take() {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_disciplines_differ() {
        let mut stack = Stack::with_capacity(10).unwrap();
        let mut queue = Queue::new();
        let mut heap = MinHeap::new();

        assert_eq!(fill_and_drain(&mut stack), vec![2, 1, 3]);
        assert_eq!(fill_and_drain(&mut queue), vec![3, 1, 2]);
        assert_eq!(fill_and_drain(&mut heap), vec![1, 2, 3]);
        assert!(OrderedContainer::is_empty(&heap));
    }

    fn walk<L: HistoryNavigation<&'static str>>(list: &mut L) -> Vec<&'static str> {
        list.add("home");
        list.add("classes");
        list.add("trainers");

        let mut visited = Vec::new();
        while let Some(page) = list.navigate_forward() {
            visited.push(*page);
        }
        while let Some(page) = list.navigate_backward() {
            visited.push(*page);
        }
        visited
    }

    #[test]
    fn test_lists_share_navigation() {
        let expected = vec!["classes", "trainers", "classes", "home"];
        assert_eq!(walk(&mut DoubleLinkedList::new()), expected);
        assert_eq!(walk(&mut XorLinkedList::new()), expected);
    }

    #[test]
    fn test_list_iterators_are_nameable() {
        let mut double = DoubleLinkedList::new();
        let mut xor = XorLinkedList::new();
        for page in ["home", "classes"] {
            double.add(page);
            xor.add(page);
        }
        let forward: Iter<'_, &str> = double.iter();
        let links: Walk<'_, &str> = xor.iter();
        assert!(forward.copied().eq(links.copied()));
    }
}

//! Doubly linked list with a navigation cursor.
//!
//! Nodes live in an arena (`Vec<Option<Node>>`) and point at each other by
//! slot index. Slots freed by `remove_last` go on a free list and are
//! reused by later insertions.
//!
//! The cursor models browser-style history: it starts on the first
//! element ever added, moves one step per `navigate_*` call, and stays put
//! when asked to move past either end.

use serde::{Deserialize, Serialize};

use super::HistoryNavigation;
use crate::error::{CollectionError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Bidirectional list with a history cursor.
///
/// # Example
/// ```
/// use u_collections::containers::DoubleLinkedList;
///
/// let mut history = DoubleLinkedList::new();
/// history.add("profile");
/// history.add("bookings");
///
/// assert_eq!(history.current(), Some(&"profile"));
/// assert_eq!(history.navigate_forward(), Some(&"bookings"));
/// assert_eq!(history.navigate_forward(), None);
/// assert_eq!(history.navigate_backward(), Some(&"profile"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubleLinkedList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    cursor: Option<usize>,
    len: usize,
}

impl<T> DoubleLinkedList<T> {
    /// Creates an empty list with a detached cursor.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            cursor: None,
            len: 0,
        }
    }

    fn node(&self, index: usize) -> Option<&Node<T>> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        self.nodes.get_mut(index).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Appends `value` at the tail.
    pub fn add(&mut self, value: T) {
        let index = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(index);
                }
            }
            None => {
                self.head = Some(index);
                self.cursor = Some(index);
            }
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Prepends `value` at the head.
    pub fn add_first(&mut self, value: T) {
        let index = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(index);
                }
            }
            None => {
                self.tail = Some(index);
                self.cursor = Some(index);
            }
        }
        self.head = Some(index);
        self.len += 1;
    }

    /// Removes and returns the tail element.
    ///
    /// A cursor sitting on the removed node moves to the new tail.
    pub fn remove_last(&mut self) -> Result<T> {
        let tail = self
            .tail
            .ok_or(CollectionError::EmptyCollection("DoubleLinkedList"))?;
        let node = self
            .nodes
            .get_mut(tail)
            .and_then(Option::take)
            .ok_or(CollectionError::EmptyCollection("DoubleLinkedList"))?;
        self.free.push(tail);

        match node.prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = None;
                }
            }
            None => self.head = None,
        }
        self.tail = node.prev;
        if self.cursor == Some(tail) {
            self.cursor = self.tail;
        }
        self.len -= 1;
        Ok(node.value)
    }

    /// Moves the cursor toward the tail and returns the new current element.
    pub fn navigate_forward(&mut self) -> Option<&T> {
        let next = self.node(self.cursor?)?.next?;
        self.cursor = Some(next);
        self.node(next).map(|n| &n.value)
    }

    /// Moves the cursor toward the head and returns the new current element.
    pub fn navigate_backward(&mut self) -> Option<&T> {
        let prev = self.node(self.cursor?)?.prev?;
        self.cursor = Some(prev);
        self.node(prev).map(|n| &n.value)
    }

    /// Element under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.node(self.cursor?).map(|n| &n.value)
    }

    /// Moves the cursor back to the head.
    pub fn reset_navigation(&mut self) {
        self.cursor = self.head;
    }

    /// Element at position `index` from the head. O(n).
    pub fn get(&self, index: usize) -> Result<&T> {
        self.iter()
            .nth(index)
            .ok_or(CollectionError::IndexOutOfBounds {
                index,
                len: self.len,
            })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every element and detaches the cursor.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.cursor = None;
        self.len = 0;
    }

    /// Iterates head to tail; `.rev()` walks tail to head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }
}

impl<T> Default for DoubleLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryNavigation<T> for DoubleLinkedList<T> {
    fn add(&mut self, item: T) {
        DoubleLinkedList::add(self, item);
    }

    fn navigate_forward(&mut self) -> Option<&T> {
        DoubleLinkedList::navigate_forward(self)
    }

    fn navigate_backward(&mut self) -> Option<&T> {
        DoubleLinkedList::navigate_backward(self)
    }

    fn current(&self) -> Option<&T> {
        DoubleLinkedList::current(self)
    }

    fn reset_navigation(&mut self) {
        DoubleLinkedList::reset_navigation(self);
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Borrowing iterator over a [`DoubleLinkedList`].
pub struct Iter<'a, T> {
    nodes: &'a [Option<Node<T>>],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?)?.as_ref()?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?)?.as_ref()?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

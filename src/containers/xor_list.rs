//! XOR-linked list over an index arena.
//!
//! Variables:
//!   h(n)    : usize  handle of node n = arena slot + 1; NIL = 0
//!   link(n) : usize  h(prev(n)) XOR h(next(n))
//!
//! Equations:
//!   next(n) = link(n) XOR h(prev(n))
//!   prev(n) = link(n) XOR h(next(n))
//!   link(head) = h(second),  link(tail) = h(second-to-last)
//!
//! A walk carries the handle of the node it came from and recovers the
//! node it goes to from `link`. Because XOR is symmetric, the same walk
//! started at the tail runs backward.

use serde::{Deserialize, Serialize};

use super::HistoryNavigation;
use crate::error::{CollectionError, Result};

const NIL: usize = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct XorNode<T> {
    value: T,
    link: usize,
}

/// Position of the navigation cursor: the node it is on and the node
/// immediately before it (toward the head).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Cursor {
    prev: usize,
    current: usize,
}

impl Cursor {
    const DETACHED: Cursor = Cursor {
        prev: NIL,
        current: NIL,
    };
}

/// Ordered list storing one combined link per node.
///
/// Offers the same history-navigation contract as
/// [`DoubleLinkedList`](super::DoubleLinkedList).
///
/// # Example
/// ```
/// use u_collections::containers::XorLinkedList;
///
/// let mut workouts = XorLinkedList::new();
/// workouts.add("squat");
/// workouts.add("bench");
/// workouts.add("deadlift");
///
/// assert_eq!(workouts.traverse_backward(), vec![&"deadlift", &"bench", &"squat"]);
/// assert_eq!(workouts.get(1).unwrap(), &"bench");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XorLinkedList<T> {
    nodes: Vec<Option<XorNode<T>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    cursor: Cursor,
    len: usize,
}

impl<T> XorLinkedList<T> {
    /// Creates an empty list with a detached cursor.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            cursor: Cursor::DETACHED,
            len: 0,
        }
    }

    fn node(&self, handle: usize) -> Option<&XorNode<T>> {
        if handle == NIL {
            return None;
        }
        self.nodes.get(handle - 1).and_then(Option::as_ref)
    }

    fn link(&self, handle: usize) -> usize {
        self.node(handle).map_or(NIL, |n| n.link)
    }

    /// XORs `delta` into the link of `handle`, swapping one neighbour for
    /// another.
    fn relink(&mut self, handle: usize, delta: usize) {
        if handle == NIL {
            return;
        }
        if let Some(node) = self.nodes.get_mut(handle - 1).and_then(Option::as_mut) {
            node.link ^= delta;
        }
    }

    fn alloc(&mut self, node: XorNode<T>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot + 1
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len()
            }
        }
    }

    /// Appends `value` at the tail.
    pub fn add(&mut self, value: T) {
        let handle = self.alloc(XorNode {
            value,
            link: self.tail,
        });
        if self.tail == NIL {
            self.head = handle;
            self.cursor = Cursor {
                prev: NIL,
                current: handle,
            };
        } else {
            self.relink(self.tail, handle);
        }
        self.tail = handle;
        self.len += 1;
    }

    /// Prepends `value` at the head.
    pub fn add_first(&mut self, value: T) {
        let handle = self.alloc(XorNode {
            value,
            link: self.head,
        });
        if self.head == NIL {
            self.tail = handle;
            self.cursor = Cursor {
                prev: NIL,
                current: handle,
            };
        } else {
            self.relink(self.head, handle);
            if self.cursor.current == self.head {
                self.cursor.prev = handle;
            }
        }
        self.head = handle;
        self.len += 1;
    }

    /// Removes and returns the tail element.
    ///
    /// A cursor sitting on the removed node moves to the new tail.
    pub fn remove_last(&mut self) -> Result<T> {
        let tail = self.tail;
        let node = match tail {
            NIL => None,
            handle => self.nodes.get_mut(handle - 1).and_then(Option::take),
        }
        .ok_or(CollectionError::EmptyCollection("XorLinkedList"))?;
        self.free.push(tail - 1);

        // The tail's link is just its predecessor.
        let prev = node.link;
        self.relink(prev, tail);
        if prev == NIL {
            self.head = NIL;
        }
        self.tail = prev;

        if self.cursor.current == tail {
            self.cursor = Cursor {
                prev: self.link(prev),
                current: prev,
            };
        }
        self.len -= 1;
        Ok(node.value)
    }

    /// Moves the cursor toward the tail.
    pub fn navigate_forward(&mut self) -> Option<&T> {
        let Cursor { prev, current } = self.cursor;
        let node = self.node(current)?;
        let next = node.link ^ prev;
        if next == NIL {
            return None;
        }
        self.cursor = Cursor {
            prev: current,
            current: next,
        };
        self.node(next).map(|n| &n.value)
    }

    /// Moves the cursor toward the head.
    pub fn navigate_backward(&mut self) -> Option<&T> {
        let Cursor { prev, current } = self.cursor;
        if prev == NIL {
            return None;
        }
        self.cursor = Cursor {
            prev: self.link(prev) ^ current,
            current: prev,
        };
        self.node(prev).map(|n| &n.value)
    }

    /// Element under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.node(self.cursor.current).map(|n| &n.value)
    }

    /// Moves the cursor back to the head.
    pub fn reset_navigation(&mut self) {
        self.cursor = Cursor {
            prev: NIL,
            current: self.head,
        };
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> Walk<'_, T> {
        self.walk_from(self.head)
    }

    fn walk_from(&self, start: usize) -> Walk<'_, T> {
        Walk {
            list: self,
            prev: NIL,
            current: start,
            remaining: self.len,
        }
    }

    /// All elements, head to tail.
    pub fn traverse_forward(&self) -> Vec<&T> {
        self.walk_from(self.head).collect()
    }

    /// All elements, tail to head.
    pub fn traverse_backward(&self) -> Vec<&T> {
        self.walk_from(self.tail).collect()
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
        self.head = NIL;
        self.tail = NIL;
        self.cursor = Cursor::DETACHED;
        self.len = 0;
    }
}

impl<T> Default for XorLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryNavigation<T> for XorLinkedList<T> {
    fn add(&mut self, item: T) {
        XorLinkedList::add(self, item);
    }

    fn navigate_forward(&mut self) -> Option<&T> {
        XorLinkedList::navigate_forward(self)
    }

    fn navigate_backward(&mut self) -> Option<&T> {
        XorLinkedList::navigate_backward(self)
    }

    fn current(&self) -> Option<&T> {
        XorLinkedList::current(self)
    }

    fn reset_navigation(&mut self) {
        XorLinkedList::reset_navigation(self);
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Walk over an [`XorLinkedList`] from one end to the other.
pub struct Walk<'a, T> {
    list: &'a XorLinkedList<T>,
    prev: usize,
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.current)?;
        let next = node.link ^ self.prev;
        self.prev = self.current;
        self.current = next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

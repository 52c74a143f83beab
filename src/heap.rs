//! Array-backed binary min-heap.
//!
//! Variables:
//!   data : Vec<T>  heap array, 0-indexed
//!
//! Equations:
//!   parent(i) = (i - 1) / 2,  left(i) = 2i + 1,  right(i) = 2i + 2
//!   invariant: data[parent(i)] <= data[i]  for all i > 0
//!
//!   insert(x):     push x, sift_up(N-1)                      O(log N)
//!   extract_min(): swap(0, N-1), pop, sift_down(0)            O(log N)
//!   from_vec(v):   sift_down(i) for i = parent(N-1) down to 0 O(N)
//!
//! There is no `decrease_key`: changing an element's priority means
//! extracting it and inserting the updated value.

use serde::{Deserialize, Serialize};

use crate::containers::OrderedContainer;
use crate::error::{CollectionError, Result};

/// Binary min-heap. The root is always the smallest element.
///
/// # Example
/// ```
/// use u_collections::heap::MinHeap;
///
/// let mut appointments = MinHeap::new();
/// appointments.insert((3, "yoga"));
/// appointments.insert((1, "spin"));
/// appointments.insert((2, "boxing"));
///
/// assert_eq!(appointments.extract_min().unwrap(), (1, "spin"));
/// assert_eq!(appointments.peek_min().unwrap(), &(2, "boxing"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinHeap<T> {
    data: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Builds a heap from arbitrary elements in O(n).
    pub fn from_vec(data: Vec<T>) -> Self {
        let mut heap = Self { data };
        if heap.data.len() > 1 {
            for i in (0..=(heap.data.len() - 2) / 2).rev() {
                heap.sift_down(i);
            }
        }
        heap
    }

    /// Adds `value`, restoring the heap order.
    pub fn insert(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the smallest element.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.data.is_empty() {
            return Err(CollectionError::EmptyCollection("MinHeap"));
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let min = self.data.pop().ok_or(CollectionError::EmptyCollection("MinHeap"))?;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Returns the smallest element without removing it.
    pub fn peek_min(&self) -> Result<&T> {
        self.data
            .first()
            .ok_or(CollectionError::EmptyCollection("MinHeap"))
    }

    /// Consumes the heap, returning its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(value) = self.extract_min() {
            sorted.push(value);
        }
        sorted
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = (i - 1) / 2;
            if self.data[i] >= self.data[p] {
                break;
            }
            self.data.swap(p, i);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.data.len();
        loop {
            let mut smallest = i;
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            if l < n && self.data[l] < self.data[smallest] {
                smallest = l;
            }
            if r < n && self.data[r] < self.data[smallest] {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.data.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T> MinHeap<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Elements in heap-array order (not sorted).
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> OrderedContainer<T> for MinHeap<T> {
    fn insert(&mut self, item: T) {
        MinHeap::insert(self, item);
    }

    fn take(&mut self) -> Result<T> {
        self.extract_min()
    }

    fn peek(&self) -> Result<&T> {
        self.peek_min()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

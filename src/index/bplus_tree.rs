//! B+Tree with preemptive splitting and linked leaves.
//!
//! # Algorithm
//!
//! Internal nodes hold separator keys and `keys + 1` child handles; leaves
//! hold keys with parallel values and a link to the next leaf. A key equal
//! to a separator lives in the right subtree, so every descent picks the
//! child at the first separator strictly greater than the key.
//!
//! **Insert** walks down from the root and splits any full child (order − 1
//! keys) before stepping into it. The parent therefore always has room
//! for the promoted key and no split ever propagates upward. Only a full
//! root grows the tree, by one level.
//!
//! - Leaf split: the upper half moves to a new right leaf spliced into the
//!   chain; the right leaf's first key is copied into the parent.
//! - Internal split: the upper half moves to a new right node; the middle
//!   key moves up and is not kept below.
//!
//! **Remove** deletes from the leaf and repairs underfull nodes on the way
//! back up: borrow one entry from a sibling with spare keys, otherwise merge
//! with a sibling and drop the separator from the parent. A root left with
//! no keys is replaced by its only child.
//!
//! Every non-root node keeps between `order/2 − 1` and `order − 1` keys. The
//! order must be even so a split of `order − 1` keys leaves both halves at or
//! above that minimum.
//!
//! # Complexity
//! O(log n) for `insert`, `search` and `remove`; O(log n + k) for a range
//! returning k values.

use std::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::BPlusTreeConfig;
use crate::error::Result;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node<K, V> {
    Internal {
        keys: Vec<K>,
        children: Vec<usize>,
    },
    Leaf {
        keys: Vec<K>,
        values: Vec<V>,
        next: Option<usize>,
    },
}

impl<K, V> Node<K, V> {
    fn empty_leaf() -> Self {
        Node::Leaf {
            keys: Vec::new(),
            values: Vec::new(),
            next: None,
        }
    }

    fn keys(&self) -> &[K] {
        match self {
            Node::Internal { keys, .. } | Node::Leaf { keys, .. } => keys,
        }
    }

    fn children(&self) -> &[usize] {
        match self {
            Node::Internal { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }
}

/// B+Tree mapping ordered keys to values.
///
/// Nodes live in an arena and refer to each other by slot index. Slots
/// released by merges are reused by later splits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BPlusTree<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    root: usize,
    order: usize,
    len: usize,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Creates an empty tree of order 4.
    pub fn new() -> Self {
        Self::empty(BPlusTreeConfig::default().order)
    }

    /// Creates an empty tree with at most `order` children per node.
    ///
    /// Fails with `InvalidArgument` unless `order` is even and at least 4.
    pub fn with_order(order: usize) -> Result<Self> {
        Self::with_config(&BPlusTreeConfig { order })
    }

    /// Creates an empty tree from a validated configuration.
    pub fn with_config(config: &BPlusTreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config.order))
    }

    fn empty(order: usize) -> Self {
        Self {
            nodes: vec![Node::empty_leaf()],
            free: Vec::new(),
            root: 0,
            order,
            len: 0,
        }
    }

    fn max_keys(&self) -> usize {
        self.order - 1
    }

    fn min_keys(&self) -> usize {
        self.order / 2 - 1
    }

    fn alloc(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: usize) {
        self.nodes[id] = Node::empty_leaf();
        self.free.push(id);
    }

    fn take(&mut self, id: usize) -> Node<K, V> {
        mem::replace(&mut self.nodes[id], Node::empty_leaf())
    }

    fn is_full(&self, id: usize) -> bool {
        self.nodes[id].keys().len() >= self.max_keys()
    }

    /// Inserts `key`, returning the value it replaced if it was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.is_full(self.root) {
            let old_root = self.root;
            self.root = self.alloc(Node::Internal {
                keys: Vec::new(),
                children: vec![old_root],
            });
            self.split_child(self.root, 0);
            debug!(height = self.height(), "B+Tree root split");
        }

        let mut id = self.root;
        loop {
            let (slot, child) = match &self.nodes[id] {
                Node::Leaf { .. } => break,
                Node::Internal { keys, children } => {
                    let slot = keys.partition_point(|k| *k <= key);
                    (slot, children[slot])
                }
            };
            id = if self.is_full(child) {
                self.split_child(id, slot);
                let node = &self.nodes[id];
                if key >= node.keys()[slot] {
                    node.children()[slot + 1]
                } else {
                    node.children()[slot]
                }
            } else {
                child
            };
        }

        if let Node::Leaf { keys, values, .. } = &mut self.nodes[id] {
            match keys.binary_search(&key) {
                Ok(pos) => return Some(mem::replace(&mut values[pos], value)),
                Err(pos) => {
                    keys.insert(pos, key);
                    values.insert(pos, value);
                }
            }
        }
        self.len += 1;
        None
    }

    /// Splits the full child at `slot` of `parent` into two siblings.
    fn split_child(&mut self, parent: usize, slot: usize) {
        let child = self.nodes[parent].children()[slot];
        let (right, separator) = match &mut self.nodes[child] {
            Node::Leaf { keys, values, next } => {
                let mid = keys.len() / 2;
                let right_keys = keys.split_off(mid);
                let right_values = values.split_off(mid);
                let separator = right_keys[0].clone();
                let right = Node::Leaf {
                    keys: right_keys,
                    values: right_values,
                    next: *next,
                };
                (right, separator)
            }
            Node::Internal { keys, children } => {
                let mid = keys.len() / 2;
                let mut right_keys = keys.split_off(mid);
                let separator = right_keys.remove(0);
                let right_children = children.split_off(mid + 1);
                let right = Node::Internal {
                    keys: right_keys,
                    children: right_children,
                };
                (right, separator)
            }
        };

        let right_id = self.alloc(right);
        if let Node::Leaf { next, .. } = &mut self.nodes[child] {
            *next = Some(right_id);
        }
        if let Node::Internal { keys, children } = &mut self.nodes[parent] {
            keys.insert(slot, separator);
            children.insert(slot + 1, right_id);
        }
        trace!(node = child, sibling = right_id, "B+Tree node split");
    }

    fn find_leaf(&self, key: &K) -> usize {
        let mut id = self.root;
        while let Node::Internal { keys, children } = &self.nodes[id] {
            id = children[keys.partition_point(|k| k <= key)];
        }
        id
    }

    /// Returns the value stored under `key`.
    pub fn search(&self, key: &K) -> Option<&V> {
        match &self.nodes[self.find_leaf(key)] {
            Node::Leaf { keys, values, .. } => {
                keys.binary_search(key).ok().map(|pos| &values[pos])
            }
            Node::Internal { .. } => None,
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Values whose keys fall in `lo..=hi`, in ascending key order.
    ///
    /// Returns an empty vector when `lo > hi`.
    pub fn range_search(&self, lo: &K, hi: &K) -> Vec<&V> {
        let mut out = Vec::new();
        if lo > hi {
            return out;
        }
        let mut leaf = Some(self.find_leaf(lo));
        while let Some(id) = leaf {
            let Node::Leaf { keys, values, next } = &self.nodes[id] else {
                break;
            };
            for (key, value) in keys.iter().zip(values) {
                if key > hi {
                    return out;
                }
                if key >= lo {
                    out.push(value);
                }
            }
            leaf = *next;
        }
        out
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.remove_from(self.root, key)?;
        self.len -= 1;

        if let Node::Internal { keys, children } = &self.nodes[self.root] {
            if keys.is_empty() {
                let old_root = self.root;
                self.root = children[0];
                self.release(old_root);
                debug!(height = self.height(), "B+Tree root collapsed");
            }
        }
        Some(removed)
    }

    fn remove_from(&mut self, id: usize, key: &K) -> Option<V> {
        let (slot, child) = match &mut self.nodes[id] {
            Node::Leaf { keys, values, .. } => {
                let pos = keys.binary_search(key).ok()?;
                keys.remove(pos);
                return Some(values.remove(pos));
            }
            Node::Internal { keys, children } => {
                let slot = keys.partition_point(|k| k <= key);
                (slot, children[slot])
            }
        };

        let removed = self.remove_from(child, key)?;
        if self.nodes[child].keys().len() < self.min_keys() {
            self.rebalance(id, slot);
        }
        Some(removed)
    }

    /// Restores the minimum fill of the child at `slot` of `parent`.
    fn rebalance(&mut self, parent: usize, slot: usize) {
        let siblings = self.nodes[parent].children().len();
        let spare = |tree: &Self, id: usize| tree.nodes[id].keys().len() > tree.min_keys();

        if slot > 0 && spare(self, self.nodes[parent].children()[slot - 1]) {
            self.borrow_from_left(parent, slot);
        } else if slot + 1 < siblings && spare(self, self.nodes[parent].children()[slot + 1]) {
            self.borrow_from_right(parent, slot);
        } else if slot > 0 {
            self.merge(parent, slot - 1);
        } else if slot + 1 < siblings {
            self.merge(parent, slot);
        }
    }

    fn borrow_from_left(&mut self, parent: usize, slot: usize) {
        let left_id = self.nodes[parent].children()[slot - 1];
        let child_id = self.nodes[parent].children()[slot];
        let mut left = self.take(left_id);
        let mut child = self.take(child_id);

        if let Node::Internal { keys: separators, .. } = &mut self.nodes[parent] {
            match (&mut left, &mut child) {
                (
                    Node::Leaf { keys: lk, values: lv, .. },
                    Node::Leaf { keys: ck, values: cv, .. },
                ) => {
                    if let (Some(key), Some(value)) = (lk.pop(), lv.pop()) {
                        separators[slot - 1] = key.clone();
                        ck.insert(0, key);
                        cv.insert(0, value);
                    }
                }
                (
                    Node::Internal { keys: lk, children: lc },
                    Node::Internal { keys: ck, children: cc },
                ) => {
                    if let (Some(key), Some(grandchild)) = (lk.pop(), lc.pop()) {
                        let separator = mem::replace(&mut separators[slot - 1], key);
                        ck.insert(0, separator);
                        cc.insert(0, grandchild);
                    }
                }
                _ => {}
            }
        }

        self.nodes[left_id] = left;
        self.nodes[child_id] = child;
        trace!(node = child_id, sibling = left_id, "B+Tree borrow from left");
    }

    fn borrow_from_right(&mut self, parent: usize, slot: usize) {
        let child_id = self.nodes[parent].children()[slot];
        let right_id = self.nodes[parent].children()[slot + 1];
        let mut child = self.take(child_id);
        let mut right = self.take(right_id);

        if let Node::Internal { keys: separators, .. } = &mut self.nodes[parent] {
            match (&mut child, &mut right) {
                (
                    Node::Leaf { keys: ck, values: cv, .. },
                    Node::Leaf { keys: rk, values: rv, .. },
                ) => {
                    if !rk.is_empty() {
                        ck.push(rk.remove(0));
                        cv.push(rv.remove(0));
                        if let Some(first) = rk.first() {
                            separators[slot] = first.clone();
                        }
                    }
                }
                (
                    Node::Internal { keys: ck, children: cc },
                    Node::Internal { keys: rk, children: rc },
                ) => {
                    if !rk.is_empty() {
                        let separator = mem::replace(&mut separators[slot], rk.remove(0));
                        ck.push(separator);
                        cc.push(rc.remove(0));
                    }
                }
                _ => {}
            }
        }

        self.nodes[child_id] = child;
        self.nodes[right_id] = right;
        trace!(node = child_id, sibling = right_id, "B+Tree borrow from right");
    }

    /// Merges child `left_slot + 1` of `parent` into child `left_slot`.
    fn merge(&mut self, parent: usize, left_slot: usize) {
        let left_id = self.nodes[parent].children()[left_slot];
        let right_id = self.nodes[parent].children()[left_slot + 1];
        let right = self.take(right_id);

        let Node::Internal { keys, children } = &mut self.nodes[parent] else {
            return;
        };
        children.remove(left_slot + 1);
        let separator = keys.remove(left_slot);

        match (&mut self.nodes[left_id], right) {
            (
                Node::Leaf { keys, values, next },
                Node::Leaf {
                    keys: rk,
                    values: rv,
                    next: rn,
                },
            ) => {
                keys.extend(rk);
                values.extend(rv);
                *next = rn;
            }
            (
                Node::Internal { keys, children },
                Node::Internal {
                    keys: rk,
                    children: rc,
                },
            ) => {
                keys.push(separator);
                keys.extend(rk);
                children.extend(rc);
            }
            _ => {}
        }

        self.free.push(right_id);
        trace!(node = left_id, absorbed = right_id, "B+Tree merge");
    }

    /// Number of levels, counting the leaf level.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut id = self.root;
        while let Node::Internal { children, .. } = &self.nodes[id] {
            id = children[0];
            height += 1;
        }
        height
    }

    /// Maximum children per internal node.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry, leaving a single empty leaf.
    pub fn clear(&mut self) {
        *self = Self::empty(self.order);
    }

    fn leftmost_leaf(&self) -> usize {
        let mut id = self.root;
        while let Node::Internal { children, .. } = &self.nodes[id] {
            id = children[0];
        }
        id
    }

    /// Smallest key, if any.
    pub fn first_key(&self) -> Option<&K> {
        self.nodes[self.leftmost_leaf()].keys().first()
    }

    /// Largest key, if any.
    pub fn last_key(&self) -> Option<&K> {
        let mut id = self.root;
        while let Node::Internal { children, .. } = &self.nodes[id] {
            id = children[children.len() - 1];
        }
        self.nodes[id].keys().last()
    }

    /// Iterates entries in ascending key order along the leaf chain.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            leaf: Some(self.leftmost_leaf()),
            pos: 0,
        }
    }
}

impl<K: Ord + Clone, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V> KeyValueStore<K, V> for BPlusTree<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.search(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BPlusTree::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        BPlusTree::clear(self);
    }
}

/// Ascending iterator over a [`BPlusTree`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    leaf: Option<usize>,
    pos: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        loop {
            let Node::Leaf { keys, values, next } = &nodes[self.leaf?] else {
                return None;
            };
            if let (Some(key), Some(value)) = (keys.get(self.pos), values.get(self.pos)) {
                self.pos += 1;
                return Some((key, value));
            }
            self.leaf = *next;
            self.pos = 0;
        }
    }
}

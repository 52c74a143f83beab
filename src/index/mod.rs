//! Ordered range index.
//!
//! Provides [`BPlusTree`], a multi-way search tree whose values all live in
//! linked leaves. Point lookups descend from the root; range scans descend
//! once to the first candidate leaf and then follow the leaf chain.
//!
//! # Usage
//!
//! ```
//! use u_collections::index::BPlusTree;
//!
//! let mut by_date = BPlusTree::new();
//! for (day, booking) in [(3, "B3"), (1, "B1"), (7, "B7"), (5, "B5")] {
//!     by_date.insert(day, booking);
//! }
//!
//! assert_eq!(by_date.search(&5), Some(&"B5"));
//! assert_eq!(by_date.range_search(&2, &6), vec![&"B3", &"B5"]);
//! ```
//!
//! # References
//!
//! - Comer (1979), "The Ubiquitous B-Tree", ACM Computing Surveys 11(2)
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 18

mod bplus_tree;

pub use bplus_tree::{BPlusTree, Iter};

//! In-memory data structures for indexing and scheduling records.
//!
//! Provides key/value stores, a range index, a priority queue, graph
//! analysis, text search and compression, and a handful of sequential
//! containers. Each structure is independent: an owner holds one instance
//! per concern and drives it through its public operations.
//!
//! # Modules
//!
//! - **`hashing`**: `HashTable` (separate chaining), `LinearProbingHash`
//!   (open addressing with tombstones)
//! - **`index`**: `BPlusTree` range index with linked leaves
//! - **`heap`**: `MinHeap` priority queue
//! - **`graph`**: `Graph` with BFS, DFS and strongly connected components
//! - **`text`**: KMP search and `HuffmanCoding`
//! - **`sparse`**: `SparseMatrix` over a fixed grid
//! - **`containers`**: `Stack`, `Queue`, `DoubleLinkedList`, `XorLinkedList`
//! - **`store`**: the `KeyValueStore` contract shared by the hash tables and
//!   the B+Tree
//! - **`config`**: tunables for every structure
//! - **`error`**: `CollectionError` and the crate `Result` alias
//!
//! # Concurrency
//!
//! Nothing here is synchronized. Every mutator takes `&mut self`, so a
//! caller that shares a structure across threads wraps it in a lock.
//!
//! # Persistence
//!
//! All structures implement `serde::Serialize` and `serde::Deserialize`,
//! carrying cursors, counters and tombstones. Choosing a format and writing
//! it to disk is left to the caller.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms"
//! - Knuth (1998), "The Art of Computer Programming, Vol. 3: Sorting and
//!   Searching"

pub mod config;
pub mod containers;
pub mod error;
pub mod graph;
pub mod hashing;
pub mod heap;
pub mod index;
pub mod sparse;
pub mod store;
pub mod text;

pub use config::CollectionsConfig;
pub use error::{CollectionError, Result};
pub use store::KeyValueStore;

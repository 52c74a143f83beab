//! Hash-based key/value stores.
//!
//! Two collision strategies over the same unique-key contract:
//!
//! - [`HashTable`]: separate chaining, resize above 0.75 load.
//! - [`LinearProbingHash`]: open addressing with tombstones, resize above
//!   0.7 load, collision counter.
//!
//! Both implement [`KeyValueStore`](crate::store::KeyValueStore) and hash
//! keys with `std`'s `DefaultHasher`. Serialized snapshots record the
//! bucket layout as-is; restore them with a build that uses the same
//! hasher.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 11
//! - Knuth (1998), "The Art of Computer Programming", Vol. 3, §6.4

mod chained;
mod probing;

pub use chained::HashTable;
pub use probing::LinearProbingHash;

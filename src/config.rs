//! Tunables for every structure in the crate.
//!
//! [`CollectionsConfig`] bundles one section per structure so an owner that
//! builds the whole structure set can load a single value (e.g. from JSON)
//! and validate it once. Defaults reproduce the sizes the engine was
//! designed around: a 16-bucket chained table, a 101-slot probing table,
//! an order-4 B+Tree, a 50-deep undo stack and a 20x20 grid.

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, Result};

/// Separate-chaining hash table parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashTableConfig {
    /// Initial number of buckets.
    pub initial_capacity: usize,
    /// Resize when `len / capacity` exceeds this value.
    pub max_load_factor: f64,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_load_factor: 0.75,
        }
    }
}

/// Linear-probing hash table parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbingConfig {
    /// Initial slot count. A prime reduces clustering.
    pub initial_capacity: usize,
    /// Rebuild when `(len + tombstones) / capacity` exceeds this value.
    pub max_load_factor: f64,
}

impl Default for ProbingConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 101,
            max_load_factor: 0.7,
        }
    }
}

/// B+Tree parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BPlusTreeConfig {
    /// Maximum children per internal node. Must be even and at least 4.
    pub order: usize,
}

impl Default for BPlusTreeConfig {
    fn default() -> Self {
        Self { order: 4 }
    }
}

/// Bounded stack parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Maximum depth before the oldest element is evicted.
    pub capacity: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

/// Sparse grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 20, cols: 20 }
    }
}

/// Directed graph parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Fixed number of vertices, ids `0..vertices`.
    pub vertices: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { vertices: 20 }
    }
}

/// Configuration for the full structure set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub hash_table: HashTableConfig,
    pub probing: ProbingConfig,
    pub bplus_tree: BPlusTreeConfig,
    pub stack: StackConfig,
    pub grid: GridConfig,
    pub graph: GraphConfig,
}

impl CollectionsConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chained hash table section.
    pub fn with_hash_table(mut self, config: HashTableConfig) -> Self {
        self.hash_table = config;
        self
    }

    /// Sets the probing hash table section.
    pub fn with_probing(mut self, config: ProbingConfig) -> Self {
        self.probing = config;
        self
    }

    /// Sets the B+Tree order.
    pub fn with_bplus_order(mut self, order: usize) -> Self {
        self.bplus_tree.order = order;
        self
    }

    /// Sets the stack capacity.
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack.capacity = capacity;
        self
    }

    /// Sets the grid dimensions.
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = GridConfig { rows, cols };
        self
    }

    /// Sets the graph vertex count.
    pub fn with_graph_vertices(mut self, vertices: usize) -> Self {
        self.graph.vertices = vertices;
        self
    }

    /// Checks every section, reporting the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        self.hash_table.validate()?;
        self.probing.validate()?;
        self.bplus_tree.validate()?;
        self.stack.validate()?;
        Ok(())
    }
}

fn check_load_factor(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(CollectionError::invalid(format!(
            "{name} load factor must be in (0, 1], got {value}"
        )))
    }
}

impl HashTableConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(CollectionError::invalid("hash table capacity must be positive"));
        }
        check_load_factor("hash table", self.max_load_factor)
    }
}

impl ProbingConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(CollectionError::invalid("probing table capacity must be positive"));
        }
        // A full table could never terminate a lookup for an absent key.
        if self.max_load_factor > 0.0 && self.max_load_factor < 1.0 {
            return Ok(());
        }
        Err(CollectionError::invalid(format!(
            "probing load factor must be in (0, 1), got {}",
            self.max_load_factor
        )))
    }
}

impl BPlusTreeConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.order < 4 || self.order % 2 != 0 {
            return Err(CollectionError::invalid(format!(
                "B+Tree order must be even and at least 4, got {}",
                self.order
            )));
        }
        Ok(())
    }
}

impl StackConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CollectionError::invalid("stack capacity must be positive"));
        }
        Ok(())
    }
}

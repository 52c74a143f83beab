//! Sparse 2-D map over a fixed grid.
//!
//! Only cells that were explicitly set are stored. An unset cell is
//! "absent", which is different from holding a zero or default value.
//! Cells are kept in a `BTreeMap` keyed by `(row, col)`, so listing them
//! yields row-major order without sorting.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::error::{CollectionError, Result};

/// Fixed-size grid storing only occupied cells.
///
/// # Example
/// ```
/// use u_collections::sparse::SparseMatrix;
///
/// let mut floor = SparseMatrix::new(20, 20);
/// floor.set_value(2, 3, "treadmill").unwrap();
/// floor.set_value(5, 1, "rower").unwrap();
///
/// assert_eq!(floor.get(2, 3).unwrap(), Some(&"treadmill"));
/// assert_eq!(floor.get(0, 0).unwrap(), None);
/// assert_eq!(floor.non_zero_count(), 2);
/// assert!(floor.get(20, 0).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseMatrix<T> {
    #[serde(with = "cell_entries")]
    #[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
    cells: BTreeMap<(usize, usize), T>,
    rows: usize,
    cols: usize,
}

impl<T> SparseMatrix<T> {
    /// Creates an empty `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: BTreeMap::new(),
            rows,
            cols,
        }
    }

    /// Creates an empty grid sized by `config`.
    pub fn with_config(config: &GridConfig) -> Self {
        Self::new(config.rows, config.cols)
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(CollectionError::PositionOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Sets or clears a cell, returning what it held before.
    ///
    /// `None` removes the cell.
    pub fn set(&mut self, row: usize, col: usize, value: Option<T>) -> Result<Option<T>> {
        self.check(row, col)?;
        Ok(match value {
            Some(value) => self.cells.insert((row, col), value),
            None => self.cells.remove(&(row, col)),
        })
    }

    /// Stores `value` at a cell.
    pub fn set_value(&mut self, row: usize, col: usize, value: T) -> Result<Option<T>> {
        self.set(row, col, Some(value))
    }

    /// Value at a cell, or `None` when the cell is unset.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&T>> {
        self.check(row, col)?;
        Ok(self.cells.get(&(row, col)))
    }

    /// Whether a cell holds a value.
    pub fn has_value(&self, row: usize, col: usize) -> Result<bool> {
        self.check(row, col)?;
        Ok(self.cells.contains_key(&(row, col)))
    }

    /// Fraction of cells holding a value; 0 for a zero-sized grid.
    pub fn sparsity(&self) -> f64 {
        let total = self.rows as f64 * self.cols as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.cells.len() as f64 / total
    }

    /// Number of set cells.
    pub fn non_zero_count(&self) -> usize {
        self.cells.len()
    }

    /// Occupied cells as `((row, col), value)` in row-major order.
    pub fn non_zero_elements(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.cells.iter().map(|(&pos, value)| (pos, value))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Unsets every cell. Dimensions are kept.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<T> Default for SparseMatrix<T> {
    fn default() -> Self {
        Self::with_config(&GridConfig::default())
    }
}

impl<T: fmt::Display> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SparseMatrix[{}x{}, set={}, sparsity={:.2}%]",
            self.rows,
            self.cols,
            self.cells.len(),
            self.sparsity() * 100.0
        )?;
        for ((row, col), value) in &self.cells {
            writeln!(f, "  ({row},{col}) = {value}")?;
        }
        Ok(())
    }
}

/// JSON-style formats only allow string map keys, so cells are written as
/// a list of `[[row, col], value]` entries.
mod cell_entries {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Writes cells in row-major order.
    pub fn serialize<T, S>(
        cells: &BTreeMap<(usize, usize), T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(cells.iter())
    }

    /// Reads entries back; a repeated cell keeps its last value.
    pub fn deserialize<'de, T, D>(
        deserializer: D,
    ) -> Result<BTreeMap<(usize, usize), T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let entries: Vec<((usize, usize), T)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut grid = SparseMatrix::new(3, 4);
        assert_eq!(grid.set(1, 2, Some('x')), Ok(None));
        assert_eq!(grid.set(1, 2, Some('y')), Ok(Some('x')));
        assert_eq!(grid.get(1, 2), Ok(Some(&'y')));
        assert_eq!(grid.get(0, 0), Ok(None));
        assert_eq!(grid.has_value(1, 2), Ok(true));
        assert_eq!(grid.has_value(2, 3), Ok(false));
    }

    #[test]
    fn test_clearing_a_cell() {
        let mut grid = SparseMatrix::new(2, 2);
        grid.set_value(0, 1, 5).unwrap();
        grid.set_value(1, 1, 6).unwrap();
        assert_eq!(grid.set(0, 1, None), Ok(Some(5)));
        assert_eq!(grid.set(0, 1, None), Ok(None));
        assert_eq!(grid.non_zero_count(), 1);
        assert_eq!(grid.has_value(0, 1), Ok(false));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid: SparseMatrix<u8> = SparseMatrix::new(2, 3);
        let err = CollectionError::PositionOutOfBounds {
            row: 2,
            col: 0,
            rows: 2,
            cols: 3,
        };
        assert_eq!(grid.get(2, 0), Err(err.clone()));
        assert_eq!(grid.set(2, 0, Some(1)), Err(err.clone()));
        assert_eq!(grid.has_value(2, 0), Err(err));
        assert!(grid.get(0, 3).is_err());
        assert_eq!(grid.non_zero_count(), 0);
    }

    #[test]
    fn test_sparsity() {
        let mut grid = SparseMatrix::new(4, 5);
        assert_eq!(grid.sparsity(), 0.0);
        for col in 0..5 {
            grid.set_value(0, col, col).unwrap();
        }
        assert_eq!(grid.sparsity(), 0.25);

        let empty: SparseMatrix<u8> = SparseMatrix::new(0, 7);
        assert_eq!(empty.sparsity(), 0.0);
    }

    #[test]
    fn test_sparsity_on_huge_grid() {
        let mut grid = SparseMatrix::new(usize::MAX, 2);
        assert_eq!(grid.sparsity(), 0.0);

        grid.set_value(usize::MAX - 1, 1, 'x').unwrap();
        let sparsity = grid.sparsity();
        assert!(sparsity > 0.0 && sparsity < 1e-18);
        assert!(grid.to_string().contains("set=1"));
    }

    #[test]
    fn test_row_major_listing() {
        let mut grid = SparseMatrix::new(3, 3);
        grid.set_value(2, 0, "c").unwrap();
        grid.set_value(0, 2, "a").unwrap();
        grid.set_value(1, 1, "b").unwrap();

        let listed: Vec<_> = grid.non_zero_elements().collect();
        assert_eq!(listed, vec![((0, 2), &"a"), ((1, 1), &"b"), ((2, 0), &"c")]);
    }

    #[test]
    fn test_clear_and_defaults() {
        let mut grid = SparseMatrix::default();
        assert_eq!((grid.rows(), grid.cols()), (20, 20));
        grid.set_value(19, 19, 1.5).unwrap();
        grid.clear();
        assert_eq!(grid.non_zero_count(), 0);
    }

    #[test]
    fn test_display() {
        let mut grid = SparseMatrix::new(2, 2);
        grid.set_value(1, 0, 7).unwrap();
        let text = grid.to_string();
        assert!(text.starts_with("SparseMatrix[2x2, set=1, sparsity=25.00%]"));
        assert!(text.contains("(1,0) = 7"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = SparseMatrix::new(5, 5);
        grid.set_value(3, 4, "bench".to_string()).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let restored: SparseMatrix<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get(3, 4).unwrap().map(String::as_str), Some("bench"));
        assert_eq!(restored.rows(), 5);
    }
}

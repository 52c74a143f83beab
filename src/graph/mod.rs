//! Directed graph analysis.
//!
//! [`Graph`] stores a fixed set of vertices `0..n` with ordered successor
//! lists and answers reachability questions over them: breadth-first and
//! depth-first visit orders from a start vertex, and the strongly connected
//! components of the whole graph.
//!
//! Edges are kept exactly as added. Self-loops and parallel edges are
//! allowed and change nothing but the edge count.
//!
//! # Usage
//!
//! ```
//! use u_collections::graph::Graph;
//!
//! let mut g = Graph::new(4);
//! g.add_edge(0, 1).unwrap();
//! g.add_edge(1, 2).unwrap();
//! g.add_edge(2, 0).unwrap();
//! g.add_edge(2, 3).unwrap();
//!
//! assert_eq!(g.bfs(0).unwrap(), vec![0, 1, 2, 3]);
//! assert_eq!(g.find_strongly_connected_components().len(), 2);
//! ```

mod scc;
mod traversal;

use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;
use crate::error::{CollectionError, Result};

/// Directed, unweighted graph over a fixed vertex count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates a graph with vertices `0..vertices` and no edges.
    pub fn new(vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertices],
        }
    }

    /// Creates an edgeless graph sized by `config`.
    pub fn with_config(config: &GraphConfig) -> Self {
        Self::new(config.vertices)
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.adjacency.len() {
            Ok(())
        } else {
            Err(CollectionError::invalid(format!(
                "vertex {vertex} out of range for graph with {} vertices",
                self.adjacency.len()
            )))
        }
    }

    /// Adds the directed edge `from -> to`.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.adjacency[from].push(to);
        Ok(())
    }

    /// Successors of `vertex` in insertion order.
    pub fn neighbors(&self, vertex: usize) -> Result<&[usize]> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, counting duplicates and self-loops.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// The graph with every edge reversed.
    pub fn transpose(&self) -> Graph {
        let mut reversed = Graph::new(self.adjacency.len());
        for (from, successors) in self.adjacency.iter().enumerate() {
            for &to in successors {
                reversed.adjacency[to].push(from);
            }
        }
        reversed
    }

    /// Vertices reachable from `start`, in breadth-first order.
    pub fn bfs(&self, start: usize) -> Result<Vec<usize>> {
        self.check_vertex(start)?;
        Ok(traversal::breadth_first(&self.adjacency, start))
    }

    /// Vertices reachable from `start`, in depth-first preorder.
    ///
    /// Successors are explored in the order their edges were added.
    pub fn dfs(&self, start: usize) -> Result<Vec<usize>> {
        self.check_vertex(start)?;
        let mut visited = vec![false; self.adjacency.len()];
        let mut order = Vec::new();
        traversal::depth_first(&self.adjacency, start, &mut visited, |v| order.push(v), |_| {});
        Ok(order)
    }

    /// Partitions the vertices into strongly connected components.
    ///
    /// Each component lists its vertices in discovery order; components
    /// come out in topological order of the condensation.
    pub fn find_strongly_connected_components(&self) -> Vec<Vec<usize>> {
        scc::kosaraju(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(vertices: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(vertices);
        for &(from, to) in edges {
            g.add_edge(from, to).unwrap();
        }
        g
    }

    #[test]
    fn test_bfs_order() {
        let g = graph(6, &[(0, 1), (0, 2), (1, 3), (2, 4), (3, 5), (4, 5)]);
        assert_eq!(g.bfs(0).unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(g.bfs(4).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_dfs_follows_edge_order() {
        let g = graph(6, &[(0, 1), (0, 2), (1, 3), (2, 4), (3, 5), (4, 5)]);
        assert_eq!(g.dfs(0).unwrap(), vec![0, 1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_unreachable_vertices_omitted() {
        let g = graph(5, &[(0, 1), (3, 4)]);
        assert_eq!(g.bfs(0).unwrap(), vec![0, 1]);
        assert_eq!(g.dfs(0).unwrap(), vec![0, 1]);
        assert_eq!(g.dfs(2).unwrap(), vec![2]);
    }

    #[test]
    fn test_cycles_and_self_loops() {
        let g = graph(3, &[(0, 0), (0, 1), (1, 2), (2, 0), (0, 1)]);
        assert_eq!(g.dfs(0).unwrap(), vec![0, 1, 2]);
        assert_eq!(g.bfs(1).unwrap(), vec![1, 2, 0]);
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_out_of_range_vertex() {
        let mut g = Graph::new(3);
        assert!(matches!(
            g.add_edge(0, 3),
            Err(CollectionError::InvalidArgument(_))
        ));
        assert!(g.bfs(7).is_err());
        assert!(g.dfs(3).is_err());
        assert!(g.neighbors(3).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_transpose() {
        let g = graph(3, &[(0, 1), (0, 2), (2, 1)]);
        let t = g.transpose();
        assert_eq!(t.neighbors(1).unwrap(), &[0, 2]);
        assert_eq!(t.neighbors(0).unwrap(), &[] as &[usize]);
        assert_eq!(t.transpose(), g);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let n = 200_000;
        let mut g = Graph::new(n);
        for v in 0..n - 1 {
            g.add_edge(v, v + 1).unwrap();
        }
        assert_eq!(g.dfs(0).unwrap().len(), n);
        assert_eq!(g.find_strongly_connected_components().len(), n);
    }

    #[test]
    fn test_with_config() {
        let g = Graph::with_config(&GraphConfig::default());
        assert_eq!(g.vertex_count(), 20);
    }
}

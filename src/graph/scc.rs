//! Strongly connected components (Kosaraju).
//!
//! # Algorithm
//!
//! 1. Depth-first over the whole graph, recording vertices by finish time.
//! 2. Build the transpose.
//! 3. Take vertices in decreasing finish time; each depth-first tree grown
//!    from an unvisited one in the transpose is one component.
//!
//! # Complexity
//! O(V + E) time and space.
//!
//! # Reference
//! Sharir (1981), "A strong-connectivity algorithm and its applications in
//! data flow analysis"

use super::traversal::depth_first;
use super::Graph;

pub(super) fn kosaraju(graph: &Graph) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut finished = Vec::with_capacity(n);

    for vertex in 0..n {
        depth_first(
            &graph.adjacency,
            vertex,
            &mut visited,
            |_| {},
            |v| finished.push(v),
        );
    }

    let transpose = graph.transpose();
    visited.fill(false);
    let mut components = Vec::new();

    for &vertex in finished.iter().rev() {
        if visited[vertex] {
            continue;
        }
        let mut component = Vec::new();
        depth_first(
            &transpose.adjacency,
            vertex,
            &mut visited,
            |v| component.push(v),
            |_| {},
        );
        components.push(component);
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut components: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for component in &mut components {
            component.sort_unstable();
        }
        components.sort();
        components
    }

    #[test]
    fn test_cycle_with_tail() {
        let mut g = Graph::new(4);
        for (from, to) in [(0, 1), (1, 2), (2, 0), (2, 3)] {
            g.add_edge(from, to).unwrap();
        }
        let components = g.find_strongly_connected_components();
        assert_eq!(sorted(components.clone()), vec![vec![0, 1, 2], vec![3]]);
        // The source component comes first
        assert!(components[0].contains(&0));
    }

    #[test]
    fn test_isolated_vertices() {
        let g = Graph::new(3);
        assert_eq!(
            sorted(g.find_strongly_connected_components()),
            vec![vec![0], vec![1], vec![2]]
        );
    }

    #[test]
    fn test_two_cycles_joined_one_way() {
        let mut g = Graph::new(6);
        for (from, to) in [(0, 1), (1, 0), (1, 2), (2, 3), (3, 4), (4, 2), (5, 5)] {
            g.add_edge(from, to).unwrap();
        }
        assert_eq!(
            sorted(g.find_strongly_connected_components()),
            vec![vec![0, 1], vec![2, 3, 4], vec![5]]
        );
    }

    #[test]
    fn test_empty_graph() {
        assert!(Graph::new(0).find_strongly_connected_components().is_empty());
    }
}

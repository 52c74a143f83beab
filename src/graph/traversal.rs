//! Breadth-first and depth-first walks over an adjacency list.
//!
//! The depth-first walk keeps an explicit stack of `(vertex, next edge)`
//! frames instead of recursing. Each frame resumes its successor scan where
//! it left off, so the preorder and finish order are identical to the
//! recursive formulation while depth is limited only by heap memory.

use crate::containers::Queue;

pub(super) fn breadth_first(adjacency: &[Vec<usize>], start: usize) -> Vec<usize> {
    let mut visited = vec![false; adjacency.len()];
    let mut queue = Queue::new();
    let mut order = Vec::new();

    visited[start] = true;
    queue.enqueue(start);

    while let Ok(vertex) = queue.dequeue() {
        order.push(vertex);
        for &next in &adjacency[vertex] {
            if !visited[next] {
                visited[next] = true;
                queue.enqueue(next);
            }
        }
    }
    order
}

/// Depth-first walk from `start`, skipping vertices already in `visited`.
///
/// `on_enter` fires when a vertex is first reached and `on_finish` once
/// all of its successors are done.
pub(super) fn depth_first(
    adjacency: &[Vec<usize>],
    start: usize,
    visited: &mut [bool],
    mut on_enter: impl FnMut(usize),
    mut on_finish: impl FnMut(usize),
) {
    if visited[start] {
        return;
    }
    visited[start] = true;
    on_enter(start);
    let mut frames = vec![(start, 0usize)];

    while let Some(frame) = frames.last_mut() {
        let (vertex, edge) = *frame;
        match adjacency[vertex].get(edge) {
            Some(&next) => {
                frame.1 += 1;
                if !visited[next] {
                    visited[next] = true;
                    on_enter(next);
                    frames.push((next, 0));
                }
            }
            None => {
                frames.pop();
                on_finish(vertex);
            }
        }
    }
}

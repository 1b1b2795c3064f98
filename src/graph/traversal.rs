use std::{collections::VecDeque, fmt::Debug, hash::Hash};
use num_traits::Float;
use rustc_hash::FxHashSet;

use super::WeightedGraph;


impl<N, W> WeightedGraph<N, W>
where
    N: Eq + Hash + Clone + Ord + Debug,
    W: Float + Debug,
{

    /// Breadth-first search from `start`
    /// https://en.wikipedia.org/wiki/Breadth-first_search
    /// Neighbors of each vertex are queued in ascending label order.
    /// Returns the visitation order, empty if `start` is not in the graph.
    pub fn bfs(&self, start: &N) -> Vec<N> {
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut visited: FxHashSet<&N> = FxHashSet::default();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);

        while let Some(vertex) = queue.pop_front() {
            order.push(vertex.clone());

            for neighbor in self.sorted_neighbors(vertex) {
                // marking on enqueue keeps each vertex in the queue at most once
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        order
    }

    /// Depth-first search from `start`, pre-order
    /// https://en.wikipedia.org/wiki/Depth-first_search
    /// Neighbors are descended into in ascending label order. Uses an explicit
    /// stack so long chains cannot exhaust the call stack.
    /// Returns the visitation order, empty if `start` is not in the graph.
    pub fn dfs(&self, start: &N) -> Vec<N> {
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut visited: FxHashSet<&N> = FxHashSet::default();
        let mut stack = vec![start];

        while let Some(vertex) = stack.pop() {
            // a vertex can sit on the stack several times, only the first pop counts
            if !visited.insert(vertex) {
                continue;
            }
            order.push(vertex.clone());

            // pushed in reverse so the smallest label is popped first
            for neighbor in self.sorted_neighbors(vertex).into_iter().rev() {
                if !visited.contains(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        order
    }
}

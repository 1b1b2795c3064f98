use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Float;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::collections::FxIndexMap;
use crate::errors::{GraphError, GraphResult};
use super::{GraphNodeMap, WeightedGraph};
use super::shortest_path::shortest_path;


/// Cheapest way between two vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Route<N, W> {
    pub distance: W,
    pub path: Vec<N>, // start first, goal last
}


/// Every vertex reachable from a source along with its cheapest cost and path
#[derive(Debug, Clone)]
pub struct ShortestPaths<N, W> {
    node_map: GraphNodeMap<N, W>,
}

impl<N, W> ShortestPaths<N, W>
where
    N: Eq + Hash + Clone,
    W: Copy,
{

    /// Vertex the search started from
    pub fn source(&self) -> Option<&N> {
        self.node_map.get_index(0).map(|(node, _)| node)
    }

    /// Cheapest cost to `vertex`, `None` when unreachable
    pub fn distance_to(&self, vertex: &N) -> Option<W> {
        self.node_map.get(vertex).map(|&(_, cost)| cost)
    }

    /// Cheapest path to `vertex`, `None` when unreachable
    pub fn path_to(&self, vertex: &N) -> Option<Vec<N>> {
        let index = self.node_map.get_index_of(vertex)?;
        shortest_path(&self.node_map, index)
    }

    pub fn route_to(&self, vertex: &N) -> Option<Route<N, W>> {
        Some(Route {
            distance: self.distance_to(vertex)?,
            path: self.path_to(vertex)?,
        })
    }

    /// Full distance map, in discovery order
    pub fn distances(&self) -> FxIndexMap<N, W> {
        self.node_map
            .iter()
            .map(|(node, &(_, cost))| (node.clone(), cost))
            .collect()
    }

    /// Full path map, in discovery order
    pub fn paths(&self) -> FxIndexMap<N, Vec<N>> {
        (0..self.node_map.len())
            .filter_map(|index| {
                let (node, _) = self.node_map.get_index(index)?;
                Some((node.clone(), shortest_path(&self.node_map, index)?))
            })
            .collect()
    }

    /// Number of reachable vertices, the source included
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}


impl<N, W> WeightedGraph<N, W>
where
    N: Eq + Hash + Clone + Ord + Debug,
    W: Float + Debug,
{

    /// Identify the shortest path using Dijkstra's Algorithm
    /// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
    /// The search stops as soon as `goal` is popped off the queue - with
    /// non-negative weights its cost is final at that point.
    pub fn shortest_path(&self, start: &N, goal: &N) -> GraphResult<Route<N, W>> {
        self.require_vertex(start)?;
        self.require_vertex(goal)?;

        let (node_map, goal_index) = self.build_dijkstra_graph(start, Some(goal));

        let unreachable = || GraphError::Unreachable {
            start: format!("{start:?}"),
            goal: format!("{goal:?}"),
        };

        let goal_index = goal_index.ok_or_else(unreachable)?;
        let path = shortest_path(&node_map, goal_index).ok_or_else(unreachable)?;
        let (_, &(_, distance)) = node_map.get_index(goal_index).ok_or_else(unreachable)?;

        Ok(Route { distance, path })
    }

    /// Returns a full map of the graph, includes all (reachable) nodes and costs
    pub fn shortest_paths(&self, start: &N) -> GraphResult<ShortestPaths<N, W>> {
        self.require_vertex(start)?;

        let (node_map, _) = self.build_dijkstra_graph(start, None);

        Ok(ShortestPaths { node_map })
    }


    /// Traverses the graph using Dijkstra's algorithm
    /// Returns a map of nodes with their smallest costs along with the index of the goal node
    fn build_dijkstra_graph(&self, start: &N, goal: Option<&N>) -> (GraphNodeMap<N, W>, Option<usize>) {
        tracing::trace!(?start, ?goal, "dijkstra search");

        // Nodes to visit - binary heap sorts Biggest to Smallest, NodeId flips the order
        // We store the cost from the starting node
        let mut nodes_to_visit: BinaryHeap<NodeId<W>> = BinaryHeap::new();

        // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
        // for the start node, parent_index is set to usize::MAX to indicate it has no parent
        let mut nodes_map: GraphNodeMap<N, W> = FxIndexMap::default();

        let start_index = nodes_map.insert_full(start.clone(), (usize::MAX, W::zero())).0;
        nodes_to_visit.push(NodeId {
            index: start_index,
            cost: W::zero(),
        });

        // Loop over each node to visit, removing the smallest node
        while let Some(NodeId { cost, index }) = nodes_to_visit.pop() {

            // fetch current best cost for node
            let Some((node, &(_, best))) = nodes_map.get_index(index) else {
                continue;
            };

            // Stale queue entry - a cheaper path to this node was already found
            if cost > best {
                continue;
            }

            if goal == Some(node) {
                tracing::trace!(?node, ?best, settled = nodes_map.len(), "dijkstra goal reached");
                return (nodes_map, Some(index));
            }

            let Some(neighbors) = self.adjacency.get(node) else {
                continue;
            };

            for (neighbor, &edge_cost) in neighbors {

                // new cost to reach this node = edge cost + node cost
                let new_cost = best + edge_cost;

                let neighbor_index;
                match nodes_map.entry(neighbor.clone()) {
                    Vacant(e) => {
                        // This is the first time we're seeing this neighbor
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            // We've found a better path to this neighbor
                            neighbor_index = e.index();
                            e.insert((index, new_cost));
                        } else {
                            // The existing path is better, do nothing
                            continue;
                        }
                    }
                }

                // Only add to the queue if we've found a better path
                nodes_to_visit.push(NodeId {
                    index: neighbor_index,
                    cost: new_cost,
                });
            }
        }

        (nodes_map, None)
    }
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - ordering is reversed so the max-heap pops the cheapest node first
/// - weights are validated on insert, so costs are never NaN
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T,
}

impl<T: PartialOrd> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}
impl<T: PartialOrd> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl<T: PartialOrd> Eq for NodeId<T> {}

pub mod dijkstra;
mod shortest_path;
mod traversal;

pub use dijkstra::{Route, ShortestPaths};

use std::{fmt, fmt::Debug, hash::Hash};
use num_traits::Float;

use crate::collections::FxIndexMap;
use crate::errors::{GraphError, GraphResult, InvariantViolation};


/// Node map built by the Dijkstra search - parent index and cost per vertex
/// N: Node - vertex of the graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the total cost to reach this node from the start
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;


/// Undirected weighted graph stored as an adjacency map
/// vertex -> (neighbor -> weight)
///
/// Every edge is stored in both directions with the same weight. Vertices are
/// kept in insertion order, neighbors are visited in ascending label order by
/// the traversals so results are reproducible.
#[derive(Debug, Clone)]
pub struct WeightedGraph<N, W = f64> {
    adjacency: FxIndexMap<N, FxIndexMap<N, W>>,
}

impl<N, W> Default for WeightedGraph<N, W> {
    fn default() -> Self {
        Self {
            adjacency: FxIndexMap::default(),
        }
    }
}

impl<N, W> WeightedGraph<N, W>
where
    N: Eq + Hash + Clone + Ord + Debug,
    W: Float + Debug,
{

    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `vertices` vertices
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            adjacency: FxIndexMap::with_capacity_and_hasher(vertices, Default::default()),
        }
    }

    /// Add an isolated vertex, returns false if it already existed
    pub fn add_vertex(&mut self, vertex: N) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, FxIndexMap::default());
        true
    }

    pub fn contains_vertex(&self, vertex: &N) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Connect u and v in both directions, creating missing vertices.
    /// An existing edge has its weight overwritten - the previous weight is returned.
    pub fn add_edge(&mut self, u: N, v: N, weight: W) -> GraphResult<Option<W>> {
        // Dijkstra relies on weights never decreasing a path cost
        if !weight.is_finite() || weight < W::zero() {
            return Err(GraphError::InvalidWeight(format!("{weight:?}")));
        }
        Ok(self.link(u, v, weight))
    }

    /// Connect u and v with weight one
    pub fn add_unit_edge(&mut self, u: N, v: N) -> Option<W> {
        self.link(u, v, W::one())
    }

    fn link(&mut self, u: N, v: N, weight: W) -> Option<W> {
        let previous = self.adjacency
            .entry(u.clone())
            .or_default()
            .insert(v.clone(), weight);
        self.adjacency
            .entry(v)
            .or_default()
            .insert(u, weight);
        previous
    }

    /// Remove the edge between u and v in both directions.
    /// Both vertices stay in the graph. No-op when the edge does not exist.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> Option<W> {
        let weight = self.adjacency.get_mut(u)?.shift_remove(v)?;
        if let Some(neighbors) = self.adjacency.get_mut(v) {
            neighbors.shift_remove(u);
        }
        Some(weight)
    }

    /// Weight of the edge between u and v
    pub fn weight(&self, u: &N, v: &N) -> Option<W> {
        self.adjacency.get(u)?.get(v).copied()
    }

    /// Neighbors of a vertex with the connecting edge weight, in insertion order.
    /// Empty for unknown vertices.
    pub fn neighbors(&self, vertex: &N) -> impl Iterator<Item = (&N, W)> {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(n, w)| (n, *w)))
    }

    /// Neighbor labels in ascending order - drives the deterministic traversals
    pub(crate) fn sorted_neighbors(&self, vertex: &N) -> Vec<&N> {
        let mut neighbors: Vec<&N> = self
            .adjacency
            .get(vertex)
            .map(|neighbors| neighbors.keys().collect())
            .unwrap_or_default();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn vertices(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges, a self loop counts once
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .flat_map(|(u, neighbors)| neighbors.keys().filter(move |v| u <= *v))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Check that every edge has a reverse edge with the same weight
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for (u, neighbors) in &self.adjacency {
            for (v, weight) in neighbors {
                if self.weight(v, u) != Some(*weight) {
                    return Err(InvariantViolation::AsymmetricEdge {
                        from: format!("{u:?}"),
                        to: format!("{v:?}"),
                    });
                }
            }
        }
        Ok(())
    }

    fn require_vertex(&self, vertex: &N) -> GraphResult<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(format!("{vertex:?}")))
        }
    }
}

/// One line per vertex: `vertex: neighbor(weight), neighbor(weight)`
impl<N, W> fmt::Display for WeightedGraph<N, W>
where
    N: fmt::Display,
    W: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (vertex, neighbors)) in self.adjacency.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{vertex}:")?;
            for (j, (neighbor, weight)) in neighbors.iter().enumerate() {
                let sep = if j == 0 { " " } else { ", " };
                write!(f, "{sep}{neighbor}({weight})")?;
            }
        }
        Ok(())
    }
}

use thiserror::Error;

use crate::directory::CityId;


/// Failures raised by the weighted graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Vertex label is not part of the graph
    #[error("vertex {0} not found")]
    VertexNotFound(String),

    /// Both endpoints exist but no chain of edges connects them
    #[error("no path from {start} to {goal}")]
    Unreachable { start: String, goal: String },

    /// Edge weights must be non-negative numbers
    #[error("invalid edge weight {0}, weights must be non-negative")]
    InvalidWeight(String),
}

/// Failures reported by the navigation directory
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    #[error("city {0} not found")]
    CityNotFound(CityId),

    #[error("neighborhood {name} is not registered on city {city}")]
    NeighborhoodNotFound { city: CityId, name: String },

    #[error("neighborhood {name} is already registered on city {city}")]
    DuplicateNeighborhood { city: CityId, name: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Broken structural invariant - only produced by the `validate` diagnostics.
/// Seeing one of these means a bug in the tree or graph code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("keys out of order: {left} is not below {right}")]
    Unordered { left: String, right: String },

    #[error("stale height at key {key}: stored {stored}, expected {expected}")]
    StaleHeight { key: String, stored: usize, expected: usize },

    #[error("balance factor {factor} at key {key}")]
    Unbalanced { key: String, factor: isize },

    #[error("edge {from} -> {to} has no matching reverse edge")]
    AsymmetricEdge { from: String, to: String },

    #[error("{indexed} cities indexed but {networks} networks stored")]
    NetworkMismatch { indexed: usize, networks: usize },

    #[error("city {city} has no network")]
    MissingNetwork { city: CityId },

    #[error("neighborhood {name} of city {city} is missing from its network")]
    MissingNeighborhood { city: CityId, name: String },
}

pub type GraphResult<T> = Result<T, GraphError>;
pub type DirectoryResult<T> = Result<T, DirectoryError>;

//! City navigation index.
//!
//! Cities are kept in an AVL tree keyed by id, and every city owns an
//! undirected weighted graph of its neighborhoods. [`NavigationDirectory`]
//! binds the two so a network lives exactly as long as its city is indexed.
//!
//! ```
//! use citynav::NavigationDirectory;
//!
//! let mut directory = NavigationDirectory::new();
//! directory.add_city(1, "Recife");
//! directory.add_neighborhood(1, "Boa Viagem").unwrap();
//! directory.add_neighborhood(1, "Graças").unwrap();
//! directory.add_route(1, "Boa Viagem", "Graças", 7.5).unwrap();
//!
//! let route = directory.shortest_route(1, "Graças", "Boa Viagem").unwrap();
//! assert_eq!(route.distance, 7.5);
//! assert_eq!(route.path, vec!["Graças", "Boa Viagem"]);
//! ```

pub mod collections;
pub mod directory;
pub mod errors;
pub mod graph;
pub mod tree;

pub use directory::{City, CityId, NavigationDirectory, Network, Search};
pub use errors::{DirectoryError, GraphError, InvariantViolation};
pub use graph::{Route, ShortestPaths, WeightedGraph};
pub use tree::{BalancedOrderedMap, OrderedIndex, OrderedMap, TraversalOrder};

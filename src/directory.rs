use rustc_hash::FxHashMap;
use tracing::debug;

use crate::collections::FxIndexSet;
use crate::errors::{DirectoryError, DirectoryResult, InvariantViolation};
use crate::graph::{Route, ShortestPaths, WeightedGraph};
use crate::tree::{BalancedOrderedMap, OrderedIndex, TraversalOrder};


/// Key of a city in the directory
pub type CityId = i64;

/// Route network of a single city - neighborhood name -> neighborhood name
pub type Network = WeightedGraph<String, f64>;


/// Indexed city record
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    id: CityId,
    name: String,
    neighborhoods: FxIndexSet<String>, // registration order
}

impl City {

    pub fn new(id: CityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            neighborhoods: FxIndexSet::default(),
        }
    }

    pub fn id(&self) -> CityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered neighborhoods in registration order
    pub fn neighborhoods(&self) -> impl Iterator<Item = &str> {
        self.neighborhoods.iter().map(String::as_str)
    }

    pub fn has_neighborhood(&self, name: &str) -> bool {
        self.neighborhoods.contains(name)
    }
}


/// Graph search used by [`NavigationDirectory::explore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    Breadth,
    Depth,
}


/// Balanced index of cities, each owning its own neighborhood route network.
///
/// A network exists for a city id exactly while the id is in the index:
/// both are created by [`add_city`](Self::add_city) and dropped by
/// [`remove_city`](Self::remove_city).
#[derive(Debug, Default)]
pub struct NavigationDirectory {
    cities: BalancedOrderedMap<CityId, City>,
    networks: FxHashMap<CityId, Network>,
}

impl NavigationDirectory {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city, or rename it if the id is already indexed.
    /// A renamed city keeps its neighborhoods and routes.
    /// Returns true when the city was newly created.
    pub fn add_city(&mut self, id: CityId, name: impl Into<String>) -> bool {
        let name = name.into();

        if let Some(city) = self.cities.get_mut(&id) {
            debug!(id, old = %city.name, new = %name, "city renamed");
            city.name = name;
            return false;
        }

        debug!(id, %name, "city added");
        self.cities.insert(id, City::new(id, name));
        self.networks.insert(id, Network::new());
        true
    }

    /// Remove a city together with its route network.
    /// No-op returning `None` when the id is not indexed.
    pub fn remove_city(&mut self, id: CityId) -> Option<City> {
        let city = self.cities.remove(&id)?;
        self.networks.remove(&id);
        debug!(id, name = %city.name, "city removed");
        Some(city)
    }

    /// Register a neighborhood on a city. The neighborhood becomes a vertex of
    /// the city network with no routes yet.
    pub fn add_neighborhood(&mut self, id: CityId, name: impl Into<String>) -> DirectoryResult<()> {
        let name = name.into();

        // both halves are resolved before either is touched
        let (Some(city), Some(network)) = (self.cities.get_mut(&id), self.networks.get_mut(&id)) else {
            debug!(id, %name, "neighborhood rejected, city not found");
            return Err(DirectoryError::CityNotFound(id));
        };

        if city.has_neighborhood(&name) {
            debug!(id, %name, "neighborhood already registered");
            return Err(DirectoryError::DuplicateNeighborhood { city: id, name });
        }

        city.neighborhoods.insert(name.clone());
        network.add_vertex(name);
        Ok(())
    }

    /// Add or re-weight the route between two registered neighborhoods.
    /// Returns the previous distance when the route already existed.
    pub fn add_route(&mut self, id: CityId, from: &str, to: &str, distance: f64) -> DirectoryResult<Option<f64>> {
        self.require_neighborhoods(id, &[from, to])
            .inspect_err(|err| debug!(%err, "route rejected"))?;

        let previous = self
            .network_mut(id)?
            .add_edge(from.to_string(), to.to_string(), distance)
            .inspect_err(|err| debug!(%err, "route rejected"))?;

        debug!(id, from, to, distance, "route added");
        Ok(previous)
    }

    /// Remove the route between two neighborhoods, returning its distance.
    /// `Ok(None)` when both neighborhoods exist but are not directly connected.
    pub fn remove_route(&mut self, id: CityId, from: &str, to: &str) -> DirectoryResult<Option<f64>> {
        self.require_neighborhoods(id, &[from, to])?;

        let removed = self
            .network_mut(id)?
            .remove_edge(&from.to_string(), &to.to_string());

        if removed.is_some() {
            debug!(id, from, to, "route removed");
        }
        Ok(removed)
    }

    /// Cheapest route between two neighborhoods of a city.
    ///
    /// A missing city is reported as [`DirectoryError::CityNotFound`], two
    /// neighborhoods without a connecting route as
    /// [`GraphError::Unreachable`](crate::errors::GraphError::Unreachable).
    pub fn shortest_route(&self, id: CityId, from: &str, to: &str) -> DirectoryResult<Route<String, f64>> {
        self.require_neighborhoods(id, &[from, to])?;
        let route = self
            .network_ref(id)?
            .shortest_path(&from.to_string(), &to.to_string())?;
        Ok(route)
    }

    /// Cheapest routes from one neighborhood to every neighborhood reachable from it
    pub fn routes_from(&self, id: CityId, from: &str) -> DirectoryResult<ShortestPaths<String, f64>> {
        self.require_neighborhoods(id, &[from])?;
        let paths = self.network_ref(id)?.shortest_paths(&from.to_string())?;
        Ok(paths)
    }

    /// Neighborhoods reachable from `start`, in visitation order
    pub fn explore(&self, id: CityId, start: &str, search: Search) -> DirectoryResult<Vec<String>> {
        self.require_neighborhoods(id, &[start])?;
        let network = self.network_ref(id)?;
        let start = start.to_string();

        Ok(match search {
            Search::Breadth => network.bfs(&start),
            Search::Depth => network.dfs(&start),
        })
    }

    /// Every city in ascending id order
    pub fn list_cities(&self) -> Vec<(CityId, &City)> {
        self.traverse(TraversalOrder::InOrder)
    }

    /// Every city in the given tree traversal order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<(CityId, &City)> {
        self.cities
            .traverse(order)
            .into_iter()
            .map(|(id, city)| (*id, city))
            .collect()
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn network(&self, id: CityId) -> Option<&Network> {
        self.networks.get(&id)
    }

    pub fn contains_city(&self, id: CityId) -> bool {
        self.cities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Height of the city index
    pub fn index_height(&self) -> usize {
        self.cities.height()
    }

    /// Check the index, every network and the pairing between the two
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.cities.validate()?;

        if self.networks.len() != self.cities.len() {
            return Err(InvariantViolation::NetworkMismatch {
                indexed: self.cities.len(),
                networks: self.networks.len(),
            });
        }

        for (id, city) in self.cities.in_order() {
            let network = self.networks.get(id).ok_or(InvariantViolation::MissingNetwork { city: *id })?;
            network.validate()?;

            if let Some(name) = city.neighborhoods().find(|name| !network.contains_vertex(&name.to_string())) {
                return Err(InvariantViolation::MissingNeighborhood {
                    city: *id,
                    name: name.to_string(),
                });
            }
        }

        Ok(())
    }


    fn require_neighborhoods(&self, id: CityId, names: &[&str]) -> DirectoryResult<()> {
        let city = self.cities.get(&id).ok_or(DirectoryError::CityNotFound(id))?;

        match names.iter().find(|name| !city.has_neighborhood(name)) {
            Some(name) => Err(DirectoryError::NeighborhoodNotFound {
                city: id,
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn network_ref(&self, id: CityId) -> DirectoryResult<&Network> {
        self.networks.get(&id).ok_or(DirectoryError::CityNotFound(id))
    }

    fn network_mut(&mut self, id: CityId) -> DirectoryResult<&mut Network> {
        self.networks.get_mut(&id).ok_or(DirectoryError::CityNotFound(id))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;

    // Helper - one city with a small network
    //
    //   Centro -1- Norte -2- Leste -1- Sul
    //      \_________________/
    //               4
    fn create_test_directory() -> NavigationDirectory {
        let mut directory = NavigationDirectory::new();
        directory.add_city(1, "Recife");
        for name in ["Centro", "Norte", "Leste", "Sul"] {
            directory.add_neighborhood(1, name).unwrap();
        }
        directory.add_route(1, "Centro", "Norte", 1.0).unwrap();
        directory.add_route(1, "Norte", "Leste", 2.0).unwrap();
        directory.add_route(1, "Centro", "Leste", 4.0).unwrap();
        directory.add_route(1, "Leste", "Sul", 1.0).unwrap();
        directory
    }

    #[test]
    fn test_add_city_creates_network() {
        let mut directory = NavigationDirectory::new();

        assert!(directory.add_city(7, "Olinda"));

        assert_eq!(directory.city(7).map(City::name), Some("Olinda"));
        assert!(directory.network(7).is_some_and(Network::is_empty));
        directory.validate().unwrap();
    }

    #[test]
    fn test_readd_city_keeps_network() {
        let mut directory = create_test_directory();

        assert!(!directory.add_city(1, "Recife Antigo"));

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.city(1).map(City::name), Some("Recife Antigo"));
        assert_eq!(directory.city(1).map(|c| c.neighborhoods().count()), Some(4));
        let route = directory.shortest_route(1, "Centro", "Sul").unwrap();
        assert_eq!(route.distance, 4.0);
    }

    #[test]
    fn test_shortest_route() {
        let directory = create_test_directory();

        let route = directory.shortest_route(1, "Centro", "Sul").unwrap();

        assert_eq!(route.distance, 4.0);
        assert_eq!(route.path, vec!["Centro", "Norte", "Leste", "Sul"]);
    }

    #[test]
    fn test_neighborhood_preconditions() {
        let mut directory = create_test_directory();

        assert_eq!(
            directory.add_neighborhood(1, "Centro"),
            Err(DirectoryError::DuplicateNeighborhood { city: 1, name: "Centro".to_string() })
        );
        assert_eq!(
            directory.add_neighborhood(2, "Centro"),
            Err(DirectoryError::CityNotFound(2))
        );
        assert_eq!(
            directory.add_route(1, "Centro", "Oeste", 3.0),
            Err(DirectoryError::NeighborhoodNotFound { city: 1, name: "Oeste".to_string() })
        );
        // rejected route leaves the network untouched
        assert_eq!(directory.network(1).map(Network::edge_count), Some(4));
    }

    #[test]
    fn test_rejected_neighborhood_keeps_record_and_network_paired() {
        let mut directory = create_test_directory();

        assert!(directory.add_neighborhood(1, "Norte").is_err());
        assert!(directory.add_neighborhood(9, "Norte").is_err());

        assert_eq!(directory.city(1).map(|c| c.neighborhoods().count()), Some(4));
        assert_eq!(directory.network(1).map(Network::vertex_count), Some(4));
        assert!(directory.network(9).is_none());
        directory.validate().unwrap();

        directory.add_neighborhood(1, "Oeste").unwrap();
        assert!(directory.network(1).is_some_and(|n| n.contains_vertex(&"Oeste".to_string())));
        directory.validate().unwrap();
    }

    #[test]
    fn test_invalid_distance_is_reported() {
        let mut directory = create_test_directory();

        let result = directory.add_route(1, "Centro", "Sul", -2.0);

        assert!(matches!(result, Err(DirectoryError::Graph(GraphError::InvalidWeight(_)))));
    }

    #[test]
    fn test_isolated_neighborhood_is_unreachable() {
        let mut directory = create_test_directory();
        directory.add_neighborhood(1, "Ilha").unwrap();

        let result = directory.shortest_route(1, "Centro", "Ilha");

        assert!(matches!(result, Err(DirectoryError::Graph(GraphError::Unreachable { .. }))));
    }

    #[test]
    fn test_remove_route() {
        let mut directory = create_test_directory();

        assert_eq!(directory.remove_route(1, "Norte", "Leste"), Ok(Some(2.0)));
        assert_eq!(directory.remove_route(1, "Norte", "Leste"), Ok(None));

        // only the direct Centro - Leste route is left
        let route = directory.shortest_route(1, "Norte", "Sul").unwrap();
        assert_eq!(route.distance, 6.0);
        assert_eq!(route.path, vec!["Norte", "Centro", "Leste", "Sul"]);
    }

    #[test]
    fn test_explore() {
        let directory = create_test_directory();

        assert_eq!(
            directory.explore(1, "Centro", Search::Breadth).unwrap(),
            vec!["Centro", "Leste", "Norte", "Sul"]
        );
        assert_eq!(
            directory.explore(1, "Centro", Search::Depth).unwrap(),
            vec!["Centro", "Leste", "Norte", "Sul"]
        );
        assert_eq!(
            directory.explore(1, "Sul", Search::Depth).unwrap(),
            vec!["Sul", "Leste", "Centro", "Norte"]
        );
    }

    #[test]
    fn test_routes_from() {
        let directory = create_test_directory();

        let paths = directory.routes_from(1, "Sul").unwrap();

        assert_eq!(paths.len(), 4);
        assert_eq!(paths.distance_to(&"Centro".to_string()), Some(4.0));
        assert_eq!(paths.distance_to(&"Norte".to_string()), Some(3.0));
    }
}

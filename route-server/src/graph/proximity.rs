//! The proximity graph and its builder.

use std::collections::HashMap;

use tracing::debug;

use crate::cities::CityDataError;
use crate::domain::City;

use super::config::GraphConfig;
use super::geodesic::{geodesic_km, round_km};

/// Index of a city in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One direction of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// The neighbouring city.
    pub to: NodeId,

    /// Geodesic distance plus surcharge, rounded to 2 decimals.
    pub weight_km: f64,
}

/// Error from graph construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two cities share a name, so nodes would be ambiguous
    #[error("duplicate city name: {0}")]
    DuplicateCity(String),
}

impl From<GraphError> for CityDataError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::DuplicateCity(name) => CityDataError::DuplicateCity(name),
        }
    }
}

/// Undirected weighted graph of cities joined by the proximity rule.
///
/// Every city is a node, including those with no qualifying neighbour.
/// Each unordered pair carries at most one edge, stored once in each
/// endpoint's adjacency list with the same weight. There are no self-loops.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    cities: Vec<City>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl ProximityGraph {
    /// Build the graph from the full city list.
    ///
    /// Compares every unordered pair once (O(N²)). Node order follows the
    /// input order.
    pub fn build(cities: Vec<City>, config: &GraphConfig) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(cities.len());
        for (i, city) in cities.iter().enumerate() {
            if index.insert(city.name().to_string(), NodeId(i)).is_some() {
                return Err(GraphError::DuplicateCity(city.name().to_string()));
            }
        }

        let mut adjacency = vec![Vec::new(); cities.len()];
        let mut edge_count = 0;

        for (i, a) in cities.iter().enumerate() {
            for (j, b) in cities.iter().enumerate().skip(i + 1) {
                if !config.are_close(a, b) {
                    continue;
                }

                let weight_km = round_km(geodesic_km(a, b) + config.surcharge_km);
                adjacency[i].push(Edge {
                    to: NodeId(j),
                    weight_km,
                });
                adjacency[j].push(Edge {
                    to: NodeId(i),
                    weight_km,
                });
                edge_count += 1;
            }
        }

        let graph = Self {
            cities,
            index,
            adjacency,
            edge_count,
        };

        debug!(
            cities = graph.len(),
            edges = graph.edge_count,
            isolated = graph.isolated_count(),
            "Built proximity graph"
        );

        Ok(graph)
    }

    /// Number of cities (nodes).
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if the graph has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of cities without any neighbour.
    pub fn isolated_count(&self) -> usize {
        self.adjacency.iter().filter(|edges| edges.is_empty()).count()
    }

    /// All cities in dataset order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Look up a node by exact city name.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Check if a city is in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The city at a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` did not come from this graph.
    pub fn city(&self, node: NodeId) -> &City {
        &self.cities[node.0]
    }

    /// Edges leaving a node.
    pub fn edges(&self, node: NodeId) -> &[Edge] {
        self.adjacency.get(node.0).map_or(&[][..], Vec::as_slice)
    }

    /// Weight of the direct edge between two cities, if they are adjacent.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let from = self.node(a)?;
        let to = self.node(b)?;
        self.edges(from)
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight_km)
    }

    /// Search cities by name.
    ///
    /// Case-insensitive substring match. Names starting with the query come
    /// first; otherwise dataset order is kept.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&City> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &City)> = self
            .cities
            .iter()
            .filter_map(|city| {
                let name = city.name().to_lowercase();
                name.find(&needle).map(|pos| (pos != 0, city))
            })
            .collect();

        // Stable sort keeps dataset order within each group
        matches.sort_by_key(|(not_prefix, _)| *not_prefix);
        matches.into_iter().take(limit).map(|(_, c)| c).collect()
    }
}

//! Proximity graph over the city dataset.
//!
//! Cities whose longitudes fall in nearby whole-degree bands are joined by
//! an undirected edge weighted with their geodesic distance plus a fixed
//! road surcharge. The graph is built once per dataset and only read
//! afterwards; shortest paths are answered with Dijkstra's algorithm.

mod config;
mod geodesic;
mod proximity;
mod shortest_path;

pub use config::GraphConfig;
pub use geodesic::{geodesic_km, round_km};
pub use proximity::{Edge, GraphError, NodeId, ProximityGraph};
pub use shortest_path::{Endpoint, PathError, ShortestPath, shortest_path};

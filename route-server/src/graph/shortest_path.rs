//! Dijkstra shortest paths over the proximity graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use ordered_float::OrderedFloat;
use tracing::trace;

use super::geodesic::round_km;
use super::proximity::{NodeId, ProximityGraph};

/// Which end of a path a city name was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl Endpoint {
    /// Request field that carries this endpoint.
    pub fn field(self) -> &'static str {
        match self {
            Endpoint::Origin => "from_city",
            Endpoint::Destination => "to_city",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Error from a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// City name is not a node in the graph
    #[error("unknown city for {endpoint}: {name}")]
    UnknownCity { endpoint: Endpoint, name: String },

    /// Both cities exist but lie in different components
    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },
}

/// Lowest-weight path between two cities.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// City names from origin to destination, both included.
    pub cities: Vec<String>,

    /// Sum of edge weights along the path, rounded to 2 decimals.
    pub distance_km: f64,
}

/// Find the shortest path between two cities by exact name.
///
/// Among equal-weight paths the one found first is returned; the heap is
/// keyed on (distance, node) so the choice is deterministic for a given
/// graph. A city routed to itself yields a single-city path of length zero.
pub fn shortest_path(
    graph: &ProximityGraph,
    from: &str,
    to: &str,
) -> Result<ShortestPath, PathError> {
    let source = graph.node(from).ok_or_else(|| PathError::UnknownCity {
        endpoint: Endpoint::Origin,
        name: from.to_string(),
    })?;
    let target = graph.node(to).ok_or_else(|| PathError::UnknownCity {
        endpoint: Endpoint::Destination,
        name: to.to_string(),
    })?;

    if source == target {
        return Ok(ShortestPath {
            cities: vec![from.to_string()],
            distance_km: 0.0,
        });
    }

    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];

    dist[source.0] = 0.0;

    // Reverse turns the max-heap into a min-heap on (distance, node).
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == target {
            return Ok(reconstruct(graph, &prev, target, cost));
        }

        // Stale entry, a shorter distance was already settled
        if cost > dist[node.0] {
            continue;
        }

        for edge in graph.edges(node) {
            let next = cost + edge.weight_km;
            if next < dist[edge.to.0] {
                dist[edge.to.0] = next;
                prev[edge.to.0] = Some(node);
                heap.push(Reverse((OrderedFloat(next), edge.to)));
            }
        }
    }

    trace!(from, to, "No route between cities");

    Err(PathError::NoRoute {
        from: from.to_string(),
        to: to.to_string(),
    })
}

fn reconstruct(
    graph: &ProximityGraph,
    prev: &[Option<NodeId>],
    target: NodeId,
    total_km: f64,
) -> ShortestPath {
    let mut cities = vec![graph.city(target).name().to_string()];
    let mut cur = target;
    while let Some(p) = prev[cur.0] {
        cities.push(graph.city(p).name().to_string());
        cur = p;
    }
    cities.reverse();

    ShortestPath {
        cities,
        distance_km: round_km(total_km),
    }
}

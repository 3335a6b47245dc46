//! Turning a shortest path into a route answer.

use crate::domain::{AvgSpeed, TravelTime};
use crate::graph::ShortestPath;

use super::query::RouteQuery;

/// Answer to a route query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Destination city name.
    pub destination: String,

    /// Cities from origin to destination, both included.
    pub path: Vec<String>,

    /// Total distance in km, rounded to 2 decimals.
    pub distance_km: f64,

    /// Speed the estimate was computed for.
    pub avg_speed: AvgSpeed,

    /// Estimated driving time.
    pub travel_time: TravelTime,
}

impl RouteResult {
    /// Build the answer for `query` from its shortest path.
    pub fn from_path(query: &RouteQuery, path: &ShortestPath) -> Self {
        Self {
            destination: query.to_city.clone(),
            path: path.cities.clone(),
            distance_km: path.distance_km,
            avg_speed: query.avg_speed,
            travel_time: TravelTime::estimate(path.distance_km, query.avg_speed),
        }
    }

    /// Number of cities passed through between origin and destination.
    pub fn stopovers(&self) -> usize {
        self.path.len().saturating_sub(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::City;
    use crate::graph::{GraphConfig, ProximityGraph, shortest_path};
    use crate::routing::RouteError;

    fn graph(cities: &[(&str, f64, f64)]) -> ProximityGraph {
        let cities = cities
            .iter()
            .map(|(name, lat, lon)| City::new(*name, *lat, *lon).unwrap())
            .collect();
        ProximityGraph::build(cities, &GraphConfig::default()).unwrap()
    }

    fn query(from: &str, to: &str, kmh: i64) -> RouteQuery {
        RouteQuery::new(from, to, AvgSpeed::new(kmh).unwrap()).unwrap()
    }

    fn plan(g: &ProximityGraph, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        let path = shortest_path(g, &query.from_city, &query.to_city)?;
        Ok(RouteResult::from_path(query, &path))
    }

    #[test]
    fn result_fields() {
        let g = graph(&[("A", 48.0, 30.9), ("B", 48.0, 31.5), ("C", 48.0, 32.5)]);
        let result = plan(&g, &query("A", "C", 80)).unwrap();

        assert_eq!(result.destination, "C");
        assert_eq!(result.path, ["A", "B", "C"]);
        assert_eq!(result.stopovers(), 1);
        assert_eq!(result.avg_speed.kmh(), 80);
        assert_eq!(
            result.travel_time,
            TravelTime::estimate(result.distance_km, result.avg_speed)
        );
    }

    #[test]
    fn time_from_distance() {
        let path = ShortestPath {
            cities: vec!["A".into(), "B".into()],
            distance_km: 170.0,
        };
        let result = RouteResult::from_path(&query("A", "B", 85), &path);
        assert_eq!(result.travel_time.to_string(), "2 hours 0 minutes");

        let path = ShortestPath {
            cities: vec!["A".into(), "B".into()],
            distance_km: 100.0,
        };
        let result = RouteResult::from_path(&query("A", "B", 80), &path);
        assert_eq!(result.travel_time.to_string(), "1 hours 15 minutes");
    }

    #[test]
    fn unknown_city_names_field() {
        let g = graph(&[("Kyiv", 50.45, 30.52)]);
        let err = plan(&g, &query("Nowhere", "Kyiv", 80)).unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownCity {
                field: "from_city",
                name: "Nowhere".into()
            }
        );
    }

    #[test]
    fn disconnected_cities() {
        let g = graph(&[("A", 48.0, 20.0), ("B", 48.0, 30.0)]);
        let err = plan(&g, &query("A", "B", 80)).unwrap_err();
        assert_eq!(err.kind(), "no_route");
    }

    #[test]
    fn faster_is_never_slower() {
        let g = graph(&[("A", 48.0, 30.9), ("B", 49.0, 31.5), ("C", 50.0, 32.5)]);
        let slow = plan(&g, &query("A", "C", 40)).unwrap();
        let fast = plan(&g, &query("A", "C", 130)).unwrap();
        assert_eq!(slow.distance_km, fast.distance_km);
        assert!(fast.travel_time <= slow.travel_time);
    }
}

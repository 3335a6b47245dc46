//! Route service owning the current graph.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheConfig, RouteCache};
use crate::cities::{CityDataError, CitySource, load_cities};
use crate::graph::{GraphConfig, ProximityGraph, shortest_path};

use super::error::RouteError;
use super::planner::RouteResult;
use super::query::RouteQuery;

/// A built graph together with its revision and build time.
///
/// Snapshots are immutable; a refresh publishes a new one.
#[derive(Debug)]
pub struct GraphSnapshot {
    graph: ProximityGraph,
    revision: u64,
    loaded_at: DateTime<Utc>,
}

impl GraphSnapshot {
    fn new(graph: ProximityGraph, revision: u64) -> Self {
        Self {
            graph,
            revision,
            loaded_at: Utc::now(),
        }
    }

    /// The graph.
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    /// Starts at 1 and increases with every refresh.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// When this graph was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Answers route queries against the current graph.
///
/// Queries take the current snapshot under a brief read lock and then work
/// on it lock-free. A refresh builds the new graph outside the lock and
/// publishes it with a single pointer swap, so readers see either the old
/// graph or the new one, never a partial build.
pub struct RouteService {
    current: RwLock<Arc<GraphSnapshot>>,
    config: GraphConfig,
    cache: RouteCache,
}

impl RouteService {
    /// Create a service around an already built graph.
    pub fn new(graph: ProximityGraph, config: GraphConfig, cache_config: &CacheConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(GraphSnapshot::new(graph, 1))),
            config,
            cache: RouteCache::new(cache_config),
        }
    }

    /// Load the dataset and build the initial graph.
    ///
    /// Fails if the dataset is unavailable; there is no partial graph.
    pub async fn load(
        source: &CitySource,
        config: GraphConfig,
        cache_config: &CacheConfig,
    ) -> Result<Self, CityDataError> {
        let graph = build_graph(source, &config).await?;

        info!(
            source = %source,
            cities = graph.len(),
            edges = graph.edge_count(),
            isolated = graph.isolated_count(),
            "Loaded city graph"
        );

        Ok(Self::new(graph, config, cache_config))
    }

    /// The graph currently in service.
    pub async fn snapshot(&self) -> Arc<GraphSnapshot> {
        self.current.read().await.clone()
    }

    /// Number of shortest paths currently cached.
    pub async fn cached_routes(&self) -> u64 {
        self.cache.entry_count().await
    }

    /// Graph construction parameters.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Answer a route query.
    pub async fn route(&self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        let snapshot = self.snapshot().await;
        let revision = snapshot.revision();

        let path = match self.cache.get(revision, &query.from_city, &query.to_city).await {
            Some(path) => path,
            None => {
                let path = Arc::new(shortest_path(
                    snapshot.graph(),
                    &query.from_city,
                    &query.to_city,
                )?);
                self.cache
                    .insert(revision, &query.from_city, &query.to_city, path.clone())
                    .await;
                path
            }
        };

        debug!(
            from = %query.from_city,
            to = %query.to_city,
            distance_km = path.distance_km,
            hops = path.cities.len().saturating_sub(1),
            revision,
            "Route planned"
        );

        Ok(RouteResult::from_path(query, &path))
    }

    /// Reload the dataset, rebuild the graph and swap it in.
    ///
    /// On failure the current graph stays in service and the error is
    /// returned. Returns the number of cities in the new graph.
    pub async fn refresh(&self, source: &CitySource) -> Result<usize, CityDataError> {
        let graph = build_graph(source, &self.config).await?;
        let count = graph.len();
        let edges = graph.edge_count();

        let revision = {
            let mut guard = self.current.write().await;
            let revision = guard.revision() + 1;
            *guard = Arc::new(GraphSnapshot::new(graph, revision));
            revision
        };

        // Old entries are already unreachable by revision; free them
        self.cache.invalidate_all();

        info!(cities = count, edges, revision, "Refreshed city graph");

        Ok(count)
    }
}

async fn build_graph(
    source: &CitySource,
    config: &GraphConfig,
) -> Result<ProximityGraph, CityDataError> {
    let cities = load_cities(source).await?;
    Ok(ProximityGraph::build(cities, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvgSpeed, City};
    use tempfile::tempdir;

    async fn route(
        service: &RouteService,
        from: &str,
        to: &str,
        kmh: Option<i64>,
    ) -> Result<RouteResult, RouteError> {
        let avg_speed = match kmh {
            Some(kmh) => AvgSpeed::new(kmh)?,
            None => AvgSpeed::DEFAULT,
        };
        service.route(&RouteQuery::new(from, to, avg_speed)?).await
    }

    fn service(cities: &[(&str, f64, f64)]) -> RouteService {
        let cities = cities
            .iter()
            .map(|(name, lat, lon)| City::new(*name, *lat, *lon).unwrap())
            .collect();
        let config = GraphConfig::default();
        let graph = ProximityGraph::build(cities, &config).unwrap();
        RouteService::new(graph, config, &CacheConfig::default())
    }

    async fn embedded() -> RouteService {
        RouteService::load(
            &CitySource::Embedded,
            GraphConfig::default(),
            &CacheConfig::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn lviv_to_kyiv() {
        let service = embedded().await;
        let result = route(&service, "Lviv", "Kyiv", None).await.unwrap();

        assert_eq!(result.destination, "Kyiv");
        assert_eq!(result.path.first().map(String::as_str), Some("Lviv"));
        assert_eq!(result.path.last().map(String::as_str), Some("Kyiv"));
        assert!(result.path.len() > 2, "Lviv and Kyiv are not adjacent");
        assert!(result.distance_km > 467.0);
        assert_eq!(result.avg_speed.kmh(), 80);
    }

    #[tokio::test]
    async fn embedded_routes_symmetric() {
        let service = embedded().await;
        let there = route(&service, "Uzhhorod", "Luhansk", None).await.unwrap();
        let back = route(&service, "Luhansk", "Uzhhorod", None).await.unwrap();
        assert_eq!(there.distance_km, back.distance_km);
    }

    #[tokio::test]
    async fn unknown_city() {
        let service = embedded().await;
        let err = route(&service, "Nowhere", "Kyiv", Some(80)).await.unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownCity {
                field: "from_city",
                name: "Nowhere".into()
            }
        );
    }

    #[tokio::test]
    async fn speed_validated_before_search() {
        let service = embedded().await;
        let err = route(&service, "Nowhere", "Kyiv", Some(39)).await.unwrap_err();
        assert_eq!(err.field(), Some("avg_speed"));

        assert!(route(&service, "Lviv", "Kyiv", Some(40)).await.is_ok());
        assert!(route(&service, "Lviv", "Kyiv", Some(130)).await.is_ok());
        assert!(route(&service, "Lviv", "Kyiv", Some(131)).await.is_err());
    }

    #[tokio::test]
    async fn no_route() {
        let service = service(&[("A", 48.0, 20.0), ("B", 48.0, 24.0), ("C", 48.0, 28.0)]);
        let err = route(&service, "A", "C", None).await.unwrap_err();
        assert_eq!(err.kind(), "no_route");
    }

    #[tokio::test]
    async fn cached_answer_matches() {
        let service = service(&[("A", 48.0, 30.9), ("B", 48.0, 31.5), ("C", 48.0, 32.5)]);
        let first = route(&service, "A", "C", Some(100)).await.unwrap();
        let second = route(&service, "A", "C", Some(50)).await.unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(first.distance_km, second.distance_km);
        assert!(second.travel_time > first.travel_time);
    }

    #[tokio::test]
    async fn repeated_query_cached_once() {
        let service = service(&[("A", 48.0, 30.9), ("B", 48.0, 31.5), ("C", 48.0, 32.5)]);
        assert_eq!(service.cached_routes().await, 0);

        route(&service, "A", "C", None).await.unwrap();
        route(&service, "A", "C", Some(120)).await.unwrap();
        assert_eq!(service.cached_routes().await, 1);

        route(&service, "C", "A", None).await.unwrap();
        assert_eq!(service.cached_routes().await, 2);
    }

    #[tokio::test]
    async fn refresh_swaps_graph() {
        let service = service(&[("A", 48.0, 30.0), ("B", 48.0, 30.5)]);
        assert!(route(&service, "A", "B", None).await.is_ok());
        assert_eq!(service.snapshot().await.revision(), 1);

        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.json");
        std::fs::write(
            &path,
            r#"[
                {"city": "A", "lat": "48.0", "lng": "30.0"},
                {"city": "C", "lat": "48.0", "lng": "31.0"}
            ]"#,
        )
        .unwrap();

        let count = service.refresh(&CitySource::File(path)).await.unwrap();
        assert_eq!(count, 2);

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.revision(), 2);
        assert!(snapshot.graph().contains("C"));

        // Cached A -> B answer must not survive the swap
        let err = route(&service, "A", "B", None).await.unwrap_err();
        assert_eq!(err.kind(), "unknown_city");
        assert!(route(&service, "A", "C", None).await.is_ok());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_graph() {
        let service = service(&[("A", 48.0, 30.0), ("B", 48.0, 30.5)]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.json");
        std::fs::write(&path, r#"[{"city": "A", "lat": "48.0"}]"#).unwrap();

        let err = service.refresh(&CitySource::File(path)).await.unwrap_err();
        assert!(matches!(err, CityDataError::InvalidRecord { .. }));

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.revision(), 1);
        assert!(route(&service, "A", "B", None).await.is_ok());
    }

    #[tokio::test]
    async fn load_fails_on_missing_dataset() {
        let result = RouteService::load(
            &CitySource::File("/nonexistent/cities.json".into()),
            GraphConfig::default(),
            &CacheConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(CityDataError::Io { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_queries_agree() {
        let service = Arc::new(embedded().await);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { route(&service, "Odesa", "Kharkiv", None).await })
            })
            .collect();

        let mut distances = Vec::new();
        for handle in handles {
            distances.push(handle.await.unwrap().unwrap().distance_km);
        }
        assert!(distances.windows(2).all(|w| w[0] == w[1]));
    }
}

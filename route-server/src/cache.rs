//! Caching layer for shortest-path answers.
//!
//! A path depends only on the graph and the two city names, so answers are
//! cached per graph revision. A rebuilt graph gets a new revision, which
//! makes every earlier entry unreachable even before it is evicted.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::graph::ShortestPath;

/// Cache key: (graph revision, origin, destination).
type PathKey = (u64, String, String);

/// Cached shortest path.
type PathEntry = Arc<ShortestPath>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of shortest paths keyed by graph revision and city pair.
#[derive(Clone)]
pub struct RouteCache {
    paths: MokaCache<PathKey, PathEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { paths }
    }

    /// Get a cached path.
    pub async fn get(&self, revision: u64, from: &str, to: &str) -> Option<PathEntry> {
        self.paths
            .get(&(revision, from.to_string(), to.to_string()))
            .await
    }

    /// Insert a path into the cache.
    pub async fn insert(&self, revision: u64, from: &str, to: &str, entry: PathEntry) {
        self.paths
            .insert((revision, from.to_string(), to.to_string()), entry)
            .await;
    }

    /// Number of cached paths, after applying pending evictions.
    pub async fn entry_count(&self) -> u64 {
        self.paths.run_pending_tasks().await;
        self.paths.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.paths.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(cities: &[&str], distance_km: f64) -> PathEntry {
        Arc::new(ShortestPath {
            cities: cities.iter().map(|c| c.to_string()).collect(),
            distance_km,
        })
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[tokio::test]
    async fn cache_creation() {
        let cache = RouteCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = RouteCache::new(&CacheConfig::default());
        let entry = path(&["Lviv", "Kyiv"], 477.53);

        cache.insert(1, "Lviv", "Kyiv", entry.clone()).await;
        assert_eq!(cache.get(1, "Lviv", "Kyiv").await, Some(entry));
    }

    #[tokio::test]
    async fn entry_count_after_inserts() {
        let cache = RouteCache::new(&CacheConfig::default());
        cache.insert(1, "Lviv", "Kyiv", path(&["Lviv", "Kyiv"], 477.53)).await;
        cache.insert(1, "Kyiv", "Lviv", path(&["Kyiv", "Lviv"], 477.53)).await;
        cache.insert(1, "Lviv", "Kyiv", path(&["Lviv", "Kyiv"], 477.53)).await;

        assert_eq!(cache.entry_count().await, 2);
    }

    #[tokio::test]
    async fn key_includes_direction_and_revision() {
        let cache = RouteCache::new(&CacheConfig::default());
        cache.insert(1, "Lviv", "Kyiv", path(&["Lviv", "Kyiv"], 477.53)).await;

        assert!(cache.get(1, "Kyiv", "Lviv").await.is_none());
        assert!(cache.get(2, "Lviv", "Kyiv").await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_hides_entries() {
        let cache = RouteCache::new(&CacheConfig::default());
        cache.insert(1, "A", "B", path(&["A", "B"], 20.0)).await;

        cache.invalidate_all();
        assert!(cache.get(1, "A", "B").await.is_none());
    }
}

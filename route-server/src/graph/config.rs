//! Graph construction parameters.

use crate::domain::City;

/// Parameters of the proximity rule.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    /// Kilometres added to every edge on top of the geodesic distance,
    /// modelling roads that don't follow the great circle.
    pub surcharge_km: f64,

    /// Two cities are joined when their longitude bands differ by
    /// strictly less than this.
    pub longitude_band: i64,
}

impl GraphConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(surcharge_km: f64, longitude_band: i64) -> Self {
        Self {
            surcharge_km,
            longitude_band,
        }
    }

    /// Whether two cities qualify for a direct edge.
    pub fn are_close(&self, a: &City, b: &City) -> bool {
        (a.longitude_band() - b.longitude_band()).abs() < self.longitude_band
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            surcharge_km: 10.0,
            longitude_band: 2,
        }
    }
}

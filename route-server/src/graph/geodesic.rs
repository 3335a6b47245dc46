//! Great-circle distance on the WGS-84 ellipsoid.

use geo::{Distance, Geodesic, Point};

use crate::domain::City;

/// Geodesic distance between two cities in kilometres.
///
/// Uses Karney's algorithm on the WGS-84 ellipsoid, accurate to a few
/// nanometres.
pub fn geodesic_km(a: &City, b: &City) -> f64 {
    let from = Point::new(a.longitude(), a.latitude());
    let to = Point::new(b.longitude(), b.latitude());
    Geodesic::distance(from, to) / 1000.0
}

/// Round a distance to two decimal places (10 m).
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

//! Validated route queries.

use crate::domain::AvgSpeed;

use super::error::RouteError;

/// A request to route between two cities.
///
/// City names are kept verbatim; whether they exist is decided by the
/// graph, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    /// Origin city name.
    pub from_city: String,

    /// Destination city name.
    pub to_city: String,

    /// Average driving speed used for the time estimate.
    pub avg_speed: AvgSpeed,
}

impl RouteQuery {
    /// Create a query, rejecting blank city names.
    pub fn new(
        from_city: impl Into<String>,
        to_city: impl Into<String>,
        avg_speed: AvgSpeed,
    ) -> Result<Self, RouteError> {
        let from_city = from_city.into();
        let to_city = to_city.into();

        if from_city.trim().is_empty() {
            return Err(RouteError::missing("from_city"));
        }
        if to_city.trim().is_empty() {
            return Err(RouteError::missing("to_city"));
        }

        Ok(Self {
            from_city,
            to_city,
            avg_speed,
        })
    }
}

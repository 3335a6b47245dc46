//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{AvgSpeed, City, InvalidSpeed};
use crate::graph::GraphConfig;
use crate::routing::{GraphSnapshot, RouteError, RouteQuery, RouteResult};

/// JSON body of a route request.
#[derive(Debug, Default, Deserialize)]
pub struct RouteRequest {
    /// Origin city name
    pub from_city: Option<String>,

    /// Destination city name
    pub to_city: Option<String>,

    /// Average speed in km/h (defaults to 80)
    pub avg_speed: Option<SpeedValue>,
}

/// A speed as sent by clients: a JSON number or a numeric string.
///
/// Any other JSON value is kept so it can be rejected as a bad
/// `avg_speed` rather than as malformed JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpeedValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl SpeedValue {
    /// Validate into an `AvgSpeed`.
    pub fn to_speed(&self) -> Result<AvgSpeed, InvalidSpeed> {
        match self {
            SpeedValue::Number(kmh) => AvgSpeed::from_f64(*kmh),
            SpeedValue::Text(text) => AvgSpeed::parse(text),
            SpeedValue::Other(value) => Err(InvalidSpeed::NotAnInteger(value.to_string())),
        }
    }
}

/// Query-string parameters for a route request.
#[derive(Debug, Default, Deserialize)]
pub struct RouteParams {
    #[serde(rename = "from-city")]
    pub from_city: Option<String>,

    #[serde(rename = "to-city")]
    pub to_city: Option<String>,

    #[serde(rename = "avg-speed")]
    pub avg_speed: Option<String>,
}

impl RouteRequest {
    /// Merge with query-string parameters and validate.
    ///
    /// A non-empty query parameter takes precedence over the body field of
    /// the same name.
    pub fn into_query(self, params: RouteParams) -> Result<RouteQuery, RouteError> {
        let from_city = non_empty(params.from_city)
            .or_else(|| non_empty(self.from_city))
            .ok_or_else(|| RouteError::missing("from_city"))?;

        let to_city = non_empty(params.to_city)
            .or_else(|| non_empty(self.to_city))
            .ok_or_else(|| RouteError::missing("to_city"))?;

        let avg_speed = match (non_empty(params.avg_speed), self.avg_speed) {
            (Some(text), _) => AvgSpeed::parse(&text)?,
            (None, Some(value)) => value.to_speed()?,
            (None, None) => AvgSpeed::DEFAULT,
        };

        RouteQuery::new(from_city, to_city, avg_speed)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Route answer in the public JSON shape:
///
/// ```json
/// {
///   "city": "Kyiv",
///   "shortest_way": ["Lviv", "...", "Kyiv"],
///   "distance": 512.34,
///   "time_drive (80 km/h)": "6 hours 25 minutes"
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// Destination city
    pub city: String,

    /// Cities along the route
    pub shortest_way: Vec<String>,

    /// Distance in km
    pub distance: f64,

    /// Speed the time was estimated for
    pub avg_speed: u32,

    /// "<H> hours <M> minutes"
    pub time_drive: String,
}

impl RouteResponse {
    /// Create from a route result.
    pub fn from_result(result: &RouteResult) -> Self {
        Self {
            city: result.destination.clone(),
            shortest_way: result.path.clone(),
            distance: result.distance_km,
            avg_speed: result.avg_speed.kmh(),
            time_drive: result.travel_time.to_string(),
        }
    }

    /// Key of the time field, which names the speed.
    pub fn time_drive_key(&self) -> String {
        format!("time_drive ({} km/h)", self.avg_speed)
    }
}

impl Serialize for RouteResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("city", &self.city)?;
        map.serialize_entry("shortest_way", &self.shortest_way)?;
        map.serialize_entry("distance", &self.distance)?;
        map.serialize_entry(&self.time_drive_key(), &self.time_drive)?;
        map.end()
    }
}

/// All loaded city names.
#[derive(Debug, Serialize)]
pub struct CityListResponse {
    /// Number of cities
    pub count: usize,

    /// City names in dataset order
    pub cities: Vec<String>,
}

/// Request to search cities by name.
#[derive(Debug, Deserialize)]
pub struct CitySearchRequest {
    /// Search text
    #[serde(default)]
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A city in search results.
#[derive(Debug, Serialize)]
pub struct CitySearchResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&City> for CitySearchResult {
    fn from(city: &City) -> Self {
        Self {
            name: city.name().to_string(),
            latitude: city.latitude(),
            longitude: city.longitude(),
        }
    }
}

/// Response for city search.
#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    /// Matching cities, best first
    pub cities: Vec<CitySearchResult>,
}

/// Summary of the graph in service.
#[derive(Debug, Serialize)]
pub struct GraphStatsResponse {
    pub cities: usize,
    pub edges: usize,
    pub isolated: usize,
    pub revision: u64,
    pub loaded_at: DateTime<Utc>,
    pub surcharge_km: f64,
    pub longitude_band: i64,
    pub cached_routes: u64,
}

impl GraphStatsResponse {
    /// Create from a graph snapshot.
    pub fn new(snapshot: &GraphSnapshot, config: &GraphConfig, cached_routes: u64) -> Self {
        let graph = snapshot.graph();
        Self {
            cities: graph.len(),
            edges: graph.edge_count(),
            isolated: graph.isolated_count(),
            revision: snapshot.revision(),
            loaded_at: snapshot.loaded_at(),
            surcharge_km: config.surcharge_km,
            longitude_band: config.longitude_band,
            cached_routes,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Machine-readable error category
    pub kind: &'static str,

    /// Request field at fault
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

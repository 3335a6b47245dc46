//! Parsing city records into validated cities.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::City;

use super::error::CityDataError;
use super::source::CitySource;

/// Raw dataset record. Coordinates may be JSON numbers or numeric strings;
/// any other fields in the record are ignored.
#[derive(Debug, Deserialize)]
struct CityRecord {
    city: Option<String>,
    lat: Option<Value>,
    lng: Option<Value>,
}

/// Load and validate all cities from a source.
///
/// Order is preserved from the source.
pub async fn load_cities(source: &CitySource) -> Result<Vec<City>, CityDataError> {
    let json = source.read().await?;
    let cities = parse_cities(&json)?;
    debug!(source = %source, cities = cities.len(), "Loaded city dataset");
    Ok(cities)
}

/// Parse a JSON array of `{city, lat, lng}` records.
///
/// Every record must carry a name and numeric coordinates; a single bad
/// record rejects the whole dataset rather than being skipped.
pub fn parse_cities(json: &str) -> Result<Vec<City>, CityDataError> {
    let records: Vec<CityRecord> =
        serde_json::from_str(json).map_err(|e| CityDataError::Json {
            message: e.to_string(),
        })?;

    if records.is_empty() {
        return Err(CityDataError::Empty);
    }

    let mut seen = HashSet::with_capacity(records.len());
    let mut cities = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let city = to_city(index, record)?;
        if !seen.insert(city.name().to_string()) {
            return Err(CityDataError::DuplicateCity(city.name().to_string()));
        }
        cities.push(city);
    }

    Ok(cities)
}

fn to_city(index: usize, record: CityRecord) -> Result<City, CityDataError> {
    let invalid = |reason: String| CityDataError::InvalidRecord { index, reason };

    let name = record
        .city
        .ok_or_else(|| invalid("missing field `city`".to_string()))?;
    let lat = coordinate(record.lat.as_ref()).map_err(|r| invalid(format!("`lat` {r}")))?;
    let lng = coordinate(record.lng.as_ref()).map_err(|r| invalid(format!("`lng` {r}")))?;

    City::new(name, lat, lng).map_err(|e| invalid(e.reason().to_string()))
}

/// Read a coordinate from a JSON number or numeric string.
fn coordinate(value: Option<&Value>) -> Result<f64, &'static str> {
    match value {
        None | Some(Value::Null) => Err("is missing"),
        Some(Value::Number(n)) => n.as_f64().ok_or("is not a number"),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| "is not a number"),
        Some(_) => Err("is not a number"),
    }
}

//! City records.

use std::fmt;

/// Error returned when a city fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid city: {reason}")]
pub struct InvalidCity {
    reason: &'static str,
}

impl InvalidCity {
    /// Why the city was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A named city with a WGS-84 position in decimal degrees.
///
/// Cities are immutable once built. The name is the unique key used by the
/// graph, compared exactly (case-sensitive, no trimming).
///
/// # Examples
///
/// ```
/// use route_server::domain::City;
///
/// let kyiv = City::new("Kyiv", 50.4501, 30.5234).unwrap();
/// assert_eq!(kyiv.name(), "Kyiv");
/// assert_eq!(kyiv.longitude_band(), 30);
///
/// // Coordinates must be finite and on the globe
/// assert!(City::new("Nowhere", 91.0, 0.0).is_err());
/// assert!(City::new("Nowhere", 0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl City {
    /// Create a city, validating its name and coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, InvalidCity> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(InvalidCity {
                reason: "name must not be empty",
            });
        }

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCity {
                reason: "latitude must be a number between -90 and 90",
            });
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCity {
                reason: "longitude must be a number between -180 and 180",
            });
        }

        Ok(Self {
            name,
            latitude,
            longitude,
        })
    }

    /// The city name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Integer part of the longitude, truncated toward zero.
    ///
    /// Two cities are candidates for a direct edge when their bands differ
    /// by less than the configured band width.
    pub fn longitude_band(&self) -> i64 {
        self.longitude.trunc() as i64
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

//! Average driving speed.

use std::fmt;

/// Error returned when an average speed is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSpeed {
    /// Value is an integer outside the accepted range
    #[error("average speed must be between {min} and {max} km/h, got {value}")]
    OutOfRange { value: i64, min: u32, max: u32 },

    /// Value is not an integer
    #[error("average speed must be an integer, got {0:?}")]
    NotAnInteger(String),
}

/// Average driving speed in km/h, always within `[MIN, MAX]`.
///
/// # Examples
///
/// ```
/// use route_server::domain::AvgSpeed;
///
/// assert_eq!(AvgSpeed::default().kmh(), 80);
/// assert_eq!(AvgSpeed::new(40).unwrap().kmh(), 40);
/// assert!(AvgSpeed::new(131).is_err());
/// assert!(AvgSpeed::parse("fast").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AvgSpeed(u32);

impl AvgSpeed {
    /// Slowest accepted speed.
    pub const MIN: u32 = 40;

    /// Fastest accepted speed.
    pub const MAX: u32 = 130;

    /// Speed used when the caller does not supply one.
    pub const DEFAULT: AvgSpeed = AvgSpeed(80);

    /// Create a speed from an integer number of km/h.
    pub fn new(kmh: i64) -> Result<Self, InvalidSpeed> {
        if kmh < i64::from(Self::MIN) || kmh > i64::from(Self::MAX) {
            return Err(InvalidSpeed::OutOfRange {
                value: kmh,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(AvgSpeed(kmh as u32))
    }

    /// Parse a speed from text such as a query parameter.
    pub fn parse(s: &str) -> Result<Self, InvalidSpeed> {
        let kmh: i64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidSpeed::NotAnInteger(s.to_string()))?;
        Self::new(kmh)
    }

    /// Create a speed from a JSON number. Fractional values are rejected.
    pub fn from_f64(kmh: f64) -> Result<Self, InvalidSpeed> {
        if !kmh.is_finite() || kmh.fract() != 0.0 {
            return Err(InvalidSpeed::NotAnInteger(kmh.to_string()));
        }
        Self::new(kmh.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    }

    /// The speed in km/h.
    pub fn kmh(self) -> u32 {
        self.0
    }
}

impl Default for AvgSpeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AvgSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km/h", self.0)
    }
}
